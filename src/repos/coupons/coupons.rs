use diesel;
use diesel::connection::AnsiTransactionManager;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::query_dsl::RunQueryDsl;
use diesel::Connection;
use failure::Fail;

use models::*;
use moderation::HIDE_SCORE_THRESHOLD;
use repos::types::RepoResult;
use schema::coupons::dsl as Coupons;

/// Coupons repository, responsible for handling coupon
pub struct CouponsRepoImpl<'a, T: Connection<Backend = Pg, TransactionManager = AnsiTransactionManager> + 'static> {
    pub db_conn: &'a T,
}

pub trait CouponsRepo {
    /// Creates new coupon, `None` when the store already has this code
    fn create(&self, payload: NewCoupon) -> RepoResult<Option<Coupon>>;

    /// Get coupon
    fn get(&self, id_arg: CouponId) -> RepoResult<Option<Coupon>>;

    /// Coupons of the store still above the hide threshold, best score first
    fn find_visible_by_store(&self, store_arg: StoreDomain) -> RepoResult<Vec<Coupon>>;

    /// Applies a vote delta, returns the number of updated rows
    fn apply_vote(&self, id_arg: CouponId, delta: VoteDelta) -> RepoResult<usize>;
}

impl<'a, T: Connection<Backend = Pg, TransactionManager = AnsiTransactionManager> + 'static> CouponsRepoImpl<'a, T> {
    pub fn new(db_conn: &'a T) -> Self {
        Self { db_conn }
    }
}

impl<'a, T: Connection<Backend = Pg, TransactionManager = AnsiTransactionManager> + 'static> CouponsRepo for CouponsRepoImpl<'a, T> {
    /// Creates new coupon
    fn create(&self, payload: NewCoupon) -> RepoResult<Option<Coupon>> {
        debug!("Create new coupon {:?}.", payload);
        let payload = payload.canonical();

        let query = diesel::insert_into(Coupons::coupons)
            .values((
                Coupons::id.eq(CouponId::new()),
                Coupons::store.eq(&payload.store),
                Coupons::code.eq(&payload.code),
                Coupons::description.eq(payload.description_or_default()),
            )).on_conflict_do_nothing();

        query
            .get_result::<Coupon>(self.db_conn)
            .optional()
            .map_err(|e| e.context(format!("Creates new coupon: {:?} error occurred", payload)).into())
    }

    /// Get coupon
    fn get(&self, id_arg: CouponId) -> RepoResult<Option<Coupon>> {
        debug!("Find in coupon with id {}.", id_arg);
        let query = Coupons::coupons.filter(Coupons::id.eq(id_arg));

        query
            .get_result(self.db_conn)
            .optional()
            .map_err(|e| e.context(format!("Find coupon by id: {} error occurred", id_arg)).into())
    }

    /// Coupons of the store still above the hide threshold, best score first
    fn find_visible_by_store(&self, store_arg: StoreDomain) -> RepoResult<Vec<Coupon>> {
        debug!("Find visible coupons of store {}.", store_arg);
        let query = Coupons::coupons
            .filter(Coupons::store.eq(&store_arg))
            .filter((Coupons::upvotes - Coupons::downvotes).gt(HIDE_SCORE_THRESHOLD))
            .order((Coupons::upvotes - Coupons::downvotes).desc());

        query
            .get_results(self.db_conn)
            .map_err(|e| e.context(format!("Find visible coupons of store: {} error occurred", store_arg)).into())
    }

    /// Applies a vote delta. Retractions only touch counters above zero.
    fn apply_vote(&self, id_arg: CouponId, delta: VoteDelta) -> RepoResult<usize> {
        debug!("Apply vote {:?} to coupon with id {}.", delta, id_arg);
        let filtered = Coupons::coupons.filter(Coupons::id.eq(id_arg));

        let result = match (delta.direction, delta.is_retraction()) {
            (VoteDirection::Up, false) => diesel::update(filtered)
                .set(Coupons::upvotes.eq(Coupons::upvotes + 1))
                .execute(self.db_conn),
            (VoteDirection::Down, false) => diesel::update(filtered)
                .set(Coupons::downvotes.eq(Coupons::downvotes + 1))
                .execute(self.db_conn),
            (VoteDirection::Up, true) => diesel::update(filtered.filter(Coupons::upvotes.gt(0)))
                .set(Coupons::upvotes.eq(Coupons::upvotes - 1))
                .execute(self.db_conn),
            (VoteDirection::Down, true) => diesel::update(filtered.filter(Coupons::downvotes.gt(0)))
                .set(Coupons::downvotes.eq(Coupons::downvotes - 1))
                .execute(self.db_conn),
        };

        result.map_err(|e| {
            e.context(format!("Apply vote {:?} to coupon: {} error occurred", delta, id_arg))
                .into()
        })
    }
}
