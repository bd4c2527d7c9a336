use diesel::connection::AnsiTransactionManager;
use diesel::dsl::not;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::query_dsl::RunQueryDsl;
use diesel::Connection;
use failure::Fail;

use models::*;
use repos::types::RepoResult;
use schema::coupons::dsl as Coupons;
use schema::referrals::dsl as Referrals;

/// Referrals repository, responsible for community referral templates
pub struct ReferralsRepoImpl<'a, T: Connection<Backend = Pg, TransactionManager = AnsiTransactionManager> + 'static> {
    pub db_conn: &'a T,
}

pub trait ReferralsRepo {
    /// Referral template of the store, if the community provided one
    fn get(&self, store_arg: StoreDomain) -> RepoResult<Option<ReferralTemplate>>;

    /// Stores that have coupons but no referral template
    fn missing(&self, limit: usize) -> RepoResult<Vec<MissingReferral>>;
}

impl<'a, T: Connection<Backend = Pg, TransactionManager = AnsiTransactionManager> + 'static> ReferralsRepoImpl<'a, T> {
    pub fn new(db_conn: &'a T) -> Self {
        Self { db_conn }
    }
}

impl<'a, T: Connection<Backend = Pg, TransactionManager = AnsiTransactionManager> + 'static> ReferralsRepo for ReferralsRepoImpl<'a, T> {
    fn get(&self, store_arg: StoreDomain) -> RepoResult<Option<ReferralTemplate>> {
        debug!("Find referral template of store {}.", store_arg);
        let query = Referrals::referrals.filter(Referrals::store.eq(&store_arg));

        query
            .get_result(self.db_conn)
            .optional()
            .map_err(|e| e.context(format!("Find referral template of store: {} error occurred", store_arg)).into())
    }

    fn missing(&self, limit: usize) -> RepoResult<Vec<MissingReferral>> {
        debug!("Find at most {} stores without referral.", limit);
        let with_referral = Referrals::referrals.select(Referrals::store);
        let query = Coupons::coupons
            .select(Coupons::store)
            .distinct()
            .filter(not(Coupons::store.eq_any(with_referral)))
            .order(Coupons::store)
            .limit(limit as i64);

        query
            .get_results::<StoreDomain>(self.db_conn)
            .map(|stores| stores.into_iter().map(MissingReferral::from).collect())
            .map_err(|e| e.context("Find stores without referral error occurred").into())
    }
}
