//! Coupons Services, presents store data, submissions and votes

use diesel::connection::AnsiTransactionManager;
use diesel::pg::Pg;
use diesel::Connection;
use failure::Error as FailureError;
use r2d2::ManageConnection;
use validator::Validate;

use super::types::ServiceFuture;
use errors::Error;
use models::*;
use moderation::ledger;
use repos::ReposFactory;
use services::Service;

pub trait CouponsService {
    /// Visible coupons of the store with its referral template
    fn store_data(&self, store: StoreDomain) -> ServiceFuture<StoreData>;
    /// Creates new coupon, `None` when the store already had this code
    fn create_coupon(&self, payload: NewCoupon) -> ServiceFuture<Option<Coupon>>;
    /// Persists a vote delta
    fn vote(&self, payload: VotePayload) -> ServiceFuture<()>;
    /// Stores that have coupons but no referral template
    fn missing_referrals(&self) -> ServiceFuture<Vec<MissingReferral>>;
}

impl<
        T: Connection<Backend = Pg, TransactionManager = AnsiTransactionManager> + 'static,
        M: ManageConnection<Connection = T>,
        F: ReposFactory<T>,
    > CouponsService for Service<M, F>
{
    fn store_data(&self, store: StoreDomain) -> ServiceFuture<StoreData> {
        let repo_factory = self.static_context.repo_factory.clone();

        self.spawn_on_pool(move |conn| {
            let coupons_repo = repo_factory.create_coupons_repo(&*conn);
            let referrals_repo = repo_factory.create_referrals_repo(&*conn);

            coupons_repo
                .find_visible_by_store(store.clone())
                .and_then(|coupons| {
                    referrals_repo.get(store).map(|template| StoreData {
                        coupons: ledger::visible(coupons),
                        referral: template.map(|template| template.referral_url),
                    })
                }).map_err(|e| e.context("Service Coupons, store_data endpoint error occurred.").into())
        })
    }

    fn create_coupon(&self, payload: NewCoupon) -> ServiceFuture<Option<Coupon>> {
        let repo_factory = self.static_context.repo_factory.clone();

        self.spawn_on_pool(move |conn| {
            let coupons_repo = repo_factory.create_coupons_repo(&*conn);

            payload
                .validate()
                .map_err(|e| format_err!("Validation of NewCoupon failed.").context(Error::Validate(e)).into())
                .and_then(|_| coupons_repo.create(payload))
                .map(|created| {
                    if created.is_none() {
                        debug!("Coupon already exists, submission ignored.");
                    }
                    created
                }).map_err(|e: FailureError| e.context("Service Coupons, create_coupon endpoint error occurred.").into())
        })
    }

    fn vote(&self, payload: VotePayload) -> ServiceFuture<()> {
        let repo_factory = self.static_context.repo_factory.clone();
        let VotePayload { id, action } = payload;
        let delta = VoteDelta::from(action);

        self.spawn_on_pool(move |conn| {
            let coupons_repo = repo_factory.create_coupons_repo(&*conn);

            conn.transaction::<(), FailureError, _>(move || {
                let updated = coupons_repo.apply_vote(id, delta)?;
                if updated > 0 {
                    return Ok(());
                }

                // Nothing updated: unknown coupon, or a retraction that hit the floor
                match coupons_repo.get(id)? {
                    Some(_) => {
                        debug!("Vote {} on coupon {} left counters at the floor.", action, id);
                        Ok(())
                    }
                    None => Err(format_err!("Coupon with id {} not found.", id).context(Error::NotFound).into()),
                }
            }).map_err(|e| e.context("Service Coupons, vote endpoint error occurred.").into())
        })
    }

    fn missing_referrals(&self) -> ServiceFuture<Vec<MissingReferral>> {
        let repo_factory = self.static_context.repo_factory.clone();
        let limit = self.static_context.config.referrals.missing_limit;

        self.spawn_on_pool(move |conn| {
            let referrals_repo = repo_factory.create_referrals_repo(&*conn);

            referrals_repo
                .missing(limit)
                .map_err(|e| e.context("Service Coupons, missing_referrals endpoint error occurred.").into())
        })
    }
}
