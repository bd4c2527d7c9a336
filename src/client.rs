//! Blocking client of the registry HTTP API used by viewer sessions.
//! Reads degrade to empty results so a page never breaks on a registry
//! outage; only coupon submission reports failure to the caller.

use failure::{Error as FailureError, Fail};
use reqwest;

use config::Client as ClientConfig;
use models::*;

pub trait RegistryApi {
    /// Visible coupons and referral of the store, empty on failure
    fn store_data(&self, store: &StoreDomain) -> StoreData;
    /// Submits a coupon
    fn save_coupon(&self, payload: &NewCoupon) -> Result<(), FailureError>;
    /// Persists a vote, failures are only logged
    fn vote(&self, payload: VotePayload);
    /// Stores without referral, empty on failure
    fn missing_referrals(&self) -> Vec<MissingReferral>;
}

pub struct RegistryClient {
    api_url: String,
    client: reqwest::Client,
}

impl RegistryClient {
    pub fn with_config(config: &ClientConfig) -> Self {
        Self {
            api_url: config.api_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path)
    }

    fn fetch_store_data(&self, store: &StoreDomain) -> Result<StoreData, FailureError> {
        let mut response = self
            .client
            .get(self.url("store-data").as_str())
            .query(&[("domain", store.as_str())])
            .send()?
            .error_for_status()?;
        let data: StoreData = response.json()?;
        Ok(data)
    }

    fn post_vote(&self, payload: &VotePayload) -> Result<(), FailureError> {
        self.client.post(self.url("vote").as_str()).json(payload).send()?.error_for_status()?;
        Ok(())
    }

    fn fetch_missing_referrals(&self) -> Result<Vec<MissingReferral>, FailureError> {
        let mut response = self.client.get(self.url("missing-referrals").as_str()).send()?.error_for_status()?;
        let missing: Vec<MissingReferral> = response.json()?;
        Ok(missing)
    }
}

impl RegistryApi for RegistryClient {
    fn store_data(&self, store: &StoreDomain) -> StoreData {
        self.fetch_store_data(store).unwrap_or_else(|e| {
            error!("Fetching store data of {} failed: {}", store, e);
            StoreData::default()
        })
    }

    fn save_coupon(&self, payload: &NewCoupon) -> Result<(), FailureError> {
        self.client
            .post(self.url("add-coupon").as_str())
            .json(payload)
            .send()?
            .error_for_status()
            .map(|_| ())
            .map_err(|e| e.context(format!("Saving coupon {} of {} failed", payload.code, payload.store)).into())
    }

    fn vote(&self, payload: VotePayload) {
        if let Err(e) = self.post_vote(&payload) {
            error!("Persisting vote {} on coupon {} failed: {}", payload.action, payload.id, e);
        }
    }

    fn missing_referrals(&self) -> Vec<MissingReferral> {
        self.fetch_missing_referrals().unwrap_or_else(|e| {
            error!("Fetching missing referrals failed: {}", e);
            vec![]
        })
    }
}
