//! Viewer session for one store page. Holds the visible coupons with the
//! viewer's local votes, and the referral that applies to the current URL.

use failure::{Error as FailureError, Fail};
use validator::Validate;

use client::RegistryApi;
use errors::Error;
use models::*;
use moderation::{build_referred_url, VoteLedger, VoteOutcome};

pub struct RegistrySession {
    info: StoreInfo,
    ledger: VoteLedger,
    referral: Option<String>,
    referred_url: Option<String>,
}

impl RegistrySession {
    pub fn new(domain: StoreDomain) -> Self {
        Self {
            info: StoreInfo::from_domain(domain),
            ledger: VoteLedger::default(),
            referral: None,
            referred_url: None,
        }
    }

    pub fn info(&self) -> &StoreInfo {
        &self.info
    }

    /// Fetches the store data and works out the referred URL for `current_url`
    pub fn load<C: RegistryApi>(&mut self, client: &C, current_url: &str) {
        let StoreData { coupons, referral } = client.store_data(&self.info.domain);

        self.ledger = VoteLedger::new(coupons);
        self.referred_url = build_referred_url(current_url, referral.as_ref().map(String::as_str));
        self.referral = referral;

        if let Some(ref referred_url) = self.referred_url {
            info!("Community referral applies to {}: {}", self.info.domain, referred_url);
        }
    }

    pub fn coupons(&self) -> &[Coupon] {
        self.ledger.coupons()
    }

    pub fn referral(&self) -> Option<&str> {
        self.referral.as_ref().map(String::as_str)
    }

    /// URL the viewer should be sent to, `None` keeps the current one
    pub fn referred_url(&self) -> Option<&str> {
        self.referred_url.as_ref().map(String::as_str)
    }

    pub fn vote_state(&self, id: CouponId) -> VoteState {
        self.ledger.state(id)
    }

    /// Applies a click locally and returns what has to be persisted
    pub fn vote(&mut self, id: CouponId, clicked: VoteDirection) -> Result<(VoteOutcome, VotePayload), FailureError> {
        let outcome = self.ledger.vote(id, clicked)?;
        let payload = VotePayload {
            id,
            action: VoteAction::from(outcome.transition.delta),
        };
        Ok((outcome, payload))
    }

    /// Applies a click locally and sends it to the registry. Local state is
    /// kept even when persisting fails.
    pub fn vote_and_sync<C: RegistryApi>(&mut self, client: &C, id: CouponId, clicked: VoteDirection) -> Result<VoteOutcome, FailureError> {
        let (outcome, payload) = self.vote(id, clicked)?;
        client.vote(payload);
        Ok(outcome)
    }

    /// Normalizes and submits a new coupon for this store
    pub fn submit<C: RegistryApi>(&self, client: &C, code: &str, description: Option<String>) -> Result<(), FailureError> {
        let payload = NewCoupon {
            store: self.info.domain.clone(),
            code: CouponCode(code.to_string()),
            description,
        };
        payload
            .validate()
            .map_err(|e| FailureError::from(format_err!("Validation of NewCoupon failed.").context(Error::Validate(e))))?;

        client
            .save_coupon(&payload.canonical())
            .map_err(|e| e.context("Submitting coupon failed.").into())
    }

    pub fn missing_referrals<C: RegistryApi>(client: &C) -> Vec<MissingReferral> {
        client.missing_referrals()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::time::SystemTime;

    use errors::find_error;

    use super::*;

    #[derive(Default)]
    struct RegistryApiMock {
        data: StoreData,
        saved: RefCell<Vec<NewCoupon>>,
        votes: RefCell<Vec<VotePayload>>,
        fail_save: bool,
    }

    impl RegistryApi for RegistryApiMock {
        fn store_data(&self, _store: &StoreDomain) -> StoreData {
            self.data.clone()
        }

        fn save_coupon(&self, payload: &NewCoupon) -> Result<(), FailureError> {
            if self.fail_save {
                return Err(format_err!("registry unavailable"));
            }
            self.saved.borrow_mut().push(payload.clone());
            Ok(())
        }

        fn vote(&self, payload: VotePayload) {
            self.votes.borrow_mut().push(payload);
        }

        fn missing_referrals(&self) -> Vec<MissingReferral> {
            vec![MissingReferral::from(StoreDomain::from("puma.com"))]
        }
    }

    fn coupon(upvotes: i32, downvotes: i32) -> Coupon {
        Coupon {
            id: CouponId::new(),
            store: StoreDomain::from("nike.com"),
            code: CouponCode("NIKE20".to_string()),
            description: DEFAULT_COUPON_DESCRIPTION.to_string(),
            upvotes,
            downvotes,
            created_at: SystemTime::now(),
        }
    }

    fn mock_with(coupons: Vec<Coupon>, referral: Option<&str>) -> RegistryApiMock {
        RegistryApiMock {
            data: StoreData {
                coupons,
                referral: referral.map(str::to_string),
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_load_applies_referral() {
        let client = mock_with(vec![coupon(1, 0), coupon(0, 5)], Some("ref=opencoupon_nike_v1"));
        let mut session = RegistrySession::new(StoreDomain::from("nike.com"));
        session.load(&client, "https://nike.com/shoes?color=red");

        assert_eq!(session.info().name, "NIKE");
        assert_eq!(session.coupons().len(), 1);
        assert_eq!(session.referral(), Some("ref=opencoupon_nike_v1"));
        assert_eq!(session.referred_url(), Some("https://nike.com/shoes?color=red&ref=opencoupon_nike_v1"));
    }

    #[test]
    fn test_load_respects_existing_affiliate() {
        let client = mock_with(vec![], Some("ref=opencoupon_nike_v1"));
        let mut session = RegistrySession::new(StoreDomain::from("nike.com"));
        session.load(&client, "https://nike.com/shoes?gclid=123");

        assert_eq!(session.referral(), Some("ref=opencoupon_nike_v1"));
        assert_eq!(session.referred_url(), None);
    }

    #[test]
    fn test_vote_and_sync() {
        let record = coupon(2, 6);
        let id = record.id;
        let client = mock_with(vec![record], None);
        let mut session = RegistrySession::new(StoreDomain::from("nike.com"));
        session.load(&client, "https://nike.com/");

        let outcome = session.vote_and_sync(&client, id, VoteDirection::Up).unwrap();
        assert!(!outcome.hidden);
        assert_eq!(session.vote_state(id), VoteState::Up);

        session.vote_and_sync(&client, id, VoteDirection::Up).unwrap();
        assert_eq!(session.vote_state(id), VoteState::None);
        assert_eq!(session.coupons()[0].upvotes, 2);

        let sent = client.votes.borrow().iter().map(|vote| vote.action).collect::<Vec<_>>();
        assert_eq!(sent, vec![VoteAction::Up, VoteAction::RemoveUp]);
    }

    #[test]
    fn test_vote_hides_coupon() {
        let record = coupon(0, 4);
        let id = record.id;
        let client = mock_with(vec![record], None);
        let mut session = RegistrySession::new(StoreDomain::from("nike.com"));
        session.load(&client, "https://nike.com/");

        let (outcome, payload) = session.vote(id, VoteDirection::Down).unwrap();
        assert!(outcome.hidden);
        assert_eq!(payload.action, VoteAction::Down);
        assert!(session.coupons().is_empty());
        assert!(session.vote(id, VoteDirection::Up).is_err());
    }

    #[test]
    fn test_submit() {
        let client = RegistryApiMock::default();
        let session = RegistrySession::new(StoreDomain::from("nike.com"));
        session.submit(&client, " save20 ", None).unwrap();

        let saved = client.saved.borrow();
        assert_eq!(saved[0].code, CouponCode("SAVE20".to_string()));
        assert_eq!(saved[0].description, Some(DEFAULT_COUPON_DESCRIPTION.to_string()));
    }

    #[test]
    fn test_submit_invalid_code() {
        let client = RegistryApiMock::default();
        let session = RegistrySession::new(StoreDomain::from("nike.com"));
        let err = session.submit(&client, "  ", None).unwrap_err();

        match find_error(&err) {
            Some(Error::Validate(_)) => {}
            other => panic!("expected validation error, got {:?}", other),
        }
        assert!(client.saved.borrow().is_empty());
    }

    #[test]
    fn test_submit_failure_propagates() {
        let client = RegistryApiMock {
            fail_save: true,
            ..Default::default()
        };
        let session = RegistrySession::new(StoreDomain::from("nike.com"));
        assert!(session.submit(&client, "SAVE20", None).is_err());
    }

    #[test]
    fn test_missing_referrals() {
        let client = RegistryApiMock::default();
        assert_eq!(RegistrySession::missing_referrals(&client).len(), 1);
    }
}
