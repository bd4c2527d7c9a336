//! Vote ledger. Turns a viewer's click into a counter delta plus a new local
//! vote state, and keeps hidden coupons out of the visible collection.
//!
//! Per coupon and viewer the clicks drive this machine:
//!
//! ```text
//! NONE -(up)->   UP    upvotes += 1
//! NONE -(down)-> DOWN  downvotes += 1
//! UP   -(up)->   NONE  upvotes -= 1, floor 0
//! UP   -(down)-> DOWN  downvotes += 1
//! DOWN -(down)-> NONE  downvotes -= 1, floor 0
//! DOWN -(up)->   UP    upvotes += 1
//! ```
//!
//! Switching sides (`UP -(down)-> DOWN`) only increments the new counter,
//! the previous vote is not taken back.

use std::collections::HashMap;

use failure::Error as FailureError;

use errors::Error;
use models::{Coupon, CouponId, VoteDelta, VoteDirection, VoteState};

/// A coupon whose score drops to this value or below is hidden for good
pub const HIDE_SCORE_THRESHOLD: i32 = -5;

pub fn score(upvotes: i32, downvotes: i32) -> i32 {
    upvotes - downvotes
}

pub fn is_visible(score: i32) -> bool {
    score > HIDE_SCORE_THRESHOLD
}

/// Result of one click
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VoteTransition {
    pub state: VoteState,
    pub delta: VoteDelta,
}

/// Pure transition function of the vote state machine
pub fn transition(prior: VoteState, clicked: VoteDirection) -> VoteTransition {
    if prior.is(clicked) {
        VoteTransition {
            state: VoteState::None,
            delta: VoteDelta::retract(clicked),
        }
    } else {
        VoteTransition {
            state: VoteState::from(clicked),
            delta: VoteDelta::cast(clicked),
        }
    }
}

/// Adds `delta` to the matching counter. Counters never go below zero.
pub fn apply_delta(record: &mut Coupon, delta: VoteDelta) {
    let counter = match delta.direction {
        VoteDirection::Up => &mut record.upvotes,
        VoteDirection::Down => &mut record.downvotes,
    };
    *counter = counter.saturating_add(delta.amount).max(0);
}

/// Applies a click to `record` and returns the new local state with the
/// delta that has to be persisted
pub fn apply_vote(record: &mut Coupon, prior: VoteState, clicked: VoteDirection) -> VoteTransition {
    let transition = transition(prior, clicked);
    apply_delta(record, transition.delta);
    transition
}

/// Keeps only coupons that may be displayed
pub fn visible(records: Vec<Coupon>) -> Vec<Coupon> {
    records.into_iter().filter(Coupon::is_visible).collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VoteOutcome {
    pub transition: VoteTransition,
    /// The coupon crossed the hide threshold and left the collection
    pub hidden: bool,
}

/// Visible coupons of one store together with the viewer's local votes
#[derive(Clone, Debug, Default)]
pub struct VoteLedger {
    coupons: Vec<Coupon>,
    states: HashMap<CouponId, VoteState>,
}

impl VoteLedger {
    pub fn new(coupons: Vec<Coupon>) -> Self {
        Self {
            coupons: visible(coupons),
            states: HashMap::new(),
        }
    }

    pub fn coupons(&self) -> &[Coupon] {
        &self.coupons
    }

    pub fn state(&self, id: CouponId) -> VoteState {
        self.states.get(&id).cloned().unwrap_or_default()
    }

    /// Runs one click against the coupon `id`
    pub fn vote(&mut self, id: CouponId, clicked: VoteDirection) -> Result<VoteOutcome, FailureError> {
        let prior = self.state(id);
        let position = match self.coupons.iter().position(|coupon| coupon.id == id) {
            Some(position) => position,
            None => return Err(format_err!("Coupon {} is not in the visible set", id).context(Error::NotFound).into()),
        };

        let transition = apply_vote(&mut self.coupons[position], prior, clicked);
        let hidden = !self.coupons[position].is_visible();

        if hidden {
            let coupon = self.coupons.remove(position);
            self.states.remove(&id);
            info!("Coupon {} ({}) hidden at score {}.", coupon.code, coupon.id, coupon.score());
        } else {
            self.states.insert(id, transition.state);
        }

        Ok(VoteOutcome { transition, hidden })
    }
}

#[cfg(test)]
mod tests {
    use std::time::SystemTime;

    use models::*;

    use super::*;

    fn coupon(upvotes: i32, downvotes: i32) -> Coupon {
        Coupon {
            id: CouponId::new(),
            store: StoreDomain::from("nike.com"),
            code: CouponCode("WELCOME20".to_string()),
            description: DEFAULT_COUPON_DESCRIPTION.to_string(),
            upvotes,
            downvotes,
            created_at: SystemTime::now(),
        }
    }

    #[test]
    fn test_visibility_threshold() {
        for &(u, d, expected) in &[(0, 4, true), (0, 5, false), (2, 6, true), (2, 7, false), (10, 0, true), (0, 0, true)] {
            assert_eq!(coupon(u, d).is_visible(), expected, "u={} d={}", u, d);
            assert_eq!(is_visible(score(u, d)), u - d > -5);
        }
    }

    #[test]
    fn test_transition_table() {
        let cases = [
            (VoteState::None, VoteDirection::Up, VoteState::Up, VoteDelta::cast(VoteDirection::Up)),
            (VoteState::None, VoteDirection::Down, VoteState::Down, VoteDelta::cast(VoteDirection::Down)),
            (VoteState::Up, VoteDirection::Up, VoteState::None, VoteDelta::retract(VoteDirection::Up)),
            (VoteState::Up, VoteDirection::Down, VoteState::Down, VoteDelta::cast(VoteDirection::Down)),
            (VoteState::Down, VoteDirection::Down, VoteState::None, VoteDelta::retract(VoteDirection::Down)),
            (VoteState::Down, VoteDirection::Up, VoteState::Up, VoteDelta::cast(VoteDirection::Up)),
        ];

        for &(prior, clicked, state, delta) in &cases {
            assert_eq!(transition(prior, clicked), VoteTransition { state, delta });
        }
    }

    #[test]
    fn test_toggle_twice_restores_counters() {
        for &direction in &[VoteDirection::Up, VoteDirection::Down] {
            let mut record = coupon(3, 1);
            let first = apply_vote(&mut record, VoteState::None, direction);
            let second = apply_vote(&mut record, first.state, direction);

            assert_eq!(second.state, VoteState::None);
            assert_eq!((record.upvotes, record.downvotes), (3, 1));
        }
    }

    #[test]
    fn test_retraction_never_goes_negative() {
        let mut record = coupon(0, 0);
        apply_vote(&mut record, VoteState::Up, VoteDirection::Up);
        apply_vote(&mut record, VoteState::Down, VoteDirection::Down);
        apply_vote(&mut record, VoteState::Down, VoteDirection::Down);

        assert_eq!((record.upvotes, record.downvotes), (0, 0));
    }

    #[test]
    fn test_cast_saturates_at_counter_limit() {
        let mut record = coupon(i32::MAX, 0);
        apply_vote(&mut record, VoteState::None, VoteDirection::Up);
        assert_eq!(record.upvotes, i32::MAX);

        apply_vote(&mut record, VoteState::Up, VoteDirection::Up);
        assert_eq!(record.upvotes, i32::MAX - 1);
    }

    #[test]
    fn test_switching_sides_keeps_previous_vote() {
        let mut record = coupon(2, 6);
        let up = apply_vote(&mut record, VoteState::None, VoteDirection::Up);
        assert_eq!((record.upvotes, record.downvotes, record.score()), (3, 6, -3));
        assert!(record.is_visible());

        let down = apply_vote(&mut record, up.state, VoteDirection::Down);
        assert_eq!(down.state, VoteState::Down);
        assert_eq!((record.upvotes, record.downvotes, record.score()), (3, 7, -4));
        assert!(record.is_visible());
    }

    #[test]
    fn test_ledger_filters_hidden_on_load() {
        let ledger = VoteLedger::new(vec![coupon(0, 5), coupon(1, 0), coupon(0, 9)]);
        assert_eq!(ledger.coupons().len(), 1);
    }

    #[test]
    fn test_ledger_tracks_state_per_coupon() {
        let first = coupon(0, 0);
        let second = coupon(0, 0);
        let (first_id, second_id) = (first.id, second.id);
        let mut ledger = VoteLedger::new(vec![first, second]);

        ledger.vote(first_id, VoteDirection::Up).unwrap();
        assert_eq!(ledger.state(first_id), VoteState::Up);
        assert_eq!(ledger.state(second_id), VoteState::None);

        let outcome = ledger.vote(first_id, VoteDirection::Up).unwrap();
        assert_eq!(outcome.transition.delta, VoteDelta::retract(VoteDirection::Up));
        assert_eq!(ledger.state(first_id), VoteState::None);
        assert_eq!(ledger.coupons()[0].upvotes, 0);
    }

    #[test]
    fn test_ledger_hides_coupon_at_threshold() {
        let record = coupon(0, 4);
        let id = record.id;
        let mut ledger = VoteLedger::new(vec![record]);

        let outcome = ledger.vote(id, VoteDirection::Down).unwrap();
        assert!(outcome.hidden);
        assert!(ledger.coupons().is_empty());
        assert_eq!(ledger.state(id), VoteState::None);
        assert!(ledger.vote(id, VoteDirection::Up).is_err());
    }

    #[test]
    fn test_ledger_unknown_coupon() {
        let mut ledger = VoteLedger::new(vec![coupon(1, 0)]);
        assert!(ledger.vote(CouponId::new(), VoteDirection::Up).is_err());
    }
}
