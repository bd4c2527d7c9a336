//! Moderation is the pure core of the registry: the vote ledger, the
//! referral gate and the missing-referral projection. Nothing here does I/O,
//! so the same rules run in the service layer and in a viewer session.

pub mod ledger;
pub mod missing_referrals;
pub mod referral_gate;

pub use self::ledger::{VoteLedger, VoteOutcome, VoteTransition, HIDE_SCORE_THRESHOLD};
pub use self::missing_referrals::{missing_referrals, DEFAULT_MISSING_REFERRALS_LIMIT};
pub use self::referral_gate::{build_referred_url, is_clean};
