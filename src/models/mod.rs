//! Models contains all structures that are used in different
//! modules of the app

pub mod coupons;
pub mod referrals;
pub mod store_info;
pub mod types;
pub mod validation_rules;
pub mod votes;

pub use self::coupons::*;
pub use self::referrals::*;
pub use self::store_info::*;
pub use self::types::*;
pub use self::validation_rules::*;
pub use self::votes::*;
