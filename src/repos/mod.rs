//! Repos is a module responsible for interacting with postgres db
pub mod coupons;
pub mod referrals;
pub mod repo_factory;
pub mod types;

pub use self::coupons::*;
pub use self::referrals::*;
pub use self::repo_factory::*;
pub use self::types::*;
