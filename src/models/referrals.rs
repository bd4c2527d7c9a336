//! Community referral templates and the projections built on top of them
use models::coupons::Coupon;
use models::types::StoreDomain;

/// DB presenting by referral template. `referral_url` is a ready-made
/// query fragment such as `ref=opencoupon_nike_v1`.
#[derive(Debug, Serialize, Deserialize, Queryable, Clone, PartialEq)]
pub struct ReferralTemplate {
    pub store: StoreDomain,
    pub referral_url: String,
}

/// Store that has coupons but no community referral yet
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MissingReferral {
    pub store: StoreDomain,
}

impl From<StoreDomain> for MissingReferral {
    fn from(store: StoreDomain) -> Self {
        MissingReferral { store }
    }
}

/// Everything a viewer needs on page load for one store
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct StoreData {
    pub coupons: Vec<Coupon>,
    pub referral: Option<String>,
}
