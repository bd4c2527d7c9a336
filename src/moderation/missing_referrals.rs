//! Stores that have coupons but no community referral yet
use std::collections::{BTreeSet, HashSet};

use models::{Coupon, MissingReferral, ReferralTemplate, StoreDomain};

pub const DEFAULT_MISSING_REFERRALS_LIMIT: usize = 20;

/// Distinct stores of `coupons` without an entry in `templates`, sorted by
/// store and capped at `limit`. Only the presence of a template counts, its
/// content is not looked at.
pub fn missing_referrals(coupons: &[Coupon], templates: &[ReferralTemplate], limit: usize) -> Vec<MissingReferral> {
    let covered = templates.iter().map(|template| &template.store).collect::<HashSet<&StoreDomain>>();

    coupons
        .iter()
        .map(|coupon| &coupon.store)
        .filter(|store| !covered.contains(store))
        .collect::<BTreeSet<&StoreDomain>>()
        .into_iter()
        .take(limit)
        .cloned()
        .map(MissingReferral::from)
        .collect()
}
