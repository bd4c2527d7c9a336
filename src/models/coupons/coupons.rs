//! Model coupons
use std::time::SystemTime;

use validator::Validate;

use models::types::{CouponCode, CouponId, StoreDomain};
use models::validation_rules::*;
use moderation::ledger;

/// Placeholder stored when a coupon is submitted without a description
pub const DEFAULT_COUPON_DESCRIPTION: &str = "Community added discount code";

/// DB presenting by coupon
#[derive(Debug, Serialize, Deserialize, Queryable, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    pub id: CouponId,
    pub store: StoreDomain,
    pub code: CouponCode,
    pub description: String,
    pub upvotes: i32,
    pub downvotes: i32,
    #[serde(with = "epoch_millis")]
    pub created_at: SystemTime,
}

impl Coupon {
    /// Always derived from the counters, never stored
    pub fn score(&self) -> i32 {
        ledger::score(self.upvotes, self.downvotes)
    }

    pub fn is_visible(&self) -> bool {
        ledger::is_visible(self.score())
    }
}

/// `createdAt` travels as milliseconds since the unix epoch
mod epoch_millis {
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &SystemTime, serializer: S) -> Result<S::Ok, S::Error> {
        let millis = time
            .duration_since(UNIX_EPOCH)
            .map(|since| since.as_secs() * 1000 + u64::from(since.subsec_millis()))
            .unwrap_or(0);
        serializer.serialize_u64(millis)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SystemTime, D::Error> {
        let millis = u64::deserialize(deserializer)?;
        Ok(UNIX_EPOCH + Duration::from_millis(millis))
    }
}

/// Payload for creating coupon
#[derive(Serialize, Deserialize, Clone, Validate, Debug, PartialEq)]
pub struct NewCoupon {
    #[validate(custom = "validate_store_domain")]
    pub store: StoreDomain,
    #[validate(custom = "validate_coupon_code")]
    pub code: CouponCode,
    #[serde(default)]
    pub description: Option<String>,
}

impl NewCoupon {
    /// Upper-cases the code and fills in the placeholder description
    pub fn canonical(self) -> Self {
        let description = self
            .description
            .map(|description| description.trim().to_string())
            .and_then(|description| if description.is_empty() { None } else { Some(description) })
            .unwrap_or_else(|| DEFAULT_COUPON_DESCRIPTION.to_string());

        Self {
            code: self.code.canonical(),
            description: Some(description),
            ..self
        }
    }

    pub fn description_or_default(&self) -> &str {
        self.description.as_ref().map(String::as_str).unwrap_or(DEFAULT_COUPON_DESCRIPTION)
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, UNIX_EPOCH};

    use serde_json;

    use super::*;

    fn new_coupon(code: &str, description: Option<&str>) -> NewCoupon {
        NewCoupon {
            store: StoreDomain::from("nike.com"),
            code: CouponCode(code.to_string()),
            description: description.map(|d| d.to_string()),
        }
    }

    #[test]
    fn test_canonical_upper_cases_code() {
        let coupon = new_coupon(" welcome20 ", Some("20% off")).canonical();
        assert_eq!(coupon.code, CouponCode("WELCOME20".to_string()));
        assert_eq!(coupon.description_or_default(), "20% off");
    }

    #[test]
    fn test_canonical_fills_placeholder_description() {
        assert_eq!(new_coupon("a", None).canonical().description_or_default(), DEFAULT_COUPON_DESCRIPTION);
        assert_eq!(new_coupon("a", Some("  ")).canonical().description_or_default(), DEFAULT_COUPON_DESCRIPTION);
    }

    #[test]
    fn test_validate_rejects_blank_code() {
        assert!(new_coupon("   ", None).validate().is_err());
        assert!(new_coupon("SAVE10", None).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_store() {
        let mut coupon = new_coupon("SAVE10", None);
        coupon.store = StoreDomain::from("not a domain");
        assert!(coupon.validate().is_err());
    }

    #[test]
    fn test_visibility_follows_score() {
        let mut coupon = Coupon {
            id: CouponId::new(),
            store: StoreDomain::from("nike.com"),
            code: CouponCode("SAVE10".to_string()),
            description: DEFAULT_COUPON_DESCRIPTION.to_string(),
            upvotes: 2,
            downvotes: 6,
            created_at: SystemTime::now(),
        };
        assert_eq!(coupon.score(), -4);
        assert!(coupon.is_visible());

        coupon.downvotes = 7;
        assert!(!coupon.is_visible());
    }

    #[test]
    fn test_created_at_is_epoch_millis() {
        let coupon = Coupon {
            id: CouponId::new(),
            store: StoreDomain::from("nike.com"),
            code: CouponCode("SAVE10".to_string()),
            description: DEFAULT_COUPON_DESCRIPTION.to_string(),
            upvotes: 0,
            downvotes: 0,
            created_at: UNIX_EPOCH + Duration::from_millis(1_700_000_000_123),
        };

        let json = serde_json::to_value(&coupon).unwrap();
        assert_eq!(json["createdAt"], 1_700_000_000_123u64);

        let parsed: Coupon = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.created_at, coupon.created_at);
    }
}
