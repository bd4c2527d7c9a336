use std::borrow::Cow;
use std::collections::HashMap;

use regex::Regex;
use validator::ValidationError;

use models::types::{CouponCode, StoreDomain};

pub const MAX_COUPON_CODE_LENGTH: usize = 64;

pub fn validate_coupon_code(code: &CouponCode) -> Result<(), ValidationError> {
    let code = code.0.trim();

    if code.is_empty() {
        return Err(ValidationError {
            code: Cow::from("code"),
            message: Some(Cow::from("Coupon code must not be empty.")),
            params: HashMap::new(),
        });
    }

    if code.chars().count() > MAX_COUPON_CODE_LENGTH {
        return Err(ValidationError {
            code: Cow::from("code"),
            message: Some(Cow::from("Coupon code is too long.")),
            params: HashMap::new(),
        });
    }

    Ok(())
}

pub fn validate_store_domain(store: &StoreDomain) -> Result<(), ValidationError> {
    lazy_static! {
        static ref STORE_DOMAIN_VALIDATION_RE: Regex =
            Regex::new(r"^(?i)[a-z0-9]([a-z0-9-]*[a-z0-9])?(\.[a-z0-9]([a-z0-9-]*[a-z0-9])?)+$").unwrap();
    }

    if STORE_DOMAIN_VALIDATION_RE.is_match(store.as_str()) {
        Ok(())
    } else {
        Err(ValidationError {
            code: Cow::from("store"),
            message: Some(Cow::from("Store must be a domain name like nike.com.")),
            params: HashMap::new(),
        })
    }
}
