//! Referral gate, the "no referral hijacking" policy.
//!
//! A community referral is only ever appended to a URL that carries none of
//! the known affiliate or tracking markers. Anything that does not parse as
//! an absolute URL is treated as unsafe.

use url::Url;

/// Query keys that mean somebody already claimed attribution for the visit
pub const AFFILIATE_MARKERS: &[&str] = &[
    "ref",
    "tag",
    "aff_id",
    "affiliate",
    "promo_id",
    "click_id",
    "clickid",
    "irclickid",
    "gclid",
    "msclkid",
    "partner",
    "utm_source",
    "source",
    "ncid",
];

fn parse_clean(url: &str) -> Option<Url> {
    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(e) => {
            debug!("Refusing referral for unparseable url {:?}: {}", url, e);
            return None;
        }
    };

    let marker = parsed
        .query_pairs()
        .map(|(key, _)| key)
        .find(|key| AFFILIATE_MARKERS.contains(&key.as_ref()));

    match marker {
        Some(marker) => {
            debug!("Refusing referral for {}, found affiliate marker '{}'", url, marker);
            None
        }
        None => Some(parsed),
    }
}

/// `true` when no query key of `url` is an affiliate marker
pub fn is_clean(url: &str) -> bool {
    parse_clean(url).is_some()
}

/// Appends the store's referral fragment to `url`, or returns `None` when the
/// caller must keep the original URL untouched.
///
/// The append is textual: on a URL with a `#fragment` the referral lands
/// after the fragment and is not sent to the store.
pub fn build_referred_url(url: &str, template: Option<&str>) -> Option<String> {
    let template = match template {
        Some(template) if !template.is_empty() => template,
        _ => return None,
    };

    let parsed = parse_clean(url)?;
    let separator = match parsed.query() {
        Some(query) if !query.is_empty() => '&',
        _ => '?',
    };

    Some(format!("{}{}{}", url, separator, template))
}
