use models::types::StoreDomain;

const LOGO_SERVICE_URL: &str = "https://logo.clearbit.com";

/// Header information shown for the store the viewer is on
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StoreInfo {
    pub name: String,
    pub domain: StoreDomain,
    pub logo: String,
}

impl StoreInfo {
    pub fn from_domain(domain: StoreDomain) -> Self {
        let name = domain.as_str().split('.').next().unwrap_or_default().to_uppercase();
        let logo = format!("{}/{}", LOGO_SERVICE_URL, domain);

        Self { name, domain, logo }
    }
}
