use regex::Regex;

/// List of all routes of the app
#[derive(Clone, Debug, PartialEq)]
pub enum Route {
    Healthcheck,
    StoreData,
    AddCoupon,
    Vote,
    MissingReferrals,
}

/// Matches request paths against registered regexes, first match wins
pub struct RouteParser<R> {
    routes: Vec<(Regex, Box<Fn() -> R + Send + Sync>)>,
}

impl<R> Default for RouteParser<R> {
    fn default() -> Self {
        Self { routes: Vec::new() }
    }
}

impl<R> RouteParser<R> {
    /// Panics on an invalid regex, routes are registered once at start-up
    pub fn add_route<F>(&mut self, regex_pattern: &str, f: F)
    where
        F: Fn() -> R + Send + Sync + 'static,
    {
        let regex = Regex::new(regex_pattern).unwrap_or_else(|e| panic!("Invalid route {}: {}", regex_pattern, e));
        self.routes.push((regex, Box::new(f)));
    }

    pub fn test(&self, path: &str) -> Option<R> {
        self.routes.iter().find(|&&(ref regex, _)| regex.is_match(path)).map(|&(_, ref f)| f())
    }
}

pub fn create_route_parser() -> RouteParser<Route> {
    let mut router = RouteParser::default();

    // Healthcheck
    router.add_route(r"^/healthcheck$", || Route::Healthcheck);

    // Coupons routes
    router.add_route(r"^/store-data$", || Route::StoreData);
    router.add_route(r"^/add-coupon$", || Route::AddCoupon);
    router.add_route(r"^/vote$", || Route::Vote);

    // Referrals routes
    router.add_route(r"^/missing-referrals$", || Route::MissingReferrals);

    router
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_routes() {
        let router = create_route_parser();
        assert_eq!(router.test("/healthcheck"), Some(Route::Healthcheck));
        assert_eq!(router.test("/store-data"), Some(Route::StoreData));
        assert_eq!(router.test("/add-coupon"), Some(Route::AddCoupon));
        assert_eq!(router.test("/vote"), Some(Route::Vote));
        assert_eq!(router.test("/missing-referrals"), Some(Route::MissingReferrals));
    }

    #[test]
    fn test_unknown_routes() {
        let router = create_route_parser();
        assert_eq!(router.test("/"), None);
        assert_eq!(router.test("/vote/1"), None);
        assert_eq!(router.test("/store-data/nike.com"), None);
    }
}
