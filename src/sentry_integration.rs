use sentry;
use sentry::integrations::panic::register_panic_handler;

#[derive(Debug, Deserialize, Clone)]
pub struct SentryConfig {
    pub dsn: String,
}

/// Starts reporting panics and captured errors when `[sentry]` is configured.
/// Reporting stops when the returned guard is dropped.
pub fn init(sentry_config: Option<&SentryConfig>) -> Option<sentry::internals::ClientInitGuard> {
    sentry_config.map(|config_sentry| {
        info!("Initializing sentry integration");
        let result = sentry::init((
            config_sentry.dsn.clone(),
            sentry::ClientOptions {
                release: sentry_crate_release!(),
                ..Default::default()
            },
        ));
        register_panic_handler();
        result
    })
}
