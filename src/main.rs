//! OpenCoupon is a community coupon registry microservice.
//! This crate is for running the service from `opencoupon_lib`. See `opencoupon_lib` for details.

extern crate opencoupon_lib;

use opencoupon_lib::{config, logging, sentry_integration};

fn main() {
    let config = config::Config::new().expect("Can't load app config!");

    // Prepare logger
    logging::init();

    // Prepare sentry integration
    let _sentry = sentry_integration::init(config.sentry.as_ref());

    opencoupon_lib::start_server(config, &None, || ());
}
