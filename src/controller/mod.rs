//! `Controller` is a top layer that handles all http-related
//! stuff like reading bodies, parsing params, forming a response.
//! Basically it provides inputs to `Service` layer and converts outputs
//! of `Service` layer to http responses

pub mod application;
pub mod context;
pub mod routes;
pub mod types;
pub mod utils;

use std::sync::Arc;

use diesel::connection::AnsiTransactionManager;
use diesel::pg::Pg;
use diesel::Connection;
use failure::Error as FailureError;
use futures::future;
use futures::Future;
use hyper::server::Request;
use hyper::{Get, Post};
use r2d2::ManageConnection;
use serde_json;

use self::application::Controller;
use self::context::StaticContext;
use self::routes::{create_route_parser, Route, RouteParser};
use self::types::ControllerFuture;
use self::utils::{parse_body, query_param};
use errors::Error;
use models::*;
use repos::ReposFactory;
use services::coupons::CouponsService;
use services::Service;

/// Plain-text acknowledgement of write endpoints
const ACK: &str = "OK";

macro_rules! serialize_future {
    ($e:expr) => {
        Box::new($e.and_then(|resp| serde_json::to_string(&resp).map_err(FailureError::from)))
    };
}

/// Controller handles route parsing and calling `Service` layer
pub struct ControllerImpl<M: ManageConnection, F> {
    pub static_context: StaticContext<M, F>,
    pub route_parser: Arc<RouteParser<Route>>,
}

impl<M: ManageConnection, F: Clone> ControllerImpl<M, F> {
    /// Create a new controller based on services
    pub fn new(static_context: StaticContext<M, F>) -> Self {
        let route_parser = Arc::new(create_route_parser());
        Self {
            static_context,
            route_parser,
        }
    }
}

impl<
        T: Connection<Backend = Pg, TransactionManager = AnsiTransactionManager> + 'static,
        M: ManageConnection<Connection = T>,
        F: ReposFactory<T>,
    > Controller for ControllerImpl<M, F>
{
    /// Handle a request and get future response
    fn call(&self, req: Request) -> ControllerFuture {
        let service = Service::new(self.static_context.clone());
        let method = req.method().clone();
        let route = self.route_parser.test(req.path());

        match (method, route) {
            // GET /healthcheck
            (Get, Some(Route::Healthcheck)) => serialize_future!(future::ok::<_, FailureError>("Ok")),

            // GET /store-data?domain=<domain>
            (Get, Some(Route::StoreData)) => match query_param(req.query(), "domain") {
                Some(domain) => serialize_future!(service.store_data(StoreDomain::from(domain))),
                None => Box::new(future::err::<String, FailureError>(
                    format_err!("Query parameter domain is required.")
                        .context(Error::MissingParam("domain".to_string()))
                        .into(),
                )),
            },

            // POST /add-coupon
            (Post, Some(Route::AddCoupon)) => serialize_future!(
                parse_body::<NewCoupon>(req.body())
                    .map_err(|e| FailureError::from(e.context("Parsing body failed, target: NewCoupon")))
                    .and_then(move |new_coupon| service.create_coupon(new_coupon))
                    .map(|_| ACK)
            ),

            // POST /vote
            (Post, Some(Route::Vote)) => serialize_future!(
                parse_body::<RawVotePayload>(req.body())
                    .map_err(|e| FailureError::from(e.context("Parsing body failed, target: VotePayload")))
                    .and_then(|raw| raw.into_payload())
                    .and_then(move |payload| service.vote(payload))
                    .map(|_| ACK)
            ),

            // GET /missing-referrals
            (Get, Some(Route::MissingReferrals)) => serialize_future!(service.missing_referrals()),

            // Fallback
            (m, _) => Box::new(future::err::<String, FailureError>(
                format_err!("Request to non existing endpoint in coupons microservice! {:?} {:?}", m, req.path())
                    .context(Error::NotFound)
                    .into(),
            )),
        }
    }
}
