//! Hyper service wrapping a `Controller`: answers CORS preflight requests,
//! serializes controller output and turns errors into status codes.

use failure::Error as FailureError;
use futures::future;
use futures::Future;
use hyper;
use hyper::header::{ContentLength, ContentType};
use hyper::server::{Request, Response, Service};
use hyper::{Method, StatusCode};
use sentry::integrations::failure::capture_error;
use serde_json;

use super::types::ControllerFuture;
use errors::find_error;

/// Handles a request and produces the serialized response body
pub trait Controller {
    fn call(&self, request: Request) -> ControllerFuture;
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorMessage {
    pub code: u16,
    pub message: String,
}

pub struct Application<C: Controller> {
    controller: C,
}

impl<C: Controller> Application<C> {
    pub fn new(controller: C) -> Self {
        Self { controller }
    }
}

impl<C: Controller> Service for Application<C> {
    type Request = Request;
    type Response = Response;
    type Error = hyper::Error;
    type Future = Box<Future<Item = Response, Error = hyper::Error>>;

    fn call(&self, req: Request) -> Self::Future {
        debug!("Received request: {} {}", req.method(), req.path());

        if *req.method() == Method::Options {
            return Box::new(future::ok(response_with_body(StatusCode::Ok, String::new())));
        }

        Box::new(self.controller.call(req).then(|res| -> Result<Response, hyper::Error> {
            match res {
                Ok(body) => Ok(response_with_body(StatusCode::Ok, body)),
                Err(err) => Ok(response_with_error(&err)),
            }
        }))
    }
}

/// Adds the CORS headers sent with every response
fn with_cors(mut response: Response) -> Response {
    {
        let headers = response.headers_mut();
        headers.set_raw("Access-Control-Allow-Origin", "*");
        headers.set_raw("Access-Control-Allow-Methods", "GET, POST, OPTIONS");
        headers.set_raw("Access-Control-Allow-Headers", "Content-Type");
    }
    response
}

pub fn response_with_body(status: StatusCode, body: String) -> Response {
    with_cors(
        Response::new()
            .with_status(status)
            .with_header(ContentLength(body.len() as u64))
            .with_header(ContentType::json())
            .with_body(body),
    )
}

pub fn response_with_error(err: &FailureError) -> Response {
    let (status, message) = match find_error(err) {
        Some(known) => (known.code(), known.message()),
        None => (StatusCode::InternalServerError, "Internal server error".to_string()),
    };

    if status == StatusCode::InternalServerError {
        let chain = err.iter_chain().map(|cause| cause.to_string()).collect::<Vec<_>>().join(" | ");
        error!("Request failed: {}", chain);
        capture_error(err);
    } else {
        debug!("Request rejected with {}: {}", status, err);
    }

    let body = serde_json::to_string(&ErrorMessage {
        code: status.as_u16(),
        message,
    }).unwrap_or_else(|_| "Internal server error".to_string());

    response_with_body(status, body)
}

#[cfg(test)]
mod tests {
    use errors::Error;

    use super::*;

    #[test]
    fn test_cors_headers() {
        let response = response_with_body(StatusCode::Ok, "\"OK\"".to_string());
        assert_eq!(response.status(), StatusCode::Ok);
        assert!(response.headers().get_raw("Access-Control-Allow-Origin").is_some());
        assert!(response.headers().get_raw("Access-Control-Allow-Methods").is_some());
    }

    #[test]
    fn test_error_status() {
        let err: FailureError = format_err!("Coupon missing").context(Error::NotFound).into();
        assert_eq!(response_with_error(&err).status(), StatusCode::NotFound);

        let err: FailureError = format_err!("Unknown vote type").context(Error::InvalidVote("sideways".to_string())).into();
        assert_eq!(response_with_error(&err).status(), StatusCode::BadRequest);
    }
}
