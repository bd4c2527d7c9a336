use failure::{Context, Error as FailureError, Fail};
use hyper::StatusCode;
use serde_json;
use validator::ValidationErrors;

#[derive(Debug, Fail)]
pub enum Error {
    #[fail(display = "Not found")]
    NotFound,
    #[fail(display = "Parse error")]
    Parse,
    #[fail(display = "Validation error: {}", _0)]
    Validate(ValidationErrors),
    #[fail(display = "Invalid vote: {}", _0)]
    InvalidVote(String),
    #[fail(display = "Missing parameter: {}", _0)]
    MissingParam(String),
    #[fail(display = "Server is refusing to fullfil the reqeust")]
    Connection,
}

impl Error {
    /// Converts `Error` to HTTP Status Code
    pub fn code(&self) -> StatusCode {
        match *self {
            Error::NotFound => StatusCode::NotFound,
            Error::Validate(_) | Error::InvalidVote(_) | Error::MissingParam(_) => StatusCode::BadRequest,
            Error::Parse => StatusCode::UnprocessableEntity,
            Error::Connection => StatusCode::InternalServerError,
        }
    }

    /// Converts `Error` to the message returned to the caller
    pub fn message(&self) -> String {
        match *self {
            Error::Validate(ref valid_err) => match serde_json::to_string(valid_err) {
                Ok(res) => res,
                Err(_) => "Bad request".to_string(),
            },
            ref other => other.to_string(),
        }
    }
}

/// First `Error` found in the cause chain, whether it was raised directly or
/// attached as a context
pub fn find_error(err: &FailureError) -> Option<&Error> {
    err.iter_chain().filter_map(as_error).next()
}

fn as_error(fail: &Fail) -> Option<&Error> {
    fail.downcast_ref::<Error>()
        .or_else(|| fail.downcast_ref::<Context<Error>>().map(|ctx| ctx.get_context()))
}
