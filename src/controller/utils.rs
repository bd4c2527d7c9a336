use failure::{Error as FailureError, Fail};
use futures::{Future, Stream};
use hyper;
use serde::de::DeserializeOwned;
use serde_json;
use url::form_urlencoded;

use errors::Error;

/// Reads the whole request body and deserializes it from JSON
pub fn parse_body<T>(body: hyper::Body) -> Box<Future<Item = T, Error = FailureError>>
where
    T: DeserializeOwned + 'static,
{
    Box::new(
        body.concat2()
            .map_err(|e| FailureError::from(e.context(Error::Parse)))
            .and_then(|chunk| serde_json::from_slice::<T>(&chunk).map_err(|e| FailureError::from(e.context(Error::Parse)))),
    )
}

/// First non-empty value of `name` in the query string
pub fn query_param(query: Option<&str>, name: &str) -> Option<String> {
    query.and_then(|query| {
        form_urlencoded::parse(query.as_bytes())
            .find(|&(ref key, ref value)| *key == name && !value.is_empty())
            .map(|(_, value)| value.into_owned())
    })
}
