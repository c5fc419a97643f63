//! Turning raw server answers into typed values.

use std::marker::PhantomData;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use crate::client::error::ApiClientError;

/// What came back from one call, before any parsing.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub method: Method,
    pub path: String,
    pub status: StatusCode,
    pub body: String,
}

impl RawResponse {
    fn has_no_content(&self) -> bool {
        self.status == StatusCode::NO_CONTENT || self.body.trim().is_empty()
    }

    /// Err for any status outside 2xx.
    pub fn ensure_success(&self) -> Result<(), ApiClientError> {
        if self.status.is_success() {
            return Ok(());
        }
        Err(ApiClientError::from_status(
            format!("{} {} failed with HTTP {} body: {}", self.method, self.path, self.status.as_u16(), self.body),
            self.status,
        ))
    }

    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, ApiClientError> {
        serde_json::from_str(&self.body).map_err(|e| {
            ApiClientError::with_cause(format!("failed to decode response of {} {}", self.method, self.path), e)
        })
    }
}

/// Type-specific parsing of a [`RawResponse`].
pub trait ResponseHandler {
    type Output;

    fn handle(&self, response: RawResponse) -> Result<Self::Output, ApiClientError>;
}

/// A body that may legitimately be absent: 204, 404 or blank give `None`.
pub struct OptionalJson<T>(PhantomData<fn() -> T>);

impl<T> OptionalJson<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T: DeserializeOwned> ResponseHandler for OptionalJson<T> {
    type Output = Option<T>;

    fn handle(&self, response: RawResponse) -> Result<Option<T>, ApiClientError> {
        if response.status == StatusCode::NOT_FOUND || response.has_no_content() {
            return Ok(None);
        }
        response.ensure_success()?;
        response.decode().map(Some)
    }
}

/// A body that must be present.
pub struct Json<T>(PhantomData<fn() -> T>);

impl<T> Json<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T: DeserializeOwned> ResponseHandler for Json<T> {
    type Output = T;

    fn handle(&self, response: RawResponse) -> Result<T, ApiClientError> {
        response.ensure_success()?;
        response.decode()
    }
}

/// A JSON array, a 204 or blank body is an empty list.
pub struct JsonList<T>(PhantomData<fn() -> T>);

impl<T> JsonList<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T: DeserializeOwned> ResponseHandler for JsonList<T> {
    type Output = Vec<T>;

    fn handle(&self, response: RawResponse) -> Result<Vec<T>, ApiClientError> {
        if response.has_no_content() && response.status.is_success() {
            return Ok(Vec::new());
        }
        response.ensure_success()?;
        response.decode()
    }
}

/// Only the status matters.
pub struct Discard;

impl ResponseHandler for Discard {
    type Output = ();

    fn handle(&self, response: RawResponse) -> Result<(), ApiClientError> {
        response.ensure_success()
    }
}

/// Caller supplied parsing.
pub struct FnHandler<F>(pub F);

impl<T, F> ResponseHandler for FnHandler<F>
where
    F: Fn(RawResponse) -> Result<T, ApiClientError>,
{
    type Output = T;

    fn handle(&self, response: RawResponse) -> Result<T, ApiClientError> {
        (self.0)(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Cashier;

    fn response(status: StatusCode, body: &str) -> RawResponse {
        RawResponse { method: Method::GET, path: "/api/cashiers/3".to_string(), status, body: body.to_string() }
    }

    #[test]
    fn optional_json() {
        let handler = OptionalJson::<Cashier>::new();
        assert!(handler.handle(response(StatusCode::NO_CONTENT, "")).unwrap().is_none());
        assert!(handler.handle(response(StatusCode::NOT_FOUND, "resource not found")).unwrap().is_none());
        assert!(handler.handle(response(StatusCode::OK, "  ")).unwrap().is_none());

        let cashier = handler.handle(response(StatusCode::OK, r#"{"id":3,"name":"Eva","salary":null}"#)).unwrap();
        assert_eq!(cashier.map(|c| c.name), Some("Eva".to_string()));

        let err = handler.handle(response(StatusCode::INTERNAL_SERVER_ERROR, "database error")).unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(err.to_string(), "GET /api/cashiers/3 failed with HTTP 500 body: database error");
    }

    #[test]
    fn json_requires_success_and_valid_body() {
        let handler = Json::<Cashier>::new();
        assert!(handler.handle(response(StatusCode::NOT_FOUND, "")).is_err());

        let err = handler.handle(response(StatusCode::OK, "{not json")).unwrap_err();
        assert_eq!(err.to_string(), "failed to decode response of GET /api/cashiers/3");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn json_list() {
        let handler = JsonList::<Cashier>::new();
        assert!(handler.handle(response(StatusCode::OK, "")).unwrap().is_empty());
        assert_eq!(handler.handle(response(StatusCode::OK, r#"[{"name":"A"},{"name":"B"}]"#)).unwrap().len(), 2);
        assert!(handler.handle(response(StatusCode::SERVICE_UNAVAILABLE, "")).is_err());
    }

    #[test]
    fn discard_and_closures() {
        assert!(Discard.handle(response(StatusCode::NO_CONTENT, "")).is_ok());
        assert!(Discard.handle(response(StatusCode::NOT_FOUND, "")).is_err());

        let status_only = FnHandler(|r: RawResponse| -> Result<u16, ApiClientError> { Ok(r.status.as_u16()) });
        assert_eq!(status_only.handle(response(StatusCode::ACCEPTED, "")).unwrap(), 202);
    }
}
