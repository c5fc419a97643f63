use std::error::Error as StdError;
use std::fmt;
use derive_more::Display;
use reqwest::StatusCode;

type Cause = Box<dyn StdError + Send + Sync + 'static>;

/// The one failure kind of every server call.
///
/// Network failures, unexpected statuses and undecodable bodies all end up here. The
/// message is meant to be shown to staff as is.
#[derive(Display)]
#[display("{message}")]
pub struct ApiClientError {
    message: String,
    status: Option<StatusCode>,
    cause: Option<Cause>,
}

impl ApiClientError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into(), status: None, cause: None }
    }

    pub fn with_cause(message: impl Into<String>, cause: impl Into<Cause>) -> Self {
        Self { message: message.into(), status: None, cause: Some(cause.into()) }
    }

    /// error for a response carrying an unexpected status
    pub fn from_status(message: impl Into<String>, status: StatusCode) -> Self {
        Self { message: message.into(), status: Some(status), cause: None }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// HTTP status when the server answered
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }
}

impl fmt::Debug for ApiClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClientError")
            .field("message", &self.message)
            .field("status", &self.status)
            .field("cause", &self.cause.as_ref().map(|c| c.to_string()))
            .finish()
    }
}

impl StdError for ApiClientError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.cause.as_deref().map(|c| c as &(dyn StdError + 'static))
    }
}
