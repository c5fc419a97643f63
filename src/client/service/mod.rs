//! What the staff screens call: local validation first, then the server.

mod auth;
mod order;
mod product;
mod report;

pub use auth::AuthService;
pub use order::{OrderService, DEFAULT_RECEIPTS_DIR, VAT_RATE};
pub use product::{validate_and_parse_price, validate_name, ProductService};
pub use report::ReportService;

use derive_more::{Display, Error};
use crate::client::error::ApiClientError;

#[derive(Debug, Display, Error)]
pub enum ServiceError {
    /// input rejected before any call was made
    #[display("{reason}")]
    Validation {
        #[error(not(source))]
        reason: String,
    },
    #[display("{source}")]
    Api { source: ApiClientError },
    #[display("failed to write receipt: {source}")]
    Io { source: std::io::Error },
}

impl ServiceError {
    pub fn validation(reason: impl Into<String>) -> Self {
        ServiceError::Validation { reason: reason.into() }
    }
}

impl From<ApiClientError> for ServiceError {
    fn from(source: ApiClientError) -> Self {
        ServiceError::Api { source }
    }
}

impl From<std::io::Error> for ServiceError {
    fn from(source: std::io::Error) -> Self {
        ServiceError::Io { source }
    }
}
