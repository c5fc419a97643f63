//! Staff side of the POS: HTTP access to the server and the services screens call.

pub mod api_client;
pub mod error;
pub mod handler;
pub mod service;

pub use api_client::ApiClient;
pub use error::ApiClientError;
pub use handler::{Discard, FnHandler, Json, JsonList, OptionalJson, RawResponse, ResponseHandler};
pub use service::{AuthService, OrderService, ProductService, ReportService, ServiceError};
