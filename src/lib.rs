//! Restaurant point-of-sale: REST server, shared records and the staff client.

pub mod model;
pub mod server;

#[cfg(feature = "build-client")]
pub mod client;
