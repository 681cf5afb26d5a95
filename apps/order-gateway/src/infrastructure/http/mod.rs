//! HTTP/REST API adapter.
//!
//! Inbound adapter implementing REST endpoints that delegate to application use cases.

mod controller;
mod error;
mod request;
mod response;

pub use controller::{AppState, CLIENT_ID_HEADER, create_router};
pub use error::ApiError;
pub use request::*;
pub use response::*;
