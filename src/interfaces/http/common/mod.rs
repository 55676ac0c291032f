//! Shared HTTP plumbing

pub mod error;
pub mod json_body;

pub use error::ApiError;
pub use json_body::{JsonBody, JsonBodyRejection};
