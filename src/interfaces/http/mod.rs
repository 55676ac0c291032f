//! HTTP REST API interfaces
//!
//! - `common`: JSON body extractor and error-to-response mapping
//! - `modules`: Request handlers and DTOs per resource
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod modules;
pub mod router;

pub use router::{create_api_router, ApiDoc};
