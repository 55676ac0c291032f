//! Identity module: user management
//!
//! Contains the `UserService` which validates user payloads and drives the
//! User and Role stores.

pub mod message;
pub mod service;

pub use message::{field_violations, MessageResult, Violation};
pub use service::{IdRule, UserService};
