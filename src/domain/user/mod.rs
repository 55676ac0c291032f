//! User aggregate
//!
//! Contains the User entity, the incoming payload with its field rules, and
//! the repository interface.

pub mod model;
pub mod repository;
pub mod validation;

pub use model::{User, UserPayload, UserRecord};
pub use repository::UserRepository;
pub use validation::{NOT_BLANK_MESSAGE, PASSWORD_PATTERN_MESSAGE, VALIDATED_FIELDS};
