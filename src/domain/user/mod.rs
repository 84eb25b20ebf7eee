//! User domain
//!
//! Users request to join teams and may own teams themselves.

mod entity;
mod repository;
mod validation;

pub use entity::{User, UserId};
pub use repository::UserRepository;
pub use validation::{validate_email, validate_user_id, validate_user_name, UserValidationError};

#[cfg(test)]
pub use repository::MockUserRepository;
