//! User repository trait

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::entity::{User, UserId};
use crate::domain::DomainError;

/// Repository trait for user storage
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Get a user by ID
    async fn find_unique(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Get a user by their (unique) email
    async fn find_unique_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Get the first user carrying the given display name
    async fn find_first_by_name(&self, name: &str) -> Result<Option<User>, DomainError>;

    /// Create a new user, failing with a conflict on a duplicate ID or email
    async fn create(&self, user: User) -> Result<User, DomainError>;
}
