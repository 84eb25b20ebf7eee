//! Team repository trait

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::entity::{Team, TeamDetails, TeamId};
use crate::domain::DomainError;

/// Repository for managing teams
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Get a team by ID
    async fn find_unique(&self, id: &TeamId) -> Result<Option<Team>, DomainError>;

    /// Get a team by its (unique) name
    async fn find_unique_by_name(&self, name: &str) -> Result<Option<Team>, DomainError>;

    /// Get a team by name including owner, memberships (with users) and requests
    async fn find_details_by_name(&self, name: &str) -> Result<Option<TeamDetails>, DomainError>;

    /// Create a new team, failing with a conflict on a duplicate ID or name
    async fn create(&self, team: Team) -> Result<Team, DomainError>;
}
