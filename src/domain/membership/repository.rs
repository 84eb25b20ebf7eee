//! Team membership repository trait

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::entity::{Acceptance, TeamMembership};
use crate::domain::team::TeamId;
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Repository for team memberships
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TeamMembershipRepository: Send + Sync {
    /// Get the membership of a user in a team
    async fn find_unique(
        &self,
        team_id: &TeamId,
        user_id: &UserId,
    ) -> Result<Option<TeamMembership>, DomainError>;

    /// List the memberships of a team, oldest first
    async fn find_many(&self, team_id: &TeamId) -> Result<Vec<TeamMembership>, DomainError>;

    /// Create a membership, failing with a conflict if the user is already seated
    async fn create(&self, membership: TeamMembership) -> Result<TeamMembership, DomainError>;

    /// Create the membership and delete every pending request of the same
    /// (team, user) pair as a single unit. Either both happen or neither does.
    async fn accept(&self, membership: TeamMembership) -> Result<Acceptance, DomainError>;
}
