//! Team request repository trait

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::entity::{TeamRequest, TeamRequestFilter, TeamRequestId, TeamRequestWithUser};
use crate::domain::DomainError;

/// Repository for pending team requests
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TeamRequestRepository: Send + Sync {
    /// Get a request by ID
    async fn find_unique(&self, id: &TeamRequestId) -> Result<Option<TeamRequest>, DomainError>;

    /// Oldest request matching the filter
    async fn find_first(&self, filter: &TeamRequestFilter) -> Result<Option<TeamRequest>, DomainError>;

    /// All requests matching the filter, oldest first
    async fn find_many(&self, filter: &TeamRequestFilter) -> Result<Vec<TeamRequest>, DomainError>;

    /// All requests matching the filter with their users embedded, oldest first
    async fn find_many_with_user(
        &self,
        filter: &TeamRequestFilter,
    ) -> Result<Vec<TeamRequestWithUser>, DomainError>;

    /// Create a request, failing with a conflict if the (team, user) pair already has one
    async fn create(&self, request: TeamRequest) -> Result<TeamRequest, DomainError>;

    /// Delete every matching request, returning how many were removed
    async fn delete_many(&self, filter: &TeamRequestFilter) -> Result<u64, DomainError>;
}
