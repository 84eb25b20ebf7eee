//! Domain layer - entities, repository traits and business errors

pub mod error;
pub mod membership;
pub mod team;
pub mod team_request;
pub mod user;

pub use error::{DomainError, ErrorEntry, ErrorReport};
pub use membership::{Acceptance, Member, TeamMembership, TeamMembershipRepository};
pub use team::{Team, TeamDetails, TeamId, TeamRepository};
pub use team_request::{
    map_to_team_request_dto, TeamRequest, TeamRequestDto, TeamRequestFilter, TeamRequestId,
    TeamRequestRepository, TeamRequestWithUser,
};
pub use user::{User, UserId, UserRepository};
