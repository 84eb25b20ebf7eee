//! Team request domain
//!
//! A team request is a pending application to join a team. It is either
//! promoted to a membership by the owner or deleted.

mod dto;
mod entity;
mod repository;

pub use dto::{map_to_team_request_dto, TeamRequestDto};
pub use entity::{TeamRequest, TeamRequestFilter, TeamRequestId, TeamRequestWithUser};
pub use repository::TeamRequestRepository;

#[cfg(test)]
pub use repository::MockTeamRequestRepository;
