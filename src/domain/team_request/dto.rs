//! Caller-facing shape of a team request

use serde::{Deserialize, Serialize};

use super::entity::TeamRequestWithUser;

/// Team request as exposed to team owners
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRequestDto {
    /// Name of the requesting user
    pub name: String,
    pub message: String,
}

/// Map a stored request (with its user) to the owner-facing DTO.
///
/// Pure; an absent message maps to an empty string.
pub fn map_to_team_request_dto(request: &TeamRequestWithUser) -> TeamRequestDto {
    TeamRequestDto {
        name: request.user.name().to_string(),
        message: request.request.message().unwrap_or_default().to_string(),
    }
}

impl From<&TeamRequestWithUser> for TeamRequestDto {
    fn from(request: &TeamRequestWithUser) -> Self {
        map_to_team_request_dto(request)
    }
}
