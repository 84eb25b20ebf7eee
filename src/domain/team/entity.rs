//! Team entity and related types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation::{
    validate_max_member_count, validate_team_id, validate_team_name, TeamValidationError,
};
use crate::domain::membership::Member;
use crate::domain::team_request::TeamRequest;
use crate::domain::user::{User, UserId};

/// Opaque team identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TeamId(String);

impl TeamId {
    /// Create a TeamId from an existing value
    pub fn new(id: impl Into<String>) -> Result<Self, TeamValidationError> {
        let id = id.into();
        validate_team_id(&id)?;
        Ok(Self(id))
    }

    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TeamId {
    type Error = TeamValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TeamId> for String {
    fn from(id: TeamId) -> Self {
        id.0
    }
}

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Team entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    id: TeamId,
    /// Unique across all teams
    name: String,
    /// Seats shared by members and pending requests; the owner does not take one
    max_member_count: u32,
    owner_id: UserId,
}

impl Team {
    /// Create a new team with a generated ID
    pub fn new(
        name: impl Into<String>,
        max_member_count: u32,
        owner_id: UserId,
    ) -> Result<Self, TeamValidationError> {
        Self::with_id(TeamId::generate(), name, max_member_count, owner_id)
    }

    /// Create a team with a known ID
    pub fn with_id(
        id: TeamId,
        name: impl Into<String>,
        max_member_count: u32,
        owner_id: UserId,
    ) -> Result<Self, TeamValidationError> {
        let name = name.into();
        validate_team_name(&name)?;
        validate_max_member_count(max_member_count)?;

        Ok(Self {
            id,
            name,
            max_member_count,
            owner_id,
        })
    }

    // Getters

    pub fn id(&self) -> &TeamId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn max_member_count(&self) -> u32 {
        self.max_member_count
    }

    pub fn owner_id(&self) -> &UserId {
        &self.owner_id
    }

    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.owner_id == user_id
    }
}

/// A team loaded together with its owner, seated members and pending requests
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamDetails {
    pub team: Team,
    pub owner: User,
    pub memberships: Vec<Member>,
    pub requests: Vec<TeamRequest>,
}

impl TeamDetails {
    pub fn is_owner(&self, user_id: &UserId) -> bool {
        self.team.is_owned_by(user_id)
    }

    pub fn is_member(&self, user_id: &UserId) -> bool {
        self.memberships
            .iter()
            .any(|member| member.membership.user_id() == user_id)
    }

    /// Seats taken by members plus pending requests
    pub fn occupied_seats(&self) -> usize {
        self.memberships.len() + self.requests.len()
    }

    /// True once no further request may be filed
    pub fn is_full(&self) -> bool {
        self.occupied_seats() >= self.team.max_member_count() as usize
    }
}
