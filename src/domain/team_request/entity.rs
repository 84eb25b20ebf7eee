//! Team request entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::team::TeamId;
use crate::domain::user::{User, UserId};

/// Opaque team request identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamRequestId(String);

impl TeamRequestId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TeamRequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A pending application by a user to join a team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRequest {
    id: TeamRequestId,
    team_id: TeamId,
    user_id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(default = "Utc::now")]
    created_at: DateTime<Utc>,
}

impl TeamRequest {
    pub fn new(team_id: TeamId, user_id: UserId, message: Option<String>) -> Self {
        Self {
            id: TeamRequestId::generate(),
            team_id,
            user_id,
            message,
            created_at: Utc::now(),
        }
    }

    pub(crate) fn restore(
        id: TeamRequestId,
        team_id: TeamId,
        user_id: UserId,
        message: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            team_id,
            user_id,
            message,
            created_at,
        }
    }

    // Getters

    pub fn id(&self) -> &TeamRequestId {
        &self.id
    }

    pub fn team_id(&self) -> &TeamId {
        &self.team_id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// A team request with its requesting user embedded
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamRequestWithUser {
    pub request: TeamRequest,
    pub user: User,
}

/// Filter for request lookups; unset fields match anything
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamRequestFilter {
    pub team_id: Option<TeamId>,
    pub user_id: Option<UserId>,
    /// Matches on the requesting user's display name
    pub user_name: Option<String>,
}

impl TeamRequestFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests for one (team, user) pair
    pub fn pair(team_id: &TeamId, user_id: &UserId) -> Self {
        Self::new()
            .with_team(team_id.clone())
            .with_user(user_id.clone())
    }

    pub fn with_team(mut self, team_id: TeamId) -> Self {
        self.team_id = Some(team_id);
        self
    }

    pub fn with_user(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn with_user_name(mut self, name: impl Into<String>) -> Self {
        self.user_name = Some(name.into());
        self
    }

    /// Whether the request (sent by `user`) passes this filter
    pub fn matches(&self, request: &TeamRequest, user: Option<&User>) -> bool {
        if let Some(ref team_id) = self.team_id {
            if request.team_id() != team_id {
                return false;
            }
        }

        if let Some(ref user_id) = self.user_id {
            if request.user_id() != user_id {
                return false;
            }
        }

        if let Some(ref name) = self.user_name {
            match user {
                Some(user) if user.name() == name => {}
                _ => return false,
            }
        }

        true
    }
}
