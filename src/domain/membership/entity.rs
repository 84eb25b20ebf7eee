//! Team membership entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::team::TeamId;
use crate::domain::user::{User, UserId};

/// Confirmed association between a user and a team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMembership {
    team_id: TeamId,
    user_id: UserId,
    #[serde(default = "Utc::now")]
    joined_at: DateTime<Utc>,
}

impl TeamMembership {
    pub fn new(team_id: TeamId, user_id: UserId) -> Self {
        Self {
            team_id,
            user_id,
            joined_at: Utc::now(),
        }
    }

    pub fn team_id(&self) -> &TeamId {
        &self.team_id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn joined_at(&self) -> DateTime<Utc> {
        self.joined_at
    }

    pub(crate) fn with_joined_at(mut self, joined_at: DateTime<Utc>) -> Self {
        self.joined_at = joined_at;
        self
    }
}

/// A membership together with the user it seats
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Member {
    pub membership: TeamMembership,
    pub user: User,
}

/// Outcome of promoting a pending request to a membership
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Acceptance {
    pub membership: TeamMembership,
    /// Number of pending requests removed for the same (team, user) pair
    pub removed_requests: u64,
}
