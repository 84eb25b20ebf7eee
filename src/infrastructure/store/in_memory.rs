//! In-memory store implementation

use std::path::Path;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::membership::{Acceptance, Member, TeamMembership, TeamMembershipRepository};
use crate::domain::team::{Team, TeamDetails, TeamId, TeamRepository};
use crate::domain::team_request::{
    TeamRequest, TeamRequestFilter, TeamRequestId, TeamRequestRepository, TeamRequestWithUser,
};
use crate::domain::user::{User, UserId, UserRepository};
use crate::domain::DomainError;

/// Full contents of a store; also the JSON seed file format
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSnapshot {
    pub users: Vec<User>,
    pub teams: Vec<Team>,
    pub memberships: Vec<TeamMembership>,
    pub requests: Vec<TeamRequest>,
}

/// Thread-safe in-memory store implementing every repository trait
///
/// All tables sit behind one lock, so multi-table writes such as
/// [`TeamMembershipRepository::accept`] are atomic. Data is lost when the
/// process terminates.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: RwLock<StoreSnapshot>,
}

impl InMemoryStore {
    /// Creates a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store from a snapshot, enforcing the same constraints as inserts
    pub fn from_snapshot(snapshot: StoreSnapshot) -> Result<Self, DomainError> {
        let store = Self::new();

        for user in snapshot.users {
            store.insert_user(user)?;
        }
        for team in snapshot.teams {
            store.insert_team(team)?;
        }
        for membership in snapshot.memberships {
            store.insert_membership(membership)?;
        }
        for request in snapshot.requests {
            store.insert_request(request)?;
        }

        Ok(store)
    }

    /// Creates a store seeded from a JSON snapshot file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            DomainError::configuration(format!("Failed to read seed file {}: {}", path.display(), e))
        })?;
        let snapshot: StoreSnapshot = serde_json::from_str(&content).map_err(|e| {
            DomainError::configuration(format!("Invalid seed file {}: {}", path.display(), e))
        })?;

        Self::from_snapshot(snapshot)
    }

    /// Copy of the current contents
    pub fn snapshot(&self) -> Result<StoreSnapshot, DomainError> {
        Ok(self.read()?.clone())
    }

    pub fn insert_user(&self, user: User) -> Result<User, DomainError> {
        let mut state = self.write()?;

        if state.users.iter().any(|u| u.id() == user.id()) {
            return Err(DomainError::conflict(format!(
                "User '{}' already exists",
                user.id()
            )));
        }

        if state.users.iter().any(|u| u.email() == user.email()) {
            return Err(DomainError::conflict(format!(
                "Email '{}' already registered",
                user.email()
            )));
        }

        state.users.push(user.clone());
        Ok(user)
    }

    pub fn insert_team(&self, team: Team) -> Result<Team, DomainError> {
        let mut state = self.write()?;

        if state.teams.iter().any(|t| t.id() == team.id()) {
            return Err(DomainError::conflict(format!(
                "Team '{}' already exists",
                team.id()
            )));
        }

        if state.teams.iter().any(|t| t.name() == team.name()) {
            return Err(DomainError::conflict(format!(
                "Team name '{}' already taken",
                team.name()
            )));
        }

        if find_user(&state, team.owner_id()).is_none() {
            return Err(DomainError::not_found(format!(
                "Owner '{}' not found",
                team.owner_id()
            )));
        }

        state.teams.push(team.clone());
        Ok(team)
    }

    pub fn insert_membership(&self, membership: TeamMembership) -> Result<TeamMembership, DomainError> {
        let mut state = self.write()?;
        check_membership(&state, &membership)?;
        state.memberships.push(membership.clone());
        Ok(membership)
    }

    pub fn insert_request(&self, request: TeamRequest) -> Result<TeamRequest, DomainError> {
        let mut state = self.write()?;
        check_joiner(&state, request.team_id(), request.user_id())?;

        if state.requests.iter().any(|r| r.id() == request.id()) {
            return Err(DomainError::conflict(format!(
                "Team request '{}' already exists",
                request.id()
            )));
        }

        if state
            .requests
            .iter()
            .any(|r| r.team_id() == request.team_id() && r.user_id() == request.user_id())
        {
            return Err(DomainError::conflict(format!(
                "Team request for team '{}' and user '{}' already exists",
                request.team_id(),
                request.user_id()
            )));
        }

        state.requests.push(request.clone());
        Ok(request)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, StoreSnapshot>, DomainError> {
        self.state
            .read()
            .map_err(|e| DomainError::storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, StoreSnapshot>, DomainError> {
        self.state
            .write()
            .map_err(|e| DomainError::storage(format!("Failed to acquire write lock: {}", e)))
    }
}

fn find_user<'a>(state: &'a StoreSnapshot, id: &UserId) -> Option<&'a User> {
    state.users.iter().find(|u| u.id() == id)
}

/// Both records exist and the user is not the team's owner
fn check_joiner(state: &StoreSnapshot, team_id: &TeamId, user_id: &UserId) -> Result<(), DomainError> {
    let Some(team) = state.teams.iter().find(|t| t.id() == team_id) else {
        return Err(DomainError::not_found(format!("Team '{}' not found", team_id)));
    };

    if find_user(state, user_id).is_none() {
        return Err(DomainError::not_found(format!("User '{}' not found", user_id)));
    }

    if team.is_owned_by(user_id) {
        return Err(DomainError::conflict(format!(
            "User '{}' owns team '{}'",
            user_id, team_id
        )));
    }

    Ok(())
}

fn check_membership(state: &StoreSnapshot, membership: &TeamMembership) -> Result<(), DomainError> {
    check_joiner(state, membership.team_id(), membership.user_id())?;

    if state
        .memberships
        .iter()
        .any(|m| m.team_id() == membership.team_id() && m.user_id() == membership.user_id())
    {
        return Err(DomainError::conflict(format!(
            "User '{}' is already a member of team '{}'",
            membership.user_id(),
            membership.team_id()
        )));
    }

    Ok(())
}

/// Matching requests, oldest first
fn matching_requests<'a>(state: &'a StoreSnapshot, filter: &TeamRequestFilter) -> Vec<&'a TeamRequest> {
    let mut matches: Vec<&TeamRequest> = state
        .requests
        .iter()
        .filter(|r| filter.matches(r, find_user(state, r.user_id())))
        .collect();

    matches.sort_by_key(|r| r.created_at());
    matches
}

fn with_user(state: &StoreSnapshot, request: &TeamRequest) -> Result<TeamRequestWithUser, DomainError> {
    let user = find_user(state, request.user_id()).ok_or_else(|| {
        DomainError::storage(format!(
            "Team request '{}' references missing user '{}'",
            request.id(),
            request.user_id()
        ))
    })?;

    Ok(TeamRequestWithUser {
        request: request.clone(),
        user: user.clone(),
    })
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_unique(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        Ok(find_user(&*self.read()?, id).cloned())
    }

    async fn find_unique_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let state = self.read()?;
        Ok(state.users.iter().find(|u| u.email() == email).cloned())
    }

    async fn find_first_by_name(&self, name: &str) -> Result<Option<User>, DomainError> {
        let state = self.read()?;
        Ok(state.users.iter().find(|u| u.name() == name).cloned())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        self.insert_user(user)
    }
}

#[async_trait]
impl TeamRepository for InMemoryStore {
    async fn find_unique(&self, id: &TeamId) -> Result<Option<Team>, DomainError> {
        let state = self.read()?;
        Ok(state.teams.iter().find(|t| t.id() == id).cloned())
    }

    async fn find_unique_by_name(&self, name: &str) -> Result<Option<Team>, DomainError> {
        let state = self.read()?;
        Ok(state.teams.iter().find(|t| t.name() == name).cloned())
    }

    async fn find_details_by_name(&self, name: &str) -> Result<Option<TeamDetails>, DomainError> {
        let state = self.read()?;

        let Some(team) = state.teams.iter().find(|t| t.name() == name) else {
            return Ok(None);
        };

        let owner = find_user(&state, team.owner_id()).cloned().ok_or_else(|| {
            DomainError::storage(format!("Team '{}' references missing owner", team.id()))
        })?;

        let memberships = state
            .memberships
            .iter()
            .filter(|m| m.team_id() == team.id())
            .map(|m| -> Result<Member, DomainError> {
                let user = find_user(&state, m.user_id()).cloned().ok_or_else(|| {
                    DomainError::storage(format!(
                        "Membership of team '{}' references missing user '{}'",
                        team.id(),
                        m.user_id()
                    ))
                })?;
                Ok(Member {
                    membership: m.clone(),
                    user,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let requests = matching_requests(&state, &TeamRequestFilter::new().with_team(team.id().clone()))
            .into_iter()
            .cloned()
            .collect();

        Ok(Some(TeamDetails {
            team: team.clone(),
            owner,
            memberships,
            requests,
        }))
    }

    async fn create(&self, team: Team) -> Result<Team, DomainError> {
        self.insert_team(team)
    }
}

#[async_trait]
impl TeamMembershipRepository for InMemoryStore {
    async fn find_unique(
        &self,
        team_id: &TeamId,
        user_id: &UserId,
    ) -> Result<Option<TeamMembership>, DomainError> {
        let state = self.read()?;
        Ok(state
            .memberships
            .iter()
            .find(|m| m.team_id() == team_id && m.user_id() == user_id)
            .cloned())
    }

    async fn find_many(&self, team_id: &TeamId) -> Result<Vec<TeamMembership>, DomainError> {
        let state = self.read()?;
        let mut memberships: Vec<TeamMembership> = state
            .memberships
            .iter()
            .filter(|m| m.team_id() == team_id)
            .cloned()
            .collect();

        memberships.sort_by_key(|m| m.joined_at());
        Ok(memberships)
    }

    async fn create(&self, membership: TeamMembership) -> Result<TeamMembership, DomainError> {
        self.insert_membership(membership)
    }

    async fn accept(&self, membership: TeamMembership) -> Result<Acceptance, DomainError> {
        let mut state = self.write()?;
        check_membership(&state, &membership)?;

        let before = state.requests.len();
        state
            .requests
            .retain(|r| !(r.team_id() == membership.team_id() && r.user_id() == membership.user_id()));
        let removed_requests = (before - state.requests.len()) as u64;

        state.memberships.push(membership.clone());

        Ok(Acceptance {
            membership,
            removed_requests,
        })
    }
}

#[async_trait]
impl TeamRequestRepository for InMemoryStore {
    async fn find_unique(&self, id: &TeamRequestId) -> Result<Option<TeamRequest>, DomainError> {
        let state = self.read()?;
        Ok(state.requests.iter().find(|r| r.id() == id).cloned())
    }

    async fn find_first(&self, filter: &TeamRequestFilter) -> Result<Option<TeamRequest>, DomainError> {
        let state = self.read()?;
        Ok(matching_requests(&state, filter).into_iter().next().cloned())
    }

    async fn find_many(&self, filter: &TeamRequestFilter) -> Result<Vec<TeamRequest>, DomainError> {
        let state = self.read()?;
        Ok(matching_requests(&state, filter).into_iter().cloned().collect())
    }

    async fn find_many_with_user(
        &self,
        filter: &TeamRequestFilter,
    ) -> Result<Vec<TeamRequestWithUser>, DomainError> {
        let state = self.read()?;
        matching_requests(&state, filter)
            .into_iter()
            .map(|r| with_user(&state, r))
            .collect()
    }

    async fn create(&self, request: TeamRequest) -> Result<TeamRequest, DomainError> {
        self.insert_request(request)
    }

    async fn delete_many(&self, filter: &TeamRequestFilter) -> Result<u64, DomainError> {
        let mut state = self.write()?;
        let state = &mut *state;

        let before = state.requests.len();
        let users = &state.users;
        state
            .requests
            .retain(|r| !filter.matches(r, users.iter().find(|u| u.id() == r.user_id())));

        Ok((before - state.requests.len()) as u64)
    }
}
