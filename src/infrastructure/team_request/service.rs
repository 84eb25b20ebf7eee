//! Team request workflow: request, accept, reject and list join requests

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::membership::{Acceptance, TeamMembership, TeamMembershipRepository};
use crate::domain::team::{TeamDetails, TeamRepository};
use crate::domain::team_request::{
    map_to_team_request_dto, TeamRequest, TeamRequestDto, TeamRequestFilter,
    TeamRequestRepository,
};
use crate::domain::user::{User, UserRepository};
use crate::domain::DomainError;

pub const MSG_CREATE_PARAMS_MISSING: &str = "User and team name must be provided.";
pub const MSG_MANAGE_PARAMS_MISSING: &str = "Owner, user and team name must be provided.";
pub const MSG_LIST_PARAMS_MISSING: &str = "Owner and team name must be provided.";
pub const MSG_USER_NOT_FOUND: &str = "User does not exist.";
pub const MSG_TEAM_NOT_FOUND: &str = "Team does not exist.";
pub const MSG_OWNER_CANNOT_JOIN: &str = "Team owners cannot join their own team.";
pub const MSG_ALREADY_MEMBER: &str = "User is already a member of the team.";
pub const MSG_REQUEST_EXISTS: &str = "Team request already exists.";
pub const MSG_TEAM_FULL: &str = "Team is full or has too many pending requests.";
pub const MSG_REQUEST_NOT_FOUND: &str = "Team request does not exist.";
pub const MSG_NOT_TEAM_OWNER: &str = "Only the team owner can manage team requests.";

/// Stateless workflow over the four repositories
#[derive(Clone)]
pub struct TeamRequestService {
    users: Arc<dyn UserRepository>,
    teams: Arc<dyn TeamRepository>,
    memberships: Arc<dyn TeamMembershipRepository>,
    requests: Arc<dyn TeamRequestRepository>,
}

impl std::fmt::Debug for TeamRequestService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TeamRequestService").finish_non_exhaustive()
    }
}

impl TeamRequestService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        teams: Arc<dyn TeamRepository>,
        memberships: Arc<dyn TeamMembershipRepository>,
        requests: Arc<dyn TeamRequestRepository>,
    ) -> Self {
        Self {
            users,
            teams,
            memberships,
            requests,
        }
    }

    /// Build the service over a single store implementing every repository
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: UserRepository
            + TeamRepository
            + TeamMembershipRepository
            + TeamRequestRepository
            + 'static,
    {
        Self::new(store.clone(), store.clone(), store.clone(), store)
    }

    /// File a request for the user with `email` to join `team_name`.
    ///
    /// Checks run in a fixed order and stop at the first failure:
    /// input, user, team, owner, membership, duplicate request, capacity.
    pub async fn create_team_request(
        &self,
        email: Option<&str>,
        team_name: Option<&str>,
        message: Option<&str>,
    ) -> Result<TeamRequest, DomainError> {
        let (Some(email), Some(team_name)) = (present(email), present(team_name)) else {
            return Err(DomainError::validation(MSG_CREATE_PARAMS_MISSING));
        };

        let user = self.user_by_email(email).await?;
        let team = self.team_details(team_name).await?;
        let user_id = user.id();

        if team.is_owner(user_id) {
            debug!(team = %team_name, user = %user_id, "Owner tried to join own team");
            return Err(DomainError::conflict(MSG_OWNER_CANNOT_JOIN));
        }

        if team.is_member(user_id) {
            debug!(team = %team_name, user = %user_id, "Member tried to rejoin team");
            return Err(DomainError::conflict(MSG_ALREADY_MEMBER));
        }

        let pair = TeamRequestFilter::pair(team.team.id(), user_id);
        if !self.requests.find_many(&pair).await?.is_empty() {
            debug!(team = %team_name, user = %user_id, "Duplicate team request");
            return Err(DomainError::conflict(MSG_REQUEST_EXISTS));
        }

        if team.is_full() {
            debug!(
                team = %team_name,
                occupied = team.occupied_seats(),
                max = team.team.max_member_count(),
                "Team has no free seat"
            );
            return Err(DomainError::capacity(MSG_TEAM_FULL));
        }

        let request = TeamRequest::new(
            team.team.id().clone(),
            user_id.clone(),
            message.map(str::to_string),
        );
        let created = self.requests.create(request).await?;

        info!(team = %team_name, user = %user_id, request = %created.id(), "Created team request");
        Ok(created)
    }

    /// Promote the pending request of `joiner_name` to a membership.
    ///
    /// The membership insert and request removal happen as one unit.
    pub async fn accept_team_request(
        &self,
        owner_email: Option<&str>,
        team_name: Option<&str>,
        joiner_name: Option<&str>,
    ) -> Result<Acceptance, DomainError> {
        let (Some(owner_email), Some(team_name), Some(joiner_name)) =
            (present(owner_email), present(team_name), present(joiner_name))
        else {
            return Err(DomainError::validation(MSG_MANAGE_PARAMS_MISSING));
        };

        let owner = self.user_by_email(owner_email).await?;
        let team = self.team_details(team_name).await?;
        ensure_owner(&team, &owner)?;

        let filter = TeamRequestFilter::new()
            .with_team(team.team.id().clone())
            .with_user_name(joiner_name);

        let request = self
            .requests
            .find_first(&filter)
            .await?
            .ok_or_else(|| DomainError::not_found(MSG_REQUEST_NOT_FOUND))?;

        let membership = TeamMembership::new(request.team_id().clone(), request.user_id().clone());
        let acceptance = self.memberships.accept(membership).await?;

        info!(
            team = %team_name,
            user = %request.user_id(),
            removed = acceptance.removed_requests,
            "Accepted team request"
        );
        Ok(acceptance)
    }

    /// Remove the pending request(s) of `joiner_name`; returns the number removed.
    ///
    /// Removing nothing is not an error.
    pub async fn delete_team_request(
        &self,
        owner_email: Option<&str>,
        team_name: Option<&str>,
        joiner_name: Option<&str>,
    ) -> Result<u64, DomainError> {
        let (Some(owner_email), Some(team_name), Some(joiner_name)) =
            (present(owner_email), present(team_name), present(joiner_name))
        else {
            return Err(DomainError::validation(MSG_MANAGE_PARAMS_MISSING));
        };

        let owner = self.user_by_email(owner_email).await?;
        let team = self.team_details(team_name).await?;
        ensure_owner(&team, &owner)?;

        if self.users.find_first_by_name(joiner_name).await?.is_none() {
            return Err(DomainError::not_found(MSG_USER_NOT_FOUND));
        }

        // same selection as accept_team_request
        let filter = TeamRequestFilter::new()
            .with_team(team.team.id().clone())
            .with_user_name(joiner_name);
        let removed = self.requests.delete_many(&filter).await?;

        info!(team = %team_name, user = %joiner_name, removed, "Deleted team request");
        Ok(removed)
    }

    /// List the pending requests of a team as DTOs, oldest first
    pub async fn get_all_team_requests(
        &self,
        owner_email: Option<&str>,
        team_name: Option<&str>,
    ) -> Result<Vec<TeamRequestDto>, DomainError> {
        let (Some(owner_email), Some(team_name)) = (present(owner_email), present(team_name))
        else {
            return Err(DomainError::validation(MSG_LIST_PARAMS_MISSING));
        };

        let team = self
            .teams
            .find_unique_by_name(team_name)
            .await?
            .ok_or_else(|| DomainError::not_found(MSG_TEAM_NOT_FOUND))?;

        let owner = self.user_by_email(owner_email).await?;
        if !team.is_owned_by(owner.id()) {
            warn!(team = %team_name, user = %owner.id(), "Non-owner listed team requests");
            return Err(DomainError::forbidden(MSG_NOT_TEAM_OWNER));
        }

        let requests = self
            .requests
            .find_many_with_user(&TeamRequestFilter::new().with_team(team.id().clone()))
            .await?;

        debug!(team = %team_name, count = requests.len(), "Listed team requests");
        Ok(requests.iter().map(map_to_team_request_dto).collect())
    }

    async fn user_by_email(&self, email: &str) -> Result<User, DomainError> {
        self.users
            .find_unique_by_email(email)
            .await?
            .ok_or_else(|| DomainError::not_found(MSG_USER_NOT_FOUND))
    }

    async fn team_details(&self, name: &str) -> Result<TeamDetails, DomainError> {
        self.teams
            .find_details_by_name(name)
            .await?
            .ok_or_else(|| DomainError::not_found(MSG_TEAM_NOT_FOUND))
    }
}

/// Absent and blank inputs are treated the same
fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn ensure_owner(team: &TeamDetails, user: &User) -> Result<(), DomainError> {
    if team.is_owner(user.id()) {
        return Ok(());
    }

    warn!(team = %team.team.name(), user = %user.id(), "Non-owner tried to manage team requests");
    Err(DomainError::forbidden(MSG_NOT_TEAM_OWNER))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::membership::{Member, MockTeamMembershipRepository};
    use crate::domain::team::{MockTeamRepository, Team};
    use crate::domain::team_request::MockTeamRequestRepository;
    use crate::domain::user::MockUserRepository;
    use crate::domain::TeamRequestWithUser;
    use crate::infrastructure::store::InMemoryStore;

    /// Owner with two members and one pending request, 15 seats
    struct Fixture {
        store: Arc<InMemoryStore>,
        service: TeamRequestService,
        owner: User,
        member: User,
        pending: User,
        joiner: User,
        team: Team,
    }

    fn user(name: &str, email: &str, score: i64) -> User {
        User::new(name, email, "hashedPassword")
            .unwrap()
            .with_score(score)
    }

    fn fixture_with_capacity(max_member_count: u32) -> Fixture {
        let store = Arc::new(InMemoryStore::new());

        let owner = store.insert_user(user("TeamOwner", "owner@jest.co", 10)).unwrap();
        let member = store.insert_user(user("MemberOne", "user1@jest.co", 50)).unwrap();
        let second = store.insert_user(user("MemberTwo", "user2@jest.co", 30)).unwrap();
        let pending = store.insert_user(user("MemberFour", "user4@jest.co", 5)).unwrap();
        let joiner = store.insert_user(user("MemberThree", "user3@jest.co", 10)).unwrap();

        let team = store
            .insert_team(Team::new("JestTeam", max_member_count, owner.id().clone()).unwrap())
            .unwrap();

        for seated in [&member, &second] {
            store
                .insert_membership(TeamMembership::new(team.id().clone(), seated.id().clone()))
                .unwrap();
        }

        store
            .insert_request(TeamRequest::new(
                team.id().clone(),
                pending.id().clone(),
                Some("Me too".to_string()),
            ))
            .unwrap();

        Fixture {
            service: TeamRequestService::from_store(store.clone()),
            store,
            owner,
            member,
            pending,
            joiner,
            team,
        }
    }

    fn fixture() -> Fixture {
        fixture_with_capacity(15)
    }

    fn message_of<T: std::fmt::Debug>(result: Result<T, DomainError>) -> String {
        result.unwrap_err().message().to_string()
    }

    // createTeamRequest

    #[tokio::test]
    async fn test_create_requires_user_and_team() {
        let f = fixture();

        let result = f.service.create_team_request(None, None, None).await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
        assert_eq!(message_of(result), MSG_CREATE_PARAMS_MISSING);

        let result = f
            .service
            .create_team_request(Some("user3@jest.co"), Some("  "), None)
            .await;
        assert_eq!(message_of(result), MSG_CREATE_PARAMS_MISSING);
    }

    #[tokio::test]
    async fn test_create_unknown_user() {
        let f = fixture();

        let result = f
            .service
            .create_team_request(Some("nobody@jest.co"), Some("JestTeam"), None)
            .await;

        assert!(matches!(result, Err(DomainError::NotFound { .. })));
        assert_eq!(message_of(result), MSG_USER_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_unknown_team() {
        let f = fixture();

        let result = f
            .service
            .create_team_request(Some("user3@jest.co"), Some("NoSuchTeam"), None)
            .await;

        assert_eq!(message_of(result), MSG_TEAM_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_duplicate_request() {
        let f = fixture();

        let result = f
            .service
            .create_team_request(Some("user4@jest.co"), Some("JestTeam"), Some("again"))
            .await;

        assert!(matches!(result, Err(DomainError::Conflict { .. })));
        assert_eq!(message_of(result), MSG_REQUEST_EXISTS);
    }

    #[tokio::test]
    async fn test_create_when_team_full() {
        // two members + one pending request fill three seats
        let f = fixture_with_capacity(3);

        let result = f
            .service
            .create_team_request(Some("user3@jest.co"), Some("JestTeam"), None)
            .await;

        assert!(matches!(result, Err(DomainError::Capacity { .. })));
        assert_eq!(message_of(result), MSG_TEAM_FULL);
    }

    #[tokio::test]
    async fn test_create_by_owner() {
        let f = fixture();

        let result = f
            .service
            .create_team_request(Some(f.owner.email()), Some("JestTeam"), None)
            .await;

        assert_eq!(message_of(result), MSG_OWNER_CANNOT_JOIN);
    }

    #[tokio::test]
    async fn test_create_by_existing_member() {
        let f = fixture();

        let result = f
            .service
            .create_team_request(Some("user1@jest.co"), Some("JestTeam"), None)
            .await;

        assert_eq!(message_of(result), MSG_ALREADY_MEMBER);
    }

    #[tokio::test]
    async fn test_owner_check_precedes_capacity() {
        let f = fixture_with_capacity(3);

        let result = f
            .service
            .create_team_request(Some("owner@jest.co"), Some("JestTeam"), None)
            .await;

        assert_eq!(message_of(result), MSG_OWNER_CANNOT_JOIN);
    }

    #[tokio::test]
    async fn test_duplicate_check_precedes_capacity() {
        let f = fixture_with_capacity(3);

        let result = f
            .service
            .create_team_request(Some("user4@jest.co"), Some("JestTeam"), None)
            .await;

        assert_eq!(message_of(result), MSG_REQUEST_EXISTS);
    }

    #[tokio::test]
    async fn test_create_success() {
        let f = fixture();

        let created = f
            .service
            .create_team_request(
                Some("user3@jest.co"),
                Some("JestTeam"),
                Some("Please let me join"),
            )
            .await
            .unwrap();

        assert_eq!(created.team_id(), f.team.id());
        assert_eq!(created.user_id(), f.joiner.id());
        assert_eq!(created.message(), Some("Please let me join"));

        let stored = f
            .store
            .snapshot()
            .unwrap()
            .requests
            .into_iter()
            .filter(|r| r.user_id() == f.joiner.id())
            .count();
        assert_eq!(stored, 1);
    }

    #[tokio::test]
    async fn test_create_success_without_message() {
        let f = fixture();

        let created = f
            .service
            .create_team_request(Some("user3@jest.co"), Some("JestTeam"), None)
            .await
            .unwrap();

        assert_eq!(created.message(), None);
    }

    // acceptTeamRequest

    #[tokio::test]
    async fn test_accept_requires_all_params() {
        let f = fixture();

        let result = f.service.accept_team_request(None, None, None).await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
        assert_eq!(message_of(result), MSG_MANAGE_PARAMS_MISSING);

        let result = f
            .service
            .accept_team_request(Some("owner@jest.co"), Some("JestTeam"), None)
            .await;
        assert_eq!(message_of(result), MSG_MANAGE_PARAMS_MISSING);
    }

    #[tokio::test]
    async fn test_accept_missing_request() {
        let f = fixture();

        let result = f
            .service
            .accept_team_request(Some("owner@jest.co"), Some("JestTeam"), Some("MemberThree"))
            .await;

        assert!(matches!(result, Err(DomainError::NotFound { .. })));
        assert_eq!(message_of(result), MSG_REQUEST_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_accept_by_non_owner() {
        let f = fixture();

        let result = f
            .service
            .accept_team_request(Some("user1@jest.co"), Some("JestTeam"), Some("MemberFour"))
            .await;

        assert!(matches!(result, Err(DomainError::Forbidden { .. })));
        assert_eq!(message_of(result), MSG_NOT_TEAM_OWNER);
    }

    #[tokio::test]
    async fn test_accept_success() {
        let f = fixture();

        let acceptance = f
            .service
            .accept_team_request(Some("owner@jest.co"), Some("JestTeam"), Some("MemberFour"))
            .await
            .unwrap();

        assert_eq!(acceptance.membership.user_id(), f.pending.id());
        assert_eq!(acceptance.removed_requests, 1);

        let state = f.store.snapshot().unwrap();
        assert!(state
            .memberships
            .iter()
            .any(|m| m.user_id() == f.pending.id() && m.team_id() == f.team.id()));
        assert!(state.requests.iter().all(|r| r.user_id() != f.pending.id()));
    }

    #[tokio::test]
    async fn test_accepted_user_cannot_request_again() {
        let f = fixture();

        f.service
            .accept_team_request(Some("owner@jest.co"), Some("JestTeam"), Some("MemberFour"))
            .await
            .unwrap();

        let result = f
            .service
            .create_team_request(Some("user4@jest.co"), Some("JestTeam"), None)
            .await;
        assert_eq!(message_of(result), MSG_ALREADY_MEMBER);
    }

    // deleteTeamRequest

    #[tokio::test]
    async fn test_delete_requires_all_params() {
        let f = fixture();

        let result = f.service.delete_team_request(None, None, None).await;
        assert_eq!(message_of(result), MSG_MANAGE_PARAMS_MISSING);
    }

    #[tokio::test]
    async fn test_delete_success() {
        let f = fixture();

        let removed = f
            .service
            .delete_team_request(Some("owner@jest.co"), Some("JestTeam"), Some("MemberFour"))
            .await
            .unwrap();

        assert_eq!(removed, 1);
        let state = f.store.snapshot().unwrap();
        assert!(state.requests.is_empty());
        assert!(state.memberships.iter().all(|m| m.user_id() != f.pending.id()));
    }

    #[tokio::test]
    async fn test_delete_without_pending_request_is_success() {
        let f = fixture();

        let removed = f
            .service
            .delete_team_request(Some("owner@jest.co"), Some("JestTeam"), Some("MemberThree"))
            .await
            .unwrap();

        assert_eq!(removed, 0);
    }

    #[tokio::test]
    async fn test_delete_unknown_joiner() {
        let f = fixture();

        let result = f
            .service
            .delete_team_request(Some("owner@jest.co"), Some("JestTeam"), Some("Ghost"))
            .await;

        assert_eq!(message_of(result), MSG_USER_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_by_non_owner() {
        let f = fixture();

        let result = f
            .service
            .delete_team_request(Some("user1@jest.co"), Some("JestTeam"), Some("MemberFour"))
            .await;

        assert!(matches!(result, Err(DomainError::Forbidden { .. })));
        assert_eq!(f.store.snapshot().unwrap().requests.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_targets_requester_among_shared_names() {
        let f = fixture();
        f.store.insert_user(user("Alex", "alex1@jest.co", 1)).unwrap();
        let requester = f.store.insert_user(user("Alex", "alex2@jest.co", 2)).unwrap();
        f.store
            .insert_request(TeamRequest::new(f.team.id().clone(), requester.id().clone(), None))
            .unwrap();

        let removed = f
            .service
            .delete_team_request(Some("owner@jest.co"), Some("JestTeam"), Some("Alex"))
            .await
            .unwrap();

        assert_eq!(removed, 1);
        let state = f.store.snapshot().unwrap();
        assert!(state.requests.iter().all(|r| r.user_id() != requester.id()));
        assert_eq!(state.requests.len(), 1);
    }

    // getAllTeamRequests

    #[tokio::test]
    async fn test_list_requires_owner_and_team() {
        let f = fixture();

        let cases = [
            (None, Some("JestTeam")),
            (Some("owner@jest.co"), None),
            (Some(" "), Some("JestTeam")),
        ];

        for (owner, team) in cases {
            let result = f.service.get_all_team_requests(owner, team).await;
            assert!(matches!(result, Err(DomainError::Validation { .. })));
            assert_eq!(message_of(result), MSG_LIST_PARAMS_MISSING);
        }
    }

    #[tokio::test]
    async fn test_list_unknown_team() {
        let f = fixture();

        let result = f
            .service
            .get_all_team_requests(Some("owner@jest.co"), Some("bad"))
            .await;

        assert!(matches!(result, Err(DomainError::NotFound { .. })));
        assert_eq!(message_of(result), MSG_TEAM_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_unknown_team_checked_before_owner() {
        let f = fixture();

        let result = f
            .service
            .get_all_team_requests(Some("nobody@jest.co"), Some("bad"))
            .await;

        assert_eq!(message_of(result), MSG_TEAM_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_requests() {
        let f = fixture();

        f.service
            .create_team_request(
                Some("user3@jest.co"),
                Some("JestTeam"),
                Some("Please let me join"),
            )
            .await
            .unwrap();

        let requests = f
            .service
            .get_all_team_requests(Some("owner@jest.co"), Some("JestTeam"))
            .await
            .unwrap();

        assert_eq!(
            requests,
            vec![
                TeamRequestDto {
                    name: "MemberFour".to_string(),
                    message: "Me too".to_string(),
                },
                TeamRequestDto {
                    name: "MemberThree".to_string(),
                    message: "Please let me join".to_string(),
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_list_by_non_owner() {
        let f = fixture();

        let result = f
            .service
            .get_all_team_requests(Some(f.member.email()), Some("JestTeam"))
            .await;

        assert_eq!(message_of(result), MSG_NOT_TEAM_OWNER);
    }

    // Interaction checks against mocked repositories

    fn details(owner: &User, joiner: &User) -> TeamDetails {
        let team = Team::new("JestTeam", 15, owner.id().clone()).unwrap();
        let member = user("MemberOne", "user1@jest.co", 50);

        TeamDetails {
            memberships: vec![Member {
                membership: TeamMembership::new(team.id().clone(), member.id().clone()),
                user: member,
            }],
            requests: vec![TeamRequest::new(team.id().clone(), joiner.id().clone(), None)],
            owner: owner.clone(),
            team,
        }
    }

    #[tokio::test]
    async fn test_accept_invokes_atomic_promotion() {
        let owner = user("TeamOwner", "owner@jest.co", 10);
        let joiner = user("MemberThree", "user3@jest.co", 10);
        let team = details(&owner, &joiner);
        let pending = team.requests[0].clone();

        let mut users = MockUserRepository::new();
        let owner_clone = owner.clone();
        users
            .expect_find_unique_by_email()
            .withf(|email| email.to_string() == "owner@jest.co")
            .times(1)
            .returning(move |_| Ok(Some(owner_clone.clone())));

        let mut teams = MockTeamRepository::new();
        teams
            .expect_find_details_by_name()
            .times(1)
            .returning(move |_| Ok(Some(team.clone())));

        let mut requests = MockTeamRequestRepository::new();
        let found = pending.clone();
        requests
            .expect_find_first()
            .withf(|filter| filter.user_name.as_deref() == Some("MemberThree"))
            .times(1)
            .returning(move |_| Ok(Some(found.clone())));
        requests.expect_delete_many().never();

        let mut memberships = MockTeamMembershipRepository::new();
        let joiner_id = joiner.id().clone();
        memberships
            .expect_accept()
            .withf(move |m| m.user_id() == &joiner_id)
            .times(1)
            .returning(|m| {
                Ok(Acceptance {
                    membership: m,
                    removed_requests: 1,
                })
            });
        memberships.expect_create().never();

        let service = TeamRequestService::new(
            Arc::new(users),
            Arc::new(teams),
            Arc::new(memberships),
            Arc::new(requests),
        );

        let acceptance = service
            .accept_team_request(Some("owner@jest.co"), Some("JestTeam"), Some("MemberThree"))
            .await
            .unwrap();

        assert_eq!(acceptance.membership.user_id(), joiner.id());
        assert_eq!(acceptance.removed_requests, 1);
    }

    #[tokio::test]
    async fn test_storage_failure_propagates_without_mutation() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_unique_by_email()
            .returning(|_| Err(DomainError::storage("connection reset")));

        let teams = MockTeamRepository::new();
        let mut memberships = MockTeamMembershipRepository::new();
        memberships.expect_accept().never();
        let mut requests = MockTeamRequestRepository::new();
        requests.expect_create().never();

        let service = TeamRequestService::new(
            Arc::new(users),
            Arc::new(teams),
            Arc::new(memberships),
            Arc::new(requests),
        );

        let result = service
            .create_team_request(Some("user3@jest.co"), Some("JestTeam"), None)
            .await;

        assert_eq!(result, Err(DomainError::storage("connection reset")));
    }

    #[tokio::test]
    async fn test_list_maps_every_stored_request() {
        let owner = user("TeamOwner", "owner@jest.co", 10);
        let joiner = user("MemberThree", "user3@jest.co", 10);
        let team = Team::new("JestTeam", 15, owner.id().clone()).unwrap();
        let stored = TeamRequestWithUser {
            request: TeamRequest::new(
                team.id().clone(),
                joiner.id().clone(),
                Some("Please let me join".to_string()),
            ),
            user: joiner,
        };

        let mut teams = MockTeamRepository::new();
        teams
            .expect_find_unique_by_name()
            .returning(move |_| Ok(Some(team.clone())));

        let mut users = MockUserRepository::new();
        users
            .expect_find_unique_by_email()
            .returning(move |_| Ok(Some(owner.clone())));

        let mut requests = MockTeamRequestRepository::new();
        requests
            .expect_find_many_with_user()
            .returning(move |_| Ok(vec![stored.clone(), stored.clone()]));

        let service = TeamRequestService::new(
            Arc::new(users),
            Arc::new(teams),
            Arc::new(MockTeamMembershipRepository::new()),
            Arc::new(requests),
        );

        let dtos = service
            .get_all_team_requests(Some("owner@jest.co"), Some("JestTeam"))
            .await
            .unwrap();

        assert_eq!(dtos.len(), 2);
        assert!(dtos
            .iter()
            .all(|dto| dto.name == "MemberThree" && dto.message == "Please let me join"));
    }
}
