//! PostgreSQL store implementation with connection pooling
//!
//! Expects the following tables to exist:
//!
//! ```sql
//! users            (id TEXT PRIMARY KEY, name TEXT NOT NULL, email TEXT NOT NULL UNIQUE,
//!                   hashed_password TEXT NOT NULL, score BIGINT NOT NULL DEFAULT 0)
//! teams            (id TEXT PRIMARY KEY, name TEXT NOT NULL UNIQUE,
//!                   max_member_count INTEGER NOT NULL, owner_id TEXT NOT NULL REFERENCES users(id))
//! team_memberships (team_id TEXT REFERENCES teams(id), user_id TEXT REFERENCES users(id),
//!                   joined_at TIMESTAMPTZ NOT NULL, PRIMARY KEY (team_id, user_id))
//! team_requests    (id TEXT PRIMARY KEY, team_id TEXT REFERENCES teams(id),
//!                   user_id TEXT REFERENCES users(id), message TEXT,
//!                   created_at TIMESTAMPTZ NOT NULL, UNIQUE (team_id, user_id))
//! ```

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::{Postgres, QueryBuilder, Row};

use crate::domain::membership::{Acceptance, Member, TeamMembership, TeamMembershipRepository};
use crate::domain::team::{Team, TeamDetails, TeamId, TeamRepository};
use crate::domain::team_request::{
    TeamRequest, TeamRequestFilter, TeamRequestId, TeamRequestRepository, TeamRequestWithUser,
};
use crate::domain::user::{User, UserId, UserRepository};
use crate::domain::DomainError;

const USER_COLUMNS: &str = "id, name, email, hashed_password, score";
const TEAM_COLUMNS: &str = "id, name, max_member_count, owner_id";
const REQUEST_COLUMNS: &str = "r.id, r.team_id, r.user_id, r.message, r.created_at";
const JOINED_USER_COLUMNS: &str =
    "u.id AS u_id, u.name AS u_name, u.email AS u_email, u.hashed_password AS u_hashed_password, u.score AS u_score";

/// PostgreSQL connection configuration
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Minimum number of connections to maintain
    pub min_connections: u32,
    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/team_requests".to_string(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout_secs: 30,
        }
    }
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }
}

/// PostgreSQL implementation of every repository trait
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a store over an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a connection pool
    pub async fn connect(config: &PostgresConfig) -> Result<Self, DomainError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
            .connect(&config.url)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to connect to PostgreSQL: {}", e)))?;

        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn fetch_user(&self, clause: &str, value: &str) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE {} = $1 ORDER BY id LIMIT 1", USER_COLUMNS, clause);

        let row = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get user: {}", e)))?;

        row.as_ref().map(|r| row_to_user(r, "")).transpose()
    }

    async fn fetch_team(&self, clause: &str, value: &str) -> Result<Option<Team>, DomainError> {
        let query = format!("SELECT {} FROM teams WHERE {} = $1", TEAM_COLUMNS, clause);

        let row = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get team: {}", e)))?;

        row.as_ref().map(row_to_team).transpose()
    }

    async fn fetch_requests(
        &self,
        filter: &TeamRequestFilter,
        limit: Option<i64>,
    ) -> Result<Vec<TeamRequestWithUser>, DomainError> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT {}, {} FROM team_requests r JOIN users u ON u.id = r.user_id WHERE TRUE",
            REQUEST_COLUMNS, JOINED_USER_COLUMNS
        ));
        push_filter(&mut builder, filter);
        builder.push(" ORDER BY r.created_at, r.id");

        if let Some(limit) = limit {
            builder.push(" LIMIT ").push_bind(limit);
        }

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to list team requests: {}", e)))?;

        rows.iter()
            .map(|row| -> Result<TeamRequestWithUser, DomainError> {
                Ok(TeamRequestWithUser {
                    request: row_to_request(row)?,
                    user: row_to_user(row, "u_")?,
                })
            })
            .collect()
    }
}

fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &TeamRequestFilter) {
    if let Some(ref team_id) = filter.team_id {
        builder.push(" AND r.team_id = ").push_bind(team_id.as_str().to_string());
    }

    if let Some(ref user_id) = filter.user_id {
        builder.push(" AND r.user_id = ").push_bind(user_id.as_str().to_string());
    }

    if let Some(ref name) = filter.user_name {
        builder.push(" AND u.name = ").push_bind(name.clone());
    }
}

fn column_error(e: sqlx::Error) -> DomainError {
    DomainError::storage(format!("Failed to read column: {}", e))
}

fn row_to_user(row: &PgRow, prefix: &str) -> Result<User, DomainError> {
    let id: String = row.try_get(format!("{}id", prefix).as_str()).map_err(column_error)?;
    let name: String = row.try_get(format!("{}name", prefix).as_str()).map_err(column_error)?;
    let email: String = row.try_get(format!("{}email", prefix).as_str()).map_err(column_error)?;
    let hashed_password: String = row
        .try_get(format!("{}hashed_password", prefix).as_str())
        .map_err(column_error)?;
    let score: i64 = row.try_get(format!("{}score", prefix).as_str()).map_err(column_error)?;

    let id = UserId::new(id).map_err(|e| DomainError::storage(e.to_string()))?;
    Ok(User::with_id(id, name, email, hashed_password)
        .map_err(|e| DomainError::storage(e.to_string()))?
        .with_score(score))
}

fn row_to_team(row: &PgRow) -> Result<Team, DomainError> {
    let id: String = row.try_get("id").map_err(column_error)?;
    let name: String = row.try_get("name").map_err(column_error)?;
    let max_member_count: i32 = row.try_get("max_member_count").map_err(column_error)?;
    let owner_id: String = row.try_get("owner_id").map_err(column_error)?;

    let max_member_count = u32::try_from(max_member_count)
        .map_err(|_| DomainError::storage(format!("Team '{}' has a negative capacity", id)))?;
    let id = TeamId::new(id).map_err(|e| DomainError::storage(e.to_string()))?;
    let owner_id = UserId::new(owner_id).map_err(|e| DomainError::storage(e.to_string()))?;

    Team::with_id(id, name, max_member_count, owner_id).map_err(|e| DomainError::storage(e.to_string()))
}

fn row_to_membership(row: &PgRow) -> Result<TeamMembership, DomainError> {
    let team_id: String = row.try_get("team_id").map_err(column_error)?;
    let user_id: String = row.try_get("user_id").map_err(column_error)?;
    let joined_at: DateTime<Utc> = row.try_get("joined_at").map_err(column_error)?;

    let team_id = TeamId::new(team_id).map_err(|e| DomainError::storage(e.to_string()))?;
    let user_id = UserId::new(user_id).map_err(|e| DomainError::storage(e.to_string()))?;

    Ok(TeamMembership::new(team_id, user_id).with_joined_at(joined_at))
}

fn row_to_request(row: &PgRow) -> Result<TeamRequest, DomainError> {
    let id: String = row.try_get("id").map_err(column_error)?;
    let team_id: String = row.try_get("team_id").map_err(column_error)?;
    let user_id: String = row.try_get("user_id").map_err(column_error)?;
    let message: Option<String> = row.try_get("message").map_err(column_error)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(column_error)?;

    Ok(TeamRequest::restore(
        TeamRequestId::new(id),
        TeamId::new(team_id).map_err(|e| DomainError::storage(e.to_string()))?,
        UserId::new(user_id).map_err(|e| DomainError::storage(e.to_string()))?,
        message,
        created_at,
    ))
}

/// Map constraint violations to domain errors
fn write_error(e: sqlx::Error, what: &str) -> DomainError {
    if let sqlx::Error::Database(ref db) = e {
        if db.is_unique_violation() {
            return DomainError::conflict(format!("{} already exists", what));
        }
        if db.is_foreign_key_violation() {
            return DomainError::not_found(format!("{} references a missing record", what));
        }
    }

    DomainError::storage(format!("Failed to write {}: {}", what.to_lowercase(), e))
}

#[async_trait]
impl UserRepository for PostgresStore {
    async fn find_unique(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        self.fetch_user("id", id.as_str()).await
    }

    async fn find_unique_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.fetch_user("email", email).await
    }

    async fn find_first_by_name(&self, name: &str) -> Result<Option<User>, DomainError> {
        self.fetch_user("name", name).await
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, hashed_password, score)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(user.id().as_str())
        .bind(user.name())
        .bind(user.email())
        .bind(user.hashed_password())
        .bind(user.score())
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(e, "User"))?;

        Ok(user)
    }
}

#[async_trait]
impl TeamRepository for PostgresStore {
    async fn find_unique(&self, id: &TeamId) -> Result<Option<Team>, DomainError> {
        self.fetch_team("id", id.as_str()).await
    }

    async fn find_unique_by_name(&self, name: &str) -> Result<Option<Team>, DomainError> {
        self.fetch_team("name", name).await
    }

    async fn find_details_by_name(&self, name: &str) -> Result<Option<TeamDetails>, DomainError> {
        let Some(team) = self.fetch_team("name", name).await? else {
            return Ok(None);
        };

        let owner = self.fetch_user("id", team.owner_id().as_str()).await?.ok_or_else(|| {
            DomainError::storage(format!("Team '{}' references missing owner", team.id()))
        })?;

        let rows = sqlx::query(&format!(
            r#"
            SELECT m.team_id, m.user_id, m.joined_at, {}
            FROM team_memberships m
            JOIN users u ON u.id = m.user_id
            WHERE m.team_id = $1
            ORDER BY m.joined_at
            "#,
            JOINED_USER_COLUMNS
        ))
        .bind(team.id().as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list memberships: {}", e)))?;

        let memberships = rows
            .iter()
            .map(|row| -> Result<Member, DomainError> {
                Ok(Member {
                    membership: row_to_membership(row)?,
                    user: row_to_user(row, "u_")?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let requests = self
            .fetch_requests(&TeamRequestFilter::new().with_team(team.id().clone()), None)
            .await?
            .into_iter()
            .map(|r| r.request)
            .collect();

        Ok(Some(TeamDetails {
            team,
            owner,
            memberships,
            requests,
        }))
    }

    async fn create(&self, team: Team) -> Result<Team, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO teams (id, name, max_member_count, owner_id)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(team.id().as_str())
        .bind(team.name())
        .bind(team.max_member_count() as i32)
        .bind(team.owner_id().as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(e, "Team"))?;

        Ok(team)
    }
}

#[async_trait]
impl TeamMembershipRepository for PostgresStore {
    async fn find_unique(
        &self,
        team_id: &TeamId,
        user_id: &UserId,
    ) -> Result<Option<TeamMembership>, DomainError> {
        let row = sqlx::query(
            "SELECT team_id, user_id, joined_at FROM team_memberships WHERE team_id = $1 AND user_id = $2",
        )
        .bind(team_id.as_str())
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get membership: {}", e)))?;

        row.as_ref().map(row_to_membership).transpose()
    }

    async fn find_many(&self, team_id: &TeamId) -> Result<Vec<TeamMembership>, DomainError> {
        let rows = sqlx::query(
            "SELECT team_id, user_id, joined_at FROM team_memberships WHERE team_id = $1 ORDER BY joined_at",
        )
        .bind(team_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list memberships: {}", e)))?;

        rows.iter().map(row_to_membership).collect()
    }

    async fn create(&self, membership: TeamMembership) -> Result<TeamMembership, DomainError> {
        sqlx::query("INSERT INTO team_memberships (team_id, user_id, joined_at) VALUES ($1, $2, $3)")
            .bind(membership.team_id().as_str())
            .bind(membership.user_id().as_str())
            .bind(membership.joined_at())
            .execute(&self.pool)
            .await
            .map_err(|e| write_error(e, "Team membership"))?;

        Ok(membership)
    }

    async fn accept(&self, membership: TeamMembership) -> Result<Acceptance, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to begin transaction: {}", e)))?;

        // dropping `tx` on any early return rolls both statements back
        sqlx::query("INSERT INTO team_memberships (team_id, user_id, joined_at) VALUES ($1, $2, $3)")
            .bind(membership.team_id().as_str())
            .bind(membership.user_id().as_str())
            .bind(membership.joined_at())
            .execute(&mut *tx)
            .await
            .map_err(|e| write_error(e, "Team membership"))?;

        let deleted = sqlx::query("DELETE FROM team_requests WHERE team_id = $1 AND user_id = $2")
            .bind(membership.team_id().as_str())
            .bind(membership.user_id().as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete team requests: {}", e)))?;

        tx.commit()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to commit transaction: {}", e)))?;

        Ok(Acceptance {
            membership,
            removed_requests: deleted.rows_affected(),
        })
    }
}

#[async_trait]
impl TeamRequestRepository for PostgresStore {
    async fn find_unique(&self, id: &TeamRequestId) -> Result<Option<TeamRequest>, DomainError> {
        let row = sqlx::query(&format!("SELECT {} FROM team_requests r WHERE r.id = $1", REQUEST_COLUMNS))
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get team request: {}", e)))?;

        row.as_ref().map(row_to_request).transpose()
    }

    async fn find_first(&self, filter: &TeamRequestFilter) -> Result<Option<TeamRequest>, DomainError> {
        Ok(self
            .fetch_requests(filter, Some(1))
            .await?
            .into_iter()
            .next()
            .map(|r| r.request))
    }

    async fn find_many(&self, filter: &TeamRequestFilter) -> Result<Vec<TeamRequest>, DomainError> {
        Ok(self
            .fetch_requests(filter, None)
            .await?
            .into_iter()
            .map(|r| r.request)
            .collect())
    }

    async fn find_many_with_user(
        &self,
        filter: &TeamRequestFilter,
    ) -> Result<Vec<TeamRequestWithUser>, DomainError> {
        self.fetch_requests(filter, None).await
    }

    async fn create(&self, request: TeamRequest) -> Result<TeamRequest, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO team_requests (id, team_id, user_id, message, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(request.id().as_str())
        .bind(request.team_id().as_str())
        .bind(request.user_id().as_str())
        .bind(request.message())
        .bind(request.created_at())
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(e, "Team request"))?;

        Ok(request)
    }

    async fn delete_many(&self, filter: &TeamRequestFilter) -> Result<u64, DomainError> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
            "DELETE FROM team_requests r USING users u WHERE u.id = r.user_id",
        );
        push_filter(&mut builder, filter);

        let result = builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete team requests: {}", e)))?;

        Ok(result.rows_affected())
    }
}
