//! Team request workflow
//!
//! Users ask to join a team; the team owner accepts or rejects each
//! request. Accepted requests become memberships. The workflow runs over
//! repository traits with in-memory and PostgreSQL implementations:
//!
//! ```no_run
//! use std::sync::Arc;
//! use team_requests::infrastructure::store::InMemoryStore;
//! use team_requests::infrastructure::team_request::TeamRequestService;
//!
//! # async fn demo() -> Result<(), team_requests::domain::DomainError> {
//! let service = TeamRequestService::from_store(Arc::new(InMemoryStore::new()));
//! let requests = service
//!     .get_all_team_requests(Some("owner@example.com"), Some("Team"))
//!     .await?;
//! # let _ = requests;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
pub use domain::DomainError;
pub use infrastructure::team_request::TeamRequestService;
