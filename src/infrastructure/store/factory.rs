//! Store factory for runtime backend selection

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use tracing::info;

use crate::config::StoreSettings;
use crate::domain::DomainError;
use crate::infrastructure::team_request::TeamRequestService;

use super::in_memory::InMemoryStore;
use super::postgres::{PostgresConfig, PostgresStore};

/// Supported store backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreType {
    /// In-memory store (for testing/development)
    InMemory,
    /// PostgreSQL store
    Postgres,
}

impl FromStr for StoreType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" | "inmemory" | "in-memory" | "in_memory" => Ok(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            other => Err(DomainError::configuration(format!(
                "Unknown store type '{}'",
                other
            ))),
        }
    }
}

/// Resolved store configuration
#[derive(Debug, Clone)]
pub enum StoreConfig {
    /// In-memory store, optionally seeded from a JSON snapshot
    InMemory { seed: Option<PathBuf> },
    /// PostgreSQL store
    Postgres(PostgresConfig),
}

impl StoreConfig {
    pub fn in_memory() -> Self {
        Self::InMemory { seed: None }
    }

    pub fn postgres_url(url: impl Into<String>) -> Self {
        Self::Postgres(PostgresConfig::new(url))
    }

    /// Resolve the loosely-typed settings from the config file
    pub fn from_settings(settings: &StoreSettings) -> Result<Self, DomainError> {
        match settings.kind.parse::<StoreType>()? {
            StoreType::InMemory => Ok(Self::InMemory {
                seed: settings.seed.as_ref().map(PathBuf::from),
            }),
            StoreType::Postgres => {
                let url = settings.url.clone().ok_or_else(|| {
                    DomainError::configuration("A postgres store requires store.url")
                })?;
                Ok(Self::Postgres(
                    PostgresConfig::new(url).with_max_connections(settings.max_connections),
                ))
            }
        }
    }

    pub fn store_type(&self) -> StoreType {
        match self {
            Self::InMemory { .. } => StoreType::InMemory,
            Self::Postgres(_) => StoreType::Postgres,
        }
    }
}

/// Factory wiring a store into the workflow service
#[derive(Debug)]
pub struct StoreFactory;

impl StoreFactory {
    /// Create the workflow service over the configured store
    pub async fn create_service(config: &StoreConfig) -> Result<TeamRequestService, DomainError> {
        match config {
            StoreConfig::InMemory { seed } => {
                let store = match seed {
                    Some(path) => {
                        info!(seed = %path.display(), "Loading in-memory store");
                        InMemoryStore::from_json_file(path)?
                    }
                    None => InMemoryStore::new(),
                };
                Ok(TeamRequestService::from_store(Arc::new(store)))
            }
            StoreConfig::Postgres(pg_config) => {
                info!(max_connections = pg_config.max_connections, "Connecting to PostgreSQL");
                let store = PostgresStore::connect(pg_config).await?;
                Ok(TeamRequestService::from_store(Arc::new(store)))
            }
        }
    }
}
