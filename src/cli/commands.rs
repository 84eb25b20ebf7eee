//! Dispatch of parsed subcommands to the workflow service

use serde_json::{json, Value};

use super::Command;
use crate::domain::DomainError;
use crate::infrastructure::team_request::TeamRequestService;

fn to_value<T: serde::Serialize>(value: &T) -> Result<Value, DomainError> {
    serde_json::to_value(value)
        .map_err(|e| DomainError::storage(format!("Failed to serialize result: {}", e)))
}

/// Run one command and return its JSON result
pub async fn execute(service: &TeamRequestService, command: &Command) -> Result<Value, DomainError> {
    match command {
        Command::Request(args) => {
            let request = service
                .create_team_request(
                    args.email.as_deref(),
                    args.team.as_deref(),
                    args.message.as_deref(),
                )
                .await?;
            to_value(&request)
        }
        Command::Accept(args) => {
            let acceptance = service
                .accept_team_request(
                    args.owner.as_deref(),
                    args.team.as_deref(),
                    args.user.as_deref(),
                )
                .await?;
            to_value(&acceptance)
        }
        Command::Reject(args) => {
            let count = service
                .delete_team_request(
                    args.owner.as_deref(),
                    args.team.as_deref(),
                    args.user.as_deref(),
                )
                .await?;
            Ok(json!({ "count": count }))
        }
        Command::List(args) => {
            let requests = service
                .get_all_team_requests(args.owner.as_deref(), args.team.as_deref())
                .await?;
            to_value(&requests)
        }
    }
}
