//! Team validation

use thiserror::Error;

/// Errors that can occur during team validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TeamValidationError {
    #[error("Team ID cannot be empty")]
    EmptyId,

    #[error("Team name cannot be empty")]
    EmptyName,

    #[error("Team name cannot exceed {0} characters")]
    NameTooLong(usize),

    #[error("Team must allow at least one member")]
    InvalidMaxMemberCount,
}

const MAX_TEAM_NAME_LENGTH: usize = 100;

/// Validate a team ID
pub fn validate_team_id(id: &str) -> Result<(), TeamValidationError> {
    if id.trim().is_empty() {
        return Err(TeamValidationError::EmptyId);
    }

    Ok(())
}

/// Validate a team name
pub fn validate_team_name(name: &str) -> Result<(), TeamValidationError> {
    if name.trim().is_empty() {
        return Err(TeamValidationError::EmptyName);
    }

    if name.chars().count() > MAX_TEAM_NAME_LENGTH {
        return Err(TeamValidationError::NameTooLong(MAX_TEAM_NAME_LENGTH));
    }

    Ok(())
}

/// Validate the configured seat count
pub fn validate_max_member_count(count: u32) -> Result<(), TeamValidationError> {
    if count < 1 {
        return Err(TeamValidationError::InvalidMaxMemberCount);
    }

    Ok(())
}
