//! Team domain module
//!
//! A team has one owner and a bounded number of seats shared between
//! members and pending join requests.

mod entity;
mod repository;
mod validation;

pub use entity::{Team, TeamDetails, TeamId};
pub use repository::TeamRepository;
pub use validation::{
    validate_max_member_count, validate_team_id, validate_team_name, TeamValidationError,
};

#[cfg(test)]
pub use repository::MockTeamRepository;
