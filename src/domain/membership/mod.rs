//! Team membership domain

mod entity;
mod repository;

pub use entity::{Acceptance, Member, TeamMembership};
pub use repository::TeamMembershipRepository;

#[cfg(test)]
pub use repository::MockTeamMembershipRepository;
