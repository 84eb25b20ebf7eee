//! Infrastructure layer - store implementations, workflow service, logging

pub mod logging;
pub mod store;
pub mod team_request;
