//! Team request workflow

mod service;

pub use service::*;
