//! HTTP route handlers

pub mod matches;
pub mod status;
pub mod tournaments;
