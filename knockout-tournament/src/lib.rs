//! Knockout Tournament - Tournament lifecycle around a bracket
//!
//! This crate provides the tournament layer:
//! - Registration and participants
//! - Seeding (as listed or shuffled) and reseeding
//! - Score reporting on top of the bracket's winner registry
//! - Standings and placements
//! - An in-memory registry of tournaments
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: TournamentRegistry (collection)
//! - Level 2: Tournament lifecycle (start, record_result, cancel)
//! - Level 3: standings, seeding
//! - Level 4: configuration, errors

mod config;
mod error;
mod registry;
mod tournament;

pub use config::{Seeding, TournamentConfig};
pub use error::TournamentError;
pub use registry::TournamentRegistry;
pub use tournament::{
    MatchRecord, Standing, Tournament, TournamentId, TournamentStatus,
};

pub type Result<T> = std::result::Result<T, TournamentError>;
