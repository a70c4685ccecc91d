//! Knockout Core - Single-elimination bracket engine
//!
//! This crate provides the bracket logic shared by every front end:
//! - Roster types (player ids, aliases)
//! - Slots and slot resolution
//! - Bracket construction with bye padding
//! - Status derivation and bye propagation
//! - Winner recording and the ready queue
//! - JSON snapshots
//!
//! All mutation goes through [`Bracket::set_winner`], [`Bracket::clear_winner`]
//! and [`Bracket::mark_in_progress`]; each of them leaves the bracket settled.

pub mod bracket;
pub mod builder;
pub mod error;
pub mod queue;
pub mod registry;
pub mod roster;
pub mod slot;
pub mod snapshot;
pub mod status;

// Re-exports for convenient access
pub use bracket::{Bracket, BracketSnapshot, Match, MatchId, MatchStatus};
pub use error::{BracketError, Result};
pub use queue::Pairing;
pub use roster::{Player, PlayerId, Roster};
pub use slot::{Resolved, Slot};
