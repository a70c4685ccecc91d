//! Server state management
//!
//! One registry shared by every handler. Handlers hold the lock only for the
//! duration of a single engine call.

use knockout_tournament::TournamentRegistry;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::ApiError;

/// Server-wide shared state
pub struct ServerState {
    tournaments: RwLock<TournamentRegistry>,
}

impl ServerState {
    pub fn new() -> Self {
        Self {
            tournaments: RwLock::new(TournamentRegistry::new()),
        }
    }

    pub fn read(&self) -> Result<RwLockReadGuard<'_, TournamentRegistry>, ApiError> {
        self.tournaments
            .read()
            .map_err(|_| ApiError::Internal("tournament registry lock poisoned".to_string()))
    }

    pub fn write(&self) -> Result<RwLockWriteGuard<'_, TournamentRegistry>, ApiError> {
        self.tournaments
            .write()
            .map_err(|_| ApiError::Internal("tournament registry lock poisoned".to_string()))
    }
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new()
    }
}
