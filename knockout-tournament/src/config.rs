//! Configuration types for tournaments
//!
//! Level 4 - Utilities and configuration

use knockout_core::Roster;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// How participants are placed into round 0
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Seeding {
    /// Join order
    #[default]
    AsListed,
    /// Random draw (seeded for reproducibility, entropy when `None`)
    Shuffled { seed: Option<u64> },
}

impl Seeding {
    /// Order a roster for the given draw number
    ///
    /// Each draw of a seeded shuffle uses a different stream so that a reseed
    /// produces a new bracket.
    pub fn arrange(&self, roster: &Roster, draw: u64) -> Roster {
        match *self {
            Seeding::AsListed => roster.clone(),
            Seeding::Shuffled { seed } => {
                let mut rng = match seed {
                    Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(draw)),
                    None => ChaCha8Rng::from_entropy(),
                };
                let mut players = roster.players().to_vec();
                players.shuffle(&mut rng);
                Roster::new(players)
            }
        }
    }
}

/// Tournament configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentConfig {
    /// Registration cap
    pub max_players: usize,
    /// Round-0 placement
    pub seeding: Seeding,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            max_players: 8,
            seeding: Seeding::AsListed,
        }
    }
}

impl TournamentConfig {
    /// Create config for a random draw
    pub fn shuffled(seed: Option<u64>) -> Self {
        Self {
            seeding: Seeding::Shuffled { seed },
            ..Default::default()
        }
    }

    /// Set registration cap
    pub fn with_max_players(mut self, max_players: usize) -> Self {
        self.max_players = max_players;
        self
    }

    /// Set seeding mode
    pub fn with_seeding(mut self, seeding: Seeding) -> Self {
        self.seeding = seeding;
        self
    }
}
