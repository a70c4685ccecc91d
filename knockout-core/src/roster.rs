//! Roster types - who can be seeded into a bracket
//!
//! The bracket itself only ever stores [`PlayerId`]s. Aliases and avatars stay
//! with the roster so that front ends can render names next to resolved slots.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Stable player identifier (the platform's numeric user id)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for PlayerId {
    fn from(id: u64) -> Self {
        PlayerId(id)
    }
}

/// A roster entry
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub alias: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

impl Player {
    pub fn new(id: u64, alias: impl Into<String>) -> Self {
        Self {
            id: PlayerId(id),
            alias: alias.into(),
            avatar: None,
        }
    }

    /// Set avatar reference
    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }
}

/// Ordered list of players, in seeding order
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    players: Vec<Player>,
}

impl Roster {
    pub fn new(players: Vec<Player>) -> Self {
        Self { players }
    }

    /// Player ids in roster order
    pub fn ids(&self) -> Vec<PlayerId> {
        self.players.iter().map(|p| p.id).collect()
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.get(id).is_some()
    }

    /// Look up a player by id
    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Display name for an id, falling back to `#<id>` for unknown players
    pub fn alias_of(&self, id: PlayerId) -> String {
        self.get(id)
            .map(|p| p.alias.clone())
            .unwrap_or_else(|| format!("#{}", id))
    }

    pub fn push(&mut self, player: Player) {
        self.players.push(player);
    }

    /// Load a roster from a JSON array of players
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read roster: {}", path.display()))?;
        let roster: Roster = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse roster: {}", path.display()))?;
        Ok(roster)
    }
}

impl From<Vec<Player>> for Roster {
    fn from(players: Vec<Player>) -> Self {
        Self::new(players)
    }
}
