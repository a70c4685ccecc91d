//! In-memory tournament collection
//!
//! Level 1 - Orchestration

use knockout_core::PlayerId;
use std::collections::BTreeMap;

use crate::config::TournamentConfig;
use crate::error::TournamentError;
use crate::tournament::{Tournament, TournamentId, TournamentStatus};
use crate::Result;

/// Owns every tournament and allocates their ids
#[derive(Debug, Default)]
pub struct TournamentRegistry {
    next_id: u64,
    tournaments: BTreeMap<TournamentId, Tournament>,
}

impl TournamentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new tournament for registration
    pub fn create(
        &mut self,
        owner_id: PlayerId,
        title: &str,
        description: Option<String>,
        config: &TournamentConfig,
    ) -> Result<&Tournament> {
        let id = TournamentId(self.next_id + 1);
        let tournament = Tournament::new(id, owner_id, title, description, config)?;
        self.next_id += 1;

        tracing::info!("Created tournament {} \"{}\"", id, tournament.title);
        Ok(self.tournaments.entry(id).or_insert(tournament))
    }

    pub fn get(&self, id: TournamentId) -> Result<&Tournament> {
        self.tournaments
            .get(&id)
            .ok_or(TournamentError::NotFound(id))
    }

    pub fn get_mut(&mut self, id: TournamentId) -> Result<&mut Tournament> {
        self.tournaments
            .get_mut(&id)
            .ok_or(TournamentError::NotFound(id))
    }

    /// Newest first
    pub fn list(&self, limit: usize, offset: usize) -> Vec<&Tournament> {
        self.tournaments
            .values()
            .rev()
            .skip(offset)
            .take(limit)
            .collect()
    }

    pub fn count_with_status(&self, status: TournamentStatus) -> usize {
        self.tournaments
            .values()
            .filter(|t| t.status == status)
            .count()
    }

    pub fn len(&self) -> usize {
        self.tournaments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tournaments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_allocates_ids() {
        let mut registry = TournamentRegistry::new();
        let config = TournamentConfig::default();
        let a = registry.create(PlayerId(1), "A", None, &config).unwrap().id;
        let b = registry.create(PlayerId(1), "B", None, &config).unwrap().id;
        assert_eq!(a, TournamentId(1));
        assert_eq!(b, TournamentId(2));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_create_rejects_without_consuming_id() {
        let mut registry = TournamentRegistry::new();
        let config = TournamentConfig::default();
        assert_eq!(
            registry.create(PlayerId(1), "", None, &config).unwrap_err(),
            TournamentError::BadTitle
        );
        assert!(registry.is_empty());
        let id = registry.create(PlayerId(1), "A", None, &config).unwrap().id;
        assert_eq!(id, TournamentId(1));
    }

    #[test]
    fn test_list_newest_first_with_paging() {
        let mut registry = TournamentRegistry::new();
        let config = TournamentConfig::default();
        for title in ["A", "B", "C", "D"] {
            registry.create(PlayerId(1), title, None, &config).unwrap();
        }
        let titles: Vec<&str> = registry.list(2, 1).iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["C", "B"]);
        assert!(registry.list(10, 4).is_empty());
    }

    #[test]
    fn test_count_with_status() {
        let mut registry = TournamentRegistry::new();
        let config = TournamentConfig::default();
        for title in ["A", "B", "C"] {
            registry.create(PlayerId(1), title, None, &config).unwrap();
        }
        registry.get_mut(TournamentId(2)).unwrap().cancel().unwrap();

        assert_eq!(registry.count_with_status(TournamentStatus::Registration), 2);
        assert_eq!(registry.count_with_status(TournamentStatus::Canceled), 1);
        assert_eq!(registry.count_with_status(TournamentStatus::Ongoing), 0);
    }

    #[test]
    fn test_get_missing() {
        let registry = TournamentRegistry::new();
        assert_eq!(
            registry.get(TournamentId(5)).unwrap_err(),
            TournamentError::NotFound(TournamentId(5))
        );
    }
}
