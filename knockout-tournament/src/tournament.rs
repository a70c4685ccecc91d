//! Tournament lifecycle
//!
//! Level 2 - Phases (start, record results, cancel) and Level 3 - Steps
//! (standings)
//!
//! A tournament owns at most one bracket. The bracket is built when
//! registration closes and rebuilt wholesale on reseed; results flow into it
//! only through its winner registry.

use chrono::{DateTime, Utc};
use knockout_core::{Bracket, MatchId, Player, PlayerId, Resolved, Roster};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::{Seeding, TournamentConfig};
use crate::error::TournamentError;
use crate::Result;

/// Tournament identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TournamentId(pub u64);

impl fmt::Display for TournamentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    Registration,
    Ongoing,
    Finished,
    Canceled,
}

impl fmt::Display for TournamentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TournamentStatus::Registration => "registration",
            TournamentStatus::Ongoing => "ongoing",
            TournamentStatus::Finished => "finished",
            TournamentStatus::Canceled => "canceled",
        };
        f.write_str(s)
    }
}

/// A result reported for one match
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub match_id: MatchId,
    pub winner: PlayerId,
    pub loser: PlayerId,
    /// (left, right) score, absent for walkovers
    pub score: Option<(u32, u32)>,
}

/// Final or running position of a participant
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub player_id: PlayerId,
    pub alias: String,
    /// Matches won against a real opponent
    pub wins: u32,
    /// Round the player lost in, `None` while still alive
    pub eliminated_in: Option<usize>,
    /// Shared placement (1, 2, 3, 5, ...), `None` while still alive
    /// in an undecided tournament
    pub placement: Option<usize>,
}

impl Standing {
    pub fn is_alive(&self) -> bool {
        self.eliminated_in.is_none()
    }
}

/// Single-elimination tournament
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub owner_id: PlayerId,
    pub title: String,
    pub description: Option<String>,
    pub max_players: usize,
    pub status: TournamentStatus,
    pub created_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
    seeding: Seeding,
    participants: Roster,
    bracket: Option<Bracket>,
    records: Vec<MatchRecord>,
    draws: u64,
}

// ============================================================================
// Level 2 - Phases
// ============================================================================

impl Tournament {
    /// Open a tournament for registration
    pub fn new(
        id: TournamentId,
        owner_id: PlayerId,
        title: &str,
        description: Option<String>,
        config: &TournamentConfig,
    ) -> Result<Self> {
        let title = title.trim();
        if title.is_empty() {
            return Err(TournamentError::BadTitle);
        }
        if config.max_players < 2 {
            return Err(TournamentError::BadMaxPlayers(config.max_players));
        }

        Ok(Self {
            id,
            owner_id,
            title: title.to_string(),
            description,
            max_players: config.max_players,
            status: TournamentStatus::Registration,
            created_at: Utc::now(),
            started_at: None,
            ended_at: None,
            seeding: config.seeding,
            participants: Roster::default(),
            bracket: None,
            records: Vec::new(),
            draws: 0,
        })
    }

    /// Register a player; returns false if they had already joined
    pub fn join(&mut self, player: Player) -> Result<bool> {
        if self.status != TournamentStatus::Registration {
            return Err(TournamentError::NotInRegistration);
        }
        if self.participants.contains(player.id) {
            return Ok(false);
        }
        if self.participants.len() >= self.max_players {
            return Err(TournamentError::TournamentFull);
        }

        tracing::debug!("Player {} joined tournament {}", player.id, self.id);
        self.participants.push(player);
        Ok(true)
    }

    /// Close registration and seed the bracket
    pub fn start(&mut self) -> Result<&Bracket> {
        if self.status != TournamentStatus::Registration {
            return Err(TournamentError::NotInRegistration);
        }

        let bracket = self.draw_bracket()?;
        self.status = TournamentStatus::Ongoing;
        self.started_at = Some(Utc::now());

        tracing::info!(
            "Tournament {} started with {} players",
            self.id,
            self.participants.len()
        );

        Ok(self.bracket.insert(bracket))
    }

    /// Discard the bracket and draw a fresh one
    pub fn reseed(&mut self) -> Result<&Bracket> {
        if self.status != TournamentStatus::Ongoing {
            return Err(TournamentError::NotOngoing);
        }
        if !self.records.is_empty() {
            return Err(TournamentError::ResultsRecorded);
        }

        let bracket = self.draw_bracket()?;
        tracing::info!("Tournament {} reseeded", self.id);
        Ok(self.bracket.insert(bracket))
    }

    /// Mark a ready match as being played
    pub fn start_match(&mut self, match_id: MatchId) -> Result<()> {
        let bracket = self.ongoing_bracket_mut()?;
        bracket.mark_in_progress(match_id)?;
        Ok(())
    }

    /// Report a scored result; the higher score wins
    pub fn record_result(
        &mut self,
        match_id: MatchId,
        score_left: u32,
        score_right: u32,
    ) -> Result<MatchRecord> {
        let (left, right) = self.playable_opponents(match_id)?;
        if score_left == score_right {
            return Err(TournamentError::DrawNotAllowed);
        }

        let (winner, loser) = if score_left > score_right {
            (left, right)
        } else {
            (right, left)
        };
        self.commit(MatchRecord {
            match_id,
            winner,
            loser,
            score: Some((score_left, score_right)),
        })
    }

    /// Award a match without a score (forfeit, walkover)
    pub fn declare_winner(&mut self, match_id: MatchId, winner: PlayerId) -> Result<MatchRecord> {
        let (left, right) = self.playable_opponents(match_id)?;
        let loser = if winner == left {
            right
        } else if winner == right {
            left
        } else {
            return Err(knockout_core::BracketError::InvalidWinner {
                match_id,
                player_id: winner,
            }
            .into());
        };

        self.commit(MatchRecord {
            match_id,
            winner,
            loser,
            score: None,
        })
    }

    /// Undo a result and everything decided downstream of it
    pub fn clear_result(&mut self, match_id: MatchId) -> Result<Vec<MatchId>> {
        if !matches!(
            self.status,
            TournamentStatus::Ongoing | TournamentStatus::Finished
        ) {
            return Err(TournamentError::NotOngoing);
        }
        let bracket = self.bracket.as_mut().ok_or(TournamentError::NotOngoing)?;

        let cleared = bracket.clear_winner(match_id)?;
        self.records.retain(|r| !cleared.contains(&r.match_id));

        if !cleared.is_empty() && self.status == TournamentStatus::Finished {
            self.status = TournamentStatus::Ongoing;
            self.ended_at = None;
            tracing::info!("Tournament {} reopened", self.id);
        }

        Ok(cleared)
    }

    /// Abandon the tournament
    pub fn cancel(&mut self) -> Result<()> {
        match self.status {
            TournamentStatus::Registration | TournamentStatus::Ongoing => {
                self.status = TournamentStatus::Canceled;
                self.ended_at = Some(Utc::now());
                tracing::info!("Tournament {} canceled", self.id);
                Ok(())
            }
            status => Err(TournamentError::Closed(status)),
        }
    }
}

// ============================================================================
// Level 3 - Steps
// ============================================================================

impl Tournament {
    fn draw_bracket(&mut self) -> Result<Bracket> {
        let arranged = self.seeding.arrange(&self.participants, self.draws);
        let bracket = Bracket::from_roster(&arranged)?;
        self.draws += 1;
        Ok(bracket)
    }

    fn ongoing_bracket_mut(&mut self) -> Result<&mut Bracket> {
        if self.status != TournamentStatus::Ongoing {
            return Err(TournamentError::NotOngoing);
        }
        self.bracket.as_mut().ok_or(TournamentError::NotOngoing)
    }

    /// Both players of an undecided match
    fn playable_opponents(&mut self, match_id: MatchId) -> Result<(PlayerId, PlayerId)> {
        let bracket = self.ongoing_bracket_mut()?;
        let m = bracket
            .get(match_id)
            .ok_or(knockout_core::BracketError::MatchNotFound(match_id))?;
        if m.winner.is_some() {
            return Err(TournamentError::AlreadyReported(match_id));
        }

        match bracket.resolve_sides(m) {
            (Resolved::Player(left), Resolved::Player(right)) => Ok((left, right)),
            _ => Err(TournamentError::MatchNotReady(match_id)),
        }
    }

    fn commit(&mut self, record: MatchRecord) -> Result<MatchRecord> {
        let bracket = self.ongoing_bracket_mut()?;
        bracket.set_winner(record.match_id, record.winner)?;
        let complete = bracket.is_complete();

        self.records.push(record);
        tracing::info!(
            "Tournament {}: match {} won by {}",
            self.id,
            record.match_id,
            self.participants.alias_of(record.winner)
        );

        if complete {
            self.status = TournamentStatus::Finished;
            self.ended_at = Some(Utc::now());
            tracing::info!(
                "Tournament {} finished, champion {}",
                self.id,
                self.participants.alias_of(record.winner)
            );
        }

        Ok(record)
    }

    /// Standings, champion first, then by how deep each player went
    pub fn standings(&self) -> Vec<Standing> {
        let Some(bracket) = &self.bracket else {
            return Vec::new();
        };

        let champion = bracket.champion();
        let size = bracket.size();
        let mut standings: Vec<Standing> = self
            .participants
            .players()
            .iter()
            .map(|player| {
                let mut wins = 0;
                let mut eliminated_in = None;
                for m in bracket.matches() {
                    let Some(winner) = m.winner else { continue };
                    let (left, right) = bracket.resolve_sides(m);
                    let contested = left.is_player() && right.is_player();
                    let took_part = left == Resolved::Player(player.id)
                        || right == Resolved::Player(player.id);
                    if !took_part {
                        continue;
                    }
                    if winner == player.id {
                        if contested {
                            wins += 1;
                        }
                    } else {
                        eliminated_in = Some(m.round);
                    }
                }

                let placement = match eliminated_in {
                    Some(round) => Some(size / (1 << (round + 1)) + 1),
                    None if champion == Some(player.id) => Some(1),
                    None => None,
                };

                Standing {
                    player_id: player.id,
                    alias: player.alias.clone(),
                    wins,
                    eliminated_in,
                    placement,
                }
            })
            .collect();

        // Stable: ties keep join order
        standings.sort_by_key(|s| {
            (
                std::cmp::Reverse(s.eliminated_in.map_or(usize::MAX, |r| r)),
                std::cmp::Reverse(s.wins),
            )
        });
        standings
    }
}

// ============================================================================
// Accessors
// ============================================================================

impl Tournament {
    pub fn participants(&self) -> &Roster {
        &self.participants
    }

    pub fn bracket(&self) -> Option<&Bracket> {
        self.bracket.as_ref()
    }

    pub fn records(&self) -> &[MatchRecord] {
        &self.records
    }

    pub fn seeding(&self) -> Seeding {
        self.seeding
    }

    pub fn champion(&self) -> Option<&Player> {
        self.bracket
            .as_ref()
            .and_then(Bracket::champion)
            .and_then(|id| self.participants.get(id))
    }
}
