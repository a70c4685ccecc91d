//! JSON views returned by the API

use chrono::{DateTime, Utc};
use knockout_core::{Bracket, Match, MatchId, MatchStatus, Pairing, Player, PlayerId, Resolved, Roster, Slot};
use knockout_tournament::{Tournament, TournamentId, TournamentStatus};
use serde::Serialize;

/// Tournament row as listed
#[derive(Serialize)]
pub struct TournamentSummary {
    pub id: TournamentId,
    pub owner_id: PlayerId,
    pub title: String,
    pub description: Option<String>,
    pub max_players: usize,
    pub status: TournamentStatus,
    pub participant_count: usize,
    pub champion_id: Option<PlayerId>,
    pub created_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
}

impl From<&Tournament> for TournamentSummary {
    fn from(t: &Tournament) -> Self {
        Self {
            id: t.id,
            owner_id: t.owner_id,
            title: t.title.clone(),
            description: t.description.clone(),
            max_players: t.max_players,
            status: t.status,
            participant_count: t.participants().len(),
            champion_id: t.champion().map(|p| p.id),
            created_at: t.created_at,
            started_at: t.started_at,
            ended_at: t.ended_at,
        }
    }
}

#[derive(Serialize)]
pub struct TournamentDetails {
    pub tournament: TournamentSummary,
    pub participants: Vec<Player>,
}

/// One side of a match, resolved for display
#[derive(Serialize)]
pub struct SideView {
    pub slot: Slot,
    pub resolved: Resolved,
    pub alias: Option<String>,
}

#[derive(Serialize)]
pub struct MatchView {
    pub id: MatchId,
    pub round: usize,
    pub order: usize,
    pub status: MatchStatus,
    pub winner_id: Option<PlayerId>,
    pub left: SideView,
    pub right: SideView,
}

#[derive(Serialize)]
pub struct RoundView {
    pub index: usize,
    pub label: String,
    pub matches: Vec<MatchView>,
}

#[derive(Serialize)]
pub struct BracketView {
    pub size: usize,
    pub rounds: Vec<RoundView>,
    pub champion_id: Option<PlayerId>,
}

/// Ready match with player names, for the play screen
#[derive(Serialize)]
pub struct ReadyView {
    pub match_id: MatchId,
    pub round: usize,
    pub order: usize,
    pub round_label: String,
    pub left: Player,
    pub right: Player,
}

fn side(bracket: &Bracket, roster: &Roster, slot: &Slot) -> SideView {
    let resolved = bracket.resolve(slot);
    SideView {
        slot: *slot,
        resolved,
        alias: resolved.player().map(|id| roster.alias_of(id)),
    }
}

pub fn match_view(bracket: &Bracket, roster: &Roster, m: &Match) -> MatchView {
    MatchView {
        id: m.id,
        round: m.round,
        order: m.order,
        status: m.status,
        winner_id: m.winner,
        left: side(bracket, roster, &m.left),
        right: side(bracket, roster, &m.right),
    }
}

pub fn bracket_view(bracket: &Bracket, roster: &Roster) -> BracketView {
    let rounds = bracket
        .rounds()
        .iter()
        .enumerate()
        .map(|(index, round)| RoundView {
            index,
            label: bracket.round_label(index),
            matches: round.iter().map(|m| match_view(bracket, roster, m)).collect(),
        })
        .collect();

    BracketView {
        size: bracket.size(),
        rounds,
        champion_id: bracket.champion(),
    }
}

fn player_or_placeholder(roster: &Roster, id: PlayerId) -> Player {
    roster
        .get(id)
        .cloned()
        .unwrap_or_else(|| Player::new(id.0, roster.alias_of(id)))
}

pub fn ready_view(bracket: &Bracket, roster: &Roster, pairing: &Pairing) -> ReadyView {
    ReadyView {
        match_id: pairing.match_id,
        round: pairing.round,
        order: pairing.order,
        round_label: bracket.round_label(pairing.round),
        left: player_or_placeholder(roster, pairing.left),
        right: player_or_placeholder(roster, pairing.right),
    }
}
