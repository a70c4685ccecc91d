//! Bracket commands - seed a bracket and inspect it
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run_seed(), run_show(), run_ready() - orchestration
//! - Level 2: load_bracket(), load_aliases(), print_*()
//! - Level 3: describe_side()
//! - Level 4: command arguments

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use knockout_core::{snapshot, Bracket, MatchId, Resolved, Roster, Slot};
use knockout_tournament::Seeding;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct SeedArgs {
    /// Roster JSON file (array of players)
    #[arg(long, value_name = "FILE")]
    pub roster: PathBuf,

    /// Where to write the bracket
    #[arg(long, value_name = "FILE")]
    pub out: PathBuf,

    /// Shuffle the roster before pairing
    #[arg(long)]
    pub shuffle: bool,

    /// Seed for a reproducible shuffle
    #[arg(long, requires = "shuffle")]
    pub seed: Option<u64>,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Bracket JSON file
    #[arg(long, value_name = "FILE")]
    pub bracket: PathBuf,

    /// Roster file used to print aliases instead of ids
    #[arg(long, value_name = "FILE")]
    pub roster: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Ready match as printed by `ready --json`
#[derive(Serialize)]
struct ReadyLine {
    match_id: MatchId,
    round: String,
    left: String,
    right: String,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Build a bracket from a roster and save it
pub fn run_seed(args: SeedArgs) -> Result<()> {
    let roster = Roster::load(&args.roster)?;

    let seeding = if args.shuffle {
        Seeding::Shuffled { seed: args.seed }
    } else {
        Seeding::AsListed
    };
    let arranged = seeding.arrange(&roster, 0);

    let bracket = Bracket::from_roster(&arranged)?;
    snapshot::save(&bracket, &args.out)?;

    println!(
        "Seeded {} players into a bracket of {} ({} rounds, {} byes) -> {}",
        roster.len(),
        bracket.size(),
        bracket.round_count(),
        bracket.bye_count(),
        args.out.display()
    );
    Ok(())
}

/// Print every round of a saved bracket
pub fn run_show(args: ShowArgs) -> Result<()> {
    let bracket = load_bracket(&args.bracket)?;

    if args.json {
        println!("{}", snapshot::to_json(&bracket)?);
        return Ok(());
    }

    let aliases = load_aliases(args.roster.as_deref())?;
    print_rounds(&bracket, &aliases);
    Ok(())
}

/// Print the matches that can be played now
pub fn run_ready(args: ShowArgs) -> Result<()> {
    let bracket = load_bracket(&args.bracket)?;
    let aliases = load_aliases(args.roster.as_deref())?;

    let lines: Vec<ReadyLine> = bracket
        .ready_pairings()
        .into_iter()
        .map(|p| ReadyLine {
            match_id: p.match_id,
            round: bracket.round_label(p.round),
            left: aliases.alias_of(p.left),
            right: aliases.alias_of(p.right),
        })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&lines)?);
    } else if lines.is_empty() {
        match bracket.champion() {
            Some(champion) => println!("Bracket complete, champion: {}", aliases.alias_of(champion)),
            None => println!("No match is ready"),
        }
    } else {
        for line in &lines {
            println!("[{}] {}: {} vs {}", line.match_id, line.round, line.left, line.right);
        }
    }
    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

pub(crate) fn load_bracket(path: &Path) -> Result<Bracket> {
    snapshot::load(path)
}

/// Roster for alias lookups; ids print as `#id` without one
fn load_aliases(path: Option<&Path>) -> Result<Roster> {
    match path {
        Some(path) => Roster::load(path),
        None => Ok(Roster::default()),
    }
}

fn print_rounds(bracket: &Bracket, aliases: &Roster) {
    for (index, round) in bracket.rounds().iter().enumerate() {
        println!("{}", bracket.round_label(index));
        for m in round {
            let (left, right) = bracket.resolve_sides(m);
            let winner = m
                .winner
                .map(|id| format!(" -> {}", aliases.alias_of(id)))
                .unwrap_or_default();
            println!(
                "  [{}] {} vs {}  {}{}",
                m.id,
                describe_side(aliases, &m.left, left),
                describe_side(aliases, &m.right, right),
                m.status,
                winner
            );
        }
    }

    if let Some(champion) = bracket.champion() {
        println!("Champion: {}", aliases.alias_of(champion));
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn describe_side(aliases: &Roster, slot: &Slot, resolved: Resolved) -> String {
    match (resolved, slot) {
        (Resolved::Player(id), _) => aliases.alias_of(id),
        (Resolved::Bye, _) => "bye".to_string(),
        (Resolved::Unresolved, slot) => slot.to_string(),
    }
}

// ============================================================================
// TESTS
// ============================================================================
