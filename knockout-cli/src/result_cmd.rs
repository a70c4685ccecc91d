//! Result commands - update a saved bracket in place
//!
//! Each command loads the bracket, applies one registry operation and writes
//! the settled bracket back to the same file. A rejected operation leaves the
//! file untouched.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use knockout_core::{snapshot, MatchId, PlayerId};

use crate::bracket_cmd::load_bracket;

#[derive(Args)]
pub struct StartArgs {
    /// Bracket JSON file
    #[arg(long, value_name = "FILE")]
    pub bracket: PathBuf,

    /// Match to start
    #[arg(long = "match", value_name = "ID")]
    pub match_id: u32,
}

#[derive(Args)]
pub struct WinnerArgs {
    /// Bracket JSON file
    #[arg(long, value_name = "FILE")]
    pub bracket: PathBuf,

    /// Decided match
    #[arg(long = "match", value_name = "ID")]
    pub match_id: u32,

    /// Winning player
    #[arg(long = "player", value_name = "ID")]
    pub player_id: u64,
}

#[derive(Args)]
pub struct ClearArgs {
    /// Bracket JSON file
    #[arg(long, value_name = "FILE")]
    pub bracket: PathBuf,

    /// Match whose result is withdrawn
    #[arg(long = "match", value_name = "ID")]
    pub match_id: u32,
}

pub fn run_start(args: StartArgs) -> Result<()> {
    let mut bracket = load_bracket(&args.bracket)?;
    bracket.mark_in_progress(MatchId(args.match_id))?;
    snapshot::save(&bracket, &args.bracket)?;

    println!("Match {} in progress", args.match_id);
    Ok(())
}

pub fn run_winner(args: WinnerArgs) -> Result<()> {
    let mut bracket = load_bracket(&args.bracket)?;
    bracket.set_winner(MatchId(args.match_id), PlayerId(args.player_id))?;
    snapshot::save(&bracket, &args.bracket)?;

    println!("Match {} won by #{}", args.match_id, args.player_id);
    if let Some(champion) = bracket.champion() {
        println!("Champion: #{}", champion);
    }
    Ok(())
}

pub fn run_clear(args: ClearArgs) -> Result<()> {
    let mut bracket = load_bracket(&args.bracket)?;
    let cleared = bracket.clear_winner(MatchId(args.match_id))?;
    snapshot::save(&bracket, &args.bracket)?;

    if cleared.is_empty() {
        println!("Nothing to clear for match {}", args.match_id);
    } else {
        let ids: Vec<String> = cleared.iter().map(ToString::to_string).collect();
        println!("Cleared matches {}", ids.join(", "));
    }
    Ok(())
}
