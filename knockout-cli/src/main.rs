//! Knockout CLI - Command-line interface
//!
//! Commands:
//! - seed: Build a bracket from a roster file
//! - show: Print a bracket round by round
//! - ready: List matches that can be played now
//! - start / winner / clear: Update a saved bracket
//! - serve: Start the tournament server

mod bracket_cmd;
mod result_cmd;
mod server;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "knockout")]
#[command(about = "Single-elimination bracket manager")]
struct Cli {
    /// Log engine decisions (bye advances, recorded winners)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a bracket from a roster and save it
    Seed(bracket_cmd::SeedArgs),
    /// Print every round with resolved opponents
    Show(bracket_cmd::ShowArgs),
    /// List the matches that can be played now
    Ready(bracket_cmd::ShowArgs),
    /// Mark a ready match as in progress
    Start(result_cmd::StartArgs),
    /// Record the winner of a match
    Winner(result_cmd::WinnerArgs),
    /// Clear the winner of a match and everything downstream
    Clear(result_cmd::ClearArgs),
    /// Start the tournament server
    Serve(server::ServerArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Seed(args) => bracket_cmd::run_seed(args),
        Commands::Show(args) => bracket_cmd::run_show(args),
        Commands::Ready(args) => bracket_cmd::run_ready(args),
        Commands::Start(args) => result_cmd::run_start(args),
        Commands::Winner(args) => result_cmd::run_winner(args),
        Commands::Clear(args) => result_cmd::run_clear(args),
        Commands::Serve(args) => server::run(args),
    }
}

/// Logs go to stderr so `--json` output stays parseable; RUST_LOG wins over
/// --verbose when set
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
