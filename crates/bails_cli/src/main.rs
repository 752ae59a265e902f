//! bails CLI
//!
//! Replays a scripted sequence of scorer actions and prints the scorecard,
//! or prints the scorecard of a match already in a store directory.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use bails_core::{
    render_scorecard, FileMatchStore, InMemoryMatchStore, MatchConfig, MatchId, MatchStore,
    Openers, ScoreRecorder, ScorerAction, Scoreboard, ScoringError,
};

#[derive(Parser)]
#[command(name = "bails")]
#[command(about = "Ball-by-ball cricket scorer", long_about = None)]
struct Cli {
    /// Log filter (e.g. "info", "bails_core=debug")
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a JSON script of scorer actions
    Replay {
        /// Script file path
        #[arg(long)]
        script: PathBuf,

        /// Keep the match in this directory instead of in memory
        #[arg(long)]
        store_dir: Option<PathBuf>,

        /// Match config JSON file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the scorecard of a stored match
    Scoreboard {
        /// Directory holding match files
        #[arg(long)]
        store_dir: PathBuf,

        /// Match id (milliseconds since the epoch)
        #[arg(long)]
        match_id: MatchId,

        /// Match config JSON file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

/// Script file: opening players plus the actions to apply in order.
#[derive(Debug, Deserialize)]
struct Script {
    #[serde(default)]
    config: Option<MatchConfig>,
    striker: String,
    non_striker: String,
    bowler: String,
    #[serde(default)]
    actions: Vec<ScorerAction>,
}

impl Script {
    fn openers(&self) -> Openers {
        Openers {
            striker: self.striker.clone(),
            non_striker: self.non_striker.clone(),
            bowler: self.bowler.clone(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match cli.command {
        Commands::Replay { script, store_dir, config } => {
            let script = load_script(&script)?;
            let config = resolve_config(config.as_deref(), script.config.clone())?;

            let (match_id, card) = match store_dir {
                Some(dir) => {
                    let store = FileMatchStore::open(&dir)
                        .with_context(|| format!("Failed to open store {}", dir.display()))?;
                    replay(config, store, &script)?
                }
                None => replay(config, InMemoryMatchStore::new(), &script)?,
            };

            println!("Match id: {match_id}");
            println!("{card}");
        }

        Commands::Scoreboard { store_dir, match_id, config } => {
            let config = resolve_config(config.as_deref(), None)?;
            let store = FileMatchStore::open(&store_dir)
                .with_context(|| format!("Failed to open store {}", store_dir.display()))?;
            let board = Scoreboard::load(&store, match_id, &config)
                .with_context(|| format!("Failed to load match {match_id}"))?;
            println!("{}", render_scorecard(&board));
        }
    }

    Ok(())
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

fn load_script(path: &Path) -> Result<Script> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read script {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid script {}", path.display()))
}

/// `--config` wins over the script's own config, then the environment, then defaults.
fn resolve_config(path: Option<&Path>, from_script: Option<MatchConfig>) -> Result<MatchConfig> {
    let config = if let Some(path) = path {
        MatchConfig::from_file(&path.to_string_lossy())?
    } else if let Some(config) = from_script {
        config
    } else {
        MatchConfig::from_env()?.unwrap_or_default()
    };
    config.validate()?;
    Ok(config)
}

/// Apply every scripted action; rejected actions are logged and skipped.
fn replay<S: MatchStore>(
    config: MatchConfig,
    store: S,
    script: &Script,
) -> Result<(MatchId, String)> {
    let mut recorder = ScoreRecorder::start_match(config, store, &script.openers())
        .context("Failed to start match")?;
    info!(match_id = %recorder.match_id(), actions = script.actions.len(), "Replaying script");

    for (index, action) in script.actions.iter().enumerate() {
        match recorder.dispatch(action.clone()) {
            Ok(_) => {}
            Err(err @ ScoringError::Store(_)) => {
                return Err(err).with_context(|| format!("Action {index} failed"));
            }
            Err(err) => {
                warn!(index, action = ?action, error = %err, "Action rejected");
            }
        }
    }

    let match_id = recorder.match_id();
    let board = Scoreboard::load(recorder.store(), match_id, recorder.config())
        .context("Failed to read back the match")?;
    Ok((match_id, render_scorecard(&board)))
}
