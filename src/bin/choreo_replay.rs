//! Choreography replay
//!
//! Feeds a recorded sequence of action responses through a session and
//! prints the effect state as virtual time advances.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use ccg_choreo::{
    ActionResponse, CardDefinition, CardRegistry, ChoreoConfig, ChoreoSession, GameMirror, Millis, Side,
};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "choreo-replay")]
#[command(about = "Replay action responses through the choreography engine", long_about = None)]
struct Cli {
    /// Replay file (JSON with `cards` and `responses`)
    #[arg(value_name = "REPLAY")]
    replay: PathBuf,

    /// Choreography config (JSON); defaults apply to missing fields
    #[arg(long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Clock step between printed frames
    #[arg(long, default_value_t = 140)]
    step: Millis,

    /// Only print frames where something changed
    #[arg(long)]
    changes_only: bool,

    /// Print frames as JSON lines
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Deserialize)]
struct Replay {
    #[serde(default)]
    cards: Vec<CardDefinition>,
    responses: Vec<ActionResponse>,
}

#[derive(Debug, PartialEq, Serialize)]
struct Frame {
    time: Millis,
    locked: bool,
    deaths: usize,
    pending: usize,
    player: Vec<String>,
    opponent: Vec<String>,
    effects: Vec<String>,
}

impl Frame {
    fn capture(session: &ChoreoSession) -> Self {
        let side = |side: Side| -> Vec<String> {
            session
                .rendered(side)
                .iter()
                .map(|e| {
                    let mark = if e.is_dying { "+" } else { "" };
                    format!("{}{} {}/{}", e.id().as_str(), mark, e.creature.attack, e.creature.health)
                })
                .collect()
        };
        let mut effects: Vec<String> = session
            .effects()
            .iter()
            .map(|(id, kind, slot)| format!("{}:{:?}={:?}@{}", id.as_str(), kind, slot.payload, slot.token))
            .collect();
        effects.sort();

        Self {
            time: session.now(),
            locked: session.interaction_locked(),
            deaths: session.active_death_sequences(),
            pending: session.pending_tasks(),
            player: side(Side::Player),
            opponent: side(Side::Opponent),
            effects,
        }
    }

    /// Same content, ignoring the clock.
    fn same_as(&self, other: &Frame) -> bool {
        self.locked == other.locked
            && self.deaths == other.deaths
            && self.player == other.player
            && self.opponent == other.opponent
            && self.effects == other.effects
    }

    fn print(&self, json: bool) -> Result<()> {
        if json {
            println!("{}", serde_json::to_string(self)?);
            return Ok(());
        }
        println!(
            "t={:>6} locked={} deaths={} pending={}",
            self.time, self.locked, self.deaths, self.pending
        );
        println!("  player:   [{}]", self.player.join(", "));
        println!("  opponent: [{}]", self.opponent.join(", "));
        for effect in &self.effects {
            println!("  {effect}");
        }
        Ok(())
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<ChoreoConfig> {
    let Some(path) = path else {
        return Ok(ChoreoConfig::default());
    };
    let json = fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))?;
    ChoreoConfig::from_json(&json).with_context(|| format!("loading config {}", path.display()))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    anyhow::ensure!(cli.step > 0, "--step must be positive");

    let config = load_config(cli.config.as_ref())?;
    let text = fs::read_to_string(&cli.replay).with_context(|| format!("reading replay {}", cli.replay.display()))?;
    let replay: Replay = serde_json::from_str(&text).context("parsing replay")?;

    let cards: CardRegistry = replay.cards.into_iter().collect();
    let mut session = ChoreoSession::new(config)?;
    let mut mirror = GameMirror::new();

    tracing::info!(cards = cards.len(), responses = replay.responses.len(), "replay loaded");

    let mut last: Option<Frame> = None;
    for (index, response) in replay.responses.into_iter().enumerate() {
        mirror.apply_response(response);
        session.ingest(mirror.events(), mirror.game(), &cards);
        if !cli.json {
            println!("== response {index} (cursor {})", session.cursor());
        }

        loop {
            let frame = Frame::capture(&session);
            if !cli.changes_only || last.as_ref().map_or(true, |prev| !frame.same_as(prev)) {
                frame.print(cli.json)?;
            }
            last = Some(frame);

            if session.pending_tasks() == 0 {
                break;
            }
            session.advance(cli.step);
        }
    }

    let stats = session.stats();
    tracing::info!(
        events = stats.events_ingested,
        effects = stats.effects_scheduled,
        synthetic_hits = stats.synthetic_hits,
        deaths = stats.deaths_completed,
        "replay finished"
    );
    session.teardown();
    Ok(())
}
