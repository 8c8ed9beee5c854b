//! Coinflip - terminal player
//!
//! Plays a series of flips with a fixed bet and prints each result.

use clap::Parser;
use coinflip::common::{AudioCue, ConfigLoader, RandomSource, RngSource};
use coinflip::driver::{CoinPose, FrameDriver, Presenter, TokioClock};
use coinflip::errors::AudioError;
use coinflip::games::StatusLine;
use coinflip::{CoinChoice, CoinflipConfig, CoinflipResult, FlipController, FlipState};
use serde::Serialize;
use std::io::{IsTerminal, Write};
use std::path::PathBuf;
use tracing::{info, trace, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "coinflip")]
#[command(about = "Bet on a coin flip", long_about = None)]
struct Args {
    /// Configuration file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Side to bet on every round
    #[arg(long, default_value = "heads")]
    choice: CoinChoice,

    /// Bet amount per round, as typed into the amount field
    #[arg(long, default_value = "10")]
    amount: String,

    /// Number of rounds to play
    #[arg(long, default_value = "5")]
    rounds: u32,

    /// Seed for reproducible outcomes
    #[arg(long)]
    seed: Option<u64>,

    /// Use short flips instead of the full two-second animation
    #[arg(long)]
    quick: bool,

    /// Ring the terminal bell when a flip starts
    #[arg(long)]
    bell: bool,

    /// Print the run summary as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Default)]
struct TerminalPresenter;

impl Presenter for TerminalPresenter {
    fn render(&mut self, pose: &CoinPose) {
        trace!(
            rotation = pose.rotation,
            x = pose.position.x,
            y = pose.position.y,
            scale = pose.scale,
            "Render"
        );
    }

    fn show_balance(&mut self, label: &str) {
        println!("💰 {}", label);
    }

    fn show_status(&mut self, status: &StatusLine) {
        println!("🪙 {}", status);
    }

    fn set_controls_enabled(&mut self, _enabled: bool) {}
}

struct TerminalBell;

impl AudioCue for TerminalBell {
    fn play(&mut self) -> Result<(), AudioError> {
        let mut stderr = std::io::stderr();
        if !stderr.is_terminal() {
            return Err(AudioError::Unavailable);
        }
        stderr
            .write_all(b"\x07")
            .and_then(|_| stderr.flush())
            .map_err(|e| AudioError::PlaybackFailed(e.to_string()))
    }
}

#[derive(Debug, Serialize)]
struct RunSummary {
    rounds_played: u32,
    wins: u32,
    losses: u32,
    starting_balance: i64,
    final_balance: i64,
    state: FlipState,
}

#[tokio::main]
async fn main() -> CoinflipResult<()> {
    let args = Args::parse();

    let mut loader = ConfigLoader::new();
    if let Some(ref path) = args.config {
        loader = loader.with_path(path);
    }
    let mut config = loader.load()?;
    if args.quick {
        config.animation = CoinflipConfig::quick_play().animation;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.monitoring.log_level.as_filter())),
        )
        .init();

    let rng: Box<dyn RandomSource> = match args.seed {
        Some(seed) => Box::new(RngSource::seeded(seed)),
        None => Box::new(RngSource::from_entropy()),
    };
    let mut controller = FlipController::new(&config, Box::new(TokioClock::new()), rng)?;
    if args.bell {
        controller = controller.with_audio(Box::new(TerminalBell));
    }

    let starting_balance = controller.balance();
    let mut driver = FrameDriver::new(controller, &config, TerminalPresenter);
    let mut summary = RunSummary {
        rounds_played: 0,
        wins: 0,
        losses: 0,
        starting_balance,
        final_balance: starting_balance,
        state: driver.controller().state(),
    };

    info!(rounds = args.rounds, choice = %args.choice, amount = %args.amount, "Starting run");

    // half a second of idle frames between rounds
    let idle_frames = u64::from(config.driver.frame_rate / 2);

    for round in 1..=args.rounds {
        if round > 1 {
            driver.run_frames(idle_frames).await;
        }
        if let Err(e) = driver.submit_bet(args.choice, &args.amount) {
            warn!(round, error = %e, "Stopping early");
            break;
        }

        if let Some(settlement) = driver.run_until_settled().await {
            summary.rounds_played += 1;
            if settlement.outcome.won {
                summary.wins += 1;
            } else {
                summary.losses += 1;
            }
        }
    }

    summary.final_balance = driver.controller().balance();
    summary.state = driver.controller().state();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("\n🎯 RESULTS");
        println!("==========");
        println!("Rounds played: {}", summary.rounds_played);
        println!("🏆 Wins: {}, Losses: {}", summary.wins, summary.losses);
        println!(
            "💰 Balance: {} -> {} ({:+})",
            summary.starting_balance,
            summary.final_balance,
            summary.final_balance - summary.starting_balance
        );
        if summary.state == FlipState::GameOver {
            println!("💀 Game over");
        }
    }

    Ok(())
}
