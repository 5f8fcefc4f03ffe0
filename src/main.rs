//! focus-timer - Terminal host for the focus cycle store.

use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{info, warn};

use focus_timer::adapters::{FileSnapshotStore, InMemorySnapshotStore, SystemClock};
use focus_timer::application::{CycleStore, FocusTimer, NewCycleForm, TickerExit};
use focus_timer::config::AppConfig;
use focus_timer::domain::cycle::HistoryEntry;
use focus_timer::domain::foundation::DomainError;
use focus_timer::ports::{Clock, SnapshotStore};
use focus_timer::telemetry;

/// Pomodoro-style focus timer.
#[derive(Parser, Debug)]
#[command(name = "focus-timer", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start a new cycle.
    Start {
        /// What you are working on.
        #[arg(short, long)]
        task: String,
        /// Duration in minutes.
        #[arg(short, long, allow_negative_numbers = true)]
        minutes: i64,
        /// Stay in the foreground until the cycle ends.
        #[arg(short, long)]
        follow: bool,
    },
    /// Interrupt the active cycle.
    Interrupt,
    /// Show the active cycle and its countdown.
    Status,
    /// List every cycle with its status.
    History,
    /// Count down the active cycle until it finishes or Ctrl+C.
    Run,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match AppConfig::load_and_validate() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("focus-timer: {e}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = telemetry::init_tracing(&config.logging) {
        eprintln!("focus-timer: failed to initialise logging: {e}");
    }

    let snapshots: Arc<dyn SnapshotStore> = if config.storage.enabled {
        Arc::new(FileSnapshotStore::new(
            config.storage.directory.clone(),
            config.storage.key.clone(),
        ))
    } else {
        Arc::new(InMemorySnapshotStore::new())
    };
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let store = Arc::new(CycleStore::restore(snapshots, clock).await);
    let timer = FocusTimer::new(
        store.clone(),
        config.timer.duration_policy(),
        config.timer.tick_interval(),
    );

    match cli.command {
        Commands::Start {
            task,
            minutes,
            follow,
        } => match timer.start(NewCycleForm::new(task, minutes)).await {
            Ok(cycle_id) => {
                println!("Started cycle {cycle_id}");
                if follow {
                    follow_countdown(&timer).await;
                } else {
                    timer.stop_ticker().await;
                }
                ExitCode::SUCCESS
            }
            Err(e) => {
                let err = DomainError::from(e);
                warn!(code = %err.code, details = ?err.details, "Cycle not started");
                eprintln!("focus-timer: {err}");
                ExitCode::FAILURE
            }
        },
        Commands::Interrupt => match timer.interrupt().await {
            Some(event) => {
                println!("Interrupted cycle {}", event.cycle_id());
                ExitCode::SUCCESS
            }
            None => {
                println!("No active cycle");
                ExitCode::SUCCESS
            }
        },
        Commands::Status => {
            match (store.active_cycle().await, store.countdown().await) {
                (Some(cycle), Some(countdown)) => {
                    println!("{}  {}  ({} min)", countdown, cycle.task(), cycle.minutes_amount());
                }
                _ => println!("No active cycle"),
            }
            ExitCode::SUCCESS
        }
        Commands::History => {
            print_history(&store.history().await);
            ExitCode::SUCCESS
        }
        Commands::Run => {
            if timer.resume().await.is_none() {
                println!("No active cycle");
                return ExitCode::SUCCESS;
            }
            follow_countdown(&timer).await;
            ExitCode::SUCCESS
        }
    }
}

/// Prints the countdown until the ticker stops or Ctrl+C is pressed.
///
/// Ctrl+C only stops watching; the cycle keeps running and can be
/// resumed with `run`.
async fn follow_countdown(timer: &FocusTimer) {
    let mut updates = timer.store().subscribe_countdown();

    let printer = async {
        while updates.changed().await.is_ok() {
            if let Some(countdown) = *updates.borrow_and_update() {
                println!("{countdown}");
            }
        }
    };

    tokio::select! {
        exit = timer.wait() => match exit {
            Some(TickerExit::Finished(cycle_id)) => println!("Cycle {cycle_id} finished"),
            Some(TickerExit::Superseded) => println!("Cycle is no longer active"),
            Some(TickerExit::Cancelled) | None => {}
        },
        _ = printer => {}
        signal = tokio::signal::ctrl_c() => {
            if let Err(e) = signal {
                warn!(error = %e, "Failed to listen for Ctrl+C");
            }
            info!("Stopped following countdown");
            timer.stop_ticker().await;
        }
    }
}

fn print_history(entries: &[HistoryEntry]) {
    if entries.is_empty() {
        println!("No cycles yet");
        return;
    }

    println!("{:<30} {:>8} {:<26} {}", "TASK", "MINUTES", "STARTED", "STATUS");
    for entry in entries {
        let marker = if entry.is_active { "*" } else { " " };
        println!(
            "{:<30} {:>8} {:<26} {}{}",
            entry.cycle.task(),
            entry.cycle.minutes_amount(),
            entry.cycle.start_date().to_rfc3339(),
            entry.status.label_pt_br(),
            marker,
        );
    }
}
