use std::io::BufRead;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use scanner_app::console::{Console, InputAction, HELP};
use scanner_app::control;
use scanner_app::game_loop::LoopConfig;
use scanner_app::render::{self, RenderOptions, TerminalSink};
use scanner_app::state::AppState;
use scanner_core::commands::OperatorCommand;
use scanner_core::constants::*;
use scanner_core::enums::{ObjectKind, SensorKind};
use scanner_core::sensors::capabilities_of;
use scanner_sim::{ScanConfig, ScanEngine};

#[derive(Parser)]
#[command(name = "scanner", about = "Radar / Sonar / LiDAR multi scanner")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the sensor registry and tuning constants
    Info,
    /// Run the live scanner in the terminal
    Run {
        /// Stop after this many ticks (runs until `q` otherwise)
        #[arg(short, long)]
        ticks: Option<u64>,
        /// RNG seed for object placement
        #[arg(short, long, default_value_t = DEFAULT_SEED)]
        seed: u64,
        /// Number of random objects to place at start
        #[arg(short = 'n', long, default_value_t = 0)]
        populate: usize,
        /// Object kind for placed objects (cycles through all kinds if omitted)
        #[arg(short, long)]
        kind: Option<ObjectKind>,
        /// Tick period in milliseconds
        #[arg(long, default_value_t = TICK_PERIOD_MS)]
        tick_ms: u64,
        /// Scope radius in rows
        #[arg(long, default_value_t = 9)]
        radius: usize,
        /// Disable ANSI colours
        #[arg(long)]
        no_color: bool,
    },
    /// Run headless and print the final snapshot as JSON
    Dump {
        /// Number of ticks to simulate
        #[arg(short, long, default_value_t = TICKS_PER_REVOLUTION)]
        ticks: u64,
        /// RNG seed for object placement
        #[arg(short, long, default_value_t = DEFAULT_SEED)]
        seed: u64,
        /// Number of random objects to place at start
        #[arg(short = 'n', long, default_value_t = 8)]
        populate: usize,
        /// Object kind for placed objects (cycles through all kinds if omitted)
        #[arg(short, long)]
        kind: Option<ObjectKind>,
        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Info => print_info(),
        Commands::Run {
            ticks,
            seed,
            populate,
            kind,
            tick_ms,
            radius,
            no_color,
        } => {
            let config = LoopConfig {
                scan: ScanConfig {
                    seed,
                    ..Default::default()
                },
                tick_period: Duration::from_millis(tick_ms.max(1)),
                max_ticks: ticks,
                ..Default::default()
            };
            let options = RenderOptions {
                radius,
                color: !no_color,
            };
            run_live(config, options, populate, kind)?;
        }
        Commands::Dump {
            ticks,
            seed,
            populate,
            kind,
            pretty,
        } => {
            let mut engine = ScanEngine::new(ScanConfig {
                seed,
                ..Default::default()
            });
            engine.queue_commands(populate_commands(populate, kind));

            let mut snapshot = engine.tick();
            for _ in 1..ticks {
                snapshot = engine.tick();
            }

            let json = if pretty {
                serde_json::to_string_pretty(&snapshot)?
            } else {
                serde_json::to_string(&snapshot)?
            };
            println!("{json}");
        }
    }

    Ok(())
}

/// `count` random-placement commands, all of `kind` or cycling through every kind.
fn populate_commands(count: usize, kind: Option<ObjectKind>) -> Vec<OperatorCommand> {
    (0..count)
        .map(|i| {
            let kind = kind.unwrap_or(ObjectKind::ALL[i % ObjectKind::ALL.len()]);
            OperatorCommand::add_random(kind)
        })
        .collect()
}

fn run_live(
    config: LoopConfig,
    options: RenderOptions,
    populate: usize,
    kind: Option<ObjectKind>,
) -> anyhow::Result<()> {
    let state = AppState::new();
    let bounded = config.max_ticks.is_some();
    let config = LoopConfig {
        initial_commands: populate_commands(populate, kind),
        ..config
    };

    control::start_scanner(&state, config, TerminalSink::new(options))
        .context("starting scanner loop")?;

    if bounded {
        control::wait_for_scanner(&state)?;
        return Ok(());
    }

    let mut console = Console::new(kind.unwrap_or_default());
    for line in std::io::stdin().lock().lines() {
        let line = line.context("reading operator input")?;
        match console.parse(&line) {
            InputAction::Command(command) => control::send_command(&state, command)?,
            InputAction::Select(kind) => tracing::info!(%kind, "object type selected"),
            InputAction::Help => eprintln!("{HELP}"),
            InputAction::Quit => break,
            InputAction::Nothing => {}
            InputAction::Unknown(input) => {
                tracing::warn!(%input, "unrecognised input");
                eprintln!("{HELP}");
            }
        }
    }

    control::stop_scanner(&state)?;
    Ok(())
}

fn print_info() {
    println!("scanner v{}", env!("CARGO_PKG_VERSION"));
    println!("{}", render::legend());
    println!();
    for sensor in SensorKind::ALL {
        let caps = capabilities_of(sensor);
        let kinds: Vec<&str> = caps.allowed_kinds.iter().map(|k| k.name()).collect();
        println!(
            "{:<6} range {:.2}  detects {}",
            sensor.label(),
            caps.max_range_norm,
            kinds.join(", ")
        );
    }
    println!();
    println!("tick period      {TICK_PERIOD_MS} ms ({TICK_RATE} Hz)");
    println!("sweep increment  {SWEEP_INCREMENT_DEG}°/tick ({TICKS_PER_REVOLUTION} ticks/rev)");
    println!("beam half-width  {BEAM_HALF_WIDTH_DEG}°");
    println!("blip max age     {BLIP_MAX_AGE_TICKS} ticks");
}
