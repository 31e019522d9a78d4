//! Loop thread: runs the scan engine at a fixed tick period and emits snapshots.
//!
//! The engine is created inside this thread so it has a single owner.
//! Commands arrive via `mpsc` channel. Snapshots go to a `SnapshotSink` and
//! are stored in shared state for synchronous polling.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use scanner_core::commands::OperatorCommand;
use scanner_core::constants::TICK_PERIOD_MS;
use scanner_core::state::ScanSnapshot;
use scanner_sim::engine::{ScanConfig, ScanEngine};

use crate::error::AppError;
use crate::state::GameLoopCommand;

/// Nominal duration of one tick at 1x speed.
pub const TICK_DURATION: Duration = Duration::from_millis(TICK_PERIOD_MS);

/// Receives every snapshot the loop produces (the render adapter seam).
pub trait SnapshotSink: Send + 'static {
    fn emit(&mut self, snapshot: &ScanSnapshot);
}

impl<F> SnapshotSink for F
where
    F: FnMut(&ScanSnapshot) + Send + 'static,
{
    fn emit(&mut self, snapshot: &ScanSnapshot) {
        self(snapshot)
    }
}

/// Loop timing and engine settings.
#[derive(Debug, Clone)]
pub struct LoopConfig {
    pub scan: ScanConfig,
    /// Wall-clock period of one tick at 1x speed.
    pub tick_period: Duration,
    /// Speed multiplier (2.0 = twice as fast). Values near zero fall back to 1x.
    pub time_scale: f64,
    /// Stop on its own after this many ticks.
    pub max_ticks: Option<u64>,
    /// Queued into the engine before the first tick.
    pub initial_commands: Vec<OperatorCommand>,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            scan: ScanConfig::default(),
            tick_period: TICK_DURATION,
            time_scale: 1.0,
            max_ticks: None,
            initial_commands: Vec::new(),
        }
    }
}

impl LoopConfig {
    /// Tick period after applying the time scale.
    pub fn effective_tick_duration(&self) -> Duration {
        if self.time_scale > 0.001 {
            self.tick_period.div_f64(self.time_scale)
        } else {
            self.tick_period
        }
    }
}

/// Spawns the loop in a new thread.
///
/// Returns the command sender for the control layer and the thread handle.
pub fn spawn_game_loop(
    config: LoopConfig,
    sink: impl SnapshotSink,
    latest_snapshot: Arc<Mutex<Option<ScanSnapshot>>>,
) -> Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<()>), AppError> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("scanner-loop".into())
        .spawn(move || {
            run_game_loop(config, sink, cmd_rx, &latest_snapshot);
        })?;

    Ok((cmd_tx, handle))
}

/// The loop. Runs until Shutdown, channel disconnect, or `max_ticks`.
fn run_game_loop(
    config: LoopConfig,
    mut sink: impl SnapshotSink,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<ScanSnapshot>>,
) {
    let tick_duration = config.effective_tick_duration();
    let mut engine = ScanEngine::new(config.scan);
    engine.queue_commands(config.initial_commands);
    let mut next_tick_time = Instant::now();

    tracing::info!(period_ms = tick_duration.as_millis() as u64, "scanner loop started");

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::Operator(cmd)) => engine.queue_command(cmd),
                Ok(GameLoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    tracing::info!(tick = engine.time().tick, "scanner loop stopped");
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. Advance one tick
        let snapshot = engine.tick();

        // 3. Hand the snapshot to the renderer
        sink.emit(&snapshot);

        // 4. Store latest snapshot for synchronous polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        if config.max_ticks.is_some_and(|max| engine.time().tick >= max) {
            tracing::info!(tick = engine.time().tick, "scanner loop reached tick limit");
            return;
        }

        // 5. Sleep until next tick
        next_tick_time += tick_duration;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > tick_duration * 2 {
            tracing::warn!(
                behind_ms = (now - next_tick_time).as_millis() as u64,
                "scanner loop fell behind, resetting schedule"
            );
            next_tick_time = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scanner_core::enums::ObjectKind;

    fn fast_config(max_ticks: Option<u64>) -> LoopConfig {
        LoopConfig {
            tick_period: Duration::from_millis(1),
            max_ticks,
            ..Default::default()
        }
    }

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(GameLoopCommand::Operator(OperatorCommand::add_random(
            ObjectKind::Ship,
        )))
        .unwrap();
        tx.send(GameLoopCommand::Operator(OperatorCommand::ClearAll))
            .unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let mut commands = Vec::new();
        while let Ok(cmd) = rx.try_recv() {
            commands.push(cmd);
        }

        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            GameLoopCommand::Operator(OperatorCommand::AddObject { .. })
        ));
        assert!(matches!(
            commands[1],
            GameLoopCommand::Operator(OperatorCommand::ClearAll)
        ));
        assert!(matches!(commands[2], GameLoopCommand::Shutdown));
    }

    #[test]
    fn test_loop_stops_at_tick_limit() {
        let latest = Arc::new(Mutex::new(None));
        let emitted = Arc::new(Mutex::new(Vec::new()));
        let sink_log = Arc::clone(&emitted);

        let (_tx, handle) = spawn_game_loop(
            fast_config(Some(5)),
            move |snap: &ScanSnapshot| sink_log.lock().unwrap().push(snap.time.tick),
            Arc::clone(&latest),
        )
        .unwrap();
        handle.join().unwrap();

        assert_eq!(*emitted.lock().unwrap(), vec![1, 2, 3, 4, 5]);
        let last = latest.lock().unwrap().clone().unwrap();
        assert_eq!(last.time.tick, 5);
    }

    #[test]
    fn test_initial_commands_land_on_first_tick() {
        let latest = Arc::new(Mutex::new(None));
        let config = LoopConfig {
            initial_commands: ObjectKind::ALL
                .iter()
                .cycle()
                .take(500)
                .map(|k| OperatorCommand::add_random(*k))
                .collect(),
            ..fast_config(Some(1))
        };

        let (_tx, handle) =
            spawn_game_loop(config, |_: &ScanSnapshot| {}, Arc::clone(&latest)).unwrap();
        handle.join().unwrap();

        let snap = latest.lock().unwrap().clone().unwrap();
        assert_eq!(snap.time.tick, 1);
        assert_eq!(snap.objects.len(), 500);
    }

    #[test]
    fn test_initial_commands_are_deterministic() {
        let run = || {
            let latest = Arc::new(Mutex::new(None));
            let config = LoopConfig {
                initial_commands: vec![OperatorCommand::add_random(ObjectKind::Ship); 8],
                ..fast_config(Some(3))
            };
            let (_tx, handle) =
                spawn_game_loop(config, |_: &ScanSnapshot| {}, Arc::clone(&latest)).unwrap();
            handle.join().unwrap();
            let snap = latest.lock().unwrap().take();
            snap.expect("loop produced no snapshot")
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_loop_applies_commands_and_shuts_down() {
        let latest = Arc::new(Mutex::new(None));
        let (tx, handle) =
            spawn_game_loop(fast_config(None), |_: &ScanSnapshot| {}, Arc::clone(&latest)).unwrap();

        tx.send(GameLoopCommand::Operator(OperatorCommand::add_random(
            ObjectKind::Whale,
        )))
        .unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            let count = latest
                .lock()
                .unwrap()
                .as_ref()
                .map_or(0, |s: &ScanSnapshot| s.objects.len());
            if count == 1 || Instant::now() > deadline {
                break;
            }
            std::thread::sleep(Duration::from_millis(2));
        }

        tx.send(GameLoopCommand::Shutdown).unwrap();
        handle.join().unwrap();

        let snap = latest.lock().unwrap().clone().unwrap();
        assert_eq!(snap.objects.len(), 1);
        assert_eq!(snap.objects[0].kind, ObjectKind::Whale);
    }

    #[test]
    fn test_time_scale_shortens_tick() {
        let config = LoopConfig {
            time_scale: 2.0,
            ..Default::default()
        };
        assert_eq!(config.effective_tick_duration(), Duration::from_millis(25));

        let paused = LoopConfig {
            time_scale: 0.0,
            ..Default::default()
        };
        assert_eq!(paused.effective_tick_duration(), TICK_DURATION);
    }

    #[test]
    fn test_tick_duration_constant() {
        // 20Hz = 50ms per tick
        assert_eq!(TICK_DURATION.as_millis(), 50);
    }
}
