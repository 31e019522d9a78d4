//! Control layer: start, drive and stop the loop thread.
//!
//! These functions bridge a front end (console, tests) to the loop thread
//! via channels and the shared `AppState`.

use scanner_core::commands::OperatorCommand;
use scanner_core::state::ScanSnapshot;

use crate::error::AppError;
use crate::game_loop::{self, LoopConfig, SnapshotSink};
use crate::state::{AppState, GameLoopCommand};

/// Start the scanner. Spawns the loop thread if not already running.
///
/// A loop that already stopped on its own (tick limit) is joined and
/// replaced.
pub fn start_scanner(
    state: &AppState,
    config: LoopConfig,
    sink: impl SnapshotSink,
) -> Result<(), AppError> {
    let mut running = state.running.lock()?;

    if *running {
        if !loop_finished(state)? {
            return Err(AppError::AlreadyRunning);
        }
        if let Some(handle) = state.loop_handle.lock()?.take() {
            if handle.join().is_err() {
                tracing::warn!("previous scanner loop panicked");
            }
        }
        *state.command_tx.lock()? = None;
        *running = false;
    }

    let (cmd_tx, handle) =
        game_loop::spawn_game_loop(config, sink, state.latest_snapshot.clone())?;

    *state.command_tx.lock()? = Some(cmd_tx);
    *state.loop_handle.lock()? = Some(handle);
    *running = true;

    Ok(())
}

/// Whether the loop thread has exited but not been joined yet.
pub fn loop_finished(state: &AppState) -> Result<bool, AppError> {
    let handle = state.loop_handle.lock()?;
    Ok(handle.as_ref().is_some_and(|h| h.is_finished()))
}

/// Send an operator command to the engine.
///
/// Fails with `ChannelClosed` once a bounded loop has stopped on its own;
/// call `wait_for_scanner` to reset the state to `NotStarted`.
pub fn send_command(state: &AppState, command: OperatorCommand) -> Result<(), AppError> {
    let tx_lock = state.command_tx.lock()?;

    match tx_lock.as_ref() {
        Some(tx) => tx
            .send(GameLoopCommand::Operator(command))
            .map_err(|_| AppError::ChannelClosed),
        None => Err(AppError::NotStarted),
    }
}

/// Get the latest snapshot synchronously (for polling / initial state).
pub fn get_snapshot(state: &AppState) -> Result<Option<ScanSnapshot>, AppError> {
    let lock = state.latest_snapshot.lock()?;
    Ok(lock.clone())
}

/// Block until the loop thread exits on its own (e.g. a tick limit).
pub fn wait_for_scanner(state: &AppState) -> Result<(), AppError> {
    let handle = state.loop_handle.lock()?.take();
    let result = match handle {
        Some(handle) => handle.join().map_err(|_| AppError::LoopPanicked),
        None => Err(AppError::NotStarted),
    };

    *state.command_tx.lock()? = None;
    *state.running.lock()? = false;
    result
}

/// Ask the loop thread to stop and wait for it.
pub fn stop_scanner(state: &AppState) -> Result<(), AppError> {
    {
        let tx_lock = state.command_tx.lock()?;
        match tx_lock.as_ref() {
            // A closed channel means the loop already exited; joining still applies.
            Some(tx) => {
                let _ = tx.send(GameLoopCommand::Shutdown);
            }
            None => return Err(AppError::NotStarted),
        }
    }
    wait_for_scanner(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    use scanner_core::enums::ObjectKind;

    fn fast_config() -> LoopConfig {
        LoopConfig {
            tick_period: Duration::from_millis(1),
            ..Default::default()
        }
    }

    fn wait_until(state: &AppState, pred: impl Fn(&ScanSnapshot) -> bool) -> ScanSnapshot {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(snap) = get_snapshot(state).unwrap() {
                if pred(&snap) || Instant::now() > deadline {
                    return snap;
                }
            }
            assert!(Instant::now() <= deadline, "no snapshot produced");
            std::thread::sleep(Duration::from_millis(2));
        }
    }

    #[test]
    fn test_commands_before_start_fail() {
        let state = AppState::new();
        assert!(matches!(
            send_command(&state, OperatorCommand::ClearAll),
            Err(AppError::NotStarted)
        ));
        assert!(matches!(stop_scanner(&state), Err(AppError::NotStarted)));
        assert!(get_snapshot(&state).unwrap().is_none());
    }

    #[test]
    fn test_start_twice_rejected() {
        let state = AppState::new();
        start_scanner(&state, fast_config(), |_: &ScanSnapshot| {}).unwrap();
        assert!(matches!(
            start_scanner(&state, fast_config(), |_: &ScanSnapshot| {}),
            Err(AppError::AlreadyRunning)
        ));
        stop_scanner(&state).unwrap();
        assert!(!*state.running.lock().unwrap());
    }

    #[test]
    fn test_add_then_clear_through_loop() {
        let state = AppState::new();
        start_scanner(&state, fast_config(), |_: &ScanSnapshot| {}).unwrap();

        send_command(&state, OperatorCommand::add_random(ObjectKind::Iceberg)).unwrap();
        send_command(&state, OperatorCommand::add_random(ObjectKind::Ship)).unwrap();
        let snap = wait_until(&state, |s| s.objects.len() == 2);
        assert_eq!(snap.objects.len(), 2);

        send_command(&state, OperatorCommand::ClearAll).unwrap();
        let snap = wait_until(&state, |s| s.objects.is_empty());
        assert!(snap.objects.is_empty());

        stop_scanner(&state).unwrap();
        assert!(matches!(
            send_command(&state, OperatorCommand::ClearAll),
            Err(AppError::NotStarted)
        ));
    }

    #[test]
    fn test_restart_after_tick_limit() {
        let state = AppState::new();
        let bounded = LoopConfig {
            max_ticks: Some(2),
            ..fast_config()
        };
        start_scanner(&state, bounded, |_: &ScanSnapshot| {}).unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        while !loop_finished(&state).unwrap() {
            assert!(Instant::now() <= deadline, "bounded loop never finished");
            std::thread::sleep(Duration::from_millis(2));
        }
        assert!(matches!(
            send_command(&state, OperatorCommand::ClearAll),
            Err(AppError::ChannelClosed)
        ));

        start_scanner(&state, fast_config(), |_: &ScanSnapshot| {}).unwrap();
        assert!(!loop_finished(&state).unwrap());
        send_command(&state, OperatorCommand::ClearAll).unwrap();
        stop_scanner(&state).unwrap();
    }

    #[test]
    fn test_wait_for_bounded_run() {
        let state = AppState::new();
        let config = LoopConfig {
            max_ticks: Some(3),
            ..fast_config()
        };
        start_scanner(&state, config, |_: &ScanSnapshot| {}).unwrap();
        wait_for_scanner(&state).unwrap();

        let snap = get_snapshot(&state).unwrap().unwrap();
        assert_eq!(snap.time.tick, 3);
    }
}
