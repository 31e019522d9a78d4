//! Host state shared between the control layer and the loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use scanner_core::commands::OperatorCommand;
use scanner_core::state::ScanSnapshot;

/// Commands sent from the control layer to the loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// An operator command to forward to the engine.
    Operator(OperatorCommand),
    /// Shut down the loop thread gracefully.
    Shutdown,
}

/// Shared host state.
///
/// The engine itself lives on the loop thread; everything here is either a
/// channel into it or a copy of what it last produced, so one tick is always
/// applied as a unit.
pub struct AppState {
    /// Channel sender to forward commands to the loop thread.
    /// `None` before `start_scanner` is called.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Latest snapshot for synchronous `get_snapshot` queries.
    /// Updated by the loop thread after each tick.
    pub latest_snapshot: Arc<Mutex<Option<ScanSnapshot>>>,
    /// Whether the loop is currently running.
    pub running: Mutex<bool>,
    /// Join handle for the loop thread.
    pub loop_handle: Mutex<Option<JoinHandle<()>>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            running: Mutex::new(false),
            loop_handle: Mutex::new(None),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_creation() {
        let state = AppState::new();
        assert!(state.command_tx.lock().unwrap().is_none());
        assert!(state.latest_snapshot.lock().unwrap().is_none());
        assert!(!*state.running.lock().unwrap());
        assert!(state.loop_handle.lock().unwrap().is_none());
    }
}
