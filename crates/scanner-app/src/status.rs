//! Status line text for the operator.

use scanner_core::events::ScanEvent;

const INITIAL_STATUS: &str = "No objects added yet.";

/// Tracks the most recent operator-facing message.
#[derive(Debug, Clone)]
pub struct StatusLine {
    text: String,
}

impl Default for StatusLine {
    fn default() -> Self {
        Self {
            text: INITIAL_STATUS.to_string(),
        }
    }
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Update from a batch of events; the last relevant one wins.
    pub fn update(&mut self, events: &[ScanEvent]) {
        if let Some(message) = events.iter().filter_map(describe).last() {
            self.text = message;
        }
    }
}

/// Operator message for an event, if it warrants one.
pub fn describe(event: &ScanEvent) -> Option<String> {
    match event {
        ScanEvent::ObjectAdded {
            kind,
            angle_deg,
            distance_norm,
            ..
        } => Some(format!(
            "Last object added → {kind} at angle {angle_deg:.1}°, range ≈ {:.0}% of max.",
            distance_norm * 100.0
        )),
        ScanEvent::ObjectsCleared { .. } => {
            Some("Objects cleared. No objects in the ocean.".to_string())
        }
        ScanEvent::CommandRejected { reason } => Some(format!("Command rejected: {reason}")),
        ScanEvent::BlipExpired { .. } => None,
    }
}
