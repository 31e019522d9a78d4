//! Operator commands sent from a host to the engine.
//!
//! Commands are queued and applied at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::ObjectKind;

/// All possible operator actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OperatorCommand {
    /// Place an object. Omitted coordinates are drawn at random.
    AddObject {
        kind: ObjectKind,
        #[serde(default)]
        angle_deg: Option<f64>,
        #[serde(default)]
        distance_norm: Option<f64>,
    },
    /// Remove every object and every blip.
    ClearAll,
}

impl OperatorCommand {
    /// Shorthand for a randomly placed object of `kind`.
    pub fn add_random(kind: ObjectKind) -> Self {
        OperatorCommand::AddObject {
            kind,
            angle_deg: None,
            distance_norm: None,
        }
    }
}
