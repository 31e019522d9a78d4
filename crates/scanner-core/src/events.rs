//! Events emitted by the engine for the presentation layer.

use serde::{Deserialize, Serialize};

use crate::enums::{ObjectKind, SensorKind};
use crate::types::{BlipId, ObjectId};

/// Something the host may want to announce or react to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ScanEvent {
    /// An object was placed in the field.
    ObjectAdded {
        object_id: ObjectId,
        kind: ObjectKind,
        angle_deg: f64,
        distance_norm: f64,
    },
    /// The field was cleared.
    ObjectsCleared { removed: usize },
    /// A blip reached its maximum age and was purged. Renderers release its visual.
    BlipExpired { sensor: SensorKind, blip_id: BlipId },
    /// An `AddObject` command was rejected.
    CommandRejected { reason: String },
}
