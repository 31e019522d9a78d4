//! Errors surfaced at the scanner's API boundary.

/// Errors from parsing kinds or placing objects.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScanError {
    #[error("unknown object or sensor kind: {kind:?}")]
    InvalidKind { kind: String },
    #[error("invalid placement: angle {angle_deg}°, distance {distance_norm} (distance must be within [0, 1])")]
    InvalidPlacement { angle_deg: f64, distance_norm: f64 },
}
