//! Enumeration types used throughout the scanner.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ScanError;

/// Kind of object placed in the shared field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ObjectKind {
    /// Surface vessel.
    #[default]
    Ship,
    /// Marine animal, underwater.
    Whale,
    /// Underwater vessel.
    Submarine,
    /// Surface ice.
    Iceberg,
}

impl ObjectKind {
    /// All object kinds, in selector order.
    pub const ALL: [ObjectKind; 4] = [
        ObjectKind::Ship,
        ObjectKind::Whale,
        ObjectKind::Submarine,
        ObjectKind::Iceberg,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ObjectKind::Ship => "Ship",
            ObjectKind::Whale => "Whale",
            ObjectKind::Submarine => "Submarine",
            ObjectKind::Iceberg => "Iceberg",
        }
    }

    /// Lowercase plural used in legends ("ships", "whales").
    pub fn plural(self) -> &'static str {
        match self {
            ObjectKind::Ship => "ships",
            ObjectKind::Whale => "whales",
            ObjectKind::Submarine => "submarines",
            ObjectKind::Iceberg => "icebergs",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ObjectKind {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectKind::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ScanError::InvalidKind { kind: s.to_string() })
    }
}

/// Detection sensor. All three share the same origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SensorKind {
    Radar,
    Sonar,
    Lidar,
}

impl SensorKind {
    /// All sensors, in display order (left to right).
    pub const ALL: [SensorKind; 3] = [SensorKind::Radar, SensorKind::Sonar, SensorKind::Lidar];

    /// Dense index for per-sensor tables.
    pub const fn index(self) -> usize {
        match self {
            SensorKind::Radar => 0,
            SensorKind::Sonar => 1,
            SensorKind::Lidar => 2,
        }
    }

    /// Label drawn in the middle of the scope.
    pub fn label(self) -> &'static str {
        match self {
            SensorKind::Radar => "Radar",
            SensorKind::Sonar => "Sonar",
            SensorKind::Lidar => "LiDAR",
        }
    }

    /// Full-intensity display colour as (r, g, b).
    pub fn base_color(self) -> (u8, u8, u8) {
        match self {
            SensorKind::Radar => (0, 255, 0),
            SensorKind::Sonar => (0, 220, 255),
            SensorKind::Lidar => (255, 255, 0),
        }
    }

    /// Display colour scaled by `intensity` (clamped to [0, 1]).
    pub fn shade(self, intensity: f64) -> (u8, u8, u8) {
        let i = intensity.clamp(0.0, 1.0);
        let (r, g, b) = self.base_color();
        let scale = |c: u8| (c as f64 * i) as u8;
        (scale(r), scale(g), scale(b))
    }
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SensorKind {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "radar" => Ok(SensorKind::Radar),
            "sonar" => Ok(SensorKind::Sonar),
            "lidar" | "laser" => Ok(SensorKind::Lidar),
            _ => Err(ScanError::InvalidKind { kind: s.to_string() }),
        }
    }
}
