//! Sensor registry and per-sensor storage.
//!
//! The registry is a static, read-only table. Lookups are exhaustive matches
//! over the closed `SensorKind` enum, so they cannot fail at runtime.

use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use crate::constants::{LIDAR_MAX_RANGE, RADAR_MAX_RANGE, SONAR_MAX_RANGE};
use crate::enums::{ObjectKind, SensorKind};

/// What a sensor can see and how far.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorCapabilities {
    pub allowed_kinds: &'static [ObjectKind],
    pub max_range_norm: f64,
}

const SURFACE_KINDS: &[ObjectKind] = &[ObjectKind::Ship, ObjectKind::Iceberg];
const UNDERWATER_KINDS: &[ObjectKind] = &[ObjectKind::Whale, ObjectKind::Submarine];

/// Get the capabilities for a given sensor.
pub fn capabilities_of(sensor: SensorKind) -> SensorCapabilities {
    match sensor {
        SensorKind::Radar => SensorCapabilities {
            allowed_kinds: SURFACE_KINDS,
            max_range_norm: RADAR_MAX_RANGE,
        },
        SensorKind::Sonar => SensorCapabilities {
            allowed_kinds: UNDERWATER_KINDS,
            max_range_norm: SONAR_MAX_RANGE,
        },
        SensorKind::Lidar => SensorCapabilities {
            allowed_kinds: SURFACE_KINDS,
            max_range_norm: LIDAR_MAX_RANGE,
        },
    }
}

impl SensorCapabilities {
    pub fn allows(&self, kind: ObjectKind) -> bool {
        self.allowed_kinds.contains(&kind)
    }

    pub fn in_range(&self, distance_norm: f64) -> bool {
        distance_norm <= self.max_range_norm
    }
}

/// One-line legend for a sensor, e.g. "Sonar: whales & submarines".
/// Short-range sensors are prefixed with "close".
pub fn legend_entry(sensor: SensorKind) -> String {
    let caps = capabilities_of(sensor);
    let kinds: Vec<&str> = caps.allowed_kinds.iter().map(|k| k.plural()).collect();
    let qualifier = if caps.max_range_norm < 1.0 { "close " } else { "" };
    format!("{}: {}{}", sensor.label(), qualifier, kinds.join(" & "))
}

/// Fixed mapping from every `SensorKind` to a value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerSensor<T>([T; 3]);

impl<T> PerSensor<T> {
    /// Build by calling `f` once per sensor, in `SensorKind::ALL` order.
    pub fn from_fn(mut f: impl FnMut(SensorKind) -> T) -> Self {
        Self([
            f(SensorKind::Radar),
            f(SensorKind::Sonar),
            f(SensorKind::Lidar),
        ])
    }

    pub fn iter(&self) -> impl Iterator<Item = (SensorKind, &T)> {
        SensorKind::ALL.into_iter().zip(self.0.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (SensorKind, &mut T)> {
        SensorKind::ALL.into_iter().zip(self.0.iter_mut())
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.0.iter_mut()
    }
}

impl<T> Index<SensorKind> for PerSensor<T> {
    type Output = T;

    fn index(&self, sensor: SensorKind) -> &T {
        &self.0[sensor.index()]
    }
}

impl<T> IndexMut<SensorKind> for PerSensor<T> {
    fn index_mut(&mut self, sensor: SensorKind) -> &mut T {
        &mut self.0[sensor.index()]
    }
}
