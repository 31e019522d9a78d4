//! Snapshot system: reads the world, sweeps and blip tracks and builds a ScanSnapshot.
//!
//! This system is read-only; it never modifies the world.

use std::collections::HashMap;

use hecs::World;

use scanner_core::components::{SweepState, WorldObject};
use scanner_core::events::ScanEvent;
use scanner_core::sensors::{capabilities_of, PerSensor};
use scanner_core::state::{BlipView, ScanSnapshot, SensorView};
use scanner_core::types::{ObjectId, SimTime};

use super::blips::BlipTrack;
use crate::world_model;

/// Build a complete ScanSnapshot from the current state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    sweeps: &PerSensor<SweepState>,
    tracks: &PerSensor<BlipTrack>,
    events: Vec<ScanEvent>,
) -> ScanSnapshot {
    let objects = world_model::list_objects(world);
    let by_id: HashMap<ObjectId, &WorldObject> = objects.iter().map(|o| (o.id, o)).collect();

    let sensors = sweeps
        .iter()
        .map(|(sensor, sweep)| SensorView {
            sensor,
            sweep_angle_deg: sweep.angle_deg,
            max_range_norm: capabilities_of(sensor).max_range_norm,
            blips: build_blips(&tracks[sensor], &by_id),
        })
        .collect();

    ScanSnapshot {
        time: *time,
        sensors,
        objects,
        events,
    }
}

/// Resolve live blips to their objects' positions.
fn build_blips(track: &BlipTrack, objects: &HashMap<ObjectId, &WorldObject>) -> Vec<BlipView> {
    track
        .live_blips()
        .into_iter()
        .filter_map(|(blip, intensity)| {
            objects.get(&blip.object).map(|object| BlipView {
                blip_id: blip.id,
                object_id: blip.object,
                kind: object.kind,
                position: object.position,
                age_ticks: blip.age_ticks,
                intensity,
            })
        })
        .collect()
}
