//! Detection system.
//!
//! Each tick, tests every object against one sensor's beam, range and
//! capability filter. Pure read: the caller turns events into blips.

use hecs::World;

use scanner_core::enums::{ObjectKind, SensorKind};
use scanner_core::sensors::capabilities_of;
use scanner_core::types::{angular_difference, ObjectId, PolarPosition};

/// One positive detection on one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectionEvent {
    pub sensor: SensorKind,
    pub object: ObjectId,
}

/// Check if a bearing is within `half_width_deg` of the beam (inclusive).
pub fn in_beam(object_angle_deg: f64, beam_angle_deg: f64, half_width_deg: f64) -> bool {
    angular_difference(beam_angle_deg, object_angle_deg).abs() <= half_width_deg
}

/// Scan the world with `sensor`'s beam at `beam_angle_deg`.
///
/// Range is checked first, then kind, then bearing. Events come back in
/// object insertion order. An object stays detectable on every tick the beam
/// dwells within the half-width, so one passage yields several events.
pub fn scan(
    world: &World,
    sensor: SensorKind,
    beam_angle_deg: f64,
    beam_half_width_deg: f64,
) -> Vec<DetectionEvent> {
    let caps = capabilities_of(sensor);

    let mut events: Vec<DetectionEvent> = world
        .query::<(&ObjectId, &PolarPosition, &ObjectKind)>()
        .iter()
        .filter(|(_, (_, pos, _))| caps.in_range(pos.distance_norm))
        .filter(|(_, (_, _, kind))| caps.allows(**kind))
        .filter(|(_, (_, pos, _))| in_beam(pos.angle_deg, beam_angle_deg, beam_half_width_deg))
        .map(|(_, (id, _, _))| DetectionEvent {
            sensor,
            object: *id,
        })
        .collect();

    events.sort_by_key(|e| e.object);

    if !events.is_empty() {
        tracing::trace!(?sensor, beam = beam_angle_deg, hits = events.len(), "detections");
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world_model::spawn_object;
    use scanner_core::constants::BEAM_HALF_WIDTH_DEG;

    fn world_with(objects: &[(ObjectKind, f64, f64)]) -> World {
        let mut world = World::new();
        for (i, (kind, angle, distance)) in objects.iter().enumerate() {
            spawn_object(
                &mut world,
                ObjectId(i as u64),
                *kind,
                PolarPosition::new(*angle, *distance),
            );
        }
        world
    }

    #[test]
    fn test_in_beam_edges_inclusive() {
        assert!(in_beam(4.0, 0.0, BEAM_HALF_WIDTH_DEG));
        assert!(in_beam(356.0, 0.0, BEAM_HALF_WIDTH_DEG));
        assert!(!in_beam(4.5, 0.0, BEAM_HALF_WIDTH_DEG));
        assert!(!in_beam(355.0, 0.0, BEAM_HALF_WIDTH_DEG));
        assert!(in_beam(1.0, 358.0, BEAM_HALF_WIDTH_DEG), "Beam wraps across north");
    }

    #[test]
    fn test_empty_world_yields_nothing() {
        let world = World::new();
        for sensor in SensorKind::ALL {
            assert!(scan(&world, sensor, 0.0, BEAM_HALF_WIDTH_DEG).is_empty());
        }
    }

    #[test]
    fn test_kind_filter() {
        let world = world_with(&[
            (ObjectKind::Ship, 10.0, 0.3),
            (ObjectKind::Whale, 10.0, 0.3),
            (ObjectKind::Submarine, 10.0, 0.3),
            (ObjectKind::Iceberg, 10.0, 0.3),
        ]);

        let radar: Vec<ObjectId> = scan(&world, SensorKind::Radar, 10.0, BEAM_HALF_WIDTH_DEG)
            .iter()
            .map(|e| e.object)
            .collect();
        assert_eq!(radar, vec![ObjectId(0), ObjectId(3)]);

        let sonar: Vec<ObjectId> = scan(&world, SensorKind::Sonar, 10.0, BEAM_HALF_WIDTH_DEG)
            .iter()
            .map(|e| e.object)
            .collect();
        assert_eq!(sonar, vec![ObjectId(1), ObjectId(2)]);
    }

    #[test]
    fn test_range_filter() {
        let world = world_with(&[
            (ObjectKind::Ship, 45.0, 0.6),
            (ObjectKind::Ship, 45.0, 0.8),
        ]);

        let lidar = scan(&world, SensorKind::Lidar, 45.0, BEAM_HALF_WIDTH_DEG);
        assert_eq!(lidar.len(), 1, "Only the ship at the range limit is seen");
        assert_eq!(lidar[0].object, ObjectId(0));

        let radar = scan(&world, SensorKind::Radar, 45.0, BEAM_HALF_WIDTH_DEG);
        assert_eq!(radar.len(), 2);
    }

    #[test]
    fn test_events_tagged_with_sensor() {
        let world = world_with(&[(ObjectKind::Iceberg, 200.0, 0.1)]);
        let events = scan(&world, SensorKind::Lidar, 198.0, BEAM_HALF_WIDTH_DEG);
        assert_eq!(
            events,
            vec![DetectionEvent {
                sensor: SensorKind::Lidar,
                object: ObjectId(0),
            }]
        );
    }
}
