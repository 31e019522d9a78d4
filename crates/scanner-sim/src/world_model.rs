//! Object spawn and removal for the shared field.
//!
//! Objects are hecs entities carrying `ObjectId`, `PolarPosition` and
//! `ObjectKind`. They are immutable once spawned and only removed by `clear`.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use scanner_core::components::WorldObject;
use scanner_core::constants::SPAWN_MAX_DISTANCE;
use scanner_core::enums::ObjectKind;
use scanner_core::error::ScanError;
use scanner_core::types::{normalize_degrees, ObjectId, PolarPosition};

/// Resolve an object's placement. Missing coordinates are drawn uniformly:
/// angle from [0, 360), distance from [0, SPAWN_MAX_DISTANCE].
/// Supplied angles are wrapped into [0, 360); supplied distances must lie in [0, 1].
pub fn resolve_placement(
    rng: &mut ChaCha8Rng,
    angle_deg: Option<f64>,
    distance_norm: Option<f64>,
) -> Result<PolarPosition, ScanError> {
    let angle = match angle_deg {
        Some(a) => a,
        None => rng.gen_range(0.0..360.0),
    };
    let distance = match distance_norm {
        Some(d) => d,
        None => rng.gen_range(0.0..=SPAWN_MAX_DISTANCE),
    };

    if !angle.is_finite() || !(0.0..=1.0).contains(&distance) {
        return Err(ScanError::InvalidPlacement {
            angle_deg: angle,
            distance_norm: distance,
        });
    }

    Ok(PolarPosition::new(normalize_degrees(angle), distance))
}

/// Spawn a single object entity.
pub fn spawn_object(
    world: &mut World,
    id: ObjectId,
    kind: ObjectKind,
    position: PolarPosition,
) -> Entity {
    world.spawn((id, position, kind))
}

/// Despawn every object. Returns how many were removed.
/// Uses a pre-allocated buffer to avoid allocation on repeated clears.
pub fn clear(world: &mut World, despawn_buffer: &mut Vec<Entity>) -> usize {
    despawn_buffer.clear();
    despawn_buffer.extend(world.query_mut::<&ObjectId>().into_iter().map(|(e, _)| e));

    let removed = despawn_buffer.len();
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
    removed
}

/// All objects in insertion order.
pub fn list_objects(world: &World) -> Vec<WorldObject> {
    let mut objects: Vec<WorldObject> = world
        .query::<(&ObjectId, &PolarPosition, &ObjectKind)>()
        .iter()
        .map(|(_, (id, position, kind))| WorldObject {
            id: *id,
            position: *position,
            kind: *kind,
        })
        .collect();

    objects.sort_by_key(|o| o.id);
    objects
}
