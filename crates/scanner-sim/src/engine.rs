//! Scan engine: the core of the scanner.
//!
//! `ScanEngine` owns the hecs world of placed objects, the per-sensor sweep
//! and blip state, processes operator commands and produces `ScanSnapshot`s.
//! Completely headless, so any host scheduler (timer thread, game loop, test)
//! can drive it by calling `tick()`.

use std::collections::VecDeque;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use scanner_core::commands::OperatorCommand;
use scanner_core::components::{Blip, SweepState, WorldObject};
use scanner_core::constants::*;
use scanner_core::enums::{ObjectKind, SensorKind};
use scanner_core::error::ScanError;
use scanner_core::events::ScanEvent;
use scanner_core::sensors::PerSensor;
use scanner_core::state::ScanSnapshot;
use scanner_core::types::{ObjectId, SimTime};

use crate::systems;
use crate::systems::blips::BlipTrack;
use crate::systems::detection::DetectionEvent;
use crate::world_model;

/// Configuration for a new engine.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// RNG seed for random placement. Same seed = same field.
    pub seed: u64,
    /// Degrees each beam advances per tick.
    pub sweep_increment_deg: f64,
    /// Detection half-width around the beam, in degrees.
    pub beam_half_width_deg: f64,
    /// Ticks a blip lives before it is purged.
    pub blip_max_age_ticks: u32,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            sweep_increment_deg: SWEEP_INCREMENT_DEG,
            beam_half_width_deg: BEAM_HALF_WIDTH_DEG,
            blip_max_age_ticks: BLIP_MAX_AGE_TICKS,
        }
    }
}

/// The scan engine. Owns the object world and all sensor state.
pub struct ScanEngine {
    config: ScanConfig,
    world: World,
    time: SimTime,
    rng: ChaCha8Rng,
    next_object_id: u64,
    command_queue: VecDeque<OperatorCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    events: Vec<ScanEvent>,

    sweeps: PerSensor<SweepState>,
    blips: PerSensor<BlipTrack>,
    last_detections: PerSensor<Vec<DetectionEvent>>,
}

impl ScanEngine {
    /// Create a new engine with the given config.
    pub fn new(config: ScanConfig) -> Self {
        let max_age = config.blip_max_age_ticks;
        Self {
            world: World::new(),
            time: SimTime::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            next_object_id: 0,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            sweeps: PerSensor::default(),
            blips: PerSensor::from_fn(|_| BlipTrack::new(max_age)),
            last_detections: PerSensor::default(),
            config,
        }
    }

    /// Queue an operator command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: OperatorCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = OperatorCommand>) {
        self.command_queue.extend(commands);
    }

    /// Place an object immediately. Omitted coordinates are drawn at random.
    /// The object is visible to the next tick's scan.
    pub fn add_object(
        &mut self,
        kind: ObjectKind,
        angle_deg: Option<f64>,
        distance_norm: Option<f64>,
    ) -> Result<ObjectId, ScanError> {
        let position = world_model::resolve_placement(&mut self.rng, angle_deg, distance_norm)?;

        let id = ObjectId(self.next_object_id);
        self.next_object_id += 1;
        world_model::spawn_object(&mut self.world, id, kind, position);

        tracing::debug!(
            object = id.0,
            %kind,
            angle = position.angle_deg,
            distance = position.distance_norm,
            "object added"
        );
        self.events.push(ScanEvent::ObjectAdded {
            object_id: id,
            kind,
            angle_deg: position.angle_deg,
            distance_norm: position.distance_norm,
        });
        Ok(id)
    }

    /// Remove every object and every blip. Idempotent.
    pub fn clear_all(&mut self) {
        let removed = world_model::clear(&mut self.world, &mut self.despawn_buffer);
        for track in self.blips.values_mut() {
            track.clear();
        }
        for detections in self.last_detections.values_mut() {
            detections.clear();
        }

        tracing::debug!(removed, "objects cleared");
        self.events.push(ScanEvent::ObjectsCleared { removed });
    }

    /// Advance one frame and return the resulting snapshot.
    pub fn tick(&mut self) -> ScanSnapshot {
        self.process_commands();
        self.run_systems();
        self.time.advance();

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            &self.sweeps,
            &self.blips,
            events,
        )
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get the active configuration.
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Get a read-only reference to the object world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// All placed objects, in insertion order.
    pub fn objects(&self) -> Vec<WorldObject> {
        world_model::list_objects(&self.world)
    }

    /// Current beam angle for `sensor`.
    pub fn sweep_angle(&self, sensor: SensorKind) -> f64 {
        self.sweeps[sensor].angle_deg
    }

    /// Live blips for `sensor` with their intensity.
    pub fn live_blips(&self, sensor: SensorKind) -> Vec<(Blip, f64)> {
        self.blips[sensor].live_blips()
    }

    /// Detections `sensor` made during the most recent tick.
    pub fn detections(&self, sensor: SensorKind) -> &[DetectionEvent] {
        &self.last_detections[sensor]
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single operator command.
    fn handle_command(&mut self, command: OperatorCommand) {
        match command {
            OperatorCommand::AddObject {
                kind,
                angle_deg,
                distance_norm,
            } => {
                if let Err(err) = self.add_object(kind, angle_deg, distance_norm) {
                    tracing::warn!(%err, "add object rejected");
                    self.events.push(ScanEvent::CommandRejected {
                        reason: err.to_string(),
                    });
                }
            }
            OperatorCommand::ClearAll => self.clear_all(),
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        // 1. Sweep advance (all sensors, lockstep)
        systems::sweep::run(&mut self.sweeps, self.config.sweep_increment_deg);

        // 2. Detection against the new beam angles
        for (sensor, detections) in self.last_detections.iter_mut() {
            *detections = systems::detection::scan(
                &self.world,
                sensor,
                self.sweeps[sensor].angle_deg,
                self.config.beam_half_width_deg,
            );
        }

        // 3. New blips
        for (sensor, track) in self.blips.iter_mut() {
            track.ingest(&self.last_detections[sensor]);
        }

        // 4. Aging and purge
        for (sensor, track) in self.blips.iter_mut() {
            for blip_id in track.tick() {
                self.events.push(ScanEvent::BlipExpired { sensor, blip_id });
            }
        }
    }
}
