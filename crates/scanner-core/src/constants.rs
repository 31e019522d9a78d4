//! Scanner constants and tuning parameters.

/// Tick period in milliseconds (one animation frame).
pub const TICK_PERIOD_MS: u64 = 50;

/// Tick rate (Hz).
pub const TICK_RATE: u32 = (1000 / TICK_PERIOD_MS) as u32;

/// Seconds per tick.
pub const DT: f64 = TICK_PERIOD_MS as f64 / 1000.0;

// --- Sweep ---

/// Degrees the beam advances each tick.
pub const SWEEP_INCREMENT_DEG: f64 = 2.0;

/// Ticks for one full revolution at the default increment.
pub const TICKS_PER_REVOLUTION: u64 = 360 / SWEEP_INCREMENT_DEG as u64;

/// Beam half-width in degrees. Objects within ±this of the beam are detected.
pub const BEAM_HALF_WIDTH_DEG: f64 = 4.0;

// --- Blips ---

/// Ticks a blip survives before it is purged.
pub const BLIP_MAX_AGE_TICKS: u32 = 25;

// --- Sensor ranges (normalized, 1.0 = scope edge) ---

/// Radar usable range.
pub const RADAR_MAX_RANGE: f64 = 1.0;

/// Sonar usable range.
pub const SONAR_MAX_RANGE: f64 = 1.0;

/// LiDAR usable range (short range sensor).
pub const LIDAR_MAX_RANGE: f64 = 0.6;

// --- World ---

/// Upper bound for randomly placed object distance, keeps blips off the rim.
pub const SPAWN_MAX_DISTANCE: f64 = 0.95;

/// Default RNG seed for object placement.
pub const DEFAULT_SEED: u64 = 42;

// --- Display ---

/// Range ring fractions drawn inside the outer ring.
pub const RANGE_RING_FRACTIONS: [f64; 3] = [0.25, 0.5, 0.75];

/// Intensity used for the static scope background.
pub const BACKGROUND_INTENSITY: f64 = 0.9;
