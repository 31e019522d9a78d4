//! Sweep controller: advances every sensor's beam once per tick.

use scanner_core::components::SweepState;
use scanner_core::sensors::PerSensor;
use scanner_core::types::normalize_degrees;

/// Advance one beam by `increment_deg`, keeping it in [0, 360).
pub fn advance(sweep: &mut SweepState, increment_deg: f64) {
    sweep.angle_deg = normalize_degrees(sweep.angle_deg + increment_deg);
}

/// Advance all beams in lockstep.
pub fn run(sweeps: &mut PerSensor<SweepState>, increment_deg: f64) {
    for sweep in sweeps.values_mut() {
        advance(sweep, increment_deg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scanner_core::constants::{SWEEP_INCREMENT_DEG, TICKS_PER_REVOLUTION};
    use scanner_core::enums::SensorKind;

    #[test]
    fn test_sweep_wraps_at_360() {
        let mut sweep = SweepState { angle_deg: 358.0 };
        advance(&mut sweep, SWEEP_INCREMENT_DEG);
        assert_eq!(sweep.angle_deg, 0.0);
    }

    #[test]
    fn test_full_revolution_returns_to_start() {
        let mut sweep = SweepState::default();
        for _ in 0..TICKS_PER_REVOLUTION {
            advance(&mut sweep, SWEEP_INCREMENT_DEG);
            assert!((0.0..360.0).contains(&sweep.angle_deg));
        }
        assert_eq!(sweep.angle_deg, 0.0);
    }

    #[test]
    fn test_sensors_advance_in_lockstep() {
        let mut sweeps = PerSensor::<SweepState>::default();
        for _ in 0..7 {
            run(&mut sweeps, SWEEP_INCREMENT_DEG);
        }
        for sensor in SensorKind::ALL {
            assert_eq!(sweeps[sensor].angle_deg, 14.0);
        }
    }
}
