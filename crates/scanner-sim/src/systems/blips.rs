//! Blip lifecycle: detection events become fading markers that age out.
//!
//! Each sensor owns an independent `BlipTrack`. Blips fade linearly from
//! intensity 1.0 at creation to 0.0 at `max_age_ticks`, when they are purged.

use scanner_core::components::Blip;
use scanner_core::types::BlipId;

use super::detection::DetectionEvent;

/// Fade law: `max(0, 1 - age / max_age)`.
pub fn intensity(age_ticks: u32, max_age_ticks: u32) -> f64 {
    if max_age_ticks == 0 {
        return 0.0;
    }
    (1.0 - age_ticks as f64 / max_age_ticks as f64).max(0.0)
}

/// Ordered live blips for one sensor.
#[derive(Debug, Clone)]
pub struct BlipTrack {
    blips: Vec<Blip>,
    max_age_ticks: u32,
    next_blip_id: u64,
}

impl BlipTrack {
    pub fn new(max_age_ticks: u32) -> Self {
        Self {
            blips: Vec::new(),
            max_age_ticks,
            next_blip_id: 0,
        }
    }

    /// Append one fresh blip per event, in event order.
    pub fn ingest(&mut self, events: &[DetectionEvent]) {
        for event in events {
            let id = BlipId(self.next_blip_id);
            self.next_blip_id += 1;
            self.blips.push(Blip {
                id,
                object: event.object,
                age_ticks: 0,
                max_age_ticks: self.max_age_ticks,
            });
        }
    }

    /// Age every blip by one tick and purge the expired ones.
    /// Returns the ids of purged blips, in their original order.
    pub fn tick(&mut self) -> Vec<BlipId> {
        let mut expired = Vec::new();
        self.blips.retain_mut(|blip| {
            blip.age_ticks += 1;
            if blip.age_ticks >= blip.max_age_ticks {
                expired.push(blip.id);
                false
            } else {
                true
            }
        });
        expired
    }

    /// Live blips paired with their current intensity.
    pub fn live_blips(&self) -> Vec<(Blip, f64)> {
        self.blips
            .iter()
            .map(|b| (*b, intensity(b.age_ticks, b.max_age_ticks)))
            .collect()
    }

    /// Drop every blip without reporting expiry. Ids keep counting up.
    pub fn clear(&mut self) {
        self.blips.clear();
    }

    pub fn len(&self) -> usize {
        self.blips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blips.is_empty()
    }
}
