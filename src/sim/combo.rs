//! Combo/streak tracking with an idle decay window

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combo {
    pub count: u32,
    /// Frames left before the combo decays to zero
    pub window: u32,
}

impl Combo {
    /// Score multiplier for the *current* count: `1 + count * rate`
    pub fn multiplier(&self, rate: f32) -> f32 {
        1.0 + self.count as f32 * rate
    }

    /// Points for a hit at the current count, then extend the combo
    pub fn score_hit(&mut self, base: u32, rate: f32, window: u32) -> u64 {
        let points = (base as f32 * self.multiplier(rate)).round() as u64;
        self.count += 1;
        self.window = window;
        points
    }

    pub fn reset(&mut self) {
        self.count = 0;
        self.window = 0;
    }

    /// Per-frame decay; returns true if the combo just expired
    pub fn decay(&mut self) -> bool {
        if self.window == 0 {
            return false;
        }
        self.window -= 1;
        if self.window == 0 && self.count > 0 {
            self.count = 0;
            return true;
        }
        false
    }
}
