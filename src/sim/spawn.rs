//! Frame-counted spawn scheduling
//!
//! Spawn cadence shrinks linearly with progress through a level:
//! `interval = start - progress * (start - min)`.

use serde::{Deserialize, Serialize};

/// Interval in frames for the given progress (clamped to 0..=1)
pub fn spawn_interval(start: u32, min: u32, progress: f32) -> u32 {
    let progress = progress.clamp(0.0, 1.0);
    let span = start.saturating_sub(min) as f32;
    (start as f32 - progress * span).round() as u32
}

/// Tracks the last frame something spawned and how many have spawned so far
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnClock {
    pub last_spawn_frame: u64,
    pub spawned: u32,
}

impl SpawnClock {
    /// Restart at `frame` with nothing spawned
    pub fn reset(frame: u64) -> Self {
        Self {
            last_spawn_frame: frame,
            spawned: 0,
        }
    }

    /// Fraction of `total` already spawned
    pub fn progress(&self, total: u32) -> f32 {
        if total == 0 {
            1.0
        } else {
            self.spawned as f32 / total as f32
        }
    }

    pub fn is_due(&self, frame: u64, interval: u32) -> bool {
        frame.saturating_sub(self.last_spawn_frame) >= interval as u64
    }

    /// Record a successful spawn. Dropped candidates must not call this,
    /// so they are retried on the next qualifying frame.
    pub fn record(&mut self, frame: u64) {
        self.last_spawn_frame = frame;
        self.spawned += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_ramps() {
        assert_eq!(spawn_interval(90, 40, 0.0), 90);
        assert_eq!(spawn_interval(90, 40, 0.5), 65);
        assert_eq!(spawn_interval(90, 40, 1.0), 40);
        assert_eq!(spawn_interval(90, 40, 3.0), 40);
    }

    #[test]
    fn test_clock_due_and_record() {
        let mut clock = SpawnClock::reset(10);
        assert!(!clock.is_due(50, 60));
        assert!(clock.is_due(70, 60));
        clock.record(70);
        assert_eq!(clock.spawned, 1);
        assert!(!clock.is_due(71, 60));
        assert_eq!(clock.progress(4), 0.25);
    }
}
