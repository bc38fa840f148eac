//! Player movement models
//!
//! Two models, both clamping into fixed bounds every frame:
//! - inertial: accelerate while held, multiplicative friction, speed cap, dead zone
//! - direct-rate: fixed speed while held, no inertia

use serde::{Deserialize, Serialize};

/// Tuning for an inertial axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Inertial {
    /// Velocity added per frame while input is held
    pub accel: f32,
    /// Per-frame multiplicative decay (0..1)
    pub friction: f32,
    pub max_speed: f32,
    /// Below this magnitude velocity snaps to zero
    pub epsilon: f32,
    pub min: f32,
    pub max: f32,
}

impl Inertial {
    /// Integrate one frame. `dir` is -1, 0 or +1.
    ///
    /// Friction is applied as a multiply every frame, held or not, which gives
    /// exponential deceleration and a terminal velocity below `max_speed`.
    pub fn step(&self, pos: f32, vel: f32, dir: f32) -> (f32, f32) {
        let mut vel = vel + dir * self.accel;
        vel *= self.friction;
        vel = vel.clamp(-self.max_speed, self.max_speed);
        if vel.abs() < self.epsilon {
            vel = 0.0;
        }
        let pos = (pos + vel).clamp(self.min, self.max);
        (pos, vel)
    }
}

/// Direct-rate movement along one axis
#[inline]
pub fn direct_rate(pos: f32, dir: f32, speed: f32, min: f32, max: f32) -> f32 {
    (pos + dir * speed).clamp(min, max)
}

/// Move `current` toward `target` by at most `max_step`
#[inline]
pub fn approach(current: f32, target: f32, max_step: f32) -> f32 {
    let delta = (target - current).clamp(-max_step, max_step);
    current + delta
}

#[cfg(test)]
mod tests {
    use super::*;

    const AXIS: Inertial = Inertial {
        accel: 0.6,
        friction: 0.9,
        max_speed: 7.0,
        epsilon: 0.05,
        min: 20.0,
        max: 460.0,
    };

    #[test]
    fn test_friction_is_multiplicative() {
        let (_, v1) = AXIS.step(200.0, 4.0, 0.0);
        assert!((v1 - 3.6).abs() < 1e-5);
        let (_, v2) = AXIS.step(200.0, v1, 0.0);
        assert!((v2 - 3.24).abs() < 1e-5);
    }

    #[test]
    fn test_dead_zone_snaps_to_zero() {
        let (_, v) = AXIS.step(200.0, 0.05, 0.0);
        assert_eq!(v, 0.0);
    }

    #[test]
    fn test_clamps_to_bounds() {
        let mut pos = 30.0;
        let mut vel = 0.0;
        for _ in 0..200 {
            (pos, vel) = AXIS.step(pos, vel, -1.0);
            assert!(pos >= AXIS.min);
        }
        assert_eq!(pos, AXIS.min);
    }

    #[test]
    fn test_direct_rate_and_approach() {
        assert_eq!(direct_rate(5.0, -1.0, 6.0, 0.0, 100.0), 0.0);
        assert_eq!(direct_rate(50.0, 1.0, 6.0, 0.0, 100.0), 56.0);
        assert_eq!(approach(0.0, 10.0, 4.0), 4.0);
        assert_eq!(approach(9.0, 10.0, 4.0), 10.0);
    }
}
