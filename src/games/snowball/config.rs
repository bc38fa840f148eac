//! Snowball Showdown tuning

use crate::sim::Inertial;

/// Fixed columns for the two fighters
pub const PLAYER_X: f32 = 80.0;
pub const OPPONENT_X: f32 = 400.0;
/// Both fighters move along y within this lane
pub const LANE_MIN: f32 = 140.0;
pub const LANE_MAX: f32 = 580.0;
pub const LANE_CENTER: f32 = (LANE_MIN + LANE_MAX) / 2.0;

/// Player lane movement
pub const AIM: Inertial = Inertial {
    accel: 0.7,
    friction: 0.85,
    max_speed: 6.0,
    epsilon: 0.05,
    min: LANE_MIN,
    max: LANE_MAX,
};
/// Pointer steering stops pushing within this distance of the target lane
pub const AIM_DEADBAND: f32 = 6.0;

/// Throws
pub const THROW_COOLDOWN: u32 = 30;
pub const FLIGHT_FRAMES: u32 = 40;
/// Peak of the render-only arc
pub const ARC_HEIGHT: f32 = 60.0;
/// A snowball hits when the defender is within this of the throw's target y
pub const HIT_TOLERANCE: f32 = 28.0;
pub const SPLAT_FRAMES: u32 = 12;

/// Match
pub const HITS_TO_WIN: u32 = 5;
pub const HIT_POINTS: u32 = 100;
/// Each consecutive player hit adds this fraction of HIT_POINTS
pub const STREAK_BONUS: f32 = 0.5;
pub const SWITCH_FRAMES: u32 = 45;

/// Opponent: reacts to player snowballs this close to impact
pub const THREAT_FRAMES: u32 = 22;
pub const DODGE_CHANCE_BASE: f32 = 0.55;
pub const DODGE_CHANCE_PER_HIT: f32 = 0.05;
pub const DODGE_CHANCE_MAX: f32 = 0.8;
pub const BLUNDER_CHANCE: f32 = 0.15;
pub const DODGE_DISTANCE: f32 = 90.0;
pub const DODGE_SPEED: f32 = 4.5;
pub const WANDER_SPEED: f32 = 2.0;
pub const WANDER_MIN_FRAMES: u32 = 30;
pub const WANDER_MAX_FRAMES: u32 = 72;
/// Past this distance from center the next wander target is on the other half
pub const WANDER_CROSS_DISTANCE: f32 = 140.0;
pub const WANDER_CROSS_MIN: f32 = 20.0;
pub const WANDER_CROSS_MAX: f32 = 120.0;
pub const OPPONENT_THROW_MIN: u32 = 70;
pub const OPPONENT_THROW_MAX: u32 = 110;
/// Opponent aim error around the player's lane
pub const OPPONENT_AIM_SPREAD: f32 = 30.0;

/// Chance the opponent dodges a committed threat
pub fn dodge_chance(player_hits: u32) -> f32 {
    (DODGE_CHANCE_BASE + DODGE_CHANCE_PER_HIT * player_hits as f32).min(DODGE_CHANCE_MAX)
}

/// Points for a player hit at the current streak
pub fn hit_score(streak: u32) -> u64 {
    (HIT_POINTS as f32 * (1.0 + streak as f32 * STREAK_BONUS)).round() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dodge_chance_caps() {
        assert!((dodge_chance(0) - 0.55).abs() < 1e-6);
        assert!((dodge_chance(4) - 0.75).abs() < 1e-6);
        assert_eq!(dodge_chance(10), DODGE_CHANCE_MAX);
    }

    #[test]
    fn test_streak_scoring() {
        assert_eq!(hit_score(0), 100);
        assert_eq!(hit_score(1), 150);
        assert_eq!(hit_score(3), 250);
    }
}
