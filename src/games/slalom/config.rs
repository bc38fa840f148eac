//! Slalom tuning

use crate::sim::Inertial;

/// Skier rides a fixed screen row; the slope scrolls up past it
pub const SKIER_Y: f32 = 160.0;
pub const SKIER_WIDTH: f32 = 16.0;
pub const SKIER_HEIGHT: f32 = 24.0;
pub const SKIER_START_X: f32 = 240.0;

/// Lateral steering
pub const STEER: Inertial = Inertial {
    accel: 0.6,
    friction: 0.88,
    max_speed: 7.0,
    epsilon: 0.05,
    min: 20.0,
    max: 460.0,
};

/// Downhill speed (px/frame)
pub const SPEED_MIN: f32 = 2.5;
pub const SPEED_MAX: f32 = 9.0;
pub const SPEED_TUCK: f32 = 0.08;
pub const SPEED_BRAKE: f32 = 0.15;
/// Drift back toward the section's cruising speed when neither is held
pub const SPEED_RELAX: f32 = 0.02;
pub const BASE_SPEED: f32 = 4.0;
pub const BASE_SPEED_PER_SECTION: f32 = 0.5;

/// Gates and obstacles enter below the bottom edge
pub const SPAWN_Y: f32 = 700.0;
/// Scrolled-off entities are dropped above this line
pub const DESPAWN_Y: f32 = -60.0;

/// Gates
pub const GATE_OPENINGS: [f32; 3] = [140.0, 120.0, 100.0];
pub const GATES_PER_SECTION: [u32; 3] = [10, 12, 14];
pub const GATE_MAX_SHIFT: f32 = 160.0;
/// Gate openings stay inside this span
pub const COURSE_LEFT: f32 = 40.0;
pub const COURSE_RIGHT: f32 = 440.0;
pub const GATE_START_INTERVAL: u32 = 90;
pub const GATE_MIN_INTERVAL: u32 = 55;
pub const GATE_POINTS: u32 = 100;

/// Obstacles
pub const OBSTACLE_START_INTERVAL: u32 = 50;
pub const OBSTACLE_MIN_INTERVAL: u32 = 25;
pub const OBSTACLE_MIN_X: f32 = 30.0;
pub const OBSTACLE_MAX_X: f32 = 450.0;
/// Obstacles never spawn inside a pending gate's opening within this vertical band
pub const GATE_CLEAR_BAND: f32 = 80.0;
/// Tree, rock, mogul
pub const OBSTACLE_WEIGHTS: [f32; 3] = [50.0, 35.0, 15.0];
pub const OBSTACLE_WEIGHT_SHIFT: f32 = 5.0;

/// Crashes
pub const CRASH_INVULN_FRAMES: u32 = 60;
pub const CRASH_SPEED: f32 = 2.5;
pub const MAX_CRASHES: u32 = 3;
pub const MAX_GATES_MISSED: u32 = 5;

/// Rival skier
pub const RIVAL_SPEEDS: [f32; 3] = [4.6, 5.2, 5.8];
pub const RIVAL_START_X: f32 = 300.0;
pub const RIVAL_STEER_CAP: f32 = 3.5;
/// Frames for the rival's steering to reach full strength
pub const RIVAL_STEER_RAMP: u32 = 120;
/// Target advances once its gate is this far above the rival
pub const RIVAL_ADVANCE_MARGIN: f32 = 10.0;
/// Screen band the rival is kept in while far ahead or behind
pub const RIVAL_MIN_Y: f32 = -240.0;
pub const RIVAL_MAX_Y: f32 = 880.0;
pub const RIVAL_BONUS: u32 = 500;

pub const SECTIONS: u32 = 3;
pub const SECTION_CLEAR_FRAMES: u32 = 120;

fn section_index(section: u32) -> usize {
    section.min(SECTIONS - 1) as usize
}

pub fn base_speed(section: u32) -> f32 {
    BASE_SPEED + BASE_SPEED_PER_SECTION * section_index(section) as f32
}

pub fn gate_opening(section: u32) -> f32 {
    GATE_OPENINGS[section_index(section)]
}

pub fn gate_quota(section: u32) -> u32 {
    GATES_PER_SECTION[section_index(section)]
}

pub fn rival_speed(section: u32) -> f32 {
    RIVAL_SPEEDS[section_index(section)]
}

/// Obstacle weights (tree, rock, mogul); trees thicken and moguls thin out
pub fn obstacle_weights(section: u32) -> [f32; 3] {
    let shift = OBSTACLE_WEIGHT_SHIFT * section_index(section) as f32;
    [
        OBSTACLE_WEIGHTS[0] + shift,
        OBSTACLE_WEIGHTS[1],
        (OBSTACLE_WEIGHTS[2] - shift).max(0.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_tables_clamp() {
        assert_eq!(base_speed(0), 4.0);
        assert_eq!(base_speed(2), 5.0);
        assert_eq!(gate_opening(9), 100.0);
        assert_eq!(gate_quota(1), 12);
        assert_eq!(obstacle_weights(2), [60.0, 35.0, 5.0]);
    }
}
