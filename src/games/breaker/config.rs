//! Ice Breaker tuning

use crate::consts::CANVAS_WIDTH;

/// Paddle defaults (`x` is the left edge)
pub const PADDLE_Y: f32 = 600.0;
pub const PADDLE_WIDTH: f32 = 80.0;
pub const WIDE_PADDLE_WIDTH: f32 = 120.0;
pub const PADDLE_HEIGHT: f32 = 12.0;
pub const PADDLE_SPEED: f32 = 7.0;

/// Ball defaults
pub const BALL_RADIUS: f32 = 6.0;
pub const BALL_BASE_SPEED: f32 = 5.0;
pub const BALL_SPEED_PER_LEVEL: f32 = 0.4;
/// Added after every paddle bounce
pub const BALL_SPEED_GAIN: f32 = 0.05;
pub const BALL_MAX_SPEED: f32 = 9.0;
/// Random serve deviation from straight up (radians)
pub const SERVE_SPREAD: f32 = 0.2;
/// Paddle reflection: angle = -(BASE + hit_pos * SPAN) * π
pub const PADDLE_ANGLE_BASE: f32 = 0.15;
pub const PADDLE_ANGLE_SPAN: f32 = 0.7;

/// Brick grid
pub const BRICK_COLS: usize = 8;
pub const BRICK_MIN_ROWS: usize = 4;
pub const BRICK_MAX_ROWS: usize = 8;
pub const BRICK_WIDTH: f32 = 52.0;
pub const BRICK_HEIGHT: f32 = 18.0;
pub const BRICK_GAP: f32 = 4.0;
pub const BRICK_LEFT: f32 = 18.0;
pub const BRICK_TOP: f32 = 80.0;
pub const BRICK_MAX_HP: u32 = 3;
/// Points per max hp of a broken brick
pub const BRICK_POINTS: u32 = 50;
/// Shatter animation before removal
pub const BREAK_FRAMES: u32 = 12;

/// Combo bonus per consecutive brick without touching the paddle
pub const COMBO_BONUS: f32 = 0.25;

/// Power-ups
pub const POWERUP_CHANCE: f32 = 0.12;
pub const POWERUP_FALL_SPEED: f32 = 2.0;
pub const POWERUP_SIZE: f32 = 16.0;
pub const WIDE_FRAMES: u32 = 600;
/// Extra balls fan out by this angle (radians)
pub const MULTIBALL_SPREAD: f32 = 0.4;

pub const START_LIVES: u32 = 3;
pub const MAX_LIVES: u32 = 5;
pub const LEVELS: u32 = 5;
pub const LEVELUP_FRAMES: u32 = 120;

/// Right edge for the ball
pub const FIELD_RIGHT: f32 = CANVAS_WIDTH;

/// Ball speed at the start of a level
pub fn level_ball_speed(level: u32) -> f32 {
    (BALL_BASE_SPEED + BALL_SPEED_PER_LEVEL * level as f32).min(BALL_MAX_SPEED)
}

/// Rows of bricks for a level
pub fn level_rows(level: u32) -> usize {
    (BRICK_MIN_ROWS + level as usize).min(BRICK_MAX_ROWS)
}

/// Brick hp for a row; upper rows and later levels are tougher
pub fn brick_hp(level: u32, rows: usize, row: usize) -> u32 {
    let depth = (rows - 1 - row) as u32;
    1 + ((level + depth) / 3).min(BRICK_MAX_HP - 1)
}
