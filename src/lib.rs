//! Frostbite Arcade - simulation cores for the adventure's arcade cabinets
//!
//! Core modules:
//! - `sim`: shared deterministic simulation vocabulary (tick contract, RNG, movement, collision)
//! - `games`: the five mini-game engines (state + tick + actions)
//! - `session`: host wrapper driving tick -> sound -> hand-off
//! - `audio`: event-to-sound dispatcher
//! - `highscores` / `settings` / `persistence`: local + cloud best scores and preferences
//! - `platform`: wall clock and calendar for the host

pub mod audio;
pub mod games;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use highscores::ScoreBook;
pub use session::{Arcade, Session};
pub use settings::Settings;
pub use sim::{Controls, GameKind, MiniGame, RunSummary};

use glam::Vec2;

/// Arcade cabinet constants shared by every game
pub mod consts {
    /// Logical canvas width (portrait cabinet)
    pub const CANVAS_WIDTH: f32 = 480.0;
    /// Logical canvas height
    pub const CANVAS_HEIGHT: f32 = 640.0;
    /// Simulation frames per second (one tick per animation frame)
    pub const FRAMES_PER_SECOND: u32 = 60;
}

/// Convert polar (r, theta) around `center` to canvas coordinates
#[inline]
pub fn polar_to_canvas(center: Vec2, r: f32, theta: f32) -> Vec2 {
    center + Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}
