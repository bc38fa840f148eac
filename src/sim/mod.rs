//! Shared simulation vocabulary
//!
//! Every mini-game engine follows the same contract:
//! - `tick(&state, now_ms) -> state` advances exactly one frame
//! - discrete actions (`handle_shoot`, `serve_ball`, ...) are separate pure calls
//! - a call never mutates its input; it returns a fresh snapshot whose `events`
//!   hold only what that call produced
//! - physics is frame-counted; `now_ms` only feeds the elapsed-time display
//! - all randomness comes from the seeded [`SimRng`] stored inside the state

pub mod collision;
pub mod combo;
pub mod motion;
pub mod rng;
pub mod spawn;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use collision::{Aabb, Axis, pick_target};
pub use combo::Combo;
pub use motion::{Inertial, approach, direct_rate};
pub use rng::SimRng;
pub use spawn::{SpawnClock, spawn_interval};

/// Which mini-game a state or summary belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameKind {
    Village,
    IceBreaker,
    PolypSniper,
    Slalom,
    Snowball,
}

impl GameKind {
    pub const ALL: [GameKind; 5] = [
        GameKind::Village,
        GameKind::IceBreaker,
        GameKind::PolypSniper,
        GameKind::Slalom,
        GameKind::Snowball,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GameKind::Village => "village",
            GameKind::IceBreaker => "ice_breaker",
            GameKind::PolypSniper => "polyp_sniper",
            GameKind::Slalom => "slalom",
            GameKind::Snowball => "snowball",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "village" | "defend" | "defend_the_village" => Some(GameKind::Village),
            "ice_breaker" | "icebreaker" | "breaker" => Some(GameKind::IceBreaker),
            "polyp_sniper" | "sniper" => Some(GameKind::PolypSniper),
            "slalom" => Some(GameKind::Slalom),
            "snowball" | "snowball_showdown" => Some(GameKind::Snowball),
            _ => None,
        }
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Held directional/action flags, written by the host and read-only to engines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Fire / snip / throw held
    pub action: bool,
}

impl Controls {
    /// -1, 0 or +1 along x
    pub fn horizontal(&self) -> f32 {
        match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }

    /// Apply a keyboard `KeyboardEvent.key` press/release; false if the key is unbound
    pub fn apply_key(&mut self, key: &str, down: bool) -> bool {
        let flag = match key {
            "ArrowLeft" | "a" | "A" => &mut self.left,
            "ArrowRight" | "d" | "D" => &mut self.right,
            "ArrowUp" | "w" | "W" => &mut self.up,
            "ArrowDown" | "s" | "S" => &mut self.down,
            " " | "Space" | "Spacebar" => &mut self.action,
            _ => return false,
        };
        *flag = down;
        true
    }

    /// -1, 0 or +1 along y (canvas y grows downward)
    pub fn vertical(&self) -> f32 {
        match (self.up, self.down) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

/// Coarse classification of a game phase, used by the host loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    /// Not started; only idle animation runs
    Idle,
    /// Simulation running
    Active,
    /// Countdown between levels/sections/turns
    Transient,
    /// Run over; waiting for the continue action
    Terminal,
}

/// A symbolic side effect emitted by an engine for the sound layer
pub trait GameEvent: Copy + fmt::Debug + PartialEq {
    /// Exact event name understood by the sound dispatcher
    fn name(&self) -> &'static str;
}

/// Payload handed back to the host when a run ends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub game: GameKind,
    pub score: u64,
    /// Game-specific hit count (animals defeated, bricks broken, polyps snipped, ...)
    pub hits: u32,
    pub elapsed_ms: f64,
    pub won: bool,
}

/// Common surface of the five engines, used by [`crate::session::Session`]
pub trait MiniGame: Clone + fmt::Debug + PartialEq + Serialize {
    type Event: GameEvent;

    const KIND: GameKind;

    /// Fresh instance in its ready phase
    fn new_game(seed: u64) -> Self;
    /// Leave the ready phase
    fn start(&self, now_ms: f64) -> Self;
    /// Advance one frame
    fn tick(&self, now_ms: f64) -> Self;
    /// The game's discrete primary action (shoot, serve, snip, throw)
    fn primary_action(&self) -> Self;
    /// Secondary action (reload); a no-op for games without one
    fn secondary_action(&self) -> Self {
        self.clone()
    }
    /// Held controls, written by the host between ticks
    fn controls_mut(&mut self) -> &mut Controls;
    /// Pointer position in canvas space (aim games only)
    fn set_pointer(&mut self, _x: f32, _y: f32) {}
    fn events(&self) -> &[Self::Event];
    fn frame_count(&self) -> u64;
    fn activity(&self) -> Activity;
    fn summary(&self) -> RunSummary;
}

/// Elapsed display time since `start_ms`, never negative
pub fn elapsed_since(start_ms: Option<f64>, now_ms: f64) -> f64 {
    start_ms.map(|start| (now_ms - start).max(0.0)).unwrap_or(0.0)
}

/// Count down a frame timer, returning true on the frame it reaches zero
#[inline]
pub fn countdown(timer: &mut u32) -> bool {
    if *timer == 0 {
        return false;
    }
    *timer -= 1;
    *timer == 0
}
