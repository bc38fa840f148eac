//! Snowball Showdown - lane duel against a dodging opponent

pub mod config;
pub mod state;
pub mod tick;

pub use state::{
    Opponent, OpponentMode, Side, Snowball, SnowballEvent, SnowballPhase, SnowballState,
    ThrowState,
};
pub use tick::{aim_at, handle_player_throw, start, tick};

use crate::sim::{Activity, Controls, GameKind, MiniGame, RunSummary};

impl MiniGame for SnowballState {
    type Event = SnowballEvent;

    const KIND: GameKind = GameKind::Snowball;

    fn new_game(seed: u64) -> Self {
        SnowballState::new(seed)
    }

    fn start(&self, now_ms: f64) -> Self {
        start(self, now_ms)
    }

    fn tick(&self, now_ms: f64) -> Self {
        tick(self, now_ms)
    }

    fn primary_action(&self) -> Self {
        handle_player_throw(self)
    }

    fn controls_mut(&mut self) -> &mut Controls {
        &mut self.input
    }

    /// Only the lane matters; the column is fixed
    fn set_pointer(&mut self, _x: f32, y: f32) {
        aim_at(self, y);
    }

    fn events(&self) -> &[SnowballEvent] {
        &self.events
    }

    fn frame_count(&self) -> u64 {
        self.frame_count
    }

    fn activity(&self) -> Activity {
        match self.phase {
            SnowballPhase::Ready => Activity::Idle,
            SnowballPhase::Playing => Activity::Active,
            SnowballPhase::Switching => Activity::Transient,
            SnowballPhase::GameOver => Activity::Terminal,
        }
    }

    fn summary(&self) -> RunSummary {
        RunSummary {
            game: GameKind::Snowball,
            score: self.score,
            hits: self.player_hits,
            elapsed_ms: self.elapsed_ms,
            won: self.winner == Some(Side::Player),
        }
    }
}
