//! Ice Breaker - brick breaker on a frozen lake

pub mod config;
pub mod state;
pub mod tick;

pub use state::{
    Ball, BallState, BreakerEvent, BreakerPhase, BreakerState, Brick, BrickState, Paddle, PowerUp,
    PowerUpKind,
};
pub use tick::{paddle_bounce_angle, serve_ball, start, tick};

use crate::sim::{Activity, Controls, GameKind, MiniGame, RunSummary};

impl MiniGame for BreakerState {
    type Event = BreakerEvent;

    const KIND: GameKind = GameKind::IceBreaker;

    fn new_game(seed: u64) -> Self {
        BreakerState::new(seed)
    }

    fn start(&self, now_ms: f64) -> Self {
        start(self, now_ms)
    }

    fn tick(&self, now_ms: f64) -> Self {
        tick(self, now_ms)
    }

    fn primary_action(&self) -> Self {
        serve_ball(self)
    }

    fn controls_mut(&mut self) -> &mut Controls {
        &mut self.input
    }

    fn events(&self) -> &[BreakerEvent] {
        &self.events
    }

    fn frame_count(&self) -> u64 {
        self.frame_count
    }

    fn activity(&self) -> Activity {
        match self.phase {
            BreakerPhase::Ready => Activity::Idle,
            BreakerPhase::Serving | BreakerPhase::Playing => Activity::Active,
            BreakerPhase::LevelUp => Activity::Transient,
            BreakerPhase::GameOver | BreakerPhase::Victory => Activity::Terminal,
        }
    }

    fn summary(&self) -> RunSummary {
        RunSummary {
            game: GameKind::IceBreaker,
            score: self.score,
            hits: self.bricks_broken,
            elapsed_ms: self.elapsed_ms,
            won: self.phase == BreakerPhase::Victory,
        }
    }
}
