//! Slalom - downhill gates race against a rival skier

pub mod config;
pub mod state;
pub mod tick;

pub use state::{
    Gate, GateState, Obstacle, ObstacleKind, Rival, SlalomEvent, SlalomPhase, SlalomState,
};
pub use tick::{start, tick};

use crate::sim::{Activity, Controls, GameKind, MiniGame, RunSummary};

impl MiniGame for SlalomState {
    type Event = SlalomEvent;

    const KIND: GameKind = GameKind::Slalom;

    fn new_game(seed: u64) -> Self {
        SlalomState::new(seed)
    }

    fn start(&self, now_ms: f64) -> Self {
        start(self, now_ms)
    }

    fn tick(&self, now_ms: f64) -> Self {
        tick(self, now_ms)
    }

    /// Steering only; there is no discrete action on the slope
    fn primary_action(&self) -> Self {
        self.clone()
    }

    fn controls_mut(&mut self) -> &mut Controls {
        &mut self.input
    }

    fn events(&self) -> &[SlalomEvent] {
        &self.events
    }

    fn frame_count(&self) -> u64 {
        self.frame_count
    }

    fn activity(&self) -> Activity {
        match self.phase {
            SlalomPhase::Ready => Activity::Idle,
            SlalomPhase::Playing => Activity::Active,
            SlalomPhase::SectionClear => Activity::Transient,
            SlalomPhase::GameOver | SlalomPhase::Victory => Activity::Terminal,
        }
    }

    fn summary(&self) -> RunSummary {
        RunSummary {
            game: GameKind::Slalom,
            score: self.score,
            hits: self.gates_passed,
            elapsed_ms: self.elapsed_ms,
            won: self.phase == SlalomPhase::Victory,
        }
    }
}
