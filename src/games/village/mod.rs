//! Defend the Village - first-person shooting gallery
//!
//! Wolves, boars and bears walk in from the horizon, growing as they approach.
//! Shoot them before they reach the fence; a boss closes out every level.

pub mod config;
pub mod state;
pub mod tick;

pub use state::{Animal, AnimalKind, AnimalState, VillageEvent, VillagePhase, VillageState};
pub use tick::{aim_at, handle_reload, handle_shoot, start, tick};

use crate::sim::{Activity, Controls, GameKind, MiniGame, RunSummary};

impl MiniGame for VillageState {
    type Event = VillageEvent;

    const KIND: GameKind = GameKind::Village;

    fn new_game(seed: u64) -> Self {
        VillageState::new(seed)
    }

    fn start(&self, now_ms: f64) -> Self {
        start(self, now_ms)
    }

    fn tick(&self, now_ms: f64) -> Self {
        tick(self, now_ms)
    }

    fn primary_action(&self) -> Self {
        handle_shoot(self)
    }

    fn secondary_action(&self) -> Self {
        handle_reload(self)
    }

    fn controls_mut(&mut self) -> &mut Controls {
        &mut self.input
    }

    fn set_pointer(&mut self, x: f32, y: f32) {
        aim_at(self, x, y);
    }

    fn events(&self) -> &[VillageEvent] {
        &self.events
    }

    fn frame_count(&self) -> u64 {
        self.frame_count
    }

    fn activity(&self) -> Activity {
        match self.phase {
            VillagePhase::Ready => Activity::Idle,
            VillagePhase::Playing => Activity::Active,
            VillagePhase::LevelUp => Activity::Transient,
            VillagePhase::GameOver | VillagePhase::Victory => Activity::Terminal,
        }
    }

    fn summary(&self) -> RunSummary {
        RunSummary {
            game: GameKind::Village,
            score: self.score,
            hits: self.animals_defeated,
            elapsed_ms: self.elapsed_ms,
            won: self.phase == VillagePhase::Victory,
        }
    }
}
