//! Polyp Sniper - snip polyps off a twisting colon wall

pub mod config;
pub mod state;
pub mod tick;

pub use state::{Polyp, PolypKind, PolypState, SniperEvent, SniperPhase, SniperState};
pub use tick::{aim_at, handle_snip, start, tick};

use crate::sim::{Activity, Controls, GameKind, MiniGame, RunSummary};

impl MiniGame for SniperState {
    type Event = SniperEvent;

    const KIND: GameKind = GameKind::PolypSniper;

    fn new_game(seed: u64) -> Self {
        SniperState::new(seed)
    }

    fn start(&self, now_ms: f64) -> Self {
        start(self, now_ms)
    }

    fn tick(&self, now_ms: f64) -> Self {
        tick(self, now_ms)
    }

    fn primary_action(&self) -> Self {
        handle_snip(self)
    }

    fn controls_mut(&mut self) -> &mut Controls {
        &mut self.input
    }

    fn set_pointer(&mut self, x: f32, y: f32) {
        aim_at(self, x, y);
    }

    fn events(&self) -> &[SniperEvent] {
        &self.events
    }

    fn frame_count(&self) -> u64 {
        self.frame_count
    }

    fn activity(&self) -> Activity {
        match self.phase {
            SniperPhase::Ready => Activity::Idle,
            SniperPhase::Playing => Activity::Active,
            SniperPhase::SectionClear => Activity::Transient,
            SniperPhase::GameOver | SniperPhase::Victory => Activity::Terminal,
        }
    }

    fn summary(&self) -> RunSummary {
        RunSummary {
            game: GameKind::PolypSniper,
            score: self.score,
            hits: self.polyps_snipped,
            elapsed_ms: self.elapsed_ms,
            won: self.phase == SniperPhase::Victory,
        }
    }
}
