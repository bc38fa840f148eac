//! Polyp Sniper game state

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::config::{self, PolypStats, TUNNEL_CENTER};
use crate::polar_to_canvas;
use crate::sim::{Combo, Controls, GameEvent, SimRng, SpawnClock};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SniperPhase {
    Ready,
    Playing,
    /// Section finished, scope advancing
    SectionClear,
    GameOver,
    Victory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolypKind {
    Small,
    Medium,
    Large,
}

impl PolypKind {
    pub const ALL: [PolypKind; 3] = [PolypKind::Small, PolypKind::Medium, PolypKind::Large];

    pub fn stats(&self) -> PolypStats {
        match self {
            PolypKind::Small => config::SMALL,
            PolypKind::Medium => config::MEDIUM,
            PolypKind::Large => config::LARGE,
        }
    }
}

/// Polyp lifecycle; `timer` on the polyp counts down the current stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolypState {
    Growing,
    Active,
    /// Escaped un-snipped; shrinking back into the wall
    Retreating,
    Snipped,
    Gone,
}

/// A polyp on the tunnel wall, placed in polar coordinates around the tunnel center
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyp {
    pub id: u32,
    pub kind: PolypKind,
    pub angle: f32,
    pub radius: f32,
    /// Current visual radius
    pub size: f32,
    pub state: PolypState,
    pub timer: u32,
}

impl Polyp {
    pub fn pos(&self) -> Vec2 {
        polar_to_canvas(TUNNEL_CENTER, self.radius, self.angle)
    }

    /// Growing or active polyps can be snipped and count toward the live cap
    pub fn is_live(&self) -> bool {
        matches!(self.state, PolypState::Growing | PolypState::Active)
    }

    pub fn hit_radius(&self) -> f32 {
        self.size * config::HIT_RADIUS_MULT
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SniperEvent {
    Snip,
    PolypSnipped,
    Miss,
    PolypEscaped,
    Combo,
    SectionClear,
    GameOver,
    Victory,
}

impl GameEvent for SniperEvent {
    fn name(&self) -> &'static str {
        match self {
            SniperEvent::Snip => "snip",
            SniperEvent::PolypSnipped => "polyp_snipped",
            SniperEvent::Miss => "miss",
            SniperEvent::PolypEscaped => "polyp_escaped",
            SniperEvent::Combo => "combo",
            SniperEvent::SectionClear => "section_clear",
            SniperEvent::GameOver => "game_over",
            SniperEvent::Victory => "victory",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SniperState {
    pub rng: SimRng,
    pub phase: SniperPhase,
    pub frame_count: u64,
    pub start_ms: Option<f64>,
    pub elapsed_ms: f64,
    /// 0-based section index
    pub section: u32,
    /// Frame the current section began (warmup reference)
    pub section_start_frame: u64,
    pub input: Controls,
    pub reticle: Vec2,
    pub polyps: Vec<Polyp>,
    pub spawn: SpawnClock,
    pub snip_cooldown: u32,
    /// Misses plus escapes
    pub damage_count: u32,
    pub misses: u32,
    pub escapes: u32,
    pub score: u64,
    pub combo: Combo,
    pub polyps_snipped: u32,
    pub section_timer: u32,
    pub events: Vec<SniperEvent>,
    next_id: u32,
}

impl SniperState {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SimRng::new(seed),
            phase: SniperPhase::Ready,
            frame_count: 0,
            start_ms: None,
            elapsed_ms: 0.0,
            section: 0,
            section_start_frame: 0,
            input: Controls::default(),
            reticle: TUNNEL_CENTER,
            polyps: Vec::new(),
            spawn: SpawnClock::default(),
            snip_cooldown: 0,
            damage_count: 0,
            misses: 0,
            escapes: 0,
            score: 0,
            combo: Combo::default(),
            polyps_snipped: 0,
            section_timer: 0,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Place a fully grown, active polyp (used by spawning and by tests)
    pub fn spawn_polyp(&mut self, kind: PolypKind, angle: f32, radius: f32) -> u32 {
        let id = self.next_entity_id();
        let active_frames = config::section_params(self.section).active_frames;
        self.polyps.push(Polyp {
            id,
            kind,
            angle,
            radius,
            size: kind.stats().size,
            state: PolypState::Active,
            timer: active_frames,
        });
        id
    }

    pub fn live_polyps(&self) -> usize {
        self.polyps.iter().filter(|p| p.is_live()).count()
    }

    pub(crate) fn reset_section(&mut self) {
        self.polyps.clear();
        self.spawn = SpawnClock::reset(self.frame_count);
        self.section_start_frame = self.frame_count;
        self.snip_cooldown = 0;
        self.reticle = TUNNEL_CENTER;
        self.combo.reset();
    }
}
