//! Defend-the-Village game state

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::config::{self, AnimalStats};
use crate::sim::{Combo, Controls, GameEvent, SimRng, SpawnClock};

/// Current phase of a defense run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VillagePhase {
    /// Title card, waiting for start
    Ready,
    Playing,
    /// Level cleared, counting down to the next one
    LevelUp,
    /// Village overrun
    GameOver,
    /// Every level cleared
    Victory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimalKind {
    Wolf,
    Boar,
    Bear,
    Boss,
}

impl AnimalKind {
    pub const REGULAR: [AnimalKind; 3] = [AnimalKind::Wolf, AnimalKind::Boar, AnimalKind::Bear];

    pub fn stats(&self) -> AnimalStats {
        match self {
            AnimalKind::Wolf => config::WOLF,
            AnimalKind::Boar => config::BOAR,
            AnimalKind::Bear => config::BEAR,
            AnimalKind::Boss => config::BOSS,
        }
    }

    /// Cry emitted when this animal is driven off
    pub fn defeat_event(&self) -> VillageEvent {
        match self {
            AnimalKind::Wolf => VillageEvent::WolfWhimper,
            AnimalKind::Boar => VillageEvent::BoarSqueal,
            AnimalKind::Bear => VillageEvent::BearGrowl,
            AnimalKind::Boss => VillageEvent::BossDefeated,
        }
    }
}

/// Per-animal lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimalState {
    Approaching,
    /// Defeated; running back to the horizon
    Retreating,
    Gone,
}

/// An animal walking toward the village
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animal {
    pub id: u32,
    pub kind: AnimalKind,
    pub pos: Vec2,
    /// Depth scale (small at the horizon, 1.0 at the fence)
    pub scale: f32,
    pub hp: u32,
    pub max_hp: u32,
    /// Lateral drift per frame
    pub drift: f32,
    pub state: AnimalState,
    /// Frames of hit flash left (render only)
    pub flash: u32,
}

impl Animal {
    pub fn is_approaching(&self) -> bool {
        self.state == AnimalState::Approaching
    }

    /// Radius within which a shot lands
    pub fn hit_radius(&self) -> f32 {
        self.kind.stats().radius * self.scale * config::HIT_RADIUS_MULT
    }
}

/// Symbolic side effects for the sound layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VillageEvent {
    Shoot,
    Hit,
    Miss,
    Reload,
    ReloadDone,
    WolfWhimper,
    BoarSqueal,
    BearGrowl,
    BossRoar,
    BossHit,
    BossDefeated,
    Breach,
    LevelComplete,
    GameOver,
    Victory,
}

impl GameEvent for VillageEvent {
    fn name(&self) -> &'static str {
        match self {
            VillageEvent::Shoot => "shoot",
            VillageEvent::Hit => "hit",
            VillageEvent::Miss => "miss",
            VillageEvent::Reload => "reload",
            VillageEvent::ReloadDone => "reload_done",
            VillageEvent::WolfWhimper => "wolf_whimper",
            VillageEvent::BoarSqueal => "boar_squeal",
            VillageEvent::BearGrowl => "bear_growl",
            VillageEvent::BossRoar => "boss_roar",
            VillageEvent::BossHit => "boss_hit",
            VillageEvent::BossDefeated => "boss_defeated",
            VillageEvent::Breach => "breach",
            VillageEvent::LevelComplete => "level_complete",
            VillageEvent::GameOver => "game_over",
            VillageEvent::Victory => "victory",
        }
    }
}

/// Complete defense state (value type; engines return fresh copies)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VillageState {
    pub rng: SimRng,
    pub phase: VillagePhase,
    pub frame_count: u64,
    /// Wall-clock start, set by `start`
    pub start_ms: Option<f64>,
    /// Display-only elapsed time
    pub elapsed_ms: f64,
    /// 0-based level index
    pub level: u32,
    pub input: Controls,
    pub reticle: Vec2,
    pub animals: Vec<Animal>,
    /// Regular-animal spawn schedule for the current level
    pub spawn: SpawnClock,
    pub boss_spawned: bool,
    pub ammo: u32,
    /// Frames until the magazine is full again (0 = not reloading)
    pub reload_timer: u32,
    pub shot_cooldown: u32,
    pub village_hp: u32,
    pub score: u64,
    pub combo: Combo,
    pub animals_defeated: u32,
    pub shots_fired: u32,
    pub shots_missed: u32,
    pub breaches: u32,
    pub levelup_timer: u32,
    /// Events produced by the most recent call only
    pub events: Vec<VillageEvent>,
    next_id: u32,
}

impl VillageState {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SimRng::new(seed),
            phase: VillagePhase::Ready,
            frame_count: 0,
            start_ms: None,
            elapsed_ms: 0.0,
            level: 0,
            input: Controls::default(),
            reticle: default_reticle(),
            animals: Vec::new(),
            spawn: SpawnClock::default(),
            boss_spawned: false,
            ammo: config::MAX_AMMO,
            reload_timer: 0,
            shot_cooldown: 0,
            village_hp: config::VILLAGE_HP,
            score: 0,
            combo: Combo::default(),
            animals_defeated: 0,
            shots_fired: 0,
            shots_missed: 0,
            breaches: 0,
            levelup_timer: 0,
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

    /// Put an animal on the field at `pos`, full health, no drift
    pub fn spawn_animal(&mut self, kind: AnimalKind, pos: Vec2) -> u32 {
        let hp = match kind {
            AnimalKind::Boss => config::level_params(self.level).boss_hp,
            _ => kind.stats().hp,
        };
        let id = self.next_entity_id();
        self.animals.push(Animal {
            id,
            kind,
            pos,
            scale: config::scale_at(pos.y),
            hp,
            max_hp: hp,
            drift: 0.0,
            state: AnimalState::Approaching,
            flash: 0,
        });
        id
    }

    /// Approaching animals other than the boss
    pub fn approaching_regulars(&self) -> usize {
        self.animals
            .iter()
            .filter(|a| a.is_approaching() && a.kind != AnimalKind::Boss)
            .count()
    }

    pub fn is_reloading(&self) -> bool {
        self.reload_timer > 0
    }

    /// Clear the field for a new level
    pub(crate) fn reset_level(&mut self) {
        self.animals.clear();
        self.spawn = SpawnClock::reset(self.frame_count);
        self.boss_spawned = false;
        self.ammo = config::MAX_AMMO;
        self.reload_timer = 0;
        self.shot_cooldown = 0;
        self.reticle = default_reticle();
        self.combo.reset();
    }
}

fn default_reticle() -> Vec2 {
    Vec2::new(240.0, 360.0)
}
