//! Slalom game state

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::config::*;
use crate::sim::{Aabb, Controls, GameEvent, SimRng, SpawnClock};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlalomPhase {
    Ready,
    Playing,
    /// Course section finished, next one loading
    SectionClear,
    GameOver,
    Victory,
}

/// Gate outcome; resolved gates never change again
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateState {
    Pending,
    Passed,
    Missed,
}

/// A pair of flags the skier must pass between
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    pub id: u32,
    /// Position in the section's course, from 0
    pub seq: u32,
    pub left_x: f32,
    pub right_x: f32,
    pub y: f32,
    pub state: GateState,
}

impl Gate {
    pub fn center(&self) -> f32 {
        (self.left_x + self.right_x) / 2.0
    }

    pub fn is_pending(&self) -> bool {
        self.state == GateState::Pending
    }

    pub fn contains_x(&self, x: f32) -> bool {
        x >= self.left_x && x <= self.right_x
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObstacleKind {
    Tree,
    Rock,
    Mogul,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 3] = [ObstacleKind::Tree, ObstacleKind::Rock, ObstacleKind::Mogul];

    /// Collision box (w, h)
    pub fn size(&self) -> Vec2 {
        match self {
            ObstacleKind::Tree => Vec2::new(24.0, 36.0),
            ObstacleKind::Rock => Vec2::new(30.0, 18.0),
            ObstacleKind::Mogul => Vec2::new(40.0, 12.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    /// Center
    pub pos: Vec2,
}

impl Obstacle {
    pub fn bounds(&self) -> Aabb {
        let size = self.kind.size();
        Aabb::centered(self.pos.x, self.pos.y, size.x, size.y)
    }
}

/// The computer-controlled skier racing the same course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rival {
    /// Screen position; y > SKIER_Y means the rival is ahead (further downhill)
    pub pos: Vec2,
    /// `seq` of the gate currently steered at
    pub next_gate: u32,
    /// Frames since the section began
    pub age: u32,
}

impl Default for Rival {
    fn default() -> Self {
        Self {
            pos: Vec2::new(RIVAL_START_X, SKIER_Y),
            next_gate: 0,
            age: 0,
        }
    }
}

impl Rival {
    pub fn is_ahead(&self) -> bool {
        self.pos.y > SKIER_Y
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlalomEvent {
    GatePass,
    GateMiss,
    Crash,
    RivalAhead,
    RivalBehind,
    RivalBeaten,
    SectionClear,
    GameOver,
    Victory,
}

impl GameEvent for SlalomEvent {
    fn name(&self) -> &'static str {
        match self {
            SlalomEvent::GatePass => "gate_pass",
            SlalomEvent::GateMiss => "gate_miss",
            SlalomEvent::Crash => "crash",
            SlalomEvent::RivalAhead => "rival_ahead",
            SlalomEvent::RivalBehind => "rival_behind",
            SlalomEvent::RivalBeaten => "rival_beaten",
            SlalomEvent::SectionClear => "section_clear",
            SlalomEvent::GameOver => "game_over",
            SlalomEvent::Victory => "victory",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlalomState {
    pub rng: SimRng,
    pub phase: SlalomPhase,
    pub frame_count: u64,
    pub start_ms: Option<f64>,
    pub elapsed_ms: f64,
    /// 0-based section index
    pub section: u32,
    pub input: Controls,
    pub skier_x: f32,
    pub skier_vx: f32,
    /// Downhill speed (px/frame); the world scrolls up by this much each frame
    pub speed: f32,
    pub gates: Vec<Gate>,
    pub obstacles: Vec<Obstacle>,
    pub gate_clock: SpawnClock,
    pub obstacle_clock: SpawnClock,
    /// Center of the most recently spawned gate
    pub last_gate_center: f32,
    pub rival: Rival,
    pub invuln_frames: u32,
    pub score: u64,
    pub gates_passed: u32,
    pub gates_missed: u32,
    pub crashes: u32,
    pub section_timer: u32,
    pub events: Vec<SlalomEvent>,
    next_id: u32,
    next_seq: u32,
}

impl SlalomState {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SimRng::new(seed),
            phase: SlalomPhase::Ready,
            frame_count: 0,
            start_ms: None,
            elapsed_ms: 0.0,
            section: 0,
            input: Controls::default(),
            skier_x: SKIER_START_X,
            skier_vx: 0.0,
            speed: base_speed(0),
            gates: Vec::new(),
            obstacles: Vec::new(),
            gate_clock: SpawnClock::default(),
            obstacle_clock: SpawnClock::default(),
            last_gate_center: SKIER_START_X,
            rival: Rival::default(),
            invuln_frames: 0,
            score: 0,
            gates_passed: 0,
            gates_missed: 0,
            crashes: 0,
            section_timer: 0,
            events: Vec::new(),
            next_id: 1,
            next_seq: 0,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn skier_bounds(&self) -> Aabb {
        Aabb::centered(self.skier_x, SKIER_Y, SKIER_WIDTH, SKIER_HEIGHT)
    }

    /// Add a pending gate; `seq` continues the section's course
    pub fn push_gate(&mut self, left_x: f32, right_x: f32, y: f32) -> u32 {
        let id = self.next_entity_id();
        let seq = self.next_seq;
        self.next_seq += 1;
        self.gates.push(Gate {
            id,
            seq,
            left_x,
            right_x,
            y,
            state: GateState::Pending,
        });
        id
    }

    pub fn push_obstacle(&mut self, kind: ObstacleKind, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.obstacles.push(Obstacle { id, kind, pos });
        id
    }

    pub fn pending_gates(&self) -> usize {
        self.gates.iter().filter(|g| g.is_pending()).count()
    }

    pub(crate) fn reset_section(&mut self) {
        self.gates.clear();
        self.obstacles.clear();
        self.gate_clock = SpawnClock::reset(self.frame_count);
        self.obstacle_clock = SpawnClock::reset(self.frame_count);
        self.skier_x = SKIER_START_X;
        self.skier_vx = 0.0;
        self.speed = base_speed(self.section);
        self.last_gate_center = SKIER_START_X;
        self.rival = Rival::default();
        self.invuln_frames = 0;
        self.next_seq = 0;
    }
}
