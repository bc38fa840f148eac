//! Snowball Showdown game state

use std::f32::consts::PI;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::config::*;
use crate::sim::{Controls, GameEvent, SimRng};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnowballPhase {
    Ready,
    Playing,
    /// Short breather after a hit
    Switching,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Player,
    Opponent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThrowState {
    Flying,
    /// Landed; `timer` on the snowball counts the splat down
    Splat,
    Gone,
}

/// A thrown snowball, interpolated from `from` to `target` over FLIGHT_FRAMES
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snowball {
    pub id: u32,
    pub thrower: Side,
    pub from: Vec2,
    pub target: Vec2,
    /// Frames in flight
    pub age: u32,
    pub state: ThrowState,
    pub timer: u32,
}

impl Snowball {
    /// Normalized flight progress, 0..=1
    pub fn progress(&self) -> f32 {
        (self.age as f32 / FLIGHT_FRAMES as f32).min(1.0)
    }

    pub fn pos(&self) -> Vec2 {
        self.from.lerp(self.target, self.progress())
    }

    /// Per-frame velocity of the ground track
    pub fn vel(&self) -> Vec2 {
        (self.target - self.from) / FLIGHT_FRAMES as f32
    }

    /// Height above the ground track, for drawing only
    pub fn arc_offset(&self) -> f32 {
        (PI * self.progress()).sin() * ARC_HEIGHT
    }

    pub fn frames_to_impact(&self) -> u32 {
        FLIGHT_FRAMES.saturating_sub(self.age)
    }

    pub fn is_flying(&self) -> bool {
        self.state == ThrowState::Flying
    }
}

/// What the opponent is currently doing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpponentMode {
    Wander,
    Dodge,
    /// Stepped into the incoming shot
    Blunder,
    Freeze,
}

/// Opponent fighter and its AI scratch state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opponent {
    pub y: f32,
    pub target_y: f32,
    pub mode: OpponentMode,
    /// Set once per threat so the AI never re-commits mid-dodge
    pub dodge_decided: bool,
    pub wander_timer: u32,
    pub throw_timer: u32,
}

impl Opponent {
    pub fn at(y: f32) -> Self {
        Self {
            y,
            target_y: y,
            mode: OpponentMode::Wander,
            dodge_decided: false,
            wander_timer: 0,
            throw_timer: OPPONENT_THROW_MAX,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnowballEvent {
    Throw,
    OpponentThrow,
    OpponentHit,
    PlayerHit,
    Miss,
    Dodge,
    Victory,
    GameOver,
}

impl GameEvent for SnowballEvent {
    fn name(&self) -> &'static str {
        match self {
            SnowballEvent::Throw => "throw",
            SnowballEvent::OpponentThrow => "opponent_throw",
            SnowballEvent::OpponentHit => "opponent_hit",
            SnowballEvent::PlayerHit => "player_hit",
            SnowballEvent::Miss => "miss",
            SnowballEvent::Dodge => "dodge",
            SnowballEvent::Victory => "victory",
            SnowballEvent::GameOver => "game_over",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnowballState {
    pub rng: SimRng,
    pub phase: SnowballPhase,
    pub frame_count: u64,
    pub start_ms: Option<f64>,
    pub elapsed_ms: f64,
    pub input: Controls,
    pub player_y: f32,
    pub player_vy: f32,
    /// Pointer-chosen lane; keyboard input clears it
    pub aim_target: Option<f32>,
    pub opponent: Opponent,
    pub snowballs: Vec<Snowball>,
    pub throw_cooldown: u32,
    /// Player hits on the opponent
    pub player_hits: u32,
    /// Opponent hits on the player
    pub opponent_hits: u32,
    /// Consecutive player hits
    pub streak: u32,
    pub score: u64,
    pub throws: u32,
    pub switch_timer: u32,
    pub winner: Option<Side>,
    pub events: Vec<SnowballEvent>,
    next_id: u32,
}

impl SnowballState {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SimRng::new(seed),
            phase: SnowballPhase::Ready,
            frame_count: 0,
            start_ms: None,
            elapsed_ms: 0.0,
            input: Controls::default(),
            player_y: LANE_CENTER,
            player_vy: 0.0,
            aim_target: None,
            opponent: Opponent::at(LANE_CENTER),
            snowballs: Vec::new(),
            throw_cooldown: 0,
            player_hits: 0,
            opponent_hits: 0,
            streak: 0,
            score: 0,
            throws: 0,
            switch_timer: 0,
            winner: None,
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

    /// Throw a snowball from `thrower`'s column at lane `target_y` on the other side
    pub fn launch(&mut self, thrower: Side, target_y: f32) -> u32 {
        let id = self.next_entity_id();
        let (from, target) = match thrower {
            Side::Player => (
                Vec2::new(PLAYER_X, self.player_y),
                Vec2::new(OPPONENT_X, target_y),
            ),
            Side::Opponent => (
                Vec2::new(OPPONENT_X, self.opponent.y),
                Vec2::new(PLAYER_X, target_y),
            ),
        };
        self.snowballs.push(Snowball {
            id,
            thrower,
            from,
            target,
            age: 0,
            state: ThrowState::Flying,
            timer: 0,
        });
        id
    }

    /// Fresh AI state at the opponent's current spot, with a new throw delay
    pub(crate) fn reset_opponent(&mut self) {
        let mut opponent = Opponent::at(self.opponent.y);
        opponent.throw_timer = self
            .rng
            .range_u32(OPPONENT_THROW_MIN, OPPONENT_THROW_MAX);
        self.opponent = opponent;
    }
}
