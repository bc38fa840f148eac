//! Ice Breaker game state

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::config::*;
use crate::sim::{Aabb, Combo, Controls, GameEvent, SimRng};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakerPhase {
    Ready,
    /// Ball attached to paddle, waiting for serve
    Serving,
    Playing,
    /// Wall cleared, counting down to the next one
    LevelUp,
    GameOver,
    Victory,
}

/// Ball state - attached to paddle or free-moving
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BallState {
    /// Riding the paddle at a horizontal offset from its center
    Attached { offset: f32 },
    Free,
    /// Fell past the paddle
    Lost,
}

/// A ball entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub state: BallState,
}

impl Ball {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius: BALL_RADIUS,
            state: BallState::Attached { offset: 0.0 },
        }
    }

    /// Update attached ball position based on paddle
    pub fn update_attached(&mut self, paddle: &Paddle) {
        if let BallState::Attached { offset } = self.state {
            self.pos = Vec2::new(paddle.center() + offset, PADDLE_Y - self.radius - 1.0);
        }
    }

    /// Launch the ball from attached state
    pub fn launch(&mut self, angle: f32, speed: f32) {
        if let BallState::Attached { .. } = self.state {
            self.vel = Vec2::new(angle.cos(), angle.sin()) * speed;
            self.state = BallState::Free;
        }
    }

    pub fn is_free(&self) -> bool {
        self.state == BallState::Free
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::around_circle(self.pos, self.radius)
    }
}

/// The player's paddle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Left edge
    pub x: f32,
    pub width: f32,
}

impl Default for Paddle {
    fn default() -> Self {
        Self {
            x: (FIELD_RIGHT - PADDLE_WIDTH) / 2.0,
            width: PADDLE_WIDTH,
        }
    }
}

impl Paddle {
    pub fn center(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn rect(&self) -> Aabb {
        Aabb::new(self.x, PADDLE_Y, self.width, PADDLE_HEIGHT)
    }

    /// Resize around the current center, staying on the field
    pub fn set_width(&mut self, width: f32) {
        let center = self.center();
        self.width = width;
        self.x = (center - width / 2.0).clamp(0.0, FIELD_RIGHT - width);
    }
}

/// Brick lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrickState {
    Solid,
    /// Shattering; no longer collides, removed when `frames` reaches 0
    Breaking { frames: u32 },
}

/// A brick (identified by its position in the wall)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub rect: Aabb,
    pub hp: u32,
    pub max_hp: u32,
    pub state: BrickState,
}

impl Brick {
    pub fn new(rect: Aabb, hp: u32) -> Self {
        Self {
            rect,
            hp,
            max_hp: hp,
            state: BrickState::Solid,
        }
    }

    pub fn is_solid(&self) -> bool {
        self.state == BrickState::Solid
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerUpKind {
    Wide,
    MultiBall,
    ExtraLife,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [
        PowerUpKind::Wide,
        PowerUpKind::MultiBall,
        PowerUpKind::ExtraLife,
    ];
    /// Draw weights, same order as `ALL`
    pub const WEIGHTS: [f32; 3] = [45.0, 40.0, 15.0];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerUpState {
    Falling,
    Collected,
    Missed,
}

/// A falling power-up capsule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub state: PowerUpState,
}

impl PowerUp {
    pub fn bounds(&self) -> Aabb {
        Aabb::centered(self.pos.x, self.pos.y, POWERUP_SIZE, POWERUP_SIZE)
    }
}

/// Active power-up effects
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActiveEffects {
    pub wide_frames: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakerEvent {
    Serve,
    Paddle,
    Wall,
    BrickHit,
    BrickBreak,
    Powerup,
    LifeLost,
    LevelComplete,
    GameOver,
    Victory,
}

impl GameEvent for BreakerEvent {
    fn name(&self) -> &'static str {
        match self {
            BreakerEvent::Serve => "serve",
            BreakerEvent::Paddle => "paddle",
            BreakerEvent::Wall => "wall",
            BreakerEvent::BrickHit => "brick_hit",
            BreakerEvent::BrickBreak => "brick_break",
            BreakerEvent::Powerup => "powerup",
            BreakerEvent::LifeLost => "life_lost",
            BreakerEvent::LevelComplete => "level_complete",
            BreakerEvent::GameOver => "game_over",
            BreakerEvent::Victory => "victory",
        }
    }
}

/// Complete Ice Breaker state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakerState {
    pub rng: SimRng,
    pub phase: BreakerPhase,
    pub frame_count: u64,
    pub start_ms: Option<f64>,
    pub elapsed_ms: f64,
    /// 0-based level index
    pub level: u32,
    pub lives: u32,
    pub score: u64,
    /// Bricks broken since the last paddle touch
    pub combo: Combo,
    pub input: Controls,
    pub paddle: Paddle,
    /// Active balls (sorted by id)
    pub balls: Vec<Ball>,
    pub bricks: Vec<Brick>,
    pub powerups: Vec<PowerUp>,
    pub effects: ActiveEffects,
    /// Current ball speed (px/frame)
    pub ball_speed: f32,
    pub bricks_broken: u32,
    pub levelup_timer: u32,
    pub events: Vec<BreakerEvent>,
    next_id: u32,
}

impl BreakerState {
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            rng: SimRng::new(seed),
            phase: BreakerPhase::Ready,
            frame_count: 0,
            start_ms: None,
            elapsed_ms: 0.0,
            level: 0,
            lives: START_LIVES,
            score: 0,
            combo: Combo::default(),
            input: Controls::default(),
            paddle: Paddle::default(),
            balls: Vec::new(),
            bricks: Vec::new(),
            powerups: Vec::new(),
            effects: ActiveEffects::default(),
            ball_speed: level_ball_speed(0),
            bricks_broken: 0,
            levelup_timer: 0,
            events: Vec::new(),
            next_id: 1,
        };
        state.build_level();
        state.spawn_ball_attached();
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn a ball attached to the paddle
    pub fn spawn_ball_attached(&mut self) {
        let id = self.next_entity_id();
        let mut ball = Ball::new(id);
        ball.update_attached(&self.paddle);
        self.balls.push(ball);
    }

    /// Lay out the brick wall for the current level
    pub fn build_level(&mut self) {
        let rows = level_rows(self.level);
        self.bricks.clear();
        for row in 0..rows {
            for col in 0..BRICK_COLS {
                let x = BRICK_LEFT + col as f32 * (BRICK_WIDTH + BRICK_GAP);
                let y = BRICK_TOP + row as f32 * (BRICK_HEIGHT + BRICK_GAP);
                let hp = brick_hp(self.level, rows, row);
                self.bricks
                    .push(Brick::new(Aabb::new(x, y, BRICK_WIDTH, BRICK_HEIGHT), hp));
            }
        }
    }

    /// Back to serving with a single fresh ball; bricks stay as they are
    pub(crate) fn reset_serve(&mut self) {
        self.balls.clear();
        self.powerups.clear();
        self.effects = ActiveEffects::default();
        self.paddle.set_width(PADDLE_WIDTH);
        self.spawn_ball_attached();
        self.combo.reset();
        self.phase = BreakerPhase::Serving;
    }
}
