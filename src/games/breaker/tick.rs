//! Ice Breaker engine
//!
//! Ball physics are integrated once per frame. Each free ball resolves at most
//! one collision (wall, paddle or a single brick) per tick.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::Vec2;

use super::config::*;
use super::state::{
    BallState, BreakerEvent, BreakerPhase, BreakerState, BrickState, PowerUp, PowerUpKind,
    PowerUpState,
};
use crate::consts::CANVAS_HEIGHT;
use crate::sim::{Axis, countdown, direct_rate, elapsed_since};

/// Leave the title card; the first ball waits on the paddle
pub fn start(state: &BreakerState, now_ms: f64) -> BreakerState {
    if state.phase != BreakerPhase::Ready {
        return state.clone();
    }
    let mut next = state.clone();
    next.events.clear();
    next.phase = BreakerPhase::Serving;
    next.start_ms = Some(now_ms);
    next
}

/// Launch every attached ball (only while serving)
pub fn serve_ball(state: &BreakerState) -> BreakerState {
    if state.phase != BreakerPhase::Serving {
        return state.clone();
    }
    let mut next = state.clone();
    next.events.clear();
    let angle = -FRAC_PI_2 + next.rng.range(-SERVE_SPREAD, SERVE_SPREAD);
    let speed = next.ball_speed;
    for ball in next.balls.iter_mut() {
        ball.launch(angle, speed);
    }
    next.phase = BreakerPhase::Playing;
    next.events.push(BreakerEvent::Serve);
    next
}

/// Outgoing angle for a paddle strike at `hit_pos` (0 = left edge, 1 = right edge)
pub fn paddle_bounce_angle(hit_pos: f32) -> f32 {
    -(PADDLE_ANGLE_BASE * PI + hit_pos.clamp(0.0, 1.0) * PADDLE_ANGLE_SPAN * PI)
}

/// Advance the game state by one frame
pub fn tick(state: &BreakerState, now_ms: f64) -> BreakerState {
    let mut next = state.clone();
    next.events.clear();
    next.frame_count += 1;

    match next.phase {
        BreakerPhase::Ready | BreakerPhase::GameOver | BreakerPhase::Victory => {}
        BreakerPhase::LevelUp => {
            if countdown(&mut next.levelup_timer) {
                next.level += 1;
                next.ball_speed = level_ball_speed(next.level);
                next.build_level();
                next.reset_serve();
                log::debug!("breaker: level {} begins", next.level + 1);
            }
        }
        BreakerPhase::Serving => {
            next.elapsed_ms = elapsed_since(next.start_ms, now_ms);
            move_paddle(&mut next);
            decrement_timers(&mut next);
            // A brick still shattering when the last ball fell can finish the wall
            check_wall_cleared(&mut next);
        }
        BreakerPhase::Playing => {
            next.elapsed_ms = elapsed_since(next.start_ms, now_ms);
            move_paddle(&mut next);
            advance_balls(&mut next);
            advance_powerups(&mut next);
            decrement_timers(&mut next);
            next.balls.retain(|b| b.state != BallState::Lost);
            next.powerups.retain(|p| p.state == PowerUpState::Falling);
            check_end_of_play(&mut next);
        }
    }

    next
}

fn move_paddle(state: &mut BreakerState) {
    let max_x = FIELD_RIGHT - state.paddle.width;
    state.paddle.x = direct_rate(
        state.paddle.x,
        state.input.horizontal(),
        PADDLE_SPEED,
        0.0,
        max_x,
    );
    let paddle = state.paddle.clone();
    for ball in state.balls.iter_mut() {
        ball.update_attached(&paddle);
    }
}

fn advance_balls(state: &mut BreakerState) {
    let paddle = state.paddle.clone();
    let paddle_rect = paddle.rect();
    let mut broken_at: Vec<Vec2> = Vec::new();

    for ball in state.balls.iter_mut() {
        if !ball.is_free() {
            continue;
        }

        ball.pos += ball.vel;
        let r = ball.radius;

        // --- WALLS ---
        if ball.pos.x - r <= 0.0 && ball.vel.x < 0.0 {
            ball.pos.x = r;
            ball.vel.x = -ball.vel.x;
            state.events.push(BreakerEvent::Wall);
            continue;
        }
        if ball.pos.x + r >= FIELD_RIGHT && ball.vel.x > 0.0 {
            ball.pos.x = FIELD_RIGHT - r;
            ball.vel.x = -ball.vel.x;
            state.events.push(BreakerEvent::Wall);
            continue;
        }
        if ball.pos.y - r <= 0.0 && ball.vel.y < 0.0 {
            ball.pos.y = r;
            ball.vel.y = -ball.vel.y;
            state.events.push(BreakerEvent::Wall);
            continue;
        }
        if ball.pos.y - r > CANVAS_HEIGHT {
            ball.state = BallState::Lost;
            continue;
        }

        // --- PADDLE ---
        if ball.vel.y > 0.0 && ball.bounds().overlaps(&paddle_rect) {
            let hit_pos = (ball.pos.x - paddle.x) / paddle.width;
            let angle = paddle_bounce_angle(hit_pos);
            state.ball_speed = (state.ball_speed + BALL_SPEED_GAIN).min(BALL_MAX_SPEED);
            ball.vel = Vec2::new(angle.cos(), angle.sin()) * state.ball_speed;
            ball.pos.y = PADDLE_Y - r;
            state.combo.reset();
            state.events.push(BreakerEvent::Paddle);
            continue;
        }

        // --- BRICKS (first hit only) ---
        let ball_box = ball.bounds();
        for brick in state.bricks.iter_mut() {
            if !brick.is_solid() {
                continue;
            }
            let Some(pen) = brick.rect.penetration(&ball_box) else {
                continue;
            };

            match pen.axis {
                Axis::Horizontal => {
                    ball.vel.x = pen.push * ball.vel.x.abs();
                    ball.pos.x += pen.push * pen.depth;
                }
                Axis::Vertical => {
                    ball.vel.y = pen.push * ball.vel.y.abs();
                    ball.pos.y += pen.push * pen.depth;
                }
            }

            brick.hp = brick.hp.saturating_sub(1);
            if brick.hp == 0 {
                brick.state = BrickState::Breaking {
                    frames: BREAK_FRAMES,
                };
                state.score += state
                    .combo
                    .score_hit(BRICK_POINTS * brick.max_hp, COMBO_BONUS, 0);
                state.bricks_broken += 1;
                state.events.push(BreakerEvent::BrickBreak);
                broken_at.push(Vec2::new(
                    brick.rect.x + brick.rect.w / 2.0,
                    brick.rect.y + brick.rect.h / 2.0,
                ));
            } else {
                state.events.push(BreakerEvent::BrickHit);
            }
            break;
        }
    }

    for pos in broken_at {
        if state.rng.chance(POWERUP_CHANCE) {
            let kind = PowerUpKind::ALL[state.rng.weighted(&PowerUpKind::WEIGHTS)];
            let id = state.next_entity_id();
            state.powerups.push(PowerUp {
                id,
                kind,
                pos,
                state: PowerUpState::Falling,
            });
        }
    }
}

fn advance_powerups(state: &mut BreakerState) {
    let paddle_rect = state.paddle.rect();
    let mut collected = Vec::new();

    for powerup in state.powerups.iter_mut() {
        if powerup.state != PowerUpState::Falling {
            continue;
        }
        powerup.pos.y += POWERUP_FALL_SPEED;
        if powerup.bounds().overlaps(&paddle_rect) {
            powerup.state = PowerUpState::Collected;
            collected.push(powerup.kind);
        } else if powerup.pos.y - POWERUP_SIZE / 2.0 > CANVAS_HEIGHT {
            powerup.state = PowerUpState::Missed;
        }
    }

    for kind in collected {
        apply_powerup(state, kind);
        state.events.push(BreakerEvent::Powerup);
    }
}

fn apply_powerup(state: &mut BreakerState, kind: PowerUpKind) {
    match kind {
        PowerUpKind::Wide => {
            state.effects.wide_frames = WIDE_FRAMES;
            state.paddle.set_width(WIDE_PADDLE_WIDTH);
        }
        PowerUpKind::MultiBall => {
            let Some(source) = state.balls.iter().find(|b| b.is_free()).cloned() else {
                return;
            };
            for spread in [-MULTIBALL_SPREAD, MULTIBALL_SPREAD] {
                let id = state.next_entity_id();
                let mut ball = source.clone();
                ball.id = id;
                ball.vel = Vec2::from_angle(spread).rotate(source.vel);
                state.balls.push(ball);
            }
        }
        PowerUpKind::ExtraLife => {
            state.lives = (state.lives + 1).min(MAX_LIVES);
        }
    }
}

fn decrement_timers(state: &mut BreakerState) {
    for brick in state.bricks.iter_mut() {
        if let BrickState::Breaking { frames } = &mut brick.state {
            *frames = frames.saturating_sub(1);
        }
    }
    if countdown(&mut state.effects.wide_frames) {
        state.paddle.set_width(PADDLE_WIDTH);
    }
}

/// Drop finished bricks; LevelUp or Victory once none remain
fn check_wall_cleared(state: &mut BreakerState) -> bool {
    state
        .bricks
        .retain(|b| b.state != BrickState::Breaking { frames: 0 });
    if !state.bricks.is_empty() {
        return false;
    }

    if state.level + 1 >= LEVELS {
        state.phase = BreakerPhase::Victory;
        state.events.push(BreakerEvent::Victory);
        log::debug!("breaker: all walls cleared, score {}", state.score);
    } else {
        state.phase = BreakerPhase::LevelUp;
        state.levelup_timer = LEVELUP_FRAMES;
        state.events.push(BreakerEvent::LevelComplete);
    }
    true
}

fn check_end_of_play(state: &mut BreakerState) {
    // Clearing the wall wins over losing the last ball on the same frame
    if check_wall_cleared(state) {
        return;
    }

    if state.balls.is_empty() {
        state.lives = state.lives.saturating_sub(1);
        state.events.push(BreakerEvent::LifeLost);
        if state.lives == 0 {
            state.phase = BreakerPhase::GameOver;
            state.events.push(BreakerEvent::GameOver);
            log::debug!("breaker: out of balls, score {}", state.score);
        } else {
            state.reset_serve();
        }
    }
}
