//! Snowball Showdown engine: per-frame tick, the throw action and the opponent AI

use super::config::*;
use super::state::{OpponentMode, Side, SnowballEvent, SnowballPhase, SnowballState, ThrowState};
use crate::sim::{approach, countdown, elapsed_since};

/// Leave the title card and start the duel
pub fn start(state: &SnowballState, now_ms: f64) -> SnowballState {
    if state.phase != SnowballPhase::Ready {
        return state.clone();
    }
    let mut next = state.clone();
    next.events.clear();
    next.phase = SnowballPhase::Playing;
    next.start_ms = Some(now_ms);
    next.reset_opponent();
    log::debug!("snowball: duel started (seed {})", next.rng.seed());
    next
}

/// Advance the duel by one frame
pub fn tick(state: &SnowballState, now_ms: f64) -> SnowballState {
    let mut next = state.clone();
    next.events.clear();
    next.frame_count += 1;

    match next.phase {
        SnowballPhase::Ready | SnowballPhase::GameOver => {}
        SnowballPhase::Switching => {
            if countdown(&mut next.switch_timer) {
                next.phase = SnowballPhase::Playing;
            }
        }
        SnowballPhase::Playing => {
            next.elapsed_ms = elapsed_since(next.start_ms, now_ms);
            move_player(&mut next);
            update_opponent(&mut next);
            let hit = advance_snowballs(&mut next);
            next.throw_cooldown = next.throw_cooldown.saturating_sub(1);
            next.snowballs.retain(|s| s.state != ThrowState::Gone);
            if hit {
                check_match(&mut next);
            }
        }
    }

    next
}

/// Throw at the lane the player is standing in
///
/// No-op (unchanged state) outside `Playing` or during the cooldown.
pub fn handle_player_throw(state: &SnowballState) -> SnowballState {
    if state.phase != SnowballPhase::Playing || state.throw_cooldown > 0 {
        return state.clone();
    }
    let mut next = state.clone();
    next.events.clear();
    next.throw_cooldown = THROW_COOLDOWN;
    next.throws += 1;
    let lane = next.player_y;
    next.launch(Side::Player, lane);
    next.events.push(SnowballEvent::Throw);
    next
}

/// Pointer lane choice, already mapped into canvas space by the host
pub fn aim_at(state: &mut SnowballState, y: f32) {
    if !y.is_finite() {
        return;
    }
    state.aim_target = Some(y.clamp(LANE_MIN, LANE_MAX));
}

fn move_player(state: &mut SnowballState) {
    let held = state.input.vertical();
    let dir = if held != 0.0 {
        state.aim_target = None;
        held
    } else if let Some(target) = state.aim_target {
        let diff = target - state.player_y;
        if diff.abs() <= AIM_DEADBAND {
            0.0
        } else {
            diff.signum()
        }
    } else {
        0.0
    };
    let (y, vy) = AIM.step(state.player_y, state.player_vy, dir);
    state.player_y = y;
    state.player_vy = vy;
}

/// Reactive dodge AI plus the opponent's own throwing rhythm
fn update_opponent(state: &mut SnowballState) {
    let threat = state
        .snowballs
        .iter()
        .filter(|s| s.is_flying() && s.thrower == Side::Player)
        .filter(|s| s.frames_to_impact() <= THREAT_FRAMES)
        .min_by_key(|s| s.frames_to_impact())
        .map(|s| s.pos().y + s.vel().y * s.frames_to_impact() as f32);

    match threat {
        Some(predicted) if !state.opponent.dodge_decided => commit_to_threat(state, predicted),
        Some(_) => {}
        None if state.opponent.dodge_decided => {
            // Threat resolved; back to wandering with a fresh target
            state.opponent.dodge_decided = false;
            state.opponent.mode = OpponentMode::Wander;
            state.opponent.wander_timer = 0;
        }
        None => {}
    }

    if state.opponent.mode == OpponentMode::Wander {
        if state.opponent.wander_timer == 0 {
            state.opponent.target_y = wander_target(state);
            state.opponent.wander_timer = state.rng.range_u32(WANDER_MIN_FRAMES, WANDER_MAX_FRAMES);
        } else {
            state.opponent.wander_timer -= 1;
        }
    }

    let speed = match state.opponent.mode {
        OpponentMode::Wander => WANDER_SPEED,
        OpponentMode::Dodge | OpponentMode::Blunder => DODGE_SPEED,
        OpponentMode::Freeze => 0.0,
    };
    let opponent = &mut state.opponent;
    opponent.y = approach(opponent.y, opponent.target_y, speed).clamp(LANE_MIN, LANE_MAX);

    if countdown(&mut state.opponent.throw_timer) {
        let spread = state.rng.range(-OPPONENT_AIM_SPREAD, OPPONENT_AIM_SPREAD);
        let target_y = (state.player_y + spread).clamp(LANE_MIN, LANE_MAX);
        state.launch(Side::Opponent, target_y);
        state.opponent.throw_timer = state.rng.range_u32(OPPONENT_THROW_MIN, OPPONENT_THROW_MAX);
        state.events.push(SnowballEvent::OpponentThrow);
    }
}

/// One-time reaction to an incoming shot predicted to land at `predicted`
fn commit_to_threat(state: &mut SnowballState, predicted: f32) {
    let roll = state.rng.unit();
    let dodge = dodge_chance(state.player_hits);
    let opponent = &mut state.opponent;
    opponent.dodge_decided = true;

    if roll < dodge {
        let away = if opponent.y >= predicted { 1.0 } else { -1.0 };
        let mut target = predicted + away * DODGE_DISTANCE;
        if !(LANE_MIN..=LANE_MAX).contains(&target) {
            target = predicted - away * DODGE_DISTANCE;
        }
        opponent.target_y = target.clamp(LANE_MIN, LANE_MAX);
        opponent.mode = OpponentMode::Dodge;
        state.events.push(SnowballEvent::Dodge);
    } else if roll < dodge + BLUNDER_CHANCE {
        opponent.target_y = predicted.clamp(LANE_MIN, LANE_MAX);
        opponent.mode = OpponentMode::Blunder;
    } else {
        opponent.target_y = opponent.y;
        opponent.mode = OpponentMode::Freeze;
    }
}

/// Random lane, crossing back over the middle once drifted too far out
fn wander_target(state: &mut SnowballState) -> f32 {
    let offset = state.opponent.y - LANE_CENTER;
    if offset.abs() > WANDER_CROSS_DISTANCE {
        let depth = state.rng.range(WANDER_CROSS_MIN, WANDER_CROSS_MAX);
        LANE_CENTER - offset.signum() * depth
    } else {
        state.rng.range(LANE_MIN, LANE_MAX)
    }
}

/// Fly and resolve snowballs; returns true if anyone was hit
fn advance_snowballs(state: &mut SnowballState) -> bool {
    let mut hit = false;

    for snowball in state.snowballs.iter_mut() {
        match snowball.state {
            ThrowState::Flying => {
                snowball.age += 1;
                if snowball.age < FLIGHT_FRAMES {
                    continue;
                }
                // Judged against where the defender is now, not where it was at release
                let defender_y = match snowball.thrower {
                    Side::Player => state.opponent.y,
                    Side::Opponent => state.player_y,
                };
                let landed = (defender_y - snowball.target.y).abs() <= HIT_TOLERANCE;
                match (snowball.thrower, landed) {
                    (Side::Player, true) => {
                        state.player_hits += 1;
                        state.score += hit_score(state.streak);
                        state.streak += 1;
                        state.events.push(SnowballEvent::OpponentHit);
                    }
                    (Side::Opponent, true) => {
                        state.opponent_hits += 1;
                        state.streak = 0;
                        state.events.push(SnowballEvent::PlayerHit);
                    }
                    (Side::Player, false) => {
                        state.streak = 0;
                        state.events.push(SnowballEvent::Miss);
                    }
                    (Side::Opponent, false) => {
                        state.events.push(SnowballEvent::Miss);
                    }
                }
                hit |= landed;
                snowball.state = ThrowState::Splat;
                snowball.timer = SPLAT_FRAMES;
            }
            ThrowState::Splat => {
                if countdown(&mut snowball.timer) {
                    snowball.state = ThrowState::Gone;
                }
            }
            ThrowState::Gone => {}
        }
    }

    hit
}

fn check_match(state: &mut SnowballState) {
    if state.player_hits >= HITS_TO_WIN {
        state.phase = SnowballPhase::GameOver;
        state.winner = Some(Side::Player);
        state.events.push(SnowballEvent::Victory);
        log::debug!("snowball: player wins, score {}", state.score);
    } else if state.opponent_hits >= HITS_TO_WIN {
        state.phase = SnowballPhase::GameOver;
        state.winner = Some(Side::Opponent);
        state.events.push(SnowballEvent::GameOver);
        log::debug!("snowball: opponent wins at frame {}", state.frame_count);
    } else {
        // The field is frozen and empty for the breather
        state.snowballs.clear();
        state.reset_opponent();
        state.switch_timer = SWITCH_FRAMES;
        state.phase = SnowballPhase::Switching;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing(seed: u64) -> SnowballState {
        start(&SnowballState::new(seed), 0.0)
    }

    /// Player snowball one frame from impact, aimed at the opponent's lane
    fn about_to_land(state: &mut SnowballState, target_y: f32) {
        state.launch(Side::Player, target_y);
        if let Some(ball) = state.snowballs.last_mut() {
            ball.age = FLIGHT_FRAMES - 1;
        }
    }

    #[test]
    fn test_start_enters_playing() {
        let state = SnowballState::new(1);
        let next = start(&state, 10.0);
        assert_eq!(next.phase, SnowballPhase::Playing);
        assert!(next.opponent.throw_timer >= OPPONENT_THROW_MIN);
        assert!(next.opponent.throw_timer <= OPPONENT_THROW_MAX);
        assert_eq!(start(&next, 20.0), next);
    }

    #[test]
    fn test_throw_and_cooldown() {
        let state = playing(2);
        let next = handle_player_throw(&state);
        assert_eq!(next.snowballs.len(), 1);
        assert_eq!(next.throw_cooldown, THROW_COOLDOWN);
        assert_eq!(next.events, vec![SnowballEvent::Throw]);
        assert_eq!(next.snowballs[0].target.y, state.player_y);
        // Cooling down
        assert_eq!(handle_player_throw(&next), next);
    }

    #[test]
    fn test_flight_is_linear_with_arc() {
        let mut state = playing(3);
        state.launch(Side::Player, 300.0);
        let ball = &mut state.snowballs[0];
        ball.age = FLIGHT_FRAMES / 2;
        assert!((ball.pos().x - (PLAYER_X + OPPONENT_X) / 2.0).abs() < 1e-3);
        assert!((ball.arc_offset() - ARC_HEIGHT).abs() < 1e-3);
        ball.age = FLIGHT_FRAMES;
        assert!(ball.arc_offset().abs() < 1e-3);
    }

    #[test]
    fn test_player_hit_scores_with_streak() {
        let mut state = playing(4);
        state.streak = 2;
        let lane = state.opponent.y;
        about_to_land(&mut state, lane);
        let next = tick(&state, 0.0);
        assert_eq!(next.player_hits, 1);
        assert_eq!(next.score, 200);
        assert_eq!(next.streak, 3);
        assert!(next.events.contains(&SnowballEvent::OpponentHit));
        assert_eq!(next.phase, SnowballPhase::Switching);
    }

    #[test]
    fn test_defender_can_step_out_of_the_way() {
        let mut state = playing(5);
        state.streak = 2;
        state.opponent.y = LANE_MAX;
        state.opponent.target_y = LANE_MAX;
        about_to_land(&mut state, LANE_MIN);
        let next = tick(&state, 0.0);
        assert_eq!(next.player_hits, 0);
        assert_eq!(next.streak, 0);
        assert!(next.events.contains(&SnowballEvent::Miss));
        assert_eq!(next.snowballs[0].state, ThrowState::Splat);
    }

    #[test]
    fn test_opponent_hit_resets_streak() {
        let mut state = playing(6);
        state.streak = 3;
        let lane = state.player_y;
        state.launch(Side::Opponent, lane);
        state.snowballs[0].age = FLIGHT_FRAMES - 1;
        let next = tick(&state, 0.0);
        assert_eq!(next.opponent_hits, 1);
        assert_eq!(next.streak, 0);
        assert!(next.events.contains(&SnowballEvent::PlayerHit));
    }

    #[test]
    fn test_fifth_hit_wins() {
        let mut state = playing(7);
        state.player_hits = HITS_TO_WIN - 1;
        let lane = state.opponent.y;
        about_to_land(&mut state, lane);
        let next = tick(&state, 0.0);
        assert_eq!(next.player_hits, HITS_TO_WIN);
        assert_eq!(next.phase, SnowballPhase::GameOver);
        assert_eq!(next.winner, Some(Side::Player));
        assert!(next.events.contains(&SnowballEvent::Victory));
        assert_eq!(handle_player_throw(&next), next);
    }

    #[test]
    fn test_fifth_hit_taken_loses() {
        let mut state = playing(8);
        state.opponent_hits = HITS_TO_WIN - 1;
        let lane = state.player_y;
        state.launch(Side::Opponent, lane);
        state.snowballs[0].age = FLIGHT_FRAMES - 1;
        let next = tick(&state, 0.0);
        assert_eq!(next.winner, Some(Side::Opponent));
        assert!(next.events.contains(&SnowballEvent::GameOver));
    }

    #[test]
    fn test_switching_pauses_then_resumes() {
        let mut state = playing(9);
        let lane = state.opponent.y;
        about_to_land(&mut state, lane);
        state.launch(Side::Opponent, 200.0);
        state = tick(&state, 0.0);
        assert_eq!(state.phase, SnowballPhase::Switching);
        assert!(state.snowballs.is_empty());
        assert!(!state.opponent.dodge_decided);

        assert_eq!(handle_player_throw(&state), state);
        let frozen = state.clone();
        state.input.up = true;
        for i in 0..SWITCH_FRAMES {
            state = tick(&state, 1e6);
            if i + 1 < SWITCH_FRAMES {
                // Nothing but the countdown moves
                assert_eq!(state.player_y, frozen.player_y);
                assert_eq!(state.opponent, frozen.opponent);
                assert_eq!(state.elapsed_ms, frozen.elapsed_ms);
                assert!(state.events.is_empty());
            }
        }
        assert_eq!(state.phase, SnowballPhase::Playing);
        assert!(state.snowballs.is_empty());
    }

    #[test]
    fn test_opponent_commits_once_per_threat() {
        let mut state = playing(10);
        let lane = state.opponent.y;
        state.launch(Side::Player, lane);
        state.snowballs[0].age = FLIGHT_FRAMES - THREAT_FRAMES;

        state = tick(&state, 0.0);
        assert!(state.opponent.dodge_decided);
        let mode = state.opponent.mode;
        assert_ne!(mode, OpponentMode::Wander);
        let target = state.opponent.target_y;

        for _ in 0..5 {
            state = tick(&state, 0.0);
            assert_eq!(state.opponent.mode, mode);
            assert_eq!(state.opponent.target_y, target);
            assert!(!state.events.contains(&SnowballEvent::Dodge));
        }
    }

    #[test]
    fn test_dodge_moves_away_at_limited_rate() {
        // Find a seed whose first commit is a dodge
        let mut dodged = false;
        for seed in 0..64 {
            let mut state = playing(seed);
            state.opponent.y = 300.0;
            state.opponent.target_y = 300.0;
            state.launch(Side::Player, 310.0);
            state.snowballs[0].age = FLIGHT_FRAMES - THREAT_FRAMES;
            let next = tick(&state, 0.0);
            if next.opponent.mode != OpponentMode::Dodge {
                continue;
            }
            dodged = true;
            assert!(next.events.contains(&SnowballEvent::Dodge));
            assert!((next.opponent.target_y - (310.0 - DODGE_DISTANCE)).abs() < 1e-3);
            assert_eq!(next.opponent.y, 300.0 - DODGE_SPEED);
            break;
        }
        assert!(dodged);
    }

    #[test]
    fn test_wander_crosses_back_from_edge() {
        let mut state = playing(11);
        state.opponent.y = LANE_MAX;
        state.opponent.wander_timer = 0;
        let next = tick(&state, 0.0);
        assert!(next.opponent.target_y < LANE_CENTER);
        assert!(next.opponent.wander_timer >= WANDER_MIN_FRAMES);
        assert!(next.opponent.wander_timer <= WANDER_MAX_FRAMES);
        assert_eq!(next.opponent.y, LANE_MAX - WANDER_SPEED);
    }

    #[test]
    fn test_opponent_throws_on_timer() {
        let mut state = playing(12);
        state.opponent.throw_timer = 1;
        let next = tick(&state, 0.0);
        assert!(next.events.contains(&SnowballEvent::OpponentThrow));
        let ball = &next.snowballs[0];
        assert_eq!(ball.thrower, Side::Opponent);
        assert!((ball.target.y - state.player_y).abs() <= OPPONENT_AIM_SPREAD);
        assert!(next.opponent.throw_timer >= OPPONENT_THROW_MIN);
    }

    #[test]
    fn test_pointer_aim_overridden_by_keys() {
        let mut state = playing(13);
        aim_at(&mut state, 200.0);
        for _ in 0..120 {
            state = tick(&state, 0.0);
        }
        assert!((state.player_y - 200.0).abs() <= 20.0);

        state.input.down = true;
        state = tick(&state, 0.0);
        assert_eq!(state.aim_target, None);
    }

    #[test]
    fn test_non_finite_pointer_ignored() {
        let mut state = playing(13);
        aim_at(&mut state, f32::NAN);
        assert_eq!(state.aim_target, None);
        aim_at(&mut state, 200.0);
        aim_at(&mut state, f32::INFINITY);
        assert_eq!(state.aim_target, Some(200.0));
        state = tick(&state, 0.0);
        assert!(state.player_y.is_finite());
    }
}
