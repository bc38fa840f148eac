//! Slalom engine: per-frame tick
//!
//! The skier holds a fixed screen row while gates and obstacles scroll up at
//! the current downhill speed. A gate is judged once, on the frame it scrolls
//! past the skier's row.

use glam::Vec2;

use super::config::*;
use super::state::{Gate, GateState, ObstacleKind, SlalomEvent, SlalomPhase, SlalomState};
use crate::sim::{Aabb, approach, countdown, elapsed_since, spawn_interval};

/// Leave the title card and push off
pub fn start(state: &SlalomState, now_ms: f64) -> SlalomState {
    if state.phase != SlalomPhase::Ready {
        return state.clone();
    }
    let mut next = state.clone();
    next.events.clear();
    next.phase = SlalomPhase::Playing;
    next.start_ms = Some(now_ms);
    next.reset_section();
    log::debug!("slalom: run started (seed {})", next.rng.seed());
    next
}

/// Advance the run by one frame
pub fn tick(state: &SlalomState, now_ms: f64) -> SlalomState {
    let mut next = state.clone();
    next.events.clear();
    next.frame_count += 1;

    match next.phase {
        SlalomPhase::Ready | SlalomPhase::GameOver | SlalomPhase::Victory => {}
        SlalomPhase::SectionClear => {
            if countdown(&mut next.section_timer) {
                next.section += 1;
                next.reset_section();
                next.phase = SlalomPhase::Playing;
                log::debug!("slalom: section {} begins", next.section + 1);
            }
        }
        SlalomPhase::Playing => {
            next.elapsed_ms = elapsed_since(next.start_ms, now_ms);
            move_skier(&mut next);
            spawn_gates(&mut next);
            spawn_obstacles(&mut next);
            steer_rival(&mut next);
            scroll_world(&mut next);
            resolve_gates(&mut next);
            check_crash(&mut next);
            next.invuln_frames = next.invuln_frames.saturating_sub(1);
            next.rival.age = next.rival.age.saturating_add(1);
            next.gates.retain(|g| g.is_pending() || g.y >= DESPAWN_Y);
            next.obstacles.retain(|o| o.pos.y >= DESPAWN_Y);
            check_end_of_section(&mut next);
        }
    }

    next
}

fn move_skier(state: &mut SlalomState) {
    let input = state.input;
    let (x, vx) = STEER.step(state.skier_x, state.skier_vx, input.horizontal());
    state.skier_x = x;
    state.skier_vx = vx;

    let speed = match input.vertical() {
        d if d > 0.0 => state.speed + SPEED_TUCK,
        d if d < 0.0 => state.speed - SPEED_BRAKE,
        _ => approach(state.speed, base_speed(state.section), SPEED_RELAX),
    };
    state.speed = speed.clamp(SPEED_MIN, SPEED_MAX);
}

fn spawn_gates(state: &mut SlalomState) {
    let quota = gate_quota(state.section);
    let frame = state.frame_count;
    if state.gate_clock.spawned >= quota {
        return;
    }
    let interval = spawn_interval(
        GATE_START_INTERVAL,
        GATE_MIN_INTERVAL,
        state.gate_clock.progress(quota),
    );
    if !state.gate_clock.is_due(frame, interval) {
        return;
    }

    let half = gate_opening(state.section) / 2.0;
    let shift = state.rng.range(-GATE_MAX_SHIFT, GATE_MAX_SHIFT);
    let center = (state.last_gate_center + shift).clamp(COURSE_LEFT + half, COURSE_RIGHT - half);
    state.push_gate(center - half, center + half, SPAWN_Y);
    state.last_gate_center = center;
    state.gate_clock.record(frame);
}

/// True when `bounds` would sit inside a pending gate's opening band
fn blocks_gate(gates: &[Gate], bounds: &Aabb) -> bool {
    let cy = bounds.y + bounds.h / 2.0;
    gates.iter().any(|g| {
        g.is_pending()
            && (g.y - cy).abs() <= GATE_CLEAR_BAND
            && bounds.overlaps_x(g.left_x, g.right_x)
    })
}

fn spawn_obstacles(state: &mut SlalomState) {
    let quota = gate_quota(state.section);
    let frame = state.frame_count;
    // Course complete: nothing more comes down the hill
    if state.gate_clock.spawned >= quota {
        return;
    }
    let interval = spawn_interval(
        OBSTACLE_START_INTERVAL,
        OBSTACLE_MIN_INTERVAL,
        state.gate_clock.progress(quota),
    );
    if !state.obstacle_clock.is_due(frame, interval) {
        return;
    }

    let kind = ObstacleKind::ALL[state.rng.weighted(&obstacle_weights(state.section))];
    let x = state.rng.range(OBSTACLE_MIN_X, OBSTACLE_MAX_X);
    let size = kind.size();
    let bounds = Aabb::centered(x, SPAWN_Y, size.x, size.y);
    if blocks_gate(&state.gates, &bounds) {
        // Dropped; retried next frame
        return;
    }
    state.push_obstacle(kind, Vec2::new(x, SPAWN_Y));
    state.obstacle_clock.record(frame);
}

/// Pursuit: chase the next gate of the course, steering harder as the rival gets going
fn steer_rival(state: &mut SlalomState) {
    let rival = &mut state.rival;
    let target = state
        .gates
        .iter()
        .filter(|g| g.seq >= rival.next_gate)
        .min_by_key(|g| g.seq);

    let Some(gate) = target else {
        return;
    };
    rival.next_gate = gate.seq;
    if gate.y < rival.pos.y - RIVAL_ADVANCE_MARGIN {
        rival.next_gate = gate.seq + 1;
        return;
    }

    let ramp = (rival.age as f32 / RIVAL_STEER_RAMP as f32).min(1.0);
    let x = approach(rival.pos.x, gate.center(), RIVAL_STEER_CAP * ramp);
    rival.pos.x = x.clamp(STEER.min, STEER.max);
}

fn scroll_world(state: &mut SlalomState) {
    let speed = state.speed;
    for gate in state.gates.iter_mut() {
        gate.y -= speed;
    }
    for obstacle in state.obstacles.iter_mut() {
        obstacle.pos.y -= speed;
    }

    let was_ahead = state.rival.is_ahead();
    let dy = rival_speed(state.section) - speed;
    state.rival.pos.y = (state.rival.pos.y + dy).clamp(RIVAL_MIN_Y, RIVAL_MAX_Y);
    match (was_ahead, state.rival.is_ahead()) {
        (false, true) => state.events.push(SlalomEvent::RivalAhead),
        (true, false) => state.events.push(SlalomEvent::RivalBehind),
        _ => {}
    }
}

fn resolve_gates(state: &mut SlalomState) {
    let x = state.skier_x;
    for gate in state.gates.iter_mut() {
        if !gate.is_pending() || gate.y >= SKIER_Y {
            continue;
        }
        if gate.contains_x(x) {
            gate.state = GateState::Passed;
            state.gates_passed += 1;
            state.score += GATE_POINTS as u64;
            state.events.push(SlalomEvent::GatePass);
        } else {
            gate.state = GateState::Missed;
            state.gates_missed += 1;
            state.events.push(SlalomEvent::GateMiss);
        }
    }
}

fn check_crash(state: &mut SlalomState) {
    if state.invuln_frames > 0 {
        return;
    }
    let skier = state.skier_bounds();
    if state.obstacles.iter().any(|o| o.bounds().overlaps(&skier)) {
        state.crashes += 1;
        state.speed = CRASH_SPEED;
        state.invuln_frames = CRASH_INVULN_FRAMES;
        state.events.push(SlalomEvent::Crash);
    }
}

fn check_end_of_section(state: &mut SlalomState) {
    if state.crashes >= MAX_CRASHES || state.gates_missed >= MAX_GATES_MISSED {
        state.phase = SlalomPhase::GameOver;
        state.events.push(SlalomEvent::GameOver);
        log::debug!(
            "slalom: out of the race ({} crashes, {} gates missed)",
            state.crashes,
            state.gates_missed
        );
        return;
    }

    if state.gate_clock.spawned < gate_quota(state.section) || state.pending_gates() > 0 {
        return;
    }

    if !state.rival.is_ahead() {
        state.score += RIVAL_BONUS as u64;
        state.events.push(SlalomEvent::RivalBeaten);
    }

    if state.section + 1 >= SECTIONS {
        state.phase = SlalomPhase::Victory;
        state.events.push(SlalomEvent::Victory);
        log::debug!("slalom: finish line, score {}", state.score);
    } else {
        state.phase = SlalomPhase::SectionClear;
        state.section_timer = SECTION_CLEAR_FRAMES;
        state.events.push(SlalomEvent::SectionClear);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing(seed: u64) -> SlalomState {
        start(&SlalomState::new(seed), 0.0)
    }

    #[test]
    fn test_start_enters_playing() {
        let state = SlalomState::new(1);
        let next = start(&state, 40.0);
        assert_eq!(next.phase, SlalomPhase::Playing);
        assert_eq!(next.speed, base_speed(0));
        assert_eq!(start(&next, 80.0), next);
    }

    #[test]
    fn test_gate_pass_scores() {
        let mut state = playing(2);
        state.push_gate(200.0, 280.0, SKIER_Y + 1.0);
        state.skier_x = 240.0;
        let next = tick(&state, 0.0);
        assert_eq!(next.score, 100);
        assert_eq!(next.gates_passed, 1);
        assert_eq!(next.gates_missed, 0);
        assert_eq!(next.gates[0].state, GateState::Passed);
        assert!(next.events.contains(&SlalomEvent::GatePass));
    }

    #[test]
    fn test_gate_miss_outside_opening() {
        let mut state = playing(2);
        state.push_gate(200.0, 280.0, SKIER_Y + 1.0);
        state.skier_x = 190.0;
        let next = tick(&state, 0.0);
        assert_eq!(next.score, 0);
        assert_eq!(next.gates_passed, 0);
        assert_eq!(next.gates_missed, 1);
        assert!(next.events.contains(&SlalomEvent::GateMiss));
    }

    #[test]
    fn test_gate_judged_once() {
        let mut state = playing(3);
        state.push_gate(200.0, 280.0, SKIER_Y + 1.0);
        state.skier_x = 240.0;
        state = tick(&state, 0.0);
        state.skier_x = 100.0;
        for _ in 0..5 {
            state = tick(&state, 0.0);
        }
        assert_eq!(state.gates_passed, 1);
        assert_eq!(state.gates_missed, 0);
    }

    #[test]
    fn test_gate_waits_until_past_row() {
        let mut state = playing(3);
        state.push_gate(200.0, 280.0, SKIER_Y + 50.0);
        state.skier_x = 20.0;
        let next = tick(&state, 0.0);
        assert_eq!(next.gates[0].state, GateState::Pending);
    }

    #[test]
    fn test_tuck_and_brake() {
        let mut state = playing(4);
        state.input.down = true;
        for _ in 0..200 {
            state.gates.clear();
            state.obstacles.clear();
            state = tick(&state, 0.0);
        }
        assert_eq!(state.speed, SPEED_MAX);

        state.input.down = false;
        state.input.up = true;
        for _ in 0..200 {
            state.gates.clear();
            state.obstacles.clear();
            state = tick(&state, 0.0);
        }
        assert_eq!(state.speed, SPEED_MIN);
    }

    #[test]
    fn test_speed_relaxes_to_cruise() {
        let mut state = playing(4);
        state.speed = 6.0;
        state = tick(&state, 0.0);
        assert!((state.speed - 5.98).abs() < 1e-4);
    }

    #[test]
    fn test_steering_is_inertial() {
        let mut state = playing(5);
        state.input.right = true;
        state = tick(&state, 0.0);
        let first = state.skier_vx;
        assert!((first - 0.528).abs() < 1e-4);
        state = tick(&state, 0.0);
        assert!(state.skier_vx > first);

        state.input.right = false;
        let before = state.skier_vx;
        state = tick(&state, 0.0);
        assert!(state.skier_vx < before);
        assert!(state.skier_vx > 0.0);
    }

    #[test]
    fn test_crash_then_invulnerable() {
        let mut state = playing(6);
        state.push_obstacle(ObstacleKind::Rock, Vec2::new(SKIER_START_X, SKIER_Y + 4.0));
        state = tick(&state, 0.0);
        assert_eq!(state.crashes, 1);
        assert_eq!(state.speed, CRASH_SPEED);
        assert_eq!(state.invuln_frames, CRASH_INVULN_FRAMES - 1);
        assert!(state.events.contains(&SlalomEvent::Crash));

        // Still overlapping next frame, but shielded
        state = tick(&state, 0.0);
        assert_eq!(state.crashes, 1);
    }

    #[test]
    fn test_third_crash_ends_run() {
        let mut state = playing(7);
        state.crashes = 2;
        state.push_obstacle(ObstacleKind::Tree, Vec2::new(SKIER_START_X, SKIER_Y));
        let next = tick(&state, 0.0);
        assert_eq!(next.phase, SlalomPhase::GameOver);
        assert!(next.events.contains(&SlalomEvent::GameOver));
    }

    #[test]
    fn test_obstacle_blocked_by_gate_opening() {
        let mut state = playing(8);
        state.push_gate(200.0, 300.0, SPAWN_Y);
        let inside = Aabb::centered(250.0, SPAWN_Y - 40.0, 24.0, 36.0);
        let outside = Aabb::centered(400.0, SPAWN_Y, 24.0, 36.0);
        let far_below = Aabb::centered(250.0, SPAWN_Y + 120.0, 24.0, 36.0);
        assert!(blocks_gate(&state.gates, &inside));
        assert!(!blocks_gate(&state.gates, &outside));
        assert!(!blocks_gate(&state.gates, &far_below));

        state.gates[0].state = GateState::Passed;
        assert!(!blocks_gate(&state.gates, &inside));
    }

    #[test]
    fn test_spawned_obstacles_avoid_openings() {
        let mut state = playing(9);
        state.input.down = true;
        for _ in 0..900 {
            let before: Vec<u32> = state.obstacles.iter().map(|o| o.id).collect();
            state = tick(&state, 0.0);
            if state.phase != SlalomPhase::Playing {
                break;
            }
            for o in state.obstacles.iter().filter(|o| !before.contains(&o.id)) {
                assert!(!blocks_gate(&state.gates, &o.bounds()));
            }
        }
    }

    #[test]
    fn test_rival_steering_ramps_up() {
        let mut state = playing(10);
        state.push_gate(100.0, 160.0, 600.0);
        let next = tick(&state, 0.0);
        // Age 0: no steering authority yet
        assert_eq!(next.rival.pos.x, RIVAL_START_X);

        state.rival.age = RIVAL_STEER_RAMP;
        let next = tick(&state, 0.0);
        assert_eq!(next.rival.pos.x, RIVAL_START_X - RIVAL_STEER_CAP);
    }

    #[test]
    fn test_rival_advances_past_gate() {
        let mut state = playing(11);
        state.push_gate(100.0, 160.0, SKIER_Y - 30.0);
        state.push_gate(300.0, 360.0, 500.0);
        state.gates[0].state = GateState::Passed;
        let next = tick(&state, 0.0);
        assert_eq!(next.rival.next_gate, 1);
    }

    #[test]
    fn test_rival_pulls_ahead() {
        let state = playing(12);
        let next = tick(&state, 0.0);
        assert!(next.rival.is_ahead());
        assert!(next.events.contains(&SlalomEvent::RivalAhead));

        let mut state = next;
        state.speed = SPEED_MAX;
        state.input.down = true;
        let mut behind = false;
        for _ in 0..10 {
            state = tick(&state, 0.0);
            behind |= state.events.contains(&SlalomEvent::RivalBehind);
        }
        assert!(behind);
    }

    #[test]
    fn test_section_clear_with_rival_bonus() {
        let mut state = playing(13);
        state.gate_clock.spawned = gate_quota(0);
        state.rival.pos.y = SKIER_Y - 100.0;
        state.speed = base_speed(0);
        let next = tick(&state, 0.0);
        assert_eq!(next.phase, SlalomPhase::SectionClear);
        assert_eq!(next.score, RIVAL_BONUS as u64);
        assert_eq!(
            next.events,
            vec![SlalomEvent::RivalBeaten, SlalomEvent::SectionClear]
        );

        let mut state = next;
        for _ in 0..SECTION_CLEAR_FRAMES {
            state = tick(&state, 0.0);
        }
        assert_eq!(state.phase, SlalomPhase::Playing);
        assert_eq!(state.section, 1);
        assert_eq!(state.speed, base_speed(1));
    }

    #[test]
    fn test_last_section_is_victory() {
        let mut state = playing(14);
        state.section = SECTIONS - 1;
        state.gate_clock.spawned = gate_quota(SECTIONS - 1);
        state.rival.pos.y = RIVAL_MAX_Y;
        let next = tick(&state, 0.0);
        assert_eq!(next.phase, SlalomPhase::Victory);
        assert_eq!(next.events, vec![SlalomEvent::Victory]);
    }
}
