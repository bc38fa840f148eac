//! Polyp Sniper engine: per-frame tick and the snip action

use std::f32::consts::PI;

use glam::Vec2;

use super::config::*;
use super::state::{Polyp, PolypKind, PolypState, SniperEvent, SniperPhase, SniperState};
use crate::sim::{countdown, direct_rate, elapsed_since, pick_target, spawn_interval};
use crate::{normalize_angle, polar_to_canvas};

/// Leave the title card and enter section 1
pub fn start(state: &SniperState, now_ms: f64) -> SniperState {
    if state.phase != SniperPhase::Ready {
        return state.clone();
    }
    let mut next = state.clone();
    next.events.clear();
    next.phase = SniperPhase::Playing;
    next.start_ms = Some(now_ms);
    next.reset_section();
    log::debug!("sniper: procedure started (seed {})", next.rng.seed());
    next
}

/// Advance the procedure by one frame
pub fn tick(state: &SniperState, now_ms: f64) -> SniperState {
    let mut next = state.clone();
    next.events.clear();
    next.frame_count += 1;

    match next.phase {
        SniperPhase::Ready | SniperPhase::GameOver | SniperPhase::Victory => {}
        SniperPhase::SectionClear => {
            if countdown(&mut next.section_timer) {
                next.section += 1;
                next.reset_section();
                next.phase = SniperPhase::Playing;
                log::debug!("sniper: section {} begins", next.section + 1);
            }
        }
        SniperPhase::Playing => {
            next.elapsed_ms = elapsed_since(next.start_ms, now_ms);
            move_reticle(&mut next);
            spawn_polyps(&mut next);
            advance_polyps(&mut next);
            next.snip_cooldown = next.snip_cooldown.saturating_sub(1);
            next.combo.decay();
            next.polyps.retain(|p| p.state != PolypState::Gone);
            check_end_of_section(&mut next);
        }
    }

    next
}

/// Snip at the reticle
///
/// Targets the closest growing or active polyp whose hit circle contains the
/// reticle. A snip that touches nothing counts as damage. No-op outside
/// `Playing` or during the cooldown.
pub fn handle_snip(state: &SniperState) -> SniperState {
    if state.phase != SniperPhase::Playing || state.snip_cooldown > 0 {
        return state.clone();
    }

    let mut next = state.clone();
    next.events.clear();
    next.snip_cooldown = SNIP_COOLDOWN;
    next.events.push(SniperEvent::Snip);

    let reticle = next.reticle;
    let target = pick_target(
        reticle,
        next.polyps
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_live())
            .map(|(i, p)| (i, p.pos(), p.hit_radius(), -p.pos().distance(reticle))),
    );

    match target {
        Some(index) => {
            let polyp = &mut next.polyps[index];
            polyp.state = PolypState::Snipped;
            polyp.timer = SNIPPED_FRAMES;
            let points = polyp.kind.stats().points;
            next.polyps_snipped += 1;
            next.score += next.combo.score_hit(points, COMBO_BONUS, COMBO_WINDOW);
            next.events.push(SniperEvent::PolypSnipped);
            if next.combo.count >= COMBO_EVENT_MIN {
                next.events.push(SniperEvent::Combo);
            }
        }
        None => {
            next.misses += 1;
            next.damage_count += 1;
            next.combo.reset();
            next.events.push(SniperEvent::Miss);
            check_damage(&mut next);
        }
    }

    next
}

/// Pointer aim, already mapped into canvas space by the host
///
/// Non-finite coordinates are ignored.
pub fn aim_at(state: &mut SniperState, x: f32, y: f32) {
    if !x.is_finite() || !y.is_finite() {
        return;
    }
    state.reticle = Vec2::new(
        x.clamp(RETICLE_MIN_X, RETICLE_MAX_X),
        y.clamp(RETICLE_MIN_Y, RETICLE_MAX_Y),
    );
}

fn move_reticle(state: &mut SniperState) {
    let input = state.input;
    state.reticle.x = direct_rate(
        state.reticle.x,
        input.horizontal(),
        RETICLE_SPEED,
        RETICLE_MIN_X,
        RETICLE_MAX_X,
    );
    state.reticle.y = direct_rate(
        state.reticle.y,
        input.vertical(),
        RETICLE_SPEED,
        RETICLE_MIN_Y,
        RETICLE_MAX_Y,
    );
}

fn in_warmup(state: &SniperState) -> bool {
    state.frame_count.saturating_sub(state.section_start_frame) < WARMUP_FRAMES
}

fn spawn_polyps(state: &mut SniperState) {
    let params = section_params(state.section);
    let frame = state.frame_count;
    if state.spawn.spawned >= params.quota {
        return;
    }

    let warmup = in_warmup(state);
    let progress = if warmup {
        0.0
    } else {
        state.spawn.progress(params.quota)
    };
    let interval = spawn_interval(params.start_interval, params.min_interval, progress);
    if !state.spawn.is_due(frame, interval) || state.live_polyps() >= MAX_LIVE {
        return;
    }

    let kind = PolypKind::ALL[state.rng.weighted(&kind_weights(state.section, warmup))];
    let angle = state.rng.range(-PI, PI);
    let radius = state.rng.range(TUNNEL_RADIUS_MIN, TUNNEL_RADIUS_MAX);
    let pos = polar_to_canvas(TUNNEL_CENTER, radius, angle);
    let size = kind.stats().size;
    let crowded = state.polyps.iter().any(|p| {
        p.state != PolypState::Gone
            && p.pos().distance(pos) < size + p.kind.stats().size + SPAWN_CLEARANCE
    });
    if crowded {
        // Dropped; retried next frame
        return;
    }

    let id = state.next_entity_id();
    state.polyps.push(Polyp {
        id,
        kind,
        angle,
        radius,
        size: 0.0,
        state: PolypState::Growing,
        timer: GROW_FRAMES,
    });
    state.spawn.record(frame);
}

fn advance_polyps(state: &mut SniperState) {
    let params = section_params(state.section);

    for polyp in state.polyps.iter_mut() {
        polyp.angle = normalize_angle(polyp.angle + params.twist);
        let full = polyp.kind.stats().size;

        match polyp.state {
            PolypState::Growing => {
                if countdown(&mut polyp.timer) {
                    polyp.state = PolypState::Active;
                    polyp.timer = params.active_frames;
                    polyp.size = full;
                } else {
                    polyp.size = full * (1.0 - polyp.timer as f32 / GROW_FRAMES as f32);
                }
            }
            PolypState::Active => {
                if countdown(&mut polyp.timer) {
                    polyp.state = PolypState::Retreating;
                    polyp.timer = RETREAT_FRAMES;
                    state.escapes += 1;
                    state.damage_count += 1;
                    state.combo.reset();
                    state.events.push(SniperEvent::PolypEscaped);
                }
            }
            PolypState::Retreating => {
                if countdown(&mut polyp.timer) {
                    polyp.state = PolypState::Gone;
                } else {
                    polyp.size = full * polyp.timer as f32 / RETREAT_FRAMES as f32;
                }
            }
            PolypState::Snipped => {
                if countdown(&mut polyp.timer) {
                    polyp.state = PolypState::Gone;
                } else {
                    polyp.size = full * polyp.timer as f32 / SNIPPED_FRAMES as f32;
                }
            }
            PolypState::Gone => {}
        }
    }
}

/// Enter GameOver once damage reaches the limit; true if it did
fn check_damage(state: &mut SniperState) -> bool {
    if state.damage_count < MAX_MISSES {
        return false;
    }
    state.phase = SniperPhase::GameOver;
    state.events.push(SniperEvent::GameOver);
    log::debug!(
        "sniper: procedure failed at frame {} ({} misses, {} escapes)",
        state.frame_count,
        state.misses,
        state.escapes
    );
    true
}

fn check_end_of_section(state: &mut SniperState) {
    if check_damage(state) {
        return;
    }

    let params = section_params(state.section);
    if state.spawn.spawned < params.quota || state.polyps.iter().any(Polyp::is_live) {
        return;
    }

    if state.section + 1 >= SECTIONS {
        state.phase = SniperPhase::Victory;
        state.events.push(SniperEvent::Victory);
        log::debug!("sniper: colon clear, score {}", state.score);
    } else {
        state.phase = SniperPhase::SectionClear;
        state.section_timer = SECTION_CLEAR_FRAMES;
        state.events.push(SniperEvent::SectionClear);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing(seed: u64) -> SniperState {
        start(&SniperState::new(seed), 0.0)
    }

    fn cool_down(mut state: SniperState) -> SniperState {
        for _ in 0..SNIP_COOLDOWN {
            state = tick(&state, 0.0);
        }
        state
    }

    #[test]
    fn test_start_enters_playing() {
        let state = SniperState::new(1);
        let next = start(&state, 250.0);
        assert_eq!(next.phase, SniperPhase::Playing);
        assert_eq!(next.start_ms, Some(250.0));
        assert_eq!(start(&next, 900.0), next);
    }

    #[test]
    fn test_snip_hits_active_polyp() {
        let mut state = playing(2);
        let id = state.spawn_polyp(PolypKind::Medium, 0.0, 100.0);
        state.reticle = polar_to_canvas(TUNNEL_CENTER, 100.0, 0.0) + Vec2::new(5.0, 0.0);

        let next = handle_snip(&state);
        let polyp = next.polyps.iter().find(|p| p.id == id).unwrap();
        assert_eq!(polyp.state, PolypState::Snipped);
        assert_eq!(next.polyps_snipped, 1);
        assert_eq!(next.score, 100);
        assert_eq!(next.snip_cooldown, SNIP_COOLDOWN);
        assert_eq!(
            next.events,
            vec![SniperEvent::Snip, SniperEvent::PolypSnipped]
        );
    }

    #[test]
    fn test_snip_picks_closest_polyp() {
        let mut state = playing(2);
        let far = state.spawn_polyp(PolypKind::Large, 0.0, 100.0);
        let near = state.spawn_polyp(PolypKind::Large, 0.0, 130.0);
        state.reticle = polar_to_canvas(TUNNEL_CENTER, 122.0, 0.0);

        let next = handle_snip(&state);
        let near_polyp = next.polyps.iter().find(|p| p.id == near).unwrap();
        let far_polyp = next.polyps.iter().find(|p| p.id == far).unwrap();
        assert_eq!(near_polyp.state, PolypState::Snipped);
        assert_eq!(far_polyp.state, PolypState::Active);
    }

    #[test]
    fn test_miss_counts_damage() {
        let mut state = playing(3);
        state.combo.count = 2;
        state.combo.window = 40;
        let next = handle_snip(&state);
        assert_eq!(next.damage_count, 1);
        assert_eq!(next.misses, 1);
        assert_eq!(next.combo.count, 0);
        assert_eq!(next.events, vec![SniperEvent::Snip, SniperEvent::Miss]);
    }

    #[test]
    fn test_combo_event_from_third_snip() {
        let mut state = playing(4);
        for i in 0..3 {
            let angle = i as f32 * 2.0;
            state.spawn_polyp(PolypKind::Large, angle, 150.0);
        }
        let mut combos = 0;
        for i in 0..3 {
            let polyp = state.polyps.iter().find(|p| p.is_live()).unwrap().clone();
            state.reticle = polyp.pos();
            state = handle_snip(&state);
            if state.events.contains(&SniperEvent::Combo) {
                combos += 1;
                assert_eq!(i, 2);
            }
            state.snip_cooldown = 0;
        }
        assert_eq!(combos, 1);
        assert_eq!(state.polyps_snipped, 3);
    }

    #[test]
    fn test_five_misses_end_procedure() {
        let mut state = playing(5);
        for _ in 0..MAX_MISSES {
            state = cool_down(state);
            assert_eq!(state.phase, SniperPhase::Playing);
            state = handle_snip(&state);
        }
        assert_eq!(state.damage_count, MAX_MISSES);
        assert_eq!(state.phase, SniperPhase::GameOver);
        assert!(state.events.contains(&SniperEvent::GameOver));

        // Inert afterwards
        assert_eq!(handle_snip(&state), state);
        let after = tick(&state, 10_000.0);
        assert_eq!(after.score, state.score);
        assert!(after.events.is_empty());
    }

    #[test]
    fn test_snip_cooldown_blocks() {
        let mut state = playing(6);
        state.snip_cooldown = 3;
        assert_eq!(handle_snip(&state), state);
    }

    #[test]
    fn test_active_polyp_escapes() {
        let mut state = playing(7);
        state.spawn_polyp(PolypKind::Medium, 1.0, 120.0);
        state.polyps[0].timer = 1;
        let next = tick(&state, 0.0);
        assert_eq!(next.polyps[0].state, PolypState::Retreating);
        assert_eq!(next.escapes, 1);
        assert_eq!(next.damage_count, 1);
        assert!(next.events.contains(&SniperEvent::PolypEscaped));
    }

    #[test]
    fn test_polyps_twist_with_tunnel() {
        let mut state = playing(8);
        state.spawn_polyp(PolypKind::Small, 0.5, 120.0);
        let next = tick(&state, 0.0);
        let expected = 0.5 + section_params(0).twist;
        assert!((next.polyps[0].angle - expected).abs() < 1e-6);
    }

    #[test]
    fn test_warmup_spawns_grow_without_small() {
        let mut state = playing(9);
        for _ in 0..WARMUP_FRAMES {
            state = tick(&state, 0.0);
            assert!(state.polyps.iter().all(|p| p.kind != PolypKind::Small));
        }
        assert!(!state.polyps.is_empty());
        let first = &state.polyps[0];
        assert_ne!(first.state, PolypState::Gone);
    }

    #[test]
    fn test_live_polyps_capped() {
        let mut state = playing(10);
        for _ in 0..1200 {
            state = tick(&state, 0.0);
            if state.phase != SniperPhase::Playing {
                break;
            }
            let live: Vec<_> = state.polyps.iter().filter(|p| p.is_live()).collect();
            assert!(live.len() <= MAX_LIVE);
        }
    }

    #[test]
    fn test_section_clear_then_next_section() {
        let mut state = playing(11);
        state.spawn.spawned = section_params(0).quota;
        state.score = 450;
        state = tick(&state, 0.0);
        assert_eq!(state.phase, SniperPhase::SectionClear);
        assert_eq!(state.events, vec![SniperEvent::SectionClear]);

        for _ in 0..SECTION_CLEAR_FRAMES {
            state = tick(&state, 0.0);
        }
        assert_eq!(state.phase, SniperPhase::Playing);
        assert_eq!(state.section, 1);
        assert_eq!(state.section_start_frame, state.frame_count);
        assert_eq!(state.score, 450);
    }

    #[test]
    fn test_section_clears_while_last_polyp_retreats() {
        let mut state = playing(14);
        state.spawn_polyp(PolypKind::Small, 0.0, 120.0);
        state.polyps[0].state = PolypState::Retreating;
        state.polyps[0].timer = RETREAT_FRAMES;
        state.spawn.spawned = section_params(0).quota;

        let next = tick(&state, 0.0);
        assert_eq!(next.phase, SniperPhase::SectionClear);
        assert_eq!(next.polyps.len(), 1);
        assert_eq!(next.escapes, 0);
    }

    #[test]
    fn test_last_section_is_victory() {
        let mut state = playing(12);
        state.section = SECTIONS - 1;
        state.spawn.spawned = section_params(SECTIONS - 1).quota;
        let next = tick(&state, 0.0);
        assert_eq!(next.phase, SniperPhase::Victory);
        assert_eq!(next.events, vec![SniperEvent::Victory]);
    }

    #[test]
    fn test_non_finite_pointer_ignored() {
        let mut state = playing(3);
        aim_at(&mut state, 120.0, 300.0);
        let aimed = state.reticle;
        aim_at(&mut state, f32::NAN, 300.0);
        aim_at(&mut state, 120.0, f32::INFINITY);
        aim_at(&mut state, f32::NEG_INFINITY, f32::NAN);
        assert_eq!(state.reticle, aimed);
        for _ in 0..5 {
            state = tick(&state, 0.0);
        }
        assert!(state.reticle.is_finite());
    }
}
