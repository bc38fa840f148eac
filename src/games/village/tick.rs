//! Defend-the-Village engine: per-frame tick and player actions

use glam::Vec2;

use super::config::*;
use super::state::{AnimalKind, AnimalState, VillageEvent, VillagePhase, VillageState};
use crate::sim::{countdown, direct_rate, elapsed_since, pick_target, spawn_interval};

/// Leave the title card and start level 1
pub fn start(state: &VillageState, now_ms: f64) -> VillageState {
    if state.phase != VillagePhase::Ready {
        return state.clone();
    }
    let mut next = state.clone();
    next.events.clear();
    next.phase = VillagePhase::Playing;
    next.start_ms = Some(now_ms);
    next.reset_level();
    log::debug!("village: run started (seed {})", next.rng.seed());
    next
}

/// Advance the defense by one frame
pub fn tick(state: &VillageState, now_ms: f64) -> VillageState {
    let mut next = state.clone();
    next.events.clear();
    next.frame_count += 1;

    match next.phase {
        VillagePhase::Ready | VillagePhase::GameOver | VillagePhase::Victory => {}
        VillagePhase::LevelUp => {
            if countdown(&mut next.levelup_timer) {
                next.level += 1;
                next.reset_level();
                next.phase = VillagePhase::Playing;
                log::debug!("village: level {} begins", next.level + 1);
            }
        }
        VillagePhase::Playing => {
            next.elapsed_ms = elapsed_since(next.start_ms, now_ms);
            move_reticle(&mut next);
            spawn_animals(&mut next);
            advance_animals(&mut next);
            decrement_timers(&mut next);
            next.animals.retain(|a| a.state != AnimalState::Gone);
            check_end_of_level(&mut next);
        }
    }

    next
}

/// Fire one shot at the reticle
///
/// No-op (unchanged state) outside `Playing`, with an empty magazine, while
/// reloading or during the shot cooldown.
pub fn handle_shoot(state: &VillageState) -> VillageState {
    if state.phase != VillagePhase::Playing
        || state.ammo == 0
        || state.is_reloading()
        || state.shot_cooldown > 0
    {
        return state.clone();
    }

    let mut next = state.clone();
    next.events.clear();
    next.ammo -= 1;
    next.shots_fired += 1;
    next.shot_cooldown = SHOT_COOLDOWN;
    next.events.push(VillageEvent::Shoot);

    // Largest on screen = closest to the village
    let target = pick_target(
        next.reticle,
        next.animals
            .iter()
            .enumerate()
            .filter(|(_, a)| a.is_approaching())
            .map(|(i, a)| (i, a.pos, a.hit_radius(), a.scale)),
    );

    match target {
        Some(index) => {
            let animal = &mut next.animals[index];
            animal.hp = animal.hp.saturating_sub(1);
            animal.flash = HIT_FLASH_FRAMES;
            let kind = animal.kind;
            next.events.push(if kind == AnimalKind::Boss {
                VillageEvent::BossHit
            } else {
                VillageEvent::Hit
            });

            if animal.hp == 0 {
                animal.state = AnimalState::Retreating;
                next.animals_defeated += 1;
                next.score += next
                    .combo
                    .score_hit(kind.stats().points, COMBO_BONUS, COMBO_WINDOW);
                next.events.push(kind.defeat_event());
            } else {
                animal.pos.y = (animal.pos.y - KNOCKBACK).max(HORIZON_Y);
                animal.scale = scale_at(animal.pos.y);
            }
        }
        None => {
            next.shots_missed += 1;
            next.combo.reset();
            next.events.push(VillageEvent::Miss);
        }
    }

    if next.ammo == 0 {
        next.reload_timer = RELOAD_FRAMES;
        next.events.push(VillageEvent::Reload);
    }

    next
}

/// Start a manual reload (magazine not full, not already reloading)
pub fn handle_reload(state: &VillageState) -> VillageState {
    if state.phase != VillagePhase::Playing || state.ammo >= MAX_AMMO || state.is_reloading() {
        return state.clone();
    }
    let mut next = state.clone();
    next.events.clear();
    next.reload_timer = RELOAD_FRAMES;
    next.events.push(VillageEvent::Reload);
    next
}

/// Pointer aim, already mapped into canvas space by the host
///
/// Non-finite coordinates are ignored.
pub fn aim_at(state: &mut VillageState, x: f32, y: f32) {
    if !x.is_finite() || !y.is_finite() {
        return;
    }
    state.reticle = Vec2::new(
        x.clamp(RETICLE_MIN_X, RETICLE_MAX_X),
        y.clamp(RETICLE_MIN_Y, RETICLE_MAX_Y),
    );
}

fn move_reticle(state: &mut VillageState) {
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

fn spawn_animals(state: &mut VillageState) {
    let params = level_params(state.level);
    let frame = state.frame_count;

    if state.spawn.spawned < params.quota {
        let interval = spawn_interval(
            params.start_interval,
            params.min_interval,
            state.spawn.progress(params.quota),
        );
        if !state.spawn.is_due(frame, interval) {
            return;
        }
        let approaching = state.animals.iter().filter(|a| a.is_approaching()).count();
        if approaching >= MAX_APPROACHING {
            // Dropped; retried next frame
            return;
        }

        let kind = if state.level == 0 && state.spawn.spawned < WARMUP_SPAWNS {
            AnimalKind::Wolf
        } else {
            AnimalKind::REGULAR[state.rng.weighted(&kind_weights(state.level))]
        };
        let x = state.rng.range(SPAWN_X_MIN, SPAWN_X_MAX);
        let drift = state.rng.range(-MAX_DRIFT, MAX_DRIFT);
        state.spawn_animal(kind, Vec2::new(x, HORIZON_Y));
        if let Some(animal) = state.animals.last_mut() {
            animal.drift = drift;
        }
        state.spawn.record(frame);
    } else if !state.boss_spawned && state.approaching_regulars() <= BOSS_THINNED_MAX {
        state.spawn_animal(AnimalKind::Boss, Vec2::new(240.0, HORIZON_Y));
        state.boss_spawned = true;
        state.events.push(VillageEvent::BossRoar);
        log::debug!("village: boss enters at frame {}", frame);
    }
}

fn advance_animals(state: &mut VillageState) {
    let speed_mult = level_params(state.level).speed_mult;

    for animal in state.animals.iter_mut() {
        match animal.state {
            AnimalState::Approaching => {
                animal.pos.y += animal.kind.stats().speed * speed_mult;
                animal.pos.x += animal.drift;
                if animal.pos.x < SPAWN_X_MIN || animal.pos.x > SPAWN_X_MAX {
                    animal.pos.x = animal.pos.x.clamp(SPAWN_X_MIN, SPAWN_X_MAX);
                    animal.drift = -animal.drift;
                }
                animal.scale = scale_at(animal.pos.y);

                if animal.pos.y >= VILLAGE_Y {
                    state.village_hp = state
                        .village_hp
                        .saturating_sub(animal.kind.stats().damage);
                    state.breaches += 1;
                    state.combo.reset();
                    animal.state = AnimalState::Gone;
                    state.events.push(VillageEvent::Breach);
                }
            }
            AnimalState::Retreating => {
                animal.pos.y -= RETREAT_SPEED;
                animal.scale = scale_at(animal.pos.y);
                if animal.pos.y <= HORIZON_Y {
                    animal.state = AnimalState::Gone;
                }
            }
            AnimalState::Gone => {}
        }
    }
}

fn decrement_timers(state: &mut VillageState) {
    state.shot_cooldown = state.shot_cooldown.saturating_sub(1);
    if countdown(&mut state.reload_timer) {
        state.ammo = MAX_AMMO;
        state.events.push(VillageEvent::ReloadDone);
    }
    state.combo.decay();
    for animal in state.animals.iter_mut() {
        animal.flash = animal.flash.saturating_sub(1);
    }
}

fn check_end_of_level(state: &mut VillageState) {
    if state.village_hp == 0 {
        state.phase = VillagePhase::GameOver;
        state.events.push(VillageEvent::GameOver);
        log::debug!("village: overrun at frame {}", state.frame_count);
        return;
    }

    let params = level_params(state.level);
    let cleared =
        state.spawn.spawned >= params.quota && state.boss_spawned && state.animals.is_empty();
    if !cleared {
        return;
    }

    if state.level as usize + 1 >= LEVELS.len() {
        state.phase = VillagePhase::Victory;
        state.events.push(VillageEvent::Victory);
        log::debug!("village: defended, score {}", state.score);
    } else {
        state.phase = VillagePhase::LevelUp;
        state.levelup_timer = LEVELUP_FRAMES;
        state.events.push(VillageEvent::LevelComplete);
    }
}
