//! Engine-wide properties, checked on random input scripts

use frostbite_arcade::games::{
    BreakerState, SlalomState, SniperState, SnowballState, VillageState, breaker, slalom, sniper,
    snowball, village,
};
use frostbite_arcade::sim::{Controls, MiniGame};
use proptest::prelude::*;

const FRAME_MS: f64 = 1000.0 / 60.0;

/// One frame of scripted input
#[derive(Debug, Clone)]
struct Step {
    keys: u8,
    action: bool,
    pointer: Option<(f32, f32)>,
}

impl Step {
    fn controls(&self) -> Controls {
        Controls {
            left: self.keys & 1 != 0,
            right: self.keys & 2 != 0,
            up: self.keys & 4 != 0,
            down: self.keys & 8 != 0,
            action: self.keys & 16 != 0,
        }
    }
}

/// Pointer coordinate, occasionally garbage from a degenerate canvas rect
fn coord(lo: f32, hi: f32) -> impl Strategy<Value = f32> {
    prop_oneof![
        12 => lo..hi,
        1 => Just(f32::NAN),
        1 => Just(f32::INFINITY),
        1 => Just(f32::NEG_INFINITY),
    ]
}

fn step() -> impl Strategy<Value = Step> {
    (
        0u8..32,
        prop::bool::weighted(0.15),
        prop::option::weighted(0.1, (coord(-100.0, 600.0), coord(-100.0, 800.0))),
    )
        .prop_map(|(keys, action, pointer)| Step {
            keys,
            action,
            pointer,
        })
}

fn script() -> impl Strategy<Value = Vec<Step>> {
    // Held inputs are sticky for a while, like a real player
    prop::collection::vec((step(), 1usize..40), 1..40).prop_map(|runs| {
        runs.into_iter()
            .flat_map(|(s, n)| std::iter::repeat_n(s, n))
            .collect()
    })
}

/// Start a run and play `steps`, calling `check` after every frame
fn drive_with<G: MiniGame>(seed: u64, steps: &[Step], mut check: impl FnMut(&G)) -> G {
    let mut state = G::new_game(seed).start(0.0);
    check(&state);
    for (i, step) in steps.iter().enumerate() {
        *state.controls_mut() = step.controls();
        if let Some((x, y)) = step.pointer {
            state.set_pointer(x, y);
        }
        state = state.tick(i as f64 * FRAME_MS);
        check(&state);
        if step.action {
            state = state.primary_action();
            check(&state);
        }
    }
    state
}

fn drive<G: MiniGame>(seed: u64, steps: &[Step]) -> G {
    drive_with(seed, steps, |_| {})
}

macro_rules! engine_properties {
    ($name:ident, $state:ty, $terminal:expr, $in_bounds:expr) => {
        mod $name {
            use super::*;

            proptest! {
                #![proptest_config(ProptestConfig::with_cases(32))]

                #[test]
                fn replay_is_deterministic(seed in any::<u64>(), steps in script()) {
                    let a: $state = drive(seed, &steps);
                    let b: $state = drive(seed, &steps);
                    prop_assert_eq!(
                        serde_json::to_string(&a).unwrap(),
                        serde_json::to_string(&b).unwrap()
                    );
                    prop_assert_eq!(a, b);
                }

                #[test]
                fn player_stays_in_bounds(seed in any::<u64>(), steps in script()) {
                    let in_bounds = $in_bounds;
                    drive_with::<$state>(seed, &steps, |s| {
                        assert!(in_bounds(s), "out of bounds at frame {}", s.frame_count);
                    });
                }

                #[test]
                fn events_never_carry_over(seed in any::<u64>(), steps in script()) {
                    let state: $state = drive(seed, &steps);
                    let mut drained = state.clone();
                    drained.events.clear();
                    let now = steps.len() as f64 * FRAME_MS;
                    prop_assert_eq!(state.tick(now), drained.tick(now));
                }

                #[test]
                fn terminal_phase_is_inert(
                    seed in any::<u64>(),
                    steps in script(),
                    extra in 1u64..90,
                ) {
                    let mut state: $state = drive(seed, &steps);
                    state.phase = $terminal;
                    let mut after = state.clone();
                    for i in 0..extra {
                        after = after.tick(1e7 + i as f64).primary_action();
                    }
                    prop_assert_eq!(after.frame_count, state.frame_count + extra);
                    prop_assert!(after.events.is_empty());
                    after.frame_count = state.frame_count;
                    after.events = state.events.clone();
                    prop_assert_eq!(after, state);
                }

                #[test]
                fn action_before_start_is_a_noop(seed in any::<u64>()) {
                    let ready = <$state as MiniGame>::new_game(seed);
                    prop_assert_eq!(ready.primary_action(), ready.clone());
                    prop_assert_eq!(ready.secondary_action(), ready);
                }
            }
        }
    };
}

engine_properties!(
    village_engine,
    VillageState,
    village::VillagePhase::GameOver,
    |s: &VillageState| {
        use village::config::*;
        (RETICLE_MIN_X..=RETICLE_MAX_X).contains(&s.reticle.x)
            && (RETICLE_MIN_Y..=RETICLE_MAX_Y).contains(&s.reticle.y)
            && s.ammo <= MAX_AMMO
            && s.village_hp <= VILLAGE_HP
    }
);

engine_properties!(
    breaker_engine,
    BreakerState,
    breaker::BreakerPhase::Victory,
    |s: &BreakerState| {
        use breaker::config::*;
        s.paddle.x >= 0.0
            && s.paddle.x + s.paddle.width <= FIELD_RIGHT + 1e-3
            && s.lives <= MAX_LIVES
    }
);

engine_properties!(
    sniper_engine,
    SniperState,
    sniper::SniperPhase::GameOver,
    |s: &SniperState| {
        use sniper::config::*;
        (RETICLE_MIN_X..=RETICLE_MAX_X).contains(&s.reticle.x)
            && (RETICLE_MIN_Y..=RETICLE_MAX_Y).contains(&s.reticle.y)
    }
);

engine_properties!(
    slalom_engine,
    SlalomState,
    slalom::SlalomPhase::Victory,
    |s: &SlalomState| {
        use slalom::config::*;
        (STEER.min..=STEER.max).contains(&s.skier_x)
            && (SPEED_MIN..=SPEED_MAX).contains(&s.speed)
            && s.crashes <= MAX_CRASHES
    }
);

engine_properties!(
    snowball_engine,
    SnowballState,
    snowball::SnowballPhase::GameOver,
    |s: &SnowballState| {
        use snowball::config::*;
        (LANE_MIN..=LANE_MAX).contains(&s.player_y)
            && (LANE_MIN..=LANE_MAX).contains(&s.opponent.y)
            && s.player_hits <= HITS_TO_WIN
            && s.opponent_hits <= HITS_TO_WIN
    }
);

proptest! {
    #[test]
    fn input_snapshot_is_never_mutated(seed in any::<u64>(), steps in script()) {
        let state: SnowballState = drive(seed, &steps);
        let before = state.clone();
        let _ = state.tick(0.0);
        let _ = state.primary_action();
        prop_assert_eq!(state, before);
    }
}
