//! Frostbite Arcade headless runner
//!
//! The browser build is driven from JavaScript through `web::ArcadeHandle`.
//! Natively this plays any cabinet on autopilot and logs the result:
//!
//! ```text
//! frostbite-arcade [game|all] [seed]
//! ```

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use frostbite_arcade::GameKind;
    use frostbite_arcade::persistence::{MemoryStore, NullSync};
    use frostbite_arcade::session::ScoreKeeper;

    env_logger::init();
    log::info!("Frostbite Arcade (native) starting...");

    let mut args = std::env::args().skip(1);
    let game = args.next().unwrap_or_else(|| "all".to_string());
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0xF057);

    let kinds: Vec<GameKind> = if game == "all" {
        GameKind::ALL.to_vec()
    } else {
        match GameKind::parse(&game) {
            Some(kind) => vec![kind],
            None => {
                log::error!("Unknown game '{}'", game);
                std::process::exit(2);
            }
        }
    };

    let mut scores = Some(ScoreKeeper::open(
        Box::new(MemoryStore::default()),
        Box::new(NullSync),
    ));
    for kind in kinds {
        scores = autopilot::run(kind, seed, scores.take());
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use frostbite_arcade::GameKind;
    use frostbite_arcade::audio::{AudioService, RecordingSink, SoundSink};
    use frostbite_arcade::consts::{CANVAS_HEIGHT, CANVAS_WIDTH, FRAMES_PER_SECOND};
    use frostbite_arcade::platform;
    use frostbite_arcade::session::{Arcade, ScoreKeeper};
    use frostbite_arcade::settings::Settings;
    use frostbite_arcade::sim::Activity;

    /// Ten minutes of play
    const MAX_FRAMES: u64 = 10 * 60 * FRAMES_PER_SECOND as u64;
    const FRAME_MS: f64 = 1000.0 / FRAMES_PER_SECOND as f64;

    /// Forwards to the audio service and keeps a tally
    struct Tee {
        audio: AudioService,
        log: RecordingSink,
    }

    impl SoundSink for Tee {
        fn play_event(&mut self, name: &'static str) {
            self.audio.play_event(name);
            self.log.play_event(name);
        }
    }

    pub fn run(kind: GameKind, seed: u64, scores: Option<ScoreKeeper>) -> Option<ScoreKeeper> {
        let mut arcade = Arcade::new(kind, seed);
        if let Some(scores) = scores {
            arcade = arcade.with_scores(scores);
        }

        let mut sink = Tee {
            audio: AudioService::new(&Settings::default()),
            log: RecordingSink::new(),
        };
        sink.audio.unlock();

        let mut now = platform::now_ms();
        arcade.start(now, &mut sink);

        while arcade.activity() != Activity::Terminal && arcade.frame_count() < MAX_FRAMES {
            now += FRAME_MS;
            steer(&mut arcade);
            arcade.frame(now, &mut sink);

            let frame = arcade.frame_count();
            if frame % 12 == 0 {
                arcade.action(&mut sink);
            }
            if frame % 300 == 0 {
                arcade.secondary(&mut sink);
            }
        }

        match arcade.press_continue() {
            Some(summary) => log::info!(
                "{}: score {} hits {} won {} in {:.1}s ({} sound events)",
                kind,
                summary.score,
                summary.hits,
                summary.won,
                summary.elapsed_ms / 1000.0,
                sink.log.played.len()
            ),
            None => log::warn!(
                "{}: still running after {} frames, score {}",
                kind,
                arcade.frame_count(),
                arcade.summary().score
            ),
        }
        sink.audio.dispose();
        arcade.take_scores()
    }

    /// Sweep held keys and the pointer in slow patterns
    fn steer(arcade: &mut Arcade) {
        let t = arcade.frame_count() as f32 / FRAMES_PER_SECOND as f32;

        let controls = arcade.controls_mut();
        let phase = (arcade_phase(t) * 4.0) as u32;
        controls.left = phase == 0;
        controls.right = phase == 2;
        controls.up = phase == 1;
        controls.down = phase == 3;

        let x = CANVAS_WIDTH * (0.5 + 0.4 * (t * 0.9).sin());
        let y = CANVAS_HEIGHT * (0.5 + 0.35 * (t * 1.3).cos());
        arcade.set_pointer(x, y);
    }

    /// 0..1 over a three-second cycle
    fn arcade_phase(t: f32) -> f32 {
        (t / 3.0).fract()
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::wasm_main, this is just to satisfy the compiler
}
