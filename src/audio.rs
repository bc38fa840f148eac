//! Sound dispatcher using the Web Audio API
//!
//! Engines emit symbolic event names; this module maps them to procedurally
//! synthesized blips. No audio files are needed. The device is owned by an
//! explicit `AudioService` that is opened on the first user gesture and closed
//! when the host unmounts.

#[cfg(target_arch = "wasm32")]
use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use self::Wave::{Sawtooth, Sine, Square, Triangle};
use crate::settings::Settings;

/// Sound effect types, one per event name in the arcade vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    // Shared
    Miss,
    LevelComplete,
    SectionClear,
    Victory,
    GameOver,
    Combo,
    // Defend the Village
    Shoot,
    Hit,
    Reload,
    ReloadDone,
    WolfWhimper,
    BoarSqueal,
    BearGrowl,
    BossRoar,
    BossHit,
    BossDefeated,
    Breach,
    // Ice Breaker
    Serve,
    Paddle,
    Wall,
    BrickHit,
    BrickBreak,
    Powerup,
    LifeLost,
    // Polyp Sniper
    Snip,
    PolypSnipped,
    PolypEscaped,
    // Slalom
    GatePass,
    GateMiss,
    Crash,
    RivalAhead,
    RivalBehind,
    RivalBeaten,
    // Snowball Showdown
    Throw,
    OpponentThrow,
    OpponentHit,
    PlayerHit,
    Dodge,
}

/// Oscillator shape, mirrored onto `OscillatorType` in the browser
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wave {
    Sine,
    Square,
    Triangle,
    Sawtooth,
}

/// One oscillator voice: start frequency, optional exponential sweep target,
/// peak gain, length and start offset (seconds)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub freq: f32,
    pub sweep_to: Option<f32>,
    pub wave: Wave,
    pub gain: f32,
    pub duration: f64,
    pub delay: f64,
}

const fn tone(freq: f32, wave: Wave, gain: f32, duration: f64) -> Tone {
    Tone {
        freq,
        sweep_to: None,
        wave,
        gain,
        duration,
        delay: 0.0,
    }
}

const fn sweep(freq: f32, to: f32, wave: Wave, gain: f32, duration: f64) -> Tone {
    Tone {
        freq,
        sweep_to: Some(to),
        wave,
        gain,
        duration,
        delay: 0.0,
    }
}

const fn note(freq: f32, wave: Wave, gain: f32, duration: f64, delay: f64) -> Tone {
    Tone {
        freq,
        sweep_to: None,
        wave,
        gain,
        duration,
        delay,
    }
}

static SHOOT: [Tone; 2] = [
    sweep(900.0, 120.0, Square, 0.3, 0.12),
    tone(60.0, Sine, 0.4, 0.1),
];
static HIT: [Tone; 1] = [sweep(500.0, 250.0, Triangle, 0.3, 0.1)];
static MISS: [Tone; 1] = [sweep(300.0, 150.0, Sine, 0.2, 0.15)];
static RELOAD: [Tone; 2] = [
    note(200.0, Square, 0.15, 0.04, 0.0),
    note(260.0, Square, 0.15, 0.04, 0.12),
];
static RELOAD_DONE: [Tone; 1] = [tone(880.0, Triangle, 0.2, 0.08)];
static WOLF_WHIMPER: [Tone; 1] = [sweep(1100.0, 500.0, Sine, 0.25, 0.35)];
static BOAR_SQUEAL: [Tone; 1] = [sweep(700.0, 1400.0, Sawtooth, 0.18, 0.2)];
static BEAR_GROWL: [Tone; 2] = [
    sweep(110.0, 70.0, Sawtooth, 0.3, 0.4),
    tone(55.0, Sine, 0.3, 0.4),
];
static BOSS_ROAR: [Tone; 3] = [
    sweep(160.0, 50.0, Sawtooth, 0.4, 0.8),
    sweep(240.0, 80.0, Square, 0.15, 0.6),
    tone(40.0, Sine, 0.4, 0.8),
];
static BOSS_HIT: [Tone; 2] = [
    sweep(300.0, 90.0, Square, 0.3, 0.2),
    tone(70.0, Sine, 0.35, 0.15),
];
static BOSS_DEFEATED: [Tone; 4] = [
    note(392.0, Triangle, 0.3, 0.3, 0.0),
    note(330.0, Triangle, 0.3, 0.3, 0.15),
    note(262.0, Triangle, 0.3, 0.3, 0.3),
    note(131.0, Sine, 0.35, 0.6, 0.45),
];
static BREACH: [Tone; 2] = [
    sweep(200.0, 60.0, Sawtooth, 0.35, 0.5),
    tone(50.0, Sine, 0.4, 0.4),
];
static LEVEL_COMPLETE: [Tone; 4] = [
    note(400.0, Triangle, 0.3, 0.4, 0.0),
    note(500.0, Triangle, 0.3, 0.4, 0.1),
    note(600.0, Triangle, 0.3, 0.4, 0.2),
    note(800.0, Triangle, 0.3, 0.4, 0.3),
];
static VICTORY: [Tone; 5] = [
    note(523.0, Square, 0.2, 0.2, 0.0),
    note(659.0, Square, 0.2, 0.2, 0.12),
    note(784.0, Square, 0.2, 0.2, 0.24),
    note(1047.0, Square, 0.25, 0.5, 0.36),
    note(523.0, Triangle, 0.2, 0.7, 0.36),
];
static GAME_OVER: [Tone; 4] = [
    note(400.0, Triangle, 0.3, 0.3, 0.0),
    note(350.0, Triangle, 0.3, 0.3, 0.25),
    note(300.0, Triangle, 0.3, 0.3, 0.5),
    note(200.0, Triangle, 0.35, 0.6, 0.75),
];
static COMBO: [Tone; 2] = [
    note(1000.0, Sine, 0.2, 0.1, 0.0),
    note(1500.0, Sine, 0.2, 0.12, 0.06),
];
static SERVE: [Tone; 1] = [sweep(200.0, 600.0, Triangle, 0.3, 0.2)];
static PADDLE: [Tone; 1] = [sweep(150.0, 60.0, Sine, 0.6, 0.1)];
static WALL: [Tone; 1] = [tone(400.0, Sine, 0.3, 0.08)];
static BRICK_HIT: [Tone; 1] = [tone(300.0, Triangle, 0.25, 0.05)];
static BRICK_BREAK: [Tone; 3] = [
    note(1200.0, Sine, 0.2, 0.3, 0.0),
    note(1800.0, Sine, 0.2, 0.3, 0.02),
    note(2400.0, Sine, 0.2, 0.3, 0.04),
];
static POWERUP: [Tone; 3] = [
    note(600.0, Sine, 0.25, 0.15, 0.0),
    note(800.0, Sine, 0.25, 0.15, 0.08),
    note(1000.0, Sine, 0.25, 0.15, 0.16),
];
static LIFE_LOST: [Tone; 1] = [sweep(300.0, 20.0, Sine, 0.4, 0.8)];
static SNIP: [Tone; 2] = [
    note(2200.0, Square, 0.12, 0.03, 0.0),
    note(1800.0, Square, 0.12, 0.03, 0.05),
];
static POLYP_SNIPPED: [Tone; 1] = [sweep(400.0, 500.0, Sine, 0.3, 0.25)];
static POLYP_ESCAPED: [Tone; 1] = [sweep(250.0, 90.0, Sine, 0.3, 0.4)];
static SECTION_CLEAR: [Tone; 3] = [
    note(523.0, Triangle, 0.3, 0.3, 0.0),
    note(659.0, Triangle, 0.3, 0.3, 0.1),
    note(784.0, Triangle, 0.3, 0.5, 0.2),
];
static GATE_PASS: [Tone; 1] = [tone(1320.0, Sine, 0.2, 0.1)];
static GATE_MISS: [Tone; 1] = [tone(180.0, Square, 0.15, 0.15)];
static CRASH: [Tone; 2] = [
    sweep(100.0, 30.0, Sawtooth, 0.5, 0.4),
    tone(1500.0, Square, 0.2, 0.1),
];
static RIVAL_AHEAD: [Tone; 1] = [sweep(600.0, 400.0, Triangle, 0.2, 0.2)];
static RIVAL_BEHIND: [Tone; 1] = [sweep(400.0, 600.0, Triangle, 0.2, 0.2)];
static RIVAL_BEATEN: [Tone; 3] = [
    note(784.0, Square, 0.2, 0.15, 0.0),
    note(988.0, Square, 0.2, 0.15, 0.1),
    note(1175.0, Square, 0.2, 0.3, 0.2),
];
static THROW: [Tone; 1] = [sweep(300.0, 800.0, Triangle, 0.25, 0.15)];
static OPPONENT_THROW: [Tone; 1] = [sweep(250.0, 650.0, Triangle, 0.2, 0.15)];
static OPPONENT_HIT: [Tone; 2] = [
    tone(90.0, Sine, 0.4, 0.15),
    sweep(900.0, 1200.0, Sine, 0.2, 0.15),
];
static PLAYER_HIT: [Tone; 2] = [
    tone(70.0, Sine, 0.45, 0.2),
    sweep(500.0, 200.0, Square, 0.2, 0.2),
];
static DODGE: [Tone; 1] = [sweep(1200.0, 700.0, Sine, 0.15, 0.12)];

impl SoundEffect {
    pub const ALL: [SoundEffect; 38] = [
        SoundEffect::Miss,
        SoundEffect::LevelComplete,
        SoundEffect::SectionClear,
        SoundEffect::Victory,
        SoundEffect::GameOver,
        SoundEffect::Combo,
        SoundEffect::Shoot,
        SoundEffect::Hit,
        SoundEffect::Reload,
        SoundEffect::ReloadDone,
        SoundEffect::WolfWhimper,
        SoundEffect::BoarSqueal,
        SoundEffect::BearGrowl,
        SoundEffect::BossRoar,
        SoundEffect::BossHit,
        SoundEffect::BossDefeated,
        SoundEffect::Breach,
        SoundEffect::Serve,
        SoundEffect::Paddle,
        SoundEffect::Wall,
        SoundEffect::BrickHit,
        SoundEffect::BrickBreak,
        SoundEffect::Powerup,
        SoundEffect::LifeLost,
        SoundEffect::Snip,
        SoundEffect::PolypSnipped,
        SoundEffect::PolypEscaped,
        SoundEffect::GatePass,
        SoundEffect::GateMiss,
        SoundEffect::Crash,
        SoundEffect::RivalAhead,
        SoundEffect::RivalBehind,
        SoundEffect::RivalBeaten,
        SoundEffect::Throw,
        SoundEffect::OpponentThrow,
        SoundEffect::OpponentHit,
        SoundEffect::PlayerHit,
        SoundEffect::Dodge,
    ];

    /// Map an engine event name to its sound
    pub fn from_event(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|effect| effect.event_name() == name)
    }

    /// The event name this sound answers to
    pub fn event_name(&self) -> &'static str {
        match self {
            SoundEffect::Miss => "miss",
            SoundEffect::LevelComplete => "level_complete",
            SoundEffect::SectionClear => "section_clear",
            SoundEffect::Victory => "victory",
            SoundEffect::GameOver => "game_over",
            SoundEffect::Combo => "combo",
            SoundEffect::Shoot => "shoot",
            SoundEffect::Hit => "hit",
            SoundEffect::Reload => "reload",
            SoundEffect::ReloadDone => "reload_done",
            SoundEffect::WolfWhimper => "wolf_whimper",
            SoundEffect::BoarSqueal => "boar_squeal",
            SoundEffect::BearGrowl => "bear_growl",
            SoundEffect::BossRoar => "boss_roar",
            SoundEffect::BossHit => "boss_hit",
            SoundEffect::BossDefeated => "boss_defeated",
            SoundEffect::Breach => "breach",
            SoundEffect::Serve => "serve",
            SoundEffect::Paddle => "paddle",
            SoundEffect::Wall => "wall",
            SoundEffect::BrickHit => "brick_hit",
            SoundEffect::BrickBreak => "brick_break",
            SoundEffect::Powerup => "powerup",
            SoundEffect::LifeLost => "life_lost",
            SoundEffect::Snip => "snip",
            SoundEffect::PolypSnipped => "polyp_snipped",
            SoundEffect::PolypEscaped => "polyp_escaped",
            SoundEffect::GatePass => "gate_pass",
            SoundEffect::GateMiss => "gate_miss",
            SoundEffect::Crash => "crash",
            SoundEffect::RivalAhead => "rival_ahead",
            SoundEffect::RivalBehind => "rival_behind",
            SoundEffect::RivalBeaten => "rival_beaten",
            SoundEffect::Throw => "throw",
            SoundEffect::OpponentThrow => "opponent_throw",
            SoundEffect::OpponentHit => "opponent_hit",
            SoundEffect::PlayerHit => "player_hit",
            SoundEffect::Dodge => "dodge",
        }
    }

    /// Oscillator voices making up this sound
    pub fn tones(&self) -> &'static [Tone] {
        match self {
            SoundEffect::Miss => &MISS,
            SoundEffect::LevelComplete => &LEVEL_COMPLETE,
            SoundEffect::SectionClear => &SECTION_CLEAR,
            SoundEffect::Victory => &VICTORY,
            SoundEffect::GameOver => &GAME_OVER,
            SoundEffect::Combo => &COMBO,
            SoundEffect::Shoot => &SHOOT,
            SoundEffect::Hit => &HIT,
            SoundEffect::Reload => &RELOAD,
            SoundEffect::ReloadDone => &RELOAD_DONE,
            SoundEffect::WolfWhimper => &WOLF_WHIMPER,
            SoundEffect::BoarSqueal => &BOAR_SQUEAL,
            SoundEffect::BearGrowl => &BEAR_GROWL,
            SoundEffect::BossRoar => &BOSS_ROAR,
            SoundEffect::BossHit => &BOSS_HIT,
            SoundEffect::BossDefeated => &BOSS_DEFEATED,
            SoundEffect::Breach => &BREACH,
            SoundEffect::Serve => &SERVE,
            SoundEffect::Paddle => &PADDLE,
            SoundEffect::Wall => &WALL,
            SoundEffect::BrickHit => &BRICK_HIT,
            SoundEffect::BrickBreak => &BRICK_BREAK,
            SoundEffect::Powerup => &POWERUP,
            SoundEffect::LifeLost => &LIFE_LOST,
            SoundEffect::Snip => &SNIP,
            SoundEffect::PolypSnipped => &POLYP_SNIPPED,
            SoundEffect::PolypEscaped => &POLYP_ESCAPED,
            SoundEffect::GatePass => &GATE_PASS,
            SoundEffect::GateMiss => &GATE_MISS,
            SoundEffect::Crash => &CRASH,
            SoundEffect::RivalAhead => &RIVAL_AHEAD,
            SoundEffect::RivalBehind => &RIVAL_BEHIND,
            SoundEffect::RivalBeaten => &RIVAL_BEATEN,
            SoundEffect::Throw => &THROW,
            SoundEffect::OpponentThrow => &OPPONENT_THROW,
            SoundEffect::OpponentHit => &OPPONENT_HIT,
            SoundEffect::PlayerHit => &PLAYER_HIT,
            SoundEffect::Dodge => &DODGE,
        }
    }

    /// Seconds until the last voice stops
    pub fn length(&self) -> f64 {
        self.tones()
            .iter()
            .map(|t| t.delay + t.duration)
            .fold(0.0, f64::max)
    }
}

/// Anything that can react to engine events
pub trait SoundSink {
    fn play_event(&mut self, name: &'static str);
}

/// Sink that remembers event names, for tests and headless runs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingSink {
    pub played: Vec<&'static str>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, name: &str) -> usize {
        self.played.iter().filter(|n| **n == name).count()
    }

    pub fn clear(&mut self) {
        self.played.clear();
    }
}

impl SoundSink for RecordingSink {
    fn play_event(&mut self, name: &'static str) {
        self.played.push(name);
    }
}

/// Owned audio device for one host
///
/// Browsers only allow audio after a user gesture, so the device is created
/// lazily by `unlock`. `dispose` (or drop) releases it.
pub struct AudioService {
    #[cfg(target_arch = "wasm32")]
    ctx: Option<AudioContext>,
    volume: f32,
    unlocked: bool,
}

impl AudioService {
    pub fn new(settings: &Settings) -> Self {
        Self {
            #[cfg(target_arch = "wasm32")]
            ctx: None,
            volume: settings.effective_volume(),
            unlocked: false,
        }
    }

    /// Pick up changed volumes or mute
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.volume = settings.effective_volume();
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    /// Open (or resume) the device; call from a user gesture
    #[cfg(target_arch = "wasm32")]
    pub fn unlock(&mut self) {
        if self.ctx.is_none() {
            // May fail outside a secure context
            self.ctx = AudioContext::new().ok();
            if self.ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
                return;
            }
        }
        if let Some(ctx) = &self.ctx {
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }
        }
        self.unlocked = true;
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn unlock(&mut self) {
        self.unlocked = true;
    }

    /// Play a sound effect; silently skipped while locked or muted
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.volume;
        if vol <= 0.0 || !self.unlocked {
            return;
        }
        self.synthesize(effect, vol);
    }

    /// Release the device
    pub fn dispose(&mut self) {
        #[cfg(target_arch = "wasm32")]
        if let Some(ctx) = self.ctx.take() {
            let _ = ctx.close();
            log::debug!("AudioContext closed");
        }
        self.unlocked = false;
    }

    #[cfg(target_arch = "wasm32")]
    fn synthesize(&self, effect: SoundEffect, vol: f32) {
        let Some(ctx) = &self.ctx else { return };

        for tone in effect.tones() {
            let Some((osc, gain)) = self.create_osc(ctx, tone.freq, tone.wave.into()) else {
                continue;
            };
            let t = ctx.current_time() + tone.delay;
            let end = t + tone.duration;

            gain.gain().set_value_at_time(vol * tone.gain, t).ok();
            gain.gain().exponential_ramp_to_value_at_time(0.01, end).ok();
            if let Some(to) = tone.sweep_to {
                osc.frequency().set_value_at_time(tone.freq, t).ok();
                osc.frequency().exponential_ramp_to_value_at_time(to, end).ok();
            }

            osc.start_with_when(t).ok();
            osc.stop_with_when(end + 0.05).ok();
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn synthesize(&self, effect: SoundEffect, vol: f32) {
        log::trace!("sound {:?} at {:.2}", effect, vol);
    }

    /// Create an oscillator with gain envelope
    #[cfg(target_arch = "wasm32")]
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }
}

impl SoundSink for AudioService {
    fn play_event(&mut self, name: &'static str) {
        match SoundEffect::from_event(name) {
            Some(effect) => self.play(effect),
            None => log::debug!("No sound for event '{}'", name),
        }
    }
}

impl Drop for AudioService {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(target_arch = "wasm32")]
impl From<Wave> for OscillatorType {
    fn from(wave: Wave) -> Self {
        match wave {
            Wave::Sine => OscillatorType::Sine,
            Wave::Square => OscillatorType::Square,
            Wave::Triangle => OscillatorType::Triangle,
            Wave::Sawtooth => OscillatorType::Sawtooth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::{BreakerState, SlalomState, SniperState, SnowballState, VillageState};
    use crate::sim::{GameEvent, MiniGame};

    #[test]
    fn test_event_names_unique() {
        for (i, a) in SoundEffect::ALL.iter().enumerate() {
            for b in &SoundEffect::ALL[i + 1..] {
                assert_ne!(a.event_name(), b.event_name());
            }
        }
    }

    #[test]
    fn test_from_event_roundtrips_names() {
        for effect in SoundEffect::ALL {
            assert_eq!(SoundEffect::from_event(effect.event_name()), Some(effect));
        }
        assert_eq!(SoundEffect::from_event("kazoo"), None);
    }

    #[test]
    fn test_every_effect_has_voices() {
        for effect in SoundEffect::ALL {
            assert!(!effect.tones().is_empty(), "{:?}", effect);
            assert!(effect.length() > 0.0);
        }
    }

    fn assert_all_mapped<G: MiniGame>(events: &[G::Event]) {
        for event in events {
            assert!(
                SoundEffect::from_event(event.name()).is_some(),
                "unmapped event {}",
                event.name()
            );
        }
    }

    #[test]
    fn test_engine_vocabularies_mapped() {
        use crate::games::breaker::BreakerEvent;
        use crate::games::slalom::SlalomEvent;
        use crate::games::sniper::SniperEvent;
        use crate::games::snowball::SnowballEvent;
        use crate::games::village::VillageEvent;

        assert_all_mapped::<VillageState>(&[
            VillageEvent::Shoot,
            VillageEvent::Hit,
            VillageEvent::Miss,
            VillageEvent::Reload,
            VillageEvent::ReloadDone,
            VillageEvent::WolfWhimper,
            VillageEvent::BoarSqueal,
            VillageEvent::BearGrowl,
            VillageEvent::BossRoar,
            VillageEvent::BossHit,
            VillageEvent::BossDefeated,
            VillageEvent::Breach,
            VillageEvent::LevelComplete,
            VillageEvent::Victory,
            VillageEvent::GameOver,
        ]);
        assert_all_mapped::<BreakerState>(&[
            BreakerEvent::Serve,
            BreakerEvent::Paddle,
            BreakerEvent::Wall,
            BreakerEvent::BrickHit,
            BreakerEvent::BrickBreak,
            BreakerEvent::Powerup,
            BreakerEvent::LifeLost,
            BreakerEvent::LevelComplete,
            BreakerEvent::Victory,
            BreakerEvent::GameOver,
        ]);
        assert_all_mapped::<SniperState>(&[
            SniperEvent::Snip,
            SniperEvent::PolypSnipped,
            SniperEvent::PolypEscaped,
            SniperEvent::Miss,
            SniperEvent::Combo,
            SniperEvent::SectionClear,
            SniperEvent::Victory,
            SniperEvent::GameOver,
        ]);
        assert_all_mapped::<SlalomState>(&[
            SlalomEvent::GatePass,
            SlalomEvent::GateMiss,
            SlalomEvent::Crash,
            SlalomEvent::RivalAhead,
            SlalomEvent::RivalBehind,
            SlalomEvent::RivalBeaten,
            SlalomEvent::SectionClear,
            SlalomEvent::Victory,
            SlalomEvent::GameOver,
        ]);
        assert_all_mapped::<SnowballState>(&[
            SnowballEvent::Throw,
            SnowballEvent::OpponentThrow,
            SnowballEvent::OpponentHit,
            SnowballEvent::PlayerHit,
            SnowballEvent::Miss,
            SnowballEvent::Dodge,
            SnowballEvent::Victory,
            SnowballEvent::GameOver,
        ]);
    }

    #[test]
    fn test_locked_service_is_silent() {
        let mut service = AudioService::new(&Settings::default());
        assert!(!service.is_unlocked());
        service.play_event("shoot");
        service.unlock();
        assert!(service.is_unlocked());
        service.dispose();
        assert!(!service.is_unlocked());
    }

    #[test]
    fn test_recording_sink_counts() {
        let mut sink = RecordingSink::new();
        sink.play_event("hit");
        sink.play_event("hit");
        sink.play_event("miss");
        assert_eq!(sink.count("hit"), 2);
        sink.clear();
        assert!(sink.played.is_empty());
    }
}
