//! Host session: the single mutable cell around an immutable engine
//!
//! Per animation frame the host calls `frame`, which ticks once and forwards
//! that tick's events to the sound sink before the renderer reads the state.
//! Discrete input (start, action, reload) dispatches its own events
//! immediately. When the run is over, `press_continue` hands the summary back
//! exactly once.

use crate::audio::SoundSink;
use crate::games::{BreakerState, SlalomState, SniperState, SnowballState, VillageState};
use crate::highscores::{RecordOutcome, ScoreBook};
use crate::persistence::{CloudSync, KeyValueStore, ScoreUpload};
use crate::platform;
use crate::sim::{Activity, Controls, GameEvent, GameKind, MiniGame, RunSummary};

/// Host hand-off for a finished run
pub type FinishCallback = Box<dyn FnMut(&RunSummary)>;

/// Score book plus where it is persisted and mirrored
pub struct ScoreKeeper {
    book: ScoreBook,
    store: Box<dyn KeyValueStore>,
    sync: Box<dyn CloudSync>,
}

impl ScoreKeeper {
    /// Load the book from `store`
    pub fn open(store: Box<dyn KeyValueStore>, sync: Box<dyn CloudSync>) -> Self {
        let book = ScoreBook::load(store.as_ref());
        Self { book, store, sync }
    }

    pub fn book(&self) -> &ScoreBook {
        &self.book
    }

    /// Record a run; new records are saved locally and pushed to the cloud
    pub fn record(&mut self, summary: &RunSummary, date: &str) -> RecordOutcome {
        let outcome = self.book.record(summary.game, date, summary.score);
        if outcome.any() {
            log::info!(
                "New {} record: {} (all-time: {}, daily: {})",
                summary.game,
                summary.score,
                outcome.new_all_time,
                outcome.new_daily
            );
            self.book.save(self.store.as_mut());
            self.sync.push(ScoreUpload {
                game: summary.game,
                date: date.to_string(),
                score: summary.score,
            });
        }
        outcome
    }
}

/// One running mini-game
pub struct Session<G: MiniGame> {
    state: G,
    finished: bool,
    last_outcome: Option<RecordOutcome>,
    on_finish: Option<FinishCallback>,
    scores: Option<ScoreKeeper>,
}

impl<G: MiniGame> Session<G> {
    pub fn new(seed: u64) -> Self {
        Self::from_state(G::new_game(seed))
    }

    /// Wrap an existing snapshot
    pub fn from_state(state: G) -> Self {
        Self {
            state,
            finished: false,
            last_outcome: None,
            on_finish: None,
            scores: None,
        }
    }

    /// Register the host's game-over callback
    pub fn on_finish(mut self, callback: impl FnMut(&RunSummary) + 'static) -> Self {
        self.on_finish = Some(Box::new(callback));
        self
    }

    /// Record finished runs in a score book
    pub fn with_scores(mut self, scores: ScoreKeeper) -> Self {
        self.scores = Some(scores);
        self
    }

    pub fn scores(&self) -> Option<&ScoreKeeper> {
        self.scores.as_ref()
    }

    /// Detach the score keeper, e.g. to hand it to the next session
    pub fn take_scores(&mut self) -> Option<ScoreKeeper> {
        self.scores.take()
    }

    pub fn state(&self) -> &G {
        &self.state
    }

    pub fn kind(&self) -> GameKind {
        G::KIND
    }

    pub fn activity(&self) -> Activity {
        self.state.activity()
    }

    /// Names of the events in the current snapshot
    pub fn event_names(&self) -> Vec<&'static str> {
        self.state.events().iter().map(|e| e.name()).collect()
    }

    /// Leave the ready screen
    pub fn start(&mut self, now_ms: f64, sink: &mut dyn SoundSink) {
        if self.state.activity() != Activity::Idle {
            return;
        }
        let next = self.state.start(now_ms);
        log::debug!("{} started", G::KIND);
        self.apply_action(next, sink);
    }

    /// One animation frame: tick, then drain the tick's events into `sink`
    pub fn frame(&mut self, now_ms: f64, sink: &mut dyn SoundSink) {
        self.state = self.state.tick(now_ms);
        dispatch(self.state.events(), sink);
    }

    /// Primary action (shoot, serve, snip, throw)
    pub fn action(&mut self, sink: &mut dyn SoundSink) {
        let next = self.state.primary_action();
        self.apply_action(next, sink);
    }

    /// Secondary action (reload)
    pub fn secondary(&mut self, sink: &mut dyn SoundSink) {
        let next = self.state.secondary_action();
        self.apply_action(next, sink);
    }

    // A rejected action returns an equal snapshot whose events belong to the
    // previous call; nothing is replayed.
    fn apply_action(&mut self, next: G, sink: &mut dyn SoundSink) {
        if next == self.state {
            return;
        }
        dispatch(next.events(), sink);
        self.state = next;
    }

    pub fn controls_mut(&mut self) -> &mut Controls {
        self.state.controls_mut()
    }

    pub fn set_controls(&mut self, controls: Controls) {
        *self.state.controls_mut() = controls;
    }

    /// Pointer in canvas space
    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.state.set_pointer(x, y);
    }

    /// True once the summary has been handed back
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Which records the finished run beat, if scores are attached
    pub fn last_outcome(&self) -> Option<RecordOutcome> {
        self.last_outcome
    }

    /// Continue from a terminal screen, dated today
    pub fn press_continue(&mut self) -> Option<RunSummary> {
        self.press_continue_on(&platform::today())
    }

    /// Continue from a terminal screen
    ///
    /// Returns the summary the first time only; outside a terminal phase
    /// this does nothing.
    pub fn press_continue_on(&mut self, date: &str) -> Option<RunSummary> {
        if self.finished || self.state.activity() != Activity::Terminal {
            return None;
        }
        self.finished = true;

        let summary = self.state.summary();
        log::info!(
            "{} finished: score {}, hits {}, won {}",
            summary.game,
            summary.score,
            summary.hits,
            summary.won
        );

        if let Some(scores) = &mut self.scores {
            self.last_outcome = Some(scores.record(&summary, date));
        }
        if let Some(callback) = &mut self.on_finish {
            callback(&summary);
        }
        Some(summary)
    }

    /// Fresh run of the same game, keeping callback and scores
    pub fn restart(&mut self, seed: u64) {
        self.state = G::new_game(seed);
        self.finished = false;
        self.last_outcome = None;
    }
}

fn dispatch<E: GameEvent>(events: &[E], sink: &mut dyn SoundSink) {
    for event in events {
        sink.play_event(event.name());
    }
}

/// Any one of the five games, chosen at runtime
pub enum Arcade {
    Village(Session<VillageState>),
    IceBreaker(Session<BreakerState>),
    PolypSniper(Session<SniperState>),
    Slalom(Session<SlalomState>),
    Snowball(Session<SnowballState>),
}

macro_rules! each_session {
    ($arcade:expr, $session:ident => $body:expr) => {
        match $arcade {
            Arcade::Village($session) => $body,
            Arcade::IceBreaker($session) => $body,
            Arcade::PolypSniper($session) => $body,
            Arcade::Slalom($session) => $body,
            Arcade::Snowball($session) => $body,
        }
    };
}

impl Arcade {
    pub fn new(kind: GameKind, seed: u64) -> Self {
        log::info!("New {} session with seed {}", kind, seed);
        match kind {
            GameKind::Village => Arcade::Village(Session::new(seed)),
            GameKind::IceBreaker => Arcade::IceBreaker(Session::new(seed)),
            GameKind::PolypSniper => Arcade::PolypSniper(Session::new(seed)),
            GameKind::Slalom => Arcade::Slalom(Session::new(seed)),
            GameKind::Snowball => Arcade::Snowball(Session::new(seed)),
        }
    }

    pub fn kind(&self) -> GameKind {
        each_session!(self, s => s.kind())
    }

    pub fn with_scores(self, scores: ScoreKeeper) -> Self {
        match self {
            Arcade::Village(s) => Arcade::Village(s.with_scores(scores)),
            Arcade::IceBreaker(s) => Arcade::IceBreaker(s.with_scores(scores)),
            Arcade::PolypSniper(s) => Arcade::PolypSniper(s.with_scores(scores)),
            Arcade::Slalom(s) => Arcade::Slalom(s.with_scores(scores)),
            Arcade::Snowball(s) => Arcade::Snowball(s.with_scores(scores)),
        }
    }

    pub fn on_finish(self, callback: impl FnMut(&RunSummary) + 'static) -> Self {
        match self {
            Arcade::Village(s) => Arcade::Village(s.on_finish(callback)),
            Arcade::IceBreaker(s) => Arcade::IceBreaker(s.on_finish(callback)),
            Arcade::PolypSniper(s) => Arcade::PolypSniper(s.on_finish(callback)),
            Arcade::Slalom(s) => Arcade::Slalom(s.on_finish(callback)),
            Arcade::Snowball(s) => Arcade::Snowball(s.on_finish(callback)),
        }
    }

    pub fn scores(&self) -> Option<&ScoreKeeper> {
        each_session!(self, s => s.scores())
    }

    pub fn take_scores(&mut self) -> Option<ScoreKeeper> {
        each_session!(self, s => s.take_scores())
    }

    pub fn activity(&self) -> Activity {
        each_session!(self, s => s.activity())
    }

    pub fn frame_count(&self) -> u64 {
        each_session!(self, s => s.state().frame_count())
    }

    pub fn summary(&self) -> RunSummary {
        each_session!(self, s => s.state().summary())
    }

    pub fn event_names(&self) -> Vec<&'static str> {
        each_session!(self, s => s.event_names())
    }

    pub fn start(&mut self, now_ms: f64, sink: &mut dyn SoundSink) {
        each_session!(self, s => s.start(now_ms, sink))
    }

    pub fn frame(&mut self, now_ms: f64, sink: &mut dyn SoundSink) {
        each_session!(self, s => s.frame(now_ms, sink))
    }

    pub fn action(&mut self, sink: &mut dyn SoundSink) {
        each_session!(self, s => s.action(sink))
    }

    pub fn secondary(&mut self, sink: &mut dyn SoundSink) {
        each_session!(self, s => s.secondary(sink))
    }

    pub fn controls_mut(&mut self) -> &mut Controls {
        each_session!(self, s => s.controls_mut())
    }

    pub fn set_pointer(&mut self, x: f32, y: f32) {
        each_session!(self, s => s.set_pointer(x, y))
    }

    pub fn is_finished(&self) -> bool {
        each_session!(self, s => s.is_finished())
    }

    pub fn last_outcome(&self) -> Option<RecordOutcome> {
        each_session!(self, s => s.last_outcome())
    }

    pub fn press_continue(&mut self) -> Option<RunSummary> {
        each_session!(self, s => s.press_continue())
    }

    pub fn press_continue_on(&mut self, date: &str) -> Option<RunSummary> {
        each_session!(self, s => s.press_continue_on(date))
    }

    pub fn restart(&mut self, seed: u64) {
        each_session!(self, s => s.restart(seed))
    }

    /// Current snapshot as JSON for the renderer
    pub fn state_json(&self) -> Result<String, serde_json::Error> {
        each_session!(self, s => serde_json::to_string(s.state()))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::audio::RecordingSink;
    use crate::games::slalom::SlalomEvent;
    use crate::games::snowball::{Side, SnowballPhase};
    use crate::persistence::{MemoryStore, NullSync};

    fn finished_snowball(score: u64) -> SnowballState {
        let mut state = SnowballState::new(3);
        state.phase = SnowballPhase::GameOver;
        state.winner = Some(Side::Player);
        state.player_hits = 5;
        state.score = score;
        state
    }

    #[test]
    fn test_start_then_shoot_plays_immediately() {
        let mut sink = RecordingSink::new();
        let mut session: Session<VillageState> = Session::new(11);
        assert_eq!(session.activity(), Activity::Idle);

        session.start(0.0, &mut sink);
        assert_eq!(session.activity(), Activity::Active);

        sink.clear();
        session.action(&mut sink);
        assert_eq!(sink.count("shoot"), 1);
    }

    #[test]
    fn test_rejected_action_replays_nothing() {
        let mut state = SlalomState::new(5).start(0.0);
        state.events.push(SlalomEvent::Crash);
        let mut session = Session::from_state(state);

        let mut sink = RecordingSink::new();
        session.action(&mut sink);
        assert!(sink.played.is_empty());
    }

    #[test]
    fn test_frame_dispatches_tick_events_only() {
        let mut state = SlalomState::new(5).start(0.0);
        state.events.push(SlalomEvent::Crash);
        let mut session = Session::from_state(state);

        let mut sink = RecordingSink::new();
        session.frame(16.0, &mut sink);
        assert_eq!(sink.count("crash"), 0);
        assert_eq!(session.state().frame_count, 1);
    }

    #[test]
    fn test_continue_hands_back_once() {
        let calls = Rc::new(Cell::new(0));
        let seen = calls.clone();
        let mut session =
            Session::from_state(finished_snowball(700)).on_finish(move |summary| {
                assert_eq!(summary.score, 700);
                seen.set(seen.get() + 1);
            });

        let summary = session.press_continue_on("2026-04-01").unwrap();
        assert!(summary.won);
        assert_eq!(summary.game, GameKind::Snowball);
        assert!(session.is_finished());
        assert!(session.press_continue_on("2026-04-01").is_none());
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_continue_ignored_while_playing() {
        let mut session: Session<SniperState> = Session::new(2);
        assert!(session.press_continue_on("2026-04-01").is_none());
        session.start(0.0, &mut RecordingSink::new());
        assert!(session.press_continue_on("2026-04-01").is_none());
        assert!(!session.is_finished());
    }

    #[test]
    fn test_finished_run_recorded() {
        let keeper = ScoreKeeper::open(Box::new(MemoryStore::default()), Box::new(NullSync));
        let mut session = Session::from_state(finished_snowball(900)).with_scores(keeper);

        session.press_continue_on("2026-04-01");
        let outcome = session.last_outcome().unwrap();
        assert!(outcome.new_all_time);
        let book = session.scores().unwrap().book();
        assert_eq!(book.best_all_time(GameKind::Snowball), 900);
        assert_eq!(book.best_on(GameKind::Snowball, "2026-04-01"), 900);
    }

    #[test]
    fn test_restart_resets_hand_off() {
        let mut session = Session::from_state(finished_snowball(10));
        session.press_continue_on("2026-04-01");
        session.restart(8);
        assert!(!session.is_finished());
        assert_eq!(session.activity(), Activity::Idle);
    }

    #[test]
    fn test_arcade_dispatch() {
        for kind in GameKind::ALL {
            let mut arcade = Arcade::new(kind, 42);
            assert_eq!(arcade.kind(), kind);

            let mut sink = RecordingSink::new();
            arcade.start(0.0, &mut sink);
            arcade.frame(16.0, &mut sink);
            arcade.frame(32.0, &mut sink);
            assert_eq!(arcade.frame_count(), 2);

            let json = arcade.state_json().unwrap();
            let value: serde_json::Value = serde_json::from_str(&json).unwrap();
            assert_eq!(value["frame_count"], 2);
            assert_eq!(arcade.summary().game, kind);
        }
    }

    #[test]
    fn test_arcade_controls_reach_state() {
        let mut arcade = Arcade::new(GameKind::Slalom, 1);
        arcade.controls_mut().left = true;
        match &arcade {
            Arcade::Slalom(s) => assert!(s.state().input.left),
            _ => unreachable!(),
        }
    }
}
