//! Best-score records
//!
//! Per game: an all-time best plus a best per calendar day. Persisted to the
//! key-value store; daily entries older than 30 days are pruned on record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::persistence::{self, KeyValueStore, SCORES_KEY};
use crate::platform::{days_between, parse_date};
use crate::sim::GameKind;

/// Daily bests are kept this many days back from the newest record
pub const DAILY_RETENTION_DAYS: i64 = 30;

/// Records for a single game
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub all_time: u64,
    /// `YYYY-MM-DD` -> best score that day
    pub daily: BTreeMap<String, u64>,
}

/// Which records a score beat
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordOutcome {
    pub new_all_time: bool,
    pub new_daily: bool,
}

impl RecordOutcome {
    pub fn any(&self) -> bool {
        self.new_all_time || self.new_daily
    }
}

/// Best scores for every game, keyed by `GameKind::as_str`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBook {
    pub games: BTreeMap<String, GameRecord>,
}

impl ScoreBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished run's score for `date` (`YYYY-MM-DD`)
    ///
    /// A score of 0 never sets a record.
    pub fn record(&mut self, kind: GameKind, date: &str, score: u64) -> RecordOutcome {
        let mut outcome = RecordOutcome::default();
        if score == 0 {
            return outcome;
        }
        let entry = self.games.entry(kind.as_str().to_string()).or_default();

        if score > entry.all_time {
            entry.all_time = score;
            outcome.new_all_time = true;
        }
        let day = entry.daily.entry(date.to_string()).or_insert(0);
        if score > *day {
            *day = score;
            outcome.new_daily = true;
        }

        self.prune(date);
        outcome
    }

    /// Drop daily entries older than the retention window before `today`
    pub fn prune(&mut self, today: &str) {
        if parse_date(today).is_none() {
            return;
        }
        for record in self.games.values_mut() {
            record.daily.retain(|date, _| {
                days_between(date, today)
                    .map(|age| age <= DAILY_RETENTION_DAYS)
                    .unwrap_or(false)
            });
        }
    }

    pub fn best_all_time(&self, kind: GameKind) -> u64 {
        self.games.get(kind.as_str()).map(|r| r.all_time).unwrap_or(0)
    }

    pub fn best_on(&self, kind: GameKind, date: &str) -> u64 {
        self.games
            .get(kind.as_str())
            .and_then(|r| r.daily.get(date).copied())
            .unwrap_or(0)
    }

    /// Load from the store, starting fresh if missing or corrupt
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let book: Self = persistence::load_or_default(store, SCORES_KEY);
        log::info!("Loaded best scores for {} games", book.games.len());
        book
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) {
        persistence::save_or_log(store, SCORES_KEY, self);
    }
}
