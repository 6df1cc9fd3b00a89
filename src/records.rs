//! Personal records
//!
//! Best survival time, best apple haul and the number of pauses, each persisted
//! as a plain integer under its own storage key. Absent or unparsable values
//! read as 0.

use crate::persistence::Storage;

/// Which records a finished run improved
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordUpdate {
    pub best_time: bool,
    pub best_apples: bool,
}

impl RecordUpdate {
    pub fn any(&self) -> bool {
        self.best_time || self.best_apples
    }
}

/// Persisted personal bests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Records {
    /// Longest survival (in-game seconds)
    pub best_time: u32,
    /// Most apples in one run
    pub best_apples: u32,
    /// Times the game was paused
    pub pause_count: u32,
}

impl Records {
    pub const BEST_TIME_KEY: &'static str = "bestTime";
    pub const BEST_APPLES_KEY: &'static str = "bestApples";
    pub const PAUSE_COUNT_KEY: &'static str = "nPause";

    /// Read all records from storage
    pub fn load<S: Storage + ?Sized>(storage: &S) -> Self {
        Self {
            best_time: read_count(storage, Self::BEST_TIME_KEY),
            best_apples: read_count(storage, Self::BEST_APPLES_KEY),
            pause_count: read_count(storage, Self::PAUSE_COUNT_KEY),
        }
    }

    /// Compare a finished run against the persisted bests and store any
    /// improvement. Re-reads storage first so the comparison is against what
    /// is actually persisted.
    pub fn submit_run<S: Storage + ?Sized>(
        &mut self,
        storage: &mut S,
        seconds: u32,
        apples: u32,
    ) -> RecordUpdate {
        *self = Self::load(storage);
        let mut update = RecordUpdate::default();

        if seconds > self.best_time {
            self.best_time = seconds;
            write_count(storage, Self::BEST_TIME_KEY, seconds);
            update.best_time = true;
        }

        if apples > self.best_apples {
            self.best_apples = apples;
            write_count(storage, Self::BEST_APPLES_KEY, apples);
            update.best_apples = true;
        }

        update
    }

    /// Count one pause
    pub fn record_pause<S: Storage + ?Sized>(&mut self, storage: &mut S) {
        self.pause_count = read_count(storage, Self::PAUSE_COUNT_KEY).saturating_add(1);
        write_count(storage, Self::PAUSE_COUNT_KEY, self.pause_count);
    }
}

fn read_count<S: Storage + ?Sized>(storage: &S, key: &str) -> u32 {
    storage
        .get_item(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(0)
}

fn write_count<S: Storage + ?Sized>(storage: &mut S, key: &str, value: u32) {
    if let Err(e) = storage.set_item(key, &value.to_string()) {
        log::warn!("Could not persist {}: {}", key, e);
    }
}
