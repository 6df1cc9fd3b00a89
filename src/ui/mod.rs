//! HUD port
//!
//! The simulation reports to a `Hud` fire-and-forget. On the web this is the
//! DOM; natively (and headless) it is the log.

#[cfg(target_arch = "wasm32")]
pub mod dom;

#[cfg(target_arch = "wasm32")]
pub use dom::DomHud;

use crate::records::Records;

/// Live run numbers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Metrics {
    pub seconds: u32,
    pub apples: u32,
    pub lives: u8,
}

impl Metrics {
    pub fn timer_text(&self) -> String {
        format!("Time: {}s", self.seconds)
    }

    pub fn apples_text(&self) -> String {
        format!("Apples: {}", self.apples)
    }

    pub fn lives_text(&self) -> String {
        format!("Lives: {}", self.lives)
    }
}

/// Full-screen panels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    Start,
    GameOver,
}

/// Game-over line shown to the player
pub fn final_summary(seconds: u32, apples: u32) -> String {
    format!("You survived {seconds} seconds and collected {apples} apples.")
}

/// Display sink for game status
pub trait Hud {
    fn metrics(&mut self, metrics: &Metrics);
    fn records(&mut self, records: &Records);
    fn game_over(&mut self, summary: &str);
    fn overlay(&mut self, overlay: Overlay, visible: bool);
    /// Pause button label state
    fn paused(&mut self, paused: bool);
}

/// Writes HUD updates to the log
#[derive(Debug, Default)]
pub struct LogHud;

impl Hud for LogHud {
    fn metrics(&mut self, metrics: &Metrics) {
        log::debug!(
            "{} | {} | {}",
            metrics.timer_text(),
            metrics.apples_text(),
            metrics.lives_text()
        );
    }

    fn records(&mut self, records: &Records) {
        log::info!(
            "Best time {}s, best apples {}, pauses {}",
            records.best_time,
            records.best_apples,
            records.pause_count
        );
    }

    fn game_over(&mut self, summary: &str) {
        log::info!("{}", summary);
    }

    fn overlay(&mut self, overlay: Overlay, visible: bool) {
        log::debug!("Overlay {:?} visible={}", overlay, visible);
    }

    fn paused(&mut self, paused: bool) {
        log::info!("{}", if paused { "Paused" } else { "Resumed" });
    }
}
