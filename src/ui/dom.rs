//! DOM-backed HUD

use web_sys::{Document, Element};

use super::{Hud, Metrics, Overlay};
use crate::records::Records;

/// Text and overlay elements looked up once by id. Missing elements are
/// skipped silently.
pub struct DomHud {
    timer: Option<Element>,
    apples: Option<Element>,
    lives: Option<Element>,
    best_time: Option<Element>,
    best_apples: Option<Element>,
    pause_count: Option<Element>,
    start_overlay: Option<Element>,
    game_over_overlay: Option<Element>,
    final_score: Option<Element>,
    pause_button: Option<Element>,
}

impl DomHud {
    pub fn new(document: &Document) -> Self {
        let get = |id: &str| document.get_element_by_id(id);
        Self {
            timer: get("timer"),
            apples: get("apples"),
            lives: get("lives"),
            best_time: get("bestTime"),
            best_apples: get("bestApples"),
            pause_count: get("pauseCount"),
            start_overlay: get("startOverlay"),
            game_over_overlay: get("gameOverOverlay"),
            final_score: get("finalScore"),
            pause_button: get("pauseBtn"),
        }
    }
}

fn set_text(el: &Option<Element>, text: &str) {
    if let Some(el) = el {
        el.set_text_content(Some(text));
    }
}

fn set_shown(el: &Option<Element>, visible: bool) {
    if let Some(el) = el {
        let classes = el.class_list();
        let _ = if visible {
            classes.add_1("show")
        } else {
            classes.remove_1("show")
        };
    }
}

impl Hud for DomHud {
    fn metrics(&mut self, metrics: &Metrics) {
        set_text(&self.timer, &metrics.timer_text());
        set_text(&self.apples, &metrics.apples_text());
        set_text(&self.lives, &metrics.lives_text());
    }

    fn records(&mut self, records: &Records) {
        set_text(&self.best_time, &records.best_time.to_string());
        set_text(&self.best_apples, &records.best_apples.to_string());
        set_text(&self.pause_count, &records.pause_count.to_string());
    }

    fn game_over(&mut self, summary: &str) {
        set_text(&self.final_score, summary);
    }

    fn overlay(&mut self, overlay: Overlay, visible: bool) {
        let el = match overlay {
            Overlay::Start => &self.start_overlay,
            Overlay::GameOver => &self.game_over_overlay,
        };
        set_shown(el, visible);
    }

    fn paused(&mut self, paused: bool) {
        set_text(&self.pause_button, if paused { "Resume" } else { "Pause" });
    }
}
