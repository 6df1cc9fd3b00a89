//! Simulation context
//!
//! `Game` owns one `GameState` plus everything the simulation reports to:
//! the storage port for records, the HUD, and the pause flag. The frame loop
//! calls `frame` once per animation frame; UI handlers call the commands.

use crate::persistence::Storage;
use crate::records::Records;
use crate::renderer::{Frame, Renderer};
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
use crate::tuning::Tuning;
use crate::ui::{Hud, Metrics, Overlay, final_summary};

pub struct Game<S: Storage, H: Hud> {
    state: GameState,
    tuning: Tuning,
    records: Records,
    storage: S,
    hud: H,
    /// Freezes every per-frame effect without touching the phase
    paused: bool,
}

impl<S: Storage, H: Hud> Game<S, H> {
    /// Create an idle game and push the persisted records to the HUD
    pub fn new(seed: u64, tuning: Tuning, storage: S, mut hud: H) -> Self {
        let records = Records::load(&storage);
        hud.records(&records);

        let mut game = Self {
            state: GameState::new(seed, &tuning),
            tuning,
            records,
            storage,
            hud,
            paused: false,
        };
        game.push_metrics();
        game
    }

    /// Like `new`, with tuning read from the same storage
    pub fn from_storage(seed: u64, storage: S, hud: H) -> Self {
        let tuning = Tuning::load(&storage);
        Self::new(seed, tuning, storage, hud)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn records(&self) -> &Records {
        &self.records
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn hud(&self) -> &H {
        &self.hud
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Show the start panel (once assets have settled)
    pub fn show_start(&mut self) {
        self.hud.overlay(Overlay::Start, true);
    }

    /// Back to idle with fresh counters
    pub fn reset(&mut self) {
        self.state.reset(&self.tuning);
        self.push_metrics();
    }

    /// Start command. No-op unless idle or over.
    pub fn start_drop(&mut self) -> bool {
        let from_over = self.state.phase == GamePhase::Over;
        if !self.state.start_drop(&self.tuning) {
            return false;
        }

        self.hud.overlay(Overlay::Start, false);
        self.hud.overlay(Overlay::GameOver, false);
        if from_over {
            self.push_metrics();
        }
        true
    }

    /// "Play again": reset, then drop straight away
    pub fn play_again(&mut self) -> bool {
        self.reset();
        self.start_drop()
    }

    /// Flip the pause flag. Every pause (not resume) is counted in storage.
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        if self.paused {
            self.records.record_pause(&mut self.storage);
            self.hud.records(&self.records);
        }
        self.hud.paused(self.paused);
        self.paused
    }

    /// Jump command. Ignored while paused, so nothing is queued for resume;
    /// the browser original let a paused jump fire on resume.
    pub fn jump(&mut self) -> bool {
        !self.paused && self.state.jump(&self.tuning)
    }

    /// The pointer left the field: stop sliding
    pub fn pointer_left(&mut self) {
        self.state.player.vel.x = 0.0;
    }

    /// Run one animation frame: simulate, report, then draw.
    /// Returns false (and draws nothing) while paused.
    pub fn frame<R: Renderer + ?Sized>(&mut self, input: &TickInput, renderer: &mut R) -> bool {
        if self.paused {
            return false;
        }

        for event in tick(&mut self.state, input, &self.tuning) {
            self.handle(event);
        }

        self.state.player.advance_anim();
        renderer.draw(&Frame::capture(&self.state));
        true
    }

    fn handle(&mut self, event: GameEvent) {
        match event {
            GameEvent::RunStarted
            | GameEvent::SecondElapsed { .. }
            | GameEvent::AppleCollected { .. }
            | GameEvent::PlayerHit { .. } => self.push_metrics(),
            GameEvent::DifficultyRaised => {}
            GameEvent::GameOver { seconds, apples } => {
                let update = self.records.submit_run(&mut self.storage, seconds, apples);
                if update.best_time {
                    log::info!("New best time: {}s", self.records.best_time);
                }
                if update.best_apples {
                    log::info!("New best apple haul: {}", self.records.best_apples);
                }
                self.hud.records(&self.records);
                self.hud.game_over(&final_summary(seconds, apples));
                self.hud.overlay(Overlay::GameOver, true);
            }
        }
    }

    fn push_metrics(&mut self) {
        self.hud.metrics(&Metrics {
            seconds: self.state.seconds,
            apples: self.state.apples_collected,
            lives: self.state.lives,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStorage;
    use crate::sim::Side;

    #[derive(Debug, Clone, PartialEq)]
    enum HudCall {
        Metrics(Metrics),
        Records(Records),
        GameOver(String),
        Overlay(Overlay, bool),
        Paused(bool),
    }

    #[derive(Default)]
    struct RecordingHud {
        calls: Vec<HudCall>,
    }

    impl Hud for RecordingHud {
        fn metrics(&mut self, metrics: &Metrics) {
            self.calls.push(HudCall::Metrics(*metrics));
        }
        fn records(&mut self, records: &Records) {
            self.calls.push(HudCall::Records(*records));
        }
        fn game_over(&mut self, summary: &str) {
            self.calls.push(HudCall::GameOver(summary.to_string()));
        }
        fn overlay(&mut self, overlay: Overlay, visible: bool) {
            self.calls.push(HudCall::Overlay(overlay, visible));
        }
        fn paused(&mut self, paused: bool) {
            self.calls.push(HudCall::Paused(paused));
        }
    }

    #[derive(Default)]
    struct CountingRenderer {
        frames: Vec<Frame>,
    }

    impl Renderer for CountingRenderer {
        fn draw(&mut self, frame: &Frame) {
            self.frames.push(frame.clone());
        }
    }

    fn game_with(storage: MemoryStorage) -> Game<MemoryStorage, RecordingHud> {
        Game::new(11, Tuning::default(), storage, RecordingHud::default())
    }

    /// Drop and land
    fn land(game: &mut Game<MemoryStorage, RecordingHud>) {
        let mut renderer = CountingRenderer::default();
        assert!(game.start_drop());
        while game.state().phase == GamePhase::Drop {
            game.frame(&TickInput::default(), &mut renderer);
        }
    }

    /// Put an enemy on top of the player
    fn enemy_on_player(game: &mut Game<MemoryStorage, RecordingHud>) {
        let x = game.state().player.pos.x;
        let state = game.state_mut();
        state.spawn_enemy_from(Side::Left, 0.0);
        if let Some(enemy) = state.enemies.last_mut() {
            enemy.pos.x = x;
        }
    }

    #[test]
    fn test_new_pushes_records_and_metrics() {
        let mut storage = MemoryStorage::new();
        storage.set_item(Records::BEST_TIME_KEY, "9").unwrap();
        let game = game_with(storage);

        assert_eq!(game.records().best_time, 9);
        assert!(matches!(game.hud().calls[0], HudCall::Records(r) if r.best_time == 9));
        assert_eq!(
            game.hud().calls[1],
            HudCall::Metrics(Metrics {
                seconds: 0,
                apples: 0,
                lives: 3
            })
        );
    }

    #[test]
    fn test_start_hides_overlays_and_lands() {
        let mut game = game_with(MemoryStorage::new());
        game.show_start();
        land(&mut game);

        let calls = &game.hud().calls;
        assert!(calls.contains(&HudCall::Overlay(Overlay::Start, true)));
        assert!(calls.contains(&HudCall::Overlay(Overlay::Start, false)));
        assert!(calls.contains(&HudCall::Overlay(Overlay::GameOver, false)));
        assert_eq!(game.state().phase, GamePhase::Run);
        assert!(!game.start_drop());
    }

    #[test]
    fn test_game_over_updates_records() {
        let mut storage = MemoryStorage::new();
        storage.set_item(Records::BEST_TIME_KEY, "5").unwrap();
        storage.set_item(Records::BEST_APPLES_KEY, "10").unwrap();
        let mut game = game_with(storage);
        land(&mut game);

        {
            let state = game.state_mut();
            state.lives = 1;
            state.seconds = 12;
            state.apples_collected = 3;
        }
        enemy_on_player(&mut game);

        let mut renderer = CountingRenderer::default();
        assert!(game.frame(&TickInput::default(), &mut renderer));

        assert_eq!(game.state().phase, GamePhase::Over);
        assert_eq!(game.state().lives, 0);
        assert!(game.state().enemies.is_empty());
        assert_eq!(game.storage().get_item(Records::BEST_TIME_KEY).as_deref(), Some("12"));
        assert_eq!(game.storage().get_item(Records::BEST_APPLES_KEY).as_deref(), Some("10"));

        let calls = &game.hud().calls;
        assert!(calls.contains(&HudCall::GameOver(
            "You survived 12 seconds and collected 3 apples.".to_string()
        )));
        assert!(calls.contains(&HudCall::Overlay(Overlay::GameOver, true)));
        assert!(calls.contains(&HudCall::Metrics(Metrics {
            seconds: 12,
            apples: 3,
            lives: 0
        })));
    }

    #[test]
    fn test_pause_freezes_frames_and_counts() {
        let mut game = game_with(MemoryStorage::new());
        land(&mut game);
        let mut renderer = CountingRenderer::default();

        assert!(game.toggle_pause());
        let frames = game.state().frames;
        let anim = game.state().player.anim;
        for _ in 0..10 {
            assert!(!game.frame(&TickInput::default(), &mut renderer));
        }
        assert_eq!(game.state().frames, frames);
        assert_eq!(game.state().player.anim, anim);
        assert!(renderer.frames.is_empty());
        assert_eq!(game.state().phase, GamePhase::Run);

        // Jump ignored while paused
        assert!(!game.jump());

        assert!(!game.toggle_pause());
        assert!(game.frame(&TickInput::default(), &mut renderer));
        assert_eq!(renderer.frames.len(), 1);

        game.toggle_pause();
        game.toggle_pause();
        assert_eq!(game.records().pause_count, 2);
        assert_eq!(game.storage().get_item(Records::PAUSE_COUNT_KEY).as_deref(), Some("2"));
        assert!(game.hud().calls.contains(&HudCall::Paused(true)));
        assert!(game.hud().calls.contains(&HudCall::Paused(false)));
    }

    #[test]
    fn test_play_again_after_game_over() {
        let mut game = game_with(MemoryStorage::new());
        land(&mut game);
        game.state_mut().lives = 1;
        enemy_on_player(&mut game);
        let mut renderer = CountingRenderer::default();
        game.frame(&TickInput::default(), &mut renderer);
        assert_eq!(game.state().phase, GamePhase::Over);

        assert!(game.play_again());
        assert_eq!(game.state().phase, GamePhase::Drop);
        assert_eq!(game.state().lives, 3);
        assert!(game.state().enemies.is_empty());
    }

    #[test]
    fn test_jump_and_pointer_left() {
        let mut game = game_with(MemoryStorage::new());
        assert!(!game.jump());
        land(&mut game);
        assert!(game.jump());
        assert_eq!(game.state().player.vel.y, -10.2);

        game.state_mut().player.vel.x = 6.0;
        game.pointer_left();
        assert_eq!(game.state().player.vel.x, 0.0);
    }

    #[test]
    fn test_frames_drawn_while_idle() {
        let mut game = game_with(MemoryStorage::new());
        let mut renderer = CountingRenderer::default();
        game.frame(&TickInput::default(), &mut renderer);
        game.frame(&TickInput::default(), &mut renderer);

        assert_eq!(renderer.frames.len(), 2);
        assert_eq!(game.state().player.anim, 2);
        assert_eq!(game.state().phase, GamePhase::Idle);
    }
}
