//! Frame driver
//!
//! Owns the simulation plus its collaborators and routes each frame's events
//! outward: sound cues to the audio sink, new bests to the score store.
//! Collaborators only ever receive events; they never write game state.

use crate::audio::{AudioSink, MusicScheduler, SoundEffect};
use crate::persistence::ScoreStore;
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
use crate::tuning::Tuning;
use crate::ui::Panels;

/// Frames between background melody notes (~0.4 s at 60 Hz)
const MUSIC_INTERVAL_FRAMES: u32 = 24;

/// Game instance holding state and collaborators
pub struct Game<S: ScoreStore, A: AudioSink> {
    pub state: GameState,
    store: S,
    audio: A,
    music: MusicScheduler,
}

impl<S: ScoreStore, A: AudioSink> Game<S, A> {
    /// New game on the start screen, best score loaded from `store`
    pub fn new(seed: u64, tuning: Tuning, store: S, audio: A) -> Self {
        let best = store.load_best_score();
        log::info!("Game initialized with seed {} (best {})", seed, best);
        Self {
            state: GameState::new(seed, tuning).with_best_score(best),
            store,
            audio,
            music: MusicScheduler::new(MUSIC_INTERVAL_FRAMES),
        }
    }

    /// Start or restart, whichever applies
    pub fn start(&mut self) -> bool {
        let started = match self.state.phase {
            GamePhase::Start => self.state.start(),
            GamePhase::GameOver => self.state.restart(),
            GamePhase::Playing => false,
        };
        if started {
            self.music.reset();
        }
        started
    }

    /// Swap in a new profile; only allowed outside of play
    pub fn select_profile(&mut self, tuning: Tuning) -> bool {
        if self.state.phase == GamePhase::Playing {
            return false;
        }
        let best = self.state.best_score;
        self.state = GameState::new(self.state.seed, tuning).with_best_score(best);
        self.audio.play(SoundEffect::Select);
        true
    }

    /// Run one frame and dispatch its events
    pub fn frame(&mut self, input: &TickInput) -> Vec<GameEvent> {
        let events = tick(&mut self.state, input);
        for event in &events {
            self.dispatch(event);
        }

        if self.state.phase == GamePhase::Playing {
            if let Some(note) = self.music.tick() {
                self.audio.play_note(note);
            }
        }
        events
    }

    /// End the run early (quit, frame cap); a new best is persisted as on a crash
    pub fn end_session(&mut self) -> Option<GameEvent> {
        let event = self.state.game_over()?;
        self.dispatch(&event);
        Some(event)
    }

    fn dispatch(&mut self, event: &GameEvent) {
        if let Some(effect) = SoundEffect::for_event(event) {
            self.audio.play(effect);
        }
        if let GameEvent::GameOver {
            best,
            new_best: true,
            ..
        } = event
        {
            self.store.save_best_score(*best);
        }
    }

    pub fn set_music(&mut self, enabled: bool) {
        self.music.set_enabled(enabled);
    }

    /// Toggle cue for the sound switch
    pub fn play_toggle(&mut self) {
        self.audio.play(SoundEffect::Toggle);
    }

    pub fn panels(&self) -> Panels {
        Panels::from_state(&self.state)
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
