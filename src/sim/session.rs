//! Session state machine
//!
//! `Start -> Playing` (start), `Playing -> GameOver` (terminal collision),
//! `GameOver -> Playing` (restart). Both ways into `Playing` wipe the session.

use super::effects;
use super::state::{ActiveEffects, Bird, GameEvent, GamePhase, GameState, ParticleKind};

impl GameState {
    /// Leave the start screen. Returns false if not on the start screen.
    pub fn start(&mut self) -> bool {
        if self.phase != GamePhase::Start {
            return false;
        }
        self.begin_session();
        log::info!("Session started ({} profile)", self.tuning.name);
        true
    }

    /// Play again after a game over. Returns false unless in `GameOver`.
    pub fn restart(&mut self) -> bool {
        if self.phase != GamePhase::GameOver {
            return false;
        }
        self.begin_session();
        log::info!("Session restarted (best {})", self.best_score);
        true
    }

    /// Full reset into `Playing`; cancels every timer from the previous session
    fn begin_session(&mut self) {
        self.phase = GamePhase::Playing;
        self.score = 0;
        self.bird = Bird::spawn(&self.tuning);
        self.obstacles.clear();
        self.powerups.clear();
        self.particles.clear();
        self.effects = ActiveEffects::default();
        self.thrust_held = false;
    }

    /// Terminal collision handler
    ///
    /// Fires once per session: any call outside `Playing` is a no-op and
    /// returns `None`.
    pub fn game_over(&mut self) -> Option<GameEvent> {
        if self.phase != GamePhase::Playing {
            return None;
        }
        self.phase = GamePhase::GameOver;

        let new_best = self.score > self.best_score;
        if new_best {
            self.best_score = self.score;
        }

        effects::burst(
            &mut self.particles,
            &mut self.rng,
            self.bird.pos,
            ParticleKind::Crash,
            self.tuning.bursts.crash,
            self.tuning.max_particles,
        );

        log::info!(
            "Game over: score {} (best {}{})",
            self.score,
            self.best_score,
            if new_best { ", new best" } else { "" }
        );
        Some(GameEvent::GameOver {
            score: self.score,
            best: self.best_score,
            new_best,
        })
    }
}
