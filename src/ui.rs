//! HUD panel state
//!
//! Which overlays are visible and what text they show, derived from the
//! simulation each frame. The page only copies these values into the DOM.

use serde::Serialize;

use crate::sim::{GamePhase, GameState};

/// Visibility and text for every overlay
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Panels {
    pub start_screen: bool,
    pub score_display: bool,
    pub game_over_screen: bool,
    /// Live score readout
    pub score_text: String,
    /// "Score: N" on the game-over summary
    pub final_score_text: Option<String>,
    /// "Best: N" on the game-over summary
    pub best_score_text: Option<String>,
    /// Active timed power-ups with remaining seconds
    pub power_up_banner: Option<String>,
}

impl Panels {
    pub fn from_state(state: &GameState) -> Self {
        let game_over = state.phase == GamePhase::GameOver;
        Self {
            start_screen: state.phase == GamePhase::Start,
            score_display: state.phase != GamePhase::Start,
            game_over_screen: game_over,
            score_text: state.score.to_string(),
            final_score_text: game_over.then(|| format!("Score: {}", state.score)),
            best_score_text: game_over.then(|| format!("Best: {}", state.best_score)),
            power_up_banner: power_up_banner(state),
        }
    }
}

fn power_up_banner(state: &GameState) -> Option<String> {
    if state.phase != GamePhase::Playing {
        return None;
    }
    let frame_rate = state.tuning.frame_rate;
    let secs = |ticks: u32| (ticks as f32 / frame_rate).ceil() as u32;

    let mut parts = Vec::new();
    if state.effects.shield_active {
        parts.push(format!("Shield {}s", secs(state.effects.shield_ticks)));
    }
    if state.effects.auto_fly_active() {
        parts.push(format!("Auto-Fly {}s", secs(state.effects.auto_fly_ticks)));
    }
    (!parts.is_empty()).then(|| parts.join(" | "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    #[test]
    fn test_start_screen_panels() {
        let state = GameState::new(1, Tuning::classic());
        let panels = Panels::from_state(&state);
        assert!(panels.start_screen);
        assert!(!panels.score_display);
        assert!(!panels.game_over_screen);
        assert_eq!(panels.final_score_text, None);
    }

    #[test]
    fn test_game_over_summary() {
        let mut state = GameState::new(1, Tuning::classic()).with_best_score(9);
        state.start();
        state.score = 4;
        state.game_over();

        let panels = Panels::from_state(&state);
        assert!(!panels.start_screen);
        assert!(panels.score_display);
        assert!(panels.game_over_screen);
        assert_eq!(panels.score_text, "4");
        assert_eq!(panels.final_score_text.as_deref(), Some("Score: 4"));
        assert_eq!(panels.best_score_text.as_deref(), Some("Best: 9"));
        assert_eq!(panels.power_up_banner, None);
    }

    #[test]
    fn test_power_up_banner() {
        let mut state = GameState::new(1, Tuning::deluxe());
        state.start();
        assert_eq!(Panels::from_state(&state).power_up_banner, None);

        state.effects.shield_active = true;
        state.effects.shield_ticks = 61;
        state.effects.auto_fly_ticks = 300;
        assert_eq!(
            Panels::from_state(&state).power_up_banner.as_deref(),
            Some("Shield 2s | Auto-Fly 5s")
        );
    }
}
