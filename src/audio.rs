//! Audio system
//!
//! Procedurally generated sound effects through the Web Audio API on wasm, a
//! silent sink everywhere else. Audio is fire-and-forget: nothing here can
//! fail the game or touch simulation state.

use crate::sim::GameEvent;

/// Sound cue tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Jump edge
    Jump,
    /// Thrust pressed
    Thrust,
    /// Obstacle cleared
    Score,
    /// Power-up collected
    PowerUp,
    /// Menu selection (profile picker)
    Select,
    /// Run ended
    GameOver,
    /// Sound toggled on
    Toggle,
}

impl SoundEffect {
    /// Cue for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Flap => Some(SoundEffect::Jump),
            GameEvent::Thrust => Some(SoundEffect::Thrust),
            GameEvent::Scored { .. } => Some(SoundEffect::Score),
            GameEvent::PowerUpCollected { .. } => Some(SoundEffect::PowerUp),
            GameEvent::GameOver { .. } => Some(SoundEffect::GameOver),
            GameEvent::ShieldConsumed => None,
        }
    }
}

/// Anything that can play sound cues
pub trait AudioSink {
    /// Play a one-shot cue
    fn play(&mut self, effect: SoundEffect);
    /// Play one note of the background loop
    fn play_note(&mut self, freq: f32);
}

/// Sink that swallows everything (native builds, or no audio device)
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play(&mut self, _effect: SoundEffect) {}
    fn play_note(&mut self, _freq: f32) {}
}

/// Background melody notes (Hz), played in a loop
const MELODY: [f32; 8] = [261.63, 329.63, 392.0, 329.63, 293.66, 349.23, 440.0, 349.23];

/// Background music stepper
///
/// A countdown field checked once per frame instead of a self-rescheduling
/// timer, so a reset can never leave a stale callback behind.
#[derive(Debug, Clone)]
pub struct MusicScheduler {
    interval_frames: u32,
    countdown: u32,
    step: usize,
    enabled: bool,
}

impl MusicScheduler {
    /// Note every `interval_frames` frames (at least one)
    pub fn new(interval_frames: u32) -> Self {
        let interval_frames = interval_frames.max(1);
        Self {
            interval_frames,
            countdown: interval_frames,
            step: 0,
            enabled: true,
        }
    }

    /// Advance one frame; returns the note to play, if one is due
    pub fn tick(&mut self) -> Option<f32> {
        if !self.enabled {
            return None;
        }
        self.countdown = self.countdown.saturating_sub(1);
        if self.countdown > 0 {
            return None;
        }
        self.countdown = self.interval_frames;
        let note = MELODY[self.step % MELODY.len()];
        self.step = (self.step + 1) % MELODY.len();
        Some(note)
    }

    /// Back to the first note with a full countdown
    pub fn reset(&mut self) {
        self.countdown = self.interval_frames;
        self.step = 0;
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.reset();
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioSink, SoundEffect};

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        master_volume: f32,
        sfx_volume: f32,
        music_volume: f32,
        muted: bool,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        pub fn new() -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                master_volume: 0.8,
                sfx_volume: 1.0,
                music_volume: 0.5,
                muted: false,
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        pub fn set_volumes(&mut self, master: f32, sfx: f32, music: f32) {
            self.master_volume = master.clamp(0.0, 1.0);
            self.sfx_volume = sfx.clamp(0.0, 1.0);
            self.music_volume = music.clamp(0.0, 1.0);
        }

        pub fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
        }

        fn effective_volume(&self, channel: f32) -> f32 {
            if self.muted {
                0.0
            } else {
                self.master_volume * channel
            }
        }

        /// Context ready to schedule on, resumed if the browser suspended it
        fn live_context(&self) -> Option<&AudioContext> {
            let ctx = self.ctx.as_ref()?;
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }
            Some(ctx)
        }

        /// Create an oscillator with gain envelope
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

        /// Single oscillator sweeping `from` -> `to` with a decaying envelope
        fn sweep(
            &self,
            ctx: &AudioContext,
            vol: f32,
            from: f32,
            to: f32,
            duration: f64,
            osc_type: OscillatorType,
        ) {
            let Some((osc, gain)) = self.create_osc(ctx, from, osc_type) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.3, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + duration)
                .ok();
            osc.frequency().set_value_at_time(from, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(to, t + duration)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + duration).ok();
        }

        /// Short arpeggio, one oscillator per note
        fn arpeggio(&self, ctx: &AudioContext, vol: f32, notes: &[f32], spacing: f64, length: f64) {
            for (i, freq) in notes.iter().enumerate() {
                let delay = i as f64 * spacing;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.25, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + length)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + length + 0.05).ok();
                }
            }
        }
    }

    impl AudioSink for AudioManager {
        fn play(&mut self, effect: SoundEffect) {
            let vol = self.effective_volume(self.sfx_volume);
            if vol <= 0.0 {
                return;
            }
            let Some(ctx) = self.live_context() else {
                return;
            };

            match effect {
                // Quick upward chirp
                SoundEffect::Jump => self.sweep(ctx, vol, 400.0, 600.0, 0.1, OscillatorType::Sine),
                // Low whoosh
                SoundEffect::Thrust => {
                    self.sweep(ctx, vol * 0.6, 200.0, 320.0, 0.12, OscillatorType::Triangle)
                }
                // C-E-G
                SoundEffect::Score => self.arpeggio(ctx, vol, &[523.25, 659.25, 783.99], 0.1, 0.1),
                // Happy ding
                SoundEffect::PowerUp => {
                    self.arpeggio(ctx, vol, &[600.0, 800.0, 1000.0, 1200.0], 0.06, 0.15)
                }
                SoundEffect::Select => self.sweep(ctx, vol, 700.0, 900.0, 0.05, OscillatorType::Square),
                // Sad descent
                SoundEffect::GameOver => {
                    self.sweep(ctx, vol, 300.0, 100.0, 0.5, OscillatorType::Sine)
                }
                SoundEffect::Toggle => self.arpeggio(ctx, vol, &[440.0, 660.0], 0.05, 0.08),
            }
        }

        fn play_note(&mut self, freq: f32) {
            let vol = self.effective_volume(self.music_volume);
            if vol <= 0.0 {
                return;
            }
            let Some(ctx) = self.live_context() else {
                return;
            };
            if let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Triangle) {
                let t = ctx.current_time();
                gain.gain().set_value_at_time(vol * 0.08, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                    .ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.35).ok();
            }
        }
    }
}
