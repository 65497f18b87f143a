//! Background music keyed off round transitions
//!
//! The simulation only emits events. This module maps them to start/stop
//! cues and forwards those to a backend without waiting on playback.

use crate::sim::GameEvent;

/// Default music volume (0.0 - 1.0)
pub const MUSIC_VOLUME: f32 = 0.5;

/// What the music should do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    StartMusic,
    StopMusic,
}

/// Cue for an event: a round start plays, a win or loss stops
pub fn cue_for_event(event: &GameEvent) -> Option<AudioCue> {
    match event {
        GameEvent::RoundStarted => Some(AudioCue::StartMusic),
        GameEvent::RoundWon { .. } | GameEvent::RoundLost { .. } => Some(AudioCue::StopMusic),
        _ => None,
    }
}

/// Playback backend. Calls are fire-and-forget.
pub trait AudioSink {
    fn start(&mut self, volume: f32);
    fn stop(&mut self);
}

/// Backend that only logs (native builds, tests)
#[derive(Debug, Default)]
pub struct NullSink;

impl AudioSink for NullSink {
    fn start(&mut self, volume: f32) {
        log::debug!("Music start (volume {:.2})", volume);
    }

    fn stop(&mut self) {
        log::debug!("Music stop");
    }
}

impl<S: AudioSink + ?Sized> AudioSink for Box<S> {
    fn start(&mut self, volume: f32) {
        (**self).start(volume);
    }

    fn stop(&mut self) {
        (**self).stop();
    }
}

/// Tracks whether music is playing and applies cues and the user toggle
pub struct MusicPlayer<S: AudioSink> {
    sink: S,
    playing: bool,
    volume: f32,
}

impl<S: AudioSink> MusicPlayer<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            playing: false,
            volume: MUSIC_VOLUME,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn apply(&mut self, cue: AudioCue) {
        match cue {
            AudioCue::StartMusic if !self.playing => {
                self.sink.start(self.volume);
                self.playing = true;
            }
            AudioCue::StopMusic if self.playing => {
                self.sink.stop();
                self.playing = false;
            }
            _ => {}
        }
    }

    /// Feed a batch of events; returns how many cues were applied
    pub fn handle_events(&mut self, events: &[GameEvent]) -> usize {
        let mut applied = 0;
        for cue in events.iter().filter_map(cue_for_event) {
            self.apply(cue);
            applied += 1;
        }
        applied
    }

    /// The music button
    pub fn toggle(&mut self) {
        let cue = if self.playing {
            AudioCue::StopMusic
        } else {
            AudioCue::StartMusic
        };
        self.apply(cue);
    }

    /// Label for the music button
    pub fn button_label(&self) -> &'static str {
        if self.playing {
            "Pause Music"
        } else {
            "Play Music"
        }
    }
}

/// `<audio>` element backend (WASM only)
#[cfg(target_arch = "wasm32")]
pub struct HtmlAudioSink {
    element: web_sys::HtmlAudioElement,
}

#[cfg(target_arch = "wasm32")]
impl HtmlAudioSink {
    pub fn new(element: web_sys::HtmlAudioElement) -> Self {
        Self { element }
    }
}

#[cfg(target_arch = "wasm32")]
impl AudioSink for HtmlAudioSink {
    fn start(&mut self, volume: f32) {
        self.element.set_muted(false);
        self.element.set_volume(volume as f64);
        // Autoplay may be refused; the promise is not awaited
        if let Err(e) = self.element.play() {
            log::warn!("Music playback failed: {:?}", e);
        }
    }

    fn stop(&mut self) {
        let _ = self.element.pause();
        self.element.set_muted(true);
    }
}
