use std::sync::mpsc::{self, Sender};
use std::thread;
use std::time::Duration;

use anyhow::Result;

use crate::keyboard::display::KeyName;

/// Platform-agnostic tone output.
pub trait AudioOutput {
    /// Play one tone, blocking for its duration.
    fn beep(&mut self, hz: f32, duration: Duration) -> Result<()>;
    fn set_volume(&mut self, volume: f32);
}

#[cfg(feature = "audio-cpal")]
mod cpal_backend;
#[cfg(feature = "audio-cpal")]
pub use cpal_backend::CpalAudio;

/// Silent backend for builds without audio or hosts without a device.
pub struct NullAudio;

impl AudioOutput for NullAudio {
    fn beep(&mut self, _hz: f32, _duration: Duration) -> Result<()> {
        Ok(())
    }

    fn set_volume(&mut self, _volume: f32) {}
}

/// Best available backend.
pub fn create_audio(volume: f32) -> Box<dyn AudioOutput> {
    #[cfg(feature = "audio-cpal")]
    {
        match CpalAudio::new(volume) {
            Ok(audio) => return Box::new(audio),
            Err(e) => log::warn!("cpal init failed: {e}, key sounds disabled"),
        }
    }
    #[cfg(not(feature = "audio-cpal"))]
    let _ = volume;
    Box::new(NullAudio)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tone {
    pub hz: f32,
    pub duration: Duration,
}

/// Pitch ratio for Backspace, Enter, Tab and the modifier keys.
const CONTROL_PITCH: f32 = 0.75;

/// The click for a key. Control keys sound lower than printable ones.
pub fn tone_for_key(key: KeyName, base: Tone) -> Option<Tone> {
    match key {
        KeyName::Ignored => None,
        KeyName::Char(_) | KeyName::Space => Some(base),
        _ => Some(Tone {
            hz: base.hz * CONTROL_PITCH,
            ..base
        }),
    }
}

/// Plays tones on a dedicated thread, in the order they were queued.
///
/// The backend is built on the playback thread; dropping the player ends it.
pub struct SoundPlayer {
    tx: Option<Sender<Tone>>,
    base: Tone,
}

impl SoundPlayer {
    pub fn spawn(base: Tone, volume: f32) -> Self {
        Self::spawn_with(base, move || create_audio(volume))
    }

    pub fn spawn_with<F>(base: Tone, make_output: F) -> Self
    where
        F: FnOnce() -> Box<dyn AudioOutput> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel::<Tone>();
        let spawned = thread::Builder::new()
            .name("vkbd-audio".to_string())
            .spawn(move || {
                let mut output = make_output();
                while let Ok(tone) = rx.recv() {
                    if let Err(e) = output.beep(tone.hz, tone.duration) {
                        log::warn!("tone playback failed: {e}");
                    }
                }
            });
        match spawned {
            Ok(_) => Self { tx: Some(tx), base },
            Err(e) => {
                log::warn!("could not start audio thread: {e}");
                Self::silent(base)
            }
        }
    }

    pub fn silent(base: Tone) -> Self {
        Self { tx: None, base }
    }

    pub fn base(&self) -> Tone {
        self.base
    }

    /// Queue the click for `key`. Returns whether a tone was queued.
    pub fn play_key(&self, key: KeyName) -> bool {
        match (tone_for_key(key, self.base), &self.tx) {
            (Some(tone), Some(tx)) => tx.send(tone).is_ok(),
            _ => false,
        }
    }
}
