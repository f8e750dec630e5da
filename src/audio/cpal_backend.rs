use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use anyhow::{Result, anyhow};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, Stream};

use super::AudioOutput;

struct SharedState {
    sounding: bool,
    frequency: f32,
    volume: f32,
    phase: f32,
    sample_rate: f32,
}

/// Sine-wave key clicks on the default output device.
pub struct CpalAudio {
    state: Arc<Mutex<SharedState>>,
    _stream: Stream,
}

impl CpalAudio {
    pub fn new(volume: f32) -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| anyhow!("no output device"))?;
        let config = device.default_output_config()?;

        let state = Arc::new(Mutex::new(SharedState {
            sounding: false,
            frequency: 0.0,
            volume: volume.clamp(0.0, 1.0),
            phase: 0.0,
            sample_rate: config.sample_rate().0 as f32,
        }));

        let st = Arc::clone(&state);
        let stream = match config.sample_format() {
            SampleFormat::F32 => build_stream::<f32>(&device, &config.into(), st)?,
            SampleFormat::I16 => build_stream::<i16>(&device, &config.into(), st)?,
            SampleFormat::U16 => build_stream::<u16>(&device, &config.into(), st)?,
            other => return Err(anyhow!("unsupported sample format {other:?}")),
        };
        stream.play()?;
        Ok(Self {
            state,
            _stream: stream,
        })
    }

    fn with_state(&self, f: impl FnOnce(&mut SharedState)) -> Result<()> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| anyhow!("audio state poisoned"))?;
        f(&mut state);
        Ok(())
    }
}

fn build_stream<S>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    state: Arc<Mutex<SharedState>>,
) -> Result<Stream>
where
    S: cpal::Sample + cpal::SizedSample + cpal::FromSample<f32>,
{
    let channels = config.channels as usize;
    let stream = device.build_output_stream(
        config,
        move |data: &mut [S], _: &cpal::OutputCallbackInfo| {
            let Ok(mut s) = state.lock() else {
                return;
            };
            let step = s.frequency / s.sample_rate;
            for frame in data.chunks_mut(channels) {
                let sample = if s.sounding {
                    let v = (s.phase * std::f32::consts::TAU).sin() * s.volume;
                    s.phase = (s.phase + step) % 1.0;
                    v
                } else {
                    s.phase = 0.0;
                    0.0
                };
                let out = S::from_sample(sample);
                for smp in frame.iter_mut() {
                    *smp = out;
                }
            }
        },
        |e| log::error!("audio stream error: {e}"),
        None,
    )?;
    Ok(stream)
}

impl AudioOutput for CpalAudio {
    fn beep(&mut self, hz: f32, duration: Duration) -> Result<()> {
        self.with_state(|s| {
            s.frequency = hz;
            s.sounding = true;
        })?;
        thread::sleep(duration);
        self.with_state(|s| s.sounding = false)
    }

    fn set_volume(&mut self, volume: f32) {
        let _ = self.with_state(|s| s.volume = volume.clamp(0.0, 1.0));
    }
}
