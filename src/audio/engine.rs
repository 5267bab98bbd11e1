//! Audio engine - sounds scheduled tones through cpal
//!
//! The control side pushes tones into a lock-free ring buffer. The cpal
//! callback owns the consuming end, mixes every tone that overlaps the
//! current buffer and advances a shared frame counter that doubles as the
//! audio clock.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample};
use ringbuf::traits::{Consumer, Producer, Split};
use ringbuf::{HeapCons, HeapProd, HeapRb};
use std::f64::consts::TAU;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use thiserror::Error;

use super::emitter::{ToneEmitter, ToneEvent};
use super::envelope::ToneEnvelope;

/// How many tones can wait for the audio thread at once
const QUEUE_CAPACITY: usize = 16_384;

/// Errors that can occur while opening the audio output
#[derive(Error, Debug)]
pub enum AudioError {
    #[error("No output device found")]
    NoDevice,

    #[error("Failed to get default output config: {0}")]
    DefaultConfig(#[from] cpal::DefaultStreamConfigError),

    #[error("Unsupported sample format: {0:?}")]
    UnsupportedFormat(cpal::SampleFormat),

    #[error("Failed to build output stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),

    #[error("Failed to start output stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),
}

/// Audio engine configuration
#[derive(Debug, Clone, Copy)]
pub struct AudioConfig {
    /// Master output gain applied after the envelope (0.0 to 1.0)
    pub volume: f32,
    /// Shape of every tone
    pub envelope: ToneEnvelope,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            volume: 1.0,
            envelope: ToneEnvelope::default(),
        }
    }
}

/// A tone tagged with the silence epoch it was queued in
#[derive(Debug, Clone, Copy)]
struct QueuedTone {
    epoch: u64,
    tone: ToneEvent,
}

/// Audio clock shared between the mixer and the control side
///
/// `end` is the frame just past the buffer being (or last) rendered and
/// `lookahead` is that buffer's length. `now()` reports one buffer past
/// `end`, so a tone stamped with it is drained before its start frame even
/// if it is queued while a callback is running.
#[derive(Debug, Default)]
struct Clock {
    end: AtomicU64,
    lookahead: AtomicU64,
}

impl Clock {
    fn publish(&self, end: u64, len: u64) {
        self.lookahead.store(len, Ordering::Relaxed);
        self.end.store(end, Ordering::Release);
    }

    fn now_frames(&self) -> u64 {
        self.end.load(Ordering::Acquire) + self.lookahead.load(Ordering::Relaxed)
    }

    fn now(&self, sample_rate: f64) -> Duration {
        Duration::from_secs_f64(self.now_frames() as f64 / sample_rate)
    }
}

/// Audio-thread side of the engine
///
/// Owns the consumer end of the tone queue and the set of voices that are
/// currently sounding or waiting for their start time.
pub(crate) struct Mixer {
    queue: HeapCons<QueuedTone>,
    voices: Vec<QueuedTone>,
    /// First frame of the next buffer
    position: u64,
    clock: Arc<Clock>,
    epoch: Arc<AtomicU64>,
    sample_rate: f64,
    config: AudioConfig,
}

impl Mixer {
    fn new(
        queue: HeapCons<QueuedTone>,
        clock: Arc<Clock>,
        epoch: Arc<AtomicU64>,
        sample_rate: f64,
        config: AudioConfig,
    ) -> Self {
        Self {
            queue,
            voices: Vec::with_capacity(256),
            position: 0,
            clock,
            epoch,
            sample_rate,
            config,
        }
    }

    /// Fill an interleaved output buffer and advance the clock
    fn render<T: Sample + FromSample<f32>>(&mut self, data: &mut [T], channels: usize) {
        let channels = channels.max(1);

        let start_frame = self.position;
        let num_frames = (data.len() / channels) as u64;
        let end_frame = start_frame + num_frames;
        self.position = end_frame;
        // Publish before draining the queue
        self.clock.publish(end_frame, num_frames);

        // Anything queued before the latest silence() is dropped
        let epoch = self.epoch.load(Ordering::Acquire);
        self.voices.retain(|v| v.epoch >= epoch);
        while let Some(queued) = self.queue.try_pop() {
            if queued.epoch >= epoch {
                self.voices.push(queued);
            }
        }

        for (n, frame) in data.chunks_mut(channels).enumerate() {
            let t = (start_frame + n as u64) as f64 / self.sample_rate;
            let mut value = 0.0f32;
            for voice in &self.voices {
                value += self.sample_voice(&voice.tone, t);
            }
            let sample = T::from_sample((value * self.config.volume).clamp(-1.0, 1.0));
            for ch in frame.iter_mut() {
                *ch = sample;
            }
        }

        let end_time = end_frame as f64 / self.sample_rate;
        self.voices.retain(|v| v.tone.end().as_secs_f64() > end_time);
    }

    fn sample_voice(&self, tone: &ToneEvent, t: f64) -> f32 {
        let elapsed = t - tone.start.as_secs_f64();
        let gain = self
            .config
            .envelope
            .gain(elapsed, tone.duration.as_secs_f64());
        if gain == 0.0 {
            return 0.0;
        }
        (TAU * tone.frequency as f64 * elapsed).sin() as f32 * gain
    }
}

/// High-level audio output engine
///
/// Opening the engine claims the default output device and starts a stream
/// that runs for as long as the engine is alive.
pub struct AudioEngine {
    /// The audio output stream (kept alive to continue playback)
    _stream: cpal::Stream,

    /// Control-side end of the tone queue
    producer: Mutex<HeapProd<QueuedTone>>,

    /// Position of the mixer; the audio clock
    clock: Arc<Clock>,

    /// Bumped by `silence()` to invalidate queued and sounding tones
    epoch: Arc<AtomicU64>,

    /// Sample rate of the output device
    sample_rate: u32,

    device_name: String,
}

impl AudioEngine {
    /// Open the default output device and start the stream
    pub fn open(config: AudioConfig) -> Result<Self, AudioError> {
        log::info!("Starting audio engine...");

        let host = cpal::default_host();
        let device = host.default_output_device().ok_or(AudioError::NoDevice)?;

        let device_name = device.name().unwrap_or_else(|_| "Unknown".to_string());
        log::info!("Using output device: {}", device_name);

        let supported = device.default_output_config()?;
        log::info!("Audio config: {:?}", supported);

        let sample_rate = supported.sample_rate().0;
        let channels = supported.channels() as usize;
        let sample_format = supported.sample_format();
        let stream_config: cpal::StreamConfig = supported.into();

        let (producer, consumer) = HeapRb::<QueuedTone>::new(QUEUE_CAPACITY).split();
        let clock = Arc::new(Clock::default());
        let epoch = Arc::new(AtomicU64::new(0));
        let mut mixer = Mixer::new(
            consumer,
            Arc::clone(&clock),
            Arc::clone(&epoch),
            sample_rate as f64,
            config,
        );

        let stream = match sample_format {
            cpal::SampleFormat::F32 => device.build_output_stream(
                &stream_config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    mixer.render(data, channels);
                },
                |err| log::error!("Audio stream error: {}", err),
                None,
            )?,
            cpal::SampleFormat::I16 => device.build_output_stream(
                &stream_config,
                move |data: &mut [i16], _: &cpal::OutputCallbackInfo| {
                    mixer.render(data, channels);
                },
                |err| log::error!("Audio stream error: {}", err),
                None,
            )?,
            cpal::SampleFormat::U16 => device.build_output_stream(
                &stream_config,
                move |data: &mut [u16], _: &cpal::OutputCallbackInfo| {
                    mixer.render(data, channels);
                },
                |err| log::error!("Audio stream error: {}", err),
                None,
            )?,
            format => return Err(AudioError::UnsupportedFormat(format)),
        };

        stream.play()?;
        log::info!("Audio started successfully");

        Ok(Self {
            _stream: stream,
            producer: Mutex::new(producer),
            clock,
            epoch,
            sample_rate,
            device_name,
        })
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn device_name(&self) -> &str {
        &self.device_name
    }
}

impl ToneEmitter for AudioEngine {
    fn now(&self) -> Duration {
        self.clock.now(self.sample_rate as f64)
    }

    fn emit(&self, tone: ToneEvent) {
        let queued = QueuedTone {
            epoch: self.epoch.load(Ordering::Acquire),
            tone,
        };
        let mut producer = self.producer.lock().unwrap_or_else(PoisonError::into_inner);
        if producer.try_push(queued).is_err() {
            log::warn!("Tone queue full, dropping tone at {:?}", tone.start);
        }
    }

    fn silence(&self) {
        self.epoch.fetch_add(1, Ordering::AcqRel);
        log::debug!("Audio silenced");
    }
}
