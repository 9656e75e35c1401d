//! cpal-backed output.
//!
//! `cpal::Stream` cannot leave the thread that built it, so every playback
//! gets its own short-lived thread that opens the device, owns the stream and
//! drops it once the buffer has played out or the handle is stopped.

use super::sink::{AudioSink, PlaybackHandle, SinkConfig};
use crate::SAMPLE_RATE;
use crate::error::PlaybackError;
use crate::processing::SampleBuffer;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SampleFormat, SizedSample, StreamConfig, SupportedStreamConfig};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Sender};
use std::thread::{self, JoinHandle};
use tracing::{debug, error, trace};

enum Control {
    /// The callback has delivered every sample.
    Finished,
    Stop,
}

/// Plays buffers on a cpal output device.
#[derive(Debug, Clone, Default)]
pub struct CpalSink {
    config: SinkConfig,
}

impl CpalSink {
    /// A sink that opens a device per playback using `config`.
    pub fn new(config: SinkConfig) -> Self {
        Self { config }
    }

    /// The device selection this sink was built with.
    pub fn config(&self) -> &SinkConfig {
        &self.config
    }
}

impl AudioSink for CpalSink {
    type Handle = CpalPlayback;

    fn play(&self, buffer: SampleBuffer) -> Result<CpalPlayback, PlaybackError> {
        let (control_tx, control_rx) = mpsc::channel();
        let (ready_tx, ready_rx) = mpsc::sync_channel(1);
        let finished = Arc::new(AtomicBool::new(false));

        let config = self.config.clone();
        let callback_control = control_tx.clone();
        let thread_finished = Arc::clone(&finished);
        let thread = thread::Builder::new()
            .name("tone-output".into())
            .spawn(move || {
                let stream = match open_stream(&config, buffer, callback_control) {
                    Ok(stream) => stream,
                    Err(err) => {
                        thread_finished.store(true, Ordering::Release);
                        let _ = ready_tx.send(Err(err));
                        return;
                    }
                };
                let _ = ready_tx.send(Ok(()));

                match control_rx.recv() {
                    Ok(Control::Finished) => trace!("buffer played out"),
                    Ok(Control::Stop) | Err(_) => trace!("playback stopped"),
                }
                drop(stream);
                thread_finished.store(true, Ordering::Release);
                debug!("output stream closed");
            })
            .map_err(PlaybackError::stream)?;

        match ready_rx.recv() {
            Ok(Ok(())) => Ok(CpalPlayback {
                control: control_tx,
                finished,
                thread: Some(thread),
            }),
            Ok(Err(err)) => {
                let _ = thread.join();
                Err(err)
            }
            Err(_) => {
                let _ = thread.join();
                Err(PlaybackError::WorkerLost)
            }
        }
    }
}

/// A playback running on its own output thread.
pub struct CpalPlayback {
    control: Sender<Control>,
    finished: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl PlaybackHandle for CpalPlayback {
    fn stop(&mut self) {
        if let Some(thread) = self.thread.take() {
            // The thread may already be gone if the buffer finished
            let _ = self.control.send(Control::Stop);
            if thread.join().is_err() {
                error!("output thread panicked");
            }
            self.finished.store(true, Ordering::Release);
        }
    }

    fn is_finished(&self) -> bool {
        self.finished.load(Ordering::Acquire)
    }
}

impl Drop for CpalPlayback {
    fn drop(&mut self) {
        self.stop();
    }
}

fn open_stream(
    config: &SinkConfig,
    buffer: SampleBuffer,
    control: Sender<Control>,
) -> Result<cpal::Stream, PlaybackError> {
    let host = cpal::default_host();
    let device = find_device(&host, config.device())?;
    let supported = pick_config(&device)?;
    let sample_format = supported.sample_format();
    let stream_config: StreamConfig = supported.config();
    let samples = buffer.into_samples();

    let stream = match sample_format {
        SampleFormat::I16 => build_stream::<i16>(&device, &stream_config, samples, control)?,
        SampleFormat::F32 => build_stream::<f32>(&device, &stream_config, samples, control)?,
        SampleFormat::U16 => build_stream::<u16>(&device, &stream_config, samples, control)?,
        other => {
            return Err(PlaybackError::stream(format!(
                "unsupported sample format {other}"
            )));
        }
    };
    stream.play().map_err(PlaybackError::stream)?;

    debug!(
        device = %device.name().unwrap_or_default(),
        channels = stream_config.channels,
        format = %sample_format,
        category = %config.category(),
        "output stream started"
    );
    Ok(stream)
}

fn find_device(host: &cpal::Host, name: Option<&str>) -> Result<cpal::Device, PlaybackError> {
    let Some(query) = name else {
        return host.default_output_device().ok_or(PlaybackError::NoDevice);
    };
    let needle = query.to_lowercase();
    host.output_devices()
        .map_err(PlaybackError::stream)?
        .find(|device| {
            device
                .name()
                .map(|n| n.to_lowercase().contains(&needle))
                .unwrap_or(false)
        })
        .ok_or_else(|| PlaybackError::DeviceNotFound(query.to_owned()))
}

/// Finds a configuration running at exactly [`SAMPLE_RATE`], preferring
/// native 16-bit output and as few channels as possible.
fn pick_config(device: &cpal::Device) -> Result<SupportedStreamConfig, PlaybackError> {
    let rate = cpal::SampleRate(SAMPLE_RATE);
    device
        .supported_output_configs()
        .map_err(PlaybackError::stream)?
        .filter(|range| range.min_sample_rate() <= rate && rate <= range.max_sample_rate())
        .filter_map(|range| {
            let rank = match range.sample_format() {
                SampleFormat::I16 => 0,
                SampleFormat::F32 => 1,
                SampleFormat::U16 => 2,
                _ => return None,
            };
            Some((rank, range.channels(), range))
        })
        .min_by_key(|(rank, channels, _)| (*rank, *channels))
        .map(|(_, _, range)| range.with_sample_rate(rate))
        .ok_or(PlaybackError::UnsupportedFormat {
            sample_rate: SAMPLE_RATE,
        })
}

/// Builds a stream that plays `samples` once, copying each mono sample to
/// every channel, then outputs silence.
fn build_stream<T>(
    device: &cpal::Device,
    config: &StreamConfig,
    samples: Vec<i16>,
    control: Sender<Control>,
) -> Result<cpal::Stream, PlaybackError>
where
    T: SizedSample + FromSample<i16>,
{
    let channels = config.channels as usize;
    let mut position = 0;
    let mut reported = false;

    device
        .build_output_stream(
            config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                // Report only once a whole callback was silence, so the tail
                // has reached the device
                let exhausted = position >= samples.len();
                for frame in data.chunks_mut(channels) {
                    let value = match samples.get(position) {
                        Some(&sample) => {
                            position += 1;
                            T::from_sample(sample)
                        }
                        None => T::EQUILIBRIUM,
                    };
                    frame.fill(value);
                }
                if exhausted && !reported {
                    reported = true;
                    let _ = control.send(Control::Finished);
                }
            },
            |err| error!("audio stream error: {}", err),
            None,
        )
        .map_err(PlaybackError::stream)
}
