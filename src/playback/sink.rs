//! The seam between the synthesizer and an audio device.

use crate::SAMPLE_RATE;
use crate::error::PlaybackError;
use crate::processing::SampleBuffer;
use std::fmt;

/// The PCM layout every [`AudioSink`] receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputFormat {
    /// Frames per second.
    pub sample_rate: u32,
    pub channels: u16,
    /// Width of one sample of one channel.
    pub bits_per_sample: u16,
    pub little_endian: bool,
}

impl OutputFormat {
    /// 44.1 kHz, mono, signed 16-bit little-endian.
    pub const PCM_MONO_16: OutputFormat = OutputFormat {
        sample_rate: SAMPLE_RATE,
        channels: 1,
        bits_per_sample: 16,
        little_endian: true,
    };

    /// Bytes in one frame across all channels.
    pub const fn bytes_per_sample(&self) -> usize {
        (self.bits_per_sample / 8) as usize * self.channels as usize
    }
}

/// What the sound is for, so the platform can route and duck it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputCategory {
    /// Interval and timer bells: should sound even when media is muted.
    #[default]
    Alarm,
    Notification,
}

impl fmt::Display for OutputCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputCategory::Alarm => f.write_str("alarm"),
            OutputCategory::Notification => f.write_str("notification"),
        }
    }
}

/// Output device selection for a sink.
///
/// # Examples
///
/// ```
/// use carillon::playback::{OutputCategory, SinkConfig};
///
/// let config = SinkConfig::default()
///     .with_device("USB")
///     .with_category(OutputCategory::Notification);
/// assert_eq!(config.device(), Some("USB"));
/// assert_eq!(config.category(), OutputCategory::Notification);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SinkConfig {
    device: Option<String>,
    category: OutputCategory,
}

impl SinkConfig {
    /// Picks the first output device whose name contains `name`
    /// (case-insensitive) instead of the host default.
    pub fn with_device(mut self, name: impl Into<String>) -> Self {
        self.device = Some(name.into());
        self
    }

    /// Sets how the platform should treat the sound.
    pub fn with_category(mut self, category: OutputCategory) -> Self {
        self.category = category;
        self
    }

    /// Requested device name fragment, if any.
    pub fn device(&self) -> Option<&str> {
        self.device.as_deref()
    }

    /// Output routing category.
    pub fn category(&self) -> OutputCategory {
        self.category
    }

    /// PCM layout handed to the device. Always [`OutputFormat::PCM_MONO_16`].
    pub fn format(&self) -> OutputFormat {
        OutputFormat::PCM_MONO_16
    }
}

/// One in-flight playback.
///
/// The handle owns the device resources of its playback. They are released
/// when the buffer has played out, when [`stop`](PlaybackHandle::stop) is
/// called, or when the handle is dropped, whichever comes first.
pub trait PlaybackHandle: Send + 'static {
    /// Stops output and releases the device. Calling it again, or after the
    /// playback finished on its own, does nothing.
    fn stop(&mut self);

    /// Whether the buffer has played out or the handle was stopped.
    fn is_finished(&self) -> bool;
}

/// An output that plays finished sample buffers.
pub trait AudioSink: Send + Sync + 'static {
    type Handle: PlaybackHandle;

    /// Opens the device and starts playing `buffer` from the beginning.
    ///
    /// On error nothing is left open.
    fn play(&self, buffer: SampleBuffer) -> Result<Self::Handle, PlaybackError>;
}
