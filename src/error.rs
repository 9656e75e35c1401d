//! Error types.

use thiserror::Error;

/// Result type for tone operations.
pub type ToneResult<T> = Result<T, ToneError>;

/// Errors surfaced to callers of the tone synthesizer.
#[derive(Debug, Error)]
pub enum ToneError {
    /// The name does not match any tone in the catalog.
    #[error("unknown tone identifier: {0:?}")]
    UnknownTone(String),

    /// The synthesizer was released and no longer accepts requests.
    #[error("tone synthesizer has been released")]
    Released,

    /// Playback could not be started.
    #[error(transparent)]
    Playback(#[from] PlaybackError),

    /// The synthesis worker thread could not be started.
    #[error("failed to start synthesis worker")]
    Spawn(#[source] std::io::Error),
}

/// Problems with a tone recipe.
///
/// Recipes in the catalog are static data, so these only show up in tests or
/// when rendering a hand-built recipe.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecipeError {
    /// Duration is not a positive, finite number of seconds.
    #[error("invalid duration: {duration} seconds")]
    InvalidDuration {
        /// The invalid duration.
        duration: f64,
    },

    /// Base frequency is not a positive, finite number of Hz.
    #[error("invalid frequency: {freq} Hz")]
    InvalidFrequency {
        /// The invalid frequency.
        freq: f64,
    },

    /// Some other parameter is out of range.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Error message.
        message: String,
    },
}

impl RecipeError {
    /// Creates an invalid parameter error.
    pub fn invalid_param(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }
}

/// Errors from the audio output device.
///
/// These are environment problems: the request that hit them is abandoned
/// and the synthesizer stays usable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// The host has no default output device.
    #[error("no audio output device available")]
    NoDevice,

    /// No output device matched the configured name.
    #[error("no output device matching {0:?}")]
    DeviceNotFound(String),

    /// The device cannot play the fixed PCM format.
    #[error("output device does not support {sample_rate} Hz playback")]
    UnsupportedFormat {
        /// Requested sample rate.
        sample_rate: u32,
    },

    /// The backend failed to build, start or run the stream.
    #[error("audio stream error: {0}")]
    Stream(String),

    /// The playback thread went away before reporting back.
    #[error("playback thread exited unexpectedly")]
    WorkerLost,
}

impl PlaybackError {
    /// Wraps any backend error as a stream error.
    pub fn stream(err: impl std::fmt::Display) -> Self {
        Self::Stream(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_param_helper() {
        let err = RecipeError::invalid_param("gain", "must be positive");
        assert!(err.to_string().contains("gain"));
        assert!(err.to_string().contains("must be positive"));
    }

    #[test]
    fn test_unknown_tone_message() {
        let err = ToneError::UnknownTone("doorbell".into());
        assert_eq!(err.to_string(), "unknown tone identifier: \"doorbell\"");
    }

    #[test]
    fn test_playback_error_converts() {
        let err: ToneError = PlaybackError::NoDevice.into();
        assert!(matches!(err, ToneError::Playback(PlaybackError::NoDevice)));
        assert_eq!(err.to_string(), "no audio output device available");
    }

    #[test]
    fn test_stream_helper() {
        let err = PlaybackError::stream("device unplugged");
        assert_eq!(err, PlaybackError::Stream("device unplugged".into()));
    }
}
