//! Audio error type.
//!
//! Shared by the volume backends, endpoint lookup and music playback.

use thiserror::Error;

/// Audio service error types.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("No default output device available")]
    NoDefaultDevice,

    #[cfg(windows)]
    #[error("COM initialization failed: {0}")]
    ComInitFailed(#[source] windows::core::Error),

    #[cfg(windows)]
    #[error("Failed to create device enumerator: {0}")]
    EnumerationFailed(#[source] windows::core::Error),

    #[error("Volume control not available for device")]
    VolumeNotAvailable,

    #[cfg(windows)]
    #[error("Windows API error: {0}")]
    WindowsError(#[source] windows::core::Error),

    #[error("Audio output unavailable: {0}")]
    OutputUnavailable(String),

    #[error("Failed to open music file {path}: {source}")]
    MusicOpen {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode music file {path}: {reason}")]
    MusicDecode { path: String, reason: String },
}
