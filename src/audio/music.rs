//! Background music playback.
//!
//! Loops one audio file forever, fading it in when playback starts.
//! Failures leave the player silent; the slider keeps working. Linux
//! builds skip playback so they don't need the ALSA headers.

use std::path::Path;
use std::time::Duration;
use tracing::info;

#[cfg(any(windows, target_os = "macos"))]
use super::error::AudioError;

/// Looping background music. Playback stops when the player is dropped.
pub struct MusicPlayer {
    #[cfg(any(windows, target_os = "macos"))]
    output: Option<playback::Output>,
}

impl MusicPlayer {
    /// A player that never makes a sound.
    pub fn silent() -> Self {
        Self {
            #[cfg(any(windows, target_os = "macos"))]
            output: None,
        }
    }

    /// Start looping `path` with a fade-in of `fade_in`.
    pub fn start(path: &Path, fade_in: Duration) -> Self {
        #[cfg(any(windows, target_os = "macos"))]
        {
            match playback::Output::open(path, fade_in) {
                Ok(output) => {
                    info!(path = %path.display(), fade_in_ms = fade_in.as_millis() as u64, "music started");
                    Self {
                        output: Some(output),
                    }
                }
                Err(e) => {
                    tracing::error!("Unable to play music: {e}");
                    Self::silent()
                }
            }
        }

        #[cfg(not(any(windows, target_os = "macos")))]
        {
            let _ = fade_in;
            info!(path = %path.display(), "music playback is not built for this platform");
            Self::silent()
        }
    }
}

impl Drop for MusicPlayer {
    fn drop(&mut self) {
        #[cfg(any(windows, target_os = "macos"))]
        if let Some(output) = self.output.take() {
            output.sink.stop();
        }
    }
}

#[cfg(any(windows, target_os = "macos"))]
mod playback {
    use super::AudioError;
    use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
    use std::fs::File;
    use std::io::BufReader;
    use std::path::Path;
    use std::time::Duration;

    pub(super) struct Output {
        pub(super) sink: Sink,
        // Dropping the stream ends playback, so it lives as long as the sink
        _handle: OutputStreamHandle,
        _stream: OutputStream,
    }

    impl Output {
        pub(super) fn open(path: &Path, fade_in: Duration) -> Result<Self, AudioError> {
            let (stream, handle) = OutputStream::try_default()
                .map_err(|e| AudioError::OutputUnavailable(e.to_string()))?;
            let sink =
                Sink::try_new(&handle).map_err(|e| AudioError::OutputUnavailable(e.to_string()))?;

            let file = File::open(path).map_err(|source| AudioError::MusicOpen {
                path: path.display().to_string(),
                source,
            })?;
            let source = Decoder::new_looped(BufReader::new(file)).map_err(|e| {
                AudioError::MusicDecode {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                }
            })?;

            sink.append(source.fade_in(fade_in));

            Ok(Self {
                sink,
                _handle: handle,
                _stream: stream,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_stays_silent() {
        let path = Path::new("no-such-dir/sound.wav");

        let player = MusicPlayer::start(path, Duration::from_millis(10));

        #[cfg(any(windows, target_os = "macos"))]
        assert!(player.output.is_none());
        drop(player);
    }
}
