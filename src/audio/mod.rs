//! Audio module: master volume backends and background music.
//!
//! On Windows the volume can be proxied to the default output endpoint via
//! the Core Audio API; every platform has the in-memory backend.

#[cfg(windows)]
pub mod endpoint;
pub mod error;
pub mod music;
pub mod volume;

pub use error::AudioError;
pub use music::MusicPlayer;
#[cfg(windows)]
pub use volume::EndpointVolume;
pub use volume::{MemoryVolume, VolumeControl};
