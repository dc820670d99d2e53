//! Displair Volume Control - Library
//!
//! A fullscreen kiosk overlay with one draggable slider bound to the
//! master output volume.
//!
//! ## Features
//!
//! - Drag handle mapped linearly onto the volume in `0.0..=1.0`
//! - Live read/write of the default output endpoint on Windows
//! - In-memory volume backend for development and tests
//! - Percentage label, volume and close icons
//! - Looping background music with fade-in
//! - Escape, window close or the close icon end the session

pub mod app;
pub mod audio;
pub mod platform;
pub mod ui;

pub use app::{open_volume, report_fatal, KioskApp, Session, APP_TITLE};
pub use audio::{AudioError, MemoryVolume, MusicPlayer, VolumeControl};
pub use platform::{Settings, VolumeBackend};
pub use ui::{Control, InputEvent, Layout, SliderState};
