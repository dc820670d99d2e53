//! UI module for the fullscreen slider overlay.
//!
//! Layout and input handling live in [`slider`]; [`render`] draws a frame
//! from them and [`assets`] loads the icons and label font.

pub mod assets;
pub mod render;
pub mod slider;
pub mod theme;

pub use assets::{AssetError, Assets};
pub use slider::{Control, InputEvent, Layout, SliderState};
pub use theme::Theme;
