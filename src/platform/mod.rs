//! Platform module: runtime settings and their Windows registry overrides.

#[cfg(windows)]
pub mod registry;
pub mod settings;

#[cfg(windows)]
pub use registry::{PreferencesError, RegistryPreferences};
pub use settings::{Settings, UserPreferences, VolumeBackend};
