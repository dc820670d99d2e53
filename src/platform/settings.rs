//! Runtime settings.
//!
//! Built-in defaults reproduce the stock kiosk. On Windows, per-user
//! registry values can override some of them.

use std::path::PathBuf;
use std::time::Duration;

pub const VOLUME_ICON_FILENAME: &str = "volume.bmp";
pub const CLOSE_ICON_FILENAME: &str = "cross.bmp";
pub const FONT_FILENAME: &str = "FreeSans.ttf";
pub const MUSIC_FILENAME: &str = "sound.wav";

/// Where the slider's volume lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeBackend {
    /// Master volume of the default output endpoint
    System,

    /// Process-local value, no device involved
    Memory,
}

impl VolumeBackend {
    pub fn from_dword(value: u32) -> Self {
        match value {
            1 => VolumeBackend::Memory,
            _ => VolumeBackend::System,
        }
    }
}

impl Default for VolumeBackend {
    fn default() -> Self {
        if cfg!(windows) {
            VolumeBackend::System
        } else {
            VolumeBackend::Memory
        }
    }
}

/// Resolved settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Directory holding the icons, font and music
    pub resource_dir: PathBuf,

    /// Volume backend selected at startup
    pub volume_backend: VolumeBackend,

    /// Starting level of the in-memory backend
    pub initial_volume: f32,

    /// Music fade-in duration
    pub fade_in: Duration,

    /// Delay between frames (about 25 fps)
    pub frame_interval: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            resource_dir: PathBuf::from("."),
            volume_backend: VolumeBackend::default(),
            initial_volume: 0.5,
            fade_in: Duration::from_millis(1000),
            frame_interval: Duration::from_millis(40),
        }
    }
}

impl Settings {
    /// Defaults, overridden by the user's stored preferences where present.
    pub fn load() -> Self {
        let mut settings = Self::default();

        #[cfg(windows)]
        {
            let prefs = super::registry::RegistryPreferences::new();
            prefs.load().apply(&mut settings);
        }

        settings
    }

    pub fn volume_icon_path(&self) -> PathBuf {
        self.resource_dir.join(VOLUME_ICON_FILENAME)
    }

    pub fn close_icon_path(&self) -> PathBuf {
        self.resource_dir.join(CLOSE_ICON_FILENAME)
    }

    pub fn font_path(&self) -> PathBuf {
        self.resource_dir.join(FONT_FILENAME)
    }

    pub fn music_path(&self) -> PathBuf {
        self.resource_dir.join(MUSIC_FILENAME)
    }
}

/// Optional overrides; `None` keeps the default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserPreferences {
    pub resource_dir: Option<PathBuf>,
    pub volume_backend: Option<VolumeBackend>,
    pub fade_in_ms: Option<u32>,
}

impl UserPreferences {
    pub fn apply(self, settings: &mut Settings) {
        if let Some(dir) = self.resource_dir.filter(|d| !d.as_os_str().is_empty()) {
            settings.resource_dir = dir;
        }
        if let Some(backend) = self.volume_backend {
            settings.volume_backend = backend;
        }
        if let Some(ms) = self.fade_in_ms {
            settings.fade_in = Duration::from_millis(u64::from(ms));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();

        assert_eq!(settings.volume_icon_path(), PathBuf::from("./volume.bmp"));
        assert_eq!(settings.close_icon_path(), PathBuf::from("./cross.bmp"));
        assert_eq!(settings.font_path(), PathBuf::from("./FreeSans.ttf"));
        assert_eq!(settings.music_path(), PathBuf::from("./sound.wav"));
        assert_eq!(settings.fade_in, Duration::from_millis(1000));
        assert_eq!(settings.frame_interval, Duration::from_millis(40));
    }

    #[test]
    fn test_backend_dword() {
        assert_eq!(VolumeBackend::from_dword(1), VolumeBackend::Memory);
        assert_eq!(VolumeBackend::from_dword(0), VolumeBackend::System);
        // Unknown values fall back to the system endpoint
        assert_eq!(VolumeBackend::from_dword(7), VolumeBackend::System);
    }

    #[test]
    fn test_preferences_override_defaults() {
        let mut settings = Settings::default();
        UserPreferences {
            resource_dir: Some(PathBuf::from("C:/kiosk")),
            volume_backend: Some(VolumeBackend::Memory),
            fade_in_ms: Some(250),
        }
        .apply(&mut settings);

        assert_eq!(settings.font_path(), PathBuf::from("C:/kiosk").join(FONT_FILENAME));
        assert_eq!(settings.volume_backend, VolumeBackend::Memory);
        assert_eq!(settings.fade_in, Duration::from_millis(250));
    }

    #[test]
    fn test_empty_preferences_keep_defaults() {
        let mut settings = Settings::default();
        UserPreferences {
            resource_dir: Some(PathBuf::new()),
            ..UserPreferences::default()
        }
        .apply(&mut settings);

        assert_eq!(settings, Settings::default());
    }
}
