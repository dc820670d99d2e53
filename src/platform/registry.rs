//! Windows Registry preferences.
//!
//! Reads optional per-user overrides from
//! `HKCU\Software\DisplairVolumeControl`. Nothing is ever written.

use super::settings::{UserPreferences, VolumeBackend};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, warn};
use windows::core::PCWSTR;
use windows::Win32::System::Registry::{
    RegCloseKey, RegOpenKeyExW, RegQueryValueExW, HKEY, HKEY_CURRENT_USER, KEY_READ, REG_DWORD,
    REG_SZ, REG_VALUE_TYPE,
};

/// Preferences service error types.
#[derive(Debug, Error)]
pub enum PreferencesError {
    #[error("Registry key not found: {key}")]
    KeyNotFound { key: String },

    #[error("Failed to read preference: {key}")]
    ReadFailed { key: String },

    #[error("Invalid preference value for: {key}")]
    InvalidValue { key: String },
}

/// Registry-based preferences service.
pub struct RegistryPreferences {
    app_key_path: Vec<u16>,
}

impl RegistryPreferences {
    const APP_KEY: &'static str = r"Software\DisplairVolumeControl";
    const RESOURCE_DIR_VALUE: &'static str = "ResourceDir";
    const VOLUME_BACKEND_VALUE: &'static str = "VolumeBackend";
    const FADE_IN_VALUE: &'static str = "FadeInMs";

    /// Create a new RegistryPreferences instance.
    pub fn new() -> Self {
        Self {
            app_key_path: Self::to_wide(Self::APP_KEY),
        }
    }

    fn to_wide(s: &str) -> Vec<u16> {
        s.encode_utf16().chain(std::iter::once(0)).collect()
    }

    /// Load whatever overrides are present. Missing or bad values are skipped.
    pub fn load(&self) -> UserPreferences {
        let key = match self.open() {
            Ok(key) => key,
            Err(e) => {
                debug!("No stored preferences: {e}");
                return UserPreferences::default();
            }
        };

        let prefs = UserPreferences {
            resource_dir: Self::report(Self::read_string(key, Self::RESOURCE_DIR_VALUE))
                .map(PathBuf::from),
            volume_backend: Self::report(Self::read_dword(key, Self::VOLUME_BACKEND_VALUE))
                .map(VolumeBackend::from_dword),
            fade_in_ms: Self::report(Self::read_dword(key, Self::FADE_IN_VALUE)),
        };

        unsafe {
            let _ = RegCloseKey(key);
        }

        debug!(?prefs, "loaded preferences");
        prefs
    }

    /// Log anything other than an absent value.
    fn report<T>(value: Result<Option<T>, PreferencesError>) -> Option<T> {
        match value {
            Ok(value) => value,
            Err(e) => {
                warn!("Ignoring preference: {e}");
                None
            }
        }
    }

    fn open(&self) -> Result<HKEY, PreferencesError> {
        unsafe {
            let mut hkey = HKEY::default();
            let result = RegOpenKeyExW(
                HKEY_CURRENT_USER,
                PCWSTR::from_raw(self.app_key_path.as_ptr()),
                0,
                KEY_READ,
                &mut hkey,
            );

            if result.is_err() {
                return Err(PreferencesError::KeyNotFound {
                    key: Self::APP_KEY.to_string(),
                });
            }

            Ok(hkey)
        }
    }

    /// Size and type of a value, or `None` if it doesn't exist.
    fn query(hkey: HKEY, name: &[u16]) -> Option<(REG_VALUE_TYPE, u32)> {
        unsafe {
            let mut value_type = REG_VALUE_TYPE::default();
            let mut data_size = 0u32;
            let result = RegQueryValueExW(
                hkey,
                PCWSTR::from_raw(name.as_ptr()),
                None,
                Some(&mut value_type),
                None,
                Some(&mut data_size),
            );

            if result.is_err() {
                None
            } else {
                Some((value_type, data_size))
            }
        }
    }

    fn read_dword(hkey: HKEY, value: &str) -> Result<Option<u32>, PreferencesError> {
        let value_name = Self::to_wide(value);
        let Some((value_type, _)) = Self::query(hkey, &value_name) else {
            return Ok(None);
        };
        if value_type != REG_DWORD {
            return Err(PreferencesError::InvalidValue {
                key: value.to_string(),
            });
        }

        unsafe {
            let mut data: u32 = 0;
            let mut data_size = std::mem::size_of::<u32>() as u32;
            let result = RegQueryValueExW(
                hkey,
                PCWSTR::from_raw(value_name.as_ptr()),
                None,
                None,
                Some(&mut data as *mut u32 as *mut u8),
                Some(&mut data_size),
            );

            if result.is_err() {
                return Err(PreferencesError::ReadFailed {
                    key: value.to_string(),
                });
            }

            Ok(Some(data))
        }
    }

    fn read_string(hkey: HKEY, value: &str) -> Result<Option<String>, PreferencesError> {
        let value_name = Self::to_wide(value);
        let Some((value_type, data_size)) = Self::query(hkey, &value_name) else {
            return Ok(None);
        };
        if value_type != REG_SZ {
            return Err(PreferencesError::InvalidValue {
                key: value.to_string(),
            });
        }

        let mut buffer = vec![0u16; (data_size as usize).div_ceil(2)];
        unsafe {
            let mut data_size = (buffer.len() * 2) as u32;
            let result = RegQueryValueExW(
                hkey,
                PCWSTR::from_raw(value_name.as_ptr()),
                None,
                None,
                Some(buffer.as_mut_ptr() as *mut u8),
                Some(&mut data_size),
            );

            if result.is_err() {
                return Err(PreferencesError::ReadFailed {
                    key: value.to_string(),
                });
            }
        }

        // REG_SZ data may or may not carry its terminator
        let len = buffer.iter().position(|&c| c == 0).unwrap_or(buffer.len());
        String::from_utf16(&buffer[..len])
            .map(Some)
            .map_err(|_| PreferencesError::InvalidValue {
                key: value.to_string(),
            })
    }
}

impl Default for RegistryPreferences {
    fn default() -> Self {
        Self::new()
    }
}
