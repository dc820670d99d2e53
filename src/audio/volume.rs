//! Master volume backends.
//!
//! [`VolumeControl`] is the capability the slider drives. [`MemoryVolume`]
//! keeps the value in-process; on Windows [`EndpointVolume`] proxies it to
//! the default render endpoint through IAudioEndpointVolume.

use super::error::AudioError;

/// Read/write access to a master volume scalar in `0.0..=1.0`.
pub trait VolumeControl {
    /// Get the current volume level (0.0 to 1.0).
    fn get_volume(&self) -> Result<f32, AudioError>;

    /// Set the volume level. Out-of-range values are clamped.
    fn set_volume(&mut self, level: f32) -> Result<(), AudioError>;

    /// Short backend name for logs.
    fn name(&self) -> &'static str;
}

/// Process-local volume with no device behind it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MemoryVolume {
    level: f32,
}

impl MemoryVolume {
    pub fn new(level: f32) -> Self {
        Self {
            level: level.clamp(0.0, 1.0),
        }
    }
}

impl Default for MemoryVolume {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl VolumeControl for MemoryVolume {
    fn get_volume(&self) -> Result<f32, AudioError> {
        Ok(self.level)
    }

    fn set_volume(&mut self, level: f32) -> Result<(), AudioError> {
        self.level = level.clamp(0.0, 1.0);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(windows)]
pub use self::endpoint_volume::EndpointVolume;

#[cfg(windows)]
mod endpoint_volume {
    use super::{AudioError, VolumeControl};
    use windows::Win32::Media::Audio::{Endpoints::IAudioEndpointVolume, IMMDevice};
    use windows::Win32::System::Com::CLSCTX_ALL;

    /// Master volume of one output device.
    pub struct EndpointVolume {
        endpoint_volume: IAudioEndpointVolume,
    }

    impl EndpointVolume {
        /// Activate IAudioEndpointVolume on the given device.
        pub fn new(device: &IMMDevice) -> Result<Self, AudioError> {
            unsafe {
                let endpoint_volume: IAudioEndpointVolume = device
                    .Activate(CLSCTX_ALL, None)
                    .map_err(|_| AudioError::VolumeNotAvailable)?;

                Ok(Self { endpoint_volume })
            }
        }
    }

    impl VolumeControl for EndpointVolume {
        fn get_volume(&self) -> Result<f32, AudioError> {
            unsafe {
                self.endpoint_volume
                    .GetMasterVolumeLevelScalar()
                    .map_err(AudioError::WindowsError)
            }
        }

        fn set_volume(&mut self, level: f32) -> Result<(), AudioError> {
            let level = level.clamp(0.0, 1.0);
            unsafe {
                self.endpoint_volume
                    .SetMasterVolumeLevelScalar(level, std::ptr::null())
                    .map_err(AudioError::WindowsError)?;
            }
            Ok(())
        }

        fn name(&self) -> &'static str {
            "endpoint"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_volume_defaults_to_half() {
        let volume = MemoryVolume::default();
        assert_eq!(volume.get_volume().unwrap(), 0.5);
    }

    #[test]
    fn test_memory_volume_clamps_writes() {
        let mut volume = MemoryVolume::new(0.3);

        volume.set_volume(1.7).unwrap();
        assert_eq!(volume.get_volume().unwrap(), 1.0);

        volume.set_volume(-0.2).unwrap();
        assert_eq!(volume.get_volume().unwrap(), 0.0);

        volume.set_volume(0.25).unwrap();
        assert_eq!(volume.get_volume().unwrap(), 0.25);
    }

    #[test]
    fn test_memory_volume_clamps_initial_level() {
        assert_eq!(MemoryVolume::new(4.0).get_volume().unwrap(), 1.0);
    }
}
