//! Default output endpoint lookup using the Windows MMDevice API.
//!
//! Provides COM initialization and resolves the device whose master volume
//! the slider controls.

use super::error::AudioError;
use super::volume::EndpointVolume;
use tracing::{debug, error};
use windows::Win32::Media::Audio::{
    eMultimedia, eRender, IMMDevice, IMMDeviceEnumerator, MMDeviceEnumerator,
};
use windows::Win32::System::Com::{
    CoCreateInstance, CoInitializeEx, CoTaskMemFree, CoUninitialize, CLSCTX_ALL,
    COINIT_APARTMENTTHREADED,
};

/// COM initialization guard that uninitializes COM on drop.
pub struct ComGuard {
    initialized: bool,
}

impl ComGuard {
    /// Initialize COM for the current thread.
    pub fn new() -> Result<Self, AudioError> {
        unsafe {
            // Apartment-threaded, same as the window's OLE initialization
            CoInitializeEx(None, COINIT_APARTMENTTHREADED)
                .ok()
                .map_err(AudioError::ComInitFailed)?;
        }
        Ok(Self { initialized: true })
    }
}

impl Drop for ComGuard {
    fn drop(&mut self) {
        if self.initialized {
            unsafe {
                CoUninitialize();
            }
        }
    }
}

/// Get the default render device for the multimedia role.
///
/// Note: COM must be initialized before calling this function.
pub fn default_output_device() -> Result<IMMDevice, AudioError> {
    unsafe {
        let enumerator: IMMDeviceEnumerator =
            CoCreateInstance(&MMDeviceEnumerator, None, CLSCTX_ALL).map_err(|e| {
                error!("Unable to instantiate device enumerator: {e}");
                AudioError::EnumerationFailed(e)
            })?;

        let device = enumerator
            .GetDefaultAudioEndpoint(eRender, eMultimedia)
            .map_err(|e| {
                error!("Unable to get default output device: {e}");
                AudioError::NoDefaultDevice
            })?;

        if let Ok(id) = device.GetId() {
            if let Ok(id_string) = id.to_string() {
                debug!(device_id = %id_string, "resolved default output device");
            }
            CoTaskMemFree(Some(id.0 as *const _));
        }

        Ok(device)
    }
}

/// Open master volume control on the default output device.
pub fn open_system_volume() -> Result<EndpointVolume, AudioError> {
    let device = default_output_device()?;
    EndpointVolume::new(&device)
}
