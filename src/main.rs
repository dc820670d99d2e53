#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use anyhow::{anyhow, Result};
use displair_volume_control::ui::slider::CANVAS_SIZE;
use displair_volume_control::{open_volume, report_fatal, KioskApp, Settings, APP_TITLE};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[cfg(windows)]
fn show_error(msg: &str) {
    use windows::core::PCWSTR;
    use windows::Win32::UI::WindowsAndMessaging::{MessageBoxW, MB_ICONERROR, MB_OK};

    unsafe {
        let msg_wide: Vec<u16> = msg.encode_utf16().chain(std::iter::once(0)).collect();
        let title_wide: Vec<u16> = APP_TITLE.encode_utf16().chain(std::iter::once(0)).collect();
        MessageBoxW(None, PCWSTR(msg_wide.as_ptr()), PCWSTR(title_wide.as_ptr()), MB_OK | MB_ICONERROR);
    }
}

#[cfg(not(windows))]
fn show_error(_msg: &str) {}

// Every termination path exits 0, fatal startup errors included
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Some(msg) = report_fatal(run()) {
        show_error(&msg);
    }
}

fn run() -> Result<()> {
    let settings = Settings::load();
    info!(?settings, "starting {APP_TITLE}");

    // COM stays initialized until the window has closed and the endpoint is released
    #[cfg(windows)]
    let _com = displair_volume_control::audio::endpoint::ComGuard::new()?;

    let volume = open_volume(&settings)?;

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title(APP_TITLE)
            .with_inner_size(CANVAS_SIZE)
            .with_fullscreen(true),
        ..Default::default()
    };

    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(move |cc| Ok(Box::new(KioskApp::new(cc, settings, volume)))),
    )
    .map_err(|e| anyhow!("Unable to create window: {e}"))?;

    info!("session ended");
    Ok(())
}
