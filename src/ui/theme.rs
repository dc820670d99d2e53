//! Kiosk colours.

use eframe::egui;

/// Colours of the fullscreen overlay.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Cleared frame colour
    pub background: egui::Color32,

    /// Unfilled part of the bar
    pub track: egui::Color32,

    /// Filled part of the bar and handle core
    pub accent: egui::Color32,

    /// Ring around the handle core
    pub handle_ring: egui::Color32,

    /// Percentage label
    pub text: egui::Color32,
}

impl Theme {
    /// Width of the handle ring.
    pub const RING_WIDTH: f32 = 5.0;

    /// Displair orange on black.
    pub fn kiosk() -> Self {
        Self {
            background: egui::Color32::BLACK,
            track: egui::Color32::WHITE,
            accent: egui::Color32::from_rgb(215, 120, 10),
            handle_ring: egui::Color32::from_rgb(160, 160, 160),
            text: egui::Color32::WHITE,
        }
    }

    /// Apply the theme to an egui context.
    pub fn apply(&self, ctx: &egui::Context) {
        let mut style = (*ctx.style()).clone();

        style.visuals.panel_fill = self.background;
        style.visuals.window_fill = self.background;
        style.visuals.override_text_color = Some(self.text);

        ctx.set_style(style);
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::kiosk()
    }
}
