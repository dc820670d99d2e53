//! Frame drawing.

use super::assets::{Assets, LABEL_FONT_FAMILY};
use super::slider::Layout;
use super::theme::Theme;
use eframe::egui::{self, pos2, Align2, Color32, FontFamily, FontId, Rect};

/// Label font size in points.
pub const LABEL_FONT_SIZE: f32 = 96.0;

/// Full-texture UV rect.
fn full_uv() -> Rect {
    Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0))
}

/// Percentage label text, e.g. `"42"`.
pub fn percent_label(volume: f32) -> String {
    ((volume.clamp(0.0, 1.0) * 100.0).round() as u8).to_string()
}

/// Draw one frame of the overlay.
pub fn draw_frame(
    painter: &egui::Painter,
    layout: &Layout,
    volume: f32,
    assets: &Assets,
    theme: &Theme,
) {
    painter.rect_filled(painter.clip_rect(), 0.0, theme.background);

    if let Some(texture) = &assets.volume_icon {
        painter.image(texture.id(), layout.volume_icon, full_uv(), Color32::WHITE);
    }

    if let (Some(texture), Some(rect)) = (&assets.close_icon, layout.close_icon) {
        painter.image(texture.id(), rect, full_uv(), Color32::WHITE);
    }

    painter.rect_filled(layout.bar, 0.0, theme.track);
    painter.rect_filled(layout.fill_rect(volume), 0.0, theme.accent);

    // Grey ring, orange core; egui tessellates circles anti-aliased
    let handle = layout.handle_rect(volume);
    let radius = handle.width() / 2.0;
    painter.circle_filled(handle.center(), radius, theme.handle_ring);
    painter.circle_filled(handle.center(), radius - Theme::RING_WIDTH, theme.accent);

    if assets.label_font {
        painter.text(
            layout.label_anchor,
            Align2::CENTER_CENTER,
            percent_label(volume),
            FontId::new(LABEL_FONT_SIZE, FontFamily::Name(LABEL_FONT_FAMILY.into())),
            theme.text,
        );
    }
}
