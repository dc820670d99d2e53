//! Icon and font loading.
//!
//! Every loader degrades: a failed asset is logged and the caller skips
//! drawing it.

use crate::platform::Settings;
use eframe::egui;
use std::path::Path;
use thiserror::Error;
use tracing::{error, info};

/// Font family used for the percentage label.
pub const LABEL_FONT_FAMILY: &str = "label";

/// Asset loading error types.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode image {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("{path} is not a TrueType/OpenType font")]
    NotAFont { path: String },
}

/// Textures and fonts loaded at startup.
#[derive(Default)]
pub struct Assets {
    /// Speaker icon left of the label
    pub volume_icon: Option<egui::TextureHandle>,

    /// Close button in the bottom-left corner
    pub close_icon: Option<egui::TextureHandle>,

    /// Whether the label font registered
    pub label_font: bool,
}

impl Assets {
    /// Load everything from `settings.resource_dir`. Never fails.
    pub fn load(ctx: &egui::Context, settings: &Settings) -> Self {
        Self {
            volume_icon: load_texture(ctx, "volume_icon", &settings.volume_icon_path()),
            close_icon: load_texture(ctx, "close_icon", &settings.close_icon_path()),
            label_font: load_label_font(ctx, &settings.font_path()),
        }
    }

    /// Natural size of the volume icon, if loaded.
    pub fn volume_icon_size(&self) -> Option<egui::Vec2> {
        self.volume_icon.as_ref().map(|t| t.size_vec2())
    }

    /// Natural size of the close icon, if loaded.
    pub fn close_icon_size(&self) -> Option<egui::Vec2> {
        self.close_icon.as_ref().map(|t| t.size_vec2())
    }
}

/// Decode an image file into RGBA pixels.
pub fn load_image(path: &Path) -> Result<egui::ColorImage, AssetError> {
    let image = image::open(path).map_err(|source| AssetError::Decode {
        path: path.display().to_string(),
        source,
    })?;
    let rgba = image.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];

    Ok(egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}

/// Load an image file as a texture. Returns `None` if it can't be loaded.
pub fn load_texture(ctx: &egui::Context, name: &str, path: &Path) -> Option<egui::TextureHandle> {
    match load_image(path) {
        Ok(image) => {
            info!(path = %path.display(), width = image.width(), height = image.height(), "loaded texture");
            Some(ctx.load_texture(name, image, egui::TextureOptions::LINEAR))
        }
        Err(e) => {
            error!("Unable to load texture: {e}");
            None
        }
    }
}

/// Check the sfnt version tag of a font file.
pub fn looks_like_font(bytes: &[u8]) -> bool {
    matches!(
        bytes.get(..4),
        Some([0x00, 0x01, 0x00, 0x00]) | Some(b"OTTO") | Some(b"true") | Some(b"ttcf")
    )
}

/// Read a font file and check it is one.
pub fn read_font(path: &Path) -> Result<Vec<u8>, AssetError> {
    let bytes = std::fs::read(path).map_err(|source| AssetError::Read {
        path: path.display().to_string(),
        source,
    })?;

    if !looks_like_font(&bytes) {
        return Err(AssetError::NotAFont {
            path: path.display().to_string(),
        });
    }

    Ok(bytes)
}

/// Register the label font with egui. Returns whether the label can be drawn.
pub fn load_label_font(ctx: &egui::Context, path: &Path) -> bool {
    let bytes = match read_font(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            error!("Could not load font: {e}");
            return false;
        }
    };

    let mut fonts = egui::FontDefinitions::default();
    fonts
        .font_data
        .insert(LABEL_FONT_FAMILY.to_owned(), egui::FontData::from_owned(bytes));
    fonts.families.insert(
        egui::FontFamily::Name(LABEL_FONT_FAMILY.into()),
        vec![LABEL_FONT_FAMILY.to_owned()],
    );
    ctx.set_fonts(fonts);

    info!(path = %path.display(), "loaded label font");
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("displair-{}-{name}", std::process::id()))
    }

    #[test]
    fn test_font_sniffing() {
        assert!(looks_like_font(&[0x00, 0x01, 0x00, 0x00, 0x00, 0x10]));
        assert!(looks_like_font(b"OTTO\x00\x0b"));
        assert!(!looks_like_font(b"BM\x00\x00\x00"));
        assert!(!looks_like_font(b"OT"));
        assert!(!looks_like_font(&[]));
    }

    #[test]
    fn test_missing_font_is_reported() {
        let err = read_font(&temp_path("missing.ttf")).unwrap_err();
        assert!(matches!(err, AssetError::Read { .. }));
    }

    #[test]
    fn test_non_font_is_rejected() {
        let path = temp_path("bogus.ttf");
        std::fs::write(&path, b"definitely not a font").unwrap();

        let err = read_font(&path).unwrap_err();
        let _ = std::fs::remove_file(&path);

        assert!(matches!(err, AssetError::NotAFont { .. }));
    }

    #[test]
    fn test_loads_bitmap() {
        let path = temp_path("icon.bmp");
        image::RgbaImage::from_pixel(6, 4, image::Rgba([255, 0, 0, 255]))
            .save(&path)
            .unwrap();

        let image = load_image(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(image.size, [6, 4]);
        assert_eq!(image.pixels[0], egui::Color32::from_rgb(255, 0, 0));
    }

    #[test]
    fn test_missing_resources_degrade() {
        let ctx = egui::Context::default();
        let settings = Settings {
            resource_dir: temp_path("no-such-dir"),
            ..Settings::default()
        };

        let assets = Assets::load(&ctx, &settings);

        assert!(assets.volume_icon_size().is_none());
        assert!(assets.close_icon_size().is_none());
        assert!(!assets.label_font);
    }

    #[test]
    fn test_missing_texture_is_skipped() {
        let ctx = egui::Context::default();
        assert!(load_texture(&ctx, "missing", &temp_path("missing.bmp")).is_none());
    }
}
