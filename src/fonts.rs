//! Font setup for the egui context.

use std::sync::Arc;

use egui::{FontData, FontDefinitions, FontFamily, FontId, TextStyle};

use crate::config::AppConfig;
use crate::ui_constants::text;

const CUSTOM_FONT: &str = "custom";

/// Cheap signature check so a non-font file never reaches the rasterizer.
pub fn looks_like_font(bytes: &[u8]) -> bool {
    matches!(
        bytes.get(..4),
        Some([0x00, 0x01, 0x00, 0x00]) | Some(b"OTTO") | Some(b"true") | Some(b"ttcf")
    )
}

/// Install the configured font (if any) and text sizes.
///
/// A missing or unreadable font file keeps egui's built-in font.
pub fn install(ctx: &egui::Context, config: &AppConfig) {
    if let Some(bytes) = load_font_bytes(config) {
        let mut fonts = FontDefinitions::default();
        fonts
            .font_data
            .insert(CUSTOM_FONT.to_owned(), Arc::new(FontData::from_owned(bytes)));
        for family in [FontFamily::Proportional, FontFamily::Monospace] {
            fonts
                .families
                .entry(family)
                .or_default()
                .insert(0, CUSTOM_FONT.to_owned());
        }
        ctx.set_fonts(fonts);
    }

    let body = config.font_size.max(1.0);
    ctx.style_mut(|style| {
        style.text_styles = [
            (TextStyle::Small, FontId::proportional(body * text::SMALL_SCALE)),
            (TextStyle::Body, FontId::proportional(body)),
            (TextStyle::Button, FontId::proportional(body)),
            (TextStyle::Heading, FontId::proportional(body * text::HEADING_SCALE)),
            (TextStyle::Monospace, FontId::monospace(body)),
        ]
        .into();
    });
}

#[cfg(not(target_arch = "wasm32"))]
fn load_font_bytes(config: &AppConfig) -> Option<Vec<u8>> {
    let path = config.font_path.as_ref()?;
    match std::fs::read(path) {
        Ok(bytes) if looks_like_font(&bytes) => {
            log::info!("Loaded font {:?}", path);
            Some(bytes)
        }
        Ok(_) => {
            log::warn!("{:?} is not a TTF/OTF font, using the default font", path);
            None
        }
        Err(e) => {
            log::warn!("Failed to read font {:?}: {}, using the default font", path, e);
            None
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn load_font_bytes(config: &AppConfig) -> Option<Vec<u8>> {
    if config.font_path.is_some() {
        log::warn!("font_path is ignored in the browser build");
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_signatures() {
        assert!(looks_like_font(&[0x00, 0x01, 0x00, 0x00, 0x12]));
        assert!(looks_like_font(b"OTTO...."));
        assert!(looks_like_font(b"ttcf"));
        assert!(!looks_like_font(b"<htm"));
        assert!(!looks_like_font(&[0x00, 0x01]));
    }

    #[test]
    fn test_install_sets_body_size() {
        let ctx = egui::Context::default();
        let config = AppConfig {
            font_size: 20.0,
            ..AppConfig::default()
        };
        install(&ctx, &config);
        let size = ctx.style().text_styles[&TextStyle::Body].size;
        assert_eq!(size, 20.0);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_missing_font_falls_back() {
        let config = AppConfig {
            font_path: Some("/definitely/not/here.ttf".into()),
            ..AppConfig::default()
        };
        assert!(load_font_bytes(&config).is_none());
    }
}
