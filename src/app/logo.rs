//! Logo image loading and preview texture

use super::App;
use eframe::egui;
use tracing::{info, warn};

impl App {
    /// Open a file picker and load the chosen image as the quote logo.
    pub(crate) fn pick_logo(&mut self, ctx: &egui::Context) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", &["png", "jpg", "jpeg"])
            .pick_file()
        else {
            return;
        };

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "logo".to_string());

        match std::fs::read(&path) {
            Ok(bytes) => self.load_logo(ctx, bytes, file_name),
            Err(e) => {
                warn!(error = %e, path = %path.display(), "Failed to read logo file");
                self.show_toast("Could not read the logo file");
            }
        }
    }

    /// Decode logo bytes for the on-screen preview and keep the raw bytes
    /// for PDF embedding. A failed decode leaves any previous logo intact.
    pub(crate) fn load_logo(&mut self, ctx: &egui::Context, bytes: Vec<u8>, file_name: String) {
        match image::load_from_memory(&bytes) {
            Ok(decoded) => {
                let rgba = decoded.to_rgba8();
                let (w, h) = rgba.dimensions();
                let texture = ctx.load_texture(
                    "quote_logo",
                    egui::ColorImage::from_rgba_unmultiplied([w as usize, h as usize], &rgba),
                    egui::TextureOptions::LINEAR,
                );
                info!(file = %file_name, width = w, height = h, "Logo loaded");
                self.logo_texture = Some(texture);
                self.logo_bytes = Some(bytes);
                self.logo_name = Some(file_name);
            }
            Err(e) => {
                warn!(error = %e, file = %file_name, "Failed to decode logo");
                self.show_toast("Logo must be a PNG or JPEG image");
            }
        }
    }

    pub(crate) fn clear_logo(&mut self) {
        self.logo_bytes = None;
        self.logo_texture = None;
        self.logo_name = None;
    }
}
