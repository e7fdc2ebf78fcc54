//! App module - contains the main application state and logic

mod export;
mod form;
mod logo;

use crate::settings::Settings;
use crate::theme;
use crate::types::{LineItem, UnitOfMeasure};
use eframe::egui;
use form::ItemDraft;
use std::path::PathBuf;

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    // Quote content (session-only, never persisted)
    pub(crate) items: Vec<LineItem>,
    pub(crate) draft: ItemDraft,
    pub(crate) form_error: Option<String>,
    pub(crate) doc_title: String,
    // Logo
    pub(crate) logo_bytes: Option<Vec<u8>>,
    pub(crate) logo_texture: Option<egui::TextureHandle>,
    pub(crate) logo_name: Option<String>,
    pub(crate) mark_texture: Option<egui::TextureHandle>,
    // Preferences
    pub(crate) currency_symbol: String,
    pub(crate) default_measure: UnitOfMeasure,
    pub(crate) export_dir: PathBuf,
    pub(crate) export_dir_str: String,
    pub(crate) show_settings: bool,
    // Export result
    pub(crate) last_export: Option<PathBuf>,
    // Toast notification
    pub(crate) toast_message: Option<String>,
    pub(crate) toast_start: Option<std::time::Instant>,
    // Window geometry tracking
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
    pub(crate) needs_center: bool,
    pub(crate) data_dir: PathBuf,
}

// ============================================================================
// APP INITIALIZATION & HELPERS
// ============================================================================

impl App {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Settings, data_dir: PathBuf) -> Self {
        // Force dark theme
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        // Add Phosphor icons font
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        // Apply theme from theme.rs
        theme::apply_visuals(&cc.egui_ctx);

        let export_dir = settings.export_dir_or_default();

        Self {
            items: Vec::new(),
            draft: ItemDraft::new(settings.default_measure),
            form_error: None,
            doc_title: "Quote".to_string(),
            logo_bytes: None,
            logo_texture: None,
            logo_name: None,
            mark_texture: None,
            currency_symbol: settings.currency_symbol,
            default_measure: settings.default_measure,
            export_dir: export_dir.clone(),
            export_dir_str: export_dir.to_string_lossy().to_string(),
            show_settings: false,
            last_export: None,
            toast_message: None,
            toast_start: None,
            window_pos: None,
            window_size: None,
            needs_center: false,
            data_dir,
        }
    }

    pub(crate) fn save_settings(&self) {
        let settings = Settings {
            window_x: self.window_pos.map(|p| p.x),
            window_y: self.window_pos.map(|p| p.y),
            window_w: self.window_size.map(|s| s.x),
            window_h: self.window_size.map(|s| s.y),
            currency_symbol: self.currency_symbol.clone(),
            default_measure: self.default_measure,
            export_dir: Some(self.export_dir.to_string_lossy().to_string()),
        };
        settings.save(&self.data_dir);
    }

    pub(crate) fn show_toast(&mut self, message: impl Into<String>) {
        self.toast_message = Some(message.into());
        self.toast_start = Some(std::time::Instant::now());
    }
}
