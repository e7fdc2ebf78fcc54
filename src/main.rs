#![windows_subsystem = "windows"]
//! QuoteForge - Main entry point

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

mod app;
mod constants;
mod pdf;
mod settings;
mod theme;
mod types;
mod ui;
mod utils;

use app::App;
use constants::*;
use eframe::egui;
use tracing::info;
use types::Quantity;
use ui::components;
use utils::{format_currency, format_quantity};

/// Initialize file logging. Returns a guard that must be held for the app lifetime.
fn init_logging(data_dir: &std::path::Path) -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let logs_dir = data_dir.join("logs");
    std::fs::create_dir_all(&logs_dir).ok();

    let file_appender = tracing_appender::rolling::daily(&logs_dir, "quoteforge.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,quoteforge=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    guard
}

fn main() -> eframe::Result<()> {
    let data_dir = utils::get_data_dir();
    std::fs::create_dir_all(&data_dir).ok();

    // Initialize logging - guard must live for entire app lifetime
    let _log_guard = init_logging(&data_dir);

    info!(version = APP_VERSION, "QuoteForge starting");

    // Load saved window position/size
    let settings = settings::Settings::load(&data_dir);
    let win_pos = match (settings.window_x, settings.window_y) {
        (Some(x), Some(y)) => Some(egui::pos2(x, y)),
        _ => None,
    };
    let win_size = match (settings.window_w, settings.window_h) {
        (Some(w), Some(h)) => Some(egui::vec2(w, h)),
        _ => None,
    };

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size(win_size.unwrap_or(egui::vec2(960.0, 720.0)))
        .with_min_inner_size([780.0, 560.0])
        .with_title(APP_NAME);

    // Window/taskbar icon rasterized from the built-in SVG mark
    {
        let (pixels, w, h) = utils::rasterize_mark(256);
        let icon = egui::IconData { rgba: pixels, width: w, height: h };
        viewport = viewport.with_icon(std::sync::Arc::new(icon));
    }

    let needs_center = win_pos.is_none();

    if let Some(pos) = win_pos {
        viewport = viewport.with_position(pos);
    }

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        options,
        Box::new(move |cc| {
            let mut app = App::new(cc, settings, data_dir);
            app.needs_center = needs_center;
            Ok(Box::new(app))
        }),
    )
}

// ============================================================================
// MAIN UPDATE LOOP & UI RENDERING
// ============================================================================

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Track window position/size for saving on exit
        ctx.input(|i| {
            if let Some(rect) = i.viewport().outer_rect {
                self.window_pos = Some(rect.min);
            }
            if let Some(rect) = i.viewport().inner_rect {
                self.window_size = Some(rect.size());
            }
        });

        // Center window on first launch
        if self.needs_center {
            self.needs_center = false;
            if let Some(cmd) = egui::ViewportCommand::center_on_screen(ctx) {
                ctx.send_viewport_cmd(cmd);
            }
        }

        egui::CentralPanel::default()
            .frame(
                egui::Frame::new()
                    .fill(theme::BG_BASE)
                    .inner_margin(egui::Margin::same(16)),
            )
            .show(ctx, |ui| {
                self.render_header(ui, ctx);
                ui.add_space(theme::SPACING_LG);

                egui::ScrollArea::vertical().show(ui, |ui| {
                    self.render_logo_section(ui, ctx);
                    ui.add_space(theme::SPACING_MD);
                    self.render_document_section(ui);
                    ui.add_space(theme::SPACING_MD);
                    self.render_form_section(ui);
                    ui.add_space(theme::SPACING_MD);
                    self.render_items_section(ui);
                    ui.add_space(theme::SPACING_LG);
                    self.render_export_bar(ui);
                });
            });

        self.render_settings_modal(ctx);
        self.render_toast(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.save_settings();
    }
}

// ============================================================================
// SECTIONS
// ============================================================================

impl App {
    fn render_header(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.horizontal(|ui| {
            let texture = self.mark_texture.get_or_insert_with(|| {
                let (pixels, w, h) = utils::rasterize_mark(64);
                ctx.load_texture(
                    "app_mark",
                    egui::ColorImage::from_rgba_unmultiplied([w as usize, h as usize], &pixels),
                    egui::TextureOptions::LINEAR,
                )
            });
            ui.image(egui::load::SizedTexture::new(
                texture.id(),
                egui::vec2(26.0, 26.0),
            ));
            ui.add(
                egui::Label::new(
                    egui::RichText::new("QUOTEFORGE")
                        .size(15.0)
                        .strong()
                        .color(theme::TEXT_PRIMARY),
                )
                .selectable(false),
            );
            ui.add(
                egui::Label::new(
                    egui::RichText::new(format!("v{}", APP_VERSION))
                        .size(theme::FONT_CAPTION)
                        .color(theme::TEXT_DIM),
                )
                .selectable(false),
            );

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if components::icon_button(ui, egui_phosphor::regular::GEAR, theme::TEXT_MUTED) {
                    self.show_settings = true;
                }
            });
        });
    }

    fn render_logo_section(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        theme::section_frame().show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.horizontal(|ui| {
                components::field_label(ui, "COMPANY LOGO");
                ui.add(
                    egui::Label::new(
                        egui::RichText::new("optional, centered at the top of the PDF")
                            .size(theme::FONT_CAPTION)
                            .color(theme::TEXT_DIM),
                    )
                    .selectable(false),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let label = format!("{} Upload", egui_phosphor::regular::UPLOAD_SIMPLE);
                    if paint_button(
                        ui,
                        egui::vec2(92.0, theme::BUTTON_HEIGHT),
                        theme::BTN_DEFAULT,
                        theme::TEXT_PRIMARY,
                        &label,
                        true,
                    ) {
                        self.pick_logo(ctx);
                    }
                });
            });

            if let Some(texture) = self.logo_texture.clone() {
                ui.add_space(theme::SPACING_MD);
                ui.horizontal(|ui| {
                    let size = texture.size();
                    let aspect = size[0] as f32 / size[1] as f32;
                    let h = theme::LOGO_PREVIEW_HEIGHT;
                    let w = (h * aspect).min(240.0);
                    ui.image(egui::load::SizedTexture::new(texture.id(), egui::vec2(w, h)));
                    if let Some(name) = &self.logo_name {
                        ui.add(
                            egui::Label::new(
                                egui::RichText::new(name)
                                    .size(theme::FONT_SECTION)
                                    .color(theme::TEXT_MUTED),
                            )
                            .selectable(false),
                        );
                    }
                    if components::icon_button(ui, egui_phosphor::regular::X, theme::STATUS_ERROR)
                    {
                        self.clear_logo();
                    }
                });
            }
        });
    }

    fn render_document_section(&mut self, ui: &mut egui::Ui) {
        theme::section_frame().show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            components::field_label(ui, "DOCUMENT TITLE");
            ui.add_space(theme::SPACING_SM);
            ui.horizontal(|ui| {
                input_field(ui, &mut self.doc_title, "Quote", 260.0);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let date = chrono::Local::now().format("%b %d, %Y").to_string();
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new(date)
                                .size(theme::FONT_SECTION)
                                .color(theme::TEXT_DIM),
                        )
                        .selectable(false),
                    );
                });
            });
        });
    }

    fn render_form_section(&mut self, ui: &mut egui::Ui) {
        theme::section_frame().show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            components::field_label(ui, "ADD ITEM");
            ui.add_space(theme::SPACING_SM);

            let mut submit = false;
            ui.horizontal(|ui| {
                let fixed = 84.0 + 84.0 + 110.0 + 96.0;
                let spacing = ui.spacing().item_spacing.x * 4.0;
                let name_width = (ui.available_width() - fixed - spacing - 34.0).max(120.0);

                let name_resp = input_field(ui, &mut self.draft.name, "Item", name_width);

                let qty_hint = format!("Qty ({})", self.draft.measure.label());
                let qty_resp = input_field(ui, &mut self.draft.quantity, &qty_hint, 84.0);

                components::measure_selector(ui, "draft_measure", &mut self.draft.measure, 84.0);

                let value_hint = format!("Unit value ({})", self.currency_symbol);
                let value_resp = input_field(ui, &mut self.draft.value, &value_hint, 110.0);

                let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
                if enter
                    && (name_resp.lost_focus()
                        || qty_resp.lost_focus()
                        || value_resp.lost_focus())
                {
                    submit = true;
                }

                let label = format!("{} Add", egui_phosphor::regular::PLUS);
                if paint_button(
                    ui,
                    egui::vec2(96.0, theme::BUTTON_HEIGHT),
                    theme::BTN_ACCENT,
                    theme::BTN_ACCENT_TEXT,
                    &label,
                    true,
                ) {
                    submit = true;
                }
            });

            if submit {
                self.add_item();
            }

            if let Some(error) = &self.form_error {
                ui.add_space(theme::SPACING_SM);
                ui.add(
                    egui::Label::new(
                        egui::RichText::new(error)
                            .size(theme::FONT_SECTION)
                            .color(theme::STATUS_ERROR),
                    )
                    .selectable(false),
                );
            }

            ui.add_space(theme::SPACING_SM);
            ui.add(
                egui::Label::new(
                    egui::RichText::new("Enter \"-\" as quantity to use the value as a flat total")
                        .size(theme::FONT_CAPTION)
                        .color(theme::TEXT_DIM),
                )
                .selectable(false),
            );
        });
    }

    fn render_items_section(&mut self, ui: &mut egui::Ui) {
        use egui_extras::{Column, TableBuilder};

        theme::section_frame().show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            components::field_label(ui, "ITEMS");
            ui.add_space(theme::SPACING_SM);

            if self.items.is_empty() {
                ui.add(
                    egui::Label::new(
                        egui::RichText::new("No items yet. Add the first one above.")
                            .size(theme::FONT_LABEL)
                            .color(theme::TEXT_DIM),
                    )
                    .selectable(false),
                );
                return;
            }

            let mut to_remove: Option<usize> = None;
            let currency = self.currency_symbol.clone();

            TableBuilder::new(ui)
                .striped(true)
                .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                .column(Column::remainder().at_least(140.0))
                .column(Column::exact(110.0))
                .column(Column::exact(110.0))
                .column(Column::exact(110.0))
                .column(Column::exact(30.0))
                .header(26.0, |mut header| {
                    for label in ["Item", "Quantity", "Unit Price", "Total", ""] {
                        header.col(|ui| {
                            ui.add(
                                egui::Label::new(
                                    egui::RichText::new(label)
                                        .size(theme::FONT_SECTION)
                                        .color(theme::TEXT_DIM),
                                )
                                .selectable(false),
                            );
                        });
                    }
                })
                .body(|body| {
                    body.rows(theme::TABLE_ROW_HEIGHT, self.items.len(), |mut row| {
                        let index = row.index();
                        let item = &self.items[index];

                        let (quantity, unit_price) = match item.quantity {
                            Quantity::Flat => ("N/A".to_string(), "-".to_string()),
                            Quantity::Of(n) => (
                                format_quantity(n, item.measure),
                                format_currency(&currency, item.unit_value),
                            ),
                        };

                        row.col(|ui| {
                            ui.label(
                                egui::RichText::new(&item.name)
                                    .size(theme::FONT_LABEL)
                                    .color(theme::TEXT_SECONDARY),
                            );
                        });
                        row.col(|ui| {
                            ui.label(
                                egui::RichText::new(quantity)
                                    .size(theme::FONT_LABEL)
                                    .color(theme::TEXT_MUTED),
                            );
                        });
                        row.col(|ui| {
                            ui.label(
                                egui::RichText::new(unit_price)
                                    .size(theme::FONT_LABEL)
                                    .color(theme::TEXT_MUTED),
                            );
                        });
                        row.col(|ui| {
                            ui.label(
                                egui::RichText::new(format_currency(&currency, item.total()))
                                    .size(theme::FONT_LABEL)
                                    .color(theme::TEXT_PRIMARY),
                            );
                        });
                        row.col(|ui| {
                            if components::icon_button(
                                ui,
                                egui_phosphor::regular::TRASH,
                                theme::STATUS_ERROR,
                            ) {
                                to_remove = Some(index);
                            }
                        });
                    });
                });

            if let Some(index) = to_remove {
                self.remove_item(index);
            }

            ui.add_space(theme::SPACING_MD);
            ui.separator();
            ui.add_space(theme::SPACING_SM);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.add(
                    egui::Label::new(
                        egui::RichText::new(format_currency(
                            &self.currency_symbol,
                            types::grand_total(&self.items),
                        ))
                        .size(theme::FONT_TITLE)
                        .strong()
                        .color(theme::ACCENT_LIGHT),
                    )
                    .selectable(false),
                );
                ui.add(
                    egui::Label::new(
                        egui::RichText::new("Grand total")
                            .size(theme::FONT_LABEL)
                            .color(theme::TEXT_DIM),
                    )
                    .selectable(false),
                );
            });
        });
    }

    fn render_export_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let enabled = !self.items.is_empty();
            let label = format!("{} Export PDF", egui_phosphor::regular::FILE_PDF);
            if paint_button(
                ui,
                egui::vec2(150.0, theme::BUTTON_HEIGHT_LARGE),
                theme::BTN_ACCENT,
                theme::BTN_ACCENT_TEXT,
                &label,
                enabled,
            ) {
                self.export_pdf();
            }

            if self.last_export.is_some() {
                let open_label = format!("{} Open", egui_phosphor::regular::ARROW_SQUARE_OUT);
                if paint_button(
                    ui,
                    egui::vec2(84.0, theme::BUTTON_HEIGHT_LARGE),
                    theme::BTN_DEFAULT,
                    theme::TEXT_PRIMARY,
                    &open_label,
                    true,
                ) {
                    self.open_last_export();
                }
            }

            if let Some(path) = &self.last_export {
                ui.add(
                    egui::Label::new(
                        egui::RichText::new(path.to_string_lossy())
                            .size(theme::FONT_CAPTION)
                            .color(theme::TEXT_DIM),
                    )
                    .selectable(false)
                    .truncate(),
                );
            }
        });
    }

    fn render_settings_modal(&mut self, ctx: &egui::Context) {
        if !self.show_settings {
            return;
        }

        let modal_response = egui::Modal::new(egui::Id::new("settings_modal"))
            .backdrop_color(egui::Color32::from_black_alpha(120))
            .frame(
                egui::Frame::new()
                    .fill(egui::Color32::from_rgb(0x1a, 0x1a, 0x1e))
                    .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(0x2a, 0x2a, 0x2e)))
                    .corner_radius(theme::RADIUS_LARGE)
                    .inner_margin(egui::Margin::same(20)),
            )
            .show(ctx, |ui| {
                ui.set_width(320.0);

                // Title bar with close button
                ui.horizontal(|ui| {
                    ui.add(
                        egui::Label::new(egui::RichText::new("Settings").size(16.0).strong())
                            .selectable(false),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if components::icon_button(
                            ui,
                            egui_phosphor::regular::X,
                            theme::TEXT_DIM,
                        ) {
                            self.show_settings = false;
                        }
                    });
                });
                ui.add_space(theme::SPACING_SM);
                ui.separator();
                ui.add_space(theme::SPACING_MD);

                // — Document —
                ui.add(
                    egui::Label::new(
                        egui::RichText::new("Document")
                            .size(theme::FONT_LABEL)
                            .color(theme::ACCENT),
                    )
                    .selectable(false),
                );
                ui.add_space(2.0);
                ui.horizontal(|ui| {
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new("Currency symbol").size(theme::FONT_LABEL),
                        )
                        .selectable(false),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        input_field(ui, &mut self.currency_symbol, "$", 48.0);
                    });
                });
                ui.horizontal(|ui| {
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new("Default measure").size(theme::FONT_LABEL),
                        )
                        .selectable(false),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        components::measure_selector(
                            ui,
                            "settings_measure",
                            &mut self.default_measure,
                            84.0,
                        );
                    });
                });

                ui.add_space(theme::SPACING_MD);
                ui.separator();
                ui.add_space(theme::SPACING_MD);

                // — Export Path —
                ui.add(
                    egui::Label::new(
                        egui::RichText::new("Export Path")
                            .size(theme::FONT_LABEL)
                            .color(theme::ACCENT),
                    )
                    .selectable(false),
                );
                ui.add_space(2.0);
                ui.horizontal(|ui| {
                    ui.spacing_mut().item_spacing.x = 4.0;
                    let text_width = (ui.available_width() - 28.0 - 4.0 - 18.0).max(40.0);
                    let path_resp =
                        input_field(ui, &mut self.export_dir_str, "", text_width);

                    let (rect, resp) =
                        ui.allocate_exact_size(egui::vec2(28.0, 28.0), egui::Sense::click());
                    if resp.hovered() {
                        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                        ui.painter()
                            .rect_filled(rect, theme::RADIUS_DEFAULT, theme::BG_SURFACE);
                    }
                    ui.painter().text(
                        rect.center(),
                        egui::Align2::CENTER_CENTER,
                        egui_phosphor::regular::FOLDER_OPEN,
                        egui::FontId::proportional(16.0),
                        theme::TEXT_SECONDARY,
                    );
                    if resp.clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .set_directory(&self.export_dir)
                            .pick_folder()
                        {
                            self.export_dir = path;
                            self.export_dir_str =
                                self.export_dir.to_string_lossy().to_string();
                        }
                    }
                    if path_resp.lost_focus()
                        && ui.input(|i| i.key_pressed(egui::Key::Enter))
                    {
                        self.export_dir = std::path::PathBuf::from(&self.export_dir_str);
                    }
                });
            });

        if modal_response.should_close() {
            self.show_settings = false;
        }
        if !self.show_settings {
            self.save_settings();
        }
    }

    fn render_toast(&mut self, ctx: &egui::Context) {
        let expired = self
            .toast_start
            .is_some_and(|start| start.elapsed().as_secs_f32() > 3.0);
        if expired {
            self.toast_message = None;
            self.toast_start = None;
        }

        if let Some(message) = self.toast_message.clone() {
            egui::Area::new(egui::Id::new("toast"))
                .anchor(egui::Align2::CENTER_BOTTOM, egui::vec2(0.0, -24.0))
                .show(ctx, |ui| {
                    egui::Frame::new()
                        .fill(theme::BG_SURFACE)
                        .stroke(egui::Stroke::new(1.0, theme::BORDER_DEFAULT))
                        .corner_radius(6.0)
                        .inner_margin(egui::Margin::symmetric(14, 8))
                        .show(ui, |ui| {
                            ui.add(
                                egui::Label::new(
                                    egui::RichText::new(message)
                                        .size(theme::FONT_BODY)
                                        .color(theme::TEXT_PRIMARY),
                                )
                                .selectable(false),
                            );
                        });
                });
            ctx.request_repaint_after(std::time::Duration::from_millis(250));
        }
    }
}

// ============================================================================
// SMALL PAINTED WIDGETS
// ============================================================================

/// Custom-painted button matching the app's flat style. Returns true if
/// clicked while enabled.
fn paint_button(
    ui: &mut egui::Ui,
    size: egui::Vec2,
    fill: egui::Color32,
    text_color: egui::Color32,
    label: &str,
    enabled: bool,
) -> bool {
    let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click());
    let (fill, text_color) = if enabled {
        (fill, text_color)
    } else {
        (theme::BTN_DISABLED, theme::TEXT_DIM)
    };
    if response.hovered() {
        ui.ctx().set_cursor_icon(if enabled {
            egui::CursorIcon::PointingHand
        } else {
            egui::CursorIcon::NotAllowed
        });
    }
    let (fill, draw_rect) = if enabled {
        theme::button_visual(&response, fill, rect)
    } else {
        (fill, rect)
    };
    ui.painter()
        .rect_filled(draw_rect, theme::RADIUS_DEFAULT, fill);
    ui.painter().text(
        draw_rect.center(),
        egui::Align2::CENTER_CENTER,
        label,
        egui::FontId::proportional(theme::FONT_LABEL),
        text_color,
    );
    enabled && response.clicked()
}

/// Bordered single-line text input styled like the rest of the form
fn input_field(
    ui: &mut egui::Ui,
    text: &mut String,
    hint: &str,
    width: f32,
) -> egui::Response {
    egui::Frame::new()
        .fill(theme::BG_INPUT)
        .stroke(egui::Stroke::new(1.0, theme::BORDER_SUBTLE))
        .corner_radius(theme::RADIUS_DEFAULT)
        .inner_margin(egui::Margin::symmetric(8, 6))
        .show(ui, |ui| {
            ui.add(
                egui::TextEdit::singleline(text)
                    .hint_text(hint)
                    .frame(false)
                    .desired_width(width),
            )
        })
        .inner
}
