//! PDF export flow

use super::App;
use crate::pdf::{self, QuoteDocument};
use crate::utils::file_slug;
use tracing::{error, info};

impl App {
    /// Ask for a destination and write the rendered quote there.
    pub(crate) fn export_pdf(&mut self) {
        if self.items.is_empty() {
            return;
        }

        let default_name = format!("{}.pdf", file_slug(&self.doc_title));
        let Some(path) = rfd::FileDialog::new()
            .set_directory(&self.export_dir)
            .set_file_name(&default_name)
            .add_filter("PDF", &["pdf"])
            .save_file()
        else {
            return;
        };

        let date_line = chrono::Local::now().format("%Y-%m-%d").to_string();
        let document = QuoteDocument {
            title: self.doc_title.trim(),
            date_line: &date_line,
            currency_symbol: &self.currency_symbol,
            logo: self.logo_bytes.as_deref(),
            items: &self.items,
        };

        let bytes = match pdf::render(&document) {
            Ok(bytes) => bytes,
            Err(e) => {
                error!(error = %e, "PDF rendering failed");
                self.show_toast(format!("Export failed: {}", e));
                return;
            }
        };

        if let Err(e) = std::fs::write(&path, &bytes) {
            error!(error = %e, path = %path.display(), "Failed to write PDF");
            self.show_toast("Could not write the PDF file");
            return;
        }

        info!(path = %path.display(), items = self.items.len(), size = bytes.len(), "Quote exported");

        // Remember the directory for the next export
        if let Some(parent) = path.parent() {
            self.export_dir = parent.to_path_buf();
            self.export_dir_str = self.export_dir.to_string_lossy().to_string();
            self.save_settings();
        }

        self.last_export = Some(path);
        self.show_toast("Quote exported");
    }

    /// Open the most recently exported file with the system viewer.
    pub(crate) fn open_last_export(&mut self) {
        if let Some(path) = &self.last_export {
            if let Err(e) = open::that(path) {
                error!(error = %e, path = %path.display(), "Failed to open exported PDF");
                self.show_toast("Could not open the exported file");
            }
        }
    }
}
