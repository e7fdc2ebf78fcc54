//! Draft form parsing and item list edits

use super::App;
use crate::types::{LineItem, Quantity, UnitOfMeasure};
use tracing::debug;

/// Raw form fields exactly as typed by the user
pub struct ItemDraft {
    pub name: String,
    pub quantity: String,
    pub measure: UnitOfMeasure,
    pub value: String,
}

impl ItemDraft {
    pub fn new(measure: UnitOfMeasure) -> Self {
        Self {
            name: String::new(),
            quantity: String::new(),
            measure,
            value: String::new(),
        }
    }

    /// Validate the draft and parse it into a line item.
    ///
    /// Name and value are required; quantity must be either the "-"
    /// sentinel (value becomes the flat total) or a positive number.
    /// Malformed numbers are rejected here so NaN never reaches a total.
    pub fn parse(&self) -> Result<LineItem, String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("Item name is required".to_string());
        }

        let value = self.value.trim();
        if value.is_empty() {
            return Err("Unit value is required".to_string());
        }
        let unit_value: f64 = value
            .parse()
            .map_err(|_| "Unit value must be a number".to_string())?;
        if !unit_value.is_finite() || unit_value < 0.0 {
            return Err("Unit value must be zero or more".to_string());
        }

        let quantity = match self.quantity.trim() {
            "" => return Err("Quantity is required (\"-\" for a flat total)".to_string()),
            "-" => Quantity::Flat,
            raw => {
                let count: f64 = raw
                    .parse()
                    .map_err(|_| "Quantity must be a number or \"-\"".to_string())?;
                if !count.is_finite() || count <= 0.0 {
                    return Err("Quantity must be greater than zero".to_string());
                }
                Quantity::Of(count)
            }
        };

        Ok(LineItem {
            name: name.to_string(),
            quantity,
            measure: self.measure,
            unit_value,
        })
    }
}

impl App {
    /// Try to add the current draft as a new item. On success the draft
    /// resets to an empty form with the default measure.
    pub(crate) fn add_item(&mut self) {
        match self.draft.parse() {
            Ok(item) => {
                debug!(name = %item.name, "Item added");
                self.items.push(item);
                self.draft = ItemDraft::new(self.default_measure);
                self.form_error = None;
            }
            Err(message) => self.form_error = Some(message),
        }
    }

    pub(crate) fn remove_item(&mut self, index: usize) {
        if index < self.items.len() {
            let removed = self.items.remove(index);
            debug!(name = %removed.name, index, "Item removed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str, quantity: &str, value: &str) -> ItemDraft {
        ItemDraft {
            name: name.to_string(),
            quantity: quantity.to_string(),
            measure: UnitOfMeasure::SquareMeter,
            value: value.to_string(),
        }
    }

    fn test_app() -> App {
        App {
            items: Vec::new(),
            draft: ItemDraft::new(UnitOfMeasure::SquareMeter),
            form_error: None,
            doc_title: "Quote".to_string(),
            logo_bytes: None,
            logo_texture: None,
            logo_name: None,
            mark_texture: None,
            currency_symbol: "$".to_string(),
            default_measure: UnitOfMeasure::SquareMeter,
            export_dir: std::path::PathBuf::from("."),
            export_dir_str: ".".to_string(),
            show_settings: false,
            last_export: None,
            toast_message: None,
            toast_start: None,
            window_pos: None,
            window_size: None,
            needs_center: false,
            data_dir: std::path::PathBuf::from("."),
        }
    }

    #[test]
    fn parse_builds_item_from_valid_draft() {
        let item = draft("Tiling", "12.5", "30").parse().unwrap();
        assert_eq!(item.name, "Tiling");
        assert_eq!(item.quantity, Quantity::Of(12.5));
        assert_eq!(item.unit_value, 30.0);
        assert_eq!(item.total(), 375.0);
    }

    #[test]
    fn parse_accepts_flat_sentinel() {
        let item = draft("Cleanup", "-", "200").parse().unwrap();
        assert_eq!(item.quantity, Quantity::Flat);
        assert_eq!(item.total(), 200.0);
    }

    #[test]
    fn parse_rejects_empty_name_and_value() {
        assert!(draft("", "2", "10").parse().is_err());
        assert!(draft("   ", "2", "10").parse().is_err());
        assert!(draft("Tiling", "2", "").parse().is_err());
    }

    #[test]
    fn parse_rejects_malformed_numbers() {
        assert!(draft("Tiling", "two", "10").parse().is_err());
        assert!(draft("Tiling", "2", "ten").parse().is_err());
        assert!(draft("Tiling", "", "10").parse().is_err());
        assert!(draft("Tiling", "0", "10").parse().is_err());
        assert!(draft("Tiling", "-3", "10").parse().is_err());
        assert!(draft("Tiling", "2", "-5").parse().is_err());
        assert!(draft("Tiling", "NaN", "10").parse().is_err());
    }

    #[test]
    fn add_item_rejection_keeps_draft_and_sets_error() {
        let mut app = test_app();
        app.draft = draft("", "2", "10");
        app.add_item();
        assert!(app.items.is_empty());
        assert!(app.form_error.is_some());
        assert_eq!(app.draft.quantity, "2");
    }

    #[test]
    fn add_item_resets_draft_on_success() {
        let mut app = test_app();
        app.draft = draft("Tiling", "2", "10");
        app.add_item();
        assert_eq!(app.items.len(), 1);
        assert!(app.form_error.is_none());
        assert!(app.draft.name.is_empty());
    }

    #[test]
    fn remove_item_deletes_exactly_one_row_in_order() {
        let mut app = test_app();
        for name in ["first", "second", "third"] {
            app.draft = draft(name, "1", "10");
            app.add_item();
        }
        app.remove_item(1);
        let names: Vec<&str> = app.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["first", "third"]);

        // Out-of-range index is a no-op
        app.remove_item(9);
        assert_eq!(app.items.len(), 2);
    }
}
