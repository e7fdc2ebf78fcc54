//! Utility functions

use crate::types::UnitOfMeasure;
use std::path::PathBuf;

// Square viewBox — used for the header mark and the window/taskbar icon
pub const MARK_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 64 64"><rect x="2" y="2" width="60" height="60" rx="14" fill="#818cf8"/><path d="M20 13h17l10 10v25a3 3 0 0 1-3 3H20a3 3 0 0 1-3-3V16a3 3 0 0 1 3-3z" fill="#fff"/><path d="M37 13v10h10z" fill="#c7d2fe"/><rect x="22" y="30" width="20" height="3" rx="1.5" fill="#6366f1"/><rect x="22" y="37" width="20" height="3" rx="1.5" fill="#6366f1"/><rect x="22" y="44" width="12" height="3" rx="1.5" fill="#6366f1"/></svg>"##;

/// Rasterize the app mark to a square image (header logo, window icon).
pub fn rasterize_mark(size: u32) -> (Vec<u8>, u32, u32) {
    let tree = resvg::usvg::Tree::from_str(MARK_SVG, &resvg::usvg::Options::default()).unwrap();
    let scale = size as f32 / tree.size().width();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size, size).unwrap();
    resvg::render(
        &tree,
        resvg::usvg::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    (premul_to_straight(&pixmap), size, size)
}

fn premul_to_straight(pixmap: &resvg::tiny_skia::Pixmap) -> Vec<u8> {
    pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let a = p.alpha();
            if a == 0 {
                [0, 0, 0, 0]
            } else {
                let r = (p.red() as u16 * 255 / a as u16) as u8;
                let g = (p.green() as u16 * 255 / a as u16) as u8;
                let b = (p.blue() as u16 * 255 / a as u16) as u8;
                [r, g, b, a]
            }
        })
        .collect()
}

/// Get the app data directory (settings, logs)
pub fn get_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("QuoteForge")
}

/// Format a currency amount with fixed two decimals, e.g. "$ 1249.50"
pub fn format_currency(symbol: &str, value: f64) -> String {
    format!("{} {:.2}", symbol, value)
}

/// Format a numeric quantity with its unit, e.g. "3 m²" or "2.5 kg".
/// Whole counts drop the fraction.
pub fn format_quantity(count: f64, measure: UnitOfMeasure) -> String {
    if count.fract() == 0.0 && count.abs() < 1e15 {
        format!("{} {}", count as i64, measure.label())
    } else {
        format!("{} {}", count, measure.label())
    }
}

/// Turn a document title into a safe default file name ("Kitchen Quote" ->
/// "kitchen-quote"). Falls back to "quote" when nothing usable remains.
pub fn file_slug(title: &str) -> String {
    let slug: String = title
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect();
    let slug = slug.trim_matches('-').to_string();
    let mut out = String::with_capacity(slug.len());
    for c in slug.chars() {
        if c == '-' && out.ends_with('-') {
            continue;
        }
        out.push(c);
    }
    if out.is_empty() {
        "quote".to_string()
    } else {
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_uses_two_decimals() {
        assert_eq!(format_currency("$", 1249.5), "$ 1249.50");
        assert_eq!(format_currency("R$", 0.0), "R$ 0.00");
        assert_eq!(format_currency("€", 10.456), "€ 10.46");
    }

    #[test]
    fn quantity_drops_trailing_fraction_for_whole_counts() {
        assert_eq!(format_quantity(3.0, UnitOfMeasure::SquareMeter), "3 m²");
        assert_eq!(format_quantity(2.5, UnitOfMeasure::Kilogram), "2.5 kg");
        assert_eq!(format_quantity(1.0, UnitOfMeasure::Unit), "1 unit");
    }

    #[test]
    fn file_slug_handles_odd_titles() {
        assert_eq!(file_slug("Kitchen Quote"), "kitchen-quote");
        assert_eq!(file_slug("  Quote #42 / final  "), "quote-42-final");
        assert_eq!(file_slug("???"), "quote");
        assert_eq!(file_slug(""), "quote");
    }
}
