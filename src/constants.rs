//! Application constants and PDF layout configuration

pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = "QuoteForge";

// PDF layout - A4 portrait, all distances in millimeters
pub const PAGE_WIDTH_MM: f64 = 210.0;
pub const PAGE_HEIGHT_MM: f64 = 297.0;
pub const PAGE_MARGIN_MM: f64 = 15.0;

pub const LOGO_WIDTH_MM: f64 = 60.0;
pub const LOGO_HEIGHT_MM: f64 = 30.0;

/// Column widths: item, quantity, unit price, total.
/// Sums to the printable width (210 - 2 * 15).
pub const TABLE_COLUMNS_MM: [f64; 4] = [80.0, 35.0, 35.0, 30.0];
pub const TABLE_ROW_MM: f64 = 8.0;
pub const TABLE_CELL_PAD_MM: f64 = 2.0;

/// Table header fill (navy, matching the classic quote header)
pub const TABLE_HEADER_FILL: (u8, u8, u8) = (0, 51, 102);
