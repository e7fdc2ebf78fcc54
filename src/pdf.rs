//! Quote document rendering
//!
//! Maps the in-memory item list to a paginated A4 PDF: optional centered
//! logo, document title, issue date, a grid table of items and a grand
//! total line. Row totals are recomputed here from quantity and unit
//! value, never read from stored state.

use crate::constants::*;
use crate::types::{grand_total, LineItem, Quantity};
use crate::utils::{format_currency, format_quantity};
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Color, Image, ImageTransform, IndirectFontRef, Line, Mm, PdfDocument,
    PdfLayerReference, Point, Polygon, Rgb,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("quote has no items")]
    NoItems,
    #[error("failed to decode logo image: {0}")]
    Logo(#[from] printpdf::image_crate::ImageError),
    #[error("failed to assemble PDF: {0}")]
    Pdf(#[from] printpdf::Error),
}

pub type Result<T> = std::result::Result<T, PdfError>;

/// Everything needed to render one quote document
pub struct QuoteDocument<'a> {
    pub title: &'a str,
    pub date_line: &'a str,
    pub currency_symbol: &'a str,
    pub logo: Option<&'a [u8]>,
    pub items: &'a [LineItem],
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

// Vertical layout from the top edge, in millimeters. With a logo the
// title and table shift down to clear it.
const LOGO_TOP_MM: f64 = 10.0;
const TITLE_TOP_MM: f64 = 30.0;
const TITLE_TOP_WITH_LOGO_MM: f64 = 50.0;
const TABLE_TOP_MM: f64 = 40.0;
const TABLE_TOP_WITH_LOGO_MM: f64 = 60.0;

const NAME_MAX_CHARS: usize = 42;
const CELL_MAX_CHARS: usize = 18;

/// Render the quote to PDF bytes.
pub fn render(doc: &QuoteDocument) -> Result<Vec<u8>> {
    if doc.items.is_empty() {
        return Err(PdfError::NoItems);
    }

    let (pdf, page, layer) = PdfDocument::new(
        doc.title,
        Mm(PAGE_WIDTH_MM as f32),
        Mm(PAGE_HEIGHT_MM as f32),
        "Layer 1",
    );
    let fonts = Fonts {
        regular: pdf.add_builtin_font(BuiltinFont::Helvetica)?,
        bold: pdf.add_builtin_font(BuiltinFont::HelveticaBold)?,
    };
    let mut layer = pdf.get_page(page).get_layer(layer);

    if let Some(bytes) = doc.logo {
        place_logo(&layer, bytes)?;
    }

    let title_top = if doc.logo.is_some() {
        TITLE_TOP_WITH_LOGO_MM
    } else {
        TITLE_TOP_MM
    };
    set_fill(&layer, 0.0, 0.0, 0.0);
    layer.use_text(
        doc.title,
        18.0,
        Mm(PAGE_MARGIN_MM as f32),
        Mm((PAGE_HEIGHT_MM - title_top) as f32),
        &fonts.bold,
    );
    set_fill(&layer, 0.45, 0.45, 0.45);
    layer.use_text(
        doc.date_line,
        10.0,
        Mm(PAGE_MARGIN_MM as f32),
        Mm((PAGE_HEIGHT_MM - title_top - 5.5) as f32),
        &fonts.regular,
    );

    // Table body, breaking onto new pages as rows run out of space
    let mut y_top = if doc.logo.is_some() {
        TABLE_TOP_WITH_LOGO_MM
    } else {
        TABLE_TOP_MM
    };
    draw_header_row(&layer, &fonts, y_top);
    y_top += TABLE_ROW_MM;

    for item in doc.items {
        if y_top + TABLE_ROW_MM > PAGE_HEIGHT_MM - PAGE_MARGIN_MM {
            let (p, l) = pdf.add_page(Mm(PAGE_WIDTH_MM as f32), Mm(PAGE_HEIGHT_MM as f32), "Layer 1");
            layer = pdf.get_page(p).get_layer(l);
            y_top = PAGE_MARGIN_MM;
            draw_header_row(&layer, &fonts, y_top);
            y_top += TABLE_ROW_MM;
        }
        draw_item_row(&layer, &fonts, y_top, item, doc.currency_symbol);
        y_top += TABLE_ROW_MM;
    }

    // Grand total line under the table
    if y_top + 14.0 > PAGE_HEIGHT_MM - PAGE_MARGIN_MM {
        let (p, l) = pdf.add_page(Mm(PAGE_WIDTH_MM as f32), Mm(PAGE_HEIGHT_MM as f32), "Layer 1");
        layer = pdf.get_page(p).get_layer(l);
        y_top = PAGE_MARGIN_MM;
    }
    set_fill(&layer, 0.0, 0.0, 0.0);
    layer.use_text(
        format!(
            "Total: {}",
            format_currency(doc.currency_symbol, grand_total(doc.items))
        ),
        12.0,
        Mm(PAGE_MARGIN_MM as f32),
        Mm((PAGE_HEIGHT_MM - y_top - 8.0) as f32),
        &fonts.bold,
    );

    Ok(pdf.save_to_bytes()?)
}

/// Decode the logo and center it at the top of the first page.
fn place_logo(layer: &PdfLayerReference, bytes: &[u8]) -> Result<()> {
    // Embedded images go through printpdf's own image crate; alpha is
    // flattened since PDF image XObjects here carry no transparency.
    let decoded = printpdf::image_crate::load_from_memory(bytes)?;
    let rgb = printpdf::image_crate::DynamicImage::ImageRgb8(decoded.to_rgb8());
    let image = Image::from_dynamic_image(&rgb);

    const DPI: f64 = 300.0;
    let natural_w_mm = image.image.width.0 as f64 * 25.4 / DPI;
    let natural_h_mm = image.image.height.0 as f64 * 25.4 / DPI;
    let x = (PAGE_WIDTH_MM - LOGO_WIDTH_MM) / 2.0;
    let y = PAGE_HEIGHT_MM - LOGO_TOP_MM - LOGO_HEIGHT_MM;

    image.add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(Mm(x as f32)),
            translate_y: Some(Mm(y as f32)),
            scale_x: Some((LOGO_WIDTH_MM / natural_w_mm) as f32),
            scale_y: Some((LOGO_HEIGHT_MM / natural_h_mm) as f32),
            dpi: Some(DPI as f32),
            ..Default::default()
        },
    );
    Ok(())
}

fn draw_header_row(layer: &PdfLayerReference, fonts: &Fonts, y_top: f64) {
    let (r, g, b) = TABLE_HEADER_FILL;
    set_fill(
        layer,
        r as f64 / 255.0,
        g as f64 / 255.0,
        b as f64 / 255.0,
    );
    fill_rect(
        layer,
        PAGE_MARGIN_MM,
        PAGE_HEIGHT_MM - y_top - TABLE_ROW_MM,
        TABLE_COLUMNS_MM.iter().sum(),
        TABLE_ROW_MM,
    );
    stroke_row_grid(layer, y_top);

    set_fill(layer, 1.0, 1.0, 1.0);
    let labels = ["Item", "Quantity", "Unit Price", "Total"];
    for (i, label) in labels.iter().enumerate() {
        layer.use_text(
            *label,
            11.0,
            Mm((column_x(i) + TABLE_CELL_PAD_MM) as f32),
            Mm(cell_baseline(y_top) as f32),
            &fonts.bold,
        );
    }
}

fn draw_item_row(
    layer: &PdfLayerReference,
    fonts: &Fonts,
    y_top: f64,
    item: &LineItem,
    currency_symbol: &str,
) {
    stroke_row_grid(layer, y_top);

    let (quantity, unit_price) = match item.quantity {
        Quantity::Flat => ("N/A".to_string(), "-".to_string()),
        Quantity::Of(n) => (
            format_quantity(n, item.measure),
            format_currency(currency_symbol, item.unit_value),
        ),
    };
    let cells = [
        truncate_cell(&item.name, NAME_MAX_CHARS),
        truncate_cell(&quantity, CELL_MAX_CHARS),
        truncate_cell(&unit_price, CELL_MAX_CHARS),
        format_currency(currency_symbol, item.total()),
    ];

    set_fill(layer, 0.0, 0.0, 0.0);
    for (i, cell) in cells.iter().enumerate() {
        layer.use_text(
            cell,
            10.0,
            Mm((column_x(i) + TABLE_CELL_PAD_MM) as f32),
            Mm(cell_baseline(y_top) as f32),
            &fonts.regular,
        );
    }
}

/// Stroke the cell borders for one table row.
fn stroke_row_grid(layer: &PdfLayerReference, y_top: f64) {
    layer.set_outline_color(Color::Rgb(Rgb::new(0.6, 0.6, 0.6, None)));
    layer.set_outline_thickness(0.5);
    let y_hi = PAGE_HEIGHT_MM - y_top;
    let y_lo = y_hi - TABLE_ROW_MM;
    for i in 0..TABLE_COLUMNS_MM.len() {
        let x0 = column_x(i);
        let x1 = x0 + TABLE_COLUMNS_MM[i];
        layer.add_line(Line {
            points: vec![
                (Point::new(Mm(x0 as f32), Mm(y_lo as f32)), false),
                (Point::new(Mm(x1 as f32), Mm(y_lo as f32)), false),
                (Point::new(Mm(x1 as f32), Mm(y_hi as f32)), false),
                (Point::new(Mm(x0 as f32), Mm(y_hi as f32)), false),
            ],
            is_closed: true,
        });
    }
}

/// Left edge of column `i`
fn column_x(i: usize) -> f64 {
    PAGE_MARGIN_MM + TABLE_COLUMNS_MM[..i].iter().sum::<f64>()
}

/// Text baseline for a row starting at `y_top` from the top edge
fn cell_baseline(y_top: f64) -> f64 {
    PAGE_HEIGHT_MM - y_top - 5.5
}

fn set_fill(layer: &PdfLayerReference, r: f64, g: f64, b: f64) {
    layer.set_fill_color(Color::Rgb(Rgb::new(r as f32, g as f32, b as f32, None)));
}

fn fill_rect(layer: &PdfLayerReference, x: f64, y: f64, w: f64, h: f64) {
    layer.add_polygon(Polygon {
        rings: vec![vec![
            (Point::new(Mm(x as f32), Mm(y as f32)), false),
            (Point::new(Mm((x + w) as f32), Mm(y as f32)), false),
            (Point::new(Mm((x + w) as f32), Mm((y + h) as f32)), false),
            (Point::new(Mm(x as f32), Mm((y + h) as f32)), false),
        ]],
        mode: PaintMode::Fill,
        winding_order: WindingOrder::NonZero,
    });
}

/// Char-count truncation with an ellipsis. Builtin fonts carry no metrics,
/// so column fit is approximated by character count.
fn truncate_cell(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max_chars.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UnitOfMeasure;

    fn sample_items() -> Vec<LineItem> {
        vec![
            LineItem {
                name: "Floor tiling".to_string(),
                quantity: Quantity::Of(24.0),
                measure: UnitOfMeasure::SquareMeter,
                unit_value: 35.0,
            },
            LineItem {
                name: "Site cleanup".to_string(),
                quantity: Quantity::Flat,
                measure: UnitOfMeasure::Unit,
                unit_value: 150.0,
            },
        ]
    }

    fn sample_doc<'a>(items: &'a [LineItem], logo: Option<&'a [u8]>) -> QuoteDocument<'a> {
        QuoteDocument {
            title: "Quote",
            date_line: "2025-06-01",
            currency_symbol: "$",
            logo,
            items,
        }
    }

    #[test]
    fn render_rejects_empty_quote() {
        let doc = sample_doc(&[], None);
        assert!(matches!(render(&doc), Err(PdfError::NoItems)));
    }

    #[test]
    fn render_produces_a_pdf() {
        let items = sample_items();
        let bytes = render(&sample_doc(&items, None)).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn render_embeds_logo() {
        let items = sample_items();
        let mut png = Vec::new();
        let pixels = image::RgbaImage::from_pixel(16, 8, image::Rgba([250, 80, 60, 255]));
        image::DynamicImage::ImageRgba8(pixels)
            .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();

        let plain = render(&sample_doc(&items, None)).unwrap();
        let with_logo = render(&sample_doc(&items, Some(&png))).unwrap();
        assert!(with_logo.starts_with(b"%PDF"));
        assert!(with_logo.len() > plain.len());
    }

    #[test]
    fn render_rejects_garbage_logo() {
        let items = sample_items();
        let result = render(&sample_doc(&items, Some(b"not an image")));
        assert!(matches!(result, Err(PdfError::Logo(_))));
    }

    #[test]
    fn long_tables_paginate() {
        let items: Vec<LineItem> = (0..80)
            .map(|i| LineItem {
                name: format!("Item {}", i),
                quantity: Quantity::Of(1.0 + i as f64),
                measure: UnitOfMeasure::Unit,
                unit_value: 10.0,
            })
            .collect();
        let bytes = render(&sample_doc(&items, None)).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        // 80 rows at 8mm cannot fit one A4 page; the overflow pages make
        // the document noticeably larger than the two-row version
        let short = render(&sample_doc(&sample_items(), None)).unwrap();
        assert!(bytes.len() > short.len());
    }
}
