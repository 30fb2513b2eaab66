//! Drawing primitives for one card cell.

use image::DynamicImage;
use printpdf::path::PaintMode;
use printpdf::{Color, Image, ImageTransform, Mm, PdfLayerReference, Rect, Rgb};

use crate::sheet::fonts::CardFont;
use crate::sheet::{grid, text};
use crate::spotify::TrackMetadata;

/// Title line size on the metadata side.
const TITLE_SIZE_PT: f32 = 25.0;
/// Year and artist line size.
const BODY_SIZE_PT: f32 = 20.0;
/// Extra space between lines on top of the font size.
const LINE_GAP_PT: f32 = 2.0;
/// Horizontal inset per side before text may touch the cell edge.
const TEXT_INSET_PT: f32 = 2.0;
/// Title lines kept on a card; two at 25 pt plus year and artist still fit
/// the 40 mm cell height, a third would not.
const TITLE_MAX_LINES: usize = 2;
/// Resolution images are embedded at.
const IMAGE_DPI: f32 = 300.0;

/// Number of consecutive cards that share one background before the cycle
/// moves to the next image.
const BACKGROUND_CYCLE: usize = 10;

fn pt_to_mm(pt: f32) -> f32 {
    pt * 25.4 / 72.0
}

/// Usable line width inside a cell, in points.
pub fn line_capacity_pt() -> f32 {
    grid::mm_to_pt(grid::CARD_SIZE_MM) - 2.0 * TEXT_INSET_PT
}

fn place_image(layer: &PdfLayerReference, img: &DynamicImage, x_mm: f32, y_mm: f32, fit_mm: f32) {
    let embedded = Image::from_dynamic_image(img);
    let width_px = embedded.image.width.0 as f32;
    let height_px = embedded.image.height.0 as f32;
    if width_px <= 0.0 || height_px <= 0.0 {
        return;
    }

    // Natural size at the embedding DPI, then a uniform scale that fits the
    // longer side into the cell, centered on the shorter one.
    let natural_w_mm = width_px / IMAGE_DPI * 25.4;
    let natural_h_mm = height_px / IMAGE_DPI * 25.4;
    let scale = (fit_mm / natural_w_mm).min(fit_mm / natural_h_mm);
    let offset_x = (fit_mm - natural_w_mm * scale) / 2.0;
    let offset_y = (fit_mm - natural_h_mm * scale) / 2.0;

    embedded.add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(Mm(x_mm + offset_x)),
            translate_y: Some(Mm(y_mm + offset_y)),
            scale_x: Some(scale),
            scale_y: Some(scale),
            dpi: Some(IMAGE_DPI),
            ..Default::default()
        },
    );
}

/// Paint the cell background: the cycling image when one is configured,
/// otherwise a flat light fill.
pub fn draw_card_background(
    layer: &PdfLayerReference,
    backgrounds: &[DynamicImage],
    card_index: usize,
    x_mm: f32,
    y_mm: f32,
) {
    if backgrounds.is_empty() {
        layer.set_fill_color(Color::Rgb(Rgb::new(0.95, 0.95, 0.98, None)));
        layer.add_rect(
            Rect::new(
                Mm(x_mm),
                Mm(y_mm),
                Mm(x_mm + grid::CARD_SIZE_MM),
                Mm(y_mm + grid::CARD_SIZE_MM),
            )
            .with_mode(PaintMode::Fill),
        );
        return;
    }

    let background = &backgrounds[(card_index / BACKGROUND_CYCLE) % backgrounds.len()];
    place_image(layer, background, x_mm, y_mm, grid::CARD_SIZE_MM);
}

/// Place a QR image over the full cell.
pub fn draw_qr(layer: &PdfLayerReference, qr: &DynamicImage, x_mm: f32, y_mm: f32) {
    place_image(layer, qr, x_mm, y_mm, grid::CARD_SIZE_MM);
}

/// The text lines of one card back, top to bottom, with their font sizes:
/// wrapped title, release year, first artist.
pub fn card_text_lines(metadata: &TrackMetadata, font: &CardFont) -> Vec<(String, f32)> {
    let capacity = line_capacity_pt();

    let mut lines: Vec<(String, f32)> =
        text::wrap_to_lines(&metadata.name, capacity, TITLE_MAX_LINES, |s| {
            font.measure(s, TITLE_SIZE_PT)
        })
        .into_iter()
        .map(|line| (line, TITLE_SIZE_PT))
        .collect();

    lines.push((metadata.release_year.clone(), BODY_SIZE_PT));

    let artist = metadata
        .artists
        .first()
        .cloned()
        .unwrap_or_else(|| "Unknown Artist".to_string());
    // Max one line: an overlong artist truncates with an ellipsis instead of
    // escaping the cell.
    if let Some(line) =
        text::wrap_to_lines(&artist, capacity, 1, |s| font.measure(s, BODY_SIZE_PT)).pop()
    {
        lines.push((line, BODY_SIZE_PT));
    }

    lines
}

/// Draw the metadata block of one card, each line horizontally centered and
/// the whole block vertically centered in the cell.
pub fn draw_metadata_block(
    layer: &PdfLayerReference,
    font: &CardFont,
    metadata: &TrackMetadata,
    x_mm: f32,
    y_mm: f32,
) {
    let lines = card_text_lines(metadata, font);

    let card_pt = grid::mm_to_pt(grid::CARD_SIZE_MM);
    let x_pt = grid::mm_to_pt(x_mm);
    let y_pt = grid::mm_to_pt(y_mm);

    let total_height: f32 = lines.iter().map(|(_, size)| size + LINE_GAP_PT).sum();

    // The background fill may have left a light fill color behind.
    layer.set_fill_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));

    let mut baseline = y_pt + (card_pt - total_height) / 2.0 + total_height;
    for (line, size) in lines {
        baseline -= size + LINE_GAP_PT;
        let width = font.measure(&line, size);
        let text_x = x_pt + (card_pt - width) / 2.0;
        layer.use_text(
            line,
            size,
            Mm(pt_to_mm(text_x)),
            Mm(pt_to_mm(baseline)),
            font.pdf_font(),
        );
    }
}

#[cfg(test)]
mod tests {
    use printpdf::{BuiltinFont, PdfDocument};

    use super::*;

    fn test_font() -> CardFont {
        let (doc, _, _) = PdfDocument::new("t", Mm(210.0), Mm(297.0), "l");
        let pdf = doc.add_builtin_font(BuiltinFont::HelveticaBold).unwrap();
        CardFont::Builtin { pdf }
    }

    fn metadata(name: &str, artist: &str) -> TrackMetadata {
        TrackMetadata {
            name: name.to_string(),
            artists: vec![artist.to_string()],
            release_year: "1991".to_string(),
            album: "Nevermind".to_string(),
            spotify_url: String::new(),
        }
    }

    #[test]
    fn text_block_has_title_year_and_artist() {
        let font = test_font();
        let lines = card_text_lines(&metadata("Lithium", "Nirvana"), &font);
        assert_eq!(
            lines,
            vec![
                ("Lithium".to_string(), TITLE_SIZE_PT),
                ("1991".to_string(), BODY_SIZE_PT),
                ("Nirvana".to_string(), BODY_SIZE_PT),
            ]
        );
    }

    #[test]
    fn every_line_fits_the_cell() {
        let font = test_font();
        let capacity = line_capacity_pt();
        let lines = card_text_lines(
            &metadata(
                "The Man Who Sold the World Live at MTV Unplugged in New York",
                "An Improbably Long Artist Name That Cannot Possibly Fit One Line",
            ),
            &font,
        );
        for (line, size) in &lines {
            assert!(font.measure(line, *size) <= capacity, "{line:?} too wide");
        }
        // Two title lines max, plus year and artist.
        assert!(lines.len() <= TITLE_MAX_LINES + 2);
    }

    #[test]
    fn long_title_and_artist_get_ellipsized() {
        let font = test_font();
        let lines = card_text_lines(
            &metadata(
                "A Very Long Title Indeed With Far Too Many Words To Keep",
                "Orchestra of the Age of Enlightenment and Friends",
            ),
            &font,
        );
        let title_last = &lines[TITLE_MAX_LINES - 1].0;
        assert!(title_last.ends_with(text::ELLIPSIS));
        let artist = &lines.last().unwrap().0;
        assert!(artist.ends_with(text::ELLIPSIS));
    }

    #[test]
    fn block_height_fits_the_cell() {
        let font = test_font();
        let lines = card_text_lines(&metadata("A Long Wrapping Title Goes Here", "Someone"), &font);
        let total: f32 = lines.iter().map(|(_, size)| size + LINE_GAP_PT).sum();
        assert!(total <= grid::mm_to_pt(grid::CARD_SIZE_MM));
    }
}
