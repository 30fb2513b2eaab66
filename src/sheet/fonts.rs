//! Card face fonts.
//!
//! The metadata side is meant to be printed in a custom display face shipped
//! next to the binary. The font file is optional: when no candidate loads,
//! rendering degrades to the built-in Helvetica-Bold with an approximate
//! width metric instead of failing. Whatever metric is in effect is used both
//! for wrapping and for centering, so a degraded metric stays consistent
//! with itself.

use std::fs;
use std::path::{Path, PathBuf};

use printpdf::{BuiltinFont, IndirectFontRef, PdfDocumentReference};
use rusttype::{Font, Scale, point};

use crate::sheet::SheetError;
use crate::sheet::text;

/// Font files probed in order when no explicit path is given.
const FONT_CANDIDATES: &[&str] = &[
    "font.ttf",
    "fonts/BauhausBoldBT.ttf",
    "fonts/BauhausBoldBT.otf",
    "fonts/bauhaus_bold_bt.ttf",
    "fonts/bauhaus_bold_bt.otf",
    "BauhausBoldBT.ttf",
    "BauhausBoldBT.otf",
];

/// Average glyph width as a fraction of the font size, for the built-in face
/// where no glyph metrics are available.
const FALLBACK_CHAR_WIDTH: f32 = 0.6;

/// A font registered on one PDF document, plus the metric used to measure
/// line widths in points.
pub enum CardFont {
    Custom {
        pdf: IndirectFontRef,
        metrics: Box<Font<'static>>,
    },
    Builtin {
        pdf: IndirectFontRef,
    },
}

impl CardFont {
    /// Width of `text` rendered at `size` points.
    pub fn measure(&self, text: &str, size: f32) -> f32 {
        match self {
            CardFont::Custom { metrics, .. } => metrics
                .layout(text, Scale::uniform(size), point(0.0, 0.0))
                .map(|g| g.unpositioned().h_metrics().advance_width)
                .sum(),
            CardFont::Builtin { .. } => text::grapheme_len(text) * size * FALLBACK_CHAR_WIDTH,
        }
    }

    pub fn pdf_font(&self) -> &IndirectFontRef {
        match self {
            CardFont::Custom { pdf, .. } => pdf,
            CardFont::Builtin { pdf } => pdf,
        }
    }
}

/// Register the card font on `doc`.
///
/// An explicit path is tried first, then the candidate list; a candidate that
/// exists but fails to parse logs a diagnostic and falls through to the next
/// one. When nothing loads the built-in fallback is registered instead.
pub fn register_card_font(
    doc: &PdfDocumentReference,
    explicit: Option<&Path>,
) -> Result<CardFont, SheetError> {
    let mut candidates: Vec<PathBuf> = Vec::new();
    if let Some(path) = explicit {
        candidates.push(path.to_path_buf());
    }
    candidates.extend(FONT_CANDIDATES.iter().map(PathBuf::from));

    for path in &candidates {
        if !path.is_file() {
            continue;
        }
        match try_load_font(doc, path) {
            Ok(font) => {
                println!("Registered custom font: {}", path.display());
                return Ok(font);
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "failed to register font candidate"
                );
            }
        }
    }

    println!("No custom font found, falling back to built-in Helvetica-Bold");
    let pdf = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| SheetError::Pdf(e.to_string()))?;
    Ok(CardFont::Builtin { pdf })
}

fn try_load_font(doc: &PdfDocumentReference, path: &Path) -> Result<CardFont, SheetError> {
    let bytes = fs::read(path)?;
    let metrics = Font::try_from_vec(bytes.clone())
        .ok_or_else(|| SheetError::Font(format!("unsupported font data in {}", path.display())))?;
    let pdf = doc
        .add_external_font(bytes.as_slice())
        .map_err(|e| SheetError::Pdf(e.to_string()))?;
    Ok(CardFont::Custom {
        pdf,
        metrics: Box::new(metrics),
    })
}

#[cfg(test)]
mod tests {
    use printpdf::{Mm, PdfDocument};

    use super::*;

    #[test]
    fn fallback_measure_scales_with_size_and_length() {
        let (doc, _, _) = PdfDocument::new("t", Mm(210.0), Mm(297.0), "l");
        let pdf = doc.add_builtin_font(BuiltinFont::HelveticaBold).unwrap();
        let font = CardFont::Builtin { pdf };

        assert_eq!(font.measure("", 20.0), 0.0);
        let narrow = font.measure("abc", 20.0);
        let wide = font.measure("abcdef", 20.0);
        assert!((wide - 2.0 * narrow).abs() < 1e-4);
        assert!(font.measure("abc", 25.0) > narrow);
    }

    #[test]
    fn unknown_candidates_degrade_to_builtin() {
        let (doc, _, _) = PdfDocument::new("t", Mm(210.0), Mm(297.0), "l");
        let font = register_card_font(&doc, Some(Path::new("/definitely/not/here.ttf"))).unwrap();
        assert!(matches!(font, CardFont::Builtin { .. }));
    }
}
