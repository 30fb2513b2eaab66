// sheet/mod.rs - paginated card sheet rendering
pub mod draw;
pub mod fonts;
pub mod grid;
pub mod text;

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use image::DynamicImage;
use printpdf::{Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};
use thiserror::Error;

use crate::cards::{CardAsset, load_metadata, scan_card_assets};
use fonts::register_card_font;

#[derive(Error, Debug)]
pub enum SheetError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("PDF error: {0}")]
    Pdf(String),
    #[error("Font error: {0}")]
    Font(String),
}

/// Inputs of the render stage.
pub struct RenderOptions {
    pub cards_dir: PathBuf,
    pub out_dir: PathBuf,
    pub background_dir: PathBuf,
    pub font: Option<PathBuf>,
}

/// Render both sheet documents from the card assets on disk.
///
/// The front document carries the QR codes, the back document the metadata on
/// a mirrored grid, so printing them double-sided lines each code up with its
/// own text.
pub fn render_sheets(opts: &RenderOptions) -> Result<(), SheetError> {
    let assets = scan_card_assets(&opts.cards_dir);
    if assets.is_empty() {
        println!(
            "No card assets found in {}, the sheets will be empty",
            opts.cards_dir.display()
        );
    }

    let backgrounds = load_backgrounds(&opts.background_dir);
    fs::create_dir_all(&opts.out_dir)?;

    let front_path = opts.out_dir.join("qr_codes_front.pdf");
    render_front(&assets, &backgrounds, &front_path)?;

    let back_path = opts.out_dir.join("metadata_back.pdf");
    render_back(&assets, &backgrounds, opts.font.as_deref(), &back_path)?;

    println!("PDFs generated successfully!");
    println!(" - QR codes: {}", front_path.display());
    println!(" - Metadata: {}", back_path.display());
    if !backgrounds.is_empty() {
        println!(" - Background cycling across {} images", backgrounds.len());
    }
    Ok(())
}

/// Load the background images, sorted by file name. Anything that fails to
/// load is reported and dropped; an empty result means flat fills.
fn load_backgrounds(dir: &Path) -> Vec<DynamicImage> {
    if !dir.is_dir() {
        println!(
            "Background folder {} not found, using default backgrounds",
            dir.display()
        );
        return Vec::new();
    }

    let mut paths: Vec<PathBuf> = match fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| {
                p.extension()
                    .and_then(|e| e.to_str())
                    .map(|e| e.eq_ignore_ascii_case("png"))
                    .unwrap_or(false)
            })
            .collect(),
        Err(e) => {
            println!("Cannot read background folder {}: {e}", dir.display());
            return Vec::new();
        }
    };
    paths.sort();

    let mut images = Vec::new();
    for path in paths {
        match image::open(&path) {
            Ok(img) => images.push(img),
            Err(e) => println!("Skipping background {}: {e}", path.display()),
        }
    }

    if !images.is_empty() {
        println!("Found {} background images", images.len());
    }
    images
}

/// Start a document and hand back the layer of its first page.
fn new_document(title: &str) -> (PdfDocumentReference, PdfLayerReference) {
    let (doc, page, layer) = PdfDocument::new(
        title,
        Mm(grid::PAGE_WIDTH_MM),
        Mm(grid::PAGE_HEIGHT_MM),
        "cards",
    );
    let layer = doc.get_page(page).get_layer(layer);
    (doc, layer)
}

fn next_page_layer(doc: &PdfDocumentReference) -> PdfLayerReference {
    let (page, layer) = doc.add_page(Mm(grid::PAGE_WIDTH_MM), Mm(grid::PAGE_HEIGHT_MM), "cards");
    doc.get_page(page).get_layer(layer)
}

fn save_document(doc: PdfDocumentReference, path: &Path) -> Result<(), SheetError> {
    let file = File::create(path)?;
    doc.save(&mut BufWriter::new(file))
        .map_err(|e| SheetError::Pdf(e.to_string()))
}

fn render_front(
    assets: &[CardAsset],
    backgrounds: &[DynamicImage],
    path: &Path,
) -> Result<(), SheetError> {
    let (doc, mut layer) = new_document("QR Codes");
    let cells = grid::front_cells();

    for (index, asset) in assets.iter().enumerate() {
        let slot = index % grid::cards_per_page();
        if index > 0 && slot == 0 {
            layer = next_page_layer(&doc);
        }
        let (x, y) = cells[slot];

        draw::draw_card_background(&layer, backgrounds, index, x, y);
        match image::open(&asset.qr_path) {
            Ok(qr) => draw::draw_qr(&layer, &qr, x, y),
            Err(e) => println!("Skipping QR image for {}: {e}", asset.stem),
        }
    }

    save_document(doc, path)
}

fn render_back(
    assets: &[CardAsset],
    backgrounds: &[DynamicImage],
    font_path: Option<&Path>,
    path: &Path,
) -> Result<(), SheetError> {
    let (doc, mut layer) = new_document("Card Metadata");
    let font = register_card_font(&doc, font_path)?;
    let cells = grid::back_cells();

    for (index, asset) in assets.iter().enumerate() {
        let slot = index % grid::cards_per_page();
        if index > 0 && slot == 0 {
            layer = next_page_layer(&doc);
        }
        let (x, y) = cells[slot];

        draw::draw_card_background(&layer, backgrounds, index, x, y);
        match load_metadata(&asset.metadata_path) {
            Ok(metadata) => draw::draw_metadata_block(&layer, &font, &metadata, x, y),
            Err(e) => println!("Skipping metadata for {}: {e}", asset.stem),
        }
    }

    save_document(doc, path)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::cards::qr::generate_qr;
    use crate::cards::store::write_card_assets;
    use crate::spotify::TrackMetadata;

    #[test]
    fn renders_both_documents_over_multiple_pages() {
        let tmp = TempDir::new().unwrap();
        let cards_dir = tmp.path().join("qr_codes");
        let out_dir = tmp.path().join("pdf");

        let qr = generate_qr("https://open.spotify.com/track/x", 100).unwrap();
        // More than one page worth of cards.
        for i in 0..30 {
            let metadata = TrackMetadata {
                name: format!("Track Number {i} With a Longer Title"),
                artists: vec!["Some Artist".to_string()],
                release_year: "1991".to_string(),
                album: "Album".to_string(),
                spotify_url: "https://open.spotify.com/track/x".to_string(),
            };
            write_card_assets(&cards_dir, &format!("track-{i:02}"), &qr, &metadata).unwrap();
        }

        let opts = RenderOptions {
            cards_dir,
            out_dir: out_dir.clone(),
            background_dir: tmp.path().join("background"),
            font: None,
        };
        render_sheets(&opts).unwrap();

        let front = std::fs::metadata(out_dir.join("qr_codes_front.pdf")).unwrap();
        let back = std::fs::metadata(out_dir.join("metadata_back.pdf")).unwrap();
        assert!(front.len() > 0);
        assert!(back.len() > 0);
    }

    #[test]
    fn missing_background_dir_degrades_to_flat_fill() {
        let tmp = TempDir::new().unwrap();
        let images = load_backgrounds(&tmp.path().join("nope"));
        assert!(images.is_empty());
    }
}
