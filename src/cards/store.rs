//! On-disk layout of per-track card assets.
//!
//! Each track owns a `<stem>.png` (the QR image) and a `<stem>.json`
//! (its [`TrackMetadata`]) in the assets directory, where the stem is the
//! sanitized track title. The render stage only ever sees complete pairs.

use std::fs;
use std::path::{Path, PathBuf};

use image::DynamicImage;
use walkdir::WalkDir;

use crate::cards::CardError;
use crate::spotify::TrackMetadata;

/// One complete PNG + JSON pair found in the assets directory.
#[derive(Debug, Clone, PartialEq)]
pub struct CardAsset {
    pub stem: String,
    pub qr_path: PathBuf,
    pub metadata_path: PathBuf,
}

/// Reduce a track title to a filesystem-safe stem: alphanumerics, spaces,
/// hyphens and underscores survive, everything else is dropped.
pub fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect()
}

/// Write the QR image and metadata file for one track. Existing files with
/// the same stem are overwritten (last track of a colliding title wins).
pub fn write_card_assets(
    dir: &Path,
    stem: &str,
    qr: &DynamicImage,
    metadata: &TrackMetadata,
) -> Result<(), CardError> {
    fs::create_dir_all(dir)?;

    let png_path = dir.join(format!("{stem}.png"));
    qr.save(&png_path)?;

    let json_path = dir.join(format!("{stem}.json"));
    let json = serde_json::to_string_pretty(metadata)?;
    fs::write(&json_path, json)?;

    Ok(())
}

/// List the complete asset pairs in `dir`, sorted by stem.
///
/// Orphan files (a PNG without its JSON, or the reverse) are reported and
/// skipped; a missing or empty directory simply yields no assets.
pub fn scan_card_assets(dir: &Path) -> Vec<CardAsset> {
    let mut assets = Vec::new();

    let walker = WalkDir::new(dir).min_depth(1).max_depth(1);
    for entry in walker.into_iter().filter_map(|e| match e {
        Ok(e) => Some(e),
        Err(err) => {
            println!("error while scanning {}, skipping an entry: {err:?}", dir.display());
            None
        }
    }) {
        let path = entry.path();
        match path.extension().and_then(|e| e.to_str()) {
            Some("png") => {
                let json_path = path.with_extension("json");
                if !json_path.is_file() {
                    println!(
                        "skipping {}: no matching metadata file",
                        path.display()
                    );
                    continue;
                }
                let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                    continue;
                };
                assets.push(CardAsset {
                    stem: stem.to_string(),
                    qr_path: path.to_path_buf(),
                    metadata_path: json_path,
                });
            }
            Some("json") => {
                if !path.with_extension("png").is_file() {
                    println!("skipping {}: no matching QR image", path.display());
                }
            }
            _ => {}
        }
    }

    assets.sort_by(|a, b| a.stem.cmp(&b.stem));
    assets
}

/// Load one metadata file. Absent fields fall back to their serde defaults.
pub fn load_metadata(path: &Path) -> Result<TrackMetadata, CardError> {
    let contents = fs::read_to_string(path)?;
    let metadata = serde_json::from_str(&contents)?;
    Ok(metadata)
}
