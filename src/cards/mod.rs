// cards/mod.rs - per-track asset generation (QR image + metadata file)
pub mod qr;
pub mod store;

use std::path::Path;

use thiserror::Error;

use crate::spotify::TrackMetadata;

pub use store::{CardAsset, load_metadata, sanitize_title, scan_card_assets};

/// Pixel width the QR raster is scaled up to before saving; enough for a
/// crisp 40 mm print.
const QR_TARGET_PX: u32 = 400;

#[derive(Error, Debug)]
pub enum CardError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("QR error: {0}")]
    Qr(String),
    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Write a QR image and metadata file for every track.
///
/// Tracks without a canonical URL can't get a scannable code and are skipped
/// with a diagnostic. Returns the number of tracks written.
pub fn generate_card_assets(
    tracks: &[TrackMetadata],
    cards_dir: &Path,
) -> Result<usize, CardError> {
    let mut written = 0;

    for track in tracks {
        if track.spotify_url.is_empty() {
            println!("skipping \"{}\": track has no canonical URL", track.name);
            continue;
        }

        let stem = sanitize_title(&track.name);
        if stem.is_empty() {
            println!("skipping \"{}\": title sanitizes to nothing", track.name);
            continue;
        }

        let qr = qr::generate_qr(&track.spotify_url, QR_TARGET_PX).map_err(CardError::Qr)?;
        store::write_card_assets(cards_dir, &stem, &qr, track)?;

        tracing::debug!(stem = %stem, url = %track.spotify_url, "wrote card assets");
        println!("Created QR code and metadata for: {}", track.name);
        written += 1;
    }

    Ok(written)
}
