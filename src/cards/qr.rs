//! QR code rasterization for card fronts.

use image::{DynamicImage, GrayImage, Luma};
use qrcode::{EcLevel, QrCode};

/// Quiet zone around the code, in modules (matches the upstream generator).
const BORDER_MODULES: u32 = 4;

/// Encode `data` as a square grayscale QR image at error-correction level L.
///
/// Modules are blitted at a whole-pixel scale chosen so the code (with its
/// quiet border) is at least `target_width` pixels wide.
pub fn generate_qr(data: &str, target_width: u32) -> Result<DynamicImage, String> {
    let code = QrCode::with_error_correction_level(data.as_bytes(), EcLevel::L)
        .map_err(|e| format!("QR encode error: {e}"))?;
    let modules = code.to_colors();
    let module_count = code.width() as u32;
    let total_modules = module_count + 2 * BORDER_MODULES;

    let scale = target_width.div_ceil(total_modules).max(1);
    let img_size = total_modules * scale;

    let mut img = GrayImage::from_pixel(img_size, img_size, Luma([255u8]));

    for (i, color) in modules.iter().enumerate() {
        let x = (i as u32) % module_count + BORDER_MODULES;
        let y = (i as u32) / module_count + BORDER_MODULES;

        if *color == qrcode::Color::Dark {
            for dx in 0..scale {
                for dy in 0..scale {
                    img.put_pixel(x * scale + dx, y * scale + dy, Luma([0u8]));
                }
            }
        }
    }

    Ok(DynamicImage::ImageLuma8(img))
}

#[cfg(test)]
mod tests {
    use image::GenericImageView;

    use super::*;

    #[test]
    fn generate_qr_produces_square_image() {
        let img = generate_qr("https://open.spotify.com/track/4uLU6hMCjMI75M1A2tKUQC", 400)
            .unwrap();
        assert!(img.width() >= 400);
        assert_eq!(img.width(), img.height());
    }

    #[test]
    fn short_data_still_renders() {
        let img = generate_qr("x", 100).unwrap();
        assert!(img.width() > 0);
    }

    #[test]
    fn border_stays_white() {
        let img = generate_qr("https://example.com", 200).unwrap().into_luma8();
        let side = img.width();
        for i in 0..side {
            assert_eq!(img.get_pixel(i, 0).0[0], 255);
            assert_eq!(img.get_pixel(0, i).0[0], 255);
            assert_eq!(img.get_pixel(i, side - 1).0[0], 255);
            assert_eq!(img.get_pixel(side - 1, i).0[0], 255);
        }
    }
}
