//! QR code encoding to PNG.
//!
//! Codes use error-correction level Q and the smallest version that fits
//! the content, with the standard 4-module quiet zone. Output is an 8-bit
//! grayscale PNG, black modules on white. Encoding is deterministic.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::Luma;
use image::codecs::png::PngEncoder;
use qrcode::types::QrError as CodeError;
use qrcode::{EcLevel, QrCode};

use crate::error::QrError;

/// Pixels per module when the caller does not choose.
pub const DEFAULT_MODULE_SIZE: u32 = 20;

const DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Encodes `content` as a QR code and returns the PNG bytes.
pub fn encode(content: &str, module_size: u32) -> Result<Vec<u8>, QrError> {
    if module_size == 0 {
        return Err(QrError::InvalidModuleSize(module_size));
    }

    let code =
        QrCode::with_error_correction_level(content.as_bytes(), EcLevel::Q).map_err(|e| {
            match e {
                CodeError::DataTooLong => QrError::TooLarge,
                other => QrError::Encoding(other.to_string()),
            }
        })?;

    let image = code
        .render::<Luma<u8>>()
        .quiet_zone(true)
        .module_dimensions(module_size, module_size)
        .build();

    let mut png = Vec::new();
    image.write_with_encoder(PngEncoder::new(&mut png))?;
    Ok(png)
}

/// Wraps PNG bytes in a `data:image/png;base64,` URL.
pub fn to_data_url(png: &[u8]) -> String {
    format!("{DATA_URL_PREFIX}{}", STANDARD.encode(png))
}
