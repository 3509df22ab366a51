//! QR encoding error types and conversions.

use qrmenu_core::error::QrMenuError;

#[derive(Debug, thiserror::Error)]
pub enum QrError {
    #[error("content does not fit in any QR version at level Q")]
    TooLarge,

    #[error("module size must be at least 1 pixel, got {0}")]
    InvalidModuleSize(u32),

    #[error("QR encoding failed: {0}")]
    Encoding(String),

    #[error("PNG encoding failed: {0}")]
    Png(#[from] image::ImageError),
}

impl From<QrError> for QrMenuError {
    fn from(err: QrError) -> Self {
        match err {
            QrError::TooLarge => QrMenuError::EncodingTooLarge,
            other => QrMenuError::EncodingFailed(other.to_string()),
        }
    }
}
