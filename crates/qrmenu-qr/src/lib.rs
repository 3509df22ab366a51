//! QR Menu QR: redirect URL construction, QR encoding and the QR
//! service facade.
//!
//! This crate provides:
//! - Redirect URL construction ([`build_redirect_url`])
//! - PNG encoding at error-correction level Q ([`encode`], [`to_data_url`])
//! - The service facade over the establishment repository ([`QrService`])
//! - Configuration ([`QrConfig`]) and error types ([`QrError`])

pub mod config;
pub mod encoder;
pub mod error;
pub mod redirect;
pub mod service;

pub use config::QrConfig;
pub use encoder::{encode, to_data_url};
pub use error::QrError;
pub use redirect::build_redirect_url;
pub use service::{BulkQrEntry, BulkQrResult, ContactCard, QrImage, QrInfo, QrService, Resolution};
