//! Redirect URL construction.

/// Builds the URL a QR code encodes for an establishment: the base URL,
/// a slash, then the id. The base URL is used as given.
pub fn build_redirect_url(establishment_id: &str, base_url: &str) -> String {
    format!("{base_url}/{establishment_id}")
}
