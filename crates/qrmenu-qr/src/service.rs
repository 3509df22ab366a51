//! QR service facade.
//!
//! Looks establishments up through the generic repository, builds their
//! redirect URLs from the configured base URL and renders the codes.

use qrmenu_core::error::{QrMenuError, QrMenuResult};
use qrmenu_core::models::establishment::{self, Establishment, EstablishmentType, QrCodeCache};
use qrmenu_core::repository::{DocumentStore, Repository};
use serde::Serialize;
use tracing::{error, info, warn};
use utoipa::ToSchema;

use crate::config::QrConfig;
use crate::encoder::{encode, to_data_url};
use crate::redirect::build_redirect_url;

const ENTITY: &str = "Establishment";

const NO_WEBSITE_MESSAGE: &str = "This establishment has no website configured";

/// A rendered code ready to be served as a download.
#[derive(Debug, Clone)]
pub struct QrImage {
    pub filename: String,
    pub png: Vec<u8>,
}

/// QR metadata for one establishment.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QrInfo {
    pub establishment_id: String,
    pub establishment_name: String,
    pub redirect_url: String,
    pub data_url: String,
}

/// Outcome for one id of a bulk generation.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkQrEntry {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BulkQrEntry {
    fn failed(id: &str, message: &str) -> Self {
        Self {
            id: id.to_string(),
            name: None,
            success: false,
            redirect_url: None,
            data_url: None,
            error: Some(message.to_string()),
        }
    }
}

/// Summary of a bulk generation.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkQrResult {
    pub total_requested: usize,
    pub successful: usize,
    pub results: Vec<BulkQrEntry>,
}

impl BulkQrResult {
    fn from_entries(total_requested: usize, results: Vec<BulkQrEntry>) -> Self {
        Self {
            total_requested,
            successful: results.iter().filter(|entry| entry.success).count(),
            results,
        }
    }
}

/// Contact details shown when a scanned establishment has no website.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactCard {
    pub name: String,
    pub address: String,
    pub city: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    #[serde(rename = "type")]
    pub establishment_type: EstablishmentType,
    pub message: String,
}

impl From<&Establishment> for ContactCard {
    fn from(establishment: &Establishment) -> Self {
        Self {
            name: establishment.name.clone(),
            address: establishment.address.clone(),
            city: establishment.city.clone(),
            phone: establishment.phone.clone(),
            email: establishment.email.clone(),
            establishment_type: establishment.establishment_type,
            message: NO_WEBSITE_MESSAGE.to_string(),
        }
    }
}

/// Where a scanned code leads.
#[derive(Debug, Clone)]
pub enum Resolution {
    Redirect(String),
    ContactCard(ContactCard),
}

/// QR generation and redirect resolution for establishments.
#[derive(Debug, Clone)]
pub struct QrService<S> {
    repository: Repository<S>,
    config: QrConfig,
}

impl<S: DocumentStore> QrService<S> {
    pub fn new(repository: Repository<S>, config: QrConfig) -> Self {
        Self { repository, config }
    }

    pub fn config(&self) -> &QrConfig {
        &self.config
    }

    /// Render the code for `id` as a PNG download named `qr-{id}.png`.
    pub async fn generate_png(&self, id: &str, size: Option<u32>) -> QrMenuResult<QrImage> {
        let size = self.module_size(size)?;
        let establishment = self.load(id).await?;
        let png = self.render(&establishment, size)?;

        info!(
            establishment_id = %id,
            name = %establishment.name,
            size,
            "Generated QR code"
        );
        Ok(QrImage {
            filename: format!("qr-{id}.png"),
            png,
        })
    }

    /// Render the code for `id` as a `data:` URL.
    pub async fn generate_data_url(&self, id: &str, size: Option<u32>) -> QrMenuResult<String> {
        let size = self.module_size(size)?;
        let establishment = self.load(id).await?;
        Ok(to_data_url(&self.render(&establishment, size)?))
    }

    pub async fn info(&self, id: &str, size: Option<u32>) -> QrMenuResult<QrInfo> {
        let size = self.module_size(size)?;
        let establishment = self.load(id).await?;
        let png = self.render(&establishment, size)?;

        Ok(QrInfo {
            redirect_url: self.redirect_url(&establishment.id),
            data_url: to_data_url(&png),
            establishment_name: establishment.name,
            establishment_id: establishment.id,
        })
    }

    /// Generate the code for `id` at the default size and cache its data
    /// URL on the establishment.
    ///
    /// Only the cached code and `updatedAt` are written back. Failures are
    /// reported inside the summary rather than as errors.
    pub async fn generate_and_store(&self, id: &str) -> BulkQrResult {
        let entry = match self.generate_entry(id, self.config.default_module_size).await {
            Ok(entry) => {
                let mut cache = QrCodeCache::new(id, entry.data_url.clone());
                match self
                    .repository
                    .update(establishment::COLLECTION, id, &mut cache)
                    .await
                {
                    Ok(true) => entry,
                    Ok(false) => BulkQrEntry::failed(id, "Establishment not found"),
                    Err(e) => {
                        error!(establishment_id = %id, error = %e, "Failed to store QR code");
                        BulkQrEntry::failed(id, "Failed to store QR code")
                    }
                }
            }
            Err(entry) => entry,
        };

        BulkQrResult::from_entries(1, vec![entry])
    }

    /// Generate codes for every id in order. A failing id is recorded in
    /// its entry and never stops the rest of the batch.
    pub async fn generate_bulk(&self, ids: &[String], size: Option<u32>) -> QrMenuResult<BulkQrResult> {
        let size = self.module_size(size)?;

        let mut results = Vec::with_capacity(ids.len());
        for id in ids {
            let entry = match self.generate_entry(id, size).await {
                Ok(entry) | Err(entry) => entry,
            };
            results.push(entry);
        }

        let summary = BulkQrResult::from_entries(ids.len(), results);
        info!(
            requested = summary.total_requested,
            successful = summary.successful,
            "Bulk QR generation finished"
        );
        Ok(summary)
    }

    /// Decide where a scan of `id` leads.
    ///
    /// Inactive establishments are refused. An establishment with a
    /// website redirects there; anything else gets its contact card.
    pub async fn resolve(&self, id: &str) -> QrMenuResult<Resolution> {
        let establishment = self.load(id).await?;

        if !establishment.is_active {
            warn!(establishment_id = %id, "Scan of inactive establishment");
            return Err(QrMenuError::Inactive {
                entity: ENTITY.into(),
                id: id.into(),
            });
        }

        match establishment.website_url() {
            Some(url) => {
                info!(establishment_id = %id, target = %url, "Redirecting scan");
                Ok(Resolution::Redirect(url.to_string()))
            }
            None => Ok(Resolution::ContactCard(ContactCard::from(&establishment))),
        }
    }

    pub fn redirect_url(&self, id: &str) -> String {
        build_redirect_url(id, &self.config.base_url)
    }

    fn module_size(&self, requested: Option<u32>) -> QrMenuResult<u32> {
        let size = requested.unwrap_or(self.config.default_module_size);
        if size == 0 || size > self.config.max_module_size {
            return Err(QrMenuError::validation(format!(
                "size must be between 1 and {}",
                self.config.max_module_size
            )));
        }
        Ok(size)
    }

    async fn load(&self, id: &str) -> QrMenuResult<Establishment> {
        self.repository
            .get_by_id(establishment::COLLECTION, id)
            .await?
            .ok_or_else(|| QrMenuError::not_found(ENTITY, id))
    }

    fn render(&self, establishment: &Establishment, size: u32) -> QrMenuResult<Vec<u8>> {
        let url = self.redirect_url(&establishment.id);
        encode(&url, size).map_err(|e| {
            error!(establishment_id = %establishment.id, error = %e, "QR encoding failed");
            QrMenuError::from(e)
        })
    }

    async fn generate_entry(
        &self,
        id: &str,
        size: u32,
    ) -> Result<BulkQrEntry, BulkQrEntry> {
        let establishment = match self.load(id).await {
            Ok(establishment) => establishment,
            Err(QrMenuError::NotFound { .. }) => {
                return Err(BulkQrEntry::failed(id, "Establishment not found"));
            }
            Err(e) => {
                error!(establishment_id = %id, error = %e, "Failed to load establishment");
                return Err(BulkQrEntry::failed(id, "Failed to load establishment"));
            }
        };

        let png = match self.render(&establishment, size) {
            Ok(png) => png,
            Err(_) => return Err(BulkQrEntry::failed(id, "Failed to generate QR code")),
        };

        Ok(BulkQrEntry {
            id: id.to_string(),
            name: Some(establishment.name),
            success: true,
            redirect_url: Some(self.redirect_url(id)),
            data_url: Some(to_data_url(&png)),
            error: None,
        })
    }
}
