//! Shared application state.

use qrmenu_catalog::{EstablishmentService, MenuService};
use qrmenu_core::Repository;
use qrmenu_db::{DbError, DbManager, SurrealDocumentStore};
use qrmenu_qr::{QrConfig, QrService};
use surrealdb::engine::any::Any;

use crate::config::ServerConfig;

pub type Store = SurrealDocumentStore<Any>;

/// Services shared by every handler. Cloning is cheap: all of them
/// hold the same store handle.
#[derive(Clone)]
pub struct AppState {
    pub establishments: EstablishmentService<Store>,
    pub menus: MenuService<Store>,
    pub qr: QrService<Store>,
}

impl AppState {
    pub fn new(store: Store, qr_config: QrConfig) -> Self {
        let repository = Repository::new(store);
        Self {
            establishments: EstablishmentService::new(repository.clone()),
            menus: MenuService::new(repository.clone()),
            qr: QrService::new(repository, qr_config),
        }
    }

    /// Connect to the configured store and bring its schema up to date.
    pub async fn connect(config: &ServerConfig) -> Result<Self, DbError> {
        let manager = DbManager::connect(&config.db).await?;
        qrmenu_db::run_migrations(manager.client()).await?;
        Ok(Self::new(manager.document_store(), config.qr.clone()))
    }
}
