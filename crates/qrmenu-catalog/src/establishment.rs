//! Establishment service: directory CRUD, search and activation.

use qrmenu_core::error::{QrMenuError, QrMenuResult};
use qrmenu_core::models::establishment::{
    COLLECTION, CreateEstablishment, Establishment, FIELD_IS_ACTIVE, UpdateEstablishment,
};
use qrmenu_core::repository::{DocumentStore, Repository};
use tracing::{info, warn};

const ENTITY: &str = "Establishment";

/// Establishment directory operations.
#[derive(Debug, Clone)]
pub struct EstablishmentService<S> {
    repository: Repository<S>,
}

impl<S: DocumentStore> EstablishmentService<S> {
    pub fn new(repository: Repository<S>) -> Self {
        Self { repository }
    }

    pub async fn list_all(&self) -> QrMenuResult<Vec<Establishment>> {
        self.repository.get_all(COLLECTION).await
    }

    pub async fn get(&self, id: &str) -> QrMenuResult<Establishment> {
        self.repository
            .get_by_id(COLLECTION, id)
            .await?
            .ok_or_else(|| QrMenuError::not_found(ENTITY, id))
    }

    pub async fn list_active(&self) -> QrMenuResult<Vec<Establishment>> {
        self.repository
            .get_by_field(COLLECTION, FIELD_IS_ACTIVE, true)
            .await
    }

    /// Validate and persist a new, active establishment.
    pub async fn create(&self, input: CreateEstablishment) -> QrMenuResult<Establishment> {
        input.validate()?;

        let mut establishment = Establishment::new(input);
        let id = self.repository.create(COLLECTION, &mut establishment).await?;

        info!(establishment_id = %id, name = %establishment.name, "Establishment created");
        Ok(establishment)
    }

    /// Replace the editable fields of an existing establishment.
    pub async fn update(&self, id: &str, input: UpdateEstablishment) -> QrMenuResult<Establishment> {
        input.validate()?;

        let mut establishment = self.get(id).await?;
        establishment.apply_update(input);
        self.write(id, &mut establishment).await?;

        info!(establishment_id = %id, "Establishment updated");
        Ok(establishment)
    }

    /// Case-insensitive substring match on the name. The query is matched
    /// as given, surrounding spaces included.
    pub async fn search(&self, name: &str) -> QrMenuResult<Vec<Establishment>> {
        if name.trim().is_empty() {
            return Err(QrMenuError::validation("search name must not be blank"));
        }
        let needle = name.to_lowercase();

        let mut matches = self.list_all().await?;
        matches.retain(|e| e.name.to_lowercase().contains(&needle));
        Ok(matches)
    }

    pub async fn activate(&self, id: &str) -> QrMenuResult<Establishment> {
        self.set_active(id, true).await
    }

    pub async fn deactivate(&self, id: &str) -> QrMenuResult<Establishment> {
        self.set_active(id, false).await
    }

    pub async fn delete(&self, id: &str) -> QrMenuResult<()> {
        if !self.repository.delete(COLLECTION, id).await? {
            return Err(QrMenuError::not_found(ENTITY, id));
        }
        info!(establishment_id = %id, "Establishment deleted");
        Ok(())
    }

    async fn set_active(&self, id: &str, active: bool) -> QrMenuResult<Establishment> {
        let mut establishment = self.get(id).await?;
        establishment.is_active = active;
        self.write(id, &mut establishment).await?;

        info!(establishment_id = %id, active, "Establishment activation changed");
        Ok(establishment)
    }

    async fn write(&self, id: &str, establishment: &mut Establishment) -> QrMenuResult<()> {
        // Deleted between the read and the write.
        if !self.repository.update(COLLECTION, id, establishment).await? {
            warn!(establishment_id = %id, "Establishment vanished during update");
            return Err(QrMenuError::not_found(ENTITY, id));
        }
        Ok(())
    }
}
