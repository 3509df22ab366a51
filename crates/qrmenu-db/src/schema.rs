//! Schema definitions and versioned bootstrap for SurrealDB.
//!
//! Collections are SCHEMALESS: documents are owned by the repository
//! layer and validated before they reach the store. Each schema version
//! only declares tables and the indexes behind the filtered reads, and
//! names the collections it introduces so the version table records
//! which collections a database has been prepared for.

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::{debug, info};

use qrmenu_core::models::{establishment, menu};

use crate::error::DbError;

// -----------------------------------------------------------------------
// Version tracking
// -----------------------------------------------------------------------

const VERSION_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _schema_version SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _schema_version TYPE int;
DEFINE FIELD IF NOT EXISTS collections ON TABLE _schema_version TYPE array<string>;
";

#[derive(Debug, SurrealValue)]
struct AppliedVersion {
    version: u32,
}

/// One step of the schema and the collections it brings in.
struct SchemaVersion {
    version: u32,
    collections: &'static [&'static str],
    ddl: &'static str,
}

static SCHEMA_VERSIONS: &[SchemaVersion] = &[SchemaVersion {
    version: 1,
    collections: &[establishment::COLLECTION, menu::COLLECTION],
    ddl: SCHEMA_V1,
}];

// -----------------------------------------------------------------------
// Schema v1: collections and lookup indexes
// -----------------------------------------------------------------------

const SCHEMA_V1: &str = "\
-- =======================================================================
-- Establishments
-- =======================================================================
DEFINE TABLE establishments SCHEMALESS;
DEFINE INDEX idx_establishments_active ON TABLE establishments \
    COLUMNS isActive;

-- =======================================================================
-- Menus (one establishment owns many menus)
-- =======================================================================
DEFINE TABLE menus SCHEMALESS;
DEFINE INDEX idx_menus_establishment ON TABLE menus \
    COLUMNS establishmentId;
";

// -----------------------------------------------------------------------
// Public API
// -----------------------------------------------------------------------

/// Bring the database up to the latest schema version and return it.
///
/// A version is recorded as `_schema_version:<n>` together with the
/// collections it defines, so a second run finds nothing to apply.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<u32, DbError> {
    db.query(VERSION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(e.to_string()))?;

    let current = current_version(db).await?;
    let mut reached = current;

    for step in SCHEMA_VERSIONS.iter().filter(|s| s.version > current) {
        info!(
            version = step.version,
            collections = ?step.collections,
            "Preparing collections"
        );
        db.query(step.ddl).await?.check().map_err(|e| {
            DbError::Migration(format!("schema v{} failed: {e}", step.version))
        })?;

        db.query(
            "CREATE type::record('_schema_version', $version) \
             SET version = $version, collections = $collections",
        )
        .bind(("version", step.version))
        .bind((
            "collections",
            step.collections
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>(),
        ))
        .await?
        .check()
        .map_err(|e| {
            DbError::Migration(format!("could not record schema v{}: {e}", step.version))
        })?;

        reached = step.version;
    }

    if reached == current {
        debug!(version = current, "Schema already up to date");
    } else {
        info!(from = current, to = reached, "Schema upgraded");
    }
    Ok(reached)
}

/// Returns the raw schema DDL for version 1.
///
/// Exposed for testing with in-memory SurrealDB instances that
/// bypass the version runner.
pub fn schema_v1() -> &'static str {
    SCHEMA_V1
}

async fn current_version<C: Connection>(db: &Surreal<C>) -> Result<u32, DbError> {
    let mut result = db
        .query("SELECT version FROM _schema_version ORDER BY version DESC LIMIT 1")
        .await?;
    let applied: Vec<AppliedVersion> = result.take(0)?;
    Ok(applied.first().map_or(0, |v| v.version))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_v1_declares_every_collection() {
        for collection in [establishment::COLLECTION, menu::COLLECTION] {
            assert!(SCHEMA_V1.contains(&format!("DEFINE TABLE {collection} SCHEMALESS")));
        }
    }

    #[test]
    fn listed_collections_match_their_ddl() {
        for step in SCHEMA_VERSIONS {
            assert!(!step.collections.is_empty());
            for collection in step.collections {
                assert!(
                    step.ddl.contains(&format!("DEFINE TABLE {collection} ")),
                    "v{} lists {collection} without defining it",
                    step.version
                );
            }
        }
    }

    #[test]
    fn versions_are_ascending() {
        for window in SCHEMA_VERSIONS.windows(2) {
            assert!(window[0].version < window[1].version);
        }
    }
}
