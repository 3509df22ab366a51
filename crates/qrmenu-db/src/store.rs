//! SurrealDB implementation of [`DocumentStore`].
//!
//! A collection maps to a table and a document id to the record key.
//! The `id` field is kept out of the stored body (SurrealDB owns it as
//! the record id) and restored from `record::id(id)` on every read.

use qrmenu_core::error::QrMenuResult;
use qrmenu_core::repository::{Document, DocumentStore, ID_FIELD};
use serde_json::Value;
use surrealdb::{Connection, Surreal};
use tracing::debug;

use crate::error::DbError;

/// Projection used by every read: the body plus the bare record key.
const SELECT_FIELDS: &str = "*, record::id(id) AS record_id OMIT id";

const RECORD_ID_FIELD: &str = "record_id";

/// A SurrealQL `WHERE` condition with its parameter bindings, run
/// against a single table.
///
/// ```ignore
/// let query = SurrealQuery::new("type = $type AND isActive = true")
///     .bind("type", "Cafe");
/// ```
#[derive(Debug, Clone)]
pub struct SurrealQuery {
    condition: String,
    bindings: Vec<(String, Value)>,
}

impl SurrealQuery {
    pub fn new(condition: impl Into<String>) -> Self {
        Self {
            condition: condition.into(),
            bindings: Vec::new(),
        }
    }

    pub fn bind(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.bindings.push((name.into(), value.into()));
        self
    }
}

/// Document store backed by a SurrealDB connection.
#[derive(Clone)]
pub struct SurrealDocumentStore<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealDocumentStore<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    async fn select_where(
        &self,
        collection: &str,
        condition: Option<&str>,
        bindings: Vec<(String, Value)>,
    ) -> Result<Vec<Document>, DbError> {
        check_identifier("collection", collection)?;

        let mut statement = format!("SELECT {SELECT_FIELDS} FROM `{collection}`");
        if let Some(condition) = condition {
            statement.push_str(" WHERE ");
            statement.push_str(condition);
        }

        let mut builder = self.db.query(statement);
        for binding in bindings {
            builder = builder.bind(binding);
        }

        let mut result = builder.await?;
        let rows: Vec<Value> = result.take(0)?;
        rows.into_iter().map(into_document).collect()
    }
}

impl<C: Connection> DocumentStore for SurrealDocumentStore<C> {
    type Query = SurrealQuery;

    async fn get(&self, collection: &str, id: &str) -> QrMenuResult<Option<Document>> {
        check_identifier("collection", collection)?;

        let mut result = self
            .db
            .query(format!(
                "SELECT {SELECT_FIELDS} FROM type::record($collection, $id)"
            ))
            .bind(("collection", collection.to_string()))
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<Value> = result.take(0).map_err(DbError::from)?;
        match rows.into_iter().next() {
            Some(row) => Ok(Some(into_document(row)?)),
            None => Ok(None),
        }
    }

    async fn set(&self, collection: &str, id: &str, document: Document) -> QrMenuResult<()> {
        check_identifier("collection", collection)?;

        self.db
            .query("CREATE type::record($collection, $id) CONTENT $document RETURN NONE")
            .bind(("collection", collection.to_string()))
            .bind(("id", id.to_string()))
            .bind(("document", without_id(document)))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(DbError::from)?;

        debug!(collection, id, "Document written");
        Ok(())
    }

    async fn merge(&self, collection: &str, id: &str, document: Document) -> QrMenuResult<()> {
        check_identifier("collection", collection)?;

        self.db
            .query("UPDATE type::record($collection, $id) MERGE $document RETURN NONE")
            .bind(("collection", collection.to_string()))
            .bind(("id", id.to_string()))
            .bind(("document", without_id(document)))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(DbError::from)?;

        debug!(collection, id, "Document merged");
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> QrMenuResult<()> {
        check_identifier("collection", collection)?;

        self.db
            .query("DELETE type::record($collection, $id) RETURN NONE")
            .bind(("collection", collection.to_string()))
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(DbError::from)?;

        debug!(collection, id, "Document deleted");
        Ok(())
    }

    async fn list(&self, collection: &str) -> QrMenuResult<Vec<Document>> {
        Ok(self.select_where(collection, None, Vec::new()).await?)
    }

    async fn find_eq(
        &self,
        collection: &str,
        field: &str,
        value: Value,
    ) -> QrMenuResult<Vec<Document>> {
        check_identifier("field", field)?;

        let condition = format!("`{field}` = $value");
        Ok(self
            .select_where(collection, Some(&condition), vec![("value".into(), value)])
            .await?)
    }

    async fn query(&self, collection: &str, query: SurrealQuery) -> QrMenuResult<Vec<Document>> {
        Ok(self
            .select_where(collection, Some(&query.condition), query.bindings)
            .await?)
    }
}

/// Table and field names are interpolated into statements, so only
/// plain identifiers are accepted.
fn check_identifier(kind: &'static str, name: &str) -> Result<(), DbError> {
    let valid = name
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !valid {
        return Err(DbError::InvalidIdentifier {
            kind,
            name: name.to_string(),
        });
    }
    Ok(())
}

fn without_id(mut document: Document) -> Value {
    document.remove(ID_FIELD);
    Value::Object(document)
}

fn into_document(row: Value) -> Result<Document, DbError> {
    match row {
        Value::Object(mut document) => {
            if let Some(id) = document.remove(RECORD_ID_FIELD) {
                document.insert(ID_FIELD.into(), id);
            }
            Ok(document)
        }
        other => Err(DbError::Conversion(format!("expected an object, got {other}"))),
    }
}
