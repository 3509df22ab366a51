//! QR Menu Database: SurrealDB connection management and the document
//! store client behind the generic repository.
//!
//! This crate provides:
//! - Connection management ([`DbManager`], [`DbConfig`])
//! - Schema bootstrap ([`run_migrations`])
//! - The [`DocumentStore`](qrmenu_core::DocumentStore) implementation
//!   ([`SurrealDocumentStore`]) and its native query type ([`SurrealQuery`])
//! - Error types ([`DbError`])

mod connection;
mod error;
mod schema;
mod store;

pub use connection::{DbConfig, DbCredentials, DbManager};
pub use error::DbError;
pub use schema::{run_migrations, schema_v1};
pub use store::{SurrealDocumentStore, SurrealQuery};
