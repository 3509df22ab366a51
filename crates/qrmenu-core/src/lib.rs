//! QR Menu Core: domain models, the error taxonomy and the generic
//! document repository shared by every other crate.
//!
//! This crate does no I/O of its own. Persistence goes through a
//! [`repository::DocumentStore`] implementation supplied by the caller
//! (see `qrmenu-db`).

pub mod error;
pub mod models;
pub mod repository;
pub mod validation;

pub use error::{QrMenuError, QrMenuResult};
pub use repository::{Document, DocumentStore, Entity, Repository, Timestamped};
