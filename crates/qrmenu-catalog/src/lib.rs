//! QR Menu Catalog: establishment and menu management.
//!
//! Both facades are generic over the [`DocumentStore`] so that this
//! crate has no dependency on the database crate.
//!
//! [`DocumentStore`]: qrmenu_core::DocumentStore

pub mod establishment;
pub mod menu;

pub use establishment::EstablishmentService;
pub use menu::MenuService;
