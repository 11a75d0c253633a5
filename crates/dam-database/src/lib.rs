//! # dam-database
//!
//! Read-only PostgreSQL sessions and a read-only [`PgSourceCatalog`]
//! over the legacy media library tables.

pub mod catalog;
pub mod connection;

pub use catalog::PgSourceCatalog;
pub use connection::SourceConnection;
