//! # listings-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the `PropertyRepository` port defined in `listings-app::ports::storage`
//! - Manage `SQLite` connection pool lifecycle
//! - Make sure the `properties` table exists on startup
//! - Map between domain types and database rows
//!
//! ## Dependency rule
//! Depends on `listings-app` (for port traits) and `listings-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

pub mod error;
pub mod pool;
pub mod property_repo;

pub use pool::{Config, Database};
pub use property_repo::SqlitePropertyRepository;
