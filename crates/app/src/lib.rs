//! # listings-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define the **port trait** that storage adapters must implement:
//!   - `PropertyRepository` — row CRUD over the `properties` table
//! - Define the **driving/inbound** use-case struct:
//!   - `PropertyService` — list, get, create, update, delete
//! - Apply image fallback rules and partial-update merging without knowing
//!   *how* persistence works
//!
//! ## Dependency rule
//! Depends on `listings-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
