//! # listings-domain
//!
//! Pure domain model for the property listings service.
//!
//! ## Responsibilities
//! - Foundational types: the typed [`PropertyId`](id::PropertyId), error conventions
//! - Define the **Property** listing and its create/update inputs
//! - Define the **image fallback** rules applied on read, create, and update
//! - Enforce required-field presence and partial-update merge semantics
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod image;
pub mod property;
