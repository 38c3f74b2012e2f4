//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`ListingsError`] via `#[from]` (or an explicit `From` impl for
//! adapter-specific failures boxed into [`ListingsError::Storage`]).

/// Top-level error shared by the domain, application, and adapters.
#[derive(Debug, thiserror::Error)]
pub enum ListingsError {
    /// Input rejected before reaching storage.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The requested record does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// The persistence layer failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Reasons a create or update request is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// At least one of `name`, `price`, `location`, `bedrooms`, `bathrooms`
    /// was not supplied.
    #[error("Missing required fields")]
    MissingRequiredFields,

    /// A supplied field holds a value of the wrong JSON type.
    #[error("Invalid value for {field}")]
    InvalidField {
        /// Name of the offending field.
        field: &'static str,
    },
}

/// A lookup by id matched nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} not found")]
pub struct NotFoundError {
    /// Kind of record that was looked up (e.g. `"Property"`).
    pub entity: &'static str,
    /// The id that was requested.
    pub id: String,
}
