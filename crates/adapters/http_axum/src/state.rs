//! Shared application state for axum handlers.

use std::sync::Arc;

use listings_app::ports::PropertyRepository;
use listings_app::services::property_service::PropertyService;

/// Application state shared across all axum handlers.
///
/// Generic over the repository type to avoid dynamic dispatch.
/// `Clone` is implemented manually so the repository itself does not
/// need to be `Clone` — only the `Arc` wrapper is cloned.
pub struct AppState<PR> {
    /// Property CRUD service.
    pub property_service: Arc<PropertyService<PR>>,
}

impl<PR> Clone for AppState<PR> {
    fn clone(&self) -> Self {
        Self {
            property_service: Arc::clone(&self.property_service),
        }
    }
}

impl<PR> AppState<PR>
where
    PR: PropertyRepository + Send + Sync + 'static,
{
    /// Create a new application state from a service instance.
    pub fn new(property_service: PropertyService<PR>) -> Self {
        Self {
            property_service: Arc::new(property_service),
        }
    }
}
