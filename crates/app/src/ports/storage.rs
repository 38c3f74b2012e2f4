//! Storage port — repository trait for persistence.

use std::future::Future;

use listings_domain::error::ListingsError;
use listings_domain::id::PropertyId;
use listings_domain::property::{NewProperty, Property};

/// Row-level CRUD over the single `properties` table.
///
/// Implementations return rows exactly as stored: no image normalisation,
/// and listing order is whatever the store yields.
pub trait PropertyRepository {
    /// Insert a row and return it with the id assigned by the store.
    fn create(
        &self,
        property: NewProperty,
    ) -> impl Future<Output = Result<Property, ListingsError>> + Send;

    /// Fetch one row, `None` when no row has `id`.
    fn get_by_id(
        &self,
        id: PropertyId,
    ) -> impl Future<Output = Result<Option<Property>, ListingsError>> + Send;

    /// Fetch every row in store order.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Property>, ListingsError>> + Send;

    /// Overwrite every column of the row with `property.id`.
    ///
    /// Returns `None` when no row matched.
    fn update(
        &self,
        property: Property,
    ) -> impl Future<Output = Result<Option<Property>, ListingsError>> + Send;

    /// Delete the row with `id`, returning whether a row was removed.
    fn delete(&self, id: PropertyId) -> impl Future<Output = Result<bool, ListingsError>> + Send;
}
