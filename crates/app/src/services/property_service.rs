//! Property service — use-cases for managing listings.

use listings_domain::error::{ListingsError, NotFoundError};
use listings_domain::id::PropertyId;
use listings_domain::image::ImageFallback;
use listings_domain::property::{Property, PropertyDraft};

use crate::ports::PropertyRepository;

/// Application service for property CRUD operations.
pub struct PropertyService<R> {
    repo: R,
    images: ImageFallback,
}

impl<R: PropertyRepository> PropertyService<R> {
    /// Create a new service backed by the given repository and image fallback.
    pub fn new(repo: R, images: ImageFallback) -> Self {
        Self { repo, images }
    }

    /// List all properties in store order, with images normalised.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn list_properties(&self) -> Result<Vec<Property>, ListingsError> {
        let rows = self.repo.get_all().await?;
        Ok(rows
            .into_iter()
            .map(|property| property.normalized(&self.images))
            .collect())
    }

    /// Look up a property by id, with its image normalised.
    ///
    /// # Errors
    ///
    /// Returns [`ListingsError::NotFound`] when no property with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_property(&self, id: PropertyId) -> Result<Property, ListingsError> {
        let property = self.find(id).await?;
        Ok(property.normalized(&self.images))
    }

    /// Create a property from a draft that must carry every required field.
    ///
    /// The returned property is what was stored: its `image_url` follows the
    /// create rule, not read normalisation.
    ///
    /// # Errors
    ///
    /// Returns [`ListingsError::Validation`] if a required field is missing
    /// (nothing is inserted), or a storage error from the repository.
    #[tracing::instrument(skip(self, draft))]
    pub async fn create_property(&self, draft: PropertyDraft) -> Result<Property, ListingsError> {
        let new = draft.into_new_property(&self.images)?;
        let created = self.repo.create(new).await?;
        tracing::info!(id = %created.id, "property created");
        Ok(created)
    }

    /// Apply a partial update to an existing property and overwrite its row.
    ///
    /// # Errors
    ///
    /// Returns [`ListingsError::NotFound`] when no property with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self, changes))]
    pub async fn update_property(
        &self,
        id: PropertyId,
        changes: PropertyDraft,
    ) -> Result<Property, ListingsError> {
        let existing = self.find(id).await?;
        let merged = existing.merge(changes, &self.images);
        self.repo
            .update(merged)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Delete a property by id.
    ///
    /// # Errors
    ///
    /// Returns [`ListingsError::NotFound`] when no row was removed, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_property(&self, id: PropertyId) -> Result<(), ListingsError> {
        if self.repo.delete(id).await? {
            Ok(())
        } else {
            Err(not_found(id))
        }
    }

    async fn find(&self, id: PropertyId) -> Result<Property, ListingsError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| not_found(id))
    }
}

fn not_found(id: PropertyId) -> ListingsError {
    NotFoundError {
        entity: "Property",
        id: id.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use listings_domain::error::ValidationError;
    use listings_domain::image::DEFAULT_FALLBACK_URL;
    use listings_domain::property::{NewProperty, Price};
    use std::collections::BTreeMap;
    use std::future::Future;
    use std::sync::Mutex;

    const PHOTO: &str = "https://images.unsplash.com/photo-1522708323590-d24dbb6b0267";

    #[derive(Default)]
    struct InMemoryPropertyRepo {
        store: Mutex<BTreeMap<PropertyId, Property>>,
        next_id: Mutex<i64>,
    }

    impl InMemoryPropertyRepo {
        fn insert_raw(&self, property: Property) {
            self.store.lock().unwrap().insert(property.id, property);
        }
    }

    impl PropertyRepository for InMemoryPropertyRepo {
        fn create(
            &self,
            property: NewProperty,
        ) -> impl Future<Output = Result<Property, ListingsError>> + Send {
            let mut next_id = self.next_id.lock().unwrap();
            *next_id += 1;
            let created = property.with_id(PropertyId::new(*next_id));
            self.store
                .lock()
                .unwrap()
                .insert(created.id, created.clone());
            async { Ok(created) }
        }

        fn get_by_id(
            &self,
            id: PropertyId,
        ) -> impl Future<Output = Result<Option<Property>, ListingsError>> + Send {
            let result = self.store.lock().unwrap().get(&id).cloned();
            async { Ok(result) }
        }

        fn get_all(&self) -> impl Future<Output = Result<Vec<Property>, ListingsError>> + Send {
            let result: Vec<Property> = self.store.lock().unwrap().values().cloned().collect();
            async { Ok(result) }
        }

        fn update(
            &self,
            property: Property,
        ) -> impl Future<Output = Result<Option<Property>, ListingsError>> + Send {
            let mut store = self.store.lock().unwrap();
            let result = store.get_mut(&property.id).map(|row| {
                *row = property.clone();
                property
            });
            async { Ok(result) }
        }

        fn delete(&self, id: PropertyId) -> impl Future<Output = Result<bool, ListingsError>> + Send {
            let removed = self.store.lock().unwrap().remove(&id).is_some();
            async move { Ok(removed) }
        }
    }

    fn make_service() -> PropertyService<InMemoryPropertyRepo> {
        PropertyService::new(InMemoryPropertyRepo::default(), ImageFallback::default())
    }

    fn cozy_apartment() -> PropertyDraft {
        PropertyDraft::default()
            .name("Cozy Apartment")
            .price(1200)
            .location("New York")
            .bedrooms(2)
            .bathrooms(1)
            .image_url(PHOTO)
    }

    #[tokio::test]
    async fn should_create_property_and_assign_id() {
        let svc = make_service();

        let created = svc.create_property(cozy_apartment()).await.unwrap();
        assert_eq!(created.id, PropertyId::new(1));
        assert_eq!(created.image_url, PHOTO);

        let fetched = svc.get_property(created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn should_default_image_on_create_when_absent() {
        let svc = make_service();
        let draft = PropertyDraft {
            image_url: None,
            ..cozy_apartment()
        };

        let created = svc.create_property(draft).await.unwrap();
        assert_eq!(created.image_url, DEFAULT_FALLBACK_URL);
    }

    #[tokio::test]
    async fn should_reject_create_when_required_field_missing() {
        let svc = make_service();
        let draft = PropertyDraft {
            location: None,
            ..cozy_apartment()
        };

        let result = svc.create_property(draft).await;
        assert!(matches!(
            result,
            Err(ListingsError::Validation(
                ValidationError::MissingRequiredFields
            ))
        ));
        assert!(svc.list_properties().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_list_properties_in_store_order() {
        let svc = make_service();
        svc.create_property(cozy_apartment()).await.unwrap();
        svc.create_property(cozy_apartment().name("Luxury Villa"))
            .await
            .unwrap();

        let all = svc.list_properties().await.unwrap();
        let names: Vec<&str> = all.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Cozy Apartment", "Luxury Villa"]);
    }

    #[tokio::test]
    async fn should_normalize_images_when_reading() {
        let svc = make_service();
        svc.repo.insert_raw(Property {
            id: PropertyId::new(10),
            name: "Marked".to_string(),
            price: Price::Integer(1),
            location: "Nowhere".to_string(),
            bedrooms: 1,
            bathrooms: 1,
            image_url: "https://source.unsplash.com/random".to_string(),
        });
        svc.repo.insert_raw(Property {
            id: PropertyId::new(11),
            name: "Blank".to_string(),
            price: Price::Integer(1),
            location: "Nowhere".to_string(),
            bedrooms: 1,
            bathrooms: 1,
            image_url: String::new(),
        });

        for property in svc.list_properties().await.unwrap() {
            assert_eq!(property.image_url, DEFAULT_FALLBACK_URL);
        }
        let single = svc.get_property(PropertyId::new(10)).await.unwrap();
        assert_eq!(single.image_url, DEFAULT_FALLBACK_URL);
    }

    #[tokio::test]
    async fn should_return_not_found_when_property_missing() {
        let svc = make_service();
        let result = svc.get_property(PropertyId::new(99)).await;
        assert!(matches!(result, Err(ListingsError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_merge_partial_update_and_reset_image() {
        let svc = make_service();
        let created = svc.create_property(cozy_apartment()).await.unwrap();

        let updated = svc
            .update_property(created.id, PropertyDraft::default().price(999))
            .await
            .unwrap();

        assert_eq!(updated.price, Price::Integer(999));
        assert_eq!(updated.name, "Cozy Apartment");
        assert_eq!(updated.location, "New York");
        assert_eq!(updated.bedrooms, 2);
        assert_eq!(updated.bathrooms, 1);
        assert_eq!(updated.image_url, DEFAULT_FALLBACK_URL);

        let fetched = svc.get_property(created.id).await.unwrap();
        assert_eq!(fetched, updated);
    }

    #[tokio::test]
    async fn should_return_not_found_when_updating_missing_property() {
        let svc = make_service();
        svc.create_property(cozy_apartment()).await.unwrap();

        let result = svc
            .update_property(PropertyId::new(42), PropertyDraft::default().price(1))
            .await;

        assert!(matches!(result, Err(ListingsError::NotFound(_))));
        assert_eq!(svc.list_properties().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn should_delete_property_once() {
        let svc = make_service();
        let created = svc.create_property(cozy_apartment()).await.unwrap();

        svc.delete_property(created.id).await.unwrap();

        let again = svc.delete_property(created.id).await;
        assert!(matches!(again, Err(ListingsError::NotFound(_))));
        let fetched = svc.get_property(created.id).await;
        assert!(matches!(fetched, Err(ListingsError::NotFound(_))));
    }
}
