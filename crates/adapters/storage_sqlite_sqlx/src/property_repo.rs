//! `SQLite` implementation of [`PropertyRepository`].

use std::future::Future;

use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{FromRow, Row, Sqlite, SqlitePool, TypeInfo, ValueRef};

use listings_app::ports::PropertyRepository;
use listings_domain::error::ListingsError;
use listings_domain::id::PropertyId;
use listings_domain::property::{NewProperty, Price, Property};

use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`Property`].
struct Wrapper(Property);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Property> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let price = decode_price(row, id)?;
        let image_url: Option<String> = row.try_get("image_url")?;

        Ok(Self(Property {
            id: PropertyId::new(id),
            name: row.try_get("name")?,
            price,
            location: row.try_get("location")?,
            bedrooms: row.try_get("bedrooms")?,
            bathrooms: row.try_get("bathrooms")?,
            image_url: image_url.unwrap_or_default(),
        }))
    }
}

/// Read `price` according to the storage class of the stored value.
///
/// NUMERIC affinity keeps whole numbers as INTEGER and the rest as REAL.
/// Rows written by other tools may still hold TEXT: numeric text is parsed,
/// anything else is a decode error naming the row.
fn decode_price(row: &SqliteRow, id: i64) -> Result<Price, sqlx::Error> {
    let class = row.try_get_raw("price")?.type_info().name().to_string();
    match class.as_str() {
        "REAL" => Ok(Price::Decimal(row.try_get("price")?)),
        "TEXT" => {
            let raw: String = row.try_get("price")?;
            parse_price_text(&raw).ok_or_else(|| {
                tracing::warn!(property_id = id, price = %raw, "non-numeric price in storage");
                sqlx::Error::ColumnDecode {
                    index: "price".to_string(),
                    source: format!("property {id} has non-numeric price {raw:?}").into(),
                }
            })
        }
        _ => Ok(Price::Integer(row.try_get("price")?)),
    }
}

fn parse_price_text(raw: &str) -> Option<Price> {
    let raw = raw.trim();
    if let Ok(whole) = raw.parse::<i64>() {
        return Some(Price::Integer(whole));
    }
    raw.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .map(|value| Price::Decimal(value).canonical())
}

fn bind_price<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    price: Price,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    match price {
        Price::Integer(value) => query.bind(value),
        Price::Decimal(value) => query.bind(value),
    }
}

const INSERT: &str = "INSERT INTO properties (name, price, location, bedrooms, bathrooms, image_url) VALUES (?, ?, ?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT id, name, price, location, bedrooms, bathrooms, image_url FROM properties WHERE id = ?";
const SELECT_ALL: &str =
    "SELECT id, name, price, location, bedrooms, bathrooms, image_url FROM properties";
const UPDATE: &str = "UPDATE properties SET name = ?, price = ?, location = ?, bedrooms = ?, bathrooms = ?, image_url = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM properties WHERE id = ?";

/// `SQLite`-backed property repository.
pub struct SqlitePropertyRepository {
    pool: SqlitePool,
}

impl SqlitePropertyRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl PropertyRepository for SqlitePropertyRepository {
    fn create(
        &self,
        property: NewProperty,
    ) -> impl Future<Output = Result<Property, ListingsError>> + Send {
        let pool = self.pool.clone();
        async move {
            let query = sqlx::query(INSERT).bind(&property.name);
            let result = bind_price(query, property.price)
                .bind(&property.location)
                .bind(property.bedrooms)
                .bind(property.bathrooms)
                .bind(&property.image_url)
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            let id = PropertyId::new(result.last_insert_rowid());
            Ok(property.with_id(id))
        }
    }

    fn get_by_id(
        &self,
        id: PropertyId,
    ) -> impl Future<Output = Result<Option<Property>, ListingsError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.as_i64())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Property>, ListingsError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn update(
        &self,
        property: Property,
    ) -> impl Future<Output = Result<Option<Property>, ListingsError>> + Send {
        let pool = self.pool.clone();
        async move {
            let query = sqlx::query(UPDATE).bind(&property.name);
            let result = bind_price(query, property.price)
                .bind(&property.location)
                .bind(property.bedrooms)
                .bind(property.bathrooms)
                .bind(&property.image_url)
                .bind(property.id.as_i64())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok((result.rows_affected() > 0).then_some(property))
        }
    }

    fn delete(&self, id: PropertyId) -> impl Future<Output = Result<bool, ListingsError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(DELETE_BY_ID)
                .bind(id.as_i64())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(result.rows_affected() > 0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Config;

    const PHOTO: &str = "https://images.unsplash.com/photo-1522708323590-d24dbb6b0267";

    async fn setup() -> SqlitePropertyRepository {
        let db = Config::in_memory().build().await.unwrap();
        SqlitePropertyRepository::new(db.pool().clone())
    }

    fn cozy_apartment() -> NewProperty {
        NewProperty {
            name: "Cozy Apartment".to_string(),
            price: Price::Integer(1200),
            location: "New York".to_string(),
            bedrooms: 2,
            bathrooms: 1,
            image_url: PHOTO.to_string(),
        }
    }

    #[tokio::test]
    async fn should_create_and_retrieve_property_when_valid() {
        let repo = setup().await;

        let created = repo.create(cozy_apartment()).await.unwrap();
        assert_eq!(created.id, PropertyId::new(1));

        let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn should_assign_increasing_ids() {
        let repo = setup().await;
        let first = repo.create(cozy_apartment()).await.unwrap();
        let second = repo.create(cozy_apartment()).await.unwrap();
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn should_return_none_when_property_not_found() {
        let repo = setup().await;
        let result = repo.get_by_id(PropertyId::new(404)).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn should_list_all_properties_in_insertion_order() {
        let repo = setup().await;
        repo.create(cozy_apartment()).await.unwrap();
        repo.create(NewProperty {
            name: "Luxury Villa".to_string(),
            ..cozy_apartment()
        })
        .await
        .unwrap();

        let all = repo.get_all().await.unwrap();
        let names: Vec<&str> = all.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Cozy Apartment", "Luxury Villa"]);
    }

    #[tokio::test]
    async fn should_keep_decimal_price_through_roundtrip() {
        let repo = setup().await;
        let created = repo
            .create(NewProperty {
                price: Price::Decimal(1299.5),
                ..cozy_apartment()
            })
            .await
            .unwrap();

        let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.price, Price::Decimal(1299.5));
    }

    #[tokio::test]
    async fn should_read_null_image_as_empty_string() {
        let repo = setup().await;
        sqlx::query(
            "INSERT INTO properties (name, price, location, bedrooms, bathrooms, image_url) VALUES ('Bare', 10, 'Austin', 1, 1, NULL)",
        )
        .execute(&repo.pool)
        .await
        .unwrap();

        let all = repo.get_all().await.unwrap();
        assert_eq!(all[0].image_url, "");
    }

    #[test]
    fn should_parse_numeric_price_text() {
        assert_eq!(parse_price_text(" 1500 "), Some(Price::Integer(1500)));
        assert_eq!(parse_price_text("1499.5"), Some(Price::Decimal(1499.5)));
        assert_eq!(parse_price_text("1500.0"), Some(Price::Integer(1500)));
        assert_eq!(parse_price_text("call us"), None);
        assert_eq!(parse_price_text("inf"), None);
    }

    #[tokio::test]
    async fn should_report_row_id_when_stored_price_is_not_numeric() {
        let repo = setup().await;
        sqlx::query(
            "INSERT INTO properties (name, price, location, bedrooms, bathrooms, image_url) VALUES ('Odd', 'call us', 'Austin', 1, 1, NULL)",
        )
        .execute(&repo.pool)
        .await
        .unwrap();

        let err = repo.get_all().await.unwrap_err();
        assert!(matches!(err, ListingsError::Storage(_)));
        let cause = std::error::Error::source(&err).unwrap();
        assert!(format!("{cause:?}").contains("property 1 has non-numeric price"));
    }

    #[tokio::test]
    async fn should_update_property_when_exists() {
        let repo = setup().await;
        let mut property = repo.create(cozy_apartment()).await.unwrap();

        property.price = Price::Integer(1300);
        property.image_url = "https://img.test/new.jpg".to_string();
        let saved = repo.update(property.clone()).await.unwrap();
        assert_eq!(saved, Some(property.clone()));

        let fetched = repo.get_by_id(property.id).await.unwrap().unwrap();
        assert_eq!(fetched.price, Price::Integer(1300));
        assert_eq!(fetched.image_url, "https://img.test/new.jpg");
    }

    #[tokio::test]
    async fn should_return_none_when_updating_missing_row() {
        let repo = setup().await;
        let ghost = cozy_apartment().with_id(PropertyId::new(77));

        let result = repo.update(ghost).await.unwrap();
        assert!(result.is_none());
        assert!(repo.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_report_whether_delete_removed_a_row() {
        let repo = setup().await;
        let created = repo.create(cozy_apartment()).await.unwrap();

        assert!(repo.delete(created.id).await.unwrap());
        assert!(!repo.delete(created.id).await.unwrap());
        assert!(repo.get_by_id(created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn should_not_reuse_id_of_deleted_row() {
        let repo = setup().await;
        let first = repo.create(cozy_apartment()).await.unwrap();
        repo.delete(first.id).await.unwrap();

        let second = repo.create(cozy_apartment()).await.unwrap();
        assert_ne!(second.id, first.id);
    }
}
