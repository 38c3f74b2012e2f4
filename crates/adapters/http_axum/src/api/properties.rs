//! JSON REST handlers for properties.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use listings_app::ports::PropertyRepository;
use listings_domain::error::ValidationError;
use listings_domain::id::PropertyId;
use listings_domain::property::{Property, PropertyDraft};

use crate::error::ApiError;
use crate::state::AppState;

/// Keys a create request must carry with a non-null value.
const REQUIRED_FIELDS: [&str; 5] = ["name", "price", "location", "bedrooms", "bathrooms"];

/// Request body for creating or updating a property.
///
/// Held as a raw JSON object so presence can be checked before any value is
/// interpreted. An explicit `null` counts as not supplied and unknown keys
/// are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct PropertyRequest(Map<String, Value>);

impl PropertyRequest {
    /// Check that every required key is supplied.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingRequiredFields`] if any required key
    /// is absent or `null`, whatever the other values look like.
    pub fn require_all(&self) -> Result<(), ValidationError> {
        if REQUIRED_FIELDS.iter().all(|field| self.is_supplied(field)) {
            Ok(())
        } else {
            Err(ValidationError::MissingRequiredFields)
        }
    }

    /// Interpret the supplied values as listing fields.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidField`] for the first known field
    /// whose value has the wrong JSON type.
    pub fn into_draft(mut self) -> Result<PropertyDraft, ValidationError> {
        Ok(PropertyDraft {
            name: self.take("name")?,
            price: self.take("price")?,
            location: self.take("location")?,
            bedrooms: self.take("bedrooms")?,
            bathrooms: self.take("bathrooms")?,
            image_url: self.take("image_url")?,
        })
    }

    fn is_supplied(&self, field: &str) -> bool {
        self.0.get(field).is_some_and(|value| !value.is_null())
    }

    fn take<T: DeserializeOwned>(
        &mut self,
        field: &'static str,
    ) -> Result<Option<T>, ValidationError> {
        match self.0.remove(field) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|_| ValidationError::InvalidField { field }),
        }
    }
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Property>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get and update endpoints.
pub enum GetResponse {
    Ok(Json<Property>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Property>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    NoContent,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

/// `GET /api/properties` — list all properties.
pub async fn list<PR>(State(state): State<AppState<PR>>) -> Result<ListResponse, ApiError>
where
    PR: PropertyRepository + Send + Sync + 'static,
{
    let properties = state.property_service.list_properties().await?;
    Ok(ListResponse::Ok(Json(properties)))
}

/// `GET /api/properties/:id` — get property by ID.
pub async fn get<PR>(
    State(state): State<AppState<PR>>,
    Path(id): Path<PropertyId>,
) -> Result<GetResponse, ApiError>
where
    PR: PropertyRepository + Send + Sync + 'static,
{
    let property = state.property_service.get_property(id).await?;
    Ok(GetResponse::Ok(Json(property)))
}

/// `POST /api/properties` — create a new property.
pub async fn create<PR>(
    State(state): State<AppState<PR>>,
    Json(req): Json<PropertyRequest>,
) -> Result<CreateResponse, ApiError>
where
    PR: PropertyRepository + Send + Sync + 'static,
{
    req.require_all()?;
    let created = state
        .property_service
        .create_property(req.into_draft()?)
        .await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `PUT /api/properties/:id` — partially update an existing property.
pub async fn update<PR>(
    State(state): State<AppState<PR>>,
    Path(id): Path<PropertyId>,
    Json(req): Json<PropertyRequest>,
) -> Result<GetResponse, ApiError>
where
    PR: PropertyRepository + Send + Sync + 'static,
{
    let updated = state
        .property_service
        .update_property(id, req.into_draft()?)
        .await?;
    Ok(GetResponse::Ok(Json(updated)))
}

/// `DELETE /api/properties/:id` — delete a property.
pub async fn delete<PR>(
    State(state): State<AppState<PR>>,
    Path(id): Path<PropertyId>,
) -> Result<DeleteResponse, ApiError>
where
    PR: PropertyRepository + Send + Sync + 'static,
{
    state.property_service.delete_property(id).await?;
    Ok(DeleteResponse::NoContent)
}
