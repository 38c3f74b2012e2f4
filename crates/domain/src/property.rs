//! Property — a single real-estate listing.

use serde::{Deserialize, Serialize};

use crate::error::{ListingsError, ValidationError};
use crate::id::PropertyId;
use crate::image::ImageFallback;

/// Listing price, either a whole number or a decimal.
///
/// Storage keeps any whole value as an integer, so a decimal such as
/// `1300.0` is only representable here as [`Price::Integer`]. Use
/// [`Price::canonical`] before a price is stored or echoed back.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Price {
    Integer(i64),
    Decimal(f64),
}

// 2^63, the first whole `f64` outside the `i64` range.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

impl Price {
    /// Collapse a whole-valued decimal into an integer.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
    pub fn canonical(self) -> Self {
        match self {
            Self::Decimal(value)
                if value.fract() == 0.0 && (-I64_BOUND..I64_BOUND).contains(&value) =>
            {
                Self::Integer(value as i64)
            }
            other => other,
        }
    }
}

impl From<i64> for Price {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for Price {
    fn from(value: f64) -> Self {
        Self::Decimal(value)
    }
}

/// A stored listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: PropertyId,
    pub name: String,
    pub price: Price,
    pub location: String,
    pub bedrooms: i64,
    pub bathrooms: i64,
    pub image_url: String,
}

impl Property {
    /// Apply read-time image normalisation.
    #[must_use]
    pub fn normalized(mut self, images: &ImageFallback) -> Self {
        self.image_url = images.normalize(Some(&self.image_url));
        self
    }

    /// Merge a partial update onto this listing.
    ///
    /// Supplied fields win, missing ones keep the current value, except
    /// `image_url` which follows [`ImageFallback::on_update`].
    #[must_use]
    pub fn merge(self, changes: PropertyDraft, images: &ImageFallback) -> Self {
        Self {
            id: self.id,
            name: changes.name.unwrap_or(self.name),
            price: changes.price.map_or(self.price, Price::canonical),
            location: changes.location.unwrap_or(self.location),
            bedrooms: changes.bedrooms.unwrap_or(self.bedrooms),
            bathrooms: changes.bathrooms.unwrap_or(self.bathrooms),
            image_url: images.on_update(changes.image_url),
        }
    }
}

/// A listing that has not been stored yet and therefore has no id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProperty {
    pub name: String,
    pub price: Price,
    pub location: String,
    pub bedrooms: i64,
    pub bathrooms: i64,
    pub image_url: String,
}

impl NewProperty {
    /// Attach the id assigned by storage.
    #[must_use]
    pub fn with_id(self, id: PropertyId) -> Property {
        Property {
            id,
            name: self.name,
            price: self.price,
            location: self.location,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            image_url: self.image_url,
        }
    }
}

/// Listing fields as received from a client, every one optional.
///
/// Used as the create payload (where presence is then enforced) and as the
/// partial-update payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyDraft {
    pub name: Option<String>,
    pub price: Option<Price>,
    pub location: Option<String>,
    pub bedrooms: Option<i64>,
    pub bathrooms: Option<i64>,
    pub image_url: Option<String>,
}

impl PropertyDraft {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn price(mut self, price: impl Into<Price>) -> Self {
        self.price = Some(price.into());
        self
    }

    #[must_use]
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    #[must_use]
    pub fn bedrooms(mut self, bedrooms: i64) -> Self {
        self.bedrooms = Some(bedrooms);
        self
    }

    #[must_use]
    pub fn bathrooms(mut self, bathrooms: i64) -> Self {
        self.bathrooms = Some(bathrooms);
        self
    }

    #[must_use]
    pub fn image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// Check that every required field is present and resolve the image.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingRequiredFields`] if any of `name`,
    /// `price`, `location`, `bedrooms` or `bathrooms` is absent.
    pub fn into_new_property(self, images: &ImageFallback) -> Result<NewProperty, ListingsError> {
        let (Some(name), Some(price), Some(location), Some(bedrooms), Some(bathrooms)) = (
            self.name,
            self.price,
            self.location,
            self.bedrooms,
            self.bathrooms,
        ) else {
            return Err(ValidationError::MissingRequiredFields.into());
        };

        Ok(NewProperty {
            name,
            price: price.canonical(),
            location,
            bedrooms,
            bathrooms,
            image_url: images.on_create(self.image_url),
        })
    }
}
