//! Image URL fallback rules.
//!
//! Three rules share one fallback URL but are intentionally different:
//!
//! | When   | Fallback used if the candidate is …             |
//! |--------|-------------------------------------------------|
//! | read   | absent, empty, or contains [`RANDOM_MARKER`]    |
//! | create | absent                                          |
//! | update | absent or empty (the stored value is discarded) |

/// Substring that flags an image URL as a throwaway placeholder.
pub const RANDOM_MARKER: &str = "random";

/// Placeholder image served when a listing has no usable picture.
pub const DEFAULT_FALLBACK_URL: &str = "https://images.unsplash.com/photo-1560518883-ce09059eeffa?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=60";

/// Holds the configured fallback URL and applies the image rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFallback {
    url: String,
}

impl Default for ImageFallback {
    fn default() -> Self {
        Self::new(DEFAULT_FALLBACK_URL)
    }
}

impl ImageFallback {
    /// Use `url` as the fallback image.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// The configured fallback URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Read-time normalisation.
    #[must_use]
    pub fn normalize(&self, candidate: Option<&str>) -> String {
        match candidate {
            Some(url) if !url.is_empty() && !url.contains(RANDOM_MARKER) => url.to_string(),
            _ => self.url.clone(),
        }
    }

    /// Create-time default: only an absent value is replaced.
    #[must_use]
    pub fn on_create(&self, candidate: Option<String>) -> String {
        candidate.unwrap_or_else(|| self.url.clone())
    }

    /// Update-time default: anything but a non-empty value resets to the
    /// fallback, regardless of what was stored before.
    #[must_use]
    pub fn on_update(&self, candidate: Option<String>) -> String {
        candidate
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| self.url.clone())
    }
}
