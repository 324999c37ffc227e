//! Image URL resolution

use url::Url;

use crate::error::AdapterError;

/// Shown when a record has no image.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.jpg";

/// Turns the image references stored by the API into absolute URLs.
///
/// Uploaded files are served from the API's origin, not from under the
/// versioned API path, so only the scheme, host and port of the API URL are
/// kept.
///
/// # Example
///
/// ```
/// use kari_admin_lib::adapters::ImageResolver;
///
/// let resolver = ImageResolver::new("https://api.kariajuda.com/api/v1").unwrap();
/// assert_eq!(
///     resolver.resolve(Some("foto.jpg")).unwrap(),
///     "https://api.kariajuda.com/uploads/foto.jpg"
/// );
/// assert_eq!(resolver.resolve(None).unwrap(), "/placeholder.jpg");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageResolver {
    origin: Url,
}

impl ImageResolver {
    /// Builds a resolver from the API base URL.
    pub fn new(api_url: &str) -> Result<Self, AdapterError> {
        let parsed =
            Url::parse(api_url).map_err(|_| AdapterError::InvalidImagePath(api_url.to_string()))?;
        let origin = Url::parse(&parsed.origin().ascii_serialization())
            .map_err(|_| AdapterError::InvalidImagePath(api_url.to_string()))?;
        Ok(Self { origin })
    }

    /// Origin images are served from, without trailing slash.
    pub fn origin(&self) -> &str {
        self.origin.as_str().trim_end_matches('/')
    }

    /// Resolves an image reference.
    ///
    /// - `http://` and `https://` URLs are returned as-is
    /// - absolute paths (`/uploads/a.jpg`) are put on the API origin
    /// - bare names (`a.jpg`, `campaigns/a.jpg`) are taken to live under `/uploads/`
    /// - missing or empty references give [`PLACEHOLDER_IMAGE`]
    pub fn resolve(&self, image: Option<&str>) -> Result<String, AdapterError> {
        let Some(image) = image.map(str::trim).filter(|s| !s.is_empty()) else {
            return Ok(PLACEHOLDER_IMAGE.to_string());
        };

        if image.starts_with("http://") || image.starts_with("https://") {
            return Ok(image.to_string());
        }

        let path = if image.starts_with('/') {
            image.to_string()
        } else {
            format!("/uploads/{}", image)
        };

        self.origin
            .join(&path)
            .map(String::from)
            .map_err(|_| AdapterError::InvalidImagePath(image.to_string()))
    }

    /// Like [`resolve`](Self::resolve), but unresolvable references become the
    /// placeholder.
    pub fn resolve_or_placeholder(&self, image: Option<&str>) -> String {
        self.resolve(image).unwrap_or_else(|err| {
            log::warn!("{}", err);
            PLACEHOLDER_IMAGE.to_string()
        })
    }
}
