//! REST collections and the validating parse boundary

use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// The collections the dashboard reads from the Kari API.
///
/// # Examples
///
/// ```
/// use kari_admin_lib::model::Collection;
///
/// assert_eq!(Collection::Votes.path(), "/votes/");
/// assert_eq!(Collection::Users.path(), "/users");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Campaigns,
    Participants,
    Votes,
    Winners,
    Testimonials,
    Users,
}

impl Collection {
    pub const ALL: [Collection; 6] = [
        Collection::Campaigns,
        Collection::Participants,
        Collection::Votes,
        Collection::Winners,
        Collection::Testimonials,
        Collection::Users,
    ];

    /// Endpoint path relative to the API base URL.
    ///
    /// The trailing slashes match what the API routes expect; `/users` has none.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Campaigns => "/campaigns/",
            Self::Participants => "/participants/",
            Self::Votes => "/votes/",
            Self::Winners => "/winners/",
            Self::Testimonials => "/testimonials/",
            Self::Users => "/users",
        }
    }

    /// Short name used in logs and errors.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Campaigns => "campaigns",
            Self::Participants => "participants",
            Self::Votes => "votes",
            Self::Winners => "winners",
            Self::Testimonials => "testimonials",
            Self::Users => "users",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Parses a collection response body into typed DTOs.
///
/// The body must be a JSON array and every element must satisfy `T`'s schema.
/// The first offending element is reported with its index; nothing is
/// silently dropped.
///
/// # Examples
///
/// ```
/// use kari_admin_lib::model::{Collection, parse_collection, types::Vote};
///
/// let body = serde_json::json!([{"id": 1, "participant_id": 7}]);
/// let votes: Vec<Vote> = parse_collection(Collection::Votes, body).unwrap();
/// assert_eq!(votes.len(), 1);
/// ```
pub fn parse_collection<T>(collection: Collection, body: serde_json::Value) -> Result<Vec<T>, ApiError>
where
    T: DeserializeOwned,
{
    let serde_json::Value::Array(elements) = body else {
        return Err(ApiError::parse(
            collection.name(),
            format!("expected a JSON array, got {}", json_kind(&body)),
        ));
    };

    log::debug!("Parsing {} {} elements", elements.len(), collection);

    elements
        .into_iter()
        .enumerate()
        .map(|(index, element)| {
            serde_json::from_value(element)
                .map_err(|e| ApiError::parse_at(collection.name(), index, e.to_string()))
        })
        .collect()
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
