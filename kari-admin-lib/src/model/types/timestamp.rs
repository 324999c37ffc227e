//! Lenient timestamp fields

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Deserializer;

use crate::model::parse_timestamp;

/// Deserializes an optional timestamp in any of the shapes the API emits.
///
/// Strings that are not timestamps become `None` instead of failing the whole
/// element, so aggregation can count them as skipped.
pub(crate) fn deserialize_opt<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(|s| {
        let parsed = parse_timestamp(s);
        if parsed.is_none() && !s.is_empty() {
            log::debug!("Ignoring unparseable timestamp '{}'", s);
        }
        parsed
    }))
}
