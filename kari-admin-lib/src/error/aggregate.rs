//! Aggregation contract violations

use crate::aggregate::TimeUnit;

/// Errors raised by the aggregation routines.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AggregateError {
    /// The label set does not fit the time unit.
    #[error("{unit} buckets need {expected} labels, got {actual}")]
    LabelCount {
        unit: TimeUnit,
        expected: &'static str,
        actual: usize,
    },

    /// A primary record has no value for the grouping key.
    #[error("record at position {position} has no group key")]
    MissingGroupKey { position: usize },

    /// Two series with different label sets cannot be merged.
    #[error("series '{series}' does not share the same labels")]
    SeriesMismatch { series: String },
}
