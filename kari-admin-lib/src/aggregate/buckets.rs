//! Time-series bucketing

use std::fmt;

use chrono::DateTime;
use chrono::Datelike;
use chrono::FixedOffset;
use chrono::Offset;
use chrono::Timelike;
use chrono::Utc;

use crate::error::AggregateError;

/// Month labels, January first.
pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Fev", "Mar", "Abr", "Mai", "Jun", "Jul", "Ago", "Set", "Out", "Nov", "Dez",
];

/// Day-of-week labels, Monday first.
pub const WEEKDAY_LABELS: [&str; 7] = ["Seg", "Ter", "Qua", "Qui", "Sex", "Sáb", "Dom"];

/// Four-hour blocks of the voting chart.
pub const HOUR_BLOCK_LABELS: [&str; 6] = ["00h", "04h", "08h", "12h", "16h", "20h"];

/// One label per hour of the day.
pub const HOUR_LABELS: [&str; 24] = [
    "00h", "01h", "02h", "03h", "04h", "05h", "06h", "07h", "08h", "09h", "10h", "11h", "12h",
    "13h", "14h", "15h", "16h", "17h", "18h", "19h", "20h", "21h", "22h", "23h",
];

/// Calendar unit a timestamp is bucketed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    /// Hour of day. Any label count dividing 24 works; each label then
    /// covers `24 / labels` consecutive hours.
    Hour,
    /// Day of week, Monday first; needs 7 labels.
    DayOfWeek,
    /// Month of year; needs 12 labels.
    Month,
}

impl TimeUnit {
    /// Index of the bucket `at` falls in, given `labels` buckets.
    fn bucket_index(self, at: &DateTime<FixedOffset>, labels: usize) -> usize {
        match self {
            Self::Hour => at.hour() as usize / (24 / labels),
            Self::DayOfWeek => at.weekday().num_days_from_monday() as usize,
            Self::Month => at.month0() as usize,
        }
    }

    fn check_labels(self, labels: usize) -> Result<(), AggregateError> {
        let (ok, expected) = match self {
            Self::Hour => (labels > 0 && 24 % labels == 0, "a divisor of 24"),
            Self::DayOfWeek => (labels == 7, "7"),
            Self::Month => (labels == 12, "12"),
        };
        if ok {
            Ok(())
        } else {
            Err(AggregateError::LabelCount {
                unit: self,
                expected,
                actual: labels,
            })
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hour => f.write_str("hour"),
            Self::DayOfWeek => f.write_str("day-of-week"),
            Self::Month => f.write_str("month"),
        }
    }
}

/// One labelled value of a chart, with optional named companion series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationBucket {
    pub label: String,
    pub value: u64,
    /// Extra series plotted against the same label, in insertion order.
    pub series: Vec<(String, u64)>,
}

impl AggregationBucket {
    pub fn new(label: impl Into<String>, value: u64) -> Self {
        Self {
            label: label.into(),
            value,
            series: Vec::new(),
        }
    }

    /// Value of a companion series.
    pub fn series_value(&self, name: &str) -> Option<u64> {
        self.series
            .iter()
            .find(|(series, _)| series == name)
            .map(|(_, value)| *value)
    }
}

/// Buckets in label order plus the number of records left out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketSeries {
    pub buckets: Vec<AggregationBucket>,
    /// Records whose timestamp was missing or unparseable.
    pub skipped: usize,
}

impl BucketSeries {
    /// Adds `other`'s values as the companion series `name`.
    ///
    /// Both series must have the same labels in the same order.
    pub fn with_series(mut self, name: &str, other: &BucketSeries) -> Result<Self, AggregateError> {
        let same_labels = self.buckets.len() == other.buckets.len()
            && self
                .buckets
                .iter()
                .zip(&other.buckets)
                .all(|(a, b)| a.label == b.label);
        if !same_labels {
            return Err(AggregateError::SeriesMismatch {
                series: name.to_string(),
            });
        }
        for (bucket, extra) in self.buckets.iter_mut().zip(&other.buckets) {
            bucket.series.push((name.to_string(), extra.value));
        }
        Ok(self)
    }

    /// Sum of all bucket values.
    pub fn total(&self) -> u64 {
        self.buckets.iter().map(|b| b.value).sum()
    }

    /// The bucket with the highest value; the earliest wins ties.
    pub fn peak(&self) -> Option<&AggregationBucket> {
        self.buckets
            .iter()
            .rev()
            .max_by_key(|bucket| bucket.value)
    }
}

/// Counts records per calendar bucket, in UTC.
///
/// See [`bucket_by_time_unit_in`].
pub fn bucket_by_time_unit<T, F>(
    records: &[T],
    timestamp_of: F,
    unit: TimeUnit,
    labels: &[&str],
) -> Result<BucketSeries, AggregateError>
where
    F: Fn(&T) -> Option<DateTime<Utc>>,
{
    bucket_by_time_unit_in(records, timestamp_of, unit, labels, utc())
}

/// Counts records per calendar bucket, reading timestamps in `offset`.
///
/// Produces exactly one bucket per label, in label order, so empty months or
/// hours still show up with a zero. Records without a timestamp are counted in
/// [`BucketSeries::skipped`].
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use kari_admin_lib::aggregate::{bucket_by_time_unit, TimeUnit, MONTH_LABELS};
///
/// let stamps = [Some(Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap()), None];
/// let series = bucket_by_time_unit(&stamps, |t| *t, TimeUnit::Month, &MONTH_LABELS).unwrap();
/// assert_eq!(series.buckets.len(), 12);
/// assert_eq!(series.buckets[2].value, 1);
/// assert_eq!(series.skipped, 1);
/// ```
pub fn bucket_by_time_unit_in<T, F>(
    records: &[T],
    timestamp_of: F,
    unit: TimeUnit,
    labels: &[&str],
    offset: FixedOffset,
) -> Result<BucketSeries, AggregateError>
where
    F: Fn(&T) -> Option<DateTime<Utc>>,
{
    unit.check_labels(labels.len())?;

    let mut counts = vec![0u64; labels.len()];
    let mut skipped = 0;
    for record in records {
        match timestamp_of(record) {
            Some(at) => {
                let index = unit.bucket_index(&at.with_timezone(&offset), labels.len());
                counts[index] += 1;
            }
            None => skipped += 1,
        }
    }

    Ok(BucketSeries {
        buckets: labels
            .iter()
            .zip(counts)
            .map(|(label, value)| AggregationBucket::new(*label, value))
            .collect(),
        skipped,
    })
}

fn utc() -> FixedOffset {
    Utc.fix()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32) -> Option<DateTime<Utc>> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).single()
    }

    #[test]
    fn test_every_label_gets_a_bucket() {
        let stamps = [at(2024, 1, 10, 8), at(2024, 1, 20, 9), at(2024, 7, 1, 0)];
        let series = bucket_by_time_unit(&stamps, |t| *t, TimeUnit::Month, &MONTH_LABELS).unwrap();
        let values: Vec<u64> = series.buckets.iter().map(|b| b.value).collect();
        assert_eq!(values, [2, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0]);
        assert_eq!(series.skipped, 0);
    }

    #[test]
    fn test_hour_blocks() {
        let stamps = [at(2024, 1, 1, 3), at(2024, 1, 1, 4), at(2024, 1, 1, 23), None];
        let series =
            bucket_by_time_unit(&stamps, |t| *t, TimeUnit::Hour, &HOUR_BLOCK_LABELS).unwrap();
        let values: Vec<u64> = series.buckets.iter().map(|b| b.value).collect();
        assert_eq!(values, [1, 1, 0, 0, 0, 1]);
        assert_eq!(series.skipped, 1);
    }

    #[test]
    fn test_weekday_is_monday_first() {
        // 2024-01-01 was a Monday, 2024-01-07 a Sunday
        let stamps = [at(2024, 1, 1, 12), at(2024, 1, 7, 12)];
        let series =
            bucket_by_time_unit(&stamps, |t| *t, TimeUnit::DayOfWeek, &WEEKDAY_LABELS).unwrap();
        assert_eq!(series.buckets[0].value, 1);
        assert_eq!(series.buckets[6].value, 1);
    }

    #[test]
    fn test_offset_moves_bucket() {
        // 01:00 UTC is 22:00 the previous day at UTC-3
        let stamps = [at(2024, 3, 1, 1)];
        let brt = FixedOffset::west_opt(3 * 3600).unwrap();
        let series = bucket_by_time_unit_in(
            &stamps,
            |t| *t,
            TimeUnit::Month,
            &MONTH_LABELS,
            brt,
        )
        .unwrap();
        assert_eq!(series.buckets[1].value, 1);
    }

    #[test]
    fn test_wrong_label_count() {
        let stamps: [Option<DateTime<Utc>>; 0] = [];
        let err = bucket_by_time_unit(&stamps, |t| *t, TimeUnit::Hour, &["a"; 5]).unwrap_err();
        assert_eq!(
            err,
            AggregateError::LabelCount {
                unit: TimeUnit::Hour,
                expected: "a divisor of 24",
                actual: 5
            }
        );
        assert!(bucket_by_time_unit(&stamps, |t| *t, TimeUnit::Month, &WEEKDAY_LABELS).is_err());
    }

    #[test]
    fn test_with_series() {
        let votes = [at(2024, 2, 1, 0), at(2024, 2, 2, 0)];
        let people = [at(2024, 2, 3, 0)];
        let votes = bucket_by_time_unit(&votes, |t| *t, TimeUnit::Month, &MONTH_LABELS).unwrap();
        let people = bucket_by_time_unit(&people, |t| *t, TimeUnit::Month, &MONTH_LABELS).unwrap();
        let merged = votes.with_series("participants", &people).unwrap();
        assert_eq!(merged.buckets[1].value, 2);
        assert_eq!(merged.buckets[1].series_value("participants"), Some(1));

        let hours = bucket_by_time_unit(&[at(2024, 2, 1, 0)], |t| *t, TimeUnit::Hour, &HOUR_LABELS)
            .unwrap();
        assert!(merged.with_series("hours", &hours).is_err());
    }

    #[test]
    fn test_peak_prefers_earliest() {
        let stamps = [at(2024, 1, 1, 8), at(2024, 1, 1, 20)];
        let series =
            bucket_by_time_unit(&stamps, |t| *t, TimeUnit::Hour, &HOUR_LABELS).unwrap();
        assert_eq!(series.peak().map(|b| b.label.as_str()), Some("08h"));
    }
}
