//! Grouping related records by the category of their parent

use std::hash::Hash;

use super::AggregationBucket;
use super::tally_by_key;
use crate::error::AggregateError;

/// Sums related records per category of the primary record they belong to.
///
/// For "participants per campaign category": `primary` are campaigns,
/// `related` are participants, `relation_key` is the participant's
/// `campaign_id` and `primary_key` the campaign's `id`.
///
/// Buckets are sorted by value, descending; equal values keep the order the
/// category was first seen in `primary`. Only the first `top_k` are returned.
/// A primary record without category is a [`AggregateError::MissingGroupKey`];
/// related records pointing nowhere are ignored.
pub fn group_by_category<P, R, K, C, PK, RK>(
    primary: &[P],
    related: &[R],
    category_of: C,
    primary_key: PK,
    relation_key: RK,
    top_k: usize,
) -> Result<Vec<AggregationBucket>, AggregateError>
where
    K: Eq + Hash + Clone,
    C: Fn(&P) -> Option<String>,
    PK: Fn(&P) -> Option<K>,
    RK: Fn(&R) -> Option<K>,
{
    let related_counts = tally_by_key(related, relation_key);

    let mut buckets: Vec<AggregationBucket> = Vec::new();
    for (position, record) in primary.iter().enumerate() {
        let category = category_of(record)
            .filter(|c| !c.trim().is_empty())
            .ok_or(AggregateError::MissingGroupKey { position })?;
        let count = primary_key(record)
            .map(|key| related_counts.get(&key))
            .unwrap_or(0) as u64;

        match buckets.iter_mut().find(|b| b.label == category) {
            Some(bucket) => bucket.value += count,
            None => buckets.push(AggregationBucket::new(category, count)),
        }
    }

    buckets.sort_by(|a, b| b.value.cmp(&a.value));
    buckets.truncate(top_k);
    Ok(buckets)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Campaign {
        id: u32,
        category: Option<&'static str>,
    }

    #[test]
    fn test_participants_per_category() {
        let campaigns = [
            Campaign { id: 1, category: Some("Educação") },
            Campaign { id: 2, category: Some("Educação") },
            Campaign { id: 3, category: Some("Saúde") },
        ];
        let mut participants = Vec::new();
        participants.extend(std::iter::repeat_n(Some(1u32), 10));
        participants.extend(std::iter::repeat_n(Some(2u32), 5));
        participants.extend(std::iter::repeat_n(Some(3u32), 20));
        participants.push(Some(99));
        participants.push(None);

        let buckets = group_by_category(
            &campaigns,
            &participants,
            |c| c.category.map(str::to_string),
            |c| Some(c.id),
            |p| *p,
            5,
        )
        .unwrap();

        assert_eq!(
            buckets,
            [
                AggregationBucket::new("Saúde", 20),
                AggregationBucket::new("Educação", 15)
            ]
        );
    }

    #[test]
    fn test_missing_category_is_an_error() {
        let campaigns = [
            Campaign { id: 1, category: Some("Saúde") },
            Campaign { id: 2, category: None },
        ];
        let participants: [Option<u32>; 0] = [];
        let err = group_by_category(
            &campaigns,
            &participants,
            |c| c.category.map(str::to_string),
            |c| Some(c.id),
            |p| *p,
            5,
        )
        .unwrap_err();
        assert_eq!(err, AggregateError::MissingGroupKey { position: 1 });
    }

    #[test]
    fn test_truncates_to_top_k() {
        let campaigns: Vec<Campaign> = ["A", "B", "C"]
            .iter()
            .enumerate()
            .map(|(i, c)| Campaign { id: i as u32, category: Some(*c) })
            .collect();
        let participants = [Some(2u32), Some(2), Some(0)];
        let buckets = group_by_category(
            &campaigns,
            &participants,
            |c| c.category.map(str::to_string),
            |c| Some(c.id),
            |p| *p,
            2,
        )
        .unwrap();
        let labels: Vec<&str> = buckets.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, ["C", "A"]);
    }
}
