//! Stable sorting with nulls last

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::TableRow;
use crate::model::Value;

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    pub fn flip(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Arrow shown next to a sorted header.
    pub fn arrow(self) -> &'static str {
        match self {
            Self::Asc => "↑",
            Self::Desc => "↓",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => f.write_str("asc"),
            Self::Desc => f.write_str("desc"),
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(format!("unknown sort direction '{}'", other)),
        }
    }
}

/// Which column the table is sorted by.
///
/// With no column the direction is ignored and input order is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    pub column: Option<String>,
    pub direction: Direction,
}

impl SortState {
    /// Unsorted.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn by(column: impl Into<String>, direction: Direction) -> Self {
        Self {
            column: Some(column.into()),
            direction,
        }
    }

    pub fn asc(column: impl Into<String>) -> Self {
        Self::by(column, Direction::Asc)
    }

    pub fn desc(column: impl Into<String>) -> Self {
        Self::by(column, Direction::Desc)
    }

    /// Direction if the table is sorted by `column`.
    pub fn direction_for(&self, column: &str) -> Option<Direction> {
        (self.column.as_deref() == Some(column)).then_some(self.direction)
    }
}

/// Next sort state after a header click.
///
/// Clicking the sorted column flips the direction; any other column becomes
/// the sort column in ascending order.
pub fn toggle_sort(current: &SortState, clicked: &str) -> SortState {
    match current.direction_for(clicked) {
        Some(direction) => SortState::by(clicked, direction.flip()),
        None => SortState::asc(clicked),
    }
}

/// Sorts rows by the state's column.
///
/// The sort is stable. Missing and null values always go after every defined
/// value, in both directions. Returns references in the new order; the input
/// is left untouched.
pub fn sort<'a, T: TableRow>(records: &'a [T], state: &SortState) -> Vec<&'a T> {
    let mut ordered: Vec<&T> = records.iter().collect();

    let Some(column) = state.column.as_deref() else {
        return ordered;
    };

    ordered.sort_by(|a, b| compare_field(a.field(column), b.field(column), state.direction));
    ordered
}

fn compare_field(a: Option<&Value>, b: Option<&Value>, direction: Direction) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());

    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(x), Some(y)) => match direction {
            Direction::Asc => x.compare(y),
            Direction::Desc => y.compare(x),
        },
    }
}
