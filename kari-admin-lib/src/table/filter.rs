//! Search and field filters

use super::TableRow;

/// Value meaning "no filter" in the status and category selectors.
pub const ALL: &str = "all";

/// Row filter: free-text search plus exact field predicates.
///
/// The search is case-insensitive and matches when any of the search fields
/// contains the query. A filter with a search term but no search fields
/// matches nothing on its own; [`PagedTable`](super::PagedTable) searches its
/// column keys in that case. Predicates compare the field's display string
/// exactly; an empty value or [`ALL`] disables a predicate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    search: Option<String>,
    search_fields: Vec<String>,
    predicates: Vec<(String, String)>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fields the search term is matched against.
    pub fn search_in<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.set_search(term);
        self
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        let term = term.into().trim().to_lowercase();
        self.search = (!term.is_empty()).then_some(term);
    }

    /// Requires `field` to equal `value`.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Sets or replaces the predicate on `field`.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        let field = field.into();
        let value = value.into();
        self.predicates.retain(|(f, _)| *f != field);
        if !value.is_empty() && value != ALL {
            self.predicates.push((field, value));
        }
    }

    pub fn has_search_fields(&self) -> bool {
        !self.search_fields.is_empty()
    }

    /// `true` when the filter lets everything through.
    pub fn is_empty(&self) -> bool {
        self.search.is_none() && self.predicates.is_empty()
    }

    pub fn matches<T: TableRow>(&self, row: &T) -> bool {
        let search_ok = match &self.search {
            None => true,
            Some(term) => self.search_fields.iter().any(|key| {
                row.field(key)
                    .is_some_and(|v| v.to_string().to_lowercase().contains(term))
            }),
        };

        search_ok
            && self.predicates.iter().all(|(key, expected)| {
                row.field(key).is_some_and(|v| v.to_string() == *expected)
            })
    }

    /// Rows that match, in input order.
    pub fn apply<'a, T: TableRow>(&self, rows: &'a [T]) -> Vec<&'a T> {
        rows.iter().filter(|row| self.matches(*row)).collect()
    }
}
