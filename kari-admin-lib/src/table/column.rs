//! Column descriptors and rendered cells

use std::fmt;
use std::sync::Arc;

use crate::adapters::Badge;
use crate::adapters::Tone;

/// A rendered cell: display text plus an optional badge tone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub text: String,
    pub tone: Option<Tone>,
}

impl Cell {
    /// Placeholder for null, missing and empty values.
    pub const EMPTY: &'static str = "-";

    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: None,
        }
    }

    pub fn toned(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone: Some(tone),
        }
    }

    pub fn empty() -> Self {
        Self::plain(Self::EMPTY)
    }
}

impl From<Badge> for Cell {
    fn from(badge: Badge) -> Self {
        Self::toned(badge.label, badge.tone)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Width hint for a column. Renderers are free to ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnWidth {
    /// Fixed width in characters.
    Chars(u16),
    /// Share of the available width, in percent.
    Percent(u16),
}

type RenderFn<T> = Arc<dyn Fn(&T) -> Cell + Send + Sync>;

/// Describes one table column.
///
/// Without a render function the cell shows the field named by `key`,
/// coerced to a string.
///
/// # Example
///
/// ```
/// use kari_admin_lib::model::Record;
/// use kari_admin_lib::table::{Cell, ColumnSpec};
///
/// let votes = ColumnSpec::<Record>::new("votes", "Votos")
///     .sortable()
///     .render(|r| Cell::plain(format!("{} votos", r.get_int("votes").ok().flatten().unwrap_or(0))));
/// assert!(votes.is_sortable());
/// ```
pub struct ColumnSpec<T> {
    key: String,
    header: String,
    sortable: bool,
    render: Option<RenderFn<T>>,
    width: Option<ColumnWidth>,
}

impl<T> ColumnSpec<T> {
    pub fn new(key: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            header: header.into(),
            sortable: false,
            render: None,
            width: None,
        }
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Custom projection from row to cell. Must not have side effects.
    pub fn render<F>(mut self, render: F) -> Self
    where
        F: Fn(&T) -> Cell + Send + Sync + 'static,
    {
        self.render = Some(Arc::new(render));
        self
    }

    pub fn width(mut self, width: ColumnWidth) -> Self {
        self.width = Some(width);
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    pub fn width_hint(&self) -> Option<ColumnWidth> {
        self.width
    }

    pub(crate) fn render_fn(&self) -> Option<&RenderFn<T>> {
        self.render.as_ref()
    }
}

impl<T> Clone for ColumnSpec<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            header: self.header.clone(),
            sortable: self.sortable,
            render: self.render.clone(),
            width: self.width,
        }
    }
}

impl<T> fmt::Debug for ColumnSpec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnSpec")
            .field("key", &self.key)
            .field("header", &self.header)
            .field("sortable", &self.sortable)
            .field("custom_render", &self.render.is_some())
            .field("width", &self.width)
            .finish()
    }
}
