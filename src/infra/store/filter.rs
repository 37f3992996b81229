//! Backend-neutral query expressions.
//!
//! A [`Query`] is a conjunction of [`Filter`]s plus an optional sort. Each
//! backend translates it natively; [`Query::matches`] and [`compare`] are the
//! reference semantics, used directly by the in-memory store.

use std::cmp::Ordering;

use serde_json::Value;

use super::Document;

/// A predicate over one top-level document field.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Field equals the value (numbers compare numerically).
    Eq(String, Value),
    /// Field lies within the inclusive bounds. Both bounds must share the
    /// field's JSON type (number or string) to match.
    Range {
        field: String,
        gte: Option<Value>,
        lte: Option<Value>,
    },
    /// Case-insensitive substring match on a string field.
    Contains(String, String),
    /// At least one of the nested filters matches.
    Any(Vec<Filter>),
}

impl Filter {
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Eq(field.into(), value.into())
    }

    pub fn range(field: impl Into<String>, gte: Option<Value>, lte: Option<Value>) -> Self {
        Filter::Range {
            field: field.into(),
            gte,
            lte,
        }
    }

    pub fn contains(field: impl Into<String>, needle: impl Into<String>) -> Self {
        Filter::Contains(field.into(), needle.into())
    }

    pub fn any(filters: Vec<Filter>) -> Self {
        Filter::Any(filters)
    }

    /// Evaluate against a document.
    pub fn matches(&self, doc: &Document) -> bool {
        match self {
            Filter::Eq(field, expected) => doc
                .get(field)
                .map_or(false, |actual| values_equal(actual, expected)),
            Filter::Range { field, gte, lte } => {
                let Some(actual) = doc.get(field) else {
                    return false;
                };
                let lower = gte.as_ref().map_or(true, |bound| {
                    matches!(
                        compare(actual, bound),
                        Some(Ordering::Greater | Ordering::Equal)
                    )
                });
                let upper = lte.as_ref().map_or(true, |bound| {
                    matches!(
                        compare(actual, bound),
                        Some(Ordering::Less | Ordering::Equal)
                    )
                });
                lower && upper
            }
            Filter::Contains(field, needle) => match doc.get(field) {
                Some(Value::String(haystack)) => haystack
                    .to_lowercase()
                    .contains(&needle.to_lowercase()),
                _ => false,
            },
            Filter::Any(filters) => filters.iter().any(|f| f.matches(doc)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub field: String,
    pub direction: SortDirection,
}

/// Conjunction of filters with an optional sort.
///
/// Without a sort, results come back in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    filters: Vec<Filter>,
    sort: Option<Sort>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Match a single document by its logical id.
    pub fn by_id(id: &str) -> Self {
        Self::new().filter(Filter::eq("id", id))
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Add an equality filter when the value is present.
    pub fn eq_opt<V: Into<Value>>(self, field: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.filter(Filter::eq(field, value)),
            None => self,
        }
    }

    /// Add a range filter when at least one bound is present.
    pub fn range_opt(self, field: &str, gte: Option<Value>, lte: Option<Value>) -> Self {
        if gte.is_none() && lte.is_none() {
            self
        } else {
            self.filter(Filter::range(field, gte, lte))
        }
    }

    pub fn sort_by(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort = Some(Sort {
            field: field.into(),
            direction,
        });
        self
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn sort(&self) -> Option<&Sort> {
        self.sort.as_ref()
    }

    pub fn matches(&self, doc: &Document) -> bool {
        self.filters.iter().all(|f| f.matches(doc))
    }

    /// Order two documents by the query's sort field.
    ///
    /// Missing or incomparable values order after everything else, so they
    /// lead in descending order.
    pub fn order(&self, a: &Document, b: &Document) -> Ordering {
        let Some(sort) = &self.sort else {
            return Ordering::Equal;
        };
        let ordering = match (sort_key(a, &sort.field), sort_key(b, &sort.field)) {
            (Some(x), Some(y)) => compare(x, y).unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        match sort.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

fn sort_key<'a>(doc: &'a Document, field: &str) -> Option<&'a Value> {
    doc.get(field).filter(|v| !v.is_null())
}

fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        _ => a == b,
    }
}

/// Compare two JSON scalars of the same kind.
///
/// Numbers compare numerically, strings lexicographically (timestamps are
/// stored fixed-width so this is chronological). Anything else is
/// incomparable.
fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64()?.partial_cmp(&y.as_f64()?),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        _ => None,
    }
}
