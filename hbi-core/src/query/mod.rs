//! Search, filter and sort over in-memory record lists.
//!
//! A [`RecordQuery`] narrows a slice of [`Queryable`] records and orders the
//! survivors:
//!
//! 1. **Search**: the trimmed term must be a case-insensitive substring of at
//!    least one of the record's search fields. An empty term matches all.
//! 2. **Filters**: every filter whose value is not [`FilterValue::All`] must
//!    equal the record's facet of the same name.
//! 3. **Sort**: stable; text compares case-insensitively first, numbers
//!    numerically. Records without a value for the key go last.
//!
//! The pipeline never fails. An unknown sort key leaves the filtered order
//! untouched and an unknown filter key is ignored.

pub mod memo;
mod records;

pub use memo::QueryMemo;

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Value of a categorical filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterValue {
    /// Sentinel: the filter is inactive
    All,
    /// The facet must equal this value exactly
    Value(String),
}

impl FilterValue {
    /// Parse a UI selection. `"all"` in any case, or an empty string, is the
    /// sentinel.
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Value(trimmed.to_string())
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("desc") {
            Self::Desc
        } else {
            Self::Asc
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: String,
    pub direction: SortDirection,
}

/// Search term, filters and sort order for one table view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordQuery {
    pub search: String,
    pub filters: Vec<(String, FilterValue)>,
    pub sort: Option<SortSpec>,
}

impl RecordQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the search term.
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    /// Builder: add a filter from a raw UI selection.
    pub fn with_filter(mut self, key: impl Into<String>, value: &str) -> Self {
        self.filters.push((key.into(), FilterValue::parse(value)));
        self
    }

    /// Builder: sort by `key`.
    pub fn sorted_by(mut self, key: impl Into<String>, direction: SortDirection) -> Self {
        self.sort = Some(SortSpec {
            key: key.into(),
            direction,
        });
        self
    }

    /// True when the query neither narrows nor reorders.
    pub fn is_identity(&self) -> bool {
        self.search.trim().is_empty()
            && self.filters.iter().all(|(_, v)| v.is_all())
            && self.sort.is_none()
    }
}

/// A sortable field value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortValue<'a> {
    Text(&'a str),
    Number(f64),
}

impl SortValue<'_> {
    /// Ascending comparison. Numbers order before text when kinds differ.
    pub fn compare(&self, other: &SortValue<'_>) -> Ordering {
        match (self, other) {
            (SortValue::Text(a), SortValue::Text(b)) => locale_compare(a, b),
            (SortValue::Number(a), SortValue::Number(b)) => {
                a.partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            (SortValue::Number(_), SortValue::Text(_)) => Ordering::Less,
            (SortValue::Text(_), SortValue::Number(_)) => Ordering::Greater,
        }
    }
}

/// Case-insensitive comparison with a byte-order tie break.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    folded.then_with(|| a.cmp(b))
}

/// Records that can be searched, filtered and sorted by name.
pub trait Queryable {
    /// Facet names accepted by [`Queryable::facet`].
    const FACETS: &'static [&'static str];

    /// Sort keys accepted by [`Queryable::sort_value`].
    const SORT_KEYS: &'static [&'static str];

    /// Free-text fields the search term is matched against.
    fn search_fields(&self) -> Vec<&str>;

    /// Categorical value for a facet, if the record has one.
    fn facet(&self, key: &str) -> Option<&str>;

    /// Value for a sort key, if the record has one.
    fn sort_value(&self, key: &str) -> Option<SortValue<'_>>;
}

/// Indices of matching records in display order.
pub fn query_indices<T: Queryable>(records: &[T], query: &RecordQuery) -> Vec<usize> {
    let needle = query.search.trim().to_lowercase();

    let active_filters: Vec<(&str, &str)> = query
        .filters
        .iter()
        .filter_map(|(key, value)| match value {
            FilterValue::All => None,
            FilterValue::Value(v) => {
                if T::FACETS.contains(&key.as_str()) {
                    Some((key.as_str(), v.as_str()))
                } else {
                    debug!(filter = %key, "Ignoring unknown filter key");
                    None
                }
            }
        })
        .collect();

    let mut indices: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, record)| {
            let search_hit = needle.is_empty()
                || record
                    .search_fields()
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle));
            search_hit
                && active_filters
                    .iter()
                    .all(|(key, value)| record.facet(key) == Some(*value))
        })
        .map(|(index, _)| index)
        .collect();

    if let Some(sort) = &query.sort {
        if T::SORT_KEYS.contains(&sort.key.as_str()) {
            let key = sort.key.as_str();
            indices.sort_by(|&a, &b| {
                match (records[a].sort_value(key), records[b].sort_value(key)) {
                    (Some(x), Some(y)) => {
                        let ordering = x.compare(&y);
                        match sort.direction {
                            SortDirection::Asc => ordering,
                            SortDirection::Desc => ordering.reverse(),
                        }
                    }
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => Ordering::Equal,
                }
            });
        } else {
            debug!(sort_key = %sort.key, "Unknown sort key, keeping filtered order");
        }
    }

    indices
}

/// Apply a query, borrowing the matching records.
pub fn apply_query<'a, T: Queryable>(records: &'a [T], query: &RecordQuery) -> Vec<&'a T> {
    query_indices(records, query)
        .into_iter()
        .map(|index| &records[index])
        .collect()
}

/// Apply a query, cloning the matching records.
pub fn apply_query_owned<T: Queryable + Clone>(records: &[T], query: &RecordQuery) -> Vec<T> {
    apply_query(records, query).into_iter().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        name: &'static str,
        trade: &'static str,
        amount: Option<f64>,
    }

    impl Queryable for Row {
        const FACETS: &'static [&'static str] = &["trade"];
        const SORT_KEYS: &'static [&'static str] = &["name", "amount"];

        fn search_fields(&self) -> Vec<&str> {
            vec![self.name, self.trade]
        }

        fn facet(&self, key: &str) -> Option<&str> {
            match key {
                "trade" => Some(self.trade),
                _ => None,
            }
        }

        fn sort_value(&self, key: &str) -> Option<SortValue<'_>> {
            match key {
                "name" => Some(SortValue::Text(self.name)),
                "amount" => self.amount.map(SortValue::Number),
                _ => None,
            }
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            row("delta Drywall", "Drywall", Some(40.0)),
            row("Alpha Electric", "Electrical", Some(90.0)),
            row("Charlie Plumbing", "Plumbing", None),
            row("bravo Electric", "Electrical", Some(40.0)),
        ]
    }

    fn row(name: &'static str, trade: &'static str, amount: Option<f64>) -> Row {
        Row {
            name,
            trade,
            amount,
        }
    }

    fn names(result: &[&Row]) -> Vec<&'static str> {
        result.iter().map(|r| r.name).collect()
    }

    #[test]
    fn test_identity_with_all_sentinels() {
        let data = rows();
        let query = RecordQuery::new()
            .with_filter("trade", "all")
            .with_filter("trade", "All")
            .with_search("  ");
        assert!(query.is_identity());

        let result = apply_query(&data, &query);
        assert_eq!(result.len(), data.len());
        for (a, b) in result.iter().zip(data.iter()) {
            assert_eq!(*a, b);
        }
    }

    #[test]
    fn test_search_is_case_insensitive_or_across_fields() {
        let data = rows();
        let result = apply_query(&data, &RecordQuery::new().with_search("ELECTRIC"));
        assert_eq!(names(&result), vec!["Alpha Electric", "bravo Electric"]);

        let by_trade = apply_query(&data, &RecordQuery::new().with_search("plumb"));
        assert_eq!(names(&by_trade), vec!["Charlie Plumbing"]);
    }

    #[test]
    fn test_filters_and_search_combine() {
        let data = rows();
        let query = RecordQuery::new()
            .with_search("alpha")
            .with_filter("trade", "Electrical");
        assert_eq!(names(&apply_query(&data, &query)), vec!["Alpha Electric"]);

        let none = RecordQuery::new()
            .with_search("alpha")
            .with_filter("trade", "Plumbing");
        assert!(apply_query(&data, &none).is_empty());
    }

    #[test]
    fn test_text_sort_ignores_case() {
        let data = rows();
        let query = RecordQuery::new().sorted_by("name", SortDirection::Asc);
        assert_eq!(
            names(&apply_query(&data, &query)),
            vec!["Alpha Electric", "bravo Electric", "Charlie Plumbing", "delta Drywall"]
        );
    }

    #[test]
    fn test_numeric_sort_missing_values_last_and_stable_ties() {
        let data = rows();
        let asc = apply_query(&data, &RecordQuery::new().sorted_by("amount", SortDirection::Asc));
        assert_eq!(
            names(&asc),
            vec!["delta Drywall", "bravo Electric", "Alpha Electric", "Charlie Plumbing"]
        );

        let desc = apply_query(&data, &RecordQuery::new().sorted_by("amount", SortDirection::Desc));
        assert_eq!(
            names(&desc),
            vec!["Alpha Electric", "delta Drywall", "bravo Electric", "Charlie Plumbing"]
        );
    }

    #[test]
    fn test_reversal_law_without_ties() {
        let data = rows();
        let asc = apply_query(&data, &RecordQuery::new().sorted_by("name", SortDirection::Asc));
        let mut desc = apply_query(
            &data,
            &RecordQuery::new().sorted_by("name", SortDirection::Asc.reversed()),
        );
        desc.reverse();
        assert_eq!(names(&asc), names(&desc));
    }

    #[test]
    fn test_unknown_keys_never_fail() {
        let data = rows();
        let unknown_sort = RecordQuery::new().sorted_by("color", SortDirection::Desc);
        assert_eq!(apply_query(&data, &unknown_sort).len(), 4);
        assert_eq!(apply_query(&data, &unknown_sort)[0].name, "delta Drywall");

        let unknown_filter = RecordQuery::new().with_filter("color", "red");
        assert_eq!(apply_query(&data, &unknown_filter).len(), 4);
    }

    #[test]
    fn test_filter_value_parse() {
        assert_eq!(FilterValue::parse("ALL"), FilterValue::All);
        assert_eq!(FilterValue::parse(""), FilterValue::All);
        assert_eq!(
            FilterValue::parse("Electrical"),
            FilterValue::Value("Electrical".to_string())
        );
    }
}
