//! Query parameters shared by every list resource.
//!
//! Each resource owns a query type embedding [`BaseQuery`] and implementing
//! [`ResourceQuery`]. Fields are addressable by their wire key so that URL
//! query strings, filter inputs and the remote API all speak the same
//! vocabulary.
use std::collections::BTreeMap;
use std::fmt::Debug;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::domain::types::{DEFAULT_PAGE_SIZE, PAGE_SIZES, Resource, SortOrder};

pub const PAGE_KEY: &str = "page";
pub const TAKE_KEY: &str = "take";
pub const SEARCH_KEY: &str = "search";
pub const SORT_BY_KEY: &str = "sortBy";
pub const SORT_ORDER_KEY: &str = "sortOrder";

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Errors raised while setting query parameters.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("unknown query parameter: {0}")]
    UnknownKey(String),

    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },

    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),
}

impl QueryError {
    fn invalid(key: &str, value: &str) -> Self {
        QueryError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }
    }
}

/// How a filter field is edited and parsed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text, debounced while typing.
    Text,
    /// Calendar date, `YYYY-MM-DD`.
    Date,
    /// Local date and time, `YYYY-MM-DDTHH:MM`.
    DateTime,
    /// Boolean with display labels for `true` and `false`.
    Flag {
        on: &'static str,
        off: &'static str,
    },
    /// One of a fixed list of `(value, label)` pairs.
    Choice(&'static [(&'static str, &'static str)]),
}

impl FieldKind {
    /// Parses a raw input value. An empty (or blank) value clears the field.
    pub fn parse(self, key: &str, raw: &str) -> Result<Option<FilterValue>, QueryError> {
        let value = raw.trim();
        if value.is_empty() {
            return Ok(None);
        }

        let parsed = match self {
            FieldKind::Text => FilterValue::Text(value.to_string()),
            FieldKind::Date => {
                NaiveDate::parse_from_str(value, DATE_FORMAT)
                    .map_err(|_| QueryError::invalid(key, raw))?;
                FilterValue::Text(value.to_string())
            }
            FieldKind::DateTime => {
                NaiveDateTime::parse_from_str(value, DATE_TIME_FORMAT)
                    .map_err(|_| QueryError::invalid(key, raw))?;
                FilterValue::Text(value.to_string())
            }
            FieldKind::Flag { .. } => match value {
                "true" => FilterValue::Flag(true),
                "false" => FilterValue::Flag(false),
                _ => return Err(QueryError::invalid(key, raw)),
            },
            FieldKind::Choice(options) => {
                if !options.iter().any(|(option, _)| *option == value) {
                    return Err(QueryError::invalid(key, raw));
                }
                FilterValue::Text(value.to_string())
            }
        };

        Ok(Some(parsed))
    }

    pub fn is_free_text(self) -> bool {
        matches!(self, FieldKind::Text)
    }

    /// HTML input type used by the filter panel.
    pub fn input_type(self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Date => "date",
            FieldKind::DateTime => "datetime-local",
            FieldKind::Flag { .. } | FieldKind::Choice(_) => "select",
        }
    }
}

/// A resource-specific filter declared by a query type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FilterField {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

impl FilterField {
    pub const fn new(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self { key, label, kind }
    }
}

/// Parsed value of a filter field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FilterValue {
    Text(String),
    Flag(bool),
}

impl FilterValue {
    /// Wire representation sent to the API and placed in links.
    pub fn to_query_value(&self) -> String {
        match self {
            FilterValue::Text(text) => text.clone(),
            FilterValue::Flag(flag) => flag.to_string(),
        }
    }

    pub fn into_text(self) -> Option<String> {
        match self {
            FilterValue::Text(text) => Some(text),
            FilterValue::Flag(_) => None,
        }
    }

    pub fn into_flag(self) -> Option<bool> {
        match self {
            FilterValue::Flag(flag) => Some(flag),
            FilterValue::Text(_) => None,
        }
    }
}

fn validate_page_size(take: u32) -> Result<(), ValidationError> {
    if PAGE_SIZES.contains(&take) {
        Ok(())
    } else {
        Err(ValidationError::new("page_size"))
    }
}

/// Parameters common to every list resource.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BaseQuery {
    #[validate(range(min = 1))]
    pub page: u32,
    #[validate(custom(function = "validate_page_size"))]
    pub take: u32,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
}

impl Default for BaseQuery {
    fn default() -> Self {
        Self {
            page: 1,
            take: DEFAULT_PAGE_SIZE,
            search: None,
            sort_by: None,
            sort_order: None,
        }
    }
}

impl BaseQuery {
    /// Whether `key` addresses one of the common parameters.
    pub fn is_base_key(key: &str) -> bool {
        matches!(
            key,
            PAGE_KEY | TAKE_KEY | SEARCH_KEY | SORT_BY_KEY | SORT_ORDER_KEY
        )
    }

    /// Applies a header click: a new column sorts ascending, the active column flips.
    pub fn toggle_sort(&mut self, field: &str) {
        if self.sort_by.as_deref() == Some(field) {
            self.sort_order = Some(self.sort_order.unwrap_or_default().flipped());
        } else {
            self.sort_by = Some(field.to_string());
            self.sort_order = Some(SortOrder::Asc);
        }
        self.page = 1;
    }

    /// Sets a common parameter from its raw wire value.
    ///
    /// An empty value restores the default (`page`, `take`) or clears the
    /// field. The previous state is kept when validation fails.
    pub fn set(&mut self, key: &str, raw: &str) -> Result<(), QueryError> {
        let value = raw.trim();
        let previous = self.clone();

        match key {
            PAGE_KEY => {
                self.page = if value.is_empty() {
                    1
                } else {
                    value.parse().map_err(|_| QueryError::invalid(key, raw))?
                };
            }
            TAKE_KEY => {
                self.take = if value.is_empty() {
                    DEFAULT_PAGE_SIZE
                } else {
                    value.parse().map_err(|_| QueryError::invalid(key, raw))?
                };
            }
            SEARCH_KEY => self.search = non_empty(value),
            SORT_BY_KEY => self.sort_by = non_empty(value),
            SORT_ORDER_KEY => {
                self.sort_order = if value.is_empty() {
                    None
                } else {
                    Some(value.parse().map_err(|_| QueryError::invalid(key, raw))?)
                };
            }
            _ => return Err(QueryError::UnknownKey(key.to_string())),
        }

        if let Err(errors) = self.validate() {
            *self = previous;
            return Err(errors.into());
        }
        Ok(())
    }

    fn push_pairs(&self, pairs: &mut BTreeMap<&'static str, String>) {
        pairs.insert(PAGE_KEY, self.page.to_string());
        pairs.insert(TAKE_KEY, self.take.to_string());
        if let Some(search) = &self.search {
            pairs.insert(SEARCH_KEY, search.clone());
        }
        if let Some(sort_by) = &self.sort_by {
            pairs.insert(SORT_BY_KEY, sort_by.clone());
        }
        if let Some(sort_order) = self.sort_order {
            pairs.insert(SORT_ORDER_KEY, sort_order.to_string());
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

/// Query parameters of a single list resource.
pub trait ResourceQuery: Clone + Debug + Default + PartialEq + Send + Sync + 'static {
    /// Row type returned inside the paginated envelope.
    type Row: DeserializeOwned + Serialize + Clone + Debug + Send + Sync + 'static;

    const RESOURCE: Resource;

    /// Column keys the API accepts for `sortBy`.
    const SORT_KEYS: &'static [&'static str];

    fn base(&self) -> &BaseQuery;

    fn base_mut(&mut self) -> &mut BaseQuery;

    fn filter_fields() -> &'static [FilterField];

    fn filter_value(&self, key: &str) -> Option<FilterValue>;

    /// Stores an already parsed value. Unknown keys are ignored.
    fn set_filter_value(&mut self, key: &str, value: Option<FilterValue>);

    fn field(key: &str) -> Option<&'static FilterField> {
        Self::filter_fields().iter().find(|field| field.key == key)
    }

    /// Sets any parameter by wire key; empty values clear the field.
    fn set_param(&mut self, key: &str, raw: &str) -> Result<(), QueryError> {
        if key == SORT_BY_KEY {
            let value = raw.trim();
            if !value.is_empty() && !Self::SORT_KEYS.contains(&value) {
                return Err(QueryError::invalid(key, raw));
            }
        }
        if BaseQuery::is_base_key(key) {
            return self.base_mut().set(key, raw);
        }

        let field = Self::field(key).ok_or_else(|| QueryError::UnknownKey(key.to_string()))?;
        let value = field.kind.parse(key, raw)?;
        self.set_filter_value(key, value);
        Ok(())
    }

    /// Whether edits to `key` go through the free-text debounce window.
    fn is_debounced(key: &str) -> bool {
        key == SEARCH_KEY || Self::field(key).is_some_and(|field| field.kind.is_free_text())
    }

    /// Non-empty parameters keyed by wire name, sorted by key.
    ///
    /// `page` and `take` are always present. Equal parameter sets produce
    /// equal output regardless of how they were built.
    fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = BTreeMap::new();
        self.base().push_pairs(&mut pairs);
        for field in Self::filter_fields() {
            if let Some(value) = self.filter_value(field.key) {
                pairs.insert(field.key, value.to_query_value());
            }
        }
        pairs
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect()
    }

    /// Pairs for dashboard links. Unlike [`Self::to_query_pairs`], a field whose
    /// default is set but which is currently cleared is emitted empty so that
    /// [`Self::from_pairs`] restores the cleared state.
    fn link_pairs(&self) -> Vec<(String, String)> {
        let defaults = Self::default();
        let mut pairs = self.to_query_pairs();
        for field in Self::filter_fields() {
            if self.filter_value(field.key).is_none() && defaults.filter_value(field.key).is_some()
            {
                pairs.push((field.key.to_string(), String::new()));
            }
        }
        pairs.sort();
        pairs
    }

    /// Builds parameters from URL pairs on top of the resource defaults.
    ///
    /// Unknown keys are ignored; invalid values are rejected.
    fn from_pairs<I, K, V>(pairs: I) -> Result<Self, QueryError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut query = Self::default();
        for (key, value) in pairs {
            match query.set_param(key.as_ref(), value.as_ref()) {
                Ok(()) | Err(QueryError::UnknownKey(_)) => {}
                Err(err) => return Err(err),
            }
        }
        Ok(query)
    }

    /// Whether the search term or any filter differs from the resource default.
    fn has_filters(&self) -> bool {
        let defaults = Self::default();
        self.base().search.is_some()
            || Self::filter_fields()
                .iter()
                .any(|field| self.filter_value(field.key) != defaults.filter_value(field.key))
    }

    /// Resource defaults, used by "clear all filters".
    fn without_filters(&self) -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::movie::MovieQuery;
    use crate::domain::schedule::ScheduleQuery;
    use crate::domain::ticket::TicketQuery;

    #[test]
    fn defaults_include_page_and_take() {
        let query = MovieQuery::default();
        assert_eq!(
            query.to_query_pairs(),
            vec![
                ("page".to_string(), "1".to_string()),
                ("take".to_string(), "10".to_string()),
            ]
        );
    }

    #[test]
    fn empty_string_clears_filter() {
        let mut query = MovieQuery::default();
        query.set_param("director", "Nolan").unwrap();
        assert_eq!(query.director.as_deref(), Some("Nolan"));

        query.set_param("director", "").unwrap();
        assert_eq!(query.director, None);
        assert!(!query.to_query_pairs().iter().any(|(k, _)| k == "director"));
    }

    #[test]
    fn query_pairs_ignore_construction_order() {
        let mut first = MovieQuery::default();
        first.set_param("nation", "Mỹ").unwrap();
        first.set_param("search", "batman").unwrap();

        let mut second = MovieQuery::default();
        second.set_param("search", "batman").unwrap();
        second.set_param("nation", "Mỹ").unwrap();

        assert_eq!(first, second);
        assert_eq!(first.to_query_pairs(), second.to_query_pairs());
        let keys: Vec<_> = first.to_query_pairs().into_iter().map(|(key, _)| key).collect();
        assert_eq!(keys, ["nation", "page", "search", "take"]);
    }

    #[test]
    fn toggle_sort_sets_then_flips() {
        let mut base = BaseQuery {
            page: 4,
            ..BaseQuery::default()
        };
        base.toggle_sort("movie.name");
        assert_eq!(base.sort_by.as_deref(), Some("movie.name"));
        assert_eq!(base.sort_order, Some(SortOrder::Asc));
        assert_eq!(base.page, 1);

        base.toggle_sort("movie.name");
        assert_eq!(base.sort_order, Some(SortOrder::Desc));

        base.toggle_sort("movie.nation");
        assert_eq!(base.sort_by.as_deref(), Some("movie.nation"));
        assert_eq!(base.sort_order, Some(SortOrder::Asc));
    }

    #[test]
    fn invalid_page_size_is_rejected_and_state_kept() {
        let mut query = MovieQuery::default();
        let err = query.set_param("take", "15").unwrap_err();
        assert!(matches!(err, QueryError::Validation(_)));
        assert_eq!(query.base.take, 10);

        assert!(query.set_param("page", "0").is_err());
        assert_eq!(query.base.page, 1);

        query.set_param("take", "50").unwrap();
        assert_eq!(query.base.take, 50);
    }

    #[test]
    fn dates_and_choices_are_validated() {
        let mut query = ScheduleQuery::default();
        assert!(query.set_param("scheduleStartTime", "2024-05-01").is_err());
        query
            .set_param("scheduleStartTime", "2024-05-01T18:30")
            .unwrap();
        assert!(query.set_param("version_id", "7").is_err());
        query.set_param("version_id", "6").unwrap();
        query.set_param("is_deleted", "true").unwrap();
        assert_eq!(query.is_deleted, Some(true));
        assert!(query.set_param("is_deleted", "yes").is_err());
    }

    #[test]
    fn unknown_keys_are_rejected_when_set_and_ignored_when_parsed() {
        let mut query = MovieQuery::default();
        assert!(matches!(
            query.set_param("colour", "red"),
            Err(QueryError::UnknownKey(_))
        ));

        let parsed =
            MovieQuery::from_pairs([("colour", "red"), ("page", "2"), ("director", "")]).unwrap();
        assert_eq!(parsed.base.page, 2);
        assert_eq!(parsed.director, None);
    }

    #[test]
    fn sort_key_must_belong_to_resource() {
        let mut query = MovieQuery::default();
        assert!(query.set_param("sortBy", "order.total_prices").is_err());
        query.set_param("sortBy", "movie.name").unwrap();
        assert_eq!(query.base.sort_by.as_deref(), Some("movie.name"));
    }

    #[test]
    fn link_pairs_preserve_cleared_defaults() {
        let mut query = TicketQuery::default();
        query.set_param("active", "").unwrap();
        let pairs = query.link_pairs();
        assert!(pairs.contains(&("active".to_string(), String::new())));
        assert!(!query.to_query_pairs().iter().any(|(k, _)| k == "active"));

        let restored = TicketQuery::from_pairs(pairs).unwrap();
        assert_eq!(restored, query);
    }

    #[test]
    fn has_filters_compares_against_defaults() {
        let mut query = TicketQuery::default();
        assert!(!query.has_filters());
        query.set_param("is_used", "true").unwrap();
        assert!(query.has_filters());
        assert_eq!(query.without_filters(), TicketQuery::default());

        let mut movies = MovieQuery::default();
        movies.set_param("search", "  ").unwrap();
        assert!(!movies.has_filters());
        movies.set_param("search", "dune").unwrap();
        assert!(movies.has_filters());
    }

    #[test]
    fn search_and_text_fields_are_debounced() {
        assert!(MovieQuery::is_debounced("search"));
        assert!(MovieQuery::is_debounced("director"));
        assert!(!MovieQuery::is_debounced("fromDate"));
        assert!(!MovieQuery::is_debounced("page"));
        assert!(!TicketQuery::is_debounced("active"));
    }
}
