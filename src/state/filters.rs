//! Filter panel bound to a debounced parameter set.
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::domain::query::{FieldKind, QueryError, ResourceQuery};
use crate::domain::types::PAGE_SIZES;
use crate::state::debounce::{CommitPolicy, DebouncedParams};

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct OptionView {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// One rendered filter input.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct FieldView {
    pub key: &'static str,
    pub label: &'static str,
    pub input: &'static str,
    pub value: String,
    pub debounced: bool,
    /// Options of a select, starting with the "all" entry.
    pub options: Vec<OptionView>,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct FilterPanelView {
    pub search: String,
    pub fields: Vec<FieldView>,
    pub take: u32,
    pub page_sizes: Vec<u32>,
    pub has_active_filters: bool,
    pub has_pending_changes: bool,
}

/// Edits local filter state and reports the commits it produces.
#[derive(Clone, Debug)]
pub struct FilterPanel<Q> {
    params: DebouncedParams<Q>,
}

impl<Q: ResourceQuery> FilterPanel<Q> {
    pub fn new(committed: Q, delay: Duration, policy: CommitPolicy) -> Self {
        Self {
            params: DebouncedParams::new(committed, delay, policy),
        }
    }

    /// Handles a change on the input bound to `key`.
    pub fn input(&mut self, key: &str, raw: &str, now: Instant) -> Result<Option<Q>, QueryError> {
        self.params.update_local_param(key, raw, now)
    }

    pub fn tick(&mut self, now: Instant) -> Option<Q> {
        self.params.poll(now)
    }

    /// Resets every filter to the resource defaults and commits at once.
    pub fn clear(&mut self) -> Q {
        let cleared = self.params.local_params().without_filters();
        self.params.sync_committed(cleared.clone());
        cleared
    }

    pub fn sync(&mut self, committed: Q) {
        self.params.sync_committed(committed);
    }

    pub fn local_params(&self) -> &Q {
        self.params.local_params()
    }

    pub fn pending_deadline(&self) -> Option<Instant> {
        self.params.pending_deadline()
    }

    pub fn has_active_filters(&self) -> bool {
        self.params.local_params().has_filters()
    }

    pub fn view(&self) -> FilterPanelView {
        build_view(self.params.local_params(), self.params.has_pending_changes())
    }
}

/// Renders the inputs for `params`.
pub fn build_view<Q: ResourceQuery>(params: &Q, has_pending_changes: bool) -> FilterPanelView {
    let fields = Q::filter_fields()
        .iter()
        .map(|field| {
            let value = params
                .filter_value(field.key)
                .map(|value| value.to_query_value())
                .unwrap_or_default();
            let options = match field.kind {
                FieldKind::Flag { on, off } => options_for(&value, &[("true", on), ("false", off)]),
                FieldKind::Choice(choices) => options_for(&value, choices),
                _ => Vec::new(),
            };
            FieldView {
                key: field.key,
                label: field.label,
                input: field.kind.input_type(),
                debounced: field.kind.is_free_text(),
                value,
                options,
            }
        })
        .collect();

    FilterPanelView {
        search: params.base().search.clone().unwrap_or_default(),
        fields,
        take: params.base().take,
        page_sizes: PAGE_SIZES.to_vec(),
        has_active_filters: params.has_filters(),
        has_pending_changes,
    }
}

fn options_for(current: &str, choices: &[(&str, &str)]) -> Vec<OptionView> {
    std::iter::once(("", "Tất cả"))
        .chain(choices.iter().copied())
        .map(|(value, label)| OptionView {
            value: value.to_string(),
            label: label.to_string(),
            selected: value == current,
        })
        .collect()
}
