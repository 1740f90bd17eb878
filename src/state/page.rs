//! Headless page composer: committed parameters, fetch lifecycle and the
//! view derived from them.
use std::fmt::Display;
use std::time::{Duration, Instant};

use crate::domain::envelope::PageEnvelope;
use crate::domain::query::{QueryError, ResourceQuery};
use crate::pagination::PaginationView;
use crate::state::debounce::CommitPolicy;
use crate::state::filters::FilterPanel;
use crate::state::slot::QuerySlot;

/// Result of the most recent fetch.
#[derive(Clone, Debug, PartialEq)]
pub enum PageState<T> {
    Loading,
    Error { message: String },
    Ready { envelope: PageEnvelope<T> },
}

/// A fetch the driver has to perform for the controller.
#[derive(Clone, Debug, PartialEq)]
pub struct FetchRequest<Q> {
    pub ticket: u64,
    pub params: Q,
    /// Bypass fresh cache entries.
    pub force: bool,
}

/// Why a successful page has no rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmptyState {
    /// Nothing exists yet.
    NoData,
    /// Filters are active and nothing matches them.
    NoMatches,
}

#[derive(Debug, PartialEq)]
pub enum PageView<'a, T> {
    Loading,
    Error {
        message: &'a str,
    },
    Ready {
        rows: &'a [T],
        empty: Option<EmptyState>,
        pagination: Option<PaginationView>,
    },
}

pub struct PageController<Q: ResourceQuery> {
    params: Q,
    filters: FilterPanel<Q>,
    slot: QuerySlot,
    state: PageState<Q::Row>,
    pending: Option<FetchRequest<Q>>,
}

impl<Q: ResourceQuery> PageController<Q> {
    /// Mounts the page with the resource defaults and requests the first fetch.
    pub fn new(delay: Duration, policy: CommitPolicy) -> Self {
        Self::with_params(Q::default(), delay, policy)
    }

    pub fn with_params(params: Q, delay: Duration, policy: CommitPolicy) -> Self {
        let mut controller = Self {
            filters: FilterPanel::new(params.clone(), delay, policy),
            params,
            slot: QuerySlot::default(),
            state: PageState::Loading,
            pending: None,
        };
        controller.request(false);
        controller
    }

    pub fn params(&self) -> &Q {
        &self.params
    }

    pub fn state(&self) -> &PageState<Q::Row> {
        &self.state
    }

    pub fn filters(&self) -> &FilterPanel<Q> {
        &self.filters
    }

    /// Takes the outstanding fetch, if any.
    pub fn take_request(&mut self) -> Option<FetchRequest<Q>> {
        self.pending.take()
    }

    /// Applies a fetch result. Returns `false` when the ticket was superseded.
    pub fn finish_fetch<E: Display>(
        &mut self,
        ticket: u64,
        result: Result<PageEnvelope<Q::Row>, E>,
    ) -> bool {
        if !self.slot.is_current(ticket) {
            return false;
        }
        self.state = match result {
            Ok(envelope) => PageState::Ready { envelope },
            Err(err) => PageState::Error {
                message: err.to_string(),
            },
        };
        true
    }

    /// Adopts new committed parameters. Equal parameters do not refetch.
    pub fn commit(&mut self, params: Q) {
        if params == self.params {
            return;
        }
        self.filters.sync(params.clone());
        self.params = params;
        self.request(false);
    }

    /// Forwards a filter edit; commits when the panel says so.
    pub fn edit(&mut self, key: &str, raw: &str, now: Instant) -> Result<(), QueryError> {
        if let Some(params) = self.filters.input(key, raw, now)? {
            self.commit(params);
        }
        Ok(())
    }

    /// Drives the debounce window.
    pub fn tick(&mut self, now: Instant) {
        if let Some(params) = self.filters.tick(now) {
            self.commit(params);
        }
    }

    /// Navigates to `page`; ignored outside `[1, totalPages]` or before data arrived.
    pub fn change_page(&mut self, page: u32) {
        let PageState::Ready { envelope } = &self.state else {
            return;
        };
        let Some(view) = PaginationView::new(&envelope.meta, self.params.base().take) else {
            return;
        };
        if view.target(page).is_none_or(|page| page == self.params.base().page) {
            return;
        }
        let mut params = self.params.clone();
        params.base_mut().page = page;
        self.commit(params);
    }

    /// Header click on a sortable column.
    pub fn sort(&mut self, field: &str) -> Result<(), QueryError> {
        if !Q::SORT_KEYS.contains(&field) {
            return Err(QueryError::InvalidValue {
                key: "sortBy".to_string(),
                value: field.to_string(),
            });
        }
        let mut params = self.params.clone();
        params.base_mut().toggle_sort(field);
        self.commit(params);
        Ok(())
    }

    /// Resets to the resource defaults and always refetches.
    pub fn clear_filters(&mut self) {
        self.params = self.filters.clear();
        self.request(true);
    }

    /// Re-issues the failed request with the same parameters.
    pub fn retry(&mut self) {
        if matches!(self.state, PageState::Error { .. }) {
            self.request(true);
        }
    }

    pub fn reload(&mut self) {
        self.request(true);
    }

    pub fn view(&self) -> PageView<'_, Q::Row> {
        match &self.state {
            PageState::Loading => PageView::Loading,
            PageState::Error { message } => PageView::Error { message },
            PageState::Ready { envelope } => {
                let empty = envelope.is_empty().then(|| {
                    if self.params.has_filters() {
                        EmptyState::NoMatches
                    } else {
                        EmptyState::NoData
                    }
                });
                PageView::Ready {
                    rows: &envelope.data,
                    empty,
                    pagination: PaginationView::new(&envelope.meta, self.params.base().take),
                }
            }
        }
    }

    fn request(&mut self, force: bool) {
        self.state = PageState::Loading;
        self.pending = Some(FetchRequest {
            ticket: self.slot.issue(),
            params: self.params.clone(),
            force,
        });
    }
}
