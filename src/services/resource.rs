use std::time::Duration;

use crate::cache::{CacheStore, QueryClient};
use crate::domain::query::{QueryError, ResourceQuery, SORT_BY_KEY, SORT_ORDER_KEY};
use crate::dto::resource::{
    ERROR_MESSAGE, EmptyView, ErrorView, HiddenInput, NO_MATCH_HINT, PageLink, PaginationLinks,
    ResourcePage, ResourcePageData, href,
};
use crate::dto::table::build_table;
use crate::pagination::PaginationView;
use crate::repository::CinemaApi;
use crate::services::ServiceResult;
use crate::state::debounce::CommitPolicy;
use crate::state::filters::build_view;
use crate::state::page::{EmptyState, PageController, PageView};

/// Query key set by the "try again" link to bypass the cache.
pub const REFRESH_KEY: &str = "refresh";

/// Filter behaviour shared by every list page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageOptions {
    pub debounce: Duration,
    pub policy: CommitPolicy,
}

/// Parameters committed through a list page URL.
#[derive(Clone, Debug, PartialEq)]
pub struct PageRequest<Q> {
    pub params: Q,
    pub refresh: bool,
}

/// Parses a raw URL query string on top of the resource defaults.
///
/// Unknown keys are ignored, empty values clear a field and invalid values
/// are rejected.
pub fn parse_query<Q: ResourceQuery>(query_string: &str) -> Result<PageRequest<Q>, QueryError> {
    let pairs: Vec<(String, String)> =
        serde_html_form::from_str(query_string).map_err(|e| QueryError::InvalidValue {
            key: "query".to_string(),
            value: e.to_string(),
        })?;

    let refresh = is_refresh(&pairs);
    let params = Q::from_pairs(pairs.into_iter().filter(|(key, _)| key != REFRESH_KEY))?;

    Ok(PageRequest { params, refresh })
}

fn is_refresh(pairs: &[(String, String)]) -> bool {
    pairs
        .iter()
        .any(|(key, value)| key == REFRESH_KEY && matches!(value.as_str(), "1" | "true"))
}

/// Whether `query_string` asks to bypass the cache. Malformed strings do not.
pub fn wants_refresh(query_string: &str) -> bool {
    serde_html_form::from_str::<Vec<(String, String)>>(query_string)
        .is_ok_and(|pairs| is_refresh(&pairs))
}

fn page_href<Q: ResourcePage>(params: &Q, page: u32) -> String {
    let mut target = params.clone();
    target.base_mut().page = page;
    href(&Q::path(), &target)
}

fn pagination_links<Q: ResourcePage>(params: &Q, view: &PaginationView) -> PaginationLinks {
    PaginationLinks {
        summary: view.summary(),
        previous_href: view.previous.map(|page| page_href(params, page)),
        next_href: view.next.map(|page| page_href(params, page)),
        pages: view
            .pages
            .iter()
            .map(|number| PageLink {
                number: *number,
                href: number.map(|page| page_href(params, page)),
                current: *number == Some(view.page),
            })
            .collect(),
    }
}

/// Hidden inputs keeping the active sort when the filter form is submitted.
fn sort_inputs<Q: ResourceQuery>(params: &Q) -> Vec<HiddenInput> {
    let base = params.base();
    let mut hidden = Vec::new();
    if let Some(sort_by) = &base.sort_by {
        hidden.push(HiddenInput {
            name: SORT_BY_KEY.to_string(),
            value: sort_by.clone(),
        });
        hidden.push(HiddenInput {
            name: SORT_ORDER_KEY.to_string(),
            value: base.sort_order.unwrap_or_default().to_string(),
        });
    }
    hidden
}

/// Fetches the page committed in `query_string` and composes its view.
///
/// Fetch failures do not fail the call: they are rendered as the page's
/// error state so that the route can still show filters and a retry link.
pub async fn load_resource_page<Q, A, S>(
    client: &QueryClient<A, S>,
    query_string: &str,
    options: PageOptions,
) -> ServiceResult<ResourcePageData>
where
    Q: ResourcePage,
    A: CinemaApi,
    S: CacheStore,
{
    let PageRequest { params, refresh } = parse_query::<Q>(query_string)?;

    let mut page = PageController::with_params(params, options.debounce, options.policy);
    if refresh {
        page.reload();
    }
    client.drive_page(&mut page).await;

    let params = page.params().clone();
    let path = Q::path();
    let clear_href = href(&path, &params.without_filters());

    let mut data = ResourcePageData {
        resource: Q::RESOURCE.slug(),
        path: path.clone(),
        title: Q::TITLE,
        description: Q::DESCRIPTION,
        search_label: Q::SEARCH_LABEL,
        search_placeholder: Q::SEARCH_PLACEHOLDER,
        filters: build_view(&params, false),
        hidden: sort_inputs(&params),
        table: None,
        error: None,
        empty: None,
        pagination: None,
        clear_href: clear_href.clone(),
        debounce_ms: u64::try_from(options.debounce.as_millis()).unwrap_or(u64::MAX),
        commit_policy: options.policy,
    };

    match page.view() {
        PageView::Ready {
            rows,
            empty,
            pagination,
        } => {
            data.table = Some(build_table(&params, rows, |next| href(&path, next)));
            data.empty = empty.map(|state| match state {
                EmptyState::NoData => EmptyView {
                    title: Q::EMPTY_TITLE,
                    message: Q::NO_DATA_MESSAGE,
                    clear_href: None,
                },
                EmptyState::NoMatches => EmptyView {
                    title: Q::EMPTY_TITLE,
                    message: NO_MATCH_HINT,
                    clear_href: Some(clear_href),
                },
            });
            data.pagination = pagination.map(|view| pagination_links(&params, &view));
        }
        PageView::Error { message } => {
            data.error = Some(ErrorView {
                message: ERROR_MESSAGE,
                detail: message.to_string(),
                retry_href: format!("{}&{REFRESH_KEY}=1", href(&path, &params)),
            });
        }
        PageView::Loading => {
            log::warn!("{} page still loading after fetch", Q::RESOURCE);
        }
    }

    Ok(data)
}
