//! Access to the remote cinema-management API.
//!
//! The free functions here are the uncached client: every call reaches the
//! API. Pages go through [`crate::cache::QueryClient`], which shares
//! [`decode`] but keeps the raw body for later hits.
use std::future::Future;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::envelope::PageEnvelope;
use crate::domain::overview::{OrderOverview, TicketOverview};
use crate::domain::query::ResourceQuery;
use crate::domain::types::Resource;
use crate::repository::errors::ApiResult;

pub mod errors;
pub mod http;

/// One JSON `GET` against the API.
pub trait CinemaApi: Send + Sync {
    /// `path` is relative to the base URL; `query` pairs are sent as given.
    fn get_json(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> impl Future<Output = ApiResult<Value>> + Send;
}

/// Decodes an API body into its typed payload.
pub fn decode<T: DeserializeOwned>(value: Value) -> ApiResult<T> {
    Ok(serde_json::from_value(value)?)
}

async fn get_typed<A, T>(api: &A, resource: Resource, query: &[(String, String)]) -> ApiResult<T>
where
    A: CinemaApi + ?Sized,
    T: DeserializeOwned,
{
    decode(api.get_json(resource.api_path(), query).await?)
}

/// Fetches one page of `Q`'s resource without caching. `page` and `take` are
/// always sent.
pub async fn list_page<A, Q>(api: &A, params: &Q) -> ApiResult<PageEnvelope<Q::Row>>
where
    A: CinemaApi + ?Sized,
    Q: ResourceQuery,
{
    get_typed(api, Q::RESOURCE, &params.to_query_pairs()).await
}

pub async fn ticket_overview<A>(api: &A) -> ApiResult<TicketOverview>
where
    A: CinemaApi + ?Sized,
{
    get_typed(api, Resource::TicketOverview, &[]).await
}

pub async fn order_overview<A>(api: &A) -> ApiResult<OrderOverview>
where
    A: CinemaApi + ?Sized,
{
    get_typed(api, Resource::OrderOverview, &[]).await
}
