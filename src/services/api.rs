use serde::Serialize;
use serde_json::Value;

use crate::cache::{CacheStore, FetchMode, QueryClient};
use crate::domain::actor::ActorQuery;
use crate::domain::movie::MovieQuery;
use crate::domain::order::OrderQuery;
use crate::domain::query::ResourceQuery;
use crate::domain::schedule::ScheduleQuery;
use crate::domain::ticket::TicketQuery;
use crate::domain::types::Resource;
use crate::repository::CinemaApi;
use crate::repository::errors::ApiError;
use crate::services::resource::{parse_query, wants_refresh};
use crate::services::{ServiceError, ServiceResult};

fn to_json<T: Serialize>(value: &T) -> ServiceResult<Value> {
    serde_json::to_value(value).map_err(|e| ServiceError::Api(ApiError::from(e)))
}

async fn page_json<Q, A, S>(client: &QueryClient<A, S>, query_string: &str) -> ServiceResult<Value>
where
    Q: ResourceQuery,
    A: CinemaApi,
    S: CacheStore,
{
    let request = parse_query::<Q>(query_string)?;
    let envelope = client
        .fetch_page(&request.params, FetchMode::from_force(request.refresh))
        .await?;
    to_json(&envelope)
}

/// Returns the cached JSON body for the resource addressed by `slug`.
///
/// List resources accept the same query string as their dashboard page;
/// overview resources ignore it apart from `refresh`.
pub async fn fetch_resource_json<A, S>(
    client: &QueryClient<A, S>,
    slug: &str,
    query_string: &str,
) -> ServiceResult<Value>
where
    A: CinemaApi,
    S: CacheStore,
{
    let resource: Resource = slug.parse()?;
    match resource {
        Resource::Movies => page_json::<MovieQuery, _, _>(client, query_string).await,
        Resource::Actors => page_json::<ActorQuery, _, _>(client, query_string).await,
        Resource::Schedules => page_json::<ScheduleQuery, _, _>(client, query_string).await,
        Resource::Tickets => page_json::<TicketQuery, _, _>(client, query_string).await,
        Resource::Orders => page_json::<OrderQuery, _, _>(client, query_string).await,
        Resource::TicketOverview => {
            let mode = FetchMode::from_force(wants_refresh(query_string));
            to_json(&client.ticket_overview(mode).await?)
        }
        Resource::OrderOverview => {
            let mode = FetchMode::from_force(wants_refresh(query_string));
            to_json(&client.order_overview(mode).await?)
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::cache::{DEFAULT_STALE_TIME, MemoryCacheStore};
    use crate::repository::test::StaticCinemaApi;

    fn client() -> QueryClient<StaticCinemaApi> {
        let api = StaticCinemaApi::new()
            .with_response(
                "/actor/admin",
                StaticCinemaApi::page_body(vec![json!({"id": 3, "name": "Trấn Thành"})], 1, 1),
            )
            .with_response(
                "/ticket/overview-ticket",
                json!({"totalTickets": 1, "totalAvailable": 1, "totalUsed": 0}),
            );
        QueryClient::new(api, MemoryCacheStore::default(), DEFAULT_STALE_TIME)
    }

    #[actix_web::test]
    async fn list_resources_return_the_envelope() {
        let client = client();
        let body = fetch_resource_json(&client, "actors", "gender=female")
            .await
            .unwrap();
        assert_eq!(body["data"][0]["name"], "Trấn Thành");
        assert_eq!(body["meta"]["totalPages"], 1);

        let (_, query) = &client.api().recorded_queries()[0];
        assert!(query.contains(&("gender".to_string(), "female".to_string())));
    }

    #[actix_web::test]
    async fn overview_resources_and_unknown_slugs() {
        let client = client();
        let body = fetch_resource_json(&client, "ticket-overview", "")
            .await
            .unwrap();
        assert_eq!(body["totalAvailable"], 1);

        let err = fetch_resource_json(&client, "popcorn", "").await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[actix_web::test]
    async fn invalid_parameters_are_rejected() {
        let err = fetch_resource_json(&client(), "actors", "gender=robot")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidQuery(_)));
    }
}
