use crate::cache::{CacheStore, FetchMode, QueryClient};
use crate::dto::overview::{ChartCard, OVERVIEW_DESCRIPTION, OVERVIEW_TITLE, OverviewPageData};
use crate::dto::resource::ERROR_MESSAGE;
use crate::repository::CinemaApi;

/// Loads both overview charts. A failing chart renders its own error state
/// without affecting the other one.
pub async fn load_overview<A, S>(client: &QueryClient<A, S>, mode: FetchMode) -> OverviewPageData
where
    A: CinemaApi,
    S: CacheStore,
{
    let tickets = match client.ticket_overview(mode).await {
        Ok(overview) => ChartCard::from(&overview),
        Err(e) => ChartCard::ticket_error(format!("{ERROR_MESSAGE}: {e}")),
    };
    let orders = match client.order_overview(mode).await {
        Ok(overview) => ChartCard::from(&overview),
        Err(e) => ChartCard::order_error(format!("{ERROR_MESSAGE}: {e}")),
    };

    OverviewPageData {
        title: OVERVIEW_TITLE,
        description: OVERVIEW_DESCRIPTION,
        tickets,
        orders,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::cache::{DEFAULT_STALE_TIME, MemoryCacheStore};
    use crate::repository::errors::ApiError;
    use crate::repository::test::StaticCinemaApi;

    #[actix_web::test]
    async fn charts_fail_independently() {
        let api = StaticCinemaApi::new()
            .with_response(
                "/ticket/overview-ticket",
                json!({"totalTickets": 10, "totalAvailable": 7, "totalUsed": 3}),
            )
            .with_error(
                "/order/overview-order",
                ApiError::Transport("connection reset".to_string()),
            );
        let client = QueryClient::new(api, MemoryCacheStore::default(), DEFAULT_STALE_TIME);

        let page = load_overview(&client, FetchMode::Cached).await;
        assert!(page.tickets.error.is_none());
        assert_eq!(page.tickets.slices[0].percent, 70.0);
        assert_eq!(
            page.orders.error.as_deref(),
            Some("Có lỗi xảy ra khi tải dữ liệu: Transport error: connection reset")
        );
        assert!(page.orders.slices.is_empty());
    }

    #[actix_web::test]
    async fn refetch_mode_bypasses_fresh_entries() {
        let api = StaticCinemaApi::new()
            .with_response("/ticket/overview-ticket", json!({}))
            .with_response("/order/overview-order", json!({}));
        let client = QueryClient::new(api, MemoryCacheStore::default(), DEFAULT_STALE_TIME);

        load_overview(&client, FetchMode::Cached).await;
        load_overview(&client, FetchMode::Cached).await;
        assert_eq!(client.api().calls(), 2);

        let page = load_overview(&client, FetchMode::Refetch).await;
        assert_eq!(client.api().calls(), 4);
        assert!(page.tickets.empty);
        assert!(page.orders.empty);
    }
}
