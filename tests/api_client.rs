use std::time::Duration;

use cinema_admin::domain::movie::MovieQuery;
use cinema_admin::domain::query::ResourceQuery;
use cinema_admin::domain::schedule::ScheduleQuery;
use cinema_admin::repository::errors::ApiError;
use cinema_admin::repository::http::HttpCinemaApi;
use cinema_admin::repository::{list_page, order_overview, ticket_overview};

mod common;

fn api(base_url: String) -> HttpCinemaApi {
    HttpCinemaApi::new(base_url, Duration::from_secs(5)).unwrap()
}

#[actix_web::test]
async fn list_page_sends_parameters_and_decodes_envelope() {
    let stub = common::start_stub_api();
    let api = api(stub.base_url());

    let params = MovieQuery::from_pairs([("page", "3"), ("take", "10")]).unwrap();
    let envelope = list_page(&api, &params).await.unwrap();

    assert_eq!(envelope.data.len(), 5);
    assert_eq!(envelope.data[0].name, "Phim 21");
    assert_eq!(envelope.meta.total, 25);
    assert_eq!(envelope.meta.total_pages, 3);
}

#[actix_web::test]
async fn search_is_forwarded() {
    let stub = common::start_stub_api();
    let api = api(stub.base_url());

    let params = MovieQuery::from_pairs([("search", "Phim 2")]).unwrap();
    let envelope = list_page(&api, &params).await.unwrap();
    // "Phim 2" and "Phim 20" through "Phim 25".
    assert_eq!(envelope.meta.total, 7);
}

#[actix_web::test]
async fn overviews_decode_camel_case() {
    let stub = common::start_stub_api();
    let api = api(format!("{}/", stub.base_url()));

    let overview = ticket_overview(&api).await.unwrap();
    assert_eq!(overview.total_tickets, 200);
    assert_eq!(overview.total_used, 50);
}

#[actix_web::test]
async fn non_success_status_keeps_the_body() {
    let stub = common::start_stub_api();
    let api = api(stub.base_url());

    let err = order_overview(&api).await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Http {
            status: 503,
            body: "maintenance".to_string()
        }
    );
}

#[actix_web::test]
async fn non_json_body_is_a_decode_error() {
    let stub = common::start_stub_api();
    let api = api(stub.base_url());

    let err = list_page(&api, &ScheduleQuery::default()).await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)), "{err:?}");
}

#[actix_web::test]
async fn unreachable_host_is_a_transport_error() {
    // Port 9 (discard) is closed on test hosts.
    let api = api("http://127.0.0.1:9/api".to_string());
    let err = ticket_overview(&api).await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)), "{err:?}");
}
