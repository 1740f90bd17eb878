//! In-process stand-in for the remote cinema API.
#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use actix_web::{App, HttpResponse, HttpServer, web};
use serde_json::json;

pub const MOVIE_COUNT: u32 = 25;

/// Running stub API and the number of requests it has served per path.
pub struct StubApi {
    pub addr: SocketAddr,
    hits: Arc<HitCounter>,
}

#[derive(Default)]
struct HitCounter {
    movies: AtomicUsize,
    ticket_overview: AtomicUsize,
}

impl StubApi {
    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    pub fn movie_hits(&self) -> usize {
        self.hits.movies.load(Ordering::SeqCst)
    }

    pub fn ticket_overview_hits(&self) -> usize {
        self.hits.ticket_overview.load(Ordering::SeqCst)
    }
}

async fn movies(
    hits: web::Data<HitCounter>,
    query: web::Query<HashMap<String, String>>,
) -> HttpResponse {
    hits.movies.fetch_add(1, Ordering::SeqCst);
    let page: u32 = query.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    let take: u32 = query.get("take").and_then(|t| t.parse().ok()).unwrap_or(10);
    let search = query.get("search").cloned().unwrap_or_default();

    let matching: Vec<u32> = (1..=MOVIE_COUNT)
        .filter(|id| search.is_empty() || format!("Phim {id}").contains(&search))
        .collect();
    let rows: Vec<_> = matching
        .iter()
        .skip(((page - 1) * take) as usize)
        .take(take as usize)
        .map(|id| {
            json!({
                "id": id,
                "name": format!("Phim {id}"),
                "director": "Trấn Thành",
                "nation": "Việt Nam",
                "duration": 120,
                "from_date": "2024-02-10T00:00:00.000Z",
            })
        })
        .collect();
    let total = matching.len() as u32;

    HttpResponse::Ok().json(json!({
        "data": rows,
        "meta": {"total": total, "page": page, "totalPages": total.div_ceil(take)},
    }))
}

async fn actors() -> HttpResponse {
    HttpResponse::Ok().json(json!({"data": [], "meta": {"total": 0, "page": 1, "totalPages": 0}}))
}

async fn orders() -> HttpResponse {
    HttpResponse::InternalServerError().body("boom")
}

async fn ticket_overview(hits: web::Data<HitCounter>) -> HttpResponse {
    hits.ticket_overview.fetch_add(1, Ordering::SeqCst);
    HttpResponse::Ok().json(json!({"totalTickets": 200, "totalAvailable": 150, "totalUsed": 50}))
}

async fn order_overview() -> HttpResponse {
    HttpResponse::ServiceUnavailable().body("maintenance")
}

async fn schedules() -> HttpResponse {
    HttpResponse::Ok().body("<html>not json</html>")
}

/// Starts the stub on an ephemeral port inside the current actix runtime.
pub fn start_stub_api() -> StubApi {
    let hits = Arc::new(HitCounter::default());
    let data = web::Data::from(hits.clone());

    let server = HttpServer::new(move || {
        App::new().app_data(data.clone()).service(
            web::scope("/api")
                .route("/movies/admin", web::get().to(movies))
                .route("/actor/admin", web::get().to(actors))
                .route("/order/admin", web::get().to(orders))
                .route("/schedules/admin", web::get().to(schedules))
                .route("/ticket/overview-ticket", web::get().to(ticket_overview))
                .route("/order/overview-order", web::get().to(order_overview)),
        )
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .expect("bind stub api");

    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());

    StubApi { addr, hits }
}
