use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Responder, get, web};
use tera::Tera;

use crate::AppQueryClient;
use crate::domain::actor::ActorQuery;
use crate::domain::movie::MovieQuery;
use crate::domain::order::OrderQuery;
use crate::domain::schedule::ScheduleQuery;
use crate::domain::ticket::TicketQuery;
use crate::dto::resource::ResourcePage;
use crate::models::config::ServerConfig;
use crate::routes::{base_context, render_with_status};
use crate::services::ServiceError;
use crate::services::resource as resource_service;

async fn show_resource<Q: ResourcePage>(
    req: &HttpRequest,
    client: &AppQueryClient,
    tera: &Tera,
    server_config: &ServerConfig,
) -> HttpResponse {
    let result = resource_service::load_resource_page::<Q, _, _>(
        client,
        req.query_string(),
        server_config.page_options(),
    )
    .await;

    match result {
        Ok(data) => {
            // Failed fetches still render filters and the retry link.
            let status = if data.is_error() {
                StatusCode::BAD_GATEWAY
            } else {
                StatusCode::OK
            };
            let mut context = base_context(Q::RESOURCE.slug());
            context.insert("page", &data);
            render_with_status(tera, status, "resources/index.html", &context)
        }
        Err(ServiceError::InvalidQuery(err)) => {
            log::warn!("Rejected {} query: {err}", Q::RESOURCE);
            HttpResponse::BadRequest().body(err.to_string())
        }
        Err(err) => {
            log::error!("Failed to load {} page: {err}", Q::RESOURCE);
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/movies")]
pub async fn show_movies(
    req: HttpRequest,
    client: web::Data<AppQueryClient>,
    tera: web::Data<Tera>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    show_resource::<MovieQuery>(&req, &client, &tera, &server_config).await
}

#[get("/actors")]
pub async fn show_actors(
    req: HttpRequest,
    client: web::Data<AppQueryClient>,
    tera: web::Data<Tera>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    show_resource::<ActorQuery>(&req, &client, &tera, &server_config).await
}

#[get("/schedules")]
pub async fn show_schedules(
    req: HttpRequest,
    client: web::Data<AppQueryClient>,
    tera: web::Data<Tera>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    show_resource::<ScheduleQuery>(&req, &client, &tera, &server_config).await
}

#[get("/tickets")]
pub async fn show_tickets(
    req: HttpRequest,
    client: web::Data<AppQueryClient>,
    tera: web::Data<Tera>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    show_resource::<TicketQuery>(&req, &client, &tera, &server_config).await
}

#[get("/orders")]
pub async fn show_orders(
    req: HttpRequest,
    client: web::Data<AppQueryClient>,
    tera: web::Data<Tera>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    show_resource::<OrderQuery>(&req, &client, &tera, &server_config).await
}
