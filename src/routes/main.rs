use actix_web::{HttpRequest, Responder, get, web};
use tera::Tera;

use crate::AppQueryClient;
use crate::cache::FetchMode;
use crate::routes::{base_context, render_template};
use crate::services::overview as overview_service;
use crate::services::resource::wants_refresh;

#[get("/")]
pub async fn show_overview(
    req: HttpRequest,
    client: web::Data<AppQueryClient>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mode = FetchMode::from_force(wants_refresh(req.query_string()));
    let data = overview_service::load_overview(client.get_ref(), mode).await;

    let mut context = base_context("overview");
    context.insert("page", &data);
    render_template(&tera, "overview/index.html", &context)
}
