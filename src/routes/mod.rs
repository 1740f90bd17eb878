//! HTTP handlers of the dashboard.
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use serde::Serialize;
use tera::{Context, Tera};

use crate::dto::resource::LOADING_MESSAGE;

pub mod api;
pub mod main;
pub mod resources;

#[derive(Serialize)]
struct NavItem {
    href: &'static str,
    label: &'static str,
    active: bool,
}

const NAVIGATION: &[(&str, &str, &str)] = &[
    ("overview", "/", "Tổng quan"),
    ("movies", "/movies", "Phim"),
    ("actors", "/actors", "Diễn viên"),
    ("schedules", "/schedules", "Lịch chiếu"),
    ("tickets", "/tickets", "Vé"),
    ("orders", "/orders", "Đơn hàng"),
];

/// Context shared by every page: navigation and the loading message.
pub fn base_context(current_page: &str) -> Context {
    let navigation = NAVIGATION
        .iter()
        .map(|&(page, href, label)| NavItem {
            href,
            label,
            active: page == current_page,
        })
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("current_page", current_page);
    context.insert("navigation", &navigation);
    context.insert("loading_message", LOADING_MESSAGE);
    context
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    render_with_status(tera, StatusCode::OK, template, context)
}

pub fn render_with_status(
    tera: &Tera,
    status: StatusCode,
    template: &str,
    context: &Context,
) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::build(status)
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Fallback for every unmatched route.
pub async fn not_found(tera: web::Data<Tera>) -> HttpResponse {
    let context = base_context("not_found");
    render_with_status(&tera, StatusCode::NOT_FOUND, "main/not_found.html", &context)
}
