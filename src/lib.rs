//! Administrative dashboard for a cinema-management API.
//!
//! The `data` feature exposes the query model, pagination and the headless
//! page state. The `server` feature adds the API client, the response cache
//! and the Actix-web application rendering Tera templates.

pub mod domain;
pub mod pagination;
pub mod state;

#[cfg(feature = "server")]
pub mod cache;
#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
pub mod models;
#[cfg(feature = "server")]
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;

#[cfg(feature = "server")]
pub use server::{AppQueryClient, build_query_client, configure, run};

#[cfg(feature = "server")]
mod server {
    use actix_cors::Cors;
    use actix_files::Files;
    use actix_web::{App, HttpServer, middleware, web};
    use tera::Tera;

    use crate::cache::{MemoryCacheStore, QueryClient};
    use crate::models::config::ServerConfig;
    use crate::repository::http::HttpCinemaApi;
    use crate::routes::api::api_v1_resource;
    use crate::routes::main::show_overview;
    use crate::routes::not_found;
    use crate::routes::resources::{
        show_actors, show_movies, show_orders, show_schedules, show_tickets,
    };

    /// Query client shared by every worker.
    pub type AppQueryClient = QueryClient<HttpCinemaApi, MemoryCacheStore>;

    pub fn build_query_client(server_config: &ServerConfig) -> std::io::Result<AppQueryClient> {
        let api = HttpCinemaApi::new(
            server_config.api_base_url.clone(),
            server_config.request_timeout(),
        )
        .map_err(|e| std::io::Error::other(format!("Failed to build API client: {e}")))?;

        Ok(QueryClient::new(
            api,
            MemoryCacheStore::new(server_config.cache_capacity),
            server_config.cache_ttl(),
        ))
    }

    /// Registers the dashboard routes, without middleware or shared data.
    pub fn configure(cfg: &mut web::ServiceConfig) {
        cfg.service(web::scope("/api").service(api_v1_resource))
            .service(show_overview)
            .service(show_movies)
            .service(show_actors)
            .service(show_schedules)
            .service(show_tickets)
            .service(show_orders);
    }

    /// Builds and runs the Actix-Web HTTP server using the provided configuration.
    pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
        let client = web::Data::new(build_query_client(&server_config)?);

        let tera = Tera::new(&server_config.templates_dir)
            .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

        let bind_address = (server_config.address.clone(), server_config.port);
        log::info!(
            "Serving dashboard on {}:{} for {}",
            bind_address.0,
            bind_address.1,
            server_config.api_base_url
        );

        HttpServer::new(move || {
            App::new()
                .wrap(Cors::permissive())
                .wrap(middleware::Compress::default())
                .wrap(middleware::Logger::default())
                .service(Files::new("/assets", &server_config.assets_dir))
                .configure(configure)
                .default_service(web::to(not_found))
                .app_data(client.clone())
                .app_data(web::Data::new(tera.clone()))
                .app_data(web::Data::new(server_config.clone()))
        })
        .bind(bind_address)?
        .run()
        .await
    }
}
