use actix_web::{HttpRequest, HttpResponse, Responder, get, web};
use serde_json::json;

use crate::AppQueryClient;
use crate::services::ServiceError;
use crate::services::api as api_service;

#[get("/v1/{resource}")]
pub async fn api_v1_resource(
    req: HttpRequest,
    resource: web::Path<String>,
    client: web::Data<AppQueryClient>,
) -> impl Responder {
    match api_service::fetch_resource_json(client.get_ref(), &resource, req.query_string()).await {
        Ok(body) => HttpResponse::Ok().json(body),
        Err(ServiceError::NotFound(err)) => {
            HttpResponse::NotFound().json(json!({ "error": err.to_string() }))
        }
        Err(ServiceError::InvalidQuery(err)) => {
            HttpResponse::BadRequest().json(json!({ "error": err.to_string() }))
        }
        Err(ServiceError::Api(err)) => {
            log::error!("Failed to proxy {resource}: {err}");
            HttpResponse::BadGateway().json(json!({ "error": err.to_string() }))
        }
    }
}
