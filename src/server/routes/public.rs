//! Public endpoints: health check and the service catalog

use crate::auth::{EndpointPolicy, PolicyRegistry};
use crate::server::AppState;
use crate::utils::error::Result;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Serialize;

/// A bookable spa service
#[derive(Debug, Clone, Serialize)]
struct SpaService {
    id: u32,
    name: &'static str,
    duration_min: u32,
    price: f64,
}

const CATALOG: &[SpaService] = &[
    SpaService {
        id: 1,
        name: "Signature Facial",
        duration_min: 60,
        price: 140.0,
    },
    SpaService {
        id: 2,
        name: "Hot Stone Massage",
        duration_min: 90,
        price: 180.0,
    },
    SpaService {
        id: 3,
        name: "Body Scrub",
        duration_min: 45,
        price: 95.0,
    },
];

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/public")
            .route("/health", web::get().to(health_check))
            .route("/services", web::get().to(list_services)),
    );
}

pub fn declare_policies(registry: &mut PolicyRegistry) {
    registry.declare("public.health", EndpointPolicy::public());
    registry.declare("public.services", EndpointPolicy::public());
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "app": state.settings.app_name,
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Service catalog, readable by anyone including anonymous visitors
async fn list_services(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    state.auth.authorize(&req, "public.services")?;
    Ok(HttpResponse::Ok().json(CATALOG))
}
