//! Client registry endpoints

use crate::auth::{EndpointPolicy, PolicyRegistry, Role};
use crate::models::client::ClientCreate;
use crate::server::AppState;
use crate::utils::error::{Result, SpaError};
use actix_web::{HttpRequest, HttpResponse, web};
use tracing::info;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/clients")
            .route("", web::get().to(list_clients))
            .route("", web::post().to(create_client))
            .route("/{id}", web::get().to(get_client)),
    );
}

pub fn declare_policies(registry: &mut PolicyRegistry) {
    registry.declare("clients.list", EndpointPolicy::min_role(Role::Staff));
    registry.declare("clients.get", EndpointPolicy::min_role(Role::Staff));
    registry.declare(
        "clients.create",
        EndpointPolicy::min_role(Role::Manager).with_scope("clients:write"),
    );
}

/// GET /clients
async fn list_clients(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse> {
    state.auth.authorize(&req, "clients.list")?;
    Ok(HttpResponse::Ok().json(state.clients.list()))
}

/// GET /clients/{id}
async fn get_client(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<u32>,
) -> Result<HttpResponse> {
    state.auth.authorize(&req, "clients.get")?;

    let id = path.into_inner();
    let client = state
        .clients
        .get(id)
        .ok_or_else(|| SpaError::not_found(format!("Client {} not found", id)))?;
    Ok(HttpResponse::Ok().json(client))
}

/// POST /clients
async fn create_client(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<ClientCreate>,
) -> Result<HttpResponse> {
    let identity = state.auth.authorize(&req, "clients.create")?;

    let client = state.clients.create(body.into_inner());
    info!(
        "Client {} created by {}",
        client.id,
        identity.username().unwrap_or("-")
    );
    Ok(HttpResponse::Created().json(client))
}
