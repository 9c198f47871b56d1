//! Appointment endpoints

use crate::auth::{EndpointPolicy, PolicyRegistry, Role};
use crate::models::appointment::{AppointmentCreate, AppointmentStatusUpdate};
use crate::server::AppState;
use crate::utils::error::{Result, SpaError};
use actix_web::{HttpRequest, HttpResponse, web};
use tracing::info;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/appointments")
            .route("", web::get().to(list_appointments))
            .route("", web::post().to(create_appointment))
            .route("/{id}/status", web::patch().to(update_status)),
    );
}

pub fn declare_policies(registry: &mut PolicyRegistry) {
    registry.declare("appointments.list", EndpointPolicy::min_role(Role::Staff));
    registry.declare(
        "appointments.create",
        EndpointPolicy::min_role(Role::Manager).with_scope("appointments:write"),
    );
    registry.declare(
        "appointments.update_status",
        EndpointPolicy::min_role(Role::Staff).with_scope("appointments:write"),
    );
}

/// GET /appointments
async fn list_appointments(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    state.auth.authorize(&req, "appointments.list")?;
    Ok(HttpResponse::Ok().json(state.appointments.list()))
}

/// POST /appointments
async fn create_appointment(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<AppointmentCreate>,
) -> Result<HttpResponse> {
    let identity = state.auth.authorize(&req, "appointments.create")?;

    let appointment = state.appointments.create(body.into_inner());
    info!(
        "Appointment {} created by {}",
        appointment.id,
        identity.username().unwrap_or("-")
    );
    Ok(HttpResponse::Created().json(appointment))
}

/// PATCH /appointments/{id}/status
async fn update_status(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<u32>,
    body: web::Json<AppointmentStatusUpdate>,
) -> Result<HttpResponse> {
    state.auth.authorize(&req, "appointments.update_status")?;

    let id = path.into_inner();
    let appointment = state
        .appointments
        .update_status(id, body.into_inner())
        .ok_or_else(|| SpaError::not_found(format!("Appointment {} not found", id)))?;
    Ok(HttpResponse::Ok().json(appointment))
}
