//! Staff management endpoints
//!
//! CRUD over staff members plus their service assignments and day agenda.
//! The agenda applies a cross-identity rule on top of the declared policy:
//! managers and administrative staff may read anyone's agenda, all other
//! staff only their own.

use crate::auth::{EndpointPolicy, Identity, PolicyRegistry, Role};
use crate::models::staff::{
    StaffKind, StaffMember, StaffMemberCreate, StaffMemberUpdate, StaffServiceAssignment,
    StaffStatusUpdate,
};
use crate::server::AppState;
use crate::utils::error::{Result, SpaError};
use actix_web::{HttpRequest, HttpResponse, web};
use tracing::info;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/staff")
            .route("", web::get().to(list_staff))
            .route("", web::post().to(create_staff))
            .route("/{id}", web::get().to(get_staff))
            .route("/{id}", web::put().to(update_staff))
            .route("/{id}/status", web::patch().to(update_staff_status))
            .route("/{id}/services", web::get().to(list_assignments))
            .route("/{id}/services", web::post().to(assign_service))
            .route("/{id}/agenda", web::get().to(staff_agenda)),
    );
}

pub fn declare_policies(registry: &mut PolicyRegistry) {
    registry.declare("staff.list", EndpointPolicy::min_role(Role::Manager));
    registry.declare("staff.get", EndpointPolicy::min_role(Role::Manager));
    registry.declare(
        "staff.create",
        EndpointPolicy::min_role(Role::Manager).with_scope("staff:manage"),
    );
    registry.declare(
        "staff.update",
        EndpointPolicy::min_role(Role::Manager).with_scope("staff:manage"),
    );
    registry.declare(
        "staff.update_status",
        EndpointPolicy::min_role(Role::Manager).with_scope("staff:manage"),
    );
    registry.declare(
        "staff.services_list",
        EndpointPolicy::min_role(Role::Manager),
    );
    registry.declare(
        "staff.services_assign",
        EndpointPolicy::min_role(Role::Manager).with_scope("staff:manage"),
    );
    registry.declare("staff.agenda", EndpointPolicy::min_role(Role::Staff));
}

fn find_member(state: &AppState, id: u32) -> Result<StaffMember> {
    state
        .staff
        .get(id)
        .ok_or_else(|| SpaError::not_found(format!("Staff member {} not found", id)))
}

/// GET /staff
async fn list_staff(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse> {
    state.auth.authorize(&req, "staff.list")?;
    Ok(HttpResponse::Ok().json(state.staff.list()))
}

/// GET /staff/{id}
async fn get_staff(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<u32>,
) -> Result<HttpResponse> {
    state.auth.authorize(&req, "staff.get")?;
    Ok(HttpResponse::Ok().json(find_member(&state, path.into_inner())?))
}

/// POST /staff
async fn create_staff(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<StaffMemberCreate>,
) -> Result<HttpResponse> {
    let identity = state.auth.authorize(&req, "staff.create")?;

    let member = state.staff.create(body.into_inner());
    info!(
        "Staff member {} created by {}",
        member.id,
        identity.username().unwrap_or("-")
    );
    Ok(HttpResponse::Created().json(member))
}

/// PUT /staff/{id}
async fn update_staff(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<u32>,
    body: web::Json<StaffMemberUpdate>,
) -> Result<HttpResponse> {
    state.auth.authorize(&req, "staff.update")?;

    let id = path.into_inner();
    let member = state
        .staff
        .update(id, body.into_inner())
        .ok_or_else(|| SpaError::not_found(format!("Staff member {} not found", id)))?;
    Ok(HttpResponse::Ok().json(member))
}

/// PATCH /staff/{id}/status
async fn update_staff_status(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<u32>,
    body: web::Json<StaffStatusUpdate>,
) -> Result<HttpResponse> {
    state.auth.authorize(&req, "staff.update_status")?;

    let id = path.into_inner();
    let member = state
        .staff
        .update_status(id, body.into_inner())
        .ok_or_else(|| SpaError::not_found(format!("Staff member {} not found", id)))?;
    Ok(HttpResponse::Ok().json(member))
}

/// GET /staff/{id}/services
async fn list_assignments(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<u32>,
) -> Result<HttpResponse> {
    state.auth.authorize(&req, "staff.services_list")?;

    let member = find_member(&state, path.into_inner())?;
    Ok(HttpResponse::Ok().json(state.staff.list_assignments(member.id)))
}

/// POST /staff/{id}/services
async fn assign_service(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<u32>,
    body: web::Json<StaffServiceAssignment>,
) -> Result<HttpResponse> {
    state.auth.authorize(&req, "staff.services_assign")?;

    let member = find_member(&state, path.into_inner())?;
    let assignment = body.into_inner();
    if assignment.staff_id != member.id {
        return Err(SpaError::bad_request(
            "Assignment staff_id does not match the path",
        ));
    }

    Ok(HttpResponse::Created().json(state.staff.upsert_assignment(assignment)))
}

/// GET /staff/{id}/agenda
///
/// The declared policy only demands staff level; whose agenda is readable
/// depends on who is asking.
async fn staff_agenda(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<u32>,
) -> Result<HttpResponse> {
    let identity = state.auth.authorize(&req, "staff.agenda")?;

    let member = find_member(&state, path.into_inner())?;
    if !can_view_agenda(&state, &identity, &member) {
        return Err(SpaError::forbidden("You can only view your own agenda"));
    }

    Ok(HttpResponse::Ok().json(state.appointments.list_for_staff(&member.name)))
}

/// Whether this identity may read the target member's agenda
///
/// Managers and above see everything. Below that, purely administrative
/// staff see everything while everyone else is limited to their own record,
/// matched by display name.
fn can_view_agenda(state: &AppState, identity: &Identity, target: &StaffMember) -> bool {
    if identity.has_role(Role::Manager) {
        return true;
    }

    let Some(viewer_name) = identity.full_name() else {
        return false;
    };
    if viewer_name == target.name {
        return true;
    }

    state
        .staff
        .list()
        .iter()
        .find(|m| m.name == viewer_name)
        .is_some_and(|m| matches!(m.kind, StaffKind::Administrative))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use std::collections::HashSet;

    fn test_state() -> AppState {
        AppState::new(Settings::default()).unwrap()
    }

    fn staff_identity(full_name: &str) -> Identity {
        Identity::Authenticated {
            username: "someone".to_string(),
            role: Role::Staff,
            scopes: HashSet::new(),
            full_name: Some(full_name.to_string()),
        }
    }

    #[test]
    fn test_manager_sees_any_agenda() {
        let state = test_state();
        let manager = Identity::Authenticated {
            username: "manager".to_string(),
            role: Role::Manager,
            scopes: HashSet::new(),
            full_name: None,
        };
        let sara = state.staff.get(1).unwrap();
        assert!(can_view_agenda(&state, &manager, &sara));
    }

    #[test]
    fn test_technical_staff_limited_to_own_agenda() {
        let state = test_state();
        let sara = state.staff.get(1).unwrap();
        let mark = state.staff.get(2).unwrap();

        let viewer = staff_identity("Sara Staff");
        assert!(can_view_agenda(&state, &viewer, &sara));
        assert!(!can_view_agenda(&state, &viewer, &mark));
    }

    #[test]
    fn test_administrative_staff_sees_all_agendas() {
        let state = test_state();
        let sara = state.staff.get(1).unwrap();

        // Mark's record is administrative
        let viewer = staff_identity("Mark Manager");
        assert!(can_view_agenda(&state, &viewer, &sara));
    }

    #[test]
    fn test_mixed_kind_staff_limited_to_own_agenda() {
        let state = test_state();
        let mixed = state.staff.create(crate::models::staff::StaffMemberCreate {
            name: "Mia Mixta".to_string(),
            sex: None,
            kind: StaffKind::Both,
            email: None,
            commission_eligible: false,
            monthly_salary: 0.0,
            active: true,
        });
        let sara = state.staff.get(1).unwrap();

        let viewer = staff_identity("Mia Mixta");
        assert!(can_view_agenda(&state, &viewer, &mixed));
        assert!(!can_view_agenda(&state, &viewer, &sara));
    }

    #[test]
    fn test_identity_without_name_sees_nothing_but_policy_allows() {
        let state = test_state();
        let sara = state.staff.get(1).unwrap();
        let viewer = Identity::Authenticated {
            username: "nameless".to_string(),
            role: Role::Staff,
            scopes: HashSet::new(),
            full_name: None,
        };
        assert!(!can_view_agenda(&state, &viewer, &sara));
    }
}
