//! Token issuance endpoints
//!
//! `/auth/token` returns a bearer token for API clients; `/auth/token/cookie`
//! additionally sets the token as an HTTP-only cookie for browser flows.

use crate::auth::{EndpointPolicy, PolicyRegistry};
use crate::models::user::{TokenRequest, TokenResponse, User};
use crate::server::AppState;
use crate::utils::error::{Result, SpaError};
use actix_web::cookie::{Cookie, SameSite, time::Duration};
use actix_web::{HttpResponse, web};
use tracing::info;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/token", web::post().to(issue_token))
            .route("/token/cookie", web::post().to(issue_token_cookie)),
    );
}

pub fn declare_policies(registry: &mut PolicyRegistry) {
    registry.declare("auth.token", EndpointPolicy::public());
    registry.declare("auth.token_cookie", EndpointPolicy::public());
}

/// Verify credentials against the directory and sign a token
fn issue_for_credentials(state: &AppState, request: &TokenRequest) -> Result<(User, String)> {
    let user = state
        .users
        .authenticate(&request.username, &request.password)
        .ok_or(SpaError::InvalidCredentials)?;

    let token = state.auth.issue_token(&user)?;
    info!("Issued token for user: {}", user.username);
    Ok((user, token))
}

/// POST /auth/token
async fn issue_token(
    state: web::Data<AppState>,
    body: web::Json<TokenRequest>,
) -> Result<HttpResponse> {
    let (_, token) = issue_for_credentials(&state, &body)?;
    Ok(HttpResponse::Ok().json(TokenResponse::bearer(token)))
}

/// POST /auth/token/cookie
///
/// Same issuance, but the token also travels back as an HTTP-only cookie so
/// browser clients need not manage the Authorization header themselves.
async fn issue_token_cookie(
    state: web::Data<AppState>,
    body: web::Json<TokenRequest>,
) -> Result<HttpResponse> {
    let (_, token) = issue_for_credentials(&state, &body)?;

    let ttl = state.auth.codec().ttl();
    let cookie = Cookie::build(state.settings.token_cookie.clone(), token.clone())
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .max_age(Duration::seconds(ttl as i64))
        .finish();

    Ok(HttpResponse::Ok()
        .cookie(cookie)
        .json(TokenResponse::bearer(token)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use actix_web::{App, test};

    fn test_state() -> web::Data<AppState> {
        let settings = Settings {
            jwt_secret: "auth-routes-test-secret-key-0123456789".to_string(),
            ..Settings::default()
        };
        web::Data::new(AppState::new(settings).unwrap())
    }

    #[actix_web::test]
    async fn test_token_issued_for_valid_credentials() {
        let state = test_state();
        let app = test::init_service(
            App::new()
                .app_data(state.clone())
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/auth/token")
            .set_json(serde_json::json!({ "username": "staff", "password": "spa-staff" }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["token_type"], "bearer");
        let claims = state
            .auth
            .codec()
            .verify(body["access_token"].as_str().unwrap())
            .unwrap();
        assert_eq!(claims.sub, "staff");
    }

    #[actix_web::test]
    async fn test_bad_credentials_rejected_with_401() {
        let app = test::init_service(
            App::new()
                .app_data(test_state())
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/auth/token")
            .set_json(serde_json::json!({ "username": "staff", "password": "wrong" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 401);
    }

    #[actix_web::test]
    async fn test_cookie_endpoint_sets_hardened_cookie() {
        let app = test::init_service(
            App::new()
                .app_data(test_state())
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/auth/token/cookie")
            .set_json(serde_json::json!({ "username": "celia", "password": "celia-cliente" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let cookie = resp
            .response()
            .cookies()
            .find(|c| c.name() == "spa_access_token")
            .unwrap();
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.max_age(), Some(Duration::seconds(3600)));
    }
}
