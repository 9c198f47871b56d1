//! HTTP middleware implementations
//!
//! The authentication middleware resolves a request identity and attaches it
//! to the request extensions. It never rejects: a missing, malformed, or
//! expired token yields an anonymous identity, and the per-endpoint
//! authorization check decides whether that is acceptable.

use crate::auth::{Identity, jwt};
use crate::server::AppState;
use actix_web::HttpMessage;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::{http::header, web};
use futures::future::{Ready, ready};
use std::future::Future;
use std::pin::Pin;
use tracing::debug;

/// Paths served to documentation browsers without any token handling
const DOCS_PATHS: &[&str] = &["/docs", "/docs/oauth2-redirect", "/redoc", "/openapi.json"];

/// Authentication middleware for Actix-web
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService { service }))
    }
}

/// Service implementation for the authentication middleware
pub struct AuthMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let path = req.path().to_string();

        if !is_docs_path(&path) {
            let identity = resolve_identity(&req);
            if let Some(username) = identity.username() {
                debug!("Authenticated request to {} as {}", path, username);
            }
            req.extensions_mut().insert(identity);
        }

        let fut = self.service.call(req);
        Box::pin(async move {
            let res = fut.await?;
            Ok(res)
        })
    }
}

/// Resolve the request identity from the bearer header or the token cookie
///
/// Decode failures fall through to [`Identity::Anonymous`]; the verification
/// detail is logged inside the codec.
fn resolve_identity(req: &ServiceRequest) -> Identity {
    let Some(state) = req.app_data::<web::Data<AppState>>() else {
        return Identity::Anonymous;
    };

    let header_token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(jwt::token_from_header)
        .map(|t| t.to_string());

    let token = match header_token {
        Some(token) => Some(token),
        None => req
            .cookie(&state.settings.token_cookie)
            .map(|c| c.value().to_string()),
    };

    let Some(token) = token else {
        return Identity::Anonymous;
    };

    match state.auth.codec().verify(&token) {
        Ok(claims) => Identity::from(claims),
        Err(_) => Identity::Anonymous,
    }
}

/// Whether the path belongs to the interactive documentation surface
fn is_docs_path(path: &str) -> bool {
    DOCS_PATHS.contains(&path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Role, current_identity};
    use crate::config::Settings;
    use actix_web::{App, HttpRequest, HttpResponse, test};

    fn test_state() -> web::Data<AppState> {
        let settings = Settings {
            jwt_secret: "middleware-test-secret-key-0123456789ab".to_string(),
            ..Settings::default()
        };
        web::Data::new(AppState::new(settings).unwrap())
    }

    async fn whoami(req: HttpRequest) -> HttpResponse {
        let identity = current_identity(&req);
        HttpResponse::Ok().json(serde_json::json!({
            "anonymous": identity.is_anonymous(),
            "username": identity.username(),
        }))
    }

    #[actix_web::test]
    async fn test_bearer_header_attaches_identity() {
        let state = test_state();
        let token = state
            .auth
            .codec()
            .issue("sara", Role::Staff, &[], None)
            .unwrap();

        let app = test::init_service(
            App::new()
                .app_data(state)
                .wrap(AuthMiddleware)
                .route("/whoami", web::get().to(whoami)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/whoami")
            .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["anonymous"], false);
        assert_eq!(body["username"], "sara");
    }

    #[actix_web::test]
    async fn test_cookie_fallback_attaches_identity() {
        let state = test_state();
        let cookie_name = state.settings.token_cookie.clone();
        let token = state
            .auth
            .codec()
            .issue("celia", Role::Guest, &[], None)
            .unwrap();

        let app = test::init_service(
            App::new()
                .app_data(state)
                .wrap(AuthMiddleware)
                .route("/whoami", web::get().to(whoami)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/whoami")
            .insert_header((header::COOKIE, format!("{}={}", cookie_name, token)))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["anonymous"], false);
        assert_eq!(body["username"], "celia");
    }

    #[actix_web::test]
    async fn test_header_wins_over_cookie() {
        let state = test_state();
        let cookie_name = state.settings.token_cookie.clone();
        let header_token = state
            .auth
            .codec()
            .issue("sara", Role::Staff, &[], None)
            .unwrap();
        let cookie_token = state
            .auth
            .codec()
            .issue("celia", Role::Guest, &[], None)
            .unwrap();

        let app = test::init_service(
            App::new()
                .app_data(state)
                .wrap(AuthMiddleware)
                .route("/whoami", web::get().to(whoami)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/whoami")
            .insert_header((header::AUTHORIZATION, format!("Bearer {}", header_token)))
            .insert_header((header::COOKIE, format!("{}={}", cookie_name, cookie_token)))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["username"], "sara");
    }

    #[actix_web::test]
    async fn test_invalid_token_yields_anonymous_not_rejection() {
        let app = test::init_service(
            App::new()
                .app_data(test_state())
                .wrap(AuthMiddleware)
                .route("/whoami", web::get().to(whoami)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/whoami")
            .insert_header((header::AUTHORIZATION, "Bearer not.a.token"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["anonymous"], true);
    }

    #[actix_web::test]
    async fn test_missing_token_yields_anonymous() {
        let app = test::init_service(
            App::new()
                .app_data(test_state())
                .wrap(AuthMiddleware)
                .route("/whoami", web::get().to(whoami)),
        )
        .await;

        let req = test::TestRequest::get().uri("/whoami").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["anonymous"], true);
    }

    #[actix_web::test]
    async fn test_docs_paths_are_exact_matches() {
        assert!(is_docs_path("/docs"));
        assert!(is_docs_path("/openapi.json"));
        assert!(!is_docs_path("/docs/extra"));
        assert!(!is_docs_path("/clients"));
    }
}
