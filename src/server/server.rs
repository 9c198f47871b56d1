//! HTTP server core implementation
//!
//! This module provides the HttpServer struct and its core methods.

use crate::config::Settings;
use crate::server::middleware::AuthMiddleware;
use crate::server::routes;
use crate::server::state::AppState;
use crate::utils::error::{Result, SpaError};
use actix_cors::Cors;
use actix_web::{
    App, HttpServer as ActixHttpServer,
    middleware::{DefaultHeaders, Logger},
    web,
};
use tracing::info;

/// HTTP server
pub struct HttpServer {
    /// Application state
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server
    pub fn new(settings: Settings) -> Result<Self> {
        info!("Creating HTTP server");
        let state = AppState::new(settings)?;
        Ok(Self { state })
    }

    /// Create the Actix-web application
    fn create_app(
        state: web::Data<AppState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .app_data(state)
            .wrap(AuthMiddleware)
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(DefaultHeaders::new().add(("Server", "spa-manager")))
            .configure(routes::configure)
    }

    /// Start the HTTP server
    pub async fn start(self) -> Result<()> {
        let settings = &self.state.settings;
        let bind_addr = format!("{}:{}", settings.host, settings.port);

        info!("Starting HTTP server on {}", bind_addr);

        let state = web::Data::new(self.state);

        let server = ActixHttpServer::new(move || Self::create_app(state.clone()))
            .bind(&bind_addr)
            .map_err(|e| SpaError::config(format!("Failed to bind {}: {}", bind_addr, e)))?
            .run();

        info!("HTTP server listening on {}", bind_addr);

        server
            .await
            .map_err(|e| SpaError::internal(format!("Server error: {}", e)))?;

        info!("HTTP server stopped");
        Ok(())
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}

/// Load settings from the environment and run the server to completion
pub async fn run_server() -> Result<()> {
    let settings = Settings::from_env()?;
    info!("{} starting up", settings.app_name);

    HttpServer::new(settings)?.start().await
}
