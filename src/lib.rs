//! Spa Manager API
//!
//! A demo spa-management backend built around a JWT role and scope
//! authorization layer. Requests carry a bearer token in the Authorization
//! header or a cookie; middleware resolves it to an [`auth::Identity`] and
//! each handler enforces the access policy declared for its endpoint.

pub mod auth;
pub mod config;
pub mod models;
pub mod server;
pub mod services;
pub mod utils;

pub use config::Settings;
pub use utils::error::{Result, SpaError};
