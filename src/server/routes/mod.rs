//! Route registration
//!
//! Each submodule registers its handlers and declares the access policies for
//! its endpoint identifiers. Both registrations happen at startup so the
//! policy registry always covers every mounted route.

pub mod appointments;
pub mod auth;
pub mod clients;
pub mod public;
pub mod staff;

use crate::auth::PolicyRegistry;
use actix_web::web;

/// Mount every route group onto the application
pub fn configure(cfg: &mut web::ServiceConfig) {
    public::configure_routes(cfg);
    auth::configure_routes(cfg);
    appointments::configure_routes(cfg);
    clients::configure_routes(cfg);
    staff::configure_routes(cfg);
}

/// Declare the access policy of every endpoint identifier
pub fn declare_policies(registry: &mut PolicyRegistry) {
    public::declare_policies(registry);
    auth::declare_policies(registry);
    appointments::declare_policies(registry);
    clients::declare_policies(registry);
    staff::declare_policies(registry);
}
