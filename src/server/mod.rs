//! HTTP server: state, middleware, and route handlers

pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{HttpServer, run_server};
pub use state::AppState;
