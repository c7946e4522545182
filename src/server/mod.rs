//! HTTP server layer

pub mod builder;
pub mod routes;
pub mod server;
pub mod state;

pub use builder::run_server;
pub use server::HttpServer;
pub use state::AppState;
