//! HTTP server core implementation
//!
//! This module provides the HttpServer struct and its core methods.

use actix_cors::Cors;
use actix_web::{App, HttpServer as ActixHttpServer, middleware::Logger, web};
use tracing::info;
use tracing_actix_web::TracingLogger;

use crate::config::{Config, ServerConfig};
use crate::server::routes;
use crate::server::state::AppState;
use crate::utils::error::Result;

/// HTTP server
pub struct HttpServer {
    /// Server configuration
    config: ServerConfig,
    /// Application state
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server
    pub fn new(config: &Config) -> Self {
        info!("Creating HTTP server");
        Self {
            config: config.server.clone(),
            state: AppState::new(config.clone()),
        }
    }

    /// Start the server and block until shutdown
    pub async fn start(self) -> Result<()> {
        let state = web::Data::new(self.state);
        let bind_addr = (self.config.host.clone(), self.config.port);

        info!("Binding HTTP server to {}:{}", bind_addr.0, bind_addr.1);

        ActixHttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .app_data(state.clone())
                .wrap(cors)
                .wrap(TracingLogger::default())
                .wrap(Logger::default())
                .configure(routes::configure)
        })
        .bind(bind_addr)?
        .run()
        .await?;

        Ok(())
    }
}
