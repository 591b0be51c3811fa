//! Main entry point for the backend server.
//!
//! Initializes the actor system, configures application state, and launches the HTTP server
//! with the WebSocket endpoint for the chat relay.

use actix::Actor;
use actix_web::{web, App, HttpServer};
use server::relay::server::RelayServer;

pub mod config;
mod server;


#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logger from environment variable.
    env_logger::init();

    // Start the relay server actor (owns the registry, waiting pool, and sessions).
    let relay_addr = RelayServer::new().start();

    // Shared application state for HTTP/WebSocket handlers.
    let state = web::Data::new(server::state::AppState::new(relay_addr));

    // Start the HTTP server with the WebSocket endpoint.
    HttpServer::new(move || {
        App::new()
            .wrap(
                actix_web::middleware::DefaultHeaders::new()
                    .add(("Access-Control-Allow-Origin", "*"))
                    .add(("Access-Control-Allow-Headers", "*"))
            )
            .app_data(state.clone())
            .configure(crate::server::router::config)
    })
    .bind((config::server::BIND_ADDR, config::server::PORT))?
    .run()
    .await
}
