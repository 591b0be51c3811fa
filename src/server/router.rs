//! HTTP and WebSocket routing configuration.
//!
//! Defines the WebSocket endpoint for the chat relay.

use actix_web::web;
use crate::server::relay::session::ws_chat;

/// Configure the application's HTTP/WebSocket routes.
///
/// The endpoint is handled by a per-connection actor, which manages the
/// connection lifecycle and forwards events to the relay server.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/ws/chat")
            .to(ws_chat)
    );
}
