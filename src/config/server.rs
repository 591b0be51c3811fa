//! Server configuration constants.
//!
//! This module defines where the HTTP/WebSocket server binds.

/// Interface the HTTP server listens on.
pub const BIND_ADDR: &str = "127.0.0.1";

/// TCP port for the HTTP/WebSocket server.
pub const PORT: u16 = 8080;
