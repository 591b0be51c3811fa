//! Relay configuration constants.
//!
//! This module defines parameters for pairing and chat forwarding.

/// Alias shown to the receiving peer on relayed chat messages. Clients are
/// anonymous, so every message arrives from a "Stranger".
pub const CHAT_SENDER_TAG: &str = "Stranger";

/// Status text sent to a client when no partner is available for pairing.
pub const NO_USERS_TEXT: &str = "No users available at the moment";
