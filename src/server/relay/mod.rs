/// Relay module: pairs waiting clients into two-party sessions and forwards
/// signaling and chat between session members.

pub mod error;
pub mod messages;
pub mod pool;
pub mod server;
pub mod session;
pub mod types;
