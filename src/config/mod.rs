/// Main configuration module.
///
/// Re-exports submodules for server and relay configuration.
pub mod relay;
pub mod server;
