//! Infrastructure layer: file-backed persistence for the Inkpost client.
//!
//! The only persisted client state is the session token and the
//! configuration file, both under the platform config directory resolved
//! by [`paths::InkpostPaths`].

pub mod config_service;
pub mod paths;
pub mod session_store;

pub use config_service::ConfigService;
pub use session_store::FileSessionStore;
