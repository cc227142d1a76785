pub mod config;
pub mod error;
pub mod host;
pub mod wire;

pub use config::HostConfig;
pub use error::{ConfigError, HostError};
pub use host::{HostRuntime, serve, start_host_runtime};
