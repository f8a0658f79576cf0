pub mod types;
pub mod loader;
pub mod builder;
pub mod validator;

pub use types::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECONDS};
pub use loader::{base_url_from_lookup, ConfigLoader, DefaultConfigLoader};
pub use builder::ClientConfigBuilder;
pub use validator::ConfigValidatorImpl;
