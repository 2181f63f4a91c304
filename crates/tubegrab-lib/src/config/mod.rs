mod loader;
mod model;

pub use loader::load_config;
pub use model::Settings;

/// Prefix of environment variables that override settings, e.g. `TUBEGRAB_RETRIES=5`.
pub const ENV_PREFIX: &str = "TUBEGRAB";
