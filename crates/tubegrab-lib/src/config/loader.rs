use super::{ENV_PREFIX, Settings};
use crate::error::TubeGrabError;
use config::Config as ConfigBuilder;

/// Builds settings from defaults, an optional file and `TUBEGRAB_*` environment variables.
pub fn load_config(config_path: Option<&str>) -> Result<Settings, TubeGrabError> {
    let mut builder = ConfigBuilder::builder();

    if let Some(config_path) = config_path {
        tracing::debug!("Loading settings from {}", config_path);
        builder = builder.add_source(config::File::with_name(config_path));
    }

    let config_builder = builder
        .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
        .build()?;

    config_builder.try_deserialize().map_err(Into::into)
}
