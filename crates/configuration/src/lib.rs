use crate::error::ConfigError;
use config::{Environment, File, FileFormat, Source};
use std::path::Path;

// Declare the modules that make up this crate.
#[cfg(feature = "clap")]
pub mod cli;
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
#[cfg(feature = "clap")]
pub use cli::SettingsOverrides;
pub use logging::init_tracing;
pub use settings::{ApiSettings, DatabaseSettings, LoggingSettings, ServerSettings, Settings};

/// Prefix for environment overrides, e.g. `FINACTICAL__API__BASE_CURRENCY=EUR`.
pub const ENV_PREFIX: &str = "FINACTICAL";

/// Environment source: `__` separates sections, `api.cors_origins` is a
/// comma-separated list.
pub fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .list_separator(",")
        .with_list_parse_key("api.cors_origins")
        .try_parsing(true)
}

/// Loads the application settings.
///
/// The TOML file at `path` is optional; environment variables override it and
/// built-in defaults fill whatever neither provides.
pub fn load_settings(path: &Path) -> Result<Settings, ConfigError> {
    let file = File::from(path).format(FileFormat::Toml).required(false);
    load_settings_with(file, environment())
}

/// Same as [`load_settings`] with explicit sources.
pub fn load_settings_with<F>(file: F, env: Environment) -> Result<Settings, ConfigError>
where
    F: Source + Send + Sync + 'static,
{
    let builder = config::Config::builder()
        .add_source(file)
        .add_source(env)
        .build()?;

    // Attempt to deserialize the entire configuration into our `Settings` struct
    let settings = builder.try_deserialize::<Settings>()?;
    settings.validate()?;

    Ok(settings)
}
