use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod cli;
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use cli::CliOverrides;
pub use logging::init_tracing;
pub use settings::{
    AnalysisSettings, ChatSettings, Config, LlmConfig, LoggingConfig, Providers, QuoteConfig,
    ServerConfig,
};

/// The file looked up when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Prefix of environment variables that override file settings,
/// e.g. `INFINITY__SERVER__PORT=8080` or `INFINITY__PROVIDERS__LLM__MODEL=gpt-4o-mini`.
pub const ENV_PREFIX: &str = "INFINITY";

/// Loads the application configuration.
///
/// Sources, lowest precedence first: built-in defaults, the TOML file (`config.toml`
/// unless `path` is given; only an explicit path is required to exist), `INFINITY__*`
/// environment variables and finally the conventional `OPENAI_API_KEY` variable.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    build_config(path, true)
}

fn build_config(path: Option<&Path>, with_env: bool) -> Result<Config, ConfigError> {
    let (file, required) = match path {
        Some(path) => (path, true),
        None => (Path::new(DEFAULT_CONFIG_FILE), false),
    };

    let mut builder = config::Config::builder()
        .add_source(config::File::from(file).required(required));

    if with_env {
        builder = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option(
                "providers.llm.api_key",
                std::env::var("OPENAI_API_KEY").ok().filter(|key| !key.trim().is_empty()),
            )?;
    }

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.build()?.try_deserialize::<Config>()?;
    config.validate()?;

    Ok(config)
}
