// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use error::ConfigError;
pub use settings::{
    AllocationPreset, BacktestSettings, Config, IndicatorSettings, Logging, MilestoneSettings,
    ScenarioSettings, SpendingSettings,
};

const CONFIG_FILE: &str = "config.toml";
const ENV_PREFIX: &str = "FINSIGHT";

/// Loads the application configuration from `config.toml` in the working directory.
///
/// The file is optional; `FINSIGHT__SECTION__KEY` environment variables override it
/// (e.g. `FINSIGHT__SCENARIO__INFLATION_RATE=2.5`).
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(CONFIG_FILE)
}

/// Same as [`load_config`], but reads the given file path.
pub fn load_config_from(path: &str) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::with_name(path).required(false))
        .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?;

    finish(builder)
}

/// Parses configuration from an in-memory TOML document.
pub fn parse_config(toml: &str) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?;

    finish(builder)
}

fn finish(builder: config::Config) -> Result<Config, ConfigError> {
    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    tracing::debug!(
        presets = config.backtest.presets.len(),
        ladder = config.milestones.ladder.len(),
        "Configuration loaded"
    );

    Ok(config)
}
