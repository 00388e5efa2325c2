use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Env-filter directives here take precedence over `--log-level`.
pub const LOG_ENV: &str = "GRAPH_VIEW_LOG";

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub color: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            color: true,
        }
    }
}

pub fn build_env_filter(env_value: Option<&str>, config: &LoggingConfig) -> Result<EnvFilter> {
    match env_value.map(str::trim).filter(|value| !value.is_empty()) {
        Some(directives) => EnvFilter::try_new(directives)
            .with_context(|| format!("invalid {LOG_ENV} value {directives:?}")),
        None => EnvFilter::try_new(&config.level)
            .with_context(|| format!("invalid log level {:?}", config.level)),
    }
}

/// Installs the global subscriber. Diagnostics go to stderr so stdout stays
/// clean for usage text and tree dumps.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let env_value = std::env::var(LOG_ENV).ok();
    let filter = build_env_filter(env_value.as_deref(), config)?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_ansi(config.color)
                .with_writer(std::io::stderr),
        )
        .try_init()
        .context("failed to install the log subscriber")
}
