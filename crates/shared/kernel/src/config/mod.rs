mod app;

pub use app::{AppConfig, LoggingConfig, StorageConfig};

use config::{Config, Environment, File, Map};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Prefix of environment overrides, e.g. `PINVAULT__STORAGE__ACCOUNT`.
pub const ENV_PREFIX: &str = "PINVAULT";

/// File looked up (without extension) when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "pinvault";

/// Custom error type for config loading.
#[pinvault_derive::pinvault_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads layered configuration: a file, then environment overrides on top.
///
/// 1. **File**: `path` if given (must exist), otherwise `pinvault.{toml,json,..}` in the
///    working directory if present.
/// 2. **Environment**: variables prefixed `PINVAULT__`, nested with `__`
///    (`PINVAULT__LOGGING__LEVEL` maps to `logging.level`).
///
/// Keys missing from both layers fall back to the serde defaults of `T`.
///
/// # Errors
/// Returns [`ConfigError::Config`] if an explicit file is missing, a source is malformed,
/// or the merged values do not fit `T`.
///
/// # Example
/// ```rust
/// use pinvault_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct Settings {
///     #[serde(default)]
///     port: u16,
/// }
///
/// let cfg: Settings = load_config(Some("config/local")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    load_with_env(path, None)
}

/// Same as [`load_config`] but reads overrides from `env` instead of the process environment.
pub(crate) fn load_with_env<T>(
    path: Option<impl AsRef<Path>>,
    env: Option<Map<String, String>>,
) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let explicit = path.is_some();
    let effective_path =
        path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), |p| p.as_ref().to_path_buf());

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(explicit))
        .add_source(
            Environment::with_prefix(ENV_PREFIX).separator("__").try_parsing(true).source(env),
        );

    debug!(path = %effective_path.display(), required = explicit, "Loading config");

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
