use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Debug)]
pub struct EngineConfig {
    pub search: SearchConfig,
    pub entertainment: EntertainmentConfig,
    pub crypto: CryptoConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug)]
pub struct SearchConfig {
    /// Per-adapter-call deadline; a slower source is treated as failed and
    /// routed to the fallback generator.
    pub adapter_timeout_secs: u64,
    /// Concurrency cap for dependent per-item detail calls.
    pub fan_out_limit: usize,
    /// Result cap applied when a category does not configure its own.
    pub default_result_cap: usize,
    /// Seed for the injectable random source; unset means entropy.
    pub seed: Option<u64>,
}

#[derive(Clone, Debug)]
pub struct EntertainmentConfig {
    pub base_url: String,
    pub api_key: Option<SecretString>,
}

#[derive(Clone, Debug)]
pub struct CryptoConfig {
    pub base_url: String,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub adapter_timeout_secs: Option<u64>,
    pub fan_out_limit: Option<usize>,
    pub default_result_cap: Option<usize>,
    pub seed: Option<u64>,
    pub entertainment_base_url: Option<String>,
    pub entertainment_api_key: Option<String>,
    pub crypto_base_url: Option<String>,
    pub log_level: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            search: SearchConfig {
                adapter_timeout_secs: 8,
                fan_out_limit: 6,
                default_result_cap: 5,
                seed: None,
            },
            entertainment: EntertainmentConfig {
                base_url: "https://www.omdbapi.com".to_string(),
                api_key: None,
            },
            crypto: CryptoConfig {
                base_url: "https://api.coingecko.com/api/v3".to_string(),
            },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

fn secret_value(value: String) -> SecretString {
    value.into()
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl EngineConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from("comparo.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(search) = patch.search {
            if let Some(adapter_timeout_secs) = search.adapter_timeout_secs {
                self.search.adapter_timeout_secs = adapter_timeout_secs;
            }
            if let Some(fan_out_limit) = search.fan_out_limit {
                self.search.fan_out_limit = fan_out_limit;
            }
            if let Some(default_result_cap) = search.default_result_cap {
                self.search.default_result_cap = default_result_cap;
            }
            if let Some(seed) = search.seed {
                self.search.seed = Some(seed);
            }
        }

        if let Some(entertainment) = patch.entertainment {
            if let Some(base_url) = entertainment.base_url {
                self.entertainment.base_url = base_url;
            }
            if let Some(api_key_value) = entertainment.api_key {
                self.entertainment.api_key = Some(secret_value(api_key_value));
            }
        }

        if let Some(crypto) = patch.crypto {
            if let Some(base_url) = crypto.base_url {
                self.crypto.base_url = base_url;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("COMPARO_SEARCH_ADAPTER_TIMEOUT_SECS") {
            self.search.adapter_timeout_secs =
                parse_u64("COMPARO_SEARCH_ADAPTER_TIMEOUT_SECS", &value)?;
        }
        if let Some(value) = read_env("COMPARO_SEARCH_FAN_OUT_LIMIT") {
            self.search.fan_out_limit = parse_usize("COMPARO_SEARCH_FAN_OUT_LIMIT", &value)?;
        }
        if let Some(value) = read_env("COMPARO_SEARCH_DEFAULT_RESULT_CAP") {
            self.search.default_result_cap =
                parse_usize("COMPARO_SEARCH_DEFAULT_RESULT_CAP", &value)?;
        }
        if let Some(value) = read_env("COMPARO_SEARCH_SEED") {
            self.search.seed = Some(parse_u64("COMPARO_SEARCH_SEED", &value)?);
        }

        if let Some(value) = read_env("COMPARO_ENTERTAINMENT_BASE_URL") {
            self.entertainment.base_url = value;
        }
        if let Some(value) = read_env("COMPARO_ENTERTAINMENT_API_KEY") {
            self.entertainment.api_key = Some(secret_value(value));
        }

        if let Some(value) = read_env("COMPARO_CRYPTO_BASE_URL") {
            self.crypto.base_url = value;
        }

        let log_level = read_env("COMPARO_LOGGING_LEVEL").or_else(|| read_env("COMPARO_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("COMPARO_LOGGING_FORMAT").or_else(|| read_env("COMPARO_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(adapter_timeout_secs) = overrides.adapter_timeout_secs {
            self.search.adapter_timeout_secs = adapter_timeout_secs;
        }
        if let Some(fan_out_limit) = overrides.fan_out_limit {
            self.search.fan_out_limit = fan_out_limit;
        }
        if let Some(default_result_cap) = overrides.default_result_cap {
            self.search.default_result_cap = default_result_cap;
        }
        if let Some(seed) = overrides.seed {
            self.search.seed = Some(seed);
        }
        if let Some(base_url) = overrides.entertainment_base_url {
            self.entertainment.base_url = base_url;
        }
        if let Some(api_key) = overrides.entertainment_api_key {
            self.entertainment.api_key = Some(secret_value(api_key));
        }
        if let Some(base_url) = overrides.crypto_base_url {
            self.crypto.base_url = base_url;
        }
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_search(&self.search)?;
        validate_base_url("entertainment.base_url", &self.entertainment.base_url)?;
        validate_base_url("crypto.base_url", &self.crypto.base_url)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from("comparo.toml"), PathBuf::from("config/comparo.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn validate_search(search: &SearchConfig) -> Result<(), ConfigError> {
    if search.adapter_timeout_secs == 0 || search.adapter_timeout_secs > 300 {
        return Err(ConfigError::Validation(
            "search.adapter_timeout_secs must be in range 1..=300".to_string(),
        ));
    }

    if search.fan_out_limit == 0 || search.fan_out_limit > 32 {
        return Err(ConfigError::Validation(
            "search.fan_out_limit must be in range 1..=32".to_string(),
        ));
    }

    if search.default_result_cap == 0 || search.default_result_cap > 50 {
        return Err(ConfigError::Validation(
            "search.default_result_cap must be in range 1..=50".to_string(),
        ));
    }

    Ok(())
}

fn validate_base_url(key: &str, base_url: &str) -> Result<(), ConfigError> {
    if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{key} must start with http:// or https://"
        )));
    }
    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_u64(key: &str, value: &str) -> Result<u64, ConfigError> {
    value.parse::<u64>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_usize(key: &str, value: &str) -> Result<usize, ConfigError> {
    value.parse::<usize>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    search: Option<SearchPatch>,
    entertainment: Option<EntertainmentPatch>,
    crypto: Option<CryptoPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct SearchPatch {
    adapter_timeout_secs: Option<u64>,
    fan_out_limit: Option<usize>,
    default_result_cap: Option<usize>,
    seed: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct EntertainmentPatch {
    base_url: Option<String>,
    api_key: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct CryptoPatch {
    base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}
