use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use comparo_core::config::{EngineConfig, LoadOptions};
use toml::Value;

pub fn run() -> String {
    let config = match EngineConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let config_file_path = detect_config_path();
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());
    let source = |key_path: &str, env_key: &str| {
        field_source(key_path, env_key, config_file_doc.as_ref(), config_file_path.as_deref())
    };

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];

    lines.push(render_line(
        "search.adapter_timeout_secs",
        &config.search.adapter_timeout_secs.to_string(),
        source("search.adapter_timeout_secs", "COMPARO_SEARCH_ADAPTER_TIMEOUT_SECS"),
    ));
    lines.push(render_line(
        "search.fan_out_limit",
        &config.search.fan_out_limit.to_string(),
        source("search.fan_out_limit", "COMPARO_SEARCH_FAN_OUT_LIMIT"),
    ));
    lines.push(render_line(
        "search.default_result_cap",
        &config.search.default_result_cap.to_string(),
        source("search.default_result_cap", "COMPARO_SEARCH_DEFAULT_RESULT_CAP"),
    ));
    let seed = config.search.seed.map(|seed| seed.to_string());
    lines.push(render_line(
        "search.seed",
        seed.as_deref().unwrap_or("<entropy>"),
        source("search.seed", "COMPARO_SEARCH_SEED"),
    ));

    lines.push(render_line(
        "entertainment.base_url",
        &config.entertainment.base_url,
        source("entertainment.base_url", "COMPARO_ENTERTAINMENT_BASE_URL"),
    ));
    let api_key = if config.entertainment.api_key.is_some() { "<redacted>" } else { "<unset>" };
    lines.push(render_line(
        "entertainment.api_key",
        api_key,
        source("entertainment.api_key", "COMPARO_ENTERTAINMENT_API_KEY"),
    ));

    lines.push(render_line(
        "crypto.base_url",
        &config.crypto.base_url,
        source("crypto.base_url", "COMPARO_CRYPTO_BASE_URL"),
    ));

    lines.push(render_line(
        "logging.level",
        &config.logging.level,
        source("logging.level", "COMPARO_LOGGING_LEVEL"),
    ));
    lines.push(render_line(
        "logging.format",
        &format!("{:?}", config.logging.format),
        source("logging.format", "COMPARO_LOGGING_FORMAT"),
    ));

    lines.join("\n")
}

fn detect_config_path() -> Option<PathBuf> {
    let root = PathBuf::from("comparo.toml");
    if root.exists() {
        return Some(root);
    }

    let nested = PathBuf::from("config/comparo.toml");
    if nested.exists() {
        return Some(nested);
    }

    None
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_key: &str,
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if env::var_os(env_key).is_some() {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}

#[cfg(test)]
mod tests {
    use toml::Value;

    use super::contains_path;

    #[test]
    fn contains_path_walks_nested_tables() {
        let doc: Value = r#"
[search]
adapter_timeout_secs = 5
"#
        .parse()
        .expect("valid toml");

        assert!(contains_path(&doc, "search.adapter_timeout_secs"));
        assert!(!contains_path(&doc, "search.seed"));
        assert!(!contains_path(&doc, "crypto.base_url"));
    }
}
