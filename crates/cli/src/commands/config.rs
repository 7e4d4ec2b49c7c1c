use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use cartwise_core::config::{
    AppConfig, ENV_LOG_LEVEL, ENV_RERANKER_API_KEY, ENV_RERANKER_ENABLED, ENV_RERANKER_ENDPOINT,
    ENV_SCAN_SPACING,
};
use toml::Value;

pub fn run(config_path: Option<&PathBuf>) -> String {
    let config_file_path = config_path.cloned().or_else(detect_config_path);
    let config = match AppConfig::load(config_file_path.as_ref()) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let config_file_doc = load_config_file_doc(config_file_path.as_deref());
    let doc = config_file_doc.as_ref();
    let file = config_file_path.as_deref();

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];

    lines.push(render_line(
        "throttle.scan_spacing",
        &config.throttle.scan_spacing.to_string(),
        field_source("throttle.scan_spacing", Some(ENV_SCAN_SPACING), doc, file),
    ));

    lines.push(render_line(
        "scoring.savings_cap",
        &config.scoring.savings_cap.to_string(),
        field_source("scoring.savings_cap", None, doc, file),
    ));
    lines.push(render_line(
        "scoring.value_bias_bonus",
        &config.scoring.value_bias_bonus.to_string(),
        field_source("scoring.value_bias_bonus", None, doc, file),
    ));
    lines.push(render_line(
        "scoring.same_type_penalty",
        &config.scoring.same_type_penalty.to_string(),
        field_source("scoring.same_type_penalty", None, doc, file),
    ));

    lines.push(render_line(
        "reranker.enabled",
        &config.reranker.enabled.to_string(),
        field_source("reranker.enabled", Some(ENV_RERANKER_ENABLED), doc, file),
    ));
    lines.push(render_line(
        "reranker.endpoint",
        &config.reranker.endpoint,
        field_source("reranker.endpoint", Some(ENV_RERANKER_ENDPOINT), doc, file),
    ));
    let api_key = if config.reranker.api_key.is_some() { "<redacted>" } else { "<unset>" };
    lines.push(render_line(
        "reranker.api_key",
        api_key,
        field_source("reranker.api_key", Some(ENV_RERANKER_API_KEY), doc, file),
    ));
    lines.push(render_line(
        "reranker.timeout_secs",
        &config.reranker.timeout_secs.to_string(),
        field_source("reranker.timeout_secs", None, doc, file),
    ));

    lines.push(render_line(
        "logging.level",
        &config.logging.level,
        field_source("logging.level", Some(ENV_LOG_LEVEL), doc, file),
    ));

    lines.join("\n")
}

fn detect_config_path() -> Option<PathBuf> {
    let root = PathBuf::from("cartwise.toml");
    if root.exists() {
        return Some(root);
    }

    let nested = PathBuf::from("config/cartwise.toml");
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
    env_key: Option<&str>,
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if let Some(env_key) = env_key {
        if env::var_os(env_key).is_some() {
            return format!("env ({env_key})");
        }
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
