use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub telegram: TelegramConfig,
    #[serde(default = "default_access_config")]
    pub access: AccessConfig,
    #[serde(default = "default_resolver_config")]
    pub resolver: ResolverConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AccessConfig {
    /// Group chat IDs the bot responds in. Empty means every group.
    #[serde(default)]
    pub group_whitelist: Vec<String>,
    /// Whether links in private chats are resolved.
    #[serde(default = "default_true")]
    pub enable_in_private: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ResolverConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Send a short notice to the chat when resolution fails.
    #[serde(default = "default_true")]
    pub send_failure_notice: bool,
}

fn default_api_url() -> String {
    "https://toody.netlify.app/.netlify/functions/parse".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_access_config() -> AccessConfig {
    AccessConfig {
        group_whitelist: Vec::new(),
        enable_in_private: default_true(),
    }
}

fn default_resolver_config() -> ResolverConfig {
    ResolverConfig {
        api_url: default_api_url(),
        timeout_secs: default_timeout_secs(),
        send_failure_notice: default_true(),
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_gets_defaults() {
        let config: Config = toml::from_str(
            r#"
            [telegram]
            bot_token = "123:abc"
            "#,
        )
        .unwrap();

        assert_eq!(config.telegram.bot_token, "123:abc");
        assert!(config.access.group_whitelist.is_empty());
        assert!(config.access.enable_in_private);
        assert_eq!(config.resolver.timeout_secs, 30);
        assert!(config.resolver.send_failure_notice);
        assert!(config.resolver.api_url.contains("/parse"));
    }

    #[test]
    fn test_full_config() {
        let config: Config = toml::from_str(
            r#"
            [telegram]
            bot_token = "123:abc"

            [access]
            group_whitelist = ["-1001234567890"]
            enable_in_private = false

            [resolver]
            api_url = "https://example.com/parse"
            timeout_secs = 10
            send_failure_notice = false
            "#,
        )
        .unwrap();

        assert_eq!(config.access.group_whitelist, vec!["-1001234567890"]);
        assert!(!config.access.enable_in_private);
        assert_eq!(config.resolver.api_url, "https://example.com/parse");
        assert_eq!(config.resolver.timeout_secs, 10);
        assert!(!config.resolver.send_failure_notice);
    }

    #[test]
    fn test_partial_section_fills_missing_fields() {
        let config: Config = toml::from_str(
            r#"
            [telegram]
            bot_token = "123:abc"

            [resolver]
            timeout_secs = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.resolver.timeout_secs, 5);
        assert!(config.resolver.send_failure_notice);
        assert!(config.resolver.api_url.contains("netlify"));
    }
}
