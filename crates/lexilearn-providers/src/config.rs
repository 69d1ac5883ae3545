//! Configuration and provider factories.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use lexilearn_core::puzzles::PickOrder;
use lexilearn_core::session::SessionConfig;
use lexilearn_core::traits::{EncouragementProvider, ScoreStore, StoryAnalyzer};

use crate::api::ApiProvider;
use crate::mock::{MockEncouragement, MockStoryAnalyzer};
use crate::store::{JsonFileScoreStore, MemoryScoreStore};

/// Where encouragement and story analysis come from.
///
/// Note: Custom Debug impl masks API keys to prevent accidental exposure in logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProviderConfig {
    Mock {
        #[serde(default)]
        seed: u64,
    },
    Http {
        base_url: String,
        #[serde(default)]
        api_key: Option<String>,
        #[serde(default = "default_timeout")]
        timeout_secs: u64,
    },
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderConfig::Mock { seed } => f.debug_struct("Mock").field("seed", seed).finish(),
            ProviderConfig::Http {
                base_url,
                api_key,
                timeout_secs,
            } => f
                .debug_struct("Http")
                .field("base_url", base_url)
                .field("api_key", &api_key.as_ref().map(|_| "***"))
                .field("timeout_secs", timeout_secs)
                .finish(),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig::Mock { seed: 0 }
    }
}

fn default_timeout() -> u64 {
    30
}

/// Where gem scores are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StoreConfig {
    Memory,
    File {
        #[serde(default = "default_data_dir")]
        dir: PathBuf,
    },
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::File {
            dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./lexilearn-data")
}

/// Presentation order name as written in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderName {
    #[default]
    RoundRobin,
    Shuffle,
}

/// Top-level lexilearn configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LexiConfig {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub score_store: StoreConfig,
    /// Whose score the buddy updates.
    #[serde(default = "default_user")]
    pub user_id: String,
    /// Name the buddy addresses; falls back to `user_id`.
    #[serde(default)]
    pub user_name: Option<String>,
    /// Pause after a correct answer, in milliseconds.
    #[serde(default = "default_success_delay")]
    pub success_delay_ms: u64,
    #[serde(default)]
    pub puzzle_order: OrderName,
    /// Seed for shuffled puzzle order.
    #[serde(default)]
    pub seed: u64,
}

fn default_user() -> String {
    "guest".to_string()
}
fn default_success_delay() -> u64 {
    1000
}

impl Default for LexiConfig {
    fn default() -> Self {
        Self {
            provider: ProviderConfig::default(),
            score_store: StoreConfig::default(),
            user_id: default_user(),
            user_name: None,
            success_delay_ms: default_success_delay(),
            puzzle_order: OrderName::default(),
            seed: 0,
        }
    }
}

impl LexiConfig {
    pub fn display_name(&self) -> &str {
        self.user_name.as_deref().unwrap_or(&self.user_id)
    }

    pub fn pick_order(&self) -> PickOrder {
        match self.puzzle_order {
            OrderName::RoundRobin => PickOrder::RoundRobin,
            OrderName::Shuffle => PickOrder::Shuffle { seed: self.seed },
        }
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            order: self.pick_order(),
            success_delay: Duration::from_millis(self.success_delay_ms),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

fn resolve_config(config: &mut LexiConfig) {
    if let ProviderConfig::Http {
        base_url, api_key, ..
    } = &mut config.provider
    {
        *base_url = resolve_env_vars(base_url);
        if let Some(key) = api_key.as_mut() {
            *key = resolve_env_vars(key);
        }
        if api_key.as_deref() == Some("") {
            *api_key = None;
        }
    }
    if let StoreConfig::File { dir } = &mut config.score_store {
        *dir = PathBuf::from(resolve_env_vars(&dir.to_string_lossy()));
    }
    config.user_id = resolve_env_vars(&config.user_id);
}

/// Apply `LEXILEARN_API_URL`, `LEXILEARN_API_KEY` and `LEXILEARN_USER`.
fn apply_env_overrides(config: &mut LexiConfig, var: impl Fn(&str) -> Option<String>) {
    if let Some(url) = var("LEXILEARN_API_URL") {
        match &mut config.provider {
            ProviderConfig::Http { base_url, .. } => *base_url = url,
            mock => {
                *mock = ProviderConfig::Http {
                    base_url: url,
                    api_key: None,
                    timeout_secs: default_timeout(),
                }
            }
        }
    }

    if let Some(key) = var("LEXILEARN_API_KEY") {
        if let ProviderConfig::Http { api_key, .. } = &mut config.provider {
            *api_key = Some(key);
        }
    }

    if let Some(user) = var("LEXILEARN_USER") {
        config.user_id = user;
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `lexilearn.toml` in the current directory
/// 2. `~/.config/lexilearn/config.toml`
///
/// Environment variable overrides: `LEXILEARN_API_URL`, `LEXILEARN_API_KEY`,
/// `LEXILEARN_USER`.
pub fn load_config() -> Result<LexiConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<LexiConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("lexilearn.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<LexiConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => LexiConfig::default(),
    };

    apply_env_overrides(&mut config, |name| {
        std::env::var(name).ok().filter(|v| !v.is_empty())
    });
    resolve_config(&mut config);

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("lexilearn"))
}

/// Create the encouragement provider named by the configuration.
pub fn create_encouragement(config: &ProviderConfig) -> Result<Box<dyn EncouragementProvider>> {
    match config {
        ProviderConfig::Mock { seed } => Ok(Box::new(MockEncouragement::new(*seed))),
        ProviderConfig::Http {
            base_url,
            api_key,
            timeout_secs,
        } => Ok(Box::new(ApiProvider::with_timeout(
            base_url,
            api_key.clone(),
            *timeout_secs,
        )?)),
    }
}

/// Create the story analyzer named by the configuration.
pub fn create_story_analyzer(config: &ProviderConfig) -> Result<Box<dyn StoryAnalyzer>> {
    match config {
        ProviderConfig::Mock { seed } => Ok(Box::new(MockStoryAnalyzer::new(*seed))),
        ProviderConfig::Http {
            base_url,
            api_key,
            timeout_secs,
        } => Ok(Box::new(ApiProvider::with_timeout(
            base_url,
            api_key.clone(),
            *timeout_secs,
        )?)),
    }
}

/// Create the score store named by the configuration.
pub fn create_score_store(config: &StoreConfig) -> Box<dyn ScoreStore> {
    match config {
        StoreConfig::Memory => Box::new(MemoryScoreStore::new()),
        StoreConfig::File { dir } => Box::new(JsonFileScoreStore::new(dir)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_LEXILEARN_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_LEXILEARN_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_LEXILEARN_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        assert_eq!(resolve_env_vars("${unterminated"), "${unterminated");
        std::env::remove_var("_LEXILEARN_TEST_VAR");
    }

    #[test]
    fn default_config() {
        let config = LexiConfig::default();
        assert_eq!(config.provider, ProviderConfig::Mock { seed: 0 });
        assert_eq!(config.user_id, "guest");
        assert_eq!(config.display_name(), "guest");
        assert_eq!(config.success_delay_ms, 1000);
        assert_eq!(config.pick_order(), PickOrder::RoundRobin);
    }

    #[test]
    fn parse_full_config() {
        let toml_str = r#"
user_id = "sam"
user_name = "Sam"
success_delay_ms = 250
puzzle_order = "shuffle"
seed = 7

[provider]
type = "http"
base_url = "https://example.test"
api_key = "sk-test"

[score_store]
type = "file"
dir = "/tmp/lexi"
"#;
        let config: LexiConfig = toml::from_str(toml_str).unwrap();
        assert!(matches!(
            &config.provider,
            ProviderConfig::Http { timeout_secs: 30, api_key: Some(k), .. } if k == "sk-test"
        ));
        assert_eq!(
            config.score_store,
            StoreConfig::File {
                dir: PathBuf::from("/tmp/lexi")
            }
        );
        assert_eq!(config.display_name(), "Sam");
        assert_eq!(config.pick_order(), PickOrder::Shuffle { seed: 7 });
        assert_eq!(
            config.session_config().success_delay,
            Duration::from_millis(250)
        );
    }

    #[test]
    fn parse_memory_store_and_mock_provider() {
        let toml_str = r#"
[provider]
type = "mock"
seed = 3

[score_store]
type = "memory"
"#;
        let config: LexiConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.provider, ProviderConfig::Mock { seed: 3 });
        assert_eq!(config.score_store, StoreConfig::Memory);
    }

    #[test]
    fn debug_masks_api_key() {
        let config = ProviderConfig::Http {
            base_url: "https://example.test".into(),
            api_key: Some("sk-secret".into()),
            timeout_secs: 30,
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("***"));
    }

    #[test]
    fn env_overrides_switch_to_http() {
        let vars: HashMap<&str, &str> = [
            ("LEXILEARN_API_URL", "http://localhost:3000"),
            ("LEXILEARN_API_KEY", "k"),
            ("LEXILEARN_USER", "alex"),
        ]
        .into_iter()
        .collect();

        let mut config = LexiConfig::default();
        apply_env_overrides(&mut config, |name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(
            config.provider,
            ProviderConfig::Http {
                base_url: "http://localhost:3000".into(),
                api_key: Some("k".into()),
                timeout_secs: 30,
            }
        );
        assert_eq!(config.user_id, "alex");
    }

    #[test]
    fn api_key_without_url_leaves_mock_alone() {
        let mut config = LexiConfig::default();
        apply_env_overrides(&mut config, |name| {
            (name == "LEXILEARN_API_KEY").then(|| "k".to_string())
        });
        assert_eq!(config.provider, ProviderConfig::Mock { seed: 0 });
    }

    #[test]
    fn empty_resolved_key_is_dropped() {
        let mut config = LexiConfig {
            provider: ProviderConfig::Http {
                base_url: "https://example.test".into(),
                api_key: Some("${_LEXILEARN_SURELY_UNSET}".into()),
                timeout_secs: 30,
            },
            ..LexiConfig::default()
        };
        resolve_config(&mut config);
        assert!(matches!(
            config.provider,
            ProviderConfig::Http { api_key: None, .. }
        ));
    }

    #[test]
    fn load_missing_explicit_path_fails() {
        let err = load_config_from(Some(Path::new("/nonexistent/lexilearn.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn load_explicit_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("lexilearn.toml");
        std::fs::write(&path, "user_id = \"robin\"\n[score_store]\ntype = \"memory\"\n").unwrap();
        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.score_store, StoreConfig::Memory);
    }

    #[tokio::test]
    async fn factories_build_mock_and_memory() {
        let provider = create_encouragement(&ProviderConfig::default()).unwrap();
        assert_eq!(provider.name(), "mock");
        let analyzer = create_story_analyzer(&ProviderConfig::default()).unwrap();
        assert_eq!(analyzer.name(), "mock");
        let store = create_score_store(&StoreConfig::Memory);
        store.increment("sam", 5).await.unwrap();
        assert_eq!(store.read("sam").await.unwrap(), 5);
    }
}
