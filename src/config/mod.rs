//! Configuration management.
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! environment variables prefixed with `PAPER_FETCHER_` (nested keys use a
//! double underscore, e.g. `PAPER_FETCHER_ENTREZ__API_KEY`).
//!
//! ```toml
//! [entrez]
//! base_url = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/"
//! database = "pubmed"
//! max_results = 50
//! email = "someone@example.org"
//!
//! [http]
//! timeout_secs = 30
//!
//! [heuristic]
//! academic_keywords = ["university", "institute"]
//! industry_keywords = ["pharma", "biotech"]
//!
//! [classifier]
//! fetch_empty_batches = false
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::classify::{DEFAULT_ACADEMIC_KEYWORDS, DEFAULT_INDUSTRY_KEYWORDS};

/// Config file picked up from the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "paper-fetcher.toml";

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "PAPER_FETCHER";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// NCBI E-utilities settings
    #[serde(default)]
    pub entrez: EntrezConfig,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Affiliation keyword lists
    #[serde(default)]
    pub heuristic: HeuristicConfig,

    /// Record classifier behaviour
    #[serde(default)]
    pub classifier: ClassifierConfig,
}

impl Config {
    /// Render the effective configuration as TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// NCBI E-utilities configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntrezConfig {
    /// Base URL, the `esearch.fcgi` and `efetch.fcgi` endpoints are resolved against it
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Entrez database name
    #[serde(default = "default_database")]
    pub database: String,

    /// Upper bound on identifiers returned by a search
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Tool name reported to NCBI
    #[serde(default)]
    pub tool: Option<String>,

    /// Contact email reported to NCBI
    #[serde(default)]
    pub email: Option<String>,

    /// NCBI API key (optional, for higher rate limits)
    #[serde(default = "default_api_key")]
    pub api_key: Option<String>,
}

impl Default for EntrezConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            database: default_database(),
            max_results: default_max_results(),
            tool: None,
            email: None,
            api_key: default_api_key(),
        }
    }
}

fn default_base_url() -> String {
    "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/".to_string()
}

fn default_database() -> String {
    "pubmed".to_string()
}

fn default_max_results() -> usize {
    50
}

fn default_api_key() -> Option<String> {
    std::env::var("NCBI_API_KEY").ok()
}

/// HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Whole-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Connection timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// User agent override
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            connect_timeout_secs: default_connect_timeout(),
            user_agent: None,
        }
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

/// Keyword lists driving the affiliation heuristic
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeuristicConfig {
    #[serde(default = "default_academic_keywords")]
    pub academic_keywords: Vec<String>,

    #[serde(default = "default_industry_keywords")]
    pub industry_keywords: Vec<String>,
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        Self {
            academic_keywords: default_academic_keywords(),
            industry_keywords: default_industry_keywords(),
        }
    }
}

fn default_academic_keywords() -> Vec<String> {
    DEFAULT_ACADEMIC_KEYWORDS.iter().map(|k| k.to_string()).collect()
}

fn default_industry_keywords() -> Vec<String> {
    DEFAULT_INDUSTRY_KEYWORDS.iter().map(|k| k.to_string()).collect()
}

/// Record classifier configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Issue the fetch request even when there are no identifiers to fetch
    #[serde(default)]
    pub fetch_empty_batches: bool,
}

/// Load configuration from an explicit file, layered under environment overrides
pub fn load_config(path: &Path) -> Result<Config, config::ConfigError> {
    build(Some(path.to_path_buf()))
}

/// Load configuration from `paper-fetcher.toml` if present, else defaults plus environment
pub fn get_config() -> Result<Config, config::ConfigError> {
    build(find_config_file())
}

/// Look for the default config file in the working directory
pub fn find_config_file() -> Option<PathBuf> {
    let path = PathBuf::from(DEFAULT_CONFIG_FILE);
    path.is_file().then_some(path)
}

fn build(path: Option<PathBuf>) -> Result<Config, config::ConfigError> {
    let mut builder = config::Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(config::File::from(path.as_path()));
    }

    let settings = builder
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
