use serde::Deserialize;
use std::path::PathBuf;

/// Root application configuration. Loaded from environment variables
/// with the prefix `RECS_SERVICE__`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub events: EventsConfig,
    #[serde(default)]
    pub similarity: SimilarityConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_http_port")]
    pub http_port: u16,
    /// Length of the offline list when the request carries no `k`.
    #[serde(default = "default_k")]
    pub default_k: usize,
}

/// Location of the four precomputed source tables.
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_events_file")]
    pub events_file: String,
    #[serde(default = "default_similar_items_file")]
    pub similar_items_file: String,
    #[serde(default = "default_personal_file")]
    pub personal_file: String,
    #[serde(default = "default_default_file")]
    pub default_file: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventsConfig {
    /// Declared retention per user. Not applied when loading.
    #[serde(default = "default_max_events_per_user")]
    pub max_events_per_user: usize,
    #[serde(default)]
    pub order: EventOrder,
}

/// Order in which a user's events are kept after loading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventOrder {
    /// Order of the rows in the source table.
    #[default]
    Source,
    /// Descending `track_seq`, so the first event is the latest one.
    LatestFirst,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimilarityConfig {
    /// Number of neighbours fetched for the online list.
    #[serde(default = "default_similar_k")]
    pub default_k: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    #[serde(default = "default_metrics_enabled")]
    pub enabled: bool,
    #[serde(default = "default_metrics_port")]
    pub port: u16,
}

// Default functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_http_port() -> u16 {
    8000
}
fn default_k() -> usize {
    10
}
fn default_data_dir() -> PathBuf {
    PathBuf::from("../parquets")
}
fn default_events_file() -> String {
    "events_train_sample.csv".to_string()
}
fn default_similar_items_file() -> String {
    "als_I2I_recommendations_sample.csv".to_string()
}
fn default_personal_file() -> String {
    "als_recommendations_sample.csv".to_string()
}
fn default_default_file() -> String {
    "top_popular.csv".to_string()
}
fn default_max_events_per_user() -> usize {
    10
}
fn default_similar_k() -> usize {
    10
}
fn default_metrics_enabled() -> bool {
    true
}
fn default_metrics_port() -> u16 {
    9091
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            http_port: default_http_port(),
            default_k: default_k(),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: default_data_dir(),
            events_file: default_events_file(),
            similar_items_file: default_similar_items_file(),
            personal_file: default_personal_file(),
            default_file: default_default_file(),
        }
    }
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            max_events_per_user: default_max_events_per_user(),
            order: EventOrder::default(),
        }
    }
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            default_k: default_similar_k(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: default_metrics_enabled(),
            port: default_metrics_port(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            data: DataConfig::default(),
            events: EventsConfig::default(),
            similarity: SimilarityConfig::default(),
            metrics: MetricsConfig::default(),
        }
    }
}

impl DataConfig {
    pub fn events_path(&self) -> PathBuf {
        self.dir.join(&self.events_file)
    }

    pub fn similar_items_path(&self) -> PathBuf {
        self.dir.join(&self.similar_items_file)
    }

    pub fn personal_path(&self) -> PathBuf {
        self.dir.join(&self.personal_file)
    }

    pub fn default_path(&self) -> PathBuf {
        self.dir.join(&self.default_file)
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder().add_source(
            config::Environment::with_prefix("RECS_SERVICE")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }
}
