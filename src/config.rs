use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Taxonomy YAML file; the embedded taxonomy is used when unset.
    pub taxonomy_path: Option<String>,
    /// Manual overrides file (.yaml, .yml or .json).
    pub overrides_path: Option<String>,
    pub filters: FilterConfig,
    pub batch: BatchConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub skip_tips: bool,
    pub skip_custom_orders: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    pub workers: usize,
    pub chunk_size: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for FilterConfig {
    fn default() -> Self {
        FilterConfig {
            skip_tips: true,
            skip_custom_orders: true,
        }
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        BatchConfig {
            workers: 4,
            chunk_size: 256,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Unknown level names fall back to Info.
    pub fn level_filter(&self) -> LevelFilter {
        self.level.parse().unwrap_or(LevelFilter::Info)
    }
}

impl ClassifierConfig {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ClassifierConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    pub fn to_file(&self, path: &str) -> anyhow::Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Missing file means defaults; a file that exists but fails to parse is
    /// an error.
    pub fn load_or_default(path: &str) -> anyhow::Result<Self> {
        if Path::new(path).exists() {
            let config = Self::from_file(path)?;
            log::info!("Loaded configuration from {path}");
            Ok(config)
        } else {
            log::warn!("Configuration file '{path}' not found, using default configuration");
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.batch.workers == 0 {
            anyhow::bail!("batch.workers must be at least 1");
        }
        if self.batch.chunk_size == 0 {
            anyhow::bail!("batch.chunk_size must be at least 1");
        }
        if self.logging.level.parse::<LevelFilter>().is_err() {
            anyhow::bail!("Unknown logging.level '{}'", self.logging.level);
        }
        Ok(())
    }
}
