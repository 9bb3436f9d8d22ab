// ABOUTME: Configuration management for argoviz
// ABOUTME: Handles loading and merging configuration from files and environment variables

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::export::graphviz::{Graphviz, DEFAULT_LAYOUT, DEFAULT_PROGRAM};
use crate::graph::NodeStyle;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub graphviz: GraphvizConfig,

    #[serde(default)]
    pub entry_style: NodeStyle,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphvizConfig {
    /// Graphviz executable, looked up on PATH unless absolute
    #[serde(default = "default_program")]
    pub program: String,
    /// Layout engine passed as `-K`
    #[serde(default = "default_layout")]
    pub layout: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_program() -> String {
    DEFAULT_PROGRAM.to_string()
}

fn default_layout() -> String {
    DEFAULT_LAYOUT.to_string()
}

fn default_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "pretty".to_string()
}

impl Default for GraphvizConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            layout: default_layout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
        }
    }
}

impl From<&GraphvizConfig> for Graphviz {
    fn from(config: &GraphvizConfig) -> Self {
        Graphviz::new(&config.program, &config.layout)
    }
}

impl Config {
    /// Load configuration from file path or default locations
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p,
            None => Self::find_config_file(),
        };

        let mut config = if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            serde_yaml::from_str(&contents)?
        } else {
            Config::default()
        };

        config.merge_env();
        Ok(config)
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> PathBuf {
        if let Some(home_dir) = dirs::home_dir() {
            let home_config = home_dir.join(".argoviz").join("config.yaml");
            if home_config.exists() {
                return home_config;
            }
        }

        let possible_paths = [
            "argoviz.yaml",
            "argoviz.yml",
            ".argoviz.yaml",
            ".argoviz.yml",
        ];
        for path in possible_paths {
            let path = PathBuf::from(path);
            if path.exists() {
                return path;
            }
        }

        // Return default path (may not exist)
        PathBuf::from("argoviz.yaml")
    }

    /// Merge environment variables into configuration
    fn merge_env(&mut self) {
        if let Ok(program) = std::env::var("ARGOVIZ_DOT") {
            self.graphviz.program = program;
        }
        if let Ok(layout) = std::env::var("ARGOVIZ_LAYOUT") {
            self.graphviz.layout = layout;
        }

        if let Ok(level) = std::env::var("ARGOVIZ_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("ARGOVIZ_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}
