use crate::error::{IrrigoError, Result};
use crate::fuzzy::DEFAULT_OUTPUT_RESOLUTION;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub session: SessionConfig,
    pub engine: EngineConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Directory for session CSV/JSON files. Defaults to the XDG data dir.
    pub log_dir: Option<PathBuf>,
    /// Prefix for session file names.
    pub prefix: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Grid points for the output universe used by centroid defuzzification.
    pub output_resolution: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            log_dir: None,
            prefix: "greenhouse".into(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            output_resolution: DEFAULT_OUTPUT_RESOLUTION,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            session: SessionConfig::default(),
            engine: EngineConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration. An explicit path must exist; a discovered path
    /// is optional and defaults apply when nothing is found.
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => {
                if !p.exists() {
                    return Err(IrrigoError::Config(format!(
                        "Config file not found at {:?}",
                        p
                    )));
                }
                p
            }
            None => match Self::find_config_path() {
                Some(p) => p,
                None => return Ok(Self::default()),
            },
        };

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| IrrigoError::Config(format!("Failed to read config: {}", e)))?;

        // Substitute environment variables
        let config_str = Self::substitute_env_vars(&config_str);

        let config: Config = serde_yaml::from_str(&config_str)
            .map_err(|e| IrrigoError::Config(format!("Failed to parse config: {}", e)))?;

        if config.engine.output_resolution < 2 {
            return Err(IrrigoError::Config(format!(
                "engine.output_resolution must be at least 2, got {}",
                config.engine.output_resolution
            )));
        }

        Ok(config)
    }

    /// Search for config.yaml in standard locations.
    fn find_config_path() -> Option<PathBuf> {
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Some(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("irrigo").join("config.yaml");
            if xdg_config.exists() {
                return Some(xdg_config);
            }
        }

        None
    }

    fn substitute_env_vars(content: &str) -> String {
        let mut result = content.to_string();

        // Find all ${VAR_NAME} patterns and substitute
        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("static pattern");

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        result
    }

    /// Resolve the session log directory: config value, then the
    /// IRRIGO_LOG_DIR environment variable, then the XDG data dir.
    pub fn log_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.session.log_dir {
            return Ok(dir.clone());
        }

        if let Ok(dir) = std::env::var("IRRIGO_LOG_DIR") {
            return Ok(PathBuf::from(dir));
        }

        let data_dir = dirs::data_dir()
            .ok_or_else(|| IrrigoError::Config("Cannot determine data directory".into()))?
            .join("irrigo")
            .join("logs");
        Ok(data_dir)
    }
}
