use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::workflow::{DefinitionError, WorkflowDefinition};

/// Default configuration file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "resource-workflow.toml";

/// Prefix for environment overrides, e.g. `RESOURCE_WORKFLOW__OBSERVABILITY__LOG_LEVEL=debug`
pub const ENV_PREFIX: &str = "RESOURCE_WORKFLOW";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Failed to write configuration to {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to load .env file: {0}")]
    EnvFile(#[from] dotenvy::Error),

    #[error("Invalid workflow '{workflow}': {source}")]
    InvalidWorkflow {
        workflow: String,
        #[source]
        source: DefinitionError,
    },
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct EngineConfig {
    /// Logging settings
    #[serde(default)]
    pub observability: ObservabilityConfig,
    /// Workflow definitions keyed by workflow name
    #[serde(default)]
    pub workflows: BTreeMap<String, WorkflowConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Filter directive used when RUST_LOG is not set
    pub log_level: String,
    /// Emit JSON lines instead of human-readable logs
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json: false,
        }
    }
}

/// One workflow as written in a configuration file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct WorkflowConfig {
    /// Defaults to the first state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial: Option<String>,
    pub states: Vec<String>,
    #[serde(default)]
    pub transitions: Vec<TransitionConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TransitionConfig {
    pub name: String,
    pub from: Vec<String>,
    pub to: String,
    /// Name of a guard registered by the application
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guard: Option<String>,
    /// Text for the action button in UI layers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl From<&WorkflowDefinition> for WorkflowConfig {
    fn from(definition: &WorkflowDefinition) -> Self {
        Self {
            initial: Some(definition.initial_state().to_string()),
            states: definition.states().to_vec(),
            transitions: definition
                .transitions()
                .iter()
                .map(|t| TransitionConfig {
                    name: t.name().to_string(),
                    from: t.from().to_vec(),
                    to: t.to().to_string(),
                    guard: t.guard().map(str::to_string),
                    label: t.label().map(str::to_string),
                })
                .collect(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Default values
    /// 2. `resource-workflow.toml` in the working directory
    /// 3. The explicitly given file
    /// 4. Environment variables prefixed with `RESOURCE_WORKFLOW__`
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        if Path::new(DEFAULT_CONFIG_FILE).exists() {
            builder = builder.add_source(File::with_name(DEFAULT_CONFIG_FILE));
        }

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let config: EngineConfig = builder.build()?.try_deserialize()?;
        tracing::debug!(workflows = config.workflows.len(), "Configuration loaded");
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::from_str(content, FileFormat::Toml))
            .build()?;
        Ok(config.try_deserialize()?)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let toml_content = toml::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), toml_content).map_err(|source| ConfigError::Write {
            path: path.as_ref().to_path_buf(),
            source,
        })
    }

    /// Load .env file if it exists
    pub fn load_env_file() -> Result<(), ConfigError> {
        if Path::new(".env").exists() {
            dotenvy::dotenv()?;
            tracing::info!("Loaded environment variables from .env file");
        }
        Ok(())
    }

    /// Validate every configured workflow. The first invalid one aborts loading.
    pub fn definitions(&self) -> Result<Vec<WorkflowDefinition>, ConfigError> {
        self.workflows
            .iter()
            .map(|(name, workflow)| {
                WorkflowDefinition::from_config(name, workflow).map_err(|source| {
                    ConfigError::InvalidWorkflow {
                        workflow: name.clone(),
                        source,
                    }
                })
            })
            .collect()
    }
}
