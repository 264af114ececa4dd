//! Configuration loading and management
//!
//! A YAML file declares the host's extra link types, label overrides for any
//! type (used for translations), and event bus sizing:
//!
//! ```yaml
//! link_types:
//!   - key: Product
//!     label: Product in the shop
//! labels:
//!   URL: Adresse web
//! events:
//!   capacity: 256
//! ```
//!
//! Providers cannot be expressed in YAML; bind them on the registry returned
//! by [`LinkableConfig::build_registry`].

use crate::core::error::ConfigError;
use crate::core::events::EventBus;
use crate::core::registry::{LinkTypeBinding, LinkTypeDefinition, LinkTypeRegistry};
use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use validator::Validate;

/// A host-declared reference type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct LinkTypeConfig {
    /// Discriminator key stored on records
    #[validate(length(min = 1, max = 64))]
    pub key: String,

    /// Label shown to editors
    #[validate(length(min = 1, max = 255))]
    pub label: String,
}

/// Event bus settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct EventsConfig {
    /// Buffered events before slow subscribers lag
    #[serde(default = "default_event_capacity")]
    #[validate(range(min = 1))]
    pub capacity: usize,
}

fn default_event_capacity() -> usize {
    1024
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            capacity: default_event_capacity(),
        }
    }
}

/// Complete configuration for link records
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct LinkableConfig {
    /// Reference types added after the built-in ones, in order
    #[serde(default)]
    #[validate(nested)]
    pub link_types: Vec<LinkTypeConfig>,

    /// Label overrides keyed by type key
    #[serde(default)]
    pub labels: IndexMap<String, String>,

    #[serde(default)]
    #[validate(nested)]
    pub events: EventsConfig,
}

fn type_key_regex() -> &'static Regex {
    static TYPE_KEY: OnceLock<Regex> = OnceLock::new();
    TYPE_KEY.get_or_init(|| {
        Regex::new(r"^[A-Za-z][A-Za-z0-9_]*$").expect("type key pattern is a valid regex")
    })
}

impl LinkableConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Self::from_yaml_str(&content).map_err(|e| match e {
            ConfigError::ParseError { message, .. } => ConfigError::ParseError {
                file: Some(path.to_string()),
                message,
            },
            other => other,
        })
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.check()?;
        Ok(config)
    }

    /// Check field constraints and type key syntax
    pub fn check(&self) -> Result<(), ConfigError> {
        self.validate().map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            value: String::new(),
            message: e.to_string(),
        })?;

        for link_type in &self.link_types {
            if !type_key_regex().is_match(&link_type.key) {
                return Err(ConfigError::InvalidValue {
                    field: "link_types.key".to_string(),
                    value: link_type.key.clone(),
                    message: "must start with a letter and contain only letters, digits and '_'"
                        .to_string(),
                });
            }
        }
        Ok(())
    }

    /// Build a registry holding the built-in types, the configured ones and
    /// the label overrides
    ///
    /// Configured reference types start without a provider.
    pub fn build_registry(&self) -> Result<LinkTypeRegistry, ConfigError> {
        let mut registry = LinkTypeRegistry::new();

        for link_type in &self.link_types {
            registry.insert(LinkTypeDefinition {
                key: link_type.key.clone(),
                label: link_type.label.clone(),
                binding: LinkTypeBinding::Reference(None),
            })?;
        }

        for (key, label) in &self.labels {
            registry.set_label(key, label.clone())?;
        }

        Ok(registry)
    }

    /// Event bus sized from configuration
    pub fn event_bus(&self) -> EventBus {
        EventBus::new(self.events.capacity)
    }

    /// Create a default configuration for testing
    pub fn default_config() -> Self {
        Self {
            link_types: vec![LinkTypeConfig {
                key: "Document".to_string(),
                label: "Document in the library".to_string(),
            }],
            labels: IndexMap::new(),
            events: EventsConfig::default(),
        }
    }
}
