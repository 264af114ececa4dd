//! Registry of link types
//!
//! The registry is the open extension point for link kinds. It starts with
//! the built-in set (`URL`, `Email`, `File`, `SiteTree`) and hosts add their
//! own reference-based kinds with [`LinkTypeRegistry::register_link_type`].
//! Insertion order is preserved so editing surfaces list choices in the
//! order they were registered.
//!
//! A registry can be passed around explicitly, or installed once per process
//! with [`init_global`] and read back with [`global`].

use crate::core::error::ConfigError;
use crate::core::link::{EMAIL, FILE, SITE_TREE, URL};
use crate::core::reference::ReferenceProvider;
use indexmap::IndexMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// How a link type finds its target
#[derive(Clone)]
pub enum LinkTypeBinding {
    /// The target is stored on the record itself (URL, Email)
    Value,
    /// The target is an entity owned by the host; the provider may be bound later
    Reference(Option<Arc<dyn ReferenceProvider>>),
}

impl fmt::Debug for LinkTypeBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkTypeBinding::Value => write!(f, "Value"),
            LinkTypeBinding::Reference(Some(p)) => write!(f, "Reference({})", p.entity_kind()),
            LinkTypeBinding::Reference(None) => write!(f, "Reference(unbound)"),
        }
    }
}

/// A registered link type
#[derive(Debug, Clone)]
pub struct LinkTypeDefinition {
    /// Discriminator key stored on records (e.g. "SiteTree")
    pub key: String,

    /// Label shown to editors (e.g. "Page on this website")
    pub label: String,

    pub binding: LinkTypeBinding,
}

impl LinkTypeDefinition {
    pub fn is_reference(&self) -> bool {
        matches!(self.binding, LinkTypeBinding::Reference(_))
    }

    /// The bound provider, if this is a reference type with one
    pub fn provider(&self) -> Option<&Arc<dyn ReferenceProvider>> {
        match &self.binding {
            LinkTypeBinding::Reference(provider) => provider.as_ref(),
            LinkTypeBinding::Value => None,
        }
    }
}

/// Ordered set of link types keyed by discriminator
#[derive(Debug, Clone)]
pub struct LinkTypeRegistry {
    types: IndexMap<String, LinkTypeDefinition>,
}

impl LinkTypeRegistry {
    /// Create a registry with no types at all
    pub fn empty() -> Self {
        Self {
            types: IndexMap::new(),
        }
    }

    /// Create a registry holding the built-in types
    ///
    /// `File` and `SiteTree` start without a provider; bind them with
    /// [`bind_provider`](Self::bind_provider) once the host is available.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        for (key, label, binding) in [
            (URL, "URL", LinkTypeBinding::Value),
            (EMAIL, "Email address", LinkTypeBinding::Value),
            (FILE, "File on this website", LinkTypeBinding::Reference(None)),
            (SITE_TREE, "Page on this website", LinkTypeBinding::Reference(None)),
        ] {
            registry.types.insert(
                key.to_string(),
                LinkTypeDefinition {
                    key: key.to_string(),
                    label: label.to_string(),
                    binding,
                },
            );
        }
        registry
    }

    /// Register a host-defined reference type
    pub fn register_link_type(
        &mut self,
        key: impl Into<String>,
        label: impl Into<String>,
        provider: Arc<dyn ReferenceProvider>,
    ) -> Result<(), ConfigError> {
        self.insert(LinkTypeDefinition {
            key: key.into(),
            label: label.into(),
            binding: LinkTypeBinding::Reference(Some(provider)),
        })
    }

    /// Add a definition, rejecting duplicate keys
    pub fn insert(&mut self, definition: LinkTypeDefinition) -> Result<(), ConfigError> {
        if self.types.contains_key(&definition.key) {
            return Err(ConfigError::DuplicateLinkType {
                key: definition.key,
            });
        }
        tracing::debug!(
            key = %definition.key,
            binding = ?definition.binding,
            "Registered link type"
        );
        self.types.insert(definition.key.clone(), definition);
        Ok(())
    }

    /// Attach a provider to an already registered reference type
    pub fn bind_provider(
        &mut self,
        key: &str,
        provider: Arc<dyn ReferenceProvider>,
    ) -> Result<(), ConfigError> {
        let definition = self
            .types
            .get_mut(key)
            .ok_or_else(|| ConfigError::UnknownLinkType {
                key: key.to_string(),
            })?;

        match &mut definition.binding {
            LinkTypeBinding::Reference(slot) => {
                *slot = Some(provider);
                Ok(())
            }
            LinkTypeBinding::Value => Err(ConfigError::NotAReferenceType {
                key: key.to_string(),
            }),
        }
    }

    /// Replace the editor-facing label of a type (e.g. for translations)
    pub fn set_label(&mut self, key: &str, label: impl Into<String>) -> Result<(), ConfigError> {
        let definition = self
            .types
            .get_mut(key)
            .ok_or_else(|| ConfigError::UnknownLinkType {
                key: key.to_string(),
            })?;
        definition.label = label.into();
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&LinkTypeDefinition> {
        self.types.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.types.contains_key(key)
    }

    /// Label for a type key
    pub fn label(&self, key: &str) -> Option<&str> {
        self.types.get(key).map(|d| d.label.as_str())
    }

    /// Provider for a reference type key
    pub fn provider(&self, key: &str) -> Option<&Arc<dyn ReferenceProvider>> {
        self.types.get(key).and_then(LinkTypeDefinition::provider)
    }

    /// `(key, label)` pairs in registration order
    pub fn choices(&self) -> Vec<(&str, &str)> {
        self.types
            .values()
            .map(|d| (d.key.as_str(), d.label.as_str()))
            .collect()
    }

    /// Registered reference-based definitions in registration order
    pub fn reference_types(&self) -> impl Iterator<Item = &LinkTypeDefinition> {
        self.types.values().filter(|d| d.is_reference())
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Default for LinkTypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL: OnceLock<Arc<LinkTypeRegistry>> = OnceLock::new();

/// Install the process-wide registry
///
/// Can only succeed once; later calls return [`ConfigError::AlreadyInitialized`].
pub fn init_global(registry: LinkTypeRegistry) -> Result<Arc<LinkTypeRegistry>, ConfigError> {
    let registry = Arc::new(registry);
    GLOBAL
        .set(registry.clone())
        .map_err(|_| ConfigError::AlreadyInitialized)?;
    tracing::debug!(types = registry.len(), "Initialized global link type registry");
    Ok(registry)
}

/// The process-wide registry, if [`init_global`] has been called
pub fn global() -> Option<Arc<LinkTypeRegistry>> {
    GLOBAL.get().cloned()
}
