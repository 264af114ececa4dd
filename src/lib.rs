//! # Linkable
//!
//! Polymorphic link records for content-management systems.
//!
//! A [`LinkRecord`](crate::core::link::LinkRecord) points at an external URL, an
//! email address, an uploaded file, a page, or any host-registered kind of
//! object, and knows how to resolve, validate and render itself.
//!
//! ## Features
//!
//! - **Tagged targets**: one active target per record, selected by variant
//! - **Open type registry**: built-in `URL`, `Email`, `File`, `SiteTree`, plus host types
//! - **Soft failures**: deleted targets resolve to `Broken`, never to an error
//! - **Validated writes**: every save is checked; hosts can add their own rules
//! - **Title back-fill**: an empty title is derived right after the write
//! - **Lifecycle events**: broadcast notifications for created/updated/deleted links
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use linkable::prelude::*;
//!
//! let pages = InMemoryReferenceProvider::new("Page");
//! pages.insert(1, ReferencedEntity::new("About Us", "/about/"));
//!
//! let mut registry = LinkTypeRegistry::new();
//! registry.bind_provider("SiteTree", Arc::new(pages))?;
//!
//! let resolver = LinkResolver::new(Arc::new(registry));
//! let manager = LinkManager::new(Arc::new(InMemoryLinkStore::new()), resolver);
//!
//! let link = manager.save(LinkRecord::page(1).with_anchor("#team")).await?;
//! assert_eq!(link.title, "About Us");
//! assert_eq!(
//!     manager.resolver().render(&link).as_deref(),
//!     Some("<a href='/about/#team'  >About Us</a>")
//! );
//! ```

pub mod config;
pub mod core;
pub mod links;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        error::{ConfigError, LinkableError, LinkableResult},
        events::{EventBus, EventEnvelope, LinkEvent},
        link::{LinkRecord, LinkTarget, ResolvedUrl},
        reference::ReferenceProvider,
        registry::{LinkTypeBinding, LinkTypeDefinition, LinkTypeRegistry, global, init_global},
        resolver::{LinkResolver, LinkSummary},
        service::LinkStore,
        validation::{LinkValidator, ValidationExtension, ValidationResult},
    };

    // === Links ===
    pub use crate::links::{
        form::{FieldKind, FormExtension, FormField, LinkForm, LinkFormBuilder, Visibility},
        manager::LinkManager,
    };

    // === Storage ===
    pub use crate::storage::{InMemoryLinkStore, InMemoryReferenceProvider, ReferencedEntity};

    // === Config ===
    pub use crate::config::{EventsConfig, LinkTypeConfig, LinkableConfig};

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use std::sync::Arc;
}
