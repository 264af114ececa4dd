//! Type dispatch for link records: URL, title, attributes, markup, validation
//!
//! Everything here is synchronous and side-effect free. Reference lookups go
//! through the [`ReferenceProvider`] bound to the record's type in the
//! [`LinkTypeRegistry`].
//!
//! [`ReferenceProvider`]: crate::core::reference::ReferenceProvider

use crate::core::link::{LinkRecord, LinkTarget, ResolvedUrl, SITE_TREE};
use crate::core::registry::{self, LinkTypeRegistry};
use crate::core::validation::{LinkValidator, ValidationExtension, ValidationResult};
use serde::Serialize;
use std::sync::Arc;

/// Row shown by listing surfaces
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkSummary {
    pub id: u64,
    pub title: String,
    /// Registered label of the link type
    pub link_type: Option<String>,
    /// Resolved URL; `None` when missing or broken
    pub url: Option<String>,
    /// The link points at something that no longer exists
    pub broken: bool,
}

/// Resolves, validates and renders link records
#[derive(Clone)]
pub struct LinkResolver {
    registry: Arc<LinkTypeRegistry>,
    validator: LinkValidator,
}

impl LinkResolver {
    pub fn new(registry: Arc<LinkTypeRegistry>) -> Self {
        Self {
            registry,
            validator: LinkValidator::new(),
        }
    }

    /// Resolver backed by the process-wide registry
    ///
    /// Returns `None` until [`registry::init_global`] has been called.
    pub fn from_global() -> Option<Self> {
        registry::global().map(Self::new)
    }

    /// Add a host validation extension
    pub fn with_validation_extension(
        mut self,
        extension: impl ValidationExtension + 'static,
    ) -> Self {
        self.validator.add_extension(extension);
        self
    }

    pub fn registry(&self) -> &Arc<LinkTypeRegistry> {
        &self.registry
    }

    /// Work out where the link points
    pub fn resolve_url(&self, record: &LinkRecord) -> ResolvedUrl {
        match &record.target {
            None => ResolvedUrl::Missing,
            Some(LinkTarget::Url { url }) => ResolvedUrl::Url(url.clone()),
            Some(LinkTarget::Email { email }) if email.is_empty() => ResolvedUrl::Missing,
            Some(LinkTarget::Email { email }) => ResolvedUrl::Url(format!("mailto:{}", email)),
            Some(LinkTarget::Reference { kind, ref_id }) => {
                self.resolve_reference_url(record, kind, *ref_id)
            }
        }
    }

    fn resolve_reference_url(
        &self,
        record: &LinkRecord,
        kind: &str,
        ref_id: Option<u64>,
    ) -> ResolvedUrl {
        if !record.is_persisted() {
            return ResolvedUrl::Missing;
        }

        let Some(provider) = self.registry.provider(kind) else {
            tracing::warn!(
                link_id = record.id,
                link_type = kind,
                "No reference provider bound for link type"
            );
            return ResolvedUrl::Missing;
        };

        let Some(ref_id) = ref_id.filter(|id| *id != 0) else {
            return ResolvedUrl::Broken;
        };

        if !provider.exists(ref_id) {
            tracing::debug!(
                link_id = record.id,
                link_type = kind,
                ref_id,
                "Link target no longer exists"
            );
            return ResolvedUrl::Broken;
        }

        match provider.url(ref_id) {
            Some(url) => ResolvedUrl::Url(format!("{}{}", url, record.anchor)),
            None => ResolvedUrl::Url(format!(
                "Please implement a URL for {} objects to link to them (link type \"{}\")",
                provider.entity_kind(),
                kind
            )),
        }
    }

    /// Derive a title for a record that has none
    ///
    /// Used when back-filling after a write; display code should read
    /// `record.title` instead.
    pub fn resolve_title(&self, record: &LinkRecord) -> String {
        let title = match &record.target {
            Some(LinkTarget::Url { url }) => url.clone(),
            Some(LinkTarget::Email { email }) => email.clone(),
            Some(LinkTarget::Reference { kind, ref_id }) => {
                let provider = self.registry.provider(kind);
                match (provider, ref_id.filter(|id| *id != 0)) {
                    (Some(provider), Some(ref_id)) if provider.exists(ref_id) => {
                        let title = if kind == SITE_TREE {
                            provider.menu_title(ref_id)
                        } else {
                            provider.title(ref_id)
                        };
                        title.unwrap_or_default()
                    }
                    _ => String::new(),
                }
            }
            None => String::new(),
        };

        if title.is_empty() {
            format!("Link-{}", record.id)
        } else {
            title
        }
    }

    /// `target='_blank'` when the link opens in a new window, empty otherwise
    pub fn target_attr(&self, record: &LinkRecord) -> &'static str {
        if record.open_in_new_window {
            "target='_blank'"
        } else {
            ""
        }
    }

    /// `class='...'` from the transient CSS class, empty when unset
    pub fn class_attr(&self, record: &LinkRecord) -> String {
        match record.css_class() {
            Some(class) => format!("class='{}'", escape_attribute(class)),
            None => String::new(),
        }
    }

    /// Render the record as an anchor tag
    ///
    /// Returns `None` when there is nothing to link to, including links whose
    /// target has been deleted.
    pub fn render(&self, record: &LinkRecord) -> Option<String> {
        let resolved = self.resolve_url(record);
        let url = resolved.usable()?;
        // Records written before titles were back-filled may still be empty.
        let title = if record.title.is_empty() {
            url
        } else {
            record.title.as_str()
        };
        Some(format!(
            "<a href='{}' {} {}>{}</a>",
            url,
            self.target_attr(record),
            self.class_attr(record),
            title
        ))
    }

    /// Run the built-in rules and any registered extensions
    pub fn validate(&self, record: &LinkRecord) -> ValidationResult {
        self.validator.validate(&self.registry, record)
    }

    /// Label of the record's link type, if registered
    pub fn link_type_label(&self, record: &LinkRecord) -> Option<&str> {
        record.type_key().and_then(|key| self.registry.label(key))
    }

    /// Whether the record points at a page or object that exists but is hidden from the public site
    pub fn targets_unpublished(&self, record: &LinkRecord) -> bool {
        match &record.target {
            Some(LinkTarget::Reference {
                kind,
                ref_id: Some(ref_id),
            }) if *ref_id != 0 => self
                .registry
                .provider(kind)
                .is_some_and(|provider| !provider.is_published(*ref_id)),
            _ => false,
        }
    }

    pub fn summary(&self, record: &LinkRecord) -> LinkSummary {
        let resolved = self.resolve_url(record);
        LinkSummary {
            id: record.id,
            title: record.title.clone(),
            link_type: self.link_type_label(record).map(str::to_string),
            url: resolved.as_str().map(str::to_string),
            broken: resolved.is_broken(),
        }
    }
}

/// Escape a value for use inside a quoted HTML attribute
pub fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
