//! The link record and its polymorphic target

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Type key for links to a free-text URL
pub const URL: &str = "URL";

/// Type key for `mailto:` links
pub const EMAIL: &str = "Email";

/// Type key for links to an uploaded file
pub const FILE: &str = "File";

/// Type key for links to a page in the site tree
pub const SITE_TREE: &str = "SiteTree";

/// What a link points at
///
/// Only the active variant carries data, so a record can never hold a stale
/// URL behind a page link. Reference-based targets name their type by the
/// registered key, which keeps the set open to host-registered kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LinkTarget {
    /// An external or site-relative URL, stored verbatim
    #[serde(rename = "URL")]
    Url { url: String },

    /// An email address rendered as `mailto:`
    #[serde(rename = "Email")]
    Email { email: String },

    /// A reference to an entity owned by the host (file, page, custom object)
    #[serde(rename = "Reference")]
    Reference {
        /// Registered type key, e.g. "File" or "SiteTree"
        kind: String,
        /// Id of the referenced entity; `None` until one is selected
        ref_id: Option<u64>,
    },
}

impl LinkTarget {
    /// The registry key for this target
    pub fn type_key(&self) -> &str {
        match self {
            LinkTarget::Url { .. } => URL,
            LinkTarget::Email { .. } => EMAIL,
            LinkTarget::Reference { kind, .. } => kind,
        }
    }

    /// Whether this target points at another entity
    pub fn is_reference(&self) -> bool {
        matches!(self, LinkTarget::Reference { .. })
    }
}

/// A persisted link
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkRecord {
    /// Unique identifier; `0` until the record is first stored
    #[serde(default)]
    pub id: u64,

    /// Display label, back-filled on write when left empty
    #[serde(default)]
    pub title: String,

    /// The active target; `None` when no type has been chosen yet
    #[serde(flatten)]
    pub target: Option<LinkTarget>,

    /// Fragment appended raw to reference-resolved URLs (include the `#`)
    #[serde(default)]
    pub anchor: String,

    /// Render with `target='_blank'`
    #[serde(default)]
    pub open_in_new_window: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    /// Rendering hint supplied by the host; never persisted
    #[serde(skip)]
    css_class: Option<String>,
}

impl LinkRecord {
    /// Create an empty, unsaved record
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            title: String::new(),
            target: None,
            anchor: String::new(),
            open_in_new_window: false,
            created_at: now,
            updated_at: now,
            css_class: None,
        }
    }

    /// Create an unsaved record linking to a URL
    pub fn url(url: impl Into<String>) -> Self {
        Self::new().with_target(LinkTarget::Url { url: url.into() })
    }

    /// Create an unsaved record linking to an email address
    pub fn email(email: impl Into<String>) -> Self {
        Self::new().with_target(LinkTarget::Email {
            email: email.into(),
        })
    }

    /// Create an unsaved record referencing another entity
    pub fn reference(kind: impl Into<String>, ref_id: Option<u64>) -> Self {
        Self::new().with_target(LinkTarget::Reference {
            kind: kind.into(),
            ref_id,
        })
    }

    /// Create an unsaved record linking to a page
    pub fn page(page_id: u64) -> Self {
        Self::reference(SITE_TREE, Some(page_id))
    }

    /// Create an unsaved record linking to a file
    pub fn file(file_id: u64) -> Self {
        Self::reference(FILE, Some(file_id))
    }

    pub fn with_target(mut self, target: LinkTarget) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_anchor(mut self, anchor: impl Into<String>) -> Self {
        self.anchor = anchor.into();
        self
    }

    pub fn opening_in_new_window(mut self) -> Self {
        self.open_in_new_window = true;
        self
    }

    pub fn with_css_class(mut self, class: impl Into<String>) -> Self {
        self.set_css_class(class);
        self
    }

    /// Set the transient CSS class used by the next render
    pub fn set_css_class(&mut self, class: impl Into<String>) -> &mut Self {
        let class = class.into();
        self.css_class = if class.is_empty() { None } else { Some(class) };
        self
    }

    pub fn css_class(&self) -> Option<&str> {
        self.css_class.as_deref()
    }

    pub(crate) fn take_css_class(&mut self) -> Option<String> {
        self.css_class.take()
    }

    /// The registry key of the active target, if any
    pub fn type_key(&self) -> Option<&str> {
        self.target.as_ref().map(LinkTarget::type_key)
    }

    /// Whether the record has been stored at least once
    pub fn is_persisted(&self) -> bool {
        self.id != 0
    }
}

impl Default for LinkRecord {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of resolving a record's target URL
///
/// `Missing` means no link is configured (or resolution is meaningless yet);
/// `Broken` means the link points at something that no longer exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "url", rename_all = "snake_case")]
pub enum ResolvedUrl {
    Missing,
    Broken,
    Url(String),
}

impl ResolvedUrl {
    /// The resolved string, if any
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ResolvedUrl::Url(url) => Some(url),
            _ => None,
        }
    }

    /// A non-empty URL that may be emitted as an `href`
    pub fn usable(&self) -> Option<&str> {
        self.as_str().filter(|url| !url.is_empty())
    }

    pub fn is_broken(&self) -> bool {
        matches!(self, ResolvedUrl::Broken)
    }
}
