//! Contract with the host systems that own referenced entities
//!
//! Files, pages and any custom linkable objects live outside this crate. Each
//! reference-based link type is backed by one provider that answers three
//! questions about an id: does it exist, what is its canonical URL, and what
//! is it called.

/// Lookup interface for one kind of referenced entity
///
/// Lookups are blocking calls into the host; implementations own any caching
/// or retry policy.
pub trait ReferenceProvider: Send + Sync {
    /// Human-readable name of the entity kind (e.g. "File", "Page")
    fn entity_kind(&self) -> &str;

    /// Whether the entity still exists
    fn exists(&self, ref_id: u64) -> bool;

    /// Canonical URL of the entity
    ///
    /// Returns `None` when this kind of entity cannot produce a URL at all.
    fn url(&self, ref_id: u64) -> Option<String>;

    /// Title of the entity, if it has one
    fn title(&self, ref_id: u64) -> Option<String>;

    /// Navigation label of the entity; pages override this with their menu title
    fn menu_title(&self, ref_id: u64) -> Option<String> {
        self.title(ref_id)
    }

    /// Whether the entity is visible on the public site
    fn is_published(&self, ref_id: u64) -> bool {
        self.exists(ref_id)
    }
}
