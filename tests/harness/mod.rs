//! Shared test harness for link integration tests
//!
//! Builds a registry with in-memory page and file providers and a manager
//! over an in-memory store.
//!
//! ```rust,ignore
//! mod harness;
//! use harness::*;
//! ```

#![allow(dead_code)]

use linkable::prelude::*;

pub const ABOUT_PAGE: u64 = 10;
pub const DRAFT_PAGE: u64 = 11;
pub const REPORT_FILE: u64 = 20;

/// Everything a test needs, with handles on the providers so tests can
/// delete referenced entities
pub struct Fixture {
    pub manager: LinkManager,
    pub store: InMemoryLinkStore,
    pub pages: InMemoryReferenceProvider,
    pub files: InMemoryReferenceProvider,
    pub events: EventBus,
}

/// Route test logs through the test writer; honours RUST_LOG
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn pages() -> InMemoryReferenceProvider {
    let pages = InMemoryReferenceProvider::new("Page");
    pages.insert(
        ABOUT_PAGE,
        ReferencedEntity::new("About Us - Who we are", "/about/").with_menu_title("About Us"),
    );
    pages.insert(
        DRAFT_PAGE,
        ReferencedEntity::new("Draft", "/draft/").unpublished(),
    );
    pages
}

/// Files in this host cannot produce URLs, which exercises the diagnostic path
pub fn files() -> InMemoryReferenceProvider {
    let files = InMemoryReferenceProvider::new("File");
    files.insert(REPORT_FILE, ReferencedEntity::without_url("annual-report.pdf"));
    files
}

pub fn fixture() -> Fixture {
    fixture_with(LinkResolver::new)
}

/// Build a fixture, letting the caller decorate the resolver
pub fn fixture_with(make: impl FnOnce(Arc<LinkTypeRegistry>) -> LinkResolver) -> Fixture {
    init_tracing();

    let pages = pages();
    let files = files();

    let mut registry = LinkTypeRegistry::new();
    registry
        .bind_provider("SiteTree", Arc::new(pages.clone()))
        .unwrap();
    registry.bind_provider("File", Arc::new(files.clone())).unwrap();

    let store = InMemoryLinkStore::new();
    let events = EventBus::new(64);
    let manager = LinkManager::new(Arc::new(store.clone()), make(Arc::new(registry)))
        .with_event_bus(events.clone());

    Fixture {
        manager,
        store,
        pages,
        files,
        events,
    }
}
