//! Basic link records: one of each type, saved, listed and rendered
//!
//! Run with `RUST_LOG=linkable=debug cargo run --example basic_links`.

use linkable::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Host-owned entities
    let pages = InMemoryReferenceProvider::new("Page");
    pages.insert(
        1,
        ReferencedEntity::new("About Us - Who we are", "/about/").with_menu_title("About Us"),
    );
    let files = InMemoryReferenceProvider::new("File");
    files.insert(1, ReferencedEntity::new("Price list", "/assets/prices.pdf"));

    let config = LinkableConfig::default_config();
    let mut registry = config.build_registry()?;
    registry.bind_provider("SiteTree", Arc::new(pages.clone()))?;
    registry.bind_provider("File", Arc::new(files))?;

    let events = config.event_bus();
    let mut rx = events.subscribe();
    tokio::spawn(async move {
        while let Ok(envelope) = rx.recv().await {
            println!("event: {} link {}", envelope.event.action(), envelope.event.link_id());
        }
    });

    let resolver = LinkResolver::new(Arc::new(registry));
    let manager =
        LinkManager::new(Arc::new(InMemoryLinkStore::new()), resolver).with_event_bus(events);

    manager.save(LinkRecord::url("https://www.rust-lang.org")).await?;
    manager
        .save(LinkRecord::email("hello@example.com").with_title("Write to us"))
        .await?;
    manager.save(LinkRecord::file(1).opening_in_new_window()).await?;
    let about = manager
        .save(LinkRecord::page(1).with_anchor("#team"))
        .await?;

    if let Err(e) = manager.save(LinkRecord::url("not a url")).await {
        println!("rejected: {}", e);
    }

    for summary in manager.summaries().await? {
        println!("{}", serde_json::to_string(&summary)?);
    }

    for record in manager.list().await? {
        let record = record.with_css_class("nav-link");
        match manager.resolver().render(&record) {
            Some(html) => println!("{}", html),
            None => println!("(link {} renders nothing)", record.id),
        }
    }

    pages.remove(1);
    println!(
        "after deleting the page: {:?}",
        manager.resolver().resolve_url(&about)
    );

    Ok(())
}
