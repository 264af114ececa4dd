//! Tests for loading configuration from YAML files and wiring it into a
//! working resolver

mod harness;

use harness::*;
use linkable::prelude::*;
use std::io::Write;

const CONFIG: &str = r#"
link_types:
  - key: Product
    label: Product in the shop
labels:
  SiteTree: Page du site
events:
  capacity: 8
"#;

fn write_config(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_from_file() {
    let file = write_config(CONFIG);
    let config = LinkableConfig::from_yaml_file(file.path().to_str().unwrap()).unwrap();

    assert_eq!(config.link_types.len(), 1);
    assert_eq!(config.events.capacity, 8);
}

#[test]
fn test_missing_file_is_io_error() {
    let err = LinkableConfig::from_yaml_file("/nonexistent/links.yaml").unwrap_err();
    assert!(matches!(err, ConfigError::IoError { .. }));
    assert_eq!(err.error_code(), "CONFIG_IO_ERROR");
}

#[test]
fn test_parse_error_names_file() {
    let file = write_config("link_types: [");
    let path = file.path().to_str().unwrap().to_string();
    let err = LinkableConfig::from_yaml_file(&path).unwrap_err();

    match err {
        ConfigError::ParseError { file, .. } => assert_eq!(file, Some(path)),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_configured_type_resolves_once_bound() {
    init_tracing();
    let config = LinkableConfig::from_yaml_str(CONFIG).unwrap();
    let mut registry = config.build_registry().unwrap();

    let products = InMemoryReferenceProvider::new("Product");
    products.insert(3, ReferencedEntity::new("Blue Kettle", "/shop/blue-kettle/"));
    registry.bind_provider("Product", Arc::new(products)).unwrap();

    let resolver = LinkResolver::new(Arc::new(registry));
    let manager = LinkManager::new(Arc::new(InMemoryLinkStore::new()), resolver)
        .with_event_bus(config.event_bus());

    let saved = manager
        .save(LinkRecord::reference("Product", Some(3)))
        .await
        .unwrap();

    assert_eq!(saved.title, "Blue Kettle");
    assert_eq!(
        manager.resolver().render(&saved).as_deref(),
        Some("<a href='/shop/blue-kettle/'  >Blue Kettle</a>")
    );
    assert_eq!(
        manager.resolver().link_type_label(&LinkRecord::page(1)),
        Some("Page du site")
    );
}
