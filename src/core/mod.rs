//! Core module containing the link record, its resolver and the contracts
//! with host systems

pub mod error;
pub mod events;
pub mod link;
pub mod reference;
pub mod registry;
pub mod resolver;
pub mod service;
pub mod validation;

pub use error::{ConfigError, LinkableError, LinkableResult};
pub use events::{EventBus, EventEnvelope, LinkEvent};
pub use link::{LinkRecord, LinkTarget, ResolvedUrl};
pub use reference::ReferenceProvider;
pub use registry::{LinkTypeBinding, LinkTypeDefinition, LinkTypeRegistry};
pub use resolver::{LinkResolver, LinkSummary};
pub use service::LinkStore;
pub use validation::{LinkValidator, ValidationExtension, ValidationResult};
