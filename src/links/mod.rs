//! Link management
//!
//! The write path ([`manager`]) and the editing-surface schema ([`form`])
//! built on top of the core resolver.

pub mod form;
pub mod manager;

pub use form::{FieldKind, FormExtension, FormField, LinkForm, LinkFormBuilder, Visibility};
pub use manager::LinkManager;
