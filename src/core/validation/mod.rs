//! Validation of link records before they are written
//!
//! Built-in rules are selected by the record's target; exactly one runs.
//! Hosts may then add their own checks through [`ValidationExtension`]s,
//! which run in registration order against the same [`ValidationResult`].
//! The combined outcome is a conjunction: an extension can add a failure
//! but never clear one.

pub mod validators;

use crate::core::link::{LinkRecord, LinkTarget};
use crate::core::registry::LinkTypeRegistry;
use serde::Serialize;
use std::sync::Arc;

/// Outcome of validating a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    valid: bool,
    message: Option<String>,
}

impl ValidationResult {
    /// A passing result
    pub fn valid() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }

    /// A failing result with a message
    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: Some(message.into()),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Message of the first failure, unless an extension replaced it
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Record a failure; the earliest message is kept
    pub fn fail(&mut self, message: impl Into<String>) {
        self.valid = false;
        if self.message.is_none() {
            self.message = Some(message.into());
        }
    }

    /// Record a failure and make its message the one shown to the editor
    pub fn fail_with_override(&mut self, message: impl Into<String>) {
        self.valid = false;
        self.message = Some(message.into());
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::valid()
    }
}

/// Host-supplied check run after the built-in rules
pub trait ValidationExtension: Send + Sync {
    fn validate(&self, record: &LinkRecord, result: &mut ValidationResult);
}

impl<F> ValidationExtension for F
where
    F: Fn(&LinkRecord, &mut ValidationResult) + Send + Sync,
{
    fn validate(&self, record: &LinkRecord, result: &mut ValidationResult) {
        self(record, result)
    }
}

/// Validator combining built-in rules with registered extensions
#[derive(Clone, Default)]
pub struct LinkValidator {
    extensions: Vec<Arc<dyn ValidationExtension>>,
}

impl LinkValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an extension; extensions run in registration order
    pub fn add_extension(&mut self, extension: impl ValidationExtension + 'static) -> &mut Self {
        self.extensions.push(Arc::new(extension));
        self
    }

    pub fn extension_count(&self) -> usize {
        self.extensions.len()
    }

    /// Run the built-in rule for the record's type, then every extension
    pub fn validate(&self, registry: &LinkTypeRegistry, record: &LinkRecord) -> ValidationResult {
        let builtin = match &record.target {
            Some(LinkTarget::Url { url }) => validators::url(url),
            Some(LinkTarget::Email { email }) => validators::email(email),
            Some(LinkTarget::Reference { kind, ref_id }) => {
                validators::reference(registry, kind, *ref_id)
            }
            None => Ok(()),
        };

        let mut result = match builtin {
            Ok(()) => ValidationResult::valid(),
            Err(message) => ValidationResult::invalid(message),
        };

        for extension in &self.extensions {
            extension.validate(record, &mut result);
        }

        if !result.is_valid() {
            tracing::debug!(
                link_id = record.id,
                link_type = record.type_key().unwrap_or(""),
                message = result.message().unwrap_or(""),
                "Link failed validation"
            );
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::validation::validators::{INVALID_EMAIL, INVALID_URL};

    fn registry() -> LinkTypeRegistry {
        LinkTypeRegistry::new()
    }

    #[test]
    fn test_untyped_record_is_valid() {
        let result = LinkValidator::new().validate(&registry(), &LinkRecord::new());
        assert!(result.is_valid());
        assert_eq!(result.message(), None);
    }

    #[test]
    fn test_url_rules() {
        let validator = LinkValidator::new();
        assert!(validator
            .validate(&registry(), &LinkRecord::url("http://example.com"))
            .is_valid());

        let result = validator.validate(&registry(), &LinkRecord::url("not a url"));
        assert!(!result.is_valid());
        assert_eq!(result.message(), Some(INVALID_URL));
    }

    #[test]
    fn test_script_urls_are_rejected() {
        let validator = LinkValidator::new();
        for url in ["javascript:alert(1)", "data:text/html,<b>x</b>", "http:example.com"] {
            let result = validator.validate(&registry(), &LinkRecord::url(url));
            assert_eq!(result.message(), Some(INVALID_URL), "{url} should be rejected");
        }
    }

    #[test]
    fn test_email_rules() {
        let validator = LinkValidator::new();
        assert!(validator
            .validate(&registry(), &LinkRecord::email("a@b.com"))
            .is_valid());

        let result = validator.validate(&registry(), &LinkRecord::email("not-an-email"));
        assert_eq!(result.message(), Some(INVALID_EMAIL));
    }

    #[test]
    fn test_reference_rules() {
        let validator = LinkValidator::new();
        let result = validator.validate(&registry(), &LinkRecord::reference("File", None));
        assert!(!result.is_valid());
        assert!(result.message().unwrap().contains("File"));

        assert!(validator.validate(&registry(), &LinkRecord::file(4)).is_valid());
    }

    #[test]
    fn test_reference_to_value_type_is_invalid() {
        let validator = LinkValidator::new();
        let result = validator.validate(&registry(), &LinkRecord::reference("URL", Some(5)));
        assert!(!result.is_valid());
        assert!(result.message().unwrap().contains("does not link to an object"));
    }

    #[test]
    fn test_extension_can_add_failure() {
        let mut validator = LinkValidator::new();
        validator.add_extension(|record: &LinkRecord, result: &mut ValidationResult| {
            if record.title.len() > 10 {
                result.fail("Title is too long");
            }
        });

        let record = LinkRecord::url("/ok").with_title("A very long title");
        let result = validator.validate(&registry(), &record);
        assert!(!result.is_valid());
        assert_eq!(result.message(), Some("Title is too long"));
    }

    #[test]
    fn test_builtin_message_takes_precedence() {
        let mut validator = LinkValidator::new();
        validator.add_extension(|_: &LinkRecord, result: &mut ValidationResult| {
            result.fail("Extension says no");
        });

        let result = validator.validate(&registry(), &LinkRecord::url("not a url"));
        assert_eq!(result.message(), Some(INVALID_URL));
    }

    #[test]
    fn test_extension_can_override_message() {
        let mut validator = LinkValidator::new();
        validator.add_extension(|_: &LinkRecord, result: &mut ValidationResult| {
            if !result.is_valid() {
                result.fail_with_override("Custom wording");
            }
        });

        let result = validator.validate(&registry(), &LinkRecord::url(""));
        assert!(!result.is_valid());
        assert_eq!(result.message(), Some("Custom wording"));
    }

    #[test]
    fn test_extensions_run_in_order() {
        let mut validator = LinkValidator::new();
        validator
            .add_extension(|_: &LinkRecord, result: &mut ValidationResult| result.fail("first"))
            .add_extension(|_: &LinkRecord, result: &mut ValidationResult| result.fail("second"));

        assert_eq!(validator.extension_count(), 2);
        let result = validator.validate(&registry(), &LinkRecord::url("/fine"));
        assert_eq!(result.message(), Some("first"));
    }
}
