//! Built-in validation rules, one per kind of target
//!
//! Each rule returns the editor-facing message on failure.

use crate::core::registry::LinkTypeRegistry;
use url::Url;
use validator::ValidateEmail;

pub const EMPTY_URL: &str = "You must enter a URL for a link type of \"URL\"";
pub const INVALID_URL: &str = "Please enter a valid URL. Be sure to include http:// for an external URL. Or begin your internal url/anchor with a \"/\" character";
pub const EMPTY_EMAIL: &str = "You must enter an Email Address for a link type of \"Email\"";
pub const INVALID_EMAIL: &str = "Please enter a valid Email address";

/// Schemes that are absolute without an authority part
const HOSTLESS_SCHEMES: [&str; 3] = ["mailto", "news", "file"];

/// URL must be present, and either site-relative (`/`, `#`) or absolute
///
/// Absolute URLs need `scheme://host`, except for the hostless schemes
/// `mailto`, `news` and `file`. `javascript:`, `data:` and `http:example.com` fail.
pub fn url(value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err(EMPTY_URL.to_string());
    }
    if value.starts_with('#') || value.starts_with('/') || is_absolute_url(value) {
        Ok(())
    } else {
        Err(INVALID_URL.to_string())
    }
}

fn is_absolute_url(value: &str) -> bool {
    let Ok(parsed) = Url::parse(value) else {
        return false;
    };
    if HOSTLESS_SCHEMES.contains(&parsed.scheme()) {
        return true;
    }

    // The parser fills in a host for `http:example.com`; the text must carry it
    let has_authority = value
        .get(parsed.scheme().len() + 1..)
        .is_some_and(|rest| rest.starts_with("//"));
    has_authority && parsed.host_str().is_some_and(|host| !host.is_empty())
}

/// Email must be present and well-formed, with a dotted domain
pub fn email(value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err(EMPTY_EMAIL.to_string());
    }
    let dotted_domain = value
        .rsplit_once('@')
        .is_some_and(|(_, domain)| domain.contains('.'));
    if dotted_domain && value.validate_email() {
        Ok(())
    } else {
        Err(INVALID_EMAIL.to_string())
    }
}

/// A reference must name a reference type and have an object selected
///
/// The missing-object message takes precedence over the unknown-type one.
pub fn reference(
    registry: &LinkTypeRegistry,
    kind: &str,
    ref_id: Option<u64>,
) -> Result<(), String> {
    let definition = registry.get(kind);
    if definition.is_some_and(|definition| !definition.is_reference()) {
        return Err(format!("Link type \"{}\" does not link to an object", kind));
    }
    if !matches!(ref_id, Some(id) if id != 0) {
        return Err(format!("Please select a {} object to link to", kind));
    }
    if definition.is_none() {
        return Err(format!("Unknown link type \"{}\"", kind));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // === url() ===

    #[test]
    fn test_url_empty_returns_error() {
        assert_eq!(url(""), Err(EMPTY_URL.to_string()));
    }

    #[test]
    fn test_url_absolute_returns_ok() {
        assert!(url("http://example.com").is_ok());
        assert!(url("https://example.com/a/b?c=d#e").is_ok());
    }

    #[test]
    fn test_url_site_relative_returns_ok() {
        assert!(url("/about-us/").is_ok());
        assert!(url("#contact").is_ok());
    }

    #[test]
    fn test_url_garbage_returns_format_error() {
        assert_eq!(url("not a url"), Err(INVALID_URL.to_string()));
        assert_eq!(url("example.com"), Err(INVALID_URL.to_string()));
        assert_eq!(url("javascript:alert(1)"), Err(INVALID_URL.to_string()));
        assert_eq!(
            url("data:text/html,<script>alert(1)</script>"),
            Err(INVALID_URL.to_string())
        );
        assert_eq!(url("foo:bar"), Err(INVALID_URL.to_string()));
        assert_eq!(url("http:example.com"), Err(INVALID_URL.to_string()));
    }

    #[test]
    fn test_url_hostless_schemes_return_ok() {
        assert!(url("mailto:someone@example.com").is_ok());
        assert!(url("news:comp.lang.rust").is_ok());
        assert!(url("file:///srv/share/report.pdf").is_ok());
    }

    // === email() ===

    #[test]
    fn test_email_empty_returns_error() {
        assert_eq!(email(""), Err(EMPTY_EMAIL.to_string()));
    }

    #[test]
    fn test_email_valid_returns_ok() {
        assert!(email("a@b.com").is_ok());
        assert!(email("first.last+tag@example.co.uk").is_ok());
    }

    #[test]
    fn test_email_invalid_returns_error() {
        assert_eq!(email("not-an-email"), Err(INVALID_EMAIL.to_string()));
        assert_eq!(email("@example.com"), Err(INVALID_EMAIL.to_string()));
    }

    #[test]
    fn test_email_undotted_domain_returns_error() {
        assert_eq!(email("a@localhost"), Err(INVALID_EMAIL.to_string()));
        assert_eq!(email("admin@intranet"), Err(INVALID_EMAIL.to_string()));
    }

    // === reference() ===

    #[test]
    fn test_reference_unset_names_the_type() {
        let registry = LinkTypeRegistry::new();
        let err = reference(&registry, "SiteTree", None).unwrap_err();
        assert_eq!(err, "Please select a SiteTree object to link to");
        assert!(reference(&registry, "File", Some(0)).is_err());
    }

    #[test]
    fn test_reference_set_returns_ok() {
        let registry = LinkTypeRegistry::new();
        assert!(reference(&registry, "File", Some(9)).is_ok());
    }

    #[test]
    fn test_reference_unregistered_kind() {
        let registry = LinkTypeRegistry::new();
        let err = reference(&registry, "Product", Some(1)).unwrap_err();
        assert!(err.contains("Unknown link type"));
    }

    #[test]
    fn test_reference_unregistered_kind_without_id_asks_for_object() {
        let registry = LinkTypeRegistry::new();
        let err = reference(&registry, "Product", None).unwrap_err();
        assert_eq!(err, "Please select a Product object to link to");
    }

    #[test]
    fn test_reference_to_value_type_is_rejected() {
        let registry = LinkTypeRegistry::new();
        let err = reference(&registry, "URL", Some(5)).unwrap_err();
        assert_eq!(err, "Link type \"URL\" does not link to an object");
        assert!(reference(&registry, "Email", None).is_err());
    }
}
