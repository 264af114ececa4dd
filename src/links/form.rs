//! Field schema for editing link records
//!
//! The crate does not draw forms. It describes the fields an editing surface
//! needs (labels, hints, choices from the type registry, and which fields
//! show for which link type) so a host UI can render them. Hosts adjust the
//! result through [`FormExtension`]s, which run in order after the built-in
//! fields are assembled.

use crate::core::link::{LinkRecord, SITE_TREE};
use crate::core::resolver::LinkResolver;
use serde::Serialize;
use std::sync::Arc;

pub const UNPUBLISHED_WARNING: &str = "Warning: The selected page appears to have been deleted or unpublished. This link may not appear or may be broken in the frontend";

/// When a field is shown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "when", content = "type", rename_all = "snake_case")]
pub enum Visibility {
    Always,
    /// Only while the given type key is selected
    TypeIs(String),
    /// As soon as any type is selected
    TypeSelected,
}

impl Visibility {
    pub fn is_visible_for(&self, record: &LinkRecord) -> bool {
        match self {
            Visibility::Always => true,
            Visibility::TypeIs(key) => record.type_key() == Some(key.as_str()),
            Visibility::TypeSelected => record.type_key().is_some(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Email,
    Dropdown,
    /// Picker over a host-owned tree of entities
    TreePicker,
    Checkbox,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    /// Hint shown next to the field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right_title: Option<String>,
    pub visibility: Visibility,
    /// `(value, label)` options for dropdowns
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<(String, String)>,
    /// Entity kind a tree picker selects from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl FormField {
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
            right_title: None,
            visibility: Visibility::Always,
            choices: Vec::new(),
            source: None,
        }
    }

    pub fn with_right_title(mut self, right_title: impl Into<String>) -> Self {
        self.right_title = Some(right_title.into());
        self
    }

    pub fn shown_when(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }
}

/// Ordered list of fields for one record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LinkForm {
    pub fields: Vec<FormField>,
}

impl LinkForm {
    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut FormField> {
        self.fields.iter_mut().find(|f| f.name == name)
    }

    pub fn push(&mut self, field: FormField) {
        self.fields.push(field);
    }

    /// Insert `field` before the field called `before`, or at the end
    pub fn insert_before(&mut self, before: &str, field: FormField) {
        let index = self
            .fields
            .iter()
            .position(|f| f.name == before)
            .unwrap_or(self.fields.len());
        self.fields.insert(index, field);
    }

    pub fn remove(&mut self, name: &str) -> Option<FormField> {
        let index = self.fields.iter().position(|f| f.name == name)?;
        Some(self.fields.remove(index))
    }

    /// Names of the fields shown for the record's current type
    pub fn visible_fields(&self, record: &LinkRecord) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| f.visibility.is_visible_for(record))
            .map(|f| f.name.as_str())
            .collect()
    }
}

/// Host hook that adjusts the field list
pub trait FormExtension: Send + Sync {
    fn update_fields(&self, form: &mut LinkForm, record: &LinkRecord);
}

impl<F> FormExtension for F
where
    F: Fn(&mut LinkForm, &LinkRecord) + Send + Sync,
{
    fn update_fields(&self, form: &mut LinkForm, record: &LinkRecord) {
        self(form, record)
    }
}

/// Builds the field schema from the type registry
#[derive(Clone, Default)]
pub struct LinkFormBuilder {
    extensions: Vec<Arc<dyn FormExtension>>,
}

impl LinkFormBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_extension(&mut self, extension: impl FormExtension + 'static) -> &mut Self {
        self.extensions.push(Arc::new(extension));
        self
    }

    /// Name of the picker field for a reference type
    pub fn reference_field_name(key: &str) -> String {
        format!("{}ID", key)
    }

    pub fn build(&self, resolver: &LinkResolver, record: &LinkRecord) -> LinkForm {
        let registry = resolver.registry();
        let mut form = LinkForm::default();

        form.push(
            FormField::new("Title", "Title", FieldKind::Text)
                .with_right_title("Optional. Will be auto-generated from link if left blank"),
        );

        // Leading empty option lets editors leave the type unset
        let mut type_field = FormField::new("Type", "Link Type", FieldKind::Dropdown);
        type_field.choices.push((String::new(), " ".to_string()));
        type_field.choices.extend(
            registry
                .choices()
                .into_iter()
                .map(|(key, label)| (key.to_string(), label.to_string())),
        );
        form.push(type_field);

        form.push(
            FormField::new("URL", "URL", FieldKind::Text)
                .shown_when(Visibility::TypeIs("URL".to_string())),
        );
        form.push(
            FormField::new("Email", "Email Address", FieldKind::Email)
                .shown_when(Visibility::TypeIs("Email".to_string())),
        );

        for definition in registry.reference_types() {
            let label = match definition.key.as_str() {
                SITE_TREE => "Page".to_string(),
                _ => definition
                    .provider()
                    .map(|p| p.entity_kind().to_string())
                    .unwrap_or_else(|| definition.key.clone()),
            };
            let mut picker = FormField::new(
                Self::reference_field_name(&definition.key),
                label,
                FieldKind::TreePicker,
            )
            .shown_when(Visibility::TypeIs(definition.key.clone()));
            picker.source = Some(definition.key.clone());
            form.push(picker);
        }

        if resolver.targets_unpublished(record) && record.type_key() == Some(SITE_TREE) {
            if let Some(picker) = form.field_mut(&Self::reference_field_name(SITE_TREE)) {
                picker.right_title = Some(UNPUBLISHED_WARNING.to_string());
            }
        }

        form.push(
            FormField::new("Anchor", "Anchor", FieldKind::Text)
                .with_right_title("Include # at the start of your anchor name")
                .shown_when(Visibility::TypeIs(SITE_TREE.to_string())),
        );
        form.push(
            FormField::new("OpenInNewWindow", "Open link in a new window", FieldKind::Checkbox)
                .shown_when(Visibility::TypeSelected),
        );

        for extension in &self.extensions {
            extension.update_fields(&mut form, record);
        }

        form
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::registry::LinkTypeRegistry;
    use crate::storage::{InMemoryReferenceProvider, ReferencedEntity};

    fn resolver() -> LinkResolver {
        let pages = InMemoryReferenceProvider::new("Page");
        pages.insert(1, ReferencedEntity::new("Home", "/"));
        pages.insert(2, ReferencedEntity::new("Draft", "/draft/").unpublished());

        let mut registry = LinkTypeRegistry::new();
        registry.bind_provider(SITE_TREE, Arc::new(pages)).unwrap();
        registry
            .register_link_type(
                "Product",
                "Product in the shop",
                Arc::new(InMemoryReferenceProvider::new("Product")),
            )
            .unwrap();
        LinkResolver::new(Arc::new(registry))
    }

    fn names(form: &LinkForm) -> Vec<&str> {
        form.fields.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn test_field_order() {
        let form = LinkFormBuilder::new().build(&resolver(), &LinkRecord::new());
        assert_eq!(
            names(&form),
            vec![
                "Title",
                "Type",
                "URL",
                "Email",
                "FileID",
                "SiteTreeID",
                "ProductID",
                "Anchor",
                "OpenInNewWindow"
            ]
        );
    }

    #[test]
    fn test_type_choices_follow_registry() {
        let form = LinkFormBuilder::new().build(&resolver(), &LinkRecord::new());
        let choices = &form.field("Type").unwrap().choices;
        assert_eq!(choices[0], (String::new(), " ".to_string()));
        assert_eq!(choices.len(), 6);
        assert_eq!(
            choices.last().unwrap(),
            &("Product".to_string(), "Product in the shop".to_string())
        );
    }

    #[test]
    fn test_picker_labels() {
        let form = LinkFormBuilder::new().build(&resolver(), &LinkRecord::new());
        assert_eq!(form.field("SiteTreeID").unwrap().label, "Page");
        assert_eq!(form.field("FileID").unwrap().label, "File");
        assert_eq!(form.field("ProductID").unwrap().label, "Product");
    }

    #[test]
    fn test_visibility_by_type() {
        let form = LinkFormBuilder::new().build(&resolver(), &LinkRecord::new());

        assert_eq!(form.visible_fields(&LinkRecord::new()), vec!["Title", "Type"]);
        assert_eq!(
            form.visible_fields(&LinkRecord::url("/")),
            vec!["Title", "Type", "URL", "OpenInNewWindow"]
        );
        assert_eq!(
            form.visible_fields(&LinkRecord::page(1)),
            vec!["Title", "Type", "SiteTreeID", "Anchor", "OpenInNewWindow"]
        );
    }

    #[test]
    fn test_unpublished_page_warning() {
        let builder = LinkFormBuilder::new();
        let form = builder.build(&resolver(), &LinkRecord::page(2));
        assert_eq!(
            form.field("SiteTreeID").unwrap().right_title.as_deref(),
            Some(UNPUBLISHED_WARNING)
        );

        let form = builder.build(&resolver(), &LinkRecord::page(1));
        assert_eq!(form.field("SiteTreeID").unwrap().right_title, None);
    }

    #[test]
    fn test_extensions_run_in_order() {
        let mut builder = LinkFormBuilder::new();
        builder
            .add_extension(|form: &mut LinkForm, _: &LinkRecord| {
                form.remove("Anchor");
            })
            .add_extension(|form: &mut LinkForm, _: &LinkRecord| {
                form.insert_before(
                    "OpenInNewWindow",
                    FormField::new("Rel", "Rel attribute", FieldKind::Text),
                );
            });

        let form = builder.build(&resolver(), &LinkRecord::new());
        let names = names(&form);
        assert!(!names.contains(&"Anchor"));
        assert_eq!(&names[names.len() - 2..], &["Rel", "OpenInNewWindow"]);
    }

    #[test]
    fn test_schema_serializes() {
        let form = LinkFormBuilder::new().build(&resolver(), &LinkRecord::new());
        let json = serde_json::to_value(&form).unwrap();
        assert_eq!(json["fields"][2]["visibility"]["when"], "type_is");
        assert_eq!(json["fields"][2]["visibility"]["type"], "URL");
        assert!(json["fields"][0].get("choices").is_none());
    }
}
