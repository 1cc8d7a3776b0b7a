//! Variant Registry
//!
//! Bidirectional mapping between wire discriminants ("TextBlock",
//! "Action.Submit", ...) and the variants they select. A registry is built
//! once, optionally extended by the embedder, then moved into a
//! [`Codec`](crate::codec::Codec) where it is read-only.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::error::{CardError, Result};
use crate::model::{
    ActionDataKind, ActionKind, AdaptiveCard, ElementKind, InlineKind, LayoutKind, RecordKind,
    ReferenceKind,
};
use crate::wire::{Entity, FieldSpec};

/// Discriminant under which the document root is registered
pub const DOCUMENT_DISCRIMINANT: &str = "AdaptiveCard";

/// Closed set of variant categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Document,
    Element,
    Action,
    ActionData,
    Layout,
    Inline,
    Reference,
    Record,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Document => "AdaptiveCard",
            Category::Element => "Element",
            Category::Action => "Action",
            Category::ActionData => "ActionData",
            Category::Layout => "Layout",
            Category::Inline => "RichTextInline",
            Category::Reference => "Reference",
            Category::Record => "Record",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies one concrete variant independently of its discriminant
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VariantDescriptor {
    Document,
    Element(ElementKind),
    Action(ActionKind),
    ActionData(ActionDataKind),
    Layout(LayoutKind),
    Inline(InlineKind),
    Reference(ReferenceKind),
    Record(RecordKind),
    /// Custom variant added by an embedder
    Extension { category: Category, name: String },
}

impl VariantDescriptor {
    pub fn category(&self) -> Category {
        match self {
            VariantDescriptor::Document => Category::Document,
            VariantDescriptor::Element(_) => Category::Element,
            VariantDescriptor::Action(_) => Category::Action,
            VariantDescriptor::ActionData(_) => Category::ActionData,
            VariantDescriptor::Layout(_) => Category::Layout,
            VariantDescriptor::Inline(_) => Category::Inline,
            VariantDescriptor::Reference(_) => Category::Reference,
            VariantDescriptor::Record(_) => Category::Record,
            VariantDescriptor::Extension { category, .. } => *category,
        }
    }

    /// Static field metadata of the variant. Extensions carry none.
    pub fn fields(&self) -> &'static [FieldSpec] {
        match self {
            VariantDescriptor::Document => AdaptiveCard::FIELDS,
            VariantDescriptor::Element(kind) => kind.fields(),
            VariantDescriptor::Action(kind) => kind.fields(),
            VariantDescriptor::ActionData(kind) => kind.fields(),
            VariantDescriptor::Layout(kind) => kind.fields(),
            VariantDescriptor::Inline(kind) => kind.fields(),
            VariantDescriptor::Reference(kind) => kind.fields(),
            VariantDescriptor::Record(kind) => kind.fields(),
            VariantDescriptor::Extension { .. } => &[],
        }
    }

    /// Discriminant used by [`VariantRegistry::builtin`]
    pub fn default_discriminant(&self) -> Option<&'static str> {
        match self {
            VariantDescriptor::Document => Some(DOCUMENT_DISCRIMINANT),
            VariantDescriptor::Element(kind) => Some(kind.default_discriminant()),
            VariantDescriptor::Action(kind) => Some(kind.default_discriminant()),
            VariantDescriptor::ActionData(kind) => Some(kind.default_discriminant()),
            VariantDescriptor::Layout(kind) => Some(kind.default_discriminant()),
            VariantDescriptor::Inline(kind) => Some(kind.default_discriminant()),
            VariantDescriptor::Reference(kind) => Some(kind.default_discriminant()),
            VariantDescriptor::Record(kind) => Some(kind.default_discriminant()),
            VariantDescriptor::Extension { .. } => None,
        }
    }
}

impl fmt::Display for VariantDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariantDescriptor::Document => write!(f, "{}", DOCUMENT_DISCRIMINANT),
            VariantDescriptor::Element(kind) => write!(f, "Element::{:?}", kind),
            VariantDescriptor::Action(kind) => write!(f, "Action::{:?}", kind),
            VariantDescriptor::ActionData(kind) => write!(f, "ActionData::{:?}", kind),
            VariantDescriptor::Layout(kind) => write!(f, "Layout::{:?}", kind),
            VariantDescriptor::Inline(kind) => write!(f, "RichTextInline::{:?}", kind),
            VariantDescriptor::Reference(kind) => write!(f, "Reference::{:?}", kind),
            VariantDescriptor::Record(kind) => write!(f, "Record::{:?}", kind),
            VariantDescriptor::Extension { category, name } => write!(f, "{}::{}", category, name),
        }
    }
}

/// Discriminant <-> variant mapping
#[derive(Debug, Clone, Default)]
pub struct VariantRegistry {
    by_discriminant: HashMap<String, VariantDescriptor>,
    by_descriptor: HashMap<VariantDescriptor, String>,
}

impl VariantRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every built-in variant under its
    /// documented discriminant
    pub fn builtin() -> Self {
        let mut registry = Self::new();

        registry.register(DOCUMENT_DISCRIMINANT, VariantDescriptor::Document);
        for kind in ElementKind::ALL {
            registry.register(kind.default_discriminant(), VariantDescriptor::Element(*kind));
        }
        for kind in ActionKind::ALL {
            registry.register(kind.default_discriminant(), VariantDescriptor::Action(*kind));
        }
        for kind in ActionDataKind::ALL {
            registry.register(kind.default_discriminant(), VariantDescriptor::ActionData(*kind));
        }
        for kind in LayoutKind::ALL {
            registry.register(kind.default_discriminant(), VariantDescriptor::Layout(*kind));
        }
        for kind in InlineKind::ALL {
            registry.register(kind.default_discriminant(), VariantDescriptor::Inline(*kind));
        }
        for kind in ReferenceKind::ALL {
            registry.register(kind.default_discriminant(), VariantDescriptor::Reference(*kind));
        }
        for kind in RecordKind::ALL {
            registry.register(kind.default_discriminant(), VariantDescriptor::Record(*kind));
        }

        registry
    }

    /// Register a variant under a discriminant.
    ///
    /// Upsert: an earlier mapping of either the discriminant or the
    /// descriptor is released first, so the mapping stays one-to-one.
    pub fn register(
        &mut self,
        discriminant: impl Into<String>,
        descriptor: VariantDescriptor,
    ) -> &mut Self {
        let discriminant = discriminant.into();

        if let Some(previous) = self.by_discriminant.remove(&discriminant) {
            if previous != descriptor {
                tracing::debug!(%discriminant, %previous, %descriptor, "replacing registered variant");
            }
            self.by_descriptor.remove(&previous);
        }
        if let Some(previous) = self.by_descriptor.remove(&descriptor) {
            if previous != discriminant {
                tracing::debug!(%descriptor, %previous, %discriminant, "renaming registered variant");
            }
            self.by_discriminant.remove(&previous);
        }

        self.by_descriptor.insert(descriptor.clone(), discriminant.clone());
        self.by_discriminant.insert(discriminant, descriptor);
        self
    }

    /// Register a custom variant for a category
    pub fn register_extension(
        &mut self,
        discriminant: impl Into<String>,
        category: Category,
    ) -> &mut Self {
        let discriminant = discriminant.into();
        let descriptor = VariantDescriptor::Extension {
            category,
            name: discriminant.clone(),
        };
        self.register(discriminant, descriptor)
    }

    /// Look up the variant a discriminant selects
    pub fn resolve_by_discriminant(&self, name: &str) -> Result<&VariantDescriptor> {
        self.by_discriminant
            .get(name)
            .ok_or_else(|| CardError::UnknownType {
                discriminant: name.to_string(),
            })
    }

    /// Look up the discriminant of a variant
    pub fn resolve_discriminant(&self, descriptor: &VariantDescriptor) -> Result<&str> {
        self.by_descriptor
            .get(descriptor)
            .map(String::as_str)
            .ok_or_else(|| CardError::UnregisteredVariant(descriptor.to_string()))
    }

    /// Check whether a discriminant is registered
    pub fn contains(&self, name: &str) -> bool {
        self.by_discriminant.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.by_discriminant.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_discriminant.is_empty()
    }

    /// All mappings, sorted by discriminant
    pub fn entries(&self) -> Vec<(&str, &VariantDescriptor)> {
        let mut entries: Vec<_> = self
            .by_discriminant
            .iter()
            .map(|(k, v)| (k.as_str(), v))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_is_bijective() {
        let registry = VariantRegistry::builtin();

        for (discriminant, descriptor) in registry.entries() {
            assert_eq!(registry.resolve_discriminant(descriptor).unwrap(), discriminant);
        }
        assert_eq!(registry.by_discriminant.len(), registry.by_descriptor.len());
    }

    #[test]
    fn test_builtin_discriminants() {
        let registry = VariantRegistry::builtin();

        assert_eq!(
            registry.resolve_by_discriminant("TextBlock").unwrap(),
            &VariantDescriptor::Element(ElementKind::TextBlock)
        );
        assert_eq!(
            registry.resolve_by_discriminant("Input.ChoiceSet").unwrap(),
            &VariantDescriptor::Element(ElementKind::InputChoiceSet)
        );
        assert_eq!(
            registry.resolve_by_discriminant("Action.Submit").unwrap(),
            &VariantDescriptor::Action(ActionKind::Submit)
        );
        assert_eq!(
            registry.resolve_by_discriminant("task/fetch").unwrap(),
            &VariantDescriptor::ActionData(ActionDataKind::TaskFetch)
        );
        assert_eq!(
            registry.resolve_by_discriminant("Layout.AreaGrid").unwrap(),
            &VariantDescriptor::Layout(LayoutKind::AreaGrid)
        );
        assert_eq!(
            registry.resolve_by_discriminant("Column").unwrap(),
            &VariantDescriptor::Record(RecordKind::Column)
        );
        assert_eq!(
            registry.resolve_discriminant(&VariantDescriptor::Document).unwrap(),
            "AdaptiveCard"
        );
    }

    #[test]
    fn test_unknown_discriminant() {
        let registry = VariantRegistry::builtin();

        match registry.resolve_by_discriminant("Action.Teleport") {
            Err(CardError::UnknownType { discriminant }) => {
                assert_eq!(discriminant, "Action.Teleport")
            }
            other => panic!("Expected UnknownType, got {:?}", other),
        }
    }

    #[test]
    fn test_unregistered_variant() {
        let registry = VariantRegistry::new();

        match registry.resolve_discriminant(&VariantDescriptor::Element(ElementKind::Badge)) {
            Err(CardError::UnregisteredVariant(name)) => assert_eq!(name, "Element::Badge"),
            other => panic!("Expected UnregisteredVariant, got {:?}", other),
        }
    }

    #[test]
    fn test_register_is_idempotent() {
        let mut registry = VariantRegistry::builtin();
        let before = registry.len();

        registry.register("TextBlock", VariantDescriptor::Element(ElementKind::TextBlock));
        registry.register("TextBlock", VariantDescriptor::Element(ElementKind::TextBlock));

        assert_eq!(registry.len(), before);
    }

    #[test]
    fn test_register_upsert_keeps_bijection() {
        let mut registry = VariantRegistry::builtin();
        let descriptor = VariantDescriptor::Element(ElementKind::TextBlock);

        registry.register("Text", descriptor.clone());

        assert!(!registry.contains("TextBlock"));
        assert_eq!(registry.resolve_by_discriminant("Text").unwrap(), &descriptor);
        assert_eq!(registry.resolve_discriminant(&descriptor).unwrap(), "Text");
        assert_eq!(registry.by_discriminant.len(), registry.by_descriptor.len());
    }

    #[test]
    fn test_register_extension() {
        let mut registry = VariantRegistry::builtin();
        registry.register_extension("CustomContainer", Category::Element);

        let descriptor = registry.resolve_by_discriminant("CustomContainer").unwrap();
        assert_eq!(descriptor.category(), Category::Element);
        assert!(descriptor.fields().is_empty());
    }
}
