//! Polymorphic Codec
//!
//! Encodes entity trees to JSON and decodes them back, resolving every
//! `"type"` discriminant through the [`VariantRegistry`] the codec owns.

use serde_json::Value;
use std::sync::OnceLock;

use crate::error::{CardError, Result};
use crate::model::{
    Action, ActionData, AdaptiveCard, Element, Layout, Reference, RichTextInline,
};
use crate::registry::{Category, VariantDescriptor, VariantRegistry};
use crate::wire::{expect_object, kind_of, Entity, Object, WireValue};

/// Encoder/decoder bound to one immutable registry.
///
/// The registry cannot change once the codec exists, so a codec can be shared
/// across threads freely.
#[derive(Debug, Clone)]
pub struct Codec {
    registry: VariantRegistry,
}

impl Default for Codec {
    fn default() -> Self {
        Self::new(VariantRegistry::builtin())
    }
}

impl Codec {
    pub fn new(registry: VariantRegistry) -> Self {
        Self { registry }
    }

    /// Process-wide codec with the built-in variants only
    pub fn shared() -> &'static Codec {
        static SHARED: OnceLock<Codec> = OnceLock::new();
        SHARED.get_or_init(Codec::default)
    }

    pub fn registry(&self) -> &VariantRegistry {
        &self.registry
    }

    /// Encode a value into a JSON tree
    pub fn to_value<T: WireValue>(&self, value: &T) -> Result<Value> {
        value.encode(self)
    }

    /// Encode a value into compact JSON bytes
    pub fn serialize<T: WireValue>(&self, value: &T) -> Result<Vec<u8>> {
        let tree = self.to_value(value)?;
        serde_json::to_vec(&tree).map_err(|e| CardError::malformed(e.to_string()))
    }

    /// Encode a value into indented JSON text
    pub fn serialize_pretty<T: WireValue>(&self, value: &T) -> Result<String> {
        let tree = self.to_value(value)?;
        serde_json::to_string_pretty(&tree).map_err(|e| CardError::malformed(e.to_string()))
    }

    /// Decode a JSON tree into `T`.
    ///
    /// `T` may be a concrete variant (an explicit `"type"` must then match it)
    /// or a category such as [`Element`], in which case the payload's
    /// discriminant selects the variant. An unknown discriminant is an error
    /// here, unlike inside sequences and optional fields.
    pub fn from_value<T: WireValue>(&self, value: &Value) -> Result<T> {
        T::decode(value, self)?.ok_or_else(|| CardError::UnknownType {
            discriminant: discriminant_of(value).unwrap_or_default().to_string(),
        })
    }

    /// Decode JSON bytes into `T`
    pub fn deserialize<T: WireValue>(&self, bytes: &[u8]) -> Result<T> {
        let tree = parse(bytes)?;
        self.from_value(&tree)
    }

    /// Decode JSON text into `T`
    pub fn deserialize_str<T: WireValue>(&self, text: &str) -> Result<T> {
        self.deserialize(text.as_bytes())
    }

    /// Decode a payload of any polymorphic category, chosen by its discriminant
    pub fn deserialize_any(&self, bytes: &[u8]) -> Result<AnyVariant> {
        let tree = parse(bytes)?;
        self.any_from_value(&tree)
    }

    pub fn any_from_value(&self, value: &Value) -> Result<AnyVariant> {
        let raw = expect_object(value, "tagged")?;
        let discriminant = read_discriminant(raw)?.unwrap_or_default();
        let descriptor = self.registry.resolve_by_discriminant(discriminant)?;

        match descriptor.category() {
            Category::Document => {
                let card = AdaptiveCard::decode_fields(raw, self)?;
                Ok(AnyVariant::Document(Box::new(card)))
            }
            Category::Element => Element::decode_tagged(value, self).map(AnyVariant::Element),
            Category::Action => Action::decode_tagged(value, self).map(AnyVariant::Action),
            Category::ActionData => {
                ActionData::decode_tagged(value, self).map(AnyVariant::ActionData)
            }
            Category::Layout => Layout::decode_tagged(value, self).map(AnyVariant::Layout),
            Category::Inline => {
                RichTextInline::decode_tagged(value, self).map(AnyVariant::Inline)
            }
            Category::Reference => {
                Reference::decode_tagged(value, self).map(AnyVariant::Reference)
            }
            Category::Record => Err(CardError::TypeMismatch {
                expected: "polymorphic variant".to_string(),
                actual: discriminant.to_string(),
            }),
        }
    }

    /// Resolve the discriminant of a payload that must belong to `category`.
    pub(crate) fn resolve<'a>(
        &self,
        value: &'a Value,
        category: Category,
    ) -> Result<(&'a Object, VariantDescriptor)> {
        let raw = expect_object(value, category.as_str())?;
        // A missing discriminant resolves like any other unknown name
        let discriminant = read_discriminant(raw)?.unwrap_or_default();
        let descriptor = self.registry.resolve_by_discriminant(discriminant)?;

        if descriptor.category() != category {
            return Err(CardError::TypeMismatch {
                expected: category.to_string(),
                actual: discriminant.to_string(),
            });
        }
        Ok((raw, descriptor.clone()))
    }

    /// Reject an explicit `"type"` that names a different variant.
    pub(crate) fn check_discriminant(
        &self,
        raw: &Object,
        descriptor: &VariantDescriptor,
    ) -> Result<()> {
        let Some(actual) = read_discriminant(raw)? else {
            return Ok(());
        };
        let expected = self.registry.resolve_discriminant(descriptor)?;
        if actual != expected {
            return Err(CardError::TypeMismatch {
                expected: expected.to_string(),
                actual: actual.to_string(),
            });
        }
        Ok(())
    }
}

/// A decoded payload of any polymorphic category
#[derive(Debug, Clone, PartialEq)]
pub enum AnyVariant {
    Document(Box<AdaptiveCard>),
    Element(Element),
    Action(Action),
    ActionData(ActionData),
    Layout(Layout),
    Inline(RichTextInline),
    Reference(Reference),
}

impl AnyVariant {
    pub fn category(&self) -> Category {
        match self {
            AnyVariant::Document(_) => Category::Document,
            AnyVariant::Element(_) => Category::Element,
            AnyVariant::Action(_) => Category::Action,
            AnyVariant::ActionData(_) => Category::ActionData,
            AnyVariant::Layout(_) => Category::Layout,
            AnyVariant::Inline(_) => Category::Inline,
            AnyVariant::Reference(_) => Category::Reference,
        }
    }
}

fn parse(bytes: &[u8]) -> Result<Value> {
    serde_json::from_slice(bytes).map_err(|e| CardError::malformed(e.to_string()))
}

fn read_discriminant(raw: &Object) -> Result<Option<&str>> {
    match raw.get("type") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(other) => Err(CardError::malformed(format!(
            "\"type\" must be a string, got {}",
            kind_of(other)
        ))
        .within("type")),
    }
}

fn discriminant_of(value: &Value) -> Option<&str> {
    value.get("type").and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ElementKind, TextBlock};
    use serde_json::json;

    #[test]
    fn test_serialize_injects_type() {
        let codec = Codec::default();
        let block = TextBlock {
            text: Some("Hello".to_string()),
            ..Default::default()
        };

        let value = codec.to_value(&block).unwrap();
        assert_eq!(value, json!({"type": "TextBlock", "text": "Hello"}));

        let bytes = codec.serialize(&Element::from(block)).unwrap();
        assert!(String::from_utf8(bytes).unwrap().starts_with("{\"type\":\"TextBlock\""));
    }

    #[test]
    fn test_type_mismatch_on_concrete_target() {
        let codec = Codec::default();

        match codec.deserialize_str::<TextBlock>(r#"{"type": "Image", "url": "x"}"#) {
            Err(CardError::TypeMismatch { expected, actual }) => {
                assert_eq!(expected, "TextBlock");
                assert_eq!(actual, "Image");
            }
            other => panic!("Expected TypeMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_concrete_target_without_type() {
        let codec = Codec::default();
        let block: TextBlock = codec.deserialize_str(r#"{"text": "untagged"}"#).unwrap();
        assert_eq!(block.text.as_deref(), Some("untagged"));
    }

    #[test]
    fn test_category_decode_unknown_is_error() {
        let codec = Codec::default();

        match codec.deserialize_str::<Element>(r#"{"type": "Hologram"}"#) {
            Err(CardError::UnknownType { discriminant }) => assert_eq!(discriminant, "Hologram"),
            other => panic!("Expected UnknownType, got {:?}", other),
        }
    }

    #[test]
    fn test_category_decode_wrong_category() {
        let codec = Codec::default();

        match codec.deserialize_str::<Element>(r#"{"type": "Action.Submit"}"#) {
            Err(CardError::TypeMismatch { expected, actual }) => {
                assert_eq!(expected, "Element");
                assert_eq!(actual, "Action.Submit");
            }
            other => panic!("Expected TypeMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_payload() {
        let codec = Codec::default();

        assert!(matches!(
            codec.deserialize_str::<AdaptiveCard>("{not json"),
            Err(CardError::MalformedPayload(_))
        ));
        assert!(matches!(
            codec.deserialize_str::<Element>("[1, 2]"),
            Err(CardError::MalformedPayload(_))
        ));

        let err = codec
            .deserialize_str::<Element>(r#"{"type": 7}"#)
            .unwrap_err();
        assert_eq!(err.path(), Some("type"));
    }

    #[test]
    fn test_deserialize_any() {
        let codec = Codec::default();

        let any = codec
            .deserialize_any(br#"{"type": "Input.Text", "id": "name"}"#)
            .unwrap();
        match &any {
            AnyVariant::Element(element) => {
                assert_eq!(element.kind(), Some(ElementKind::InputText))
            }
            other => panic!("Expected Element, got {:?}", other),
        }

        let any = codec
            .deserialize_any(br#"{"type": "AdaptiveCard", "version": "1.2"}"#)
            .unwrap();
        assert_eq!(any.category(), Category::Document);

        assert!(matches!(
            codec.deserialize_any(br#"{"type": "Column"}"#),
            Err(CardError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_shared_codec_is_builtin() {
        assert!(Codec::shared().registry().contains("Action.ShowCard"));
    }
}
