//! Multi-shape scalars
//!
//! Fields whose wire value may take one of several forms. Each decoder is an
//! ordered list of shape attempts; the first shape that accepts the payload
//! wins and there is no backtracking. When no shape applies the decoder fails
//! with [`CardError::InvalidShape`].

use serde_json::Value;
use std::fmt;

use crate::codec::Codec;
use crate::enums::FallbackOption;
use crate::error::{CardError, Result};
use crate::model::{Action, ActionData, Element};
use crate::registry::Category;
use crate::validate::VersionWalker;
use crate::version::V1_2;
use crate::wire::{decode_field, kind_of, whole_number, FieldSpec, Object, Walk, WireValue};

/// Parse `"<n>px"`
fn parse_pixels(s: &str) -> Option<u32> {
    s.trim().strip_suffix("px")?.trim().parse().ok()
}

fn pixels_value(n: u32) -> Value {
    Value::String(format!("{}px", n))
}

/// Whole number from a JSON number, rejecting fractions with `shape` context.
fn whole(value: &Value, shape: &'static str) -> Result<i64> {
    whole_number(value).map_err(|e| match e {
        CardError::MalformedPayload(reason) => CardError::shape(shape, reason),
        other => other,
    })
}

macro_rules! leaf_walk {
    ($($ty:ty),*) => {
        $(
            impl Walk for $ty {
                fn is_empty(&self) -> bool {
                    false
                }
            }
        )*
    };
}

leaf_walk!(GridColumnWidth, ColumnWidth, BlockElementHeight, LabelWidth, TargetElement);

// ----------------------------------------------------------------------------
// Grid column width
// ----------------------------------------------------------------------------

/// Width of one column of `Layout.AreaGrid`.
///
/// Decode order: whole number (weight), then `"<n>px"` string (pixels).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridColumnWidth {
    /// Relative weight
    Weight(i64),
    /// Fixed width in pixels
    Pixels(u32),
}

impl fmt::Display for GridColumnWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridColumnWidth::Weight(w) => write!(f, "{}", w),
            GridColumnWidth::Pixels(px) => write!(f, "{}px", px),
        }
    }
}

impl WireValue for GridColumnWidth {
    fn encode(&self, _codec: &Codec) -> Result<Value> {
        Ok(match self {
            GridColumnWidth::Weight(w) => Value::from(*w),
            GridColumnWidth::Pixels(px) => pixels_value(*px),
        })
    }

    fn decode(value: &Value, _codec: &Codec) -> Result<Option<Self>> {
        const SHAPE: &str = "grid column width";
        match value {
            Value::Number(_) => whole(value, SHAPE).map(|w| Some(GridColumnWidth::Weight(w))),
            Value::String(s) => parse_pixels(s)
                .map(|px| Some(GridColumnWidth::Pixels(px)))
                .ok_or_else(|| {
                    CardError::shape(SHAPE, format!("string must end with \"px\", got {:?}", s))
                }),
            other => Err(CardError::shape(
                SHAPE,
                format!("expected number or \"<n>px\", got {}", kind_of(other)),
            )),
        }
    }
}

// ----------------------------------------------------------------------------
// Column width
// ----------------------------------------------------------------------------

/// Width of a `Column` or table column.
///
/// Decode order: number (weight), `"auto"`, `"stretch"`, `"<n>px"`.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnWidth {
    Auto,
    Stretch,
    Pixels(u32),
    /// Relative weight, kept exactly as received
    Weight(serde_json::Number),
}

impl ColumnWidth {
    pub fn weight(w: u32) -> Self {
        ColumnWidth::Weight(w.into())
    }
}

impl WireValue for ColumnWidth {
    fn encode(&self, _codec: &Codec) -> Result<Value> {
        Ok(match self {
            ColumnWidth::Auto => Value::String("auto".to_string()),
            ColumnWidth::Stretch => Value::String("stretch".to_string()),
            ColumnWidth::Pixels(px) => pixels_value(*px),
            ColumnWidth::Weight(n) => Value::Number(n.clone()),
        })
    }

    fn decode(value: &Value, _codec: &Codec) -> Result<Option<Self>> {
        const SHAPE: &str = "column width";
        match value {
            Value::Number(n) => Ok(Some(ColumnWidth::Weight(n.clone()))),
            Value::String(s) if s.eq_ignore_ascii_case("auto") => Ok(Some(ColumnWidth::Auto)),
            Value::String(s) if s.eq_ignore_ascii_case("stretch") => {
                Ok(Some(ColumnWidth::Stretch))
            }
            Value::String(s) => parse_pixels(s)
                .map(|px| Some(ColumnWidth::Pixels(px)))
                .ok_or_else(|| {
                    CardError::shape(
                        SHAPE,
                        format!("expected \"auto\", \"stretch\" or \"<n>px\", got {:?}", s),
                    )
                }),
            other => Err(CardError::shape(
                SHAPE,
                format!("expected number or string, got {}", kind_of(other)),
            )),
        }
    }
}

// ----------------------------------------------------------------------------
// Block element height
// ----------------------------------------------------------------------------

/// Height of an element: `"auto"`, `"stretch"` or `"<n>px"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockElementHeight {
    Auto,
    Stretch,
    Pixels(u32),
}

impl WireValue for BlockElementHeight {
    fn encode(&self, _codec: &Codec) -> Result<Value> {
        Ok(match self {
            BlockElementHeight::Auto => Value::String("auto".to_string()),
            BlockElementHeight::Stretch => Value::String("stretch".to_string()),
            BlockElementHeight::Pixels(px) => pixels_value(*px),
        })
    }

    fn decode(value: &Value, _codec: &Codec) -> Result<Option<Self>> {
        const SHAPE: &str = "element height";
        let s = value.as_str().ok_or_else(|| {
            CardError::shape(SHAPE, format!("expected string, got {}", kind_of(value)))
        })?;
        if s.eq_ignore_ascii_case("auto") {
            return Ok(Some(BlockElementHeight::Auto));
        }
        if s.eq_ignore_ascii_case("stretch") {
            return Ok(Some(BlockElementHeight::Stretch));
        }
        parse_pixels(s)
            .map(|px| Some(BlockElementHeight::Pixels(px)))
            .ok_or_else(|| {
                CardError::shape(
                    SHAPE,
                    format!("expected \"auto\", \"stretch\" or \"<n>px\", got {:?}", s),
                )
            })
    }
}

// ----------------------------------------------------------------------------
// Input label width
// ----------------------------------------------------------------------------

/// Width of an inline input label.
///
/// Decode order: whole number (percentage of the row), then `"<n>px"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelWidth {
    Percent(u32),
    Pixels(u32),
}

impl WireValue for LabelWidth {
    fn encode(&self, _codec: &Codec) -> Result<Value> {
        Ok(match self {
            LabelWidth::Percent(p) => Value::from(*p),
            LabelWidth::Pixels(px) => pixels_value(*px),
        })
    }

    fn decode(value: &Value, _codec: &Codec) -> Result<Option<Self>> {
        const SHAPE: &str = "label width";
        match value {
            Value::Number(_) => {
                let n = whole(value, SHAPE)?;
                u32::try_from(n)
                    .map(|p| Some(LabelWidth::Percent(p)))
                    .map_err(|_| CardError::shape(SHAPE, format!("{} is out of range", n)))
            }
            Value::String(s) => parse_pixels(s)
                .map(|px| Some(LabelWidth::Pixels(px)))
                .ok_or_else(|| {
                    CardError::shape(SHAPE, format!("string must end with \"px\", got {:?}", s))
                }),
            other => Err(CardError::shape(
                SHAPE,
                format!("expected number or \"<n>px\", got {}", kind_of(other)),
            )),
        }
    }
}

// ----------------------------------------------------------------------------
// Toggle-visibility target
// ----------------------------------------------------------------------------

/// Element whose visibility `Action.ToggleVisibility` changes.
///
/// Decode order: bare id string, then `{"elementId", "isVisible"}` object.
/// Encoding uses the bare string whenever no visibility is forced.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TargetElement {
    pub element_id: String,
    /// `None` toggles; `Some` forces the given visibility
    pub is_visible: Option<bool>,
}

impl TargetElement {
    pub fn toggle(element_id: impl Into<String>) -> Self {
        Self {
            element_id: element_id.into(),
            is_visible: None,
        }
    }

    pub fn set(element_id: impl Into<String>, visible: bool) -> Self {
        Self {
            element_id: element_id.into(),
            is_visible: Some(visible),
        }
    }
}

impl From<&str> for TargetElement {
    fn from(id: &str) -> Self {
        TargetElement::toggle(id)
    }
}

impl WireValue for TargetElement {
    fn encode(&self, _codec: &Codec) -> Result<Value> {
        match self.is_visible {
            None => Ok(Value::String(self.element_id.clone())),
            Some(visible) => {
                let mut out = Object::new();
                out.insert("elementId".to_string(), Value::String(self.element_id.clone()));
                out.insert("isVisible".to_string(), Value::Bool(visible));
                Ok(Value::Object(out))
            }
        }
    }

    fn decode(value: &Value, codec: &Codec) -> Result<Option<Self>> {
        const SHAPE: &str = "toggle target";
        match value {
            Value::String(id) => Ok(Some(TargetElement::toggle(id.as_str()))),
            Value::Object(raw) => {
                let element_id: String = decode_field(raw, "elementId", codec)?;
                if element_id.is_empty() {
                    return Err(CardError::shape(SHAPE, "object is missing \"elementId\""));
                }
                let is_visible: Option<bool> = decode_field(raw, "isVisible", codec)?;
                Ok(Some(TargetElement {
                    element_id,
                    is_visible,
                }))
            }
            other => Err(CardError::shape(
                SHAPE,
                format!("expected string or object, got {}", kind_of(other)),
            )),
        }
    }
}

// ----------------------------------------------------------------------------
// Fallback
// ----------------------------------------------------------------------------

/// What a renderer shows when it cannot render the owner.
///
/// Decode order: option string (`"drop"`), then element, then action. The
/// shape is committed as soon as the payload's form selects it; an object is
/// routed by the category of its discriminant. An object whose discriminant
/// is unknown leaves the field unset.
#[derive(Debug, Clone, PartialEq)]
pub enum Fallback {
    Option(FallbackOption),
    Element(Box<Element>),
    Action(Box<Action>),
}

impl From<FallbackOption> for Fallback {
    fn from(option: FallbackOption) -> Self {
        Fallback::Option(option)
    }
}

impl From<Element> for Fallback {
    fn from(element: Element) -> Self {
        Fallback::Element(Box::new(element))
    }
}

impl From<Action> for Fallback {
    fn from(action: Action) -> Self {
        Fallback::Action(Box::new(action))
    }
}

impl Walk for Fallback {
    fn is_empty(&self) -> bool {
        false
    }

    fn walk(&self, walker: &mut VersionWalker) {
        match self {
            Fallback::Option(_) => {}
            Fallback::Element(element) => element.walk(walker),
            Fallback::Action(action) => action.walk(walker),
        }
    }
}

impl WireValue for Fallback {
    fn encode(&self, codec: &Codec) -> Result<Value> {
        match self {
            Fallback::Option(option) => option.encode(codec),
            Fallback::Element(element) => element.encode(codec),
            Fallback::Action(action) => action.encode(codec),
        }
    }

    fn decode(value: &Value, codec: &Codec) -> Result<Option<Self>> {
        const SHAPE: &str = "fallback";
        match value {
            Value::String(_) => FallbackOption::decode(value, codec)
                .map(|option| option.map(Fallback::Option)),
            Value::Object(raw) => {
                let discriminant = match raw.get("type") {
                    Some(Value::String(s)) => s.as_str(),
                    _ => return Err(CardError::shape(SHAPE, "object has no string \"type\"")),
                };
                let category = match codec.registry().resolve_by_discriminant(discriminant) {
                    Ok(descriptor) => descriptor.category(),
                    Err(CardError::UnknownType { .. }) => {
                        tracing::debug!(%discriminant, "skipping unknown fallback variant");
                        return Ok(None);
                    }
                    Err(e) => return Err(e),
                };
                match category {
                    Category::Element => Element::decode_tagged(value, codec)
                        .map(|element| Some(Fallback::Element(Box::new(element)))),
                    Category::Action => Action::decode_tagged(value, codec)
                        .map(|action| Some(Fallback::Action(Box::new(action)))),
                    other => Err(CardError::shape(
                        SHAPE,
                        format!("{:?} is a {}, not an element or action", discriminant, other),
                    )),
                }
            }
            other => Err(CardError::shape(
                SHAPE,
                format!("expected string or object, got {}", kind_of(other)),
            )),
        }
    }
}

// ----------------------------------------------------------------------------
// Submit data
// ----------------------------------------------------------------------------

const SUBMIT_DATA_FIELDS: &[FieldSpec] = &[FieldSpec::field("msteams", "msteams", V1_2, false)];

/// Payload an action submits along with the input values.
///
/// An object payload has its Teams `msteams` member decoded; every other key
/// is kept verbatim and in order. Any non-object payload is kept as is.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitData {
    Object {
        msteams: Option<ActionData>,
        properties: Object,
    },
    Value(Value),
}

impl SubmitData {
    pub fn teams(data: impl Into<ActionData>) -> Self {
        SubmitData::Object {
            msteams: Some(data.into()),
            properties: Object::new(),
        }
    }

    pub fn msteams(&self) -> Option<&ActionData> {
        match self {
            SubmitData::Object { msteams, .. } => msteams.as_ref(),
            SubmitData::Value(_) => None,
        }
    }
}

impl Walk for SubmitData {
    fn is_empty(&self) -> bool {
        match self {
            SubmitData::Object {
                msteams,
                properties,
            } => msteams.is_none() && properties.is_empty(),
            SubmitData::Value(v) => v.is_null(),
        }
    }

    fn walk(&self, walker: &mut VersionWalker) {
        if let SubmitData::Object { msteams, .. } = self {
            walker.visit_fields(SUBMIT_DATA_FIELDS, &[msteams as &dyn Walk]);
        }
    }
}

impl WireValue for SubmitData {
    fn encode(&self, codec: &Codec) -> Result<Value> {
        match self {
            SubmitData::Object {
                msteams,
                properties,
            } => {
                let mut out = properties.clone();
                if let Some(data) = msteams {
                    let encoded = data.encode(codec).map_err(|e| e.within("msteams"))?;
                    out.insert("msteams".to_string(), encoded);
                }
                Ok(Value::Object(out))
            }
            SubmitData::Value(v) => Ok(v.clone()),
        }
    }

    fn decode(value: &Value, codec: &Codec) -> Result<Option<Self>> {
        match value {
            Value::Object(raw) => {
                let msteams: Option<ActionData> = decode_field(raw, "msteams", codec)?;
                let properties = raw
                    .iter()
                    .filter(|(k, _)| k.as_str() != "msteams")
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect();
                Ok(Some(SubmitData::Object {
                    msteams,
                    properties,
                }))
            }
            other => Ok(Some(SubmitData::Value(other.clone()))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ActionKind, ElementKind, ImBack};
    use serde_json::json;

    #[test]
    fn test_grid_column_width_shapes() {
        let codec = Codec::default();

        match GridColumnWidth::decode(&json!("50px"), &codec) {
            Ok(Some(GridColumnWidth::Pixels(50))) => {}
            other => panic!("Expected Pixels(50), got {:?}", other),
        }
        match GridColumnWidth::decode(&json!(1), &codec) {
            Ok(Some(GridColumnWidth::Weight(1))) => {}
            other => panic!("Expected Weight(1), got {:?}", other),
        }
        match GridColumnWidth::decode(&json!(1.5), &codec) {
            Err(CardError::InvalidShape { shape, reason }) => {
                assert_eq!(shape, "grid column width");
                assert!(reason.contains("whole number"));
            }
            other => panic!("Expected InvalidShape, got {:?}", other),
        }
        assert!(GridColumnWidth::decode(&json!("wide"), &codec).is_err());
        assert!(GridColumnWidth::decode(&json!(true), &codec).is_err());
    }

    #[test]
    fn test_whole_number_shapes_share_rules() {
        let codec = Codec::default();

        match GridColumnWidth::decode(&json!(2.0), &codec) {
            Ok(Some(GridColumnWidth::Weight(2))) => {}
            other => panic!("Expected Weight(2), got {:?}", other),
        }
        match LabelWidth::decode(&json!(40.0), &codec) {
            Ok(Some(LabelWidth::Percent(40))) => {}
            other => panic!("Expected Percent(40), got {:?}", other),
        }
        match LabelWidth::decode(&json!(33.3), &codec) {
            Err(CardError::InvalidShape { shape, reason }) => {
                assert_eq!(shape, "label width");
                assert!(reason.contains("whole number"));
            }
            other => panic!("Expected InvalidShape, got {:?}", other),
        }
    }

    #[test]
    fn test_grid_column_width_reemits_shape() {
        let codec = Codec::default();
        assert_eq!(GridColumnWidth::Pixels(50).encode(&codec).unwrap(), json!("50px"));
        assert_eq!(GridColumnWidth::Weight(2).encode(&codec).unwrap(), json!(2));
    }

    #[test]
    fn test_column_width_shapes() {
        let codec = Codec::default();

        assert_eq!(
            ColumnWidth::decode(&json!("Auto"), &codec).unwrap(),
            Some(ColumnWidth::Auto)
        );
        assert_eq!(
            ColumnWidth::decode(&json!("120px"), &codec).unwrap(),
            Some(ColumnWidth::Pixels(120))
        );
        let weight = ColumnWidth::decode(&json!(2.5), &codec).unwrap().unwrap();
        assert_eq!(weight.encode(&codec).unwrap(), json!(2.5));
        assert!(ColumnWidth::decode(&json!("huge"), &codec).is_err());
    }

    #[test]
    fn test_label_width_rejects_fraction() {
        let codec = Codec::default();
        assert_eq!(
            LabelWidth::decode(&json!(30), &codec).unwrap(),
            Some(LabelWidth::Percent(30))
        );
        assert!(matches!(
            LabelWidth::decode(&json!(30.5), &codec),
            Err(CardError::InvalidShape { .. })
        ));
    }

    #[test]
    fn test_target_element_shapes() {
        let codec = Codec::default();

        let bare = TargetElement::decode(&json!("details"), &codec).unwrap().unwrap();
        assert_eq!(bare, TargetElement::toggle("details"));
        assert_eq!(bare.encode(&codec).unwrap(), json!("details"));

        let forced = TargetElement::decode(
            &json!({"elementId": "details", "isVisible": false}),
            &codec,
        )
        .unwrap()
        .unwrap();
        assert_eq!(forced, TargetElement::set("details", false));
        assert_eq!(
            forced.encode(&codec).unwrap(),
            json!({"elementId": "details", "isVisible": false})
        );

        // No override in the object form still encodes compactly
        let compact = TargetElement::decode(&json!({"elementId": "x"}), &codec)
            .unwrap()
            .unwrap();
        assert_eq!(compact.encode(&codec).unwrap(), json!("x"));

        assert!(TargetElement::decode(&json!(4), &codec).is_err());
        assert!(TargetElement::decode(&json!({"isVisible": true}), &codec).is_err());
    }

    #[test]
    fn test_fallback_priority() {
        let codec = Codec::default();

        match Fallback::decode(&json!("drop"), &codec) {
            Ok(Some(Fallback::Option(FallbackOption::Drop))) => {}
            other => panic!("Expected Option(Drop), got {:?}", other),
        }
        match Fallback::decode(&json!({"type": "TextBlock", "text": "old"}), &codec) {
            Ok(Some(Fallback::Element(element))) => {
                assert_eq!(element.kind(), Some(ElementKind::TextBlock))
            }
            other => panic!("Expected Element, got {:?}", other),
        }
        match Fallback::decode(&json!({"type": "Action.OpenUrl", "url": "https://x"}), &codec) {
            Ok(Some(Fallback::Action(action))) => {
                assert_eq!(action.kind(), Some(ActionKind::OpenUrl))
            }
            other => panic!("Expected Action, got {:?}", other),
        }
    }

    #[test]
    fn test_fallback_commits_without_backtracking() {
        let codec = Codec::default();

        // An element payload with a broken field does not fall through to Action
        let err = Fallback::decode(&json!({"type": "TextBlock", "wrap": "yes"}), &codec)
            .unwrap_err();
        assert_eq!(err.path(), Some("wrap"));

        assert_eq!(
            Fallback::decode(&json!({"type": "Hologram"}), &codec).unwrap(),
            None
        );
        // Option strings outside the documented set are kept as written
        match Fallback::decode(&json!("explode"), &codec) {
            Ok(Some(Fallback::Option(FallbackOption::Other(raw)))) => assert_eq!(raw, "explode"),
            other => panic!("Expected Option(Other), got {:?}", other),
        }
        assert!(matches!(
            Fallback::decode(&json!({"type": "Layout.Stack"}), &codec),
            Err(CardError::InvalidShape { .. })
        ));
        assert!(matches!(
            Fallback::decode(&json!(3), &codec),
            Err(CardError::InvalidShape { .. })
        ));
    }

    #[test]
    fn test_submit_data_keeps_properties() {
        let codec = Codec::default();
        let payload = json!({
            "action": "approve",
            "msteams": {"type": "imBack", "value": "approve"}
        });

        let data = SubmitData::decode(&payload, &codec).unwrap().unwrap();
        match data.msteams() {
            Some(ActionData::ImBack(ImBack { value, .. })) => assert_eq!(value, "approve"),
            other => panic!("Expected imBack, got {:?}", other),
        }
        assert_eq!(data.encode(&codec).unwrap(), payload);

        let scalar = SubmitData::decode(&json!("ping"), &codec).unwrap().unwrap();
        assert_eq!(scalar, SubmitData::Value(json!("ping")));
    }
}
