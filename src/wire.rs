//! Wire model for card entities
//!
//! Every field type implements [`WireValue`], which knows how to turn itself
//! into a JSON value, how to read itself back, and whether it counts as empty
//! for the omit-if-empty policy. Entities are declared once through the
//! [`entity!`] table macro, which produces the struct, its codec and the
//! static [`FieldSpec`] metadata the version validator consults.

use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;

use crate::codec::Codec;
use crate::error::{CardError, Result};
use crate::registry::{Category, VariantDescriptor};
use crate::validate::VersionWalker;
use crate::version::CardVersion;

/// Raw JSON object as it appears on the wire
pub type Object = Map<String, Value>;

/// Key-value requirements a host must satisfy to render an element
pub type Requires = BTreeMap<String, String>;

/// How a declared field participates in the wire object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRole {
    /// Serialized under its own key
    Field,
    /// Composed group whose members are flattened into the owner
    Group,
}

/// Static metadata for one declared field of an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Rust field name
    pub name: &'static str,
    /// Wire key (empty for groups)
    pub key: &'static str,
    /// Minimum card version that may use the field
    pub since: CardVersion,
    pub role: FieldRole,
    /// Emitted even when empty
    pub always: bool,
}

impl FieldSpec {
    pub const fn field(
        name: &'static str,
        key: &'static str,
        since: CardVersion,
        always: bool,
    ) -> Self {
        Self {
            name,
            key,
            since,
            role: FieldRole::Field,
            always,
        }
    }

    pub const fn group(name: &'static str) -> Self {
        Self {
            name,
            key: "",
            since: CardVersion::BASELINE,
            role: FieldRole::Group,
            always: false,
        }
    }
}

/// Read-only traversal used by the version validator.
pub trait Walk {
    /// Zero value under the omit-if-empty policy.
    fn is_empty(&self) -> bool;

    /// Visit nested fields. Scalars have nothing to visit.
    fn walk(&self, _walker: &mut VersionWalker) {}
}

/// A value that can be encoded to and decoded from the wire.
pub trait WireValue: Walk + Sized {
    fn encode(&self, codec: &Codec) -> Result<Value>;

    /// Decode from a non-null wire value.
    ///
    /// `Ok(None)` means the payload named a discriminant the registry does
    /// not know; the owning field is left unset.
    fn decode(value: &Value, codec: &Codec) -> Result<Option<Self>>;
}

/// A struct declared through [`entity!`].
pub trait Entity: WireValue + Default {
    /// Declared fields, in declaration order
    const FIELDS: &'static [FieldSpec];

    /// Registry descriptor; `None` for composed groups and plain records.
    fn descriptor() -> Option<VariantDescriptor>;

    fn encode_fields(&self, codec: &Codec, out: &mut Object) -> Result<()>;

    fn decode_fields(raw: &Object, codec: &Codec) -> Result<Self>;

    /// Field values in the same order as `FIELDS`.
    fn field_values(&self) -> Vec<&dyn Walk>;
}

pub(crate) fn encode_field<T: WireValue>(
    out: &mut Object,
    key: &'static str,
    value: &T,
    always: bool,
    codec: &Codec,
) -> Result<()> {
    if always || !value.is_empty() {
        let encoded = value.encode(codec).map_err(|e| e.within(key))?;
        out.insert(key.to_string(), encoded);
    }
    Ok(())
}

pub(crate) fn decode_field<T: WireValue + Default>(
    raw: &Object,
    key: &str,
    codec: &Codec,
) -> Result<T> {
    match raw.get(key) {
        None | Some(Value::Null) => Ok(T::default()),
        Some(value) => Ok(T::decode(value, codec)
            .map_err(|e| e.within(key))?
            .unwrap_or_default()),
    }
}

pub(crate) fn expect_object<'a>(value: &'a Value, what: &str) -> Result<&'a Object> {
    value
        .as_object()
        .ok_or_else(|| CardError::malformed(format!("expected {} object, got {}", what, kind_of(value))))
}

pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ----------------------------------------------------------------------------
// Containers
// ----------------------------------------------------------------------------

impl<T: Walk> Walk for Option<T> {
    fn is_empty(&self) -> bool {
        self.is_none()
    }

    fn walk(&self, walker: &mut VersionWalker) {
        if let Some(inner) = self {
            inner.walk(walker);
        }
    }
}

impl<T: WireValue> WireValue for Option<T> {
    fn encode(&self, codec: &Codec) -> Result<Value> {
        match self {
            Some(inner) => inner.encode(codec),
            None => Ok(Value::Null),
        }
    }

    fn decode(value: &Value, codec: &Codec) -> Result<Option<Self>> {
        Ok(T::decode(value, codec)?.map(Some))
    }
}

impl<T: Walk> Walk for Vec<T> {
    fn is_empty(&self) -> bool {
        self.is_empty()
    }

    fn walk(&self, walker: &mut VersionWalker) {
        for (i, item) in self.iter().enumerate() {
            walker.visit_index(i, item);
        }
    }
}

impl<T: WireValue> WireValue for Vec<T> {
    fn encode(&self, codec: &Codec) -> Result<Value> {
        let mut items = Vec::with_capacity(self.len());
        for (i, item) in self.iter().enumerate() {
            items.push(item.encode(codec).map_err(|e| e.within_index(i))?);
        }
        Ok(Value::Array(items))
    }

    fn decode(value: &Value, codec: &Codec) -> Result<Option<Self>> {
        let raw = value
            .as_array()
            .ok_or_else(|| CardError::malformed(format!("expected array, got {}", kind_of(value))))?;

        let mut items = Vec::with_capacity(raw.len());
        for (i, item) in raw.iter().enumerate() {
            // Unknown discriminants drop out of the sequence
            if let Some(decoded) = T::decode(item, codec).map_err(|e| e.within_index(i))? {
                items.push(decoded);
            }
        }
        Ok(Some(items))
    }
}

impl<T: Walk> Walk for Box<T> {
    fn is_empty(&self) -> bool {
        (**self).is_empty()
    }

    fn walk(&self, walker: &mut VersionWalker) {
        (**self).walk(walker);
    }
}

impl<T: WireValue> WireValue for Box<T> {
    fn encode(&self, codec: &Codec) -> Result<Value> {
        (**self).encode(codec)
    }

    fn decode(value: &Value, codec: &Codec) -> Result<Option<Self>> {
        Ok(T::decode(value, codec)?.map(Box::new))
    }
}

// ----------------------------------------------------------------------------
// Scalars
// ----------------------------------------------------------------------------

macro_rules! scalar {
    ($ty:ty, |$v:ident| $empty:expr, |$e:ident| $encode:expr, |$d:ident| $decode:expr) => {
        impl Walk for $ty {
            fn is_empty(&self) -> bool {
                let $v = self;
                $empty
            }
        }

        impl WireValue for $ty {
            fn encode(&self, _codec: &Codec) -> Result<Value> {
                let $e = self;
                $encode
            }

            fn decode(value: &Value, _codec: &Codec) -> Result<Option<Self>> {
                let $d = value;
                $decode.map(Some)
            }
        }
    };
}

scalar!(
    String,
    |v| v.is_empty(),
    |e| Ok(Value::String(e.clone())),
    |d| d
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| CardError::malformed(format!("expected string, got {}", kind_of(d))))
);

scalar!(
    bool,
    |v| !*v,
    |e| Ok(Value::Bool(*e)),
    |d| d
        .as_bool()
        .ok_or_else(|| CardError::malformed(format!("expected boolean, got {}", kind_of(d))))
);

scalar!(
    i64,
    |v| *v == 0,
    |e| Ok(Value::from(*e)),
    |d| whole_number(d)
);

scalar!(
    u32,
    |v| *v == 0,
    |e| Ok(Value::from(*e)),
    |d| whole_number(d).and_then(|n| {
        u32::try_from(n).map_err(|_| CardError::malformed(format!("{} is out of range", n)))
    })
);

scalar!(
    f64,
    |v| *v == 0.0,
    |e| encode_float(*e),
    |d| d
        .as_f64()
        .ok_or_else(|| CardError::malformed(format!("expected number, got {}", kind_of(d))))
);

scalar!(
    Value,
    |v| v.is_null(),
    |e| Ok(e.clone()),
    |d| Ok::<Value, CardError>(d.clone())
);

scalar!(
    Requires,
    |v| v.is_empty(),
    |e| Ok(Value::Object(
        e.iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect()
    )),
    |d| {
        let raw = expect_object(d, "requirements")?;
        raw.iter()
            .map(|(k, v)| {
                v.as_str()
                    .map(|s| (k.clone(), s.to_string()))
                    .ok_or_else(|| CardError::malformed(format!("expected string, got {}", kind_of(v))).within(k))
            })
            .collect::<Result<Requires>>()
    }
);

/// Integers arrive as JSON numbers; whole floats such as `2.0` are accepted.
pub(crate) fn whole_number(value: &Value) -> Result<i64> {
    if let Some(n) = value.as_i64() {
        return Ok(n);
    }
    match value.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Ok(f as i64),
        Some(f) => Err(CardError::malformed(format!("expected whole number, got {}", f))),
        None => Err(CardError::malformed(format!("expected number, got {}", kind_of(value)))),
    }
}

/// Whole floats are written without a fractional part.
pub(crate) fn encode_float(f: f64) -> Result<Value> {
    if f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
        return Ok(Value::from(f as i64));
    }
    Number::from_f64(f)
        .map(Value::Number)
        .ok_or_else(|| CardError::malformed(format!("{} cannot be represented in JSON", f)))
}

// ----------------------------------------------------------------------------
// Extension variants
// ----------------------------------------------------------------------------

/// A variant registered by an embedder at runtime.
///
/// Its fields are kept as raw wire values; nested entities can be decoded on
/// demand with [`Codec::from_value`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Extension {
    /// Descriptor name the variant was registered under
    pub name: String,
    /// Wire fields without the discriminant
    pub fields: Object,
}

impl Extension {
    pub fn new(name: impl Into<String>, fields: Object) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    pub(crate) fn from_raw(name: String, raw: &Object) -> Self {
        let fields = raw
            .iter()
            .filter(|(k, _)| k.as_str() != "type")
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Self { name, fields }
    }

    pub(crate) fn encode_as(&self, category: Category, codec: &Codec) -> Result<Value> {
        let descriptor = VariantDescriptor::Extension {
            category,
            name: self.name.clone(),
        };
        let discriminant = codec.registry().resolve_discriminant(&descriptor)?;

        let mut out = Object::new();
        out.insert("type".to_string(), Value::String(discriminant.to_string()));
        for (k, v) in &self.fields {
            out.insert(k.clone(), v.clone());
        }
        Ok(Value::Object(out))
    }
}

// ----------------------------------------------------------------------------
// Declaration macros
// ----------------------------------------------------------------------------

/// Declares an entity struct together with its codec and field metadata.
///
/// ```text
/// entity! {
///     pub struct TextBlock as Element(ElementKind::TextBlock) {
///         #[flatten] common: ElementCommon,
///         text: Option<String> = "text" [always],
///         label_for: String = "labelFor" @ V1_5,
///     }
/// }
/// ```
///
/// Groups come first and are flattened into the owner. `@ V1_x` names the
/// minimum version (default 1.0); `[always]` disables omit-if-empty.
macro_rules! entity {
    (
        $(#[$meta:meta])*
        pub struct $name:ident $(as $desc:ident $(($kind:path))?)? {
            $( #[flatten] $group:ident : $gty:ty, )*
            $( $field:ident : $fty:ty = $key:literal $(@ $since:ident)? $([$always:ident])?, )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Default)]
        pub struct $name {
            $( pub $group: $gty, )*
            $( pub $field: $fty, )*
        }

        impl $crate::wire::Entity for $name {
            const FIELDS: &'static [$crate::wire::FieldSpec] = &[
                $( $crate::wire::FieldSpec::group(stringify!($group)), )*
                $(
                    $crate::wire::FieldSpec::field(
                        stringify!($field),
                        $key,
                        $crate::wire::entity!(@since $($since)?),
                        $crate::wire::entity!(@always $($always)?),
                    ),
                )*
            ];

            fn descriptor() -> Option<$crate::registry::VariantDescriptor> {
                $crate::wire::entity!(@descriptor $($desc $(($kind))?)?)
            }

            #[allow(unused_variables)]
            fn encode_fields(
                &self,
                codec: &$crate::codec::Codec,
                out: &mut $crate::wire::Object,
            ) -> $crate::error::Result<()> {
                $( $crate::wire::Entity::encode_fields(&self.$group, codec, out)?; )*
                $(
                    $crate::wire::encode_field(
                        out,
                        $key,
                        &self.$field,
                        $crate::wire::entity!(@always $($always)?),
                        codec,
                    )?;
                )*
                Ok(())
            }

            #[allow(unused_variables)]
            fn decode_fields(
                raw: &$crate::wire::Object,
                codec: &$crate::codec::Codec,
            ) -> $crate::error::Result<Self> {
                if let Some(descriptor) = <Self as $crate::wire::Entity>::descriptor() {
                    codec.check_discriminant(raw, &descriptor)?;
                }
                Ok(Self {
                    $( $group: <$gty as $crate::wire::Entity>::decode_fields(raw, codec)?, )*
                    $( $field: $crate::wire::decode_field(raw, $key, codec)?, )*
                })
            }

            fn field_values(&self) -> Vec<&dyn $crate::wire::Walk> {
                vec![
                    $( &self.$group as &dyn $crate::wire::Walk, )*
                    $( &self.$field as &dyn $crate::wire::Walk, )*
                ]
            }
        }

        impl $crate::wire::Walk for $name {
            fn is_empty(&self) -> bool {
                false
            }

            fn walk(&self, walker: &mut $crate::validate::VersionWalker) {
                walker.visit_fields(
                    <Self as $crate::wire::Entity>::FIELDS,
                    &$crate::wire::Entity::field_values(self),
                );
            }
        }

        impl $crate::wire::WireValue for $name {
            fn encode(&self, codec: &$crate::codec::Codec) -> $crate::error::Result<serde_json::Value> {
                let mut out = $crate::wire::Object::new();
                if let Some(descriptor) = <Self as $crate::wire::Entity>::descriptor() {
                    let discriminant = codec.registry().resolve_discriminant(&descriptor)?;
                    out.insert("type".to_string(), serde_json::Value::String(discriminant.to_string()));
                }
                $crate::wire::Entity::encode_fields(self, codec, &mut out)?;
                Ok(serde_json::Value::Object(out))
            }

            fn decode(
                value: &serde_json::Value,
                codec: &$crate::codec::Codec,
            ) -> $crate::error::Result<Option<Self>> {
                let raw = $crate::wire::expect_object(value, stringify!($name))?;
                <Self as $crate::wire::Entity>::decode_fields(raw, codec).map(Some)
            }
        }
    };

    (@since) => { $crate::version::CardVersion::BASELINE };
    (@since $since:ident) => { $crate::version::$since };

    (@always) => { false };
    (@always always) => { true };

    (@descriptor) => { None };
    (@descriptor $desc:ident) => { Some($crate::registry::VariantDescriptor::$desc) };
    (@descriptor $desc:ident ($kind:path)) => {
        Some($crate::registry::VariantDescriptor::$desc($kind))
    };
}

pub(crate) use entity;

/// Declares a polymorphic category: the sum type over its variants, a
/// payload-free kind enum for the registry, and dispatch by discriminant.
macro_rules! category {
    (
        $(#[$meta:meta])*
        pub enum $name:ident / $kind:ident as $cat:ident {
            $( $variant:ident ( $ty:ty ) = $disc:literal, )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub enum $name {
            $( $variant($ty), )*
            /// Variant registered by an embedder
            Extension($crate::wire::Extension),
        }

        /// Built-in variants without payload, as stored in the registry
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $kind {
            $( $variant, )*
        }

        impl $kind {
            pub const ALL: &'static [$kind] = &[$( $kind::$variant, )*];

            /// Discriminant the variant is registered under by default
            pub fn default_discriminant(self) -> &'static str {
                match self {
                    $( $kind::$variant => $disc, )*
                }
            }

            pub fn fields(self) -> &'static [$crate::wire::FieldSpec] {
                match self {
                    $( $kind::$variant => <$ty as $crate::wire::Entity>::FIELDS, )*
                }
            }
        }

        impl $name {
            pub fn kind(&self) -> Option<$kind> {
                match self {
                    $( $name::$variant(_) => Some($kind::$variant), )*
                    $name::Extension(_) => None,
                }
            }

            pub fn descriptor(&self) -> $crate::registry::VariantDescriptor {
                match self {
                    $( $name::$variant(_) => $crate::registry::VariantDescriptor::$cat($kind::$variant), )*
                    $name::Extension(ext) => $crate::registry::VariantDescriptor::Extension {
                        category: $crate::registry::Category::$cat,
                        name: ext.name.clone(),
                    },
                }
            }

            /// Decode a tagged payload, failing on unknown discriminants.
            pub fn decode_tagged(
                value: &serde_json::Value,
                codec: &$crate::codec::Codec,
            ) -> $crate::error::Result<Self> {
                let (raw, descriptor) = codec.resolve(value, $crate::registry::Category::$cat)?;
                match descriptor {
                    $(
                        $crate::registry::VariantDescriptor::$cat($kind::$variant) => {
                            <$ty as $crate::wire::Entity>::decode_fields(raw, codec).map($name::$variant)
                        }
                    )*
                    $crate::registry::VariantDescriptor::Extension { name, .. } => {
                        Ok($name::Extension($crate::wire::Extension::from_raw(name, raw)))
                    }
                    other => Err($crate::error::CardError::TypeMismatch {
                        expected: $crate::registry::Category::$cat.to_string(),
                        actual: other.to_string(),
                    }),
                }
            }
        }

        $(
            impl From<$ty> for $name {
                fn from(value: $ty) -> Self {
                    $name::$variant(value)
                }
            }
        )*

        impl $crate::wire::Walk for $name {
            fn is_empty(&self) -> bool {
                false
            }

            fn walk(&self, walker: &mut $crate::validate::VersionWalker) {
                match self {
                    $( $name::$variant(inner) => $crate::wire::Walk::walk(inner, walker), )*
                    $name::Extension(_) => {}
                }
            }
        }

        impl $crate::wire::WireValue for $name {
            fn encode(&self, codec: &$crate::codec::Codec) -> $crate::error::Result<serde_json::Value> {
                match self {
                    $( $name::$variant(inner) => $crate::wire::WireValue::encode(inner, codec), )*
                    $name::Extension(ext) => ext.encode_as($crate::registry::Category::$cat, codec),
                }
            }

            fn decode(
                value: &serde_json::Value,
                codec: &$crate::codec::Codec,
            ) -> $crate::error::Result<Option<Self>> {
                match $name::decode_tagged(value, codec) {
                    Ok(decoded) => Ok(Some(decoded)),
                    Err($crate::error::CardError::UnknownType { discriminant }) => {
                        tracing::debug!(
                            category = stringify!($cat),
                            discriminant = %discriminant,
                            "skipping unknown variant"
                        );
                        Ok(None)
                    }
                    Err(e) => Err(e),
                }
            }
        }
    };
}

pub(crate) use category;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_omit_if_empty() {
        let codec = Codec::default();
        let mut out = Object::new();

        encode_field(&mut out, "id", &String::new(), false, &codec).unwrap();
        encode_field(&mut out, "wrap", &false, false, &codec).unwrap();
        encode_field(&mut out, "rtl", &Some(false), false, &codec).unwrap();
        encode_field(&mut out, "text", &None::<String>, true, &codec).unwrap();
        encode_field(&mut out, "items", &Vec::<String>::new(), true, &codec).unwrap();

        assert_eq!(
            Value::Object(out),
            json!({"rtl": false, "text": null, "items": []})
        );
    }

    #[test]
    fn test_decode_field_defaults() {
        let codec = Codec::default();
        let raw = json!({"maxLines": 3, "wrap": null});
        let raw = raw.as_object().unwrap();

        let max_lines: u32 = decode_field(raw, "maxLines", &codec).unwrap();
        let wrap: bool = decode_field(raw, "wrap", &codec).unwrap();
        let missing: Option<String> = decode_field(raw, "id", &codec).unwrap();

        assert_eq!(max_lines, 3);
        assert!(!wrap);
        assert_eq!(missing, None);
    }

    #[test]
    fn test_scalar_type_errors_carry_path() {
        let codec = Codec::default();
        let raw = json!({"wrap": "yes"});

        let err = decode_field::<bool>(raw.as_object().unwrap(), "wrap", &codec).unwrap_err();
        assert_eq!(err.path(), Some("wrap"));
        assert!(matches!(err.root(), CardError::MalformedPayload(_)));
    }

    #[test]
    fn test_whole_numbers() {
        assert_eq!(whole_number(&json!(4)).unwrap(), 4);
        assert_eq!(whole_number(&json!(2.0)).unwrap(), 2);
        assert!(whole_number(&json!(2.5)).is_err());
        assert!(whole_number(&json!("2")).is_err());
    }

    #[test]
    fn test_float_encoding() {
        assert_eq!(encode_float(3.0).unwrap(), json!(3));
        assert_eq!(encode_float(2.5).unwrap(), json!(2.5));
        assert!(encode_float(f64::NAN).is_err());
    }

    #[test]
    fn test_requires_round_trip() {
        let codec = Codec::default();
        let value = json!({"adaptiveCards": "1.5", "acme.widgets": "2.0"});

        let decoded = Requires::decode(&value, &codec).unwrap().unwrap();
        assert_eq!(decoded.get("adaptiveCards").map(String::as_str), Some("1.5"));
        assert_eq!(decoded.encode(&codec).unwrap(), value);
    }
}
