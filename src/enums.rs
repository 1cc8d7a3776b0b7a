//! String enumerations of the card format.
//!
//! Values are matched case-insensitively on decode, since renderers accept
//! any casing, and always written back in their documented spelling. Values
//! outside the documented set decode to `Other` and are written back as read.

use serde_json::Value;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::codec::Codec;
use crate::error::{CardError, Result};
use crate::wire::{kind_of, Walk, WireValue};

macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $variant:ident = $wire:literal, )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $variant, )*
            /// A value this crate does not know, kept verbatim
            Other(String),
        }

        impl $name {
            /// The documented values, without `Other`
            pub const ALL: &'static [$name] = &[$( $name::$variant, )*];

            /// Documented wire spelling, or the raw text of `Other`
            pub fn as_str(&self) -> &str {
                match self {
                    $( $name::$variant => $wire, )*
                    $name::Other(raw) => raw.as_str(),
                }
            }

            pub fn is_known(&self) -> bool {
                !matches!(self, $name::Other(_))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = Infallible;

            fn from_str(s: &str) -> std::result::Result<Self, Infallible> {
                let known = $name::ALL
                    .iter()
                    .find(|v| v.as_str().eq_ignore_ascii_case(s.trim()))
                    .cloned();
                Ok(known.unwrap_or_else(|| $name::Other(s.to_string())))
            }
        }

        impl Walk for $name {
            fn is_empty(&self) -> bool {
                false
            }
        }

        impl WireValue for $name {
            fn encode(&self, _codec: &Codec) -> Result<Value> {
                Ok(Value::String(self.as_str().to_string()))
            }

            fn decode(value: &Value, _codec: &Codec) -> Result<Option<Self>> {
                let s = value.as_str().ok_or_else(|| {
                    CardError::malformed(format!("expected string, got {}", kind_of(value)))
                })?;
                let parsed = match s.parse::<$name>() {
                    Ok(parsed) => parsed,
                    Err(never) => match never {},
                };
                if !parsed.is_known() {
                    tracing::debug!(value = %s, "keeping unrecognised {} value", stringify!($name));
                }
                Ok(Some(parsed))
            }
        }
    };
}

pub(crate) use string_enum;

string_enum! {
    /// Whether an action is shown as a button or in the overflow menu
    pub enum ActionMode {
        Primary = "primary",
        Secondary = "secondary",
    }
}

string_enum! {
    pub enum ActionStyle {
        Default = "default",
        Positive = "positive",
        Destructive = "destructive",
    }
}

string_enum! {
    /// Which inputs an action validates and submits
    pub enum AssociatedInputs {
        Auto = "auto",
        None = "none",
    }
}

string_enum! {
    pub enum ChoiceInputStyle {
        Compact = "compact",
        Expanded = "expanded",
    }
}

string_enum! {
    /// Named colors; the exact shade depends on the host theme
    pub enum Color {
        Default = "Default",
        Dark = "Dark",
        Light = "Light",
        Accent = "Accent",
        Good = "Good",
        Warning = "Warning",
        Attention = "Attention",
        Informative = "Informative",
        Subtle = "Subtle",
    }
}

string_enum! {
    pub enum ContainerStyle {
        Default = "default",
        Emphasis = "emphasis",
        Good = "good",
        Attention = "attention",
        Warning = "warning",
        Accent = "accent",
    }
}

string_enum! {
    /// Degradation directive used in place of a fallback element
    pub enum FallbackOption {
        Drop = "drop",
    }
}

string_enum! {
    pub enum FontSize {
        Default = "Default",
        Small = "Small",
        Medium = "Medium",
        Large = "Large",
        ExtraLarge = "ExtraLarge",
    }
}

string_enum! {
    pub enum FontType {
        Default = "default",
        Monospace = "monospace",
    }
}

string_enum! {
    pub enum FontWeight {
        Default = "Default",
        Lighter = "Lighter",
        Bolder = "Bolder",
    }
}

string_enum! {
    pub enum HorizontalAlignment {
        Left = "Left",
        Center = "Center",
        Right = "Right",
    }
}

string_enum! {
    pub enum VerticalAlignment {
        Top = "Top",
        Center = "Center",
        Bottom = "Bottom",
    }
}

string_enum! {
    pub enum IconPosition {
        Before = "Before",
        After = "After",
    }
}

string_enum! {
    pub enum IconSize {
        XxSmall = "XXSmall",
        XSmall = "XSmall",
        Small = "Small",
        Standard = "Standard",
        Medium = "Medium",
        Large = "Large",
        XLarge = "XLarge",
        XxLarge = "XXLarge",
    }
}

string_enum! {
    pub enum IconStyle {
        Regular = "Regular",
        Filled = "Filled",
    }
}

string_enum! {
    pub enum ImageFit {
        Cover = "Cover",
        Contain = "Contain",
        Fill = "Fill",
    }
}

string_enum! {
    pub enum ImageFillMode {
        Cover = "Cover",
        RepeatHorizontally = "RepeatHorizontally",
        RepeatVertically = "RepeatVertically",
        Repeat = "Repeat",
    }
}

string_enum! {
    pub enum ImageSize {
        Auto = "auto",
        Stretch = "stretch",
        Small = "small",
        Medium = "medium",
        Large = "large",
    }
}

string_enum! {
    pub enum ImageStyle {
        Default = "Default",
        Person = "Person",
        RoundedCorners = "RoundedCorners",
    }
}

string_enum! {
    pub enum ItemFit {
        Fit = "Fit",
        Fill = "Fill",
    }
}

string_enum! {
    pub enum InputValidationStyle {
        Default = "default",
        RevealOnHover = "revealOnHover",
    }
}

string_enum! {
    pub enum LabelPosition {
        Inline = "inline",
        Above = "above",
    }
}

string_enum! {
    pub enum Spacing {
        Default = "Default",
        None = "None",
        Small = "Small",
        Medium = "Medium",
        Large = "Large",
        ExtraLarge = "ExtraLarge",
        Padding = "Padding",
    }
}

string_enum! {
    pub enum TextBlockStyle {
        Default = "default",
        Heading = "heading",
    }
}

string_enum! {
    pub enum TextInputStyle {
        Text = "Text",
        Tel = "Tel",
        Url = "Url",
        Email = "Email",
        Password = "Password",
    }
}

string_enum! {
    pub enum Theme {
        Light = "Light",
        Dark = "Dark",
    }
}

string_enum! {
    pub enum InsertPosition {
        Selection = "Selection",
        Top = "Top",
        Bottom = "Bottom",
    }
}

string_enum! {
    /// Card widths an element is displayed at
    pub enum TargetWidth {
        VeryNarrow = "VeryNarrow",
        Narrow = "Narrow",
        Standard = "Standard",
        Wide = "Wide",
        AtLeastVeryNarrow = "AtLeast:VeryNarrow",
        AtMostVeryNarrow = "AtMost:VeryNarrow",
        AtLeastNarrow = "AtLeast:Narrow",
        AtMostNarrow = "AtMost:Narrow",
        AtLeastStandard = "AtLeast:Standard",
        AtMostStandard = "AtMost:Standard",
        AtLeastWide = "AtLeast:Wide",
        AtMostWide = "AtMost:Wide",
    }
}

string_enum! {
    pub enum CodeLanguage {
        Bash = "Bash",
        C = "C",
        Cpp = "Cpp",
        CSharp = "CSharp",
        Css = "Css",
        Dos = "Dos",
        Go = "Go",
        Graphql = "Graphql",
        Html = "Html",
        Java = "Java",
        JavaScript = "JavaScript",
        Json = "Json",
        ObjectiveC = "ObjectiveC",
        Perl = "Perl",
        Php = "Php",
        PlainText = "PlainText",
        PowerShell = "PowerShell",
        Python = "Python",
        Sql = "Sql",
        TypeScript = "TypeScript",
        VbNet = "VbNet",
        Verilog = "Verilog",
        Vhdl = "Vhdl",
        Xml = "Xml",
    }
}

string_enum! {
    pub enum Appearance {
        Filled = "Filled",
        Tint = "Tint",
    }
}

string_enum! {
    pub enum BadgeShape {
        Square = "Square",
        Rounded = "Rounded",
        Circular = "Circular",
    }
}

string_enum! {
    pub enum BadgeSize {
        Medium = "Medium",
        Large = "Large",
        ExtraLarge = "ExtraLarge",
    }
}

string_enum! {
    pub enum RatingColor {
        Neutral = "Neutral",
        Marigold = "Marigold",
    }
}

string_enum! {
    pub enum RatingSize {
        Medium = "Medium",
        Large = "Large",
    }
}

string_enum! {
    pub enum RatingStyle {
        Default = "Default",
        Compact = "Compact",
    }
}

string_enum! {
    pub enum TeamsCardWidth {
        Full = "Full",
    }
}

string_enum! {
    pub enum MentionType {
        Person = "Person",
        Tag = "Tag",
    }
}

string_enum! {
    pub enum ProgressRingLabelPosition {
        Before = "Before",
        After = "After",
        Above = "Above",
        Below = "Below",
    }
}

string_enum! {
    pub enum ProgressRingSize {
        Tiny = "Tiny",
        Small = "Small",
        Medium = "Medium",
        Large = "Large",
    }
}

string_enum! {
    pub enum PopoverPosition {
        Before = "Before",
        After = "After",
        Above = "Above",
        Below = "Below",
    }
}

/// Name of a Fluent icon, e.g. "Calendar"
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Symbol(pub String);

impl Symbol {
    pub fn new(name: impl Into<String>) -> Self {
        Symbol(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Walk for Symbol {
    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl WireValue for Symbol {
    fn encode(&self, codec: &Codec) -> Result<Value> {
        self.0.encode(codec)
    }

    fn decode(value: &Value, codec: &Codec) -> Result<Option<Self>> {
        Ok(String::decode(value, codec)?.map(Symbol))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_case_insensitive_parse() {
        assert_eq!("large".parse::<FontSize>().unwrap(), FontSize::Large);
        assert_eq!("LARGE".parse::<FontSize>().unwrap(), FontSize::Large);
        assert_eq!("Emphasis".parse::<ContainerStyle>().unwrap(), ContainerStyle::Emphasis);
        assert_eq!(
            "atleast:standard".parse::<TargetWidth>().unwrap(),
            TargetWidth::AtLeastStandard
        );
    }

    #[test]
    fn test_canonical_spelling_on_encode() {
        let codec = Codec::default();
        let size = FontSize::decode(&json!("large"), &codec).unwrap().unwrap();
        assert_eq!(size.encode(&codec).unwrap(), json!("Large"));
        assert_eq!(ContainerStyle::Emphasis.to_string(), "emphasis");
        assert_eq!(IconSize::XxSmall.as_str(), "XXSmall");
    }

    #[test]
    fn test_unknown_value_kept_verbatim() {
        let size = "gigantic".parse::<FontSize>().unwrap();
        assert_eq!(size, FontSize::Other("gigantic".to_string()));
        assert!(!size.is_known());
        assert!(!FontSize::ALL.contains(&size));

        let codec = Codec::default();
        let spacing = Spacing::decode(&json!("ExtraExtraLarge"), &codec).unwrap().unwrap();
        match &spacing {
            Spacing::Other(raw) => assert_eq!(raw, "ExtraExtraLarge"),
            other => panic!("Expected Other, got {:?}", other),
        }
        assert_eq!(spacing.encode(&codec).unwrap(), json!("ExtraExtraLarge"));
        assert_eq!(spacing.to_string(), "ExtraExtraLarge");
    }

    #[test]
    fn test_non_string_value_rejected() {
        let codec = Codec::default();
        match Spacing::decode(&json!(3), &codec) {
            Err(CardError::MalformedPayload(msg)) => assert!(msg.contains("expected string")),
            other => panic!("Expected MalformedPayload, got {:?}", other),
        }
    }
}
