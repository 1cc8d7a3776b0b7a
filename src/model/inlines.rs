//! Inlines of a `RichTextBlock`

use crate::enums::{Color, FontSize, FontType, FontWeight, ImageSize, ImageStyle, Symbol};
use crate::model::{Action, ElementCommon, ThemedUrl};
use crate::shapes::Fallback;
use crate::wire::{category, entity};

category! {
    /// A run inside a rich text paragraph
    pub enum RichTextInline / InlineKind as Inline {
        TextRun(TextRun) = "TextRun",
        CitationRun(CitationRun) = "CitationRun",
        IconRun(IconRun) = "IconRun",
        ImageRun(ImageRun) = "ImageRun",
    }
}

entity! {
    pub struct TextRun as Inline(InlineKind::TextRun) {
        #[flatten] common: ElementCommon,
        highlight: bool = "highlight",
        italic: bool = "italic",
        strikethrough: bool = "strikethrough",
        underline: bool = "underline",
        color: Option<Color> = "color",
        font_type: Option<FontType> = "fontType",
        is_subtle: Option<bool> = "isSubtle",
        size: Option<FontSize> = "size",
        text: String = "text" [always],
        text_dynamic: String = "text.dynamic" @ V1_5,
        select_action: Option<Action> = "selectAction" @ V1_5,
        weight: Option<FontWeight> = "weight",
    }
}

impl TextRun {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }
}

entity! {
    /// Reference marker pointing into the card's `references`
    pub struct CitationRun as Inline(InlineKind::CitationRun) {
        // one-based
        reference_index: u32 = "referenceIndex" @ V1_5,
        text: String = "text" [always],
        text_dynamic: String = "text.dynamic" @ V1_5,
        fallback: Option<Fallback> = "fallback" @ V1_2,
        grid_area: String = "grid.area" @ V1_5,
        id: String = "id",
        is_visible_dynamic: bool = "isVisible.dynamic" @ V1_5,
        key: String = "key",
    }
}

entity! {
    pub struct IconRun as Inline(InlineKind::IconRun) {
        color: Option<Color> = "color" @ V1_5,
        name: Option<Symbol> = "name" @ V1_5,
        select_action: Option<Action> = "selectAction" @ V1_5,
        fallback: Option<Fallback> = "fallback" @ V1_2,
        grid_area: String = "grid.area" @ V1_5,
        id: String = "id",
        is_sort_key: bool = "isSortKey" @ V1_5,
        is_visible: Option<bool> = "isVisible" @ V1_2,
        is_visible_dynamic: bool = "isVisible.dynamic" @ V1_5,
        key: String = "key",
        lang: String = "lang" @ V1_1,
    }
}

entity! {
    pub struct ImageRun as Inline(InlineKind::ImageRun) {
        select_action: Option<Action> = "selectAction" @ V1_5,
        size: Option<ImageSize> = "size" @ V1_5,
        style: Option<ImageStyle> = "style" @ V1_5,
        themed_urls: Vec<ThemedUrl> = "themedUrls" @ V1_5,
        url: String = "url" @ V1_5,
        fallback: Option<Fallback> = "fallback" @ V1_2,
        grid_area: String = "grid.area" @ V1_5,
        id: String = "id",
        is_sort_key: bool = "isSortKey" @ V1_5,
        is_visible: Option<bool> = "isVisible" @ V1_2,
        is_visible_dynamic: bool = "isVisible.dynamic" @ V1_5,
        key: String = "key",
        lang: String = "lang" @ V1_1,
    }
}
