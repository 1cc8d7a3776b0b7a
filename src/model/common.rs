//! Composed field groups shared by elements and actions

use crate::enums::{ActionMode, ActionStyle, HorizontalAlignment, Spacing, TargetWidth, Theme};
use crate::model::Action;
use crate::shapes::{BlockElementHeight, Fallback};
use crate::wire::{entity, Requires};

entity! {
    /// Attributes every element carries, flattened into the element's object.
    pub struct ElementCommon {
        fallback: Option<Fallback> = "fallback" @ V1_2,
        grid_area: String = "grid.area" @ V1_5,
        height: Option<BlockElementHeight> = "height" @ V1_1,
        horizontal_alignment: Option<HorizontalAlignment> = "horizontalAlignment",
        id: String = "id",
        is_sort_key: bool = "isSortKey" @ V1_5,
        is_visible: Option<bool> = "isVisible" @ V1_2,
        is_visible_dynamic: bool = "isVisible.dynamic" @ V1_5,
        key: String = "key",
        lang: String = "lang" @ V1_1,
        requires: Requires = "requires" @ V1_2,
        separator: bool = "separator",
        spacing: Option<Spacing> = "spacing",
        target_width: Option<TargetWidth> = "targetWidth",
    }
}

impl ElementCommon {
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }
}

entity! {
    /// Attributes every action carries, flattened into the action's object.
    pub struct ActionCommon {
        fallback: Option<Fallback> = "fallback" @ V1_2,
        icon_url: String = "iconUrl" @ V1_1,
        id: String = "id",
        is_enabled: Option<bool> = "isEnabled" @ V1_5,
        is_enabled_dynamic: Option<bool> = "isEnabled.dynamic" @ V1_5,
        is_visible: Option<bool> = "isVisible" @ V1_5,
        is_visible_dynamic: Option<bool> = "isVisible.dynamic" @ V1_5,
        key: String = "key",
        menu_actions: Vec<Action> = "menuActions" @ V1_5,
        mode: Option<ActionMode> = "mode" @ V1_5,
        requires: Requires = "requires" @ V1_2,
        style: Option<ActionStyle> = "style" @ V1_2,
        themed_icon_urls: Vec<ThemedUrl> = "themedIconUrls" @ V1_5,
        title: String = "title",
        title_dynamic: String = "title.dynamic" @ V1_5,
        tooltip: String = "tooltip" @ V1_5,
        tooltip_dynamic: String = "tooltip.dynamic" @ V1_5,
    }
}

impl ActionCommon {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }
}

entity! {
    /// URL variant used under one host theme
    pub struct ThemedUrl {
        theme: Option<Theme> = "theme" @ V1_5,
        url: String = "url" @ V1_5,
        key: String = "key",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Codec;
    use crate::enums::FallbackOption;
    use crate::wire::{Entity, Object};
    use serde_json::{json, Value};

    #[test]
    fn test_group_flattens_into_owner() {
        let codec = Codec::default();
        let common = ElementCommon {
            id: "title".to_string(),
            spacing: Some(Spacing::Large),
            separator: true,
            fallback: Some(Fallback::Option(FallbackOption::Drop)),
            ..Default::default()
        };

        let mut out = Object::new();
        common.encode_fields(&codec, &mut out).unwrap();
        assert_eq!(
            Value::Object(out),
            json!({"fallback": "drop", "id": "title", "separator": true, "spacing": "Large"})
        );
    }

    #[test]
    fn test_group_reads_sibling_keys() {
        let codec = Codec::default();
        let raw = json!({"type": "TextBlock", "id": "x", "isVisible": false, "text": "t"});

        let common = ElementCommon::decode_fields(raw.as_object().unwrap(), &codec).unwrap();
        assert_eq!(common.id, "x");
        assert_eq!(common.is_visible, Some(false));
    }

    #[test]
    fn test_group_has_no_descriptor() {
        assert!(ElementCommon::descriptor().is_none());
        assert!(ActionCommon::descriptor().is_none());
        assert_eq!(ActionCommon::FIELDS.len(), 17);
    }
}
