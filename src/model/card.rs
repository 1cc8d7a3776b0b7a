//! The document root and its plain records

use crate::enums::{ContainerStyle, HorizontalAlignment, ImageFillMode, VerticalAlignment};
use crate::error::Result;
use crate::model::{
    Action, Element, ExecuteAction, Layout, Reference, StringResource, TeamsCardProperties,
};
use crate::shapes::Fallback;
use crate::validate::{validate, Violation};
use crate::version::CardVersion;
use crate::wire::{entity, Requires};

/// Schema locator stamped on new cards
pub const DEFAULT_SCHEMA: &str = "https://adaptivecards.io/schemas/adaptive-card.json";

entity! {
    /// A complete card document.
    ///
    /// `version` is kept as the raw declared string so that documents with an
    /// unparseable version still decode; [`AdaptiveCard::validate`] reports it.
    pub struct AdaptiveCard as Document {
        schema: String = "$schema",
        actions: Vec<Action> = "actions",
        authentication: Option<Authentication> = "authentication" @ V1_4,
        body: Vec<Element> = "body",
        fallback_text: String = "fallbackText",
        metadata: Option<Metadata> = "metadata" @ V1_4,
        msteams: Option<TeamsCardProperties> = "msteams",
        references: Vec<Reference> = "references" @ V1_5,
        refresh: Option<Refresh> = "refresh" @ V1_4,
        resources: Option<Resources> = "resources" @ V1_5,
        speak: String = "speak",
        version: String = "version" [always],
        background_image: Option<BackgroundImage> = "backgroundImage" @ V1_2,
        fallback: Option<Fallback> = "fallback" @ V1_2,
        grid_area: String = "grid.area" @ V1_5,
        id: String = "id",
        is_sort_key: bool = "isSortKey" @ V1_5,
        key: String = "key",
        lang: String = "lang" @ V1_1,
        layouts: Vec<Layout> = "layouts" @ V1_5,
        min_height: String = "minHeight" @ V1_2,
        requires: Requires = "requires" @ V1_2,
        rtl: Option<bool> = "rtl" @ V1_5,
        select_action: Option<Action> = "selectAction" @ V1_1,
        style: Option<ContainerStyle> = "style",
        vertical_content_alignment: Option<VerticalAlignment> = "verticalContentAlignment" @ V1_1,
    }
}

impl AdaptiveCard {
    /// Empty card at the latest version with the default schema locator
    pub fn new() -> Self {
        Self::with_version(CardVersion::LATEST)
    }

    pub fn with_version(version: CardVersion) -> Self {
        Self {
            schema: DEFAULT_SCHEMA.to_string(),
            version: version.to_string(),
            ..Default::default()
        }
    }

    /// Parsed declared version
    pub fn declared_version(&self) -> Result<CardVersion> {
        CardVersion::parse(&self.version)
    }

    /// Check the card against its own declared version
    pub fn validate(&self) -> Vec<Violation> {
        validate(self, &self.version)
    }

    pub fn push(&mut self, element: impl Into<Element>) -> &mut Self {
        self.body.push(element.into());
        self
    }

    pub fn push_action(&mut self, action: impl Into<Action>) -> &mut Self {
        self.actions.push(action.into());
        self
    }
}

entity! {
    pub struct BackgroundImage {
        url: String = "url" [always],
        fill_mode: Option<ImageFillMode> = "fillMode",
        horizontal_alignment: Option<HorizontalAlignment> = "horizontalAlignment",
        vertical_alignment: Option<VerticalAlignment> = "verticalAlignment",
    }
}

entity! {
    /// Automatic refresh through an `Action.Execute`
    pub struct Refresh {
        action: Option<ExecuteAction> = "action",
        expires: String = "expires" @ V1_6,
        user_ids: Vec<String> = "userIds",
    }
}

entity! {
    /// Single sign-on and OAuth settings
    pub struct Authentication {
        text: String = "text",
        connection_name: String = "connectionName",
        token_exchange_resource: Option<TokenExchangeResource> = "tokenExchangeResource",
        buttons: Vec<AuthCardButton> = "buttons",
    }
}

entity! {
    pub struct TokenExchangeResource {
        id: String = "id" [always],
        uri: String = "uri" [always],
        provider_id: String = "providerId" [always],
    }
}

entity! {
    pub struct AuthCardButton {
        kind: String = "type" [always],
        title: String = "title",
        image: String = "image",
        value: String = "value" [always],
    }
}

entity! {
    pub struct Metadata {
        web_url: String = "webUrl",
    }
}

entity! {
    pub struct Resources {
        string_resources: Vec<StringResource> = "stringResources",
        key: String = "key",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Codec;
    use crate::error::CardError;
    use crate::model::TextBlock;
    use crate::version::V1_6;
    use serde_json::json;

    #[test]
    fn test_new_card_defaults() {
        let card = AdaptiveCard::new();
        assert_eq!(card.version, "1.6");
        assert_eq!(card.schema, DEFAULT_SCHEMA);
        assert_eq!(card.declared_version().unwrap(), V1_6);
        assert!(card.validate().is_empty());
    }

    #[test]
    fn test_card_encoding() {
        let codec = Codec::default();
        let mut card = AdaptiveCard::new();
        card.push(TextBlock::new("Disk usage high"));

        assert_eq!(
            codec.to_value(&card).unwrap(),
            json!({
                "type": "AdaptiveCard",
                "$schema": DEFAULT_SCHEMA,
                "body": [{"type": "TextBlock", "text": "Disk usage high"}],
                "version": "1.6"
            })
        );
    }

    #[test]
    fn test_version_always_emitted() {
        let codec = Codec::default();
        assert_eq!(
            codec.to_value(&AdaptiveCard::default()).unwrap(),
            json!({"type": "AdaptiveCard", "version": ""})
        );
    }

    #[test]
    fn test_min_height_violation_at_1_0() {
        let mut card = AdaptiveCard::with_version(CardVersion::BASELINE);
        card.min_height = "200px".to_string();

        let violations = card.validate();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field_path, "minHeight");
        assert_eq!(violations[0].required.to_string(), "1.2");
    }

    #[test]
    fn test_refresh_action_is_concrete() {
        let codec = Codec::default();

        match codec.from_value::<Refresh>(&json!({"action": {"type": "Action.Submit"}})) {
            Err(err) => {
                assert_eq!(err.path(), Some("action"));
                assert!(matches!(err.root(), CardError::TypeMismatch { .. }));
            }
            other => panic!("Expected TypeMismatch, got {:?}", other),
        }

        let refresh: Refresh = codec
            .from_value(&json!({"action": {"type": "Action.Execute", "verb": "refresh"}}))
            .unwrap();
        assert_eq!(refresh.action.map(|a| a.verb), Some("refresh".to_string()));
    }
}
