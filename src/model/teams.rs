//! Microsoft Teams extensions carried under `msteams` keys

use crate::enums::{MentionType, TeamsCardWidth};
use crate::wire::entity;

entity! {
    /// Card-level Teams settings
    pub struct TeamsCardProperties {
        entities: Vec<Mention> = "entities",
        width: Option<TeamsCardWidth> = "width",
        key: String = "key",
    }
}

entity! {
    /// `<at>` mention placed in the card text
    pub struct Mention {
        mentioned: Vec<MentionedEntity> = "mentioned",
        text: String = "text",
        key: String = "key",
    }
}

entity! {
    pub struct MentionedEntity {
        // Entra user id or tag id
        id: String = "id",
        mention_type: Option<MentionType> = "mentionType",
        name: String = "name",
        key: String = "key",
    }
}

entity! {
    pub struct TeamsSubmitActionProperties {
        feedback: Vec<TeamsSubmitActionFeedback> = "feedback",
        key: String = "key",
    }
}

entity! {
    pub struct TeamsSubmitActionFeedback {
        hide: bool = "hide",
        key: String = "key",
    }
}

entity! {
    pub struct TeamsImageProperties {
        allow_expand: bool = "allowExpand" @ V1_2,
        key: String = "key",
    }
}

impl TeamsCardProperties {
    /// Stretch the card to the full width of the conversation
    pub fn full_width() -> Self {
        Self {
            width: Some(TeamsCardWidth::Full),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Codec;
    use crate::model::AdaptiveCard;
    use serde_json::json;

    #[test]
    fn test_full_width_card() {
        let codec = Codec::default();
        let mut card = AdaptiveCard::default();
        card.version = "1.4".to_string();
        card.msteams = Some(TeamsCardProperties::full_width());

        assert_eq!(
            codec.to_value(&card).unwrap(),
            json!({"type": "AdaptiveCard", "msteams": {"width": "Full"}, "version": "1.4"})
        );
    }

    #[test]
    fn test_mentions_decode() {
        let codec = Codec::default();
        let props: TeamsCardProperties = codec
            .from_value(&json!({
                "entities": [{
                    "text": "<at>Ops</at>",
                    "mentioned": [{"id": "t-1", "name": "Ops", "mentionType": "tag"}]
                }]
            }))
            .unwrap();

        let mentioned = &props.entities[0].mentioned[0];
        assert_eq!(mentioned.name, "Ops");
        assert_eq!(mentioned.mention_type, Some(MentionType::Tag));
    }
}
