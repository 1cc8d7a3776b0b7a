//! Workflow connector envelope
//!
//! Teams workflow webhooks expect the card wrapped in a message with a single
//! attachment rather than the bare card.

use crate::model::AdaptiveCard;
use crate::wire::entity;

/// Message type of the envelope
pub const MESSAGE_TYPE: &str = "message";

/// Attachment content type of a card
pub const CARD_CONTENT_TYPE: &str = "application/vnd.microsoft.card.adaptive";

/// Actions a host shows in one action set
pub const MAX_ACTIONS: usize = 5;

entity! {
    /// `{"type": "message", "attachments": [...]}`
    pub struct WorkflowMessage {
        kind: String = "type" [always],
        attachments: Vec<CardAttachment> = "attachments" [always],
    }
}

entity! {
    pub struct CardAttachment {
        content_type: String = "contentType" [always],
        // always null for inline cards
        content_url: Option<String> = "contentUrl" [always],
        content: AdaptiveCard = "content" [always],
    }
}

impl CardAttachment {
    pub fn new(card: AdaptiveCard) -> Self {
        Self {
            content_type: CARD_CONTENT_TYPE.to_string(),
            content_url: None,
            content: card,
        }
    }
}

impl WorkflowMessage {
    /// Wrap one card for delivery
    pub fn wrap(card: AdaptiveCard) -> Self {
        if card.actions.len() > MAX_ACTIONS {
            tracing::warn!(
                actions = card.actions.len(),
                max = MAX_ACTIONS,
                "card has more actions than hosts display"
            );
        }
        Self {
            kind: MESSAGE_TYPE.to_string(),
            attachments: vec![CardAttachment::new(card)],
        }
    }

    /// Cards carried by the message
    pub fn cards(&self) -> impl Iterator<Item = &AdaptiveCard> {
        self.attachments
            .iter()
            .filter(|a| a.content_type == CARD_CONTENT_TYPE)
            .map(|a| &a.content)
    }
}

impl From<AdaptiveCard> for WorkflowMessage {
    fn from(card: AdaptiveCard) -> Self {
        WorkflowMessage::wrap(card)
    }
}
