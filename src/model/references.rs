//! Citable references attached to a card

use crate::enums::Symbol;
use crate::model::AdaptiveCard;
use crate::wire::{category, entity};

category! {
    /// Entry of a card's `references` list
    pub enum Reference / ReferenceKind as Reference {
        AdaptiveCardReference(AdaptiveCardReference) = "AdaptiveCardReference",
        DocumentReference(DocumentReference) = "DocumentReference",
    }
}

entity! {
    /// Descriptive attributes shared by both reference kinds
    pub struct ReferenceDetails {
        summary: String = "abstract" @ V1_5,
        icon: Option<Symbol> = "icon" @ V1_5,
        key: String = "key",
        // at most three
        keywords: Vec<String> = "keywords" @ V1_5,
        title: String = "title" @ V1_5,
        url: String = "url" @ V1_5,
    }
}

entity! {
    /// External document
    pub struct DocumentReference as Reference(ReferenceKind::DocumentReference) {
        #[flatten] details: ReferenceDetails,
    }
}

entity! {
    /// Another card, embedded as the reference content
    pub struct AdaptiveCardReference as Reference(ReferenceKind::AdaptiveCardReference) {
        #[flatten] details: ReferenceDetails,
        content: Option<Box<AdaptiveCard>> = "content" @ V1_5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Codec;
    use serde_json::json;

    #[test]
    fn test_document_reference_round_trip() {
        let codec = Codec::default();
        let payload = json!({
            "type": "DocumentReference",
            "abstract": "Runbook for disk alerts",
            "keywords": ["disk", "ops"],
            "title": "Runbook",
            "url": "https://wiki/runbook"
        });

        match codec.from_value::<Reference>(&payload).unwrap() {
            Reference::DocumentReference(doc) => {
                assert_eq!(doc.details.summary, "Runbook for disk alerts");
                assert_eq!(doc.details.keywords.len(), 2);
                assert_eq!(codec.to_value(&doc).unwrap(), payload);
            }
            other => panic!("Expected DocumentReference, got {:?}", other),
        }
    }

    #[test]
    fn test_card_reference_content() {
        let codec = Codec::default();
        let payload = json!({
            "type": "AdaptiveCardReference",
            "title": "Details",
            "content": {"type": "AdaptiveCard", "version": "1.5"}
        });

        let reference: AdaptiveCardReference = codec.from_value(&payload).unwrap();
        assert_eq!(reference.content.map(|c| c.version), Some("1.5".to_string()));
    }
}
