//! Actions and the Teams-specific submit payloads

use serde_json::Value;

use crate::enums::{AssociatedInputs, InsertPosition, PopoverPosition};
use crate::model::{ActionCommon, AdaptiveCard, Element, TeamsSubmitActionProperties};
use crate::shapes::{SubmitData, TargetElement};
use crate::wire::{category, entity};

category! {
    /// Anything a user can trigger
    pub enum Action / ActionKind as Action {
        Execute(ExecuteAction) = "Action.Execute",
        InsertImage(InsertImageAction) = "Action.InsertImage",
        OpenUrl(OpenUrlAction) = "Action.OpenUrl",
        OpenUrlDialog(OpenUrlDialogAction) = "Action.OpenUrlDialog",
        Popover(PopoverAction) = "Action.Popover",
        ResetInputs(ResetInputsAction) = "Action.ResetInputs",
        RunCommands(RunCommandsAction) = "Action.RunCommands",
        ShowCard(ShowCardAction) = "Action.ShowCard",
        Submit(SubmitAction) = "Action.Submit",
        ToggleVisibility(ToggleVisibilityAction) = "Action.ToggleVisibility",
    }
}

impl Action {
    /// Shared attributes of a built-in action
    pub fn common(&self) -> Option<&ActionCommon> {
        Some(match self {
            Action::Execute(a) => &a.common,
            Action::InsertImage(a) => &a.common,
            Action::OpenUrl(a) => &a.common,
            Action::OpenUrlDialog(a) => &a.common,
            Action::Popover(a) => &a.common,
            Action::ResetInputs(a) => &a.common,
            Action::RunCommands(a) => &a.common,
            Action::ShowCard(a) => &a.common,
            Action::Submit(a) => &a.common,
            Action::ToggleVisibility(a) => &a.common,
            Action::Extension(_) => return None,
        })
    }

    pub fn title(&self) -> Option<&str> {
        self.common()
            .map(|c| c.title.as_str())
            .filter(|t| !t.is_empty())
    }
}

entity! {
    /// Universal action handled by the bot (1.4+ hosts)
    pub struct ExecuteAction as Action(ActionKind::Execute) {
        #[flatten] common: ActionCommon,
        verb: String = "verb",
        associated_inputs: Option<AssociatedInputs> = "associatedInputs",
        conditionally_enabled: bool = "conditionallyEnabled" @ V1_5,
        data: Option<SubmitData> = "data",
    }
}

entity! {
    pub struct InsertImageAction as Action(ActionKind::InsertImage) {
        #[flatten] common: ActionCommon,
        alt_text: String = "altText",
        insert_position: Option<InsertPosition> = "insertPosition",
        url: String = "url" [always],
    }
}

entity! {
    pub struct OpenUrlAction as Action(ActionKind::OpenUrl) {
        #[flatten] common: ActionCommon,
        url: String = "url" [always],
    }
}

impl OpenUrlAction {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            common: ActionCommon::titled(title),
            url: url.into(),
        }
    }
}

entity! {
    pub struct OpenUrlDialogAction as Action(ActionKind::OpenUrlDialog) {
        #[flatten] common: ActionCommon,
        url: String = "url" [always],
        dialog_height: String = "dialogHeight",
        dialog_title: String = "dialogTitle",
        dialog_width: String = "dialogWidth",
    }
}

entity! {
    pub struct PopoverAction as Action(ActionKind::Popover) {
        #[flatten] common: ActionCommon,
        content: Option<Box<Element>> = "content",
        display_arrow: Option<bool> = "displayArrow",
        max_popover_width: String = "maxPopoverWidth",
        popover_title: String = "popoverTitle",
        position: Option<PopoverPosition> = "position",
    }
}

entity! {
    pub struct ResetInputsAction as Action(ActionKind::ResetInputs) {
        #[flatten] common: ActionCommon,
        target_input_ids: Vec<String> = "targetInputIds",
    }
}

entity! {
    pub struct RunCommandsAction as Action(ActionKind::RunCommands) {
        #[flatten] common: ActionCommon,
        commands: Vec<String> = "commands",
        on_failure: String = "onFailure",
    }
}

entity! {
    /// Reveals a nested card
    pub struct ShowCardAction as Action(ActionKind::ShowCard) {
        #[flatten] common: ActionCommon,
        card: Option<Box<AdaptiveCard>> = "card",
    }
}

entity! {
    /// Gathers input fields and sends them to the host
    pub struct SubmitAction as Action(ActionKind::Submit) {
        #[flatten] common: ActionCommon,
        msteams: Option<TeamsSubmitActionProperties> = "msteams" @ V1_2,
        associated_inputs: Option<AssociatedInputs> = "associatedInputs",
        conditionally_enabled: bool = "conditionallyEnabled" @ V1_5,
        data: Option<SubmitData> = "data",
    }
}

impl SubmitAction {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            common: ActionCommon::titled(title),
            ..Default::default()
        }
    }
}

entity! {
    pub struct ToggleVisibilityAction as Action(ActionKind::ToggleVisibility) {
        #[flatten] common: ActionCommon,
        target_elements: Vec<TargetElement> = "targetElements" [always],
    }
}

category! {
    /// Teams payload placed under `data.msteams` of a submit action
    pub enum ActionData / ActionDataKind as ActionData {
        ImBack(ImBack) = "imBack",
        MessageBack(MessageBack) = "messageBack",
        Invoke(Invoke) = "invoke",
        TaskFetch(TaskFetch) = "task/fetch",
        Signin(Signin) = "signin",
    }
}

entity! {
    /// Posts `value` to the conversation as if the user typed it
    pub struct ImBack as ActionData(ActionDataKind::ImBack) {
        value: String = "value",
        key: String = "key",
    }
}

entity! {
    /// Sends `text` and `value` to the bot; `displayText` is shown in the chat
    pub struct MessageBack as ActionData(ActionDataKind::MessageBack) {
        display_text: String = "displayText",
        text: String = "text",
        value: Value = "value",
        key: String = "key",
    }
}

entity! {
    pub struct Invoke as ActionData(ActionDataKind::Invoke) {
        value: Value = "value",
        key: String = "key",
    }
}

entity! {
    /// Opens a task module
    pub struct TaskFetch as ActionData(ActionDataKind::TaskFetch) {
        key: String = "key",
    }
}

entity! {
    /// Starts an OAuth flow at `value`
    pub struct Signin as ActionData(ActionDataKind::Signin) {
        value: String = "value",
        key: String = "key",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Codec;
    use crate::enums::ActionStyle;
    use serde_json::json;

    #[test]
    fn test_open_url_encoding() {
        let codec = Codec::default();
        let mut action = OpenUrlAction::new("View", "https://example.com");
        action.common.style = Some(ActionStyle::Positive);

        assert_eq!(
            codec.to_value(&Action::from(action)).unwrap(),
            json!({
                "type": "Action.OpenUrl",
                "style": "positive",
                "title": "View",
                "url": "https://example.com"
            })
        );
    }

    #[test]
    fn test_show_card_nests_document() {
        let codec = Codec::default();
        let payload = json!({
            "type": "Action.ShowCard",
            "title": "More",
            "card": {
                "type": "AdaptiveCard",
                "version": "1.2",
                "body": [{"type": "TextBlock", "text": "details"}]
            }
        });

        match codec.from_value::<Action>(&payload).unwrap() {
            Action::ShowCard(show) => {
                let card = show.card.expect("nested card");
                assert_eq!(card.version, "1.2");
                assert_eq!(card.body.len(), 1);
            }
            other => panic!("Expected Action.ShowCard, got {:?}", other),
        }
    }

    #[test]
    fn test_toggle_visibility_targets() {
        let codec = Codec::default();
        let payload = json!({
            "type": "Action.ToggleVisibility",
            "title": "Toggle",
            "targetElements": ["a", {"elementId": "b", "isVisible": true}]
        });

        let action: ToggleVisibilityAction = codec.from_value(&payload).unwrap();
        assert_eq!(
            action.target_elements,
            vec![TargetElement::toggle("a"), TargetElement::set("b", true)]
        );
        assert_eq!(codec.to_value(&action).unwrap(), payload);
    }

    #[test]
    fn test_task_fetch_payload() {
        let codec = Codec::default();
        let mut submit = SubmitAction::new("Open");
        submit.data = Some(SubmitData::teams(TaskFetch::default()));

        assert_eq!(
            codec.to_value(&submit).unwrap(),
            json!({
                "type": "Action.Submit",
                "title": "Open",
                "data": {"msteams": {"type": "task/fetch"}}
            })
        );
    }

    #[test]
    fn test_message_back_value_kept_verbatim() {
        let codec = Codec::default();
        let payload = json!({"type": "messageBack", "text": "hi", "value": {"n": [1, 2]}});

        match codec.from_value::<ActionData>(&payload).unwrap() {
            ActionData::MessageBack(data) => {
                assert_eq!(data.text, "hi");
                assert_eq!(data.value, json!({"n": [1, 2]}));
            }
            other => panic!("Expected messageBack, got {:?}", other),
        }
    }

    #[test]
    fn test_action_accessors() {
        let action = Action::from(SubmitAction::new("Go"));
        assert_eq!(action.kind(), Some(ActionKind::Submit));
        assert_eq!(action.title(), Some("Go"));
        assert_eq!(ActionKind::ALL.len(), 10);
    }
}
