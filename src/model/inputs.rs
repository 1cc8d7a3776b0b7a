//! Input elements and the records they use

use crate::enums::{ChoiceInputStyle, LabelPosition, RatingColor, RatingSize, TextInputStyle};
use crate::model::{Action, ElementCommon, ElementKind};
use crate::shapes::LabelWidth;
use crate::wire::entity;

entity! {
    /// Drop-down or radio/checkbox list
    pub struct InputChoiceSet as Element(ElementKind::InputChoiceSet) {
        #[flatten] common: ElementCommon,
        choices: Vec<InputChoice> = "choices",
        choices_data: Option<DataQuery> = "choices.data" @ V1_6,
        error_message: String = "errorMessage" @ V1_3,
        is_multi_select: bool = "isMultiSelect",
        is_required: bool = "isRequired" @ V1_3,
        label: String = "label" @ V1_3,
        label_position: Option<LabelPosition> = "labelPosition" @ V1_6,
        label_width: Option<LabelWidth> = "labelWidth" @ V1_6,
        min_column_width: String = "minColumnWidth" @ V1_5,
        placeholder: String = "placeholder",
        style: Option<ChoiceInputStyle> = "style",
        use_multiple_columns: Option<bool> = "useMultipleColumns",
        value: String = "value",
        value_changed_action: Option<Action> = "valueChangedAction",
        wrap: bool = "wrap" @ V1_2,
    }
}

impl InputChoiceSet {
    pub fn new(id: impl Into<String>, choices: Vec<InputChoice>) -> Self {
        Self {
            common: ElementCommon::with_id(id),
            choices,
            ..Default::default()
        }
    }
}

entity! {
    pub struct InputChoice {
        title: String = "title" [always],
        value: String = "value" [always],
    }
}

impl InputChoice {
    pub fn new(title: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
        }
    }
}

entity! {
    /// Dynamic choice source queried by the host
    pub struct DataQuery {
        dataset: String = "dataset" [always],
        count: u32 = "count",
        skip: u32 = "skip",
    }
}

entity! {
    pub struct InputDate as Element(ElementKind::InputDate) {
        #[flatten] common: ElementCommon,
        max: String = "max",
        min: String = "min",
        error_message: String = "errorMessage" @ V1_3,
        is_required: bool = "isRequired" @ V1_3,
        label: String = "label" @ V1_3,
        label_position: Option<LabelPosition> = "labelPosition" @ V1_6,
        label_width: Option<LabelWidth> = "labelWidth" @ V1_6,
        placeholder: String = "placeholder",
        value: String = "value",
        value_changed_action: Option<Action> = "valueChangedAction",
    }
}

entity! {
    pub struct InputNumber as Element(ElementKind::InputNumber) {
        #[flatten] common: ElementCommon,
        max: Option<f64> = "max",
        min: Option<f64> = "min",
        error_message: String = "errorMessage" @ V1_3,
        is_required: bool = "isRequired" @ V1_3,
        label: String = "label" @ V1_3,
        label_position: Option<LabelPosition> = "labelPosition" @ V1_6,
        label_width: Option<LabelWidth> = "labelWidth" @ V1_6,
        placeholder: String = "placeholder",
        value: Option<f64> = "value",
        value_changed_action: Option<Action> = "valueChangedAction",
    }
}

entity! {
    pub struct InputRating as Element(ElementKind::InputRating) {
        #[flatten] common: ElementCommon,
        allow_half_steps: bool = "allowHalfSteps",
        color: Option<RatingColor> = "color",
        max: u32 = "max",
        size: Option<RatingSize> = "size",
        error_message: String = "errorMessage" @ V1_3,
        is_required: bool = "isRequired" @ V1_3,
        label: String = "label" @ V1_3,
        label_position: Option<LabelPosition> = "labelPosition" @ V1_6,
        label_width: Option<LabelWidth> = "labelWidth" @ V1_6,
        placeholder: String = "placeholder",
        value: Option<f64> = "value",
        value_changed_action: Option<Action> = "valueChangedAction",
    }
}

entity! {
    /// Single or multi-line text entry
    pub struct InputText as Element(ElementKind::InputText) {
        #[flatten] common: ElementCommon,
        inline_action: Option<Action> = "inlineAction" @ V1_2,
        style: Option<TextInputStyle> = "style",
        is_multiline: bool = "isMultiline",
        max_length: u32 = "maxLength",
        regex: String = "regex" @ V1_3,
        error_message: String = "errorMessage" @ V1_3,
        is_required: bool = "isRequired" @ V1_3,
        label: String = "label" @ V1_3,
        label_position: Option<LabelPosition> = "labelPosition" @ V1_6,
        label_width: Option<LabelWidth> = "labelWidth" @ V1_6,
        placeholder: String = "placeholder",
        value: String = "value",
        value_changed_action: Option<Action> = "valueChangedAction",
    }
}

impl InputText {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            common: ElementCommon::with_id(id),
            ..Default::default()
        }
    }
}

entity! {
    /// Time entry; bounds use the HH:MM format
    pub struct InputTime as Element(ElementKind::InputTime) {
        #[flatten] common: ElementCommon,
        max: String = "max",
        min: String = "min",
        error_message: String = "errorMessage" @ V1_3,
        is_required: bool = "isRequired" @ V1_3,
        label: String = "label" @ V1_3,
        label_position: Option<LabelPosition> = "labelPosition" @ V1_6,
        label_width: Option<LabelWidth> = "labelWidth" @ V1_6,
        placeholder: String = "placeholder",
        value: String = "value",
        value_changed_action: Option<Action> = "valueChangedAction",
    }
}

entity! {
    pub struct InputToggle as Element(ElementKind::InputToggle) {
        #[flatten] common: ElementCommon,
        title: String = "title" [always],
        value_off: String = "valueOff",
        value_on: String = "valueOn",
        wrap: bool = "wrap" @ V1_2,
        show_title: bool = "showTitle" @ V1_3,
        error_message: String = "errorMessage" @ V1_3,
        is_required: bool = "isRequired" @ V1_3,
        label: String = "label" @ V1_3,
        label_position: Option<LabelPosition> = "labelPosition" @ V1_6,
        label_width: Option<LabelWidth> = "labelWidth" @ V1_6,
        placeholder: String = "placeholder",
        value: String = "value",
        value_changed_action: Option<Action> = "valueChangedAction",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Codec;
    use crate::error::CardError;
    use crate::model::Element;
    use serde_json::json;

    #[test]
    fn test_choice_set_decoding() {
        let codec = Codec::default();
        let payload = json!({
            "type": "Input.ChoiceSet",
            "id": "color",
            "style": "expanded",
            "isMultiSelect": true,
            "labelWidth": "80px",
            "choices": [
                {"title": "Red", "value": "red"},
                {"title": "Blue", "value": "blue"}
            ]
        });

        match codec.from_value::<Element>(&payload).unwrap() {
            Element::InputChoiceSet(set) => {
                assert_eq!(set.common.id, "color");
                assert_eq!(set.style, Some(ChoiceInputStyle::Expanded));
                assert!(set.is_multi_select);
                assert_eq!(set.label_width, Some(LabelWidth::Pixels(80)));
                assert_eq!(set.choices[1], InputChoice::new("Blue", "blue"));
            }
            other => panic!("Expected Input.ChoiceSet, got {:?}", other),
        }
    }

    #[test]
    fn test_unset_optional_inputs_are_omitted() {
        let codec = Codec::default();
        let set = InputChoiceSet::new("pick", vec![InputChoice::new("A", "a")]);

        assert_eq!(
            codec.to_value(&set).unwrap(),
            json!({
                "type": "Input.ChoiceSet",
                "id": "pick",
                "choices": [{"title": "A", "value": "a"}]
            })
        );
    }

    #[test]
    fn test_number_input_keeps_zero_bounds() {
        let codec = Codec::default();
        let payload = json!({"type": "Input.Number", "id": "n", "min": 0, "max": 10.5});

        let input: InputNumber = codec.from_value(&payload).unwrap();
        assert_eq!(input.min, Some(0.0));
        assert_eq!(input.max, Some(10.5));
        assert_eq!(codec.to_value(&input).unwrap(), payload);
    }

    #[test]
    fn test_bad_label_width_reports_path() {
        let codec = Codec::default();
        let err = codec
            .from_value::<Element>(&json!({"type": "Input.Text", "labelWidth": 12.5}))
            .unwrap_err();

        assert_eq!(err.path(), Some("labelWidth"));
        assert!(matches!(err.root(), CardError::InvalidShape { .. }));
    }
}
