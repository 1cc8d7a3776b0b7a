//! Element variants: the visual building blocks of a card body

use crate::enums::{
    Appearance, BadgeShape, BadgeSize, CodeLanguage, Color, ContainerStyle, FontSize, FontType,
    FontWeight, HorizontalAlignment, IconPosition, IconSize, IconStyle, ImageFit, ImageSize,
    ImageStyle, ProgressRingLabelPosition, ProgressRingSize, RatingColor, RatingSize,
    RatingStyle, Symbol, TextBlockStyle, VerticalAlignment,
};
use crate::model::{
    Action, BackgroundImage, CaptionSource, Column, ElementCommon, Fact, InputChoiceSet,
    InputDate, InputNumber, InputRating, InputText, InputTime, InputToggle, Layout, MediaSource,
    RichTextInline, TableColumnDefinition, TableRow, TeamsImageProperties,
};
use crate::wire::{category, entity};

category! {
    /// Any element that may appear in a card body or container
    pub enum Element / ElementKind as Element {
        ActionSet(ActionSet) = "ActionSet",
        Badge(Badge) = "Badge",
        CodeBlock(CodeBlock) = "CodeBlock",
        ColumnSet(ColumnSet) = "ColumnSet",
        CompoundButton(CompoundButton) = "CompoundButton",
        Container(Container) = "Container",
        FactSet(FactSet) = "FactSet",
        Icon(Icon) = "Icon",
        Image(Image) = "Image",
        ImageSet(ImageSet) = "ImageSet",
        Media(Media) = "Media",
        ProgressBar(ProgressBar) = "ProgressBar",
        ProgressRing(ProgressRing) = "ProgressRing",
        Rating(Rating) = "Rating",
        RichTextBlock(RichTextBlock) = "RichTextBlock",
        Table(Table) = "Table",
        TextBlock(TextBlock) = "TextBlock",
        InputChoiceSet(InputChoiceSet) = "Input.ChoiceSet",
        InputDate(InputDate) = "Input.Date",
        InputNumber(InputNumber) = "Input.Number",
        InputRating(InputRating) = "Input.Rating",
        InputText(InputText) = "Input.Text",
        InputTime(InputTime) = "Input.Time",
        InputToggle(InputToggle) = "Input.Toggle",
    }
}

impl Element {
    /// Shared attributes of a built-in element
    pub fn common(&self) -> Option<&ElementCommon> {
        Some(match self {
            Element::ActionSet(e) => &e.common,
            Element::Badge(e) => &e.common,
            Element::CodeBlock(e) => &e.common,
            Element::ColumnSet(e) => &e.common,
            Element::CompoundButton(e) => &e.common,
            Element::Container(e) => &e.common,
            Element::FactSet(e) => &e.common,
            Element::Icon(e) => &e.common,
            Element::Image(e) => &e.common,
            Element::ImageSet(e) => &e.common,
            Element::Media(e) => &e.common,
            Element::ProgressBar(e) => &e.common,
            Element::ProgressRing(e) => &e.common,
            Element::Rating(e) => &e.common,
            Element::RichTextBlock(e) => &e.common,
            Element::Table(e) => &e.common,
            Element::TextBlock(e) => &e.common,
            Element::InputChoiceSet(e) => &e.common,
            Element::InputDate(e) => &e.common,
            Element::InputNumber(e) => &e.common,
            Element::InputRating(e) => &e.common,
            Element::InputText(e) => &e.common,
            Element::InputTime(e) => &e.common,
            Element::InputToggle(e) => &e.common,
            Element::Extension(_) => return None,
        })
    }

    pub fn id(&self) -> Option<&str> {
        self.common()
            .map(|c| c.id.as_str())
            .filter(|id| !id.is_empty())
    }
}

entity! {
    /// Row of action buttons placed inside the body
    pub struct ActionSet as Element(ElementKind::ActionSet) {
        #[flatten] common: ElementCommon,
        actions: Vec<Action> = "actions" [always],
    }
}

entity! {
    pub struct Badge as Element(ElementKind::Badge) {
        #[flatten] common: ElementCommon,
        appearance: Option<Appearance> = "appearance" @ V1_5,
        icon: Option<Symbol> = "icon" @ V1_5,
        icon_position: Option<IconPosition> = "iconPosition" @ V1_5,
        shape: Option<BadgeShape> = "shape" @ V1_5,
        size: Option<BadgeSize> = "size" @ V1_5,
        style: Option<Color> = "style" @ V1_5,
        text: Option<String> = "text" @ V1_5,
        tooltip: Option<String> = "tooltip" @ V1_5,
    }
}

entity! {
    /// Formatted source code
    pub struct CodeBlock as Element(ElementKind::CodeBlock) {
        #[flatten] common: ElementCommon,
        code_snippet: String = "codeSnippet" @ V1_5,
        language: Option<CodeLanguage> = "language" @ V1_5,
        start_line_number: u32 = "startLineNumber" @ V1_5,
    }
}

entity! {
    pub struct ColumnSet as Element(ElementKind::ColumnSet) {
        #[flatten] common: ElementCommon,
        columns: Vec<Column> = "columns",
        min_width: String = "minWidth" @ V1_5,
        bleed: bool = "bleed" @ V1_2,
        min_height: String = "minHeight" @ V1_2,
        rounded_corners: bool = "roundedCorners" @ V1_5,
        show_border: bool = "showBorder" @ V1_5,
        select_action: Option<Action> = "selectAction" @ V1_1,
        style: Option<ContainerStyle> = "style" @ V1_2,
    }
}

impl ColumnSet {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            ..Default::default()
        }
    }
}

entity! {
    /// Button with a title, description and optional badge
    pub struct CompoundButton as Element(ElementKind::CompoundButton) {
        #[flatten] common: ElementCommon,
        badge: Option<Badge> = "badge" @ V1_5,
        description: String = "description" @ V1_5,
        icon: Option<Symbol> = "icon" @ V1_5,
        select_action: Option<Action> = "selectAction" @ V1_1,
        title: String = "title" @ V1_5,
    }
}

entity! {
    /// Groups elements together
    pub struct Container as Element(ElementKind::Container) {
        #[flatten] common: ElementCommon,
        background_image: Option<BackgroundImage> = "backgroundImage" @ V1_2,
        items: Vec<Element> = "items" [always],
        max_height: String = "maxHeight" @ V1_5,
        min_height: String = "minHeight" @ V1_5,
        rtl: Option<bool> = "rtl" @ V1_5,
        vertical_content_alignment: Option<VerticalAlignment> = "verticalContentAlignment" @ V1_1,
        bleed: bool = "bleed" @ V1_2,
        layouts: Vec<Layout> = "layouts" @ V1_5,
        rounded_corners: bool = "roundedCorners" @ V1_5,
        select_action: Option<Action> = "selectAction" @ V1_1,
        show_border: bool = "showBorder" @ V1_5,
        style: Option<ContainerStyle> = "style",
    }
}

impl Container {
    pub fn new(items: Vec<Element>) -> Self {
        Self {
            items,
            ..Default::default()
        }
    }
}

entity! {
    /// Series of title/value pairs rendered as a table
    pub struct FactSet as Element(ElementKind::FactSet) {
        #[flatten] common: ElementCommon,
        facts: Vec<Fact> = "facts" [always],
    }
}

entity! {
    pub struct Icon as Element(ElementKind::Icon) {
        #[flatten] common: ElementCommon,
        url: String = "url" [always],
        color: Option<Color> = "color" @ V1_5,
        name: Option<Symbol> = "name" @ V1_5,
        select_action: Option<Action> = "selectAction" @ V1_5,
        size: Option<IconSize> = "size" @ V1_5,
        style: Option<IconStyle> = "style" @ V1_5,
    }
}

entity! {
    /// Image element. Its height is the shared `height` attribute.
    pub struct Image as Element(ElementKind::Image) {
        #[flatten] common: ElementCommon,
        allow_expand: bool = "allowExpand" @ V1_2,
        alt_text: String = "altText",
        background_color: String = "backgroundColor" @ V1_1,
        fit_mode: Option<ImageFit> = "fitMode" @ V1_2,
        horizontal_content_alignment: Option<HorizontalAlignment> = "horizontalContentAlignment",
        msteams: Option<TeamsImageProperties> = "msteams" @ V1_2,
        select_action: Option<Action> = "selectAction" @ V1_1,
        size: Option<ImageSize> = "size",
        style: Option<ImageStyle> = "style",
        url: String = "url" [always],
        vertical_content_alignment: Option<VerticalAlignment> = "verticalContentAlignment",
        width: String = "width",
    }
}

impl Image {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }
}

entity! {
    pub struct ImageSet as Element(ElementKind::ImageSet) {
        #[flatten] common: ElementCommon,
        images: Vec<Image> = "images" [always],
        image_size: Option<ImageSize> = "imageSize",
    }
}

entity! {
    /// Audio or video player
    pub struct Media as Element(ElementKind::Media) {
        #[flatten] common: ElementCommon,
        alt_text: String = "altText",
        caption_sources: Vec<CaptionSource> = "captionSources" @ V1_6,
        poster: String = "poster",
        sources: Vec<MediaSource> = "sources" [always],
    }
}

entity! {
    pub struct ProgressBar as Element(ElementKind::ProgressBar) {
        #[flatten] common: ElementCommon,
        color: Option<Color> = "color" @ V1_5,
        max: u32 = "max" @ V1_5,
        value: u32 = "value" @ V1_5,
    }
}

entity! {
    pub struct ProgressRing as Element(ElementKind::ProgressRing) {
        #[flatten] common: ElementCommon,
        label: String = "label" @ V1_5,
        label_position: Option<ProgressRingLabelPosition> = "labelPosition" @ V1_5,
        size: Option<ProgressRingSize> = "size" @ V1_5,
    }
}

entity! {
    /// Read-only star rating
    pub struct Rating as Element(ElementKind::Rating) {
        #[flatten] common: ElementCommon,
        color: Option<RatingColor> = "color" @ V1_5,
        count: u32 = "count" @ V1_5,
        max: u32 = "max" @ V1_5,
        size: Option<RatingSize> = "size" @ V1_5,
        style: Option<RatingStyle> = "style" @ V1_5,
        value: f64 = "value" @ V1_5,
    }
}

entity! {
    /// Paragraph made of individually formatted inlines
    pub struct RichTextBlock as Element(ElementKind::RichTextBlock) {
        #[flatten] common: ElementCommon,
        inlines: Vec<RichTextInline> = "inlines" [always],
        label_for: String = "labelFor" @ V1_5,
    }
}

entity! {
    pub struct Table as Element(ElementKind::Table) {
        #[flatten] common: ElementCommon,
        columns: Vec<TableColumnDefinition> = "columns" @ V1_5,
        first_row_as_header: bool = "firstRowAsHeader" @ V1_5,
        grid_style: Option<ContainerStyle> = "gridStyle" @ V1_5,
        horizontal_cell_content_alignment: Option<HorizontalAlignment> = "horizontalCellContentAlignment" @ V1_5,
        min_width: String = "minWidth" @ V1_5,
        rows: Vec<TableRow> = "rows" @ V1_5,
        show_grid_lines: bool = "showGridLines" @ V1_5,
        vertical_cell_content_alignment: Option<VerticalAlignment> = "verticalCellContentAlignment" @ V1_5,
        rounded_corners: bool = "roundedCorners" @ V1_5,
        show_border: bool = "showBorder" @ V1_5,
    }
}

entity! {
    /// Plain or markdown text
    pub struct TextBlock as Element(ElementKind::TextBlock) {
        #[flatten] common: ElementCommon,
        label_for: String = "labelFor" @ V1_5,
        max_lines: u32 = "maxLines",
        style: Option<TextBlockStyle> = "style" @ V1_5,
        wrap: bool = "wrap",
        color: Option<Color> = "color",
        font_type: Option<FontType> = "fontType" @ V1_2,
        size: Option<FontSize> = "size",
        weight: Option<FontWeight> = "weight",
        is_subtle: Option<bool> = "isSubtle",
        text: Option<String> = "text" [always],
        text_dynamic: Option<String> = "text.dynamic" @ V1_5,
    }
}

impl TextBlock {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Codec;
    use crate::enums::Spacing;
    use crate::shapes::BlockElementHeight;
    use crate::version::{V1_1, V1_5};
    use crate::wire::{Entity, FieldRole};
    use serde_json::json;

    #[test]
    fn test_text_block_encoding() {
        let codec = Codec::default();
        let mut block = TextBlock::new("Hello");
        block.wrap = true;
        block.size = Some(FontSize::Large);
        block.common.spacing = Some(Spacing::Small);

        assert_eq!(
            codec.to_value(&Element::from(block)).unwrap(),
            json!({
                "type": "TextBlock",
                "spacing": "Small",
                "wrap": true,
                "size": "Large",
                "text": "Hello"
            })
        );
    }

    #[test]
    fn test_always_emitted_fields() {
        let codec = Codec::default();

        assert_eq!(
            codec.to_value(&Container::default()).unwrap(),
            json!({"type": "Container", "items": []})
        );
        assert_eq!(
            codec.to_value(&TextBlock::default()).unwrap(),
            json!({"type": "TextBlock", "text": null})
        );
    }

    #[test]
    fn test_image_height_uses_shared_attribute() {
        let codec = Codec::default();
        let image: Image = codec
            .from_value(&json!({"type": "Image", "url": "https://x/y.png", "height": "48px"}))
            .unwrap();

        assert_eq!(image.common.height, Some(BlockElementHeight::Pixels(48)));
        assert_eq!(image.url, "https://x/y.png");
    }

    #[test]
    fn test_field_metadata() {
        let fields = TextBlock::FIELDS;
        assert_eq!(fields[0].role, FieldRole::Group);

        let label_for = fields.iter().find(|f| f.key == "labelFor").unwrap();
        assert_eq!(label_for.since, V1_5);

        let text = fields.iter().find(|f| f.key == "text").unwrap();
        assert!(text.always);

        assert_eq!(ElementKind::TextBlock.fields(), fields);
        assert!(ElementCommon::FIELDS
            .iter()
            .any(|f| f.key == "height" && f.since == V1_1));
    }

    #[test]
    fn test_element_accessors() {
        let mut block = TextBlock::new("x");
        block.common.id = "greeting".to_string();
        let element = Element::from(block);

        assert_eq!(element.kind(), Some(ElementKind::TextBlock));
        assert_eq!(element.id(), Some("greeting"));
        assert_eq!(element.descriptor().to_string(), "Element::TextBlock");
        assert_eq!(ElementKind::ALL.len(), 24);
    }
}
