//! Tagged records
//!
//! These carry a `"type"` on the wire but are never chosen polymorphically:
//! the owning field always knows the concrete record it expects.

use crate::enums::{ContainerStyle, HorizontalAlignment, VerticalAlignment};
use crate::model::{Action, BackgroundImage, Element, ElementCommon, Layout};
use crate::shapes::ColumnWidth;
use crate::wire::{entity, Entity, FieldSpec, Requires};

/// Tagged record kinds, as stored in the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordKind {
    Column,
    Fact,
    TableRow,
    TableCell,
    TableColumnDefinition,
    MediaSource,
    CaptionSource,
    StringResource,
}

impl RecordKind {
    pub const ALL: &'static [RecordKind] = &[
        RecordKind::Column,
        RecordKind::Fact,
        RecordKind::TableRow,
        RecordKind::TableCell,
        RecordKind::TableColumnDefinition,
        RecordKind::MediaSource,
        RecordKind::CaptionSource,
        RecordKind::StringResource,
    ];

    pub fn default_discriminant(self) -> &'static str {
        match self {
            RecordKind::Column => "Column",
            RecordKind::Fact => "Fact",
            RecordKind::TableRow => "TableRow",
            RecordKind::TableCell => "TableCell",
            RecordKind::TableColumnDefinition => "TableColumnDefinition",
            RecordKind::MediaSource => "MediaSource",
            RecordKind::CaptionSource => "CaptionSource",
            RecordKind::StringResource => "StringResource",
        }
    }

    pub fn fields(self) -> &'static [FieldSpec] {
        match self {
            RecordKind::Column => Column::FIELDS,
            RecordKind::Fact => Fact::FIELDS,
            RecordKind::TableRow => TableRow::FIELDS,
            RecordKind::TableCell => TableCell::FIELDS,
            RecordKind::TableColumnDefinition => TableColumnDefinition::FIELDS,
            RecordKind::MediaSource => MediaSource::FIELDS,
            RecordKind::CaptionSource => CaptionSource::FIELDS,
            RecordKind::StringResource => StringResource::FIELDS,
        }
    }
}

entity! {
    /// One column of a `ColumnSet`
    pub struct Column as Record(RecordKind::Column) {
        #[flatten] common: ElementCommon,
        items: Vec<Element> = "items",
        width: Option<ColumnWidth> = "width",
        background_image: Option<BackgroundImage> = "backgroundImage" @ V1_2,
        bleed: bool = "bleed" @ V1_2,
        layouts: Vec<Layout> = "layouts" @ V1_5,
        max_height: String = "maxHeight" @ V1_5,
        min_height: String = "minHeight" @ V1_2,
        rounded_corners: bool = "roundedCorners" @ V1_5,
        rtl: Option<bool> = "rtl" @ V1_5,
        select_action: Option<Action> = "selectAction" @ V1_1,
        show_border: bool = "showBorder" @ V1_5,
        style: Option<ContainerStyle> = "style",
        vertical_content_alignment: Option<VerticalAlignment> = "verticalContentAlignment" @ V1_1,
    }
}

impl Column {
    pub fn new(items: Vec<Element>) -> Self {
        Self {
            items,
            ..Default::default()
        }
    }
}

entity! {
    pub struct Fact as Record(RecordKind::Fact) {
        title: String = "title" [always],
        value: String = "value" [always],
        key: String = "key",
    }
}

impl Fact {
    pub fn new(title: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
            ..Default::default()
        }
    }
}

entity! {
    pub struct TableColumnDefinition as Record(RecordKind::TableColumnDefinition) {
        width: Option<ColumnWidth> = "width",
        horizontal_cell_content_alignment: Option<HorizontalAlignment> = "horizontalCellContentAlignment",
        vertical_cell_content_alignment: Option<VerticalAlignment> = "verticalCellContentAlignment",
        key: String = "key",
    }
}

entity! {
    pub struct TableRow as Record(RecordKind::TableRow) {
        #[flatten] common: ElementCommon,
        cells: Vec<TableCell> = "cells",
        horizontal_cell_content_alignment: Option<HorizontalAlignment> = "horizontalCellContentAlignment",
        vertical_cell_content_alignment: Option<VerticalAlignment> = "verticalCellContentAlignment",
        style: Option<ContainerStyle> = "style",
        rounded_corners: bool = "roundedCorners",
        show_border: bool = "showBorder",
    }
}

entity! {
    pub struct TableCell as Record(RecordKind::TableCell) {
        #[flatten] common: ElementCommon,
        items: Vec<Element> = "items" [always],
        background_image: Option<BackgroundImage> = "backgroundImage",
        bleed: bool = "bleed",
        layouts: Vec<Layout> = "layouts" @ V1_5,
        max_height: String = "maxHeight",
        min_height: String = "minHeight",
        select_action: Option<Action> = "selectAction",
        vertical_content_alignment: Option<VerticalAlignment> = "verticalContentAlignment",
        style: Option<ContainerStyle> = "style",
        rtl: Option<bool> = "rtl",
    }
}

impl TableCell {
    pub fn new(items: Vec<Element>) -> Self {
        Self {
            items,
            ..Default::default()
        }
    }
}

entity! {
    pub struct MediaSource as Record(RecordKind::MediaSource) {
        mime_type: String = "mimeType" [always],
        url: String = "url" [always],
    }
}

entity! {
    /// Subtitle track of a `Media` element
    pub struct CaptionSource as Record(RecordKind::CaptionSource) {
        mime_type: String = "mimeType" [always],
        url: String = "url" [always],
        label: String = "label" [always],
    }
}

entity! {
    /// Localizable string; `localizedValues` is keyed by locale ("fr-FR")
    pub struct StringResource as Record(RecordKind::StringResource) {
        default_value: String = "defaultValue" @ V1_5,
        localized_values: Requires = "localizedValues" @ V1_5,
        key: String = "key",
    }
}
