//! Container layouts

use crate::enums::{HorizontalAlignment, ItemFit, Spacing, TargetWidth, VerticalAlignment};
use crate::shapes::GridColumnWidth;
use crate::wire::{category, entity};

category! {
    /// How a container arranges its items
    pub enum Layout / LayoutKind as Layout {
        Stack(StackLayout) = "Layout.Stack",
        Flow(FlowLayout) = "Layout.Flow",
        AreaGrid(AreaGridLayout) = "Layout.AreaGrid",
    }
}

entity! {
    /// Items stacked vertically; the default layout
    pub struct StackLayout as Layout(LayoutKind::Stack) {
        key: String = "key",
        target_width: Option<TargetWidth> = "targetWidth" @ V1_5,
    }
}

entity! {
    /// Items wrapped into rows
    pub struct FlowLayout as Layout(LayoutKind::Flow) {
        column_spacing: Option<Spacing> = "columnSpacing" @ V1_5,
        horizontal_items_alignment: Option<HorizontalAlignment> = "horizontalItemsAlignment",
        item_fit: Option<ItemFit> = "itemFit" @ V1_5,
        // itemWidth excludes min/maxItemWidth
        item_width: String = "itemWidth" @ V1_5,
        max_item_width: String = "maxItemWidth" @ V1_5,
        min_item_width: String = "minItemWidth" @ V1_5,
        row_spacing: Option<Spacing> = "rowSpacing" @ V1_5,
        vertical_items_alignment: Option<VerticalAlignment> = "verticalItemsAlignment" @ V1_5,
        key: String = "key",
        target_width: Option<TargetWidth> = "targetWidth",
    }
}

entity! {
    /// Items placed into named grid areas
    pub struct AreaGridLayout as Layout(LayoutKind::AreaGrid) {
        areas: Vec<GridArea> = "areas" @ V1_5,
        columns: Vec<GridColumnWidth> = "columns" @ V1_5,
        column_spacing: Option<Spacing> = "columnSpacing" @ V1_5,
        row_spacing: Option<Spacing> = "rowSpacing" @ V1_5,
        key: String = "key",
        target_width: Option<TargetWidth> = "targetWidth",
    }
}

entity! {
    /// Named cell range of an area grid; rows and columns start at 1
    pub struct GridArea {
        column: u32 = "column" @ V1_5,
        column_span: u32 = "columnSpan" @ V1_5,
        name: String = "name" @ V1_5,
        row: u32 = "row" @ V1_5,
        row_span: u32 = "rowSpan" @ V1_5,
        key: String = "key",
    }
}

impl GridArea {
    pub fn new(name: impl Into<String>, row: u32, column: u32) -> Self {
        Self {
            name: name.into(),
            row,
            column,
            ..Default::default()
        }
    }
}
