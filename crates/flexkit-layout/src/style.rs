//! Container and node style properties.
//!
//! Plain keyword enums mirroring the CSS flexbox vocabulary. Defaults match
//! the CSS initial values (`row`, `nowrap`, `flex-start`, `auto`).

/// The direction children are placed along the main axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlexDirection {
    /// Left to right.
    #[default]
    Row,
    /// Right to left.
    RowReverse,
    /// Top to bottom.
    Column,
    /// Bottom to top.
    ColumnReverse,
}

impl FlexDirection {
    /// Whether the main axis runs horizontally.
    pub fn is_horizontal(self) -> bool {
        matches!(self, FlexDirection::Row | FlexDirection::RowReverse)
    }

    /// Whether children are placed against the main-axis direction.
    pub fn is_reverse(self) -> bool {
        matches!(self, FlexDirection::RowReverse | FlexDirection::ColumnReverse)
    }
}

/// Whether the container is single-line or wraps onto multiple lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlexWrap {
    /// Everything on one line, even if it overflows.
    #[default]
    NoWrap,
    /// Wrap onto additional lines along the cross axis.
    Wrap,
    /// Wrap, with lines stacked in the reverse cross-axis direction.
    WrapReverse,
}

/// Distribution of free space along the main axis of each line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JustifyContent {
    #[default]
    FlexStart,
    FlexEnd,
    Center,
    /// Equal gaps between items, none at the edges.
    SpaceBetween,
    /// Equal gaps around items; edge gaps are half an inner gap.
    SpaceAround,
    /// Equal gaps between items and at the edges.
    SpaceEvenly,
}

/// Default cross-axis alignment of items within their line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlignItems {
    #[default]
    FlexStart,
    FlexEnd,
    Center,
    /// Align first baselines (single-line horizontal containers).
    Baseline,
    /// Fill the line's cross size.
    Stretch,
}

/// Per-node override of the container's [`AlignItems`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlignSelf {
    /// Defer to the container's `align_items`.
    #[default]
    Auto,
    FlexStart,
    FlexEnd,
    Center,
    Baseline,
    Stretch,
}

impl AlignSelf {
    /// Resolve against the container's `align_items`.
    pub fn resolve(self, align_items: AlignItems) -> AlignItems {
        match self {
            AlignSelf::Auto => align_items,
            AlignSelf::FlexStart => AlignItems::FlexStart,
            AlignSelf::FlexEnd => AlignItems::FlexEnd,
            AlignSelf::Center => AlignItems::Center,
            AlignSelf::Baseline => AlignItems::Baseline,
            AlignSelf::Stretch => AlignItems::Stretch,
        }
    }
}

/// Distribution of lines along the cross axis of a multi-line container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlignContent {
    #[default]
    FlexStart,
    FlexEnd,
    Center,
    SpaceBetween,
    SpaceAround,
    /// Equal gaps between lines and at the edges.
    SpaceEvenly,
    /// Grow lines to fill the container's cross size.
    Stretch,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_axes() {
        assert!(FlexDirection::Row.is_horizontal());
        assert!(FlexDirection::RowReverse.is_horizontal());
        assert!(!FlexDirection::Column.is_horizontal());
        assert!(FlexDirection::ColumnReverse.is_reverse());
        assert!(!FlexDirection::Row.is_reverse());
    }

    #[test]
    fn test_align_self_resolution() {
        assert_eq!(
            AlignSelf::Auto.resolve(AlignItems::Center),
            AlignItems::Center
        );
        assert_eq!(
            AlignSelf::Stretch.resolve(AlignItems::FlexStart),
            AlignItems::Stretch
        );
    }
}
