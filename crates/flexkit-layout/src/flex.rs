//! The flexbox layout engine.
//!
//! [`FlexContainer`] computes layout in two passes:
//!
//! 1. **Measure** ([`FlexContainer::measure`]):
//!    a. Partition nodes into [`FlexLine`]s, measuring each node against
//!       constraints derived from the container's own constraints.
//!    b. Determine the main size of each line, expanding items with
//!       `flex_grow` or shrinking items with `flex_shrink`. Items that hit a
//!       min/max bound are frozen and the remainder is redistributed until
//!       the line stops moving.
//!    c. Determine the cross size of each line, distributing free space
//!       between lines according to `align_content`.
//!    d. Stretch items whose resolved alignment is `Stretch` to fill their
//!       line's cross size.
//! 2. **Layout** ([`FlexContainer::layout`]): walk the lines computed by the
//!    measure pass and assign each node its final rectangle, applying
//!    `justify_content` along the main axis and `align_items`/`align_self`
//!    along the cross axis.
//!
//! Nothing is cached between passes: every `measure` recomputes all lines
//! from the current node list and properties.

use tracing::{debug, trace};

use crate::measure::{Dimension, MeasureMode, MeasureSpec};
use crate::node::FlexNode;
use crate::style::{
    AlignContent, AlignItems, AlignSelf, FlexDirection, FlexWrap, JustifyContent,
};
use crate::{LayoutError, Size, Spacing};

/// The two axes of a flex container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// The perpendicular axis.
    pub fn cross(self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }

    fn main_padding(self, padding: Spacing) -> f32 {
        match self {
            Axis::Horizontal => padding.horizontal(),
            Axis::Vertical => padding.vertical(),
        }
    }

    fn cross_padding(self, padding: Spacing) -> f32 {
        self.cross().main_padding(padding)
    }

    fn main_margin(self, node: &FlexNode) -> f32 {
        match self {
            Axis::Horizontal => node.margin.horizontal(),
            Axis::Vertical => node.margin.vertical(),
        }
    }

    fn cross_margin(self, node: &FlexNode) -> f32 {
        self.cross().main_margin(node)
    }

    fn main_dimension(self, node: &FlexNode) -> Dimension {
        match self {
            Axis::Horizontal => node.width,
            Axis::Vertical => node.height,
        }
    }

    fn cross_dimension(self, node: &FlexNode) -> Dimension {
        self.cross().main_dimension(node)
    }

    fn main_measured(self, node: &FlexNode) -> f32 {
        match self {
            Axis::Horizontal => node.measured_width,
            Axis::Vertical => node.measured_height,
        }
    }

    fn cross_measured(self, node: &FlexNode) -> f32 {
        self.cross().main_measured(node)
    }
}

/// One row (or column) of nodes sharing the same run along the main axis.
#[derive(Debug, Clone, Default)]
pub struct FlexLine {
    /// Index into the ordered node list of the first item in this line.
    pub first_index: usize,
    /// Index into the ordered node list of the last item in this line.
    pub last_index: usize,
    /// Number of items in this line, including invisible ones.
    pub item_count: usize,
    /// Number of invisible items in this line.
    pub invisible_item_count: usize,
    /// Extent of this line along the main axis, including container padding.
    pub main_size: f32,
    /// Extent of this line along the cross axis.
    pub cross_size: f32,
    /// Sum of the cross sizes of all lines placed before this one.
    pub sum_cross_size_before: f32,
    /// Sum of the `flex_grow` factors of unfrozen items in this line.
    pub total_flex_grow: f32,
    /// Sum of the `flex_shrink` factors of unfrozen items in this line.
    pub total_flex_shrink: f32,
    /// True if any item in this line has a non-zero `flex_grow`.
    pub any_items_have_flex_grow: bool,
    /// True if any item in this line has a non-zero `flex_shrink`.
    pub any_items_have_flex_shrink: bool,
    /// Largest distance from the cross start to an item baseline, used for
    /// baseline alignment in horizontal containers.
    pub max_baseline: f32,
    /// Ordered-list indices of items with `align_self: Stretch`.
    pub(crate) stretch_indices: Vec<usize>,
}

impl FlexLine {
    /// Number of visible items in this line.
    pub fn item_count_visible(&self) -> usize {
        self.item_count - self.invisible_item_count
    }
}

/// A flex container: a node list plus the properties governing their layout.
///
/// Build one, fill [`FlexContainer::nodes`], call
/// [`measure`](FlexContainer::measure) with the available space, then
/// [`layout`](FlexContainer::layout) with the final frame. Each node's
/// rectangle is left in its `left`/`top`/`right`/`bottom` fields.
pub struct FlexContainer {
    /// The items to lay out, in insertion order.
    pub nodes: Vec<FlexNode>,
    pub flex_direction: FlexDirection,
    pub flex_wrap: FlexWrap,
    pub justify_content: JustifyContent,
    pub align_items: AlignItems,
    pub align_content: AlignContent,
    /// Inner padding between the container edges and its lines.
    pub padding: Spacing,
    /// Outer margin, applied as an inset of the frame given to `layout`.
    pub margin: Spacing,
    /// Cap on the number of lines a wrapping container may produce.
    pub max_lines: Option<usize>,
    /// Round computed sizes and positions to whole units.
    pub round_to_int: bool,
    /// Treat a bounded width constraint as exact.
    pub fill_width: bool,
    /// Treat a bounded height constraint as exact.
    pub fill_height: bool,

    flex_lines: Vec<FlexLine>,
    layout_order: Vec<usize>,
    frozen: Vec<bool>,
}

impl FlexContainer {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            flex_direction: FlexDirection::Row,
            flex_wrap: FlexWrap::NoWrap,
            justify_content: JustifyContent::FlexStart,
            align_items: AlignItems::FlexStart,
            align_content: AlignContent::FlexStart,
            padding: Spacing::ZERO,
            margin: Spacing::ZERO,
            max_lines: None,
            round_to_int: true,
            fill_width: false,
            fill_height: false,
            flex_lines: Vec::new(),
            layout_order: Vec::new(),
            frozen: Vec::new(),
        }
    }

    /// The lines computed by the last measure pass.
    pub fn flex_lines(&self) -> &[FlexLine] {
        &self.flex_lines
    }

    /// Partition the nodes into flex lines without running the sizing
    /// passes. The result is available through [`FlexContainer::flex_lines`].
    pub fn calculate_flex_lines(
        &mut self,
        width_spec: MeasureSpec,
        height_spec: MeasureSpec,
    ) -> Result<(), LayoutError> {
        self.validate()?;
        self.rebuild_layout_order();
        self.flex_lines = self.build_flex_lines(width_spec, height_spec);
        Ok(())
    }

    /// Run the full measure pass and return the container's resolved size.
    pub fn measure(
        &mut self,
        width_spec: MeasureSpec,
        height_spec: MeasureSpec,
    ) -> Result<Size, LayoutError> {
        self.validate()?;
        self.rebuild_layout_order();

        let width_spec = if self.fill_width && width_spec.mode != MeasureMode::Unspecified {
            MeasureSpec::exactly(width_spec.size)
        } else {
            width_spec
        };
        let height_spec = if self.fill_height && height_spec.mode != MeasureMode::Unspecified {
            MeasureSpec::exactly(height_spec.size)
        } else {
            height_spec
        };

        let mut lines = self.build_flex_lines(width_spec, height_spec);
        self.determine_main_size(&mut lines, width_spec, height_spec);
        if self.flex_direction.is_horizontal() && self.align_items == AlignItems::Baseline {
            self.apply_baseline_cross_sizes(&mut lines);
        }
        self.determine_cross_size(&mut lines, width_spec, height_spec);
        self.stretch_children(&lines);
        self.flex_lines = lines;

        let size = self.resolved_size(width_spec, height_spec);
        debug!(
            width = size.width,
            height = size.height,
            lines = self.flex_lines.len(),
            "measured flex container"
        );
        Ok(size)
    }

    /// Assign final rectangles to all nodes within the given frame, using
    /// the state computed by the last [`measure`](FlexContainer::measure).
    pub fn layout(&mut self, left: f32, top: f32, right: f32, bottom: f32) {
        let left = left + self.margin.start;
        let top = top + self.margin.top;
        let right = right - self.margin.end;
        let bottom = bottom - self.margin.bottom;
        let lines = std::mem::take(&mut self.flex_lines);
        match self.flex_direction {
            FlexDirection::Row => {
                self.layout_horizontal(&lines, false, left, top, right, bottom);
            }
            FlexDirection::RowReverse => {
                self.layout_horizontal(&lines, true, left, top, right, bottom);
            }
            FlexDirection::Column => {
                let is_rtl = self.flex_wrap == FlexWrap::WrapReverse;
                self.layout_vertical(&lines, is_rtl, false, left, top, right, bottom);
            }
            FlexDirection::ColumnReverse => {
                let is_rtl = self.flex_wrap != FlexWrap::WrapReverse;
                self.layout_vertical(&lines, is_rtl, true, left, top, right, bottom);
            }
        }
        self.flex_lines = lines;
    }

    fn axis(&self) -> Axis {
        if self.flex_direction.is_horizontal() {
            Axis::Horizontal
        } else {
            Axis::Vertical
        }
    }

    fn round_if_enabled(&self, value: f32) -> f32 {
        if self.round_to_int {
            value.round()
        } else {
            value
        }
    }

    /// Reject invalid node and container properties before mutating anything.
    fn validate(&self) -> Result<(), LayoutError> {
        let spacing_ok = |s: &Spacing| {
            [s.start, s.end, s.top, s.bottom]
                .iter()
                .all(|v| v.is_finite() && *v >= 0.0)
        };
        for spacing in [&self.padding, &self.margin] {
            if !spacing_ok(spacing) {
                return Err(LayoutError::InvalidSpacing {
                    start: spacing.start,
                    end: spacing.end,
                    top: spacing.top,
                    bottom: spacing.bottom,
                });
            }
        }
        for (index, node) in self.nodes.iter().enumerate() {
            let invalid = |reason: &str| LayoutError::InvalidNode {
                index,
                reason: reason.to_owned(),
            };
            if !node.flex_grow.is_finite() || node.flex_grow < 0.0 {
                return Err(invalid("flex_grow must be finite and non-negative"));
            }
            if !node.flex_shrink.is_finite() || node.flex_shrink < 0.0 {
                return Err(invalid("flex_shrink must be finite and non-negative"));
            }
            if let Some(percent) = node.flex_basis_percent {
                if !percent.is_finite() || !(0.0..=1.0).contains(&percent) {
                    return Err(invalid("flex_basis_percent must be within 0..=1"));
                }
            }
            if node.min_width < 0.0 || node.min_height < 0.0 {
                return Err(invalid("minimum sizes must be non-negative"));
            }
            if node.max_width < node.min_width || node.max_height < node.min_height {
                return Err(invalid("maximum sizes must not be below minimum sizes"));
            }
            if let Dimension::Points(points) = node.width {
                if !points.is_finite() || points < 0.0 {
                    return Err(invalid("width must be finite and non-negative"));
                }
            }
            if let Dimension::Points(points) = node.height {
                if !points.is_finite() || points < 0.0 {
                    return Err(invalid("height must be finite and non-negative"));
                }
            }
            if !spacing_ok(&node.margin) {
                return Err(invalid("margins must be finite and non-negative"));
            }
        }
        Ok(())
    }

    /// Sort nodes by `order`, ascending; ties keep insertion order.
    fn rebuild_layout_order(&mut self) {
        self.layout_order.clear();
        self.layout_order.extend(0..self.nodes.len());
        let nodes = &self.nodes;
        self.layout_order.sort_by_key(|&i| nodes[i].order);
    }

    fn reordered(&self, layout_index: usize) -> usize {
        self.layout_order[layout_index]
    }

    /// Partition nodes into lines, measuring each node along the way.
    fn build_flex_lines(&mut self, width_spec: MeasureSpec, height_spec: MeasureSpec) -> Vec<FlexLine> {
        let axis = self.axis();
        let (main_spec, cross_spec) = match axis {
            Axis::Horizontal => (width_spec, height_spec),
            Axis::Vertical => (height_spec, width_spec),
        };
        let main_padding = axis.main_padding(self.padding);
        let cross_padding = axis.cross_padding(self.padding);

        let mut lines: Vec<FlexLine> = Vec::new();
        let mut line = FlexLine {
            main_size: main_padding,
            ..FlexLine::default()
        };
        let mut sum_cross_size = 0.0f32;
        let mut largest_in_cross = f32::MIN;
        let child_count = self.nodes.len();

        for i in 0..child_count {
            let node_index = self.reordered(i);
            if !self.nodes[node_index].visible {
                line.invisible_item_count += 1;
                line.item_count += 1;
                if i == child_count - 1 && line.item_count_visible() > 0 {
                    add_flex_line(&mut lines, &mut line, i, &mut sum_cross_size);
                }
                continue;
            }

            let mut child_main_dimension = axis.main_dimension(&self.nodes[node_index]);
            if let Some(percent) = self.nodes[node_index].flex_basis_percent {
                if main_spec.mode == MeasureMode::Exactly {
                    child_main_dimension =
                        Dimension::Points(self.round_if_enabled(main_spec.size * percent));
                }
            }

            let main_margin = axis.main_margin(&self.nodes[node_index]);
            let cross_margin = axis.cross_margin(&self.nodes[node_index]);
            let child_main_spec =
                main_spec.for_child(main_padding + main_margin, child_main_dimension);
            let child_cross_spec = cross_spec.for_child(
                cross_padding + cross_margin + sum_cross_size,
                axis.cross_dimension(&self.nodes[node_index]),
            );
            match axis {
                Axis::Horizontal => {
                    self.nodes[node_index].apply_measure(child_main_spec, child_cross_spec);
                }
                Axis::Vertical => {
                    self.nodes[node_index].apply_measure(child_cross_spec, child_main_spec);
                }
            }
            // The first measurement may violate the node's min/max bounds,
            // e.g. a WrapContent width below min_width.
            self.measure_within_bounds(node_index);

            let child_main = axis.main_measured(&self.nodes[node_index]) + main_margin;
            let wrap_before = self.nodes[node_index].wrap_before;
            if self.is_wrap_required(
                main_spec.mode,
                main_spec.size,
                line.main_size,
                child_main,
                wrap_before,
                lines.len(),
            ) {
                if line.item_count_visible() > 0 {
                    let last = i.saturating_sub(1);
                    add_flex_line(&mut lines, &mut line, last, &mut sum_cross_size);
                }
                // The cross size consumed so far just changed, so a node
                // filling the cross axis has to be measured again.
                match axis {
                    Axis::Horizontal => {
                        if self.nodes[node_index].height == Dimension::MatchParent {
                            let cross_margin = self.nodes[node_index].margin.vertical();
                            let respec = cross_spec.for_child(
                                cross_padding + cross_margin + sum_cross_size,
                                Dimension::MatchParent,
                            );
                            self.nodes[node_index].apply_measure(child_main_spec, respec);
                            self.measure_within_bounds(node_index);
                        }
                    }
                    Axis::Vertical => {
                        if self.nodes[node_index].width == Dimension::MatchParent {
                            let cross_margin = self.nodes[node_index].margin.horizontal();
                            let respec = cross_spec.for_child(
                                cross_padding + cross_margin + sum_cross_size,
                                Dimension::MatchParent,
                            );
                            self.nodes[node_index].apply_measure(respec, child_main_spec);
                            self.measure_within_bounds(node_index);
                        }
                    }
                }
                line = FlexLine {
                    first_index: i,
                    item_count: 1,
                    main_size: main_padding,
                    ..FlexLine::default()
                };
                largest_in_cross = f32::MIN;
            } else {
                line.item_count += 1;
            }

            let node = &self.nodes[node_index];
            if node.align_self == AlignSelf::Stretch {
                line.stretch_indices.push(i);
            }
            line.any_items_have_flex_grow |= node.flex_grow != 0.0;
            line.any_items_have_flex_shrink |= node.flex_shrink != 0.0;
            line.main_size += axis.main_measured(node) + axis.main_margin(node);
            line.total_flex_grow += node.flex_grow;
            line.total_flex_shrink += node.flex_shrink;
            largest_in_cross =
                largest_in_cross.max(axis.cross_measured(node) + axis.cross_margin(node));
            // The largest item so far decides the line's cross size; the
            // align_content pass may still expand it.
            line.cross_size = line.cross_size.max(largest_in_cross);
            if axis == Axis::Horizontal {
                if self.flex_wrap != FlexWrap::WrapReverse {
                    line.max_baseline = line
                        .max_baseline
                        .max(node.baseline_or_bottom() + node.margin.top);
                } else {
                    // Wrapping in reverse stacks lines from the cross end, so
                    // measure the baseline from the bottom edge.
                    line.max_baseline = line
                        .max_baseline
                        .max(node.measured_height - node.baseline_or_bottom() + node.margin.bottom);
                }
            }
            if i == child_count - 1 && line.item_count_visible() > 0 {
                add_flex_line(&mut lines, &mut line, i, &mut sum_cross_size);
            }
        }

        trace!(lines = lines.len(), "partitioned nodes into flex lines");
        lines
    }

    fn is_wrap_required(
        &self,
        mode: MeasureMode,
        max_size: f32,
        current_length: f32,
        child_length: f32,
        wrap_before: bool,
        lines_so_far: usize,
    ) -> bool {
        if self.flex_wrap == FlexWrap::NoWrap {
            return false;
        }
        if wrap_before {
            return true;
        }
        if mode == MeasureMode::Unspecified {
            return false;
        }
        if let Some(max_lines) = self.max_lines {
            // The line currently being filled is not part of the count yet.
            if max_lines <= lines_so_far + 1 {
                return false;
            }
        }
        max_size < current_length + child_length
    }

    /// Re-measure a node whose measured size violates its min/max bounds.
    fn measure_within_bounds(&mut self, node_index: usize) {
        let node = &mut self.nodes[node_index];
        let mut needs_measure = false;
        let mut width = node.measured_width;
        let mut height = node.measured_height;
        if width < node.min_width {
            needs_measure = true;
            width = node.min_width;
        } else if width > node.max_width {
            needs_measure = true;
            width = node.max_width;
        }
        if height < node.min_height {
            needs_measure = true;
            height = node.min_height;
        } else if height > node.max_height {
            needs_measure = true;
            height = node.max_height;
        }
        if needs_measure {
            node.apply_measure(MeasureSpec::exactly(width), MeasureSpec::exactly(height));
        }
    }

    /// Fix each line's main size, expanding or shrinking flexible items.
    fn determine_main_size(
        &mut self,
        lines: &mut [FlexLine],
        width_spec: MeasureSpec,
        height_spec: MeasureSpec,
    ) {
        let main_size = match self.axis() {
            Axis::Horizontal => {
                if width_spec.mode == MeasureMode::Exactly {
                    width_spec.size
                } else {
                    largest_main_size(lines, self.padding.horizontal()).min(width_spec.size)
                }
            }
            Axis::Vertical => {
                if height_spec.mode == MeasureMode::Exactly {
                    height_spec.size
                } else {
                    largest_main_size(lines, self.padding.vertical())
                }
            }
        };
        let padding_along_main = self.axis().main_padding(self.padding);
        self.frozen.clear();
        self.frozen.resize(self.nodes.len(), false);
        for line in lines.iter_mut() {
            if line.main_size < main_size && line.any_items_have_flex_grow {
                self.expand_flex_items(
                    line,
                    main_size,
                    padding_along_main,
                    width_spec,
                    height_spec,
                    false,
                );
            } else if line.main_size > main_size && line.any_items_have_flex_shrink {
                self.shrink_flex_items(
                    line,
                    main_size,
                    padding_along_main,
                    width_spec,
                    height_spec,
                    false,
                );
            }
        }
    }

    /// Distribute positive free space to items with `flex_grow`.
    ///
    /// Items that would exceed their maximum size are frozen at it and the
    /// line is re-expanded so the leftover space reaches the others.
    fn expand_flex_items(
        &mut self,
        line: &mut FlexLine,
        max_main_size: f32,
        padding_along_main: f32,
        width_spec: MeasureSpec,
        height_spec: MeasureSpec,
        called_recursively: bool,
    ) {
        if line.total_flex_grow <= 0.0 || max_main_size < line.main_size {
            return;
        }
        let axis = self.axis();
        let size_before = line.main_size;
        let unit_space = (max_main_size - line.main_size) / line.total_flex_grow;
        trace!(unit_space, main_size = line.main_size, "expanding flex line");
        line.main_size = padding_along_main;
        // Cross sizes may change when flexible items are re-measured, so the
        // line's cross size is recomputed from scratch.
        let mut largest_cross = 0.0f32;
        if !called_recursively {
            line.cross_size = f32::MIN;
        }
        let mut needs_reexpand = false;
        let mut accumulated_error = 0.0f32;
        for i in 0..line.item_count {
            let node_index = self.reordered(line.first_index + i);
            if !self.nodes[node_index].visible {
                continue;
            }
            let flex_grow = self.nodes[node_index].flex_grow;
            if !self.frozen[node_index] && flex_grow > 0.0 {
                let measured_main = axis.main_measured(&self.nodes[node_index]);
                let mut raw = measured_main + unit_space * flex_grow;
                if i == line.item_count - 1 {
                    raw += accumulated_error;
                    accumulated_error = 0.0;
                }
                let mut new_main = self.round_if_enabled(raw);
                let max_main = match axis {
                    Axis::Horizontal => self.nodes[node_index].max_width,
                    Axis::Vertical => self.nodes[node_index].max_height,
                };
                if new_main > max_main {
                    // Frozen at its maximum; the leftover space is handed to
                    // the remaining items in another round.
                    needs_reexpand = true;
                    new_main = max_main;
                    self.frozen[node_index] = true;
                    line.total_flex_grow -= flex_grow;
                } else {
                    accumulated_error += raw - new_main;
                    if accumulated_error > 1.0 {
                        new_main += 1.0;
                        accumulated_error -= 1.0;
                    } else if accumulated_error < -1.0 {
                        new_main -= 1.0;
                        accumulated_error += 1.0;
                    }
                }
                let main_exact = MeasureSpec::exactly(new_main);
                match axis {
                    Axis::Horizontal => {
                        let cross = self.child_height_spec_clamped(
                            height_spec,
                            node_index,
                            line.sum_cross_size_before,
                        );
                        self.nodes[node_index].apply_measure(main_exact, cross);
                    }
                    Axis::Vertical => {
                        let cross = self.child_width_spec_clamped(
                            width_spec,
                            node_index,
                            line.sum_cross_size_before,
                        );
                        self.nodes[node_index].apply_measure(cross, main_exact);
                    }
                }
            }
            let node = &self.nodes[node_index];
            largest_cross = largest_cross.max(axis.cross_measured(node) + axis.cross_margin(node));
            line.main_size += axis.main_measured(node) + axis.main_margin(node);
            line.cross_size = line.cross_size.max(largest_cross);
        }
        if needs_reexpand && size_before != line.main_size {
            self.expand_flex_items(
                line,
                max_main_size,
                padding_along_main,
                width_spec,
                height_spec,
                true,
            );
        }
    }

    /// Distribute overflow to items with `flex_shrink`.
    ///
    /// Items that would fall below their minimum size are frozen at it and
    /// the line is re-shrunk so the overflow reaches the others.
    fn shrink_flex_items(
        &mut self,
        line: &mut FlexLine,
        max_main_size: f32,
        padding_along_main: f32,
        width_spec: MeasureSpec,
        height_spec: MeasureSpec,
        called_recursively: bool,
    ) {
        if line.total_flex_shrink <= 0.0 || max_main_size > line.main_size {
            return;
        }
        let axis = self.axis();
        let size_before = line.main_size;
        let unit_shrink = (line.main_size - max_main_size) / line.total_flex_shrink;
        trace!(unit_shrink, main_size = line.main_size, "shrinking flex line");
        line.main_size = padding_along_main;
        let mut largest_cross = 0.0f32;
        if !called_recursively {
            line.cross_size = f32::MIN;
        }
        let mut needs_reshrink = false;
        let mut accumulated_error = 0.0f32;
        for i in 0..line.item_count {
            let node_index = self.reordered(line.first_index + i);
            if !self.nodes[node_index].visible {
                continue;
            }
            let flex_shrink = self.nodes[node_index].flex_shrink;
            if !self.frozen[node_index] && flex_shrink > 0.0 {
                let measured_main = axis.main_measured(&self.nodes[node_index]);
                let mut raw = measured_main - unit_shrink * flex_shrink;
                if i == line.item_count - 1 {
                    raw += accumulated_error;
                    accumulated_error = 0.0;
                }
                let mut new_main = self.round_if_enabled(raw);
                let min_main = match axis {
                    Axis::Horizontal => self.nodes[node_index].min_width,
                    Axis::Vertical => self.nodes[node_index].min_height,
                };
                if new_main < min_main {
                    // Frozen at its minimum; the leftover overflow is handed
                    // to the remaining items in another round.
                    needs_reshrink = true;
                    new_main = min_main;
                    self.frozen[node_index] = true;
                    line.total_flex_shrink -= flex_shrink;
                } else {
                    accumulated_error += raw - new_main;
                    if accumulated_error > 1.0 {
                        new_main += 1.0;
                        accumulated_error -= 1.0;
                    } else if accumulated_error < -1.0 {
                        new_main -= 1.0;
                        accumulated_error += 1.0;
                    }
                }
                let main_exact = MeasureSpec::exactly(new_main);
                match axis {
                    Axis::Horizontal => {
                        let cross = self.child_height_spec_clamped(
                            height_spec,
                            node_index,
                            line.sum_cross_size_before,
                        );
                        self.nodes[node_index].apply_measure(main_exact, cross);
                    }
                    Axis::Vertical => {
                        let cross = self.child_width_spec_clamped(
                            width_spec,
                            node_index,
                            line.sum_cross_size_before,
                        );
                        self.nodes[node_index].apply_measure(cross, main_exact);
                    }
                }
            }
            let node = &self.nodes[node_index];
            largest_cross = largest_cross.max(axis.cross_measured(node) + axis.cross_margin(node));
            line.main_size += axis.main_measured(node) + axis.main_margin(node);
            line.cross_size = line.cross_size.max(largest_cross);
        }
        if needs_reshrink && size_before != line.main_size {
            self.shrink_flex_items(
                line,
                max_main_size,
                padding_along_main,
                width_spec,
                height_spec,
                true,
            );
        }
    }

    fn child_width_spec_clamped(
        &self,
        width_spec: MeasureSpec,
        node_index: usize,
        sum_cross_before: f32,
    ) -> MeasureSpec {
        let node = &self.nodes[node_index];
        let spec = width_spec.for_child(
            self.padding.horizontal() + node.margin.horizontal() + sum_cross_before,
            node.width,
        );
        MeasureSpec {
            size: spec.size.clamp(node.min_width, node.max_width),
            mode: spec.mode,
        }
    }

    fn child_height_spec_clamped(
        &self,
        height_spec: MeasureSpec,
        node_index: usize,
        sum_cross_before: f32,
    ) -> MeasureSpec {
        let node = &self.nodes[node_index];
        let spec = height_spec.for_child(
            self.padding.vertical() + node.margin.vertical() + sum_cross_before,
            node.height,
        );
        MeasureSpec {
            size: spec.size.clamp(node.min_height, node.max_height),
            mode: spec.mode,
        }
    }

    /// Grow each line's cross size to cover baseline shifts.
    fn apply_baseline_cross_sizes(&mut self, lines: &mut [FlexLine]) {
        for line in lines.iter_mut() {
            let mut largest = f32::MIN;
            for i in 0..line.item_count {
                let node_index = self.reordered(line.first_index + i);
                let node = &self.nodes[node_index];
                if !node.visible {
                    continue;
                }
                let height = if self.flex_wrap != FlexWrap::WrapReverse {
                    let margin_top =
                        (line.max_baseline - node.baseline_or_bottom()).max(node.margin.top);
                    node.measured_height + margin_top + node.margin.bottom
                } else {
                    let margin_bottom = (line.max_baseline - node.measured_height
                        + node.baseline_or_bottom())
                    .max(node.margin.bottom);
                    node.measured_height + node.margin.top + margin_bottom
                };
                largest = largest.max(height);
            }
            line.cross_size = largest;
        }
    }

    /// Fix each line's cross size. Under an exact cross constraint, free
    /// space is distributed between lines according to `align_content`,
    /// inserting zero-item spacer lines where the content needs to move.
    fn determine_cross_size(
        &mut self,
        lines: &mut Vec<FlexLine>,
        width_spec: MeasureSpec,
        height_spec: MeasureSpec,
    ) {
        let (mode, size) = match self.axis() {
            Axis::Horizontal => (height_spec.mode, height_spec.size),
            Axis::Vertical => (width_spec.mode, width_spec.size),
        };
        if mode != MeasureMode::Exactly {
            return;
        }
        let padding_along_cross = self.axis().cross_padding(self.padding);
        let total_cross_size = sum_of_cross_size(lines) + padding_along_cross;
        if lines.len() == 1 {
            // align_content only applies from two lines up.
            lines[0].cross_size = size - padding_along_cross;
            return;
        }
        if lines.len() < 2 {
            return;
        }
        match self.align_content {
            AlignContent::Stretch => {
                if total_cross_size >= size {
                    return;
                }
                let free_space_unit = (size - total_cross_size) / lines.len() as f32;
                let mut accumulated_error = 0.0f32;
                let last = lines.len() - 1;
                for (i, line) in lines.iter_mut().enumerate() {
                    let mut raw = line.cross_size + free_space_unit;
                    if i == last {
                        raw += accumulated_error;
                        accumulated_error = 0.0;
                    }
                    let mut new_cross = self.round_if_enabled(raw);
                    accumulated_error += raw - new_cross;
                    if accumulated_error > 1.0 {
                        new_cross += 1.0;
                        accumulated_error -= 1.0;
                    } else if accumulated_error < -1.0 {
                        new_cross -= 1.0;
                        accumulated_error += 1.0;
                    }
                    line.cross_size = new_cross;
                }
            }
            AlignContent::SpaceAround => {
                if total_cross_size >= size {
                    // No room for gaps; fall back to centering the overflow.
                    *lines = center_lines(std::mem::take(lines), size, total_cross_size, self);
                    return;
                }
                let space =
                    halve((size - total_cross_size) / lines.len() as f32, self.round_to_int);
                let mut new_lines = Vec::with_capacity(lines.len() * 3);
                for line in lines.drain(..) {
                    new_lines.push(spacer_line(space));
                    new_lines.push(line);
                    new_lines.push(spacer_line(space));
                }
                *lines = new_lines;
            }
            AlignContent::SpaceBetween => {
                if total_cross_size >= size {
                    return;
                }
                let space_between = (size - total_cross_size) / (lines.len() - 1) as f32;
                let mut accumulated_error = 0.0f32;
                let count = lines.len();
                let mut new_lines = Vec::with_capacity(count * 2 - 1);
                for (i, line) in lines.drain(..).enumerate() {
                    new_lines.push(line);
                    if i != count - 1 {
                        let mut cross = if i == count - 2 {
                            // Last gap absorbs the running remainder.
                            let rounded = self.round_if_enabled(space_between + accumulated_error);
                            accumulated_error = 0.0;
                            rounded
                        } else {
                            self.round_if_enabled(space_between)
                        };
                        accumulated_error += space_between - cross;
                        if accumulated_error > 1.0 {
                            cross += 1.0;
                            accumulated_error -= 1.0;
                        } else if accumulated_error < -1.0 {
                            cross -= 1.0;
                            accumulated_error += 1.0;
                        }
                        new_lines.push(spacer_line(cross));
                    }
                }
                *lines = new_lines;
            }
            AlignContent::SpaceEvenly => {
                if total_cross_size >= size {
                    // No room for gaps; fall back to centering the overflow.
                    *lines = center_lines(std::mem::take(lines), size, total_cross_size, self);
                    return;
                }
                let space = (size - total_cross_size) / (lines.len() + 1) as f32;
                let mut accumulated_error = 0.0f32;
                let count = lines.len();
                let mut new_lines = Vec::with_capacity(count * 2 + 1);
                for (i, line) in lines.drain(..).enumerate() {
                    let mut cross = self.round_if_enabled(space);
                    accumulated_error += space - cross;
                    if accumulated_error > 1.0 {
                        cross += 1.0;
                        accumulated_error -= 1.0;
                    } else if accumulated_error < -1.0 {
                        cross -= 1.0;
                        accumulated_error += 1.0;
                    }
                    new_lines.push(spacer_line(cross));
                    new_lines.push(line);
                    if i == count - 1 {
                        // Final gap absorbs the running remainder.
                        new_lines
                            .push(spacer_line(self.round_if_enabled(space + accumulated_error)));
                    }
                }
                *lines = new_lines;
            }
            AlignContent::Center => {
                *lines = center_lines(std::mem::take(lines), size, total_cross_size, self);
            }
            AlignContent::FlexEnd => {
                let space_top = size - total_cross_size;
                lines.insert(0, spacer_line(space_top));
            }
            AlignContent::FlexStart => {}
        }
    }

    /// Re-measure items whose resolved alignment is `Stretch` so they fill
    /// their line's cross size.
    fn stretch_children(&mut self, lines: &[FlexLine]) {
        if self.align_items == AlignItems::Stretch {
            for line in lines {
                for i in 0..line.item_count {
                    let node_index = self.reordered(line.first_index + i);
                    let node = &self.nodes[node_index];
                    if !node.visible {
                        continue;
                    }
                    if node.align_self != AlignSelf::Auto && node.align_self != AlignSelf::Stretch {
                        continue;
                    }
                    self.stretch_node(node_index, line.cross_size);
                }
            }
        } else {
            for line in lines {
                for &layout_index in &line.stretch_indices {
                    let node_index = self.reordered(layout_index);
                    self.stretch_node(node_index, line.cross_size);
                }
            }
        }
    }

    fn stretch_node(&mut self, node_index: usize, cross_size: f32) {
        let axis = self.axis();
        let node = &mut self.nodes[node_index];
        match axis {
            Axis::Horizontal => {
                let new_height = (cross_size - node.margin.vertical())
                    .clamp(node.min_height, node.max_height);
                trace!(node_index, new_height, "stretching node vertically");
                let width = node.measured_width;
                node.apply_measure(MeasureSpec::exactly(width), MeasureSpec::exactly(new_height));
            }
            Axis::Vertical => {
                let new_width = (cross_size - node.margin.horizontal())
                    .clamp(node.min_width, node.max_width);
                trace!(node_index, new_width, "stretching node horizontally");
                let height = node.measured_height;
                node.apply_measure(MeasureSpec::exactly(new_width), MeasureSpec::exactly(height));
            }
        }
    }

    /// Resolve the container's own size against its constraints.
    fn resolved_size(&self, width_spec: MeasureSpec, height_spec: MeasureSpec) -> Size {
        let (calculated_width, calculated_height) = match self.axis() {
            Axis::Horizontal => (
                largest_main_size(&self.flex_lines, self.padding.horizontal()),
                sum_of_cross_size(&self.flex_lines) + self.padding.vertical(),
            ),
            Axis::Vertical => (
                sum_of_cross_size(&self.flex_lines) + self.padding.horizontal(),
                largest_main_size(&self.flex_lines, self.padding.vertical()),
            ),
        };
        let width = match width_spec.mode {
            MeasureMode::Exactly => width_spec.size,
            MeasureMode::AtMost => width_spec.resolve(width_spec.size.min(calculated_width)),
            MeasureMode::Unspecified => calculated_width,
        };
        let height = match height_spec.mode {
            MeasureMode::Exactly => height_spec.size,
            MeasureMode::AtMost => height_spec.resolve(height_spec.size.min(calculated_height)),
            MeasureMode::Unspecified => calculated_height,
        };
        Size::new(width, height)
    }

    fn layout_horizontal(
        &mut self,
        lines: &[FlexLine],
        is_rtl: bool,
        left: f32,
        top: f32,
        right: f32,
        bottom: f32,
    ) {
        let padding = self.padding;
        let width = right - left;
        let height = bottom - top;
        // childBottom tracks WrapReverse placement from the cross end.
        let mut child_bottom = height - padding.bottom;
        let mut child_top = padding.top;
        for line in lines {
            let mut child_left: f32;
            let mut child_right: f32;
            let mut space_between_item = 0.0f32;
            let visible_count = line.item_count_visible();
            match self.justify_content {
                JustifyContent::FlexStart => {
                    child_left = padding.start;
                    child_right = width - padding.end;
                }
                JustifyContent::FlexEnd => {
                    child_left = width - line.main_size + padding.end;
                    child_right = line.main_size - padding.start;
                }
                JustifyContent::Center => {
                    child_left = padding.start + (width - line.main_size) / 2.0;
                    child_right = width - padding.end - (width - line.main_size) / 2.0;
                }
                JustifyContent::SpaceAround => {
                    if visible_count != 0 {
                        space_between_item = (width - line.main_size) / visible_count as f32;
                    }
                    child_left = padding.start + space_between_item / 2.0;
                    child_right = width - padding.end - space_between_item / 2.0;
                }
                JustifyContent::SpaceBetween => {
                    child_left = padding.start;
                    let denominator = if visible_count > 1 {
                        (visible_count - 1) as f32
                    } else {
                        1.0
                    };
                    space_between_item = (width - line.main_size) / denominator;
                    child_right = width - padding.end;
                }
                JustifyContent::SpaceEvenly => {
                    if visible_count != 0 {
                        space_between_item =
                            (width - line.main_size) / (visible_count + 1) as f32;
                    }
                    child_left = padding.start + space_between_item;
                    child_right = width - padding.end - space_between_item;
                }
            }
            space_between_item = space_between_item.max(0.0);
            for i in 0..line.item_count {
                let node_index = self.reordered(line.first_index + i);
                let (visible, margin, measured_width, measured_height) = {
                    let node = &self.nodes[node_index];
                    (
                        node.visible,
                        node.margin,
                        node.measured_width,
                        node.measured_height,
                    )
                };
                if !visible {
                    continue;
                }
                child_left += margin.start;
                child_right -= margin.end;
                let (item_left, item_top) = if self.flex_wrap == FlexWrap::WrapReverse {
                    if is_rtl {
                        (
                            self.round_if_enabled(child_right) - measured_width,
                            child_bottom - measured_height,
                        )
                    } else {
                        (
                            self.round_if_enabled(child_left),
                            child_bottom - measured_height,
                        )
                    }
                } else if is_rtl {
                    (
                        self.round_if_enabled(child_right) - measured_width,
                        child_top,
                    )
                } else {
                    (self.round_if_enabled(child_left), child_top)
                };
                self.place_in_line_horizontal(
                    node_index,
                    line,
                    left + item_left,
                    top + item_top,
                    left + item_left + measured_width,
                    top + item_top + measured_height,
                );
                child_left += measured_width + space_between_item + margin.end;
                child_right -= measured_width + space_between_item + margin.start;
            }
            child_top += line.cross_size;
            child_bottom -= line.cross_size;
        }
    }

    /// Apply the cross-axis alignment for one node in a horizontal line.
    fn place_in_line_horizontal(
        &mut self,
        node_index: usize,
        line: &FlexLine,
        left: f32,
        top: f32,
        right: f32,
        bottom: f32,
    ) {
        let wrap_reverse = self.flex_wrap == FlexWrap::WrapReverse;
        let align = self.nodes[node_index].align_self.resolve(self.align_items);
        let cross_size = line.cross_size;
        let round_to_int = self.round_to_int;
        let node = &mut self.nodes[node_index];
        match align {
            AlignItems::FlexStart | AlignItems::Stretch => {
                if !wrap_reverse {
                    node.place(left, top + node.margin.top, right, bottom + node.margin.top);
                } else {
                    node.place(
                        left,
                        top - node.margin.bottom,
                        right,
                        bottom - node.margin.bottom,
                    );
                }
            }
            AlignItems::Baseline => {
                if !wrap_reverse {
                    let margin_top =
                        (line.max_baseline - node.baseline_or_bottom()).max(node.margin.top);
                    node.place(left, top + margin_top, right, bottom + margin_top);
                } else {
                    let margin_bottom = (line.max_baseline - node.measured_height
                        + node.baseline_or_bottom())
                    .max(node.margin.bottom);
                    node.place(left, top - margin_bottom, right, bottom - margin_bottom);
                }
            }
            AlignItems::FlexEnd => {
                if !wrap_reverse {
                    node.place(
                        left,
                        top + cross_size - node.measured_height - node.margin.bottom,
                        right,
                        top + cross_size - node.margin.bottom,
                    );
                } else {
                    // With reversed wrapping the cross end flips to the top.
                    node.place(
                        left,
                        top - cross_size + node.measured_height + node.margin.top,
                        right,
                        bottom - cross_size + node.measured_height + node.margin.top,
                    );
                }
            }
            AlignItems::Center => {
                let offset = halve(
                    cross_size - node.measured_height + node.margin.top - node.margin.bottom,
                    round_to_int,
                );
                if !wrap_reverse {
                    node.place(left, top + offset, right, top + offset + node.measured_height);
                } else {
                    node.place(left, top - offset, right, top - offset + node.measured_height);
                }
            }
        }
    }

    fn layout_vertical(
        &mut self,
        lines: &[FlexLine],
        is_rtl: bool,
        from_bottom_to_top: bool,
        left: f32,
        top: f32,
        right: f32,
        bottom: f32,
    ) {
        let padding = self.padding;
        let width = right - left;
        let height = bottom - top;
        let mut child_left = padding.start;
        // childRight tracks WrapReverse placement from the cross end.
        let mut child_right = width - padding.end;
        for line in lines {
            let mut child_top: f32;
            let mut child_bottom: f32;
            let mut space_between_item = 0.0f32;
            let visible_count = line.item_count_visible();
            match self.justify_content {
                JustifyContent::FlexStart => {
                    child_top = padding.top;
                    child_bottom = height - padding.bottom;
                }
                JustifyContent::FlexEnd => {
                    child_top = height - line.main_size + padding.bottom;
                    child_bottom = line.main_size - padding.top;
                }
                JustifyContent::Center => {
                    child_top = padding.top + (height - line.main_size) / 2.0;
                    child_bottom = height - padding.bottom - (height - line.main_size) / 2.0;
                }
                JustifyContent::SpaceAround => {
                    if visible_count != 0 {
                        space_between_item = (height - line.main_size) / visible_count as f32;
                    }
                    child_top = padding.top + space_between_item / 2.0;
                    child_bottom = height - padding.bottom - space_between_item / 2.0;
                }
                JustifyContent::SpaceBetween => {
                    child_top = padding.top;
                    let denominator = if visible_count > 1 {
                        (visible_count - 1) as f32
                    } else {
                        1.0
                    };
                    space_between_item = (height - line.main_size) / denominator;
                    child_bottom = height - padding.bottom;
                }
                JustifyContent::SpaceEvenly => {
                    if visible_count != 0 {
                        space_between_item =
                            (height - line.main_size) / (visible_count + 1) as f32;
                    }
                    child_top = padding.top + space_between_item;
                    child_bottom = height - padding.bottom - space_between_item;
                }
            }
            space_between_item = space_between_item.max(0.0);
            for i in 0..line.item_count {
                let node_index = self.reordered(line.first_index + i);
                let (visible, margin, measured_width, measured_height) = {
                    let node = &self.nodes[node_index];
                    (
                        node.visible,
                        node.margin,
                        node.measured_width,
                        node.measured_height,
                    )
                };
                if !visible {
                    continue;
                }
                child_top += margin.top;
                child_bottom -= margin.bottom;
                let (item_left, item_top) = if is_rtl {
                    if from_bottom_to_top {
                        (
                            child_right - measured_width,
                            self.round_if_enabled(child_bottom) - measured_height,
                        )
                    } else {
                        (child_right - measured_width, self.round_if_enabled(child_top))
                    }
                } else if from_bottom_to_top {
                    (
                        child_left,
                        self.round_if_enabled(child_bottom) - measured_height,
                    )
                } else {
                    (child_left, self.round_if_enabled(child_top))
                };
                self.place_in_line_vertical(
                    node_index,
                    line,
                    is_rtl,
                    left + item_left,
                    top + item_top,
                    left + item_left + measured_width,
                    top + item_top + measured_height,
                );
                child_top += measured_height + space_between_item + margin.bottom;
                child_bottom -= measured_height + space_between_item + margin.top;
            }
            child_left += line.cross_size;
            child_right -= line.cross_size;
        }
    }

    /// Apply the cross-axis alignment for one node in a vertical line.
    fn place_in_line_vertical(
        &mut self,
        node_index: usize,
        line: &FlexLine,
        is_rtl: bool,
        left: f32,
        top: f32,
        right: f32,
        bottom: f32,
    ) {
        let align = self.nodes[node_index].align_self.resolve(self.align_items);
        let cross_size = line.cross_size;
        let round_to_int = self.round_to_int;
        let node = &mut self.nodes[node_index];
        match align {
            // Baselines are only meaningful on the horizontal axis.
            AlignItems::FlexStart | AlignItems::Stretch | AlignItems::Baseline => {
                if !is_rtl {
                    node.place(
                        left + node.margin.start,
                        top,
                        right + node.margin.start,
                        bottom,
                    );
                } else {
                    node.place(left - node.margin.end, top, right - node.margin.end, bottom);
                }
            }
            AlignItems::FlexEnd => {
                if !is_rtl {
                    let shift = cross_size - node.measured_width - node.margin.end;
                    node.place(left + shift, top, right + shift, bottom);
                } else {
                    // With reversed wrapping the cross end flips to the left.
                    let shift = cross_size - node.measured_width - node.margin.start;
                    node.place(left - shift, top, right - shift, bottom);
                }
            }
            AlignItems::Center => {
                let offset = halve(
                    cross_size - node.measured_width + node.margin.start - node.margin.end,
                    round_to_int,
                );
                if !is_rtl {
                    node.place(left + offset, top, right + offset, bottom);
                } else {
                    node.place(left - offset, top, right - offset, bottom);
                }
            }
        }
    }
}

impl Default for FlexContainer {
    fn default() -> Self {
        Self::new()
    }
}

fn add_flex_line(
    lines: &mut Vec<FlexLine>,
    line: &mut FlexLine,
    last_index: usize,
    sum_cross_size: &mut f32,
) {
    let mut finished = std::mem::take(line);
    finished.sum_cross_size_before = *sum_cross_size;
    finished.last_index = last_index;
    *sum_cross_size += finished.cross_size;
    trace!(
        first_index = finished.first_index,
        last_index = finished.last_index,
        main_size = finished.main_size,
        cross_size = finished.cross_size,
        "closed flex line"
    );
    lines.push(finished);
}

// Halving an offset mirrors the truncation of whole-unit arithmetic so that
// centering never lands on a half unit.
fn halve(value: f32, round_to_int: bool) -> f32 {
    if round_to_int {
        (value / 2.0).trunc()
    } else {
        value / 2.0
    }
}

fn spacer_line(cross_size: f32) -> FlexLine {
    FlexLine {
        cross_size,
        ..FlexLine::default()
    }
}

/// Surround the lines with two equal spacers so the content sits centered.
fn center_lines(
    lines: Vec<FlexLine>,
    size: f32,
    total_cross_size: f32,
    container: &FlexContainer,
) -> Vec<FlexLine> {
    let space = halve(size - total_cross_size, container.round_to_int);
    let mut new_lines = Vec::with_capacity(lines.len() + 2);
    new_lines.push(spacer_line(space));
    new_lines.extend(lines);
    new_lines.push(spacer_line(space));
    new_lines
}

fn largest_main_size(lines: &[FlexLine], padding_along_main: f32) -> f32 {
    lines
        .iter()
        .map(|line| line.main_size)
        .fold(padding_along_main, f32::max)
}

fn sum_of_cross_size(lines: &[FlexLine]) -> f32 {
    lines.iter().map(|line| line.cross_size).sum()
}
