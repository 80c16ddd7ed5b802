//! Flex items and the measurement seam.
//!
//! A [`FlexNode`] is one rectangular participant in a flex container: its
//! style inputs (grow/shrink factors, margins, requested and min/max sizes)
//! plus the measured size and final rectangle the engine writes back. The
//! node's content sizes itself through the [`Measurable`] trait, which keeps
//! the engine decoupled from what a node actually is (text, an image, a
//! nested container).

use crate::measure::{Dimension, MeasureSpec};
use crate::style::AlignSelf;
use crate::{Size, Spacing};

/// Content that can size itself under a pair of constraints.
///
/// `measure` receives a width and a height [`MeasureSpec`] and returns the
/// content's chosen size. Implementations must honor `Exactly` constraints
/// and stay within `AtMost` limits; the engine does not second-guess the
/// returned size. Measurement may be called several times per pass with
/// progressively tighter constraints, so implementations should be
/// repeatable and side-effect free apart from their own bookkeeping.
pub trait Measurable {
    fn measure(&mut self, width_spec: MeasureSpec, height_spec: MeasureSpec) -> Size;
}

/// A single item laid out by a [`FlexContainer`](crate::FlexContainer).
pub struct FlexNode {
    /// The content that sizes this node.
    pub measurable: Box<dyn Measurable>,

    /// Invisible nodes are skipped entirely and take up no space.
    pub visible: bool,
    /// Relative placement order; lower orders are laid out first, ties keep
    /// insertion order.
    pub order: i32,
    /// Share of positive free space this node receives. Zero means fixed.
    pub flex_grow: f32,
    /// Share of overflow this node gives up. Zero means it never shrinks.
    pub flex_shrink: f32,
    /// Initial main size as a fraction of the container's main size, applied
    /// only when the container's main constraint is `Exactly`.
    pub flex_basis_percent: Option<f32>,
    /// Cross-axis alignment override for this node.
    pub align_self: AlignSelf,
    /// Force a line break before this node in wrapping containers.
    pub wrap_before: bool,
    /// Distance from the top of the node to its text baseline, when it has
    /// one. Nodes without a baseline align on their bottom edge.
    pub baseline: Option<f32>,
    /// Outer margins.
    pub margin: Spacing,

    /// Requested width.
    pub width: Dimension,
    /// Requested height.
    pub height: Dimension,
    pub min_width: f32,
    pub min_height: f32,
    pub max_width: f32,
    pub max_height: f32,

    /// Measured width, valid after the container's measure pass.
    pub measured_width: f32,
    /// Measured height, valid after the container's measure pass.
    pub measured_height: f32,
    /// Final left edge, valid after the container's layout pass.
    pub left: f32,
    /// Final top edge, valid after the container's layout pass.
    pub top: f32,
    /// Final right edge, valid after the container's layout pass.
    pub right: f32,
    /// Final bottom edge, valid after the container's layout pass.
    pub bottom: f32,
}

impl FlexNode {
    pub fn new(measurable: Box<dyn Measurable>) -> Self {
        Self {
            measurable,
            visible: true,
            order: 0,
            flex_grow: 0.0,
            flex_shrink: 1.0,
            flex_basis_percent: None,
            align_self: AlignSelf::Auto,
            wrap_before: false,
            baseline: None,
            margin: Spacing::ZERO,
            width: Dimension::WrapContent,
            height: Dimension::WrapContent,
            min_width: 0.0,
            min_height: 0.0,
            max_width: f32::INFINITY,
            max_height: f32::INFINITY,
            measured_width: 0.0,
            measured_height: 0.0,
            left: 0.0,
            top: 0.0,
            right: 0.0,
            bottom: 0.0,
        }
    }

    /// Run the content measurement and record the result.
    pub(crate) fn apply_measure(&mut self, width_spec: MeasureSpec, height_spec: MeasureSpec) {
        let size = self.measurable.measure(width_spec, height_spec);
        self.measured_width = size.width;
        self.measured_height = size.height;
    }

    /// The baseline used for baseline alignment: the declared baseline, or
    /// the bottom of the measured box when none is set.
    pub(crate) fn baseline_or_bottom(&self) -> f32 {
        self.baseline.unwrap_or(self.measured_height)
    }

    /// Record the final rectangle.
    pub(crate) fn place(&mut self, left: f32, top: f32, right: f32, bottom: f32) {
        self.left = left;
        self.top = top;
        self.right = right;
        self.bottom = bottom;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedBox {
        size: Size,
    }

    impl Measurable for FixedBox {
        fn measure(&mut self, width_spec: MeasureSpec, height_spec: MeasureSpec) -> Size {
            Size::new(
                width_spec.resolve(self.size.width),
                height_spec.resolve(self.size.height),
            )
        }
    }

    #[test]
    fn test_node_defaults() {
        let node = FlexNode::new(Box::new(FixedBox {
            size: Size::new(10.0, 10.0),
        }));
        assert!(node.visible);
        assert_eq!(node.order, 0);
        assert_eq!(node.flex_grow, 0.0);
        assert_eq!(node.flex_shrink, 1.0);
        assert_eq!(node.flex_basis_percent, None);
        assert_eq!(node.align_self, AlignSelf::Auto);
        assert_eq!(node.width, Dimension::WrapContent);
        assert_eq!(node.max_width, f32::INFINITY);
    }

    #[test]
    fn test_apply_measure_records_size() {
        let mut node = FlexNode::new(Box::new(FixedBox {
            size: Size::new(10.0, 20.0),
        }));
        node.apply_measure(MeasureSpec::at_most(50.0), MeasureSpec::exactly(15.0));
        assert_eq!(node.measured_width, 10.0);
        assert_eq!(node.measured_height, 15.0);
    }

    #[test]
    fn test_baseline_falls_back_to_bottom() {
        let mut node = FlexNode::new(Box::new(FixedBox {
            size: Size::new(10.0, 20.0),
        }));
        node.measured_height = 20.0;
        assert_eq!(node.baseline_or_bottom(), 20.0);
        node.baseline = Some(14.0);
        assert_eq!(node.baseline_or_bottom(), 14.0);
    }
}
