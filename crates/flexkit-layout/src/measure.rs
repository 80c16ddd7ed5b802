//! Measurement constraints passed from a parent to its children.
//!
//! A [`MeasureSpec`] tells a child how much room it has and how binding that
//! room is:
//!
//! 1. `Exactly` - the child must be exactly this size
//! 2. `AtMost` - the child may pick any size up to this limit
//! 3. `Unspecified` - the child may pick any size it wants
//!
//! [`MeasureSpec::for_child`] derives a child constraint from the parent's
//! own constraint, the space already consumed (padding, margins, earlier
//! lines), and the child's requested [`Dimension`].

use crate::LayoutError;

/// How binding a measure constraint is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MeasureMode {
    /// The child may be whatever size it wants.
    #[default]
    Unspecified,
    /// The child must be exactly the given size.
    Exactly,
    /// The child may be at most the given size.
    AtMost,
}

/// A size a node can request along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Dimension {
    /// A fixed, non-negative size.
    Points(f32),
    /// Fill the space the parent makes available.
    MatchParent,
    /// Size to the content.
    #[default]
    WrapContent,
}

/// A size constraint along one axis: a size and a [`MeasureMode`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MeasureSpec {
    pub size: f32,
    pub mode: MeasureMode,
}

impl MeasureSpec {
    /// Create a spec, rejecting negative or non-finite sizes.
    pub fn new(size: f32, mode: MeasureMode) -> Result<Self, LayoutError> {
        if !size.is_finite() || size < 0.0 {
            return Err(LayoutError::InvalidMeasureSpec(size));
        }
        Ok(Self { size, mode })
    }

    /// An `Exactly` spec. Sizes are clamped to zero.
    pub fn exactly(size: f32) -> Self {
        Self {
            size: size.max(0.0),
            mode: MeasureMode::Exactly,
        }
    }

    /// An `AtMost` spec. Sizes are clamped to zero.
    pub fn at_most(size: f32) -> Self {
        Self {
            size: size.max(0.0),
            mode: MeasureMode::AtMost,
        }
    }

    /// An `Unspecified` spec carrying a hint size.
    pub fn unspecified(size: f32) -> Self {
        Self {
            size: size.max(0.0),
            mode: MeasureMode::Unspecified,
        }
    }

    /// Derive the constraint for a child from this parent constraint.
    ///
    /// `used` is the space already consumed along this axis (padding,
    /// margins, preceding lines); `child_dimension` is what the child asked
    /// for. A `Points` request always wins; `MatchParent` and `WrapContent`
    /// tighten or loosen depending on the parent's own mode.
    pub fn for_child(&self, used: f32, child_dimension: Dimension) -> MeasureSpec {
        let available = (self.size - used).max(0.0);
        match self.mode {
            MeasureMode::Exactly => match child_dimension {
                Dimension::Points(points) => MeasureSpec::exactly(points),
                Dimension::MatchParent => MeasureSpec::exactly(available),
                Dimension::WrapContent => MeasureSpec::at_most(available),
            },
            MeasureMode::AtMost => match child_dimension {
                Dimension::Points(points) => MeasureSpec::exactly(points),
                Dimension::MatchParent => MeasureSpec::at_most(available),
                Dimension::WrapContent => MeasureSpec::at_most(available),
            },
            MeasureMode::Unspecified => match child_dimension {
                Dimension::Points(points) => MeasureSpec::exactly(points),
                Dimension::MatchParent => MeasureSpec::unspecified(available),
                Dimension::WrapContent => MeasureSpec::unspecified(available),
            },
        }
    }

    /// Reconcile a measured size with this constraint.
    ///
    /// `Exactly` forces the spec size, `AtMost` caps the measured size, and
    /// `Unspecified` passes it through.
    pub fn resolve(&self, size: f32) -> f32 {
        match self.mode {
            MeasureMode::AtMost => size.min(self.size),
            MeasureMode::Exactly => self.size,
            MeasureMode::Unspecified => size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_rejects_invalid_sizes() {
        assert!(MeasureSpec::new(-1.0, MeasureMode::Exactly).is_err());
        assert!(MeasureSpec::new(f32::INFINITY, MeasureMode::AtMost).is_err());
        assert!(MeasureSpec::new(0.0, MeasureMode::Unspecified).is_ok());
    }

    #[test]
    fn test_for_child_exact_parent() {
        let parent = MeasureSpec::exactly(100.0);
        assert_eq!(
            parent.for_child(10.0, Dimension::Points(30.0)),
            MeasureSpec::exactly(30.0)
        );
        assert_eq!(
            parent.for_child(10.0, Dimension::MatchParent),
            MeasureSpec::exactly(90.0)
        );
        assert_eq!(
            parent.for_child(10.0, Dimension::WrapContent),
            MeasureSpec::at_most(90.0)
        );
    }

    #[test]
    fn test_for_child_at_most_parent() {
        let parent = MeasureSpec::at_most(100.0);
        assert_eq!(
            parent.for_child(0.0, Dimension::Points(30.0)),
            MeasureSpec::exactly(30.0)
        );
        assert_eq!(
            parent.for_child(20.0, Dimension::MatchParent),
            MeasureSpec::at_most(80.0)
        );
        assert_eq!(
            parent.for_child(20.0, Dimension::WrapContent),
            MeasureSpec::at_most(80.0)
        );
    }

    #[test]
    fn test_for_child_unspecified_parent() {
        let parent = MeasureSpec::unspecified(100.0);
        assert_eq!(
            parent.for_child(0.0, Dimension::Points(30.0)),
            MeasureSpec::exactly(30.0)
        );
        assert_eq!(
            parent.for_child(0.0, Dimension::WrapContent),
            MeasureSpec::unspecified(100.0)
        );
    }

    #[test]
    fn test_for_child_clamps_consumed_space() {
        // Used space larger than the parent size must not go negative.
        let parent = MeasureSpec::exactly(50.0);
        assert_eq!(
            parent.for_child(80.0, Dimension::MatchParent),
            MeasureSpec::exactly(0.0)
        );
    }

    #[test]
    fn test_resolve() {
        assert_eq!(MeasureSpec::exactly(100.0).resolve(40.0), 100.0);
        assert_eq!(MeasureSpec::at_most(100.0).resolve(40.0), 40.0);
        assert_eq!(MeasureSpec::at_most(100.0).resolve(140.0), 100.0);
        assert_eq!(MeasureSpec::unspecified(0.0).resolve(40.0), 40.0);
    }
}
