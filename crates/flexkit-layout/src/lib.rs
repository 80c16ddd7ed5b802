//! # FlexKit Layout
//!
//! A CSS-flexbox-like measure/layout engine for FlexKit.
//! Computes the position and size of rectangular nodes arranged by
//! direction, wrap, grow/shrink, and alignment rules.
//!
//! ## Design Goals
//!
//! 1. **Two-pass layout**: measure (line partition + size resolution) then layout (placement)
//! 2. **Measure specs**: parent-to-child constraints with Exactly/AtMost/Unspecified modes
//! 3. **Line wrapping**: multi-line containers with wrap-before and max-lines control
//! 4. **Flexible sizing**: grow/shrink distribution with exact remainder accounting
//! 5. **Cross-axis alignment**: align-items, align-self, align-content, baseline
//! 6. **Pluggable measurement**: leaf sizing behind a single `Measurable` trait
//!
//! The engine is synchronous and single-threaded: one `FlexContainer` owns its
//! nodes for the duration of a pass and recomputes everything from scratch on
//! every call. Nested containers are measured re-entrantly through their own
//! `Measurable` adapters.

pub mod flex;
pub mod measure;
pub mod node;
pub mod style;

pub use flex::{Axis, FlexContainer, FlexLine};
pub use measure::{Dimension, MeasureMode, MeasureSpec};
pub use node::{FlexNode, Measurable};
pub use style::{AlignContent, AlignItems, AlignSelf, FlexDirection, FlexWrap, JustifyContent};

use thiserror::Error;

/// Errors that can occur in layout.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("Invalid measure spec size: {0}")]
    InvalidMeasureSpec(f32),

    #[error("Invalid spacing: [{start}, {end}, {top}, {bottom}]")]
    InvalidSpacing {
        start: f32,
        end: f32,
        top: f32,
        bottom: f32,
    },

    #[error("Invalid node {index}: {reason}")]
    InvalidNode { index: usize, reason: String },
}

/// A two-dimensional size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Padding or margin applied to a node or container.
///
/// `start`/`end` run along the horizontal axis, `top`/`bottom` along the
/// vertical axis, independent of the container's flex direction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Spacing {
    pub start: f32,
    pub end: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Spacing {
    pub const ZERO: Spacing = Spacing {
        start: 0.0,
        end: 0.0,
        top: 0.0,
        bottom: 0.0,
    };

    /// Create a spacing, rejecting negative or non-finite components.
    pub fn new(start: f32, end: f32, top: f32, bottom: f32) -> Result<Self, LayoutError> {
        let valid = |v: f32| v.is_finite() && v >= 0.0;
        if !(valid(start) && valid(end) && valid(top) && valid(bottom)) {
            return Err(LayoutError::InvalidSpacing {
                start,
                end,
                top,
                bottom,
            });
        }
        Ok(Self {
            start,
            end,
            top,
            bottom,
        })
    }

    /// The same spacing on all four sides.
    pub fn uniform(value: f32) -> Result<Self, LayoutError> {
        Self::new(value, value, value, value)
    }

    pub fn horizontal(&self) -> f32 {
        self.start + self.end
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spacing_rejects_negative() {
        assert!(Spacing::new(0.0, 0.0, -1.0, 0.0).is_err());
        assert!(Spacing::new(f32::NAN, 0.0, 0.0, 0.0).is_err());
        assert!(Spacing::uniform(4.0).is_ok());
    }

    #[test]
    fn test_spacing_sums() {
        let spacing = Spacing::new(1.0, 2.0, 3.0, 4.0).unwrap();
        assert_eq!(spacing.horizontal(), 3.0);
        assert_eq!(spacing.vertical(), 7.0);
    }

    #[test]
    fn test_size_zero() {
        assert_eq!(Size::ZERO, Size::new(0.0, 0.0));
    }
}
