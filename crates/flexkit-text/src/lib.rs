//! # FlexKit Text
//!
//! Text content for FlexKit layout: a word-wrapping [`TextBox`] that sizes
//! itself under measure constraints and renders itself as an ASCII-art box
//! onto a [`StringCanvas`].
//!
//! ## Design Goals
//!
//! 1. **Real content**: text reflows under constraints, unlike a fixed box,
//!    so it exercises the full measure protocol
//! 2. **Unicode-aware**: break opportunities and widths follow the Unicode
//!    line breaking and grapheme segmentation rules
//! 3. **Inspectable output**: layouts render to a character grid that can be
//!    compared as a plain string

pub mod canvas;
pub mod text_box;
pub mod wrap;

pub use canvas::StringCanvas;
pub use text_box::TextBox;

use thiserror::Error;

/// Errors that can occur when rendering text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TextError {
    #[error("Invalid canvas size: {width}x{height}")]
    InvalidCanvasSize { width: usize, height: usize },
}
