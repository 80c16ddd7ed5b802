//! A word-wrapping text box.
//!
//! [`TextBox`] is the reference [`Measurable`]: a string that reflows on
//! break opportunities and draws itself with an ASCII-art border. It behaves
//! like real content rather than a fixed rectangle, so tighter constraints
//! make it narrower and taller.

use flexkit_layout::{FlexNode, Measurable, MeasureMode, MeasureSpec, Size};
use tracing::trace;

use crate::canvas::StringCanvas;
use crate::wrap::{display_width, segments, wrap};

/// Text wrapped in a one-character border.
///
/// The minimum width fits the longest single segment plus the border; the
/// minimum height is the border alone. Under an `Unspecified` width the text
/// stays on one row.
#[derive(Clone)]
pub struct TextBox {
    text: String,
}

impl TextBox {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The narrowest this box can get: the longest segment plus the border.
    pub fn min_width(&self) -> f32 {
        let longest = segments(&self.text)
            .iter()
            .map(|segment| display_width(segment))
            .max()
            .unwrap_or(0);
        (longest + 2) as f32
    }

    /// The shortest this box can get: the border alone.
    pub fn min_height(&self) -> f32 {
        2.0
    }

    /// Build a flex node around a copy of this box, carrying its minimum
    /// sizes so the layout engine never squeezes the border shut.
    pub fn to_node(&self) -> FlexNode {
        let mut node = FlexNode::new(Box::new(self.clone()));
        node.min_width = self.min_width();
        node.min_height = self.min_height();
        node
    }

    fn rows(&self, max_width: i32) -> Vec<Vec<&str>> {
        wrap(&segments(&self.text), max_width)
    }

    /// Render this box into the given rectangle. Coordinates are rounded to
    /// whole cells; content that does not fit is clipped.
    pub fn draw(&self, canvas: &mut StringCanvas, left: f32, top: f32, right: f32, bottom: f32) {
        let left = left.round() as i32;
        let top = top.round() as i32;
        let right = right.round() as i32;
        let bottom = bottom.round() as i32;
        let rows = self.rows(right - left - 2);

        let mut y = top;
        if y < bottom {
            draw_horizontal_line(canvas, '┌', '┐', y, left, right);
            y += 1;
        }
        for row in &rows {
            if y < bottom {
                draw_text_row(canvas, row, y, left, right);
            }
            y += 1;
        }
        while y < bottom - 1 {
            draw_text_row(canvas, &[], y, left, right);
            y += 1;
        }
        if top < bottom {
            draw_horizontal_line(canvas, '└', '┘', bottom - 1, left, right);
        }
    }
}

impl Measurable for TextBox {
    fn measure(&mut self, width_spec: MeasureSpec, height_spec: MeasureSpec) -> Size {
        let width = width_spec.size;
        let height = height_spec.size;

        let rows = match width_spec.mode {
            MeasureMode::Exactly | MeasureMode::AtMost => self.rows(width.round() as i32 - 2),
            MeasureMode::Unspecified => vec![vec![self.text.as_str()]],
        };

        let measured_width = match width_spec.mode {
            MeasureMode::Exactly => width,
            MeasureMode::AtMost => {
                let longest_row = rows
                    .iter()
                    .map(|row| {
                        row.iter()
                            .map(|segment| display_width(segment) + 1)
                            .sum::<usize>()
                            .saturating_sub(1)
                    })
                    .max()
                    .unwrap_or(0);
                width.min((longest_row + 2) as f32)
            }
            MeasureMode::Unspecified => (display_width(&self.text) + 2) as f32,
        };

        let measured_height = match height_spec.mode {
            MeasureMode::Exactly => height,
            MeasureMode::AtMost => height.min((rows.len() + 2) as f32),
            MeasureMode::Unspecified => (rows.len() + 2) as f32,
        };

        trace!(
            text = %self.text,
            rows = rows.len(),
            measured_width,
            measured_height,
            "measured text box"
        );
        Size::new(measured_width, measured_height)
    }
}

fn draw_horizontal_line(
    canvas: &mut StringCanvas,
    left_corner: char,
    right_corner: char,
    y: i32,
    left: i32,
    right: i32,
) {
    if left < right {
        canvas.set(left, y, left_corner);
        canvas.set(right - 1, y, right_corner);
    }
    for x in (left + 1)..(right - 1) {
        canvas.set(x, y, '─');
    }
}

fn draw_text_row(canvas: &mut StringCanvas, row: &[&str], y: i32, left: i32, right: i32) {
    let mut x = left;
    if x < right {
        canvas.set(left, y, '|');
        x += 1;
    }
    for (index, segment) in row.iter().enumerate() {
        if x >= right {
            break;
        }
        if index > 0 {
            canvas.set(x, y, ' ');
            x += 1;
        }
        for ch in segment.chars() {
            if x < right {
                canvas.set(x, y, ch);
                x += 1;
            }
        }
    }
    while x < right - 1 {
        canvas.set(x, y, ' ');
        x += 1;
    }
    if left < right {
        canvas.set(right - 1, y, '│');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_sizes() {
        let text_box = TextBox::new("The Dark Knight");
        assert_eq!(text_box.min_width(), 8.0);
        assert_eq!(text_box.min_height(), 2.0);
        assert_eq!(TextBox::new("").min_width(), 2.0);
    }

    #[test]
    fn test_measure_unspecified_stays_on_one_row() {
        let mut text_box = TextBox::new("The Dark Knight");
        let size = text_box.measure(
            MeasureSpec::unspecified(0.0),
            MeasureSpec::unspecified(0.0),
        );
        assert_eq!(size, Size::new(17.0, 3.0));
    }

    #[test]
    fn test_measure_at_most_wraps_and_shrinks_to_fit() {
        let mut text_box = TextBox::new("The Dark Knight");
        // max row width 10: "The Dark" / "Knight".
        let size = text_box.measure(MeasureSpec::at_most(12.0), MeasureSpec::at_most(20.0));
        assert_eq!(size, Size::new(10.0, 4.0));
    }

    #[test]
    fn test_measure_exactly_is_binding() {
        let mut text_box = TextBox::new("The Dark Knight");
        let size = text_box.measure(MeasureSpec::exactly(9.0), MeasureSpec::exactly(7.0));
        assert_eq!(size, Size::new(9.0, 7.0));
    }

    #[test]
    fn test_to_node_carries_min_sizes() {
        let node = TextBox::new("The Dark Knight").to_node();
        assert_eq!(node.min_width, 8.0);
        assert_eq!(node.min_height, 2.0);
    }

    #[test]
    fn test_draw_bordered_box() {
        let mut canvas = StringCanvas::new(12, 5).unwrap();
        let text_box = TextBox::new("The Dark Knight");
        text_box.draw(&mut canvas, 0.0, 0.0, 10.0, 4.0);
        let expected = [
            "┌────────┐··",
            "|The Dark│··",
            "|Knight  │··",
            "└────────┘··",
            "············",
        ]
        .join("\n");
        assert_eq!(canvas.to_string(), expected);
    }

    #[test]
    fn test_draw_pads_short_content_with_blank_rows() {
        let mut canvas = StringCanvas::new(6, 5).unwrap();
        let text_box = TextBox::new("hi");
        text_box.draw(&mut canvas, 0.0, 0.0, 6.0, 5.0);
        let expected = [
            "┌────┐", //
            "|hi  │",
            "|    │",
            "|    │",
            "└────┘",
        ]
        .join("\n");
        assert_eq!(canvas.to_string(), expected);
    }
}
