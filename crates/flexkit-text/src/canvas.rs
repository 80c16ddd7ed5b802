//! A fixed-size character grid for rendering layout results.

use std::fmt;

use crate::TextError;

/// A `width` x `height` grid of characters, initially filled with `·` so
/// untouched cells stand out in comparisons.
pub struct StringCanvas {
    width: usize,
    height: usize,
    cells: Vec<char>,
}

impl StringCanvas {
    pub fn new(width: usize, height: usize) -> Result<Self, TextError> {
        if width == 0 || height == 0 {
            return Err(TextError::InvalidCanvasSize { width, height });
        }
        Ok(Self {
            width,
            height,
            cells: vec!['·'; width * height],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Write one character. Writes outside the grid are clipped.
    pub fn set(&mut self, x: i32, y: i32, ch: char) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return;
        }
        self.cells[y * self.width + x] = ch;
    }
}

impl fmt::Display for StringCanvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            if y > 0 {
                f.write_str("\n")?;
            }
            for x in 0..self.width {
                write!(f, "{}", self.cells[y * self.width + x])?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_rejects_zero_dimensions() {
        assert!(StringCanvas::new(0, 4).is_err());
        assert!(StringCanvas::new(4, 0).is_err());
        assert!(StringCanvas::new(1, 1).is_ok());
    }

    #[test]
    fn test_canvas_renders_background_and_writes() {
        let mut canvas = StringCanvas::new(3, 2).unwrap();
        canvas.set(0, 0, 'a');
        canvas.set(2, 1, 'b');
        assert_eq!(canvas.to_string(), "a··\n··b");
    }

    #[test]
    fn test_canvas_clips_out_of_bounds_writes() {
        let mut canvas = StringCanvas::new(2, 2).unwrap();
        canvas.set(-1, 0, 'x');
        canvas.set(0, 5, 'x');
        canvas.set(5, 0, 'x');
        assert_eq!(canvas.to_string(), "··\n··");
    }
}
