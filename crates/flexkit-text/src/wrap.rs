//! Word segmentation and greedy line wrapping.
//!
//! Text is split into segments at Unicode line-break opportunities and
//! packed greedily into rows. Widths are counted in grapheme clusters, one
//! column per cluster.

use unicode_linebreak::linebreaks;
use unicode_segmentation::UnicodeSegmentation;

/// Visible width of a string, in grapheme clusters.
pub fn display_width(text: &str) -> usize {
    text.graphemes(true).count()
}

/// Split text into wrappable segments.
///
/// Segments end at Unicode line-break opportunities, with trailing
/// whitespace trimmed; for plain prose this yields the individual words.
/// The empty string yields one empty segment so downstream code always has
/// at least one row to work with.
pub fn segments(text: &str) -> Vec<&str> {
    let mut result = Vec::new();
    let mut start = 0;
    for (index, _) in linebreaks(text) {
        result.push(text[start..index].trim_end());
        start = index;
    }
    if result.is_empty() {
        result.push(text.trim_end());
    }
    result
}

/// Pack segments greedily into rows of at most `max_width` columns.
///
/// Rows are joined with single spaces when rendered, so a segment fits if
/// the row width plus a separator plus the segment width stays within
/// `max_width`. Every row gets at least one segment, even when that segment
/// alone overflows, which is why `max_width` may be negative.
pub fn wrap<'a>(segments: &[&'a str], max_width: i32) -> Vec<Vec<&'a str>> {
    let mut rows = Vec::new();
    let mut i = 0;
    while i < segments.len() {
        let mut row = Vec::new();
        let mut row_width = 0i32;
        while i < segments.len() {
            let segment = segments[i];
            let segment_width = display_width(segment) as i32;
            if row_width == 0 {
                row.push(segment);
                row_width = segment_width;
                i += 1;
            } else if row_width + 1 + segment_width <= max_width {
                row.push(segment);
                row_width += 1 + segment_width;
                i += 1;
            } else {
                break;
            }
        }
        rows.push(row);
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segments_split_on_spaces() {
        assert_eq!(segments("The Dark Knight"), vec!["The", "Dark", "Knight"]);
        assert_eq!(segments("single"), vec!["single"]);
        assert_eq!(segments(""), vec![""]);
    }

    #[test]
    fn test_segments_split_on_newlines() {
        assert_eq!(segments("one\ntwo three"), vec!["one", "two", "three"]);
    }

    #[test]
    fn test_display_width_counts_graphemes() {
        assert_eq!(display_width("café"), 4);
        assert_eq!(display_width("cafe\u{301}"), 4);
        assert_eq!(display_width(""), 0);
    }

    #[test]
    fn test_wrap_greedy() {
        let segments = vec!["The", "Dark", "Knight"];
        assert_eq!(
            wrap(&segments, 8),
            vec![vec!["The", "Dark"], vec!["Knight"]]
        );
        assert_eq!(
            wrap(&segments, 15),
            vec![vec!["The", "Dark", "Knight"]]
        );
    }

    #[test]
    fn test_wrap_every_row_gets_a_segment() {
        let segments = vec!["alpha", "beta"];
        assert_eq!(wrap(&segments, 1), vec![vec!["alpha"], vec!["beta"]]);
        assert_eq!(wrap(&segments, -2), vec![vec!["alpha"], vec!["beta"]]);
    }
}
