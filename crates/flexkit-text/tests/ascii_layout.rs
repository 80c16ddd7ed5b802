//! End-to-end layout tests rendered onto a character grid.
//!
//! Each test lays out the same four movie titles, then draws every box at
//! its final rectangle and compares the whole canvas as a string.

use flexkit_layout::{
    AlignItems, FlexContainer, FlexDirection, JustifyContent, MeasureSpec,
};
use flexkit_text::{StringCanvas, TextBox};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn movies() -> Vec<TextBox> {
    [
        "The Shawshank Redemption",
        "The Godfather",
        "The Dark Knight",
        "The Godfather Part II",
    ]
    .into_iter()
    .map(TextBox::new)
    .collect()
}

fn render(container: &mut FlexContainer, boxes: &[TextBox], width: usize, height: usize) -> String {
    let mut canvas = StringCanvas::new(width, height).unwrap();
    container
        .measure(
            MeasureSpec::exactly(width as f32),
            MeasureSpec::exactly(height as f32),
        )
        .unwrap();
    container.layout(0.0, 0.0, width as f32, height as f32);
    for (text_box, node) in boxes.iter().zip(&container.nodes) {
        text_box.draw(&mut canvas, node.left, node.top, node.right, node.bottom);
    }
    canvas.to_string()
}

#[test]
fn test_column() {
    init_tracing();
    let boxes = movies();
    let mut container = FlexContainer::new();
    container.flex_direction = FlexDirection::Column;
    container.nodes = boxes.iter().map(TextBox::to_node).collect();

    let expected = [
        "┌──────────┐··",
        "|The       │··",
        "|Shawshank │··",
        "|Redemption│··",
        "└──────────┘··",
        "┌─────────┐···",
        "|The      │···",
        "|Godfather│···",
        "└─────────┘···",
        "┌────────┐····",
        "|The Dark│····",
        "|Knight  │····",
        "└────────┘····",
        "┌─────────┐···",
        "|The      │···",
        "|Godfather│···",
        "|Part II  │···",
        "└─────────┘···",
        "··············",
        "··············",
    ]
    .join("\n");
    assert_eq!(render(&mut container, &boxes, 14, 20), expected);
}

#[test]
fn test_column_main_axis_centered() {
    init_tracing();
    let boxes = movies();
    let mut container = FlexContainer::new();
    container.flex_direction = FlexDirection::Column;
    container.justify_content = JustifyContent::Center;
    container.nodes = boxes.iter().map(TextBox::to_node).collect();

    let expected = [
        "····················",
        "····················",
        "····················",
        "····················",
        "┌─────────────┐·····",
        "|The Shawshank│·····",
        "|Redemption   │·····",
        "└─────────────┘·····",
        "┌─────────────┐·····",
        "|The Godfather│·····",
        "└─────────────┘·····",
        "┌───────────────┐···",
        "|The Dark Knight│···",
        "└───────────────┘···",
        "┌──────────────────┐",
        "|The Godfather Part│",
        "|II                │",
        "└──────────────────┘",
        "····················",
        "····················",
        "····················",
        "····················",
    ]
    .join("\n");
    assert_eq!(render(&mut container, &boxes, 20, 22), expected);
}

#[test]
fn test_column_cross_axis_centered() {
    init_tracing();
    let boxes = movies();
    let mut container = FlexContainer::new();
    container.flex_direction = FlexDirection::Column;
    container.align_items = AlignItems::Center;
    container.nodes = boxes.iter().map(TextBox::to_node).collect();

    let expected = [
        "··┌─────────────┐···",
        "··|The Shawshank│···",
        "··|Redemption   │···",
        "··└─────────────┘···",
        "··┌─────────────┐···",
        "··|The Godfather│···",
        "··└─────────────┘···",
        "·┌───────────────┐··",
        "·|The Dark Knight│··",
        "·└───────────────┘··",
        "┌──────────────────┐",
        "|The Godfather Part│",
        "|II                │",
        "└──────────────────┘",
        "····················",
        "····················",
        "····················",
        "····················",
        "····················",
        "····················",
    ]
    .join("\n");
    assert_eq!(render(&mut container, &boxes, 20, 20), expected);
}

#[test]
fn test_column_cross_axis_stretched() {
    init_tracing();
    let boxes = movies();
    let mut container = FlexContainer::new();
    container.flex_direction = FlexDirection::Column;
    container.align_items = AlignItems::Stretch;
    container.nodes = boxes.iter().map(TextBox::to_node).collect();

    let expected = [
        "┌──────────────────┐",
        "|The Shawshank     │",
        "|Redemption        │",
        "└──────────────────┘",
        "┌──────────────────┐",
        "|The Godfather     │",
        "└──────────────────┘",
        "┌──────────────────┐",
        "|The Dark Knight   │",
        "└──────────────────┘",
        "┌──────────────────┐",
        "|The Godfather Part│",
        "|II                │",
        "└──────────────────┘",
        "····················",
        "····················",
        "····················",
        "····················",
        "····················",
        "····················",
        "····················",
        "····················",
    ]
    .join("\n");
    assert_eq!(render(&mut container, &boxes, 20, 22), expected);
}

#[test]
fn test_row() {
    init_tracing();
    let boxes = movies();
    let mut container = FlexContainer::new();
    container.nodes = boxes.iter().map(TextBox::to_node).collect();

    let expected = [
        "┌───────────────────┐┌─────────┐┌──────────┐┌──────────────┐",
        "|The Shawshank      │|The      │|The Dark  │|The Godfather │",
        "|Redemption         │|Godfather│|Knight    │|Part II       │",
        "└───────────────────┘└─────────┘└──────────┘└──────────────┘",
        "····························································",
        "····························································",
        "····························································",
        "····························································",
    ]
    .join("\n");
    assert_eq!(render(&mut container, &boxes, 60, 8), expected);
}

#[test]
fn test_row_cross_axis_centered() {
    init_tracing();
    let boxes = movies();
    let mut container = FlexContainer::new();
    container.align_items = AlignItems::Center;
    container.nodes = boxes.iter().map(TextBox::to_node).collect();

    let expected = [
        "··········································",
        "┌──────────┐···········┌──────┐┌─────────┐",
        "|The       │┌─────────┐|The   │|The      │",
        "|Shawshank │|The      │|Dark  │|Godfather│",
        "|Redemption│|Godfather│|Knight│|Part II  │",
        "└──────────┘└─────────┘└──────┘└─────────┘",
        "··········································",
        "··········································",
    ]
    .join("\n");
    assert_eq!(render(&mut container, &boxes, 42, 8), expected);
}

#[test]
fn test_row_main_axis_centered() {
    init_tracing();
    let boxes = movies();
    let mut container = FlexContainer::new();
    container.justify_content = JustifyContent::Center;
    container.nodes = boxes
        .iter()
        .map(|text_box| {
            let mut node = text_box.to_node();
            node.flex_basis_percent = Some(0.0);
            node
        })
        .collect();

    let expected = [
        "·········┌──────────┐┌─────────┐┌──────┐┌─────────┐·········",
        "·········|The       │|The      │|The   │|The      │·········",
        "·········|Shawshank │|Godfather│|Dark  │|Godfather│·········",
        "·········|Redemption│└─────────┘|Knight│|Part II  │·········",
        "·········└──────────┘···········└──────┘|         │·········",
        "········································└─────────┘·········",
    ]
    .join("\n");
    assert_eq!(render(&mut container, &boxes, 60, 6), expected);
}

#[test]
fn test_row_cross_axis_stretched() {
    init_tracing();
    let boxes = movies();
    let mut container = FlexContainer::new();
    container.align_items = AlignItems::Stretch;
    container.nodes = boxes.iter().map(TextBox::to_node).collect();

    let expected = [
        "┌────────────────────────┐┌─────────────┐┌───────────────┐┌─────────────────────┐···················",
        "|The Shawshank Redemption│|The Godfather│|The Dark Knight│|The Godfather Part II│···················",
        "|                        │|             │|               │|                     │···················",
        "|                        │|             │|               │|                     │···················",
        "|                        │|             │|               │|                     │···················",
        "|                        │|             │|               │|                     │···················",
        "|                        │|             │|               │|                     │···················",
        "└────────────────────────┘└─────────────┘└───────────────┘└─────────────────────┘···················",
    ]
    .join("\n");
    assert_eq!(render(&mut container, &boxes, 100, 8), expected);
}
