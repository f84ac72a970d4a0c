use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders};

use crate::model::RecipeDetail;

/// Basic ingredients are laid out two per row.
pub(crate) const BASIC_COLUMNS: usize = 2;

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for the recipe overlay.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// Bordered block whose border turns yellow when the pane has focus.
pub(crate) fn pane_block(title: &str, focused: bool) -> Block<'static> {
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(title.to_string())
}

/// Move `index` by `delta` within `len` items, clamping at both ends.
pub(crate) fn step_index(index: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let moved = index as isize + delta;
    moved.clamp(0, len as isize - 1) as usize
}

/// Column just past `text` when it starts at `x`, pinned to the terminal's range.
pub(crate) fn cursor_column(x: u16, text: &str) -> u16 {
    let width = u16::try_from(text.chars().count()).unwrap_or(u16::MAX);
    x.saturating_add(width)
}

/// Number of grid rows needed for `count` basic ingredients.
pub(crate) fn basic_rows(count: usize) -> usize {
    count.div_ceil(BASIC_COLUMNS)
}

/// Lines of the recipe overlay: header facts, ingredient bullets, instructions.
pub(crate) fn detail_lines(detail: &RecipeDetail) -> Vec<Line<'static>> {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let mut lines = Vec::with_capacity(detail.ingredients.len() + 10);

    if !detail.thumbnail.is_empty() {
        lines.push(Line::from(Span::styled(
            detail.thumbnail.clone(),
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(vec![
        Span::styled("Category: ", bold),
        Span::raw(detail.category.clone()),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Area: ", bold),
        Span::raw(detail.area.clone()),
    ]));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Ingredients:", bold)));
    for ingredient in &detail.ingredients {
        lines.push(Line::from(format!("  • {}", ingredient)));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Instructions:", bold)));
    for paragraph in detail.instructions_text().lines() {
        lines.push(Line::from(paragraph.to_string()));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_index_clamps() {
        assert_eq!(step_index(0, -1, 5), 0);
        assert_eq!(step_index(4, 1, 5), 4);
        assert_eq!(step_index(2, 2, 5), 4);
        assert_eq!(step_index(3, -2, 5), 1);
        assert_eq!(step_index(7, 1, 0), 0);
    }

    #[test]
    fn test_cursor_column_saturates_on_long_input() {
        assert_eq!(cursor_column(3, "beef"), 7);
        assert_eq!(cursor_column(1, "pâté"), 5);

        let long = "a".repeat(70_000);
        assert_eq!(cursor_column(1, &long), u16::MAX);
        assert_eq!(cursor_column(u16::MAX - 1, "ab"), u16::MAX);
    }

    #[test]
    fn test_basic_rows() {
        assert_eq!(basic_rows(0), 0);
        assert_eq!(basic_rows(1), 1);
        assert_eq!(basic_rows(8), 4);
        assert_eq!(basic_rows(9), 5);
    }

    #[test]
    fn test_centered_rect_is_inside_area() {
        let area = Rect::new(0, 0, 100, 50);
        let popup = centered_rect(80, 80, area);
        assert_eq!(popup.width, 80);
        assert_eq!(popup.height, 40);
        assert_eq!(popup.x, 10);
        assert_eq!(popup.y, 5);
    }

    #[test]
    fn test_detail_lines_fallback_and_bullets() {
        let detail = RecipeDetail {
            id: "1".into(),
            name: "Toast".into(),
            category: "Breakfast".into(),
            area: "British".into(),
            ingredients: vec!["Bread".into(), "Butter".into()],
            ..Default::default()
        };

        let text: Vec<String> = detail_lines(&detail)
            .iter()
            .map(|line| line.to_string())
            .collect();
        assert_eq!(text[0], "Category: Breakfast");
        assert!(text.contains(&"  • Bread".to_string()));
        assert!(text.contains(&"  • Butter".to_string()));
        assert_eq!(text.last().unwrap(), "Instructions not available.");
    }
}
