use ratatui::prelude::*;
use unicode_segmentation::UnicodeSegmentation;

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let width = area.width.saturating_mul(percent_x) / 100;
    let height = area.height.saturating_mul(percent_y) / 100;
    Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    }
}

/// Column of at most `column_width`, centered horizontally in `area`.
pub fn centered_column(area: Rect, column_width: u16) -> Rect {
    let col_w = column_width.min(area.width);
    Rect {
        x: area.x + area.width.saturating_sub(col_w) / 2,
        y: area.y,
        width: col_w,
        height: area.height,
    }
}

/// Splits `area` into content and a one-line status bar.
pub fn with_status_bar(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);
    (chunks[0], chunks[1])
}

pub fn truncate_end(text: &str, max: usize) -> String {
    let count = text.graphemes(true).count();
    if count <= max {
        return text.to_string();
    }
    if max <= 1 {
        return String::new();
    }
    let mut out: String = text.graphemes(true).take(max - 1).collect();
    out.push('…');
    out
}

pub fn truncate_start(text: &str, max: usize) -> String {
    let graphemes: Vec<&str> = text.graphemes(true).collect();
    if graphemes.len() <= max {
        return text.to_string();
    }
    if max <= 1 {
        return String::new();
    }
    format!("…{}", graphemes[graphemes.len() - (max - 1)..].concat())
}

/// One-line bar with `left` and `right` segments padded to `width`. The left
/// segment is truncated first so the right one stays readable.
pub fn split_bar(
    left: &str,
    right: &str,
    width: usize,
    left_style: Style,
    pad_style: Style,
    right_style: Style,
) -> Line<'static> {
    let right_len = right.graphemes(true).count();
    let sep = usize::from(!left.is_empty() && !right.is_empty());
    let left = truncate_end(left, width.saturating_sub(sep + right_len));
    let left_len = left.graphemes(true).count();
    let right = truncate_start(right, width.saturating_sub(left_len + sep));
    let right_len = right.graphemes(true).count();

    let mut line = Line::default();
    if !left.is_empty() {
        line.push_span(Span::styled(left, left_style));
    }
    let pad = width.saturating_sub(left_len + right_len);
    if pad > 0 {
        line.push_span(Span::styled(" ".repeat(pad), pad_style));
    }
    if !right.is_empty() {
        line.push_span(Span::styled(right, right_style));
    }
    line
}
