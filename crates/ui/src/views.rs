mod book_list;
mod detail;
mod profile;
mod publish;

pub use book_list::BookListView;
pub use detail::DetailView;
pub use profile::ProfileView;
pub use publish::{PublishFocus, PublishView};

use ratatui::{prelude::*, widgets::*};
use unicode_segmentation::UnicodeSegmentation;

use crate::layout::{centered_rect, truncate_end};

/// `label` left and `right` flush right within `max_w` columns.
pub(crate) fn format_list_line(label: &str, right: &str, max_w: usize) -> String {
    if max_w == 0 {
        return String::new();
    }
    let right_len = right.graphemes(true).count();
    let space = usize::from(!right.is_empty());
    let label = truncate_end(label, max_w.saturating_sub(right_len + space));
    let label_len = label.graphemes(true).count();
    let pad = max_w.saturating_sub(label_len + right_len);
    format!("{label}{}{right}", " ".repeat(pad))
}

pub fn render_help(f: &mut Frame<'_>, area: Rect, lines: &[&str]) {
    let popup_area = centered_rect(70, 70, area);
    let help = Paragraph::new(lines.join("\n"))
        .block(
            Block::default()
                .title("Help (Esc or ? to close)")
                .borders(Borders::ALL),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

pub(crate) fn notice_line(text: &str, is_error: bool) -> Line<'static> {
    let color = if is_error { Color::Red } else { Color::Green };
    Line::from(Span::styled(text.to_string(), Style::default().fg(color)))
}
