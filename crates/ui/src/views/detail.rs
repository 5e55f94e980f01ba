use ratatui::{prelude::*, widgets::*};
use reader_core::catalog::{BookDetail, CommentEntry, BOOK_NOT_FOUND};

use super::notice_line;
use crate::layout::centered_column;

/// Book detail with its comment thread.
#[derive(Default)]
pub struct DetailView {
    pub book_id: Option<i64>,
    pub detail: Option<BookDetail>,
    pub loading: bool,
    pub error: Option<String>,
    pub scroll: u16,
}

impl DetailView {
    pub fn open(&mut self, id: i64) {
        *self = Self {
            book_id: Some(id),
            loading: true,
            ..Self::default()
        };
    }

    /// Applies a load result; results for another book are ignored.
    pub fn set_detail(&mut self, id: i64, result: Result<BookDetail, String>) -> bool {
        if self.book_id != Some(id) {
            return false;
        }
        self.loading = false;
        match result {
            Ok(detail) => self.detail = Some(detail),
            Err(_) => self.error = Some(BOOK_NOT_FOUND.to_string()),
        }
        true
    }

    pub fn push_comment(&mut self, book_id: i64, entry: CommentEntry) {
        if let Some(detail) = self.detail.as_mut().filter(|d| d.book.id == book_id) {
            detail.comments.push(entry);
        }
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    fn lines(detail: &BookDetail) -> Vec<Line<'static>> {
        let book = &detail.book;
        let mut lines = vec![
            Line::from(book.title.clone()).bold(),
            Line::from(book.author_label()).italic(),
            Line::default(),
            Line::from(format!(
                "{}   Copies: {}   Sold: {}",
                book.price_label(),
                book.copies,
                book.sold
            )),
            Line::default(),
        ];
        lines.extend(book.description.lines().map(|l| Line::from(l.to_string())));
        lines.push(Line::default());
        lines.push(Line::from(format!("Comments ({})", detail.comments.len())).bold());
        if detail.comments.is_empty() {
            lines.push(Line::from("No comments yet").dim());
        }
        for comment in &detail.comments {
            lines.push(Line::default());
            let heading = if comment.when.is_empty() {
                comment.user.clone()
            } else {
                format!("{} · {}", comment.user, comment.when)
            };
            lines.push(Line::from(heading).dim());
            lines.push(Line::from(comment.text.clone()));
        }
        lines
    }

    pub fn render(&self, f: &mut Frame<'_>, area: Rect, column_width: u16) {
        let centered = centered_column(area, column_width);
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Book (c comment, r read, j/k scroll, Esc back)");
        let body = if self.loading {
            Text::from("Loading…")
        } else if let Some(error) = &self.error {
            Text::from(notice_line(error, true))
        } else if let Some(detail) = &self.detail {
            Text::from(Self::lines(detail))
        } else {
            Text::from(notice_line(BOOK_NOT_FOUND, true))
        };
        f.render_widget(Clear, centered);
        f.render_widget(
            Paragraph::new(body)
                .block(block)
                .wrap(Wrap { trim: false })
                .scroll((self.scroll, 0)),
            centered,
        );
    }
}
