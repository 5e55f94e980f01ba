use ratatui::{prelude::*, widgets::*};
use reader_core::types::Book;

use super::{format_list_line, notice_line};
use crate::{layout::centered_column, reader_view::Theme};

/// Selectable list of books, used by the catalog and the shelf.
pub struct BookListView {
    pub title: String,
    pub books: Vec<Book>,
    pub selected: usize,
    pub loading: bool,
    pub error: Option<String>,
}

impl BookListView {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            books: Vec::new(),
            selected: 0,
            loading: false,
            error: None,
        }
    }

    pub fn set_books(&mut self, result: Result<Vec<Book>, String>) {
        self.loading = false;
        match result {
            Ok(books) => {
                self.books = books;
                self.error = None;
            }
            Err(message) => {
                self.books.clear();
                self.error = Some(message);
            }
        }
        self.selected = self.selected.min(self.books.len().saturating_sub(1));
    }

    pub fn up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn down(&mut self) {
        if !self.books.is_empty() {
            self.selected = (self.selected + 1).min(self.books.len() - 1);
        }
    }

    pub fn selected_book(&self) -> Option<&Book> {
        self.books.get(self.selected)
    }

    pub fn render(&self, f: &mut Frame<'_>, area: Rect, column_width: u16, theme: &Theme) {
        let centered = centered_column(area, column_width);
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!("{} (j/k, Enter details, r read)", self.title));
        let inner = block.inner(centered);
        f.render_widget(Clear, centered);
        f.render_widget(block, centered);

        let placeholder = if self.loading {
            Some(Line::from("Loading…"))
        } else if let Some(error) = &self.error {
            Some(notice_line(error, true))
        } else if self.books.is_empty() {
            Some(Line::from("No books found"))
        } else {
            None
        };
        if let Some(line) = placeholder {
            f.render_widget(Paragraph::new(line).wrap(Wrap { trim: false }), inner);
            return;
        }

        let max_w = inner.width as usize;
        let items: Vec<ListItem> = self
            .books
            .iter()
            .enumerate()
            .map(|(i, book)| {
                let style = if i == self.selected {
                    Style::default().bg(theme.footer_bg).fg(theme.footer_fg)
                } else {
                    Style::default()
                };
                let heading = format!("{} {}", book.title, book.author_label());
                let detail = format!("  {} copies · {} sold", book.copies, book.sold);
                ListItem::new(Text::from(vec![
                    Line::from(format_list_line(&heading, &book.price_label(), max_w)),
                    Line::from(detail).style(Style::default().add_modifier(Modifier::DIM)),
                ]))
                .style(style)
            })
            .collect();
        let mut state = ListState::default().with_selected(Some(self.selected));
        f.render_stateful_widget(List::new(items), inner, &mut state);
    }
}
