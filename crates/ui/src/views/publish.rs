use ratatui::{prelude::*, widgets::*};
use reader_core::publish::{Notice, PublishField, PublishFlow, PublishStep};

use super::notice_line;
use crate::{
    layout::{centered_column, centered_rect},
    reader_view::Theme,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PublishFocus {
    Field(PublishField),
    CoverImage,
    BookFile,
}

impl PublishFocus {
    pub const ORDER: [PublishFocus; 6] = [
        PublishFocus::Field(PublishField::Title),
        PublishFocus::Field(PublishField::Description),
        PublishFocus::Field(PublishField::Price),
        PublishFocus::Field(PublishField::Copies),
        PublishFocus::CoverImage,
        PublishFocus::BookFile,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PublishFocus::Field(field) => field.label(),
            PublishFocus::CoverImage => "Cover image",
            PublishFocus::BookFile => "Book file",
        }
    }

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        Self::ORDER[(self.position() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// Publish form screen.
pub struct PublishView {
    pub flow: PublishFlow,
    pub focus: PublishFocus,
}

impl Default for PublishView {
    fn default() -> Self {
        Self {
            flow: PublishFlow::new(),
            focus: PublishFocus::ORDER[0],
        }
    }
}

impl PublishView {
    pub fn value(&self, focus: PublishFocus) -> String {
        let form = &self.flow.form;
        match focus {
            PublishFocus::Field(field) => form.field(field).to_string(),
            PublishFocus::CoverImage => form
                .cover_image
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            PublishFocus::BookFile => form
                .book_file
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
        }
    }

    /// Stores an edited value for `focus`.
    pub fn commit(&mut self, focus: PublishFocus, value: &str) {
        match focus {
            PublishFocus::Field(field) => self.flow.set_field(field, value),
            PublishFocus::CoverImage => self.flow.set_cover_image(value),
            PublishFocus::BookFile => self.flow.set_book_file(value),
        }
    }

    pub fn render(&self, f: &mut Frame<'_>, area: Rect, column_width: u16, theme: &Theme) {
        let centered = centered_column(area, column_width);
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Publish (j/k field, Enter edit, s submit)");
        let mut lines = Vec::new();
        for focus in PublishFocus::ORDER {
            let style = if focus == self.focus {
                Style::default().bg(theme.footer_bg).fg(theme.footer_fg)
            } else {
                Style::default()
            };
            let value = self.value(focus);
            let shown = if value.is_empty() { "—".to_string() } else { value };
            lines.push(Line::from(vec![
                Span::styled(format!("{:<14}", focus.label()), style.add_modifier(Modifier::BOLD)),
                Span::styled(shown, style),
            ]));
        }
        lines.push(Line::default());
        lines.push(Line::from(
            "Book formats: .pdf, .txt, .doc, .docx, .epub, .rtf, .md (max 500 copies)",
        ).dim());
        match self.flow.notice() {
            Some(Notice::Error(message)) => lines.push(notice_line(message, true)),
            Some(Notice::Success(message)) => lines.push(notice_line(message, false)),
            None => {}
        }
        if self.flow.step() == PublishStep::Publishing {
            lines.push(Line::from("Publishing…"));
        }
        f.render_widget(Clear, centered);
        f.render_widget(
            Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
            centered,
        );

        if self.flow.step() == PublishStep::Confirming {
            let form = &self.flow.form;
            let popup = centered_rect(60, 30, area);
            let text = vec![
                Line::from(format!("Publish \"{}\"?", form.title)).bold(),
                Line::from(format!("{} USDC · {} copies", form.price, form.copies)),
                Line::default(),
                Line::from("y confirm · n cancel"),
            ];
            f.render_widget(Clear, popup);
            f.render_widget(
                Paragraph::new(text)
                    .block(Block::default().borders(Borders::ALL).title("Confirm"))
                    .wrap(Wrap { trim: false }),
                popup,
            );
        }
    }
}
