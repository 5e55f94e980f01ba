mod theme;

pub use theme::{parse_color, Theme};

use highlight::HighlightSpan;
use ratatui::{prelude::*, widgets::*};
use reader_core::{
    session::{ReaderSession, DEFAULT_FONT_SIZE},
    speech::SpeechState,
};

use crate::layout::{centered_column, split_bar, with_status_bar};

pub const READER_HINTS: &str = "←/→ page  j/k scroll  / search  n/N match  +/- size  space read  Esc close";

/// Reading column for a font size. `base` is the width at the default size;
/// larger fonts get proportionally fewer columns.
pub fn column_width_for(font_size: u16, base: u16) -> u16 {
    let width = u32::from(base) * u32::from(DEFAULT_FONT_SIZE) / u32::from(font_size.max(1));
    width.clamp(20, u32::from(u16::MAX)) as u16
}

/// Page text as ratatui lines; matched runs get the highlight colors.
pub fn page_text(spans: &[HighlightSpan], theme: &Theme) -> Text<'static> {
    let matched = Style::default()
        .bg(theme.highlight_bg)
        .fg(theme.highlight_fg)
        .add_modifier(Modifier::BOLD);
    let mut lines: Vec<Line<'static>> = vec![Line::default()];
    for span in spans {
        let style = if span.matched {
            matched
        } else {
            Style::default()
        };
        for (i, piece) in span.text.split('\n').enumerate() {
            if i > 0 {
                lines.push(Line::default());
            }
            if !piece.is_empty() {
                if let Some(line) = lines.last_mut() {
                    line.push_span(Span::styled(piece.to_string(), style));
                }
            }
        }
    }
    Text::from(lines)
}

fn speech_label(state: SpeechState) -> &'static str {
    match state {
        SpeechState::Idle => "",
        SpeechState::Speaking { .. } => "▶ reading",
        SpeechState::Settling { .. } => "▶ turning page",
    }
}

pub struct ReaderView {
    pub base_column_width: u16,
}

impl Default for ReaderView {
    fn default() -> Self {
        Self::new(72)
    }
}

impl ReaderView {
    pub fn new(base_column_width: u16) -> Self {
        Self { base_column_width }
    }

    fn chrome(&self, area: Rect, font_size: u16) -> (Rect, Rect, Rect, Rect) {
        let (content, status) = with_status_bar(area);
        let column = centered_column(
            content,
            column_width_for(font_size, self.base_column_width),
        );
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(column);
        (chunks[0], chunks[1], chunks[2], status)
    }

    pub fn render(
        &self,
        f: &mut Frame<'_>,
        area: Rect,
        session: &ReaderSession,
        theme: &Theme,
        status: Option<&str>,
    ) {
        let (header, body, footer, status_area) = self.chrome(area, session.font_size());
        let book = session.book();

        // Header: title and author (left) | page X of Y (right)
        let title = format!("{} {}", book.title, book.author_label());
        f.render_widget(
            Paragraph::new(split_bar(
                &title,
                &session.page_label(),
                header.width as usize,
                Style::default().bg(theme.header_bg).fg(theme.header_fg),
                Style::default().bg(theme.header_pad_bg),
                Style::default().bg(theme.footer_pad_bg).fg(theme.footer_fg),
            )),
            header,
        );

        f.render_widget(Clear, body);
        let text = page_text(&session.highlighted_page(), theme);
        f.render_widget(
            Paragraph::new(text)
                .wrap(Wrap { trim: false })
                .scroll((session.scroll(), 0)),
            body,
        );

        // Footer: font size and speech (left) | search counter (right)
        let mut left = format!("{}px", session.font_size());
        let speaking = speech_label(session.speech_state());
        if !speaking.is_empty() {
            left.push_str("  ");
            left.push_str(speaking);
        }
        let right = match session.search().counter_label() {
            Some(counter) => format!("\"{}\" {counter}", session.search().query()),
            None if !session.search().query().is_empty() => {
                format!("\"{}\" no matches", session.search().query())
            }
            None => String::new(),
        };
        f.render_widget(
            Paragraph::new(split_bar(
                &left,
                &right,
                footer.width as usize,
                Style::default().bg(theme.footer_bg).fg(theme.footer_fg),
                Style::default().bg(theme.footer_pad_bg),
                Style::default().bg(theme.footer_pad_bg).fg(theme.footer_fg),
            )),
            footer,
        );

        f.render_widget(
            Paragraph::new(status.unwrap_or(READER_HINTS)).style(Style::default().fg(Color::DarkGray)),
            status_area,
        );
    }

    /// Placeholder while the book text downloads or after it failed to.
    pub fn render_pending(&self, f: &mut Frame<'_>, area: Rect, title: &str, message: &str) {
        let (header, body, _, status_area) = self.chrome(area, DEFAULT_FONT_SIZE);
        f.render_widget(Paragraph::new(title.to_string()).bold(), header);
        f.render_widget(
            Paragraph::new(message.to_string()).wrap(Wrap { trim: false }),
            body,
        );
        f.render_widget(Paragraph::new("Esc close"), status_area);
    }
}

#[cfg(test)]
mod tests;
