use ratatui::{backend::TestBackend, Terminal};
use reader_core::{speech::SpeechPlayer, types::Book};

use super::*;

fn book() -> Book {
    Book {
        id: 1,
        title: "Moby Dick".into(),
        description: String::new(),
        price: 1.0,
        copies: 1,
        cover: String::new(),
        file: String::new(),
        created_at: None,
        author: Some("Herman Melville".into()),
        sold: 0,
    }
}

fn rendered(session: &ReaderSession, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    let view = ReaderView::new(60);
    terminal
        .draw(|f| {
            let area = f.area();
            view.render(f, area, session, &Theme::default(), None);
        })
        .unwrap();
    let buffer = terminal.backend().buffer().clone();
    buffer.content().iter().map(|c| c.symbol()).collect()
}

fn span(text: &str, matched: bool) -> HighlightSpan {
    HighlightSpan {
        text: text.into(),
        matched,
    }
}

#[test]
fn larger_fonts_narrow_the_column() {
    assert_eq!(column_width_for(16, 72), 72);
    assert_eq!(column_width_for(32, 72), 36);
    assert_eq!(column_width_for(12, 72), 96);
    assert_eq!(column_width_for(32, 30), 20);
}

#[test]
fn page_text_splits_lines_and_styles_matches() {
    let theme = Theme::default();
    let text = page_text(
        &[span("Call me ", false), span("Ishmael", true), span(".\nSome years", false)],
        &theme,
    );
    assert_eq!(text.lines.len(), 2);
    let first = &text.lines[0];
    assert_eq!(first.spans[1].content, "Ishmael");
    assert_eq!(first.spans[1].style.bg, Some(theme.highlight_bg));
    assert_eq!(first.spans[0].style.bg, None);
    assert_eq!(text.lines[1].spans[0].content, "Some years");
}

#[test]
fn header_and_footer_show_position_and_font() {
    let session = ReaderSession::open(book(), "Call me Ishmael.", SpeechPlayer::unavailable());
    let screen = rendered(&session, 80, 12);
    assert!(screen.contains("Moby Dick by Herman Melville"));
    assert!(screen.contains("Page 1 of 1"));
    assert!(screen.contains("16px"));
    assert!(screen.contains("Call me Ishmael."));
}

#[test]
fn footer_reports_search_counter() {
    let mut session =
        ReaderSession::open(book(), "whale whale whale", SpeechPlayer::unavailable());
    session.set_query("whale");
    let screen = rendered(&session, 80, 12);
    assert!(screen.contains("\"whale\" 1 of 3"));

    session.set_query("squid");
    let screen = rendered(&session, 80, 12);
    assert!(screen.contains("\"squid\" no matches"));
}

#[test]
fn tall_page_tail_is_reachable_by_scrolling() {
    let text = format!("{}ENDMARK", "lorem ".repeat(150));
    let mut session = ReaderSession::open(book(), &text, SpeechPlayer::unavailable())
        .with_font_size(32);
    assert_eq!(session.total_pages(), 1);
    assert!(!rendered(&session, 80, 24).contains("ENDMARK"));

    session.scroll_down(20);
    let screen = rendered(&session, 80, 24);
    assert!(screen.contains("ENDMARK"));
    assert!(screen.contains("Page 1 of 1"));
}
