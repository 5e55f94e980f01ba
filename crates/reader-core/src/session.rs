use std::time::Instant;

use highlight::{highlight_matches, HighlightSpan};
use tracing::{debug, info};

use crate::{
    error::SpeechError,
    layout::{self, Document, PageSlice},
    search::SearchState,
    speech::{SpeechOutcome, SpeechPlayer, SpeechState, SpeechStep},
    types::Book,
};

pub const DEFAULT_FONT_SIZE: u16 = 16;
pub const MIN_FONT_SIZE: u16 = 12;
pub const MAX_FONT_SIZE: u16 = 32;
pub const FONT_STEP: u16 = 2;

/// One open book: position, search and read-aloud state.
pub struct ReaderSession {
    book: Book,
    document: Document,
    current_page: usize,
    search: SearchState,
    font_size: u16,
    /// Lines scrolled within the current page.
    scroll: u16,
    speech: SpeechPlayer,
}

impl ReaderSession {
    pub fn open(book: Book, text: &str, speech: SpeechPlayer) -> Self {
        let document = Document::new(text);
        info!(
            book = book.id,
            chars = document.len(),
            pages = layout::total_pages(&document),
            "opened reader"
        );
        Self {
            book,
            document,
            current_page: 1,
            search: SearchState::new(),
            font_size: DEFAULT_FONT_SIZE,
            scroll: 0,
            speech,
        }
    }

    pub fn with_font_size(mut self, size: u16) -> Self {
        self.font_size = size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
        self
    }

    pub fn book(&self) -> &Book {
        &self.book
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        layout::total_pages(&self.document)
    }

    pub fn font_size(&self) -> u16 {
        self.font_size
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_add(lines);
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    pub fn search(&self) -> &SearchState {
        &self.search
    }

    pub fn is_speaking(&self) -> bool {
        self.speech.is_speaking()
    }

    pub fn speech_state(&self) -> SpeechState {
        self.speech.state()
    }

    pub fn speech_available(&self) -> bool {
        self.speech.is_available()
    }

    pub fn page_label(&self) -> String {
        format!("Page {} of {}", self.current_page, self.total_pages())
    }

    pub fn current_page_slice(&self) -> PageSlice {
        layout::page(&self.document, self.current_page)
    }

    /// Current page split into plain and matched runs. Without an active
    /// search the whole page is one plain run.
    pub fn highlighted_page(&self) -> Vec<HighlightSpan> {
        let text = self.current_page_slice().text;
        if self.search.is_active() {
            highlight_matches(&text, self.search.query())
        } else if text.is_empty() {
            Vec::new()
        } else {
            vec![HighlightSpan {
                text,
                matched: false,
            }]
        }
    }

    pub fn next_page(&mut self) -> bool {
        if layout::has_page_after(&self.document, self.current_page) {
            self.set_page(self.current_page + 1);
            true
        } else {
            false
        }
    }

    pub fn prev_page(&mut self) -> bool {
        if self.current_page > 1 {
            self.set_page(self.current_page - 1);
            true
        } else {
            false
        }
    }

    /// Moves to `page`, clamped to the document.
    pub fn jump(&mut self, page: usize) {
        self.set_page(page.clamp(1, self.total_pages().max(1)));
    }

    /// Every page change starts at the top of the page.
    fn set_page(&mut self, page: usize) {
        self.current_page = page;
        self.scroll = 0;
    }

    pub fn set_query(&mut self, query: &str) {
        self.search.update(&self.document, query);
        debug!(query, matches = self.search.matches().len(), "search updated");
    }

    pub fn clear_query(&mut self) {
        self.search.clear();
    }

    pub fn next_match(&mut self) -> bool {
        match self.search.next() {
            Some(page) => {
                self.jump(page);
                true
            }
            None => false,
        }
    }

    pub fn prev_match(&mut self) -> bool {
        match self.search.prev() {
            Some(page) => {
                self.jump(page);
                true
            }
            None => false,
        }
    }

    pub fn font_larger(&mut self) {
        self.font_size = (self.font_size + FONT_STEP).min(MAX_FONT_SIZE);
    }

    pub fn font_smaller(&mut self) {
        self.font_size = self
            .font_size
            .saturating_sub(FONT_STEP)
            .max(MIN_FONT_SIZE);
    }

    pub fn toggle_speech(&mut self) -> SpeechOutcome {
        if self.speech.is_speaking() {
            self.speech.stop();
            return SpeechOutcome::Stopped;
        }
        let text = self.current_page_slice().text;
        self.speech.start(self.current_page, &text)
    }

    /// Advances read-aloud. Returns true when the visible state changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.speech.poll(now) {
            SpeechStep::Nothing => false,
            SpeechStep::PageFinished { .. } => {
                if layout::has_page_after(&self.document, self.current_page) {
                    self.set_page(self.current_page + 1);
                    self.speech.settle(self.current_page, now);
                } else {
                    self.speech.finish();
                }
                true
            }
            SpeechStep::ResumeDue { page } => {
                self.resume_from(page);
                true
            }
        }
    }

    /// Speaks `page`, skipping ahead over pages with nothing to read.
    fn resume_from(&mut self, mut page: usize) {
        loop {
            self.jump(page);
            let text = layout::page(&self.document, page).text;
            match self.speech.resume(page, &text) {
                Err(SpeechError::EmptyText) if page < self.total_pages() => page += 1,
                _ => return,
            }
        }
    }

    /// Ends the session, cancelling speech, and hands the player back.
    pub fn close(mut self) -> SpeechPlayer {
        self.speech.stop();
        info!(book = self.book.id, "closed reader");
        self.speech
    }
}
