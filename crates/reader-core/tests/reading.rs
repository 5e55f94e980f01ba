use std::{
    cell::RefCell,
    rc::Rc,
    time::{Duration, Instant},
};

use reader_core::{
    layout::{self, Document, PAGE_SIZE},
    session::ReaderSession,
    speech::{SpeechEngine, SpeechPlayer, SpeechState, Utterance, Voice},
    types::Book,
    SpeechError,
};

#[derive(Default)]
struct Log {
    spoken: Vec<String>,
    done: bool,
}

struct LoggingEngine(Rc<RefCell<Log>>);

impl SpeechEngine for LoggingEngine {
    fn voices(&self) -> Vec<Voice> {
        vec![Voice::named("Samantha")]
    }

    fn speak(&mut self, utterance: Utterance) -> Result<(), SpeechError> {
        let mut log = self.0.borrow_mut();
        log.spoken.push(utterance.text);
        log.done = false;
        Ok(())
    }

    fn cancel(&mut self) {}

    fn poll_finished(&mut self) -> bool {
        std::mem::take(&mut self.0.borrow_mut().done)
    }
}

fn book() -> Book {
    Book {
        id: 9,
        title: "Words".into(),
        description: String::new(),
        price: 0.0,
        copies: 1,
        cover: String::new(),
        file: String::new(),
        created_at: None,
        author: None,
        sold: 0,
    }
}

fn prose(words: usize) -> String {
    (0..words)
        .map(|i| format!("word{i}"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[test]
fn pages_cover_the_text_without_splitting_words() {
    let text = prose(900);
    let doc = Document::new(&text);
    let total = layout::total_pages(&doc);
    assert_eq!(total, doc.len().div_ceil(PAGE_SIZE));
    for index in 1..=total {
        let page = layout::page(&doc, index);
        assert!(!page.text.is_empty());
        assert!(page.end == doc.len() || doc.chars()[page.end] == ' ');
    }
}

#[test]
fn empty_book_has_no_pages() {
    let session = ReaderSession::open(book(), "", SpeechPlayer::unavailable());
    assert_eq!(session.total_pages(), 0);
    assert!(session.current_page_slice().text.is_empty());
}

#[test]
fn reading_aloud_turns_pages_until_the_end() {
    let log = Rc::new(RefCell::new(Log::default()));
    let engine: Box<dyn SpeechEngine> = Box::new(LoggingEngine(log.clone()));
    let player = SpeechPlayer::new(Some(engine), vec!["Samantha".into()])
        .with_delay(Duration::from_millis(500));
    let mut session = ReaderSession::open(book(), &prose(400), player);
    let total = session.total_pages();
    assert!(total >= 2);

    session.toggle_speech();
    let mut now = Instant::now();
    for page in 1..=total {
        assert_eq!(session.speech_state(), SpeechState::Speaking { page });
        log.borrow_mut().done = true;
        assert!(session.tick(now));
        if page < total {
            assert!(matches!(session.speech_state(), SpeechState::Settling { .. }));
            assert!(!session.tick(now + Duration::from_millis(100)));
            now += Duration::from_millis(500);
            assert!(session.tick(now));
        }
    }
    assert_eq!(session.speech_state(), SpeechState::Idle);
    assert_eq!(session.current_page(), total);
    assert_eq!(log.borrow().spoken.len(), total);
}

#[test]
fn search_then_close_hands_back_an_idle_player() {
    let log = Rc::new(RefCell::new(Log::default()));
    let engine: Box<dyn SpeechEngine> = Box::new(LoggingEngine(log));
    let player = SpeechPlayer::new(Some(engine), Vec::new());
    let mut session = ReaderSession::open(book(), &prose(400), player);
    session.set_query("WORD39");
    assert_eq!(session.search().matches().len(), 11);
    session.toggle_speech();
    assert!(session.is_speaking());
    let player = session.close();
    assert_eq!(player.state(), SpeechState::Idle);
}
