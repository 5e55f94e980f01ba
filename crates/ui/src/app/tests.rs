use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use reader_core::{
    config::Config,
    publish::Notice,
    speech::SpeechPlayer,
    types::{Book, BookQuery, Bucket, Comment, NewBook, NewComment},
    Store, StoreError,
};

use super::types::{Command, InputCommand, Loaded, Mode};
use super::App;

#[derive(Default)]
struct StubStore {
    books: Vec<Book>,
    calls: Mutex<Vec<&'static str>>,
    offline: Option<String>,
}

impl StubStore {
    fn record(&self, op: &'static str) {
        self.calls.lock().unwrap().push(op);
    }
}

impl Store for StubStore {
    fn list_books(&self, _query: &BookQuery) -> Result<Vec<Book>, StoreError> {
        self.record("list_books");
        match &self.offline {
            Some(reason) => Err(StoreError::Transport(reason.clone())),
            None => Ok(self.books.clone()),
        }
    }

    fn get_book(&self, id: i64) -> Result<Book, StoreError> {
        self.record("get_book");
        self.books
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    fn insert_book(&self, _book: &NewBook) -> Result<Book, StoreError> {
        self.record("insert_book");
        Err(StoreError::NotFound)
    }

    fn list_comments(&self, _book_id: i64) -> Result<Vec<Comment>, StoreError> {
        self.record("list_comments");
        Ok(Vec::new())
    }

    fn insert_comment(&self, comment: &NewComment) -> Result<Comment, StoreError> {
        self.record("insert_comment");
        Ok(Comment {
            id: 1,
            book_id: comment.book_id,
            user: comment.user.clone(),
            text: comment.text.clone(),
            created_at: Some(comment.created_at.clone()),
        })
    }

    fn upload(
        &self,
        _bucket: Bucket,
        _name: &str,
        _bytes: Vec<u8>,
        _content_type: &str,
    ) -> Result<(), StoreError> {
        self.record("upload");
        Ok(())
    }

    fn public_url(&self, bucket: Bucket, name: &str) -> String {
        format!("https://files.test/{}/{name}", bucket.as_str())
    }

    fn fetch_text(&self, _url: &str) -> Result<String, StoreError> {
        self.record("fetch_text");
        Ok("Call me Ishmael.".into())
    }
}

fn book(id: i64) -> Book {
    Book {
        id,
        title: format!("Book {id}"),
        description: String::new(),
        price: 1.0,
        copies: 3,
        cover: String::new(),
        file: format!("https://files.test/file/{id}.txt"),
        created_at: None,
        author: None,
        sold: 0,
    }
}

fn app_with(store: Arc<StubStore>) -> App {
    App::new(store, Config::default(), SpeechPlayer::unavailable())
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn press(app: &mut App, code: KeyCode) {
    if let Some(command) = Command::from_key(app, key(code)) {
        app.apply_command(command);
    }
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

/// Applies the next worker result.
fn settle(app: &mut App) {
    let loaded = app.rx.recv_timeout(Duration::from_secs(5)).unwrap();
    app.apply_loaded(loaded);
}

fn text_loaded(generation: u64, id: i64, text: &str) -> Loaded {
    Loaded::Text {
        generation,
        book: book(id),
        result: Ok(text.into()),
    }
}

#[test]
fn reader_keys_map_to_page_commands() {
    let mut app = app_with(Arc::new(StubStore::default()));
    app.mode = Mode::Reader;
    assert_eq!(Command::from_key(&app, key(KeyCode::Right)), Some(Command::NextPage));
    assert_eq!(Command::from_key(&app, key(KeyCode::Char('h'))), Some(Command::PrevPage));
    assert_eq!(Command::from_key(&app, key(KeyCode::Char(' '))), Some(Command::ToggleSpeech));
    assert_eq!(Command::from_key(&app, key(KeyCode::Esc)), Some(Command::Back));
    assert_eq!(
        Command::from_key(&app, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
        Some(Command::Exit)
    );
}

#[test]
fn prompt_captures_every_character() {
    let mut app = app_with(Arc::new(StubStore::default()));
    app.mode = Mode::Reader;
    app.apply_loaded(text_loaded(0, 1, "whale"));
    press(&mut app, KeyCode::Char('/'));
    assert_eq!(
        Command::from_key(&app, key(KeyCode::Char('q'))),
        Some(Command::Input(InputCommand::Insert('q')))
    );
}

#[test]
fn text_for_a_replaced_session_is_dropped() {
    let store = Arc::new(StubStore::default());
    let mut app = app_with(store);
    app.open_reader(book(1));
    let first = app.generation;
    app.open_reader(book(2));
    app.apply_loaded(text_loaded(first, 1, "stale"));
    assert!(app.reader.is_none());
    app.apply_loaded(text_loaded(app.generation, 2, "fresh"));
    assert_eq!(app.reader.as_ref().map(|s| s.book().id), Some(2));
}

#[test]
fn text_arriving_after_close_is_dropped() {
    let mut app = app_with(Arc::new(StubStore::default()));
    app.open_reader(book(1));
    let generation = app.generation;
    press(&mut app, KeyCode::Esc);
    assert_eq!(app.mode, Mode::Catalog);
    app.apply_loaded(text_loaded(generation, 1, "late"));
    assert!(app.reader.is_none());
}

#[test]
fn closing_the_reader_parks_the_speech_player() {
    let mut app = app_with(Arc::new(StubStore::default()));
    app.mode = Mode::Shelf;
    app.open_reader(book(1));
    settle(&mut app);
    assert!(app.reader.is_some());
    assert!(app.speech.is_none());
    press(&mut app, KeyCode::Esc);
    assert!(app.reader.is_none());
    assert!(app.speech.is_some());
    assert_eq!(app.mode, Mode::Shelf);
}

#[test]
fn speech_unavailable_is_reported() {
    let mut app = app_with(Arc::new(StubStore::default()));
    app.mode = Mode::Reader;
    app.apply_loaded(text_loaded(0, 1, "Call me Ishmael."));
    press(&mut app, KeyCode::Char(' '));
    assert_eq!(app.status.as_deref(), Some("speech unavailable"));
    assert!(!app.reader.as_ref().unwrap().is_speaking());
}

#[test]
fn search_follows_typing_and_escape_clears_it() {
    let mut app = app_with(Arc::new(StubStore::default()));
    app.mode = Mode::Reader;
    app.apply_loaded(text_loaded(0, 1, "whale and whale"));
    press(&mut app, KeyCode::Char('/'));
    type_text(&mut app, "wha");
    assert_eq!(app.reader.as_ref().unwrap().search().query(), "wha");
    press(&mut app, KeyCode::Enter);
    assert!(app.prompt.is_none());
    assert_eq!(app.reader.as_ref().unwrap().search().query(), "wha");

    press(&mut app, KeyCode::Char('/'));
    press(&mut app, KeyCode::Esc);
    assert_eq!(app.reader.as_ref().unwrap().search().query(), "");
}

#[test]
fn too_many_copies_never_reaches_the_store() {
    let store = Arc::new(StubStore::default());
    let mut app = app_with(store.clone());
    app.apply_command(Command::Show(Mode::Publish));
    for _ in 0..3 {
        press(&mut app, KeyCode::Down);
    }
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Backspace);
    type_text(&mut app, "501");
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.publish.flow.form.copies, "1");
    assert_eq!(
        app.publish.flow.notice(),
        Some(&Notice::Error("Maximum number of copies is 500".into()))
    );
    press(&mut app, KeyCode::Char('s'));
    assert!(store.calls.lock().unwrap().is_empty());
}

#[test]
fn posted_comment_is_appended_to_the_detail() {
    let store = Arc::new(StubStore {
        books: vec![book(7)],
        ..StubStore::default()
    });
    let mut app = app_with(store.clone());
    app.catalog.set_books(Ok(vec![book(7)]));
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.mode, Mode::Detail);
    settle(&mut app);
    assert!(app.detail.detail.is_some());

    press(&mut app, KeyCode::Char('c'));
    type_text(&mut app, "Loved it");
    press(&mut app, KeyCode::Enter);
    settle(&mut app);
    let comments = &app.detail.detail.as_ref().unwrap().comments;
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].user, "Anonymous");
    assert_eq!(comments[0].when, "Just now");
}

#[test]
fn blank_comment_skips_the_store() {
    let store = Arc::new(StubStore {
        books: vec![book(7)],
        ..StubStore::default()
    });
    let mut app = app_with(store.clone());
    app.request_detail(7);
    settle(&mut app);
    app.mode = Mode::Detail;
    press(&mut app, KeyCode::Char('c'));
    type_text(&mut app, "   ");
    press(&mut app, KeyCode::Enter);
    settle(&mut app);
    assert!(!store.calls.lock().unwrap().contains(&"insert_comment"));
    assert!(app.detail.detail.as_ref().unwrap().comments.is_empty());
}

#[test]
fn reader_arrows_scroll_within_the_page() {
    let mut app = app_with(Arc::new(StubStore::default()));
    app.mode = Mode::Reader;
    app.apply_loaded(text_loaded(0, 1, &"word ".repeat(500)));
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Char('j'));
    press(&mut app, KeyCode::Char('k'));
    assert_eq!(app.reader.as_ref().unwrap().scroll(), 1);
    press(&mut app, KeyCode::Right);
    assert_eq!(app.reader.as_ref().unwrap().current_page(), 2);
    assert_eq!(app.reader.as_ref().unwrap().scroll(), 0);
}

#[test]
fn unreachable_backend_is_reported_in_the_catalog() {
    let store = Arc::new(StubStore {
        offline: Some("Backend URL is not configured".into()),
        ..StubStore::default()
    });
    let mut app = app_with(store);
    app.show(Mode::Catalog);
    settle(&mut app);
    assert_eq!(app.mode, Mode::Catalog);
    assert_eq!(
        app.catalog.error.as_deref(),
        Some("Request failed: Backend URL is not configured")
    );
    assert!(app.catalog.books.is_empty());
}
