use std::thread;

use chrono::Utc;
use reader_core::{
    catalog::{self, failure_message},
    publish,
    session::ReaderSession,
    speech::SpeechPlayer,
    types::Book,
    Store,
};
use tracing::{debug, info, warn};

use super::state::PendingReader;
use super::types::{Loaded, Mode};
use super::App;

impl App {
    /// Runs `job` on a worker thread; its result arrives through `poll_loaded`.
    fn spawn_load<F>(&self, job: F)
    where
        F: FnOnce(&dyn Store) -> Loaded + Send + 'static,
    {
        let store = self.store.clone();
        let tx = self.tx.clone();
        thread::spawn(move || {
            let _ = tx.send(job(store.as_ref()));
        });
    }

    pub(super) fn request_catalog(&mut self) {
        self.catalog.loading = true;
        self.spawn_load(|store| {
            Loaded::Catalog(catalog::load_catalog(store).map_err(|e| failure_message(&e)))
        });
    }

    pub(super) fn request_shelf(&mut self) {
        self.shelf.loading = true;
        let shelf = self.config.shelf.clone();
        self.spawn_load(move |store| {
            Loaded::Shelf(catalog::load_shelf(store, &shelf).map_err(|e| failure_message(&e)))
        });
    }

    pub(super) fn request_detail(&mut self, id: i64) {
        self.detail.open(id);
        self.spawn_load(move |store| Loaded::Detail {
            id,
            result: catalog::load_book_detail(store, id).map_err(|e| e.to_string()),
        });
    }

    pub(super) fn request_comment(&mut self, book_id: i64, text: String) {
        self.spawn_load(move |store| Loaded::Comment {
            book_id,
            result: catalog::post_comment(store, book_id, &text, Utc::now())
                .map_err(|e| e.to_string()),
        });
    }

    pub(super) fn request_publish(&mut self) {
        let Some(form) = self.publish.flow.begin_publish() else {
            return;
        };
        info!(title = %form.title, "publishing");
        self.spawn_load(move |store| {
            Loaded::Published(publish::publish(store, &form, Utc::now().timestamp_millis()))
        });
    }

    /// Opens the reader on `book` and starts downloading its text.
    pub(super) fn open_reader(&mut self, book: Book) {
        self.close_session();
        if self.mode != Mode::Reader {
            self.return_mode = self.mode;
        }
        self.generation += 1;
        let generation = self.generation;
        self.mode = Mode::Reader;
        self.reader_pending = Some(PendingReader {
            title: book.title.clone(),
            message: "Loading…".into(),
        });
        self.spawn_load(move |store| {
            let result = store.fetch_text(&book.file).map_err(|e| e.to_string());
            Loaded::Text {
                generation,
                book,
                result,
            }
        });
    }

    pub(super) fn close_reader(&mut self) {
        self.generation += 1;
        self.close_session();
        self.reader_pending = None;
        self.mode = self.return_mode;
    }

    fn close_session(&mut self) {
        if let Some(session) = self.reader.take() {
            self.speech = Some(session.close());
        }
    }

    pub(super) fn poll_loaded(&mut self) {
        while let Ok(loaded) = self.rx.try_recv() {
            self.apply_loaded(loaded);
        }
    }

    pub(super) fn apply_loaded(&mut self, loaded: Loaded) {
        match loaded {
            Loaded::Catalog(result) => self.catalog.set_books(result),
            Loaded::Shelf(result) => self.shelf.set_books(result),
            Loaded::Detail { id, result } => {
                if !self.detail.set_detail(id, result) {
                    debug!(id, "dropped stale book detail");
                }
            }
            Loaded::Comment { book_id, result } => match result {
                Ok(Some(entry)) => self.detail.push_comment(book_id, entry),
                Ok(None) => {}
                Err(message) => {
                    warn!(book_id, "comment failed: {message}");
                    self.status = Some(message);
                }
            },
            Loaded::Text {
                generation,
                book,
                result,
            } => {
                if generation != self.generation || self.mode != Mode::Reader {
                    debug!(book = book.id, "dropped stale book text");
                    return;
                }
                match result {
                    Ok(text) => {
                        let speech = self.speech.take().unwrap_or_else(SpeechPlayer::unavailable);
                        let session = ReaderSession::open(book, &text, speech)
                            .with_font_size(self.config.reader.font_size);
                        self.reader = Some(session);
                        self.reader_pending = None;
                    }
                    Err(message) => {
                        warn!(book = book.id, "book text failed: {message}");
                        self.reader_pending = Some(PendingReader {
                            title: book.title,
                            message: format!("Failed to load book: {message}"),
                        });
                    }
                }
            }
            Loaded::Published(result) => {
                let published = result.is_ok();
                self.publish.flow.finish_publish(result);
                if published {
                    self.request_catalog();
                }
            }
        }
    }
}
