use std::sync::{
    mpsc::{self, Receiver, Sender},
    Arc,
};

use reader_core::{config::Config, session::ReaderSession, speech::SpeechPlayer, Store};

use crate::{
    prompt_view::PromptView,
    reader_view::{ReaderView, Theme},
    views::{BookListView, DetailView, ProfileView, PublishView},
};

use super::types::{Loaded, Mode, PromptKind};

/// Reader screen waiting on the book text.
pub(super) struct PendingReader {
    pub title: String,
    pub message: String,
}

pub struct App {
    pub mode: Mode,
    pub theme: Theme,
    pub(super) store: Arc<dyn Store>,
    pub(super) config: Config,
    pub(super) catalog: BookListView,
    pub(super) shelf: BookListView,
    pub(super) detail: DetailView,
    pub(super) publish: PublishView,
    pub(super) profile: ProfileView,
    pub(super) reader_view: ReaderView,
    pub(super) reader: Option<ReaderSession>,
    pub(super) reader_pending: Option<PendingReader>,
    /// Speech player parked while no reader session owns it.
    pub(super) speech: Option<SpeechPlayer>,
    /// Bumped on every reader open and close; stale text loads are dropped.
    pub(super) generation: u64,
    /// Screen the reader or detail view returns to.
    pub(super) return_mode: Mode,
    pub(super) prompt: Option<(PromptKind, PromptView)>,
    pub(super) show_help: bool,
    pub(super) status: Option<String>,
    pub(super) tx: Sender<Loaded>,
    pub(super) rx: Receiver<Loaded>,
}

impl App {
    pub fn new(store: Arc<dyn Store>, config: Config, speech: SpeechPlayer) -> Self {
        let (tx, rx) = mpsc::channel();
        let reader_view = ReaderView::new(config.reader.column_width);
        Self {
            mode: Mode::Catalog,
            theme: Theme::default(),
            store,
            catalog: BookListView::new("Catalog"),
            shelf: BookListView::new("Shelf"),
            detail: DetailView::default(),
            publish: PublishView::default(),
            profile: ProfileView::default(),
            reader_view,
            reader: None,
            reader_pending: None,
            speech: Some(speech),
            generation: 0,
            return_mode: Mode::Catalog,
            prompt: None,
            show_help: false,
            status: None,
            tx,
            rx,
            config,
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub(super) fn column_width(&self) -> u16 {
        self.config.reader.column_width
    }
}
