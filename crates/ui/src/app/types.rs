use reader_core::{
    catalog::{BookDetail, CommentEntry},
    publish::PublishError,
    types::Book,
};

use crate::views::PublishFocus;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Catalog,
    Shelf,
    Detail,
    Publish,
    Profile,
    Reader,
}

/// What the open prompt is collecting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum PromptKind {
    Search,
    Comment,
    Field(PublishFocus),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum InputCommand {
    Cancel,
    Submit,
    Backspace,
    Insert(char),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Command {
    Exit,
    Back,
    ToggleHelp,
    CloseHelp,
    Show(Mode),
    Refresh,
    Down,
    Up,
    Open,
    Read,
    StartComment,
    NextPage,
    PrevPage,
    FirstPage,
    LastPage,
    StartSearch,
    NextMatch,
    PrevMatch,
    FontLarger,
    FontSmaller,
    ToggleSpeech,
    SubmitForm,
    Confirm,
    Decline,
    Input(InputCommand),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum CommandOutcome {
    Continue,
    Exit,
}

/// Results sent back from worker threads.
pub(super) enum Loaded {
    Catalog(Result<Vec<Book>, String>),
    Shelf(Result<Vec<Book>, String>),
    Detail {
        id: i64,
        result: Result<BookDetail, String>,
    },
    Comment {
        book_id: i64,
        result: Result<Option<CommentEntry>, String>,
    },
    Text {
        generation: u64,
        book: Book,
        result: Result<String, String>,
    },
    Published(Result<Book, PublishError>),
}
