use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::{
    config::ShelfConfig,
    error::StoreError,
    store::Store,
    types::{Book, BookQuery, Comment, NewComment},
};

pub const BOOK_NOT_FOUND: &str = "Book not found";
pub const FETCH_FAILED: &str = "Failed to fetch books";
pub const ANONYMOUS: &str = "Anonymous";
pub const JUST_NOW: &str = "Just now";

/// Every book, newest first.
pub fn load_catalog(store: &dyn Store) -> Result<Vec<Book>, StoreError> {
    let books = store
        .list_books(&BookQuery::newest_first())
        .inspect_err(|e| warn!("catalog load failed: {e}"))?;
    info!(count = books.len(), "loaded catalog");
    Ok(books)
}

/// Books whose title contains any configured term.
pub fn load_shelf(store: &dyn Store, shelf: &ShelfConfig) -> Result<Vec<Book>, StoreError> {
    let books = store
        .list_books(&BookQuery::titles_like(&shelf.title_terms, shelf.limit))
        .inspect_err(|e| warn!("shelf load failed: {e}"))?;
    info!(count = books.len(), "loaded shelf");
    Ok(books)
}

/// Message shown in place of a list that failed to load.
pub fn failure_message(err: &StoreError) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        FETCH_FAILED.to_string()
    } else {
        message
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CommentEntry {
    pub user: String,
    pub text: String,
    pub when: String,
}

impl CommentEntry {
    fn from_row(comment: Comment) -> Self {
        Self {
            when: timestamp_label(comment.created_at.as_deref()),
            user: comment.user,
            text: comment.text,
        }
    }
}

#[derive(Clone, Debug)]
pub struct BookDetail {
    pub book: Book,
    pub comments: Vec<CommentEntry>,
}

/// The book row plus its comments. A comment failure leaves the list empty.
pub fn load_book_detail(store: &dyn Store, id: i64) -> Result<BookDetail, StoreError> {
    let book = store
        .get_book(id)
        .inspect_err(|e| warn!(id, "book load failed: {e}"))?;
    let comments = match store.list_comments(id) {
        Ok(rows) => rows.into_iter().map(CommentEntry::from_row).collect(),
        Err(e) => {
            warn!(id, "comment load failed: {e}");
            Vec::new()
        }
    };
    Ok(BookDetail { book, comments })
}

/// Posts an anonymous comment. Blank text is ignored without touching the
/// store.
pub fn post_comment(
    store: &dyn Store,
    book_id: i64,
    text: &str,
    now: DateTime<Utc>,
) -> Result<Option<CommentEntry>, StoreError> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    let row = store.insert_comment(&NewComment {
        book_id,
        text: text.to_string(),
        user: ANONYMOUS.to_string(),
        created_at: now.to_rfc3339(),
    })?;
    info!(book_id, "posted comment");
    Ok(Some(CommentEntry {
        user: row.user,
        text: row.text,
        when: JUST_NOW.to_string(),
    }))
}

pub fn timestamp_label(created_at: Option<&str>) -> String {
    match created_at.map(DateTime::parse_from_rfc3339) {
        Some(Ok(at)) => at.with_timezone(&Utc).format("%b %-d, %Y %H:%M").to_string(),
        Some(Err(_)) => created_at.unwrap_or_default().to_string(),
        None => String::new(),
    }
}
