use reader_core::{
    store::Store,
    types::{Book, BookQuery, Bucket, Comment, NewBook, NewComment},
    StoreError,
};

use crate::error::BackendError;

/// Stands in for [`crate::RestStore`] when no client could be built. Every
/// request fails with the reason the client was refused.
pub struct OfflineStore {
    reason: String,
}

impl OfflineStore {
    pub fn new(err: &BackendError) -> Self {
        Self {
            reason: err.to_string(),
        }
    }

    fn fail<T>(&self) -> Result<T, StoreError> {
        Err(StoreError::Transport(self.reason.clone()))
    }
}

impl Store for OfflineStore {
    fn list_books(&self, _query: &BookQuery) -> Result<Vec<Book>, StoreError> {
        self.fail()
    }

    fn get_book(&self, _id: i64) -> Result<Book, StoreError> {
        self.fail()
    }

    fn insert_book(&self, _book: &NewBook) -> Result<Book, StoreError> {
        self.fail()
    }

    fn list_comments(&self, _book_id: i64) -> Result<Vec<Comment>, StoreError> {
        self.fail()
    }

    fn insert_comment(&self, _comment: &NewComment) -> Result<Comment, StoreError> {
        self.fail()
    }

    fn upload(
        &self,
        _bucket: Bucket,
        _name: &str,
        _bytes: Vec<u8>,
        _content_type: &str,
    ) -> Result<(), StoreError> {
        self.fail()
    }

    fn public_url(&self, _bucket: Bucket, name: &str) -> String {
        name.to_string()
    }

    fn fetch_text(&self, _url: &str) -> Result<String, StoreError> {
        self.fail()
    }
}
