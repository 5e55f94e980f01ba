use crate::{
    error::StoreError,
    types::{Book, BookQuery, Bucket, Comment, NewBook, NewComment},
};

#[cfg(test)]
pub(crate) mod memory;

/// Remote catalog and object storage. Shared across worker threads.
pub trait Store: Send + Sync {
    fn list_books(&self, query: &BookQuery) -> Result<Vec<Book>, StoreError>;

    /// Exactly one row; [`StoreError::NotFound`] otherwise.
    fn get_book(&self, id: i64) -> Result<Book, StoreError>;

    fn insert_book(&self, book: &NewBook) -> Result<Book, StoreError>;

    fn list_comments(&self, book_id: i64) -> Result<Vec<Comment>, StoreError>;

    fn insert_comment(&self, comment: &NewComment) -> Result<Comment, StoreError>;

    fn upload(
        &self,
        bucket: Bucket,
        name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StoreError>;

    fn public_url(&self, bucket: Bucket, name: &str) -> String;

    /// Downloads a book's raw text from its public URL.
    fn fetch_text(&self, url: &str) -> Result<String, StoreError>;
}
