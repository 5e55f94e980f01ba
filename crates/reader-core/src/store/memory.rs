use std::{collections::HashMap, sync::Mutex};

use super::Store;
use crate::{
    error::StoreError,
    types::{Book, BookQuery, Bucket, Comment, NewBook, NewComment, SortOrder},
};

#[derive(Debug, Clone, PartialEq)]
pub struct Upload {
    pub bucket: Bucket,
    pub name: String,
    pub len: usize,
    pub content_type: String,
}

/// In-process store that records every call.
#[derive(Default)]
pub struct MemoryStore {
    pub books: Mutex<Vec<Book>>,
    pub comments: Mutex<Vec<Comment>>,
    pub uploads: Mutex<Vec<Upload>>,
    pub texts: Mutex<HashMap<String, String>>,
    pub calls: Mutex<Vec<&'static str>>,
    /// Operation name to the API message it fails with.
    pub failures: Mutex<HashMap<&'static str, String>>,
}

impl MemoryStore {
    pub fn with_books(books: Vec<Book>) -> Self {
        let store = Self::default();
        *store.books.lock().unwrap() = books;
        store
    }

    pub fn fail(&self, op: &'static str, message: &str) {
        self.failures.lock().unwrap().insert(op, message.to_string());
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn enter(&self, op: &'static str) -> Result<(), StoreError> {
        self.calls.lock().unwrap().push(op);
        match self.failures.lock().unwrap().get(op) {
            Some(message) => Err(StoreError::Api {
                status: 400,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

pub fn book(id: i64, title: &str) -> Book {
    Book {
        id,
        title: title.to_string(),
        description: format!("About {title}"),
        price: 2.0,
        copies: 100,
        cover: String::new(),
        file: format!("mem://file/{id}.txt"),
        created_at: Some(format!("2024-01-{:02}T12:00:00Z", id.clamp(1, 28))),
        author: None,
        sold: 0,
    }
}

impl Store for MemoryStore {
    fn list_books(&self, query: &BookQuery) -> Result<Vec<Book>, StoreError> {
        self.enter("list_books")?;
        let mut rows: Vec<Book> = self
            .books
            .lock()
            .unwrap()
            .iter()
            .filter(|b| {
                query.title_terms.is_empty()
                    || query
                        .title_terms
                        .iter()
                        .any(|t| b.title.to_lowercase().contains(&t.to_lowercase()))
            })
            .cloned()
            .collect();
        if let Some((column, order)) = &query.order_by {
            if column == "created_at" {
                rows.sort_by(|a, b| a.created_at.cmp(&b.created_at));
                if *order == SortOrder::Descending {
                    rows.reverse();
                }
            }
        }
        if let Some(limit) = query.limit {
            rows.truncate(limit);
        }
        Ok(rows)
    }

    fn get_book(&self, id: i64) -> Result<Book, StoreError> {
        self.enter("get_book")?;
        self.books
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    fn insert_book(&self, new: &NewBook) -> Result<Book, StoreError> {
        self.enter("insert_book")?;
        let mut books = self.books.lock().unwrap();
        let row = Book {
            id: books.len() as i64 + 1,
            title: new.title.clone(),
            description: new.description.clone(),
            price: new.price,
            copies: new.copies,
            cover: new.cover.clone(),
            file: new.file.clone(),
            created_at: None,
            author: None,
            sold: 0,
        };
        books.push(row.clone());
        Ok(row)
    }

    fn list_comments(&self, book_id: i64) -> Result<Vec<Comment>, StoreError> {
        self.enter("list_comments")?;
        Ok(self
            .comments
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.book_id == book_id)
            .cloned()
            .collect())
    }

    fn insert_comment(&self, new: &NewComment) -> Result<Comment, StoreError> {
        self.enter("insert_comment")?;
        let mut comments = self.comments.lock().unwrap();
        let row = Comment {
            id: comments.len() as i64 + 1,
            book_id: new.book_id,
            user: new.user.clone(),
            text: new.text.clone(),
            created_at: Some(new.created_at.clone()),
        };
        comments.push(row.clone());
        Ok(row)
    }

    fn upload(
        &self,
        bucket: Bucket,
        name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StoreError> {
        self.enter(match bucket {
            Bucket::Cover => "upload_cover",
            Bucket::File => "upload_file",
        })?;
        self.uploads.lock().unwrap().push(Upload {
            bucket,
            name: name.to_string(),
            len: bytes.len(),
            content_type: content_type.to_string(),
        });
        Ok(())
    }

    fn public_url(&self, bucket: Bucket, name: &str) -> String {
        format!("mem://{}/{name}", bucket.as_str())
    }

    fn fetch_text(&self, url: &str) -> Result<String, StoreError> {
        self.enter("fetch_text")?;
        self.texts
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or(StoreError::NotFound)
    }
}
