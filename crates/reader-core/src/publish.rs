use std::{
    fs,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{info, warn};

use crate::{
    store::Store,
    types::{Book, Bucket, NewBook},
};

pub const MAX_COPIES: i64 = 500;
pub const DEFAULT_COPIES: &str = "1";
pub const SUPPORTED_BOOK_EXTENSIONS: [&str; 7] = ["pdf", "txt", "doc", "docx", "epub", "rtf", "md"];
pub const PUBLISHED: &str = "Book published successfully!";

#[derive(Debug, Error, PartialEq)]
pub enum PublishError {
    #[error("Maximum number of copies is 500")]
    TooManyCopies,
    #[error("Please fill in all required fields")]
    MissingFields,
    #[error("Please upload a supported format: .pdf, .txt, .doc, .docx, .epub, .rtf, .md")]
    UnsupportedFormat,
    #[error("Please enter a valid price")]
    InvalidPrice,
    #[error("Please enter a valid number of copies")]
    InvalidCopies,
    #[error("Could not read {path}: {message}")]
    ReadFile { path: String, message: String },
    #[error("Failed to upload cover image: {0}")]
    CoverUpload(String),
    #[error("Failed to upload book file: {0}")]
    BookUpload(String),
    #[error("Failed to create book: {0}")]
    CreateBook(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PublishField {
    Title,
    Description,
    Price,
    Copies,
}

impl PublishField {
    pub const ALL: [PublishField; 4] = [
        PublishField::Title,
        PublishField::Description,
        PublishField::Price,
        PublishField::Copies,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PublishField::Title => "Title",
            PublishField::Description => "Description",
            PublishField::Price => "Price (USDC)",
            PublishField::Copies => "Copies",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PublishForm {
    pub title: String,
    pub description: String,
    pub price: String,
    pub copies: String,
    pub cover_image: Option<PathBuf>,
    pub book_file: Option<PathBuf>,
}

impl Default for PublishForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            price: String::new(),
            copies: DEFAULT_COPIES.to_string(),
            cover_image: None,
            book_file: None,
        }
    }
}

/// Leading integer of `s`, ignoring surrounding whitespace and any trailing
/// garbage: `" 12abc"` is 12, `"abc"` is nothing.
fn leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

impl PublishForm {
    pub fn field(&self, field: PublishField) -> &str {
        match field {
            PublishField::Title => &self.title,
            PublishField::Description => &self.description,
            PublishField::Price => &self.price,
            PublishField::Copies => &self.copies,
        }
    }

    /// Replaces a text field. Copies above the maximum are rejected and the
    /// previous value kept.
    pub fn set_field(&mut self, field: PublishField, value: &str) -> Result<(), PublishError> {
        if field == PublishField::Copies && leading_int(value).is_some_and(|n| n > MAX_COPIES) {
            return Err(PublishError::TooManyCopies);
        }
        let slot = match field {
            PublishField::Title => &mut self.title,
            PublishField::Description => &mut self.description,
            PublishField::Price => &mut self.price,
            PublishField::Copies => &mut self.copies,
        };
        *slot = value.to_string();
        Ok(())
    }

    pub fn set_cover_image(&mut self, path: impl Into<PathBuf>) {
        self.cover_image = Some(path.into());
    }

    /// Accepts only supported book formats, judged by extension.
    pub fn set_book_file(&mut self, path: impl Into<PathBuf>) -> Result<(), PublishError> {
        let path = path.into();
        let supported = extension(&path)
            .is_some_and(|ext| SUPPORTED_BOOK_EXTENSIONS.contains(&ext.as_str()));
        if !supported {
            return Err(PublishError::UnsupportedFormat);
        }
        self.book_file = Some(path);
        Ok(())
    }

    /// Checks run before the confirmation step; none of them reach the store.
    pub fn validate(&self) -> Result<ValidForm<'_>, PublishError> {
        if leading_int(&self.copies).is_some_and(|n| n > MAX_COPIES) {
            return Err(PublishError::TooManyCopies);
        }
        let (Some(cover), Some(file)) = (&self.cover_image, &self.book_file) else {
            return Err(PublishError::MissingFields);
        };
        if self.title.is_empty() || self.description.is_empty() || self.price.is_empty() {
            return Err(PublishError::MissingFields);
        }
        let price = self
            .price
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite() && *p >= 0.0)
            .ok_or(PublishError::InvalidPrice)?;
        let copies = leading_int(&self.copies)
            .filter(|n| *n >= 0)
            .ok_or(PublishError::InvalidCopies)?;
        Ok(ValidForm {
            form: self,
            price,
            copies,
            cover,
            file,
        })
    }
}

/// A form that passed [`PublishForm::validate`].
pub struct ValidForm<'a> {
    pub form: &'a PublishForm,
    pub price: f64,
    pub copies: i64,
    pub cover: &'a Path,
    pub file: &'a Path,
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

pub fn content_type(path: &Path) -> &'static str {
    match extension(path).as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain",
        Some("md") => "text/markdown",
        Some("doc") => "application/msword",
        Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        Some("epub") => "application/epub+zip",
        Some("rtf") => "application/rtf",
        _ => "application/octet-stream",
    }
}

/// Object name for an upload: `{millis}.{ext}`.
pub fn object_name(path: &Path, millis: i64) -> String {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{millis}.{ext}"),
        None => millis.to_string(),
    }
}

fn read(path: &Path) -> Result<Vec<u8>, PublishError> {
    fs::read(path).map_err(|e| PublishError::ReadFile {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Uploads the cover, then the book file, then inserts the row. A later
/// failure leaves earlier uploads in storage.
pub fn publish(store: &dyn Store, form: &PublishForm, millis: i64) -> Result<Book, PublishError> {
    let valid = form.validate()?;

    let cover_name = object_name(valid.cover, millis);
    store
        .upload(
            Bucket::Cover,
            &cover_name,
            read(valid.cover)?,
            content_type(valid.cover),
        )
        .map_err(|e| PublishError::CoverUpload(e.to_string()))?;
    let cover_url = store.public_url(Bucket::Cover, &cover_name);

    let file_name = object_name(valid.file, millis);
    store
        .upload(
            Bucket::File,
            &file_name,
            read(valid.file)?,
            content_type(valid.file),
        )
        .map_err(|e| PublishError::BookUpload(e.to_string()))?;
    let file_url = store.public_url(Bucket::File, &file_name);

    let book = store
        .insert_book(&NewBook {
            title: form.title.clone(),
            description: form.description.clone(),
            price: valid.price,
            copies: valid.copies,
            cover: cover_url,
            file: file_url,
        })
        .map_err(|e| PublishError::CreateBook(e.to_string()))?;
    info!(id = book.id, title = %book.title, "published book");
    Ok(book)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PublishStep {
    Editing,
    Confirming,
    Publishing,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Notice {
    Error(String),
    Success(String),
}

/// Form editing, confirmation and the in-flight publish.
#[derive(Clone, Debug)]
pub struct PublishFlow {
    pub form: PublishForm,
    step: PublishStep,
    notice: Option<Notice>,
}

impl Default for PublishFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl PublishFlow {
    pub fn new() -> Self {
        Self {
            form: PublishForm::default(),
            step: PublishStep::Editing,
            notice: None,
        }
    }

    pub fn step(&self) -> PublishStep {
        self.step
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn set_field(&mut self, field: PublishField, value: &str) {
        if let Err(e) = self.form.set_field(field, value) {
            self.notice = Some(Notice::Error(e.to_string()));
        }
    }

    pub fn set_cover_image(&mut self, path: &str) {
        self.form.set_cover_image(path.trim());
    }

    pub fn set_book_file(&mut self, path: &str) {
        match self.form.set_book_file(path.trim()) {
            Ok(()) => {
                if matches!(&self.notice, Some(Notice::Error(m)) if m.starts_with("Please upload")) {
                    self.notice = None;
                }
            }
            Err(e) => self.notice = Some(Notice::Error(e.to_string())),
        }
    }

    /// Editing -> Confirming when the form is valid.
    pub fn submit(&mut self) -> bool {
        if self.step != PublishStep::Editing {
            return false;
        }
        match self.form.validate() {
            Ok(_) => {
                self.step = PublishStep::Confirming;
                true
            }
            Err(e) => {
                self.notice = Some(Notice::Error(e.to_string()));
                false
            }
        }
    }

    pub fn cancel(&mut self) {
        if self.step == PublishStep::Confirming {
            self.step = PublishStep::Editing;
        }
    }

    /// Confirming -> Publishing; returns the form to hand to [`publish`].
    pub fn begin_publish(&mut self) -> Option<PublishForm> {
        if self.step != PublishStep::Confirming {
            return None;
        }
        self.step = PublishStep::Publishing;
        self.notice = None;
        Some(self.form.clone())
    }

    pub fn finish_publish(&mut self, result: Result<Book, PublishError>) {
        self.step = PublishStep::Editing;
        match result {
            Ok(_) => {
                self.form = PublishForm::default();
                self.notice = Some(Notice::Success(PUBLISHED.to_string()));
            }
            Err(e) => {
                warn!("publish failed: {e}");
                self.notice = Some(Notice::Error(e.to_string()));
            }
        }
    }
}
