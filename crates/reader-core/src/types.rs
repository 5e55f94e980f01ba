use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Book {
    pub id: i64,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub copies: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cover: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub file: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sold: i64,
}

/// Missing keys and explicit `null` both read as the field's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl Book {
    pub fn price_label(&self) -> String {
        format!("{} USDC", self.price)
    }

    pub fn author_label(&self) -> String {
        match self.author.as_deref().map(str::trim) {
            Some(a) if !a.is_empty() => format!("by {a}"),
            _ => "by Unknown".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewBook {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub copies: i64,
    pub cover: String,
    pub file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Comment {
    pub id: i64,
    pub book_id: i64,
    pub user: String,
    pub text: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewComment {
    pub book_id: i64,
    pub text: String,
    pub user: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    Cover,
    File,
}

impl Bucket {
    pub fn as_str(self) -> &'static str {
        match self {
            Bucket::Cover => "cover",
            Bucket::File => "file",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Row filter for the `books` table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookQuery {
    pub order_by: Option<(String, SortOrder)>,
    /// Case-insensitive substrings; a row matches when its title contains any.
    pub title_terms: Vec<String>,
    pub limit: Option<usize>,
}

impl BookQuery {
    pub fn newest_first() -> Self {
        Self {
            order_by: Some(("created_at".to_string(), SortOrder::Descending)),
            ..Self::default()
        }
    }

    pub fn titles_like(terms: &[String], limit: usize) -> Self {
        Self {
            order_by: None,
            title_terms: terms.to_vec(),
            limit: Some(limit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_columns_read_as_defaults() {
        let row = r#"{"id": 4, "title": "Dune", "description": null, "price": null,
            "copies": 2, "cover": null, "file": "https://files.test/4.txt",
            "created_at": null, "author": null, "sold": null}"#;
        let book: Book = serde_json::from_str(row).unwrap();
        assert_eq!(book.description, "");
        assert_eq!(book.price, 0.0);
        assert_eq!(book.copies, 2);
        assert_eq!(book.cover, "");
        assert_eq!(book.sold, 0);
        assert_eq!(book.author_label(), "by Unknown");
    }

    #[test]
    fn missing_columns_read_as_defaults() {
        let book: Book = serde_json::from_str(r#"{"id": 1, "title": "Emma"}"#).unwrap();
        assert_eq!(book.sold, 0);
        assert!(book.file.is_empty());
        assert!(book.created_at.is_none());
    }
}
