use std::time::Duration;

use reader_core::{
    config::BackendConfig,
    store::Store,
    types::{Book, BookQuery, Bucket, Comment, NewBook, NewComment, SortOrder},
    StoreError,
};
use reqwest::{
    blocking::{Client, RequestBuilder, Response},
    header::CONTENT_TYPE,
    Method,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::BackendError;

const USER_AGENT: &str = concat!("quillify/", env!("CARGO_PKG_VERSION"));

/// PostgREST rows under `/rest/v1` plus object storage under `/storage/v1`.
pub struct RestStore {
    client: Client,
    base: String,
    anon_key: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
    msg: Option<String>,
}

impl RestStore {
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let base = config.url.trim().trim_end_matches('/').to_string();
        if base.is_empty() {
            return Err(BackendError::Unconfigured);
        }
        let mut builder = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT);
        if base.starts_with("http://127.0.0.1") || base.starts_with("http://localhost") {
            builder = builder.no_proxy();
        }
        Ok(Self {
            client: builder.build()?,
            base,
            anon_key: config.anon_key.clone(),
        })
    }

    fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.base)
    }

    fn object_url(&self, bucket: Bucket, name: &str) -> String {
        format!("{}/storage/v1/object/{}/{name}", self.base, bucket.as_str())
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client
            .request(method, url)
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
    }

    fn send(builder: RequestBuilder) -> Result<Response, BackendError> {
        let response = builder.send()?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message.or(b.error).or(b.msg))
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string()
            });
        warn!(status = status.as_u16(), "backend error: {message}");
        Err(BackendError::Api {
            status: status.as_u16(),
            message,
        })
    }

    fn rows<T: DeserializeOwned>(builder: RequestBuilder) -> Result<Vec<T>, BackendError> {
        let text = Self::send(builder)?.text()?;
        Ok(serde_json::from_str(&text)?)
    }

    fn insert<T: Serialize, R: DeserializeOwned>(
        &self,
        table: &str,
        row: &T,
    ) -> Result<R, BackendError> {
        let builder = self
            .request(Method::POST, &self.rest_url(table))
            .header("Prefer", "return=representation")
            .json(&[row]);
        Self::rows::<R>(builder)?
            .into_iter()
            .next()
            .ok_or(BackendError::NotFound)
    }
}

/// Query-string pairs for a `books` select.
pub(crate) fn book_params(query: &BookQuery) -> Vec<(String, String)> {
    let mut params = vec![("select".to_string(), "*".to_string())];
    if !query.title_terms.is_empty() {
        let any = query
            .title_terms
            .iter()
            .map(|t| format!("title.ilike.%{t}%"))
            .collect::<Vec<_>>()
            .join(",");
        params.push(("or".to_string(), format!("({any})")));
    }
    if let Some((column, order)) = &query.order_by {
        let dir = match order {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        };
        params.push(("order".to_string(), format!("{column}.{dir}")));
    }
    if let Some(limit) = query.limit {
        params.push(("limit".to_string(), limit.to_string()));
    }
    params
}

impl Store for RestStore {
    fn list_books(&self, query: &BookQuery) -> Result<Vec<Book>, StoreError> {
        let builder = self
            .request(Method::GET, &self.rest_url("books"))
            .query(&book_params(query));
        Ok(Self::rows(builder)?)
    }

    fn get_book(&self, id: i64) -> Result<Book, StoreError> {
        let builder = self
            .request(Method::GET, &self.rest_url("books"))
            .query(&[("select", "*".to_string()), ("id", format!("eq.{id}"))]);
        let mut rows: Vec<Book> = Self::rows(builder)?;
        match rows.len() {
            1 => Ok(rows.remove(0)),
            _ => Err(StoreError::NotFound),
        }
    }

    fn insert_book(&self, book: &NewBook) -> Result<Book, StoreError> {
        Ok(self.insert("books", book)?)
    }

    fn list_comments(&self, book_id: i64) -> Result<Vec<Comment>, StoreError> {
        let builder = self
            .request(Method::GET, &self.rest_url("comments"))
            .query(&[
                ("select", "*".to_string()),
                ("book_id", format!("eq.{book_id}")),
                ("order", "created_at.asc".to_string()),
            ]);
        Ok(Self::rows(builder)?)
    }

    fn insert_comment(&self, comment: &NewComment) -> Result<Comment, StoreError> {
        Ok(self.insert("comments", comment)?)
    }

    fn upload(
        &self,
        bucket: Bucket,
        name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StoreError> {
        debug!(bucket = bucket.as_str(), name, len = bytes.len(), "uploading");
        let builder = self
            .request(Method::POST, &self.object_url(bucket, name))
            .header(CONTENT_TYPE, content_type)
            .body(bytes);
        Self::send(builder)?;
        Ok(())
    }

    fn public_url(&self, bucket: Bucket, name: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{name}",
            self.base,
            bucket.as_str()
        )
    }

    fn fetch_text(&self, url: &str) -> Result<String, StoreError> {
        let response = Self::send(self.client.get(url))?;
        Ok(response.text().map_err(BackendError::from)?)
    }
}
