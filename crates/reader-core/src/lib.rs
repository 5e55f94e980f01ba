pub mod catalog;
pub mod config;
pub mod error;
pub mod layout;
pub mod profile;
pub mod publish;
pub mod search;
pub mod session;
pub mod speech;
pub mod store;
pub mod types;

pub use error::{ConfigError, SpeechError, StoreError};
pub use session::ReaderSession;
pub use store::Store;
pub use types::{Book, Comment};
