mod error;
mod offline;
mod rest;

pub use error::BackendError;
pub use offline::OfflineStore;
pub use rest::RestStore;
