pub mod app;
pub mod layout;
pub mod prompt_view;
pub mod reader_view;
pub mod speech;
pub mod views;
