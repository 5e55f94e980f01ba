mod command;
mod loader;
mod run;
mod state;
mod types;

pub use state::App;
pub use types::Mode;

#[cfg(test)]
mod tests;
