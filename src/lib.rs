pub mod commands;
pub mod engine;
pub mod repl;
pub mod reply;
pub mod store;
pub mod types;
pub mod wait;

pub use engine::Engine;

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Result<T> = std::result::Result<T, Error>;
