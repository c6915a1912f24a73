pub mod config;
pub mod error;
pub mod llm;
pub mod server;
pub mod suggestion;

pub use error::{Error, Result};
