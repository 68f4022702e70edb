pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod normalize;
pub mod repl;
pub mod service;
pub mod transport;
pub mod web;

#[cfg(test)]
mod testing;

pub use client::ChatClient;
pub use config::Config;
pub use error::{QaError, Result};
pub use models::{ApiResult, Exchange};
pub use normalize::normalize;
pub use service::{QaService, QuestionAnswering};
