//! Remote assistant client
//!
//! Wire types and HTTP client for the hosted chat-completion API.

pub mod client;
pub mod types;

pub use client::GeminiClient;
