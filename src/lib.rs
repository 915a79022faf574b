//! Creator's Hub Assistant
//!
//! Message-resolution pipeline for The Creator's Hub chat assistant: a
//! layered credential resolver, a Gemini-backed remote session, and a
//! rule-based fallback responder, orchestrated by a dispatcher that always
//! completes with a conversational reply. The work-submission relay the site
//! ships alongside the chat widget lives here too.
//!
//! The interactive terminal client is in `src/main.rs`.

pub mod config;
pub mod conversation;
pub mod credentials;
pub mod dispatcher;
pub mod error;
pub mod fallback;
pub mod gemini;
pub mod persona;
pub mod session;
pub mod submissions;
