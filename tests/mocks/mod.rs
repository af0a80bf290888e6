//! Mock infrastructure for the upstream AI providers
//!
//! Both providers speak the chat-completions schema, so a single wiremock
//! wrapper serves as either backend.

pub mod provider;

pub use provider::*;
