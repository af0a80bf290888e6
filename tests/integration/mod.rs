//! Integration tests for the AI gateway
//!
//! These tests exercise the complete request/response flow through the real
//! router against a mock provider.

mod chat;
