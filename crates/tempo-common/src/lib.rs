//! Event Tempo shared types.
//!
//! This crate provides:
//! - The persisted [`Event`] record and its JSONL wire shape
//! - The workspace error taxonomy ([`Error`]) with category and
//!   recoverability helpers
//! - CLI output format selection ([`OutputFormat`])

pub mod error;
pub mod event;
pub mod output;

pub use error::{Error, ErrorCategory, Result};
pub use event::Event;
pub use output::OutputFormat;
