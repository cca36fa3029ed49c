//! Webhook handling for forge events.
//!
//! This module provides:
//! - Typed `push` and `pull_request` events
//! - Payload parsing through a category registration table
//! - Lifecycle classification (created, updated, removed)
//! - Operator-facing descriptions

pub mod classify;
pub mod describe;
pub mod events;
pub mod parser;

pub use classify::{EventType, RefKind, classify, clean_ref};
pub use describe::Descriptions;
pub use events::{
    HostEvent, PrAction, PrRef, PullRequestEvent, PullRequestSnapshot, PushEvent, Repository,
};
pub use parser::{EventHandler, HANDLERS, ParseError, handler_for, parse_webhook};
