//! Forge head events - resolves source-control webhooks into head changes.
//!
//! Given a `push` or `pull_request` delivery from a Gitea-style forge, this
//! library works out which branches, tags and pull requests were created,
//! updated or removed, and the revisions a build-trigger subsystem should act
//! on. It also decides whether a push concerns a legacy polling job.

pub mod config;
pub mod dispatch;
pub mod matcher;
pub mod resolve;
pub mod server;
pub mod source;
pub mod types;
pub mod webhooks;

#[cfg(test)]
pub(crate) mod test_utils;
