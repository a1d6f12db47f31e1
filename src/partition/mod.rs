//! Partition routing
//!
//! Some streams are extracted once per parent entity: `users` and
//! `invites` per organization, `questions` and `submissions` per form.
//! A router enumerates the partition values that feed the path
//! template of the child stream.

mod routers;
mod types;

pub use routers::{ListRouter, ParentRouter};
pub use types::{PartitionRouter, PartitionValue};

#[cfg(test)]
mod tests;
