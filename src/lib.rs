//! `mailtriage`: a terminal mail-triage client over an in-memory,
//! multi-mailbox message set.
//!
//! The core is the mailbox state and filtering engine in [`command`]: it
//! owns the messages, tracks folder placement per mailbox, derives the
//! visible subset and exposes the guarded triage commands. [`tui`] and the
//! binary are thin front-ends over it.

pub mod command;
pub mod config;
pub mod error;
pub mod events;
pub mod model;
pub mod search;
pub mod seed;
pub mod selection;
pub mod store;
pub mod tui;
