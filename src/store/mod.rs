//! In-memory message storage.

pub mod mailbox;

pub use mailbox::MailboxStore;
