//! Core data model: messages, folder keys, and addresses.

pub mod address;
pub mod folder;
pub mod message;

pub use folder::{derive_sibling, BaseName, FolderKey};
pub use message::{AttachmentList, Message, MessageId};
