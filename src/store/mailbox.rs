//! Mailbox store: the authoritative, ordered message collection.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::model::{FolderKey, Message, MessageId};

/// A stored message together with the id it was assigned.
#[derive(Debug, Clone)]
struct Slot {
    id: MessageId,
    message: Message,
}

/// Owns every message across all mailboxes.
///
/// Messages keep their insertion order. Every message's folder is a member
/// of [`known_folders`](Self::known_folders): registering a key also
/// registers its three siblings, so a mailbox always shows up complete.
///
/// The store never touches derived views; callers recompute those.
#[derive(Debug, Default)]
pub struct MailboxStore {
    slots: Vec<Slot>,
    known: BTreeSet<FolderKey>,
    next_id: u64,
}

impl MailboxStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole contents with `messages`. Returns the new ids in order.
    pub fn seed_load(&mut self, messages: Vec<Message>) -> Vec<MessageId> {
        self.slots.clear();
        self.known.clear();
        let ids: Vec<MessageId> = messages.into_iter().map(|m| self.add(m)).collect();
        debug!(
            messages = ids.len(),
            folders = self.known.len(),
            "Seeded mailbox store"
        );
        ids
    }

    /// Append a message and return its id.
    pub fn add(&mut self, message: Message) -> MessageId {
        let id = MessageId(self.next_id);
        self.next_id += 1;
        self.register_folder(&message.folder);
        self.slots.push(Slot { id, message });
        id
    }

    /// Remove a message by id. Absent ids are a no-op.
    pub fn remove(&mut self, id: MessageId) -> Option<Message> {
        let pos = self.position(id)?;
        Some(self.slots.remove(pos).message)
    }

    /// Move a message to another folder without changing its position.
    ///
    /// Returns `false` if the id is not in the store.
    pub fn mutate_folder(&mut self, id: MessageId, folder: FolderKey) -> bool {
        let Some(pos) = self.position(id) else {
            return false;
        };
        self.register_folder(&folder);
        self.slots[pos].message.folder = folder;
        true
    }

    pub fn get(&self, id: MessageId) -> Option<&Message> {
        self.slots.iter().find(|s| s.id == id).map(|s| &s.message)
    }

    /// Mutable access for in-place field edits.
    ///
    /// Folder changes should go through [`mutate_folder`](Self::mutate_folder)
    /// so the key is registered.
    pub fn get_mut(&mut self, id: MessageId) -> Option<&mut Message> {
        self.slots
            .iter_mut()
            .find(|s| s.id == id)
            .map(|s| &mut s.message)
    }

    pub fn contains(&self, id: MessageId) -> bool {
        self.position(id).is_some()
    }

    /// All messages in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (MessageId, &Message)> {
        self.slots.iter().map(|s| (s.id, &s.message))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Every folder key the store knows, sorted.
    pub fn known_folders(&self) -> &BTreeSet<FolderKey> {
        &self.known
    }

    pub fn is_known_folder(&self, folder: &FolderKey) -> bool {
        self.known.contains(folder)
    }

    /// Distinct mailbox indices, sorted numerically where possible.
    pub fn mailbox_indices(&self) -> Vec<String> {
        let mut indices: Vec<String> = self
            .known
            .iter()
            .map(|k| k.mailbox_index().to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        indices.sort_by(|a, b| match (a.parse::<u64>(), b.parse::<u64>()) {
            (Ok(x), Ok(y)) => x.cmp(&y),
            _ => a.cmp(b),
        });
        indices
    }

    /// Number of messages per folder. Known folders with no messages map to 0.
    pub fn folder_counts(&self) -> BTreeMap<FolderKey, usize> {
        let mut counts: BTreeMap<FolderKey, usize> =
            self.known.iter().map(|k| (k.clone(), 0)).collect();
        for slot in &self.slots {
            *counts.entry(slot.message.folder.clone()).or_insert(0) += 1;
        }
        counts
    }

    fn position(&self, id: MessageId) -> Option<usize> {
        self.slots.iter().position(|s| s.id == id)
    }

    fn register_folder(&mut self, folder: &FolderKey) {
        if self.known.contains(folder) {
            return;
        }
        self.known.insert(folder.clone());
        if folder.base().is_some() {
            for sibling in FolderKey::mailbox_folders(folder.mailbox_index()) {
                self.known.insert(sibling);
            }
        }
    }
}
