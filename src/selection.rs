//! Selection tracker and the command guards derived from it.

use crate::model::{BaseName, MessageId};
use crate::store::MailboxStore;

/// Which guarded commands may run right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CommandAvailability {
    /// A message is selected.
    pub can_delete: bool,
    /// The selected message lives in a Drafts folder.
    pub can_edit_draft: bool,
}

impl CommandAvailability {
    /// Evaluate both guards for `selection` against the store.
    pub fn evaluate(selection: &Selection, store: &MailboxStore) -> Self {
        let selected = selection.get().and_then(|id| store.get(id));
        Self {
            can_delete: selected.is_some(),
            can_edit_draft: selected.is_some_and(|m| m.folder.is(BaseName::Drafts)),
        }
    }
}

/// At most one selected message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection(Option<MessageId>);

impl Selection {
    pub fn get(&self) -> Option<MessageId> {
        self.0
    }

    /// Replace the selection. Returns whether it changed.
    pub fn set(&mut self, id: Option<MessageId>) -> bool {
        if self.0 == id {
            return false;
        }
        self.0 = id;
        true
    }

    /// Clear the selection if it points at `id`. Returns whether it did.
    pub fn clear_if(&mut self, id: MessageId) -> bool {
        if self.0 == Some(id) {
            self.0 = None;
            true
        } else {
            false
        }
    }

    pub fn is_none(&self) -> bool {
        self.0.is_none()
    }
}
