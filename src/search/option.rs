//! Store-wide option filter (All / Unread / Important).
//!
//! Not folder-scoped: the result spans every mailbox and folder.

use crate::model::MessageId;
use crate::store::MailboxStore;

use super::OptionFilter;

/// Ids of every message passing `option`, in store order.
pub fn filter_by_option(store: &MailboxStore, option: OptionFilter) -> Vec<MessageId> {
    store
        .iter()
        .filter(|(_, m)| match option {
            OptionFilter::All => true,
            OptionFilter::Unread => !m.is_important,
            OptionFilter::Important => m.is_important,
        })
        .map(|(id, _)| id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AttachmentList, FolderKey, Message};
    use chrono::Utc;

    fn make_message(important: bool, folder: &str) -> Message {
        Message {
            sender: "a@example.com".to_string(),
            recipients: vec!["b@example.com".to_string()],
            subject: "s".to_string(),
            content: String::new(),
            is_important: important,
            attachments: AttachmentList::new(),
            date_sent: Utc::now(),
            folder: FolderKey::new(folder),
        }
    }

    #[test]
    fn test_unread_means_not_important() {
        let mut store = MailboxStore::new();
        let ids = store.seed_load(vec![make_message(true, "Inbox1"), make_message(false, "Sent2")]);
        assert_eq!(filter_by_option(&store, OptionFilter::Unread), vec![ids[1]]);
        assert_eq!(filter_by_option(&store, OptionFilter::Important), vec![ids[0]]);
    }

    #[test]
    fn test_all_spans_every_folder() {
        let mut store = MailboxStore::new();
        let ids = store.seed_load(vec![
            make_message(false, "Inbox1"),
            make_message(true, "Trash1"),
            make_message(false, "Drafts2"),
        ]);
        assert_eq!(filter_by_option(&store, OptionFilter::All), ids);
    }
}
