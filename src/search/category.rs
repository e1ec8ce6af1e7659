//! Folder scope and single-field text search.
//!
//! Complexity: O(n) over the store, which is small and in memory.

use crate::model::{FolderKey, Message, MessageId};
use crate::store::MailboxStore;

use super::SearchCategory;

/// Ids of every message in `folder`, in store order.
pub fn filter_by_folder(store: &MailboxStore, folder: &FolderKey) -> Vec<MessageId> {
    store
        .iter()
        .filter(|(_, m)| m.folder == *folder)
        .map(|(id, _)| id)
        .collect()
}

/// Folder scope narrowed by a case-insensitive substring search.
///
/// An empty (after trim) query, or `category = None`, returns the full
/// folder scope. A non-empty query is matched as typed, surrounding
/// whitespace included.
pub fn filter_by_category(
    store: &MailboxStore,
    folder: &FolderKey,
    query: &str,
    category: Option<SearchCategory>,
) -> Vec<MessageId> {
    let category = match category {
        Some(c) if !query.trim().is_empty() => c,
        _ => return filter_by_folder(store, folder),
    };

    let needle = query.to_lowercase();
    store
        .iter()
        .filter(|(_, m)| m.folder == *folder)
        .filter(|(_, m)| matches_category(m, category, &needle))
        .map(|(id, _)| id)
        .collect()
}

/// `needle` must already be lowercase.
fn matches_category(message: &Message, category: SearchCategory, needle: &str) -> bool {
    match category {
        SearchCategory::Subject => contains_ci(&message.subject, needle),
        SearchCategory::Sender => contains_ci(&message.sender, needle),
        SearchCategory::Recipient => message.recipients.iter().any(|r| contains_ci(r, needle)),
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AttachmentList;
    use chrono::Utc;

    fn make_message(sender: &str, to: &str, subject: &str, folder: &str) -> Message {
        Message {
            sender: sender.to_string(),
            recipients: vec![to.to_string()],
            subject: subject.to_string(),
            content: String::new(),
            is_important: false,
            attachments: AttachmentList::new(),
            date_sent: Utc::now(),
            folder: FolderKey::new(folder),
        }
    }

    fn fixture() -> (MailboxStore, Vec<MessageId>) {
        let mut store = MailboxStore::new();
        let ids = store.seed_load(vec![
            make_message("spam@promo.com", "me@x.com", "Buy One Get One", "Trash1"),
            make_message("newsletter@ads.com", "me@x.com", "Monthly Deals", "Trash1"),
            make_message("SPAM@offer.com", "me@x.com", "Discount", "Trash2"),
            make_message("ceo@company.com", "team@company.com", "Earnings", "Inbox1"),
        ]);
        (store, ids)
    }

    #[test]
    fn test_folder_scope() {
        let (store, ids) = fixture();
        let result = filter_by_folder(&store, &FolderKey::new("Trash1"));
        assert_eq!(result, vec![ids[0], ids[1]]);
    }

    #[test]
    fn test_sender_search_is_folder_relative() {
        let (store, ids) = fixture();
        let result = filter_by_category(
            &store,
            &FolderKey::new("Trash1"),
            "spam",
            Some(SearchCategory::Sender),
        );
        assert_eq!(result, vec![ids[0]]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let (store, ids) = fixture();
        let result = filter_by_category(
            &store,
            &FolderKey::new("Trash2"),
            "Spam",
            Some(SearchCategory::Sender),
        );
        assert_eq!(result, vec![ids[2]]);
    }

    #[test]
    fn test_blank_query_returns_folder_scope() {
        let (store, ids) = fixture();
        let result = filter_by_category(
            &store,
            &FolderKey::new("Trash1"),
            "   ",
            Some(SearchCategory::Sender),
        );
        assert_eq!(result, vec![ids[0], ids[1]]);
    }

    #[test]
    fn test_unknown_category_skips_search() {
        let (store, ids) = fixture();
        let result = filter_by_category(&store, &FolderKey::new("Trash1"), "spam", None);
        assert_eq!(result, vec![ids[0], ids[1]]);
    }

    #[test]
    fn test_subject_and_recipient_search() {
        let (store, ids) = fixture();
        let inbox = FolderKey::new("Inbox1");
        assert_eq!(
            filter_by_category(&store, &inbox, "EARN", Some(SearchCategory::Subject)),
            vec![ids[3]]
        );
        assert_eq!(
            filter_by_category(&store, &inbox, "team@", Some(SearchCategory::Recipient)),
            vec![ids[3]]
        );
        assert!(filter_by_category(&store, &inbox, "ceo", Some(SearchCategory::Recipient)).is_empty());
    }

    #[test]
    fn test_query_whitespace_is_significant() {
        let (store, ids) = fixture();
        let trash = FolderKey::new("Trash1");
        let subject = Some(SearchCategory::Subject);
        assert_eq!(filter_by_category(&store, &trash, "deals", subject), vec![ids[1]]);
        // "Monthly Deals" has no trailing space
        assert!(filter_by_category(&store, &trash, "deals ", subject).is_empty());
        // Inner space matches
        assert_eq!(filter_by_category(&store, &trash, "y d", subject), vec![ids[1]]);
    }
}
