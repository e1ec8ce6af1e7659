//! The message entity and its attachment list.

use chrono::{DateTime, Utc};

use super::folder::FolderKey;

/// Opaque handle to a message held by a [`MailboxStore`](crate::store::MailboxStore).
///
/// Assigned on insertion and never reused within a process, so two ids
/// compare equal exactly when they refer to the same stored message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageId(pub(crate) u64);

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Attachment identifiers (usually file paths), in insertion order and
/// without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct AttachmentList(Vec<String>);

impl AttachmentList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `item` unless it is already present. Returns whether it was added.
    pub fn push(&mut self, item: impl Into<String>) -> bool {
        let item = item.into();
        if self.0.contains(&item) {
            return false;
        }
        self.0.push(item);
        true
    }

    /// Append every new item from `items`, keeping first-seen order.
    pub fn extend_from<I, S>(&mut self, items: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for item in items {
            self.push(item);
        }
    }

    /// Remove an item. Returns whether it was present.
    pub fn remove(&mut self, item: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|a| a != item);
        self.0.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for AttachmentList {
    fn from(items: Vec<String>) -> Self {
        let mut list = Self::new();
        list.extend_from(items);
        list
    }
}

impl From<AttachmentList> for Vec<String> {
    fn from(list: AttachmentList) -> Self {
        list.0
    }
}

/// One email and its mutable folder/importance state.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Message {
    /// Sender address as entered.
    pub sender: String,

    /// Recipient addresses, in the order given.
    pub recipients: Vec<String>,

    pub subject: String,

    /// Plain-text body.
    pub content: String,

    /// Importance flag. "Unread" views are defined as `!is_important`.
    pub is_important: bool,

    pub attachments: AttachmentList,

    pub date_sent: DateTime<Utc>,

    /// Folder key, e.g. `Inbox1`.
    pub folder: FolderKey,
}

impl Message {
    /// Flip the importance flag.
    pub fn toggle_important(&mut self) {
        self.is_important = !self.is_important;
    }

    /// Recipients joined for display: `"a@x.com, b@y.com"`.
    pub fn recipients_display(&self) -> String {
        self.recipients.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Message {
        Message {
            sender: "ceo@company.com".to_string(),
            recipients: vec!["a@company.com".to_string(), "b@company.com".to_string()],
            subject: "Quarterly Earnings Report".to_string(),
            content: String::new(),
            is_important: false,
            attachments: AttachmentList::new(),
            date_sent: Utc::now(),
            folder: FolderKey::new("Inbox1"),
        }
    }

    #[test]
    fn test_toggle_important_twice_restores() {
        let mut m = sample();
        m.toggle_important();
        assert!(m.is_important);
        m.toggle_important();
        assert!(!m.is_important);
    }

    #[test]
    fn test_recipients_display() {
        assert_eq!(sample().recipients_display(), "a@company.com, b@company.com");
    }

    #[test]
    fn test_attachment_list_suppresses_duplicates() {
        let mut list = AttachmentList::new();
        assert!(list.push("/tmp/report.pdf"));
        assert!(!list.push("/tmp/report.pdf"));
        list.extend_from(["/tmp/notes.txt", "/tmp/report.pdf", "/tmp/notes.txt"]);
        let items: Vec<&str> = list.iter().collect();
        assert_eq!(items, ["/tmp/report.pdf", "/tmp/notes.txt"]);
    }

    #[test]
    fn test_attachment_list_from_vec_dedups() {
        let list = AttachmentList::from(vec![
            "a.pdf".to_string(),
            "b.pdf".to_string(),
            "a.pdf".to_string(),
        ]);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_attachment_list_remove() {
        let mut list = AttachmentList::from(vec!["a.pdf".to_string()]);
        assert!(list.remove("a.pdf"));
        assert!(!list.remove("a.pdf"));
        assert!(list.is_empty());
    }
}
