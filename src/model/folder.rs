//! Folder naming scheme.
//!
//! A folder key is `<BaseName><MailboxIndex>`, e.g. `Drafts2`. The digit
//! suffix identifies the mailbox and never changes when a message moves
//! between folders; only the base name does.

use std::fmt;

/// The four folders every mailbox has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BaseName {
    Inbox,
    Sent,
    Drafts,
    Trash,
}

impl BaseName {
    /// All base names in sidebar order.
    pub const ALL: [BaseName; 4] = [Self::Inbox, Self::Sent, Self::Drafts, Self::Trash];

    /// The literal prefix used in folder keys.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Inbox => "Inbox",
            Self::Sent => "Sent",
            Self::Drafts => "Drafts",
            Self::Trash => "Trash",
        }
    }

    /// Parse an exact base name (case-sensitive, as it appears in keys).
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.as_str() == name)
    }
}

impl fmt::Display for BaseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical folder identifier, e.g. `"Inbox1"` or `"Sent2"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct FolderKey(String);

impl FolderKey {
    /// Wrap a raw key. No validation: unknown shapes are kept verbatim.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Build the key for `base` in mailbox `index`.
    pub fn from_parts(base: BaseName, index: &str) -> Self {
        Self(format!("{}{index}", base.as_str()))
    }

    /// The four keys of one mailbox, in sidebar order.
    pub fn mailbox_folders(index: &str) -> [FolderKey; 4] {
        BaseName::ALL.map(|b| Self::from_parts(b, index))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Trailing digit run identifying the mailbox (may be empty).
    pub fn mailbox_index(&self) -> &str {
        let prefix_len = self.0.trim_end_matches(|c: char| c.is_ascii_digit()).len();
        &self.0[prefix_len..]
    }

    /// The base name, if the part before the digit suffix is one of the four.
    pub fn base(&self) -> Option<BaseName> {
        let prefix = self.0.trim_end_matches(|c: char| c.is_ascii_digit());
        BaseName::parse(prefix)
    }

    /// Prefix test against a base name (`"Drafts2".is(Drafts)`).
    pub fn is(&self, base: BaseName) -> bool {
        self.0.starts_with(base.as_str())
    }

    /// Same mailbox, different folder.
    pub fn sibling(&self, base: BaseName) -> FolderKey {
        derive_sibling(self, base)
    }
}

impl fmt::Display for FolderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FolderKey {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl PartialEq<str> for FolderKey {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for FolderKey {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Re-use the digit suffix of `key` with a new base name.
///
/// `derive_sibling("Drafts2", Sent)` → `"Sent2"`. A key without a digit
/// suffix yields the bare base name.
pub fn derive_sibling(key: &FolderKey, base: BaseName) -> FolderKey {
    FolderKey::from_parts(base, key.mailbox_index())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_sibling() {
        assert_eq!(derive_sibling(&"Drafts2".into(), BaseName::Sent), "Sent2");
        assert_eq!(derive_sibling(&"Inbox1".into(), BaseName::Trash), "Trash1");
    }

    #[test]
    fn test_derive_sibling_multi_digit() {
        assert_eq!(derive_sibling(&"Sent12".into(), BaseName::Drafts), "Drafts12");
    }

    #[test]
    fn test_derive_sibling_without_suffix() {
        assert_eq!(derive_sibling(&"Inbox".into(), BaseName::Trash), "Trash");
    }

    #[test]
    fn test_base_and_index() {
        let key = FolderKey::new("Drafts3");
        assert_eq!(key.base(), Some(BaseName::Drafts));
        assert_eq!(key.mailbox_index(), "3");
        assert!(key.is(BaseName::Drafts));
        assert!(!key.is(BaseName::Trash));

        let odd = FolderKey::new("Archive1");
        assert_eq!(odd.base(), None);
        assert_eq!(odd.mailbox_index(), "1");
    }

    #[test]
    fn test_mailbox_folders_order() {
        let keys = FolderKey::mailbox_folders("2");
        let names: Vec<&str> = keys.iter().map(FolderKey::as_str).collect();
        assert_eq!(names, ["Inbox2", "Sent2", "Drafts2", "Trash2"]);
    }
}
