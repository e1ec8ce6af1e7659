//! Filter pipeline: folder scope, category search, and the option filter.
//!
//! There are two entry points and they do not compose. A folder + search
//! derivation ([`filter_by_category`]) replaces the visible subset, and so
//! does an option derivation ([`filter_by_option`]). Whichever ran last
//! wins; [`FilterMode`] records which one that was.

pub mod category;
pub mod option;

use std::fmt;

use crate::model::FolderKey;

pub use self::category::{filter_by_category, filter_by_folder};
pub use self::option::filter_by_option;

/// Which message field a text search looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchCategory {
    #[default]
    Subject,
    Sender,
    Recipient,
}

impl SearchCategory {
    pub const ALL: [SearchCategory; 3] = [Self::Subject, Self::Sender, Self::Recipient];

    /// Display name as shown in the category picker.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Subject => "Subject",
            Self::Sender => "Sender",
            Self::Recipient => "Recipient",
        }
    }

    /// Case-insensitive parse of a display name. `None` for anything else.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(name.trim()))
    }

    /// The next category, wrapping around.
    pub fn next(self) -> Self {
        match self {
            Self::Subject => Self::Sender,
            Self::Sender => Self::Recipient,
            Self::Recipient => Self::Subject,
        }
    }
}

impl fmt::Display for SearchCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Store-wide view filter.
///
/// `Unread` is a synonym for "not important"; there is no read flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OptionFilter {
    #[default]
    All,
    Unread,
    Important,
}

impl OptionFilter {
    pub const ALL: [OptionFilter; 3] = [Self::All, Self::Unread, Self::Important];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Unread => "Unread",
            Self::Important => "Important",
        }
    }

    /// Case-insensitive parse of a display name. `None` for anything else.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|o| o.as_str().eq_ignore_ascii_case(name.trim()))
    }

    pub fn next(self) -> Self {
        match self {
            Self::All => Self::Unread,
            Self::Unread => Self::Important,
            Self::Important => Self::All,
        }
    }
}

impl fmt::Display for OptionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which entry point produced the current visible subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    /// Folder scope, narrowed by the search query if one is set.
    FolderSearch,
    /// Store-wide option filter.
    Option(OptionFilter),
}

/// Everything the visible subset is derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub current_folder: FolderKey,
    /// Raw query text; trimmed at match time.
    pub search_query: String,
    /// `None` when the caller named a category that does not exist; the
    /// search step is then skipped.
    pub search_category: Option<SearchCategory>,
    /// Last option chosen, kept even while in folder mode.
    pub option: OptionFilter,
    pub mode: FilterMode,
}

impl FilterState {
    /// Folder-scoped state with no search.
    pub fn new(current_folder: FolderKey) -> Self {
        Self {
            current_folder,
            search_query: String::new(),
            search_category: Some(SearchCategory::default()),
            option: OptionFilter::default(),
            mode: FilterMode::FolderSearch,
        }
    }

    /// Whether a search query is in effect.
    pub fn has_query(&self) -> bool {
        !self.search_query.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse() {
        assert_eq!(SearchCategory::parse("Sender"), Some(SearchCategory::Sender));
        assert_eq!(SearchCategory::parse(" recipient "), Some(SearchCategory::Recipient));
        assert_eq!(SearchCategory::parse("Body"), None);
    }

    #[test]
    fn test_option_parse() {
        assert_eq!(OptionFilter::parse("unread"), Some(OptionFilter::Unread));
        assert_eq!(OptionFilter::parse("IMPORTANT"), Some(OptionFilter::Important));
        assert_eq!(OptionFilter::parse("Starred"), None);
    }

    #[test]
    fn test_cycles_wrap() {
        assert_eq!(SearchCategory::Recipient.next(), SearchCategory::Subject);
        assert_eq!(OptionFilter::Important.next(), OptionFilter::All);
    }

    #[test]
    fn test_new_state_is_folder_mode() {
        let state = FilterState::new(FolderKey::new("Inbox1"));
        assert_eq!(state.mode, FilterMode::FolderSearch);
        assert!(!state.has_query());
    }
}
