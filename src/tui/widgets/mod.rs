//! TUI widgets for rendering different UI panels.

pub mod compose_popup;
pub mod header_bar;
pub mod help_popup;
pub mod mail_list;
pub mod mail_view;
pub mod search_bar;
pub mod sidebar;
pub mod status_bar;
