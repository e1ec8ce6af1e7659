//! Sidebar widget listing each mailbox's folders with message counts.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::search::FilterMode;
use crate::tui::app::{App, PanelFocus, SidebarEntry};

/// Render the folder sidebar panel.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let is_focused = app.focus == PanelFocus::Sidebar;
    let border_style = if is_focused {
        theme.border_focused
    } else {
        theme.border
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(" Folders ");

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height < 1 || inner.width < 4 {
        return;
    }

    let max_width = inner.width as usize;
    let counts = app.mailbox.store().folder_counts();
    let folder_mode = app.mailbox.filter().mode == FilterMode::FolderSearch;
    let current = app.mailbox.current_folder();

    let lines: Vec<Line> = app
        .sidebar_entries
        .iter()
        .enumerate()
        .map(|(i, entry)| match entry {
            SidebarEntry::Mailbox(title) => {
                Line::from(Span::styled(title.clone(), theme.sidebar_mailbox))
            }
            SidebarEntry::Folder(key) => {
                let count = counts.get(key).copied().unwrap_or(0);
                let is_selected = app.sidebar_selected == i;
                let is_active = folder_mode && key == current;
                let style = if is_selected && is_focused {
                    theme.sidebar_selected
                } else if is_active {
                    theme.sidebar_selected.remove_modifier(Modifier::BOLD)
                } else {
                    theme.sidebar
                };
                Line::from(Span::styled(
                    truncate_sidebar_entry(key.as_str(), count, max_width),
                    style,
                ))
            }
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Format a sidebar entry as "  Inbox1   (3)" padded or truncated to fit.
fn truncate_sidebar_entry(label: &str, count: usize, max_width: usize) -> String {
    let count_str = format!(" ({count})");
    let avail = max_width.saturating_sub(count_str.len() + 2);
    if label.len() <= avail {
        format!("  {label}{}{count_str}", " ".repeat(avail - label.len()))
    } else if avail > 3 {
        format!("  {}...{count_str}", &label[..avail - 3])
    } else {
        format!("  {label}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_padding() {
        assert_eq!(truncate_sidebar_entry("Inbox1", 3, 16), "  Inbox1     (3)");
        assert_eq!(truncate_sidebar_entry("Inbox1", 3, 6), "  Inbox1");
    }
}
