//! Mail list widget: virtual-scrolling table of the visible subset.

use ratatui::layout::{Constraint, Rect};
use ratatui::widgets::{Block, Borders, Row, Table};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::search::FilterMode;
use crate::tui::app::{App, PanelFocus};

/// Render the message list table with virtual scrolling.
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let is_focused = app.focus == PanelFocus::MailList;
    let border_style = if is_focused {
        app.theme.border_focused
    } else {
        app.theme.border
    };

    let title = match app.mailbox.filter().mode {
        FilterMode::FolderSearch => format!(" {} ", app.mailbox.current_folder()),
        FilterMode::Option(option) => format!(" {option} (all mailboxes) "),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height < 2 {
        return;
    }

    // Header row takes 1 line, rest is data
    let viewport_height = (inner.height as usize).saturating_sub(1);
    app.list_viewport_height = viewport_height;

    let show_folder = matches!(app.mailbox.filter().mode, FilterMode::Option(_));

    // Column widths
    let mark_w = 1u16;
    let date_w = (app.date_format.len() as u16 + 2).clamp(10, 20);
    let folder_w = if show_folder { 8u16 } else { 0 };
    let att_w = 1u16;
    let from_w = 24u16.min(inner.width / 4);
    let fixed = mark_w + date_w + folder_w + from_w + att_w + 5;
    let subject_w = inner.width.saturating_sub(fixed);

    let mut constraints = vec![
        Constraint::Length(mark_w),
        Constraint::Length(date_w),
        Constraint::Length(from_w),
        Constraint::Min(subject_w),
    ];
    let mut header_cells = vec![
        " ".to_string(),
        "Date".to_string(),
        "From".to_string(),
        "Subject".to_string(),
    ];
    if show_folder {
        constraints.push(Constraint::Length(folder_w));
        header_cells.push("Folder".to_string());
    }
    constraints.push(Constraint::Length(att_w));
    header_cells.push(String::new());

    let header = Row::new(header_cells).style(app.theme.list_header);

    let selected_row = app.selected_row();
    let start = app.list_scroll_offset;

    let rows: Vec<Row> = app
        .mailbox
        .visible_messages()
        .enumerate()
        .skip(start)
        .take(viewport_height)
        .map(|(row, (_, message))| {
            let is_selected = selected_row == Some(row);

            let mark = if message.is_important { "!" } else { " " };
            let date = message.date_sent.format(&app.date_format).to_string();
            let from = truncate_str(&message.sender, from_w as usize);
            let subject = truncate_str(&message.subject, subject_w as usize);
            let att = if message.attachments.is_empty() { " " } else { "@" };

            let style = if is_selected {
                app.theme.list_selected
            } else if message.is_important {
                app.theme.list_important
            } else {
                app.theme.list_normal
            };

            let mut cells = vec![mark.to_string(), date, from, subject];
            if show_folder {
                cells.push(message.folder.to_string());
            }
            cells.push(att.to_string());
            Row::new(cells).style(style)
        })
        .collect();

    let empty = rows.is_empty();
    let table = Table::new(rows, constraints)
        .header(header)
        .column_spacing(1);
    frame.render_widget(table, inner);

    if empty && inner.height > 2 {
        let hint = if app.mailbox.filter().has_query() {
            "  No messages match the search"
        } else {
            "  No messages"
        };
        let area = Rect::new(inner.x, inner.y + 1, inner.width, 1);
        frame.render_widget(
            ratatui::widgets::Paragraph::new(hint).style(app.theme.help_dim),
            area,
        );
    }
}

/// Truncate a string to fit within `max_width` columns, adding "..." if needed.
pub(crate) fn truncate_str(s: &str, max_width: usize) -> String {
    let width = UnicodeWidthStr::width(s);
    if width <= max_width {
        s.to_string()
    } else if max_width <= 3 {
        s.chars().take(max_width).collect()
    } else {
        let mut result = String::new();
        let mut current_width = 0;
        for ch in s.chars() {
            let ch_width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
            if current_width + ch_width + 3 > max_width {
                break;
            }
            result.push(ch);
            current_width += ch_width;
        }
        result.push_str("...");
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("Inbox", 10), "Inbox");
        assert_eq!(truncate_str("Quarterly Earnings Report", 12), "Quarterly...");
        assert_eq!(truncate_str("abcdef", 2), "ab");
    }
}
