//! Mail view widget: displays the selected message.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::tui::app::{App, PanelFocus};

/// Render the message view panel.
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let is_focused = app.focus == PanelFocus::MailView;
    let border_style = if is_focused {
        app.theme.border_focused
    } else {
        app.theme.border
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(" Message ");

    let inner = block.inner(area);
    app.message_view_height = inner.height as usize;
    frame.render_widget(block, area);

    let theme = &app.theme;
    let Some(message) = app.mailbox.selected_message() else {
        let empty = Paragraph::new("  No message selected").style(theme.help_dim);
        frame.render_widget(empty, inner);
        return;
    };

    let mut lines: Vec<Line> = Vec::new();
    let header = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("{label:<9}"), theme.message_header_label),
            Span::styled(value, theme.message_header_value),
        ])
    };

    lines.push(header(
        "Date:",
        message.date_sent.format("%a, %d %b %Y %H:%M").to_string(),
    ));
    lines.push(header("From:", message.sender.clone()));
    lines.push(header("To:", message.recipients_display()));
    lines.push(header("Subject:", message.subject.clone()));
    let mut folder = message.folder.to_string();
    if message.is_important {
        folder.push_str("  [important]");
    }
    lines.push(header("Folder:", folder));

    let sep_width = inner.width as usize;
    lines.push(Line::from(Span::styled(
        "\u{2500}".repeat(sep_width),
        theme.border,
    )));
    lines.push(Line::from(""));

    if message.content.is_empty() {
        lines.push(Line::from(Span::styled("(no content)", theme.help_dim)));
    } else {
        for line in message.content.lines() {
            lines.push(Line::from(Span::styled(line.to_string(), theme.message_body)));
        }
    }

    if !message.attachments.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("[Attachments: {} file(s)]", message.attachments.len()),
            theme.attachment,
        )));
        for att in message.attachments.iter() {
            lines.push(Line::from(Span::styled(format!("  @ {att}"), theme.attachment)));
        }
    }

    // Apply scroll offset
    let total_lines = lines.len();
    let visible_height = inner.height as usize;
    let max_scroll = total_lines.saturating_sub(visible_height);
    let scroll = app.message_scroll_offset.min(max_scroll);

    let paragraph = Paragraph::new(lines)
        .scroll((scroll as u16, 0))
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, inner);
}
