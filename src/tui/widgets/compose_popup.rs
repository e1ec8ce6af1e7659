//! Compose popup: new message or draft edit form.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::tui::app::{App, ComposeInput, ComposeMode};

/// Render the compose popup centered on screen.
pub fn render(frame: &mut Frame, app: &App) {
    let Some(compose) = &app.compose else {
        return;
    };
    let theme = &app.theme;
    let area = centered_rect(70, 70, frame.area());

    frame.render_widget(Clear, area);

    let target = match &compose.mode {
        ComposeMode::New { context } => format!("{} ", context.sibling(crate::model::BaseName::Sent)),
        ComposeMode::EditDraft(id) => format!("{id} "),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.popup_title)
        .title(compose.title())
        .title_bottom(Line::from(Span::styled(format!(" -> {target}"), theme.help_dim)))
        .style(theme.popup);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();
    for input in ComposeInput::ALL {
        let is_active = input == compose.active;
        let label_style = if is_active {
            theme.search_prompt
        } else {
            theme.message_header_label
        };
        let cursor = if is_active { "_" } else { "" };

        match input {
            ComposeInput::Body => {
                lines.push(Line::from(Span::styled(format!(" {:<9}", input.label()), label_style)));
                for body_line in compose.fields.content.split('\n') {
                    lines.push(Line::from(Span::styled(
                        format!("   {body_line}"),
                        theme.message_body,
                    )));
                }
                if is_active {
                    if let Some(last) = lines.last_mut() {
                        last.spans.push(Span::styled(cursor, theme.search_prompt));
                    }
                }
            }
            _ => {
                let value = match input {
                    ComposeInput::Sender => compose.fields.sender.as_str(),
                    ComposeInput::Recipients => compose.fields.recipients.as_str(),
                    ComposeInput::Subject => compose.fields.subject.as_str(),
                    _ => compose.attach_input.as_str(),
                };
                lines.push(Line::from(vec![
                    Span::styled(format!(" {:<9}", input.label()), label_style),
                    Span::styled(value.to_string(), theme.message_header_value),
                    Span::styled(cursor, theme.search_prompt),
                ]));
            }
        }
    }

    if !compose.fields.attachments.is_empty() {
        lines.push(Line::from(""));
        for att in compose.fields.attachments.iter() {
            lines.push(Line::from(Span::styled(format!("   @ {att}"), theme.attachment)));
        }
    }

    if let Some(err) = &compose.error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(" {err}"),
            theme.status_error,
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " Tab:Next field  Enter:Next/Add attachment  Ctrl-S:Send  Ctrl-D:Save draft  Esc:Cancel",
        theme.help_dim,
    )));

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, inner);
}

/// Calculate a centered rectangle.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let width = area.width * percent_x / 100;
    let height = area.height * percent_y / 100;
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
