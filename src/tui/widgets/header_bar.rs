//! Top header bar showing the active view and message counts.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::search::FilterMode;
use crate::tui::app::App;

/// Render the top header bar.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let filter = app.mailbox.filter();

    let view = match filter.mode {
        FilterMode::FolderSearch => format!("folder {}", filter.current_folder),
        FilterMode::Option(option) => format!("filter {option}"),
    };
    let total = app.mailbox.store().len();
    let visible = app.visible_count();

    let mut spans = vec![
        Span::styled(" mailtriage", theme.header_bar),
        Span::styled(format!(" | {view}"), theme.header_bar),
        Span::styled(format!(" | {visible} / {total} messages"), theme.header_bar),
    ];

    if filter.has_query() && !app.search_active {
        let category = filter
            .search_category
            .map(|c| c.as_str())
            .unwrap_or("none");
        spans.push(Span::styled(
            format!(" | {category}: \"{}\"", filter.search_query),
            theme.header_bar,
        ));
    }

    // Right-aligned help hint
    let left_len: usize = spans.iter().map(|s| s.content.len()).sum();
    let right_text = " [?] Help ";
    let width = area.width as usize;
    if width > left_len + right_text.len() {
        spans.push(Span::styled(
            " ".repeat(width - left_len - right_text.len()),
            theme.header_bar,
        ));
    }
    spans.push(Span::styled(right_text, theme.header_bar));

    let bar = Paragraph::new(Line::from(spans)).style(theme.header_bar);
    frame.render_widget(bar, area);
}
