//! Search bar widget that appears at the bottom when search is active.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::search::SearchCategory;
use crate::tui::app::App;

/// Render the search input bar with category selector and result counter.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let mut spans: Vec<Span<'static>> = vec![Span::styled(" /", theme.search_prompt)];
    for category in SearchCategory::ALL {
        let style = if category == app.search_category {
            theme.search_prompt
        } else {
            theme.help_dim
        };
        spans.push(Span::styled(format!(" [{category}]"), style));
    }
    spans.push(Span::styled(": ", theme.search_prompt));
    spans.push(Span::styled(app.search_input.clone(), theme.message_body));
    spans.push(Span::styled("_", theme.search_prompt)); // cursor indicator

    let visible = app.visible_count();
    let in_folder = app
        .mailbox
        .store()
        .iter()
        .filter(|(_, m)| &m.folder == app.mailbox.current_folder())
        .count();
    spans.push(Span::styled(
        format!(" ({visible} / {in_folder} in {})", app.mailbox.current_folder()),
        theme.help_dim,
    ));

    let bar = Paragraph::new(Line::from(spans)).style(theme.status_bar);
    frame.render_widget(bar, area);
}
