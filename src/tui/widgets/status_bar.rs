//! Bottom status bar showing transient messages or context-sensitive keyboard hints.

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::search::FilterMode;
use crate::tui::app::{App, PanelFocus};

/// Version string shown at the right edge of the status bar.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Render the status bar at the bottom with context-sensitive hints and version.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let version_text = format!("v{VERSION} ");
    let version_width = version_text.len() as u16;

    // Split: hints (flexible) | version (fixed)
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(version_width)])
        .split(area);

    let content = if let Some((msg, is_error, _)) = &app.status_message {
        let style = if *is_error {
            theme.status_error
        } else {
            theme.status_bar
        };
        Line::from(Span::styled(format!(" {msg}"), style))
    } else {
        let mut spans = Vec::new();
        for (i, (key, desc)) in build_hints(app).iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" ", theme.status_bar));
            }
            spans.push(Span::styled(format!(" {key}"), theme.search_prompt));
            spans.push(Span::styled(format!(":{desc}"), theme.status_bar));
        }
        Line::from(spans)
    };

    let bar = Paragraph::new(content).style(theme.status_bar);
    frame.render_widget(bar, chunks[0]);

    let version = Paragraph::new(Line::from(Span::styled(version_text, theme.border)))
        .alignment(Alignment::Right)
        .style(theme.status_bar);
    frame.render_widget(version, chunks[1]);
}

/// Return hint pairs (key, description) for the active panel.
///
/// Guarded commands only appear while their guard holds.
pub(crate) fn build_hints(app: &App) -> Vec<(&'static str, &'static str)> {
    let mut hints = Vec::new();

    match app.focus {
        PanelFocus::Sidebar => {
            hints.push(("j/k", "Move"));
            hints.push(("Enter", "Open folder"));
            hints.push(("f", "Filter"));
            hints.push(("c", "Compose"));
            hints.push(("Esc", "Back"));
        }
        PanelFocus::MailList | PanelFocus::MailView => {
            hints.push(("j/k", "Move"));
            hints.push(("/", "Search"));
            if app.mailbox.filter().has_query() {
                hints.push(("r", "Reset"));
            }
            hints.push(("f", "Filter"));
            if matches!(app.mailbox.filter().mode, FilterMode::Option(_)) {
                hints.push(("Esc", "Folder"));
            }
            if app.guards.can_delete {
                hints.push(("i", "Important"));
                hints.push(("d", "Delete"));
            }
            if app.guards.can_edit_draft {
                hints.push(("e", "Edit draft"));
            }
            hints.push(("c", "Compose"));
            hints.push(("A", "Quick add"));
        }
        PanelFocus::SearchBar => {
            hints.push(("Tab", "Category"));
            hints.push(("Enter", "Done"));
            hints.push(("Esc", "Cancel"));
            return hints;
        }
        PanelFocus::Compose => {
            hints.push(("Tab", "Next field"));
            hints.push(("Ctrl-S", "Send"));
            hints.push(("Ctrl-D", "Save draft"));
            hints.push(("Esc", "Cancel"));
            return hints;
        }
    }

    hints.push(("Tab", "Panel"));
    hints.push(("?", "Help"));
    hints.push(("q", "Quit"));
    hints
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Mailbox;
    use crate::config::Config;
    use crate::model::FolderKey;
    use crate::seed::{BuiltinSeed, SeedProvider};

    fn keys(app: &App) -> Vec<&'static str> {
        build_hints(app).into_iter().map(|(k, _)| k).collect()
    }

    #[test]
    fn test_hints_follow_guards() {
        let mailbox = Mailbox::with_messages(BuiltinSeed.load().unwrap(), FolderKey::new("Drafts2"));
        let mut app = App::new(mailbox, &Config::default()).unwrap();
        assert!(!keys(&app).contains(&"d"));

        app.move_selection(1);
        app.tick();
        let k = keys(&app);
        assert!(k.contains(&"d"));
        assert!(k.contains(&"e"));
    }
}
