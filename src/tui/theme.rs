//! Color theme definitions for the TUI.

use ratatui::style::{Color, Modifier, Style};

/// A complete color theme for the TUI.
pub struct Theme {
    pub header_bar: Style,
    pub status_bar: Style,
    pub status_error: Style,
    pub list_selected: Style,
    pub list_important: Style,
    pub list_header: Style,
    pub list_normal: Style,
    pub sidebar: Style,
    pub sidebar_selected: Style,
    pub sidebar_mailbox: Style,
    pub message_header_label: Style,
    pub message_header_value: Style,
    pub message_body: Style,
    pub attachment: Style,
    pub border: Style,
    pub border_focused: Style,
    pub popup: Style,
    pub popup_title: Style,
    pub search_prompt: Style,
    pub help_dim: Style,
    pub help_section: Style,
}

impl Theme {
    /// Dark theme (default).
    pub fn dark() -> Self {
        Self {
            header_bar: Style::default()
                .fg(Color::Rgb(200, 200, 220))
                .bg(Color::Rgb(30, 30, 46)),
            status_bar: Style::default()
                .fg(Color::Rgb(150, 150, 170))
                .bg(Color::Rgb(30, 30, 46)),
            status_error: Style::default()
                .fg(Color::Rgb(255, 120, 120))
                .bg(Color::Rgb(30, 30, 46))
                .add_modifier(Modifier::BOLD),
            list_selected: Style::default()
                .fg(Color::White)
                .bg(Color::Rgb(60, 60, 100)),
            list_important: Style::default().fg(Color::Yellow),
            list_header: Style::default()
                .fg(Color::Rgb(180, 180, 200))
                .bg(Color::Rgb(40, 40, 60))
                .add_modifier(Modifier::BOLD),
            list_normal: Style::default().fg(Color::Rgb(200, 200, 220)),
            sidebar: Style::default().fg(Color::Rgb(180, 180, 200)),
            sidebar_selected: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            sidebar_mailbox: Style::default()
                .fg(Color::Rgb(130, 170, 255))
                .add_modifier(Modifier::BOLD),
            message_header_label: Style::default()
                .fg(Color::Rgb(130, 170, 255))
                .add_modifier(Modifier::BOLD),
            message_header_value: Style::default().fg(Color::Rgb(220, 220, 230)),
            message_body: Style::default().fg(Color::Rgb(220, 220, 230)),
            attachment: Style::default().fg(Color::Green),
            border: Style::default().fg(Color::Rgb(80, 80, 100)),
            border_focused: Style::default()
                .fg(Color::Rgb(130, 170, 255))
                .add_modifier(Modifier::BOLD),
            popup: Style::default()
                .fg(Color::Rgb(220, 220, 230))
                .bg(Color::Rgb(20, 20, 35)),
            popup_title: Style::default()
                .fg(Color::Rgb(130, 170, 255))
                .add_modifier(Modifier::BOLD),
            search_prompt: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            help_dim: Style::default().fg(Color::Rgb(120, 120, 140)),
            help_section: Style::default()
                .fg(Color::Rgb(130, 170, 255))
                .add_modifier(Modifier::BOLD),
        }
    }

    /// Light theme for bright terminals.
    pub fn light() -> Self {
        Self {
            header_bar: Style::default()
                .fg(Color::Rgb(30, 30, 40))
                .bg(Color::Rgb(220, 220, 235)),
            status_bar: Style::default()
                .fg(Color::Rgb(70, 70, 90))
                .bg(Color::Rgb(220, 220, 235)),
            status_error: Style::default()
                .fg(Color::Rgb(170, 20, 20))
                .bg(Color::Rgb(220, 220, 235))
                .add_modifier(Modifier::BOLD),
            list_selected: Style::default()
                .fg(Color::Black)
                .bg(Color::Rgb(180, 200, 250)),
            list_important: Style::default().fg(Color::Rgb(160, 90, 0)),
            list_header: Style::default()
                .fg(Color::Rgb(40, 40, 60))
                .bg(Color::Rgb(200, 200, 220))
                .add_modifier(Modifier::BOLD),
            list_normal: Style::default().fg(Color::Rgb(30, 30, 40)),
            sidebar: Style::default().fg(Color::Rgb(50, 50, 70)),
            sidebar_selected: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            sidebar_mailbox: Style::default()
                .fg(Color::Rgb(40, 70, 160))
                .add_modifier(Modifier::BOLD),
            message_header_label: Style::default()
                .fg(Color::Rgb(40, 70, 160))
                .add_modifier(Modifier::BOLD),
            message_header_value: Style::default().fg(Color::Rgb(30, 30, 40)),
            message_body: Style::default().fg(Color::Rgb(30, 30, 40)),
            attachment: Style::default().fg(Color::Rgb(0, 120, 0)),
            border: Style::default().fg(Color::Rgb(160, 160, 180)),
            border_focused: Style::default()
                .fg(Color::Rgb(40, 70, 160))
                .add_modifier(Modifier::BOLD),
            popup: Style::default()
                .fg(Color::Rgb(30, 30, 40))
                .bg(Color::Rgb(240, 240, 248)),
            popup_title: Style::default()
                .fg(Color::Rgb(40, 70, 160))
                .add_modifier(Modifier::BOLD),
            search_prompt: Style::default()
                .fg(Color::Rgb(150, 80, 0))
                .add_modifier(Modifier::BOLD),
            help_dim: Style::default().fg(Color::Rgb(120, 120, 140)),
            help_section: Style::default()
                .fg(Color::Rgb(40, 70, 160))
                .add_modifier(Modifier::BOLD),
        }
    }

    /// Theme by config name; anything other than "light" is dark.
    pub fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("light") {
            Self::light()
        } else {
            Self::dark()
        }
    }
}
