//! Keyboard and input event handling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, ComposeInput, ComposeMode, PanelFocus};
use crate::command::compose::AddressValidator;
use crate::command::CommandError;
use crate::search::FilterMode;

/// Process a key event and update the application state.
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> anyhow::Result<()> {
    // ── Compose popup (captures all keys) ─────────────────
    if app.compose.is_some() {
        return handle_compose_input(app, key);
    }

    // ── Search bar input mode (captures all keys) ─────────
    if app.search_active {
        return handle_search_input(app, key);
    }

    if app.show_help {
        match key.code {
            KeyCode::Esc | KeyCode::Char('?') => app.show_help = false,
            _ => {}
        }
        return Ok(());
    }

    // ── Always-available shortcuts ────────────────────────
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => {
            app.should_quit = true;
            return Ok(());
        }
        (_, KeyCode::Char('?')) => {
            app.show_help = true;
            return Ok(());
        }
        (_, KeyCode::Tab) => {
            app.focus = next_focus(app, true);
            return Ok(());
        }
        (_, KeyCode::BackTab) => {
            app.focus = next_focus(app, false);
            return Ok(());
        }
        (_, KeyCode::Char('/')) => {
            app.start_search();
            return Ok(());
        }
        (_, KeyCode::Char('L')) => {
            handle_sidebar_toggle(app);
            return Ok(());
        }
        (_, KeyCode::Char('p')) => {
            app.show_preview = !app.show_preview;
            if !app.show_preview && app.focus == PanelFocus::MailView {
                app.focus = PanelFocus::MailList;
            }
            return Ok(());
        }
        (_, KeyCode::Char('q')) => {
            app.should_quit = true;
            return Ok(());
        }
        _ => {}
    }

    // ── Panel-specific shortcuts ──────────────────────────
    match app.focus {
        PanelFocus::Sidebar => handle_sidebar_keys(app, key),
        PanelFocus::MailList => handle_mail_list_keys(app, key),
        PanelFocus::MailView => handle_mail_view_keys(app, key),
        PanelFocus::SearchBar | PanelFocus::Compose => Ok(()),
    }
}

/// Cycle focus to the next (or previous) panel.
fn next_focus(app: &App, forward: bool) -> PanelFocus {
    let panels: Vec<PanelFocus> = [
        (app.show_sidebar, PanelFocus::Sidebar),
        (true, PanelFocus::MailList),
        (app.show_preview, PanelFocus::MailView),
    ]
    .into_iter()
    .filter_map(|(shown, p)| shown.then_some(p))
    .collect();

    let pos = panels.iter().position(|p| *p == app.focus).unwrap_or(0);
    let next = if forward {
        (pos + 1) % panels.len()
    } else {
        (pos + panels.len() - 1) % panels.len()
    };
    panels[next]
}

/// Handle the L key: toggle sidebar visibility and focus.
fn handle_sidebar_toggle(app: &mut App) {
    if !app.show_sidebar {
        app.show_sidebar = true;
        app.focus = PanelFocus::Sidebar;
    } else if app.focus == PanelFocus::Sidebar {
        app.show_sidebar = false;
        app.focus = PanelFocus::MailList;
    } else {
        app.focus = PanelFocus::Sidebar;
    }
}

/// Key handling when the mail list panel has focus.
fn handle_mail_list_keys(app: &mut App, key: KeyEvent) -> anyhow::Result<()> {
    match key.code {
        // ── Navigation ───────────────────────────────────────
        KeyCode::Char('j') | KeyCode::Down => app.move_selection(1),
        KeyCode::Char('k') | KeyCode::Up => app.move_selection(-1),
        KeyCode::Char('g') | KeyCode::Home => app.select_row(0),
        KeyCode::Char('G') | KeyCode::End => {
            let last = app.visible_count().saturating_sub(1);
            app.select_row(last);
        }
        KeyCode::PageDown => {
            let page = app.list_viewport_height.max(1) as isize;
            app.move_selection(page);
        }
        KeyCode::PageUp => {
            let page = app.list_viewport_height.max(1) as isize;
            app.move_selection(-page);
        }
        KeyCode::Enter => {
            if app.selected_row().is_none() {
                app.move_selection(1);
            }
            app.show_preview = true;
            app.focus = PanelFocus::MailView;
        }
        KeyCode::Esc => {
            if matches!(app.mailbox.filter().mode, FilterMode::Option(_)) {
                app.back_to_folder();
            } else {
                app.mailbox.select(None);
            }
        }

        // ── Filters ──────────────────────────────────────────
        KeyCode::Char('r') => app.reset_search(),
        KeyCode::Char('f') => app.cycle_option(),

        // ── Commands ─────────────────────────────────────────
        KeyCode::Char('i') => app.toggle_important(),
        KeyCode::Char('d') | KeyCode::Delete => app.delete_selected(),
        KeyCode::Char('c') => app.open_compose(),
        KeyCode::Char('e') => app.open_edit_draft(),
        KeyCode::Char('A') => app.quick_add(),

        _ => {}
    }
    Ok(())
}

/// Key handling when the message view panel has focus.
fn handle_mail_view_keys(app: &mut App, key: KeyEvent) -> anyhow::Result<()> {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            app.message_scroll_offset += 1;
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.message_scroll_offset = app.message_scroll_offset.saturating_sub(1);
        }
        KeyCode::PageDown => {
            let page = app.message_view_height.max(1);
            app.message_scroll_offset += page;
        }
        KeyCode::PageUp => {
            let page = app.message_view_height.max(1);
            app.message_scroll_offset = app.message_scroll_offset.saturating_sub(page);
        }
        KeyCode::Char('g') | KeyCode::Home => {
            app.message_scroll_offset = 0;
        }
        KeyCode::Esc => {
            app.focus = PanelFocus::MailList;
        }
        KeyCode::Char('i') => app.toggle_important(),
        KeyCode::Char('d') | KeyCode::Delete => app.delete_selected(),
        KeyCode::Char('e') => app.open_edit_draft(),
        _ => {}
    }
    Ok(())
}

/// Key handling when the folder sidebar has focus.
fn handle_sidebar_keys(app: &mut App, key: KeyEvent) -> anyhow::Result<()> {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.move_sidebar(true),
        KeyCode::Char('k') | KeyCode::Up => app.move_sidebar(false),
        KeyCode::Enter => {
            app.open_sidebar_folder();
            app.focus = PanelFocus::MailList;
        }
        KeyCode::Esc => {
            app.focus = PanelFocus::MailList;
        }
        KeyCode::Char('f') => app.cycle_option(),
        KeyCode::Char('c') => app.open_compose(),
        _ => {}
    }
    Ok(())
}

/// Key handling while the search bar is active. Every keystroke re-runs
/// the search.
fn handle_search_input(app: &mut App, key: KeyEvent) -> anyhow::Result<()> {
    match key.code {
        KeyCode::Esc => app.cancel_search(),
        KeyCode::Enter => app.finish_search(),
        KeyCode::Tab => app.cycle_search_category(),
        KeyCode::Backspace => {
            app.search_input.pop();
            app.run_search();
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.search_input.push(c);
            app.run_search();
        }
        _ => {}
    }
    Ok(())
}

/// Key handling inside the compose popup.
fn handle_compose_input(app: &mut App, key: KeyEvent) -> anyhow::Result<()> {
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('s')) => {
            submit_compose(app, true);
            return Ok(());
        }
        (KeyModifiers::CONTROL, KeyCode::Char('d')) => {
            submit_compose(app, false);
            return Ok(());
        }
        (_, KeyCode::Esc) => {
            app.close_compose();
            app.set_status("Compose cancelled");
            return Ok(());
        }
        _ => {}
    }

    let Some(compose) = app.compose.as_mut() else {
        return Ok(());
    };
    match key.code {
        KeyCode::Tab => compose.active = compose.active.next(),
        KeyCode::BackTab => compose.active = compose.active.prev(),
        KeyCode::Up if compose.active != ComposeInput::Body => {
            compose.active = compose.active.prev();
        }
        KeyCode::Down if compose.active != ComposeInput::Body => {
            compose.active = compose.active.next();
        }
        KeyCode::Enter => match compose.active {
            ComposeInput::Body => compose.fields.content.push('\n'),
            ComposeInput::Attach => {
                let added = compose.commit_attachments();
                app.set_status(&format!("{added} attachment(s) added"));
            }
            _ => compose.active = compose.active.next(),
        },
        KeyCode::Backspace => {
            compose.active_text().pop();
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            compose.active_text().push(c);
        }
        _ => {}
    }
    Ok(())
}

/// Run the compose popup's send (`send = true`) or save action.
///
/// On success the popup closes; on failure it stays open with the error
/// shown and the offending field focused.
fn submit_compose(app: &mut App, send: bool) {
    let Some(mut compose) = app.compose.take() else {
        return;
    };
    if !compose.attach_input.trim().is_empty() {
        compose.commit_attachments();
    }

    let validator = AddressValidator;
    let result: Result<String, CommandError> = match (&compose.mode, send) {
        (ComposeMode::New { context }, true) => app
            .mailbox
            .compose_send(context, &compose.fields, &validator)
            .map(|_| "Message sent".to_string())
            .map_err(CommandError::from),
        (ComposeMode::New { context }, false) => app
            .mailbox
            .compose_save_draft(context, &compose.fields, &validator)
            .map(|_| "Draft saved".to_string())
            .map_err(CommandError::from),
        (ComposeMode::EditDraft(_), true) => app
            .mailbox
            .send_draft(&compose.fields, &validator)
            .map(|sent| format!("Draft sent to {sent}")),
        (ComposeMode::EditDraft(_), false) => app
            .mailbox
            .edit_draft(&compose.fields)
            .map(|_| "Draft updated".to_string())
            .map_err(CommandError::from),
    };

    match result {
        Ok(msg) => {
            app.focus = PanelFocus::MailList;
            app.set_status(&msg);
        }
        Err(CommandError::Validation(e)) => {
            compose.active = match e.field() {
                crate::command::compose::Field::Sender => ComposeInput::Sender,
                crate::command::compose::Field::Recipients => ComposeInput::Recipients,
                crate::command::compose::Field::Subject => ComposeInput::Subject,
                crate::command::compose::Field::Draft => compose.active,
            };
            app.set_error(&e.to_string());
            compose.error = Some(e);
            app.compose = Some(compose);
        }
        Err(CommandError::Guard(e)) => {
            app.focus = PanelFocus::MailList;
            app.set_error(&e.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Mailbox;
    use crate::config::Config;
    use crate::model::FolderKey;
    use crate::seed::{BuiltinSeed, SeedProvider};

    fn app_at(folder: &str) -> App {
        let messages = BuiltinSeed.load().unwrap();
        let mailbox = Mailbox::with_messages(messages, FolderKey::new(folder));
        App::new(mailbox, &Config::default()).unwrap()
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE)).unwrap();
        app.tick();
    }

    fn ctrl(app: &mut App, c: char) {
        handle_key_event(app, KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)).unwrap();
        app.tick();
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_live_search_and_category_cycle() {
        let mut app = app_at("Inbox1");
        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "hr@");
        // Subject search finds nothing
        assert_eq!(app.visible_count(), 0);
        press(&mut app, KeyCode::Tab);
        // Sender search
        assert_eq!(app.visible_count(), 1);
        press(&mut app, KeyCode::Enter);
        assert!(!app.search_active);
        assert_eq!(app.visible_count(), 1);
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.visible_count(), 3);
    }

    #[test]
    fn test_edit_key_refused_outside_drafts() {
        let mut app = app_at("Inbox1");
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('e'));
        assert!(app.compose.is_none());
        assert!(app.status_message.as_ref().is_some_and(|(_, err, _)| *err));
    }

    #[test]
    fn test_compose_send_flow() {
        let mut app = app_at("Sent1");
        let before = app.visible_count();
        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.focus, PanelFocus::Compose);
        type_text(&mut app, "me@company.com");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "a@company.com, b@company.com");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "Status");
        ctrl(&mut app, 's');
        assert!(app.compose.is_none());
        assert_eq!(app.visible_count(), before + 1);
    }

    #[test]
    fn test_compose_validation_keeps_popup() {
        let mut app = app_at("Inbox1");
        press(&mut app, KeyCode::Char('c'));
        type_text(&mut app, "me@company.com");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "nobody");
        ctrl(&mut app, 's');
        let compose = app.compose.as_ref().unwrap();
        assert_eq!(compose.active, ComposeInput::Recipients);
        assert!(compose.error.is_some());
    }

    #[test]
    fn test_edit_and_send_draft() {
        let mut app = app_at("Drafts1");
        press(&mut app, KeyCode::Char('j'));
        assert!(app.guards.can_edit_draft);
        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.focus, PanelFocus::Compose);
        ctrl(&mut app, 's');
        assert!(app.compose.is_none());
        assert_eq!(app.visible_count(), 1);
        assert!(!app.guards.can_edit_draft);
    }

    #[test]
    fn test_delete_key_in_trash_purges() {
        let mut app = app_at("Trash1");
        let total = app.mailbox.store().len();
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.mailbox.store().len(), total - 1);
        assert_eq!(app.visible_count(), 1);
    }
}
