//! Global application state for the TUI (the "Model" in Elm architecture).
//!
//! The engine state lives in [`Mailbox`]; `App` only keeps what the screen
//! needs on top of it (focus, scroll offsets, popups, the compose form).
//! Change events from the engine are queued by a listener and applied in
//! [`App::tick`].

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Instant;

use crate::command::compose::{ComposeFields, PathListSource, ValidationError};
use crate::command::{DeleteOutcome, Mailbox, NewMessage};
use crate::config::Config;
use crate::events::ChangeEvent;
use crate::model::{BaseName, FolderKey, Message, MessageId};
use crate::search::{FilterMode, OptionFilter, SearchCategory};
use crate::selection::CommandAvailability;
use crate::tui::theme::Theme;

/// Which panel currently has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelFocus {
    Sidebar,
    MailList,
    MailView,
    SearchBar,
    Compose,
}

/// One row of the folder sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarEntry {
    /// Mailbox heading, e.g. "Mailbox 1".
    Mailbox(String),
    Folder(FolderKey),
}

/// What the compose popup will do with its fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposeMode {
    /// New message created relative to this folder's mailbox.
    New { context: FolderKey },
    /// Editing an existing draft in place.
    EditDraft(MessageId),
}

/// Input row of the compose form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposeInput {
    Sender,
    Recipients,
    Subject,
    Body,
    Attach,
}

impl ComposeInput {
    pub const ALL: [ComposeInput; 5] = [
        ComposeInput::Sender,
        ComposeInput::Recipients,
        ComposeInput::Subject,
        ComposeInput::Body,
        ComposeInput::Attach,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Sender => "From",
            Self::Recipients => "To",
            Self::Subject => "Subject",
            Self::Body => "Body",
            Self::Attach => "Attach",
        }
    }

    pub fn next(self) -> Self {
        let pos = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(pos + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let pos = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(pos + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// State of the open compose popup.
#[derive(Debug, Clone)]
pub struct ComposeState {
    pub mode: ComposeMode,
    pub fields: ComposeFields,
    pub active: ComposeInput,
    /// Comma-separated paths typed in the Attach row, not yet added.
    pub attach_input: String,
    /// Last validation failure, shown inline.
    pub error: Option<ValidationError>,
}

impl ComposeState {
    fn new_message(context: FolderKey, sender: Option<&str>) -> Self {
        let fields = ComposeFields {
            sender: sender.unwrap_or_default().to_string(),
            ..ComposeFields::default()
        };
        Self {
            mode: ComposeMode::New { context },
            active: if fields.sender.is_empty() {
                ComposeInput::Sender
            } else {
                ComposeInput::Recipients
            },
            fields,
            attach_input: String::new(),
            error: None,
        }
    }

    fn edit(id: MessageId, message: &Message) -> Self {
        Self {
            mode: ComposeMode::EditDraft(id),
            fields: ComposeFields {
                sender: message.sender.clone(),
                recipients: message.recipients_display(),
                subject: message.subject.clone(),
                content: message.content.clone(),
                attachments: message.attachments.clone(),
            },
            active: ComposeInput::Body,
            attach_input: String::new(),
            error: None,
        }
    }

    /// Mutable text of the active input row.
    pub fn active_text(&mut self) -> &mut String {
        match self.active {
            ComposeInput::Sender => &mut self.fields.sender,
            ComposeInput::Recipients => &mut self.fields.recipients,
            ComposeInput::Subject => &mut self.fields.subject,
            ComposeInput::Body => &mut self.fields.content,
            ComposeInput::Attach => &mut self.attach_input,
        }
    }

    /// Move the typed Attach paths into the attachment list.
    pub fn commit_attachments(&mut self) -> usize {
        let mut source = PathListSource(std::mem::take(&mut self.attach_input));
        self.fields.attach_from(&mut source)
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            ComposeMode::New { .. } => " New message ",
            ComposeMode::EditDraft(_) => " Edit draft ",
        }
    }
}

/// Complete TUI state.
pub struct App {
    // ── Engine ────────────────────────────────
    pub mailbox: Mailbox,
    /// Events raised by the engine since the last tick.
    pending: Rc<RefCell<VecDeque<ChangeEvent>>>,
    /// Guard values as last announced by the engine.
    pub guards: CommandAvailability,

    // ── Navigation ────────────────────────────
    /// Scroll offset for the list widget.
    pub list_scroll_offset: usize,
    /// Scroll offset for the message view widget.
    pub message_scroll_offset: usize,

    // ── UI state ──────────────────────────────
    pub focus: PanelFocus,
    pub theme: Theme,
    pub date_format: String,
    pub show_help: bool,
    pub show_preview: bool,
    pub default_sender: Option<String>,

    // ── Sidebar ───────────────────────────────
    pub show_sidebar: bool,
    pub sidebar_entries: Vec<SidebarEntry>,
    pub sidebar_selected: usize,

    // ── Search ────────────────────────────────
    /// Is the search bar active (accepting input)?
    pub search_active: bool,
    pub search_input: String,
    pub search_category: SearchCategory,

    // ── Compose ───────────────────────────────
    pub compose: Option<ComposeState>,

    // ── Lifecycle ─────────────────────────────
    pub should_quit: bool,
    /// Transient status message, whether it is an error, and when it was set.
    pub status_message: Option<(String, bool, Instant)>,

    /// Cached viewport height for the list (set during render).
    pub list_viewport_height: usize,
    /// Cached viewport height for the message view (set during render).
    pub message_view_height: usize,
}

impl App {
    /// Wrap `mailbox` for display and subscribe to its change events.
    pub fn new(mut mailbox: Mailbox, config: &Config) -> anyhow::Result<Self> {
        let pending = Rc::new(RefCell::new(VecDeque::new()));
        let queue = Rc::clone(&pending);
        mailbox.subscribe(move |event| queue.borrow_mut().push_back(*event))?;

        let guards = mailbox.availability();
        let mut app = Self {
            mailbox,
            pending,
            guards,
            list_scroll_offset: 0,
            message_scroll_offset: 0,
            focus: PanelFocus::MailList,
            theme: Theme::from_name(&config.display.theme),
            date_format: config.general.checked_date_format(),
            show_help: false,
            show_preview: config.display.show_preview,
            default_sender: config.compose.default_sender.clone(),
            show_sidebar: config.display.show_sidebar,
            sidebar_entries: Vec::new(),
            sidebar_selected: 0,
            search_active: false,
            search_input: String::new(),
            search_category: SearchCategory::default(),
            compose: None,
            should_quit: false,
            status_message: None,
            list_viewport_height: 20,
            message_view_height: 20,
        };
        app.rebuild_sidebar();
        app.sync_sidebar_to_folder();
        Ok(app)
    }

    /// Number of currently visible messages.
    pub fn visible_count(&self) -> usize {
        self.mailbox.visible().len()
    }

    /// Row of the selected message within the visible subset.
    pub fn selected_row(&self) -> Option<usize> {
        let id = self.mailbox.selection()?;
        self.mailbox.visible().iter().position(|&v| v == id)
    }

    /// Move the selection by `delta` rows. With nothing selected, the
    /// first row (or last, going up) is selected.
    pub fn move_selection(&mut self, delta: isize) {
        let count = self.visible_count();
        if count == 0 {
            return;
        }
        let target = match self.selected_row() {
            Some(row) => row.saturating_add_signed(delta).min(count - 1),
            None if delta < 0 => count - 1,
            None => 0,
        };
        self.select_row(target);
    }

    /// Select the message at visible row `row`.
    pub fn select_row(&mut self, row: usize) {
        if let Some(&id) = self.mailbox.visible().get(row) {
            self.mailbox.select(Some(id));
        }
    }

    // ── Folder / filter ───────────────────────

    /// Open the folder under the sidebar cursor.
    pub fn open_sidebar_folder(&mut self) {
        if let Some(SidebarEntry::Folder(key)) = self.sidebar_entries.get(self.sidebar_selected) {
            let key = key.clone();
            self.set_status(&format!("Folder {key}"));
            self.mailbox.show_folder(key);
            self.search_input.clear();
            self.list_scroll_offset = 0;
        }
    }

    /// Step the sidebar cursor, skipping mailbox headings.
    pub fn move_sidebar(&mut self, forward: bool) {
        let mut idx = self.sidebar_selected;
        loop {
            idx = if forward {
                idx + 1
            } else if idx == 0 {
                return;
            } else {
                idx - 1
            };
            match self.sidebar_entries.get(idx) {
                None => return,
                Some(SidebarEntry::Folder(_)) => {
                    self.sidebar_selected = idx;
                    return;
                }
                Some(_) => {}
            }
        }
    }

    /// Cycle the option filter: folder view → All → Unread → Important → All.
    pub fn cycle_option(&mut self) {
        let next = match self.mailbox.filter().mode {
            FilterMode::Option(current) => current.next(),
            FilterMode::FolderSearch => OptionFilter::All,
        };
        self.mailbox.filter_by_option(next);
        self.list_scroll_offset = 0;
        let count = self.visible_count();
        self.set_status(&format!("Filter {next}: {count} message(s)"));
    }

    /// Leave option mode and show the current folder again.
    pub fn back_to_folder(&mut self) {
        let folder = self.mailbox.current_folder().clone();
        self.mailbox.show_folder(folder);
        self.search_input.clear();
        self.list_scroll_offset = 0;
    }

    // ── Search ────────────────────────────────

    pub fn start_search(&mut self) {
        self.search_active = true;
        self.search_input = self.mailbox.filter().search_query.clone();
        self.focus = PanelFocus::SearchBar;
        self.run_search();
    }

    /// Re-run the search with the current input.
    pub fn run_search(&mut self) {
        self.mailbox.search(&self.search_input, self.search_category);
        self.list_scroll_offset = 0;
    }

    pub fn cycle_search_category(&mut self) {
        self.search_category = self.search_category.next();
        self.run_search();
    }

    pub fn finish_search(&mut self) {
        self.search_active = false;
        self.focus = PanelFocus::MailList;
        let count = self.visible_count();
        if self.mailbox.filter().has_query() {
            self.set_status(&format!("{count} result(s)"));
        }
    }

    pub fn cancel_search(&mut self) {
        self.search_active = false;
        self.search_input.clear();
        self.mailbox.reset_search();
        self.focus = PanelFocus::MailList;
    }

    pub fn reset_search(&mut self) {
        self.search_input.clear();
        self.mailbox.reset_search();
        self.set_status("Search cleared");
    }

    // ── Commands ──────────────────────────────

    pub fn delete_selected(&mut self) {
        match self.mailbox.delete_selected() {
            Ok(DeleteOutcome::MovedToTrash(trash)) => {
                self.set_status(&format!("Moved to {trash}"));
            }
            Ok(DeleteOutcome::Purged(message)) => {
                self.set_status(&format!("Deleted \"{}\" permanently", message.subject));
            }
            Err(e) => self.set_error(&e.to_string()),
        }
    }

    pub fn toggle_important(&mut self) {
        if let Some(id) = self.mailbox.selection() {
            self.mailbox.toggle_important(id);
        }
    }

    pub fn quick_add(&mut self) {
        let id = self.mailbox.add_message(NewMessage::placeholder());
        let folder = self.mailbox.current_folder().clone();
        self.set_status(&format!("Added {id} to {folder}"));
    }

    pub fn open_compose(&mut self) {
        let context = self.compose_context();
        self.compose = Some(ComposeState::new_message(
            context,
            self.default_sender.as_deref(),
        ));
        self.focus = PanelFocus::Compose;
    }

    pub fn open_edit_draft(&mut self) {
        if !self.guards.can_edit_draft {
            self.set_error("Select a draft to edit");
            return;
        }
        let Some((id, message)) = self
            .mailbox
            .selection()
            .and_then(|id| self.mailbox.get(id).map(|m| (id, m)))
        else {
            return;
        };
        self.compose = Some(ComposeState::edit(id, message));
        self.focus = PanelFocus::Compose;
    }

    pub fn close_compose(&mut self) {
        self.compose = None;
        self.focus = PanelFocus::MailList;
    }

    /// Mailbox a new message belongs to: the current folder, or in option
    /// mode the selected message's folder.
    fn compose_context(&self) -> FolderKey {
        match self.mailbox.filter().mode {
            FilterMode::Option(_) => self
                .mailbox
                .selected_message()
                .map(|m| m.folder.clone())
                .unwrap_or_else(|| self.mailbox.current_folder().clone()),
            FilterMode::FolderSearch => self.mailbox.current_folder().clone(),
        }
    }

    /// Set a transient status message that auto-clears after a few seconds.
    pub fn set_status(&mut self, msg: &str) {
        self.status_message = Some((msg.to_string(), false, Instant::now()));
    }

    /// Like [`set_status`](Self::set_status) but rendered as an error.
    pub fn set_error(&mut self, msg: &str) {
        self.status_message = Some((msg.to_string(), true, Instant::now()));
    }

    /// Called every tick: applies engine events and clears expired status messages.
    pub fn tick(&mut self) {
        self.drain_events();
        if let Some((_, _, when)) = &self.status_message {
            if when.elapsed().as_secs() >= 5 {
                self.status_message = None;
            }
        }
    }

    /// Apply queued engine events to the view state.
    pub fn drain_events(&mut self) {
        let events: Vec<ChangeEvent> = self.pending.borrow_mut().drain(..).collect();
        for event in events {
            match event {
                ChangeEvent::StoreChanged => self.rebuild_sidebar(),
                ChangeEvent::VisibleSubsetChanged => {
                    let max = self.visible_count().saturating_sub(1);
                    self.list_scroll_offset = self.list_scroll_offset.min(max);
                    self.sync_sidebar_to_folder();
                }
                ChangeEvent::SelectionChanged(_) => {
                    self.message_scroll_offset = 0;
                    self.ensure_selected_visible();
                }
                ChangeEvent::CommandAvailabilityChanged(guards) => self.guards = guards,
            }
        }
    }

    /// Rebuild sidebar rows from the store's mailboxes.
    fn rebuild_sidebar(&mut self) {
        let mut entries = Vec::new();
        for index in self.mailbox.store().mailbox_indices() {
            entries.push(SidebarEntry::Mailbox(format!("Mailbox {index}")));
            for key in FolderKey::mailbox_folders(&index) {
                entries.push(SidebarEntry::Folder(key));
            }
        }
        self.sidebar_entries = entries;
        if self.sidebar_selected >= self.sidebar_entries.len() {
            self.sidebar_selected = 0;
        }
        self.sync_sidebar_to_folder();
    }

    /// Point the sidebar cursor at the current folder.
    fn sync_sidebar_to_folder(&mut self) {
        let current = self.mailbox.current_folder();
        if let Some(pos) = self
            .sidebar_entries
            .iter()
            .position(|e| matches!(e, SidebarEntry::Folder(k) if k == current))
        {
            self.sidebar_selected = pos;
        }
    }

    /// Ensure the selected row is visible given the current scroll offset.
    pub fn ensure_selected_visible(&mut self) {
        let Some(row) = self.selected_row() else {
            return;
        };
        let vp = self.list_viewport_height.max(1);
        if row < self.list_scroll_offset {
            self.list_scroll_offset = row;
        } else if row >= self.list_scroll_offset + vp {
            self.list_scroll_offset = row.saturating_sub(vp - 1);
        }
    }

    /// Whether the current folder is a Drafts folder (for hints).
    pub fn in_drafts(&self) -> bool {
        self.mailbox.filter().mode == FilterMode::FolderSearch
            && self.mailbox.current_folder().is(BaseName::Drafts)
    }
}
