//! Command layer: the mailbox engine the views drive.
//!
//! [`Mailbox`] owns the store, the filter state, the derived visible subset
//! and the selection. Every operation runs to completion synchronously and
//! publishes [`ChangeEvent`]s to registered listeners.
//!
//! Folder lifecycle per message:
//!
//! ```text
//! Inbox/Sent/Drafts --delete--> Trash --delete--> (purged)
//! Drafts --send--> Sent        Drafts --save--> Drafts
//! ```
//!
//! Nothing moves a message into an Inbox; those only come from the seed.

pub mod compose;

use chrono::Utc;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::events::{ChangeEvent, EventBus, ListenerId};
use crate::model::{AttachmentList, BaseName, FolderKey, Message, MessageId};
use crate::search::{self, FilterMode, FilterState, OptionFilter, SearchCategory};
use crate::selection::{CommandAvailability, Selection};
use crate::store::MailboxStore;

use self::compose::{ComposeFields, FieldValidator, ValidationError};

/// A guarded command was invoked while its guard was false.
///
/// Commands refuse rather than act; state is untouched.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardViolation {
    #[error("No message selected")]
    NoSelection,

    #[error("Only messages in a Drafts folder can be edited")]
    NotADraft,
}

/// Failure of a command that both guards and validates.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error(transparent)]
    Guard(#[from] GuardViolation),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// What [`Mailbox::delete_selected`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Moved to the Trash folder of the same mailbox.
    MovedToTrash(FolderKey),
    /// Was already in Trash and is gone for good.
    Purged(Message),
}

/// Fields for a message created directly in the current folder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewMessage {
    pub sender: String,
    pub recipients: Vec<String>,
    pub subject: String,
    pub content: String,
    pub attachments: AttachmentList,
}

impl NewMessage {
    /// Canned message used by the quick-add command.
    pub fn placeholder() -> Self {
        Self {
            sender: "static@company.com".to_string(),
            recipients: vec!["recipient@example.com".to_string()],
            subject: "Static New Email".to_string(),
            content: "This is a statically added email message.".to_string(),
            attachments: AttachmentList::new(),
        }
    }
}

/// Mailbox state and filtering engine.
#[derive(Debug)]
pub struct Mailbox {
    store: MailboxStore,
    filter: FilterState,
    visible: Vec<MessageId>,
    selection: Selection,
    availability: CommandAvailability,
    events: EventBus,
}

impl Mailbox {
    /// Empty engine looking at `folder`.
    pub fn new(folder: FolderKey) -> Self {
        Self {
            store: MailboxStore::new(),
            filter: FilterState::new(folder),
            visible: Vec::new(),
            selection: Selection::default(),
            availability: CommandAvailability::default(),
            events: EventBus::new(),
        }
    }

    /// Engine seeded with `messages`, looking at `folder`.
    pub fn with_messages(messages: Vec<Message>, folder: FolderKey) -> Self {
        let mut mailbox = Self::new(folder);
        mailbox.seed_load(messages);
        mailbox
    }

    /// Replace all messages. Selection is cleared and the folder view rebuilt.
    pub fn seed_load(&mut self, messages: Vec<Message>) {
        self.store.seed_load(messages);
        self.events.emit(ChangeEvent::StoreChanged);
        self.set_selection(None);
        self.filter.search_query.clear();
        self.filter.mode = FilterMode::FolderSearch;
        self.recompute();
        info!(
            messages = self.store.len(),
            folder = %self.filter.current_folder,
            "Loaded messages"
        );
    }

    // ── Listeners ─────────────────────────────

    /// Register a change listener.
    pub fn subscribe(&mut self, listener: impl FnMut(&ChangeEvent) + 'static) -> Result<ListenerId> {
        self.events.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.events.unsubscribe(id)
    }

    // ── Read access ───────────────────────────

    pub fn store(&self) -> &MailboxStore {
        &self.store
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn current_folder(&self) -> &FolderKey {
        &self.filter.current_folder
    }

    /// Ids of the visible subset, in display order.
    pub fn visible(&self) -> &[MessageId] {
        &self.visible
    }

    /// The visible subset resolved against the store.
    pub fn visible_messages(&self) -> impl Iterator<Item = (MessageId, &Message)> {
        self.visible
            .iter()
            .filter_map(|&id| self.store.get(id).map(|m| (id, m)))
    }

    pub fn get(&self, id: MessageId) -> Option<&Message> {
        self.store.get(id)
    }

    pub fn selection(&self) -> Option<MessageId> {
        self.selection.get()
    }

    pub fn selected_message(&self) -> Option<&Message> {
        self.selection.get().and_then(|id| self.store.get(id))
    }

    pub fn availability(&self) -> CommandAvailability {
        self.availability
    }

    /// `CanDelete`: a message is selected.
    pub fn can_delete(&self) -> bool {
        self.availability.can_delete
    }

    /// `CanEditDraft`: the selected message is in a Drafts folder.
    pub fn can_edit_draft(&self) -> bool {
        self.availability.can_edit_draft
    }

    // ── Filter entry points ───────────────────

    /// Switch folders. Clears the search and returns to folder mode.
    pub fn show_folder(&mut self, folder: FolderKey) {
        debug!(%folder, "Showing folder");
        self.filter.current_folder = folder;
        self.filter.search_query.clear();
        self.filter.mode = FilterMode::FolderSearch;
        self.recompute();
    }

    /// Category search within the current folder.
    pub fn search(&mut self, query: &str, category: SearchCategory) {
        self.apply_search(query, Some(category));
    }

    /// Category search by display name. Unknown names skip the search step.
    pub fn search_named(&mut self, query: &str, category: &str) {
        let parsed = SearchCategory::parse(category);
        if parsed.is_none() {
            warn!(category, "Unknown search category, showing folder unfiltered");
        }
        self.apply_search(query, parsed);
    }

    /// Drop the query and show the whole current folder.
    pub fn reset_search(&mut self) {
        self.filter.search_query.clear();
        self.filter.search_category = Some(SearchCategory::default());
        self.filter.mode = FilterMode::FolderSearch;
        self.recompute();
    }

    /// Replace the visible subset with a store-wide option view.
    pub fn filter_by_option(&mut self, option: OptionFilter) {
        self.filter.option = option;
        self.filter.mode = FilterMode::Option(option);
        self.recompute();
    }

    /// Option filter by display name. Unknown names leave the view as is.
    pub fn filter_by_option_named(&mut self, name: &str) -> bool {
        match OptionFilter::parse(name) {
            Some(option) => {
                self.filter_by_option(option);
                true
            }
            None => {
                warn!(option = name, "Unknown option filter, view unchanged");
                self.events.emit(ChangeEvent::VisibleSubsetChanged);
                false
            }
        }
    }

    /// Re-derive the visible subset from the filter state.
    pub fn recompute(&mut self) {
        let ids = match self.filter.mode {
            FilterMode::FolderSearch => search::filter_by_category(
                &self.store,
                &self.filter.current_folder,
                &self.filter.search_query,
                self.filter.search_category,
            ),
            FilterMode::Option(option) => search::filter_by_option(&self.store, option),
        };
        debug!(mode = ?self.filter.mode, visible = ids.len(), "Recomputed visible subset");
        self.set_visible(ids);
    }

    fn apply_search(&mut self, query: &str, category: Option<SearchCategory>) {
        self.filter.search_query = query.to_string();
        self.filter.search_category = category;
        self.filter.mode = FilterMode::FolderSearch;
        self.recompute();
    }

    // ── Selection ─────────────────────────────

    /// Select a message (or nothing). Ids not in the store are refused.
    pub fn select(&mut self, id: Option<MessageId>) -> bool {
        if let Some(id) = id {
            if !self.store.contains(id) {
                warn!(%id, "Refusing to select a message that is not in the store");
                return false;
            }
        }
        self.set_selection(id);
        true
    }

    // ── Commands ──────────────────────────────

    /// Create a message in the current folder.
    ///
    /// It is appended to the visible subset when its folder is the current
    /// one, without a full recompute.
    pub fn add_message(&mut self, fields: NewMessage) -> MessageId {
        let folder = self.filter.current_folder.clone();
        let message = Message {
            sender: fields.sender,
            recipients: fields.recipients,
            subject: fields.subject,
            content: fields.content,
            is_important: false,
            attachments: fields.attachments,
            date_sent: Utc::now(),
            folder,
        };
        let id = self.insert_and_show(message);
        info!(%id, folder = %self.filter.current_folder, "Added message");
        id
    }

    /// Delete the selected message.
    ///
    /// Trash messages are purged; anything else moves to the Trash folder of
    /// its own mailbox. The selection is cleared either way.
    pub fn delete_selected(&mut self) -> std::result::Result<DeleteOutcome, GuardViolation> {
        let id = self.selection.get().ok_or(GuardViolation::NoSelection)?;
        let Some(message) = self.store.get(id) else {
            return Err(GuardViolation::NoSelection);
        };

        let outcome = if message.folder.is(BaseName::Trash) {
            let purged = self.purge(id).ok_or(GuardViolation::NoSelection)?;
            info!(%id, "Permanently deleted message");
            DeleteOutcome::Purged(purged)
        } else {
            let trash = message.folder.sibling(BaseName::Trash);
            self.store.mutate_folder(id, trash.clone());
            if self.filter.current_folder != trash {
                self.visible.retain(|&v| v != id);
            }
            info!(%id, folder = %trash, "Moved message to trash");
            DeleteOutcome::MovedToTrash(trash)
        };

        self.events.emit(ChangeEvent::StoreChanged);
        self.events.emit(ChangeEvent::VisibleSubsetChanged);
        self.set_selection(None);
        Ok(outcome)
    }

    /// Overwrite the selected draft's fields. No validation; the draft stays
    /// in its Drafts folder.
    pub fn edit_draft(&mut self, fields: &ComposeFields) -> std::result::Result<MessageId, GuardViolation> {
        let id = self.draft_selection()?;
        let recipients = fields.recipient_list();
        if let Some(message) = self.store.get_mut(id) {
            message.sender = fields.sender.trim().to_string();
            message.recipients = recipients;
            message.subject = fields.subject.trim().to_string();
            message.content = fields.content.clone();
            message.attachments = fields.attachments.clone();
        }
        info!(%id, "Saved draft edits");
        self.events.emit(ChangeEvent::StoreChanged);
        self.events.emit(ChangeEvent::VisibleSubsetChanged);
        Ok(id)
    }

    /// Validate and send the selected draft, moving it to the Sent folder of
    /// its mailbox.
    pub fn send_draft(
        &mut self,
        fields: &ComposeFields,
        validator: &dyn FieldValidator,
    ) -> std::result::Result<FolderKey, CommandError> {
        let id = self.draft_selection()?;
        let valid = validator.validate(&fields.sender, &fields.recipients, &fields.subject)?;

        let Some(message) = self.store.get_mut(id) else {
            return Err(GuardViolation::NoSelection.into());
        };
        message.sender = valid.sender;
        message.recipients = valid.recipients;
        message.subject = valid.subject;
        message.content = fields.content.clone();
        message.attachments = fields.attachments.clone();
        message.date_sent = Utc::now();
        let sent = message.folder.sibling(BaseName::Sent);
        self.store.mutate_folder(id, sent.clone());

        if self.filter.current_folder == sent {
            if !self.visible.contains(&id) {
                self.visible.push(id);
            }
        } else if self.filter.mode == FilterMode::FolderSearch {
            self.visible.retain(|&v| v != id);
        }
        info!(%id, folder = %sent, "Sent draft");

        self.events.emit(ChangeEvent::StoreChanged);
        self.events.emit(ChangeEvent::VisibleSubsetChanged);
        self.sync_selection_with_visible();
        self.refresh_availability();
        Ok(sent)
    }

    /// Validate and send a freshly composed message.
    ///
    /// It lands in the Sent folder of the mailbox `context` belongs to.
    pub fn compose_send(
        &mut self,
        context: &FolderKey,
        fields: &ComposeFields,
        validator: &dyn FieldValidator,
    ) -> std::result::Result<MessageId, ValidationError> {
        let valid = validator.validate(&fields.sender, &fields.recipients, &fields.subject)?;
        let message = Message {
            sender: valid.sender,
            recipients: valid.recipients,
            subject: valid.subject,
            content: fields.content.clone(),
            is_important: false,
            attachments: fields.attachments.clone(),
            date_sent: Utc::now(),
            folder: context.sibling(BaseName::Sent),
        };
        let id = self.insert_and_show(message);
        info!(%id, folder = %context.sibling(BaseName::Sent), "Sent new message");
        Ok(id)
    }

    /// Validate and store a freshly composed message as a draft.
    ///
    /// A completely empty form is rejected with [`ValidationError::EmptyDraft`].
    pub fn compose_save_draft(
        &mut self,
        context: &FolderKey,
        fields: &ComposeFields,
        validator: &dyn FieldValidator,
    ) -> std::result::Result<MessageId, ValidationError> {
        if fields.is_blank() {
            return Err(ValidationError::EmptyDraft);
        }
        let valid = validator.validate(&fields.sender, &fields.recipients, &fields.subject)?;
        let message = Message {
            sender: valid.sender,
            recipients: valid.recipients,
            subject: valid.subject,
            content: fields.content.clone(),
            is_important: false,
            attachments: fields.attachments.clone(),
            date_sent: Utc::now(),
            folder: context.sibling(BaseName::Drafts),
        };
        let id = self.insert_and_show(message);
        info!(%id, folder = %context.sibling(BaseName::Drafts), "Saved new draft");
        Ok(id)
    }

    /// Remove a message outright, whatever its folder. Absent ids are a no-op.
    ///
    /// A selection pointing at it is cleared.
    pub fn remove(&mut self, id: MessageId) -> Option<Message> {
        let removed = self.purge(id)?;
        info!(%id, "Removed message");
        self.events.emit(ChangeEvent::StoreChanged);
        self.events.emit(ChangeEvent::VisibleSubsetChanged);
        self.refresh_availability();
        Some(removed)
    }

    /// Flip a message's importance flag. Returns `false` if the id is unknown.
    ///
    /// Membership of the visible subset is not re-derived.
    pub fn toggle_important(&mut self, id: MessageId) -> bool {
        let Some(message) = self.store.get_mut(id) else {
            return false;
        };
        message.toggle_important();
        debug!(%id, important = message.is_important, "Toggled importance");
        self.events.emit(ChangeEvent::VisibleSubsetChanged);
        true
    }

    // ── Internals ─────────────────────────────

    fn draft_selection(&self) -> std::result::Result<MessageId, GuardViolation> {
        if !self.availability.can_delete {
            return Err(GuardViolation::NoSelection);
        }
        if !self.availability.can_edit_draft {
            return Err(GuardViolation::NotADraft);
        }
        self.selection.get().ok_or(GuardViolation::NoSelection)
    }

    fn insert_and_show(&mut self, message: Message) -> MessageId {
        let in_scope = message.folder == self.filter.current_folder;
        let id = self.store.add(message);
        if in_scope {
            self.visible.push(id);
        }
        self.events.emit(ChangeEvent::StoreChanged);
        self.events.emit(ChangeEvent::VisibleSubsetChanged);
        id
    }

    fn purge(&mut self, id: MessageId) -> Option<Message> {
        let removed = self.store.remove(id)?;
        self.visible.retain(|&v| v != id);
        if self.selection.clear_if(id) {
            self.events.emit(ChangeEvent::SelectionChanged(None));
        }
        Some(removed)
    }

    fn set_visible(&mut self, ids: Vec<MessageId>) {
        self.visible = ids;
        self.events.emit(ChangeEvent::VisibleSubsetChanged);
        self.sync_selection_with_visible();
    }

    /// A selection that fell out of the visible subset is dropped.
    fn sync_selection_with_visible(&mut self) {
        if let Some(id) = self.selection.get() {
            if !self.visible.contains(&id) {
                self.set_selection(None);
            }
        }
    }

    fn set_selection(&mut self, id: Option<MessageId>) {
        if self.selection.set(id) {
            self.events.emit(ChangeEvent::SelectionChanged(id));
        }
        self.refresh_availability();
    }

    fn refresh_availability(&mut self) {
        let next = CommandAvailability::evaluate(&self.selection, &self.store);
        if next != self.availability {
            self.availability = next;
            self.events
                .emit(ChangeEvent::CommandAvailabilityChanged(next));
        }
    }
}
