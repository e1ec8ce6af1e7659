//! Integration tests for the mailbox engine: folder naming, filtering,
//! guarded commands, the per-message lifecycle and change notifications.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{TimeZone, Utc};

use mailtriage::command::compose::{AddressValidator, ComposeFields, Field, ValidationError};
use mailtriage::command::{CommandError, DeleteOutcome, GuardViolation, Mailbox, NewMessage};
use mailtriage::events::{ChangeEvent, MAX_LISTENERS};
use mailtriage::model::{derive_sibling, AttachmentList, BaseName, FolderKey, Message, MessageId};
use mailtriage::search::{filter_by_category, filter_by_option, OptionFilter, SearchCategory};
use mailtriage::seed::{BuiltinSeed, SeedProvider};
use mailtriage::store::MailboxStore;
use mailtriage::error::TriageError;

fn message(sender: &str, subject: &str, folder: &str, important: bool) -> Message {
    Message {
        sender: sender.to_string(),
        recipients: vec!["someone@example.com".to_string()],
        subject: subject.to_string(),
        content: String::new(),
        is_important: important,
        attachments: AttachmentList::new(),
        date_sent: Utc.with_ymd_and_hms(2025, 4, 1, 0, 0, 0).unwrap(),
        folder: FolderKey::new(folder),
    }
}

fn demo(folder: &str) -> Mailbox {
    Mailbox::with_messages(BuiltinSeed.load().unwrap(), FolderKey::new(folder))
}

fn find(mailbox: &Mailbox, subject: &str) -> MessageId {
    mailbox
        .store()
        .iter()
        .find(|(_, m)| m.subject == subject)
        .map(|(id, _)| id)
        .unwrap_or_else(|| panic!("no message with subject '{subject}'"))
}

fn fields(sender: &str, recipients: &str, subject: &str) -> ComposeFields {
    ComposeFields {
        sender: sender.to_string(),
        recipients: recipients.to_string(),
        subject: subject.to_string(),
        content: "body".to_string(),
        attachments: AttachmentList::new(),
    }
}

// ─── Test 1: Sibling derivation keeps the mailbox index ─────────────

#[test]
fn test_derive_sibling_examples() {
    assert_eq!(derive_sibling(&FolderKey::new("Drafts2"), BaseName::Sent), "Sent2");
    assert_eq!(derive_sibling(&FolderKey::new("Inbox1"), BaseName::Trash), "Trash1");
}

// ─── Test 2: Mailbox index invariant across every transition ────────

#[test]
fn test_mailbox_index_invariant() {
    let mut mb = demo("Drafts2");
    let before: Vec<(MessageId, String)> = mb
        .store()
        .iter()
        .map(|(id, m)| (id, m.folder.mailbox_index().to_string()))
        .collect();

    // Send a draft
    let draft = find(&mb, "Brainstorming Session for New Project");
    mb.select(Some(draft));
    mb.send_draft(
        &fields("me@example.com", "colleague@example.com", "Brainstorming"),
        &AddressValidator,
    )
    .unwrap();

    // Save the other draft
    let todo = find(&mb, "Personal To-Do List");
    mb.select(Some(todo));
    mb.edit_draft(&fields("me@example.com", "me@example.com", "To-Do")).unwrap();

    // Delete messages from every other folder
    for folder in ["Inbox1", "Sent1", "Inbox2", "Sent2"] {
        mb.show_folder(FolderKey::new(folder));
        let id = mb.visible()[0];
        mb.select(Some(id));
        mb.delete_selected().unwrap();
    }

    for (id, index) in before {
        let m = mb.get(id).unwrap();
        assert_eq!(m.folder.mailbox_index(), index, "{id} changed mailbox");
    }
}

// ─── Test 3: Delete in Trash purges, elsewhere moves ────────────────

#[test]
fn test_delete_trash_purges_other_moves() {
    let mut mb = demo("Trash1");
    let total = mb.store().len();

    let spam = find(&mb, "Buy One Get One Free!");
    mb.select(Some(spam));
    assert!(matches!(mb.delete_selected(), Ok(DeleteOutcome::Purged(_))));
    assert_eq!(mb.store().len(), total - 1);
    assert!(mb.get(spam).is_none());

    mb.show_folder(FolderKey::new("Inbox1"));
    let report = find(&mb, "Quarterly Earnings Report");
    mb.select(Some(report));
    assert_eq!(
        mb.delete_selected(),
        Ok(DeleteOutcome::MovedToTrash(FolderKey::new("Trash1")))
    );
    assert_eq!(mb.store().len(), total - 1);
    assert_eq!(mb.get(report).unwrap().folder, "Trash1");
    assert!(!mb.visible().contains(&report));
}

// ─── Test 4: CanEditDraft iff a Drafts message is selected ──────────

#[test]
fn test_can_edit_draft_guard() {
    let mut mb = demo("Drafts1");
    assert!(!mb.can_edit_draft());
    assert!(!mb.can_delete());

    for folder in ["Inbox1", "Sent1", "Drafts1", "Trash1", "Drafts2"] {
        mb.show_folder(FolderKey::new(folder));
        let id = mb.visible()[0];
        mb.select(Some(id));
        assert!(mb.can_delete());
        assert_eq!(mb.can_edit_draft(), folder.starts_with("Drafts"), "{folder}");
    }

    mb.select(None);
    assert!(!mb.can_edit_draft());
    assert_eq!(
        mb.edit_draft(&ComposeFields::default()),
        Err(GuardViolation::NoSelection)
    );
}

// ─── Test 5: Unread means not important, store-wide ─────────────────

#[test]
fn test_unread_filter_ignores_folder() {
    let mut mb = Mailbox::with_messages(
        vec![
            message("a@x.com", "flagged", "Inbox1", true),
            message("b@x.com", "plain", "Sent2", false),
        ],
        FolderKey::new("Trash1"),
    );
    mb.filter_by_option(OptionFilter::Unread);
    let subjects: Vec<&str> = mb.visible_messages().map(|(_, m)| m.subject.as_str()).collect();
    assert_eq!(subjects, ["plain"]);

    // Same answer from the free function
    assert_eq!(filter_by_option(mb.store(), OptionFilter::Unread).len(), 1);
}

// ─── Test 6: Sender search in Trash1 ────────────────────────────────

#[test]
fn test_sender_search_in_trash() {
    let mut mb = demo("Trash1");
    mb.search("SPAM", SearchCategory::Sender);
    let hits: Vec<&Message> = mb.visible_messages().map(|(_, m)| m).collect();
    assert_eq!(hits.len(), 1);
    assert!(hits.iter().all(|m| m.folder == "Trash1"));
    assert!(hits.iter().all(|m| m.sender.to_lowercase().contains("spam")));

    // spam@offer.com lives in Trash2 and must not leak in
    assert!(!hits.iter().any(|m| m.sender == "spam@offer.com"));

    mb.search("   ", SearchCategory::Sender);
    assert_eq!(mb.visible().len(), 2);
    assert_eq!(
        filter_by_category(mb.store(), &FolderKey::new("Trash1"), "", Some(SearchCategory::Sender)).len(),
        2
    );
}

// ─── Test 7: Invalid recipient is rejected without touching the store

#[test]
fn test_compose_invalid_recipient() {
    let mut mb = demo("Inbox1");
    let total = mb.store().len();
    let err = mb
        .compose_send(
            &FolderKey::new("Inbox1"),
            &fields("me@example.com", "not-an-email", "Hello"),
            &AddressValidator,
        )
        .unwrap_err();
    assert_eq!(err.field(), Field::Recipients);
    assert_eq!(err, ValidationError::InvalidRecipient("not-an-email".to_string()));
    assert_eq!(mb.store().len(), total);
}

// ─── Test 8: Recipient search matches any recipient ─────────────────

#[test]
fn test_recipient_search() {
    let mut mb = demo("Inbox1");
    mb.search("employee2", SearchCategory::Recipient);
    let subjects: Vec<&str> = mb.visible_messages().map(|(_, m)| m.subject.as_str()).collect();
    assert_eq!(subjects, ["Quarterly Earnings Report"]);
}

// ─── Test 9: Option filters replace, not intersect, folder search ───

#[test]
fn test_option_filter_replaces_search() {
    let mut mb = demo("Inbox1");
    mb.search("Quarterly", SearchCategory::Subject);
    assert_eq!(mb.visible().len(), 1);

    mb.filter_by_option(OptionFilter::Important);
    // Every important message in every folder
    assert_eq!(mb.visible().len(), 4);

    mb.filter_by_option(OptionFilter::All);
    assert_eq!(mb.visible().len(), mb.store().len());

    mb.show_folder(FolderKey::new("Inbox1"));
    assert_eq!(mb.visible().len(), 3);
}

// ─── Test 10: Full lifecycle of a draft ─────────────────────────────

#[test]
fn test_draft_lifecycle() {
    let mut mb = demo("Drafts1");

    let id = mb
        .compose_save_draft(
            &FolderKey::new("Drafts1"),
            &fields("employee1@company.com", "team@company.com", "Offsite"),
            &AddressValidator,
        )
        .unwrap();
    assert_eq!(mb.get(id).unwrap().folder, "Drafts1");
    assert_eq!(mb.visible().last(), Some(&id));

    // Drafts --save--> Drafts
    mb.select(Some(id));
    mb.edit_draft(&fields("employee1@company.com", "team@company.com", "Offsite v2"))
        .unwrap();
    assert_eq!(mb.get(id).unwrap().subject, "Offsite v2");
    assert_eq!(mb.get(id).unwrap().folder, "Drafts1");

    // Drafts --send--> Sent
    let sent = mb
        .send_draft(
            &fields("employee1@company.com", "team@company.com", "Offsite v2"),
            &AddressValidator,
        )
        .unwrap();
    assert_eq!(sent, "Sent1");

    // Sent --delete--> Trash
    mb.show_folder(FolderKey::new("Sent1"));
    assert!(mb.visible().contains(&id));
    mb.select(Some(id));
    mb.delete_selected().unwrap();
    assert_eq!(mb.get(id).unwrap().folder, "Trash1");

    // Trash --delete--> removed
    mb.show_folder(FolderKey::new("Trash1"));
    mb.select(Some(id));
    mb.delete_selected().unwrap();
    assert!(mb.get(id).is_none());
}

// ─── Test 11: Sending a non-draft is refused ────────────────────────

#[test]
fn test_send_requires_draft() {
    let mut mb = demo("Inbox1");
    let id = mb.visible()[0];
    mb.select(Some(id));
    let err = mb
        .send_draft(&fields("a@x.com", "b@x.com", "s"), &AddressValidator)
        .unwrap_err();
    assert_eq!(err, CommandError::Guard(GuardViolation::NotADraft));
    assert_eq!(mb.get(id).unwrap().folder, "Inbox1");
}

// ─── Test 12: Empty draft is not saved ──────────────────────────────

#[test]
fn test_empty_draft_rejected() {
    let mut mb = demo("Drafts2");
    let total = mb.store().len();
    let err = mb
        .compose_save_draft(&FolderKey::new("Drafts2"), &ComposeFields::default(), &AddressValidator)
        .unwrap_err();
    assert_eq!(err, ValidationError::EmptyDraft);
    assert_eq!(err.field(), Field::Draft);
    assert_eq!(mb.store().len(), total);
}

// ─── Test 13: Add message lands in the current folder ───────────────

#[test]
fn test_add_message_to_current_folder() {
    let mut mb = demo("Sent2");
    let id = mb.add_message(NewMessage::placeholder());
    let m = mb.get(id).unwrap();
    assert_eq!(m.folder, "Sent2");
    assert_eq!(m.sender, "static@company.com");
    assert_eq!(mb.visible().last(), Some(&id));
}

// ─── Test 14: Toggle importance twice is the identity ───────────────

#[test]
fn test_toggle_important_twice() {
    let mut mb = demo("Inbox1");
    let id = find(&mb, "Quarterly Earnings Report");
    assert!(mb.toggle_important(id));
    assert!(!mb.get(id).unwrap().is_important);
    assert!(mb.toggle_important(id));
    assert!(mb.get(id).unwrap().is_important);
}

// ─── Test 15: Not-found operations are no-ops ───────────────────────

#[test]
fn test_not_found_is_noop() {
    let mut mb = demo("Trash2");
    let id = mb.visible()[0];
    mb.select(Some(id));
    assert!(mb.remove(id).is_some());
    assert!(mb.selection().is_none());
    assert!(!mb.can_delete());

    assert!(mb.remove(id).is_none());
    assert!(!mb.toggle_important(id));
    assert!(!mb.select(Some(id)));

    let mut store = MailboxStore::new();
    assert!(store.remove(id).is_none());
    assert!(!store.mutate_folder(id, FolderKey::new("Trash1")));
}

// ─── Test 16: Change notifications ──────────────────────────────────

#[test]
fn test_change_notifications() {
    let mut mb = demo("Inbox1");
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let listener = mb.subscribe(move |e| sink.borrow_mut().push(*e)).unwrap();

    let id = mb.visible()[0];
    mb.select(Some(id));
    mb.delete_selected().unwrap();

    let events = seen.borrow().clone();
    assert!(events.contains(&ChangeEvent::SelectionChanged(Some(id))));
    assert!(events.contains(&ChangeEvent::StoreChanged));
    assert!(events.contains(&ChangeEvent::VisibleSubsetChanged));
    assert_eq!(events.last(), Some(&ChangeEvent::CommandAvailabilityChanged(Default::default())));

    // Toggling importance only asks for a re-read of the visible subset
    seen.borrow_mut().clear();
    let first = mb.visible()[0];
    mb.toggle_important(first);
    assert_eq!(*seen.borrow(), vec![ChangeEvent::VisibleSubsetChanged]);

    assert!(mb.unsubscribe(listener));
    seen.borrow_mut().clear();
    mb.reset_search();
    assert!(seen.borrow().is_empty());
}

// ─── Test 17: Listener registry is bounded ──────────────────────────

#[test]
fn test_listener_bound() {
    let mut mb = demo("Inbox1");
    for _ in 0..MAX_LISTENERS {
        mb.subscribe(|_| {}).unwrap();
    }
    assert!(matches!(mb.subscribe(|_| {}), Err(TriageError::TooManyListeners(_))));
}

// ─── Test 18: Nothing re-enters an Inbox ────────────────────────────

#[test]
fn test_inbox_is_seed_only() {
    let mut mb = demo("Drafts1");
    let inbox_before = mb.store().folder_counts()[&FolderKey::new("Inbox1")];

    let draft = mb.visible()[0];
    mb.select(Some(draft));
    mb.send_draft(
        &fields("employee1@company.com", "team@company.com", "Outing"),
        &AddressValidator,
    )
    .unwrap();
    mb.compose_send(
        &FolderKey::new("Inbox1"),
        &fields("employee1@company.com", "hr@company.com", "Hi"),
        &AddressValidator,
    )
    .unwrap();

    let counts = mb.store().folder_counts();
    assert_eq!(counts[&FolderKey::new("Inbox1")], inbox_before);
    assert_eq!(counts[&FolderKey::new("Sent1")], 4);
}

// ─── Test 19: Search query whitespace is matched as typed ───────────

#[test]
fn test_search_query_not_trimmed_for_matching() {
    let mut mb = demo("Trash1");
    mb.search("miss", SearchCategory::Subject);
    assert_eq!(mb.visible().len(), 1);

    // "Monthly Deals You Can't Miss" ends without a space
    mb.search("miss ", SearchCategory::Subject);
    assert!(mb.visible().is_empty());
    assert_eq!(mb.filter().search_query, "miss ");
}
