//! Compose-side collaborators: raw form fields, the field validator, and
//! attachment sources.

use thiserror::Error;

use crate::model::address::{is_valid_address, split_address_list};
use crate::model::AttachmentList;

/// Which compose field a [`ValidationError`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Sender,
    Recipients,
    Subject,
    /// The draft as a whole.
    Draft,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sender => "sender",
            Self::Recipients => "recipients",
            Self::Subject => "subject",
            Self::Draft => "draft",
        }
    }
}

/// Why compose fields were rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Sender address is required")]
    EmptySender,

    #[error("Invalid sender address '{0}' (expected e.g. user@domain.com)")]
    InvalidSender(String),

    #[error("At least one recipient is required")]
    EmptyRecipients,

    #[error("Invalid recipient '{0}' (enter valid addresses separated by commas)")]
    InvalidRecipient(String),

    #[error("Subject cannot be empty")]
    EmptySubject,

    #[error("Draft not saved because it is completely empty")]
    EmptyDraft,
}

impl ValidationError {
    /// The field this error relates to.
    pub const fn field(&self) -> Field {
        match self {
            Self::EmptySender | Self::InvalidSender(_) => Field::Sender,
            Self::EmptyRecipients | Self::InvalidRecipient(_) => Field::Recipients,
            Self::EmptySubject => Field::Subject,
            Self::EmptyDraft => Field::Draft,
        }
    }
}

/// Raw, unvalidated compose form contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposeFields {
    pub sender: String,
    /// Comma-separated recipient list as typed.
    pub recipients: String,
    pub subject: String,
    pub content: String,
    pub attachments: AttachmentList,
}

impl ComposeFields {
    /// Whether every field is blank and there are no attachments.
    pub fn is_blank(&self) -> bool {
        self.sender.trim().is_empty()
            && split_address_list(&self.recipients).is_empty()
            && self.subject.trim().is_empty()
            && self.content.is_empty()
            && self.attachments.is_empty()
    }

    /// Recipient list split on commas, trimmed, blanks dropped. No syntax check.
    pub fn recipient_list(&self) -> Vec<String> {
        split_address_list(&self.recipients)
    }

    /// Pull attachment ids from `source`, skipping duplicates. Returns how many were added.
    pub fn attach_from(&mut self, source: &mut dyn AttachmentSource) -> usize {
        let before = self.attachments.len();
        self.attachments.extend_from(source.pick());
        self.attachments.len() - before
    }
}

/// Fields that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedFields {
    pub sender: String,
    pub recipients: Vec<String>,
    pub subject: String,
}

/// Checks compose fields before a message is created or sent.
pub trait FieldValidator {
    fn validate(
        &self,
        sender: &str,
        recipients: &str,
        subject: &str,
    ) -> Result<ValidatedFields, ValidationError>;
}

/// Default validator: syntactic address checks and a non-empty subject.
///
/// Checks run in order sender, recipients, subject; the first failure wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct AddressValidator;

impl FieldValidator for AddressValidator {
    fn validate(
        &self,
        sender: &str,
        recipients: &str,
        subject: &str,
    ) -> Result<ValidatedFields, ValidationError> {
        let sender = sender.trim();
        if sender.is_empty() {
            return Err(ValidationError::EmptySender);
        }
        if !is_valid_address(sender) {
            return Err(ValidationError::InvalidSender(sender.to_string()));
        }

        let recipients = split_address_list(recipients);
        if recipients.is_empty() {
            return Err(ValidationError::EmptyRecipients);
        }
        if let Some(bad) = recipients.iter().find(|r| !is_valid_address(r)) {
            return Err(ValidationError::InvalidRecipient(bad.clone()));
        }

        let subject = subject.trim();
        if subject.is_empty() {
            return Err(ValidationError::EmptySubject);
        }

        Ok(ValidatedFields {
            sender: sender.to_string(),
            recipients,
            subject: subject.to_string(),
        })
    }
}

/// Supplies attachment identifiers, e.g. paths chosen in a file picker.
pub trait AttachmentSource {
    fn pick(&mut self) -> Vec<String>;
}

/// Attachment source backed by a comma-separated path list.
#[derive(Debug, Clone, Default)]
pub struct PathListSource(pub String);

impl AttachmentSource for PathListSource {
    fn pick(&mut self) -> Vec<String> {
        self.0
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl<F> AttachmentSource for F
where
    F: FnMut() -> Vec<String>,
{
    fn pick(&mut self) -> Vec<String> {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_fields() {
        let ok = AddressValidator
            .validate(" me@example.com ", "a@x.com, b@y.com", " Hello ")
            .unwrap();
        assert_eq!(ok.sender, "me@example.com");
        assert_eq!(ok.recipients, ["a@x.com", "b@y.com"]);
        assert_eq!(ok.subject, "Hello");
    }

    #[test]
    fn test_invalid_recipient_names_field() {
        let err = AddressValidator
            .validate("me@example.com", "not-an-email", "Hello")
            .unwrap_err();
        assert_eq!(err, ValidationError::InvalidRecipient("not-an-email".to_string()));
        assert_eq!(err.field(), Field::Recipients);
    }

    #[test]
    fn test_check_order() {
        assert_eq!(
            AddressValidator.validate("", "bad", "").unwrap_err(),
            ValidationError::EmptySender
        );
        assert_eq!(
            AddressValidator.validate("nope", "bad", "").unwrap_err().field(),
            Field::Sender
        );
        assert_eq!(
            AddressValidator.validate("me@x.com", " , ", "").unwrap_err(),
            ValidationError::EmptyRecipients
        );
        assert_eq!(
            AddressValidator.validate("me@x.com", "a@x.com", "  ").unwrap_err(),
            ValidationError::EmptySubject
        );
    }

    #[test]
    fn test_blank_fields() {
        let mut fields = ComposeFields::default();
        assert!(fields.is_blank());
        fields.recipients = " , ".to_string();
        assert!(fields.is_blank());
        fields.content = "x".to_string();
        assert!(!fields.is_blank());
    }

    #[test]
    fn test_attach_from_dedups() {
        let mut fields = ComposeFields::default();
        let mut source = PathListSource("/a.pdf, /b.pdf, /a.pdf,".to_string());
        assert_eq!(fields.attach_from(&mut source), 2);
        assert_eq!(fields.attach_from(&mut source), 0);

        let mut picker = || vec!["/c.png".to_string(), "/b.pdf".to_string()];
        assert_eq!(fields.attach_from(&mut picker), 1);
        let items: Vec<&str> = fields.attachments.iter().collect();
        assert_eq!(items, ["/a.pdf", "/b.pdf", "/c.png"]);
    }
}
