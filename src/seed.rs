//! Seed data providers.
//!
//! A seed is the full initial message set handed to
//! [`Mailbox::seed_load`](crate::command::Mailbox::seed_load). Two sources
//! exist: a built-in demo set covering two mailboxes, and a JSON file.

use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use crate::error::{Result, TriageError};
use crate::model::{AttachmentList, FolderKey, Message};

/// Source of the initial message set.
pub trait SeedProvider {
    /// Produce every message, in display order.
    fn load(&self) -> Result<Vec<Message>>;

    /// Short human-readable description for logs.
    fn describe(&self) -> String;
}

/// Pick the JSON seed at `path`, or the built-in set when there is none.
pub fn provider_for(path: Option<&Path>) -> Box<dyn SeedProvider> {
    match path {
        Some(p) => Box::new(JsonSeed::new(p)),
        None => Box::new(BuiltinSeed),
    }
}

/// Parse a seed date: RFC 3339, or a bare `YYYY-MM-DD` taken as midnight UTC.
pub fn parse_date(raw: &str) -> Result<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|ndt| ndt.and_utc())
        .ok_or_else(|| TriageError::InvalidDate(raw.to_string()))
}

// ── JSON file ───────────────────────────────────────────────────

/// One message as written in a JSON seed file.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedRecord {
    pub sender: String,
    pub recipients: Vec<String>,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub is_important: bool,
    #[serde(default)]
    pub attachments: Vec<String>,
    pub date_sent: String,
    pub folder: String,
}

impl SeedRecord {
    /// Convert into a [`Message`], parsing the date.
    ///
    /// A message needs at least one non-blank recipient.
    pub fn into_message(self) -> Result<Message> {
        if self.recipients.iter().all(|r| r.trim().is_empty()) {
            return Err(TriageError::InvalidSeedRecord {
                sender: self.sender,
                reason: "no recipients",
            });
        }
        Ok(Message {
            date_sent: parse_date(&self.date_sent)?,
            sender: self.sender,
            recipients: self.recipients,
            subject: self.subject,
            content: self.content,
            is_important: self.is_important,
            attachments: AttachmentList::from(self.attachments),
            folder: FolderKey::new(self.folder),
        })
    }
}

/// Seed read from a JSON array of [`SeedRecord`]s.
#[derive(Debug, Clone)]
pub struct JsonSeed {
    path: PathBuf,
}

impl JsonSeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SeedProvider for JsonSeed {
    fn load(&self) -> Result<Vec<Message>> {
        let contents =
            std::fs::read_to_string(&self.path).map_err(|e| TriageError::io(&self.path, e))?;
        let records: Vec<SeedRecord> =
            serde_json::from_str(&contents).map_err(|source| TriageError::SeedParse {
                path: self.path.clone(),
                source,
            })?;
        let messages = records
            .into_iter()
            .map(SeedRecord::into_message)
            .collect::<Result<Vec<_>>>()?;
        tracing::info!(
            path = %self.path.display(),
            messages = messages.len(),
            "Read seed file"
        );
        Ok(messages)
    }

    fn describe(&self) -> String {
        format!("JSON seed {}", self.path.display())
    }
}

// ── Built-in demo set ───────────────────────────────────────────

/// Two mailboxes of demo mail, every folder populated.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinSeed;

struct Demo {
    sender: &'static str,
    recipients: &'static [&'static str],
    subject: &'static str,
    content: &'static str,
    important: bool,
    attachments: &'static [&'static str],
    date: &'static str,
    folder: &'static str,
}

const DEMO: &[Demo] = &[
    // Mailbox 1
    Demo {
        sender: "ceo@company.com",
        recipients: &["employee1@company.com", "employee2@company.com"],
        subject: "Quarterly Earnings Report",
        content: "Dear Team,\n\nPlease review the attached quarterly earnings report. It covers financial performance, key indicators and recommendations for the next quarter. Your feedback is essential as we plan our next steps.\n\nBest regards,\nCEO",
        important: true,
        attachments: &["Q1_Earnings.pdf"],
        date: "2025-04-01",
        folder: "Inbox1",
    },
    Demo {
        sender: "hr@company.com",
        recipients: &["employee1@company.com"],
        subject: "Updated Leave Policy Notification",
        content: "Hello,\n\nWe have updated our leave policy. Please read the attached document and reach out with any questions.\n\nThank you,\nHR Department",
        important: false,
        attachments: &["LeavePolicy.docx"],
        date: "2025-04-02",
        folder: "Inbox1",
    },
    Demo {
        sender: "support@company.com",
        recipients: &["employee1@company.com"],
        subject: "Scheduled IT Maintenance Downtime",
        content: "Attention,\n\nOur IT systems will be offline from 2 AM to 4 AM tomorrow for scheduled maintenance. Save your work and plan accordingly.\n\nRegards,\nIT Support",
        important: false,
        attachments: &[],
        date: "2025-04-03",
        folder: "Inbox1",
    },
    Demo {
        sender: "employee1@company.com",
        recipients: &["manager@company.com"],
        subject: "Re: Quarterly Earnings Report",
        content: "Hi Manager,\n\nAttached are my notes and suggestions on the quarterly earnings report. Looking forward to discussing them in our next meeting.\n\nBest,\nEmployee1",
        important: false,
        attachments: &["Notes.pdf"],
        date: "2025-04-03",
        folder: "Sent1",
    },
    Demo {
        sender: "employee1@company.com",
        recipients: &["hr@company.com"],
        subject: "Feedback on Updated Leave Policy",
        content: "Dear HR,\n\nI have reviewed the new leave policy and have a few concerns about the implementation timeline and the accrual process. Details below.\n\nRegards,\nEmployee1",
        important: true,
        attachments: &[],
        date: "2025-04-04",
        folder: "Sent1",
    },
    Demo {
        sender: "employee1@company.com",
        recipients: &["team@company.com"],
        subject: "Team Outing Proposal",
        content: "Hello Team,\n\nHow about a team outing next month? I suggest a picnic at the lakeside park. Please share your thoughts and availability.\n\nBest,\nEmployee1",
        important: false,
        attachments: &[],
        date: "2025-04-05",
        folder: "Drafts1",
    },
    Demo {
        sender: "employee1@company.com",
        recipients: &["employee1@company.com"],
        subject: "Self Reminder: Project Update Deadline",
        content: "Reminder:\n\nSubmit the project update by Friday. Review performance metrics and book a feedback session with your supervisor.\n\nThanks,\nEmployee1",
        important: false,
        attachments: &[],
        date: "2025-04-06",
        folder: "Drafts1",
    },
    Demo {
        sender: "spam@promo.com",
        recipients: &["employee1@company.com"],
        subject: "Buy One Get One Free!",
        content: "Special Offer:\n\nBuy one, get one free! Visit our website to claim your discount. Limited time only!",
        important: false,
        attachments: &[],
        date: "2025-04-07",
        folder: "Trash1",
    },
    Demo {
        sender: "newsletter@ads.com",
        recipients: &["employee1@company.com"],
        subject: "Monthly Deals You Can't Miss",
        content: "Dear Subscriber,\n\nDiscover our monthly deals with up to 50% off selected items. Hurry, these deals won't last long!",
        important: false,
        attachments: &[],
        date: "2025-04-08",
        folder: "Trash1",
    },
    // Mailbox 2
    Demo {
        sender: "friend@example.com",
        recipients: &["me@example.com"],
        subject: "Road Trip Invitation",
        content: "Hey,\n\nI'm planning a cross-country road trip and would love for you to join. Let me know if you're in.",
        important: false,
        attachments: &[],
        date: "2025-03-30",
        folder: "Inbox2",
    },
    Demo {
        sender: "news@daily.com",
        recipients: &["me@example.com"],
        subject: "Breaking News: Market Volatility",
        content: "Dear Reader,\n\nMarkets saw significant volatility today amid global economic uncertainty. Stay tuned for analysis and expert commentary.",
        important: false,
        attachments: &[],
        date: "2025-03-29",
        folder: "Inbox2",
    },
    Demo {
        sender: "alerts@weather.com",
        recipients: &["me@example.com"],
        subject: "Severe Weather Warning",
        content: "Attention:\n\nA severe weather warning has been issued for your area. Take precautions and follow local emergency services.",
        important: true,
        attachments: &[],
        date: "2025-03-28",
        folder: "Inbox2",
    },
    Demo {
        sender: "me@example.com",
        recipients: &["friend@example.com"],
        subject: "Re: Road Trip Invitation",
        content: "Hi,\n\nCount me in! Let's finalize the details soon.",
        important: false,
        attachments: &[],
        date: "2025-03-31",
        folder: "Sent2",
    },
    Demo {
        sender: "me@example.com",
        recipients: &["news@daily.com"],
        subject: "Re: Market Volatility",
        content: "Thanks for the update on market trends. I will keep an eye on developments.",
        important: false,
        attachments: &[],
        date: "2025-03-30",
        folder: "Sent2",
    },
    Demo {
        sender: "me@example.com",
        recipients: &["colleague@example.com"],
        subject: "Brainstorming Session for New Project",
        content: "Hello Team,\n\nI have compiled a list of ideas for the new project. Let's hold a brainstorming session on strategy, timelines and deliverables.",
        important: true,
        attachments: &[],
        date: "2025-03-28",
        folder: "Drafts2",
    },
    Demo {
        sender: "me@example.com",
        recipients: &["me@example.com"],
        subject: "Personal To-Do List",
        content: "Reminder:\n\n1. Buy groceries\n2. Schedule doctor's appointment\n3. Prepare Monday's presentation\n4. Update the project documentation",
        important: false,
        attachments: &[],
        date: "2025-03-27",
        folder: "Drafts2",
    },
    Demo {
        sender: "spam@offer.com",
        recipients: &["me@example.com"],
        subject: "Limited Time Discount Offer",
        content: "Act Now:\n\nGrab your discount before time runs out. Exclusive deals for a limited period.",
        important: false,
        attachments: &[],
        date: "2025-03-26",
        folder: "Trash2",
    },
    Demo {
        sender: "promo@store.com",
        recipients: &["me@example.com"],
        subject: "Exclusive Offer Just for You!",
        content: "Dear Customer,\n\nEnjoy an exclusive discount on our latest products. Available for a short time only!",
        important: false,
        attachments: &[],
        date: "2025-03-25",
        folder: "Trash2",
    },
];

impl SeedProvider for BuiltinSeed {
    fn load(&self) -> Result<Vec<Message>> {
        DEMO.iter()
            .map(|d| {
                Ok(Message {
                    sender: d.sender.to_string(),
                    recipients: d.recipients.iter().map(|r| r.to_string()).collect(),
                    subject: d.subject.to_string(),
                    content: d.content.to_string(),
                    is_important: d.important,
                    attachments: AttachmentList::from(
                        d.attachments.iter().map(|a| a.to_string()).collect::<Vec<_>>(),
                    ),
                    date_sent: parse_date(d.date)?,
                    folder: FolderKey::new(d.folder),
                })
            })
            .collect()
    }

    fn describe(&self) -> String {
        "built-in demo set".to_string()
    }
}
