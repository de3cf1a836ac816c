//! Application status tracking model.
//!
//! An [`ApplicationStatus`] records how far an owner has got with applying to
//! one program. Each owner has at most one application per program.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Where an application stands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationState {
    /// Tracked but not yet started.
    #[default]
    NotStarted,
    /// Being filled in.
    InProgress,
    /// Sent to the program.
    Submitted,
    /// Granted.
    Approved,
    /// Refused.
    Denied,
    /// Waiting on supporting documents.
    PendingDocuments,
}

impl ApplicationState {
    /// Every state, in workflow order.
    pub const ALL: [ApplicationState; 6] = [
        ApplicationState::NotStarted,
        ApplicationState::InProgress,
        ApplicationState::Submitted,
        ApplicationState::Approved,
        ApplicationState::Denied,
        ApplicationState::PendingDocuments,
    ];

    /// The wire name of the state (e.g. `"pending_documents"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationState::NotStarted => "not_started",
            ApplicationState::InProgress => "in_progress",
            ApplicationState::Submitted => "submitted",
            ApplicationState::Approved => "approved",
            ApplicationState::Denied => "denied",
            ApplicationState::PendingDocuments => "pending_documents",
        }
    }

    /// The human-readable label (e.g. `"Pending Documents"`).
    pub fn label(&self) -> &'static str {
        match self {
            ApplicationState::NotStarted => "Not Started",
            ApplicationState::InProgress => "In Progress",
            ApplicationState::Submitted => "Submitted",
            ApplicationState::Approved => "Approved",
            ApplicationState::Denied => "Denied",
            ApplicationState::PendingDocuments => "Pending Documents",
        }
    }
}

impl fmt::Display for ApplicationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An owner's application to one program.
///
/// `id`, `created_at` and `updated_at` are assigned by the application store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationStatus {
    /// Identifier assigned by the store.
    pub id: Option<Uuid>,
    /// The owner tracking the application.
    pub owner_id: String,
    /// The catalog program applied to.
    pub program_id: String,
    /// Current state.
    #[serde(default)]
    pub status: ApplicationState,
    /// When the application was sent, if known.
    #[serde(default)]
    pub application_date: Option<DateTime<Utc>>,
    /// Free-form notes.
    #[serde(default)]
    pub notes: String,
    /// When the store first saved the application.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// When the store last changed the application.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ApplicationStatus {
    /// Starts tracking `program_id` for `owner_id` in the `NotStarted` state.
    pub fn new(owner_id: impl Into<String>, program_id: impl Into<String>) -> Self {
        Self {
            id: None,
            owner_id: owner_id.into(),
            program_id: program_id.into(),
            status: ApplicationState::default(),
            application_date: None,
            notes: String::new(),
            created_at: None,
            updated_at: None,
        }
    }

    /// Applies the fields present in `update`, leaving the rest unchanged.
    pub fn apply(&mut self, update: ApplicationUpdate) {
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(application_date) = update.application_date {
            self.application_date = Some(application_date);
        }
        if let Some(notes) = update.notes {
            self.notes = notes;
        }
    }
}

/// A partial change to an [`ApplicationStatus`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationUpdate {
    /// New state.
    #[serde(default)]
    pub status: Option<ApplicationState>,
    /// New application date.
    #[serde(default)]
    pub application_date: Option<DateTime<Utc>>,
    /// Replacement notes.
    #[serde(default)]
    pub notes: Option<String>,
}
