//! Request types for the eligibility API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{ApplicantProfile, ApplicationState, ApplicationStatus, ApplicationUpdate};

/// Request body for `POST /eligibility/check`.
///
/// Authentication is handled outside the engine; the caller names the owner
/// the check is recorded for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EligibilityRequest {
    /// The owner the check is recorded for.
    pub owner_id: String,
    /// The applicant profile to evaluate.
    pub profile: ApplicantProfile,
}

/// Request body for `POST /eligibility/explain`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplainRequest {
    /// The applicant profile to assess.
    pub profile: ApplicantProfile,
}

/// Query string for `GET /eligibility/programs`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProgramsQuery {
    /// Category name or `"all"`. Absent means all.
    pub category: Option<String>,
}

/// Query string naming the owner, for history and application lookups.
#[derive(Debug, Clone, Deserialize)]
pub struct OwnerQuery {
    /// The owner whose records are read.
    pub owner_id: String,
}

/// Request body for `POST /eligibility/applications`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewApplicationRequest {
    /// The owner tracking the application.
    pub owner_id: String,
    /// The catalog program applied to.
    pub program_id: String,
    /// Initial state; defaults to `not_started`.
    #[serde(default)]
    pub status: ApplicationState,
    /// When the application was sent, if already known.
    #[serde(default)]
    pub application_date: Option<DateTime<Utc>>,
    /// Free-form notes.
    #[serde(default)]
    pub notes: String,
}

impl From<NewApplicationRequest> for ApplicationStatus {
    fn from(request: NewApplicationRequest) -> Self {
        ApplicationStatus {
            status: request.status,
            application_date: request.application_date,
            notes: request.notes,
            ..ApplicationStatus::new(request.owner_id, request.program_id)
        }
    }
}

/// Request body for `PATCH /eligibility/applications/:id`.
///
/// Absent fields are left unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateApplicationRequest {
    /// The owner of the application.
    pub owner_id: String,
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

impl UpdateApplicationRequest {
    /// Splits the request into its owner and the change to apply.
    pub fn into_parts(self) -> (String, ApplicationUpdate) {
        (
            self.owner_id,
            ApplicationUpdate {
                status: self.status,
                application_date: self.application_date,
                notes: self.notes,
            },
        )
    }
}
