use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::board::identity::{User, UserId};
use crate::board::jobs::{Job, JobId};

/// Identifier wrapper for submitted applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

/// Stored status of an application. Serialised as the lowercase literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
    Hired,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 4] = [
        ApplicationStatus::Pending,
        ApplicationStatus::Approved,
        ApplicationStatus::Rejected,
        ApplicationStatus::Hired,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::Hired => "hired",
        }
    }

    pub const fn display_label(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "Pending",
            ApplicationStatus::Approved => "Approved",
            ApplicationStatus::Rejected => "Rejected",
            ApplicationStatus::Hired => "Hired",
        }
    }

    /// Approved and hired share the positive presentation even though they are distinct states.
    pub const fn tone(self) -> StatusTone {
        match self {
            ApplicationStatus::Pending => StatusTone::Waiting,
            ApplicationStatus::Approved | ApplicationStatus::Hired => StatusTone::Positive,
            ApplicationStatus::Rejected => StatusTone::Negative,
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown application status '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for ApplicationStatus {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        ApplicationStatus::ALL
            .into_iter()
            .find(|status| status.label() == normalized)
            .ok_or_else(|| UnknownStatus(value.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusTone {
    Waiting,
    Positive,
    Negative,
}

/// Optional fields an applicant may attach to a submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_letter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Contact name override shown instead of the account name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ApplicationPayload {
    /// Blank strings are treated as absent.
    pub fn normalized(self) -> Self {
        fn clean(value: Option<String>) -> Option<String> {
            value
                .map(|raw| raw.trim().to_string())
                .filter(|raw| !raw.is_empty())
        }

        Self {
            cover_letter: clean(self.cover_letter),
            phone: clean(self.phone),
            name: clean(self.name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: ApplicationId,
    pub applicant_id: UserId,
    pub job_id: JobId,
    pub status: ApplicationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_letter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub applied_at: DateTime<Utc>,
    pub status_changed_at: DateTime<Utc>,
}

/// Job fields carried alongside an application in recruiter and applicant listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSummary {
    pub id: JobId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl From<&Job> for JobSummary {
    fn from(job: &Job) -> Self {
        Self {
            id: job.id.clone(),
            title: Some(job.title.clone()),
        }
    }
}

/// Applicant fields a recruiter may see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantSummary {
    pub id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume: Option<String>,
}

impl From<&User> for ApplicantSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: Some(user.name.clone()),
            email: Some(user.email.clone()),
            resume: user.profile.resume.clone(),
        }
    }
}

/// An application enriched with its job and applicant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationListing {
    #[serde(flatten)]
    pub application: Application,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job: Option<JobSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applicant: Option<ApplicantSummary>,
}

impl ApplicationListing {
    pub fn job_title(&self) -> Option<&str> {
        self.job.as_ref().and_then(|job| job.title.as_deref())
    }

    pub fn applicant_name(&self) -> Option<&str> {
        self.applicant
            .as_ref()
            .and_then(|applicant| applicant.name.as_deref())
    }

    pub fn applicant_email(&self) -> Option<&str> {
        self.applicant
            .as_ref()
            .and_then(|applicant| applicant.email.as_deref())
    }

    pub fn resume_url(&self) -> Option<&str> {
        self.applicant
            .as_ref()
            .and_then(|applicant| applicant.resume.as_deref())
    }
}

/// Lifecycle notification handed to the outbound event publisher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ApplicationEvent {
    Submitted {
        application_id: ApplicationId,
        job_id: JobId,
        applicant_id: UserId,
        at: DateTime<Utc>,
    },
    StatusChanged {
        application_id: ApplicationId,
        from: ApplicationStatus,
        to: ApplicationStatus,
        changed_by: UserId,
        at: DateTime<Utc>,
    },
}

impl ApplicationEvent {
    pub fn application_id(&self) -> &ApplicationId {
        match self {
            ApplicationEvent::Submitted { application_id, .. }
            | ApplicationEvent::StatusChanged { application_id, .. } => application_id,
        }
    }

    pub const fn template(&self) -> &'static str {
        match self {
            ApplicationEvent::Submitted { .. } => "application_submitted",
            ApplicationEvent::StatusChanged { .. } => "application_status_changed",
        }
    }
}
