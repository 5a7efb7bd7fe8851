//! Recruiter review view: a snapshot loaded once, re-filtered locally as options change.
//!
//! Applications submitted after the snapshot was taken only appear after a reload. Detail
//! lookups take an explicit application id and never mutate the snapshot.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::domain::{ApplicationId, ApplicationListing, StatusTone};
use super::query::{ReviewQuery, SortKey, StatusFilter};

pub const NOT_AVAILABLE: &str = "N/A";
pub const JOB_TITLE_NOT_AVAILABLE: &str = "Job Title Not Available";

/// Immutable set of listings plus the options currently applied to it.
#[derive(Debug, Clone)]
pub struct ReviewSession {
    snapshot: Arc<[ApplicationListing]>,
    query: ReviewQuery,
}

impl ReviewSession {
    pub fn new(listings: Vec<ApplicationListing>) -> Self {
        Self {
            snapshot: listings.into(),
            query: ReviewQuery::default(),
        }
    }

    pub fn query(&self) -> &ReviewQuery {
        &self.query
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.query.search_text = text.into();
    }

    pub fn set_status_filter(&mut self, filter: StatusFilter) {
        self.query.status_filter = filter;
    }

    pub fn set_sort(&mut self, key: SortKey) {
        self.query.sort_by = key;
    }

    pub fn total(&self) -> usize {
        self.snapshot.len()
    }

    /// Listings that pass the current options, in display order.
    pub fn visible(&self) -> Vec<&ApplicationListing> {
        self.query.apply(self.snapshot.iter())
    }

    pub fn cards(&self) -> Vec<ApplicationCard> {
        self.visible().into_iter().map(ApplicationCard::from).collect()
    }

    pub fn summary(&self) -> String {
        format!(
            "Showing {} of {} applications",
            self.visible().len(),
            self.total()
        )
    }

    /// `None` while something is visible.
    pub fn empty_state(&self) -> Option<EmptyState> {
        if self.snapshot.is_empty() {
            Some(EmptyState::NoApplications)
        } else if self.visible().is_empty() {
            Some(EmptyState::NoMatches)
        } else {
            None
        }
    }

    /// Detail projection for one application in the snapshot.
    pub fn detail(&self, application_id: &ApplicationId) -> Option<ApplicationDetail> {
        self.snapshot
            .iter()
            .find(|listing| &listing.application.id == application_id)
            .map(ApplicationDetail::from)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyState {
    NoApplications,
    NoMatches,
}

impl EmptyState {
    pub const fn title(self) -> &'static str {
        match self {
            EmptyState::NoApplications => "No Applications Yet",
            EmptyState::NoMatches => "No Matching Applications",
        }
    }

    pub const fn message(self) -> &'static str {
        match self {
            EmptyState::NoApplications => {
                "Applications will appear here once candidates start applying to your job postings."
            }
            EmptyState::NoMatches => {
                "Try adjusting your search terms or filters to find the applications you're looking for."
            }
        }
    }
}

/// One row of the review list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationCard {
    pub application_id: ApplicationId,
    pub heading: String,
    pub job_title: String,
    pub status: &'static str,
    pub tone: StatusTone,
    pub email: String,
    pub phone: String,
    pub applied_on: String,
    pub resume_url: Option<String>,
}

impl From<&ApplicationListing> for ApplicationCard {
    fn from(listing: &ApplicationListing) -> Self {
        let application = &listing.application;
        Self {
            application_id: application.id.clone(),
            heading: or_na(application.name.as_deref()),
            job_title: listing
                .job_title()
                .unwrap_or(JOB_TITLE_NOT_AVAILABLE)
                .to_string(),
            status: application.status.display_label(),
            tone: application.status.tone(),
            email: or_na(listing.applicant_email()),
            phone: or_na(application.phone.as_deref()),
            applied_on: format_date(Some(application.applied_at)),
            resume_url: listing.resume_url().map(str::to_string),
        }
    }
}

/// Detail drill-down. Every optional field renders as `N/A` when missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationDetail {
    pub application_id: ApplicationId,
    pub applicant_name: String,
    pub email: String,
    pub phone: String,
    pub position: String,
    pub applied: String,
    pub status: &'static str,
    pub tone: StatusTone,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_letter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume_url: Option<String>,
}

impl From<&ApplicationListing> for ApplicationDetail {
    fn from(listing: &ApplicationListing) -> Self {
        let application = &listing.application;
        Self {
            application_id: application.id.clone(),
            applicant_name: or_na(listing.applicant_name()),
            email: or_na(listing.applicant_email()),
            phone: or_na(application.phone.as_deref()),
            position: or_na(listing.job_title()),
            applied: format_date(Some(application.applied_at)),
            status: application.status.display_label(),
            tone: application.status.tone(),
            cover_letter: application.cover_letter.clone(),
            resume_url: listing.resume_url().map(str::to_string),
        }
    }
}

fn or_na(value: Option<&str>) -> String {
    value
        .filter(|value| !value.trim().is_empty())
        .unwrap_or(NOT_AVAILABLE)
        .to_string()
}

/// `Oct 16, 2026`, or `N/A` when there is no date.
pub fn format_date(value: Option<DateTime<Utc>>) -> String {
    match value {
        Some(date) => date.format("%b %-d, %Y").to_string(),
        None => NOT_AVAILABLE.to_string(),
    }
}
