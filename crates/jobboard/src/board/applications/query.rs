//! Filter, search and sort options shared by the scoped query and the review view.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use super::domain::{ApplicationListing, ApplicationStatus, UnknownStatus};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ApplicationStatus),
}

impl StatusFilter {
    pub fn matches(self, status: ApplicationStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == status,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Only(status) => status.label(),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        trimmed.parse().map(StatusFilter::Only)
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for StatusFilter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for StatusFilter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Newest,
    Oldest,
    Name,
    Job,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort option '{0}' (expected newest, oldest, name or job)")]
pub struct UnknownSortKey(pub String);

impl FromStr for SortKey {
    type Err = UnknownSortKey;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "newest" => Ok(SortKey::Newest),
            "oldest" => Ok(SortKey::Oldest),
            "name" => Ok(SortKey::Name),
            "job" => Ok(SortKey::Job),
            _ => Err(UnknownSortKey(value.to_string())),
        }
    }
}

impl SortKey {
    pub fn compare(self, a: &ApplicationListing, b: &ApplicationListing) -> Ordering {
        match self {
            SortKey::Newest => b.application.applied_at.cmp(&a.application.applied_at),
            SortKey::Oldest => a.application.applied_at.cmp(&b.application.applied_at),
            SortKey::Name => {
                compare_text(a.applicant_name().unwrap_or(""), b.applicant_name().unwrap_or(""))
            }
            SortKey::Job => compare_text(a.job_title().unwrap_or(""), b.job_title().unwrap_or("")),
        }
    }
}

/// Case-insensitive ordering with a case-sensitive tiebreak so the result is total.
fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Composable options for narrowing and ordering a set of application listings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewQuery {
    #[serde(default)]
    pub status_filter: StatusFilter,
    #[serde(default)]
    pub search_text: String,
    #[serde(default)]
    pub sort_by: SortKey,
}

impl ReviewQuery {
    pub fn status(mut self, filter: StatusFilter) -> Self {
        self.status_filter = filter;
        self
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    pub fn sort(mut self, key: SortKey) -> Self {
        self.sort_by = key;
        self
    }

    /// Case-insensitive substring match on job title, applicant name or applicant email.
    /// An empty search matches everything, including listings with none of those fields.
    pub fn matches_search(&self, listing: &ApplicationListing) -> bool {
        if self.search_text.is_empty() {
            return true;
        }
        let needle = self.search_text.to_lowercase();
        [
            listing.job_title(),
            listing.applicant_name(),
            listing.applicant_email(),
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&needle))
    }

    pub fn matches(&self, listing: &ApplicationListing) -> bool {
        self.status_filter.matches(listing.application.status) && self.matches_search(listing)
    }

    /// Keep matching listings, then order them. The sort is stable, so filtering before or
    /// after sorting yields the same sequence.
    pub fn apply<'a, I>(&self, listings: I) -> Vec<&'a ApplicationListing>
    where
        I: IntoIterator<Item = &'a ApplicationListing>,
    {
        let mut visible: Vec<&ApplicationListing> = listings
            .into_iter()
            .filter(|listing| self.matches(listing))
            .collect();
        self.sort_refs(&mut visible);
        visible
    }

    /// Owned variant of [`ReviewQuery::apply`].
    pub fn apply_owned(&self, listings: Vec<ApplicationListing>) -> Vec<ApplicationListing> {
        let mut visible: Vec<ApplicationListing> = listings
            .into_iter()
            .filter(|listing| self.matches(listing))
            .collect();
        visible.sort_by(|a, b| self.sort_by.compare(a, b));
        visible
    }

    pub fn sort_refs(&self, listings: &mut [&ApplicationListing]) {
        listings.sort_by(|a, b| self.sort_by.compare(a, b));
    }
}
