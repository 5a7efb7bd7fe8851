//! Users, roles and the session identity handed to the board by the identity collaborator.
//!
//! Role checks happen once, when a stored [`User`] is turned into an [`Actor`]. Services take
//! [`Applicant`] or [`Recruiter`] handles, so an operation can never be invoked with the wrong
//! role by accident.

use std::sync::Arc;

use axum::http::HeaderMap;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::error::BoardError;
use super::repository::UserDirectory;

/// Header carrying the authenticated user id, set by the session layer in front of the board.
pub const SESSION_USER_HEADER: &str = "x-user-id";

/// Identifier wrapper for registered users.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Applicant,
    Recruiter,
}

impl Role {
    pub const fn label(self) -> &'static str {
        match self {
            Role::Applicant => "applicant",
            Role::Recruiter => "recruiter",
        }
    }
}

/// Optional profile data. The resume is an opaque blob-storage URL and is never opened here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub profile: UserProfile,
    pub created_at: DateTime<Utc>,
}

/// Registration input as received from the sign-up form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub profile: UserProfile,
}

impl Registration {
    /// Trim and normalise the submitted fields, rejecting blank names and malformed emails.
    pub fn validated(self) -> Result<Self, BoardError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(BoardError::Validation("name must not be empty".to_string()));
        }

        let email = self.email.trim().to_ascii_lowercase();
        let well_formed = email
            .split_once('@')
            .map(|(local, domain)| !local.is_empty() && !domain.is_empty())
            .unwrap_or(false);
        if !well_formed {
            return Err(BoardError::Validation(format!(
                "'{}' is not a valid email address",
                self.email.trim()
            )));
        }

        let mut profile = self.profile;
        if let Some(resume) = profile.resume.take() {
            validate_resume_url(&resume)?;
            profile.resume = Some(resume.trim().to_string());
        }

        Ok(Self {
            name,
            email,
            role: self.role,
            profile,
        })
    }
}

/// Applicant capability handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applicant {
    id: UserId,
}

impl Applicant {
    pub fn id(&self) -> &UserId {
        &self.id
    }
}

/// Recruiter capability handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recruiter {
    id: UserId,
}

impl Recruiter {
    pub fn id(&self) -> &UserId {
        &self.id
    }
}

/// Authenticated caller, tagged by role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Actor {
    Applicant(Applicant),
    Recruiter(Recruiter),
}

impl Actor {
    pub fn from_user(user: &User) -> Self {
        match user.role {
            Role::Applicant => Actor::Applicant(Applicant {
                id: user.id.clone(),
            }),
            Role::Recruiter => Actor::Recruiter(Recruiter {
                id: user.id.clone(),
            }),
        }
    }

    pub fn id(&self) -> &UserId {
        match self {
            Actor::Applicant(applicant) => applicant.id(),
            Actor::Recruiter(recruiter) => recruiter.id(),
        }
    }

    pub fn into_applicant(self) -> Result<Applicant, BoardError> {
        match self {
            Actor::Applicant(applicant) => Ok(applicant),
            Actor::Recruiter(recruiter) => Err(BoardError::Authorization(format!(
                "user {} is a recruiter, not an applicant",
                recruiter.id.0
            ))),
        }
    }

    pub fn into_recruiter(self) -> Result<Recruiter, BoardError> {
        match self {
            Actor::Recruiter(recruiter) => Ok(recruiter),
            Actor::Applicant(applicant) => Err(BoardError::Authorization(format!(
                "user {} is an applicant, not a recruiter",
                applicant.id.0
            ))),
        }
    }
}

/// Read the session user id placed on the request by the identity collaborator.
pub fn session_user_id(headers: &HeaderMap) -> Result<UserId, BoardError> {
    headers
        .get(SESSION_USER_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| UserId(value.to_string()))
        .ok_or(BoardError::Unauthenticated)
}

/// Resolve a user id into a role-tagged actor.
pub fn resolve_actor<S>(directory: &S, user_id: &UserId) -> Result<Actor, BoardError>
where
    S: UserDirectory + ?Sized,
{
    let user = directory
        .fetch_user(user_id)?
        .ok_or_else(|| BoardError::not_found("user", &user_id.0))?;
    Ok(Actor::from_user(&user))
}

pub(crate) fn validate_resume_url(url: &str) -> Result<(), BoardError> {
    let trimmed = url.trim();
    if trimmed.starts_with("https://") || trimmed.starts_with("http://") {
        Ok(())
    } else {
        Err(BoardError::Validation(
            "resume must be an http(s) URL into blob storage".to_string(),
        ))
    }
}

/// Registration and profile maintenance.
pub struct AccountService<S> {
    store: Arc<S>,
}

impl<S> AccountService<S>
where
    S: UserDirectory + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn register(&self, registration: Registration) -> Result<User, BoardError> {
        let registration = registration.validated()?;
        let user = User {
            id: UserId(super::next_id("usr", &super::USER_SEQUENCE)),
            name: registration.name,
            email: registration.email,
            role: registration.role,
            profile: registration.profile,
            created_at: Utc::now(),
        };

        let stored = self.store.insert_user(user)?;
        info!(user_id = %stored.id.0, role = stored.role.label(), "user registered");
        Ok(stored)
    }

    pub fn get(&self, user_id: &UserId) -> Result<User, BoardError> {
        self.store
            .fetch_user(user_id)?
            .ok_or_else(|| BoardError::not_found("user", &user_id.0))
    }

    pub fn actor(&self, user_id: &UserId) -> Result<Actor, BoardError> {
        resolve_actor(self.store.as_ref(), user_id)
    }

    /// Point the applicant's profile at an uploaded resume.
    pub fn update_resume(&self, applicant: &Applicant, resume_url: &str) -> Result<User, BoardError> {
        validate_resume_url(resume_url)?;
        let mut user = self.get(applicant.id())?;
        user.profile.resume = Some(resume_url.trim().to_string());
        self.store.update_user(user.clone())?;
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::memory::InMemoryBoardStore;
    use axum::http::HeaderValue;

    fn registration(email: &str) -> Registration {
        Registration {
            name: "  Amy Adams ".to_string(),
            email: email.to_string(),
            role: Role::Applicant,
            profile: UserProfile::default(),
        }
    }

    #[test]
    fn validated_registration_normalises_fields() {
        let validated = registration(" Amy@Example.COM ")
            .validated()
            .expect("valid registration");
        assert_eq!(validated.name, "Amy Adams");
        assert_eq!(validated.email, "amy@example.com");
    }

    #[test]
    fn validated_registration_rejects_malformed_email() {
        for email in ["", "amy", "@example.com", "amy@"] {
            match registration(email).validated() {
                Err(BoardError::Validation(_)) => {}
                other => panic!("expected validation error for '{email}', got {other:?}"),
            }
        }
    }

    #[test]
    fn registration_and_update_store_the_same_trimmed_resume() {
        let accounts = AccountService::new(Arc::new(InMemoryBoardStore::default()));
        let mut with_resume = registration("amy@example.com");
        with_resume.profile.resume = Some("  https://blobs.example.com/r/amy.pdf\n".to_string());

        let user = accounts.register(with_resume).expect("registration succeeds");
        assert_eq!(
            user.profile.resume.as_deref(),
            Some("https://blobs.example.com/r/amy.pdf")
        );

        let applicant = accounts
            .actor(&user.id)
            .and_then(Actor::into_applicant)
            .expect("applicant role");
        let updated = accounts
            .update_resume(&applicant, " https://blobs.example.com/r/amy.pdf ")
            .expect("resume updated");
        assert_eq!(updated.profile.resume, user.profile.resume);
    }

    #[test]
    fn duplicate_email_registration_conflicts() {
        let accounts = AccountService::new(Arc::new(InMemoryBoardStore::default()));
        accounts
            .register(registration("amy@example.com"))
            .expect("first registration");

        match accounts.register(registration(" AMY@example.com ")) {
            Err(error @ BoardError::Conflict(_)) => {
                assert_eq!(error.status_code(), axum::http::StatusCode::CONFLICT)
            }
            other => panic!("expected conflict, got {other:?}"),
        }
    }

    #[test]
    fn resume_must_be_http_url() {
        assert!(validate_resume_url("https://blobs.example.com/r/amy.pdf").is_ok());
        assert!(matches!(
            validate_resume_url("file:///etc/passwd"),
            Err(BoardError::Validation(_))
        ));
    }

    #[test]
    fn actor_carries_only_its_role_capability() {
        let user = User {
            id: UserId("usr-1".to_string()),
            name: "Rita".to_string(),
            email: "rita@corp.example".to_string(),
            role: Role::Recruiter,
            profile: UserProfile::default(),
            created_at: Utc::now(),
        };

        let actor = Actor::from_user(&user);
        assert_eq!(actor.id(), &user.id);
        assert!(actor.clone().into_recruiter().is_ok());
        assert!(matches!(
            actor.into_applicant(),
            Err(BoardError::Authorization(_))
        ));
    }

    #[test]
    fn session_user_id_requires_non_blank_header() {
        let mut headers = HeaderMap::new();
        assert!(matches!(
            session_user_id(&headers),
            Err(BoardError::Unauthenticated)
        ));

        headers.insert(SESSION_USER_HEADER, HeaderValue::from_static("  "));
        assert!(matches!(
            session_user_id(&headers),
            Err(BoardError::Unauthenticated)
        ));

        headers.insert(SESSION_USER_HEADER, HeaderValue::from_static("usr-000042"));
        assert_eq!(
            session_user_id(&headers).expect("header present"),
            UserId("usr-000042".to_string())
        );
    }
}
