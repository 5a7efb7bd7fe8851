//! Allowed status transitions for an application.
//!
//! The table below is the only place transitions are defined; [`ensure_transition`] and the
//! service consult it rather than branching on individual states.

use super::domain::ApplicationStatus;
use crate::board::error::BoardError;

use ApplicationStatus::{Approved, Hired, Pending, Rejected};

/// Current status followed by the statuses it may move to.
const TRANSITIONS: [(ApplicationStatus, &[ApplicationStatus]); 4] = [
    (Pending, &[Approved, Rejected]),
    (Approved, &[Hired, Rejected]),
    (Rejected, &[]),
    (Hired, &[]),
];

pub const INITIAL_STATUS: ApplicationStatus = Pending;

pub fn allowed_transitions(from: ApplicationStatus) -> &'static [ApplicationStatus] {
    TRANSITIONS
        .iter()
        .find(|(status, _)| *status == from)
        .map(|(_, next)| *next)
        .unwrap_or(&[])
}

pub fn can_transition(from: ApplicationStatus, to: ApplicationStatus) -> bool {
    allowed_transitions(from).contains(&to)
}

pub fn is_terminal(status: ApplicationStatus) -> bool {
    allowed_transitions(status).is_empty()
}

pub fn ensure_transition(
    from: ApplicationStatus,
    to: ApplicationStatus,
) -> Result<(), BoardError> {
    if can_transition(from, to) {
        Ok(())
    } else {
        Err(BoardError::InvalidTransition { from, to })
    }
}
