use super::common::*;

use crate::board::applications::domain::{ApplicationId, ApplicationStatus, StatusTone};
use crate::board::applications::review::{format_date, NOT_AVAILABLE};
use crate::board::applications::{EmptyState, ReviewSession, SortKey, StatusFilter};

#[test]
fn session_refilters_snapshot_locally() {
    let mut session = ReviewSession::new(sample_listings());
    assert_eq!(session.visible().len(), 5);
    assert_eq!(session.summary(), "Showing 5 of 5 applications");

    session.set_status_filter(StatusFilter::Only(ApplicationStatus::Pending));
    session.set_sort(SortKey::Oldest);
    assert_eq!(ids(&session.visible()), vec!["a", "d"]);

    session.set_search("CARL");
    assert_eq!(ids(&session.visible()), vec!["d"]);
    assert_eq!(session.summary(), "Showing 1 of 5 applications");

    session.set_search("");
    session.set_status_filter(StatusFilter::All);
    assert_eq!(session.visible().len(), session.total());
}

#[test]
fn empty_states_distinguish_no_data_from_no_matches() {
    let empty = ReviewSession::new(Vec::new());
    let state = empty.empty_state().expect("empty snapshot");
    assert_eq!(state, EmptyState::NoApplications);
    assert_eq!(state.title(), "No Applications Yet");

    let mut session = ReviewSession::new(sample_listings());
    assert_eq!(session.empty_state(), None);

    session.set_search("no such candidate");
    let state = session.empty_state().expect("nothing visible");
    assert_eq!(state, EmptyState::NoMatches);
    assert_eq!(state.title(), "No Matching Applications");
    assert!(state.message().contains("adjusting your search"));
}

#[test]
fn detail_degrades_to_placeholders() {
    let session = ReviewSession::new(sample_listings());

    let detail = session
        .detail(&ApplicationId("d".to_string()))
        .expect("listing d present");
    assert_eq!(detail.applicant_name, "carl jones");
    assert_eq!(detail.email, NOT_AVAILABLE);
    assert_eq!(detail.phone, NOT_AVAILABLE);
    assert_eq!(detail.position, NOT_AVAILABLE);
    assert_eq!(detail.applied, "Oct 14, 2025");
    assert_eq!(detail.status, "Pending");
    assert_eq!(detail.cover_letter, None);
    assert_eq!(detail.resume_url, None);

    let nameless = session
        .detail(&ApplicationId("c".to_string()))
        .expect("listing c present");
    assert_eq!(nameless.applicant_name, NOT_AVAILABLE);

    assert!(session.detail(&ApplicationId("zzz".to_string())).is_none());
}

#[test]
fn detail_without_job_or_applicant_uses_placeholders() {
    let mut orphan = listing("o", ApplicationStatus::Rejected, 2, None, None, None);
    orphan.job = None;
    orphan.applicant = None;
    let session = ReviewSession::new(vec![orphan]);

    let detail = session
        .detail(&ApplicationId("o".to_string()))
        .expect("listing present");
    assert_eq!(detail.applicant_name, NOT_AVAILABLE);
    assert_eq!(detail.email, NOT_AVAILABLE);
    assert_eq!(detail.position, NOT_AVAILABLE);
    assert_eq!(detail.tone, StatusTone::Negative);

    let cards = session.cards();
    assert_eq!(cards[0].job_title, "Job Title Not Available");
    assert_eq!(cards[0].heading, NOT_AVAILABLE);
}

#[test]
fn selecting_detail_leaves_visible_set_untouched() {
    let mut session = ReviewSession::new(sample_listings());
    session.set_sort(SortKey::Name);
    let before = ids(&session.visible());

    let _ = session.detail(&ApplicationId("b".to_string()));
    let _ = session.detail(&ApplicationId("e".to_string()));

    assert_eq!(ids(&session.visible()), before);
}

#[test]
fn approved_and_hired_share_positive_tone() {
    let session = ReviewSession::new(sample_listings());
    let cards = session.cards();

    let tone_of = |id: &str| {
        cards
            .iter()
            .find(|card| card.application_id.0 == id)
            .map(|card| card.tone)
            .expect("card present")
    };
    assert_eq!(tone_of("b"), StatusTone::Positive);
    assert_eq!(tone_of("e"), StatusTone::Positive);
    assert_eq!(tone_of("c"), StatusTone::Negative);
    assert_eq!(tone_of("a"), StatusTone::Waiting);
}

#[test]
fn format_date_uses_short_month() {
    assert_eq!(format_date(Some(at(3, 8))), "Oct 3, 2025");
    assert_eq!(format_date(None), NOT_AVAILABLE);
}
