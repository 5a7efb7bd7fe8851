use super::common::*;

use crate::board::applications::domain::ApplicationStatus;
use crate::board::applications::{ReviewQuery, SortKey, StatusFilter};

#[test]
fn search_matches_any_field_case_insensitively() {
    let listings = sample_listings();

    let by_title = ReviewQuery::default().search("PLATFORM");
    assert_eq!(ids(&by_title.apply(&listings)), vec!["a", "c"]);

    let by_name = ReviewQuery::default().search("amy");
    assert_eq!(ids(&by_name.apply(&listings)), vec!["b"]);

    let by_email = ReviewQuery::default().search("GHOST@");
    assert_eq!(ids(&by_email.apply(&listings)), vec!["c"]);

    // "Dana Platt" matches on name even though her job title does not contain "platt".
    let mixed = ReviewQuery::default().search("plat").sort(SortKey::Oldest);
    assert_eq!(ids(&mixed.apply(&listings)), vec!["c", "a", "e"]);
}

#[test]
fn empty_search_returns_full_status_filtered_set() {
    let listings = sample_listings();

    let everything = ReviewQuery::default();
    assert_eq!(everything.apply(&listings).len(), listings.len());

    let pending = ReviewQuery::default().status(StatusFilter::Only(ApplicationStatus::Pending));
    assert_eq!(ids(&pending.apply(&listings)), vec!["d", "a"]);
}

#[test]
fn newest_and_oldest_order_by_applied_timestamp() {
    let listings = sample_listings();

    let newest = ReviewQuery::default().sort(SortKey::Newest);
    assert_eq!(ids(&newest.apply(&listings)), vec!["d", "b", "e", "a", "c"]);

    let oldest = ReviewQuery::default().sort(SortKey::Oldest);
    assert_eq!(ids(&oldest.apply(&listings)), vec!["c", "a", "e", "b", "d"]);
}

#[test]
fn name_sort_places_missing_names_first() {
    let listings = vec![
        listing("bob", ApplicationStatus::Pending, 3, Some("Bob"), None, None),
        listing("none", ApplicationStatus::Pending, 4, None, None, None),
        listing("amy", ApplicationStatus::Pending, 5, Some("Amy"), None, None),
    ];

    let sorted = ReviewQuery::default().sort(SortKey::Name).apply(&listings);
    assert_eq!(ids(&sorted), vec!["none", "amy", "bob"]);
}

#[test]
fn name_and_job_sorts_ignore_case() {
    let listings = sample_listings();

    let by_name = ReviewQuery::default().sort(SortKey::Name);
    assert_eq!(ids(&by_name.apply(&listings)), vec!["c", "b", "a", "d", "e"]);

    let by_job = ReviewQuery::default().sort(SortKey::Job);
    assert_eq!(ids(&by_job.apply(&listings)), vec!["d", "b", "a", "c", "e"]);
}

#[test]
fn filtering_and_sorting_commute() {
    let listings = sample_listings();
    let filters = [
        StatusFilter::All,
        StatusFilter::Only(ApplicationStatus::Pending),
        StatusFilter::Only(ApplicationStatus::Approved),
        StatusFilter::Only(ApplicationStatus::Rejected),
        StatusFilter::Only(ApplicationStatus::Hired),
    ];
    let sorts = [SortKey::Newest, SortKey::Oldest, SortKey::Name, SortKey::Job];

    for filter in filters {
        for sort in sorts {
            let query = ReviewQuery::default().status(filter).sort(sort);

            let filter_then_sort = query.apply(&listings);

            let mut sorted: Vec<_> = listings.iter().collect();
            query.sort_refs(&mut sorted);
            let sort_then_filter: Vec<_> = sorted
                .into_iter()
                .filter(|listing| query.matches(listing))
                .collect();

            assert_eq!(
                ids(&filter_then_sort),
                ids(&sort_then_filter),
                "filter {filter} with sort {sort:?}"
            );
        }
    }
}

#[test]
fn applying_twice_is_idempotent() {
    let listings = sample_listings();
    let query = ReviewQuery::default()
        .search("mail.test")
        .sort(SortKey::Name);

    let once: Vec<_> = query.apply(&listings).into_iter().cloned().collect();
    let twice = query.apply(&once);
    assert_eq!(ids(&twice), ids(&once.iter().collect::<Vec<_>>()));
}

#[test]
fn options_parse_from_wire_strings() {
    assert_eq!("all".parse::<StatusFilter>(), Ok(StatusFilter::All));
    assert_eq!("".parse::<StatusFilter>(), Ok(StatusFilter::All));
    assert_eq!(
        "Hired".parse::<StatusFilter>(),
        Ok(StatusFilter::Only(ApplicationStatus::Hired))
    );
    assert!("archived".parse::<StatusFilter>().is_err());

    assert_eq!("job".parse::<SortKey>(), Ok(SortKey::Job));
    assert_eq!("".parse::<SortKey>(), Ok(SortKey::Newest));
    assert!("salary".parse::<SortKey>().is_err());
}
