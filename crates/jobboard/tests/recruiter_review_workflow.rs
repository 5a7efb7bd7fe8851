use std::sync::{Arc, Mutex};

use jobboard::board::applications::{
    ApplicationEvent, ApplicationPayload, ApplicationService, ApplicationStatus, EmptyState,
    ReviewQuery, ReviewSession, SortKey, StatusFilter,
};
use jobboard::board::identity::UserProfile;
use jobboard::board::{
    AccountService, Actor, BoardError, EventPublisher, InMemoryBoardStore, JobDraft, JobService,
    PublishError, Registration, Role,
};

#[derive(Default)]
struct RecordingEvents {
    events: Mutex<Vec<ApplicationEvent>>,
}

impl EventPublisher for RecordingEvents {
    fn publish(&self, event: ApplicationEvent) -> Result<(), PublishError> {
        self.events.lock().expect("event mutex").push(event);
        Ok(())
    }
}

fn register(accounts: &AccountService<InMemoryBoardStore>, name: &str, role: Role) -> Actor {
    let user = accounts
        .register(Registration {
            name: name.to_string(),
            email: format!("{}@board.test", name.to_lowercase().replace(' ', ".")),
            role,
            profile: UserProfile::default(),
        })
        .expect("registration succeeds");
    Actor::from_user(&user)
}

#[test]
fn recruiter_reviews_and_decides_on_applications() {
    let store = Arc::new(InMemoryBoardStore::default());
    let events = Arc::new(RecordingEvents::default());
    let accounts = AccountService::new(store.clone());
    let jobs = JobService::new(store.clone());
    let applications = ApplicationService::new(store.clone(), events.clone());

    let owner = register(&accounts, "Rita Owens", Role::Recruiter)
        .into_recruiter()
        .expect("recruiter role");
    let rival = register(&accounts, "Sam Rival", Role::Recruiter)
        .into_recruiter()
        .expect("recruiter role");
    let nina = register(&accounts, "Nina Park", Role::Applicant)
        .into_applicant()
        .expect("applicant role");
    let omar = register(&accounts, "Omar Diaz", Role::Applicant)
        .into_applicant()
        .expect("applicant role");

    let nina_profile = accounts
        .update_resume(&nina, "https://blobs.board.test/resumes/nina.pdf")
        .expect("resume stored");
    assert!(nina_profile.profile.resume.is_some());

    let backend = jobs
        .post(
            &owner,
            JobDraft {
                title: "Backend Engineer".to_string(),
                description: "Rust services".to_string(),
            },
        )
        .expect("job posted");
    let design = jobs
        .post(
            &rival,
            JobDraft {
                title: "Product Designer".to_string(),
                description: String::new(),
            },
        )
        .expect("job posted");

    let from_nina = applications
        .submit(
            &nina,
            &backend.id,
            ApplicationPayload {
                cover_letter: Some("I build APIs.".to_string()),
                phone: Some("555-0101".to_string()),
                name: None,
            },
        )
        .expect("nina applies");
    let from_omar = applications
        .submit(&omar, &backend.id, ApplicationPayload::default())
        .expect("omar applies");
    applications
        .submit(&omar, &design.id, ApplicationPayload::default())
        .expect("omar applies elsewhere");

    let duplicate = applications.submit(&nina, &backend.id, ApplicationPayload::default());
    assert!(matches!(duplicate, Err(BoardError::Conflict(_))));

    let scoped = applications
        .list_for_recruiter(&owner, &ReviewQuery::default())
        .expect("listing loads");
    assert_eq!(scoped.len(), 2);
    assert!(scoped
        .iter()
        .all(|listing| listing.application.job_id == backend.id));

    let mut session = ReviewSession::new(scoped);
    session.set_sort(SortKey::Name);
    let cards = session.cards();
    assert_eq!(cards.len(), 2);
    assert_eq!(session.summary(), "Showing 2 of 2 applications");

    let detail = session
        .detail(&from_nina.id)
        .expect("nina's application is visible");
    assert_eq!(detail.applicant_name, "Nina Park");
    assert_eq!(detail.position, "Backend Engineer");
    assert_eq!(detail.phone, "555-0101");
    assert_eq!(
        detail.resume_url.as_deref(),
        Some("https://blobs.board.test/resumes/nina.pdf")
    );

    let foreign = applications.transition(&rival, &from_nina.id, ApplicationStatus::Approved);
    assert!(matches!(foreign, Err(BoardError::Authorization(_))));

    applications
        .transition(&owner, &from_nina.id, ApplicationStatus::Approved)
        .expect("approve");
    applications
        .transition(&owner, &from_nina.id, ApplicationStatus::Hired)
        .expect("hire");
    applications
        .transition(&owner, &from_omar.id, ApplicationStatus::Rejected)
        .expect("reject");

    let hired = applications
        .list_for_recruiter(
            &owner,
            &ReviewQuery::default().status(StatusFilter::Only(ApplicationStatus::Hired)),
        )
        .expect("filtered listing loads");
    assert_eq!(hired.len(), 1);
    assert_eq!(hired[0].application.id, from_nina.id);

    let mut refreshed = ReviewSession::new(
        applications
            .list_for_recruiter(&owner, &ReviewQuery::default())
            .expect("listing loads"),
    );
    refreshed.set_status_filter(StatusFilter::Only(ApplicationStatus::Pending));
    assert_eq!(refreshed.empty_state(), Some(EmptyState::NoMatches));

    let omar_view = applications
        .list_for_applicant(&omar)
        .expect("applicant listing loads");
    assert_eq!(omar_view.len(), 2);

    let recorded = events.events.lock().expect("event mutex").len();
    assert_eq!(recorded, 6, "three submissions and three transitions");

    let blocked = jobs.delete(&owner, &backend.id);
    assert!(matches!(blocked, Err(BoardError::Conflict(_))));
}
