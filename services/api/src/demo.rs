use crate::infra::TracingEventPublisher;
use clap::Args;
use jobboard::board::applications::{
    ApplicationPayload, ApplicationService, ApplicationStatus, ReviewQuery, ReviewSession,
    SortKey, StatusFilter,
};
use jobboard::board::identity::UserProfile;
use jobboard::board::{
    AccountService, Actor, Applicant, InMemoryBoardStore, JobDraft, JobService, Recruiter,
    Registration, Role,
};
use jobboard::config::StoreConfig;
use jobboard::error::AppError;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Search text applied to the recruiter review list.
    #[arg(long)]
    pub(crate) search: Option<String>,
    /// Status filter for the review list (all, pending, approved, rejected, hired).
    #[arg(long, value_parser = parse_status_filter)]
    pub(crate) status: Option<StatusFilter>,
    /// Sort order for the review list (newest, oldest, name, job).
    #[arg(long, value_parser = parse_sort_key)]
    pub(crate) sort: Option<SortKey>,
    /// Skip the recruiter decisions and show every application as pending.
    #[arg(long)]
    pub(crate) skip_decisions: bool,
}

fn parse_status_filter(raw: &str) -> Result<StatusFilter, String> {
    raw.parse::<StatusFilter>().map_err(|err| err.to_string())
}

fn parse_sort_key(raw: &str) -> Result<SortKey, String> {
    raw.parse::<SortKey>().map_err(|err| err.to_string())
}

type DemoStore = InMemoryBoardStore;

struct DemoBoard {
    accounts: AccountService<DemoStore>,
    jobs: JobService<DemoStore>,
    applications: ApplicationService<DemoStore, TracingEventPublisher>,
}

impl DemoBoard {
    fn new() -> Self {
        let store = Arc::new(InMemoryBoardStore::new(StoreConfig::default()));
        Self {
            accounts: AccountService::new(store.clone()),
            jobs: JobService::new(store.clone()),
            applications: ApplicationService::new(store, Arc::new(TracingEventPublisher)),
        }
    }

    fn register(&self, name: &str, email: &str, role: Role) -> Result<Actor, AppError> {
        let user = self.accounts.register(Registration {
            name: name.to_string(),
            email: email.to_string(),
            role,
            profile: UserProfile::default(),
        })?;
        Ok(Actor::from_user(&user))
    }

    fn recruiter(&self, name: &str, email: &str) -> Result<Recruiter, AppError> {
        Ok(self.register(name, email, Role::Recruiter)?.into_recruiter()?)
    }

    fn applicant(&self, name: &str, email: &str) -> Result<Applicant, AppError> {
        Ok(self.register(name, email, Role::Applicant)?.into_applicant()?)
    }
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        search,
        status,
        sort,
        skip_decisions,
    } = args;

    println!("Job board demo");
    let board = DemoBoard::new();

    let rita = board.recruiter("Rita Owens", "rita@board.test")?;
    let sam = board.recruiter("Sam Rival", "sam@board.test")?;
    let nina = board.applicant("Nina Park", "nina@board.test")?;
    let omar = board.applicant("Omar Diaz", "omar@board.test")?;
    let lena = board.applicant("Lena Fox", "lena@board.test")?;
    board
        .accounts
        .update_resume(&nina, "https://blobs.board.test/resumes/nina-park.pdf")?;

    let backend = board.jobs.post(
        &rita,
        JobDraft {
            title: "Backend Engineer".to_string(),
            description: "Own the hiring pipeline services.".to_string(),
        },
    )?;
    let analyst = board.jobs.post(
        &rita,
        JobDraft {
            title: "Data Analyst".to_string(),
            description: "Report on applicant funnels.".to_string(),
        },
    )?;
    let designer = board.jobs.post(
        &sam,
        JobDraft {
            title: "Product Designer".to_string(),
            description: String::new(),
        },
    )?;
    println!(
        "- Posted {} jobs ({}, {} by Rita; {} by Sam)",
        board.jobs.list()?.len(),
        backend.title,
        analyst.title,
        designer.title
    );

    let nina_backend = board.applications.submit(
        &nina,
        &backend.id,
        ApplicationPayload {
            cover_letter: Some("I have shipped three hiring platforms.".to_string()),
            phone: Some("555-0101".to_string()),
            name: None,
        },
    )?;
    let omar_backend = board.applications.submit(
        &omar,
        &backend.id,
        ApplicationPayload {
            name: Some("Omar D.".to_string()),
            ..ApplicationPayload::default()
        },
    )?;
    let lena_analyst =
        board
            .applications
            .submit(&lena, &analyst.id, ApplicationPayload::default())?;
    board
        .applications
        .submit(&omar, &designer.id, ApplicationPayload::default())?;
    println!("- Received 4 applications across both recruiters");

    match board
        .applications
        .submit(&nina, &backend.id, ApplicationPayload::default())
    {
        Ok(_) => println!("  Duplicate submission unexpectedly accepted"),
        Err(err) => println!("  Duplicate submission refused: {err}"),
    }

    if !skip_decisions {
        board
            .applications
            .transition(&rita, &nina_backend.id, ApplicationStatus::Approved)?;
        board
            .applications
            .transition(&rita, &nina_backend.id, ApplicationStatus::Hired)?;
        board
            .applications
            .transition(&rita, &omar_backend.id, ApplicationStatus::Rejected)?;
        println!("- Rita hired Nina and rejected Omar for {}", backend.title);

        match board
            .applications
            .transition(&sam, &lena_analyst.id, ApplicationStatus::Approved)
        {
            Ok(_) => println!("  Foreign recruiter decision unexpectedly accepted"),
            Err(err) => println!("  Sam cannot decide on Rita's applicants: {err}"),
        }
        match board
            .applications
            .transition(&rita, &omar_backend.id, ApplicationStatus::Pending)
        {
            Ok(_) => println!("  Reopening a rejection unexpectedly accepted"),
            Err(err) => println!("  Rejections are final: {err}"),
        }
    }

    let snapshot = board
        .applications
        .list_for_recruiter(&rita, &ReviewQuery::default())?;
    let mut session = ReviewSession::new(snapshot);
    if let Some(search) = search {
        session.set_search(search);
    }
    if let Some(status) = status {
        session.set_status_filter(status);
    }
    if let Some(sort) = sort {
        session.set_sort(sort);
    }

    let query = session.query();
    println!(
        "\nApplication Review (status: {}, sort: {:?}, search: {:?})",
        query.status_filter, query.sort_by, query.search_text
    );
    println!("{}", session.summary());

    if let Some(empty) = session.empty_state() {
        println!("  {}", empty.title());
        println!("  {}", empty.message());
        return Ok(());
    }

    for card in session.cards() {
        println!(
            "- {} | {} | {} | applied {}",
            card.heading, card.job_title, card.status, card.applied_on
        );
        println!("    email {} | phone {}", card.email, card.phone);
    }

    if let Some(detail) = session.detail(&nina_backend.id) {
        println!("\nDetail for {}", detail.applicant_name);
        println!("  Position: {}", detail.position);
        println!("  Applied: {}", detail.applied);
        println!("  Status: {}", detail.status);
        println!("  Email: {} | Phone: {}", detail.email, detail.phone);
        if let Some(resume) = &detail.resume_url {
            println!("  Resume: {resume}");
        }
        if let Some(letter) = &detail.cover_letter {
            println!("  Cover letter: {letter}");
        }
    }

    Ok(())
}
