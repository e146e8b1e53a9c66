use std::io::Cursor;
use std::sync::Arc;

use parttime::identity::UserId;
use parttime::storage::{
    InMemoryApplicationRepository, InMemoryDirectory, InMemoryNotificationRepository,
};
use parttime::workflows::applications::{
    ApplicationService, ApplicationServiceError, ApplicationStatus, MatchConfig,
};
use parttime::workflows::catalog::{CatalogImporter, JobId};
use parttime::workflows::notifications::{NotificationCategory, NotificationCenter};

const CATALOG: &str = "\
kind,id,user_id,name,title,description,category,location,skills,education_background
job,job-barista,user-cafe,Bean There,Barista,Barista needed for coffee shop,Hospitality,Downtown,,
job,job-tutor,user-school,Bright Minds,Math Tutor,Algebra tutor for evening sessions,Education,Northside,,
seeker,seeker-sam,user-sam,Sam Rivera,,,,,barista coffee experience,
seeker,seeker-priya,user-priya,Priya Nair,,,,,algebra tutoring,BSc Mathematics
";

struct Marketplace {
    service: ApplicationService<
        InMemoryApplicationRepository,
        InMemoryDirectory,
        NotificationCenter<InMemoryNotificationRepository>,
    >,
    inbox: Arc<NotificationCenter<InMemoryNotificationRepository>>,
}

fn marketplace() -> Marketplace {
    let snapshot = CatalogImporter::from_reader(Cursor::new(CATALOG)).expect("catalog parses");
    let directory = Arc::new(InMemoryDirectory::from_snapshot(snapshot));
    let inbox = Arc::new(NotificationCenter::new(Arc::new(
        InMemoryNotificationRepository::default(),
    )));
    let service = ApplicationService::new(
        Arc::new(InMemoryApplicationRepository::default()),
        directory,
        inbox.clone(),
        MatchConfig::default(),
    );
    Marketplace { service, inbox }
}

fn user(id: &str) -> UserId {
    UserId(id.to_string())
}

#[test]
fn seeker_applies_employer_reviews_and_everyone_is_informed() {
    let market = marketplace();

    let barista = market
        .service
        .apply(&user("user-sam"), &JobId("job-barista".to_string()))
        .expect("sam applies");
    assert_eq!(barista.match_score, 70);
    assert_eq!(barista.status, ApplicationStatus::Pending);

    let tutor = market
        .service
        .apply(&user("user-sam"), &JobId("job-tutor".to_string()))
        .expect("sam applies to a second job");
    assert_eq!(tutor.match_score, 20);

    let employer_inbox = market.inbox.inbox(&user("user-cafe")).expect("inbox");
    assert_eq!(employer_inbox.len(), 1);
    assert_eq!(employer_inbox[0].category, NotificationCategory::Jobs);

    market
        .service
        .update_status(&user("user-cafe"), &barista.id, "Accepted")
        .expect("employer accepts");

    assert_eq!(market.inbox.unread_count(&user("user-sam")).expect("count"), 1);

    let mine = market
        .service
        .applications_for_seeker(&user("user-sam"))
        .expect("listing");
    let statuses: Vec<&str> = mine.iter().map(|view| view.status).collect();
    assert_eq!(statuses, vec!["Pending", "Accepted"]);

    match market.service.withdraw(&user("user-sam"), &barista.id) {
        Err(ApplicationServiceError::InvalidState { status }) => {
            assert_eq!(status, ApplicationStatus::Accepted)
        }
        other => panic!("expected invalid state, got {other:?}"),
    }

    market
        .service
        .withdraw(&user("user-sam"), &tutor.id)
        .expect("pending application withdrawn");
    let school_inbox = market.inbox.inbox(&user("user-school")).expect("inbox");
    assert_eq!(school_inbox.len(), 2);
    assert!(school_inbox[0].message.contains("withdrawn"));
}

#[test]
fn employers_only_see_applications_for_their_jobs() {
    let market = marketplace();
    market
        .service
        .apply(&user("user-sam"), &JobId("job-barista".to_string()))
        .expect("sam applies");
    market
        .service
        .apply(&user("user-priya"), &JobId("job-tutor".to_string()))
        .expect("priya applies");

    let cafe = market
        .service
        .applications_for_employer(&user("user-cafe"))
        .expect("cafe listing");
    assert_eq!(cafe.len(), 1);
    assert_eq!(cafe[0].seeker_name.as_deref(), Some("Sam Rivera"));

    let school = market
        .service
        .applications_for_employer(&user("user-school"))
        .expect("school listing");
    assert_eq!(school.len(), 1);
    assert_eq!(school[0].job_title, "Math Tutor");
}
