use chrono::Utc;
use proofroom_core::SortOrder;
use proofroom_testing::{TestWorld, fixtures};
use proofroom_types::{
    CommentStatus, MediaKind, MediaStatus, NoticeKind, ProjectStatus, Role,
};

// The end-to-end review scenario: create a listing, upload two photo
// versions, approve the second, and exchange a comment.
#[test]
fn full_review_scenario() {
    let world = TestWorld::new();
    let desk = &world.desk;

    let project = desk.projects().create(fixtures::test_house()).unwrap();
    let id = &project.id;

    let v1 = desk
        .media()
        .add_version(id, MediaKind::Photo, "p1.jpg", "url1", None)
        .unwrap();
    assert_eq!(v1.version, 1);
    assert_eq!(v1.status, MediaStatus::UnderReview);

    let notices = desk.notifications().list(id).unwrap();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].kind, NoticeKind::NewPhoto);

    let v2 = desk
        .media()
        .add_version(id, MediaKind::Photo, "p2.jpg", "url2", None)
        .unwrap();
    assert_eq!(v2.version, 2);
    assert_eq!(desk.media().current(id).unwrap().unwrap().version, 2);

    desk.media()
        .set_status(id, &v2.id, MediaStatus::Approved, Some("client@x.com"))
        .unwrap();
    assert_eq!(
        desk.projects().get(id).unwrap().unwrap().status,
        ProjectStatus::Completed
    );

    let comment = desk
        .comments()
        .post(id, "Looks great", Role::Client, Some("A"))
        .unwrap();
    assert_eq!(comment.status, CommentStatus::New);
    assert_eq!(comment.version.as_deref(), Some("v2"));
    assert_eq!(desk.comments().count(id).unwrap(), 1);

    let notices = desk.notifications().list(id).unwrap();
    assert_eq!(notices[0].kind, NoticeKind::CommentAwaiting);
}

#[test]
fn state_survives_reopening_the_workspace() {
    let world = TestWorld::new();
    let id = {
        let desk = &world.desk;
        let project = desk.projects().create(fixtures::test_house()).unwrap();
        desk.media()
            .add_version(&project.id, MediaKind::Video, "tour.mp4", "url1", None)
            .unwrap();
        desk.comments()
            .post(&project.id, "First pass", Role::Agent, None)
            .unwrap();
        project.id
    };

    // A second open over the same directory sees deep-equal state,
    // datetimes included.
    let reopened = proofroom_sdk::Proofroom::open(world.data_dir()).unwrap();
    let project = reopened.projects().get(&id).unwrap().unwrap();
    assert_eq!(project.name, "Test House");

    let media = reopened.media().list(&id).unwrap();
    assert_eq!(media.len(), 1);
    assert_eq!(media[0].file_name, "tour.mp4");
    assert_eq!(media[0].kind, MediaKind::Video);

    let comments = reopened.comments().list(&id, SortOrder::OldestFirst).unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].text, "First pass");

    let notices = reopened.notifications().list(&id).unwrap();
    assert_eq!(notices.len(), 2);
    assert_eq!(reopened.notifications().unread_count(&id).unwrap(), 2);
}

#[test]
fn deleting_a_project_empties_every_store() {
    let world = TestWorld::new();
    let desk = &world.desk;

    let project = desk.projects().create(fixtures::test_house()).unwrap();
    let id = &project.id;
    desk.media()
        .add_version(id, MediaKind::Photo, "p1.jpg", "url1", None)
        .unwrap();
    desk.comments()
        .post(id, "a comment", Role::Client, None)
        .unwrap();
    assert!(!desk.notifications().list(id).unwrap().is_empty());

    assert!(desk.projects().delete(id).unwrap());

    assert!(desk.projects().get(id).unwrap().is_none());
    assert!(desk.media().list(id).unwrap().is_empty());
    assert!(
        desk.comments()
            .list(id, SortOrder::OldestFirst)
            .unwrap()
            .is_empty()
    );
    assert!(desk.notifications().list(id).unwrap().is_empty());
    assert_eq!(desk.notifications().unread_count(id).unwrap(), 0);
}

#[test]
fn mark_all_read_is_idempotent() {
    let world = TestWorld::new();
    let desk = &world.desk;

    let project = desk.projects().create(fixtures::test_house()).unwrap();
    let id = &project.id;
    desk.media()
        .add_version(id, MediaKind::Photo, "p1.jpg", "url1", None)
        .unwrap();
    desk.media()
        .add_version(id, MediaKind::Photo, "p2.jpg", "url2", None)
        .unwrap();
    assert_eq!(desk.notifications().unread_count(id).unwrap(), 2);

    desk.notifications().mark_all_read(id).unwrap();
    assert_eq!(desk.notifications().unread_count(id).unwrap(), 0);
    desk.notifications().mark_all_read(id).unwrap();
    assert_eq!(desk.notifications().unread_count(id).unwrap(), 0);
}

#[test]
fn rejecting_a_version_reopens_feedback() {
    let world = TestWorld::new();
    let desk = &world.desk;

    let project = desk.projects().create(fixtures::test_house()).unwrap();
    let id = &project.id;
    let media = desk
        .media()
        .add_version(id, MediaKind::Photo, "p1.jpg", "url1", None)
        .unwrap();

    desk.media()
        .set_status(id, &media.id, MediaStatus::NotApproved, Some("client@x.com"))
        .unwrap();
    assert_eq!(
        desk.projects().get(id).unwrap().unwrap().status,
        ProjectStatus::AwaitingFeedback
    );
}

#[test]
fn priority_is_recomputed_on_listing() {
    let world = TestWorld::new();
    let desk = &world.desk;

    desk.projects()
        .create(fixtures::project("Due Soon", "B", "b@x.com", 1))
        .unwrap();
    desk.projects()
        .create(fixtures::project("Far Out", "C", "c@x.com", 14))
        .unwrap();

    let now = Utc::now();
    let ordered = desk.projects().list_by_priority(now).unwrap();
    assert_eq!(ordered[0].name, "Due Soon");
    assert_eq!(
        ordered[0].priority(now),
        proofroom_types::Priority::Urgent
    );
    assert_eq!(
        ordered[1].priority(now),
        proofroom_types::Priority::Normal
    );
}
