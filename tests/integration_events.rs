mod common;

use chrono::{TimeDelta, Utc};

use collegium::modules::events::controller::EVENTS_LOAD_FAILED_MESSAGE;
use collegium::modules::events::{EventsScreen, EventsStatus};
use collegium::session::RbacSession;
use collegium::ErrorKind;
use collegium_config::SessionConfig;
use collegium_models::NewEvent;
use collegium_store::DataService;

use common::{event, loaded_session, store_with_roles, PAGE_SIZE, TEST_USER};

fn new_event(title: &str) -> NewEvent {
    NewEvent {
        title: title.to_string(),
        description: Some("Annual inter-college meet".to_string()),
        venue: Some("Sports Ground".to_string()),
        starts_at: Utc::now() + TimeDelta::days(14),
        ends_at: None,
    }
}

#[tokio::test]
async fn test_screen_shows_loading_while_session_resolves() {
    let store = store_with_roles(&["student"]).await;
    let session = RbacSession::new(store.clone(), TEST_USER);

    let screen = EventsScreen::new(store.clone(), PAGE_SIZE);
    screen.load(&session.state()).await.unwrap();

    assert_eq!(screen.status(), EventsStatus::Loading);
    assert!(!screen.can_create(&session.state()));
}

#[tokio::test]
async fn test_denied_user_sees_exact_message_and_no_create_button() {
    // Accountants hold no events permission at all.
    let store = store_with_roles(&["accountant"]).await;
    store.seed_event(event("Convocation", 10)).await;

    let session = loaded_session(&store).await;
    let screen = EventsScreen::new(store.clone(), PAGE_SIZE);
    screen.load(&session.state()).await.unwrap();

    assert_eq!(
        screen.status(),
        EventsStatus::Denied {
            message: "You do not have permission to access Events.".to_string()
        }
    );
    assert!(screen.events().is_empty());
    assert!(!screen.can_create(&session.state()));
}

#[tokio::test]
async fn test_viewer_sees_list_but_not_create_button() {
    let store = store_with_roles(&["student"]).await;
    store.seed_event(event("Convocation", 10)).await;
    store.seed_event(event("Tech Fest", 5)).await;

    let session = loaded_session(&store).await;
    let screen = EventsScreen::new(store.clone(), PAGE_SIZE);
    screen.load(&session.state()).await.unwrap();

    assert_eq!(screen.status(), EventsStatus::Ready);
    let events = screen.events();
    assert_eq!(events.len(), 2);
    // Most recent first.
    assert_eq!(events[0].title, "Tech Fest");
    assert!(!screen.can_create(&session.state()));

    let err = screen
        .create(&session.state(), new_event("Sneaky"), TEST_USER)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Forbidden);
}

#[tokio::test]
async fn test_missing_table_renders_distinct_state() {
    let store = store_with_roles(&["student"]).await;
    store.mark_table_missing("events").await;

    let session = loaded_session(&store).await;
    let screen = EventsScreen::new(store.clone(), PAGE_SIZE);
    screen.load(&session.state()).await.unwrap();

    assert_eq!(screen.status(), EventsStatus::TableMissing);
    assert!(screen.events().is_empty());
}

#[tokio::test]
async fn test_generic_failure_keeps_previous_list() {
    let store = store_with_roles(&["student"]).await;
    store.seed_event(event("Convocation", 10)).await;

    let session = loaded_session(&store).await;
    let screen = EventsScreen::new(store.clone(), PAGE_SIZE);
    screen.load(&session.state()).await.unwrap();
    assert_eq!(screen.events().len(), 1);

    store.mark_table_failing("events").await;
    let err = screen.load(&session.state()).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Transport);

    assert_eq!(
        screen.status(),
        EventsStatus::Failed {
            message: EVENTS_LOAD_FAILED_MESSAGE.to_string()
        }
    );
    // Retry affordance: previously loaded rows stay on screen.
    assert_eq!(screen.events().len(), 1);
}

#[tokio::test]
async fn test_manager_creates_event_and_list_refetches() {
    let store = store_with_roles(&["department_admin"]).await;

    let session = loaded_session(&store).await;
    let screen = EventsScreen::new(store.clone(), PAGE_SIZE);
    screen.load(&session.state()).await.unwrap();
    assert!(screen.can_create(&session.state()));

    let created = screen
        .create(&session.state(), new_event("Sports Day"), TEST_USER)
        .await
        .unwrap();
    assert_eq!(created.title, "Sports Day");
    assert_eq!(created.created_by, Some(TEST_USER));

    let events = screen.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].id, created.id);
    assert!(!screen.is_saving());
}

#[tokio::test]
async fn test_create_validation_is_advisory_but_local() {
    let store = store_with_roles(&["department_admin"]).await;
    let session = loaded_session(&store).await;
    let screen = EventsScreen::new(store.clone(), PAGE_SIZE);

    let err = screen
        .create(&session.state(), new_event(""), TEST_USER)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);

    let mut inverted = new_event("Backwards");
    inverted.ends_at = Some(inverted.starts_at - TimeDelta::hours(1));
    let err = screen
        .create(&session.state(), inverted, TEST_USER)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);

    // Nothing reached the store.
    assert!(store.events(10).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_app_state_wires_a_screen() {
    let store = store_with_roles(&["department_admin"]).await;
    let state = collegium::AppState::new(store.clone(), SessionConfig::default());

    let session = RbacSession::new(state.store.clone(), TEST_USER);
    session.refresh_roles().await;

    let screen = EventsScreen::new(state.store.clone(), state.session_config.page_size);
    screen.load(&session.state()).await.unwrap();
    assert_eq!(screen.status(), EventsStatus::Ready);
}

#[tokio::test]
async fn test_manager_deletes_event() {
    let store = store_with_roles(&["principal"]).await;
    let doomed = event("Cancelled Fair", 10);
    store.seed_event(doomed.clone()).await;

    let session = loaded_session(&store).await;
    let screen = EventsScreen::new(store.clone(), PAGE_SIZE);
    screen.load(&session.state()).await.unwrap();

    screen.delete(&session.state(), doomed.id).await.unwrap();
    assert!(screen.events().is_empty());
}
