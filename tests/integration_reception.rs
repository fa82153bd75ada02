mod common;

use collegium::modules::reception::ReceptionDesk;
use collegium::session::ResolvedAccess;
use collegium::ErrorKind;
use collegium_models::LatePassRequest;

use common::{loaded_session, store_with_roles, student};

fn access_of(session: &collegium::RbacSession) -> ResolvedAccess {
    session.state().access().unwrap().clone()
}

fn late_pass(admission_no: &str) -> LatePassRequest {
    LatePassRequest {
        admission_no: admission_no.to_string(),
        notes: Some("Bus breakdown on route 7".to_string()),
    }
}

#[tokio::test]
async fn test_receptionist_issues_late_pass() {
    let store = store_with_roles(&["receptionist"]).await;
    store.seed_student(student("ADM-2026-042", "K. Pillai")).await;

    let session = loaded_session(&store).await;
    let desk = ReceptionDesk::new(store.clone());

    let outcome = desk
        .issue_late_pass(&access_of(&session), late_pass("ADM-2026-042"))
        .await
        .unwrap();
    assert!(outcome.success);
}

#[tokio::test]
async fn test_unknown_admission_number_is_a_logical_rejection() {
    let store = store_with_roles(&["receptionist"]).await;

    let session = loaded_session(&store).await;
    let desk = ReceptionDesk::new(store.clone());

    let outcome = desk
        .issue_late_pass(&access_of(&session), late_pass("ADM-0000-000"))
        .await
        .unwrap();
    assert!(!outcome.success);
    assert_eq!(outcome.message, "No student with that admission number");
}

#[tokio::test]
async fn test_teacher_cannot_use_the_desk() {
    let store = store_with_roles(&["teacher"]).await;
    let session = loaded_session(&store).await;
    let desk = ReceptionDesk::new(store.clone());
    let access = access_of(&session);

    let err = desk
        .issue_late_pass(&access, late_pass("ADM-2026-042"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Forbidden);

    let err = desk.find_student(&access, "ADM-2026-042").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Forbidden);
}

#[tokio::test]
async fn test_blank_admission_number_fails_validation() {
    let store = store_with_roles(&["receptionist"]).await;
    let session = loaded_session(&store).await;
    let desk = ReceptionDesk::new(store.clone());
    let access = access_of(&session);

    let err = desk
        .issue_late_pass(&access, late_pass(""))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);

    let err = desk.find_student(&access, "   ").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
}

#[tokio::test]
async fn test_student_lookup() {
    let store = store_with_roles(&["receptionist"]).await;
    store.seed_student(student("ADM-2026-042", "K. Pillai")).await;

    let session = loaded_session(&store).await;
    let desk = ReceptionDesk::new(store.clone());
    let access = access_of(&session);

    let found = desk
        .find_student(&access, "ADM-2026-042")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.student_name, "K. Pillai");

    let missing = desk.find_student(&access, "ADM-1999-001").await.unwrap();
    assert!(missing.is_none());
}
