mod common;

use std::sync::Arc;

use collegium::modules::approvals::controller::DECISION_FAILED_MESSAGE;
use collegium::modules::approvals::{ApprovalScreen, DiaryFlow, Feedback, PlannerFlow};
use collegium::session::ResolvedAccess;
use collegium::ErrorKind;
use collegium_models::{Decision, DiaryStatus, PlannerStatus, RpcOutcome};
use collegium_store::{DataService, StoreError};

use common::{diary, loaded_session, planner, store_with_roles, PAGE_SIZE};

fn access_of(session: &collegium::RbacSession) -> ResolvedAccess {
    session.state().access().unwrap().clone()
}

#[tokio::test]
async fn test_first_stage_queue_lists_submitted_diaries_only() {
    let store = store_with_roles(&["hod"]).await;
    let submitted = diary(DiaryStatus::Submitted, 5);
    store.seed_diary(submitted.clone()).await;
    store.seed_diary(diary(DiaryStatus::HodApproved, 10)).await;
    store.seed_diary(diary(DiaryStatus::PrincipalApproved, 15)).await;
    store.seed_diary(diary(DiaryStatus::Rejected, 20)).await;
    store.seed_diary(diary(DiaryStatus::Draft, 25)).await;

    let session = loaded_session(&store).await;
    let screen = ApprovalScreen::<DiaryFlow>::new(store.clone(), PAGE_SIZE);
    screen.refresh(&access_of(&session)).await.unwrap();

    let items = screen.items();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, submitted.id);
    assert_eq!(items[0].status, DiaryStatus::Submitted);
}

#[tokio::test]
async fn test_final_stage_queue_lists_hod_approved_diaries_only() {
    let store = store_with_roles(&["principal"]).await;
    let awaiting_final = diary(DiaryStatus::HodApproved, 5);
    store.seed_diary(diary(DiaryStatus::Submitted, 1)).await;
    store.seed_diary(awaiting_final.clone()).await;
    store.seed_diary(diary(DiaryStatus::PrincipalApproved, 9)).await;

    let session = loaded_session(&store).await;
    let screen = ApprovalScreen::<DiaryFlow>::new(store.clone(), PAGE_SIZE);
    screen.refresh(&access_of(&session)).await.unwrap();

    let items = screen.items();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, awaiting_final.id);
}

#[tokio::test]
async fn test_non_approver_queue_is_empty_without_querying() {
    let store = store_with_roles(&["teacher"]).await;
    store.seed_diary(diary(DiaryStatus::Submitted, 5)).await;
    // Even a broken table does not matter: no queue, no query.
    store.mark_table_failing("work_diaries").await;

    let session = loaded_session(&store).await;
    let screen = ApprovalScreen::<DiaryFlow>::new(store.clone(), PAGE_SIZE);
    screen.refresh(&access_of(&session)).await.unwrap();

    assert!(screen.items().is_empty());
}

#[tokio::test]
async fn test_queue_is_recent_first_and_bounded() {
    let store = store_with_roles(&["hod"]).await;
    for age in 0..30 {
        store.seed_diary(diary(DiaryStatus::Submitted, age * 3)).await;
    }

    let session = loaded_session(&store).await;
    let screen = ApprovalScreen::<DiaryFlow>::new(store.clone(), 10);
    screen.refresh(&access_of(&session)).await.unwrap();

    let items = screen.items();
    assert_eq!(items.len(), 10);
    for pair in items.windows(2) {
        assert!(pair[0].created_at >= pair[1].created_at);
    }
}

#[tokio::test]
async fn test_successful_decision_clears_and_refetches() {
    let store = store_with_roles(&["hod"]).await;
    let submitted = diary(DiaryStatus::Submitted, 5);
    store.seed_diary(submitted.clone()).await;

    let session = loaded_session(&store).await;
    let access = access_of(&session);
    let screen = ApprovalScreen::<DiaryFlow>::new(store.clone(), PAGE_SIZE);
    screen.refresh(&access).await.unwrap();
    screen.select(submitted.id).await.unwrap();
    screen.set_reason("Looks thorough");

    screen.decide(&access, Decision::Approve).await.unwrap();

    assert!(screen.selected().is_none());
    assert!(screen.reason().is_empty());
    assert!(matches!(screen.feedback(), Some(Feedback::Success(_))));
    // The diary advanced to hod_approved, so the refetched queue is empty.
    assert!(screen.items().is_empty());
    assert!(!screen.is_saving());
}

#[tokio::test]
async fn test_logical_rejection_surfaces_message_and_changes_nothing() {
    let store = store_with_roles(&["hod"]).await;
    let submitted = diary(DiaryStatus::Submitted, 5);
    store.seed_diary(submitted.clone()).await;

    let session = loaded_session(&store).await;
    let access = access_of(&session);
    let screen = ApprovalScreen::<DiaryFlow>::new(store.clone(), PAGE_SIZE);
    screen.refresh(&access).await.unwrap();
    screen.select(submitted.id).await.unwrap();
    screen.set_reason("On second thought");

    store
        .script_decision(Ok(RpcOutcome {
            success: false,
            message: "Not your turn to approve".to_string(),
        }))
        .await;

    screen.decide(&access, Decision::Approve).await.unwrap();

    assert_eq!(
        screen.feedback(),
        Some(Feedback::Failure("Not your turn to approve".to_string()))
    );
    // Selection, reason, and queue are untouched.
    assert_eq!(screen.selected().unwrap().id, submitted.id);
    assert_eq!(screen.reason(), "On second thought");
    assert_eq!(screen.items().len(), 1);
}

#[tokio::test]
async fn test_transport_failure_preserves_reason() {
    let store = store_with_roles(&["hod"]).await;
    let submitted = diary(DiaryStatus::Submitted, 5);
    store.seed_diary(submitted.clone()).await;

    let session = loaded_session(&store).await;
    let access = access_of(&session);
    let screen = ApprovalScreen::<DiaryFlow>::new(store.clone(), PAGE_SIZE);
    screen.refresh(&access).await.unwrap();
    screen.select(submitted.id).await.unwrap();
    screen.set_reason("Missing period entries");

    store
        .script_decision(Err(StoreError::Backend {
            code: "503".to_string(),
            message: "upstream unavailable".to_string(),
        }))
        .await;

    let err = screen.decide(&access, Decision::Reject).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Transport);
    assert_eq!(
        screen.feedback(),
        Some(Feedback::Failure(DECISION_FAILED_MESSAGE.to_string()))
    );
    assert_eq!(screen.reason(), "Missing period entries");
    assert_eq!(screen.selected().unwrap().id, submitted.id);
    assert!(!screen.is_saving());
}

#[tokio::test]
async fn test_rejecting_without_reason_is_allowed() {
    let store = store_with_roles(&["hod"]).await;
    let submitted = diary(DiaryStatus::Submitted, 5);
    store.seed_diary(submitted.clone()).await;

    let session = loaded_session(&store).await;
    let access = access_of(&session);
    let screen = ApprovalScreen::<DiaryFlow>::new(store.clone(), PAGE_SIZE);
    screen.refresh(&access).await.unwrap();
    screen.select(submitted.id).await.unwrap();

    screen.decide(&access, Decision::Reject).await.unwrap();
    assert!(matches!(screen.feedback(), Some(Feedback::Success(_))));
}

#[tokio::test]
async fn test_stale_detail_response_is_discarded() {
    let store = store_with_roles(&["hod"]).await;
    let first = diary(DiaryStatus::Submitted, 5);
    let second = diary(DiaryStatus::Submitted, 10);
    store.seed_diary(first.clone()).await;
    store.seed_diary(second.clone()).await;

    let session = loaded_session(&store).await;
    let access = access_of(&session);
    let screen = Arc::new(ApprovalScreen::<DiaryFlow>::new(store.clone(), PAGE_SIZE));
    screen.refresh(&access).await.unwrap();

    // Hold the first detail fetch in flight.
    let gate = store.defer_detail(first.id.into_inner()).await;
    let slow = {
        let screen = screen.clone();
        let id = first.id;
        tokio::spawn(async move { screen.select(id).await })
    };
    tokio::task::yield_now().await;

    // A newer selection completes while the first is still outstanding.
    screen.select(second.id).await.unwrap();
    assert_eq!(screen.selected().unwrap().id, second.id);

    // The late response must not overwrite the newer selection.
    gate.notify_one();
    slow.await.unwrap().unwrap();
    assert_eq!(screen.selected().unwrap().id, second.id);
}

#[tokio::test]
async fn test_planner_queue_and_single_stage_decision() {
    let store = store_with_roles(&["hod"]).await;
    let submitted = planner(PlannerStatus::Submitted, 5);
    store.seed_planner(submitted.clone()).await;
    store.seed_planner(planner(PlannerStatus::Approved, 10)).await;
    store.seed_planner(planner(PlannerStatus::Draft, 15)).await;

    let session = loaded_session(&store).await;
    let access = access_of(&session);
    let screen = ApprovalScreen::<PlannerFlow>::new(store.clone(), PAGE_SIZE);
    screen.refresh(&access).await.unwrap();

    let items = screen.items();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, submitted.id);

    screen.select(submitted.id).await.unwrap();
    screen.decide(&access, Decision::Approve).await.unwrap();

    assert!(screen.selected().is_none());
    assert!(screen.items().is_empty());
    let stored = store.lesson_planner(submitted.id).await.unwrap().unwrap();
    assert_eq!(stored.status, PlannerStatus::Approved);
}

#[tokio::test]
async fn test_deciding_with_no_selection_is_rejected_locally() {
    let store = store_with_roles(&["hod"]).await;
    let session = loaded_session(&store).await;
    let access = access_of(&session);
    let screen = ApprovalScreen::<DiaryFlow>::new(store.clone(), PAGE_SIZE);

    let err = screen.decide(&access, Decision::Approve).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
}
