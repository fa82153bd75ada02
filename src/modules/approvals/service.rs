//! Pending-queue computation and the per-entity approval flows.

use async_trait::async_trait;

use collegium_core::{ApprovalKind, ApprovalStage};
use collegium_models::{
    Decision, DiaryId, DiaryStatus, DiarySummary, LessonPlanner, PlannerId, PlannerStatus,
    PlannerSummary, RpcOutcome, WorkDiary,
};
use collegium_store::{DataService, StoreResult};

use crate::session::ResolvedAccess;

/// Lesson planner statuses pending this user's decision.
///
/// Planner approval is single-stage: holding the approval permission queues
/// `submitted` planners, nothing else. Terminal statuses never appear.
pub fn pending_planner_statuses(access: &ResolvedAccess) -> Vec<PlannerStatus> {
    if access.can_approve(ApprovalKind::LessonPlanner, ApprovalStage::First) {
        vec![PlannerStatus::Submitted]
    } else {
        Vec::new()
    }
}

/// Work diary statuses pending this user's decision.
///
/// The first-stage permission queues `submitted` diaries; the final-stage
/// permission queues `hod_approved` ones. A user holding both (e.g. a super
/// admin) sees both.
pub fn pending_diary_statuses(access: &ResolvedAccess) -> Vec<DiaryStatus> {
    let mut statuses = Vec::new();
    if access.can_approve(ApprovalKind::WorkDiary, ApprovalStage::First) {
        statuses.push(DiaryStatus::Submitted);
    }
    if access.can_approve(ApprovalKind::WorkDiary, ApprovalStage::Final) {
        statuses.push(DiaryStatus::HodApproved);
    }
    statuses
}

/// One approval-bearing entity kind, as seen by [`ApprovalScreen`].
///
/// [`ApprovalScreen`]: super::controller::ApprovalScreen
#[async_trait]
pub trait ApprovalFlow: Send + Sync + 'static {
    type Id: Copy + Eq + Send + Sync + std::fmt::Debug + 'static;
    type Summary: Clone + Send + Sync + 'static;
    type Detail: Clone + Send + Sync + 'static;

    const KIND: ApprovalKind;

    /// True when the user can decide anything at all for this kind.
    fn has_queue(access: &ResolvedAccess) -> bool;

    /// Items pending this user's decision, most recent first.
    async fn list_pending(
        store: &dyn DataService,
        access: &ResolvedAccess,
        limit: u32,
    ) -> StoreResult<Vec<Self::Summary>>;

    async fn detail(store: &dyn DataService, id: Self::Id) -> StoreResult<Option<Self::Detail>>;

    async fn decide(
        store: &dyn DataService,
        id: Self::Id,
        decision: Decision,
        reason: Option<&str>,
    ) -> StoreResult<RpcOutcome>;

    fn detail_id(detail: &Self::Detail) -> Self::Id;
}

/// Lesson planner flow.
pub struct PlannerFlow;

#[async_trait]
impl ApprovalFlow for PlannerFlow {
    type Id = PlannerId;
    type Summary = PlannerSummary;
    type Detail = LessonPlanner;

    const KIND: ApprovalKind = ApprovalKind::LessonPlanner;

    fn has_queue(access: &ResolvedAccess) -> bool {
        !pending_planner_statuses(access).is_empty()
    }

    async fn list_pending(
        store: &dyn DataService,
        access: &ResolvedAccess,
        limit: u32,
    ) -> StoreResult<Vec<PlannerSummary>> {
        let statuses = pending_planner_statuses(access);
        if statuses.is_empty() {
            return Ok(Vec::new());
        }
        store.pending_lesson_planners(&statuses, limit).await
    }

    async fn detail(store: &dyn DataService, id: PlannerId) -> StoreResult<Option<LessonPlanner>> {
        store.lesson_planner(id).await
    }

    async fn decide(
        store: &dyn DataService,
        id: PlannerId,
        decision: Decision,
        reason: Option<&str>,
    ) -> StoreResult<RpcOutcome> {
        store.approve_lesson_planner(id, decision, reason).await
    }

    fn detail_id(detail: &LessonPlanner) -> PlannerId {
        detail.id
    }
}

/// Work diary flow.
pub struct DiaryFlow;

#[async_trait]
impl ApprovalFlow for DiaryFlow {
    type Id = DiaryId;
    type Summary = DiarySummary;
    type Detail = WorkDiary;

    const KIND: ApprovalKind = ApprovalKind::WorkDiary;

    fn has_queue(access: &ResolvedAccess) -> bool {
        !pending_diary_statuses(access).is_empty()
    }

    async fn list_pending(
        store: &dyn DataService,
        access: &ResolvedAccess,
        limit: u32,
    ) -> StoreResult<Vec<DiarySummary>> {
        let statuses = pending_diary_statuses(access);
        if statuses.is_empty() {
            return Ok(Vec::new());
        }
        store.pending_work_diaries(&statuses, limit).await
    }

    async fn detail(store: &dyn DataService, id: DiaryId) -> StoreResult<Option<WorkDiary>> {
        store.work_diary(id).await
    }

    async fn decide(
        store: &dyn DataService,
        id: DiaryId,
        decision: Decision,
        reason: Option<&str>,
    ) -> StoreResult<RpcOutcome> {
        store.approve_work_diary(id, decision, reason).await
    }

    fn detail_id(detail: &WorkDiary) -> DiaryId {
        detail.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn access(roles: &[&str]) -> ResolvedAccess {
        ResolvedAccess::from_roles(roles.iter().map(|r| r.to_string()).collect())
    }

    #[test]
    fn test_first_stage_approver_sees_submitted_only() {
        let statuses = pending_diary_statuses(&access(&["hod"]));
        assert_eq!(statuses, vec![DiaryStatus::Submitted]);
    }

    #[test]
    fn test_final_stage_approver_sees_hod_approved_only() {
        let statuses = pending_diary_statuses(&access(&["principal"]));
        assert_eq!(statuses, vec![DiaryStatus::HodApproved]);
    }

    #[test]
    fn test_both_stages_see_both() {
        let statuses = pending_diary_statuses(&access(&["super_admin"]));
        assert_eq!(
            statuses,
            vec![DiaryStatus::Submitted, DiaryStatus::HodApproved]
        );
    }

    #[test]
    fn test_non_approver_has_no_queue() {
        assert!(pending_diary_statuses(&access(&["teacher"])).is_empty());
        assert!(pending_planner_statuses(&access(&["student"])).is_empty());
        assert!(!DiaryFlow::has_queue(&access(&["teacher"])));
        assert!(!PlannerFlow::has_queue(&access(&[])));
    }

    #[test]
    fn test_planner_queue_is_single_stage() {
        assert_eq!(
            pending_planner_statuses(&access(&["hod"])),
            vec![PlannerStatus::Submitted]
        );
        assert!(PlannerFlow::has_queue(&access(&["principal"])));
    }
}
