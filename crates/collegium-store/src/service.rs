//! The remote data-service seam.

use async_trait::async_trait;
use tokio::sync::broadcast;

use collegium_models::{
    AdminOutcome, AssignmentId, CampusEvent, Decision, DiaryId, DiaryStatus, DiarySummary,
    EventId, LatePassRequest, LessonPlanner, ManagedUser, NewEvent, PlannerId, PlannerStatus,
    PlannerSummary, RoleAssignment, RoleChange, RpcOutcome, StudentRef, UserId, WorkDiary,
};

use crate::error::StoreResult;
use crate::feed::TableChange;

/// Everything the application layer needs from the remote backend.
///
/// Decision procedures return [`RpcOutcome`]: the remote side is the sole
/// authority on whether a transition is legal for a given user and item, and
/// a logical rejection travels in the outcome, not as an error. List queries
/// return rows most-recent-first, bounded by `limit`; there is no pagination
/// beyond the first page.
#[async_trait]
pub trait DataService: Send + Sync {
    /// Active role assignments for one user. Inactive rows are excluded at
    /// the query level, not filtered client-side.
    async fn active_role_assignments(&self, user_id: UserId) -> StoreResult<Vec<RoleAssignment>>;

    async fn pending_lesson_planners(
        &self,
        statuses: &[PlannerStatus],
        limit: u32,
    ) -> StoreResult<Vec<PlannerSummary>>;
    async fn lesson_planner(&self, id: PlannerId) -> StoreResult<Option<LessonPlanner>>;
    async fn approve_lesson_planner(
        &self,
        id: PlannerId,
        decision: Decision,
        reason: Option<&str>,
    ) -> StoreResult<RpcOutcome>;

    async fn pending_work_diaries(
        &self,
        statuses: &[DiaryStatus],
        limit: u32,
    ) -> StoreResult<Vec<DiarySummary>>;
    async fn work_diary(&self, id: DiaryId) -> StoreResult<Option<WorkDiary>>;
    async fn approve_work_diary(
        &self,
        id: DiaryId,
        decision: Decision,
        reason: Option<&str>,
    ) -> StoreResult<RpcOutcome>;

    async fn events(&self, limit: u32) -> StoreResult<Vec<CampusEvent>>;
    async fn create_event(&self, event: &NewEvent, created_by: UserId)
    -> StoreResult<CampusEvent>;
    async fn delete_event(&self, id: EventId) -> StoreResult<()>;

    /// Users visible to the management screens, optionally narrowed to one
    /// department.
    async fn managed_users(
        &self,
        department: Option<&str>,
        limit: u32,
    ) -> StoreResult<Vec<ManagedUser>>;
    /// Assign a role through the admin edge function.
    async fn change_user_role(&self, change: &RoleChange) -> StoreResult<AdminOutcome>;
    /// Revoke an assignment by deactivating it. Assignments are never hard
    /// deleted.
    async fn deactivate_role_assignment(&self, id: AssignmentId) -> StoreResult<()>;

    async fn issue_late_pass(&self, request: &LatePassRequest) -> StoreResult<RpcOutcome>;
    async fn student_by_admission_no(&self, admission_no: &str)
    -> StoreResult<Option<StudentRef>>;

    /// Subscribe to per-table change notifications.
    fn subscribe(&self) -> broadcast::Receiver<TableChange>;
}
