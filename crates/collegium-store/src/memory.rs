//! In-memory implementation of the data service.
//!
//! This store implements the [`DataService`] trait entirely in memory using
//! maps guarded by a `tokio::sync::RwLock`. It exists for tests and local
//! development: no external dependencies, deterministic seeding, and
//! failure injection for the error paths the screens must handle
//! (role-fetch failure, missing tables, scripted decision outcomes,
//! deferred detail fetches for staleness scenarios).
//!
//! Decision procedures mimic the remote authority: an unscripted decision
//! advances the item along the legal transition table and reports a logical
//! rejection when the item is not awaiting this decision. Mutations publish
//! change-feed events, mirroring the realtime channel.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{broadcast, Mutex, Notify, RwLock};
use uuid::Uuid;

use collegium_models::{
    AdminOutcome, AssignmentId, CampusEvent, Decision, DiaryId, DiaryStatus, DiarySummary,
    EventId, LatePassRequest, LessonPlanner, ManagedUser, NewEvent, PlannerId, PlannerStatus,
    PlannerSummary, RoleAssignment, RoleChange, RpcOutcome, StudentRef, UserId, WorkDiary,
};

use crate::error::{StoreError, StoreResult};
use crate::feed::{ChangeFeed, ChangeKind, TableChange};
use crate::service::DataService;

#[derive(Default)]
struct State {
    assignments: Vec<RoleAssignment>,
    planners: HashMap<PlannerId, LessonPlanner>,
    diaries: HashMap<DiaryId, WorkDiary>,
    events: Vec<CampusEvent>,
    users: Vec<ManagedUser>,
    students: HashMap<String, StudentRef>,

    fail_role_fetch: bool,
    missing_tables: HashSet<String>,
    failing_tables: HashSet<String>,
    scripted_decisions: VecDeque<StoreResult<RpcOutcome>>,
}

/// HashMap-backed [`DataService`] double.
pub struct MemoryService {
    state: RwLock<State>,
    feed: ChangeFeed,
    detail_gates: Mutex<HashMap<Uuid, Arc<Notify>>>,
}

impl MemoryService {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State::default()),
            feed: ChangeFeed::default(),
            detail_gates: Mutex::new(HashMap::new()),
        }
    }

    pub fn feed(&self) -> &ChangeFeed {
        &self.feed
    }

    // ---- seeding ----

    pub async fn seed_assignment(&self, assignment: RoleAssignment) {
        self.state.write().await.assignments.push(assignment);
    }

    pub async fn seed_planner(&self, planner: LessonPlanner) {
        self.state.write().await.planners.insert(planner.id, planner);
    }

    pub async fn seed_diary(&self, diary: WorkDiary) {
        self.state.write().await.diaries.insert(diary.id, diary);
    }

    pub async fn seed_event(&self, event: CampusEvent) {
        self.state.write().await.events.push(event);
    }

    pub async fn seed_user(&self, user: ManagedUser) {
        self.state.write().await.users.push(user);
    }

    pub async fn seed_student(&self, student: StudentRef) {
        self.state
            .write()
            .await
            .students
            .insert(student.admission_no.clone(), student);
    }

    // ---- failure injection ----

    /// Make the next role-assignment fetches fail with a transport-like
    /// error.
    pub async fn set_fail_role_fetch(&self, fail: bool) {
        self.state.write().await.fail_role_fetch = fail;
    }

    /// Make queries against `table` report the table-missing sentinel.
    pub async fn mark_table_missing(&self, table: &str) {
        self.state
            .write()
            .await
            .missing_tables
            .insert(table.to_string());
    }

    /// Make queries against `table` fail with a generic backend error,
    /// distinct from the table-missing sentinel.
    pub async fn mark_table_failing(&self, table: &str) {
        self.state
            .write()
            .await
            .failing_tables
            .insert(table.to_string());
    }

    /// Script the result of the next decision procedure call. Scripted
    /// results are consumed in order and do not mutate stored items.
    pub async fn script_decision(&self, result: StoreResult<RpcOutcome>) {
        self.state.write().await.scripted_decisions.push_back(result);
    }

    /// Defer detail fetches for `id` until the returned handle is notified.
    /// Used to reorder responses in staleness tests.
    pub async fn defer_detail(&self, id: Uuid) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.detail_gates.lock().await.insert(id, gate.clone());
        gate
    }

    async fn wait_for_gate(&self, id: Uuid) {
        let gate = self.detail_gates.lock().await.get(&id).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }
    }

    async fn check_table(&self, table: &str) -> StoreResult<()> {
        let state = self.state.read().await;
        if state.missing_tables.contains(table) {
            return Err(StoreError::TableMissing {
                table: table.to_string(),
            });
        }
        if state.failing_tables.contains(table) {
            return Err(StoreError::Backend {
                code: "500".to_string(),
                message: format!("query against {table} failed"),
            });
        }
        Ok(())
    }

    async fn take_scripted_decision(&self) -> Option<StoreResult<RpcOutcome>> {
        self.state.write().await.scripted_decisions.pop_front()
    }
}

impl Default for MemoryService {
    fn default() -> Self {
        Self::new()
    }
}

fn rejection(message: &str) -> RpcOutcome {
    RpcOutcome {
        success: false,
        message: message.to_string(),
    }
}

fn approval(message: &str) -> RpcOutcome {
    RpcOutcome {
        success: true,
        message: message.to_string(),
    }
}

#[async_trait]
impl DataService for MemoryService {
    async fn active_role_assignments(&self, user_id: UserId) -> StoreResult<Vec<RoleAssignment>> {
        let state = self.state.read().await;
        if state.fail_role_fetch {
            return Err(StoreError::Backend {
                code: "503".to_string(),
                message: "service unavailable".to_string(),
            });
        }
        Ok(state
            .assignments
            .iter()
            .filter(|a| a.user_id == user_id && a.active)
            .cloned()
            .collect())
    }

    async fn pending_lesson_planners(
        &self,
        statuses: &[PlannerStatus],
        limit: u32,
    ) -> StoreResult<Vec<PlannerSummary>> {
        self.check_table("lesson_planners").await?;
        let state = self.state.read().await;
        let mut rows: Vec<PlannerSummary> = state
            .planners
            .values()
            .filter(|p| statuses.contains(&p.status))
            .map(|p| PlannerSummary {
                id: p.id,
                teacher_id: p.teacher_id,
                teacher_name: p.teacher_name.clone(),
                subject: p.subject.clone(),
                week_start: p.week_start,
                status: p.status,
                submitted_at: p.submitted_at,
                created_at: p.created_at,
            })
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rows.truncate(limit as usize);
        Ok(rows)
    }

    async fn lesson_planner(&self, id: PlannerId) -> StoreResult<Option<LessonPlanner>> {
        self.wait_for_gate(id.into_inner()).await;
        self.check_table("lesson_planners").await?;
        Ok(self.state.read().await.planners.get(&id).cloned())
    }

    async fn approve_lesson_planner(
        &self,
        id: PlannerId,
        decision: Decision,
        reason: Option<&str>,
    ) -> StoreResult<RpcOutcome> {
        if let Some(scripted) = self.take_scripted_decision().await {
            return scripted;
        }

        let mut state = self.state.write().await;
        let Some(planner) = state.planners.get_mut(&id) else {
            return Ok(rejection("Lesson planner not found"));
        };
        if planner.status != PlannerStatus::Submitted {
            return Ok(rejection("Lesson planner is not awaiting approval"));
        }
        match decision {
            Decision::Approve => planner.status = PlannerStatus::Approved,
            Decision::Reject => {
                planner.status = PlannerStatus::Rejected;
                planner.rejection_reason = reason.map(str::to_string);
            }
        }
        drop(state);
        self.feed.publish("lesson_planners", ChangeKind::Update);
        Ok(approval("Lesson planner updated"))
    }

    async fn pending_work_diaries(
        &self,
        statuses: &[DiaryStatus],
        limit: u32,
    ) -> StoreResult<Vec<DiarySummary>> {
        self.check_table("work_diaries").await?;
        let state = self.state.read().await;
        let mut rows: Vec<DiarySummary> = state
            .diaries
            .values()
            .filter(|d| statuses.contains(&d.status))
            .map(|d| DiarySummary {
                id: d.id,
                teacher_id: d.teacher_id,
                teacher_name: d.teacher_name.clone(),
                department: d.department.clone(),
                diary_date: d.diary_date,
                status: d.status,
                submitted_at: d.submitted_at,
                created_at: d.created_at,
            })
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rows.truncate(limit as usize);
        Ok(rows)
    }

    async fn work_diary(&self, id: DiaryId) -> StoreResult<Option<WorkDiary>> {
        self.wait_for_gate(id.into_inner()).await;
        self.check_table("work_diaries").await?;
        Ok(self.state.read().await.diaries.get(&id).cloned())
    }

    async fn approve_work_diary(
        &self,
        id: DiaryId,
        decision: Decision,
        reason: Option<&str>,
    ) -> StoreResult<RpcOutcome> {
        if let Some(scripted) = self.take_scripted_decision().await {
            return scripted;
        }

        let mut state = self.state.write().await;
        let Some(diary) = state.diaries.get_mut(&id) else {
            return Ok(rejection("Work diary not found"));
        };
        let next = match (diary.status, decision) {
            (DiaryStatus::Submitted, Decision::Approve) => DiaryStatus::HodApproved,
            (DiaryStatus::HodApproved, Decision::Approve) => DiaryStatus::PrincipalApproved,
            (DiaryStatus::Submitted | DiaryStatus::HodApproved, Decision::Reject) => {
                DiaryStatus::Rejected
            }
            _ => return Ok(rejection("Work diary is not awaiting approval")),
        };
        diary.status = next;
        if next == DiaryStatus::Rejected {
            diary.rejection_reason = reason.map(str::to_string);
        }
        drop(state);
        self.feed.publish("work_diaries", ChangeKind::Update);
        Ok(approval("Work diary updated"))
    }

    async fn events(&self, limit: u32) -> StoreResult<Vec<CampusEvent>> {
        self.check_table("events").await?;
        let state = self.state.read().await;
        let mut rows = state.events.clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rows.truncate(limit as usize);
        Ok(rows)
    }

    async fn create_event(
        &self,
        event: &NewEvent,
        created_by: UserId,
    ) -> StoreResult<CampusEvent> {
        self.check_table("events").await?;
        let created = CampusEvent {
            id: EventId::new(),
            title: event.title.clone(),
            description: event.description.clone(),
            venue: event.venue.clone(),
            starts_at: event.starts_at,
            ends_at: event.ends_at,
            created_by: Some(created_by),
            created_at: Utc::now(),
        };
        self.state.write().await.events.push(created.clone());
        self.feed.publish("events", ChangeKind::Insert);
        Ok(created)
    }

    async fn delete_event(&self, id: EventId) -> StoreResult<()> {
        self.check_table("events").await?;
        self.state.write().await.events.retain(|e| e.id != id);
        self.feed.publish("events", ChangeKind::Delete);
        Ok(())
    }

    async fn managed_users(
        &self,
        department: Option<&str>,
        limit: u32,
    ) -> StoreResult<Vec<ManagedUser>> {
        self.check_table("profiles").await?;
        let state = self.state.read().await;
        let mut rows: Vec<ManagedUser> = state
            .users
            .iter()
            .filter(|u| department.is_none_or(|d| u.department.as_deref() == Some(d)))
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.full_name.cmp(&b.full_name));
        rows.truncate(limit as usize);
        Ok(rows)
    }

    async fn change_user_role(&self, change: &RoleChange) -> StoreResult<AdminOutcome> {
        let mut state = self.state.write().await;
        let Some(user) = state.users.iter_mut().find(|u| u.id == change.user_id) else {
            return Ok(AdminOutcome {
                ok: false,
                message: Some("User not found".to_string()),
            });
        };
        if !user.role_names.contains(&change.role_name) {
            user.role_names.push(change.role_name.clone());
        }
        state.assignments.push(RoleAssignment {
            id: AssignmentId::new(),
            user_id: change.user_id,
            role_name: change.role_name.clone(),
            department: change.department.clone(),
            active: true,
            assigned_at: Utc::now(),
            assigned_by: None,
        });
        drop(state);
        self.feed.publish("user_roles", ChangeKind::Insert);
        Ok(AdminOutcome {
            ok: true,
            message: Some("Role assigned".to_string()),
        })
    }

    async fn deactivate_role_assignment(&self, id: AssignmentId) -> StoreResult<()> {
        let mut state = self.state.write().await;
        for assignment in state.assignments.iter_mut().filter(|a| a.id == id) {
            assignment.active = false;
        }
        drop(state);
        self.feed.publish("user_roles", ChangeKind::Update);
        Ok(())
    }

    async fn issue_late_pass(&self, request: &LatePassRequest) -> StoreResult<RpcOutcome> {
        let state = self.state.read().await;
        if state.students.contains_key(&request.admission_no) {
            Ok(approval("Late pass issued"))
        } else {
            Ok(rejection("No student with that admission number"))
        }
    }

    async fn student_by_admission_no(
        &self,
        admission_no: &str,
    ) -> StoreResult<Option<StudentRef>> {
        Ok(self.state.read().await.students.get(admission_no).cloned())
    }

    fn subscribe(&self) -> broadcast::Receiver<TableChange> {
        self.feed.subscribe()
    }
}
