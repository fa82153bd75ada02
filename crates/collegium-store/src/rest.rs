//! HTTP implementation of the data service.
//!
//! [`RestClient`] is the thin transport layer: it renders [`SelectQuery`]
//! builders into row-endpoint requests, posts remote procedure and edge
//! function calls, and maps structured backend error bodies onto
//! [`StoreError`]. [`RestService`] composes it into the [`DataService`]
//! surface the application layer consumes.

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use tokio::sync::broadcast;
use tracing::instrument;

use collegium_config::BackendConfig;
use collegium_models::{
    AdminOutcome, AssignmentId, CampusEvent, Decision, DiaryId, DiaryStatus, DiarySummary,
    EventId, LatePassRequest, LessonPlanner, ManagedUser, NewEvent, PlannerId, PlannerStatus,
    PlannerSummary, RoleAssignment, RoleChange, RpcOutcome, StudentRef, UserId, WorkDiary,
};

use crate::error::{StoreError, StoreResult};
use crate::feed::{ChangeFeed, ChangeKind, TableChange};
use crate::query::{Order, SelectQuery};
use crate::service::DataService;

/// Structured error body returned by the backend on non-2xx responses.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    code: Option<String>,
    message: Option<String>,
}

/// Low-level client for the backend's row, RPC, and function endpoints.
#[derive(Debug, Clone)]
pub struct RestClient {
    http: reqwest::Client,
    config: BackendConfig,
}

impl RestClient {
    pub fn new(config: BackendConfig) -> StoreResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { http, config })
    }

    fn request(&self, method: reqwest::Method, url: String) -> reqwest::RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
            .header("Accept-Profile", &self.config.schema)
            .header("Content-Profile", &self.config.schema)
    }

    /// Decode a response, mapping non-2xx bodies onto the error taxonomy.
    async fn read_json<T: DeserializeOwned>(
        &self,
        resource: &str,
        response: reqwest::Response,
    ) -> StoreResult<T> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            let parsed: ErrorBody = serde_json::from_str(&body).unwrap_or_default();
            return Err(StoreError::from_backend(
                resource,
                parsed.code.unwrap_or_else(|| status.as_u16().to_string()),
                parsed.message.unwrap_or(body),
            ));
        }
        Ok(serde_json::from_str(&body)?)
    }

    /// Check a response for success, discarding any body.
    async fn read_ok(&self, resource: &str, response: reqwest::Response) -> StoreResult<()> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            let parsed: ErrorBody = serde_json::from_str(&body).unwrap_or_default();
            return Err(StoreError::from_backend(
                resource,
                parsed.code.unwrap_or_else(|| status.as_u16().to_string()),
                parsed.message.unwrap_or(body),
            ));
        }
        Ok(())
    }

    /// Run a row query, decoding the result rows.
    #[instrument(skip(self), fields(table = query.table()))]
    pub async fn select<T: DeserializeOwned>(&self, query: SelectQuery) -> StoreResult<Vec<T>> {
        let response = self
            .request(reqwest::Method::GET, self.config.table_url(query.table()))
            .query(&query.query_pairs())
            .send()
            .await?;
        self.read_json(query.table(), response).await
    }

    /// Insert one row, returning the stored representation.
    #[instrument(skip(self, body))]
    pub async fn insert<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        table: &str,
        body: &B,
    ) -> StoreResult<T> {
        let response = self
            .request(reqwest::Method::POST, self.config.table_url(table))
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await?;
        let mut rows: Vec<T> = self.read_json(table, response).await?;
        rows.pop().ok_or_else(|| {
            StoreError::NotFound(format!("insert into {table} returned no representation"))
        })
    }

    /// Update rows matching a primary-key equality filter.
    #[instrument(skip(self, body))]
    pub async fn update<B: Serialize + ?Sized>(
        &self,
        table: &str,
        id_column: &str,
        id: &str,
        body: &B,
    ) -> StoreResult<()> {
        let response = self
            .request(reqwest::Method::PATCH, self.config.table_url(table))
            .query(&[(id_column, format!("eq.{id}"))])
            .json(body)
            .send()
            .await?;
        self.read_ok(table, response).await
    }

    /// Delete rows matching a primary-key equality filter.
    #[instrument(skip(self))]
    pub async fn delete(&self, table: &str, id_column: &str, id: &str) -> StoreResult<()> {
        let response = self
            .request(reqwest::Method::DELETE, self.config.table_url(table))
            .query(&[(id_column, format!("eq.{id}"))])
            .send()
            .await?;
        self.read_ok(table, response).await
    }

    /// Invoke a remote procedure under `/rest/v1/rpc`.
    #[instrument(skip(self, args))]
    pub async fn rpc<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        function: &str,
        args: &B,
    ) -> StoreResult<T> {
        let response = self
            .request(reqwest::Method::POST, self.config.rpc_url(function))
            .json(args)
            .send()
            .await?;
        self.read_json(function, response).await
    }

    /// Invoke an edge function under `/functions/v1`.
    #[instrument(skip(self, body))]
    pub async fn function<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        name: &str,
        body: &B,
    ) -> StoreResult<T> {
        let response = self
            .request(reqwest::Method::POST, self.config.function_url(name))
            .json(body)
            .send()
            .await?;
        self.read_json(name, response).await
    }
}

/// Wire row for the managed-users query: profile columns plus one level of
/// embedded relation expansion for the active role names.
#[derive(Debug, Deserialize)]
struct ManagedUserRow {
    id: UserId,
    full_name: String,
    email: String,
    department: Option<String>,
    user_roles: Vec<RoleNameRow>,
}

#[derive(Debug, Deserialize)]
struct RoleNameRow {
    role_name: String,
}

impl From<ManagedUserRow> for ManagedUser {
    fn from(row: ManagedUserRow) -> Self {
        Self {
            id: row.id,
            full_name: row.full_name,
            email: row.email,
            department: row.department,
            role_names: row.user_roles.into_iter().map(|r| r.role_name).collect(),
        }
    }
}

/// [`DataService`] over the real backend.
pub struct RestService {
    client: RestClient,
    feed: ChangeFeed,
}

impl RestService {
    pub fn new(config: BackendConfig) -> StoreResult<Self> {
        Ok(Self {
            client: RestClient::new(config)?,
            feed: ChangeFeed::default(),
        })
    }

    /// The change-notification hub. A realtime socket publishes into this;
    /// local mutations echo into it as well so screens refresh without
    /// waiting for the round trip.
    pub fn feed(&self) -> &ChangeFeed {
        &self.feed
    }
}

#[async_trait]
impl DataService for RestService {
    async fn active_role_assignments(&self, user_id: UserId) -> StoreResult<Vec<RoleAssignment>> {
        self.client
            .select(
                SelectQuery::new("user_roles")
                    .columns("id,user_id,role_name,department,active,assigned_at,assigned_by")
                    .eq("user_id", user_id)
                    .eq("active", "true"),
            )
            .await
    }

    async fn pending_lesson_planners(
        &self,
        statuses: &[PlannerStatus],
        limit: u32,
    ) -> StoreResult<Vec<PlannerSummary>> {
        let names: Vec<&str> = statuses.iter().map(PlannerStatus::as_str).collect();
        self.client
            .select(
                SelectQuery::new("lesson_planners")
                    .columns(
                        "id,teacher_id,teacher_name,subject,week_start,status,submitted_at,created_at",
                    )
                    .in_("status", &names)
                    .order("created_at", Order::Descending)
                    .limit(limit),
            )
            .await
    }

    async fn lesson_planner(&self, id: PlannerId) -> StoreResult<Option<LessonPlanner>> {
        let mut rows: Vec<LessonPlanner> = self
            .client
            .select(SelectQuery::new("lesson_planners").eq("id", id).limit(1))
            .await?;
        Ok(rows.pop())
    }

    async fn approve_lesson_planner(
        &self,
        id: PlannerId,
        decision: Decision,
        reason: Option<&str>,
    ) -> StoreResult<RpcOutcome> {
        let outcome = self
            .client
            .rpc(
                "approve_lesson_planner",
                &json!({
                    "planner_id": id,
                    "decision": decision.as_str(),
                    "reason": reason,
                }),
            )
            .await?;
        self.feed.publish("lesson_planners", ChangeKind::Update);
        Ok(outcome)
    }

    async fn pending_work_diaries(
        &self,
        statuses: &[DiaryStatus],
        limit: u32,
    ) -> StoreResult<Vec<DiarySummary>> {
        let names: Vec<&str> = statuses.iter().map(DiaryStatus::as_str).collect();
        self.client
            .select(
                SelectQuery::new("work_diaries")
                    .columns(
                        "id,teacher_id,teacher_name,department,diary_date,status,submitted_at,created_at",
                    )
                    .in_("status", &names)
                    .order("created_at", Order::Descending)
                    .limit(limit),
            )
            .await
    }

    async fn work_diary(&self, id: DiaryId) -> StoreResult<Option<WorkDiary>> {
        let mut rows: Vec<WorkDiary> = self
            .client
            .select(SelectQuery::new("work_diaries").eq("id", id).limit(1))
            .await?;
        Ok(rows.pop())
    }

    async fn approve_work_diary(
        &self,
        id: DiaryId,
        decision: Decision,
        reason: Option<&str>,
    ) -> StoreResult<RpcOutcome> {
        let outcome = self
            .client
            .rpc(
                "approve_work_diary",
                &json!({
                    "diary_id": id,
                    "decision": decision.as_str(),
                    "reason": reason,
                }),
            )
            .await?;
        self.feed.publish("work_diaries", ChangeKind::Update);
        Ok(outcome)
    }

    async fn events(&self, limit: u32) -> StoreResult<Vec<CampusEvent>> {
        self.client
            .select(
                SelectQuery::new("events")
                    .order("created_at", Order::Descending)
                    .limit(limit),
            )
            .await
    }

    async fn create_event(
        &self,
        event: &NewEvent,
        created_by: UserId,
    ) -> StoreResult<CampusEvent> {
        let created = self
            .client
            .insert(
                "events",
                &json!({
                    "title": event.title,
                    "description": event.description,
                    "venue": event.venue,
                    "starts_at": event.starts_at,
                    "ends_at": event.ends_at,
                    "created_by": created_by,
                }),
            )
            .await?;
        self.feed.publish("events", ChangeKind::Insert);
        Ok(created)
    }

    async fn delete_event(&self, id: EventId) -> StoreResult<()> {
        self.client.delete("events", "id", &id.to_string()).await?;
        self.feed.publish("events", ChangeKind::Delete);
        Ok(())
    }

    async fn managed_users(
        &self,
        department: Option<&str>,
        limit: u32,
    ) -> StoreResult<Vec<ManagedUser>> {
        let mut query = SelectQuery::new("profiles")
            .columns("id,full_name,email,department,user_roles(role_name)")
            .eq("user_roles.active", "true")
            .order("full_name", Order::Ascending)
            .limit(limit);
        if let Some(department) = department {
            query = query.eq("department", department);
        }
        let rows: Vec<ManagedUserRow> = self.client.select(query).await?;
        Ok(rows.into_iter().map(ManagedUser::from).collect())
    }

    async fn change_user_role(&self, change: &RoleChange) -> StoreResult<AdminOutcome> {
        let outcome = self
            .client
            .function(
                "admin-manage-user",
                &json!({
                    "action": "assign_role",
                    "user_id": change.user_id,
                    "role_name": change.role_name,
                    "department": change.department,
                }),
            )
            .await?;
        self.feed.publish("user_roles", ChangeKind::Insert);
        Ok(outcome)
    }

    async fn deactivate_role_assignment(&self, id: AssignmentId) -> StoreResult<()> {
        self.client
            .update("user_roles", "id", &id.to_string(), &json!({ "active": false }))
            .await?;
        self.feed.publish("user_roles", ChangeKind::Update);
        Ok(())
    }

    async fn issue_late_pass(&self, request: &LatePassRequest) -> StoreResult<RpcOutcome> {
        self.client
            .rpc(
                "reception_issue_late_pass",
                &json!({
                    "admission_no": request.admission_no,
                    "notes": request.notes,
                }),
            )
            .await
    }

    async fn student_by_admission_no(
        &self,
        admission_no: &str,
    ) -> StoreResult<Option<StudentRef>> {
        self.client
            .rpc(
                "reception_get_student_by_admission_no",
                &json!({ "admission_no": admission_no }),
            )
            .await
    }

    fn subscribe(&self) -> broadcast::Receiver<TableChange> {
        self.feed.subscribe()
    }
}
