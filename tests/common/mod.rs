use std::sync::Arc;

use chrono::{NaiveDate, TimeDelta, Utc};
use serde_json::json;

use collegium::session::RbacSession;
use collegium_models::{
    AssignmentId, CampusEvent, DiaryId, DiaryStatus, EventId, LessonPlanner, ManagedUser,
    PlannerId, PlannerStatus, RoleAssignment, StudentRef, UserId, WorkDiary,
};
use collegium_store::MemoryService;

/// The signed-in user every test session runs as.
#[allow(dead_code)]
pub const TEST_USER: UserId = UserId::from_u128(0x00000000_0000_0000_0000_0000000000a1);

#[allow(dead_code)]
pub const PAGE_SIZE: u32 = 20;

#[allow(dead_code)]
pub fn assignment(user_id: UserId, role: &str, department: Option<&str>) -> RoleAssignment {
    RoleAssignment {
        id: AssignmentId::new(),
        user_id,
        role_name: role.to_string(),
        department: department.map(str::to_string),
        active: true,
        assigned_at: Utc::now(),
        assigned_by: None,
    }
}

#[allow(dead_code)]
pub fn planner(status: PlannerStatus, age_minutes: i64) -> LessonPlanner {
    let created_at = Utc::now() - TimeDelta::minutes(age_minutes);
    LessonPlanner {
        id: PlannerId::new(),
        teacher_id: UserId::new(),
        teacher_name: "R. Iyer".to_string(),
        subject: "Mathematics".to_string(),
        week_start: NaiveDate::from_ymd_opt(2026, 8, 3).unwrap(),
        status,
        planned_topics: json!(["Quadratic equations", "Factorisation"]),
        completed_topics: json!([]),
        rejection_reason: None,
        submitted_at: Some(created_at),
        created_at,
    }
}

#[allow(dead_code)]
pub fn diary(status: DiaryStatus, age_minutes: i64) -> WorkDiary {
    let created_at = Utc::now() - TimeDelta::minutes(age_minutes);
    WorkDiary {
        id: DiaryId::new(),
        teacher_id: UserId::new(),
        teacher_name: "S. Menon".to_string(),
        department: Some("Physics".to_string()),
        diary_date: NaiveDate::from_ymd_opt(2026, 8, 4).unwrap(),
        status,
        entries: json!([{ "period": 1, "activity": "Practical demonstration" }]),
        rejection_reason: None,
        submitted_at: Some(created_at),
        created_at,
    }
}

#[allow(dead_code)]
pub fn event(title: &str, age_minutes: i64) -> CampusEvent {
    let created_at = Utc::now() - TimeDelta::minutes(age_minutes);
    CampusEvent {
        id: EventId::new(),
        title: title.to_string(),
        description: None,
        venue: Some("Auditorium".to_string()),
        starts_at: created_at + TimeDelta::days(7),
        ends_at: None,
        created_by: None,
        created_at,
    }
}

#[allow(dead_code)]
pub fn managed_user(name: &str, roles: &[&str], department: Option<&str>) -> ManagedUser {
    ManagedUser {
        id: UserId::new(),
        full_name: name.to_string(),
        email: format!("{}@campus.test", name.to_lowercase().replace(' ', ".")),
        department: department.map(str::to_string),
        role_names: roles.iter().map(|r| r.to_string()).collect(),
    }
}

#[allow(dead_code)]
pub fn student(admission_no: &str, name: &str) -> StudentRef {
    StudentRef {
        student_id: UserId::new(),
        admission_no: admission_no.to_string(),
        student_name: name.to_string(),
    }
}

/// A memory store seeded with active role assignments for [`TEST_USER`].
#[allow(dead_code)]
pub async fn store_with_roles(roles: &[&str]) -> Arc<MemoryService> {
    collegium::logging::init_console_logging();
    let store = Arc::new(MemoryService::new());
    for role in roles {
        store.seed_assignment(assignment(TEST_USER, role, None)).await;
    }
    store
}

/// A loaded session for [`TEST_USER`] over the given store.
#[allow(dead_code)]
pub async fn loaded_session(store: &Arc<MemoryService>) -> RbacSession {
    let session = RbacSession::new(store.clone(), TEST_USER);
    session.refresh_roles().await;
    session
}
