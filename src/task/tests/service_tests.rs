//! Unit tests for task lifecycle service orchestration.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::config::AppConfig;
use crate::project::{
    adapters::memory::InMemoryProjectRepository,
    domain::{Project, ProjectDescription, ProjectId, ProjectName},
    ports::ProjectRepository,
};
use crate::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{TaskDomainError, TaskId, TaskStatus},
    services::{CreateTaskRequest, TaskLifecycleError, TaskLifecycleService, UpdateTaskRequest},
};
use chrono::{DateTime, Local, NaiveDate, TimeDelta, TimeZone, Utc};
use mockable::{Clock, DefaultClock};
use rstest::rstest;

const TASK_DESCRIPTION: &str = "Find and reserve an event venue downtown";

type TestService =
    TaskLifecycleService<InMemoryTaskRepository, InMemoryProjectRepository, DefaultClock>;
type FixedService =
    TaskLifecycleService<InMemoryTaskRepository, InMemoryProjectRepository, FixedClock>;

/// Clock pinned to a single instant, for deterministic deadline arithmetic.
#[derive(Debug, Clone, Copy)]
struct FixedClock(DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Clock that advances one second per reading, so successive mutations get
/// strictly increasing timestamps.
#[derive(Debug)]
struct SteppingClock {
    base: DateTime<Utc>,
    ticks: AtomicI64,
}

impl SteppingClock {
    fn starting_at(base: DateTime<Utc>) -> Self {
        Self {
            base,
            ticks: AtomicI64::new(0),
        }
    }
}

impl Clock for SteppingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
        self.base + TimeDelta::seconds(tick)
    }
}

fn noon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

async fn seed_project() -> (Arc<InMemoryProjectRepository>, ProjectId) {
    let clock = DefaultClock;
    let project = Project::new(
        ProjectName::new("Launch Plan").expect("valid name"),
        ProjectDescription::new("Plan the product launch event carefully")
            .expect("valid description"),
        &clock,
    );
    let repository = Arc::new(InMemoryProjectRepository::new());
    repository.store(&project).await.expect("seed project");
    (repository, project.id())
}

async fn build_service<C>(
    config: AppConfig,
    clock: C,
) -> (
    TaskLifecycleService<InMemoryTaskRepository, InMemoryProjectRepository, C>,
    ProjectId,
)
where
    C: Clock + Send + Sync,
{
    let (project_repository, project_id) = seed_project().await;
    let service = TaskLifecycleService::new(
        Arc::new(InMemoryTaskRepository::new()),
        project_repository,
        Arc::new(config),
        Arc::new(clock),
    );
    (service, project_id)
}

async fn default_service() -> (TestService, ProjectId) {
    build_service(AppConfig::default(), DefaultClock).await
}

async fn fixed_service(now: DateTime<Utc>) -> (FixedService, ProjectId) {
    build_service(AppConfig::default(), FixedClock(now)).await
}

fn venue_request(project_id: ProjectId) -> CreateTaskRequest {
    CreateTaskRequest::new(project_id, "Book venue", TASK_DESCRIPTION)
}

#[tokio::test(flavor = "multi_thread")]
async fn create_defaults_to_todo_and_trims_fields() {
    let (service, project_id) = default_service().await;

    let created = service
        .create(CreateTaskRequest::new(
            project_id,
            "  Book venue  ",
            "  Find and reserve an event venue downtown  ",
        ))
        .await
        .expect("creation should succeed");

    assert_eq!(created.title().as_str(), "Book venue");
    assert_eq!(created.description().as_str(), TASK_DESCRIPTION);
    assert_eq!(created.status(), TaskStatus::Todo);
    assert!(created.deadline().is_none());
    assert!(created.closed_at().is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn create_accepts_an_explicit_status_and_deadline() {
    let (service, project_id) = default_service().await;

    let created = service
        .create(
            venue_request(project_id)
                .with_status("doing")
                .with_deadline(date(2026, 4, 1)),
        )
        .await
        .expect("creation should succeed");

    assert_eq!(created.status(), TaskStatus::Doing);
    assert_eq!(created.deadline(), Some(date(2026, 4, 1)));
}

#[tokio::test(flavor = "multi_thread")]
async fn create_allows_a_deadline_in_the_past() {
    let (service, project_id) = fixed_service(noon()).await;

    let created = service
        .create(venue_request(project_id).with_deadline(date(2026, 3, 9)))
        .await
        .expect("past deadlines record already-overdue work");

    assert!(created.is_overdue(date(2026, 3, 10)));
}

#[tokio::test(flavor = "multi_thread")]
async fn create_rejects_an_unknown_status() {
    let (service, project_id) = default_service().await;

    let result = service
        .create(venue_request(project_id).with_status("urgent"))
        .await;

    assert!(matches!(
        result,
        Err(TaskLifecycleError::Domain(
            TaskDomainError::InvalidStatus(_)
        ))
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn create_rejects_a_missing_parent_project() {
    let (service, _project_id) = default_service().await;

    let result = service.create(venue_request(ProjectId::new())).await;

    assert!(matches!(
        result,
        Err(TaskLifecycleError::ProjectNotFound(_))
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn create_past_the_per_project_limit_is_rejected() {
    let (service, project_id) = build_service(
        AppConfig::default().with_max_tasks_per_project(1),
        DefaultClock,
    )
    .await;

    service
        .create(venue_request(project_id))
        .await
        .expect("first creation should succeed");

    let overflow = service
        .create(CreateTaskRequest::new(
            project_id,
            "Send invites",
            "Email the full guest list with directions",
        ))
        .await;

    assert!(matches!(
        overflow,
        Err(TaskLifecycleError::LimitExceeded(1))
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn update_of_a_single_field_leaves_the_rest_unchanged() {
    let (service, project_id) =
        build_service(AppConfig::default(), SteppingClock::starting_at(noon())).await;

    let created = service
        .create(venue_request(project_id).with_deadline(date(2026, 4, 1)))
        .await
        .expect("creation should succeed");

    let updated = service
        .update(created.id(), UpdateTaskRequest::new().with_status("doing"))
        .await
        .expect("update should succeed");

    assert_eq!(updated.status(), TaskStatus::Doing);
    assert_eq!(updated.title(), created.title());
    assert_eq!(updated.description(), created.description());
    assert_eq!(updated.deadline(), created.deadline());
    assert_eq!(updated.created_at(), created.created_at());
    assert!(updated.updated_at() > created.updated_at());
    assert!(updated.closed_at().is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn update_with_an_invalid_field_writes_nothing() {
    let (service, project_id) = default_service().await;

    let created = service
        .create(venue_request(project_id))
        .await
        .expect("creation should succeed");

    let result = service
        .update(
            created.id(),
            UpdateTaskRequest::new()
                .with_title("Book larger venue")
                .with_description("too short"),
        )
        .await;
    assert!(matches!(
        result,
        Err(TaskLifecycleError::Domain(
            TaskDomainError::DescriptionTooShort(15)
        ))
    ));

    let stored = service
        .find_by_id(created.id())
        .await
        .expect("lookup should succeed")
        .expect("task should exist");
    assert_eq!(stored.title().as_str(), "Book venue");
}

#[tokio::test(flavor = "multi_thread")]
async fn update_replaces_the_deadline() {
    let (service, project_id) = default_service().await;

    let created = service
        .create(venue_request(project_id).with_deadline(date(2026, 4, 1)))
        .await
        .expect("creation should succeed");

    let updated = service
        .update(
            created.id(),
            UpdateTaskRequest::new().with_deadline(date(2026, 5, 1)),
        )
        .await
        .expect("update should succeed");

    assert_eq!(updated.deadline(), Some(date(2026, 5, 1)));
}

#[tokio::test(flavor = "multi_thread")]
async fn updating_a_missing_task_fails() {
    let (service, _project_id) = default_service().await;

    let result = service
        .update(TaskId::new(), UpdateTaskRequest::new().with_status("done"))
        .await;

    assert!(matches!(result, Err(TaskLifecycleError::NotFound(_))));
}

#[tokio::test(flavor = "multi_thread")]
async fn status_filters_are_lenient_about_unknown_statuses() {
    let (service, project_id) = default_service().await;

    service
        .create(venue_request(project_id).with_status("doing"))
        .await
        .expect("creation should succeed");

    let doing = service
        .list_by_status("doing")
        .await
        .expect("filter should succeed");
    assert_eq!(doing.len(), 1);

    let unknown = service
        .list_by_status("urgent")
        .await
        .expect("unknown status filters to nothing");
    assert!(unknown.is_empty());

    let scoped = service
        .list_by_project_and_status(project_id, "urgent")
        .await
        .expect("unknown status filters to nothing");
    assert!(scoped.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn overdue_queries_use_the_current_date() {
    let (service, project_id) = fixed_service(noon()).await;

    let overdue = service
        .create(venue_request(project_id).with_deadline(date(2026, 3, 9)))
        .await
        .expect("creation should succeed");
    service
        .create(
            CreateTaskRequest::new(
                project_id,
                "Send invites",
                "Email the full guest list with directions",
            )
            .with_deadline(date(2026, 3, 10)),
        )
        .await
        .expect("creation should succeed");
    service
        .create(
            CreateTaskRequest::new(
                project_id,
                "Draft agenda",
                "Outline the program for the whole evening",
            )
            .with_status("done")
            .with_deadline(date(2026, 3, 1)),
        )
        .await
        .expect("creation should succeed");

    let all_overdue = service.overdue().await.expect("query should succeed");
    assert_eq!(all_overdue.len(), 1);
    assert_eq!(all_overdue.first().expect("one entry").id(), overdue.id());

    let scoped = service
        .overdue_by_project(project_id)
        .await
        .expect("query should succeed");
    assert_eq!(scoped.len(), 1);

    let elsewhere = service
        .overdue_by_project(ProjectId::new())
        .await
        .expect("query should succeed");
    assert!(elsewhere.is_empty());
}

#[rstest]
#[case("")]
#[case("   ")]
#[tokio::test(flavor = "multi_thread")]
async fn blank_search_returns_no_tasks(#[case] query: &str) {
    let (service, project_id) = default_service().await;
    service
        .create(venue_request(project_id))
        .await
        .expect("creation should succeed");

    let found = service
        .search(query, None)
        .await
        .expect("search should succeed");
    assert!(found.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn search_matches_title_or_description_and_respects_scope() {
    let (service, project_id) = default_service().await;

    let venue = service
        .create(venue_request(project_id))
        .await
        .expect("creation should succeed");
    service
        .create(CreateTaskRequest::new(
            project_id,
            "Send invites",
            "Email the full guest list with directions",
        ))
        .await
        .expect("creation should succeed");

    let by_title = service
        .search("VENUE", None)
        .await
        .expect("search should succeed");
    assert_eq!(by_title.len(), 1);
    assert_eq!(by_title.first().expect("one match").id(), venue.id());

    let by_description = service
        .search("guest list", Some(project_id))
        .await
        .expect("search should succeed");
    assert_eq!(by_description.len(), 1);

    let out_of_scope = service
        .search("venue", Some(ProjectId::new()))
        .await
        .expect("search should succeed");
    assert!(out_of_scope.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn statistics_cover_statuses_overdue_and_completed() {
    let (service, project_id) = fixed_service(noon()).await;

    service
        .create(venue_request(project_id).with_deadline(date(2026, 3, 9)))
        .await
        .expect("creation should succeed");
    service
        .create(
            CreateTaskRequest::new(
                project_id,
                "Send invites",
                "Email the full guest list with directions",
            )
            .with_status("doing"),
        )
        .await
        .expect("creation should succeed");
    service
        .create(
            CreateTaskRequest::new(
                project_id,
                "Draft agenda",
                "Outline the program for the whole evening",
            )
            .with_status("done"),
        )
        .await
        .expect("creation should succeed");

    let stats = service
        .statistics(Some(project_id))
        .await
        .expect("statistics should succeed");

    assert_eq!(stats.total, 3);
    assert_eq!(stats.todo, 1);
    assert_eq!(stats.doing, 1);
    assert_eq!(stats.done, 1);
    assert_eq!(stats.overdue, 1);
    assert_eq!(stats.completed, 1);

    let global = service
        .statistics(None)
        .await
        .expect("statistics should succeed");
    assert_eq!(global.total, 3);
}

#[tokio::test(flavor = "multi_thread")]
async fn autoclose_closes_each_overdue_task_exactly_once() {
    let (service, project_id) = fixed_service(noon()).await;

    let overdue = service
        .create(venue_request(project_id).with_deadline(date(2026, 3, 9)))
        .await
        .expect("creation should succeed");
    let open = service
        .create(CreateTaskRequest::new(
            project_id,
            "Send invites",
            "Email the full guest list with directions",
        ))
        .await
        .expect("creation should succeed");

    let closed = service
        .autoclose_overdue()
        .await
        .expect("sweep should succeed");
    assert_eq!(closed, 1);

    let swept = service
        .find_by_id(overdue.id())
        .await
        .expect("lookup should succeed")
        .expect("task should exist");
    assert_eq!(swept.status(), TaskStatus::Done);
    assert_eq!(swept.closed_at(), Some(noon()));

    let untouched = service
        .find_by_id(open.id())
        .await
        .expect("lookup should succeed")
        .expect("task should exist");
    assert_eq!(untouched.status(), TaskStatus::Todo);
    assert!(untouched.closed_at().is_none());

    let second_run = service
        .autoclose_overdue()
        .await
        .expect("sweep should succeed");
    assert_eq!(second_run, 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_is_idempotent_style() {
    let (service, project_id) = default_service().await;

    let created = service
        .create(venue_request(project_id))
        .await
        .expect("creation should succeed");

    assert!(service.delete(created.id()).await.expect("delete should succeed"));
    assert!(!service.delete(created.id()).await.expect("delete should succeed"));
    assert!(!service.exists(created.id()).await.expect("lookup should succeed"));
}

#[tokio::test(flavor = "multi_thread")]
async fn completed_queries_return_done_tasks() {
    let (service, project_id) = default_service().await;

    service
        .create(venue_request(project_id).with_status("done"))
        .await
        .expect("creation should succeed");
    service
        .create(CreateTaskRequest::new(
            project_id,
            "Send invites",
            "Email the full guest list with directions",
        ))
        .await
        .expect("creation should succeed");

    let completed = service.completed().await.expect("query should succeed");
    assert_eq!(completed.len(), 1);

    let scoped = service
        .completed_by_project(project_id)
        .await
        .expect("query should succeed");
    assert_eq!(scoped.len(), 1);

    assert_eq!(
        service
            .count_by_project(project_id)
            .await
            .expect("count should succeed"),
        2
    );
}
