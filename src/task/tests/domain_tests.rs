//! Unit tests for task domain types.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use crate::project::domain::ProjectId;
use crate::task::domain::{
    ParseTaskStatusError, Task, TaskDescription, TaskDomainError, TaskStatus, TaskTitle,
};
use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use mockable::Clock;
use rstest::rstest;

const VALID_DESCRIPTION: &str = "Find and reserve an event venue downtown";

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

fn instant(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 10, hour, 0, 0)
        .single()
        .expect("valid timestamp")
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

fn book_venue(status: TaskStatus, deadline: Option<NaiveDate>, clock: &impl Clock) -> Task {
    Task::new(
        ProjectId::new(),
        TaskTitle::new("Book venue").expect("valid title"),
        TaskDescription::new(VALID_DESCRIPTION).expect("valid description"),
        status,
        deadline,
        clock,
    )
}

// ── TaskTitle and TaskDescription validation ───────────────────────

#[rstest]
#[case("Book venue", "Book venue")]
#[case("  Book venue  ", "Book venue")]
fn title_is_trimmed_and_accepted(#[case] raw: &str, #[case] expected: &str) {
    let title = TaskTitle::new(raw).expect("title should validate");
    assert_eq!(title.as_str(), expected);
}

#[test]
fn blank_title_is_rejected() {
    assert_eq!(TaskTitle::new("  "), Err(TaskDomainError::EmptyTitle));
}

#[test]
fn title_shorter_than_three_characters_is_rejected() {
    assert_eq!(TaskTitle::new("ab"), Err(TaskDomainError::TitleTooShort(3)));
}

#[test]
fn description_shorter_than_fifteen_characters_is_rejected() {
    assert_eq!(
        TaskDescription::new("too short"),
        Err(TaskDomainError::DescriptionTooShort(15))
    );
}

// ── TaskStatus parsing and wire format ─────────────────────────────

#[rstest]
#[case("todo", TaskStatus::Todo)]
#[case("doing", TaskStatus::Doing)]
#[case("done", TaskStatus::Done)]
#[case("  DONE  ", TaskStatus::Done)]
fn status_parses_known_values(#[case] raw: &str, #[case] expected: TaskStatus) {
    assert_eq!(TaskStatus::try_from(raw), Ok(expected));
}

#[test]
fn status_rejects_unknown_values() {
    assert_eq!(
        TaskStatus::try_from("urgent"),
        Err(ParseTaskStatusError("urgent".to_owned()))
    );
}

#[test]
fn status_defaults_to_todo() {
    assert_eq!(TaskStatus::default(), TaskStatus::Todo);
}

#[test]
fn status_serializes_to_its_canonical_string() {
    let value = serde_json::to_value(TaskStatus::Doing).expect("serialization should succeed");
    assert_eq!(value, serde_json::json!("doing"));
}

// ── Task aggregate ─────────────────────────────────────────────────

#[test]
fn new_tasks_share_creation_and_update_timestamps() {
    let clock = FixedClock(instant(9));
    let task = book_venue(TaskStatus::Todo, None, &clock);

    assert_eq!(task.created_at(), instant(9));
    assert_eq!(task.updated_at(), instant(9));
    assert!(task.closed_at().is_none());
}

#[rstest]
#[case(Some(date(2026, 3, 9)), TaskStatus::Todo, true)]
#[case(Some(date(2026, 3, 9)), TaskStatus::Doing, true)]
#[case(Some(date(2026, 3, 9)), TaskStatus::Done, false)]
#[case(Some(date(2026, 3, 10)), TaskStatus::Todo, false)]
#[case(Some(date(2026, 3, 11)), TaskStatus::Todo, false)]
#[case(None, TaskStatus::Todo, false)]
fn overdue_requires_a_passed_deadline_and_an_open_status(
    #[case] deadline: Option<NaiveDate>,
    #[case] status: TaskStatus,
    #[case] expected: bool,
) {
    let clock = FixedClock(instant(9));
    let task = book_venue(status, deadline, &clock);

    assert_eq!(task.is_overdue(date(2026, 3, 10)), expected);
}

#[test]
fn ordinary_status_change_to_done_leaves_closed_at_empty() {
    let clock = FixedClock(instant(9));
    let mut task = book_venue(TaskStatus::Todo, None, &clock);

    task.set_status(TaskStatus::Done, &clock);

    assert!(task.is_completed());
    assert!(task.closed_at().is_none());
}

#[test]
fn force_close_marks_done_and_stamps_the_closed_timestamp() {
    let created = FixedClock(instant(9));
    let swept = FixedClock(instant(17));
    let mut task = book_venue(TaskStatus::Todo, Some(date(2026, 3, 9)), &created);

    task.force_close(&swept);

    assert_eq!(task.status(), TaskStatus::Done);
    assert_eq!(task.closed_at(), Some(instant(17)));
    assert_eq!(task.updated_at(), instant(17));
    assert_eq!(task.created_at(), instant(9));
}

#[test]
fn mutators_refresh_the_update_timestamp() {
    let created = FixedClock(instant(9));
    let later = FixedClock(instant(10));
    let mut task = book_venue(TaskStatus::Todo, None, &created);

    task.retitle(TaskTitle::new("Book larger venue").expect("valid title"), &later);

    assert_eq!(task.created_at(), instant(9));
    assert_eq!(task.updated_at(), instant(10));
    assert_eq!(task.title().as_str(), "Book larger venue");
}

#[test]
fn set_deadline_replaces_the_previous_deadline() {
    let clock = FixedClock(instant(9));
    let mut task = book_venue(TaskStatus::Todo, Some(date(2026, 3, 9)), &clock);

    task.set_deadline(date(2026, 4, 1), &clock);

    assert_eq!(task.deadline(), Some(date(2026, 4, 1)));
}
