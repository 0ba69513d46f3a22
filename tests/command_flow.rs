// File: tests/command_flow.rs
// Command semantics against a live model: duplicate/overlap guards, displayed
// indices under a filter, and edit behavior.
use anyhow::Result;
use chrono::{NaiveDate, NaiveTime};
use ezsched::command::{MESSAGE_DUPLICATE_EVENT, MESSAGE_EVENT_OVERLAP};
use ezsched::logic::{ExecuteError, Logic};
use ezsched::model::{Event, EventName, UserPrefs};
use ezsched::storage::Storage;
use ezsched::store::{Model, Scheduler};
use std::cell::RefCell;

fn event(name: &str, date: &str, start: &str, end: &str) -> Event {
    Event::new(
        EventName::new(name).unwrap(),
        NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        NaiveTime::parse_from_str(start, "%H:%M").unwrap(),
        NaiveTime::parse_from_str(end, "%H:%M").unwrap(),
    )
}

#[derive(Default)]
struct MemoryStorage {
    scheduler: RefCell<Option<Scheduler>>,
}

impl Storage for MemoryStorage {
    fn load_scheduler(&self) -> Result<Option<Scheduler>> {
        Ok(self.scheduler.borrow().clone())
    }

    fn save_scheduler(&self, scheduler: &Scheduler) -> Result<()> {
        *self.scheduler.borrow_mut() = Some(scheduler.clone());
        Ok(())
    }

    fn load_prefs(&self) -> Result<Option<UserPrefs>> {
        Ok(None)
    }

    fn save_prefs(&self, _prefs: &UserPrefs) -> Result<()> {
        Ok(())
    }
}

fn logic() -> Logic {
    Logic::new(
        Model::new(Scheduler::new(), UserPrefs::default()),
        Box::new(MemoryStorage::default()),
    )
}

fn command_message(err: ExecuteError) -> String {
    match err {
        ExecuteError::Command(e) => e.0,
        other => panic!("expected command failure, got {other:?}"),
    }
}

#[test]
fn duplicate_add_is_rejected_without_mutation() {
    let mut logic = logic();
    logic
        .execute("add n/Tennis d/2024-05-01 s/10:00 e/11:00")
        .unwrap();
    let before = logic.model().clone();

    let err = logic
        .execute("add n/Tennis d/2024-05-01 s/10:00 e/11:00")
        .unwrap_err();
    assert_eq!(command_message(err), MESSAGE_DUPLICATE_EVENT);
    assert_eq!(logic.model(), &before);
}

#[test]
fn overlapping_add_is_rejected_without_mutation() {
    let mut logic = logic();
    logic
        .execute("add n/Tennis d/2024-05-01 s/10:00 e/11:00")
        .unwrap();
    let before = logic.model().clone();

    let err = logic
        .execute("add n/Gym d/2024-05-01 s/10:30 e/11:30")
        .unwrap_err();
    assert_eq!(command_message(err), MESSAGE_EVENT_OVERLAP);
    assert_eq!(logic.model(), &before);
}

#[test]
fn back_to_back_events_are_allowed() {
    // Boundary touching is not overlap: one event may start exactly when
    // another ends.
    let mut logic = logic();
    logic
        .execute("add n/Tennis d/2024-05-01 s/10:00 e/11:00")
        .unwrap();
    logic
        .execute("add n/Lunch d/2024-05-01 s/11:00 e/12:00")
        .unwrap();
    assert_eq!(logic.model().scheduler().len(), 2);
}

#[test]
fn same_times_on_other_dates_are_allowed() {
    let mut logic = logic();
    logic
        .execute("add n/Tennis d/2024-05-01 s/10:00 e/11:00")
        .unwrap();
    logic
        .execute("add n/Tennis d/2024-05-08 s/10:00 e/11:00")
        .unwrap();
    assert_eq!(logic.model().scheduler().len(), 2);
}

#[test]
fn delete_uses_the_displayed_ordering() {
    let mut logic = logic();
    // Inserted out of chronological order; display sorts by date.
    logic
        .execute("add n/Later d/2024-05-02 s/09:00 e/10:00")
        .unwrap();
    logic
        .execute("add n/Earlier d/2024-05-01 s/09:00 e/10:00")
        .unwrap();

    let result = logic.execute("delete 1").unwrap();
    assert!(result.feedback.starts_with("Deleted event: Earlier"));
    assert_eq!(
        logic.filtered_events(),
        vec![event("Later", "2024-05-02", "09:00", "10:00")]
    );
}

#[test]
fn delete_respects_an_active_filter() {
    let mut logic = logic();
    logic
        .execute("add n/Tennis d/2024-05-01 s/10:00 e/11:00")
        .unwrap();
    logic
        .execute("add n/Dentist d/2024-05-02 s/10:00 e/11:00")
        .unwrap();

    let result = logic.execute("find d/2024-05-02").unwrap();
    assert_eq!(result.feedback, "1 events listed!");

    // Index 1 now points at the only displayed event, not the first added.
    logic.execute("delete 1").unwrap();
    logic.execute("list").unwrap();
    assert_eq!(
        logic.filtered_events(),
        vec![event("Tennis", "2024-05-01", "10:00", "11:00")]
    );
}

#[test]
fn find_by_keyword_is_case_insensitive() {
    let mut logic = logic();
    logic
        .execute("add n/Team Standup d/2024-05-01 s/10:00 e/10:30")
        .unwrap();
    logic
        .execute("add n/Dentist d/2024-05-02 s/10:00 e/11:00")
        .unwrap();

    let result = logic.execute("find standup").unwrap();
    assert_eq!(result.feedback, "1 events listed!");
    assert_eq!(logic.filtered_events()[0].name().as_str(), "Team Standup");
}

#[test]
fn edit_replaces_the_event_in_place() {
    let mut logic = logic();
    logic
        .execute("add n/Tennis d/2024-05-01 s/10:00 e/11:00")
        .unwrap();

    let result = logic.execute("edit 1 s/12:00 e/13:00").unwrap();
    assert!(result.feedback.starts_with("Edited event: Tennis"));
    assert_eq!(
        logic.filtered_events(),
        vec![event("Tennis", "2024-05-01", "12:00", "13:00")]
    );
}

#[test]
fn edit_cannot_create_an_overlap() {
    let mut logic = logic();
    logic
        .execute("add n/Tennis d/2024-05-01 s/10:00 e/11:00")
        .unwrap();
    logic
        .execute("add n/Lunch d/2024-05-01 s/12:00 e/13:00")
        .unwrap();
    let before = logic.model().clone();

    let err = logic.execute("edit 2 s/10:30 e/11:30").unwrap_err();
    assert_eq!(command_message(err), MESSAGE_EVENT_OVERLAP);
    assert_eq!(logic.model(), &before);
}

#[test]
fn edit_may_keep_its_own_slot() {
    // Shrinking an event within its own previous interval must not trip the
    // overlap guard against itself.
    let mut logic = logic();
    logic
        .execute("add n/Tennis d/2024-05-01 s/10:00 e/12:00")
        .unwrap();
    logic.execute("edit 1 e/11:00").unwrap();
    assert_eq!(
        logic.filtered_events(),
        vec![event("Tennis", "2024-05-01", "10:00", "11:00")]
    );
}

#[test]
fn edit_cannot_duplicate_another_event() {
    let mut logic = logic();
    logic
        .execute("add n/Tennis d/2024-05-01 s/10:00 e/11:00")
        .unwrap();
    logic
        .execute("add n/Tennis d/2024-05-08 s/10:00 e/11:00")
        .unwrap();

    let err = logic.execute("edit 2 d/2024-05-01").unwrap_err();
    assert_eq!(command_message(err), MESSAGE_DUPLICATE_EVENT);
}

#[test]
fn list_resets_an_active_filter() {
    let mut logic = logic();
    logic
        .execute("add n/Tennis d/2024-05-01 s/10:00 e/11:00")
        .unwrap();
    logic
        .execute("add n/Dentist d/2024-05-02 s/10:00 e/11:00")
        .unwrap();

    logic.execute("find tennis").unwrap();
    assert_eq!(logic.filtered_events().len(), 1);

    logic.execute("list").unwrap();
    assert_eq!(logic.filtered_events().len(), 2);
}
