//! Tab presentation derivations
//!
//! Pure functions partitioning the cached family state into the views
//! the tabs render. No side effects, no memoization: every call
//! recomputes from the lists it is given.

use crate::config;
use crate::database::{FamilyEvent, HouseExpense, HouseTask, ShoppingItem};
use crate::services::FamilyState;
use chrono::{Duration, NaiveDate};
use serde::Serialize;

/// Events split into the dashboard's three agenda sections
#[derive(Debug, Default, Serialize)]
pub struct EventAgenda {
    pub today: Vec<FamilyEvent>,
    pub tomorrow: Vec<FamilyEvent>,
    /// First few events beyond tomorrow, in list order
    pub upcoming: Vec<FamilyEvent>,
}

/// Partition events by date relative to `today`. The upcoming section
/// is capped and keeps the input order, which is ascending by date for
/// a store-maintained list.
pub fn partition_events(events: &[FamilyEvent], today: NaiveDate) -> EventAgenda {
    let tomorrow = today + Duration::days(1);
    let mut agenda = EventAgenda::default();

    for event in events {
        if event.date == today {
            agenda.today.push(event.clone());
        } else if event.date == tomorrow {
            agenda.tomorrow.push(event.clone());
        } else if event.date > tomorrow && agenda.upcoming.len() < config::UPCOMING_EVENTS_LIMIT {
            agenda.upcoming.push(event.clone());
        }
    }

    agenda
}

/// Tasks split by completion
#[derive(Debug, Default, Serialize)]
pub struct TaskBoard {
    pub pending: Vec<HouseTask>,
    pub completed: Vec<HouseTask>,
}

pub fn partition_tasks(tasks: &[HouseTask]) -> TaskBoard {
    let mut board = TaskBoard::default();
    for task in tasks {
        if task.completed {
            board.completed.push(task.clone());
        } else {
            board.pending.push(task.clone());
        }
    }
    board
}

/// Shopping items split by completion
#[derive(Debug, Default, Serialize)]
pub struct ShoppingBoard {
    pub pending: Vec<ShoppingItem>,
    pub completed: Vec<ShoppingItem>,
}

pub fn partition_shopping(items: &[ShoppingItem]) -> ShoppingBoard {
    let mut board = ShoppingBoard::default();
    for item in items {
        if item.completed {
            board.completed.push(item.clone());
        } else {
            board.pending.push(item.clone());
        }
    }
    board
}

/// Unpaid expenses whose due date has passed
pub fn overdue_expenses(expenses: &[HouseExpense], today: NaiveDate) -> Vec<HouseExpense> {
    expenses
        .iter()
        .filter(|e| !e.paid && e.due_date < today)
        .cloned()
        .collect()
}

/// The dashboard's headline counters
#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub overdue_bills: usize,
    pub pending_shopping: usize,
    pub pending_tasks: usize,
    pub today_events: usize,
}

pub fn dashboard_summary(state: &FamilyState, today: NaiveDate) -> DashboardSummary {
    DashboardSummary {
        overdue_bills: overdue_expenses(&state.house_expenses, today).len(),
        pending_shopping: state
            .shopping_items
            .iter()
            .filter(|i| !i.completed)
            .count(),
        pending_tasks: state.house_tasks.iter().filter(|t| !t.completed).count(),
        today_events: state
            .family_events
            .iter()
            .filter(|e| e.date == today)
            .count(),
    }
}
