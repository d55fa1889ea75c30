//! Database models
//!
//! Rust structs representing database entities.
//! All models use serde for serialization to the frontend.
//!
//! Every entity belongs to exactly one family; `family_id` is the unit
//! of data isolation. Member-referencing entities carry an optional
//! expanded `member` field populated by the repository, never stored.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A signed-up account. Never serialized to the frontend; the session
/// layer exposes an `Identity` view instead.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// A household. One family is auto-created per account on first sign-in;
/// `created_by` is unique at the storage layer.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Family {
    pub id: String,
    pub name: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

/// Role of a member within the family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum MemberRole {
    Mae,
    Pai,
    Filho,
    Filha,
    Outro,
}

/// A person belonging to a family, optionally linked to an account
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FamilyMember {
    pub id: String,
    pub name: String,
    pub role: MemberRole,
    pub user_id: Option<String>,
    pub family_id: String,
    pub created_at: DateTime<Utc>,
}

/// An entry on the shared shopping list
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ShoppingItem {
    pub id: String,
    pub name: String,
    pub quantity: i64,
    pub unit: Option<String>,
    pub completed: bool,
    pub added_by: String,
    pub family_id: String,
    pub created_at: DateTime<Utc>,
    /// Member who added the item, expanded on read
    #[sqlx(skip)]
    pub member: Option<FamilyMember>,
}

/// A household chore, optionally assigned to a member.
/// Completion earns exactly one star and stamps `completed_at`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct HouseTask {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub assigned_to: Option<String>,
    pub completed: bool,
    pub stars_earned: i64,
    pub completed_at: Option<DateTime<Utc>>,
    pub family_id: String,
    pub created_at: DateTime<Utc>,
    /// Assigned member, expanded on read
    #[sqlx(skip)]
    pub member: Option<FamilyMember>,
}

/// Kind of calendar event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum EventType {
    Medico,
    Escola,
    Conta,
    Compromisso,
    Outro,
}

/// An entry on the family agenda
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FamilyEvent {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
    pub event_type: EventType,
    pub created_by: String,
    pub family_id: String,
    pub created_at: DateTime<Utc>,
    /// Member who created the event, expanded on read
    #[sqlx(skip)]
    pub member: Option<FamilyMember>,
}

/// Kind of meal on the weekly plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum MealType {
    Cafe,
    Almoco,
    Janta,
    Lanche,
}

/// A planned meal
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Meal {
    pub id: String,
    pub name: String,
    pub meal_type: MealType,
    pub date: NaiveDate,
    pub recipe: Option<String>,
    pub family_id: String,
    pub created_at: DateTime<Utc>,
}

/// A dated routine entry for a child
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ChildRoutine {
    pub id: String,
    pub child_name: String,
    pub task: String,
    pub time: NaiveTime,
    pub completed: bool,
    pub date: NaiveDate,
    pub family_id: String,
    pub created_at: DateTime<Utc>,
}

/// Category of a household expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum ExpenseCategory {
    Conta,
    Mercado,
    Farmacia,
    Escola,
    Outro,
}

/// A household bill. Marking it paid stamps `paid_at`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct HouseExpense {
    pub id: String,
    pub title: String,
    pub amount: f64,
    pub due_date: NaiveDate,
    pub paid: bool,
    pub paid_at: Option<DateTime<Utc>>,
    pub category: ExpenseCategory,
    pub family_id: String,
    pub created_at: DateTime<Utc>,
}

// ===== Mutation Requests =====

/// New family member request
#[derive(Debug, Clone, Deserialize)]
pub struct NewMember {
    pub name: String,
    pub role: MemberRole,
}

/// New shopping item request
#[derive(Debug, Clone, Deserialize)]
pub struct NewShoppingItem {
    pub name: String,
    pub quantity: Option<i64>,
    pub unit: Option<String>,
}

/// New house task request
#[derive(Debug, Clone, Deserialize)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub assigned_to: Option<String>,
}

/// New agenda event request
#[derive(Debug, Clone, Deserialize)]
pub struct NewEvent {
    pub title: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
    pub event_type: EventType,
}

/// New planned meal request
#[derive(Debug, Clone, Deserialize)]
pub struct NewMeal {
    pub name: String,
    pub meal_type: MealType,
    pub date: NaiveDate,
    pub recipe: Option<String>,
}

/// New child routine request
#[derive(Debug, Clone, Deserialize)]
pub struct NewRoutine {
    pub child_name: String,
    pub task: String,
    pub time: NaiveTime,
    pub date: NaiveDate,
}

/// New expense request
#[derive(Debug, Clone, Deserialize)]
pub struct NewExpense {
    pub title: String,
    pub amount: f64,
    pub due_date: NaiveDate,
    pub category: ExpenseCategory,
}

// ===== Derived Completion State =====
//
// The boolean flag, the reward counter and the timestamp always move
// together. Computing them in one place keeps the invariants
// (completed <=> stars_earned=1 <=> completed_at set) enforceable.

/// Fields written alongside a task's completed flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskCompletion {
    pub completed: bool,
    pub stars_earned: i64,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Derive the reward and timestamp state for a task completion change
pub fn task_completion(completed: bool, now: DateTime<Utc>) -> TaskCompletion {
    if completed {
        TaskCompletion {
            completed: true,
            stars_earned: 1,
            completed_at: Some(now),
        }
    } else {
        TaskCompletion {
            completed: false,
            stars_earned: 0,
            completed_at: None,
        }
    }
}

/// Fields written alongside an expense's paid flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpenseSettlement {
    pub paid: bool,
    pub paid_at: Option<DateTime<Utc>>,
}

/// Derive the timestamp state for an expense paid change
pub fn expense_settlement(paid: bool, now: DateTime<Utc>) -> ExpenseSettlement {
    if paid {
        ExpenseSettlement {
            paid: true,
            paid_at: Some(now),
        }
    } else {
        ExpenseSettlement {
            paid: false,
            paid_at: None,
        }
    }
}
