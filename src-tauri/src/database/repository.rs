//! Repository layer for database operations
//!
//! CRUD operations for all family entities. Every read and write is
//! scoped to a family or entity id; there is no cross-family access
//! path. Inserts return the written row, and reads of member-referencing
//! entities expand the referenced member, so callers can patch their
//! in-memory lists without a second round trip.

use super::models::*;
use crate::error::{AppError, Result};
use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;
use std::collections::HashMap;
use uuid::Uuid;

/// Repository for database operations
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ===== Users =====

    /// Create an account. The e-mail is unique; a duplicate maps to
    /// `EmailTaken` rather than a bare database error.
    pub async fn create_user(&self, email: &str, password_hash: &str) -> Result<User> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, email, password_hash, created_at)
            VALUES (?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&id)
        .bind(email)
        .bind(password_hash)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => AppError::EmailTaken,
            _ => AppError::Database(e),
        })?;

        tracing::debug!("Created user: {}", id);
        Ok(user)
    }

    pub async fn get_user(&self, id: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    // ===== Families =====

    pub async fn find_family_by_creator(&self, user_id: &str) -> Result<Option<Family>> {
        let family = sqlx::query_as::<_, Family>("SELECT * FROM families WHERE created_by = ?")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(family)
    }

    /// Idempotent family creation keyed on the creating account.
    ///
    /// The unique index on `created_by` makes concurrent double-bootstrap
    /// collapse into a single row: the losing insert is a no-op and both
    /// callers read back the same family.
    pub async fn upsert_family(&self, name: &str, created_by: &str) -> Result<Family> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO families (id, name, created_by, created_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(created_by) DO NOTHING
            "#,
        )
        .bind(&id)
        .bind(name)
        .bind(created_by)
        .bind(now)
        .execute(&self.pool)
        .await?;

        let family = sqlx::query_as::<_, Family>("SELECT * FROM families WHERE created_by = ?")
            .bind(created_by)
            .fetch_one(&self.pool)
            .await?;

        tracing::debug!("Family for {} resolved to: {}", created_by, family.id);
        Ok(family)
    }

    // ===== Family Members =====

    pub async fn create_member(
        &self,
        family_id: &str,
        name: &str,
        role: MemberRole,
        user_id: Option<&str>,
    ) -> Result<FamilyMember> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        let member = sqlx::query_as::<_, FamilyMember>(
            r#"
            INSERT INTO family_members (id, name, role, user_id, family_id, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&id)
        .bind(name)
        .bind(role)
        .bind(user_id)
        .bind(family_id)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("Created member: {} in family: {}", id, family_id);
        Ok(member)
    }

    pub async fn list_members(&self, family_id: &str) -> Result<Vec<FamilyMember>> {
        let members = sqlx::query_as::<_, FamilyMember>(
            "SELECT * FROM family_members WHERE family_id = ? ORDER BY created_at",
        )
        .bind(family_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }

    pub async fn get_member(&self, id: &str) -> Result<FamilyMember> {
        sqlx::query_as::<_, FamilyMember>("SELECT * FROM family_members WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::MemberNotFound(id.to_string()))
    }

    pub async fn find_member_by_user(
        &self,
        family_id: &str,
        user_id: &str,
    ) -> Result<Option<FamilyMember>> {
        let member = sqlx::query_as::<_, FamilyMember>(
            "SELECT * FROM family_members WHERE family_id = ? AND user_id = ?",
        )
        .bind(family_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(member)
    }

    /// Members of a family indexed by id, for expanding references
    async fn member_index(&self, family_id: &str) -> Result<HashMap<String, FamilyMember>> {
        let members = self.list_members(family_id).await?;
        Ok(members.into_iter().map(|m| (m.id.clone(), m)).collect())
    }

    // ===== Shopping Items =====

    pub async fn create_shopping_item(
        &self,
        family_id: &str,
        added_by: &str,
        name: &str,
        quantity: i64,
        unit: Option<&str>,
    ) -> Result<ShoppingItem> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        let mut item = sqlx::query_as::<_, ShoppingItem>(
            r#"
            INSERT INTO shopping_items (id, name, quantity, unit, completed, added_by, family_id, created_at)
            VALUES (?, ?, ?, ?, 0, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&id)
        .bind(name)
        .bind(quantity)
        .bind(unit)
        .bind(added_by)
        .bind(family_id)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        item.member = Some(self.get_member(added_by).await?);

        tracing::debug!("Created shopping item: {} in family: {}", id, family_id);
        Ok(item)
    }

    /// All shopping items of the family, newest first, member-expanded
    pub async fn list_shopping_items(&self, family_id: &str) -> Result<Vec<ShoppingItem>> {
        let mut items = sqlx::query_as::<_, ShoppingItem>(
            "SELECT * FROM shopping_items WHERE family_id = ? ORDER BY created_at DESC",
        )
        .bind(family_id)
        .fetch_all(&self.pool)
        .await?;

        let members = self.member_index(family_id).await?;
        for item in &mut items {
            item.member = members.get(&item.added_by).cloned();
        }

        Ok(items)
    }

    pub async fn set_shopping_completed(&self, id: &str, completed: bool) -> Result<ShoppingItem> {
        let mut item = sqlx::query_as::<_, ShoppingItem>(
            r#"
            UPDATE shopping_items SET completed = ? WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(completed)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("shopping item {}", id)))?;

        item.member = Some(self.get_member(&item.added_by).await?);

        tracing::debug!("Shopping item {} completed = {}", id, completed);
        Ok(item)
    }

    // ===== House Tasks =====

    pub async fn create_task(
        &self,
        family_id: &str,
        title: &str,
        description: Option<&str>,
        assigned_to: Option<&str>,
    ) -> Result<HouseTask> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        let mut task = sqlx::query_as::<_, HouseTask>(
            r#"
            INSERT INTO house_tasks (id, title, description, assigned_to, completed, stars_earned, family_id, created_at)
            VALUES (?, ?, ?, ?, 0, 0, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&id)
        .bind(title)
        .bind(description)
        .bind(assigned_to)
        .bind(family_id)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        if let Some(member_id) = &task.assigned_to {
            task.member = Some(self.get_member(member_id).await?);
        }

        tracing::debug!("Created task: {} in family: {}", id, family_id);
        Ok(task)
    }

    /// All tasks of the family, newest first, member-expanded
    pub async fn list_tasks(&self, family_id: &str) -> Result<Vec<HouseTask>> {
        let mut tasks = sqlx::query_as::<_, HouseTask>(
            "SELECT * FROM house_tasks WHERE family_id = ? ORDER BY created_at DESC",
        )
        .bind(family_id)
        .fetch_all(&self.pool)
        .await?;

        let members = self.member_index(family_id).await?;
        for task in &mut tasks {
            task.member = task
                .assigned_to
                .as_ref()
                .and_then(|id| members.get(id).cloned());
        }

        Ok(tasks)
    }

    /// Flip a task's completed flag together with its derived reward state
    pub async fn set_task_completed(&self, id: &str, completed: bool) -> Result<HouseTask> {
        let state = task_completion(completed, Utc::now());

        let mut task = sqlx::query_as::<_, HouseTask>(
            r#"
            UPDATE house_tasks
            SET completed = ?, stars_earned = ?, completed_at = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(state.completed)
        .bind(state.stars_earned)
        .bind(state.completed_at)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("task {}", id)))?;

        if let Some(member_id) = &task.assigned_to {
            task.member = Some(self.get_member(member_id).await?);
        }

        tracing::debug!("Task {} completed = {}", id, completed);
        Ok(task)
    }

    // ===== Family Events =====

    pub async fn create_event(
        &self,
        family_id: &str,
        created_by: &str,
        req: &NewEvent,
    ) -> Result<FamilyEvent> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        let mut event = sqlx::query_as::<_, FamilyEvent>(
            r#"
            INSERT INTO family_events (id, title, description, date, time, event_type, created_by, family_id, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&id)
        .bind(&req.title)
        .bind(&req.description)
        .bind(req.date)
        .bind(req.time)
        .bind(req.event_type)
        .bind(created_by)
        .bind(family_id)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        event.member = Some(self.get_member(created_by).await?);

        tracing::debug!("Created event: {} in family: {}", id, family_id);
        Ok(event)
    }

    /// Events on or after the given date, ascending by date, member-expanded
    pub async fn list_upcoming_events(
        &self,
        family_id: &str,
        from: NaiveDate,
    ) -> Result<Vec<FamilyEvent>> {
        let mut events = sqlx::query_as::<_, FamilyEvent>(
            "SELECT * FROM family_events WHERE family_id = ? AND date >= ? ORDER BY date",
        )
        .bind(family_id)
        .bind(from)
        .fetch_all(&self.pool)
        .await?;

        let members = self.member_index(family_id).await?;
        for event in &mut events {
            event.member = members.get(&event.created_by).cloned();
        }

        Ok(events)
    }

    // ===== Meals =====

    pub async fn create_meal(&self, family_id: &str, req: &NewMeal) -> Result<Meal> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        let meal = sqlx::query_as::<_, Meal>(
            r#"
            INSERT INTO meals (id, name, meal_type, date, recipe, family_id, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&id)
        .bind(&req.name)
        .bind(req.meal_type)
        .bind(req.date)
        .bind(&req.recipe)
        .bind(family_id)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("Created meal: {} in family: {}", id, family_id);
        Ok(meal)
    }

    /// Meals within the inclusive date window, ascending by date
    pub async fn list_meals_between(
        &self,
        family_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Meal>> {
        let meals = sqlx::query_as::<_, Meal>(
            "SELECT * FROM meals WHERE family_id = ? AND date >= ? AND date <= ? ORDER BY date",
        )
        .bind(family_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(meals)
    }

    // ===== Child Routines =====

    pub async fn create_routine(&self, family_id: &str, req: &NewRoutine) -> Result<ChildRoutine> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        let routine = sqlx::query_as::<_, ChildRoutine>(
            r#"
            INSERT INTO child_routines (id, child_name, task, time, completed, date, family_id, created_at)
            VALUES (?, ?, ?, ?, 0, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&id)
        .bind(&req.child_name)
        .bind(&req.task)
        .bind(req.time)
        .bind(req.date)
        .bind(family_id)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("Created routine: {} in family: {}", id, family_id);
        Ok(routine)
    }

    /// Routine entries for one day, ascending by time
    pub async fn list_routines_for(
        &self,
        family_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<ChildRoutine>> {
        let routines = sqlx::query_as::<_, ChildRoutine>(
            "SELECT * FROM child_routines WHERE family_id = ? AND date = ? ORDER BY time",
        )
        .bind(family_id)
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        Ok(routines)
    }

    pub async fn set_routine_completed(&self, id: &str, completed: bool) -> Result<ChildRoutine> {
        let routine = sqlx::query_as::<_, ChildRoutine>(
            r#"
            UPDATE child_routines SET completed = ? WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(completed)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("routine {}", id)))?;

        tracing::debug!("Routine {} completed = {}", id, completed);
        Ok(routine)
    }

    // ===== House Expenses =====

    pub async fn create_expense(&self, family_id: &str, req: &NewExpense) -> Result<HouseExpense> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        let expense = sqlx::query_as::<_, HouseExpense>(
            r#"
            INSERT INTO house_expenses (id, title, amount, due_date, paid, category, family_id, created_at)
            VALUES (?, ?, ?, ?, 0, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&id)
        .bind(&req.title)
        .bind(req.amount)
        .bind(req.due_date)
        .bind(req.category)
        .bind(family_id)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("Created expense: {} in family: {}", id, family_id);
        Ok(expense)
    }

    /// Unpaid expenses of the family, ascending by due date
    pub async fn list_unpaid_expenses(&self, family_id: &str) -> Result<Vec<HouseExpense>> {
        let expenses = sqlx::query_as::<_, HouseExpense>(
            "SELECT * FROM house_expenses WHERE family_id = ? AND paid = 0 ORDER BY due_date",
        )
        .bind(family_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(expenses)
    }

    /// Flip an expense's paid flag together with its derived timestamp
    pub async fn set_expense_paid(&self, id: &str, paid: bool) -> Result<HouseExpense> {
        let state = expense_settlement(paid, Utc::now());

        let expense = sqlx::query_as::<_, HouseExpense>(
            r#"
            UPDATE house_expenses SET paid = ?, paid_at = ? WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(state.paid)
        .bind(state.paid_at)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("expense {}", id)))?;

        tracing::debug!("Expense {} paid = {}", id, paid);
        Ok(expense)
    }

    // ===== Settings =====

    pub async fn get_setting(&self, key: &str) -> Result<Option<String>> {
        let value: Option<String> = sqlx::query_scalar("SELECT value FROM settings WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(value)
    }

    pub async fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO settings (key, value) VALUES (?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;

        tracing::debug!("Set setting: {}", key);
        Ok(())
    }

    pub async fn delete_setting(&self, key: &str) -> Result<()> {
        sqlx::query("DELETE FROM settings WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
