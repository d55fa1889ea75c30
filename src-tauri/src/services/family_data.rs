//! Family data store and entity mutators
//!
//! Owns the in-memory cache of the active family's entity lists. All
//! mutation goes through this service: validate, write the row to the
//! database, then patch the cached list — inserts prepend or keep the
//! list date-sorted depending on the entity, updates merge by id. The
//! cache is never altered before the write succeeds, so a failed write
//! leaves it untouched.
//!
//! Bulk loads are guarded by a generation counter: switching or
//! deactivating the family bumps the generation, and a load that
//! finishes afterwards is discarded instead of clobbering the state of
//! a different family.

use crate::config;
use crate::database::*;
use crate::error::{AppError, Result};
use chrono::{Duration, Local, NaiveDate};
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard};

/// Aggregate snapshot of the active family's data, serialized to the
/// frontend as one unit
#[derive(Debug, Clone, Default, Serialize)]
pub struct FamilyState {
    pub family: Option<Family>,
    /// Member linked to the signed-in account
    pub current_member: Option<FamilyMember>,
    pub members: Vec<FamilyMember>,
    pub shopping_items: Vec<ShoppingItem>,
    pub house_tasks: Vec<HouseTask>,
    pub family_events: Vec<FamilyEvent>,
    pub meals: Vec<Meal>,
    pub child_routines: Vec<ChildRoutine>,
    pub house_expenses: Vec<HouseExpense>,
}

struct StoreInner {
    state: FamilyState,
    generation: u64,
}

/// Results of one bulk read, one slot per entity list
struct SliceLoads {
    members: Result<Vec<FamilyMember>>,
    shopping_items: Result<Vec<ShoppingItem>>,
    house_tasks: Result<Vec<HouseTask>>,
    family_events: Result<Vec<FamilyEvent>>,
    meals: Result<Vec<Meal>>,
    child_routines: Result<Vec<ChildRoutine>>,
    house_expenses: Result<Vec<HouseExpense>>,
}

/// Service owning the family state cache
#[derive(Clone)]
pub struct FamilyDataService {
    repo: Repository,
    inner: Arc<Mutex<StoreInner>>,
}

impl FamilyDataService {
    pub fn new(repo: Repository) -> Self {
        Self {
            repo,
            inner: Arc::new(Mutex::new(StoreInner {
                state: FamilyState::default(),
                generation: 0,
            })),
        }
    }

    /// Make a family the active one, resetting all cached lists
    pub fn activate(&self, family: Family, current_member: FamilyMember) -> Result<()> {
        let mut inner = self.lock()?;
        inner.generation += 1;
        inner.state = FamilyState {
            family: Some(family),
            current_member: Some(current_member),
            ..FamilyState::default()
        };
        Ok(())
    }

    /// Drop the active family and all cached data (sign-out)
    pub fn deactivate(&self) -> Result<()> {
        let mut inner = self.lock()?;
        inner.generation += 1;
        inner.state = FamilyState::default();
        Ok(())
    }

    /// Clone of the current state
    pub fn snapshot(&self) -> Result<FamilyState> {
        Ok(self.lock()?.state.clone())
    }

    /// Reload every entity list for the active family.
    ///
    /// The reads are independent: a failed read is logged and leaves
    /// that slice at its previous value while the others still apply.
    pub async fn refresh(&self) -> Result<FamilyState> {
        let (family, generation) = {
            let inner = self.lock()?;
            let family = inner
                .state
                .family
                .clone()
                .ok_or(AppError::FamilyNotBootstrapped)?;
            (family, inner.generation)
        };

        let loads = self.load_slices(&family).await;
        self.apply_loads(&family, generation, loads)
    }

    async fn load_slices(&self, family: &Family) -> SliceLoads {
        let today = Local::now().date_naive();
        let week_end = today + Duration::days(config::MEAL_PLAN_WINDOW_DAYS);

        SliceLoads {
            members: self.repo.list_members(&family.id).await,
            shopping_items: self.repo.list_shopping_items(&family.id).await,
            house_tasks: self.repo.list_tasks(&family.id).await,
            family_events: self.repo.list_upcoming_events(&family.id, today).await,
            meals: self
                .repo
                .list_meals_between(&family.id, today, week_end)
                .await,
            child_routines: self.repo.list_routines_for(&family.id, today).await,
            house_expenses: self.repo.list_unpaid_expenses(&family.id).await,
        }
    }

    /// Fold loaded slices into the cache, unless the active family
    /// changed while the reads were in flight.
    fn apply_loads(
        &self,
        family: &Family,
        generation: u64,
        loads: SliceLoads,
    ) -> Result<FamilyState> {
        let mut inner = self.lock()?;
        if inner.generation != generation {
            tracing::debug!(
                "Discarding stale load for family {} (generation moved on)",
                family.id
            );
            return Ok(inner.state.clone());
        }

        apply_slice(&mut inner.state.members, loads.members, "family members");
        apply_slice(
            &mut inner.state.shopping_items,
            loads.shopping_items,
            "shopping items",
        );
        apply_slice(&mut inner.state.house_tasks, loads.house_tasks, "house tasks");
        apply_slice(
            &mut inner.state.family_events,
            loads.family_events,
            "family events",
        );
        apply_slice(&mut inner.state.meals, loads.meals, "meals");
        apply_slice(
            &mut inner.state.child_routines,
            loads.child_routines,
            "child routines",
        );
        apply_slice(
            &mut inner.state.house_expenses,
            loads.house_expenses,
            "house expenses",
        );

        Ok(inner.state.clone())
    }

    // ===== Entity Mutators =====

    /// Add a family member
    pub async fn add_member(&self, req: NewMember) -> Result<FamilyMember> {
        let family = self.active_family()?;
        let name = validated_text(&req.name, "Member name")?;

        let member = self
            .repo
            .create_member(&family.id, &name, req.role, None)
            .await?;

        self.patch(&family.id, |state| state.members.push(member.clone()))?;
        Ok(member)
    }

    /// Add a shopping item, attributed to the signed-in member
    pub async fn add_shopping_item(&self, req: NewShoppingItem) -> Result<ShoppingItem> {
        let (family, current) = self.active_context()?;
        let name = validated_text(&req.name, "Item name")?;
        let quantity = req
            .quantity
            .filter(|q| *q > 0)
            .unwrap_or(config::DEFAULT_SHOPPING_QUANTITY);
        let unit = optional_text(req.unit);

        let item = self
            .repo
            .create_shopping_item(&family.id, &current.id, &name, quantity, unit.as_deref())
            .await?;

        self.patch(&family.id, |state| {
            state.shopping_items.insert(0, item.clone())
        })?;
        Ok(item)
    }

    /// Flip a shopping item's completed flag
    pub async fn toggle_shopping_item(&self, id: &str, completed: bool) -> Result<ShoppingItem> {
        let family = self.active_family()?;
        let item = self.repo.set_shopping_completed(id, completed).await?;

        self.patch(&family.id, |state| {
            merge_by_id(&mut state.shopping_items, &item, |i| &i.id)
        })?;
        Ok(item)
    }

    /// Add a house task
    pub async fn add_task(&self, req: NewTask) -> Result<HouseTask> {
        let family = self.active_family()?;
        let title = validated_text(&req.title, "Task title")?;
        let description = optional_text(req.description);
        let assigned_to = optional_text(req.assigned_to);

        let task = self
            .repo
            .create_task(
                &family.id,
                &title,
                description.as_deref(),
                assigned_to.as_deref(),
            )
            .await?;

        self.patch(&family.id, |state| state.house_tasks.insert(0, task.clone()))?;
        Ok(task)
    }

    /// Flip a task's completed flag; the star and timestamp follow
    pub async fn toggle_task(&self, id: &str, completed: bool) -> Result<HouseTask> {
        let family = self.active_family()?;
        let task = self.repo.set_task_completed(id, completed).await?;

        self.patch(&family.id, |state| {
            merge_by_id(&mut state.house_tasks, &task, |t| &t.id)
        })?;
        Ok(task)
    }

    /// Add an agenda event, attributed to the signed-in member.
    /// The cached list stays sorted ascending by date.
    pub async fn add_event(&self, req: NewEvent) -> Result<FamilyEvent> {
        let (family, current) = self.active_context()?;
        validated_text(&req.title, "Event title")?;

        let event = self.repo.create_event(&family.id, &current.id, &req).await?;

        self.patch(&family.id, |state| {
            state.family_events.push(event.clone());
            state.family_events.sort_by_key(|e| e.date);
        })?;
        Ok(event)
    }

    /// Plan a meal. The cached list stays sorted ascending by date.
    pub async fn add_meal(&self, req: NewMeal) -> Result<Meal> {
        let family = self.active_family()?;
        validated_text(&req.name, "Meal name")?;

        let meal = self.repo.create_meal(&family.id, &req).await?;

        self.patch(&family.id, |state| {
            state.meals.push(meal.clone());
            state.meals.sort_by_key(|m| m.date);
        })?;
        Ok(meal)
    }

    /// Add a child routine entry. The cache only holds today's routine,
    /// so entries for other days are written but not cached.
    pub async fn add_routine(&self, req: NewRoutine) -> Result<ChildRoutine> {
        let family = self.active_family()?;
        validated_text(&req.child_name, "Child name")?;
        validated_text(&req.task, "Routine task")?;

        let routine = self.repo.create_routine(&family.id, &req).await?;

        if routine.date == Local::now().date_naive() {
            self.patch(&family.id, |state| {
                state.child_routines.push(routine.clone());
                state.child_routines.sort_by_key(|r| r.time);
            })?;
        }
        Ok(routine)
    }

    /// Flip a routine entry's completed flag
    pub async fn toggle_routine(&self, id: &str, completed: bool) -> Result<ChildRoutine> {
        let family = self.active_family()?;
        let routine = self.repo.set_routine_completed(id, completed).await?;

        self.patch(&family.id, |state| {
            merge_by_id(&mut state.child_routines, &routine, |r| &r.id)
        })?;
        Ok(routine)
    }

    /// Add an expense. The cached list stays sorted ascending by due date.
    pub async fn add_expense(&self, req: NewExpense) -> Result<HouseExpense> {
        let family = self.active_family()?;
        validated_text(&req.title, "Expense title")?;
        if !req.amount.is_finite() || req.amount <= 0.0 {
            return Err(AppError::Validation(
                "Expense amount must be a positive number".to_string(),
            ));
        }

        let expense = self.repo.create_expense(&family.id, &req).await?;

        self.patch(&family.id, |state| {
            state.house_expenses.push(expense.clone());
            state.house_expenses.sort_by_key(|e| e.due_date);
        })?;
        Ok(expense)
    }

    /// Flip an expense's paid flag; the timestamp follows. The entry
    /// stays in the cached list until the next refresh.
    pub async fn toggle_expense(&self, id: &str, paid: bool) -> Result<HouseExpense> {
        let family = self.active_family()?;
        let expense = self.repo.set_expense_paid(id, paid).await?;

        self.patch(&family.id, |state| {
            merge_by_id(&mut state.house_expenses, &expense, |e| &e.id)
        })?;
        Ok(expense)
    }

    // ===== Internals =====

    fn lock(&self) -> Result<MutexGuard<'_, StoreInner>> {
        self.inner
            .lock()
            .map_err(|e| AppError::Generic(format!("State lock poisoned: {}", e)))
    }

    fn active_family(&self) -> Result<Family> {
        self.lock()?
            .state
            .family
            .clone()
            .ok_or(AppError::FamilyNotBootstrapped)
    }

    fn active_context(&self) -> Result<(Family, FamilyMember)> {
        let inner = self.lock()?;
        let family = inner
            .state
            .family
            .clone()
            .ok_or(AppError::FamilyNotBootstrapped)?;
        let member = inner
            .state
            .current_member
            .clone()
            .ok_or(AppError::FamilyNotBootstrapped)?;
        Ok((family, member))
    }

    /// Apply a state patch, but only while the same family is still
    /// active; a write that resolves after a switch is dropped.
    fn patch(&self, family_id: &str, apply: impl FnOnce(&mut FamilyState)) -> Result<()> {
        let mut inner = self.lock()?;
        let still_active = inner.state.family.as_ref().map(|f| f.id.as_str()) == Some(family_id);
        if still_active {
            apply(&mut inner.state);
        } else {
            tracing::debug!("Dropping state patch for inactive family {}", family_id);
        }
        Ok(())
    }
}

fn apply_slice<T>(slot: &mut Vec<T>, read: Result<Vec<T>>, what: &str) {
    match read {
        Ok(rows) => *slot = rows,
        Err(e) => tracing::error!("Failed to load {}: {}", what, e),
    }
}

/// Replace the list entry with the same id, if present
fn merge_by_id<T: Clone>(list: &mut [T], updated: &T, id_of: impl Fn(&T) -> &str) {
    if let Some(slot) = list.iter_mut().find(|e| id_of(e) == id_of(updated)) {
        *slot = updated.clone();
    }
}

fn validated_text(value: &str, what: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{} must not be empty", what)));
    }
    if trimmed.len() > config::MAX_NAME_LENGTH {
        return Err(AppError::Validation(format!("{} is too long", what)));
    }
    Ok(trimmed.to_string())
}

fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::initialize_database;
    use crate::services::bootstrap::FamilyService;
    use crate::services::session::Identity;
    use chrono::NaiveTime;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn create_test_service() -> (FamilyDataService, Repository) {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        initialize_database(&pool).await.unwrap();
        let repo = Repository::new(pool);

        (FamilyDataService::new(repo.clone()), repo)
    }

    async fn bootstrap(repo: &Repository, email: &str) -> (Family, FamilyMember) {
        let user = repo.create_user(email, "hash").await.unwrap();
        let identity = Identity {
            id: user.id,
            email: user.email,
        };
        FamilyService::new(repo.clone())
            .ensure_family(&identity)
            .await
            .unwrap()
    }

    fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    #[tokio::test]
    async fn test_mutators_require_an_active_family() {
        let (service, _repo) = create_test_service().await;

        let result = service
            .add_shopping_item(NewShoppingItem {
                name: "Leite".to_string(),
                quantity: None,
                unit: None,
            })
            .await;

        assert!(matches!(result, Err(AppError::FamilyNotBootstrapped)));
        assert!(matches!(
            service.refresh().await,
            Err(AppError::FamilyNotBootstrapped)
        ));
    }

    #[tokio::test]
    async fn test_blank_input_is_rejected_without_touching_state() {
        let (service, repo) = create_test_service().await;
        let (family, member) = bootstrap(&repo, "ana@example.com").await;
        service.activate(family, member).unwrap();

        let result = service
            .add_shopping_item(NewShoppingItem {
                name: "   ".to_string(),
                quantity: None,
                unit: None,
            })
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(service.snapshot().unwrap().shopping_items.is_empty());
    }

    #[tokio::test]
    async fn test_shopping_items_prepend_newest_first() {
        let (service, repo) = create_test_service().await;
        let (family, member) = bootstrap(&repo, "ana@example.com").await;
        service.activate(family, member.clone()).unwrap();

        for name in ["Pão", "Leite", "Arroz"] {
            service
                .add_shopping_item(NewShoppingItem {
                    name: name.to_string(),
                    quantity: None,
                    unit: None,
                })
                .await
                .unwrap();
        }

        let state = service.snapshot().unwrap();
        let names: Vec<&str> = state
            .shopping_items
            .iter()
            .map(|i| i.name.as_str())
            .collect();
        assert_eq!(names, vec!["Arroz", "Leite", "Pão"]);
        assert!(state
            .shopping_items
            .iter()
            .all(|i| i.added_by == member.id && !i.completed));
    }

    #[tokio::test]
    async fn test_toggle_merges_into_cached_list() {
        let (service, repo) = create_test_service().await;
        let (family, member) = bootstrap(&repo, "ana@example.com").await;
        service.activate(family, member).unwrap();

        let item = service
            .add_shopping_item(NewShoppingItem {
                name: "Leite".to_string(),
                quantity: Some(2),
                unit: Some("L".to_string()),
            })
            .await
            .unwrap();

        service.toggle_shopping_item(&item.id, true).await.unwrap();

        let state = service.snapshot().unwrap();
        assert_eq!(state.shopping_items.len(), 1);
        assert!(state.shopping_items[0].completed);
        assert_eq!(state.shopping_items[0].quantity, 2);
    }

    #[tokio::test]
    async fn test_task_toggle_keeps_derived_state_in_sync() {
        let (service, repo) = create_test_service().await;
        let (family, member) = bootstrap(&repo, "ana@example.com").await;
        service.activate(family, member).unwrap();

        let task = service
            .add_task(NewTask {
                title: "Varrer sala".to_string(),
                description: None,
                assigned_to: None,
            })
            .await
            .unwrap();

        service.toggle_task(&task.id, true).await.unwrap();

        let state = service.snapshot().unwrap();
        let cached = &state.house_tasks[0];
        assert!(cached.completed);
        assert_eq!(cached.stars_earned, 1);
        assert!(cached.completed_at.is_some());

        service.toggle_task(&task.id, false).await.unwrap();
        let cached = service.snapshot().unwrap().house_tasks[0].clone();
        assert!(!cached.completed);
        assert_eq!(cached.stars_earned, 0);
        assert!(cached.completed_at.is_none());
    }

    #[tokio::test]
    async fn test_events_stay_sorted_by_date_after_insertion() {
        let (service, repo) = create_test_service().await;
        let (family, member) = bootstrap(&repo, "ana@example.com").await;
        service.activate(family, member).unwrap();

        for days in [4i64, 1, 2] {
            service
                .add_event(NewEvent {
                    title: format!("evento {}", days),
                    description: None,
                    date: today() + Duration::days(days),
                    time: None,
                    event_type: EventType::Compromisso,
                })
                .await
                .unwrap();
        }

        let dates: Vec<NaiveDate> = service
            .snapshot()
            .unwrap()
            .family_events
            .iter()
            .map(|e| e.date)
            .collect();
        assert_eq!(
            dates,
            vec![
                today() + Duration::days(1),
                today() + Duration::days(2),
                today() + Duration::days(4),
            ]
        );
    }

    #[tokio::test]
    async fn test_expenses_stay_sorted_by_due_date_after_insertion() {
        let (service, repo) = create_test_service().await;
        let (family, member) = bootstrap(&repo, "ana@example.com").await;
        service.activate(family, member).unwrap();

        for (title, days) in [("Internet", 9i64), ("Luz", 3), ("Água", 6)] {
            service
                .add_expense(NewExpense {
                    title: title.to_string(),
                    amount: 100.0,
                    due_date: today() + Duration::days(days),
                    category: ExpenseCategory::Conta,
                })
                .await
                .unwrap();
        }

        let titles: Vec<String> = service
            .snapshot()
            .unwrap()
            .house_expenses
            .iter()
            .map(|e| e.title.clone())
            .collect();
        assert_eq!(titles, vec!["Luz", "Água", "Internet"]);
    }

    #[tokio::test]
    async fn test_invalid_amount_is_rejected() {
        let (service, repo) = create_test_service().await;
        let (family, member) = bootstrap(&repo, "ana@example.com").await;
        service.activate(family, member).unwrap();

        for amount in [0.0, -5.0, f64::NAN] {
            let result = service
                .add_expense(NewExpense {
                    title: "Luz".to_string(),
                    amount,
                    due_date: today(),
                    category: ExpenseCategory::Conta,
                })
                .await;
            assert!(matches!(result, Err(AppError::Validation(_))));
        }
    }

    #[tokio::test]
    async fn test_routines_only_cache_todays_entries() {
        let (service, repo) = create_test_service().await;
        let (family, member) = bootstrap(&repo, "ana@example.com").await;
        service.activate(family, member).unwrap();

        service
            .add_routine(NewRoutine {
                child_name: "Luiza".to_string(),
                task: "Banho".to_string(),
                time: NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
                date: today(),
            })
            .await
            .unwrap();
        service
            .add_routine(NewRoutine {
                child_name: "Luiza".to_string(),
                task: "Dever".to_string(),
                time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
                date: today() + Duration::days(1),
            })
            .await
            .unwrap();

        let state = service.snapshot().unwrap();
        assert_eq!(state.child_routines.len(), 1);
        assert_eq!(state.child_routines[0].task, "Banho");
    }

    #[tokio::test]
    async fn test_refresh_rebuilds_lists_from_database() {
        let (service, repo) = create_test_service().await;
        let (family, member) = bootstrap(&repo, "ana@example.com").await;
        service.activate(family.clone(), member.clone()).unwrap();

        // Rows written behind the cache's back appear after a refresh
        repo.create_shopping_item(&family.id, &member.id, "Café", 1, None)
            .await
            .unwrap();
        assert!(service.snapshot().unwrap().shopping_items.is_empty());

        let state = service.refresh().await.unwrap();
        assert_eq!(state.shopping_items.len(), 1);
        assert_eq!(state.members.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_slice_keeps_previous_value_while_others_refresh() {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        initialize_database(&pool).await.unwrap();
        let repo = Repository::new(pool.clone());
        let service = FamilyDataService::new(repo.clone());

        let (family, member) = bootstrap(&repo, "ana@example.com").await;
        service.activate(family.clone(), member.clone()).unwrap();

        service
            .add_meal(NewMeal {
                name: "Feijoada".to_string(),
                meal_type: MealType::Almoco,
                date: today(),
                recipe: None,
            })
            .await
            .unwrap();
        service.refresh().await.unwrap();

        // Break only the meals read
        sqlx::query("DROP TABLE meals").execute(&pool).await.unwrap();

        repo.create_shopping_item(&family.id, &member.id, "Café", 1, None)
            .await
            .unwrap();

        let state = service.refresh().await.unwrap();
        assert_eq!(state.shopping_items.len(), 1);
        assert_eq!(state.meals.len(), 1);
        assert_eq!(state.meals[0].name, "Feijoada");
    }

    #[tokio::test]
    async fn test_stale_load_is_discarded_after_family_switch() {
        let (service, repo) = create_test_service().await;
        let (family_a, member_a) = bootstrap(&repo, "ana@example.com").await;
        let (family_b, member_b) = bootstrap(&repo, "bia@example.com").await;

        service.activate(family_a.clone(), member_a.clone()).unwrap();
        let generation = service.lock().unwrap().generation;

        repo.create_shopping_item(&family_a.id, &member_a.id, "Leite", 1, None)
            .await
            .unwrap();
        let loads = service.load_slices(&family_a).await;

        // Family B becomes active before the load lands; applying the
        // old load must not clobber B's state
        service.activate(family_b, member_b).unwrap();
        let state = service.apply_loads(&family_a, generation, loads).unwrap();

        assert!(state.shopping_items.is_empty());
        assert!(service.snapshot().unwrap().shopping_items.is_empty());
    }

    #[tokio::test]
    async fn test_patches_for_a_switched_family_are_dropped() {
        let (service, repo) = create_test_service().await;
        let (family_a, member_a) = bootstrap(&repo, "ana@example.com").await;
        let (family_b, member_b) = bootstrap(&repo, "bia@example.com").await;

        service.activate(family_a.clone(), member_a.clone()).unwrap();
        let item = service
            .add_shopping_item(NewShoppingItem {
                name: "Leite".to_string(),
                quantity: None,
                unit: None,
            })
            .await
            .unwrap();

        // Family B becomes active; a late toggle for A's item must not
        // leak into B's cache
        service.activate(family_b, member_b).unwrap();
        service.toggle_shopping_item(&item.id, true).await.ok();

        assert!(service.snapshot().unwrap().shopping_items.is_empty());

        // A's row was still written
        let items = repo.list_shopping_items(&family_a.id).await.unwrap();
        assert!(items[0].completed);
    }

    #[tokio::test]
    async fn test_deactivate_clears_state() {
        let (service, repo) = create_test_service().await;
        let (family, member) = bootstrap(&repo, "ana@example.com").await;
        service.activate(family, member).unwrap();

        service
            .add_task(NewTask {
                title: "Varrer".to_string(),
                description: None,
                assigned_to: None,
            })
            .await
            .unwrap();

        service.deactivate().unwrap();

        let state = service.snapshot().unwrap();
        assert!(state.family.is_none());
        assert!(state.house_tasks.is_empty());
    }
}
