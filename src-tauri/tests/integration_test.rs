//! Integration tests for FamilyHub
//!
//! These tests verify end-to-end functionality including:
//! - Account sign-up and family bootstrap
//! - Entity mutators and the in-memory state cache
//! - Tab derivations over the cached state

use chrono::{Duration, Local};
use familyhub::database::{create_pool, EventType, ExpenseCategory, MemberRole, Repository};
use familyhub::database::{NewEvent, NewExpense, NewShoppingItem, NewTask};
use familyhub::presentation::{
    dashboard_summary, overdue_expenses, partition_events, partition_shopping, partition_tasks,
};
use familyhub::services::{FamilyDataService, FamilyService, SessionService};
use tempfile::TempDir;

struct TestApp {
    session: SessionService,
    family: FamilyService,
    family_data: FamilyDataService,
    repo: Repository,
    _temp: TempDir,
}

/// Helper building the full service stack over a fresh on-disk database
async fn create_test_app() -> TestApp {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");

    let pool = create_pool(&db_path).await.unwrap();
    let repo = Repository::new(pool);

    TestApp {
        session: SessionService::new(repo.clone()),
        family: FamilyService::new(repo.clone()),
        family_data: FamilyDataService::new(repo.clone()),
        repo,
        _temp: temp_dir,
    }
}

/// Sign a user in and activate their family, as the bootstrap command does
async fn sign_in_and_bootstrap(app: &TestApp, email: &str, password: &str) {
    let identity = match app.session.sign_in(email, password).await {
        Ok(identity) => identity,
        Err(_) => app.session.sign_up(email, password).await.unwrap(),
    };

    let (family, member) = app.family.ensure_family(&identity).await.unwrap();
    app.family_data.activate(family, member).unwrap();
    app.family_data.refresh().await.unwrap();
}

#[tokio::test]
async fn test_first_sign_in_bootstraps_exactly_one_family() {
    let app = create_test_app().await;

    let identity = app
        .session
        .sign_up("maria@example.com", "segredo123")
        .await
        .unwrap();

    let (family, member) = app.family.ensure_family(&identity).await.unwrap();
    assert_eq!(family.name, "Família maria");
    assert_eq!(member.role, MemberRole::Mae);
    assert_eq!(member.user_id.as_deref(), Some(identity.id.as_str()));

    // A second sign-in resolves to the same family and creates nothing
    app.session.sign_out().await.unwrap();
    let again = app
        .session
        .sign_in("maria@example.com", "segredo123")
        .await
        .unwrap();
    let (second_family, second_member) = app.family.ensure_family(&again).await.unwrap();

    assert_eq!(second_family.id, family.id);
    assert_eq!(second_member.id, member.id);
    assert_eq!(app.repo.list_members(&family.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_shopping_item_appears_pending_and_attributed() {
    let app = create_test_app().await;
    sign_in_and_bootstrap(&app, "maria@example.com", "segredo123").await;

    let item = app
        .family_data
        .add_shopping_item(NewShoppingItem {
            name: "Milk".to_string(),
            quantity: Some(2),
            unit: Some("L".to_string()),
        })
        .await
        .unwrap();

    assert!(!item.completed);
    assert_eq!(item.member.as_ref().unwrap().name, "maria");

    let state = app.family_data.snapshot().unwrap();
    let board = partition_shopping(&state.shopping_items);
    assert_eq!(board.pending.len(), 1);
    assert_eq!(board.pending[0].name, "Milk");
    assert_eq!(board.pending[0].quantity, 2);
    assert_eq!(board.pending[0].unit.as_deref(), Some("L"));
    assert!(board.completed.is_empty());
}

#[tokio::test]
async fn test_completed_task_moves_partition_and_earns_a_star() {
    let app = create_test_app().await;
    sign_in_and_bootstrap(&app, "maria@example.com", "segredo123").await;

    let task = app
        .family_data
        .add_task(NewTask {
            title: "Limpar banheiro".to_string(),
            description: None,
            assigned_to: None,
        })
        .await
        .unwrap();

    let board = partition_tasks(&app.family_data.snapshot().unwrap().house_tasks);
    assert_eq!(board.pending.len(), 1);
    assert!(board.completed.is_empty());

    let done = app.family_data.toggle_task(&task.id, true).await.unwrap();
    assert_eq!(done.stars_earned, 1);
    assert!(done.completed_at.is_some());

    let board = partition_tasks(&app.family_data.snapshot().unwrap().house_tasks);
    assert!(board.pending.is_empty());
    assert_eq!(board.completed.len(), 1);
}

#[tokio::test]
async fn test_overdue_expense_lifecycle() {
    let app = create_test_app().await;
    sign_in_and_bootstrap(&app, "maria@example.com", "segredo123").await;
    let today = Local::now().date_naive();

    let expense = app
        .family_data
        .add_expense(NewExpense {
            title: "Electricity".to_string(),
            amount: 150.0,
            due_date: today - Duration::days(1),
            category: ExpenseCategory::Conta,
        })
        .await
        .unwrap();

    let state = app.family_data.snapshot().unwrap();
    let overdue = overdue_expenses(&state.house_expenses, today);
    assert_eq!(overdue.len(), 1);
    assert_eq!(overdue[0].title, "Electricity");

    let paid = app
        .family_data
        .toggle_expense(&expense.id, true)
        .await
        .unwrap();
    assert!(paid.paid_at.is_some());

    let state = app.family_data.snapshot().unwrap();
    assert!(overdue_expenses(&state.house_expenses, today).is_empty());
}

#[tokio::test]
async fn test_agenda_partitions_and_stays_sorted() {
    let app = create_test_app().await;
    sign_in_and_bootstrap(&app, "maria@example.com", "segredo123").await;
    let today = Local::now().date_naive();

    for days in [3i64, 0, 1, 5, 2] {
        app.family_data
            .add_event(NewEvent {
                title: format!("evento {}", days),
                description: None,
                date: today + Duration::days(days),
                time: None,
                event_type: EventType::Compromisso,
            })
            .await
            .unwrap();
    }

    let state = app.family_data.snapshot().unwrap();
    let dates: Vec<_> = state.family_events.iter().map(|e| e.date).collect();
    let mut sorted = dates.clone();
    sorted.sort();
    assert_eq!(dates, sorted);

    let agenda = partition_events(&state.family_events, today);
    assert_eq!(agenda.today.len(), 1);
    assert_eq!(agenda.tomorrow.len(), 1);
    assert_eq!(agenda.upcoming.len(), 3);
    assert_eq!(agenda.upcoming[0].title, "evento 2");
}

#[tokio::test]
async fn test_dashboard_summary_over_live_state() {
    let app = create_test_app().await;
    sign_in_and_bootstrap(&app, "maria@example.com", "segredo123").await;
    let today = Local::now().date_naive();

    app.family_data
        .add_shopping_item(NewShoppingItem {
            name: "Pão".to_string(),
            quantity: None,
            unit: None,
        })
        .await
        .unwrap();
    app.family_data
        .add_expense(NewExpense {
            title: "Água".to_string(),
            amount: 80.0,
            due_date: today - Duration::days(3),
            category: ExpenseCategory::Conta,
        })
        .await
        .unwrap();
    app.family_data
        .add_event(NewEvent {
            title: "Consulta".to_string(),
            description: None,
            date: today,
            time: None,
            event_type: EventType::Medico,
        })
        .await
        .unwrap();

    let summary = dashboard_summary(&app.family_data.snapshot().unwrap(), today);
    assert_eq!(summary.pending_shopping, 1);
    assert_eq!(summary.overdue_bills, 1);
    assert_eq!(summary.today_events, 1);
    assert_eq!(summary.pending_tasks, 0);
}

#[tokio::test]
async fn test_refresh_after_restart_sees_persisted_data() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");

    {
        let pool = create_pool(&db_path).await.unwrap();
        let repo = Repository::new(pool);
        let app = TestApp {
            session: SessionService::new(repo.clone()),
            family: FamilyService::new(repo.clone()),
            family_data: FamilyDataService::new(repo.clone()),
            repo,
            _temp: TempDir::new().unwrap(),
        };
        sign_in_and_bootstrap(&app, "maria@example.com", "segredo123").await;
        app.family_data
            .add_shopping_item(NewShoppingItem {
                name: "Leite".to_string(),
                quantity: None,
                unit: None,
            })
            .await
            .unwrap();
    }

    // A fresh stack over the same database restores session and data
    let pool = create_pool(&db_path).await.unwrap();
    let repo = Repository::new(pool);
    let session = SessionService::new(repo.clone());
    let restored = session.restore().await.unwrap().unwrap();
    assert_eq!(restored.email, "maria@example.com");

    let family = FamilyService::new(repo.clone());
    let family_data = FamilyDataService::new(repo);
    let (fam, member) = family.ensure_family(&restored).await.unwrap();
    family_data.activate(fam, member).unwrap();

    let state = family_data.refresh().await.unwrap();
    assert_eq!(state.shopping_items.len(), 1);
    assert_eq!(state.shopping_items[0].name, "Leite");
}
