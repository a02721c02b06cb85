use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use taskview::service::{NewTask, ServiceError, Task, TaskService};
use taskview::ui::components::dialogs::{NewTaskDialog, TaskDialog};
use taskview::ui::core::{Action, EventType};
use taskview::ui::AppComponent;

/// Service double with call-order instrumentation. `statuses`/`tasks` set to
/// `None` make the corresponding load fail.
#[derive(Default)]
struct MockService {
    calls: Mutex<Vec<String>>,
    statuses: Mutex<Option<Vec<String>>>,
    tasks: Mutex<Option<Vec<Task>>>,
    fail_create: Mutex<bool>,
    fail_update: Mutex<bool>,
    fail_delete: Mutex<bool>,
    next_id: Mutex<i64>,
}

impl MockService {
    fn new(statuses: &[&str], tasks: Vec<Task>) -> Arc<Self> {
        let service = Self::default();
        *service.statuses.lock().unwrap() = Some(statuses.iter().map(|s| s.to_string()).collect());
        *service.tasks.lock().unwrap() = Some(tasks);
        *service.next_id.lock().unwrap() = 100;
        Arc::new(service)
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TaskService for MockService {
    async fn fetch_statuses(&self) -> Result<Vec<String>, ServiceError> {
        self.record("fetch_statuses");
        self.statuses
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| ServiceError::Protocol("Failed to load statuses.".to_string()))
    }

    async fn fetch_tasks(&self) -> Result<Vec<Task>, ServiceError> {
        self.record("fetch_tasks");
        self.tasks
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| ServiceError::Protocol("Failed to load task list.".to_string()))
    }

    async fn create_task(&self, draft: &NewTask) -> Result<Task, ServiceError> {
        self.record(format!("create {}", draft.title));
        if *self.fail_create.lock().unwrap() {
            return Err(ServiceError::Protocol("Failed to add task.".to_string()));
        }
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        Ok(Task {
            id: *next_id,
            title: draft.title.clone(),
            status: draft.status.clone(),
        })
    }

    async fn update_status(&self, id: i64, status: &str) -> Result<(), ServiceError> {
        self.record(format!("update {id} {status}"));
        if *self.fail_update.lock().unwrap() {
            return Err(ServiceError::Protocol("Failed to update task status.".to_string()));
        }
        Ok(())
    }

    async fn delete_task(&self, id: i64) -> Result<(), ServiceError> {
        self.record(format!("delete {id}"));
        if *self.fail_delete.lock().unwrap() {
            return Err(ServiceError::Protocol("Failed to delete task.".to_string()));
        }
        Ok(())
    }
}

fn task(id: i64, title: &str, status: &str) -> Task {
    Task {
        id,
        title: title.to_string(),
        status: status.to_string(),
    }
}

fn app_for(service: Arc<MockService>) -> AppComponent {
    AppComponent::new(service, Box::new(NewTaskDialog::new()))
}

#[tokio::test]
async fn waiting_banner_is_up_before_initialization_runs() {
    let service = MockService::new(&["OPEN"], vec![]);
    let app = app_for(service);

    // The first frame is drawn before init(); it must already show the
    // waiting text, with the create control disabled.
    assert_eq!(app.message(), Some("Waiting for server data."));
    assert!(!app.is_create_enabled());
}

#[tokio::test]
async fn clear_key_empties_the_logs_overlay() {
    let service = MockService::new(&["OPEN"], vec![]);
    let mut app = app_for(service);

    app.init().await;
    assert!(!app.logger().get_logs().is_empty());

    app.handle_action(Action::ShowLogs(true)).await;
    app.handle_event(EventType::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE)))
        .await
        .unwrap();

    assert!(app.logger().get_logs().is_empty());
}

#[tokio::test]
async fn init_loads_statuses_before_tasks_and_enables_create_last() {
    let service = MockService::new(&["OPEN", "DONE"], vec![task(1, "A", "OPEN")]);
    let mut app = app_for(service.clone());

    assert!(!app.is_create_enabled());
    app.init().await;

    assert_eq!(service.calls(), ["fetch_statuses", "fetch_tasks"]);
    assert!(app.is_create_enabled());
    assert!(app.is_initialized());
    assert_eq!(app.statuses(), ["OPEN", "DONE"]);
    assert_eq!(app.task_list().num_tasks(), 1);
    // One row rendered, banner hidden
    assert_eq!(app.message(), None);
}

#[tokio::test]
async fn empty_task_list_shows_the_empty_state_banner() {
    let service = MockService::new(&["OPEN", "DONE"], vec![]);
    let mut app = app_for(service);

    app.init().await;

    assert_eq!(app.message(), Some("No tasks in list."));
    assert!(app.is_create_enabled());
}

#[tokio::test]
async fn tasks_are_rendered_in_array_order_most_recent_first() {
    let service = MockService::new(&["OPEN"], vec![task(1, "A", "OPEN"), task(2, "B", "OPEN")]);
    let mut app = app_for(service);

    app.init().await;

    // Each task is inserted at the top, so the last array element is first
    let ids: Vec<i64> = app.task_list().rows().iter().map(|r| r.id).collect();
    assert_eq!(ids, [2, 1]);
}

#[tokio::test]
async fn status_load_failure_is_fatal_and_leaves_callbacks_unwired() {
    let service = MockService::new(&[], vec![]);
    *service.statuses.lock().unwrap() = None;
    let mut app = app_for(service.clone());

    app.init().await;

    assert_eq!(app.message(), Some("Error: Failed to load statuses."));
    assert!(app.is_create_enabled());
    assert!(!app.is_initialized());
    // The task list was never fetched
    assert_eq!(service.calls(), ["fetch_statuses"]);

    // No callback was wired: a confirmed interaction reaches no one
    app.task_list_mut().show_task(task(1, "A", "OPEN"));
    app.preset_confirm(true);
    assert!(!app.task_list_mut().select_status(1, "OPEN"));
    app.process_pending_actions().await;
    assert_eq!(service.calls(), ["fetch_statuses"]);
}

#[tokio::test]
async fn task_list_failure_degrades_to_an_empty_list() {
    let service = MockService::new(&["OPEN"], vec![]);
    *service.tasks.lock().unwrap() = None;
    let mut app = app_for(service);

    app.init().await;

    // Not fatal: an empty task list is a valid state
    assert_eq!(app.message(), Some("No tasks in list."));
    assert!(app.is_initialized());
    assert!(app.is_create_enabled());
    assert_eq!(app.task_list().num_tasks(), 0);
}

#[tokio::test]
async fn retry_reruns_initialization_only_until_it_succeeds() {
    let service = MockService::new(&[], vec![]);
    *service.statuses.lock().unwrap() = None;
    let mut app = app_for(service.clone());

    app.init().await;
    assert!(!app.is_initialized());

    *service.statuses.lock().unwrap() = Some(vec!["OPEN".to_string()]);
    app.handle_action(Action::RetryInit).await;
    assert!(app.is_initialized());
    assert_eq!(service.calls(), ["fetch_statuses", "fetch_statuses", "fetch_tasks"]);

    // Once initialized, retry is a no-op
    app.handle_action(Action::RetryInit).await;
    assert_eq!(service.calls().len(), 3);
}

#[tokio::test]
async fn successful_create_inserts_row_first_and_closes_the_dialog() {
    let service = MockService::new(&["OPEN", "DONE"], vec![task(1, "A", "OPEN")]);
    let mut app = app_for(service);

    app.init().await;
    app.handle_action(Action::OpenNewTaskDialog).await;
    assert!(app.dialog().is_visible());

    app.handle_action(Action::CreateTask(NewTask {
        title: "B".to_string(),
        status: "OPEN".to_string(),
    }))
    .await;

    assert_eq!(app.task_list().num_tasks(), 2);
    assert_eq!(app.task_list().rows()[0].id, 101);
    assert_eq!(app.task_list().rows()[0].title, "B");
    assert!(!app.dialog().is_visible());
    assert_eq!(app.message(), None);
}

#[tokio::test]
async fn failed_create_surfaces_an_error_and_keeps_the_dialog_open() {
    let service = MockService::new(&["OPEN"], vec![]);
    *service.fail_create.lock().unwrap() = true;
    let mut app = app_for(service);

    app.init().await;
    app.handle_action(Action::OpenNewTaskDialog).await;
    app.handle_action(Action::CreateTask(NewTask {
        title: "B".to_string(),
        status: "OPEN".to_string(),
    }))
    .await;

    assert_eq!(app.message(), Some("Error: Failed to add task."));
    assert!(app.dialog().is_visible());
    assert_eq!(app.task_list().num_tasks(), 0);
    assert!(app.is_create_enabled());
}

#[tokio::test]
async fn confirmed_status_change_reaches_the_service_and_updates_the_row() {
    let service = MockService::new(&["OPEN", "DONE"], vec![task(1, "A", "OPEN")]);
    let mut app = app_for(service.clone());

    app.init().await;
    app.preset_confirm(true);
    assert!(app.task_list_mut().select_status(1, "DONE"));
    app.process_pending_actions().await;

    assert!(service.calls().contains(&"update 1 DONE".to_string()));
    assert_eq!(app.task_list().row(1).unwrap().status, "DONE");
    assert_eq!(app.message(), None);
}

#[tokio::test]
async fn failed_status_change_leaves_the_row_untouched() {
    let service = MockService::new(&["OPEN", "DONE"], vec![task(1, "A", "OPEN")]);
    *service.fail_update.lock().unwrap() = true;
    let mut app = app_for(service);

    app.init().await;
    app.preset_confirm(true);
    app.task_list_mut().select_status(1, "DONE");
    app.process_pending_actions().await;

    assert_eq!(app.task_list().row(1).unwrap().status, "OPEN");
    assert_eq!(app.message(), Some("Error: Failed to update task status."));
}

#[tokio::test]
async fn confirmed_delete_removes_the_row_and_recomputes_empty_state() {
    let service = MockService::new(&["OPEN"], vec![task(1, "A", "OPEN")]);
    let mut app = app_for(service.clone());

    app.init().await;
    app.preset_confirm(true);
    assert!(app.task_list_mut().request_delete(1));
    app.process_pending_actions().await;

    assert!(service.calls().contains(&"delete 1".to_string()));
    assert_eq!(app.task_list().num_tasks(), 0);
    assert_eq!(app.message(), Some("No tasks in list."));
}

#[tokio::test]
async fn canceled_delete_makes_no_network_call() {
    let service = MockService::new(&["OPEN"], vec![task(1, "A", "OPEN")]);
    let mut app = app_for(service.clone());

    app.init().await;
    app.preset_confirm(false);
    assert!(!app.task_list_mut().request_delete(1));
    app.process_pending_actions().await;

    assert!(!service.calls().iter().any(|c| c.starts_with("delete")));
    assert_eq!(app.task_list().num_tasks(), 1);
}

#[tokio::test]
async fn failed_delete_keeps_the_row_and_surfaces_an_error() {
    let service = MockService::new(&["OPEN"], vec![task(1, "A", "OPEN")]);
    *service.fail_delete.lock().unwrap() = true;
    let mut app = app_for(service);

    app.init().await;
    app.preset_confirm(true);
    app.task_list_mut().request_delete(1);
    app.process_pending_actions().await;

    assert_eq!(app.task_list().num_tasks(), 1);
    assert_eq!(app.message(), Some("Error: Failed to delete task."));
}

#[tokio::test]
async fn create_control_gates_the_dialog() {
    let service = MockService::new(&["OPEN"], vec![]);
    let mut app = app_for(service);

    // Before initialization the create control is disabled
    app.handle_action(Action::OpenNewTaskDialog).await;
    assert!(!app.dialog().is_visible());

    app.init().await;
    app.handle_action(Action::OpenNewTaskDialog).await;
    assert!(app.dialog().is_visible());
}

#[tokio::test]
async fn error_banner_replaces_the_informational_message() {
    let service = MockService::new(&["OPEN"], vec![]);
    *service.fail_create.lock().unwrap() = true;
    let mut app = app_for(service);

    app.init().await;
    assert_eq!(app.message(), Some("No tasks in list."));

    app.handle_action(Action::CreateTask(NewTask {
        title: "B".to_string(),
        status: "OPEN".to_string(),
    }))
    .await;

    // One message area: the error replaced the empty-state text
    assert_eq!(app.message(), Some("Error: Failed to add task."));
}
