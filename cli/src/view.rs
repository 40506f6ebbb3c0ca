//! View-model for the task board UI.
//!
//! All UI state lives in [`TaskView`] and only changes through its methods.
//! Network calls go through a [`TaskApi`] handed in by the caller, so every
//! transition can be driven from tests without a terminal or a server.
//!
//! After any create or delete the whole list is fetched again, whatever the
//! outcome of the mutation was.

use std::time::{Duration, Instant};

use chrono::NaiveDate;
use taskboard_core::{parse_due_date, NewTask, Priority, Task, TASK_NAME_REQUIRED};
use uuid::Uuid;

use crate::api::{ClientError, TaskApi};

pub const NOTIFICATION_TTL: Duration = Duration::from_secs(3);

pub const MSG_FETCH_FAILED: &str = "Failed to fetch tasks";
pub const MSG_CREATE_FAILED: &str = "Failed to create task";
pub const MSG_DELETE_FAILED: &str = "Failed to delete task";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Tasks,
    About,
    Login,
    SignUp,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::Tasks, Page::About, Page::Login, Page::SignUp];

    pub fn title(self) -> &'static str {
        match self {
            Page::Tasks => "Tasks",
            Page::About => "About",
            Page::Login => "Login",
            Page::SignUp => "Sign Up",
        }
    }

    pub fn index(self) -> usize {
        Page::ALL.iter().position(|p| *p == self).unwrap_or(0)
    }

    pub fn next(self) -> Page {
        Page::ALL[(self.index() + 1) % Page::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewStatus {
    Idle,
    Loading,
    TasksLoaded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub level: NoticeLevel,
    pub message: String,
    pub created_at: Instant,
}

impl Notification {
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) >= NOTIFICATION_TTL
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Name,
    Priority,
    DueDate,
}

impl FormField {
    pub fn next(self) -> FormField {
        match self {
            FormField::Name => FormField::Priority,
            FormField::Priority => FormField::DueDate,
            FormField::DueDate => FormField::Name,
        }
    }

    pub fn previous(self) -> FormField {
        match self {
            FormField::Name => FormField::DueDate,
            FormField::Priority => FormField::Name,
            FormField::DueDate => FormField::Priority,
        }
    }
}

/// The "add task" inputs. Cursor positions are in chars.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskForm {
    pub name: String,
    pub priority: Priority,
    pub due: String,
    pub focus: FormField,
    pub cursor: usize,
}

impl TaskForm {
    pub fn reset(&mut self) {
        *self = TaskForm::default();
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
        self.cursor = self.focused_text().map(|t| t.chars().count()).unwrap_or(0);
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
        self.cursor = self.focused_text().map(|t| t.chars().count()).unwrap_or(0);
    }

    pub fn focused_text(&self) -> Option<&str> {
        match self.focus {
            FormField::Name => Some(&self.name),
            FormField::DueDate => Some(&self.due),
            FormField::Priority => None,
        }
    }

    fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::Name => Some(&mut self.name),
            FormField::DueDate => Some(&mut self.due),
            FormField::Priority => None,
        }
    }

    pub fn input_char(&mut self, c: char) {
        let cursor = self.cursor;
        if let Some(text) = self.focused_text_mut() {
            let byte_index = text.chars().take(cursor).map(char::len_utf8).sum();
            text.insert(byte_index, c);
            self.cursor += 1;
        }
    }

    pub fn delete_char(&mut self) {
        let cursor = self.cursor;
        if cursor == 0 {
            return;
        }
        if let Some(text) = self.focused_text_mut() {
            let byte_index: usize = text.chars().take(cursor - 1).map(char::len_utf8).sum();
            text.remove(byte_index);
            self.cursor -= 1;
        }
    }

    /// On the priority field, left/right cycle the value instead of moving a cursor.
    pub fn move_left(&mut self) {
        match self.focus {
            FormField::Priority => self.priority = self.priority.previous(),
            _ => self.cursor = self.cursor.saturating_sub(1),
        }
    }

    pub fn move_right(&mut self) {
        match self.focus {
            FormField::Priority => self.priority = self.priority.next(),
            _ => {
                let len = self.focused_text().map(|t| t.chars().count()).unwrap_or(0);
                if self.cursor < len {
                    self.cursor += 1;
                }
            }
        }
    }

    /// Checks the inputs the way the server would, before anything is sent.
    pub fn to_new_task(&self, today: NaiveDate) -> Result<NewTask, ClientError> {
        let new_task = NewTask::new(self.name.clone()).with_priority(self.priority);
        new_task
            .validate()
            .map_err(|_| ClientError::Validation(TASK_NAME_REQUIRED.to_string()))?;

        let due = self.due.trim();
        let due_date = if due.is_empty() {
            None
        } else {
            let date = parse_due_date(due, today)
                .map_err(|e| ClientError::Validation(format!("Invalid due date: {}", e)))?;
            Some(date)
        };
        Ok(new_task.with_due_date(due_date))
    }
}

pub struct TaskView {
    pub page: Page,
    pub status: ViewStatus,
    pub tasks: Vec<Task>,
    pub selected: Option<usize>,
    pub form: TaskForm,
    /// Keys go to the add form instead of the list.
    pub editing: bool,
    pending_delete: Option<Uuid>,
    notifications: Vec<Notification>,
    status_before_fetch: ViewStatus,
}

impl Default for TaskView {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskView {
    pub fn new() -> Self {
        Self {
            page: Page::Tasks,
            status: ViewStatus::Idle,
            tasks: Vec::new(),
            selected: None,
            form: TaskForm::default(),
            editing: false,
            pending_delete: None,
            notifications: Vec::new(),
            status_before_fetch: ViewStatus::Idle,
        }
    }

    /// First render: schedule the initial fetch.
    pub fn mount(&mut self) {
        self.begin_fetch();
    }

    pub fn begin_fetch(&mut self) {
        if self.status != ViewStatus::Loading {
            self.status_before_fetch = self.status;
            self.status = ViewStatus::Loading;
        }
    }

    pub fn fetch_pending(&self) -> bool {
        self.status == ViewStatus::Loading
    }

    /// Replaces the list wholesale. On failure the old list stays on screen.
    pub fn load<A: TaskApi>(&mut self, api: &A) {
        self.begin_fetch();
        match api.list_tasks() {
            Ok(tasks) => {
                self.tasks = tasks;
                self.status = ViewStatus::TasksLoaded;
                self.clamp_selection();
            }
            Err(_) => {
                self.notify(NoticeLevel::Error, MSG_FETCH_FAILED);
                self.status = self.status_before_fetch;
            }
        }
    }

    pub fn submit<A: TaskApi>(&mut self, api: &A) {
        self.submit_on(api, chrono::Local::now().date_naive());
    }

    /// `today` anchors relative due dates such as `tomorrow` or `+3d`.
    pub fn submit_on<A: TaskApi>(&mut self, api: &A, today: NaiveDate) {
        let new_task = match self.form.to_new_task(today) {
            Ok(new_task) => new_task,
            Err(err) => {
                self.notify(NoticeLevel::Warning, err.to_string());
                return;
            }
        };

        match api.create_task(&new_task) {
            Ok(response) => self.notify(NoticeLevel::Success, response.message),
            Err(err) => self.notify_failure(err, MSG_CREATE_FAILED),
        }
        self.form.reset();
        self.editing = false;
        self.begin_fetch();
    }

    pub fn start_editing(&mut self) {
        self.editing = true;
        self.form.cursor = self.form.focused_text().map(|t| t.chars().count()).unwrap_or(0);
    }

    pub fn stop_editing(&mut self) {
        self.editing = false;
    }

    /// Opens the confirmation for the selected task.
    pub fn request_delete(&mut self) {
        if let Some(task) = self.selected_task() {
            self.pending_delete = Some(task.id);
        }
    }

    pub fn pending_delete(&self) -> Option<&Task> {
        let id = self.pending_delete?;
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn is_confirming(&self) -> bool {
        self.pending_delete.is_some()
    }

    /// Declining changes nothing else.
    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub fn confirm_delete<A: TaskApi>(&mut self, api: &A) {
        let Some(id) = self.pending_delete.take() else {
            return;
        };
        match api.delete_task(&id) {
            Ok(response) => self.notify(NoticeLevel::Success, response.message),
            Err(err) => self.notify_failure(err, MSG_DELETE_FAILED),
        }
        self.begin_fetch();
    }

    pub fn navigate(&mut self, page: Page) {
        self.page = page;
        self.editing = false;
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.selected.and_then(|i| self.tasks.get(i))
    }

    pub fn next(&mut self) {
        if self.tasks.is_empty() {
            return;
        }
        let i = match self.selected {
            Some(i) if i + 1 < self.tasks.len() => i + 1,
            _ => 0,
        };
        self.selected = Some(i);
    }

    pub fn previous(&mut self) {
        if self.tasks.is_empty() {
            return;
        }
        let i = match self.selected {
            Some(0) | None => self.tasks.len() - 1,
            Some(i) => i - 1,
        };
        self.selected = Some(i);
    }

    pub fn notify(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.notifications.push(Notification {
            level,
            message: message.into(),
            created_at: Instant::now(),
        });
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn prune_notifications(&mut self, now: Instant) {
        self.notifications.retain(|n| !n.is_expired(now));
    }

    // Server messages are shown verbatim; anything else gets the generic text.
    fn notify_failure(&mut self, err: ClientError, generic: &str) {
        match err {
            ClientError::Server(message) => self.notify(NoticeLevel::Error, message),
            ClientError::Validation(message) => self.notify(NoticeLevel::Warning, message),
            ClientError::Network(_) => self.notify(NoticeLevel::Error, generic),
        }
    }

    fn clamp_selection(&mut self) {
        self.selected = match self.selected {
            _ if self.tasks.is_empty() => None,
            Some(i) if i >= self.tasks.len() => Some(self.tasks.len() - 1),
            Some(i) => Some(i),
            None => Some(0),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use taskboard_core::{ApiResponse, TaskPatch};

    /// Talks to an in-process list instead of a server.
    #[derive(Default)]
    struct MockApi {
        tasks: RefCell<Vec<Task>>,
        offline: Cell<bool>,
        list_calls: Cell<usize>,
        create_calls: Cell<usize>,
        delete_calls: Cell<usize>,
    }

    impl TaskApi for MockApi {
        fn list_tasks(&self) -> Result<Vec<Task>, ClientError> {
            self.list_calls.set(self.list_calls.get() + 1);
            if self.offline.get() {
                return Err(ClientError::Network("connection refused".into()));
            }
            Ok(self.tasks.borrow().clone())
        }

        fn create_task(&self, task: &NewTask) -> Result<ApiResponse<Task>, ClientError> {
            self.create_calls.set(self.create_calls.get() + 1);
            if self.offline.get() {
                return Err(ClientError::Network("connection refused".into()));
            }
            let created = Task::from_new(task.clone());
            self.tasks.borrow_mut().push(created.clone());
            Ok(ApiResponse::ok("Task created successfully", created))
        }

        fn update_task(&self, _id: &Uuid, _patch: &TaskPatch) -> Result<ApiResponse<Task>, ClientError> {
            unimplemented!()
        }

        fn delete_task(&self, id: &Uuid) -> Result<ApiResponse<()>, ClientError> {
            self.delete_calls.set(self.delete_calls.get() + 1);
            if self.offline.get() {
                return Err(ClientError::Network("connection refused".into()));
            }
            let mut tasks = self.tasks.borrow_mut();
            let before = tasks.len();
            tasks.retain(|t| t.id != *id);
            if tasks.len() == before {
                return Err(ClientError::Server("Task not found".into()));
            }
            Ok(ApiResponse::ok_empty("Task deleted"))
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    fn type_name(view: &mut TaskView, name: &str) {
        view.start_editing();
        for c in name.chars() {
            view.form.input_char(c);
        }
    }

    fn last_message(view: &TaskView) -> (NoticeLevel, String) {
        let n = view.notifications().last().expect("no notification");
        (n.level, n.message.clone())
    }

    #[test]
    fn test_mount_then_load() {
        let api = MockApi::default();
        let mut view = TaskView::new();
        assert_eq!(view.status, ViewStatus::Idle);

        view.mount();
        assert_eq!(view.status, ViewStatus::Loading);
        assert!(view.fetch_pending());

        view.load(&api);
        assert_eq!(view.status, ViewStatus::TasksLoaded);
        assert!(view.tasks.is_empty());
        assert_eq!(api.list_calls.get(), 1);
    }

    #[test]
    fn test_failed_fetch_keeps_stale_list() {
        let api = MockApi::default();
        api.tasks.borrow_mut().push(Task::from_new(NewTask::new("old")));
        let mut view = TaskView::new();
        view.mount();
        view.load(&api);

        api.offline.set(true);
        view.begin_fetch();
        view.load(&api);

        assert_eq!(view.status, ViewStatus::TasksLoaded);
        assert_eq!(view.tasks.len(), 1);
        assert_eq!(last_message(&view), (NoticeLevel::Error, MSG_FETCH_FAILED.to_string()));
    }

    #[test]
    fn test_first_fetch_failure_returns_to_idle() {
        let api = MockApi::default();
        api.offline.set(true);
        let mut view = TaskView::new();
        view.mount();
        view.load(&api);
        assert_eq!(view.status, ViewStatus::Idle);
    }

    #[test]
    fn test_submit_creates_and_refetches() {
        let api = MockApi::default();
        let mut view = TaskView::new();
        view.mount();
        view.load(&api);

        type_name(&mut view, "Write report");
        view.form.focus_next();
        view.form.move_right(); // Medium -> High
        view.form.focus_next();
        for c in "2025-06-01".chars() {
            view.form.input_char(c);
        }
        view.submit_on(&api, today());

        assert_eq!(last_message(&view), (NoticeLevel::Success, "Task created successfully".to_string()));
        assert_eq!(view.form, TaskForm::default());
        assert!(view.fetch_pending());

        view.load(&api);
        assert_eq!(view.tasks.len(), 1);
        let task = &view.tasks[0];
        assert_eq!(task.task_name, "Write report");
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2025, 6, 1));
        assert!(!task.is_done);
    }

    #[test]
    fn test_submit_empty_name_warns_without_network() {
        let api = MockApi::default();
        let mut view = TaskView::new();
        view.mount();
        view.load(&api);

        view.submit_on(&api, today());

        assert_eq!(api.create_calls.get(), 0);
        assert_eq!(last_message(&view), (NoticeLevel::Warning, TASK_NAME_REQUIRED.to_string()));
        assert_eq!(view.status, ViewStatus::TasksLoaded);
        assert!(view.tasks.is_empty());
    }

    #[test]
    fn test_submit_bad_due_date_warns_and_keeps_form() {
        let api = MockApi::default();
        let mut view = TaskView::new();
        type_name(&mut view, "x");
        view.form.due = "someday".to_string();

        view.submit_on(&api, today());

        assert_eq!(api.create_calls.get(), 0);
        assert_eq!(last_message(&view).0, NoticeLevel::Warning);
        assert_eq!(view.form.name, "x");
    }

    #[test]
    fn test_network_failure_on_create_still_refetches() {
        let api = MockApi::default();
        api.offline.set(true);
        let mut view = TaskView::new();
        type_name(&mut view, "x");

        view.submit_on(&api, today());

        assert_eq!(last_message(&view), (NoticeLevel::Error, MSG_CREATE_FAILED.to_string()));
        assert!(view.fetch_pending());
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let api = MockApi::default();
        let mut view = TaskView::new();
        for name in ["first", "second"] {
            type_name(&mut view, name);
            view.submit_on(&api, today());
        }
        view.load(&api);
        assert_eq!(view.selected, Some(0));

        view.request_delete();
        assert!(view.is_confirming());
        assert_eq!(view.pending_delete().map(|t| t.task_name.as_str()), Some("first"));

        view.cancel_delete();
        assert!(!view.is_confirming());
        assert_eq!(api.delete_calls.get(), 0);
        assert_eq!(view.tasks.len(), 2);

        view.request_delete();
        view.confirm_delete(&api);
        assert_eq!(last_message(&view), (NoticeLevel::Success, "Task deleted".to_string()));
        assert!(view.fetch_pending());

        view.load(&api);
        assert_eq!(view.tasks.len(), 1);
        assert_eq!(view.tasks[0].task_name, "second");
    }

    #[test]
    fn test_delete_server_message_shown_verbatim() {
        let api = MockApi::default();
        let mut view = TaskView::new();
        type_name(&mut view, "gone");
        view.submit_on(&api, today());
        view.load(&api);

        view.request_delete();
        api.tasks.borrow_mut().clear();
        view.confirm_delete(&api);

        assert_eq!(last_message(&view), (NoticeLevel::Error, "Task not found".to_string()));
        assert!(view.fetch_pending());
        view.load(&api);
        assert!(view.tasks.is_empty());
        assert_eq!(view.selected, None);
    }

    #[test]
    fn test_network_failure_on_delete_still_refetches() {
        let api = MockApi::default();
        let mut view = TaskView::new();
        type_name(&mut view, "kept");
        view.submit_on(&api, today());
        view.load(&api);

        view.request_delete();
        api.offline.set(true);
        view.confirm_delete(&api);

        assert_eq!(api.delete_calls.get(), 1);
        assert_eq!(last_message(&view), (NoticeLevel::Error, MSG_DELETE_FAILED.to_string()));
        assert!(!view.is_confirming());
        assert!(view.fetch_pending());

        api.offline.set(false);
        view.load(&api);
        assert_eq!(view.tasks.len(), 1);
        assert_eq!(view.tasks[0].task_name, "kept");
    }

    #[test]
    fn test_notifications_expire() {
        let mut view = TaskView::new();
        view.notify(NoticeLevel::Success, "hello");
        let created = view.notifications()[0].created_at;

        view.prune_notifications(created + Duration::from_secs(1));
        assert_eq!(view.notifications().len(), 1);

        view.prune_notifications(created + NOTIFICATION_TTL);
        assert!(view.notifications().is_empty());
    }

    #[test]
    fn test_navigation() {
        let mut view = TaskView::new();
        view.start_editing();
        view.navigate(Page::About);
        assert_eq!(view.page, Page::About);
        assert!(!view.editing);
        assert_eq!(Page::SignUp.next(), Page::Tasks);
    }

    #[test]
    fn test_form_editing_unicode() {
        let mut form = TaskForm::default();
        for c in "tâche".chars() {
            form.input_char(c);
        }
        form.move_left();
        form.delete_char();
        assert_eq!(form.name, "tâce");
        assert_eq!(form.cursor, 3);
    }
}
