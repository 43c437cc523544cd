use std::sync::Arc;

use services::{CompletionTracker, CopyFeedback, SidebarTracker};
use taskdeck_core::model::{Task, TaskId, TaskSummary};

/// What the composition root hands the UI: content plus the three
/// persisted-state services.
pub trait UiApp: Send + Sync {
    fn tasks(&self) -> Arc<Vec<Task>>;
    fn completion(&self) -> Arc<CompletionTracker>;
    fn sidebar(&self) -> Arc<SidebarTracker>;
    fn copy_feedback(&self) -> Arc<CopyFeedback>;

    /// Task to open on launch, if any.
    fn initial_task_id(&self) -> Option<TaskId> {
        None
    }
}

#[derive(Clone)]
pub struct AppContext {
    tasks: Arc<Vec<Task>>,
    completion: Arc<CompletionTracker>,
    sidebar: Arc<SidebarTracker>,
    copy_feedback: Arc<CopyFeedback>,
    initial_task: Option<TaskId>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            tasks: app.tasks(),
            completion: app.completion(),
            sidebar: app.sidebar(),
            copy_feedback: app.copy_feedback(),
            initial_task: app.initial_task_id(),
        }
    }

    #[must_use]
    pub fn tasks(&self) -> Arc<Vec<Task>> {
        Arc::clone(&self.tasks)
    }

    /// The sidebar's list rows, in content order.
    #[must_use]
    pub fn task_summaries(&self) -> Vec<TaskSummary> {
        self.tasks.iter().map(Task::summary).collect()
    }

    #[must_use]
    pub fn find_task(&self, id: &TaskId) -> Option<Task> {
        self.tasks.iter().find(|task| task.id() == id).cloned()
    }

    #[must_use]
    pub fn completion(&self) -> Arc<CompletionTracker> {
        Arc::clone(&self.completion)
    }

    #[must_use]
    pub fn sidebar(&self) -> Arc<SidebarTracker> {
        Arc::clone(&self.sidebar)
    }

    #[must_use]
    pub fn copy_feedback(&self) -> Arc<CopyFeedback> {
        Arc::clone(&self.copy_feedback)
    }

    #[must_use]
    pub fn initial_task(&self) -> Option<TaskId> {
        self.initial_task.clone()
    }
}

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
