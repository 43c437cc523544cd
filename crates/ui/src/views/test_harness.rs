use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use services::{CompletionTracker, CopyFeedback, MemoryClipboard, SidebarTracker, sample_tasks};
use storage::{Storage, keys};
use taskdeck_core::Clock;
use taskdeck_core::model::{CompletedTasks, Task, TaskId};
use taskdeck_core::time::fixed_now;

use crate::components::TaskSidebar;
use crate::context::{UiApp, build_app_context};
use crate::views::{HomeTestHandles, HomeView, TaskView};

struct TestApp {
    tasks: Arc<Vec<Task>>,
    completion: Arc<CompletionTracker>,
    sidebar: Arc<SidebarTracker>,
    copy_feedback: Arc<CopyFeedback>,
}

impl UiApp for TestApp {
    fn tasks(&self) -> Arc<Vec<Task>> {
        Arc::clone(&self.tasks)
    }

    fn completion(&self) -> Arc<CompletionTracker> {
        Arc::clone(&self.completion)
    }

    fn sidebar(&self) -> Arc<SidebarTracker> {
        Arc::clone(&self.sidebar)
    }

    fn copy_feedback(&self) -> Arc<CopyFeedback> {
        Arc::clone(&self.copy_feedback)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    Task(&'static str),
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    home_handles: HomeTestHandles,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    use_context_provider(|| props.home_handles.clone());
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

// Mirrors the real layout: sidebar plus the routed view, sharing the
// active-task and completion signals.
#[component]
fn Root() -> Element {
    use_context_provider(|| Signal::new(None::<TaskId>));
    use_context_provider(|| Signal::new(CompletedTasks::new()));
    let view = use_context::<ViewKind>();
    let content = match view {
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Task(task_id) => rsx! { TaskView { task_id } },
    };
    rsx! {
        div { class: "app",
            TaskSidebar {}
            main { class: "content", {content} }
        }
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub storage: Storage,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    /// Builds the tree but leaves queued effects unprocessed, exposing
    /// the first frame as a user would see it before hydration.
    pub fn rebuild_without_effects(&mut self) {
        self.dom.rebuild_in_place();
    }

    pub fn drive(&mut self) {
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    // Effects run during `process_events` and may dirty scopes, which need
    // another render pass to show; iterate until the frame settles.
    for _ in 0..4 {
        dom.process_events();
        dom.render_immediate(&mut NoOpMutations);
    }
    dom.process_events();
}

pub fn setup_view_harness(view: ViewKind) -> ViewHarness {
    setup_view_harness_with_storage(view, Storage::in_memory())
}

/// Seed `storage.local` before calling this to simulate persisted state.
pub fn setup_view_harness_with_storage(view: ViewKind, storage: Storage) -> ViewHarness {
    setup_view_harness_with_handles(view, storage, HomeTestHandles::default())
}

/// Harness that also wires `handles` into the home view, so tests can
/// fire its actions directly.
pub fn setup_view_harness_with_handles(
    view: ViewKind,
    storage: Storage,
    home_handles: HomeTestHandles,
) -> ViewHarness {
    let app = Arc::new(TestApp {
        tasks: Arc::new(sample_tasks()),
        completion: Arc::new(CompletionTracker::new(Arc::clone(&storage.local))),
        sidebar: Arc::new(SidebarTracker::new(Arc::clone(&storage.session))),
        copy_feedback: Arc::new(CopyFeedback::new(
            Arc::new(MemoryClipboard::new()),
            Clock::fixed(fixed_now()),
        )),
    });
    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app,
            view,
            home_handles,
        },
    );
    ViewHarness { dom, storage }
}

/// Storage with a completion list already persisted.
pub fn storage_with_completed(ids: &[&str]) -> Storage {
    let storage = Storage::in_memory();
    let encoded = serde_json::to_string(ids).unwrap();
    storage.local.write(keys::COMPLETED_TASKS, &encoded);
    storage
}
