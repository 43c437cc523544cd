use dioxus::prelude::*;
use dioxus_router::Link;

use taskdeck_core::model::{CompletedTasks, TaskId};

use crate::context::AppContext;
use crate::routes::Route;

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

/// Lets a harness trigger the reset action without a DOM click.
#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct HomeTestHandles {
    reset: Rc<RefCell<Option<Callback<()>>>>,
}

#[cfg(test)]
impl HomeTestHandles {
    pub(crate) fn register(&self, reset: Callback<()>) {
        *self.reset.borrow_mut() = Some(reset);
    }

    pub(crate) fn reset(&self) -> Callback<()> {
        self.reset
            .borrow()
            .as_ref()
            .copied()
            .expect("HomeView has mounted and registered its handles")
    }
}

/// Landing page: overall progress and the full task list.
#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let mut current = use_context::<Signal<Option<TaskId>>>();

    // No task is active here; clear the sidebar highlight.
    if current.peek().is_some() {
        current.set(None);
    }

    let mut hydrated = use_signal(|| false);
    let mut done_count = use_signal(|| 0usize);
    // Sidebar checkmarks render from this shared signal; resetting must
    // clear it too, since only toggles broadcast.
    let mut completed_rows = use_context::<Signal<CompletedTasks>>();

    {
        let completion = ctx.completion();
        use_effect(move || {
            if hydrated() {
                return;
            }
            done_count.set(completion.completed().len());
            hydrated.set(true);
        });
    }

    let summaries = ctx.task_summaries();
    let total = summaries.len();
    let done = done_count();

    let completion_for_reset = ctx.completion();
    let reset_progress = use_callback(move |()| {
        completion_for_reset.clear_all();
        done_count.set(0);
        completed_rows.set(CompletedTasks::new());
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<HomeTestHandles>() {
                handles.register(reset_progress);
            }
        }
    }

    rsx! {
        article { class: "home",
            header { class: "home-header",
                h1 { "Taskdeck" }
                p { class: "home-tagline", "Small coding exercises, one sitting each." }
            }
            section { class: "home-progress",
                if hydrated() {
                    p { class: "progress-line", "{done} of {total} tasks completed" }
                    button {
                        class: "reset-button",
                        r#type: "button",
                        onclick: move |_| reset_progress.call(()),
                        "Reset progress"
                    }
                } else {
                    p { class: "progress-line", "Loading progress..." }
                }
            }
            section { class: "home-tasks",
                h2 { "Pick a task" }
                ul { class: "home-task-list",
                    for (task_id, title, difficulty) in summaries
                        .into_iter()
                        .map(|row| (row.id.to_string(), row.title, row.difficulty.label()))
                    {
                        li { key: "{task_id}",
                            Link {
                                class: "home-task-link",
                                to: Route::Task { task_id: task_id.clone() },
                                span { class: "home-task-title", "{title}" }
                                span { class: "home-task-difficulty", "{difficulty}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
