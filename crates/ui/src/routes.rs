use dioxus::prelude::*;
use dioxus_router::{Outlet, Routable, use_navigator};

use crate::components::TaskSidebar;
use crate::context::AppContext;
use crate::views::{HomeView, TaskView};
use taskdeck_core::model::{CompletedTasks, TaskId};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/tasks/:task_id", TaskView)] Task { task_id: String },
}

#[component]
fn Layout() -> Element {
    // Views announce which task they show; the sidebar highlights it.
    use_context_provider(|| Signal::new(None::<TaskId>));
    // The completion marks, shared so views can refresh the sidebar
    // outside of the toggle broadcast.
    use_context_provider(|| Signal::new(CompletedTasks::new()));

    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let mut launched = use_signal(|| false);
    use_effect(move || {
        if launched() {
            return;
        }
        launched.set(true);
        if let Some(id) = ctx.initial_task() {
            navigator.push(Route::Task {
                task_id: id.into_string(),
            });
        }
    });

    rsx! {
        div { class: "app",
            TaskSidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}
