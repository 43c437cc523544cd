use dioxus::prelude::*;

use taskdeck_core::model::TaskId;

use crate::context::AppContext;

/// Mark-complete toggle for one task.
///
/// Renders a disabled placeholder until the persisted state is read, then
/// flips between "Mark Complete" and "Completed". Toggling goes through
/// the tracker, which persists and broadcasts to the other widgets on the
/// page. Mount with a `key` tied to the task so navigation re-hydrates.
#[component]
pub fn CompletionButton(task_id: String) -> Element {
    let ctx = use_context::<AppContext>();
    let mut hydrated = use_signal(|| false);
    let mut done = use_signal(|| false);

    {
        let completion = ctx.completion();
        let id = TaskId::new(task_id.clone());
        use_effect(move || {
            if hydrated() {
                return;
            }
            done.set(completion.is_completed(&id));
            hydrated.set(true);
        });
    }

    if !hydrated() {
        return rsx! {
            button { class: "completion-button", r#type: "button", disabled: true, "Loading..." }
        };
    }

    let completion = ctx.completion();
    let id = TaskId::new(task_id);
    rsx! {
        button {
            class: if done() { "completion-button completion-button--done" } else { "completion-button" },
            r#type: "button",
            onclick: move |_| {
                let next = completion.toggle(&id);
                done.set(next);
            },
            if done() {
                span { class: "completion-check", "✓" }
                "Completed"
            } else {
                "Mark Complete"
            }
        }
    }
}
