use dioxus::prelude::*;

use taskdeck_core::model::TaskId;

use crate::components::{CompletionButton, CopyButton, HintAccordion};
use crate::context::AppContext;

/// Detail page for a single task.
///
/// Announces the active task to the sidebar, then renders the metadata,
/// starter code, hints, and the completion toggle. The interactive
/// widgets are keyed by task id so navigating between tasks re-hydrates
/// them from the persisted state.
#[component]
pub fn TaskView(task_id: String) -> Element {
    let ctx = use_context::<AppContext>();
    let mut current = use_context::<Signal<Option<TaskId>>>();

    let id = TaskId::new(task_id);
    if current.peek().as_ref() != Some(&id) {
        current.set(Some(id.clone()));
    }

    let Some(task) = ctx.find_task(&id) else {
        return rsx! {
            article { class: "task-view task-view--missing",
                h1 { "Task not found" }
                p { "No task with id {id} is loaded." }
            }
        };
    };

    let id_str = task.id().to_string();
    let title = task.title().to_string();
    let description = task.description().to_string();
    let difficulty_label = task.difficulty().label();
    let category_label = task.category().label();
    let estimate = task.time_estimate();
    let tags = task.tags().to_vec();
    let goals = task.learning_goals().to_vec();
    let hints = task.hints().to_vec();
    let starter_code = task.starter_code().to_string();
    let has_code = !starter_code.is_empty();

    rsx! {
        article { class: "task-view",
            header { class: "task-view-header",
                h1 { "{title}" }
                div { class: "task-meta",
                    span { class: "task-meta-item", "{difficulty_label}" }
                    span { class: "task-meta-item", "{category_label}" }
                    span { class: "task-meta-item", "~{estimate} min" }
                }
                if !tags.is_empty() {
                    div { class: "task-tags",
                        for tag in tags {
                            span { key: "{tag}", class: "task-tag", "{tag}" }
                        }
                    }
                }
            }

            section { class: "task-description",
                p { "{description}" }
            }

            if !goals.is_empty() {
                section { class: "task-goals",
                    h3 { "What you'll practice" }
                    ul {
                        for goal in goals {
                            li { key: "{goal}", "{goal}" }
                        }
                    }
                }
            }

            if has_code {
                section { class: "task-code",
                    header { class: "task-code-header",
                        h3 { "Starter code" }
                        CopyButton { key: "{id_str}", code: starter_code.clone() }
                    }
                    pre { class: "task-code-block",
                        code { "{starter_code}" }
                    }
                }
            }

            HintAccordion { key: "{id_str}", hints }

            footer { class: "task-view-footer",
                CompletionButton { key: "{id_str}", task_id: id_str.clone() }
            }
        }
    }
}
