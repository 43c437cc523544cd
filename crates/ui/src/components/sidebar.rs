use std::sync::Arc;
use std::time::Duration;

use dioxus::document::eval;
use dioxus::prelude::*;
use dioxus_router::Link;

use services::SidebarLayout;
use taskdeck_core::model::{CompletedTasks, Difficulty, TaskId};

use super::scripts;
use crate::context::AppContext;
use crate::routes::Route;

/// Row height and planning viewport, in pixels. Keep in sync with
/// `.task-link` and `.task-scroll` in style.css.
pub(crate) const ROW_HEIGHT_PX: u32 = 56;
pub(crate) const VIEWPORT_FALLBACK_PX: u32 = 640;

pub(crate) fn difficulty_dot_class(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Easy => "difficulty-dot difficulty-dot--easy",
        Difficulty::Medium => "difficulty-dot difficulty-dot--medium",
        Difficulty::Hard => "difficulty-dot difficulty-dot--hard",
    }
}

pub(crate) fn difficulty_badge_class(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Easy => "difficulty-badge difficulty-badge--easy",
        Difficulty::Medium => "difficulty-badge difficulty-badge--medium",
        Difficulty::Hard => "difficulty-badge difficulty-badge--hard",
    }
}

#[derive(Clone, PartialEq)]
struct SidebarRowVm {
    id: TaskId,
    task_id: String,
    title: String,
    dot_class: &'static str,
    badge_class: &'static str,
    letter: &'static str,
    difficulty_label: &'static str,
    is_active: bool,
    is_done: bool,
}

#[component]
pub fn TaskSidebar() -> Element {
    let ctx = use_context::<AppContext>();
    let current = use_context::<Signal<Option<TaskId>>>();

    let summaries = ctx.task_summaries();
    let mut hydrated = use_signal(|| false);
    let mut collapsed = use_signal(|| false);
    // Shared with the views (the layout provides it) so actions that
    // bypass the toggle broadcast, like a progress reset, still refresh
    // the checkmarks on this page.
    let mut completed = use_context::<Signal<CompletedTasks>>();
    let mut scroll_applied = use_signal(|| false);

    // One-shot hydration after mount: the sidebar renders defaults, then
    // transitions once to the persisted state.
    {
        let sidebar = ctx.sidebar();
        let completion = ctx.completion();
        use_effect(move || {
            if hydrated() {
                return;
            }
            let state = sidebar.hydrate();
            collapsed.set(state.collapsed);
            completed.set(completion.completed());
            hydrated.set(true);
        });
    }

    // Mount-time scroll: restore a stored offset as soon as hydration is
    // done, or center the current task once a view announces it. Neither
    // path writes anything; only user scrolling does.
    {
        let sidebar = ctx.sidebar();
        let task_ids: Vec<TaskId> = summaries.iter().map(|row| row.id.clone()).collect();
        use_effect(move || {
            if !hydrated() || scroll_applied() {
                return;
            }
            let stored = sidebar.hydrate().scroll_offset;
            let current_id = current();
            // Restoring needs no current task; centering waits for a view
            // to announce one.
            if stored.is_none() && current_id.is_none() {
                return;
            }
            let layout = SidebarLayout {
                viewport_height: VIEWPORT_FALLBACK_PX,
                item_height: ROW_HEIGHT_PX,
                tasks: task_ids.clone(),
                current: current_id,
            };
            let plan = sidebar.initial_scroll(&layout);
            scroll_applied.set(true);
            if let Some(script) = scripts::scroll_plan_script(&plan) {
                spawn(async move {
                    let _ = eval(&script).await;
                });
            }
        });
    }

    // Live completion marks: other widgets toggle through the same
    // tracker; poll the subscription and re-read on change.
    {
        let completion = ctx.completion();
        use_future(move || {
            let completion = completion.clone();
            async move {
                let (_subscriber, changes) = completion.subscribe_channel();
                loop {
                    tokio::time::sleep(Duration::from_millis(150)).await;
                    let mut dirty = false;
                    while changes.try_recv().is_ok() {
                        dirty = true;
                    }
                    if dirty {
                        completed.set(completion.completed());
                    }
                }
            }
        });
    }

    let active_id = current();
    let completed_now = completed();
    let rows: Vec<SidebarRowVm> = summaries
        .into_iter()
        .map(|row| SidebarRowVm {
            task_id: row.id.to_string(),
            title: row.title,
            dot_class: difficulty_dot_class(row.difficulty),
            badge_class: difficulty_badge_class(row.difficulty),
            letter: row.difficulty.letter(),
            difficulty_label: row.difficulty.label(),
            is_active: Some(&row.id) == active_id.as_ref(),
            is_done: completed_now.contains(&row.id),
            id: row.id,
        })
        .collect();

    let aside_class = match (hydrated(), collapsed()) {
        (false, _) => "sidebar",
        (true, false) => "sidebar sidebar--ready",
        (true, true) => "sidebar sidebar--ready sidebar--collapsed",
    };

    let sidebar_for_toggle = ctx.sidebar();
    let sidebar_for_scroll = ctx.sidebar();

    rsx! {
        button {
            class: if hydrated() { "sidebar-toggle sidebar-toggle--ready" } else { "sidebar-toggle" },
            r#type: "button",
            aria_label: if collapsed() { "Expand sidebar" } else { "Collapse sidebar" },
            onclick: move |_| {
                // Persisted before the visual transition starts.
                let next = sidebar_for_toggle.toggle_collapsed();
                collapsed.set(next);
            },
            span {
                class: if collapsed() { "sidebar-toggle-caret sidebar-toggle-caret--flipped" } else { "sidebar-toggle-caret" },
            }
        }

        aside { class: aside_class,
            header { class: "sidebar-header",
                h2 { "Tasks" }
            }
            div {
                id: "task-scroll",
                class: "task-scroll",
                onscroll: move |_| {
                    let sidebar = Arc::clone(&sidebar_for_scroll);
                    spawn(async move {
                        if let Ok(offset) = eval(scripts::READ_SCROLL_TOP).join::<f64>().await {
                            sidebar.record_scroll(offset.max(0.0) as u32);
                        }
                    });
                },
                nav { class: "task-list",
                    for row in rows {
                        Link {
                            key: "{row.task_id}",
                            class: if row.is_active { "task-link task-link--active" } else { "task-link" },
                            to: Route::Task { task_id: row.task_id.clone() },
                            span { class: row.dot_class, aria_label: row.difficulty_label }
                            span { class: "task-link-title", "{row.title}" }
                            if row.is_done {
                                span { class: "task-link-done", "✓" }
                            }
                            span { class: row.badge_class, "{row.letter}" }
                        }
                    }
                }
            }
            footer { class: "sidebar-legend",
                span { class: "legend-item",
                    span { class: "difficulty-dot difficulty-dot--easy" }
                    "Easy"
                }
                span { class: "legend-item",
                    span { class: "difficulty-dot difficulty-dot--medium" }
                    "Medium"
                }
                span { class: "legend-item",
                    span { class: "difficulty-dot difficulty-dot--hard" }
                    "Hard"
                }
            }
        }
    }
}
