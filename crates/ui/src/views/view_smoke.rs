use storage::{Storage, keys};

use super::HomeTestHandles;
use super::test_harness::{
    ViewKind, setup_view_harness, setup_view_harness_with_handles,
    setup_view_harness_with_storage, storage_with_completed,
};

#[tokio::test(flavor = "current_thread")]
async fn task_view_renders_persisted_completion() {
    let storage = storage_with_completed(&["two-sum"]);
    let mut harness = setup_view_harness_with_storage(ViewKind::Task("two-sum"), storage);

    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Completed"), "missing completed state in {html}");
    assert!(!html.contains("Mark Complete"), "stale default state in {html}");
    assert!(html.contains("task-link-done"), "missing sidebar mark in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn task_view_defaults_to_incomplete() {
    let mut harness = setup_view_harness(ViewKind::Task("two-sum"));

    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Mark Complete"), "missing default state in {html}");
    assert!(!html.contains("task-link-done"), "unexpected mark in {html}");
    // Hydration only reads; nothing is written until the user acts.
    assert_eq!(harness.storage.local.read(keys::COMPLETED_TASKS), None);
    assert_eq!(
        harness.storage.session.read(keys::SIDEBAR_SCROLL_POSITION),
        None
    );
}

#[tokio::test(flavor = "current_thread")]
async fn sidebar_hydrates_collapsed_flag() {
    let storage = Storage::in_memory();
    storage.session.write(keys::SIDEBAR_COLLAPSED, "true");
    let mut harness = setup_view_harness_with_storage(ViewKind::Home, storage);

    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("sidebar--collapsed"), "sidebar not collapsed in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_renders_progress_and_reset() {
    let storage = storage_with_completed(&["two-sum", "fizzbuzz"]);
    let mut harness = setup_view_harness_with_storage(ViewKind::Home, storage);

    harness.rebuild();
    let html = harness.render();
    assert!(
        html.contains("2 of 5 tasks completed"),
        "missing progress line in {html}"
    );
    assert!(html.contains("Reset progress"), "missing reset button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn reset_clears_sidebar_marks_without_a_toggle() {
    let storage = storage_with_completed(&["two-sum", "fizzbuzz"]);
    let handles = HomeTestHandles::default();
    let mut harness = setup_view_harness_with_handles(ViewKind::Home, storage, handles.clone());

    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("task-link-done"), "missing initial marks in {html}");
    assert!(
        html.contains("2 of 5 tasks completed"),
        "missing initial progress in {html}"
    );

    // Reset persists the empty set but sends no change notification;
    // the sidebar must still drop its checkmarks on this very page.
    handles.reset().call(());
    harness.drive();

    let html = harness.render();
    assert!(!html.contains("task-link-done"), "stale mark after reset in {html}");
    assert!(
        html.contains("0 of 5 tasks completed"),
        "progress not reset in {html}"
    );
    assert_eq!(
        harness.storage.local.read(keys::COMPLETED_TASKS),
        Some("[]".to_string())
    );
}

#[tokio::test(flavor = "current_thread")]
async fn task_view_first_frame_shows_defaults_then_hydrates() {
    let storage = storage_with_completed(&["two-sum"]);
    storage.session.write(keys::SIDEBAR_COLLAPSED, "true");
    let mut harness = setup_view_harness_with_storage(ViewKind::Task("two-sum"), storage);

    // Before effects run, nothing persisted is visible yet.
    harness.rebuild_without_effects();
    let html = harness.render();
    assert!(html.contains("Loading..."), "missing button placeholder in {html}");
    assert!(!html.contains("Completed"), "completion shown early in {html}");
    assert!(!html.contains("task-link-done"), "marks shown early in {html}");
    assert!(!html.contains("sidebar--ready"), "sidebar ready early in {html}");
    assert!(!html.contains("sidebar--collapsed"), "collapsed early in {html}");

    // One pass over the queued effects completes the transition.
    harness.drive();
    let html = harness.render();
    assert!(html.contains("Completed"), "missing completed state in {html}");
    assert!(html.contains("task-link-done"), "missing sidebar mark in {html}");
    assert!(html.contains("sidebar--ready"), "sidebar not ready in {html}");
    assert!(html.contains("sidebar--collapsed"), "collapsed flag lost in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn home_progress_waits_for_hydration() {
    let storage = storage_with_completed(&["two-sum"]);
    let mut harness = setup_view_harness_with_storage(ViewKind::Home, storage);

    harness.rebuild_without_effects();
    let html = harness.render();
    assert!(
        html.contains("Loading progress..."),
        "missing placeholder in {html}"
    );

    harness.drive();
    let html = harness.render();
    assert!(
        html.contains("1 of 5 tasks completed"),
        "missing hydrated progress in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn malformed_completion_payload_reads_as_empty() {
    let storage = Storage::in_memory();
    storage.local.write(keys::COMPLETED_TASKS, "not-json");
    let mut harness = setup_view_harness_with_storage(ViewKind::Home, storage);

    harness.rebuild();
    let html = harness.render();
    assert!(
        html.contains("0 of 5 tasks completed"),
        "missing empty progress in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn task_view_keeps_hints_collapsed() {
    let mut harness = setup_view_harness(ViewKind::Task("fizzbuzz"));

    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Hint 1"), "missing first hint toggle in {html}");
    assert!(html.contains("Hint 2"), "missing second hint toggle in {html}");
    assert!(
        !html.contains("modulo operator"),
        "hint body rendered while collapsed in {html}"
    );
    assert!(html.contains("Starter code"), "missing code section in {html}");
    assert!(html.contains("Copy Code"), "missing copy button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn unknown_task_renders_missing_state() {
    let mut harness = setup_view_harness(ViewKind::Task("does-not-exist"));

    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Task not found"), "missing fallback in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn sidebar_highlights_the_open_task() {
    let mut harness = setup_view_harness(ViewKind::Task("word-frequencies"));

    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("task-link--active"), "missing highlight in {html}");
    assert!(html.contains("LRU Cache"), "missing sibling row in {html}");
    assert!(html.contains("Markdown Journal"), "missing sibling row in {html}");
}
