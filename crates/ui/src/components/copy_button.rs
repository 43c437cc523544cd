use std::sync::Arc;
use std::time::Duration;

use dioxus::prelude::*;

use services::COPY_FEEDBACK_WINDOW_SECS;

use crate::context::AppContext;

/// Copies the task's starter code and shows "Copied!" for the feedback
/// window. A failed clipboard write is logged by the service; the button
/// simply never flips. A later copy supersedes the earlier revert timer.
#[component]
pub fn CopyButton(code: String) -> Element {
    let ctx = use_context::<AppContext>();
    let mut copied = use_signal(|| false);

    let feedback = ctx.copy_feedback();
    rsx! {
        button {
            class: if copied() { "copy-button copy-button--copied" } else { "copy-button" },
            r#type: "button",
            disabled: copied(),
            aria_label: if copied() { "Code copied to clipboard" } else { "Copy code to clipboard" },
            onclick: move |_| {
                if !feedback.copy(&code) {
                    return;
                }
                copied.set(true);
                let feedback = Arc::clone(&feedback);
                spawn(async move {
                    tokio::time::sleep(Duration::from_secs(
                        COPY_FEEDBACK_WINDOW_SECS.unsigned_abs(),
                    ))
                    .await;
                    if !feedback.is_copied() {
                        copied.set(false);
                    }
                });
            },
            if copied() { "Copied!" } else { "Copy Code" }
        }
    }
}
