//! Document scripts for the sidebar's scroll handling.
//!
//! The scrollable region is `#task-scroll`; the current task's row carries
//! the `task-link--active` class.

use services::ScrollPlan;

/// Returns the scroll container's current offset.
pub(crate) const READ_SCROLL_TOP: &str = r#"
    const el = document.getElementById("task-scroll");
    return el ? el.scrollTop : 0;
"#;

fn restore_scroll_script(offset: u32) -> String {
    format!(
        r#"
        const el = document.getElementById("task-scroll");
        if (el) {{ el.scrollTop = {offset}; }}
        "#
    )
}

/// Centers the active row. True DOM centering when the row is found;
/// otherwise the offset computed from the list geometry.
fn center_current_script(fallback_offset: u32) -> String {
    format!(
        r#"
        const el = document.getElementById("task-scroll");
        if (el) {{
            const active = el.querySelector(".task-link--active");
            if (active && active.scrollIntoView) {{
                active.scrollIntoView({{ block: "center" }});
            }} else {{
                el.scrollTop = {fallback_offset};
            }}
        }}
        "#
    )
}

/// Translates a mount-time scroll plan into a script, if any movement is
/// needed.
pub(crate) fn scroll_plan_script(plan: &ScrollPlan) -> Option<String> {
    match plan {
        ScrollPlan::Restore(offset) => Some(restore_scroll_script(*offset)),
        ScrollPlan::CenterCurrent(offset) => Some(center_current_script(*offset)),
        ScrollPlan::Top => None,
    }
}
