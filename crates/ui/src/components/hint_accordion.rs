use dioxus::prelude::*;

/// Collapsible hint list: zero or one hint open at a time. Renders
/// nothing when the task has no hints.
#[component]
pub fn HintAccordion(hints: Vec<String>) -> Element {
    let mut expanded = use_signal(|| None::<usize>);

    if hints.is_empty() {
        return rsx! {};
    }

    let numbered: Vec<(usize, String)> = hints
        .into_iter()
        .enumerate()
        .map(|(index, hint)| (index + 1, hint))
        .collect();

    rsx! {
        section { class: "hints",
            header { class: "hints-header",
                h3 { "Hints" }
            }
            div { class: "hints-body",
                for (number, hint) in numbered {
                    div { class: "hint",
                        button {
                            class: if expanded() == Some(number) { "hint-toggle hint-toggle--open" } else { "hint-toggle" },
                            r#type: "button",
                            aria_expanded: if expanded() == Some(number) { "true" } else { "false" },
                            onclick: move |_| {
                                if expanded() == Some(number) {
                                    expanded.set(None);
                                } else {
                                    expanded.set(Some(number));
                                }
                            },
                            span { class: "hint-label", "Hint {number}" }
                            span { class: "hint-caret" }
                        }
                        if expanded() == Some(number) {
                            div { class: "hint-text", "{hint}" }
                        }
                    }
                }
            }
        }
    }
}
