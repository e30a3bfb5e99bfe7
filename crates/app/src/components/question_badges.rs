use dioxus::prelude::*;

/// Korean label and badge variant for a difficulty level.
pub fn difficulty(level: i32) -> (&'static str, &'static str) {
    match level {
        ..=3 => ("쉬움", "success"),
        4..=7 => ("보통", "warning"),
        8..=10 => ("어려움", "error"),
        _ => ("매우 어려움", "secondary"),
    }
}

/// Whole-number percentage, 0 for an empty list.
pub fn progress_percent(passed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((passed as f64 / total as f64) * 100.0).round() as u32
}

#[component]
pub fn DifficultyBadge(level: Option<i32>) -> Element {
    let Some(level) = level else {
        return rsx! {};
    };
    let (label, variant) = difficulty(level);
    rsx! {
        span { class: "badge {variant}", "Lv.{level} {label}" }
    }
}

#[component]
pub fn PassBadge(passed: bool) -> Element {
    rsx! {
        span { class: if passed { "badge success" } else { "badge" },
            if passed { "통과" } else { "미통과" }
        }
    }
}
