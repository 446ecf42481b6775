use dioxus::prelude::*;

use crate::vm::GameVm;

const RING_PATH: &str =
    "M18 2.0845 a 15.9155 15.9155 0 0 1 0 31.831 a 15.9155 15.9155 0 0 1 0 -31.831";

fn feedback_class(positive: bool) -> &'static str {
    if positive {
        "feedback positive"
    } else {
        "feedback negative"
    }
}

#[component]
pub fn GameScreen(vm: GameVm, on_answer: EventHandler<u32>, on_next: EventHandler<()>) -> Element {
    let answered = vm.answered;
    let ring_class = if vm.timer_warning {
        "ring-value warning"
    } else {
        "ring-value"
    };
    let buttons = vm.options.iter().map(|option| {
        let value = option.value;
        rsx! {
            button {
                key: "{option.label}",
                class: "{option.state.class()}",
                disabled: answered,
                onclick: move |_| on_answer.call(value),
                span { class: "option-label", "{option.label}" }
                span { class: "option-value", "{option.value}" }
            }
        }
    });

    rsx! {
        div { class: "panel game-screen",
            div { class: "game-header",
                span { class: "question-label", "{vm.question_label}" }
                span { class: "score-label", "Score: {vm.score}" }
            }
            div { class: "progress-track",
                div { class: "progress-fill", style: "width: {vm.progress_percent}%" }
            }
            div { class: "timer",
                svg { class: "timer-ring", view_box: "0 0 36 36",
                    path { class: "ring-track", d: RING_PATH, fill: "none", stroke_width: "3" }
                    path {
                        class: "{ring_class}",
                        d: RING_PATH,
                        fill: "none",
                        stroke_width: "3",
                        stroke_dasharray: "{vm.timer_percent}, 100",
                    }
                }
                span { class: "timer-value", "{vm.seconds_left}" }
            }
            div { class: "prompt",
                h2 { "{vm.prompt}" }
            }
            div { class: "options", {buttons} }
            if let Some(feedback) = vm.feedback.as_ref() {
                div { class: "feedback-row",
                    p { class: feedback_class(feedback.positive), "{feedback.text}" }
                    button {
                        id: "next-button",
                        class: "btn btn-next",
                        onclick: move |_| on_next.call(()),
                        "{vm.next_label}"
                    }
                }
            }
        }
    }
}
