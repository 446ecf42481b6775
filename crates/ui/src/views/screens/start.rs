use dioxus::prelude::*;

use quiz_core::model::QuizRules;

use crate::vm::how_to_play_lines;

#[component]
pub fn StartScreen(
    rules: QuizRules,
    on_start: EventHandler<()>,
    on_open_tutor: EventHandler<()>,
) -> Element {
    let mut show_help = use_signal(|| false);

    rsx! {
        div { class: "panel start-screen",
            div { class: "stars",
                for i in 0..5 {
                    span { key: "{i}", class: star_class(i), "★" }
                }
            }
            h1 { class: "title", "Math Challenge" }
            div { class: "menu",
                button {
                    id: "start-button",
                    class: "btn btn-start",
                    onclick: move |_| on_start.call(()),
                    "Start"
                }
                button {
                    id: "help-button",
                    class: "btn btn-help",
                    onclick: move |_| show_help.set(true),
                    "How to play"
                }
                button {
                    id: "tutor-button",
                    class: "btn btn-tutor",
                    onclick: move |_| on_open_tutor.call(()),
                    "Primary school tutor"
                }
            }
            if show_help() {
                HowToPlayModal {
                    rules,
                    on_close: move |()| show_help.set(false),
                }
            }
        }
    }
}

fn star_class(index: usize) -> &'static str {
    if index == 2 {
        "star big"
    } else {
        "star"
    }
}

#[component]
fn HowToPlayModal(rules: QuizRules, on_close: EventHandler<()>) -> Element {
    let lines = how_to_play_lines(&rules);

    rsx! {
        div { class: "modal-backdrop",
            div { class: "modal", role: "dialog",
                h2 { "How to play" }
                ul {
                    for line in lines {
                        li { key: "{line}", "{line}" }
                    }
                }
                button {
                    class: "btn btn-confirm",
                    onclick: move |_| on_close.call(()),
                    "Got it!"
                }
            }
        }
    }
}
