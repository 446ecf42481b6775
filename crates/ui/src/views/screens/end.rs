use dioxus::prelude::*;

use crate::vm::EndVm;

#[component]
pub fn EndScreen(
    vm: EndVm,
    on_play_again: EventHandler<()>,
    on_next_level: EventHandler<()>,
    on_back: EventHandler<()>,
) -> Element {
    rsx! {
        div { class: "panel end-screen",
            div { class: "trophy", "🏆" }
            h1 { class: "title", "{vm.message}" }
            p { class: "completed", "You finished {vm.level_name}!" }
            div { class: "score-box",
                p { "Your score" }
                p { class: "score-value", "{vm.score_label}" }
                p { "Best score: {vm.high_score}" }
            }
            p { class: "rank",
                "You earned the rank: "
                span { class: "rank-name", "{vm.rank}" }
            }
            div { class: "actions",
                button {
                    id: "play-again-button",
                    class: "btn btn-start",
                    onclick: move |_| on_play_again.call(()),
                    "Play again"
                }
                if vm.can_advance {
                    button {
                        id: "next-level-button",
                        class: "btn btn-next",
                        onclick: move |_| on_next_level.call(()),
                        "Next level"
                    }
                }
                button {
                    id: "levels-button",
                    class: "btn btn-secondary",
                    onclick: move |_| on_back.call(()),
                    "Choose level"
                }
            }
        }
    }
}
