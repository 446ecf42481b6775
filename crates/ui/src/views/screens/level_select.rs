use dioxus::prelude::*;

use quiz_core::model::LevelId;

use crate::vm::LevelCardVm;

#[component]
pub fn LevelSelectScreen(cards: Vec<LevelCardVm>, on_select: EventHandler<LevelId>) -> Element {
    let tiles = cards.into_iter().map(|card| {
        let id = card.id;
        let unlocked = card.unlocked;
        rsx! {
            button {
                key: "{id}",
                class: "{card.class()}",
                disabled: !unlocked,
                onclick: move |_| {
                    if unlocked {
                        on_select.call(id);
                    }
                },
                if !unlocked {
                    span { class: "lock", "🔒" }
                }
                span { class: "level-name", "{card.name}" }
                span { class: "level-star", "★" }
                span { class: "level-rank", "{card.rank}" }
                if card.high_score > 0 {
                    span { class: "level-best", "Best: {card.high_score}" }
                }
            }
        }
    });

    rsx! {
        div { class: "panel level-select",
            h1 { class: "title", "Choose a level" }
            div { class: "level-grid", {tiles} }
        }
    }
}
