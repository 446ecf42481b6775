use std::sync::Arc;
use std::time::Duration;

use dioxus::prelude::*;

use services::{Screen, ShellEvent};

use crate::context::AppContext;
use crate::views::screens::{EndScreen, GameScreen, LevelSelectScreen, StartScreen};
use crate::vm::{EndVm, map_game, map_level_cards};

#[cfg(test)]
use services::AppShell;
#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

/// External page behind the start screen's tutor button.
pub const TUTOR_URL: &str = "https://roboki.vn/g/67ddbd59923d0072befa1365";

const TICK_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiIntent {
    Shell(ShellEvent),
    OpenTutor,
}

/// Root view: renders whatever screen the shell holds and feeds user input
/// and clock ticks back into it.
#[component]
pub fn ShellView() -> Element {
    let ctx = use_context::<AppContext>();
    let rules = ctx.rules();
    let mut shell = use_signal({
        let ctx = ctx.clone();
        move || ctx.new_shell()
    });

    // Restarted whenever a transition may have reset the countdown, so the
    // first tick of a question lands a full interval after it appears.
    let mut ticker = use_future(move || async move {
        loop {
            tokio::time::sleep(TICK_INTERVAL).await;
            if !shell.peek().is_ticking() {
                continue;
            }
            if let Err(err) = shell.write().transition(ShellEvent::Tick) {
                tracing::debug!(error = %err, "tick ignored");
            }
        }
    });

    let dispatch = {
        let progress = ctx.progress();
        let link_opener = ctx.link_opener();
        use_callback(move |intent: UiIntent| {
            let event = match intent {
                UiIntent::Shell(event) => event,
                UiIntent::OpenTutor => {
                    link_opener.open_url(TUTOR_URL);
                    return;
                }
            };

            let result = shell.write().transition(event);
            match result {
                Ok(transition) => {
                    if event != ShellEvent::Tick {
                        ticker.restart();
                    }
                    if !transition.writes.is_empty() {
                        let progress = Arc::clone(&progress);
                        spawn(async move {
                            progress.commit(&transition.writes).await;
                            tracing::debug!(
                                writes = transition.writes.len(),
                                "progress committed"
                            );
                        });
                    }
                }
                Err(err) => {
                    tracing::debug!(?event, error = %err, "shell event ignored");
                }
            }
        })
    };

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<ShellTestHandles>() {
                handles.register(dispatch, shell);
            }
        }
    }

    let send = move |event: ShellEvent| dispatch.call(UiIntent::Shell(event));
    let shell_guard = shell.read();
    let screen = match shell_guard.screen() {
        Screen::Start => rsx! {
            StartScreen {
                rules,
                on_start: move |()| send(ShellEvent::Start),
                on_open_tutor: move |()| dispatch.call(UiIntent::OpenTutor),
            }
        },
        Screen::LevelSelect => {
            let cards = map_level_cards(shell_guard.catalog(), shell_guard.progress());
            rsx! {
                LevelSelectScreen {
                    cards,
                    on_select: move |id| send(ShellEvent::SelectLevel(id)),
                }
            }
        }
        Screen::Game(session) => match map_game(session) {
            Some(vm) => rsx! {
                GameScreen {
                    vm,
                    on_answer: move |value| send(ShellEvent::Answer(value)),
                    on_next: move |()| send(ShellEvent::Advance),
                }
            },
            None => rsx! {
                p { class: "loading", "Loading questions..." }
            },
        },
        Screen::End(summary) => {
            let vm = EndVm::new(summary, &rules);
            rsx! {
                EndScreen {
                    vm,
                    on_play_again: move |()| send(ShellEvent::PlayAgain),
                    on_next_level: move |()| send(ShellEvent::NextLevel),
                    on_back: move |()| send(ShellEvent::BackToLevels),
                }
            }
        }
    };

    rsx! {
        div { class: "shell", {screen} }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct ShellTestHandles {
    dispatch: Rc<RefCell<Option<Callback<UiIntent>>>>,
    shell: Rc<RefCell<Option<Signal<AppShell>>>>,
}

#[cfg(test)]
impl ShellTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<UiIntent>, shell: Signal<AppShell>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.shell.borrow_mut() = Some(shell);
    }

    pub(crate) fn dispatch(&self) -> Callback<UiIntent> {
        (*self.dispatch.borrow()).expect("shell dispatch registered")
    }

    pub(crate) fn shell(&self) -> Signal<AppShell> {
        (*self.shell.borrow()).expect("shell signal registered")
    }
}
