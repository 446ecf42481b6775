use std::sync::{Arc, Mutex};

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use quiz_core::model::{ProgressRecord, QuizRules};
use services::{AppServices, AudioPlayer, RecordingAudio, ShellEvent};
use storage::repository::Storage;

use crate::context::{UiApp, build_app_context};
use crate::platform::{LinkOpenerRef, UiLinkOpener};
use crate::views::ShellView;
use crate::views::UiIntent;
use crate::views::shell::ShellTestHandles;

#[derive(Clone, Default)]
pub struct RecordingLinks {
    opened: Arc<Mutex<Vec<String>>>,
}

impl RecordingLinks {
    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

impl UiLinkOpener for RecordingLinks {
    fn open_url(&self, url: &str) {
        self.opened.lock().unwrap().push(url.to_owned());
    }
}

struct TestApp {
    services: AppServices,
    progress: ProgressRecord,
    audio: RecordingAudio,
    links: RecordingLinks,
}

impl UiApp for TestApp {
    fn services(&self) -> AppServices {
        self.services.clone()
    }

    fn initial_progress(&self) -> ProgressRecord {
        self.progress.clone()
    }

    fn audio(&self) -> Arc<dyn AudioPlayer> {
        Arc::new(self.audio.clone())
    }

    fn link_opener(&self) -> LinkOpenerRef {
        Arc::new(self.links.clone())
    }

    fn seed(&self) -> Option<u64> {
        Some(7)
    }
}

#[derive(Props, Clone)]
struct ShellHarnessProps {
    app: Arc<TestApp>,
    handles: ShellTestHandles,
}

impl PartialEq for ShellHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ShellHarness(props: ShellHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.handles.clone());
    rsx! { ShellView {} }
}

pub struct ShellViewHarness {
    pub dom: VirtualDom,
    pub storage: Storage,
    pub audio: RecordingAudio,
    pub links: RecordingLinks,
    handles: ShellTestHandles,
}

impl ShellViewHarness {
    pub fn send(&mut self, event: ShellEvent) {
        self.intent(UiIntent::Shell(event));
    }

    pub fn intent(&mut self, intent: UiIntent) {
        let dispatch = self.handles.dispatch();
        self.dom.in_runtime(|| dispatch.call(intent));
        drive_dom(&mut self.dom);
    }

    /// Run `f` against the shell state without subscribing to it.
    pub fn with_shell<T>(&self, f: impl FnOnce(&services::AppShell) -> T) -> T {
        let shell = self.handles.shell();
        self.dom.in_runtime(|| f(&shell.peek()))
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_shell_harness(progress: ProgressRecord) -> ShellViewHarness {
    let storage = Storage::in_memory();
    let services =
        AppServices::from_storage(&storage, QuizRules::default()).expect("standard services");
    let audio = RecordingAudio::new();
    let links = RecordingLinks::default();
    let handles = ShellTestHandles::default();

    let app = Arc::new(TestApp {
        services,
        progress,
        audio: audio.clone(),
        links: links.clone(),
    });
    let mut dom = VirtualDom::new_with_props(
        ShellHarness,
        ShellHarnessProps {
            app,
            handles: handles.clone(),
        },
    );
    dom.rebuild_in_place();
    drive_dom(&mut dom);

    ShellViewHarness {
        dom,
        storage,
        audio,
        links,
        handles,
    }
}
