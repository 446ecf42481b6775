pub mod app;
pub mod audio;
pub mod context;
pub mod platform;
pub mod views;
pub mod vm;

pub use app::App;
pub use audio::WebviewAudio;
pub use context::{AppContext, UiApp, build_app_context};
pub use platform::{DesktopLinkOpener, LinkOpenerRef, UiLinkOpener};
