use std::io;
use std::process::Command;

use super::UiLinkOpener;

/// Opens links in the system browser.
pub struct DesktopLinkOpener;

impl UiLinkOpener for DesktopLinkOpener {
    fn open_url(&self, url: &str) {
        let url = url.trim();
        if url.is_empty() {
            return;
        }
        if let Err(err) = spawn_browser(url) {
            tracing::warn!(%url, error = %err, "failed to open link");
        }
    }
}

#[cfg(target_os = "macos")]
fn spawn_browser(url: &str) -> io::Result<()> {
    Command::new("open").arg(url).spawn().map(drop)
}

#[cfg(target_os = "windows")]
fn spawn_browser(url: &str) -> io::Result<()> {
    Command::new("cmd")
        .args(["/C", "start", "", url])
        .spawn()
        .map(drop)
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn spawn_browser(url: &str) -> io::Result<()> {
    Command::new("xdg-open").arg(url).spawn().map(drop)
}
