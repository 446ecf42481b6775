//! Audio playback through the webview's `HTMLAudioElement`.

use dioxus::document::eval;
use services::{AudioClip, AudioError, AudioPlayer, PlaybackMode};

const BACKGROUND_URL: &str = "https://cdn.pixabay.com/audio/2022/11/17/audio_87a826c75c.mp3";
const SUCCESS_URL: &str = "https://cdn.pixabay.com/audio/2022/03/15/audio_221d640474.mp3";
const FAILURE_URL: &str = "https://cdn.pixabay.com/audio/2021/08/04/audio_c6f2e90a6e.mp3";

const BACKGROUND_VOLUME: f32 = 0.1;
const CUE_VOLUME: f32 = 1.0;

/// Plays clips inside the desktop webview.
///
/// Each clip gets one cached `Audio` element, so replaying a cue restarts it
/// instead of stacking copies. Autoplay rejections are reported to the
/// webview console only.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebviewAudio;

impl WebviewAudio {
    fn dispatch(clip: AudioClip, mode: PlaybackMode) -> Result<(), AudioError> {
        let script = playback_script(clip, mode);
        // Fire and forget; the returned handle is only needed to read results.
        let _ = eval(&script);
        Ok(())
    }
}

impl AudioPlayer for WebviewAudio {
    fn play_loop(&self, clip: AudioClip) -> Result<(), AudioError> {
        Self::dispatch(clip, PlaybackMode::Loop)
    }

    fn play_once(&self, clip: AudioClip) -> Result<(), AudioError> {
        Self::dispatch(clip, PlaybackMode::Once)
    }
}

fn clip_source(clip: AudioClip) -> (&'static str, &'static str, f32) {
    match clip {
        AudioClip::Background => ("background", BACKGROUND_URL, BACKGROUND_VOLUME),
        AudioClip::Success => ("success", SUCCESS_URL, CUE_VOLUME),
        AudioClip::Failure => ("failure", FAILURE_URL, CUE_VOLUME),
    }
}

pub(crate) fn playback_script(clip: AudioClip, mode: PlaybackMode) -> String {
    let (key, url, volume) = clip_source(clip);
    let looping = mode == PlaybackMode::Loop;
    format!(
        r#"(function() {{
            const clips = window.__quizAudio || (window.__quizAudio = {{}});
            let el = clips[{key:?}];
            if (!el) {{
                el = new Audio({url:?});
                el.preload = "auto";
                clips[{key:?}] = el;
            }}
            el.loop = {looping};
            el.volume = {volume};
            if (!el.loop) {{
                el.currentTime = 0;
            }} else if (!el.paused) {{
                return;
            }}
            el.play().catch((e) => console.error("Audio play failed:", e));
        }})();"#,
    )
}
