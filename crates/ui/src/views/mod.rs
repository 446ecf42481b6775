mod screens;
mod shell;

pub use screens::{EndScreen, GameScreen, LevelSelectScreen, StartScreen};
pub use shell::{ShellView, TUTOR_URL, UiIntent};

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;
