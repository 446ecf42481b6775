mod end;
mod game;
mod level_select;
mod start;

pub use end::EndScreen;
pub use game::GameScreen;
pub use level_select::LevelSelectScreen;
pub use start::StartScreen;
