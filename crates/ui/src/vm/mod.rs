mod end_vm;
mod game_vm;
mod level_vm;
mod rules_vm;

pub use end_vm::{EndVm, end_message};
pub use game_vm::{FeedbackVm, GameVm, OptionState, OptionVm, TIMER_WARNING_SECS, map_game};
pub use level_vm::{LevelCardVm, map_level_cards};
pub use rules_vm::how_to_play_lines;
