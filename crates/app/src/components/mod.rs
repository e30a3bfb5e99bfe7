mod code_editor;
mod question_badges;
mod status;

pub use code_editor::{starter_code, CodeEditor, LanguageSelect};
pub use question_badges::{progress_percent, DifficultyBadge, PassBadge};
pub use status::{ErrorBanner, Loading};
