use crossterm::event::KeyCode;

use crate::sort::SortMode;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    SetSort(SortMode),
    OpenKillPrompt,
    /// A key routed to the open kill dialog.
    PromptKey(KeyCode),
    None,
}
