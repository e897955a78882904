use crate::command::Command;
use crate::state::DrawState;

/// Append-only command log with a cursor implementing undo/redo.
///
/// The log only ever grows from the front: `entries[..cursor]` is the visible
/// document, `entries[cursor..]` is the redo future. Undo and redo move the
/// cursor without touching entries; appending while the cursor sits mid-log
/// truncates the future first, so redo history is linear.
///
/// `floor` is a lower bound on the cursor, pinned once after session setup so
/// undo can never strip the initial background and clear entries.
#[derive(Debug, Default)]
pub struct CommandHistory {
    entries: Vec<Command>,
    cursor: usize,
    floor: usize,
}

impl CommandHistory {
    /// Creates an empty log with the cursor and floor at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `command` at the cursor, discarding any undone future.
    ///
    /// After a push the cursor is at the end of the log and `can_redo` is
    /// false.
    pub fn push(&mut self, command: Command) {
        self.entries.truncate(self.cursor);
        self.entries.push(command);
        self.cursor = self.entries.len();
    }

    /// Fixes the current cursor position as the permanent undo floor.
    ///
    /// Called once when a session starts; the floor never moves again, even
    /// across later clears.
    pub fn pin_floor(&mut self) {
        self.floor = self.cursor;
    }

    /// Moves the cursor one entry back. No-op at the floor.
    pub fn undo(&mut self) {
        if self.can_undo() {
            self.cursor -= 1;
        }
    }

    /// Moves the cursor one entry forward. No-op at the end of the log.
    pub fn redo(&mut self) {
        if self.can_redo() {
            self.cursor += 1;
        }
    }

    /// True if the cursor is above the floor.
    pub fn can_undo(&self) -> bool {
        self.cursor > self.floor
    }

    /// True if undone entries remain past the cursor.
    pub fn can_redo(&self) -> bool {
        self.cursor < self.entries.len()
    }

    /// The visible prefix of the log, `entries[..cursor]`.
    pub fn visible(&self) -> &[Command] {
        &self.entries[..self.cursor]
    }

    /// The whole log, undone future included.
    pub fn entries(&self) -> &[Command] {
        &self.entries
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn floor(&self) -> usize {
        self.floor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Folds the visible prefix into the style it leaves active.
    pub fn fold_visible(&self) -> DrawState {
        fold_state(self.visible(), DrawState::default())
    }
}

/// Replays only the style changes in `commands`, starting from `seed`.
///
/// Entry order is the only thing that matters: the last `SetState` wins and
/// every other entry kind is skipped. This is how the current style is
/// recovered after the cursor moves.
pub fn fold_state(commands: &[Command], seed: DrawState) -> DrawState {
    commands.iter().fold(seed, |state, command| match command {
        Command::SetState(next) => *next,
        _ => state,
    })
}
