//! Input collaborator: yields one `InputSnapshot` per frame.

use tankcombat_core::commands::InputSnapshot;

pub trait InputProvider {
    /// Input state for the frame about to run.
    fn poll(&mut self) -> InputSnapshot;
}

/// Provider that never presses anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdleInput;

impl InputProvider for IdleInput {
    fn poll(&mut self) -> InputSnapshot {
        InputSnapshot::default()
    }
}

/// Replays a fixed list of snapshots, then idles.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: Vec<InputSnapshot>,
    cursor: usize,
}

impl ScriptedInput {
    pub fn new(frames: Vec<InputSnapshot>) -> Self {
        Self { frames, cursor: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.frames.len().saturating_sub(self.cursor)
    }
}

impl InputProvider for ScriptedInput {
    fn poll(&mut self) -> InputSnapshot {
        let snapshot = self.frames.get(self.cursor).cloned().unwrap_or_default();
        self.cursor = (self.cursor + 1).min(self.frames.len());
        snapshot
    }
}
