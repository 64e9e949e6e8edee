//! Navigation
//!
//! Derived flags and cursor moves. Moves at either end of the queue are
//! no-ops; there is no repeat or wrap-around.

use crate::queue::{Change, QueueState};

/// Whether the cursor can advance
pub fn can_go_forward(position: Option<usize>, len: usize) -> bool {
    matches!(position, Some(position) if position + 1 < len)
}

/// Whether the cursor can retreat
pub fn can_go_backward(position: Option<usize>) -> bool {
    matches!(position, Some(position) if position > 0)
}

impl QueueState {
    /// Whether `skip_forward` would move
    pub fn can_go_forward(&self) -> bool {
        can_go_forward(self.position(), self.len())
    }

    /// Whether `skip_backward` would move
    pub fn can_go_backward(&self) -> bool {
        can_go_backward(self.position())
    }

    /// Advance one entry in active order
    pub fn skip_forward(&mut self) -> Change {
        match self.position() {
            Some(position) if self.can_go_forward() => {
                self.move_cursor(position + 1);
                Change::Moved
            }
            _ => Change::Unchanged,
        }
    }

    /// Retreat one entry in active order
    pub fn skip_backward(&mut self) -> Change {
        match self.position() {
            Some(position) if self.can_go_backward() => {
                self.move_cursor(position - 1);
                Change::Moved
            }
            _ => Change::Unchanged,
        }
    }
}
