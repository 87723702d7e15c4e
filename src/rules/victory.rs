//! Win conditions.
//!
//! Victory only depends on who is alive right now, never on history.

use serde::{Deserialize, Serialize};

use crate::core::Camp;

/// Result of a finished game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Victory {
    /// Every evil player is dead.
    Good,
    /// Evil players are at least as many as good players.
    Evil,
}

impl Victory {
    /// The camp that won.
    #[must_use]
    pub const fn camp(self) -> Camp {
        match self {
            Victory::Good => Camp::Good,
            Victory::Evil => Camp::Evil,
        }
    }

    /// Check if a camp won.
    #[must_use]
    pub fn is_winner(self, camp: Camp) -> bool {
        self.camp() == camp
    }
}

impl std::fmt::Display for Victory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} wins", self.camp())
    }
}

/// Evaluate the win condition from alive counts.
///
/// Good wins as soon as no evil player is alive; this includes an empty
/// roster. Otherwise evil wins once good players no longer outnumber them.
#[must_use]
pub fn check_victory(good_alive: usize, evil_alive: usize) -> Option<Victory> {
    if evil_alive == 0 {
        Some(Victory::Good)
    } else if good_alive <= evil_alive {
        Some(Victory::Evil)
    } else {
        None
    }
}
