//! Error types for the engine's public operations.
//!
//! Validation failures are ordinary values. Rule violations found while a
//! phase resolves are not errors; they show up as canceled effects.

use thiserror::Error;

use crate::core::{ActionKind, Phase, PlayerId};

/// Errors returned by engine and state operations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The acting player is not on the roster.
    #[error("player not found: {0}")]
    PlayerNotFound(PlayerId),

    /// The acting player is dead.
    #[error("player is dead: {0}")]
    PlayerDead(PlayerId),

    /// The player's role may not use this action in this phase.
    #[error("{player} cannot use {action} during {phase}")]
    SkillNotAllowed {
        player: PlayerId,
        action: ActionKind,
        phase: Phase,
    },

    /// The action needs a target and none was given.
    #[error("{action} requires a target")]
    MissingTarget { action: ActionKind },

    /// The target is not on the roster.
    #[error("target not found: {0}")]
    TargetNotFound(PlayerId),

    /// The target is dead.
    #[error("target is dead: {0}")]
    TargetDead(PlayerId),

    /// The game has not been started.
    #[error("game not started")]
    GameNotStarted,

    /// The game is over.
    #[error("game already ended")]
    GameEnded,

    /// The roster is frozen once the game starts.
    #[error("game already started")]
    GameAlreadyStarted,

    /// A player with this id already exists.
    #[error("duplicate player: {0}")]
    DuplicatePlayer(PlayerId),

    /// The operation is not valid in the current phase.
    #[error("invalid phase: expected {expected}, currently {actual}")]
    InvalidPhase { expected: String, actual: Phase },

    /// Chat is not permitted for this player right now.
    #[error("{player} may not send messages during {phase}")]
    MessageNotAllowed { player: PlayerId, phase: Phase },

    /// The number of roles dealt does not match the number of players.
    #[error("cannot deal {roles} roles to {players} players")]
    RosterMismatch { players: usize, roles: usize },

    /// A replay log could not be decoded or re-run.
    #[error("replay error: {0}")]
    Replay(String),
}

/// Result alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = EngineError::SkillNotAllowed {
            player: PlayerId::new("v1"),
            action: ActionKind::Kill,
            phase: Phase::NightWolf,
        };
        assert_eq!(err.to_string(), "v1 cannot use kill during night-wolf");

        let err = EngineError::InvalidPhase {
            expected: "a night sub-phase".to_string(),
            actual: Phase::Day,
        };
        assert_eq!(err.to_string(), "invalid phase: expected a night sub-phase, currently day");
    }
}
