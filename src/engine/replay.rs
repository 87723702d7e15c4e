//! Replay logs.
//!
//! A replay log is everything needed to rebuild a game: the configuration,
//! the roster, and the actions buffered in each phase that ended. Because
//! resolvers are pure, re-running the log reproduces the same state and the
//! same effects.

use serde::{Deserialize, Serialize};

use crate::core::{Camp, GameConfig, Phase, PlayerId, Role, SubmittedAction};
use crate::error::{EngineError, EngineResult};

/// One roster entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub id: PlayerId,
    pub role: Role,
    pub camp: Camp,
}

/// Actions resolved when a phase ended.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseRecord {
    pub phase: Phase,
    pub round: u32,
    pub actions: Vec<SubmittedAction>,
}

/// Recorded history of a game.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayLog {
    pub config: GameConfig,
    pub roster: Vec<RosterEntry>,
    pub started: bool,
    pub phases: Vec<PhaseRecord>,
}

impl ReplayLog {
    /// Start an empty log for a configuration.
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub(crate) fn record_player(&mut self, id: PlayerId, role: Role, camp: Camp) {
        self.roster.push(RosterEntry { id, role, camp });
    }

    pub(crate) fn record_start(&mut self) {
        self.started = true;
    }

    pub(crate) fn record_phase(&mut self, phase: Phase, round: u32, actions: Vec<SubmittedAction>) {
        self.phases.push(PhaseRecord {
            phase,
            round,
            actions,
        });
    }

    /// Encode with bincode.
    pub fn to_bytes(&self) -> EngineResult<Vec<u8>> {
        bincode::serialize(self).map_err(|e| EngineError::Replay(e.to_string()))
    }

    /// Decode a log produced by `to_bytes`.
    pub fn from_bytes(bytes: &[u8]) -> EngineResult<Self> {
        bincode::deserialize(bytes).map_err(|e| EngineError::Replay(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ActionKind;

    #[test]
    fn test_bytes() {
        let mut log = ReplayLog::new(GameConfig::standard());
        log.record_player(PlayerId::new("w1"), Role::Werewolf, Camp::Evil);
        log.record_start();
        log.record_phase(
            Phase::NightWolf,
            1,
            vec![SubmittedAction::new("w1", ActionKind::Kill, Some("v1"), Phase::NightWolf, 1)],
        );

        let bytes = log.to_bytes().unwrap();
        assert_eq!(ReplayLog::from_bytes(&bytes).unwrap(), log);
    }

    #[test]
    fn test_garbage_is_an_error() {
        let result = ReplayLog::from_bytes(&[0xff, 0x01]);
        assert!(matches!(result, Err(EngineError::Replay(_))));
    }
}
