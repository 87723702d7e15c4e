//! Action representation: kind + optional target.
//!
//! Players declare what they want to do during a phase as an `ActionUse`.
//! Once validated, the engine stamps it with the current phase and round and
//! buffers it as a `SubmittedAction` until the phase ends.

use serde::{Deserialize, Serialize};

use super::config::Phase;
use super::player::PlayerId;

/// The kinds of action a player can declare.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    /// Guard: protect a player from tonight's kill.
    Protect,
    /// Werewolf: vote for tonight's victim.
    Kill,
    /// Witch: save tonight's victim.
    Antidote,
    /// Witch: poison a player.
    Poison,
    /// Seer: learn a player's camp.
    Check,
    /// Hunter: take someone down on death.
    Shoot,
    /// Hunter: decline to shoot.
    Skip,
    /// Anyone: vote to eliminate during the day.
    Vote,
    /// Anyone: speak during the day.
    Speak,
}

impl ActionKind {
    /// Does this action need a target player?
    #[must_use]
    pub const fn requires_target(self) -> bool {
        !matches!(self, ActionKind::Skip | ActionKind::Speak)
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ActionKind::Protect => "protect",
            ActionKind::Kill => "kill",
            ActionKind::Antidote => "antidote",
            ActionKind::Poison => "poison",
            ActionKind::Check => "check",
            ActionKind::Shoot => "shoot",
            ActionKind::Skip => "skip",
            ActionKind::Vote => "vote",
            ActionKind::Speak => "speak",
        };
        f.write_str(name)
    }
}

/// A player's request to use an action, before validation.
///
/// ## Example
///
/// ```
/// use werewolf_engine::core::{ActionKind, ActionUse};
///
/// let kill = ActionUse::targeted("w1", ActionKind::Kill, "v1");
/// assert_eq!(kill.target.as_ref().map(|t| t.as_str()), Some("v1"));
///
/// let speech = ActionUse::speak("v1", "I am the seer");
/// assert!(speech.target.is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionUse {
    pub player: PlayerId,
    pub kind: ActionKind,
    pub target: Option<PlayerId>,
    /// Free text, only meaningful for `Speak`.
    pub content: Option<String>,
}

impl ActionUse {
    /// Create an action without target.
    pub fn new(player: impl Into<PlayerId>, kind: ActionKind) -> Self {
        Self {
            player: player.into(),
            kind,
            target: None,
            content: None,
        }
    }

    /// Create an action aimed at another player.
    pub fn targeted(
        player: impl Into<PlayerId>,
        kind: ActionKind,
        target: impl Into<PlayerId>,
    ) -> Self {
        Self::new(player, kind).with_target(target)
    }

    /// Create a speech action.
    pub fn speak(player: impl Into<PlayerId>, content: impl Into<String>) -> Self {
        Self::new(player, ActionKind::Speak).with_content(content)
    }

    #[must_use]
    pub fn with_target(mut self, target: impl Into<PlayerId>) -> Self {
        self.target = Some(target.into());
        self
    }

    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }
}

/// A validated action, buffered until its phase ends.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedAction {
    pub player: PlayerId,
    pub kind: ActionKind,
    pub target: Option<PlayerId>,
    pub content: Option<String>,
    /// Phase the action was submitted in.
    pub phase: Phase,
    /// Round the action was submitted in.
    pub round: u32,
}

impl SubmittedAction {
    /// Stamp a validated request with its phase and round.
    pub fn stamp(action: ActionUse, phase: Phase, round: u32) -> Self {
        Self {
            player: action.player,
            kind: action.kind,
            target: action.target,
            content: action.content,
            phase,
            round,
        }
    }

    /// Convenience constructor used by resolver tests and replays.
    pub fn new(
        player: impl Into<PlayerId>,
        kind: ActionKind,
        target: Option<&str>,
        phase: Phase,
        round: u32,
    ) -> Self {
        Self {
            player: player.into(),
            kind,
            target: target.map(PlayerId::from),
            content: None,
            phase,
            round,
        }
    }
}
