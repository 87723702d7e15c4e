//! Effect definitions.
//!
//! An effect is a typed mutation intent produced by a resolver and applied
//! to `GameState` exactly once. Effects can be canceled with a reason; a
//! canceled effect records an attempt that was not allowed and never
//! changes state.

use serde::{Deserialize, Serialize};

use crate::core::{Camp, PlayerId};

/// What an effect does when applied.
///
/// ## Kill-class
///
/// `Kill`, `Poison`, `VoteEliminate` and `HunterShoot` mark the target dead.
///
/// ## Round bookkeeping
///
/// `Protect`, `SetNightKill`, `ClearNightKill`, `UsePoison`,
/// `HunterTriggered`, `ClearHunterTrigger` write the round context.
///
/// ## Player bookkeeping
///
/// `Save`, `SetLastProtected`, `UseAntidote`, `UsePoison` write player
/// records.
///
/// ## Informational
///
/// `SeerCheck` and `HunterSkip` carry results but change nothing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectKind {
    /// Night kill landing on its victim.
    Kill,
    /// Poison death landing on its victim.
    Poison,
    /// Day elimination by vote.
    VoteEliminate { votes: u32 },
    /// Hunter's dying shot.
    HunterShoot,
    /// Guard protection for this round.
    Protect,
    /// Witch's antidote restoring the night victim.
    Save,
    /// Wolves agreed on a victim.
    SetNightKill { votes: u32 },
    /// The night victim was saved.
    ClearNightKill,
    /// Remember the guard's target for the anti-repeat rule.
    SetLastProtected,
    /// Witch spent the antidote.
    UseAntidote,
    /// Witch spent the poison on the target.
    UsePoison,
    /// A hunter died and may shoot.
    HunterTriggered,
    /// The pending hunter shot has been handled.
    ClearHunterTrigger,
    /// Seer learned the target's camp.
    SeerCheck { camp: Camp, is_good: bool },
    /// Hunter declined to shoot.
    HunterSkip,
}

impl EffectKind {
    /// Does applying this effect kill its target?
    #[must_use]
    pub fn is_death(&self) -> bool {
        matches!(
            self,
            EffectKind::Kill
                | EffectKind::Poison
                | EffectKind::VoteEliminate { .. }
                | EffectKind::HunterShoot
        )
    }

    /// Engine bookkeeping that is never announced to observers.
    #[must_use]
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            EffectKind::Protect
                | EffectKind::Save
                | EffectKind::ClearNightKill
                | EffectKind::SetLastProtected
                | EffectKind::UseAntidote
                | EffectKind::UsePoison
                | EffectKind::ClearHunterTrigger
        )
    }
}

/// Why an attempted effect was not allowed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CancelReason {
    /// The player already acted this phase.
    AlreadyActed,
    /// Guard tried to protect last night's target.
    GuardRepeat,
    /// Guard tried to protect themselves.
    GuardSelfProtect,
    /// Witch already spent the antidote.
    NoAntidote,
    /// Witch tried to save themselves.
    WitchSelfSave,
    /// Nobody is dying tonight.
    NoOneDying,
    /// Antidote aimed at someone other than tonight's victim.
    WrongTarget,
    /// Witch already spent the poison.
    NoPoison,
    /// Witch tried to poison themselves.
    WitchSelfPoison,
    /// The vote ended in a tie.
    VoteTied,
    /// Nobody voted.
    NoVotes,
    /// The triggered hunter did not act.
    NoAction,
}

impl std::fmt::Display for CancelReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            CancelReason::AlreadyActed => "player already acted this phase",
            CancelReason::GuardRepeat => "cannot protect the same player two nights in a row",
            CancelReason::GuardSelfProtect => "guard cannot protect themselves",
            CancelReason::NoAntidote => "no antidote remaining",
            CancelReason::WitchSelfSave => "witch cannot save themselves",
            CancelReason::NoOneDying => "no one is dying tonight",
            CancelReason::WrongTarget => "target is not tonight's victim",
            CancelReason::NoPoison => "no poison remaining",
            CancelReason::WitchSelfPoison => "witch cannot poison themselves",
            CancelReason::VoteTied => "vote tied, no one is eliminated",
            CancelReason::NoVotes => "no votes cast",
            CancelReason::NoAction => "hunter did not act",
        };
        f.write_str(reason)
    }
}

/// A cancelable mutation intent.
///
/// ## Example
///
/// ```
/// use werewolf_engine::effects::{CancelReason, Effect, EffectKind};
///
/// let protect = Effect::new(EffectKind::Protect).by("g1").on("v1");
/// assert!(!protect.is_canceled());
///
/// let repeat = protect.cancel(CancelReason::GuardRepeat);
/// assert_eq!(repeat.canceled, Some(CancelReason::GuardRepeat));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Effect {
    pub kind: EffectKind,
    /// Who caused the effect.
    pub source: Option<PlayerId>,
    /// Who the effect applies to.
    pub target: Option<PlayerId>,
    /// Set when the attempt was not allowed.
    pub canceled: Option<CancelReason>,
}

impl Effect {
    /// Create an effect with no source or target.
    pub fn new(kind: EffectKind) -> Self {
        Self {
            kind,
            source: None,
            target: None,
            canceled: None,
        }
    }

    /// Set the source player (builder pattern).
    #[must_use]
    pub fn by(mut self, source: impl Into<PlayerId>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Set the target player (builder pattern).
    #[must_use]
    pub fn on(mut self, target: impl Into<PlayerId>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Set an optional target (builder pattern).
    #[must_use]
    pub fn on_maybe(mut self, target: Option<PlayerId>) -> Self {
        self.target = target;
        self
    }

    /// Mark the effect canceled.
    #[must_use]
    pub fn cancel(mut self, reason: CancelReason) -> Self {
        self.canceled = Some(reason);
        self
    }

    #[must_use]
    pub fn is_canceled(&self) -> bool {
        self.canceled.is_some()
    }
}

impl std::fmt::Display for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.kind)?;
        if let Some(source) = &self.source {
            write!(f, " from {}", source)?;
        }
        if let Some(target) = &self.target {
            write!(f, " on {}", target)?;
        }
        if let Some(reason) = &self.canceled {
            write!(f, " (canceled: {})", reason)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let effect = Effect::new(EffectKind::Kill).by("w1").on("v1");
        assert_eq!(effect.source, Some(PlayerId::new("w1")));
        assert_eq!(effect.target, Some(PlayerId::new("v1")));
        assert!(!effect.is_canceled());
    }

    #[test]
    fn test_classification() {
        assert!(EffectKind::Kill.is_death());
        assert!(EffectKind::VoteEliminate { votes: 3 }.is_death());
        assert!(!EffectKind::Protect.is_death());

        assert!(EffectKind::ClearNightKill.is_internal());
        assert!(!EffectKind::SetNightKill { votes: 2 }.is_internal());
        assert!(EffectKind::UsePoison.is_internal());
        assert!(!EffectKind::Kill.is_internal());
        assert!(!EffectKind::SeerCheck { camp: Camp::Good, is_good: true }.is_internal());
    }

    #[test]
    fn test_display() {
        let effect = Effect::new(EffectKind::Save)
            .by("witch")
            .on("witch")
            .cancel(CancelReason::WitchSelfSave);
        assert_eq!(
            effect.to_string(),
            "Save from witch on witch (canceled: witch cannot save themselves)"
        );
    }
}
