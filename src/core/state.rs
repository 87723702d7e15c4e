//! Game state: the player roster plus per-round scratch data.
//!
//! ## GameState
//!
//! The single authoritative store for a game:
//! - Roster of `PlayerRecord`s (fixed once the game starts)
//! - Current phase and round number
//! - `RoundContext` for the current night/day cycle
//!
//! All changes during play go through `apply_effect`.
//!
//! ## RoundContext
//!
//! Ephemeral data shared between the night sub-phases of one round: the
//! wolves' target, who is protected, saved, or poisoned, and whether a
//! hunter just died. It is rebuilt every time the game enters the first
//! night sub-phase.

use im::OrdSet;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::config::Phase;
use super::player::{PlayerId, PlayerRecord};
use super::role::{Camp, Role};
use crate::effects::{Effect, EffectKind};
use crate::error::{EngineError, EngineResult};
use crate::rules::{check_victory, Victory};

/// Per-round scratch state.
///
/// Uses `im` ordered sets so iteration order is deterministic and cloning
/// a snapshot is cheap.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundContext {
    /// Tonight's victim chosen by the wolves.
    pub kill_target: Option<PlayerId>,
    /// Players protected by a guard this round.
    pub protected: OrdSet<PlayerId>,
    /// Players restored by the antidote this round.
    pub saved: OrdSet<PlayerId>,
    /// Players poisoned this round; they die at night resolve.
    pub poisoned: OrdSet<PlayerId>,
    /// A hunter died and has not yet taken the shot.
    pub hunter_triggered: bool,
    /// The hunter who may shoot.
    pub triggered_hunter: Option<PlayerId>,
}

impl RoundContext {
    /// Nothing has happened this round.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Result of applying an effect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ApplyResult {
    /// Effect changed (or confirmed) state.
    Success,
    /// Effect was canceled; state untouched.
    Skipped,
    /// Effect could not be applied (e.g., unknown target).
    Failed(String),
}

/// Complete game state.
///
/// Carries no lock of its own. The engine keeps it behind its single lock
/// and mutates it only through `&mut`, which is what makes each change
/// exclusive.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    /// Roster in insertion order.
    players: Vec<PlayerRecord>,

    /// Player id -> roster index.
    index: FxHashMap<PlayerId, usize>,

    /// Current phase.
    pub phase: Phase,

    /// Round number. 0 before the first night, then +1 per night.
    pub round: u32,

    /// Scratch data for the current round.
    pub context: RoundContext,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Create an empty game in the `Start` phase.
    pub fn new() -> Self {
        Self {
            players: Vec::new(),
            index: FxHashMap::default(),
            phase: Phase::Start,
            round: 0,
            context: RoundContext::default(),
        }
    }

    // === Roster ===

    /// Add a player. Only allowed before the game starts.
    pub fn add_player(&mut self, id: PlayerId, role: Role, camp: Camp) -> EngineResult<()> {
        if self.phase != Phase::Start {
            return Err(EngineError::GameAlreadyStarted);
        }
        if self.index.contains_key(&id) {
            return Err(EngineError::DuplicatePlayer(id));
        }

        self.index.insert(id.clone(), self.players.len());
        self.players.push(PlayerRecord::new(id, role, camp));
        Ok(())
    }

    /// Number of players on the roster.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Get a player record.
    #[must_use]
    pub fn player(&self, id: &PlayerId) -> Option<&PlayerRecord> {
        self.index.get(id).map(|&i| &self.players[i])
    }

    fn player_mut(&mut self, id: &PlayerId) -> Option<&mut PlayerRecord> {
        match self.index.get(id) {
            Some(&i) => self.players.get_mut(i),
            None => None,
        }
    }

    /// All players in roster order.
    #[must_use]
    pub fn players(&self) -> &[PlayerRecord] {
        &self.players
    }

    /// Living players in roster order.
    pub fn alive_players(&self) -> impl Iterator<Item = &PlayerRecord> {
        self.players.iter().filter(|p| p.alive)
    }

    #[must_use]
    pub fn is_alive(&self, id: &PlayerId) -> bool {
        self.player(id).is_some_and(|p| p.alive)
    }

    /// Other werewolves, if `id` is a werewolf. Non-wolves get nothing.
    #[must_use]
    pub fn wolf_teammates(&self, id: &PlayerId) -> Vec<PlayerId> {
        match self.player(id) {
            Some(player) if player.is_wolf() => self
                .players
                .iter()
                .filter(|p| p.is_wolf() && p.id != *id)
                .map(|p| p.id.clone())
                .collect(),
            _ => Vec::new(),
        }
    }

    // === Round predicates ===

    #[must_use]
    pub fn is_protected(&self, id: &PlayerId) -> bool {
        self.context.protected.contains(id)
    }

    #[must_use]
    pub fn is_poisoned(&self, id: &PlayerId) -> bool {
        self.context.poisoned.contains(id)
    }

    #[must_use]
    pub fn has_antidote(&self, id: &PlayerId) -> bool {
        self.player(id).is_some_and(|p| p.has_antidote)
    }

    #[must_use]
    pub fn has_poison(&self, id: &PlayerId) -> bool {
        self.player(id).is_some_and(|p| p.has_poison)
    }

    // === Phase progression ===

    /// Clear all per-round scratch data.
    pub fn reset_round(&mut self) {
        self.context = RoundContext::default();
    }

    /// Move to a new phase.
    ///
    /// Entering the first night sub-phase starts a new round: the round
    /// number goes up by one and the round context is rebuilt.
    pub fn transition_to(&mut self, phase: Phase) {
        if phase == Phase::FIRST_NIGHT {
            self.round += 1;
            self.reset_round();
        }
        self.phase = phase;
    }

    /// Evaluate the win condition on current alive counts.
    #[must_use]
    pub fn check_victory(&self) -> Option<Victory> {
        let (good, evil) = self.alive_players().fold((0, 0), |(good, evil), p| match p.camp {
            Camp::Good => (good + 1, evil),
            Camp::Evil => (good, evil + 1),
        });
        check_victory(good, evil)
    }

    // === Effects ===

    /// Apply one effect.
    ///
    /// This is the only mutation path during play. A canceled effect is a
    /// no-op.
    pub fn apply_effect(&mut self, effect: &Effect) -> ApplyResult {
        if effect.is_canceled() {
            return ApplyResult::Skipped;
        }

        let result = match &effect.kind {
            kind if kind.is_death() => self.with_target(effect, |p| p.alive = false),

            EffectKind::Protect => match &effect.target {
                Some(target) => {
                    self.context.protected.insert(target.clone());
                    ApplyResult::Success
                }
                None => missing_target(),
            },

            EffectKind::Save => match self.with_target(effect, |p| p.alive = true) {
                ApplyResult::Success => {
                    if let Some(target) = &effect.target {
                        self.context.saved.insert(target.clone());
                    }
                    ApplyResult::Success
                }
                other => other,
            },

            EffectKind::SetNightKill { .. } => match &effect.target {
                Some(target) => {
                    self.context.kill_target = Some(target.clone());
                    ApplyResult::Success
                }
                None => missing_target(),
            },

            EffectKind::ClearNightKill => {
                self.context.kill_target = None;
                ApplyResult::Success
            }

            EffectKind::SetLastProtected => {
                let target = effect.target.clone();
                self.with_source(effect, |p| p.last_protected = target)
            }

            EffectKind::UseAntidote => self.with_source(effect, |p| p.has_antidote = false),

            EffectKind::UsePoison => match self.with_source(effect, |p| p.has_poison = false) {
                ApplyResult::Success => match &effect.target {
                    Some(target) => {
                        self.context.poisoned.insert(target.clone());
                        ApplyResult::Success
                    }
                    None => missing_target(),
                },
                other => other,
            },

            EffectKind::HunterTriggered => match &effect.target {
                Some(target) => {
                    self.context.hunter_triggered = true;
                    self.context.triggered_hunter = Some(target.clone());
                    ApplyResult::Success
                }
                None => missing_target(),
            },

            EffectKind::ClearHunterTrigger => {
                self.context.hunter_triggered = false;
                self.context.triggered_hunter = None;
                ApplyResult::Success
            }

            // Informational only
            _ => ApplyResult::Success,
        };

        debug!(effect = %effect, ?result, "applied effect");
        result
    }

    fn with_target(&mut self, effect: &Effect, f: impl FnOnce(&mut PlayerRecord)) -> ApplyResult {
        let Some(id) = &effect.target else {
            return missing_target();
        };
        match self.player_mut(id) {
            Some(player) => {
                f(player);
                ApplyResult::Success
            }
            None => ApplyResult::Failed(format!("target not found: {}", id)),
        }
    }

    fn with_source(&mut self, effect: &Effect, f: impl FnOnce(&mut PlayerRecord)) -> ApplyResult {
        let Some(id) = &effect.source else {
            return ApplyResult::Failed("effect has no source".to_string());
        };
        match self.player_mut(id) {
            Some(player) => {
                f(player);
                ApplyResult::Success
            }
            None => ApplyResult::Failed(format!("source not found: {}", id)),
        }
    }
}

fn missing_target() -> ApplyResult {
    ApplyResult::Failed("effect has no target".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::CancelReason;

    fn roster() -> GameState {
        let mut state = GameState::new();
        for (id, role) in [
            ("w1", Role::Werewolf),
            ("w2", Role::Werewolf),
            ("witch", Role::Witch),
            ("guard", Role::Guard),
            ("v1", Role::Villager),
        ] {
            state.add_player(PlayerId::new(id), role, role.camp()).unwrap();
        }
        state
    }

    fn id(s: &str) -> PlayerId {
        PlayerId::new(s)
    }

    #[test]
    fn test_add_player_rules() {
        let mut state = roster();
        assert_eq!(
            state.add_player(id("w1"), Role::Villager, Camp::Good),
            Err(EngineError::DuplicatePlayer(id("w1")))
        );

        state.transition_to(Phase::NightGuard);
        assert_eq!(
            state.add_player(id("late"), Role::Villager, Camp::Good),
            Err(EngineError::GameAlreadyStarted)
        );
        assert_eq!(state.player_count(), 5);
    }

    #[test]
    fn test_kill_class_effects() {
        for kind in [
            EffectKind::Kill,
            EffectKind::Poison,
            EffectKind::VoteEliminate { votes: 2 },
            EffectKind::HunterShoot,
        ] {
            let mut state = roster();
            let result = state.apply_effect(&Effect::new(kind).on("v1"));
            assert_eq!(result, ApplyResult::Success);
            assert!(!state.is_alive(&id("v1")));
        }
    }

    #[test]
    fn test_canceled_effect_is_noop() {
        let mut state = roster();
        let before = state.clone();

        let effect = Effect::new(EffectKind::Kill).on("v1").cancel(CancelReason::NoOneDying);
        assert_eq!(state.apply_effect(&effect), ApplyResult::Skipped);

        assert_eq!(state.players(), before.players());
        assert_eq!(state.context, before.context);
    }

    #[test]
    fn test_protect_and_night_kill() {
        let mut state = roster();
        state.apply_effect(&Effect::new(EffectKind::Protect).by("guard").on("v1"));
        state.apply_effect(&Effect::new(EffectKind::SetNightKill { votes: 2 }).on("v1"));

        assert!(state.is_protected(&id("v1")));
        assert_eq!(state.context.kill_target, Some(id("v1")));

        state.apply_effect(&Effect::new(EffectKind::ClearNightKill));
        assert_eq!(state.context.kill_target, None);
    }

    #[test]
    fn test_save() {
        let mut state = roster();
        state.apply_effect(&Effect::new(EffectKind::Kill).on("v1"));
        state.apply_effect(&Effect::new(EffectKind::Save).by("witch").on("v1"));

        assert!(state.is_alive(&id("v1")));
        assert!(state.context.saved.contains(&id("v1")));
    }

    #[test]
    fn test_potions_are_single_use() {
        let mut state = roster();
        assert!(state.has_antidote(&id("witch")));
        assert!(state.has_poison(&id("witch")));

        state.apply_effect(&Effect::new(EffectKind::UseAntidote).by("witch"));
        state.apply_effect(&Effect::new(EffectKind::UsePoison).by("witch").on("w1"));

        assert!(!state.has_antidote(&id("witch")));
        assert!(!state.has_poison(&id("witch")));
        assert!(state.is_poisoned(&id("w1")));
        // Poison death is deferred
        assert!(state.is_alive(&id("w1")));
    }

    #[test]
    fn test_last_protected() {
        let mut state = roster();
        state.apply_effect(&Effect::new(EffectKind::SetLastProtected).by("guard").on("v1"));
        assert_eq!(state.player(&id("guard")).unwrap().last_protected, Some(id("v1")));
    }

    #[test]
    fn test_hunter_trigger() {
        let mut state = roster();
        state.apply_effect(&Effect::new(EffectKind::HunterTriggered).on("v1"));
        assert!(state.context.hunter_triggered);
        assert_eq!(state.context.triggered_hunter, Some(id("v1")));

        state.apply_effect(&Effect::new(EffectKind::ClearHunterTrigger));
        assert!(!state.context.hunter_triggered);
        assert_eq!(state.context.triggered_hunter, None);
    }

    #[test]
    fn test_unknown_target_fails() {
        let mut state = roster();
        let result = state.apply_effect(&Effect::new(EffectKind::Kill).on("ghost"));
        assert!(matches!(result, ApplyResult::Failed(_)));
    }

    #[test]
    fn test_round_transition() {
        let mut state = roster();
        state.apply_effect(&Effect::new(EffectKind::Protect).on("v1"));

        state.transition_to(Phase::NightGuard);
        assert_eq!(state.round, 1);
        assert!(state.context.is_empty());

        state.apply_effect(&Effect::new(EffectKind::SetNightKill { votes: 1 }).on("v1"));
        state.transition_to(Phase::NightWolf);
        state.transition_to(Phase::Day);
        assert_eq!(state.round, 1);
        assert!(!state.context.is_empty());

        state.transition_to(Phase::NightGuard);
        assert_eq!(state.round, 2);
        assert!(state.context.is_empty());
    }

    #[test]
    fn test_wolf_teammates() {
        let state = roster();
        assert_eq!(state.wolf_teammates(&id("w1")), vec![id("w2")]);
        assert_eq!(state.wolf_teammates(&id("w2")), vec![id("w1")]);
        assert!(state.wolf_teammates(&id("v1")).is_empty());
        assert!(state.wolf_teammates(&id("ghost")).is_empty());
    }

    #[test]
    fn test_victory() {
        let mut state = GameState::new();
        for (i, role) in [Role::Werewolf, Role::Werewolf, Role::Villager, Role::Seer]
            .into_iter()
            .enumerate()
        {
            state.add_player(id(&format!("p{}", i)), role, role.camp()).unwrap();
        }
        assert_eq!(state.check_victory(), None);

        state.apply_effect(&Effect::new(EffectKind::Kill).on("p2"));
        assert_eq!(state.check_victory(), Some(Victory::Evil));

        state.apply_effect(&Effect::new(EffectKind::Save).on("p2"));
        state.apply_effect(&Effect::new(EffectKind::VoteEliminate { votes: 3 }).on("p0"));
        state.apply_effect(&Effect::new(EffectKind::Poison).on("p1"));
        assert_eq!(state.check_victory(), Some(Victory::Good));

        assert_eq!(GameState::new().check_victory(), Some(Victory::Good));
    }
}
