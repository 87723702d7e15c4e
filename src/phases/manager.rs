//! Phase graph, allowed-action tables, and action validation.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::core::{ActionKind, ActionUse, GameConfig, GameState, Phase, PlayerRecord, Role};
use crate::error::{EngineError, EngineResult};

type Allowed = SmallVec<[ActionKind; 2]>;

/// Owns the phase graph and answers "who may do what, and what comes next".
///
/// The per-phase `{role -> actions}` tables are derived once from the
/// configured action steps.
#[derive(Clone, Debug)]
pub struct PhaseManager {
    config: Arc<GameConfig>,
    allowed: FxHashMap<Phase, FxHashMap<Role, Allowed>>,
}

impl PhaseManager {
    /// Build the allowed-action tables from a configuration.
    pub fn new(config: Arc<GameConfig>) -> Self {
        let mut allowed: FxHashMap<Phase, FxHashMap<Role, Allowed>> = FxHashMap::default();

        for (phase, phase_config) in &config.phases {
            let table = allowed.entry(*phase).or_default();
            for step in &phase_config.steps {
                let actions = table.entry(step.role).or_default();
                for kind in &step.actions {
                    if !actions.contains(kind) {
                        actions.push(*kind);
                    }
                }
            }
        }

        Self { config, allowed }
    }

    /// The configuration this manager was built from.
    #[must_use]
    pub fn config(&self) -> &Arc<GameConfig> {
        &self.config
    }

    /// Actions a role may take in a phase.
    #[must_use]
    pub fn allowed_actions(&self, phase: Phase, role: Role) -> &[ActionKind] {
        self.allowed
            .get(&phase)
            .and_then(|table| table.get(&role))
            .map(|actions| actions.as_slice())
            .unwrap_or(&[])
    }

    /// Actions a specific player may take right now.
    #[must_use]
    pub fn allowed_for_player(&self, state: &GameState, player: &PlayerRecord) -> Vec<ActionKind> {
        if !can_act(state, player) {
            return Vec::new();
        }
        self.allowed_actions(state.phase, player.role).to_vec()
    }

    /// Roles expected to act in the current phase, in step order.
    ///
    /// A role is listed only when at least one of its players can act.
    #[must_use]
    pub fn acting_roles(&self, state: &GameState) -> Vec<Role> {
        let Some(phase_config) = self.config.phase(state.phase) else {
            return Vec::new();
        };

        let mut roles: Vec<Role> = Vec::new();
        for step in &phase_config.steps {
            if roles.contains(&step.role) {
                continue;
            }
            let present = state
                .players()
                .iter()
                .any(|p| p.role == step.role && can_act(state, p));
            if present {
                roles.push(step.role);
            }
        }
        roles
    }

    /// Check that an action may be buffered in the current phase.
    pub fn validate(&self, state: &GameState, action: &ActionUse) -> EngineResult<()> {
        match state.phase {
            Phase::Start => return Err(EngineError::GameNotStarted),
            Phase::End => return Err(EngineError::GameEnded),
            _ => {}
        }

        let player = state
            .player(&action.player)
            .ok_or_else(|| EngineError::PlayerNotFound(action.player.clone()))?;

        if !player.alive && !state.phase.is_hunter() {
            return Err(EngineError::PlayerDead(player.id.clone()));
        }

        let not_allowed = || EngineError::SkillNotAllowed {
            player: player.id.clone(),
            action: action.kind,
            phase: state.phase,
        };
        if !self.allowed_actions(state.phase, player.role).contains(&action.kind) {
            return Err(not_allowed());
        }
        if state.phase.is_hunter() && state.context.triggered_hunter.as_ref() != Some(&player.id) {
            return Err(not_allowed());
        }

        match &action.target {
            None if action.kind.requires_target() => {
                Err(EngineError::MissingTarget { action: action.kind })
            }
            None => Ok(()),
            Some(target_id) => {
                let target = state
                    .player(target_id)
                    .ok_or_else(|| EngineError::TargetNotFound(target_id.clone()))?;
                // The night victim is not dead yet, but the antidote may
                // still name a target that is.
                if !target.alive && action.kind != ActionKind::Antidote {
                    return Err(EngineError::TargetDead(target_id.clone()));
                }
                Ok(())
            }
        }
    }

    /// Successor declared in the graph. `Start` always leads to the first
    /// night sub-phase; an undeclared successor is the terminal phase.
    #[must_use]
    pub fn declared_next(&self, phase: Phase) -> Phase {
        if phase == Phase::Start {
            return Phase::FIRST_NIGHT;
        }
        self.config
            .phase(phase)
            .and_then(|p| p.next)
            .unwrap_or(Phase::End)
    }

    /// Successor of the current phase.
    ///
    /// `just_triggered` is set when the phase being left applied a
    /// `HunterTriggered` effect. Only then is the game rerouted to a hunter
    /// phase; a trigger left over from an earlier phase never reroutes.
    #[must_use]
    pub fn next_phase(&self, state: &GameState, just_triggered: bool) -> Phase {
        let declared = self.declared_next(state.phase);
        if !just_triggered {
            return declared;
        }
        self.hunter_detour(state).unwrap_or(declared)
    }

    fn hunter_detour(&self, state: &GameState) -> Option<Phase> {
        if !state.context.hunter_triggered || state.phase.is_hunter() {
            return None;
        }
        let detour = if state.phase.is_night() {
            Phase::NightHunter
        } else {
            Phase::DayHunter
        };
        self.config.phase(detour).map(|_| detour)
    }
}

/// Living players can act; in hunter phases so can the triggered hunter.
fn can_act(state: &GameState, player: &PlayerRecord) -> bool {
    if state.phase.is_hunter() {
        return state.context.triggered_hunter.as_ref() == Some(&player.id);
    }
    player.alive
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerId;
    use crate::effects::{Effect, EffectKind};

    fn setup() -> (PhaseManager, GameState) {
        let manager = PhaseManager::new(Arc::new(GameConfig::standard()));
        let mut state = GameState::new();
        for (id, role) in [
            ("w1", Role::Werewolf),
            ("w2", Role::Werewolf),
            ("witch", Role::Witch),
            ("seer", Role::Seer),
            ("h", Role::Hunter),
            ("v1", Role::Villager),
        ] {
            state.add_player(PlayerId::new(id), role, role.camp()).unwrap();
        }
        (manager, state)
    }

    #[test]
    fn test_allowed_tables() {
        let (manager, _) = setup();
        assert_eq!(manager.allowed_actions(Phase::NightWolf, Role::Werewolf), &[ActionKind::Kill]);
        assert_eq!(
            manager.allowed_actions(Phase::NightWitch, Role::Witch),
            &[ActionKind::Antidote, ActionKind::Poison]
        );
        assert!(manager.allowed_actions(Phase::NightWolf, Role::Villager).is_empty());
        assert_eq!(manager.allowed_actions(Phase::Vote, Role::Villager), &[ActionKind::Vote]);
        assert!(manager.allowed_actions(Phase::End, Role::Villager).is_empty());
    }

    #[test]
    fn test_validate_before_start_and_after_end() {
        let (manager, mut state) = setup();
        let kill = ActionUse::targeted("w1", ActionKind::Kill, "v1");
        assert_eq!(manager.validate(&state, &kill), Err(EngineError::GameNotStarted));

        state.transition_to(Phase::End);
        assert_eq!(manager.validate(&state, &kill), Err(EngineError::GameEnded));
    }

    #[test]
    fn test_validate_errors() {
        let (manager, mut state) = setup();
        state.transition_to(Phase::NightWolf);

        let ok = ActionUse::targeted("w1", ActionKind::Kill, "v1");
        assert_eq!(manager.validate(&state, &ok), Ok(()));

        let ghost = ActionUse::targeted("ghost", ActionKind::Kill, "v1");
        assert_eq!(
            manager.validate(&state, &ghost),
            Err(EngineError::PlayerNotFound(PlayerId::new("ghost")))
        );

        let villager = ActionUse::targeted("v1", ActionKind::Kill, "w1");
        assert!(matches!(
            manager.validate(&state, &villager),
            Err(EngineError::SkillNotAllowed { .. })
        ));

        let nobody = ActionUse::targeted("w1", ActionKind::Kill, "nobody");
        assert_eq!(
            manager.validate(&state, &nobody),
            Err(EngineError::TargetNotFound(PlayerId::new("nobody")))
        );

        let untargeted = ActionUse::new("w1", ActionKind::Kill);
        assert_eq!(
            manager.validate(&state, &untargeted),
            Err(EngineError::MissingTarget { action: ActionKind::Kill })
        );

        state.apply_effect(&Effect::new(EffectKind::Kill).on("seer"));
        let dead_target = ActionUse::targeted("w1", ActionKind::Kill, "seer");
        assert_eq!(
            manager.validate(&state, &dead_target),
            Err(EngineError::TargetDead(PlayerId::new("seer")))
        );

        state.apply_effect(&Effect::new(EffectKind::Kill).on("w2"));
        let dead_player = ActionUse::targeted("w2", ActionKind::Kill, "v1");
        assert_eq!(
            manager.validate(&state, &dead_player),
            Err(EngineError::PlayerDead(PlayerId::new("w2")))
        );
    }

    #[test]
    fn test_antidote_may_target_dead_player() {
        let (manager, mut state) = setup();
        state.transition_to(Phase::NightWitch);
        state.apply_effect(&Effect::new(EffectKind::Kill).on("v1"));

        let antidote = ActionUse::targeted("witch", ActionKind::Antidote, "v1");
        assert_eq!(manager.validate(&state, &antidote), Ok(()));

        let poison = ActionUse::targeted("witch", ActionKind::Poison, "v1");
        assert_eq!(
            manager.validate(&state, &poison),
            Err(EngineError::TargetDead(PlayerId::new("v1")))
        );
    }

    #[test]
    fn test_dead_hunter_may_shoot() {
        let (manager, mut state) = setup();
        state.apply_effect(&Effect::new(EffectKind::Kill).on("h"));
        state.apply_effect(&Effect::new(EffectKind::HunterTriggered).on("h"));
        state.transition_to(Phase::NightHunter);

        let shoot = ActionUse::targeted("h", ActionKind::Shoot, "w1");
        assert_eq!(manager.validate(&state, &shoot), Ok(()));
        assert_eq!(manager.validate(&state, &ActionUse::new("h", ActionKind::Skip)), Ok(()));

        let wolf = ActionUse::targeted("w1", ActionKind::Shoot, "h");
        assert!(matches!(
            manager.validate(&state, &wolf),
            Err(EngineError::SkillNotAllowed { .. })
        ));
    }

    #[test]
    fn test_untriggered_hunter_may_not_shoot() {
        let (manager, mut state) = setup();
        state.transition_to(Phase::DayHunter);
        let shoot = ActionUse::targeted("h", ActionKind::Shoot, "w1");
        assert!(matches!(
            manager.validate(&state, &shoot),
            Err(EngineError::SkillNotAllowed { .. })
        ));
    }

    #[test]
    fn test_next_phase() {
        let (manager, mut state) = setup();
        assert_eq!(manager.next_phase(&state, false), Phase::NightGuard);

        state.transition_to(Phase::NightResolve);
        assert_eq!(manager.next_phase(&state, false), Phase::Day);

        state.apply_effect(&Effect::new(EffectKind::HunterTriggered).on("h"));
        assert_eq!(manager.next_phase(&state, true), Phase::NightHunter);

        state.transition_to(Phase::NightHunter);
        assert_eq!(manager.next_phase(&state, false), Phase::Day);

        state.transition_to(Phase::Vote);
        assert_eq!(manager.next_phase(&state, true), Phase::DayHunter);

        state.apply_effect(&Effect::new(EffectKind::ClearHunterTrigger));
        assert_eq!(manager.next_phase(&state, true), Phase::NightGuard);
    }

    #[test]
    fn test_stale_trigger_does_not_reroute() {
        let (manager, mut state) = setup();
        state.apply_effect(&Effect::new(EffectKind::HunterTriggered).on("h"));
        state.transition_to(Phase::Day);

        assert!(state.context.hunter_triggered);
        assert_eq!(manager.next_phase(&state, false), Phase::Vote);
    }

    #[test]
    fn test_undeclared_successor_is_terminal() {
        let config = GameConfig::new().with_phase(
            Phase::NightGuard,
            crate::core::PhaseConfig::new(std::time::Duration::ZERO, None),
        );
        let manager = PhaseManager::new(Arc::new(config));
        assert_eq!(manager.declared_next(Phase::NightGuard), Phase::End);
        assert_eq!(manager.declared_next(Phase::Day), Phase::End);
        assert_eq!(manager.declared_next(Phase::Start), Phase::NightGuard);
    }

    #[test]
    fn test_acting_roles() {
        let (manager, mut state) = setup();
        state.transition_to(Phase::NightWitch);
        assert_eq!(manager.acting_roles(&state), vec![Role::Witch]);

        state.apply_effect(&Effect::new(EffectKind::Kill).on("witch"));
        assert!(manager.acting_roles(&state).is_empty());

        state.transition_to(Phase::NightGuard);
        // No guard on this roster
        assert!(manager.acting_roles(&state).is_empty());

        state.transition_to(Phase::Vote);
        let roles = manager.acting_roles(&state);
        assert!(roles.contains(&Role::Werewolf));
        assert!(roles.contains(&Role::Villager));
        assert!(!roles.contains(&Role::Witch));
        assert!(!roles.contains(&Role::Guard));
    }
}
