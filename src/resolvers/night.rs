//! Night resolution: deferred deaths land here.

use crate::core::{GameConfig, GameState, PlayerId, Role, SubmittedAction};
use crate::effects::{Effect, EffectKind};

use super::Resolver;

/// Applies the night's deferred deaths.
///
/// The wolves' kill is re-checked against protection because a guard's
/// protect is visible in the round context by now. Every poisoned player
/// dies regardless of protection. Each dying hunter gets a
/// `HunterTriggered` effect after the deaths.
pub struct NightResolver;

impl Resolver for NightResolver {
    fn resolve(
        &self,
        _actions: &[SubmittedAction],
        state: &GameState,
        config: &GameConfig,
    ) -> Vec<Effect> {
        let mut effects = Vec::new();
        let mut victims: Vec<&PlayerId> = Vec::new();

        if let Some(target) = &state.context.kill_target {
            let absorbed = state.is_protected(target) && config.rules.same_guard_kill_is_empty;
            if !absorbed && state.is_alive(target) {
                effects.push(Effect::new(EffectKind::Kill).on(target.clone()));
                victims.push(target);
            }
        }

        for target in &state.context.poisoned {
            if state.is_alive(target) && !victims.contains(&target) {
                effects.push(Effect::new(EffectKind::Poison).on(target.clone()));
                victims.push(target);
            }
        }

        for victim in victims {
            if state.player(victim).is_some_and(|p| p.role == Role::Hunter) {
                effects.push(Effect::new(EffectKind::HunterTriggered).on(victim.clone()));
            }
        }

        effects
    }
}
