//! Guard protection.

use crate::core::{ActionKind, GameConfig, GameState, SubmittedAction};
use crate::effects::{CancelReason, Effect, EffectKind};

use super::{first_per_player, Resolver};

/// Resolves `Protect` actions.
///
/// Each guard's first protect counts. A protect is canceled when it repeats
/// last night's target (unless repeats are allowed) or when the guard
/// targets themselves (unless self-protection is allowed). A valid protect
/// emits `SetLastProtected` followed by `Protect`.
pub struct GuardResolver;

impl Resolver for GuardResolver {
    fn resolve(
        &self,
        actions: &[SubmittedAction],
        state: &GameState,
        config: &GameConfig,
    ) -> Vec<Effect> {
        let rules = &config.rules;
        let (firsts, duplicates) = first_per_player(actions, ActionKind::Protect);
        let mut effects = Vec::new();

        for action in firsts {
            let (Some(guard), Some(target)) = (state.player(&action.player), &action.target)
            else {
                continue;
            };

            let protect = Effect::new(EffectKind::Protect)
                .by(guard.id.clone())
                .on(target.clone());

            if !rules.guard_can_repeat && guard.last_protected.as_ref() == Some(target) {
                effects.push(protect.cancel(CancelReason::GuardRepeat));
            } else if *target == guard.id && !rules.guard_can_protect_self {
                effects.push(protect.cancel(CancelReason::GuardSelfProtect));
            } else {
                effects.push(
                    Effect::new(EffectKind::SetLastProtected)
                        .by(guard.id.clone())
                        .on(target.clone()),
                );
                effects.push(protect);
            }
        }

        for action in duplicates {
            effects.push(
                Effect::new(EffectKind::Protect)
                    .by(action.player.clone())
                    .on_maybe(action.target.clone())
                    .cancel(CancelReason::AlreadyActed),
            );
        }

        effects
    }
}
