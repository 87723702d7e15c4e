//! Witch potions.

use crate::core::{ActionKind, GameConfig, GameState, PlayerId, PlayerRecord, SubmittedAction};
use crate::effects::{CancelReason, Effect, EffectKind};

use super::{first_per_player, Resolver};

/// Resolves `Antidote` and `Poison` actions.
///
/// The antidote only works on tonight's victim. Success emits
/// `UseAntidote`, `ClearNightKill`, `Save`; every failure still emits a
/// canceled `Save` carrying the reason.
///
/// Poison only spends the potion and marks the target. The death itself
/// lands at night resolve.
pub struct WitchResolver;

impl Resolver for WitchResolver {
    fn resolve(
        &self,
        actions: &[SubmittedAction],
        state: &GameState,
        config: &GameConfig,
    ) -> Vec<Effect> {
        let mut effects = Vec::new();

        let (antidotes, _) = first_per_player(actions, ActionKind::Antidote);
        for action in antidotes {
            if let (Some(witch), Some(target)) = (state.player(&action.player), &action.target) {
                antidote(witch, target, state, config, &mut effects);
            }
        }

        let (poisons, _) = first_per_player(actions, ActionKind::Poison);
        for action in poisons {
            if let (Some(witch), Some(target)) = (state.player(&action.player), &action.target) {
                effects.push(poison(witch, target));
            }
        }

        effects
    }
}

fn antidote(
    witch: &PlayerRecord,
    target: &PlayerId,
    state: &GameState,
    config: &GameConfig,
    effects: &mut Vec<Effect>,
) {
    let save = Effect::new(EffectKind::Save)
        .by(witch.id.clone())
        .on(target.clone());

    let refusal = if !witch.has_antidote {
        Some(CancelReason::NoAntidote)
    } else {
        match &state.context.kill_target {
            None => Some(CancelReason::NoOneDying),
            Some(victim) if victim != target => Some(CancelReason::WrongTarget),
            Some(_) if *target == witch.id && !config.rules.witch_can_save_self => {
                Some(CancelReason::WitchSelfSave)
            }
            Some(_) => None,
        }
    };

    match refusal {
        Some(reason) => effects.push(save.cancel(reason)),
        None => {
            effects.push(Effect::new(EffectKind::UseAntidote).by(witch.id.clone()));
            effects.push(Effect::new(EffectKind::ClearNightKill).by(witch.id.clone()));
            effects.push(save);
        }
    }
}

fn poison(witch: &PlayerRecord, target: &PlayerId) -> Effect {
    let effect = Effect::new(EffectKind::UsePoison)
        .by(witch.id.clone())
        .on(target.clone());

    if *target == witch.id {
        effect.cancel(CancelReason::WitchSelfPoison)
    } else if !witch.has_poison {
        effect.cancel(CancelReason::NoPoison)
    } else {
        effect
    }
}
