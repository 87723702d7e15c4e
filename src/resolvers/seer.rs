//! Seer checks.

use crate::core::{ActionKind, Camp, GameConfig, GameState, SubmittedAction};
use crate::effects::{Effect, EffectKind};

use super::{first_per_player, Resolver};

/// Resolves `Check` actions into a `SeerCheck` carrying the target's camp.
pub struct SeerResolver;

impl Resolver for SeerResolver {
    fn resolve(
        &self,
        actions: &[SubmittedAction],
        state: &GameState,
        _config: &GameConfig,
    ) -> Vec<Effect> {
        let (checks, _) = first_per_player(actions, ActionKind::Check);

        checks
            .into_iter()
            .filter_map(|action| {
                let target = state.player(action.target.as_ref()?)?;
                Some(
                    Effect::new(EffectKind::SeerCheck {
                        camp: target.camp,
                        is_good: target.camp == Camp::Good,
                    })
                    .by(action.player.clone())
                    .on(target.id.clone()),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Phase, Role};
    use crate::resolvers::test_support::{id, state_with};

    #[test]
    fn test_check_reveals_camp() {
        let state = state_with(&[("s", Role::Seer), ("w", Role::Werewolf), ("v", Role::Villager)]);
        let actions = [
            SubmittedAction::new("s", ActionKind::Check, Some("w"), Phase::NightSeer, 1),
            SubmittedAction::new("s", ActionKind::Check, Some("v"), Phase::NightSeer, 1),
        ];

        let effects = SeerResolver.resolve(&actions, &state, &GameConfig::standard());

        assert_eq!(effects.len(), 1);
        assert_eq!(
            effects[0].kind,
            EffectKind::SeerCheck { camp: Camp::Evil, is_good: false }
        );
        assert_eq!(effects[0].source, Some(id("s")));
        assert_eq!(effects[0].target, Some(id("w")));
    }

    #[test]
    fn test_check_does_not_change_state() {
        let mut state = state_with(&[("s", Role::Seer), ("v", Role::Villager)]);
        let actions = [SubmittedAction::new(
            "s",
            ActionKind::Check,
            Some("v"),
            Phase::NightSeer,
            1,
        )];

        let before = state.clone();
        for effect in SeerResolver.resolve(&actions, &state.clone(), &GameConfig::standard()) {
            state.apply_effect(&effect);
        }
        assert_eq!(state.players(), before.players());
        assert_eq!(state.context, before.context);
    }
}
