//! Hunter's dying shot.

use crate::core::{ActionKind, GameConfig, GameState, SubmittedAction};
use crate::effects::{CancelReason, Effect, EffectKind};

use super::Resolver;

/// Resolves the triggered hunter's `Shoot` or `Skip`.
///
/// Only the hunter named in the round context may act, and only the first
/// of their actions counts. If they did nothing a canceled `HunterSkip` is
/// recorded. The list always ends with `ClearHunterTrigger` so the hunter
/// phase is entered once per death.
pub struct HunterResolver;

impl Resolver for HunterResolver {
    fn resolve(
        &self,
        actions: &[SubmittedAction],
        state: &GameState,
        _config: &GameConfig,
    ) -> Vec<Effect> {
        let Some(hunter) = &state.context.triggered_hunter else {
            return Vec::new();
        };

        let choice = actions.iter().find(|a| {
            a.player == *hunter && matches!(a.kind, ActionKind::Shoot | ActionKind::Skip)
        });

        let outcome = match choice {
            Some(action) if action.kind == ActionKind::Shoot => Effect::new(EffectKind::HunterShoot)
                .by(hunter.clone())
                .on_maybe(action.target.clone()),
            Some(_) => Effect::new(EffectKind::HunterSkip).by(hunter.clone()),
            None => Effect::new(EffectKind::HunterSkip)
                .by(hunter.clone())
                .cancel(CancelReason::NoAction),
        };

        vec![outcome, Effect::new(EffectKind::ClearHunterTrigger).by(hunter.clone())]
    }
}
