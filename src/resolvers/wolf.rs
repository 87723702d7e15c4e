//! Werewolf kill vote.

use crate::core::{ActionKind, GameConfig, GameState, SubmittedAction};
use crate::effects::{Effect, EffectKind};

use super::{first_per_player, plurality, Resolver, TallyOutcome};

/// Resolves `Kill` votes into tonight's victim.
///
/// One vote per wolf. A strict plurality picks the victim; a tie or no
/// votes means nobody is targeted. If the victim is protected and
/// `same_guard_kill_is_empty` is on, the kill is absorbed here so the witch
/// never learns anyone was targeted.
pub struct WolfResolver;

impl Resolver for WolfResolver {
    fn resolve(
        &self,
        actions: &[SubmittedAction],
        state: &GameState,
        config: &GameConfig,
    ) -> Vec<Effect> {
        let (votes, _) = first_per_player(actions, ActionKind::Kill);

        match plurality(votes.iter().filter_map(|a| a.target.as_ref())) {
            TallyOutcome::Winner { target, .. }
                if state.is_protected(&target) && config.rules.same_guard_kill_is_empty =>
            {
                Vec::new()
            }
            TallyOutcome::Winner { target, votes } => {
                vec![Effect::new(EffectKind::SetNightKill { votes }).on(target)]
            }
            TallyOutcome::Tie { .. } | TallyOutcome::NoVotes => Vec::new(),
        }
    }
}
