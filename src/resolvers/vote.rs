//! Day discussion and elimination vote.

use crate::core::{ActionKind, GameConfig, GameState, Role, SubmittedAction};
use crate::effects::{CancelReason, Effect, EffectKind};

use super::{first_per_player, plurality, Resolver, TallyOutcome};

/// Resolves `Vote` actions with the same strict-plurality count as the
/// wolves. A tie or an empty ballot box eliminates nobody and records a
/// canceled `VoteEliminate`.
pub struct VoteResolver;

impl Resolver for VoteResolver {
    fn resolve(
        &self,
        actions: &[SubmittedAction],
        state: &GameState,
        _config: &GameConfig,
    ) -> Vec<Effect> {
        let (ballots, _) = first_per_player(actions, ActionKind::Vote);

        match plurality(ballots.iter().filter_map(|a| a.target.as_ref())) {
            TallyOutcome::Winner { target, votes } => {
                let is_hunter = state.player(&target).is_some_and(|p| p.role == Role::Hunter);
                let mut effects =
                    vec![Effect::new(EffectKind::VoteEliminate { votes }).on(target.clone())];
                if is_hunter {
                    effects.push(Effect::new(EffectKind::HunterTriggered).on(target));
                }
                effects
            }
            TallyOutcome::Tie { votes } => {
                let tied = Effect::new(EffectKind::VoteEliminate { votes });
                vec![tied.cancel(CancelReason::VoteTied)]
            }
            TallyOutcome::NoVotes => {
                let empty = Effect::new(EffectKind::VoteEliminate { votes: 0 });
                vec![empty.cancel(CancelReason::NoVotes)]
            }
        }
    }
}

/// Speech has no consequence on game state.
pub struct DayResolver;

impl Resolver for DayResolver {
    fn resolve(
        &self,
        _actions: &[SubmittedAction],
        _state: &GameState,
        _config: &GameConfig,
    ) -> Vec<Effect> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ActionUse, Phase};
    use crate::resolvers::test_support::{id, state_with};

    fn vote(voter: &str, target: &str) -> SubmittedAction {
        SubmittedAction::new(voter, ActionKind::Vote, Some(target), Phase::Vote, 1)
    }

    fn roster() -> GameState {
        state_with(&[
            ("a", Role::Villager),
            ("b", Role::Villager),
            ("c", Role::Werewolf),
            ("h", Role::Hunter),
        ])
    }

    #[test]
    fn test_elimination() {
        let state = roster();
        let effects = VoteResolver.resolve(
            &[vote("a", "c"), vote("b", "c"), vote("c", "a")],
            &state,
            &GameConfig::standard(),
        );

        assert_eq!(effects.len(), 1);
        assert_eq!(effects[0].kind, EffectKind::VoteEliminate { votes: 2 });
        assert_eq!(effects[0].target, Some(id("c")));
    }

    #[test]
    fn test_tie() {
        let state = roster();
        let effects = VoteResolver.resolve(
            &[vote("a", "c"), vote("c", "a")],
            &state,
            &GameConfig::standard(),
        );

        assert_eq!(effects.len(), 1);
        assert_eq!(effects[0].canceled, Some(CancelReason::VoteTied));
        assert_eq!(effects[0].target, None);
    }

    #[test]
    fn test_no_votes() {
        let state = roster();
        let effects = VoteResolver.resolve(&[], &state, &GameConfig::standard());
        assert_eq!(effects[0].canceled, Some(CancelReason::NoVotes));
    }

    #[test]
    fn test_eliminated_hunter_triggers() {
        let state = roster();
        let effects = VoteResolver.resolve(&[vote("a", "h")], &state, &GameConfig::standard());

        assert_eq!(effects.len(), 2);
        assert_eq!(effects[1].kind, EffectKind::HunterTriggered);
        assert_eq!(effects[1].target, Some(id("h")));
    }

    #[test]
    fn test_day_has_no_effects() {
        let state = roster();
        let speech = SubmittedAction::stamp(ActionUse::speak("a", "c is a wolf"), Phase::Day, 1);
        assert!(DayResolver.resolve(&[speech], &state, &GameConfig::standard()).is_empty());
    }
}
