//! Role decks.
//!
//! A deck is the multiset of roles for a game. Dealing shuffles it with a
//! seeded `GameRng`, so the same seed always gives the same assignment.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{Camp, GameRng, PlayerId, Role};
use crate::engine::Engine;
use crate::error::{EngineError, EngineResult};

/// Roles to deal, one per player.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDeck {
    roles: Vec<Role>,
}

impl RoleDeck {
    pub fn new(roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            roles: roles.into_iter().collect(),
        }
    }

    /// The standard deck for 6 to 12 players.
    ///
    /// A third of the table (rounded down) are werewolves; the seer, witch,
    /// guard and hunter are always present; everyone else is a villager.
    #[must_use]
    pub fn classic(players: usize) -> Option<Self> {
        if !(6..=12).contains(&players) {
            return None;
        }
        let wolves = players / 3;
        let specials = [Role::Seer, Role::Witch, Role::Guard, Role::Hunter];
        let villagers = players - wolves - specials.len();

        let roles = std::iter::repeat(Role::Werewolf)
            .take(wolves)
            .chain(specials)
            .chain(std::iter::repeat(Role::Villager).take(villagers));
        Some(Self::new(roles))
    }

    /// Add one more role.
    #[must_use]
    pub fn with(mut self, role: Role) -> Self {
        self.roles.push(role);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    #[must_use]
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    /// How many cards of a camp are in the deck.
    #[must_use]
    pub fn count_camp(&self, camp: Camp) -> usize {
        self.roles.iter().filter(|role| role.camp() == camp).count()
    }

    /// Deal the deck onto players and seat them in an engine.
    pub fn seat(&self, engine: &Engine, player_ids: &[PlayerId], seed: u64) -> EngineResult<()> {
        for (id, role) in deal_roles(player_ids, &self.roles, seed)? {
            engine.add_player(id, role, role.camp())?;
        }
        Ok(())
    }
}

/// Shuffle `roles` onto `player_ids`.
///
/// The result keeps the order of `player_ids`. Same inputs and seed, same
/// assignment.
pub fn deal_roles(
    player_ids: &[PlayerId],
    roles: &[Role],
    seed: u64,
) -> EngineResult<Vec<(PlayerId, Role)>> {
    if player_ids.len() != roles.len() {
        return Err(EngineError::RosterMismatch {
            players: player_ids.len(),
            roles: roles.len(),
        });
    }

    let mut deck = roles.to_vec();
    let mut rng = GameRng::new(seed);
    rng.shuffle(&mut deck);
    debug!(players = player_ids.len(), seed, "dealt roles");

    Ok(player_ids.iter().cloned().zip(deck).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ids(n: usize) -> Vec<PlayerId> {
        (1..=n).map(|i| PlayerId::new(format!("p{i}"))).collect()
    }

    #[test]
    fn test_classic_sizes() {
        assert!(RoleDeck::classic(5).is_none());
        assert!(RoleDeck::classic(13).is_none());

        let six = RoleDeck::classic(6).unwrap();
        assert_eq!(six.len(), 6);
        assert_eq!(six.count_camp(Camp::Evil), 2);
        assert!(!six.roles().contains(&Role::Villager));

        let twelve = RoleDeck::classic(12).unwrap();
        assert_eq!(twelve.count_camp(Camp::Evil), 4);
        assert_eq!(twelve.roles().iter().filter(|r| **r == Role::Villager).count(), 4);
        for role in [Role::Seer, Role::Witch, Role::Guard, Role::Hunter] {
            assert_eq!(twelve.roles().iter().filter(|r| **r == role).count(), 1);
        }
    }

    #[test]
    fn test_deal_is_deterministic() {
        let deck = RoleDeck::classic(9).unwrap();
        let players = ids(9);

        let a = deal_roles(&players, deck.roles(), 42).unwrap();
        let b = deal_roles(&players, deck.roles(), 42).unwrap();
        assert_eq!(a, b);

        let dealt: Vec<PlayerId> = a.iter().map(|(id, _)| id.clone()).collect();
        assert_eq!(dealt, players);
    }

    #[test]
    fn test_deal_size_mismatch() {
        let result = deal_roles(&ids(3), &[Role::Werewolf, Role::Seer], 1);
        assert_eq!(result, Err(EngineError::RosterMismatch { players: 3, roles: 2 }));
    }

    #[test]
    fn test_seat() {
        let engine = Engine::standard();
        let deck = RoleDeck::new([Role::Werewolf, Role::Seer]).with(Role::Villager);
        deck.seat(&engine, &ids(3), 7).unwrap();

        let players = engine.players();
        assert_eq!(players.len(), 3);
        assert_eq!(players.iter().filter(|p| p.is_wolf()).count(), 1);
        assert!(players.iter().all(|p| p.camp == p.role.camp()));
    }

    proptest! {
        #[test]
        fn deal_is_a_permutation(n in 6usize..=12, seed in any::<u64>()) {
            let deck = RoleDeck::classic(n).unwrap();
            let dealt = deal_roles(&ids(n), deck.roles(), seed).unwrap();

            let mut expected = deck.roles().to_vec();
            let mut got: Vec<Role> = dealt.into_iter().map(|(_, role)| role).collect();
            expected.sort();
            got.sort();
            prop_assert_eq!(expected, got);
        }
    }
}
