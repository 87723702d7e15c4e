//! Player identification and per-player records.
//!
//! ## PlayerId
//!
//! Opaque string identifier chosen by the host (seat name, account id, ...).
//!
//! ## PlayerRecord
//!
//! The authoritative per-player data owned by `GameState`. Records are never
//! removed once added: the roster is fixed for a game instance.

use serde::{Deserialize, Serialize};

use super::role::{Camp, Role};

/// Player identifier.
///
/// Ordering is lexicographic; it is used wherever the engine needs a
/// deterministic iteration order over players.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub String);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PlayerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Everything the engine knows about a single player.
///
/// `has_antidote` / `has_poison` only ever go from `true` to `false`.
/// `last_protected` is only meaningful for guards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub id: PlayerId,
    pub role: Role,
    pub camp: Camp,
    pub alive: bool,
    /// Witch only: the single-use antidote is still available.
    pub has_antidote: bool,
    /// Witch only: the single-use poison is still available.
    pub has_poison: bool,
    /// Guard only: target protected on the previous night.
    pub last_protected: Option<PlayerId>,
}

impl PlayerRecord {
    /// Create a living player. Witches start with both potions.
    pub fn new(id: PlayerId, role: Role, camp: Camp) -> Self {
        let is_witch = role == Role::Witch;
        Self {
            id,
            role,
            camp,
            alive: true,
            has_antidote: is_witch,
            has_poison: is_witch,
            last_protected: None,
        }
    }

    #[must_use]
    pub fn is_good(&self) -> bool {
        self.camp == Camp::Good
    }

    #[must_use]
    pub fn is_wolf(&self) -> bool {
        self.role == Role::Werewolf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_basics() {
        let id = PlayerId::new("alice");
        assert_eq!(id.as_str(), "alice");
        assert_eq!(format!("{}", id), "alice");
        assert_eq!(PlayerId::from("alice"), id);
    }

    #[test]
    fn test_player_id_ordering() {
        let mut ids = vec![PlayerId::new("w2"), PlayerId::new("v1"), PlayerId::new("w1")];
        ids.sort();
        assert_eq!(ids, vec![PlayerId::new("v1"), PlayerId::new("w1"), PlayerId::new("w2")]);
    }

    #[test]
    fn test_witch_starts_with_potions() {
        let witch = PlayerRecord::new(PlayerId::new("w"), Role::Witch, Camp::Good);
        assert!(witch.has_antidote);
        assert!(witch.has_poison);
        assert!(witch.alive);

        let villager = PlayerRecord::new(PlayerId::new("v"), Role::Villager, Camp::Good);
        assert!(!villager.has_antidote);
        assert!(!villager.has_poison);
        assert!(villager.is_good());
        assert!(!villager.is_wolf());
    }
}
