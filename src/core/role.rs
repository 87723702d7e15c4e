//! Roles and camps.

use serde::{Deserialize, Serialize};

/// Win-condition alignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Camp {
    Good,
    Evil,
}

impl std::fmt::Display for Camp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Camp::Good => f.write_str("good"),
            Camp::Evil => f.write_str("evil"),
        }
    }
}

/// Hidden role held by a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    Werewolf,
    Villager,
    Seer,
    Witch,
    Guard,
    Hunter,
}

impl Role {
    /// All roles, in a stable order.
    pub const ALL: [Role; 6] = [
        Role::Werewolf,
        Role::Villager,
        Role::Seer,
        Role::Witch,
        Role::Guard,
        Role::Hunter,
    ];

    /// The camp a role normally belongs to.
    #[must_use]
    pub const fn camp(self) -> Camp {
        match self {
            Role::Werewolf => Camp::Evil,
            _ => Camp::Good,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Role::Werewolf => "werewolf",
            Role::Villager => "villager",
            Role::Seer => "seer",
            Role::Witch => "witch",
            Role::Guard => "guard",
            Role::Hunter => "hunter",
        };
        f.write_str(name)
    }
}
