//! Game setup: role decks and deterministic dealing.

mod deck;

pub use deck::{deal_roles, RoleDeck};
