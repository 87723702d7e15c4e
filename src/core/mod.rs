//! Core engine types: players, roles, actions, configuration, state, RNG.
//!
//! These are the leaf building blocks every other module depends on.

pub mod player;
pub mod role;
pub mod rng;
pub mod config;
pub mod action;
pub mod state;

pub use player::{PlayerId, PlayerRecord};
pub use role::{Camp, Role};
pub use rng::GameRng;
pub use config::{ActionStep, GameConfig, Phase, PhaseConfig, RuleConfig};
pub use action::{ActionKind, ActionUse, SubmittedAction};
pub use state::{ApplyResult, GameState, RoundContext};
