//! # werewolf-engine
//!
//! A phase-driven resolution engine for werewolf-style social deduction
//! games.
//!
//! ## Design Principles
//!
//! 1. **Pure Resolution**: Each phase's resolver reads the buffered actions
//!    and a read-only view of the game and returns a list of effects. It
//!    never mutates anything, so a phase can be replayed exactly.
//!
//! 2. **One Mutation Path**: `GameState::apply_effect` is the only way state
//!    changes. Canceled effects are recorded but never applied.
//!
//! 3. **Configuration Over Convention**: The phase graph, who acts when, and
//!    the house rules live in `GameConfig`, not in code.
//!
//! ## Architecture
//!
//! - **Single Lock**: `Engine` owns all mutable state behind one lock.
//!   Observers are notified only after it is released, so a handler may call
//!   back into the engine.
//!
//! - **Canceled, Not Failed**: Rule violations found during resolution
//!   (guard repeats, an empty antidote) are canceled effects with a reason.
//!   Only validation at submission time returns errors.
//!
//! ## Modules
//!
//! - `core`: Players, roles, actions, configuration, state, RNG
//! - `effects`: Typed, cancelable mutation intents
//! - `resolvers`: One pure resolver per phase
//! - `phases`: Action validation and phase transitions
//! - `rules`: Victory condition
//! - `engine`: The orchestrator, notifications and replay
//! - `setup`: Role decks and deterministic dealing

pub mod core;
pub mod effects;
pub mod engine;
pub mod error;
pub mod phases;
pub mod resolvers;
pub mod rules;
pub mod setup;

// Re-export commonly used types
pub use crate::core::{
    ActionKind, ActionUse, Camp, GameConfig, GameRng, GameState, Phase, PhaseConfig, PlayerId,
    PlayerRecord, Role, RoundContext, RuleConfig, SubmittedAction,
};

pub use crate::effects::{CancelReason, Effect, EffectKind};

pub use crate::engine::{
    Audience, ChatMessage, Engine, GameEvent, HandlerError, PhaseInfo, ReplayLog,
};

pub use crate::error::{EngineError, EngineResult};

pub use crate::phases::PhaseManager;

pub use crate::resolvers::{resolver_for, Resolver};

pub use crate::rules::{check_victory, Victory};

pub use crate::setup::{deal_roles, RoleDeck};
