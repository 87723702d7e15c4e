//! Effect system.
//!
//! Effects are the only channel from resolution to state:
//! - `Effect`: a typed, cancelable mutation intent
//! - `EffectKind`: what the effect does, with its payload
//! - `CancelReason`: why an attempt was refused
//!
//! Resolvers produce effects from a read-only view of the game; the state
//! applies them. Keeping the two apart makes resolution replayable.

mod effect;

pub use effect::{CancelReason, Effect, EffectKind};
