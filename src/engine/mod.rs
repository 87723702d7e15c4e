//! The game facade and everything it hands to hosts.

mod event;
mod game;
mod info;
mod observer;
mod replay;

pub use event::{Audience, ChatMessage, GameEvent};
pub use game::Engine;
pub use info::{Observation, PhaseInfo, RoleView};
pub use observer::{EventHandler, HandlerError, MessageHandler, Observers};
pub use replay::{PhaseRecord, ReplayLog, RosterEntry};
