//! Notifications delivered to observers.
//!
//! Each notification says who it is meant for through an `Audience`. The
//! engine never decides how notifications reach players; hosts filter by
//! audience.

use serde::{Deserialize, Serialize};

use crate::core::{Camp, Phase, PlayerId};
use crate::effects::{Effect, EffectKind};
use crate::rules::Victory;

/// Who a notification is addressed to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Audience {
    Everyone,
    Player(PlayerId),
    Camp(Camp),
}

impl Audience {
    /// The audience for an externally visible effect.
    #[must_use]
    pub fn for_effect(effect: &Effect) -> Self {
        match (&effect.kind, &effect.source) {
            (EffectKind::SeerCheck { .. }, Some(seer)) => Audience::Player(seer.clone()),
            (EffectKind::SetNightKill { .. }, _) => Audience::Camp(Camp::Evil),
            _ => Audience::Everyone,
        }
    }

    /// Check if a player with the given id and camp is addressed.
    #[must_use]
    pub fn includes(&self, player: &PlayerId, camp: Camp) -> bool {
        match self {
            Audience::Everyone => true,
            Audience::Player(id) => id == player,
            Audience::Camp(c) => *c == camp,
        }
    }
}

/// A game notification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// An externally visible effect was applied.
    Effect {
        effect: Effect,
        phase: Phase,
        round: u32,
        audience: Audience,
    },

    /// The game moved to a new phase.
    PhaseChanged { from: Phase, to: Phase, round: u32 },

    /// A camp won.
    GameEnded { winner: Victory, round: u32 },
}

impl GameEvent {
    /// Wrap an applied effect for notification.
    pub fn from_effect(effect: Effect, phase: Phase, round: u32) -> Self {
        let audience = Audience::for_effect(&effect);
        GameEvent::Effect {
            effect,
            phase,
            round,
            audience,
        }
    }

    /// Who this event is meant for.
    #[must_use]
    pub fn audience(&self) -> Audience {
        match self {
            GameEvent::Effect { audience, .. } => audience.clone(),
            GameEvent::PhaseChanged { .. } | GameEvent::GameEnded { .. } => Audience::Everyone,
        }
    }
}

/// A chat message routed by phase visibility.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub from: PlayerId,
    pub content: String,
    pub phase: Phase,
    pub round: u32,
    /// Players who hear the message. The sender is not included.
    pub recipients: Vec<PlayerId>,
}
