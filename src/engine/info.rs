//! Read-only projection of the current phase for hosts and UIs.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{GameState, Phase, PlayerId, Role};
use crate::phases::PhaseManager;

/// What a role may see right now.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Observation {
    /// The witch learns tonight's victim (or that there is none).
    NightKillTarget(Option<PlayerId>),
    /// The hunter who may shoot now.
    PendingShot(PlayerId),
}

/// An observation addressed to the players of one role.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleView {
    pub role: Role,
    pub observation: Observation,
}

/// Snapshot of the current phase.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseInfo {
    pub phase: Phase,
    pub round: u32,
    /// Index within the night sub-phases.
    pub sub_step: Option<usize>,
    /// Configured time limit for the host's scheduler.
    pub timeout: Duration,
    /// Roles that must act now, in step order.
    pub acting_roles: Vec<Role>,
    pub views: Vec<RoleView>,
}

impl PhaseInfo {
    /// Project the current phase.
    pub fn project(state: &GameState, phases: &PhaseManager) -> Self {
        let acting_roles = phases.acting_roles(state);

        let mut views = Vec::new();
        match state.phase {
            Phase::NightWitch if acting_roles.contains(&Role::Witch) => views.push(RoleView {
                role: Role::Witch,
                observation: Observation::NightKillTarget(state.context.kill_target.clone()),
            }),
            Phase::NightHunter | Phase::DayHunter => {
                if let Some(hunter) = &state.context.triggered_hunter {
                    views.push(RoleView {
                        role: Role::Hunter,
                        observation: Observation::PendingShot(hunter.clone()),
                    });
                }
            }
            _ => {}
        }

        Self {
            phase: state.phase,
            round: state.round,
            sub_step: state.phase.sub_step(),
            timeout: phases.config().timeout(state.phase),
            acting_roles,
            views,
        }
    }

    /// The kill target visible to the witch, if this is the witch's turn.
    #[must_use]
    pub fn witch_kill_target(&self) -> Option<&PlayerId> {
        self.views.iter().find_map(|view| match &view.observation {
            Observation::NightKillTarget(target) if view.role == Role::Witch => target.as_ref(),
            _ => None,
        })
    }
}
