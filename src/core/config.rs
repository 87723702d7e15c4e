//! Game configuration types.
//!
//! Hosts configure the engine at startup by providing:
//! - `RuleConfig`: house-rule toggles
//! - `PhaseConfig`: per-phase ordered action steps, timeout, and successor
//! - `GameConfig`: combines both
//!
//! Configuration is pure data. Once handed to an engine it is never mutated.

use std::time::Duration;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::action::ActionKind;
use super::role::Role;

/// Game phases.
///
/// Night is split into ordered sub-phases (guard, wolf, witch, seer,
/// resolve). Hunter phases are only entered when a hunter has just died.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Phase {
    Start,
    NightGuard,
    NightWolf,
    NightWitch,
    NightSeer,
    NightResolve,
    NightHunter,
    Day,
    Vote,
    DayHunter,
    End,
}

impl Phase {
    /// The night sub-phases, in order.
    pub const NIGHT_STEPS: [Phase; 5] = [
        Phase::NightGuard,
        Phase::NightWolf,
        Phase::NightWitch,
        Phase::NightSeer,
        Phase::NightResolve,
    ];

    /// The first night sub-phase. Entering it starts a new round.
    pub const FIRST_NIGHT: Phase = Phase::NightGuard;

    /// Index of this phase within the night sub-phases.
    #[must_use]
    pub fn sub_step(self) -> Option<usize> {
        Self::NIGHT_STEPS.iter().position(|p| *p == self)
    }

    /// Night sub-phases plus the night hunter phase.
    #[must_use]
    pub fn is_night(self) -> bool {
        self.sub_step().is_some() || self == Phase::NightHunter
    }

    #[must_use]
    pub fn is_hunter(self) -> bool {
        matches!(self, Phase::NightHunter | Phase::DayHunter)
    }

    #[must_use]
    pub fn is_terminal(self) -> bool {
        self == Phase::End
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Start => "start",
            Phase::NightGuard => "night-guard",
            Phase::NightWolf => "night-wolf",
            Phase::NightWitch => "night-witch",
            Phase::NightSeer => "night-seer",
            Phase::NightResolve => "night-resolve",
            Phase::NightHunter => "night-hunter",
            Phase::Day => "day",
            Phase::Vote => "vote",
            Phase::DayHunter => "day-hunter",
            Phase::End => "end",
        };
        f.write_str(name)
    }
}

/// House-rule toggles consulted by the resolvers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    /// The witch may use the antidote on themselves.
    pub witch_can_save_self: bool,
    /// The guard may protect themselves.
    pub guard_can_protect_self: bool,
    /// The guard may protect the same player on consecutive nights.
    pub guard_can_repeat: bool,
    /// A kill aimed at a protected player produces an empty night.
    pub same_guard_kill_is_empty: bool,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            witch_can_save_self: false,
            guard_can_protect_self: true,
            guard_can_repeat: false,
            same_guard_kill_is_empty: true,
        }
    }
}

/// One role's slot in a phase: which actions that role may take.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionStep {
    pub role: Role,
    pub actions: SmallVec<[ActionKind; 2]>,
}

impl ActionStep {
    /// Create a step for a role.
    pub fn new(role: Role, actions: impl IntoIterator<Item = ActionKind>) -> Self {
        Self {
            role,
            actions: actions.into_iter().collect(),
        }
    }
}

/// Configuration for a single phase.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseConfig {
    /// Ordered action steps.
    pub steps: Vec<ActionStep>,

    /// Suggested time limit. Enforcement belongs to the host's scheduler.
    pub timeout: Duration,

    /// Declared successor. `None` means the terminal phase.
    pub next: Option<Phase>,
}

impl PhaseConfig {
    /// Create a phase configuration with no action steps.
    pub fn new(timeout: Duration, next: Option<Phase>) -> Self {
        Self {
            steps: Vec::new(),
            timeout,
            next,
        }
    }

    /// Add an action step.
    #[must_use]
    pub fn with_step(mut self, step: ActionStep) -> Self {
        self.steps.push(step);
        self
    }

    /// Add a step open to every role.
    #[must_use]
    pub fn with_everyone(mut self, actions: &[ActionKind]) -> Self {
        for role in Role::ALL {
            self.steps.push(ActionStep::new(role, actions.iter().copied()));
        }
        self
    }
}

/// Complete game configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub rules: RuleConfig,
    pub phases: FxHashMap<Phase, PhaseConfig>,
}

impl GameConfig {
    /// Create an empty configuration with default rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// The classic phase graph.
    ///
    /// ```text
    /// start -> night-guard -> night-wolf -> night-witch -> night-seer
    ///       -> night-resolve -> day -> vote -> night-guard ...
    /// ```
    ///
    /// Hunter phases declare the phase they return to.
    pub fn standard() -> Self {
        let night = Duration::from_secs(30);
        Self::new()
            .with_phase(Phase::Start, PhaseConfig::new(Duration::ZERO, Some(Phase::NightGuard)))
            .with_phase(
                Phase::NightGuard,
                PhaseConfig::new(night, Some(Phase::NightWolf))
                    .with_step(ActionStep::new(Role::Guard, [ActionKind::Protect])),
            )
            .with_phase(
                Phase::NightWolf,
                PhaseConfig::new(night, Some(Phase::NightWitch))
                    .with_step(ActionStep::new(Role::Werewolf, [ActionKind::Kill])),
            )
            .with_phase(
                Phase::NightWitch,
                PhaseConfig::new(night, Some(Phase::NightSeer)).with_step(ActionStep::new(
                    Role::Witch,
                    [ActionKind::Antidote, ActionKind::Poison],
                )),
            )
            .with_phase(
                Phase::NightSeer,
                PhaseConfig::new(night, Some(Phase::NightResolve))
                    .with_step(ActionStep::new(Role::Seer, [ActionKind::Check])),
            )
            .with_phase(Phase::NightResolve, PhaseConfig::new(Duration::ZERO, Some(Phase::Day)))
            .with_phase(
                Phase::NightHunter,
                PhaseConfig::new(night, Some(Phase::Day)).with_step(ActionStep::new(
                    Role::Hunter,
                    [ActionKind::Shoot, ActionKind::Skip],
                )),
            )
            .with_phase(
                Phase::Day,
                PhaseConfig::new(Duration::from_secs(120), Some(Phase::Vote))
                    .with_everyone(&[ActionKind::Speak]),
            )
            .with_phase(
                Phase::Vote,
                PhaseConfig::new(Duration::from_secs(60), Some(Phase::NightGuard))
                    .with_everyone(&[ActionKind::Vote]),
            )
            .with_phase(
                Phase::DayHunter,
                PhaseConfig::new(night, Some(Phase::NightGuard)).with_step(ActionStep::new(
                    Role::Hunter,
                    [ActionKind::Shoot, ActionKind::Skip],
                )),
            )
    }

    /// Replace the rule toggles.
    #[must_use]
    pub fn with_rules(mut self, rules: RuleConfig) -> Self {
        self.rules = rules;
        self
    }

    /// Add or replace a phase configuration.
    #[must_use]
    pub fn with_phase(mut self, phase: Phase, config: PhaseConfig) -> Self {
        self.phases.insert(phase, config);
        self
    }

    /// Get a phase config.
    #[must_use]
    pub fn phase(&self, phase: Phase) -> Option<&PhaseConfig> {
        self.phases.get(&phase)
    }

    /// Declared timeout of a phase, zero if unconfigured.
    #[must_use]
    pub fn timeout(&self, phase: Phase) -> Duration {
        self.phase(phase).map_or(Duration::ZERO, |p| p.timeout)
    }
}
