//! Per-phase conflict resolution.
//!
//! Each phase that collects actions has a `Resolver` that turns the phase's
//! buffered actions into an ordered list of effects:
//!
//! ```text
//! (actions, &GameState, &GameConfig) -> Vec<Effect>
//! ```
//!
//! Resolvers only read. They never mutate state, so the same inputs always
//! produce the same effects and a phase can be re-resolved for replays or
//! tests.

mod tally;
mod guard;
mod wolf;
mod witch;
mod seer;
mod night;
mod hunter;
mod vote;

pub use tally::{plurality, TallyOutcome};
pub use guard::GuardResolver;
pub use wolf::WolfResolver;
pub use witch::WitchResolver;
pub use seer::SeerResolver;
pub use night::NightResolver;
pub use hunter::HunterResolver;
pub use vote::{DayResolver, VoteResolver};

use rustc_hash::FxHashSet;

use crate::core::{ActionKind, GameConfig, GameState, Phase, SubmittedAction};
use crate::effects::Effect;

/// Turns a phase's buffered actions into effects.
pub trait Resolver: Send + Sync {
    /// Resolve the actions of one phase.
    ///
    /// Must be deterministic and must not depend on anything but its
    /// arguments.
    fn resolve(
        &self,
        actions: &[SubmittedAction],
        state: &GameState,
        config: &GameConfig,
    ) -> Vec<Effect>;
}

static GUARD: GuardResolver = GuardResolver;
static WOLF: WolfResolver = WolfResolver;
static WITCH: WitchResolver = WitchResolver;
static SEER: SeerResolver = SeerResolver;
static NIGHT: NightResolver = NightResolver;
static HUNTER: HunterResolver = HunterResolver;
static DAY: DayResolver = DayResolver;
static VOTE: VoteResolver = VoteResolver;

/// Look up the resolver for a phase. `Start` and `End` have none.
#[must_use]
pub fn resolver_for(phase: Phase) -> Option<&'static dyn Resolver> {
    match phase {
        Phase::NightGuard => Some(&GUARD),
        Phase::NightWolf => Some(&WOLF),
        Phase::NightWitch => Some(&WITCH),
        Phase::NightSeer => Some(&SEER),
        Phase::NightResolve => Some(&NIGHT),
        Phase::NightHunter | Phase::DayHunter => Some(&HUNTER),
        Phase::Day => Some(&DAY),
        Phase::Vote => Some(&VOTE),
        Phase::Start | Phase::End => None,
    }
}

/// Split actions of one kind into each player's first submission and the
/// later duplicates, both in submission order.
pub(crate) fn first_per_player<'a>(
    actions: &'a [SubmittedAction],
    kind: ActionKind,
) -> (Vec<&'a SubmittedAction>, Vec<&'a SubmittedAction>) {
    let mut seen = FxHashSet::default();
    actions
        .iter()
        .filter(|a| a.kind == kind)
        .partition(|a| {
            let action: &'a SubmittedAction = *a;
            seen.insert(&action.player)
        })
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::core::{GameState, PlayerId, Role};

    /// Build a state with the given roster, already at round 1.
    pub fn state_with(roster: &[(&str, Role)]) -> GameState {
        let mut state = GameState::new();
        for (id, role) in roster {
            state
                .add_player(PlayerId::new(*id), *role, role.camp())
                .unwrap();
        }
        state.transition_to(crate::core::Phase::NightGuard);
        state
    }

    pub fn id(s: &str) -> PlayerId {
        PlayerId::new(s)
    }
}
