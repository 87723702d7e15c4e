//! Strict-plurality vote counting, shared by the wolf and day votes.

use rustc_hash::FxHashMap;

use crate::core::PlayerId;

/// Outcome of a vote count.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TallyOutcome {
    /// One target has strictly more votes than every other.
    Winner { target: PlayerId, votes: u32 },
    /// Two or more targets share the highest count.
    Tie { votes: u32 },
    /// Nobody voted.
    NoVotes,
}

impl TallyOutcome {
    /// The winning target, if any.
    #[must_use]
    pub fn winner(&self) -> Option<&PlayerId> {
        match self {
            TallyOutcome::Winner { target, .. } => Some(target),
            _ => None,
        }
    }
}

/// Count votes and pick the unique maximum.
///
/// The result does not depend on the order votes were cast in.
///
/// ```
/// use werewolf_engine::core::PlayerId;
/// use werewolf_engine::resolvers::{plurality, TallyOutcome};
///
/// let a = PlayerId::new("a");
/// let b = PlayerId::new("b");
///
/// let outcome = plurality([&a, &b, &a]);
/// assert_eq!(outcome, TallyOutcome::Winner { target: a.clone(), votes: 2 });
///
/// assert_eq!(plurality([&a, &b]), TallyOutcome::Tie { votes: 1 });
/// ```
pub fn plurality<'a>(votes: impl IntoIterator<Item = &'a PlayerId>) -> TallyOutcome {
    let mut counts: FxHashMap<&PlayerId, u32> = FxHashMap::default();
    for target in votes {
        *counts.entry(target).or_insert(0) += 1;
    }

    let Some(&top) = counts.values().max() else {
        return TallyOutcome::NoVotes;
    };

    let mut leaders = counts.iter().filter(|entry| *entry.1 == top);
    match (leaders.next(), leaders.next()) {
        (Some((target, _)), None) => TallyOutcome::Winner {
            target: (*target).clone(),
            votes: top,
        },
        _ => TallyOutcome::Tie { votes: top },
    }
}
