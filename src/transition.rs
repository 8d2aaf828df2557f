use std::{cmp::Ordering, collections::HashMap, fmt::Display, iter};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::plate::Plate;

/// `count` plates of one denomination, per side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entry {
    pub denomination: Plate,
    pub count: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Add,
    Remove,
}

/// One instruction for the lifter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Step {
    pub action: Action,
    pub denomination: Plate,
    pub count: usize,
}

impl Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let plural = if self.count == 1 { "" } else { "s" };
        let (verb, preposition) = match self.action {
            Action::Add => ("Add", "to"),
            Action::Remove => ("Remove", "from"),
        };
        write!(
            f,
            "{verb} {} × {} lb plate{plural} {preposition} each side",
            self.count, self.denomination
        )
    }
}

/// The plate changes, per side, between two loaded bars.
///
/// Both lists are heaviest denomination first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transition {
    add: Vec<Entry>,
    remove: Vec<Entry>,
}

impl Transition {
    #[must_use]
    pub fn add(&self) -> &[Entry] {
        &self.add
    }

    #[must_use]
    pub fn remove(&self) -> &[Entry] {
        &self.remove
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.add.is_empty() && self.remove.is_empty()
    }

    /// The transition back the other way.
    #[must_use]
    pub fn reversed(&self) -> Transition {
        Transition {
            add: self.remove.clone(),
            remove: self.add.clone(),
        }
    }

    /// Plates handled on each side.
    #[must_use]
    pub fn plate_moves(&self) -> usize {
        self.add
            .iter()
            .chain(&self.remove)
            .map(|entry| entry.count)
            .sum()
    }

    /// Instructions in the order to perform them: strip first, then load.
    #[must_use]
    pub fn steps(&self) -> Vec<Step> {
        let removals = self.remove.iter().map(|entry| Step {
            action: Action::Remove,
            denomination: entry.denomination,
            count: entry.count,
        });
        let additions = self.add.iter().map(|entry| Step {
            action: Action::Add,
            denomination: entry.denomination,
            count: entry.count,
        });
        removals.chain(additions).collect()
    }

    #[must_use]
    pub fn next_step(&self) -> Option<Step> {
        self.steps().into_iter().next()
    }

    /// Applies this transition to `previous`, returning the resulting stack
    /// heaviest first. Removals of plates that are not there are ignored.
    #[must_use]
    pub fn apply(&self, previous: &[Plate]) -> Vec<Plate> {
        let mut counts = previous.iter().copied().counts();
        for entry in &self.remove {
            if let Some(count) = counts.get_mut(&entry.denomination) {
                *count = count.saturating_sub(entry.count);
            }
        }
        for entry in &self.add {
            *counts.entry(entry.denomination).or_default() += entry.count;
        }
        counts
            .into_iter()
            .sorted_unstable_by(|(a, _), (b, _)| b.cmp(a))
            .flat_map(|(plate, count)| iter::repeat_n(plate, count))
            .collect()
    }
}

/// Computes the per-denomination changes that turn `previous` into `next`.
///
/// Plates of one weight are interchangeable, so the per-denomination count
/// difference is the smallest possible edit.
#[must_use]
pub fn diff(previous: &[Plate], next: &[Plate]) -> Transition {
    let before: HashMap<Plate, usize> = previous.iter().copied().counts();
    let after: HashMap<Plate, usize> = next.iter().copied().counts();

    let mut transition = Transition::default();

    for denomination in before
        .keys()
        .chain(after.keys())
        .copied()
        .unique()
        .sorted_unstable_by(|a, b| b.cmp(a))
    {
        let had = before.get(&denomination).copied().unwrap_or(0);
        let wants = after.get(&denomination).copied().unwrap_or(0);

        match wants.cmp(&had) {
            Ordering::Greater => transition.add.push(Entry {
                denomination,
                count: wants - had,
            }),
            Ordering::Less => transition.remove.push(Entry {
                denomination,
                count: had - wants,
            }),
            Ordering::Equal => {}
        }
    }

    debug!(
        add = transition.add.len(),
        remove = transition.remove.len(),
        "computed transition"
    );

    transition
}
