//! Bounded breadth-first coverage of a single grid.

use std::collections::{HashSet, VecDeque};

use nalgebra::Point2;

use crate::grid::{Grid, cardinal_directions};

/// Whether a step count or shortest distance is even or odd.
///
/// The four-connected grid is bipartite, so a cell can be stood on after
/// exactly `n` steps only if its shortest distance has the same parity as
/// `n` (backtracking burns steps two at a time).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    Even,
    Odd,
}

impl Parity {
    /// The parity of a step count.
    #[must_use]
    pub fn of(value: u64) -> Self {
        if value % 2 == 0 { Self::Even } else { Self::Odd }
    }

    /// The opposite parity.
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Self::Even => Self::Odd,
            Self::Odd => Self::Even,
        }
    }
}

/// Reachable-cell counts of one bounded exploration, split by the parity
/// of each cell's shortest distance from the entry point.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Coverage {
    /// Cells whose shortest distance is even.
    pub even: u64,
    /// Cells whose shortest distance is odd.
    pub odd: u64,
}

impl Coverage {
    fn record(&mut self, distance: u64) {
        match Parity::of(distance) {
            Parity::Even => self.even += 1,
            Parity::Odd => self.odd += 1,
        }
    }

    /// The count for one parity.
    #[must_use]
    pub fn select(&self, parity: Parity) -> u64 {
        match parity {
            Parity::Even => self.even,
            Parity::Odd => self.odd,
        }
    }

    /// The count regardless of parity.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.even + self.odd
    }
}

impl Grid {
    /// Explore from `entry` up to `budget` steps and count the reachable
    /// cells by shortest-distance parity.
    ///
    /// Breadth-first search over cardinal neighbors: a cell is counted the
    /// first time it is reached, at its shortest distance, and never
    /// expanded beyond the budget. A negative budget reaches nothing, not
    /// even the entry. Pure function of its inputs.
    #[must_use]
    pub fn coverage_from(&self, entry: Point2<i32>, budget: i64) -> Coverage {
        let mut coverage = Coverage::default();
        let Ok(budget) = u64::try_from(budget) else {
            return coverage;
        };
        if !self.point_in_bounds(entry) || self.is_rock(entry) {
            return coverage;
        }

        let mut queue = VecDeque::new();
        let mut visited = HashSet::new();

        queue.push_back((entry, 0u64));
        visited.insert(entry);
        coverage.record(0);

        while let Some((point, distance)) = queue.pop_front() {
            if distance == budget {
                continue;
            }
            let next_distance = distance + 1;
            // visit cardinal directions
            for neighbor in cardinal_directions()
                .into_iter()
                .map(|direction| point + direction)
            {
                // filter for bounds, no rocks, and not visited
                if self.point_in_bounds(neighbor)
                    && !self.is_rock(neighbor)
                    && visited.insert(neighbor)
                {
                    coverage.record(next_distance);
                    queue.push_back((neighbor, next_distance));
                }
            }
        }

        coverage
    }
}
