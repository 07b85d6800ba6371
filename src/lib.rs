//! Reachability counting on an infinitely tiled grid.
//!
//! The input is a rectangular character grid: `#` marks a rock, `.` an open
//! cell, and a single `S` the start (itself open). The main question is how
//! many cells can be reached in *exactly* a given number of steps when the
//! grid repeats infinitely in every direction; a bounded mode asks how many
//! cells are reachable *within* a budget on the single grid.
//!
//! # Quick Start
//!
//! Parse a grid and count cells reachable at an exact step budget under
//! infinite tiling:
//!
//! ```
//! use step_counter::{Grid, count_reachable};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let grid: Grid = "...\n.S.\n...".parse()?;
//! assert_eq!(count_reachable(&grid, 7)?, 64);
//! # Ok(())
//! # }
//! ```
//!
//! Or count cells reachable within a budget on the single, non-tiled grid:
//!
//! ```
//! use step_counter::{Grid, count_reachable_within};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let grid: Grid = "...\n.S.\n...".parse()?;
//! assert_eq!(count_reachable_within(&grid, 1), 5);
//! # Ok(())
//! # }
//! ```
//!
//! Large budgets are answered by a closed form over whole-grid tiles, which
//! requires the grid to be square with a centered start and a rock-free
//! border and center cross (see [`closed_form`]). Grids that fail those
//! checks can still be counted by direct simulation for small budgets.

#![warn(clippy::pedantic)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::branches_sharing_code,
    clippy::collection_is_never_read,
    clippy::equatable_if_let,
    clippy::needless_collect,
    clippy::needless_pass_by_ref_mut,
    clippy::option_if_let_else,
    clippy::set_contains_or_insert,
    clippy::suboptimal_flops,
    clippy::suspicious_operation_groupings,
    clippy::trait_duplication_in_bounds,
    clippy::type_repetition_in_bounds,
    clippy::use_self,
    clippy::useless_let_if_seq
)]
#![deny(clippy::unwrap_used)]

pub mod closed_form;
pub mod coverage;
pub mod grid;
pub mod simulate;

pub use closed_form::TilingError;
pub use coverage::{Coverage, Parity};
pub use grid::{Grid, ParseGridError};

/// The largest step budget worth answering by direct simulation when the
/// closed form cannot be used. Simulation visits O(steps²) cells.
pub const SIMULATION_LIMIT: u64 = 500;

/// Counting failed: the grid cannot use the closed form and the budget is
/// too large to simulate.
#[derive(thiserror::Error, Debug)]
#[error("cannot use the tiling closed form and {steps} steps is too many to simulate directly")]
pub struct SolveError {
    /// The requested step budget.
    pub steps: u64,
    /// The precondition that ruled out the closed form.
    #[source]
    pub source: TilingError,
}

/// Count cells reachable in exactly `steps` steps with the grid tiled
/// infinitely in every direction.
///
/// Uses the closed form when the grid meets its preconditions, and falls
/// back to direct simulation for budgets up to [`SIMULATION_LIMIT`]
/// otherwise.
///
/// # Errors
///
/// Returns a [`SolveError`] when the grid fails a closed-form precondition
/// and the budget is beyond [`SIMULATION_LIMIT`].
pub fn count_reachable(grid: &Grid, steps: u64) -> Result<u64, SolveError> {
    match closed_form::count_exact(grid, steps) {
        Ok(count) => Ok(count),
        Err(_) if steps <= SIMULATION_LIMIT => Ok(simulate::count_exact(grid, steps)),
        Err(source) => Err(SolveError { steps, source }),
    }
}

/// Count cells reachable within `steps` steps on the single, non-tiled
/// grid, regardless of distance parity.
#[must_use]
pub fn count_reachable_within(grid: &Grid, steps: u64) -> u64 {
    let budget = i64::try_from(steps).unwrap_or(i64::MAX);
    grid.coverage_from(grid.start(), budget).total()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = "\
...........
.....###.#.
.###.##..#.
..#.#...#..
....#.#....
.##..S####.
.##..#...#.
.......##..
.##.#.####.
.##..##.##.
...........
";

    fn parse(input: &str) -> Grid {
        input.parse().expect("test grid should parse")
    }

    #[test]
    fn counts_through_the_closed_form_for_a_clear_grid() {
        let grid = parse("\
.....
.....
..S..
.....
.....
");
        // on an unobstructed plane, exactly n steps reach (n + 1)² cells
        assert_eq!(count_reachable(&grid, 1000).expect("clear grid"), 1_002_001);
    }

    #[test]
    fn falls_back_to_simulation_when_the_cross_is_obstructed() {
        let grid = parse(EXAMPLE_INPUT);
        assert_eq!(count_reachable(&grid, 50).expect("small budget"), 1594);
    }

    #[test]
    fn reports_infeasible_budgets_on_grids_without_the_closed_form() {
        let grid = parse(EXAMPLE_INPUT);
        let error = count_reachable(&grid, 26_501_365).expect_err("budget too large");
        assert_eq!(error.steps, 26_501_365);
    }

    #[test]
    fn bounded_mode_counts_both_parities_on_the_single_grid() {
        let grid = parse("\
...........
...........
...........
...........
...........
.....S.....
...........
...........
...........
...........
...........
");
        // the radius-6 taxicab ball clipped to the grid: 85 cells minus the
        // four diamond tips that fall outside
        assert_eq!(count_reachable_within(&grid, 6), 81);
    }
}
