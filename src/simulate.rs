//! Direct breadth-first search over the tiled plane.
//!
//! Correct for any grid and any budget, but visits O(steps²) cells, so it
//! is only tractable for small budgets. The closed form in
//! [`closed_form`](crate::closed_form) exists to avoid ever running this
//! at full scale; this module serves the small-budget fallback and
//! cross-validates the closed form in tests.

use std::collections::{HashSet, VecDeque};

use nalgebra::{Point2, Vector2};

use crate::coverage::Parity;
use crate::grid::Grid;

/// Count cells reachable in exactly `steps` steps with the grid tiled
/// infinitely in every direction.
///
/// Walks the unbounded plane directly, looking rocks up through modular
/// wrapping into the base grid. A cell counts when its shortest distance
/// is within the budget and shares the budget's parity.
#[must_use]
pub fn count_exact(grid: &Grid, steps: u64) -> u64 {
    let target = Parity::of(steps);
    let start = Point2::new(i64::from(grid.start().x), i64::from(grid.start().y));

    let mut queue = VecDeque::new();
    let mut visited = HashSet::new();
    let mut count = 0u64;

    queue.push_back((start, 0u64));
    visited.insert(start);
    if target == Parity::Even {
        count += 1;
    }

    while let Some((point, distance)) = queue.pop_front() {
        if distance == steps {
            continue;
        }
        let next_distance = distance + 1;
        for neighbor in [
            Vector2::x(),
            Vector2::y(),
            Vector2::x() * -1,
            Vector2::y() * -1,
        ]
        .into_iter()
        .map(|direction| point + direction)
        {
            if !is_rock_tiled(grid, neighbor) && visited.insert(neighbor) {
                if Parity::of(next_distance) == target {
                    count += 1;
                }
                queue.push_back((neighbor, next_distance));
            }
        }
    }

    count
}

/// Look up a plane coordinate in the base grid's rocks by wrapping it into
/// grid bounds.
fn is_rock_tiled(grid: &Grid, point: Point2<i64>) -> bool {
    let x = i32::try_from(point.x.rem_euclid(i64::from(grid.width())))
        .expect("wrapped coordinate is within grid bounds");
    let y = i32::try_from(point.y.rem_euclid(i64::from(grid.height())))
        .expect("wrapped coordinate is within grid bounds");
    grid.is_rock(Point2::new(x, y))
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
    fn a_zero_budget_reaches_only_the_start() {
        let grid = parse("...\n.S.\n...");
        assert_eq!(count_exact(&grid, 0), 1);
    }

    #[test]
    fn matches_known_counts_on_the_tiled_example_grid() {
        let grid = parse(EXAMPLE_INPUT);
        assert_eq!(count_exact(&grid, 6), 16);
        assert_eq!(count_exact(&grid, 10), 50);
        assert_eq!(count_exact(&grid, 50), 1594);
    }

    #[test]
    fn an_open_plane_reaches_a_square_count_of_cells() {
        let grid = parse("\
.....
.....
..S..
.....
.....
");
        // every cell of the taxicab diamond with matching parity
        assert_eq!(count_exact(&grid, 12), 169);
        assert_eq!(count_exact(&grid, 15), 256);
    }
}
