//! Closed-form reachability over whole-grid tiles.
//!
//! The real step budgets are astronomically larger than the grid, so the
//! walk can never be simulated cell by cell. Instead the plane of repeated
//! grid copies is partitioned into a small set of tile roles, each explored
//! once on the base grid, and the answer is a sum of role coverages times
//! role multiplicities.

use checked_sum::CheckedSum;
use nalgebra::Point2;

use crate::coverage::Parity;
use crate::grid::Grid;
use crate::simulate;

/*
The closed form leans on four properties of the grid, checked up front:
a square grid, the start at the exact center, a rock-free border ring, and
a rock-free row and column through the start. Together they guarantee that
the walk crosses from any tile to the next along a straight run of exactly
`dim` steps, so every tile of the plane is entered at a predictable point
at a predictable time:

    ....t....
    ...0T2...
    ..01i32..
    .01iii32.
    lLiiSiiRr
    .7iiii54.
    ..67i54..
    ...6B4...
    ....b....

`i` tiles are fully covered. `T`/`L`/`R`/`B` are entered at the midpoint of
the edge facing the start with `overflow` steps left; `t`/`l`/`r`/`b` are
the same entries one tile further out with `overflow - dim` steps left.
The digit tiles are entered at the corner facing the start, in a "small"
and a "large" variant per diagonal direction, and repeat along each
diagonal edge of the reached diamond.
*/

/// The grid cannot be treated as a repeating tile.
///
/// Distinct from [`ParseGridError`](crate::ParseGridError): the grid itself
/// is well formed, it just fails a geometric precondition of the closed
/// form. Direct simulation remains correct for such grids.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum TilingError {
    #[error("expected a square grid, but found {width}x{height}")]
    NotSquare { width: i32, height: i32 },

    #[error("expected the start at the exact grid center, but found {start}")]
    StartNotCentered { start: Point2<i32> },

    #[error("border row {y} is obstructed by a rock")]
    ObstructedBorderRow { y: i32 },

    #[error("border column {x} is obstructed by a rock")]
    ObstructedBorderColumn { x: i32 },

    #[error("the start row is obstructed by a rock at {rock}")]
    ObstructedStartRow { rock: Point2<i32> },

    #[error("the start column is obstructed by a rock at {rock}")]
    ObstructedStartColumn { rock: Point2<i32> },
}

/// Check the geometric preconditions of the closed form.
///
/// # Errors
///
/// Returns the first [`TilingError`] found.
pub fn check_preconditions(grid: &Grid) -> Result<(), TilingError> {
    let width = grid.width();
    let height = grid.height();
    if width != height {
        return Err(TilingError::NotSquare { width, height });
    }

    let start = grid.start();
    if start.x * 2 + 1 != width || start.y * 2 + 1 != height {
        return Err(TilingError::StartNotCentered { start });
    }

    let last = width - 1;
    for rock in grid.rocks() {
        if rock.y == 0 || rock.y == last {
            return Err(TilingError::ObstructedBorderRow { y: rock.y });
        }
        if rock.x == 0 || rock.x == last {
            return Err(TilingError::ObstructedBorderColumn { x: rock.x });
        }
        if rock.y == start.y {
            return Err(TilingError::ObstructedStartRow { rock: *rock });
        }
        if rock.x == start.x {
            return Err(TilingError::ObstructedStartColumn { rock: *rock });
        }
    }

    Ok(())
}

/// One class of tile in the reached diamond: where the walk enters it, how
/// many steps remain on entry, and how many tiles share the class.
struct TileRole {
    entry: Point2<i32>,
    budget: i64,
    multiplicity: u64,
}

/// The edge and corner roles at a given radius and overflow.
fn boundary_roles(grid: &Grid, radius: u64, overflow: u64) -> Vec<TileRole> {
    let last = grid.width() - 1;
    let mid = last / 2;
    let dim = i64::from(grid.width());
    let overflow = i64::try_from(overflow).expect("overflow is below twice the dimension");

    let mut roles = Vec::with_capacity(16);

    // axis tiles, entered at the midpoint of the edge facing the start tile
    for entry in [
        Point2::new(mid, last), // northward
        Point2::new(mid, 0),    // southward
        Point2::new(last, mid), // westward
        Point2::new(0, mid),    // eastward
    ] {
        // the outermost point tile, often out of reach entirely
        roles.push(TileRole {
            entry,
            budget: overflow - dim,
            multiplicity: 1,
        });
        // the partially covered edge tile inside it
        roles.push(TileRole {
            entry,
            budget: overflow,
            multiplicity: 1,
        });
    }

    // diagonal tiles, entered at the corner facing the start tile
    let small_budget = overflow - 1 - i64::from(mid);
    for entry in [
        Point2::new(0, last),    // north-east quadrant
        Point2::new(last, last), // north-west quadrant
        Point2::new(0, 0),       // south-east quadrant
        Point2::new(last, 0),    // south-west quadrant
    ] {
        roles.push(TileRole {
            entry,
            budget: small_budget,
            multiplicity: radius + 1,
        });
        roles.push(TileRole {
            entry,
            budget: small_budget + dim,
            multiplicity: radius,
        });
    }

    roles
}

/// Count cells reachable in exactly `steps` steps with the grid tiled
/// infinitely in every direction, without ever exploring beyond the base
/// grid.
///
/// Budgets smaller than the grid dimension degenerate to direct
/// simulation, which is cheap at that scale; this also covers budgets too
/// small for the tile-radius decomposition.
///
/// # Errors
///
/// Returns a [`TilingError`] if the grid fails a closed-form precondition.
pub fn count_exact(grid: &Grid, steps: u64) -> Result<u64, TilingError> {
    check_preconditions(grid)?;

    let dim = u64::try_from(grid.width()).expect("width is positive after precondition checks");
    let mid = dim / 2;
    if steps < dim {
        return Ok(simulate::count_exact(grid, steps));
    }

    // Decompose the budget into whole tile crossings and a remainder. The
    // first crossing costs `mid + 1` steps, every further one `dim`. When
    // the remainder is below `mid` the outermost axis tile is entered as a
    // bare point, so fold one crossing back into the remainder; `radius`
    // stays non-negative because `steps >= dim` puts `span % dim >= mid`
    // whenever `span < dim`.
    let span = steps - (mid + 1);
    let (overflow, radius) = {
        let overflow = span % dim;
        let radius = span / dim;
        if overflow < mid {
            (overflow + dim, radius - 1)
        } else {
            (overflow, radius)
        }
    };

    // Any budget of at least twice the dimension reaches every open cell
    // of a tile, from any entry point.
    let full = grid.coverage_from(grid.start(), 2 * i64::from(grid.width()));

    // Fully covered tiles alternate between the two parity classes ring by
    // ring: `(radius + 1)²` of them share the radius's parity and `radius²`
    // take the opposite, and each class keeps the cells whose coordinate
    // parity lines up with the remaining steps.
    let steps_parity = Parity::of(steps);
    let (aligned_parity, offset_parity) = match Parity::of(radius) {
        Parity::Even => (steps_parity, steps_parity.flipped()),
        Parity::Odd => (steps_parity.flipped(), steps_parity),
    };
    let aligned_tiles = (radius + 1)
        .checked_pow(2)
        .expect("interior tile count should fit u64");
    let offset_tiles = radius
        .checked_pow(2)
        .expect("interior tile count should fit u64");

    let mut contributions = vec![
        aligned_tiles
            .checked_mul(full.select(aligned_parity))
            .expect("interior contribution should fit u64"),
        offset_tiles
            .checked_mul(full.select(offset_parity))
            .expect("interior contribution should fit u64"),
    ];

    for role in boundary_roles(grid, radius, overflow) {
        let coverage = grid.coverage_from(role.entry, role.budget);
        let parity = Parity::of(
            u64::try_from(role.budget.max(0)).expect("clamped budget is non-negative"),
        );
        contributions.push(
            role.multiplicity
                .checked_mul(coverage.select(parity))
                .expect("boundary contribution should fit u64"),
        );
    }

    Ok(contributions
        .into_iter()
        .checked_sum()
        .expect("total count should fit u64"))
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

    fn open_5x5() -> Grid {
        parse("\
.....
.....
..S..
.....
.....
")
    }

    #[test]
    fn an_open_plane_reaches_a_square_count_of_cells() {
        let grid = open_5x5();
        assert_eq!(count_exact(&grid, 15).expect("open grid"), 256);
        for steps in 5..=20 {
            let expected = (steps + 1) * (steps + 1);
            assert_eq!(count_exact(&grid, steps).expect("open grid"), expected);
        }
    }

    #[test]
    fn handles_the_smallest_possible_tile() {
        let grid = parse("S");
        assert_eq!(count_exact(&grid, 4).expect("single cell"), 25);
    }

    #[test]
    fn handles_budgets_smaller_than_the_grid() {
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
        // at most `mid` steps stays within the start tile
        assert_eq!(count_exact(&grid, 5).expect("open grid"), 36);
        // one step more pokes into the neighboring tiles
        assert_eq!(count_exact(&grid, 6).expect("open grid"), 49);
    }

    #[test]
    fn agrees_with_direct_simulation_around_rocks() {
        let grid = parse("\
.......
.#.....
.....#.
...S...
.......
..#....
.......
");
        for steps in 7..=14 {
            assert_eq!(
                count_exact(&grid, steps).expect("preconditions hold"),
                simulate::count_exact(&grid, steps),
                "diverged at {steps} steps"
            );
        }
    }

    #[test]
    fn agrees_with_direct_simulation_at_a_larger_budget() {
        let grid = parse("\
...........
...........
..#........
........#..
...........
.....S.....
...........
.......#...
...#.......
...........
...........
");
        assert_eq!(
            count_exact(&grid, 64).expect("preconditions hold"),
            simulate::count_exact(&grid, 64)
        );
    }

    #[test]
    fn rejects_a_non_square_grid() {
        let grid = parse("\
.....
.....
..S..
.....
.....
.....
");
        assert_eq!(
            count_exact(&grid, 100),
            Err(TilingError::NotSquare {
                width: 5,
                height: 6
            })
        );
    }

    #[test]
    fn rejects_an_off_center_start() {
        let grid = parse("\
.....
.S...
.....
.....
.....
");
        assert!(matches!(
            count_exact(&grid, 100),
            Err(TilingError::StartNotCentered { .. })
        ));
    }

    #[test]
    fn rejects_an_even_dimension() {
        let grid = parse("\
....
.S..
....
....
");
        assert!(matches!(
            count_exact(&grid, 100),
            Err(TilingError::StartNotCentered { .. })
        ));
    }

    #[test]
    fn rejects_an_obstructed_border() {
        let grid = parse("\
..#..
.....
..S..
.....
.....
");
        assert!(matches!(
            count_exact(&grid, 100),
            Err(TilingError::ObstructedBorderRow { y: 0 })
        ));
    }

    #[test]
    fn rejects_an_obstructed_cross_distinctly() {
        let grid = parse(EXAMPLE_INPUT);
        let error = count_exact(&grid, 100).expect_err("start row and column hold rocks");
        assert!(matches!(
            error,
            TilingError::ObstructedStartRow { .. } | TilingError::ObstructedStartColumn { .. }
        ));
        // the same grid still answers the bounded question directly
        assert_eq!(
            grid.coverage_from(grid.start(), 6).select(Parity::Even),
            16
        );
    }
}
