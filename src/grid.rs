//! The grid data model and its text format.

use std::collections::HashSet;
use std::num::TryFromIntError;
use std::str::FromStr;

use nalgebra::{Point2, Vector2};

/*
Input is a character grid: `S` for the start position, `.` for open cells,
`#` for rocks. The start also acts as an open cell.
*/

/// A rectangular grid of open cells and rocks with a start position.
#[derive(Debug, Clone)]
pub struct Grid {
    /// The number of columns in the grid.
    width: i32,
    /// The number of rows in the grid.
    height: i32,
    /// The positions of rocks in the grid.
    rocks: HashSet<Point2<i32>>,
    /// The starting position in the grid.
    start: Point2<i32>,
}

#[derive(thiserror::Error, Debug)]
pub enum ParseGridError {
    #[error("too many lines to represent y-coordinate")]
    LineIndexOverflow(#[source] TryFromIntError),

    #[error("too many characters to represent x-coordinate")]
    CharIndexOverflow(#[source] TryFromIntError),

    #[error("expected grid width to be {expected} across rows, but found row width {found}")]
    UnequalGridWidth { expected: i32, found: i32 },

    #[error("invalid character in grid: {0:?}")]
    InvalidChar(char),

    #[error("found another start point after {first}: {second}")]
    MultipleStarts {
        first: Point2<i32>,
        second: Point2<i32>,
    },

    #[error("failed to find a start point")]
    MissingStart,
}

impl FromStr for Grid {
    type Err = ParseGridError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let height =
            i32::try_from(input.lines().count()).map_err(ParseGridError::LineIndexOverflow)?;

        let mut width_opt = None;
        let mut start_opt = None;
        let mut rocks = HashSet::new();

        for (line_index, line) in input.lines().enumerate() {
            let line_width =
                i32::try_from(line.chars().count()).map_err(ParseGridError::CharIndexOverflow)?;
            if let Some(expected) = width_opt {
                if line_width != expected {
                    return Err(ParseGridError::UnequalGridWidth {
                        expected,
                        found: line_width,
                    });
                }
            } else {
                width_opt = Some(line_width);
            }

            let y =
                i32::try_from(line_index).expect("validated range conversion earlier for height");

            for (char_index, ch) in line.char_indices() {
                let x = i32::try_from(char_index)
                    .expect("validated range conversion earlier for line_width");

                match ch {
                    '.' => {} // ignore
                    '#' => {
                        rocks.insert(Point2::new(x, y));
                    }
                    'S' => {
                        if let Some(existing_start) = start_opt {
                            return Err(ParseGridError::MultipleStarts {
                                first: existing_start,
                                second: Point2::new(x, y),
                            });
                        }
                        start_opt = Some(Point2::new(x, y));
                    }
                    _ => return Err(ParseGridError::InvalidChar(ch)),
                }
            }
        }

        let start = start_opt.ok_or(ParseGridError::MissingStart)?;
        Ok(Self {
            width: width_opt.unwrap_or(0),
            height,
            rocks,
            start,
        })
    }
}

impl Grid {
    /// The number of columns in the grid.
    #[must_use]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// The number of rows in the grid.
    #[must_use]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// The starting position.
    #[must_use]
    pub fn start(&self) -> Point2<i32> {
        self.start
    }

    /// Determine if a point is in the bounds of the grid.
    #[must_use]
    pub fn point_in_bounds(&self, point: Point2<i32>) -> bool {
        point.x >= 0 && point.x < self.width && point.y >= 0 && point.y < self.height
    }

    /// Determine if a point holds a rock.
    #[must_use]
    pub fn is_rock(&self, point: Point2<i32>) -> bool {
        self.rocks.contains(&point)
    }

    pub(crate) fn rocks(&self) -> &HashSet<Point2<i32>> {
        &self.rocks
    }
}

/// The four cardinal step directions.
pub(crate) fn cardinal_directions() -> [Vector2<i32>; 4] {
    [
        Vector2::x(),
        Vector2::y(),
        Vector2::x() * -1,
        Vector2::y() * -1,
    ]
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

    #[test]
    fn parses_the_example_grid() {
        let grid: Grid = EXAMPLE_INPUT.parse().expect("example should parse");
        assert_eq!(grid.width(), 11);
        assert_eq!(grid.height(), 11);
        assert_eq!(grid.start(), Point2::new(5, 5));
        assert_eq!(grid.rocks().len(), 40);
        assert!(grid.is_rock(Point2::new(5, 1)));
        assert!(!grid.is_rock(Point2::new(0, 0)));
    }

    #[test]
    fn rejects_unequal_row_widths() {
        let result = "..\n.S.\n...".parse::<Grid>();
        assert!(matches!(
            result,
            Err(ParseGridError::UnequalGridWidth {
                expected: 2,
                found: 3
            })
        ));
    }

    #[test]
    fn rejects_multiple_starts() {
        let result = "S..\n..S\n...".parse::<Grid>();
        assert!(matches!(result, Err(ParseGridError::MultipleStarts { .. })));
    }

    #[test]
    fn rejects_a_missing_start() {
        let result = "...\n...\n...".parse::<Grid>();
        assert!(matches!(result, Err(ParseGridError::MissingStart)));
    }

    #[test]
    fn rejects_invalid_characters() {
        let result = "...\n.S.\n..x".parse::<Grid>();
        assert!(matches!(result, Err(ParseGridError::InvalidChar('x'))));
    }
}
