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

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use step_counter::{Grid, count_reachable, count_reachable_within};

/// Count grid cells reachable in an exact number of steps, with the grid
/// tiled infinitely in every direction.
#[derive(Parser, Debug)]
struct Cli {
    /// The grid input file (`#` rock, `.` open, `S` start).
    input: PathBuf,

    /// The step budget.
    #[arg(short, long)]
    steps: u64,

    /// Count cells reachable within the budget on the single grid, instead
    /// of cells reachable exactly at the budget under infinite tiling.
    #[arg(short, long, action = ArgAction::SetTrue)]
    bounded: bool,

    /// Measure and print the durations of parsing and solving.
    #[arg(short, long, action = ArgAction::SetTrue)]
    timed: bool,

    /// Minimum duration (in milliseconds) required to print timing.
    /// 0 = always print.
    #[arg(long, value_name = "NUMBER", default_value_t)]
    min_timing_ms: u64,
}

/// Read the given input file to a string.
fn get_input(input_file: &PathBuf) -> Result<String> {
    fs::read_to_string(input_file)
        .with_context(|| format!("could not read input file at: {}", input_file.display()))
}

/// Measure the duration of an expression when the flag is set.
///
/// Returns a tuple of the expression's result and an optional
/// [`Duration`][std::time::Duration], `None` when timing is off.
macro_rules! measure_with_optional_duration {
    ($expr:expr, $timed:expr) => {{
        if $timed {
            let start = ::std::time::Instant::now();
            let result = $expr;
            let elapsed = start.elapsed();
            (result, Some(elapsed))
        } else {
            ($expr, None)
        }
    }};
}

struct Reporter {
    /// A minimum duration to filter any outputs of duration by.
    min_duration: Duration,
}

impl Reporter {
    fn new(min_duration: Duration) -> Self {
        Self { min_duration }
    }

    fn format_duration(duration: Duration) -> String {
        const ONE_SECOND: Duration = Duration::from_secs(1);
        const ONE_MILLISECOND: Duration = Duration::from_millis(1);
        const ONE_MICROSECOND: Duration = Duration::from_micros(1);
        const DECIMAL_PLACES: usize = 3;

        if duration >= ONE_SECOND {
            format!("{:.*} seconds", DECIMAL_PLACES, duration.as_secs_f32())
        } else {
            let nanos = duration.subsec_nanos();
            if duration >= ONE_MILLISECOND {
                format!("{:.*} milliseconds", DECIMAL_PLACES, f64::from(nanos) / 1e6)
            } else if duration >= ONE_MICROSECOND {
                format!("{:.*} microseconds", DECIMAL_PLACES, f64::from(nanos) / 1e3)
            } else {
                format!("{nanos} nanoseconds")
            }
        }
    }

    /// Print a stage's duration, filtering out durations shorter than the
    /// minimum.
    fn stage(&self, label: &str, duration_opt: Option<Duration>) {
        if let Some(duration) = duration_opt.filter(|d| *d >= self.min_duration) {
            println!("{label} in {}", Self::format_duration(duration));
        }
    }
}

fn solve(grid: &Grid, args: &Cli) -> Result<u64> {
    if args.bounded {
        Ok(count_reachable_within(grid, args.steps))
    } else {
        count_reachable(grid, args.steps).context("failed to count reachable cells")
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();
    let input_str = get_input(&args.input)?;
    let reporter = Reporter::new(Duration::from_millis(args.min_timing_ms));

    let (parse_result, duration_opt) =
        measure_with_optional_duration!(input_str.parse::<Grid>(), args.timed);
    let grid = parse_result.context("failed to parse grid input")?;
    reporter.stage("Input parsed", duration_opt);

    let (solve_result, duration_opt) =
        measure_with_optional_duration!(solve(&grid, &args), args.timed);
    let count = solve_result?;
    reporter.stage("Solved", duration_opt);

    println!("{count}");
    Ok(())
}
