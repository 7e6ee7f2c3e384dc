//! Command-line arguments and the puzzle commands they select.

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::{error, info};
use waypoint_core::Point;

use crate::caves::CaveNetwork;
use crate::error::{Error, Result, read_input};
use crate::hill::ElevationMap;

/// Shortest-path puzzle solver
#[derive(Parser, Debug)]
#[command(name = "advent", about = "Solve shortest-path puzzles", version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Hill climbing: fewest steps up an elevation map
    Day12 {
        /// Puzzle input
        input: PathBuf,

        /// Draw the path over the map
        #[arg(long)]
        show_path: bool,

        /// Colorize the drawn path (needs a truecolor terminal)
        #[arg(long)]
        color: bool,

        /// Print every point of the path
        #[arg(long)]
        dump_path: bool,
    },
    /// Valve network: most pressure released before the eruption
    Day16 {
        /// Puzzle input
        input: PathBuf,

        /// Minutes before the eruption
        #[arg(long, default_value_t = 30)]
        timer: u32,

        /// Number of elephants helping
        #[arg(long, default_value_t = 0)]
        elephants: usize,

        /// Minutes spent teaching the elephants before setting off
        #[arg(long, default_value_t = 0)]
        teaching_time: u32,

        /// Valve everyone starts at
        #[arg(long, default_value = "AA")]
        start: String,
    },
}

impl Command {
    /// Run the command and return the report to print.
    pub fn run(&self) -> Result<String> {
        match self {
            Command::Day12 {
                input,
                show_path,
                color,
                dump_path,
            } => {
                let survey = ElevationMap::parse(&read_input(input)?)?;
                let opts = PathReport {
                    show_path: *show_path,
                    color: *color,
                    dump_path: *dump_path,
                };
                day12(&survey.map, survey.start, survey.end, &opts)
            }
            Command::Day16 {
                input,
                timer,
                elephants,
                teaching_time,
                start,
            } => {
                let minutes = timer
                    .checked_sub(*teaching_time)
                    .ok_or(Error::TimerTooShort {
                        timer: *timer,
                        teaching: *teaching_time,
                    })?;
                let network = CaveNetwork::parse(&read_input(input)?)?;
                info!(
                    "searching {} valves for {minutes} minutes with {elephants} helper(s)",
                    network.valves().len()
                );
                let pressure = network.max_pressure(minutes, start, *elephants)?;
                Ok(format!(
                    "Pressure over {timer}m starting at {start}: {pressure}"
                ))
            }
        }
    }
}

/// Run `command`, printing its report to `out`, or its failure to `err`
/// whatever the log level. Returns the process exit code.
pub fn execute(command: &Command, out: &mut impl Write, err: &mut impl Write) -> i32 {
    match command.run() {
        Ok(report) => {
            let _ = writeln!(out, "{report}");
            0
        }
        Err(e) => {
            error!("{e}");
            let _ = writeln!(err, "Error: {e}");
            1
        }
    }
}

struct PathReport {
    show_path: bool,
    color: bool,
    dump_path: bool,
}

fn day12(
    map: &ElevationMap,
    start: Point,
    end: Point,
    opts: &PathReport,
) -> Result<String> {
    let path = map.find_path(start, end);
    if path.is_empty() {
        return Err(Error::NoPath);
    }
    let mut lines = vec![format!(
        "Steps required to reach the position (from the given start): {}",
        path.len() - 1
    )];
    report_path(&mut lines, map, &path, opts);

    let lowest = map.path_from_lowest(end);
    if let Some(first) = lowest.first() {
        lines.push(format!(
            "Steps required to reach the position (from the closest lowest point {first}): {}",
            lowest.len() - 1
        ));
        report_path(&mut lines, map, &lowest, opts);
    }
    Ok(lines.join("\n"))
}

fn report_path(
    lines: &mut Vec<String>,
    map: &ElevationMap,
    path: &[Point],
    opts: &PathReport,
) {
    if opts.show_path {
        lines.push(map.render_path(path, opts.color));
    }
    if opts.dump_path {
        lines.push("[".to_owned());
        lines.extend(path.iter().map(|p| format!("    {p},")));
        lines.push("]".to_owned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const VALVES: &str = "\
Valve AA has flow rate=0; tunnels lead to valves DD, II, BB
Valve BB has flow rate=13; tunnels lead to valves CC, AA
Valve CC has flow rate=2; tunnels lead to valves DD, BB
Valve DD has flow rate=20; tunnels lead to valves CC, AA, EE
Valve EE has flow rate=3; tunnels lead to valves FF, DD
Valve FF has flow rate=0; tunnels lead to valves EE, GG
Valve GG has flow rate=0; tunnels lead to valves FF, HH
Valve HH has flow rate=22; tunnel leads to valve GG
Valve II has flow rate=0; tunnels lead to valves AA, JJ
Valve JJ has flow rate=21; tunnel leads to valve II
";

    /// Write `contents` into a fresh directory that is removed on drop.
    fn write_input(contents: &str) -> (TempDir, PathBuf) {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("input.txt");
        std::fs::write(&path, contents).unwrap();
        (temp, path)
    }

    fn day12_command(input: PathBuf, show_path: bool, dump_path: bool) -> Command {
        Command::Day12 {
            input,
            show_path,
            color: false,
            dump_path,
        }
    }

    fn day16_command(input: PathBuf, timer: u32, elephants: usize, teaching_time: u32) -> Command {
        Command::Day16 {
            input,
            timer,
            elephants,
            teaching_time,
            start: "AA".to_owned(),
        }
    }

    #[test]
    fn parses_day16_defaults() {
        let args = Args::try_parse_from(["advent", "day16", "input.txt"]).unwrap();
        assert_eq!(args.command, day16_command(PathBuf::from("input.txt"), 30, 0, 0));
    }

    #[test]
    fn parses_day16_elephants() {
        let args =
            Args::try_parse_from(["advent", "day16", "input.txt", "--elephants", "3"]).unwrap();
        assert_eq!(args.command, day16_command(PathBuf::from("input.txt"), 30, 3, 0));
    }

    #[test]
    fn parses_day12_flags() {
        let args =
            Args::try_parse_from(["advent", "day12", "map.txt", "--show-path", "--dump-path"])
                .unwrap();
        assert_eq!(args.command, day12_command(PathBuf::from("map.txt"), true, true));
        assert!(Args::try_parse_from(["advent", "day12"]).is_err());
    }

    #[test]
    fn day12_reports_both_searches() {
        let (_temp, input) = write_input("Sabqponm\nabcryxxl\naccszExk\nacctuvwj\nabdefghi\n");
        let report = day12_command(input, false, false).run().unwrap();
        let lines: Vec<_> = report.lines().collect();
        assert_eq!(
            lines,
            [
                "Steps required to reach the position (from the given start): 31",
                "Steps required to reach the position (from the closest lowest point (0, 4)): 29",
            ]
        );
    }

    #[test]
    fn day12_dumps_path() {
        let (_temp, input) = write_input("Sb3");
        let report = day12_command(input, true, true).run().unwrap();
        assert!(report.contains("▶▶⌧"));
        assert!(report.contains("[\n    (0, 0),\n    (1, 0),\n    (2, 0),\n]"));
    }

    #[test]
    fn day12_without_route_fails() {
        let (_temp, input) = write_input("SaE");
        let err = day12_command(input, false, false).run().unwrap_err();
        assert!(matches!(err, Error::NoPath));
    }

    #[test]
    fn day16_with_teaching_time() {
        let (_temp, input) = write_input(VALVES);
        assert_eq!(
            day16_command(input.clone(), 30, 1, 4).run().unwrap(),
            "Pressure over 30m starting at AA: 1707"
        );
        assert_eq!(
            day16_command(input.clone(), 30, 2, 4).run().unwrap(),
            "Pressure over 30m starting at AA: 1794"
        );
        assert!(matches!(
            day16_command(input, 3, 0, 4).run(),
            Err(Error::TimerTooShort {
                timer: 3,
                teaching: 4
            })
        ));
    }

    #[test]
    fn temp_inputs_are_removed() {
        let (temp, input) = write_input("Sb3");
        assert!(input.exists());
        drop(temp);
        assert!(!input.exists());
    }

    #[test]
    fn execute_writes_report_to_out() {
        let (_temp, input) = write_input(VALVES);
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let code = execute(&day16_command(input, 30, 0, 0), &mut out, &mut err);
        assert_eq!(code, 0);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Pressure over 30m starting at AA: 1651\n"
        );
        assert!(err.is_empty());
    }

    #[test]
    fn execute_reports_failure_without_a_logger() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing.txt");
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let code = execute(&day12_command(missing.clone(), false, false), &mut out, &mut err);
        assert_eq!(code, 1);
        assert!(out.is_empty());
        let message = String::from_utf8(err).unwrap();
        assert!(message.starts_with(&format!("Error: cannot read {}", missing.display())));
    }
}
