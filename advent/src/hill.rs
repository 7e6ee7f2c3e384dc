//! Hill climbing: fewest steps across an elevation map.
//!
//! Elevations run from `a` (lowest) to `z` (highest). A step moves to one
//! of the four adjacent cells and may climb at most one level, while
//! descending any distance is allowed.

use std::fmt;

use log::debug;
use waypoint_core::{IteratorExt, Offset, Point, Size};
use waypoint_paths::{Graph, GraphExt};

use crate::error::{Error, Result};

const LOWEST: u8 = b'a';
const HIGHEST: u8 = b'z';

const TERRAIN_COLOR: &str = "\x1b[38;2;64;192;64m";
const TRAIL_COLOR: &str = "\x1b[38;2;192;0;0m";
const RESET: &str = "\x1b[0m";

/// A parsed puzzle: the map plus its marked start and end cells.
#[derive(Debug, Clone)]
pub struct Survey {
    pub map: ElevationMap,
    pub start: Point,
    pub end: Point,
}

/// A rectangular grid of elevations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElevationMap {
    size: Size,
    cells: Vec<u8>,
}

impl ElevationMap {
    /// Parse a map.
    ///
    /// `S` marks the start (elevation `a`) and `E` the end (elevation `z`).
    /// A digit `n` also marks the end, at elevation `a + n - 1`. Blank lines
    /// are ignored.
    pub fn parse(input: &str) -> Result<Survey> {
        let mut rows = input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.is_empty())
            .peekable();
        let width = rows
            .peek()
            .map(|(_, line)| line.chars().count())
            .ok_or(Error::EmptyInput)?;

        let mut cells = Vec::new();
        let mut start = None;
        let mut end = None;
        let mut height = 0;

        for (y, (line_idx, line)) in rows.enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(Error::JaggedMap {
                    line: line_idx + 1,
                    expected: width,
                    found,
                });
            }
            for (x, c) in line.chars().enumerate() {
                let p = Point::new(x as i32, y as i32);
                let elevation = match c {
                    'S' => {
                        start = Some(p);
                        LOWEST
                    }
                    'E' => {
                        end = Some(p);
                        HIGHEST
                    }
                    '0'..='9' => {
                        end = Some(p);
                        LOWEST + (c as u8 - b'0') - 1
                    }
                    'a'..='z' => c as u8,
                    _ => {
                        return Err(Error::BadCell {
                            line: line_idx + 1,
                            column: x + 1,
                            found: c,
                        });
                    }
                };
                cells.push(elevation);
            }
            height += 1;
        }

        let start = start.ok_or(Error::MissingStart)?;
        let end = end.ok_or(Error::MissingEnd)?;
        let map = ElevationMap {
            size: Size::new(width as i32, height),
            cells,
        };
        debug!("parsed {} elevation map, start {start}, end {end}", map.size);
        Ok(Survey { map, start, end })
    }

    /// Dimensions of the map.
    #[inline]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Elevation at `p`, or `None` outside the map.
    pub fn get(&self, p: Point) -> Option<u8> {
        self.size.contains(p).then(|| self.cells[self.offset(p)])
    }

    fn offset(&self, p: Point) -> usize {
        (p.y * self.size.width + p.x) as usize
    }

    /// Whether a single step from `from` to `to` is allowed.
    fn can_step(&self, from: Point, to: Point) -> bool {
        match (self.get(from), self.get(to)) {
            (Some(here), Some(there)) => there <= here + 1,
            _ => false,
        }
    }

    /// Shortest route from `start` to `end`, both included.
    ///
    /// Empty when `end` cannot be reached.
    pub fn find_path(&self, start: Point, end: Point) -> Vec<Point> {
        self.path(&start, &end).collect()
    }

    /// Number of steps on the shortest route, or `None` if unreachable.
    pub fn fewest_steps(&self, start: Point, end: Point) -> Option<usize> {
        let steps = self.shortest_paths(&start).distance_to(&end)?;
        usize::try_from(steps).ok()
    }

    /// Shortest route to `end` from whichever lowest-elevation cell is
    /// closest. Ties go to the first such cell in row-major order.
    ///
    /// Runs a single search backwards from `end` instead of one search per
    /// candidate start. Empty when no lowest cell can reach `end`.
    pub fn path_from_lowest(&self, end: Point) -> Vec<Point> {
        let search = Descent(self).shortest_paths(&end);
        let nearest = search
            .distances()
            .iter()
            .filter(|(p, _)| self.get(**p) == Some(LOWEST))
            .min_by_key(|&(p, steps)| (*steps, *p))
            .map(|(p, _)| *p);

        let Some(nearest) = nearest else {
            return Vec::new();
        };
        let mut path: Vec<Point> = search.path_to(&nearest).collect();
        path.reverse();
        path
    }

    /// Draw `path` over the map with arrows, marking its final cell with
    /// `⌧`. With `color`, terrain and trail get ANSI truecolor escapes.
    pub fn render_path(&self, path: &[Point], color: bool) -> String {
        let mut canvas: Vec<char> = self.cells.iter().map(|&c| c as char).collect();
        for step in path.windows(2) {
            let (from, to) = (step[0], step[1]);
            canvas[self.offset(from)] = match to - from {
                Offset::UP => '▲',
                Offset::DOWN => '▼',
                Offset::LEFT => '◀',
                Offset::RIGHT => '▶',
                _ => '?',
            };
        }
        if let Some(&last) = path.last() {
            canvas[self.offset(last)] = '⌧';
        }

        let mut out = String::new();
        for (i, row) in canvas
            .into_iter()
            .chunking(self.size.width as usize)
            .enumerate()
        {
            if i > 0 {
                out.push('\n');
            }
            for c in row {
                if color {
                    out.push_str(if c.is_ascii_lowercase() {
                        TERRAIN_COLOR
                    } else {
                        TRAIL_COLOR
                    });
                }
                out.push(c);
            }
        }
        if color {
            out.push_str(RESET);
        }
        out
    }
}

impl fmt::Display for ElevationMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = self
            .cells
            .iter()
            .map(|&c| c as char)
            .chunking(self.size.width as usize);
        for (i, row) in rows.enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            f.write_str(&row.into_iter().collect::<String>())?;
        }
        Ok(())
    }
}

impl Graph for ElevationMap {
    type Element = u8;
    type Index = Point;

    fn element(&self, index: &Point) -> &u8 {
        assert!(
            self.size.contains(*index),
            "{index} is outside the {} map",
            self.size
        );
        &self.cells[self.offset(*index)]
    }

    fn neighbors(&self, index: &Point, buf: &mut Vec<Point>) {
        buf.extend(
            index
                .neighbors_4()
                .into_iter()
                .filter(|&n| self.can_step(*index, n)),
        );
    }

    fn distance(&self, from: &Point, to: &Point) -> i64 {
        i64::from(from.distance(*to))
    }

    fn indices(&self) -> Vec<Point> {
        self.size.points().collect()
    }

    fn count(&self) -> usize {
        self.size.area()
    }
}

/// The map with every step reversed, for searching backwards from the end.
struct Descent<'a>(&'a ElevationMap);

impl Graph for Descent<'_> {
    type Element = u8;
    type Index = Point;

    fn element(&self, index: &Point) -> &u8 {
        self.0.element(index)
    }

    fn neighbors(&self, index: &Point, buf: &mut Vec<Point>) {
        buf.extend(
            index
                .neighbors_4()
                .into_iter()
                .filter(|&n| self.0.can_step(n, *index)),
        );
    }

    fn distance(&self, from: &Point, to: &Point) -> i64 {
        self.0.distance(to, from)
    }

    fn indices(&self) -> Vec<Point> {
        self.0.indices()
    }

    fn count(&self) -> usize {
        self.0.count()
    }
}
