//! Valve network: maximum pressure released before the timer runs out.
//!
//! The scan describes valves joined by tunnels that each take a minute to
//! walk. After parsing, the network is compressed into a complete graph whose
//! edge weights are the shortest walking times between valves.

use std::collections::HashMap;
use std::sync::OnceLock;

use log::{debug, warn};
use regex::Regex;
use waypoint_paths::{Graph, GraphExt, UNREACHABLE};

use crate::error::{Error, Result};

/// A single valve from the scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Valve {
    pub name: String,
    pub flow_rate: u32,
}

/// Valves plus the walking time between every connected pair.
#[derive(Debug, Clone)]
pub struct CaveNetwork {
    valves: Vec<Valve>,
    lookup: HashMap<String, usize>,
    /// Row-major `n x n` matrix, `None` where no route exists.
    edges: Vec<Option<i64>>,
}

fn valve_line() -> &'static Regex {
    static VALVE_LINE: OnceLock<Regex> = OnceLock::new();
    VALVE_LINE.get_or_init(|| {
        Regex::new(
            r"^Valve ([A-Z]{2}) has flow rate=(\d+); tunnels? leads? to valves? ((?:[A-Z]{2}, )*[A-Z]{2})$",
        )
        .unwrap()
    })
}

impl CaveNetwork {
    /// Parse a valve scan and compress it into shortest walking times.
    ///
    /// A valve described twice keeps its first description.
    pub fn parse(input: &str) -> Result<Self> {
        let mut valves = Vec::new();
        let mut lookup = HashMap::new();
        let mut tunnels = Vec::new();

        for (line_idx, line) in input.lines().enumerate() {
            let line = line.trim_end();
            if line.is_empty() {
                continue;
            }
            let bad_line = || Error::BadValveLine { line: line_idx + 1 };
            let caps = valve_line().captures(line).ok_or_else(bad_line)?;
            let name = caps[1].to_owned();
            let flow_rate = caps[2].parse().map_err(|_| bad_line())?;
            if lookup.contains_key(&name) {
                warn!("line {}: valve {name} already described, ignoring", line_idx + 1);
                continue;
            }
            lookup.insert(name.clone(), valves.len());
            valves.push(Valve { name, flow_rate });
            tunnels.push(caps[3].split(", ").map(str::to_owned).collect::<Vec<_>>());
        }
        if valves.is_empty() {
            return Err(Error::EmptyInput);
        }

        let n = valves.len();
        let mut edges = vec![None; n * n];
        for (from, targets) in tunnels.iter().enumerate() {
            edges[from * n + from] = Some(0);
            for target in targets {
                let to = *lookup
                    .get(target)
                    .ok_or_else(|| Error::UnknownValve(target.clone()))?;
                if to != from {
                    edges[from * n + to] = Some(1);
                }
            }
        }

        let mut network = CaveNetwork {
            valves,
            lookup,
            edges,
        };
        network.compress();
        debug!("parsed cave network with {n} valves");
        Ok(network)
    }

    /// Replace the one-minute tunnels with shortest walking times between
    /// every pair of valves.
    fn compress(&mut self) {
        let n = self.valves.len();
        let table = self.distance_table();
        for (from, row) in table {
            let i = self.lookup[&from];
            for (to, minutes) in row {
                self.edges[i * n + self.lookup[&to]] = Some(minutes);
            }
        }
    }

    /// Valves in scan order.
    pub fn valves(&self) -> &[Valve] {
        &self.valves
    }

    pub fn valve(&self, name: &str) -> Option<&Valve> {
        self.lookup.get(name).map(|&i| &self.valves[i])
    }

    fn edge(&self, from: usize, to: usize) -> Option<i64> {
        self.edges[from * self.valves.len() + to]
    }

    fn position(&self, name: &str) -> usize {
        match self.lookup.get(name) {
            Some(&i) => i,
            None => panic!("valve {name:?} is not in the cave network"),
        }
    }

    /// Most pressure that can be released within `minutes`, starting at
    /// valve `start`.
    ///
    /// Opening a valve takes one minute, after which it releases its flow
    /// rate every remaining minute. Helpers start together with the first
    /// actor at `start`, and no two actors open the same valve.
    pub fn max_pressure(&self, minutes: u32, start: &str, helpers: usize) -> Result<u64> {
        let start = *self
            .lookup
            .get(start)
            .ok_or_else(|| Error::UnknownValve(start.to_owned()))?;
        let working: Vec<usize> = (0..self.valves.len())
            .filter(|&i| self.valves[i].flow_rate > 0)
            .collect();
        if working.len() > u64::BITS as usize {
            return Err(Error::TooManyValves(working.len()));
        }

        let mut best = HashMap::new();
        self.explore(&working, start, minutes, 0, 0, &mut best)?;
        debug!(
            "explored {} sets of {} working valves",
            best.len(),
            working.len()
        );

        let mut sets: Vec<(u64, u64)> = best.into_iter().collect();
        sets.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        let mut pressure = 0;
        combine(&sets, helpers.saturating_add(1), 0, 0, &mut pressure)?;
        Ok(pressure)
    }

    /// Depth-first walk recording, for every set of opened valves, the best
    /// pressure any single actor can release by opening exactly that set.
    fn explore(
        &self,
        working: &[usize],
        at: usize,
        minutes: u32,
        opened: u64,
        released: u64,
        best: &mut HashMap<u64, u64>,
    ) -> Result<()> {
        let entry = best.entry(opened).or_insert(0);
        *entry = (*entry).max(released);

        for (bit, &valve) in working.iter().enumerate() {
            let mask = 1u64 << bit;
            if opened & mask != 0 {
                continue;
            }
            let Some(walk) = self.edge(at, valve).and_then(|w| u32::try_from(w).ok()) else {
                continue;
            };
            let cost = walk.saturating_add(1);
            if cost >= minutes {
                continue;
            }
            let left = minutes - cost;
            // Two u32 factors always fit in a u64 product.
            let gain = u64::from(left) * u64::from(self.valves[valve].flow_rate);
            let released = released
                .checked_add(gain)
                .ok_or(Error::PressureOverflow)?;
            self.explore(working, valve, left, opened | mask, released, best)?;
        }
        Ok(())
    }
}

/// Best total over at most `actors` pairwise-disjoint valve sets.
///
/// `sets` is sorted by decreasing pressure, so once a candidate cannot beat
/// `result` even when repeated for every remaining actor, nothing after it
/// can either.
fn combine(
    sets: &[(u64, u64)],
    actors: usize,
    taken: u64,
    released: u64,
    result: &mut u64,
) -> Result<()> {
    *result = (*result).max(released);
    if actors == 0 {
        return Ok(());
    }
    let remaining = u64::try_from(actors).unwrap_or(u64::MAX);
    for (i, &(set, pressure)) in sets.iter().enumerate() {
        if released.saturating_add(pressure.saturating_mul(remaining)) <= *result {
            break;
        }
        if set & taken != 0 {
            continue;
        }
        let released = released
            .checked_add(pressure)
            .ok_or(Error::PressureOverflow)?;
        combine(&sets[i + 1..], actors - 1, taken | set, released, result)?;
    }
    Ok(())
}

impl Graph for CaveNetwork {
    type Element = u32;
    type Index = String;

    fn element(&self, index: &String) -> &u32 {
        &self.valves[self.position(index)].flow_rate
    }

    fn neighbors(&self, index: &String, buf: &mut Vec<String>) {
        let from = self.position(index);
        buf.extend(
            self.valves
                .iter()
                .enumerate()
                .filter(|&(to, _)| to != from && self.edge(from, to).is_some())
                .map(|(_, v)| v.name.clone()),
        );
    }

    fn distance(&self, from: &String, to: &String) -> i64 {
        self.edge(self.position(from), self.position(to))
            .unwrap_or(UNREACHABLE)
    }

    fn indices(&self) -> Vec<String> {
        self.valves.iter().map(|v| v.name.clone()).collect()
    }

    fn count(&self) -> usize {
        self.valves.len()
    }
}
