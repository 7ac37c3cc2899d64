use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::network::{Minutes, Network, Station, StationIndex, TotalMinutes};
use crate::observer::{found, NoopObserver, SearchObserver};
use crate::route::{resolve_station, QueryResult, Route};

/// Estimate of the time left from a station to the goal, added to the frontier priority.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Heuristic {
    /// Plain Dijkstra. Routes are always the fastest.
    #[default]
    None,
    /// Adds a fixed penalty to every station that is not on the goal's line. This is not a lower bound on the
    /// remaining time, so the search is biased towards the goal's line and can return a slower route.
    LineChangePenalty(Minutes),
}

impl Heuristic {
    fn estimate(self, station: &Station, goal: &Station) -> Minutes {
        match self {
            Heuristic::None => 0,
            Heuristic::LineChangePenalty(penalty) if !station.same_line(goal) => penalty,
            Heuristic::LineChangePenalty(_) => 0,
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SearchOptions {
    pub heuristic: Heuristic,
}

#[derive(Copy, Clone, Eq, PartialEq)]
struct QueueEntry {
    priority: TotalMinutes,
    // Push order within this search. Breaks priority ties so the earliest push pops first.
    sequence: usize,
    cost: TotalMinutes,
    station: StationIndex,
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so BinaryHeap pops the smallest priority.
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Fastest route between two stations; the total is in [`Route::duration`].
pub fn minimum_time<'a>(network: &'a Network, start: &str, goal: &str) -> QueryResult<'a> {
    minimum_time_with(network, start, goal, &SearchOptions::default(), &mut NoopObserver)
}

pub fn minimum_time_with<'a>(
    network: &'a Network,
    start: &str,
    goal: &str,
    options: &SearchOptions,
    observer: &mut dyn SearchObserver,
) -> QueryResult<'a> {
    let start = resolve_station(network, start)?;
    let goal = resolve_station(network, goal)?;
    if start == goal {
        return Ok(Some(found(Route::single(start, network), observer)));
    }

    let goal_station = network.station(goal);
    let num_stations = network.num_stations();

    // best[s] = lowest cumulative duration recorded for s so far.
    let mut best: Vec<Option<TotalMinutes>> = vec![None; num_stations];
    let mut parents: Vec<Option<(StationIndex, Minutes)>> = vec![None; num_stations];
    let mut settled = vec![false; num_stations];

    let mut sequence = 0;
    let mut heap = BinaryHeap::new();
    best[start] = Some(0);
    heap.push(QueueEntry {
        priority: TotalMinutes::from(options.heuristic.estimate(network.station(start), goal_station)),
        sequence,
        cost: 0,
        station: start,
    });

    while let Some(QueueEntry { cost, station: station_idx, .. }) = heap.pop() {
        if settled[station_idx] {
            continue;
        }
        settled[station_idx] = true;

        if station_idx == goal {
            let route = Route::from_parents(&parents, network, start, goal);
            debug_assert_eq!(route.duration, cost);
            return Ok(Some(found(route, observer)));
        }

        for &(neighbor_idx, minutes) in network.neighbors(station_idx) {
            if settled[neighbor_idx] {
                continue;
            }
            let candidate = cost + TotalMinutes::from(minutes);
            if best[neighbor_idx].is_some_and(|recorded| candidate >= recorded) {
                continue;
            }

            best[neighbor_idx] = Some(candidate);
            parents[neighbor_idx] = Some((station_idx, minutes));

            let neighbor = network.station(neighbor_idx);
            observer.station_discovered(neighbor, candidate);

            sequence += 1;
            heap.push(QueueEntry {
                priority: candidate + TotalMinutes::from(options.heuristic.estimate(neighbor, goal_station)),
                sequence,
                cost: candidate,
                station: neighbor_idx,
            });
        }
    }

    observer.route_not_found(network.station(start), goal_station);
    Ok(None)
}
