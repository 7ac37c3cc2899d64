use std::collections::VecDeque;

use crate::network::{Minutes, Network, StationIndex};
use crate::observer::{found, NoopObserver, SearchObserver};
use crate::route::{resolve_station, QueryResult, Route};

// Breadth-first searches over the station graph.

/// Route with the fewest line changes between two stations.
pub fn fewest_transfers<'a>(network: &'a Network, start: &str, goal: &str) -> QueryResult<'a> {
    fewest_transfers_with(network, start, goal, &mut NoopObserver)
}

/// 0/1-BFS: moving along a line costs nothing, changing line costs one transfer. Same-line steps go to the
/// front of the deque and line changes to the back, so stations leave the deque in order of transfer count
/// and the first time the goal is popped its count is minimal. Among equally good routes the one found
/// first in connection order wins.
pub fn fewest_transfers_with<'a>(
    network: &'a Network,
    start: &str,
    goal: &str,
    observer: &mut dyn SearchObserver,
) -> QueryResult<'a> {
    let start = resolve_station(network, start)?;
    let goal = resolve_station(network, goal)?;
    if start == goal {
        return Ok(Some(found(Route::single(start, network), observer)));
    }

    let num_stations = network.num_stations();
    let mut transfers = vec![u32::MAX; num_stations];
    let mut parents: Vec<Option<(StationIndex, Minutes)>> = vec![None; num_stations];
    let mut settled = vec![false; num_stations];

    let mut deque = VecDeque::new();
    transfers[start] = 0;
    deque.push_back(start);

    while let Some(station_idx) = deque.pop_front() {
        // A station can sit in the deque more than once; only the first pop counts.
        if settled[station_idx] {
            continue;
        }
        settled[station_idx] = true;

        if station_idx == goal {
            let route = Route::from_parents(&parents, network, start, goal);
            return Ok(Some(found(route, observer)));
        }

        let station = network.station(station_idx);
        for &(neighbor_idx, minutes) in station.neighbors() {
            if settled[neighbor_idx] {
                continue;
            }
            let neighbor = network.station(neighbor_idx);
            let line_change = !station.same_line(neighbor);
            let candidate = transfers[station_idx] + u32::from(line_change);
            if candidate < transfers[neighbor_idx] {
                transfers[neighbor_idx] = candidate;
                parents[neighbor_idx] = Some((station_idx, minutes));
                observer.station_discovered(neighbor, u64::from(candidate));
                if line_change {
                    deque.push_back(neighbor_idx);
                } else {
                    deque.push_front(neighbor_idx);
                }
            }
        }
    }

    observer.route_not_found(network.station(start), network.station(goal));
    Ok(None)
}

/// Route with the fewest stops, ignoring lines entirely.
pub fn fewest_stops<'a>(network: &'a Network, start: &str, goal: &str) -> QueryResult<'a> {
    fewest_stops_with(network, start, goal, &mut NoopObserver)
}

/// Plain FIFO breadth-first search on hop count. Stations are marked when first discovered, so the first
/// route to reach the goal is returned. This says nothing about transfers: use [`fewest_transfers`] for that.
pub fn fewest_stops_with<'a>(
    network: &'a Network,
    start: &str,
    goal: &str,
    observer: &mut dyn SearchObserver,
) -> QueryResult<'a> {
    let start = resolve_station(network, start)?;
    let goal = resolve_station(network, goal)?;
    if start == goal {
        return Ok(Some(found(Route::single(start, network), observer)));
    }

    let num_stations = network.num_stations();
    let mut hops = vec![u32::MAX; num_stations];
    let mut parents: Vec<Option<(StationIndex, Minutes)>> = vec![None; num_stations];

    let mut queue = VecDeque::new();
    hops[start] = 0;
    queue.push_back(start);

    while let Some(station_idx) = queue.pop_front() {
        for &(neighbor_idx, minutes) in network.neighbors(station_idx) {
            if hops[neighbor_idx] != u32::MAX {
                continue;
            }
            hops[neighbor_idx] = hops[station_idx] + 1;
            parents[neighbor_idx] = Some((station_idx, minutes));
            observer.station_discovered(network.station(neighbor_idx), u64::from(hops[neighbor_idx]));

            if neighbor_idx == goal {
                let route = Route::from_parents(&parents, network, start, goal);
                return Ok(Some(found(route, observer)));
            }
            queue.push_back(neighbor_idx);
        }
    }

    observer.route_not_found(network.station(start), network.station(goal));
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::RecordingObserver;
    use crate::route::QueryError;

    type Query = for<'a> fn(&'a Network, &str, &str) -> QueryResult<'a>;
    const QUERIES: [Query; 2] = [fewest_transfers, fewest_stops];

    fn ids(route: &Route<'_>) -> Vec<String> {
        route.iter().map(|station| station.id.to_string()).collect()
    }

    fn fixture() -> Network {
        let mut builder = Network::builder();
        builder.add_station("K1", "Kızılay", "Red").unwrap();
        builder.add_station("K2", "Ulus", "Red").unwrap();
        builder.add_station("K3", "Demetevler", "Red").unwrap();
        builder.add_station("M1", "AŞTİ", "Blue").unwrap();
        builder.add_station("M2", "Kızılay", "Blue").unwrap();
        builder.add_connection("K1", "K2", 4).unwrap();
        builder.add_connection("K2", "K3", 6).unwrap();
        builder.add_connection("M1", "M2", 5).unwrap();
        builder.add_connection("K1", "M2", 2).unwrap();
        builder.build()
    }

    // The route with the fewest stops (A-B-C) changes line twice; the long way round (A-D-E-C) never does.
    fn detour() -> Network {
        let mut builder = Network::builder();
        builder.add_station("A", "Alpha", "Green").unwrap();
        builder.add_station("B", "Beta", "Purple").unwrap();
        builder.add_station("C", "Gamma", "Green").unwrap();
        builder.add_station("D", "Delta", "Green").unwrap();
        builder.add_station("E", "Epsilon", "Green").unwrap();
        builder.add_connection("A", "B", 1).unwrap();
        builder.add_connection("B", "C", 1).unwrap();
        builder.add_connection("A", "D", 3).unwrap();
        builder.add_connection("D", "E", 3).unwrap();
        builder.add_connection("E", "C", 3).unwrap();
        builder.build()
    }

    #[test]
    fn one_transfer_from_blue_to_red() {
        let network = fixture();
        let route = fewest_transfers(&network, "M1", "K3").unwrap().unwrap();
        assert_eq!(ids(&route), vec!["M1", "M2", "K1", "K2", "K3"]);
        assert_eq!(route.transfers, 1);
        assert_eq!(route.duration, 17);
    }

    #[test]
    fn prefers_staying_on_the_line_over_fewer_stops() {
        let network = detour();

        let route = fewest_transfers(&network, "A", "C").unwrap().unwrap();
        assert_eq!(ids(&route), vec!["A", "D", "E", "C"]);
        assert_eq!(route.transfers, 0);

        let shortest = fewest_stops(&network, "A", "C").unwrap().unwrap();
        assert_eq!(ids(&shortest), vec!["A", "B", "C"]);
        assert_eq!(shortest.transfers, 2);
    }

    #[test]
    fn long_connections_add_up_past_u32() {
        let mut builder = Network::builder();
        builder.add_station("A", "Alpha", "Green").unwrap();
        builder.add_station("B", "Beta", "Green").unwrap();
        builder.add_station("C", "Gamma", "Green").unwrap();
        builder.add_connection("A", "B", 3_000_000_000).unwrap();
        builder.add_connection("B", "C", 3_000_000_000).unwrap();
        let network = builder.build();

        for query in QUERIES {
            let route = query(&network, "A", "C").unwrap().unwrap();
            assert_eq!(route.duration, 6_000_000_000);
        }
    }

    #[test]
    fn start_equals_goal() {
        let network = fixture();
        for query in QUERIES {
            let route = query(&network, "K2", "K2").unwrap().unwrap();
            assert_eq!(ids(&route), vec!["K2"]);
            assert_eq!(route.transfers, 0);
            assert_eq!(route.duration, 0);
        }
    }

    #[test]
    fn unknown_stations_are_errors() {
        let network = fixture();
        for query in QUERIES {
            assert_eq!(query(&network, "X1", "K1").unwrap_err(), QueryError::UnknownStation("X1".into()));
            assert_eq!(query(&network, "K1", "X2").unwrap_err(), QueryError::UnknownStation("X2".into()));
        }
    }

    #[test]
    fn disconnected_stations_have_no_route() {
        let mut builder = Network::builder();
        builder.add_station("A", "Alpha", "Green").unwrap();
        builder.add_station("B", "Beta", "Green").unwrap();
        builder.add_station("C", "Gamma", "Green").unwrap();
        builder.add_connection("A", "B", 2).unwrap();
        let network = builder.build();

        let mut observer = RecordingObserver::default();
        assert!(fewest_transfers_with(&network, "A", "C", &mut observer).unwrap().is_none());
        assert!(observer.not_found);
        assert!(observer.found.is_none());
        assert!(fewest_stops(&network, "C", "A").unwrap().is_none());
    }

    #[test]
    fn observer_sees_discoveries_and_result() {
        let network = fixture();
        let mut observer = RecordingObserver::default();
        fewest_transfers_with(&network, "M1", "K3", &mut observer).unwrap().unwrap();

        assert_eq!(observer.discovered.first(), Some(&("M2".into(), 0)));
        assert!(observer.discovered.contains(&("K3".into(), 1)));
        let found: Vec<&str> = observer.found.as_ref().unwrap().iter().map(|id| &**id).collect();
        assert_eq!(found, vec!["M1", "M2", "K1", "K2", "K3"]);
        assert!(!observer.not_found);
    }
}
