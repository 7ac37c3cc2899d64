use metro::{Minutes, Network, StationIndex, TotalMinutes};

// Networks and reference searches shared by the integration tests and benchmarks.

pub const LINES: [&str; 4] = ["Red", "Blue", "Orange", "Green"];

pub fn station_id(i: usize) -> String {
    format!("S{i}")
}

/// Random stations on random lines joined by random connections of 1 to 10 minutes. Names repeat, so some
/// consecutive stations of a route share a name. May be disconnected and may hold parallel connections.
pub fn random_network(rng: &mut fastrand::Rng, num_stations: usize, num_connections: usize) -> Network {
    let mut builder = Network::builder();
    for i in 0..num_stations {
        let line = LINES[rng.usize(..LINES.len())];
        let name = format!("Stop {}", i % (num_stations / 2 + 1));
        builder.add_station(&station_id(i), &name, line).unwrap();
    }
    for _ in 0..num_connections {
        let from = rng.usize(..num_stations);
        let to = rng.usize(..num_stations);
        if from == to {
            continue;
        }
        builder.add_connection(&station_id(from), &station_id(to), rng.u32(1..=10)).unwrap();
    }
    builder.build()
}

/// `num_lines` straight lines of `stations_per_line` stations. Every fifth position is an interchange
/// shared by all lines, with a three-minute transfer between neighbouring lines.
pub fn grid_network(num_lines: usize, stations_per_line: usize) -> Network {
    let mut builder = Network::builder();
    for line in 0..num_lines {
        let line_name = format!("L{line}");
        for position in 0..stations_per_line {
            let name = if position % 5 == 0 {
                format!("Square {position}")
            } else {
                format!("Street {line}-{position}")
            };
            builder.add_station(&grid_id(line, position), &name, &line_name).unwrap();
            if position > 0 {
                let minutes = 2 + ((line + position) % 4) as Minutes;
                builder.add_connection(&grid_id(line, position - 1), &grid_id(line, position), minutes).unwrap();
            }
        }
    }
    for line in 1..num_lines {
        for position in (0..stations_per_line).step_by(5) {
            builder.add_connection(&grid_id(line - 1, position), &grid_id(line, position), 3).unwrap();
        }
    }
    builder.build()
}

pub fn grid_id(line: usize, position: usize) -> String {
    format!("L{line}:{position}")
}

pub struct PathSummary {
    pub stations: Vec<StationIndex>,
    pub minutes: TotalMinutes,
    pub transfers: usize,
}

/// Every simple path from `start` to `goal`, once per choice of parallel connection. Exponential, so keep
/// networks small.
pub fn all_simple_paths(network: &Network, start: StationIndex, goal: StationIndex) -> Vec<PathSummary> {
    let mut paths = Vec::new();
    let mut on_path = vec![false; network.num_stations()];
    let mut stations = vec![start];
    on_path[start] = true;
    walk(network, goal, &mut on_path, &mut stations, 0, 0, &mut paths);
    paths
}

fn walk(
    network: &Network,
    goal: StationIndex,
    on_path: &mut [bool],
    stations: &mut Vec<StationIndex>,
    minutes: TotalMinutes,
    transfers: usize,
    paths: &mut Vec<PathSummary>,
) {
    let current = stations[stations.len() - 1];
    if current == goal {
        paths.push(PathSummary { stations: stations.clone(), minutes, transfers });
        return;
    }
    for &(next, duration) in network.neighbors(current) {
        if on_path[next] {
            continue;
        }
        let line_change = !network.station(current).same_line(network.station(next));
        on_path[next] = true;
        stations.push(next);
        walk(network, goal, on_path, stations, minutes + TotalMinutes::from(duration), transfers + usize::from(line_change), paths);
        stations.pop();
        on_path[next] = false;
    }
}
