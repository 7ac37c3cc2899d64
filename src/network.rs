use std::collections::HashMap;
use std::rc::Rc;

pub type Minutes = u32;
/// Sum of connection durations along a route. A route visits each station once, so this cannot overflow.
pub type TotalMinutes = u64;
pub type StationIndex = usize;

#[derive(Debug)]
pub struct Station {
    pub id: Box<str>,
    pub name: Box<str>,
    pub line: Rc<str>,
    neighbors: Vec<(StationIndex, Minutes)>,
}

impl Station {
    fn new(id: &str, name: &str, line: Rc<str>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            line,
            neighbors: Vec::new(),
        }
    }

    /// Adjacent stations with the travel time to each, in the order the connections were added.
    pub fn neighbors(&self) -> &[(StationIndex, Minutes)] { &self.neighbors }

    pub fn same_line(&self, other: &Station) -> bool { self.line == other.line }
}

#[derive(thiserror::Error, Debug)]
pub enum NetworkError {
    #[error("Station {0} already exists.")]
    DuplicateStation(String),
    #[error("Unknown station {0}.")]
    UnknownStation(String),
    #[error("Connection {from} - {to} must take at least one minute.")]
    InvalidDuration { from: String, to: String },
    #[error("Station {0} cannot be connected to itself.")]
    SelfLoop(String),
    #[error("Invalid feed: {0}")]
    InvalidFeed(String),
    #[error("GTFS error: {0}")]
    Gtfs(#[from] gtfs_structures::Error),
}

pub type NetworkResult<T> = Result<T, NetworkError>;

// Stations and their indices, shared by the builder and the sealed network.
#[derive(Debug, Default)]
struct Stations {
    stations: Vec<Station>,
    station_index: HashMap<Box<str>, StationIndex>,
    name_index: HashMap<Box<str>, Vec<StationIndex>>,
    lines: Vec<Rc<str>>,
    num_connections: usize,
}

/// Collects stations and connections. Only the builder can change a network: once [`NetworkBuilder::build`]
/// is called the result is read-only, so no search ever sees a graph that is still being assembled.
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    inner: Stations,
}

impl NetworkBuilder {
    pub fn new() -> Self { Self::default() }

    pub fn add_station(&mut self, id: &str, name: &str, line: &str) -> NetworkResult<StationIndex> {
        let inner = &mut self.inner;
        if inner.station_index.contains_key(id) {
            return Err(NetworkError::DuplicateStation(id.to_owned()));
        }

        // Intern the line so every station on it shares one allocation.
        let line = match inner.lines.iter().find(|l| &***l == line) {
            Some(existing) => existing.clone(),
            None => {
                let interned: Rc<str> = Rc::from(line);
                inner.lines.push(interned.clone());
                interned
            }
        };

        let station_idx = inner.stations.len();
        inner.stations.push(Station::new(id, name, line));
        inner.station_index.insert(id.into(), station_idx);
        inner.name_index.entry(name.into()).or_default().push(station_idx);

        log::debug!("Added station {id} ({name}, {} line).", inner.stations[station_idx].line);
        Ok(station_idx)
    }

    pub fn add_connection(&mut self, from: &str, to: &str, duration: Minutes) -> NetworkResult<()> {
        let inner = &mut self.inner;
        let from_idx = *inner
            .station_index
            .get(from)
            .ok_or_else(|| NetworkError::UnknownStation(from.to_owned()))?;
        let to_idx = *inner
            .station_index
            .get(to)
            .ok_or_else(|| NetworkError::UnknownStation(to.to_owned()))?;

        if from_idx == to_idx {
            return Err(NetworkError::SelfLoop(from.to_owned()));
        }
        if duration == 0 {
            return Err(NetworkError::InvalidDuration { from: from.to_owned(), to: to.to_owned() });
        }

        inner.stations[from_idx].neighbors.push((to_idx, duration));
        inner.stations[to_idx].neighbors.push((from_idx, duration));
        inner.num_connections += 1;

        log::debug!("Connected {from} <-> {to} ({duration} min).");
        Ok(())
    }

    pub fn contains(&self, id: &str) -> bool { self.inner.station_index.contains_key(id) }

    pub fn num_stations(&self) -> usize { self.inner.stations.len() }

    pub fn build(self) -> Network {
        let network = Network { inner: self.inner };
        log::info!(
            "Network built with {} stations, {} lines, and {} connections.",
            network.num_stations(),
            network.num_lines(),
            network.num_connections()
        );
        network
    }
}

#[derive(Debug)]
pub struct Network {
    inner: Stations,
}

impl Network {
    pub fn builder() -> NetworkBuilder { NetworkBuilder::new() }

    pub fn find(&self, id: &str) -> Option<StationIndex> { self.inner.station_index.get(id).copied() }

    /// All stations with this display name (one per line), in the order they were added.
    pub fn find_by_name(&self, name: &str) -> &[StationIndex] {
        self.inner.name_index.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn station(&self, station: StationIndex) -> &Station { &self.inner.stations[station] }

    pub fn neighbors(&self, station: StationIndex) -> &[(StationIndex, Minutes)] {
        self.inner.stations[station].neighbors()
    }

    pub fn stations(&self) -> impl Iterator<Item = (StationIndex, &Station)> {
        self.inner.stations.iter().enumerate()
    }

    /// Distinct display names, sorted.
    pub fn station_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.inner.name_index.keys().map(|name| &**name).collect();
        names.sort_unstable();
        names
    }

    /// Line identifiers in the order they first appeared.
    pub fn lines(&self) -> &[Rc<str>] { &self.inner.lines }

    pub fn num_stations(&self) -> usize { self.inner.stations.len() }

    pub fn num_lines(&self) -> usize { self.inner.lines.len() }

    pub fn num_connections(&self) -> usize { self.inner.num_connections }
}
