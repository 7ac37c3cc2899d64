use std::fmt::Display;

use crate::network::{Minutes, Network, Station, StationIndex, TotalMinutes};

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum QueryError {
    #[error("Unknown station {0}.")]
    UnknownStation(String),
}

/// `Ok(None)` means both stations exist but no path joins them.
pub type QueryResult<'a> = Result<Option<Route<'a>>, QueryError>;

pub(crate) fn resolve_station(network: &Network, id: &str) -> Result<StationIndex, QueryError> {
    network.find(id).ok_or_else(|| QueryError::UnknownStation(id.to_owned()))
}

/// An ordered sequence of stations from the start of a query to its goal.
#[derive(Clone, Debug)]
pub struct Route<'a> {
    pub stations: Vec<StationIndex>,
    /// Sum of the connection durations travelled.
    pub duration: TotalMinutes,
    /// Number of steps between stations on different lines.
    pub transfers: usize,
    pub network: &'a Network,
}

impl<'a> Route<'a> {
    pub(crate) fn single(station: StationIndex, network: &'a Network) -> Self {
        Self { stations: vec![station], duration: 0, transfers: 0, network }
    }

    // Walk parent pointers back from the goal. Each entry holds the previous station and the duration of the
    // connection used to reach this one.
    pub(crate) fn from_parents(
        parents: &[Option<(StationIndex, Minutes)>],
        network: &'a Network,
        start: StationIndex,
        goal: StationIndex,
    ) -> Self {
        let mut stations = vec![goal];
        let mut duration = 0;
        let mut current = goal;
        while current != start {
            match parents[current] {
                Some((previous, minutes)) => {
                    duration += TotalMinutes::from(minutes);
                    stations.push(previous);
                    current = previous;
                }
                None => break,
            }
        }
        stations.reverse();

        let transfers = count_transfers(&stations, network);
        Self { stations, duration, transfers, network }
    }

    pub fn start(&self) -> &'a Station { self.network.station(self.stations[0]) }

    pub fn goal(&self) -> &'a Station { self.network.station(self.stations[self.stations.len() - 1]) }

    pub fn len(&self) -> usize { self.stations.len() }

    pub fn is_empty(&self) -> bool { self.stations.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = &'a Station> + '_ {
        self.stations.iter().map(|&station| self.network.station(station))
    }

    /// Drops each station whose display name repeats the one before it, keeping the first of every run.
    /// Duration and transfer count still describe the full route.
    pub fn collapse_interchanges(&self) -> Route<'a> {
        let mut stations: Vec<StationIndex> = Vec::with_capacity(self.stations.len());
        for &station in &self.stations {
            let repeated = stations
                .last()
                .is_some_and(|&previous| self.network.station(previous).name == self.network.station(station).name);
            if !repeated {
                stations.push(station);
            }
        }

        Route { stations, duration: self.duration, transfers: self.transfers, network: self.network }
    }
}

pub(crate) fn count_transfers(stations: &[StationIndex], network: &Network) -> usize {
    stations
        .windows(2)
        .filter(|pair| !network.station(pair[0]).same_line(network.station(pair[1])))
        .count()
}

impl Display for Route<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, station) in self.iter().enumerate() {
            if i > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{}", station.name)?;
        }
        Ok(())
    }
}
