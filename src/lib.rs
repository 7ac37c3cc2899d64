pub mod network;

pub use network::{Minutes, TotalMinutes, Network, NetworkBuilder, NetworkError, Station, StationIndex};

pub mod route;

pub use route::{QueryError, QueryResult, Route};

pub mod observer;

pub use observer::{LogObserver, NoopObserver, SearchObserver};

pub mod bfs;

pub use bfs::{fewest_stops, fewest_stops_with, fewest_transfers, fewest_transfers_with};

pub mod dijkstra;

pub use dijkstra::{minimum_time, minimum_time_with, Heuristic, SearchOptions};

pub mod display;
pub mod gtfs;
pub mod sample;
