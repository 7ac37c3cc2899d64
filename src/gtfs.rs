use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use gtfs_structures::{Exception, Gtfs, GtfsReader, Trip};

use crate::network::{Minutes, Network, NetworkError, NetworkResult};

// Builds a station graph from a GTFS feed. Timetables are only used to derive how long each hop takes;
// the resulting network has no notion of departures.

pub struct GtfsOptions {
    /// Only trips running on this day contribute connections. `None` takes every trip in the feed.
    pub date: Option<NaiveDate>,
    /// Time to change between lines at the same stop.
    pub transfer_minutes: Minutes,
}

impl Default for GtfsOptions {
    fn default() -> Self {
        Self { date: None, transfer_minutes: 3 }
    }
}

/// Reads a zipped or unpacked GTFS feed. Shapes are skipped.
pub fn load_feed(path: &str) -> NetworkResult<Gtfs> {
    let gtfs = GtfsReader::default().read_shapes(false).read(path)?;
    log::info!(
        "GTFS loaded with {} stops, {} routes, and {} trips.",
        gtfs.stops.len(),
        gtfs.routes.len(),
        gtfs.trips.len()
    );
    Ok(gtfs)
}

/// The line a GTFS route becomes: its short name, else its long name, else its id.
pub fn line_name(route: &gtfs_structures::Route) -> &str {
    [route.short_name.as_deref(), route.long_name.as_deref()]
        .into_iter()
        .flatten()
        .find(|name| !name.is_empty())
        .unwrap_or(&route.id)
}

fn station_id(stop_id: &str, line: &str) -> String { format!("{stop_id}/{line}") }

fn runs_on(gtfs: &Gtfs, trip: &Trip, date: NaiveDate) -> bool {
    let exception = gtfs
        .calendar_dates
        .get(trip.service_id.as_str())
        .and_then(|dates| dates.iter().find(|calendar_date| calendar_date.date == date));
    if let Some(calendar_date) = exception {
        return matches!(calendar_date.exception_type, Exception::Added);
    }

    gtfs.calendar
        .get(trip.service_id.as_str())
        .is_some_and(|calendar| calendar.valid_weekday(date) && calendar.start_date <= date && date <= calendar.end_date)
}

fn travel_minutes(departure: u32, arrival: u32) -> Minutes {
    arrival.saturating_sub(departure).div_ceil(60).max(1)
}

/// One station per (stop, line). Consecutive stops of a trip are connected; the first trip, in trip id
/// order, to link two stations sets the duration. Stations of the same stop on different lines are linked by
/// transfers of `options.transfer_minutes`.
pub fn network_from_gtfs(gtfs: &Gtfs, options: &GtfsOptions) -> NetworkResult<Network> {
    let mut trips: Vec<&Trip> = gtfs
        .trips
        .values()
        .filter(|trip| options.date.map_or(true, |date| runs_on(gtfs, trip, date)))
        .collect();
    trips.sort_unstable_by(|a, b| a.id.cmp(&b.id));
    log::debug!("{} of {} trips selected.", trips.len(), gtfs.trips.len());

    let mut builder = Network::builder();
    // Lines serving each stop, in the order they were first seen.
    let mut stop_lines: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    let mut linked: HashSet<(String, String)> = HashSet::new();

    for trip in trips {
        let route = gtfs.routes.get(trip.route_id.as_str()).ok_or_else(|| {
            NetworkError::InvalidFeed(format!("Trip {} refers to unknown route {}.", trip.id, trip.route_id))
        })?;
        let line = line_name(route);

        for stop_time in &trip.stop_times {
            let stop = &stop_time.stop;
            let id = station_id(&stop.id, line);
            if builder.contains(&id) {
                continue;
            }
            let name = stop
                .name
                .as_deref()
                .ok_or_else(|| NetworkError::InvalidFeed(format!("Stop {} has no name.", stop.id)))?;
            builder.add_station(&id, name, line)?;
            stop_lines.entry(stop.id.as_str()).or_default().push(line);
        }

        for pair in trip.stop_times.windows(2) {
            let (from, to) = (&pair[0], &pair[1]);
            let from_id = station_id(&from.stop.id, line);
            let to_id = station_id(&to.stop.id, line);
            if from_id == to_id {
                continue;
            }

            let key = if from_id < to_id { (from_id.clone(), to_id.clone()) } else { (to_id.clone(), from_id.clone()) };
            if !linked.insert(key) {
                continue;
            }

            let departure = from.departure_time.or(from.arrival_time).ok_or_else(|| {
                NetworkError::InvalidFeed(format!("Trip {} has no time at stop {}.", trip.id, from.stop.id))
            })?;
            let arrival = to.arrival_time.or(to.departure_time).ok_or_else(|| {
                NetworkError::InvalidFeed(format!("Trip {} has no time at stop {}.", trip.id, to.stop.id))
            })?;
            builder.add_connection(&from_id, &to_id, travel_minutes(departure, arrival))?;
        }
    }

    let mut num_transfers = 0;
    for (stop_id, lines) in &stop_lines {
        for (i, from_line) in lines.iter().enumerate() {
            for to_line in &lines[i + 1..] {
                builder.add_connection(
                    &station_id(stop_id, from_line),
                    &station_id(stop_id, to_line),
                    options.transfer_minutes,
                )?;
                num_transfers += 1;
            }
        }
    }
    log::debug!("Added {num_transfers} transfers between lines.");

    Ok(builder.build())
}
