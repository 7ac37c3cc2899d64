use crate::network::Station;
use crate::route::Route;

/// Hooks invoked by the searches at fixed points. Observers only watch: nothing they do changes the result.
pub trait SearchObserver {
    /// A station was reached with a better cost than before. The cost is in the search's own unit
    /// (transfers, minutes or stops).
    fn station_discovered(&mut self, _station: &Station, _cost: u64) {}

    fn route_found(&mut self, _route: &Route<'_>) {}

    fn route_not_found(&mut self, _start: &Station, _goal: &Station) {}
}

pub(crate) fn found<'a>(route: Route<'a>, observer: &mut dyn SearchObserver) -> Route<'a> {
    observer.route_found(&route);
    route
}

pub struct NoopObserver;

impl SearchObserver for NoopObserver {}

/// Forwards search events to the `log` facade.
pub struct LogObserver {
    label: &'static str,
}

impl LogObserver {
    pub fn new(label: &'static str) -> Self {
        Self { label }
    }
}

impl SearchObserver for LogObserver {
    fn station_discovered(&mut self, station: &Station, cost: u64) {
        log::trace!("[{}] Reached {} ({} line) at cost {cost}.", self.label, station.name, station.line);
    }

    fn route_found(&mut self, route: &Route<'_>) {
        log::info!(
            "[{}] Route found ({} min, {} transfers): {route}",
            self.label,
            route.duration,
            route.transfers
        );
    }

    fn route_not_found(&mut self, start: &Station, goal: &Station) {
        log::warn!("[{}] No route from {} to {}.", self.label, start.name, goal.name);
    }
}

#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingObserver {
    pub(crate) discovered: Vec<(Box<str>, u64)>,
    pub(crate) found: Option<Vec<Box<str>>>,
    pub(crate) not_found: bool,
}

#[cfg(test)]
impl SearchObserver for RecordingObserver {
    fn station_discovered(&mut self, station: &Station, cost: u64) {
        self.discovered.push((station.id.clone(), cost));
    }

    fn route_found(&mut self, route: &Route<'_>) {
        self.found = Some(route.iter().map(|station| station.id.clone()).collect());
    }

    fn route_not_found(&mut self, _start: &Station, _goal: &Station) {
        self.not_found = true;
    }
}
