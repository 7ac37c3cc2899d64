use std::collections::HashMap;

use gtfs_structures::Gtfs;
use rgb::RGB8;

use crate::network::Station;
use crate::route::Route;
use crate::sample;

const RESET: &str = "\x1b[0m";

/// Colour of each line when printed to a terminal. Lines without an entry are printed uncoloured.
#[derive(Clone, Debug, Default)]
pub struct LinePalette {
    colors: HashMap<String, RGB8>,
}

impl LinePalette {
    pub fn new() -> Self { Self::default() }

    pub fn insert(&mut self, line: &str, color: RGB8) {
        self.colors.insert(line.to_owned(), color);
    }

    pub fn with(mut self, line: &str, color: RGB8) -> Self {
        self.insert(line, color);
        self
    }

    pub fn color(&self, line: &str) -> Option<RGB8> { self.colors.get(line).copied() }

    pub fn ankara() -> Self {
        Self::new()
            .with(sample::RED_LINE, RGB8::new(229, 57, 53))
            .with(sample::BLUE_LINE, RGB8::new(30, 136, 229))
            .with(sample::ORANGE_LINE, RGB8::new(251, 140, 0))
    }

    /// Takes the colour of every GTFS route, keyed by the same line name the network uses.
    pub fn from_gtfs(gtfs: &Gtfs) -> Self {
        let mut palette = Self::new();
        for route in gtfs.routes.values() {
            palette.insert(crate::gtfs::line_name(route), route.color);
        }
        palette
    }
}

/// Renders routes as station names joined by arrows, optionally coloured by line.
pub struct RouteFormatter<'a> {
    palette: &'a LinePalette,
    colored: bool,
}

impl<'a> RouteFormatter<'a> {
    pub fn new(palette: &'a LinePalette) -> Self {
        Self { palette, colored: true }
    }

    pub fn colored(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    pub fn station(&self, station: &Station) -> String {
        match self.palette.color(&station.line) {
            Some(RGB8 { r, g, b }) if self.colored => format!("\x1b[38;2;{r};{g};{b}m{}{RESET}", station.name),
            _ => station.name.to_string(),
        }
    }

    pub fn route(&self, route: &Route<'_>) -> String {
        route.iter().map(|station| self.station(station)).collect::<Vec<_>>().join(" -> ")
    }
}
