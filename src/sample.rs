use crate::network::{Minutes, Network, NetworkResult};

// Ankara metro sample: three lines meeting at Kızılay, Demetevler and Gar.

pub const RED_LINE: &str = "Red";
pub const BLUE_LINE: &str = "Blue";
pub const ORANGE_LINE: &str = "Orange";

/// (id, name, line)
pub const STATIONS: [(&str, &str, &str); 12] = [
    ("K1", "Kızılay", RED_LINE),
    ("K2", "Ulus", RED_LINE),
    ("K3", "Demetevler", RED_LINE),
    ("K4", "OSB", RED_LINE),
    ("M1", "AŞTİ", BLUE_LINE),
    ("M2", "Kızılay", BLUE_LINE),
    ("M3", "Sıhhiye", BLUE_LINE),
    ("M4", "Gar", BLUE_LINE),
    ("T1", "Batıkent", ORANGE_LINE),
    ("T2", "Demetevler", ORANGE_LINE),
    ("T3", "Gar", ORANGE_LINE),
    ("T4", "Keçiören", ORANGE_LINE),
];

/// (id, id, minutes). The last three are the walks between platforms of the interchanges.
pub const CONNECTIONS: [(&str, &str, Minutes); 12] = [
    ("K1", "K2", 4),
    ("K2", "K3", 6),
    ("K3", "K4", 8),
    ("M1", "M2", 5),
    ("M2", "M3", 3),
    ("M3", "M4", 4),
    ("T1", "T2", 7),
    ("T2", "T3", 9),
    ("T3", "T4", 5),
    ("K1", "M2", 2),
    ("K3", "T2", 3),
    ("M4", "T3", 2),
];

pub fn ankara_network() -> NetworkResult<Network> {
    let mut builder = Network::builder();
    for (id, name, line) in STATIONS {
        builder.add_station(id, name, line)?;
    }
    for (from, to, minutes) in CONNECTIONS {
        builder.add_connection(from, to, minutes)?;
    }
    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{fewest_transfers, minimum_time};

    fn names(route: &crate::Route<'_>) -> Vec<String> {
        route.iter().map(|station| station.name.to_string()).collect()
    }

    #[test]
    fn builds_the_whole_sample() {
        let network = ankara_network().unwrap();
        assert_eq!(network.num_stations(), 12);
        assert_eq!(network.num_connections(), 12);
        assert_eq!(network.num_lines(), 3);
        assert_eq!(network.find_by_name("Gar").len(), 2);
        assert_eq!(network.station_names().len(), 9);
    }

    #[test]
    fn asti_to_osb() {
        let network = ankara_network().unwrap();

        let fastest = minimum_time(&network, "M1", "K4").unwrap().unwrap();
        assert_eq!(names(&fastest), vec!["AŞTİ", "Kızılay", "Kızılay", "Ulus", "Demetevler", "OSB"]);
        assert_eq!(fastest.duration, 5 + 2 + 4 + 6 + 8);

        let fewest = fewest_transfers(&network, "M1", "K4").unwrap().unwrap();
        assert_eq!(fewest.transfers, 1);
    }

    #[test]
    fn batikent_to_kecioren_stays_on_orange() {
        let network = ankara_network().unwrap();

        let fastest = minimum_time(&network, "T1", "T4").unwrap().unwrap();
        assert_eq!(names(&fastest), vec!["Batıkent", "Demetevler", "Gar", "Keçiören"]);
        assert_eq!(fastest.duration, 21);

        let fewest = fewest_transfers(&network, "T1", "T4").unwrap().unwrap();
        assert_eq!(fewest.transfers, 0);
        assert_eq!(fewest.stations, fastest.stations);
    }

    #[test]
    fn kecioren_to_asti() {
        let network = ankara_network().unwrap();

        // Via Gar and Sıhhiye (5 + 2 + 4 + 3 + 5) beats going round through Demetevler and Kızılay.
        let fastest = minimum_time(&network, "T4", "M1").unwrap().unwrap();
        assert_eq!(fastest.duration, 19);
        assert_eq!(fastest.collapse_interchanges().to_string(), "Keçiören -> Gar -> Sıhhiye -> Kızılay -> AŞTİ");

        let fewest = fewest_transfers(&network, "T4", "M1").unwrap().unwrap();
        assert_eq!(fewest.transfers, 1);
    }
}
