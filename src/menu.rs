use std::error::Error;
use std::io::{self, BufRead, Write};
use std::time::Duration;

use metro::display::RouteFormatter;
use metro::{fewest_transfers_with, minimum_time_with, LogObserver, Network, SearchOptions, StationIndex};

const RULE_WIDTH: usize = 70;

/// A train crossing the terminal after each answer.
pub struct Animation {
    pub distance: usize,
    pub delay: Duration,
}

impl Default for Animation {
    fn default() -> Self {
        Self { distance: 30, delay: Duration::from_millis(50) }
    }
}

impl Animation {
    pub fn play<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out)?;
        for position in 0..self.distance {
            write!(out, "\r{:position$}🚆", "")?;
            out.flush()?;
            std::thread::sleep(self.delay);
        }
        writeln!(out)
    }
}

pub struct Planner<'a> {
    network: &'a Network,
    formatter: RouteFormatter<'a>,
    search: SearchOptions,
    animation: Option<Animation>,
}

impl<'a> Planner<'a> {
    pub fn new(
        network: &'a Network,
        formatter: RouteFormatter<'a>,
        search: SearchOptions,
        animation: Option<Animation>,
    ) -> Self {
        Self { network, formatter, search, animation }
    }

    /// Prints the fewest-transfers route and the fastest route, each with interchanges collapsed.
    pub fn print_routes<W: Write>(&self, out: &mut W, start: &str, goal: &str) -> Result<(), Box<dyn Error>> {
        let mut observer = LogObserver::new("fewest transfers");
        match fewest_transfers_with(self.network, start, goal, &mut observer)? {
            Some(route) => {
                let route = route.collapse_interchanges();
                writeln!(out, "🛤️  Fewest transfers (transfers: {}): {}", route.transfers, self.formatter.route(&route))?;
            }
            None => writeln!(out, "⚠️  No route between these stations.")?,
        }

        let mut observer = LogObserver::new("fastest");
        if let Some(route) = minimum_time_with(self.network, start, goal, &self.search, &mut observer)? {
            let route = route.collapse_interchanges();
            writeln!(
                out,
                "⏱️  Fastest ({} min, transfers: {}): {}",
                route.duration,
                route.transfers,
                self.formatter.route(&route)
            )?;
        }
        Ok(())
    }

    /// Interactive loop: list the stations, ask for a start and a goal, print both routes, repeat on request.
    /// Ends when the user declines another route or input runs out.
    pub fn run<R: BufRead, W: Write>(&self, input: &mut R, out: &mut W) -> Result<(), Box<dyn Error>> {
        let names = self.network.station_names();
        if names.is_empty() {
            writeln!(out, "⚠️  The network has no stations to choose from.")?;
            return Ok(());
        }
        loop {
            writeln!(out)?;
            writeln!(out, "{}", "─".repeat(RULE_WIDTH))?;
            writeln!(out, "🚇 Choose your stations by number:")?;
            for (i, name) in names.iter().enumerate() {
                writeln!(out, "{}. {name}", i + 1)?;
            }

            let Some(start) = self.choose(input, out, &names, "🔹 Start number: ")? else { break };
            let Some(goal) = self.choose(input, out, &names, "🔹 Goal number: ")? else { break };
            writeln!(out, "{}", "─".repeat(RULE_WIDTH))?;

            self.print_routes(out, &self.network.station(start).id, &self.network.station(goal).id)?;
            if let Some(animation) = &self.animation {
                animation.play(out)?;
            }

            write!(out, "New route? (y/n): ")?;
            out.flush()?;
            match read_answer(input)? {
                Some(answer) if matches!(answer.to_lowercase().as_str(), "y" | "yes" | "e") => continue,
                _ => break,
            }
        }
        writeln!(out, "🚆 Have a good journey! 🚆")?;
        Ok(())
    }

    // Prompts until a listed number is given. A name served by several lines resolves to its first station.
    fn choose<R: BufRead, W: Write>(
        &self,
        input: &mut R,
        out: &mut W,
        names: &[&str],
        prompt: &str,
    ) -> io::Result<Option<StationIndex>> {
        loop {
            write!(out, "{prompt}")?;
            out.flush()?;
            let Some(answer) = read_answer(input)? else { return Ok(None) };
            match answer.parse::<usize>() {
                Ok(choice) if (1..=names.len()).contains(&choice) => {
                    return Ok(self.network.find_by_name(names[choice - 1]).first().copied());
                }
                Ok(_) => writeln!(out, "⚠️  Invalid choice, please enter a number from the list.")?,
                Err(_) => writeln!(out, "⚠️  Please enter a valid number.")?,
            }
        }
    }
}

fn read_answer<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use metro::display::LinePalette;
    use metro::sample::ankara_network;

    fn run_script(network: &Network, script: &str) -> String {
        let palette = LinePalette::ankara();
        let formatter = RouteFormatter::new(&palette).colored(false);
        let planner = Planner::new(network, formatter, SearchOptions::default(), None);

        let mut out = Vec::new();
        planner.run(&mut script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn lists_sorted_names_and_answers_one_query() {
        let network = ankara_network().unwrap();
        // 1 = AŞTİ, 7 = OSB.
        let output = run_script(&network, "1\n7\nn\n");

        assert!(output.contains("1. AŞTİ\n2. Batıkent\n"));
        assert!(output.contains("9. Ulus\n"));
        assert!(output.contains("Fewest transfers (transfers: 1): AŞTİ -> Kızılay -> Ulus -> Demetevler -> OSB"));
        assert!(output.contains("Fastest (25 min, transfers: 1): AŞTİ -> Kızılay -> Ulus -> Demetevler -> OSB"));
        assert!(output.ends_with("🚆 Have a good journey! 🚆\n"));
    }

    #[test]
    fn reprompts_on_bad_input_and_repeats_on_request() {
        let network = ankara_network().unwrap();
        let output = run_script(&network, "abc\n42\n2\n5\ny\n9\n9\nn\n");

        assert!(output.contains("Please enter a valid number."));
        assert!(output.contains("Invalid choice, please enter a number from the list."));
        assert!(output.contains("Fastest (21 min, transfers: 0): Batıkent -> Demetevler -> Gar -> Keçiören"));
        assert!(output.contains("Fastest (0 min, transfers: 0): Ulus"));
        assert_eq!(output.matches("New route?").count(), 2);
    }

    #[test]
    fn stops_when_input_runs_out() {
        let network = ankara_network().unwrap();
        let output = run_script(&network, "3\n");
        assert!(!output.contains("Fastest"));
        assert!(output.ends_with("Have a good journey! 🚆\n"));
    }

    #[test]
    fn empty_network_exits_without_prompting() {
        let network = Network::builder().build();
        let output = run_script(&network, "1\n1\n");
        assert_eq!(output, "⚠️  The network has no stations to choose from.\n");
    }

    #[test]
    fn one_shot_query_reports_unknown_station() {
        let network = ankara_network().unwrap();
        let palette = LinePalette::new();
        let planner = Planner::new(&network, RouteFormatter::new(&palette), SearchOptions::default(), None);

        let mut out = Vec::new();
        let err = planner.print_routes(&mut out, "M1", "Z9").unwrap_err();
        assert_eq!(err.to_string(), "Unknown station Z9.");
    }

    #[test]
    fn animation_moves_the_train() {
        let animation = Animation { distance: 3, delay: Duration::ZERO };
        let mut out = Vec::new();
        animation.play(&mut out).unwrap();
        let output = String::from_utf8(out).unwrap();
        assert_eq!(output, "\n\r🚆\r 🚆\r  🚆\n");
    }
}
