//! # metro
//!
//! Finds the route with the fewest transfers and the fastest route between two stations, either interactively
//! or for a single `--from`/`--to` pair.

use std::io::{stdin, stdout};

use chrono::NaiveDate;
use clap::Parser;

use metro::display::{LinePalette, RouteFormatter};
use metro::gtfs::{load_feed, network_from_gtfs, GtfsOptions};
use metro::{sample, Heuristic, Minutes, SearchOptions};

mod menu;

use menu::{Animation, Planner};

#[derive(Parser)]
#[command(name = "metro")]
#[command(about = "Route planner for multi-line metro networks")]
#[command(long_about = "Route planner for multi-line metro networks.

Without --gtfs the built-in Ankara sample network is used:
  metro                          # Interactive menu
  metro --from M1 --to K4        # One query, then exit
  metro --gtfs feed.zip --date 2024-05-10 --from 'S1/R' --to 'S4/B'

GTFS stations are identified as <stop_id>/<line>.")]
struct Cli {
    /// GTFS feed (zip or directory) to build the network from
    #[arg(long)]
    gtfs: Option<String>,

    /// Only use GTFS trips running on this day (YYYY-MM-DD)
    #[arg(long, requires = "gtfs")]
    date: Option<NaiveDate>,

    /// Minutes needed to change lines at the same GTFS stop
    #[arg(long, default_value_t = 3)]
    transfer_minutes: Minutes,

    /// Penalise stations off the goal's line by this many minutes when searching for the fastest route.
    /// The result may then be slower than the true fastest route.
    #[arg(long)]
    line_penalty: Option<Minutes>,

    /// Start station id (requires --to)
    #[arg(long, requires = "to")]
    from: Option<String>,

    /// Goal station id (requires --from)
    #[arg(long, requires = "from")]
    to: Option<String>,

    /// Print station names without line colours
    #[arg(long)]
    no_color: bool,

    /// Skip the train animation between queries
    #[arg(long)]
    no_animation: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging to stderr
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .target(env_logger::Target::Stderr)
        .init();

    let (network, palette) = match &cli.gtfs {
        Some(path) => {
            let gtfs = load_feed(path)?;
            let options = GtfsOptions { date: cli.date, transfer_minutes: cli.transfer_minutes };
            (network_from_gtfs(&gtfs, &options)?, LinePalette::from_gtfs(&gtfs))
        }
        None => (sample::ankara_network()?, LinePalette::ankara()),
    };

    let search = SearchOptions {
        heuristic: cli.line_penalty.map_or(Heuristic::None, Heuristic::LineChangePenalty),
    };
    let formatter = RouteFormatter::new(&palette).colored(!cli.no_color);
    let animation = (!cli.no_animation).then(Animation::default);
    let planner = Planner::new(&network, formatter, search, animation);

    match (&cli.from, &cli.to) {
        (Some(from), Some(to)) => planner.print_routes(&mut stdout().lock(), from, to),
        _ => planner.run(&mut stdin().lock(), &mut stdout().lock()),
    }
}
