use std::path::PathBuf;

use clap::Parser;
use lander::{init, App, Arena, Error, Fuel, Level, Settings};

#[derive(Parser)]
#[command(version, about = "Flies a rocket lander session with the autopilot", long_about = None)]
struct Cli {
    /// Level json file path, a random level is generated when omitted
    #[arg(long, value_name = "FILE")]
    level: Option<PathBuf>,

    /// Settings json file path
    #[arg(long, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Seed of the generated level
    #[arg(long, default_value = "0")]
    seed: u64,

    /// Arena width of the generated level
    #[arg(long, default_value = "1920")]
    width: f64,

    /// Arena height of the generated level
    #[arg(long, default_value = "1080")]
    height: f64,

    /// Fly with unlimited fuel
    #[arg(long)]
    unlimited_fuel: bool,

    /// Maximal number of simulated ticks
    #[arg(long, short, default_value = "100000")]
    ticks_max: usize,
}

fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let settings = match &cli.settings {
        Some(path) => init::json::parse_settings(path)?,
        None => Settings::default(),
    };
    let mut app = match &cli.level {
        Some(path) => App::try_new(init::json::parse_level(path)?, settings)?,
        None => {
            let fuel = if cli.unlimited_fuel {
                Fuel::Unlimited
            } else {
                Level::default_fuel()
            };
            App::from_seed(cli.seed, Arena::new(cli.width, cli.height), fuel, settings)?
        }
    };

    let autopilot = app.autopilot();
    let now = std::time::Instant::now();
    let result = app.run(&autopilot, cli.ticks_max);
    let elapsed = now.elapsed();
    log::info!("Run ended with result: {result:?} time: {elapsed:?}");

    app.print_flight_results();
    result.map(|_| ())
}
