use clap::Parser;
use log::info;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

use rail_sim::simulation::{RailController, TrainSnapshot};

#[derive(Parser)]
#[command(name = "rail_sim")]
#[command(about = "Discrete-time rail network simulation")]
struct Cli {
    /// Number of simulation ticks to run
    #[arg(long, default_value = "10")]
    ticks: u32,

    /// Pause between ticks in milliseconds
    #[arg(long, default_value = "0")]
    interval_ms: u64,

    /// Send idle trains to random stations, reproducibly for this seed
    #[arg(long)]
    seed: Option<u64>,

    /// Skip the per-tick train table
    #[arg(long)]
    quiet: bool,
}

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn,rail_sim=info"),
    )
    .init();

    let cli = Cli::parse();
    run_headless(&cli);
}

/// Run the demo network for the requested number of ticks
fn run_headless(cli: &Cli) {
    let mut controller = RailController::create_demo();
    let mut rng = cli.seed.map(StdRng::seed_from_u64);

    info!(
        "Running rail simulation: {} stations, {} tracks, {} trains",
        controller.network().station_count(),
        controller.network().track_count(),
        controller.train_count()
    );

    for tick in 1..=cli.ticks {
        if let Some(rng) = rng.as_mut() {
            dispatch_idle_trains(&mut controller, rng);
        }

        controller.tick();

        if !cli.quiet {
            println!("=== TICK {} ===", tick);
            print_table(&controller.snapshot());
            println!();
        }

        if cli.interval_ms > 0 && tick < cli.ticks {
            std::thread::sleep(std::time::Duration::from_millis(cli.interval_ms));
        }
    }

    let stats = controller.stats();
    info!("=== SIMULATION COMPLETE ===");
    info!("Ticks run: {}", stats.ticks);
    info!("Trains: {}", stats.trains_created);
    info!("Routes planned: {}", stats.routes_planned);
    info!("Routes rejected: {}", stats.routes_rejected);
    info!("Moves: {}", stats.moves);
    info!("Waits: {}", stats.waits);
    info!("Arrivals: {}", stats.arrivals);
    info!("Faults: {}", stats.faults);
    info!("Tracks still locked: {}", controller.locks().lock_count());
}

/// Give every idle train a new random destination
fn dispatch_idle_trains(controller: &mut RailController, rng: &mut StdRng) {
    let stations = controller.network().station_ids();

    for train_id in controller.idle_train_ids() {
        let Some(destination) = stations.choose(rng) else {
            return;
        };
        controller.command_destination(train_id, destination.clone());
    }
}

fn print_table(snapshot: &[TrainSnapshot]) {
    println!(
        "{:<8} {:<10} {:<12} {:<10} {:<8}",
        "id", "location", "destination", "track", "status"
    );
    for train in snapshot {
        println!(
            "{:<8} {:<10} {:<12} {:<10} {:<8}",
            train.id.as_str(),
            train.location.as_str(),
            train.destination.as_ref().map_or("-", |station| station.as_str()),
            train.current_track.as_ref().map_or("-", |track| track.as_str()),
            train.status.to_string()
        );
    }
}
