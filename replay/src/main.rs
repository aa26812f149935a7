#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

mod config;

use abstutil::Timer;
use anyhow::Result;
use structopt::StructOpt;

use model::{format_clock, Clock, Dataset, Model, Player, Scene, PASSENGERS_FILE, TRIPS_FILE};

use self::config::ReplayConfig;

/// Replays precomputed vehicle trips and passenger requests without drawing anything, reporting
/// what's on screen as the clock runs.
#[derive(StructOpt)]
struct Args {
    /// A directory containing trips.json and passengers.json
    #[structopt(long, default_value = "data")]
    data_dir: String,
    /// Overrides the trips file from --data-dir
    #[structopt(long)]
    trips: Option<String>,
    /// Overrides the passengers file from --data-dir
    #[structopt(long)]
    passengers: Option<String>,
    /// The path to a JSON file with a ReplayConfig
    #[structopt(long)]
    config: Option<String>,
    /// Stop after this many frames. Without this, the replay loops forever.
    #[structopt(long)]
    frames: Option<usize>,
    /// Overrides the frame rate from the config
    #[structopt(long)]
    fps: Option<f64>,
    /// Start here instead of the floor, in minutes since midnight
    #[structopt(long)]
    seek: Option<f64>,
    /// Print the scene at the starting time as JSON and quit
    #[structopt(long)]
    once: bool,
    /// Write the last projected scene to this path as JSON
    #[structopt(long)]
    dump: Option<String>,
    /// Log a summary every this many frames
    #[structopt(long, default_value = "60")]
    report_every: usize,
    /// Draw connectors from vehicles to their pickup points
    #[structopt(long)]
    pickup_connectors: bool,
    /// Draw connectors from vehicles to their destinations
    #[structopt(long)]
    dropoff_connectors: bool,
}

impl Args {
    fn config(&self) -> Result<ReplayConfig> {
        let mut config = match self.config {
            Some(ref path) => ReplayConfig::load(path)?,
            None => ReplayConfig::default(),
        };
        if let Some(fps) = self.fps {
            config.fps = fps;
        }
        config.scene.show_pickup_connectors |= self.pickup_connectors;
        config.scene.show_dropoff_connectors |= self.dropoff_connectors;
        config.validate()?;
        Ok(config)
    }

    fn dataset_paths(&self) -> (String, String) {
        let trips = self
            .trips
            .clone()
            .unwrap_or_else(|| format!("{}/{}", self.data_dir, TRIPS_FILE));
        let passengers = self
            .passengers
            .clone()
            .unwrap_or_else(|| format!("{}/{}", self.data_dir, PASSENGERS_FILE));
        (trips, passengers)
    }
}

fn main() -> Result<()> {
    abstutil::logger::setup();

    let args = Args::from_iter(abstutil::cli_args());
    let config = args.config()?;

    let (trips_path, passengers_path) = args.dataset_paths();
    let mut timer = Timer::new("load replay data");
    let model = Model::new(Dataset::load_or_empty(
        &trips_path,
        &passengers_path,
        &mut timer,
    ));
    timer.done();
    if model.dataset().is_empty() {
        warn!("No trips or passengers loaded; the scene will stay empty");
    }

    let clock = Clock::new(&config.clock, model.ceiling());
    let mut player = Player::new(clock, config.scene.clone(), config.frame_interval()?);
    if let Some(limit) = args.frames {
        player = player.with_frame_limit(limit);
    }
    if let Some(time) = args.seek {
        if time < player.clock().floor() || time > player.clock().ceiling() {
            bail!(
                "--seek {} is outside of [{}, {}]",
                time,
                player.clock().floor(),
                player.clock().ceiling()
            );
        }
        player.clock_mut().seek(time);
    }

    if args.once {
        let scene = player.current_scene(&model);
        println!("{}", abstutil::to_json(&scene));
        if let Some(path) = args.dump {
            abstio::write_json(path, &scene);
        }
        return Ok(());
    }

    let mut last_scene: Option<Scene> = None;
    let mut frame = 0;
    let frames = player.run(&model, |_, scene| {
        frame += 1;
        if args.report_every > 0 && frame % args.report_every == 0 {
            info!("{}: {}", format_clock(scene.time), scene.summary());
        }
        if args.dump.is_some() {
            last_scene = Some(scene.clone());
        }
    });
    info!(
        "Stopped after {} frames at {}",
        frames,
        format_clock(player.clock().time())
    );

    if let (Some(path), Some(scene)) = (args.dump, last_scene) {
        abstio::write_json(path, &scene);
    }
    Ok(())
}
