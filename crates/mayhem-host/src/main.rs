use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

use mayhem_host::game_loop::{HostCommand, Session, spawn_session};
use mayhem_host::scenario::Scenario;
use mayhem_physics::MayhemConfig;

/// Command-line overrides, all optional.
#[derive(Debug, Default)]
struct HostArgs {
    scenario: Option<PathBuf>,
    max_ticks: Option<u64>,
    seed: Option<u64>,
    dump: bool,
}

impl HostArgs {
    fn parse(args: impl Iterator<Item = String>) -> Self {
        let mut parsed = Self::default();
        for arg in args {
            if let Some(path) = arg.strip_prefix("--scenario=") {
                parsed.scenario = Some(PathBuf::from(path));
            } else if let Some(n) = arg.strip_prefix("--ticks=") {
                parsed.max_ticks = n.parse().ok();
            } else if let Some(n) = arg.strip_prefix("--seed=") {
                parsed.seed = n.parse().ok();
            } else if arg == "--dump" {
                parsed.dump = true;
            } else {
                tracing::warn!(%arg, "Ignoring unknown argument");
            }
        }
        parsed
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = HostArgs::parse(std::env::args().skip(1));
    let config = MayhemConfig::load();

    let mut scenario = match &args.scenario {
        Some(path) => match Scenario::load(path) {
            Ok(scenario) => scenario,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load scenario");
                std::process::exit(1);
            },
        },
        None => Scenario::default(),
    };
    if let Some(max_ticks) = args.max_ticks {
        scenario.max_ticks = max_ticks;
    }
    if let Some(seed) = args.seed {
        scenario.seed = seed;
    }

    let tick_rate_hz = config.tick_rate_hz;
    let session = match Session::new(&scenario, config) {
        Ok(session) => session,
        Err(e) => {
            tracing::error!(error = %e, "Failed to start session");
            std::process::exit(1);
        },
    };

    tracing::info!(
        players = session.slots().len(),
        max_ticks = scenario.max_ticks,
        tick_rate_hz,
        "Mayhem host starting"
    );

    let (cmd_tx, handle) = spawn_session(session, tick_rate_hz);

    let stop_tx = cmd_tx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = stop_tx.send(HostCommand::Stop);
        }
    });

    let session = match handle.await {
        Ok(session) => session,
        Err(e) => {
            tracing::error!(error = %e, "Session task failed");
            std::process::exit(1);
        },
    };
    drop(cmd_tx);

    let world = session.world();
    tracing::info!(
        ticks = world.tick(),
        spread = world.longest_player_distance(),
        camera = ?world.camera_offset(),
        "Mayhem host finished"
    );

    if args.dump {
        match serde_json::to_string_pretty(&world.snapshot()) {
            Ok(json) => println!("{json}"),
            Err(e) => tracing::error!(error = %e, "Failed to encode snapshot"),
        }
    }
}
