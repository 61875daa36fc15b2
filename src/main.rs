use dotenv::dotenv;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use vayrynen::config::Config;
use vayrynen::game::Game;
use vayrynen::infra::{ArenaClient, CompositeObserver, DefaultObserver, GameObserver, ReplayObserver};
use vayrynen::planner::Planner;

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("vayrynen=debug,info"));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    init_logging();

    let config = Config::from_env().with_host_arg(std::env::args().nth(1));
    tracing::info!("Arena server: {}", config.host);
    if let Some(radius) = config.max_search_radius {
        tracing::info!("Search radius limited to {}", radius);
    }

    let mut observers: Vec<Box<dyn GameObserver + Send>> = vec![Box::new(DefaultObserver)];
    if let Some(folder) = &config.replays_folder {
        observers.push(Box::new(ReplayObserver::new(folder.clone())));
    }

    let connection = ArenaClient::new(&config.host);
    let planner = Planner::new(config.pathfinder());
    let mut game = Game::new(
        connection,
        CompositeObserver::new(observers),
        planner,
        config.game_settings(),
    );

    game.run_until(interrupted()).await?;

    Ok(())
}

async fn interrupted() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Interrupted, leaving the arena"),
        Err(err) => {
            tracing::warn!("Cannot listen for Ctrl-C: {}", err);
            std::future::pending::<()>().await
        }
    }
}
