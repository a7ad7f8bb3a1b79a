mod api;
mod constants;

use clap::Parser;
use ledger_core::{
    constants::{DEFAULT_DIFFICULTY, HASH_HEX_SIZE, MINING_REWARD},
    LedgerConfig, SharedLedger,
};
use ledger_storage::sled_store::SledStore;
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tracing::{info, Level};

#[derive(Parser, Debug)]
struct Args {
    /// Address to listen on, e.g. 127.0.0.1:8080
    #[arg(long, default_value = "127.0.0.1:8080")]
    listen: String,

    /// Data directory for the mining audit store
    #[arg(long, default_value = "./data")]
    data_dir: String,

    /// Leading hex zeros required of every block hash
    #[arg(
        long,
        default_value_t = DEFAULT_DIFFICULTY,
        value_parser = clap::value_parser!(u32).range(0..=HASH_HEX_SIZE as i64)
    )]
    difficulty: u32,

    /// Coins credited to the miner of each block
    #[arg(long, default_value_t = MINING_REWARD)]
    mining_reward: f64,

    /// Abort a mine request after this many seconds (0 = no limit)
    #[arg(long, default_value_t = 0)]
    mine_timeout_secs: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let store = Arc::new(SledStore::open(&args.data_dir)?);

    let config = LedgerConfig {
        difficulty: args.difficulty,
        mining_reward: args.mining_reward,
    };
    info!(difficulty = config.difficulty, reward = config.mining_reward, "mining genesis block");
    let ledger = SharedLedger::try_with_config(config)?;

    let state = api::AppState {
        ledger,
        audit: store,
        mine_timeout: (args.mine_timeout_secs > 0)
            .then(|| Duration::from_secs(args.mine_timeout_secs)),
    };
    let app = api::router(state);

    let addr: SocketAddr = args.listen.parse()?;
    info!("ledger-node listening on http://{addr}");
    axum::serve(tokio::net::TcpListener::bind(addr).await?, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown requested");
    }
}
