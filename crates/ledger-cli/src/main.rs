use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "ledger-cli")]
#[command(about = "CLI client for the proof-of-work ledger node")]
struct Cli {
    /// Node base URL (e.g. http://127.0.0.1:8080)
    #[arg(long, global = true, default_value = "http://127.0.0.1:8080")]
    node: String,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Queue a transaction for the next block
    Submit {
        /// Sender
        #[arg(long)]
        from: String,
        /// Recipient
        #[arg(long)]
        to: String,
        /// Amount
        #[arg(long)]
        amount: f64,
    },
    /// Mine all pending transactions into a new block
    Mine {
        /// Address credited with the block reward
        #[arg(long)]
        miner: Option<String>,
    },
    /// Show an address's balance
    Balance { address: String },
    /// Show every confirmed transaction touching an address
    History { address: String },
    /// Dump the chain, or just its summary
    Chain {
        #[arg(long)]
        summary: bool,
    },
    /// Show one block by index
    Block { index: u64 },
    /// Run full chain validation
    Validate,
    /// Recent mining records, newest first
    Records {
        #[arg(long)]
        limit: Option<usize>,
        /// Only blocks mined by this address
        #[arg(long)]
        miner: Option<String>,
    },
}

#[derive(Serialize)]
struct Tx {
    sender: String,
    receiver: String,
    amount: f64,
}

#[derive(Serialize)]
struct Mine {
    #[serde(skip_serializing_if = "Option::is_none")]
    miner: Option<String>,
}

impl Command {
    /// Path (and query) relative to the node base URL.
    fn path(&self) -> String {
        match self {
            Command::Submit { .. } => "/tx".to_string(),
            Command::Mine { .. } => "/mine".to_string(),
            Command::Balance { address } | Command::History { address } => {
                format!("/wallet/{}", urlencoding::encode(address))
            }
            Command::Chain { summary: true } => "/chain/summary".to_string(),
            Command::Chain { summary: false } => "/chain".to_string(),
            Command::Block { index } => format!("/chain/blocks/{index}"),
            Command::Validate => "/chain/validate".to_string(),
            Command::Records { limit, miner } => {
                let mut query = Vec::new();
                if let Some(limit) = limit {
                    query.push(format!("limit={limit}"));
                }
                if let Some(miner) = miner {
                    query.push(format!("miner={}", urlencoding::encode(miner)));
                }
                if query.is_empty() {
                    "/mining/records".to_string()
                } else {
                    format!("/mining/records?{}", query.join("&"))
                }
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .pretty()
        .init();

    let cli = Cli::parse();
    let url = format!("{}{}", cli.node.trim_end_matches('/'), cli.cmd.path());
    debug!(%url, "sending request");

    let client = reqwest::Client::new();
    let req = match &cli.cmd {
        Command::Submit { from, to, amount } => client.post(&url).json(&Tx {
            sender: from.clone(),
            receiver: to.clone(),
            amount: *amount,
        }),
        Command::Mine { miner } => client.post(&url).json(&Mine {
            miner: miner.clone(),
        }),
        _ => client.get(&url),
    };
    let res = req
        .send()
        .await
        .with_context(|| format!("request to {url} failed"))?;
    let status = res.status();
    let body: serde_json::Value = res.json().await.context("node returned non-JSON body")?;

    let body = match cli.cmd {
        Command::Balance { .. } if status.is_success() => serde_json::json!({
            "address": body["address"],
            "balance": body["balance"],
        }),
        Command::History { .. } if status.is_success() => body["history"].clone(),
        _ => body,
    };

    println!("status: {}", status);
    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}
