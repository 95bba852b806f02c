use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing_subscriber::EnvFilter;

use xrpl_notary::config::NotaryConfig;
use xrpl_notary::error::{NotaryError, Result};
use xrpl_notary::ledger::xrpl::XrplGateway;
use xrpl_notary::notary::{Notary, DEFAULT_SEARCH_LIMIT};
use xrpl_notary::server::{self, AppState};

#[derive(Parser)]
#[command(name = "xrpl-notary")]
#[command(about = "Tamper-proof document proofs and NFT certificates on the XRP Ledger")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server
    Serve {
        /// Listen address
        #[arg(long, default_value = "127.0.0.1:8080")]
        addr: String,
    },
    /// Record a document hash on the ledger
    Timestamp {
        /// 64-character hex SHA-256 digest
        hash: String,
        /// Metadata as a JSON object
        #[arg(long)]
        metadata: Option<String>,
    },
    /// Check whether a document proof exists on the ledger
    Verify {
        /// Hash or base64-encoded document
        input: String,
        /// Number of recent transactions to search
        #[arg(long, default_value_t = DEFAULT_SEARCH_LIMIT)]
        limit: u32,
    },
    /// Mint an NFT certificate for a document
    MintNft {
        /// Content identifier (IPFS CID, URL, or document reference)
        cid: String,
        /// Metadata as a JSON object
        #[arg(long)]
        metadata: Option<String>,
    },
    /// Send a fee payment
    PayFee {
        /// Amount in drops
        amount: i64,
        /// Destination classic address
        destination: String,
        /// Memo text to attach
        #[arg(long)]
        memo: Option<String>,
    },
}

fn parse_metadata(raw: Option<String>) -> Result<Option<Map<String, Value>>> {
    raw.map(|s| {
        serde_json::from_str(&s)
            .map_err(|e| NotaryError::InvalidInput(format!("Metadata must be a JSON object: {e}")))
    })
    .transpose()
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|e| NotaryError::Serialization(e.to_string()))?;
    println!("{rendered}");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let config = NotaryConfig::from_env()?;
    let gateway = XrplGateway::new(&config);
    let notary = Notary::new(gateway, config.explorer_base.clone());

    match cli.command {
        Commands::Serve { addr } => {
            server::serve(AppState { notary }, &addr).await?;
        }
        Commands::Timestamp { hash, metadata } => {
            let receipt = notary
                .timestamp_document(&hash, parse_metadata(metadata)?)
                .await?;
            print_json(&receipt)?;
        }
        Commands::Verify { input, limit } => {
            let result = notary.verify_document(&input, limit).await?;
            print_json(&result)?;
        }
        Commands::MintNft { cid, metadata } => {
            let receipt = notary
                .mint_document_nft(&cid, parse_metadata(metadata)?)
                .await?;
            print_json(&receipt)?;
        }
        Commands::PayFee {
            amount,
            destination,
            memo,
        } => {
            let receipt = notary.pay_fee(amount, &destination, memo.as_deref()).await?;
            print_json(&receipt)?;
        }
    }

    Ok(())
}
