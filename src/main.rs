//! Cardano CLI facade.
//!
//! # Pipeline
//!
//! ```text
//!   address ──query utxo──▶ UTXO set ──transaction build──▶ unsigned_<id>.tx
//!                                                                │
//!                                              transaction sign  │  (key dir)
//!                                                                ▼
//!   ledger ◀──────────transaction submit─────────────────── signed_<id>.tx
//! ```
//!
//! Each subcommand prints a JSON document on stdout. Logs go to stderr.

use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;

use cardano_cli_facade::blockchain::utxo::select_inputs;
use cardano_cli_facade::config::{
    load_config, validate_config, ConfigError, OrchestratorConfig,
};
use cardano_cli_facade::observability::logging::init_logging;
use cardano_cli_facade::{TransactionArtifact, TransactionOrchestrator};

#[derive(Parser)]
#[command(name = "cardano-cli-facade")]
#[command(
    about = "Query UTXOs and build, sign, and submit transactions through cardano-cli",
    long_about = None
)]
struct Cli {
    /// Path to a TOML config file. Built-in defaults are used when absent.
    #[arg(short, long, env = "CARDANO_FACADE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List unspent outputs at an address
    Utxos {
        #[arg(long)]
        address: String,
    },
    /// Total balance at an address in the smallest unit
    Balance {
        #[arg(long)]
        address: String,
    },
    /// Build an unsigned transaction
    Build {
        #[arg(long)]
        sender: String,
        #[arg(long)]
        receiver: String,
        #[arg(long)]
        amount: u64,
        /// Input as <hash>#<index>; repeatable. Defaults to all sender UTXOs.
        #[arg(long = "tx-in")]
        tx_in: Vec<String>,
    },
    /// Sign a previously built transaction
    Sign {
        /// Artifact id printed by `build`
        #[arg(long)]
        id: String,
        /// Signing key file name, relative to the key directory
        #[arg(long)]
        key: String,
    },
    /// Submit a previously signed transaction
    Submit {
        /// Artifact id printed by `sign`
        #[arg(long)]
        id: String,
    },
    /// Query, build, sign, and submit in one step
    Transfer {
        #[arg(long)]
        sender: String,
        #[arg(long)]
        receiver: String,
        #[arg(long)]
        amount: u64,
        #[arg(long)]
        key: String,
    },
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = resolve_config(cli.config.as_deref())?;
    init_logging(&config.observability);

    let orchestrator = TransactionOrchestrator::new(config)?;

    let output = match cli.command {
        Commands::Utxos { address } => {
            let utxos = orchestrator.query_unspent_outputs(&address).await?;
            json!({ "address": address, "utxos": utxos })
        }
        Commands::Balance { address } => {
            let balance = orchestrator.compute_total_balance(&address).await?;
            json!({ "address": address, "balance": balance })
        }
        Commands::Build {
            sender,
            receiver,
            amount,
            tx_in,
        } => {
            let available = orchestrator.query_unspent_outputs(&sender).await?;
            let inputs = select_inputs(&available, &tx_in)?;
            let artifact = orchestrator
                .build_transaction(&sender, &inputs, &receiver, amount)
                .await?;
            json!({
                "id": artifact.id,
                "stage": artifact.stage,
                "file": orchestrator.artifact_path(&artifact),
                "inputs": inputs,
            })
        }
        Commands::Sign { id, key } => {
            let unsigned = TransactionArtifact::unsigned(&id)?;
            let signed = orchestrator.sign_transaction(&unsigned, &key).await?;
            json!({
                "id": signed.id,
                "stage": signed.stage,
                "file": orchestrator.artifact_path(&signed),
            })
        }
        Commands::Submit { id } => {
            let signed = TransactionArtifact::signed(&id)?;
            orchestrator.submit_transaction(&signed).await?;
            json!({ "id": signed.id, "submitted": true })
        }
        Commands::Transfer {
            sender,
            receiver,
            amount,
            key,
        } => {
            let receipt = orchestrator.transfer(&sender, &receiver, amount, &key).await?;
            serde_json::to_value(&receipt)?
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn resolve_config(path: Option<&std::path::Path>) -> Result<OrchestratorConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => {
            let config = OrchestratorConfig::default();
            validate_config(&config).map_err(ConfigError::Validation)?;
            Ok(config)
        }
    }
}
