//! chainparse command-line tool.
//!
//! ## Usage
//!
//! ```bash
//! # Classify an output script and derive its address
//! chainparse script 0014751e76e8199196d454941c45d1b3a323f1433bd6
//!
//! # Same script on testnet
//! chainparse --network testnet script 0014751e76e8199196d454941c45d1b3a323f1433bd6
//!
//! # Decode a single transaction input
//! chainparse input <hex>
//!
//! # Custom chain parameters from JSON
//! chainparse --params litecoin.json script 76a914...88ac
//! ```
//!
//! Reports are printed to stdout as JSON. Logs go to stderr and are
//! controlled by `RUST_LOG` (default `warn`).

use std::path::{Path, PathBuf};

use chainparse::script::{Network, NetworkParams, ScriptPubKey, ScriptType};
use chainparse::transaction::Input;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(name = "chainparse")]
#[clap(about = "Decode transaction inputs and classify output scripts", long_about = None)]
struct Cli {
    /// Network whose address prefixes are used
    #[clap(long, default_value_t = Network::Mainnet)]
    network: Network,

    /// JSON file with custom network parameters (overrides --network)
    #[clap(long)]
    params: Option<PathBuf>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Tokenize and classify an output script given as hex
    Script { hex: String },
    /// Decode one transaction input given as hex
    Input { hex: String },
}

#[derive(Serialize, Debug)]
struct ScriptReport {
    hex: String,
    asm: String,
    #[serde(rename = "type")]
    script_type: ScriptType,
    address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize, Debug)]
struct InputReport {
    #[serde(flatten)]
    input: Input,
    coinbase: bool,
    script_sig_asm: String,
}

fn script_report(hex_str: &str, params: &NetworkParams) -> Result<ScriptReport, Box<dyn std::error::Error>> {
    let script = ScriptPubKey::from_hex(hex_str)?;
    let (address, error) = match script.output_address(params) {
        Ok(address) => (Some(address), None),
        Err(e) => (None, Some(e.to_string())),
    };
    Ok(ScriptReport {
        hex: script.to_hex(),
        asm: script.to_asm(),
        script_type: script.script_type(),
        address,
        error,
    })
}

fn input_report(hex_str: &str) -> Result<InputReport, Box<dyn std::error::Error>> {
    let input = Input::from_hex(hex_str)?;
    Ok(InputReport {
        coinbase: input.is_coinbase(),
        script_sig_asm: input.script_sig.to_asm(),
        input,
    })
}

fn load_params(path: &Path) -> Result<NetworkParams, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("reading {}: {}", path.display(), e))?;
    Ok(serde_json::from_str(&text)?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let params = match &cli.params {
        Some(path) => load_params(path)?,
        None => cli.network.params(),
    };
    debug!(network = %cli.network, ?params, "network parameters");

    let report = match &cli.command {
        Command::Script { hex } => serde_json::to_string_pretty(&script_report(hex, &params)?)?,
        Command::Input { hex } => serde_json::to_string_pretty(&input_report(hex)?)?,
    };
    println!("{}", report);
    Ok(())
}
