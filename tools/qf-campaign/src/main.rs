//! QF-Campaign: builds a create-campaign request for the QuFunding ledger.
//!
//! Prints a ready-to-paste host command that submits the request, followed by its parts.

use anyhow::{Context, Result};
use clap::Parser;
use qf_campaign::{CampaignSpec, DEFAULT_CREATION_FEE, DEFAULT_EPOCHS_PER_DAY};
use qf_ledger::domain::{Amount, Epoch};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// QF-Campaign: create-campaign payload builder
#[derive(Parser, Debug)]
#[command(name = "qf-campaign")]
#[command(about = "Encode a QuFunding create-campaign request")]
#[command(version = qf_ledger::VERSION)]
struct Args {
    /// Identity of the deployed ledger contract
    contract_id: String,

    /// Beneficiary identity (56 letters A-Z)
    beneficiary: String,

    /// Funding goal in whole units
    goal: Amount,

    /// Campaign duration in days
    duration_days: i64,

    /// Creation fee the ledger was initialized with, in whole units (multiplied by 1,000,000 on submission)
    #[arg(long, default_value_t = DEFAULT_CREATION_FEE)]
    creation_fee: Amount,

    /// Host epochs per day
    #[arg(long, default_value_t = DEFAULT_EPOCHS_PER_DAY)]
    epochs_per_day: Epoch,
}

fn init_logging() {
    let level = std::env::var("QF_LOG_LEVEL")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "info".to_string());
    let filter = EnvFilter::try_new(&level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();
    debug!(?args, "Arguments parsed");

    let spec = CampaignSpec {
        beneficiary: args.beneficiary.clone(),
        goal: args.goal,
        duration_days: args.duration_days,
        creation_fee: args.creation_fee,
        epochs_per_day: args.epochs_per_day,
    };
    let prepared = spec
        .prepare()
        .with_context(|| format!("cannot build request for beneficiary {}", args.beneficiary))?;

    info!(
        beneficiary = %prepared.beneficiary,
        goal = prepared.payload.goal,
        duration_epochs = prepared.payload.duration_epochs,
        "Create-campaign payload built"
    );

    let rule = "=".repeat(72);
    println!("{rule}");
    println!("Paste the following command into the host CLI to create the campaign:");
    println!("{rule}");
    println!("{}", prepared.submission_command(&args.contract_id));
    println!("{rule}");
    println!("amount:         {}", prepared.amount);
    println!("opcode:         {}", prepared.opcode());
    println!("payload length: {}", prepared.bytes.len());
    println!("payload:        {}", prepared.hex());
    println!("{rule}");
    println!(
        "NOTE: assumes the ledger was initialized with a creation fee of {} ({} whole units).",
        prepared.amount, args.creation_fee
    );

    Ok(())
}
