//! marketsync CLI — inspect sync configuration.
//!
//! Usage:
//! ```bash
//! marketsync info
//! marketsync config   # resolves MARKETSYNC_* environment variables
//! marketsync version
//! ```

use std::env;
use std::process;

use anyhow::Result;
use marketsync_core::config::SyncConfig;
use marketsync_sync::init_tracing;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    match args[1].as_str() {
        "info" => cmd_info(),
        "config" => cmd_config()?,
        "version" | "--version" | "-V" => {
            println!("marketsync {}", env!("CARGO_PKG_VERSION"));
        }
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    }

    Ok(())
}

fn print_usage() {
    println!("marketsync {}", env!("CARGO_PKG_VERSION"));
    println!("Marketplace contract mirror — backfill + live event sync\n");
    println!("USAGE:");
    println!("    marketsync <COMMAND>\n");
    println!("COMMANDS:");
    println!("    info     Show MarketSync configuration info");
    println!("    config   Resolve and print the effective sync config");
    println!("    version  Print version");
    println!("    help     Print this help");
}

fn cmd_info() {
    println!("MarketSync v{}", env!("CARGO_PKG_VERSION"));
    println!("  Mirrored records: collections, items, offers");
    println!("  Contract events: CollectionAdded, ItemAdded, ItemListed, ItemSold,");
    println!("                   OfferPlaced, OfferAccepted, ItemClaimed");
    println!("  Storage backends: memory, SQLite (feature: sqlite)");
    println!("  Config: MARKETSYNC_CONTRACT (required), MARKETSYNC_RPC_URL,");
    println!("          MARKETSYNC_IPFS_GATEWAY, MARKETSYNC_STORE_URL, MARKETSYNC_LOG");
}

fn cmd_config() -> Result<()> {
    let config = SyncConfig::from_env()?;
    init_tracing(&config.log_level, false);
    tracing::info!(contract = %config.contract_address, "configuration resolved");
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
