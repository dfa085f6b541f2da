use std::error::Error;

use camino::Utf8PathBuf;
use clap::Parser;
use tally_cli::inventory_menu;
use tally_core::{Inventory, app_config};

#[derive(Parser, Debug)]
#[command(name = "tally-inventory")]
#[command(version = "0.1")]
#[command(about = "maintains a JSON-backed inventory of named items", long_about = None)]
struct Args {
    /// Verbose mode
    #[arg(short, long)]
    verbose: bool,
    /// Path to the JSON inventory file (defaults to a file in the app data directory)
    #[arg(short, long)]
    file: Option<Utf8PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    if args.verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::init();
    }

    let path = args.file.unwrap_or_else(app_config::get_default_inventory_file);
    println!("Using inventory file at {path}");

    let mut inventory = Inventory::open(path)?;
    inventory_menu::run(&mut inventory)
}
