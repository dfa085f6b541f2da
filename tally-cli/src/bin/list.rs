use std::{error::Error, process};

use clap::{Parser, Subcommand};
use tally_cli::list_actions::{self, ListAction};
use tally_core::{NumberList, app_config};

#[derive(Parser, Debug)]
#[command(name = "tally-list")]
#[command(version = "0.1")]
#[command(about = "maintains a JSON-backed ordered list of integers", long_about = None)]
struct Args {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand, Debug)]
enum Action {
    /// Insert an element at a position, shifting later elements right
    Insert { element: i64, position: i64 },
    /// Remove the first occurrence of an element by value
    Remove { element: i64 },
    /// Append an element at the end of the list
    Append { element: i64 },
    /// Print the current list
    Print,
    /// Empty the list and delete its backing file
    Clear,
    /// Print the index of the first occurrence of an element, or -1
    Find { element: i64 },
    /// Overwrite the element at a position
    Update { position: i64, new_element: i64 },
}

impl From<Action> for ListAction {
    fn from(action: Action) -> ListAction {
        match action {
            Action::Insert { element, position } => ListAction::Insert { element, position },
            Action::Remove { element } => ListAction::Remove { element },
            Action::Append { element } => ListAction::Append { element },
            Action::Print => ListAction::Print,
            Action::Clear => ListAction::Clear,
            Action::Find { element } => ListAction::Find { element },
            Action::Update { position, new_element } => ListAction::Update { position, new_element },
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let args = Args::parse();
    let mut list = NumberList::open(app_config::get_default_list_file())?;

    let succeeded = list_actions::execute(&mut list, args.action.into())?;
    if !succeeded {
        process::exit(1);
    }
    Ok(())
}
