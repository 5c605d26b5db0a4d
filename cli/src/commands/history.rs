use std::process::ExitCode;

use anyhow::anyhow;
use nutrilens_core::{application::NutrilensService, domain::history::HistoryService};

use crate::{args::HistoryCommand, render};

pub fn run(service: &NutrilensService, action: HistoryCommand) -> anyhow::Result<ExitCode> {
    match action {
        HistoryCommand::List { json } => {
            let entries = service.list_history();
            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                print!("{}", render::format_history_list(&entries));
            }
        }
        HistoryCommand::Show { id, json } => {
            let entry = service
                .get_history_entry(&id)
                .ok_or_else(|| anyhow!("No history entry with id {id}"))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&entry)?);
            } else {
                print!("{}", render::format_history_entry(&entry));
            }
        }
        HistoryCommand::Remove { id } => {
            let found = service.get_history_entry(&id).is_some();
            service.remove_history_entry(&id);
            print!("{}", render::format_removal(&id, found));
        }
        HistoryCommand::Clear => {
            service.clear_history();
            println!("History cleared");
        }
    }
    Ok(ExitCode::SUCCESS)
}
