use std::process::ExitCode;

use nutrilens_core::{application::NutrilensService, domain::credential::CredentialService};

use crate::{args::KeyCommand, render};

pub fn run(service: &NutrilensService, action: KeyCommand) -> anyhow::Result<ExitCode> {
    match action {
        KeyCommand::Status => {
            print!("{}", render::format_credential_status(&service.credential_status()));
        }
        KeyCommand::Set { key } => {
            service.store_credential(&key)?;
            println!("API key saved");
        }
        KeyCommand::Clear => {
            service.clear_credential()?;
            println!("API key cleared");
        }
    }
    Ok(ExitCode::SUCCESS)
}
