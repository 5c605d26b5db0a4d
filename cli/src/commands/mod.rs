use std::process::ExitCode;

use nutrilens_core::{
    application::create_service,
    domain::{common::NutrilensConfig, notification::NotificationBus},
};

use crate::args::{Args, Command};

mod analyze;
mod history;
mod key;
mod theme;

/// Exit status for an attempt that stopped because no API key is configured.
pub const EXIT_KEY_MISSING: u8 = 2;

pub async fn run(args: Args) -> anyhow::Result<ExitCode> {
    let command = args.command.clone();
    let config = NutrilensConfig::from(args);
    let service = create_service(&config, NotificationBus::new());

    match command {
        Command::Analyze { image, json } => analyze::run(&service, &image, json).await,
        Command::History { action } => history::run(&service, action),
        Command::Key { action } => key::run(&service, action),
        Command::Theme { action } => theme::run(&service, action),
    }
}
