use std::process::ExitCode;

use nutrilens_core::{
    application::NutrilensService,
    domain::theme::{ColorTheme, ThemeService},
};

use crate::{args::ThemeCommand, render};

pub fn run(service: &NutrilensService, action: ThemeCommand) -> anyhow::Result<ExitCode> {
    match action {
        ThemeCommand::Show => {
            let theme = service.current_theme();
            println!("{theme} ({})", theme.accent_color());
        }
        ThemeCommand::Set { name } => {
            let theme: ColorTheme = name.parse()?;
            service.set_theme(theme);
            println!("Theme set to {theme}");
        }
        ThemeCommand::List => print!("{}", render::format_theme_list(service.current_theme())),
    }
    Ok(ExitCode::SUCCESS)
}
