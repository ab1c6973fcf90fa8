use std::fs;
use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::CliResult;
use crate::cli::menu::Menu;
use crate::cli::output;
use crate::config::{expand_path, global_config_path, Settings};
use crate::domain::HospitalTree;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(style) = cli.style {
        settings.display_style = style;
    }
    debug!(?settings, "effective settings");

    match &cli.command {
        None | Some(Commands::Menu) => _menu(&settings),
        Some(Commands::Config { command }) => _config(command, cli.config.as_deref(), &settings),
        Some(Commands::Completion { shell }) => {
            _completion(*shell);
            Ok(())
        }
    }
}

#[instrument(skip(settings))]
fn _menu(settings: &Settings) -> CliResult<()> {
    let tree = HospitalTree::with_root_name(&settings.hospital_name);
    let stdin = io::stdin();
    let stdout = io::stdout();
    Menu::new(tree, stdin.lock(), stdout.lock())
        .with_style(settings.display_style)
        .run()
}

#[instrument(skip(settings))]
fn _config(command: &ConfigCommands, explicit: Option<&Path>, settings: &Settings) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::header("Effective configuration");
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::info(&format!("global: {}", path.display())),
                None => output::warning("no config directory available on this platform"),
            }
            if let Some(path) = explicit {
                output::info(&format!("explicit: {}", expand_path(path)?.display()));
            }
        }
        ConfigCommands::Init => {
            let Some(path) = global_config_path() else {
                output::warning("no config directory available on this platform");
                return Ok(());
            };
            if path.exists() {
                output::warning(&format!("config already exists: {}", path.display()));
                return Ok(());
            }
            if let Some(dir) = path.parent() {
                fs::create_dir_all(dir)?;
            }
            fs::write(&path, Settings::template())?;
            output::success(&format!("created {}", path.display()));
        }
    }
    Ok(())
}

fn _completion(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}
