use std::path::Path;

use anyhow::{Result, bail};
use colored::*;

use super::ConfigCommands;
use crate::config::{Config, config_path};

pub fn handle_config_command(command: ConfigCommands, config: Option<&Path>) -> Result<()> {
    let path = config.map(Path::to_path_buf).unwrap_or_else(config_path);

    match command {
        ConfigCommands::Path => {
            println!("{}", path.display());
        }
        ConfigCommands::Show => {
            let loaded = Config::load(config)?;
            if !path.exists() {
                println!("{}", "# no config file, showing defaults".dimmed());
            }
            print!("{}", loaded.to_toml()?);
        }
        ConfigCommands::Init { force } => {
            init_config(&path, force)?;
            println!(
                "Config written to {}",
                path.display().to_string().bright_green()
            );
        }
    }

    Ok(())
}

fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Config file already exists: {} (use --force to overwrite)",
            path.display()
        );
    }
    Config::default().save(path)
}
