//! Config commands

use anyhow::Result;
use p2p_forms::FormsConfig;

use crate::output::OutputFormat;
use crate::ConfigCommands;

pub fn handle(action: ConfigCommands, profile: Option<&str>, format: OutputFormat) -> Result<()> {
    let path = FormsConfig::config_path(profile)?;
    match action {
        ConfigCommands::Init => {
            FormsConfig::default().save_to(&path)?;
            println!("Configuration initialized at {}", path.display());
        }
        ConfigCommands::Show => {
            let config = FormsConfig::load_from(&path)?;
            format.print(&config)?;
        }
        ConfigCommands::Path => println!("{}", path.display()),
    }
    Ok(())
}
