//! Config command - show or locate the configuration file

use crate::cli::args::{ConfigAction, ConfigArgs};
use crate::config::ConfigManager;
use crate::error::ArmadaResult;

/// Execute the config command
pub async fn execute(args: ConfigArgs, manager: &ConfigManager) -> ArmadaResult<()> {
    match args.action {
        ConfigAction::Path => {
            println!("{}", manager.path().display());
            Ok(())
        }
        ConfigAction::Show => {
            let config = manager.load().await?;
            print!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        }
    }
}
