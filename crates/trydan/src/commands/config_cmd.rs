//! Config file helpers.

use crate::cli::ConfigAction;
use crate::config::{CONFIG_TEMPLATE, config_path};
use crate::error::CliError;

pub fn handle(action: ConfigAction) -> Result<(), CliError> {
    match action {
        ConfigAction::Path => {
            println!("{}", config_path().display());
            Ok(())
        }
        ConfigAction::Init { force } => {
            let path = config_path();
            if path.exists() && !force {
                return Err(CliError::ConfigExists {
                    path: path.display().to_string(),
                });
            }
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, CONFIG_TEMPLATE)?;
            eprintln!("wrote {}", path.display());
            Ok(())
        }
    }
}
