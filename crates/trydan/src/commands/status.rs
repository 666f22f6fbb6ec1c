//! One-shot status and identity commands.

use trydan_core::CoreError;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

pub async fn status(global: &GlobalOpts) -> Result<(), CliError> {
    let client = super::build_client(global)?;
    let status = client.fetch_status().await.map_err(CoreError::from)?;

    match global.output {
        OutputFormat::Json => output::print_json(&status),
        OutputFormat::Plain => {
            output::print_status(&status, false);
            Ok(())
        }
    }
}

pub async fn identity(global: &GlobalOpts) -> Result<(), CliError> {
    let config = crate::config::resolve(global)?;
    let identity = trydan_core::validate_credentials(&config).await?;

    match global.output {
        OutputFormat::Json => output::print_json(&identity),
        OutputFormat::Plain => {
            output::print_identity(&identity);
            Ok(())
        }
    }
}
