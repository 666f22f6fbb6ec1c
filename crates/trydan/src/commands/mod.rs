//! Command handlers.

mod config_cmd;
mod control;
mod status;
mod watch;

use trydan_core::{ChargerClient, CoreError};

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

pub async fn dispatch(command: Command, global: &GlobalOpts) -> Result<(), CliError> {
    match command {
        Command::Status => status::status(global).await,
        Command::Identity => status::identity(global).await,
        Command::Watch { interval } => watch::watch(interval, global).await,
        Command::Charge { action } => control::charge(action, global).await,
        Command::Set { param } => control::set(param, global).await,
        Command::Mode { mode } => control::mode(mode, global).await,
        Command::Reboot => control::reboot(global).await,
        Command::ResetSession => control::reset_session(global).await,
        Command::Config { action } => config_cmd::handle(action),
    }
}

/// Build a one-shot device client from the resolved configuration.
pub(crate) fn build_client(global: &GlobalOpts) -> Result<ChargerClient, CliError> {
    let config = crate::config::resolve(global)?;
    Ok(ChargerClient::new(&config.client_config()).map_err(CoreError::from)?)
}
