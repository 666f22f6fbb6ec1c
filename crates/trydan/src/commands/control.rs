//! Write commands: charging, parameters, modes, and maintenance.

use trydan_core::{ChargerClient, CoreError};

use crate::cli::{ChargeAction, GlobalOpts, ModeToggle, OutputFormat, SetParam};
use crate::error::CliError;
use crate::output;

/// Hardware limit of the Trydan current range.
const MAX_AMPS: u8 = 63;

fn validate_amps(amps: u8) -> Result<(), CliError> {
    if amps > MAX_AMPS {
        return Err(CliError::Validation {
            field: "amps".into(),
            reason: format!("must be 0-{MAX_AMPS}"),
        });
    }
    Ok(())
}

pub async fn charge(action: ChargeAction, global: &GlobalOpts) -> Result<(), CliError> {
    let client = super::build_client(global)?;
    match action {
        ChargeAction::Start => client.start_charging().await,
        ChargeAction::Stop => client.stop_charging().await,
    }
    .map_err(CoreError::from)?;

    acknowledge(&client, global).await
}

pub async fn set(param: SetParam, global: &GlobalOpts) -> Result<(), CliError> {
    let client = super::build_client(global)?;
    match param {
        SetParam::Current { amps } => {
            validate_amps(amps)?;
            client.set_current(amps).await
        }
        SetParam::MaxCurrent { amps } => {
            validate_amps(amps)?;
            client.set_max_current(amps).await
        }
        SetParam::MinCurrent { amps } => {
            validate_amps(amps)?;
            client.set_min_current(amps).await
        }
        SetParam::Km { km } => client.set_km_to_charge(km).await,
    }
    .map_err(CoreError::from)?;

    acknowledge(&client, global).await
}

pub async fn mode(mode: ModeToggle, global: &GlobalOpts) -> Result<(), CliError> {
    let client = super::build_client(global)?;
    match mode {
        ModeToggle::Dynamic { state } => client.set_dynamic_power(state.as_bool()).await,
        ModeToggle::Pause { state } => client.set_paused(state.as_bool()).await,
        ModeToggle::Lock { state } => client.set_locked(state.as_bool()).await,
    }
    .map_err(CoreError::from)?;

    acknowledge(&client, global).await
}

pub async fn reboot(global: &GlobalOpts) -> Result<(), CliError> {
    let client = super::build_client(global)?;
    client.restart_device().await.map_err(CoreError::from)?;

    if !global.quiet {
        eprintln!("Reboot requested -- the charger will be unreachable for a minute or two");
    }
    Ok(())
}

pub async fn reset_session(global: &GlobalOpts) -> Result<(), CliError> {
    let client = super::build_client(global)?;
    client.reset_session().await.map_err(CoreError::from)?;

    if !global.quiet {
        eprintln!("Session counters reset");
    }
    acknowledge(&client, global).await
}

/// The vendor acknowledges a write before the state actually changes;
/// re-fetch and show what it reports now so the effect is visible.
/// Best effort -- a failed follow-up never fails the command.
async fn acknowledge(client: &ChargerClient, global: &GlobalOpts) -> Result<(), CliError> {
    if global.quiet {
        return Ok(());
    }
    eprintln!("Command accepted");

    match client.fetch_status().await {
        Ok(status) => match global.output {
            OutputFormat::Json => output::print_json(&status)?,
            OutputFormat::Plain => output::print_status(&status, false),
        },
        Err(err) => tracing::debug!(error = %err, "follow-up status fetch failed"),
    }
    Ok(())
}
