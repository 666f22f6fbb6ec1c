//! Human-readable rendering of charger state.

use owo_colors::OwoColorize;
use serde::Serialize;

use trydan_core::{ChargeState, ChargerStatus, DeviceIdentity};

use crate::error::CliError;

pub fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn state_label(state: ChargeState) -> String {
    match state {
        ChargeState::Disconnected => "disconnected".dimmed().to_string(),
        ChargeState::ConnectedNotCharging => "connected (not charging)".cyan().to_string(),
        ChargeState::ConnectedCharging => "charging".green().bold().to_string(),
        ChargeState::Error => "error".red().bold().to_string(),
        ChargeState::Paused => "paused".yellow().to_string(),
        ChargeState::Unknown => "unknown".dimmed().to_string(),
    }
}

pub fn print_status(status: &ChargerStatus, stale: bool) {
    if stale {
        eprintln!(
            "{}",
            "warning: showing stale data (last refresh failed)".yellow()
        );
    }

    println!("State        {}", state_label(status.charge_state));
    println!("Power        {:.0} W", status.charge_power);
    println!(
        "Current      {} A (set {}, range {}-{})",
        status.charge_current, status.intensity, status.min_intensity, status.max_intensity
    );
    println!("Voltage      {:.0} V", status.voltage);
    println!(
        "Session      {:.0} Wh over {} min",
        status.session_energy, status.session_time
    );
    println!("Charged      {:.0} Wh", status.charge_energy);
    println!("Total        {:.1} kWh", status.total_energy / 1000.0);
    println!("Temperature  {:.1} C", status.temperature);
    println!("WiFi         {} dBm", status.wifi_signal);
    println!("Firmware     {}", status.firmware_version);

    let mut modes = Vec::new();
    if status.dynamic_power {
        modes.push("dynamic");
    }
    if status.paused {
        modes.push("paused");
    }
    if status.locked {
        modes.push("locked");
    }
    if !modes.is_empty() {
        println!("Modes        {}", modes.join(", "));
    }
    if !status.last_updated.is_empty() {
        println!("Updated      {}", status.last_updated);
    }
}

pub fn print_identity(identity: &DeviceIdentity) {
    println!("Device   {}", identity.name.bold());
    println!("Id       {}", identity.device_id);
    println!("Serial   {}", identity.serial_number);
}
