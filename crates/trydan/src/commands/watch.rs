//! Continuous polling via the refresh coordinator.

use trydan_core::{ChargerStatus, Coordinator, RefreshPhase};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

pub async fn watch(interval: u64, global: &GlobalOpts) -> Result<(), CliError> {
    let mut config = crate::config::resolve(global)?;
    config.poll_interval_secs = interval;

    let coordinator = Coordinator::new(&config)?;
    // First refresh is synchronous; a failure aborts instead of starting
    // a watch that can only show nothing.
    coordinator.start().await?;

    if !global.quiet {
        eprintln!(
            "polling every {}s, Ctrl-C to stop",
            config.poll_interval().as_secs()
        );
    }
    if let Some(status) = coordinator.current_status() {
        render(&status, false, global)?;
    }

    let mut rx = coordinator.subscribe();
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = rx.borrow_and_update().clone();
                match state.phase {
                    RefreshPhase::Ready => {
                        if let Some(status) = &state.status {
                            println!();
                            render(status, false, global)?;
                        }
                    }
                    RefreshPhase::Failed => {
                        // Stale data stays on screen, flagged; a failure
                        // before any success has nothing to show.
                        if let Some(status) = &state.status {
                            println!();
                            render(status, true, global)?;
                        } else if let Some(err) = &state.last_error {
                            eprintln!("refresh failed: {err}");
                        }
                    }
                    RefreshPhase::Idle | RefreshPhase::Refreshing => {}
                }
            }
        }
    }

    coordinator.shutdown().await;
    Ok(())
}

fn render(status: &ChargerStatus, stale: bool, global: &GlobalOpts) -> Result<(), CliError> {
    match global.output {
        OutputFormat::Json => output::print_json(status),
        OutputFormat::Plain => {
            output::print_status(status, stale);
            Ok(())
        }
    }
}
