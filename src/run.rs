//! Command execution.
//!
//! Maps each CLI command onto a single client operation, optionally
//! followed by a save.

use std::io::Write;

use thiserror::Error;

use vyos_client::config::{Command, ValidatedConfig};
use vyos_client::transport::HttpClient;
use vyos_client::{IpVersion, VyosClient};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for command execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// The router client could not be built.
    #[error("Failed to create router client: {0}")]
    ClientCreation(#[source] vyos_client::Error),

    /// The router operation failed.
    #[error("{command} failed: {source}")]
    Operation {
        /// Name of the command that failed
        command: &'static str,
        /// Underlying client error
        #[source]
        source: vyos_client::Error,
    },

    /// The change was applied but could not be saved.
    #[error("Change applied but not saved: {0}")]
    Save(#[source] vyos_client::Error),

    /// Command output could not be written.
    #[error("Failed to write output: {0}")]
    Output(#[source] std::io::Error),
}

/// Executes one command against the router configured in `config`.
///
/// # Errors
///
/// Returns an error if the client cannot be built or the command fails.
///
/// # Coverage Note
///
/// Excluded from coverage because it needs a reachable router.
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig, command: Command) -> Result<(), RunError> {
    let client = VyosClient::new(config.client).map_err(RunError::ClientCreation)?;
    let mut stdout = std::io::stdout().lock();
    execute_with(&client, &command, config.save, &mut stdout).await
}

/// Executes `command` with `client`, writing any output to `out`.
///
/// When `save` is set and the command changed the running configuration,
/// the configuration is saved afterwards.
async fn execute_with<H: HttpClient, W: Write>(
    client: &VyosClient<H>,
    command: &Command,
    save: bool,
    out: &mut W,
) -> Result<(), RunError> {
    let name = command_name(command);
    let operation = |source| RunError::Operation {
        command: name,
        source,
    };

    match command {
        Command::Init { .. } => {
            tracing::debug!("init does not contact the router");
            return Ok(());
        }
        Command::SetAddress { interface, address } => client
            .set_address(interface, address.as_deref())
            .await
            .map_err(operation)?,
        Command::DeleteAddress { interface, address } => client
            .delete_address(interface, address.as_deref())
            .await
            .map_err(operation)?,
        Command::DeleteInterface { interface } => client
            .delete_interface(interface)
            .await
            .map_err(operation)?,
        Command::AddSnat {
            rule,
            source,
            translation,
            interface,
        } => client
            .add_snat(*rule, source, translation, interface)
            .await
            .map_err(operation)?,
        Command::DeleteSnat { rule } => client.delete_snat(*rule).await.map_err(operation)?,
        Command::AddDnat {
            rule,
            destination,
            translation,
            interface,
        } => client
            .add_dnat(*rule, destination, translation, interface)
            .await
            .map_err(operation)?,
        Command::DeleteDnat { rule } => client.delete_dnat(*rule).await.map_err(operation)?,
        Command::AddRoute {
            destination,
            next_hop,
            ip_version,
        } => client
            .add_route(destination, next_hop, IpVersion::from(*ip_version))
            .await
            .map_err(operation)?,
        Command::Save => client.save_config().await.map_err(operation)?,
        Command::ShowConfig => {
            let data = client.show_configuration().await.map_err(operation)?;
            let text = serde_json::to_string_pretty(&data).unwrap_or_else(|_| data.to_string());
            writeln!(out, "{text}").map_err(RunError::Output)?;
        }
    }

    tracing::info!("{name} succeeded");

    if save && command.is_mutating() {
        client.save_config().await.map_err(RunError::Save)?;
        tracing::info!("Configuration saved");
    }

    Ok(())
}

/// Returns the CLI name of a command, for messages.
const fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Init { .. } => "init",
        Command::SetAddress { .. } => "set-address",
        Command::DeleteAddress { .. } => "delete-address",
        Command::DeleteInterface { .. } => "delete-interface",
        Command::AddSnat { .. } => "add-snat",
        Command::DeleteSnat { .. } => "delete-snat",
        Command::AddDnat { .. } => "add-dnat",
        Command::DeleteDnat { .. } => "delete-dnat",
        Command::AddRoute { .. } => "add-route",
        Command::Save => "save",
        Command::ShowConfig => "show-config",
    }
}
