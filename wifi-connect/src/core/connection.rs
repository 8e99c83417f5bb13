use futures_timer::Delay;
use log::{debug, info, warn};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::Result;
use crate::api::builders::ConnectionProfile;
use crate::api::models::{ConnectionError, DeviceState};
use crate::backend::NmBackend;
use crate::core::connection_settings::{find_connection, purge_named};
use crate::core::device::find_device_for_connection;
use crate::core::state_wait::{PollSchedule, WaitOutcome, wait_for_device_state};

/// Parameters of one activation run.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ActivationPlan<'a> {
    pub schedule: PollSchedule,
    /// Pause after purging stale profiles.
    pub settle: Duration,
    pub cancel: Option<&'a CancellationToken>,
}

/// Registers `profile` under `name`, activates it on a suitable device and
/// waits for the device to report `Activated`.
///
/// Profiles already saved under `name` are deleted first, so the lookup
/// after registration always resolves to the one just added.
///
/// # Errors
///
/// - [`ConnectionError::NotFound`] if the new profile cannot be found
///   by name after registration
/// - [`ConnectionError::NoSuitableDevice`] if no device can carry the
///   profile's connection type (activation is not attempted)
/// - [`ConnectionError::ActivationTimeout`] if the poll budget runs out
/// - [`ConnectionError::Cancelled`] if the wait is cancelled
/// - any D-Bus error along the way
pub(crate) async fn activate<B>(
    backend: &B,
    profile: ConnectionProfile,
    name: &str,
    plan: ActivationPlan<'_>,
) -> Result<()>
where
    B: NmBackend + ?Sized,
{
    let stale = purge_named(backend, name).await?;
    if stale > 0 {
        warn!("Removed {stale} stale connection(s) named {name}");
        Delay::new(plan.settle).await;
    }

    let added = backend.add_connection(profile).await?;
    debug!("Added connection {name} at {}", added.as_str());

    let (conn_path, settings) = find_connection(backend, name)
        .await?
        .ok_or_else(|| ConnectionError::NotFound(name.to_string()))?;

    let device = find_device_for_connection(backend, &settings.connection_type).await?;

    backend.activate_connection(&conn_path, &device).await?;
    debug!("Activated connection={name}");
    debug!("Waiting for connection to become active...");

    match wait_for_device_state(
        backend,
        &device,
        DeviceState::Activated,
        plan.schedule,
        plan.cancel,
    )
    .await?
    {
        WaitOutcome::Reached { polls } => {
            info!("Connection {name} is live (after {polls} polls)");
            Ok(())
        }
        WaitOutcome::Exhausted { polls, last_state } => Err(ConnectionError::ActivationTimeout {
            name: name.to_string(),
            polls,
            last_state,
        }),
    }
}
