//! Saved connection profile management.
//!
//! Listing, name lookup and deletion of connections stored by
//! NetworkManager. Names are assumed unique; activation removes stale
//! profiles of the same name before registering a new one.

use futures_timer::Delay;
use log::debug;
use std::time::Duration;
use zvariant::OwnedObjectPath;

use crate::Result;
use crate::api::models::{ConnectionError, ConnectionSettings, ConnectionSummary};
use crate::backend::NmBackend;

/// Lists every saved connection with its name.
pub(crate) async fn list_connections<B>(backend: &B) -> Result<Vec<ConnectionSummary>>
where
    B: NmBackend + ?Sized,
{
    let mut out = Vec::new();
    for handle in backend.list_connections().await? {
        let settings = backend.connection_settings(&handle).await?;
        out.push(ConnectionSummary {
            name: settings.id,
            handle,
        });
    }
    Ok(out)
}

/// Finds a saved connection by exact name.
///
/// If several connections share the name, the first one listed wins.
pub(crate) async fn find_connection<B>(
    backend: &B,
    name: &str,
) -> Result<Option<(OwnedObjectPath, ConnectionSettings)>>
where
    B: NmBackend + ?Sized,
{
    for handle in backend.list_connections().await? {
        let settings = backend.connection_settings(&handle).await?;
        if settings.id == name {
            return Ok(Some((handle, settings)));
        }
    }
    Ok(None)
}

/// Deletes the connection called `name`, then waits `settle` for
/// NetworkManager to propagate the removal.
///
/// # Errors
///
/// [`ConnectionError::NotFound`] when no connection has that name; no
/// deletion is attempted in that case.
pub(crate) async fn delete_connection<B>(backend: &B, name: &str, settle: Duration) -> Result<()>
where
    B: NmBackend + ?Sized,
{
    let (handle, _) = find_connection(backend, name)
        .await?
        .ok_or_else(|| ConnectionError::NotFound(name.to_string()))?;

    backend.delete_connection(&handle).await?;
    debug!("Deleted connection {name} ({})", handle.as_str());

    Delay::new(settle).await;
    Ok(())
}

/// Deletes every connection of type `802-11-wireless`, then waits `settle`.
///
/// Returns how many connections were removed.
pub(crate) async fn delete_all_wireless<B>(backend: &B, settle: Duration) -> Result<usize>
where
    B: NmBackend + ?Sized,
{
    let mut deleted = 0;
    for handle in backend.list_connections().await? {
        let settings = backend.connection_settings(&handle).await?;
        if settings.is_wireless() {
            debug!("Deleting connection {}", settings.id);
            backend.delete_connection(&handle).await?;
            deleted += 1;
        }
    }

    Delay::new(settle).await;
    Ok(deleted)
}

/// Deletes every connection called `name` without waiting.
///
/// Returns how many connections were removed.
pub(crate) async fn purge_named<B>(backend: &B, name: &str) -> Result<usize>
where
    B: NmBackend + ?Sized,
{
    let mut deleted = 0;
    for handle in backend.list_connections().await? {
        let settings = backend.connection_settings(&handle).await?;
        if settings.id == name {
            backend.delete_connection(&handle).await?;
            deleted += 1;
        }
    }
    Ok(deleted)
}
