//! Bounded waiting for a device state.
//!
//! Activation is asynchronous inside NetworkManager, so after requesting it
//! the device state is polled on a fixed interval until it reaches the
//! target or the poll budget runs out. The schedule is explicit
//! ([`PollSchedule`]) and the wait can be interrupted through a
//! [`CancellationToken`].

use futures_timer::Delay;
use log::debug;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use zvariant::OwnedObjectPath;

use crate::Result;
use crate::api::models::{ConnectionError, DeviceState};
use crate::backend::NmBackend;

/// How often and how many times to poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSchedule {
    pub interval: Duration,
    pub max_polls: u32,
}

impl PollSchedule {
    pub fn new(interval: Duration, max_polls: u32) -> Self {
        Self {
            interval,
            max_polls,
        }
    }

    /// Total time the schedule may spend sleeping.
    pub fn budget(&self) -> Duration {
        self.interval * self.max_polls
    }

    /// The latest instant a wait started at `start` can end (ignoring the
    /// time spent in the state reads themselves).
    pub fn deadline(&self, start: Instant) -> Instant {
        start + self.budget()
    }
}

/// Result of a bounded wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WaitOutcome {
    /// The target state was seen after `polls` sleeps.
    Reached { polls: u32 },
    /// The budget ran out; `last_state` is the final reading.
    Exhausted { polls: u32, last_state: DeviceState },
}

/// Waits for `device` to reach `target`.
///
/// Reads the state once up front; if it already matches, returns without
/// sleeping. Otherwise performs at most `schedule.max_polls` rounds of
/// sleep-then-read, returning early on a match.
///
/// # Errors
///
/// - [`ConnectionError::Cancelled`] if `cancel` fires during a sleep
/// - any error from reading the device state
pub(crate) async fn wait_for_device_state<B>(
    backend: &B,
    device: &OwnedObjectPath,
    target: DeviceState,
    schedule: PollSchedule,
    cancel: Option<&CancellationToken>,
) -> Result<WaitOutcome>
where
    B: NmBackend + ?Sized,
{
    let mut state = backend.device_state(device).await?;
    debug!("Current device state: {state}");
    if state == target {
        return Ok(WaitOutcome::Reached { polls: 0 });
    }

    for poll in 1..=schedule.max_polls {
        match cancel {
            Some(token) => {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => return Err(ConnectionError::Cancelled),
                    _ = Delay::new(schedule.interval) => {}
                }
            }
            None => Delay::new(schedule.interval).await,
        }

        state = backend.device_state(device).await?;
        debug!("Poll {poll}/{}: device state = {state}", schedule.max_polls);
        if state == target {
            return Ok(WaitOutcome::Reached { polls: poll });
        }
    }

    Ok(WaitOutcome::Exhausted {
        polls: schedule.max_polls,
        last_state: state,
    })
}
