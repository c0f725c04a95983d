//! Poll scheduler — drives the gateway reader and feeds the caches.
//!
//! ```text
//!  Loading ──ok──▶ Polling ◀──ok── BackoffWait
//!     │              │   ▲             ▲
//!    err            err  └──ok─────────┤
//!     ▼              └────────────────▶┘
//!  Failed
//! ```
//!
//! `Loading` reads the device identity once. Its failure is fatal and is
//! returned from [`PollScheduler::run`]. After a successful load the first
//! poll runs immediately; every poll re-arms after
//! [`PollSettings::interval`] on success and [`PollSettings::backoff`] on
//! failure. At most one poll is in flight at a time because the next one is
//! only armed after the previous one resolved.

use std::convert::Infallible;
use std::error::Error;
use std::time::Duration;

use tokio::task::JoinHandle;

use wattbridge_domain::device::Device;
use wattbridge_domain::error::BridgeError;
use wattbridge_domain::status::StatusSnapshot;

use crate::change_cache::ChangeCache;
use crate::gateway_reader::GatewayReader;
use crate::ports::GatewayTransport;

/// Re-arm delays of the poll loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    /// Delay before the next poll after a successful one.
    pub interval: Duration,
    /// Delay before the next poll after a failed one.
    pub backoff: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            backoff: Duration::from_secs(60),
        }
    }
}

/// Lifecycle state of the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    /// Reading the device identity.
    Loading,
    /// The last poll succeeded.
    Polling,
    /// The last poll failed; waiting out the backoff delay.
    BackoffWait,
    /// The identity load failed; nothing more will run.
    Failed,
}

/// Drives [`GatewayReader`] on a timer and writes results into the caches.
///
/// The scheduler is the only writer of both caches.
pub struct PollScheduler<T> {
    reader: GatewayReader<T>,
    devices: ChangeCache<Device>,
    statuses: ChangeCache<StatusSnapshot>,
    settings: PollSettings,
    state: PollState,
}

impl<T: GatewayTransport + 'static> PollScheduler<T> {
    /// Create a scheduler in the [`PollState::Loading`] state.
    pub fn new(
        reader: GatewayReader<T>,
        devices: ChangeCache<Device>,
        statuses: ChangeCache<StatusSnapshot>,
        settings: PollSettings,
    ) -> Self {
        Self {
            reader,
            devices,
            statuses,
            settings,
            state: PollState::Loading,
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> PollState {
        self.state
    }

    /// Spawn [`run`](Self::run) on the current runtime.
    pub fn start(self) -> JoinHandle<Result<Infallible, BridgeError>> {
        tokio::spawn(self.run())
    }

    /// Load the device identity, then poll forever.
    ///
    /// Only returns when the identity load fails.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::FatalInit`] when the identity cannot be read.
    pub async fn run(mut self) -> Result<Infallible, BridgeError> {
        self.load().await?;
        loop {
            let delay = self.poll_once().await;
            tokio::time::sleep(delay).await;
        }
    }

    /// Read the device identity and seed the device cache.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::FatalInit`] wrapping the failed read or the
    /// invalid identity; the scheduler moves to [`PollState::Failed`].
    pub async fn load(&mut self) -> Result<(), BridgeError> {
        tracing::info!(device_id = %self.reader.device_id(), "loading system");
        self.state = PollState::Loading;

        match self.reader.read_site_info().await {
            Ok(device) => {
                self.devices.set(device.id.clone(), device);
                self.state = PollState::Polling;
                Ok(())
            }
            Err(err) => {
                tracing::error!(error = &err as &dyn Error, "failed to load system");
                self.state = PollState::Failed;
                Err(BridgeError::fatal_init(err))
            }
        }
    }

    /// Run one poll cycle and return the delay before the next one.
    ///
    /// A successful read replaces the status snapshot unconditionally; a
    /// failed read leaves both caches untouched.
    pub async fn poll_once(&mut self) -> Duration {
        match self.reader.read_status().await {
            Ok(snapshot) => {
                self.statuses.set(self.reader.device_id(), snapshot);
                self.state = PollState::Polling;
                self.settings.interval
            }
            Err(err) => {
                tracing::error!(
                    error = &err as &dyn Error,
                    path = err.path(),
                    retry_in_secs = self.settings.backoff.as_secs(),
                    "status poll failed"
                );
                self.state = PollState::BackoffWait;
                self.settings.backoff
            }
        }
    }
}
