//! Non-blocking settings polling state machine.
//!
//! Runs on the same thread as rendering. Each `update()` call performs at
//! most one state transition and at most one bounded transport step, so
//! polling can never stall the frame loop. Every failure path resets the
//! poll timer: the next attempt waits a full interval (deliberate backoff
//! rather than immediate retry).

use embassy_time::{Duration, Instant};
use log::{debug, warn};

use crate::settings::Settings;
use crate::{NetworkAssociation, SettingsFetcher};

/// Default time between poll attempts (~0.2 Hz).
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Response body buffer size.
const MAX_RESPONSE_BYTES: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PollState {
    Idle,
    Connecting,
    Fetching,
}

/// Periodic remote settings poller.
pub struct SettingsPoller<F, A> {
    fetcher: F,
    network: A,
    state: PollState,
    poll_interval: Duration,
    last_poll: Instant,
    buf: [u8; MAX_RESPONSE_BYTES],
}

impl<F: SettingsFetcher, A: NetworkAssociation> SettingsPoller<F, A> {
    pub fn new(fetcher: F, network: A) -> Self {
        Self::with_interval(fetcher, network, DEFAULT_POLL_INTERVAL)
    }

    pub fn with_interval(fetcher: F, network: A, poll_interval: Duration) -> Self {
        Self {
            fetcher,
            network,
            state: PollState::Idle,
            poll_interval,
            last_poll: Instant::from_millis(0),
            buf: [0; MAX_RESPONSE_BYTES],
        }
    }

    /// Whether a poll attempt is currently in flight.
    pub fn is_idle(&self) -> bool {
        self.state == PollState::Idle
    }

    /// Advance the state machine by at most one step.
    ///
    /// Returns a validated settings snapshot when a fetch completed this
    /// call. Association and transport failures are swallowed here: they
    /// are logged, reset the poller, and never reach the render loop.
    pub fn update(&mut self, now: Instant) -> Option<Settings> {
        match self.state {
            PollState::Idle => {
                if now.duration_since(self.last_poll) >= self.poll_interval {
                    self.state = PollState::Connecting;
                }
                None
            }
            PollState::Connecting => {
                if self.network.is_connected() {
                    self.state = PollState::Fetching;
                } else {
                    match self.network.connect() {
                        Ok(()) => self.state = PollState::Fetching,
                        Err(err) => {
                            warn!("wifi association failed: {err:?}");
                            self.reset(now);
                        }
                    }
                }
                None
            }
            PollState::Fetching => {
                let fetched = self.fetcher.fetch(&mut self.buf);
                self.reset(now);
                match fetched {
                    Ok(len) => match Settings::from_json(&self.buf[..len]) {
                        Ok(settings) => {
                            debug!("settings fetched: {settings:?}");
                            Some(settings)
                        }
                        Err(err) => {
                            warn!("settings rejected: {err:?}");
                            None
                        }
                    },
                    Err(err) => {
                        warn!("settings fetch failed: {err:?}");
                        None
                    }
                }
            }
        }
    }

    fn reset(&mut self, now: Instant) {
        self.state = PollState::Idle;
        self.last_poll = now;
    }
}
