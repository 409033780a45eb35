#![no_std]

pub mod bounds;
pub mod color;
pub mod engine;
pub mod main_loop;
pub mod math8;
pub mod palette;
pub mod particle;
pub mod poller;
pub mod rng;
pub mod settings;

pub use bounds::{MatrixBounds, Point};
pub use color::{Rgb, blend_colors, rgb_from_u32};
pub use engine::AnimationEngine;
pub use main_loop::{MainLoop, RETRY_BACKOFF, TickResult};
pub use palette::{Palette, PaletteSlot};
pub use particle::{Particle, ParticlePool};
pub use poller::{DEFAULT_POLL_INTERVAL, SettingsPoller};
pub use rng::SparkleRng;
pub use settings::{Settings, SettingsError};

pub use embassy_time::{Duration, Instant};

/// Abstract display sink trait
///
/// Implement this trait to support different matrix hardware.
/// The animation engine is generic over this trait.
pub trait DisplaySink {
    /// Commit a rendered frame to the physical output.
    ///
    /// Expected to be bounded-time; a failure is transient and the
    /// caller retries on the next frame.
    fn render(&mut self, frame: &[Rgb]) -> Result<(), DisplayError>;
}

/// Error returned when the display sink fails to commit a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayError;

/// Error returned when WiFi association fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinError;

/// Error returned by a bounded settings fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportError {
    /// Could not open a connection to the settings endpoint.
    ConnectionFailed,
    /// The fetch exceeded its per-call timeout.
    Timeout,
    /// The response body did not fit the provided buffer.
    ResponseTooLarge,
}

/// Network association capability (WiFi join)
pub trait NetworkAssociation {
    /// Check whether the station is currently associated.
    fn is_connected(&self) -> bool;

    /// Attempt to (re)join the configured access point.
    ///
    /// Credentials are owned by the implementation; they are typically
    /// sourced from the process environment at startup.
    fn connect(&mut self) -> Result<(), JoinError>;
}

/// Remote settings fetch capability
///
/// One call performs a single bounded HTTP GET against the configured
/// URL (with the API key as a query parameter when one is set) and
/// writes the response body into `buf`.
pub trait SettingsFetcher {
    /// Fetch the settings document, returning the body length.
    ///
    /// Must be bounded by an internal timeout (reported as
    /// [`TransportError::Timeout`]) and must release the underlying
    /// response resource on every exit path, including failures.
    fn fetch(&mut self, buf: &mut [u8]) -> Result<usize, TransportError>;
}
