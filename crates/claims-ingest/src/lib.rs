//! Data access for the claims validation pipeline: the [`DataSource`] seam,
//! its retrying decorator, a fixture-directory implementation, claim message
//! parsing and run configuration.

mod config;
mod error;
mod fixture;
mod parser;
mod retry;
mod sleeper;
mod source;

pub use config::{Environment, EnvironmentConfig, RunConfig};
pub use error::SourceError;
pub use fixture::FixtureSource;
pub use parser::{ClaimParser, JsonClaimParser};
pub use retry::{DEFAULT_DELAY_SECS, DEFAULT_MAX_RETRIES, RetryPolicy, RetryingSource};
pub use sleeper::{MockSleeper, RealSleeper, Sleeper};
pub use source::DataSource;
