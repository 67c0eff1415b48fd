//! INMET alert API integration.
//!
//! # Modules
//!
//! - `requester` - HTTP client for the active alert endpoint
//! - `feed` - Request then mapping of the response into [`Alerts`](crate::alerts::Alerts)
//!
//! # Examples
//!
//! ```no_run
//! use inmet_alerts::inmet::{AlertFeed, InmetRequester};
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), anyhow::Error> {
//! let requester = InmetRequester::new("https://apiprevmet3.inmet.gov.br/avisos/ativos", Duration::from_secs(5))?;
//! let alerts = AlertFeed::new(requester).fetch().await?;
//! # Ok(())
//! # }
//! ```

mod feed;
mod requester;

pub use crate::inmet::feed::AlertFeed;
pub use crate::inmet::requester::{InmetRequester, Requester};

use thiserror::Error;

use crate::alerts::ParseError;

/// Errors that can occur while fetching the active alerts.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The request failed: connection, timeout, error status or a body that
    /// is not JSON.
    #[error("failed to request active alerts")]
    Network(#[from] reqwest::Error),
    /// The JSON document does not match the alert schema.
    #[error("invalid alert feed")]
    Parse(#[from] ParseError),
}
