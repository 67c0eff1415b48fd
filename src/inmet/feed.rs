//! Retrieval of the active alerts as typed values.
//!
//! This module provides the [`AlertFeed`] struct that requests the INMET
//! API and maps its response into [`Alerts`].

use log::{info, warn};

use crate::alerts::Alerts;
use crate::inmet::{FeedError, Requester};

/// Fetches the active alerts through a [Requester].
///
/// # Examples
///
/// ```no_run
/// use inmet_alerts::inmet::{AlertFeed, InmetRequester};
/// use std::time::Duration;
///
/// # #[tokio::main]
/// # async fn main() {
/// let requester = InmetRequester::new("https://apiprevmet3.inmet.gov.br/avisos/ativos", Duration::from_secs(5)).unwrap();
/// let feed = AlertFeed::new(requester);
/// let alerts = feed.fetch().await.unwrap();
/// println!("{}", alerts);
/// # }
/// ```
pub struct AlertFeed<R: Requester> {
    /// Requester to interact with the INMET API
    requester: R,
}

impl<R: Requester> AlertFeed<R> {
    /// Create a new [AlertFeed].
    ///
    /// # Arguments
    ///
    /// * `requester` - An implementation of the [Requester] trait to interact with the INMET API.
    pub fn new(requester: R) -> Self {
        AlertFeed { requester }
    }

    /// Requests the feed once and parses it.
    ///
    /// Nothing is retried: a transport failure and a malformed document are
    /// both returned to the caller.
    ///
    /// # Errors
    ///
    /// - [`FeedError::Network`] when the request fails or the body is not JSON
    /// - [`FeedError::Parse`] when the document does not match the alert schema
    pub async fn fetch(&self) -> Result<Alerts, FeedError> {
        let body = self.requester.get_active_alerts().await?;
        let alerts = Alerts::from_json(&body)?;

        if alerts.is_empty() {
            warn!("no active alerts published");
            return Ok(alerts);
        }

        info!(
            "fetched {} alerts ({} today, {} future)",
            alerts.len(),
            alerts.today.len(),
            alerts.future.len()
        );

        Ok(alerts)
    }
}
