//! HTTP client for the INMET alert API.
//!
//! This module provides the [`InmetRequester`] struct issuing the request to
//! the active alert endpoint.

use std::time::Duration;

use log::{debug, info};
use mockall::automock;
use reqwest::{Client, Error};
use serde_json::Value;

/// HTTP client for the INMET active alert feed.
///
/// # Examples
///
/// ```no_run
/// use inmet_alerts::inmet::{InmetRequester, Requester};
/// use std::time::Duration;
///
/// # async fn example() -> Result<(), reqwest::Error> {
/// let requester = InmetRequester::new("https://apiprevmet3.inmet.gov.br/avisos/ativos", Duration::from_secs(5))?;
/// let body = requester.get_active_alerts().await?;
/// println!("Feed: {}", body);
/// # Ok(())
/// # }
/// ```
pub struct InmetRequester {
    /// Url of the active alert feed
    url: String,
    /// HTTP client, configured with the request timeout
    client: Client,
}

/// Trait for requesting the INMET API.
///
/// This trait abstracts the HTTP operations for easier testing with mocks.
#[automock]
pub trait Requester {
    /// Fetches the raw JSON document of the active alerts.
    async fn get_active_alerts(&self) -> Result<Value, Error>;
}

impl InmetRequester {
    /// Create a new [InmetRequester].
    ///
    /// # Arguments
    ///
    /// * `url` - Url of the active alert feed.
    /// * `timeout` - Time limit of a whole request, from connection to body.
    ///
    /// # Errors
    ///
    /// Fails when the HTTP client cannot be initialized (TLS backend).
    pub fn new(url: &str, timeout: Duration) -> Result<Self, Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(InmetRequester {
            url: url.to_string(),
            client,
        })
    }
}

impl Requester for InmetRequester {
    /// Request the active alert feed.
    ///
    /// This api call returns a json object with the alerts of today and the
    /// alerts of the next days:
    /// ```json
    /// {
    ///   "hoje": [ { "id": 1, "descricao": "Tempestade", ... } ],
    ///   "futuro": [ { "id": 2, "descricao": "Baixa Umidade", ... } ]
    /// }
    /// ```
    /// The document is returned untouched, see
    /// [`Alerts::from_json`](crate::alerts::Alerts::from_json) for its mapping.
    ///
    /// A response with an error status is turned into an error.
    async fn get_active_alerts(&self) -> Result<Value, Error> {
        info!("request active alerts");
        debug!("request {}", &self.url);

        let body: Value = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        debug!("response from {} -> {}", &self.url, &body);

        Ok(body)
    }
}
