//! Typed representation of the INMET active alert feed.
//!
//! The feed is a JSON document with two arrays of alerts:
//!
//! ```json
//! { "hoje": [ { "id": 1, ... } ], "futuro": [ { "id": 2, ... } ] }
//! ```
//!
//! This module turns it into immutable Rust values:
//!
//! - [`Alert`]: a single alert, every wire key parsed into a typed field
//! - [`Alerts`]: the `hoje` and `futuro` lists, in source order
//! - [`Area`]: the GeoJSON polygon or multi polygon covered by an alert
//!
//! Extraction is fail fast: the first missing key or unparseable value aborts
//! the whole construction and is reported as a [`ParseError`].
//!
//! # Example Usage
//!
//! ```no_run
//! use inmet_alerts::alerts::Alerts;
//!
//! # fn example(body: serde_json::Value) -> Result<(), inmet_alerts::alerts::ParseError> {
//! let alerts = Alerts::from_json(&body)?;
//! println!("{}", alerts);
//! # Ok(())
//! # }
//! ```

mod alert;
mod alert_collection;
mod fields;
mod polygon;

pub use crate::alerts::polygon::Area;
pub use crate::alerts::{alert::Alert, alert_collection::Alerts};
#[cfg(test)]
pub(crate) use crate::alerts::alert::tests::alert_json;

use thiserror::Error;

/// Errors raised while mapping the feed JSON into [`Alert`] and [`Alerts`].
#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    /// A required key is absent from the JSON object.
    #[error("missing field `{field}`")]
    MissingField {
        /// Wire name of the absent key.
        field: &'static str,
    },
    /// The key is present but its value has the wrong type or format.
    #[error("malformed value for field `{field}`: {value} ({reason})")]
    MalformedValue {
        /// Wire name of the offending key.
        field: &'static str,
        /// Raw JSON value as found in the document.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },
    /// An alert of one of the feed lists failed to parse.
    #[error("alert {index} of `{list}`")]
    Record {
        /// Wire name of the list (`hoje` or `futuro`).
        list: &'static str,
        /// Position of the alert in the list, starting at 0.
        index: usize,
        /// The underlying failure.
        #[source]
        source: Box<ParseError>,
    },
}
