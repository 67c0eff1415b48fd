//! The `hoje` and `futuro` lists of the INMET active alert feed.

use std::fmt;

use log::debug;
use serde_json::Value;

use crate::alerts::{Alert, ParseError, fields};

/// Wire key of the alerts active today.
pub const TODAY_KEY: &str = "hoje";
/// Wire key of the alerts starting in the next days.
pub const FUTURE_KEY: &str = "futuro";

/// Alerts currently published by INMET.
#[derive(Debug, Clone, PartialEq)]
pub struct Alerts {
    /// Alerts active today, in feed order.
    pub today: Vec<Alert>,
    /// Alerts of the next days, in feed order.
    pub future: Vec<Alert>,
}

impl Alerts {
    /// Builds both lists from the feed document.
    ///
    /// Construction is all or nothing: the first alert that fails to parse
    /// aborts it and is reported with its list and position.
    ///
    /// # Errors
    ///
    /// - [`ParseError::MissingField`] when `hoje` or `futuro` is absent
    /// - [`ParseError::MalformedValue`] when the document is not an object or a
    ///   list is not an array
    /// - [`ParseError::Record`] wrapping the failure of a single alert
    pub fn from_json(json: &Value) -> Result<Self, ParseError> {
        let object = json.as_object().ok_or_else(|| ParseError::MalformedValue {
            field: "avisos",
            value: json.to_string(),
            reason: "expected a JSON object".to_string(),
        })?;

        let today = parse_list(fields::get(object, TODAY_KEY)?, TODAY_KEY)?;
        let future = parse_list(fields::get(object, FUTURE_KEY)?, FUTURE_KEY)?;

        debug!(
            "parsed {} alerts for today and {} future alerts",
            today.len(),
            future.len()
        );

        Ok(Alerts { today, future })
    }

    /// Number of alerts of both lists.
    pub fn len(&self) -> usize {
        self.today.len() + self.future.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Renders the alerts of today and, when asked, the future ones.
    ///
    /// With `include_future` set to `false` the result is the same as the
    /// [`Display`](fmt::Display) implementation.
    pub fn render(&self, include_future: bool) -> String {
        let mut rendered = self.to_string();
        if include_future {
            rendered.push_str(&render_list(FUTURE_KEY, &self.future));
        }
        rendered
    }
}

fn parse_list(value: &Value, list: &'static str) -> Result<Vec<Alert>, ParseError> {
    let items = value.as_array().ok_or_else(|| ParseError::MalformedValue {
        field: list,
        value: value.to_string(),
        reason: "expected an array of alerts".to_string(),
    })?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            Alert::from_json(item).map_err(|err| ParseError::Record {
                list,
                index,
                source: Box::new(err),
            })
        })
        .collect()
}

fn render_list(key: &str, alerts: &[Alert]) -> String {
    let mut rendered = format!("{}: \n", key);
    for alert in alerts {
        rendered.push_str(&format!("  - {}\n", alert));
    }
    rendered
}

/// Renders only the alerts of today.
///
/// Future alerts are left out to keep the historical output, use
/// [`Alerts::render`] to include them.
impl fmt::Display for Alerts {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", render_list(TODAY_KEY, &self.today))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::alerts::alert_json;

    fn feed_json() -> Value {
        json!({
            "hoje": [alert_json(1), alert_json(2)],
            "futuro": [alert_json(3)]
        })
    }

    #[test]
    fn test_from_json_keeps_order() {
        let alerts = Alerts::from_json(&feed_json()).unwrap();

        assert_eq!(alerts.today.len(), 2);
        assert_eq!(alerts.today[0].id, 1);
        assert_eq!(alerts.today[1].id, 2);
        assert_eq!(alerts.future.len(), 1);
        assert_eq!(alerts.future[0].id, 3);
        assert_eq!(alerts.len(), 3);
        assert!(!alerts.is_empty());
    }

    #[test]
    fn test_empty_lists() {
        let alerts = Alerts::from_json(&json!({"hoje": [], "futuro": []})).unwrap();

        assert!(alerts.is_empty());
        assert_eq!(format!("{}", alerts), "hoje: \n");
    }

    #[test]
    fn test_missing_list() {
        assert_eq!(
            Alerts::from_json(&json!({"hoje": []})).unwrap_err(),
            ParseError::MissingField { field: "futuro" }
        );
    }

    #[test]
    fn test_list_not_an_array() {
        assert!(matches!(
            Alerts::from_json(&json!({"hoje": {}, "futuro": []})).unwrap_err(),
            ParseError::MalformedValue { field: "hoje", .. }
        ));
    }

    #[test]
    fn test_record_error_identifies_position() {
        let mut json = feed_json();
        json["futuro"][0]
            .as_object_mut()
            .unwrap()
            .remove("severidade");

        let err = Alerts::from_json(&json).unwrap_err();
        assert_eq!(
            err,
            ParseError::Record {
                list: "futuro",
                index: 0,
                source: Box::new(ParseError::MissingField {
                    field: "severidade"
                }),
            }
        );
        assert_eq!(err.to_string(), "alert 0 of `futuro`");
        assert_eq!(
            std::error::Error::source(&err).unwrap().to_string(),
            "missing field `severidade`"
        );
    }

    #[test]
    fn test_display_renders_today_only() {
        let alerts = Alerts::from_json(&feed_json()).unwrap();
        let display = format!("{}", alerts);

        assert!(display.starts_with("hoje: \n  - id: 1\n"));
        assert!(display.contains("  - id: 2\n"));
        assert!(!display.contains("id: 3\n"));
        assert!(!display.contains("futuro"));
    }

    #[test]
    fn test_render_with_future() {
        let alerts = Alerts::from_json(&feed_json()).unwrap();

        assert_eq!(alerts.render(false), format!("{}", alerts));

        let rendered = alerts.render(true);
        assert!(rendered.starts_with(&format!("{}", alerts)));
        assert!(rendered.contains("futuro: \n  - id: 3\n"));
    }
}
