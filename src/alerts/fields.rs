//! Field extraction helpers used to build [`Alert`](crate::alerts::Alert).
//!
//! Each helper looks a key up in a JSON object and converts it to a typed
//! value. A missing key yields [`ParseError::MissingField`], a present key with
//! an unusable value yields [`ParseError::MalformedValue`].

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use serde_json::{Map, Value};

use crate::alerts::{Area, ParseError};

/// Format of the bookkeeping timestamps (`created_at`, `data_inicio`, ...).
///
/// chrono treats `%.f` as optional, `TIMESTAMP_FRACTION` enforces it.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";
/// Format of the alert period bounds (`inicio`, `fim`).
pub const PERIOD_FORMAT: &str = "%Y-%m-%d %H:%M";
/// Format of the alert hours (`hora_inicio`, `hora_fim`).
pub const HOUR_FORMAT: &str = "%H:%M";

/// Fraction of second required at the end of a timestamp: 1 to 6 digits.
static TIMESTAMP_FRACTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.[0-9]{1,6}Z$").expect("timestamp fraction pattern is valid"));

static ICON_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^data:image/[^;]+;base64,").expect("icon prefix pattern is valid")
});

fn malformed(field: &'static str, value: &Value, reason: impl ToString) -> ParseError {
    ParseError::MalformedValue {
        field,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Returns the raw value stored under `field`.
pub fn get<'a>(object: &'a Map<String, Value>, field: &'static str) -> Result<&'a Value, ParseError> {
    object.get(field).ok_or(ParseError::MissingField { field })
}

pub fn integer(object: &Map<String, Value>, field: &'static str) -> Result<i64, ParseError> {
    let value = get(object, field)?;
    value
        .as_i64()
        .ok_or_else(|| malformed(field, value, "expected an integer"))
}

pub fn string(object: &Map<String, Value>, field: &'static str) -> Result<String, ParseError> {
    Ok(str_ref(object, field)?.to_owned())
}

fn str_ref<'a>(object: &'a Map<String, Value>, field: &'static str) -> Result<&'a str, ParseError> {
    let value = get(object, field)?;
    value
        .as_str()
        .ok_or_else(|| malformed(field, value, "expected a string"))
}

pub fn boolean(object: &Map<String, Value>, field: &'static str) -> Result<bool, ParseError> {
    let value = get(object, field)?;
    value
        .as_bool()
        .ok_or_else(|| malformed(field, value, "expected a boolean"))
}

/// Parses a `YYYY-MM-DDTHH:MM:SS.ffffffZ` timestamp and keeps its date part.
pub fn date(object: &Map<String, Value>, field: &'static str) -> Result<NaiveDate, ParseError> {
    Ok(timestamp(object, field)?.date())
}

/// Parses a `YYYY-MM-DDTHH:MM:SS.ffffffZ` timestamp.
///
/// The fraction of second is mandatory and has at most 6 digits.
pub fn timestamp(
    object: &Map<String, Value>,
    field: &'static str,
) -> Result<NaiveDateTime, ParseError> {
    let raw = str_ref(object, field)?;
    if !TIMESTAMP_FRACTION.is_match(raw) {
        return Err(malformed(
            field,
            &Value::from(raw),
            format!("fraction of second of 1 to 6 digits required (expected {})", TIMESTAMP_FORMAT),
        ));
    }
    date_time(object, field, TIMESTAMP_FORMAT)
}

/// Parses a `YYYY-MM-DD HH:MM` period bound.
pub fn period(object: &Map<String, Value>, field: &'static str) -> Result<NaiveDateTime, ParseError> {
    date_time(object, field, PERIOD_FORMAT)
}

fn date_time(
    object: &Map<String, Value>,
    field: &'static str,
    format: &str,
) -> Result<NaiveDateTime, ParseError> {
    let raw = str_ref(object, field)?;
    NaiveDateTime::parse_from_str(raw, format)
        .map_err(|err| malformed(field, &Value::from(raw), format!("{} (expected {})", err, format)))
}

/// Parses a `HH:MM` hour.
pub fn time(object: &Map<String, Value>, field: &'static str) -> Result<NaiveTime, ParseError> {
    let raw = str_ref(object, field)?;
    NaiveTime::parse_from_str(raw, HOUR_FORMAT).map_err(|err| {
        malformed(
            field,
            &Value::from(raw),
            format!("{} (expected {})", err, HOUR_FORMAT),
        )
    })
}

/// Splits a comma separated string field.
///
/// Segments are kept as they are: no trimming, and an empty string gives a
/// single empty segment (`""` -> `[""]`), as upstream data relies on it.
pub fn comma_list(object: &Map<String, Value>, field: &'static str) -> Result<Vec<String>, ParseError> {
    Ok(split_commas(str_ref(object, field)?))
}

pub fn split_commas(raw: &str) -> Vec<String> {
    raw.split(',').map(str::to_owned).collect()
}

/// Reads a JSON array of strings.
pub fn string_array(
    object: &Map<String, Value>,
    field: &'static str,
) -> Result<Vec<String>, ParseError> {
    let value = get(object, field)?;
    let items = value
        .as_array()
        .ok_or_else(|| malformed(field, value, "expected an array of strings"))?;

    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_owned)
                .ok_or_else(|| malformed(field, value, format!("non string item {}", item)))
        })
        .collect()
}

/// Decodes the GeoJSON geometry embedded as a string.
pub fn polygon(object: &Map<String, Value>, field: &'static str) -> Result<Area, ParseError> {
    let raw = str_ref(object, field)?;
    Area::from_geojson(raw).map_err(|reason| malformed(field, &Value::from(raw), reason))
}

/// Reads the icon and strips its `data:image/<subtype>;base64,` header.
pub fn icon(object: &Map<String, Value>, field: &'static str) -> Result<String, ParseError> {
    Ok(strip_data_uri(str_ref(object, field)?).to_owned())
}

pub fn strip_data_uri(raw: &str) -> &str {
    match ICON_PREFIX.find(raw) {
        Some(prefix) => &raw[prefix.end()..],
        None => raw,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_missing_field() {
        let obj = object(json!({}));
        assert_eq!(
            integer(&obj, "id").unwrap_err(),
            ParseError::MissingField { field: "id" }
        );
    }

    #[test]
    fn test_integer_rejects_string() {
        let obj = object(json!({"id": "12"}));
        let err = integer(&obj, "id").unwrap_err();
        assert!(matches!(
            err,
            ParseError::MalformedValue { field: "id", ref value, .. } if value == "\"12\""
        ));
    }

    #[test]
    fn test_null_is_malformed() {
        let obj = object(json!({"codigo": null}));
        assert!(matches!(
            string(&obj, "codigo").unwrap_err(),
            ParseError::MalformedValue { field: "codigo", .. }
        ));
    }

    #[test]
    fn test_boolean() {
        let obj = object(json!({"alterado": true, "encerrado": "false"}));
        assert!(boolean(&obj, "alterado").unwrap());
        assert!(matches!(
            boolean(&obj, "encerrado").unwrap_err(),
            ParseError::MalformedValue { field: "encerrado", .. }
        ));
    }

    #[test]
    fn test_date_keeps_date_part() {
        let obj = object(json!({"data_inicio": "2024-03-10T15:30:00.000000Z"}));
        assert_eq!(
            date(&obj, "data_inicio").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
        );
    }

    #[test]
    fn test_timestamp_with_fraction() {
        let obj = object(json!({"created_at": "2024-03-10T15:30:12.250000Z"}));
        let parsed = timestamp(&obj, "created_at").unwrap();
        assert_eq!(
            parsed,
            NaiveDate::from_ymd_opt(2024, 3, 10)
                .unwrap()
                .and_hms_milli_opt(15, 30, 12, 250)
                .unwrap()
        );
    }

    #[test]
    fn test_timestamp_requires_fraction() {
        let obj = object(json!({
            "created_at": "2024-03-10T15:30:00Z",
            "updated_at": "2024-03-10T15:30:00.123456789Z",
            "data_fim": "2024-03-10T15:30:00.Z"
        }));

        for field in ["created_at", "updated_at"] {
            assert!(matches!(
                timestamp(&obj, field).unwrap_err(),
                ParseError::MalformedValue { field: f, .. } if f == field
            ));
        }
        assert!(matches!(
            date(&obj, "data_fim").unwrap_err(),
            ParseError::MalformedValue { field: "data_fim", .. }
        ));
    }

    #[test]
    fn test_timestamp_short_fraction() {
        let obj = object(json!({"created_at": "2024-03-10T15:30:00.5Z"}));
        assert_eq!(
            timestamp(&obj, "created_at").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 10)
                .unwrap()
                .and_hms_milli_opt(15, 30, 0, 500)
                .unwrap()
        );
    }

    #[test]
    fn test_polygon_field() {
        let obj = object(json!({
            "poligono": "{\"type\":\"MultiPolygon\",\"coordinates\":[[[[1,1],[2,1],[2,2],[1,1]]],[[[5,5],[6,5],[6,6],[5,5]]]]}",
            "outro": "{\"type\":\"LineString\",\"coordinates\":[[1,1],[2,2]]}"
        }));

        assert_eq!(polygon(&obj, "poligono").unwrap().polygons().len(), 2);
        assert!(matches!(
            polygon(&obj, "outro").unwrap_err(),
            ParseError::MalformedValue { field: "outro", .. }
        ));
    }

    #[test]
    fn test_malformed_date_reports_raw_value() {
        let obj = object(json!({"data_inicio": "not-a-date"}));
        match date(&obj, "data_inicio").unwrap_err() {
            ParseError::MalformedValue { field, value, .. } => {
                assert_eq!(field, "data_inicio");
                assert!(value.contains("not-a-date"));
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_period() {
        let obj = object(json!({"inicio": "2024-03-10 18:00", "fim": "2024-03-10T18:00"}));
        assert_eq!(
            period(&obj, "inicio").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 10)
                .unwrap()
                .and_hms_opt(18, 0, 0)
                .unwrap()
        );
        assert!(period(&obj, "fim").is_err());
    }

    #[test]
    fn test_time() {
        let obj = object(json!({"hora_inicio": "09:45", "hora_fim": "9h45"}));
        assert_eq!(
            time(&obj, "hora_inicio").unwrap(),
            NaiveTime::from_hms_opt(9, 45, 0).unwrap()
        );
        assert!(matches!(
            time(&obj, "hora_fim").unwrap_err(),
            ParseError::MalformedValue { field: "hora_fim", .. }
        ));
    }

    #[test]
    fn test_split_commas() {
        assert_eq!(split_commas("a,b,c"), vec!["a", "b", "c"]);
        assert_eq!(split_commas(""), vec![""]);
        assert_eq!(split_commas("a,,b"), vec!["a", "", "b"]);
        assert_eq!(split_commas(" a, b"), vec![" a", " b"]);
    }

    #[test]
    fn test_string_array() {
        let obj = object(json!({"riscos": ["um", "dois"], "instrucoes": "um", "outros": [1]}));
        assert_eq!(string_array(&obj, "riscos").unwrap(), vec!["um", "dois"]);
        assert!(string_array(&obj, "instrucoes").is_err());
        assert!(string_array(&obj, "outros").is_err());
    }

    #[test]
    fn test_strip_data_uri() {
        assert_eq!(strip_data_uri("data:image/png;base64,AAAA"), "AAAA");
        assert_eq!(strip_data_uri("data:image/svg+xml;base64,BBBB"), "BBBB");
        assert_eq!(strip_data_uri("AAAA"), "AAAA");
        assert_eq!(strip_data_uri("DATA:image/png;base64,AAAA"), "DATA:image/png;base64,AAAA");
        assert_eq!(strip_data_uri("xdata:image/png;base64,AAAA"), "xdata:image/png;base64,AAAA");
    }
}
