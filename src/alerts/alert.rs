//! A single INMET weather alert.
//!
//! This module provides the [`Alert`] struct, built field by field from one
//! element of the `hoje` or `futuro` arrays of the feed.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use log::debug;
use serde_json::Value;

use crate::alerts::{Area, ParseError, fields};

/// Maximum number of items printed for a list attribute.
///
/// Longer lists are cut when displayed, the parsed data keeps every item.
pub const MAX_DISPLAYED_ITEMS: usize = 5;

/// Indentation between the attributes of a displayed alert.
const ATTRIBUTE_SEPARATOR: &str = "\n    ";
/// Indentation before each item of a displayed list attribute.
const ITEM_SEPARATOR: &str = "\n        ";

/// A weather alert published by INMET.
///
/// Every wire key is required. Field comments give the wire key the value is
/// read from.
///
/// # Examples
///
/// ```no_run
/// # use inmet_alerts::alerts::Alert;
/// # fn example(json: serde_json::Value) -> Result<(), inmet_alerts::alerts::ParseError> {
/// let alert = Alert::from_json(&json)?;
/// println!("{} until {}", alert.description, alert.period_end);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    /// `id`
    pub id: i64,
    /// `id_aviso`
    pub advisory_id: i64,
    /// `id_sequencia`
    pub sequence_id: i64,
    /// `id_condicao_severa`, kind of severe condition
    pub severe_condition_id: i64,
    /// `id_icone`
    pub icon_id: i64,
    /// `id_usuario`, author of the alert
    pub user_id: i64,
    /// `codigo`
    pub code: String,
    /// `referencia`
    pub reference: String,
    /// `data_inicio`, date part of the timestamp
    pub start_date: NaiveDate,
    /// `data_fim`, date part of the timestamp
    pub end_date: NaiveDate,
    /// `hora_inicio`
    pub start_time: NaiveTime,
    /// `hora_fim`
    pub end_time: NaiveTime,
    /// `municipios`, affected municipalities
    pub municipalities: Vec<String>,
    /// `microrregioes`
    pub micro_regions: Vec<String>,
    /// `mesorregioes`
    pub meso_regions: Vec<String>,
    /// `estados`, affected states
    pub states: Vec<String>,
    /// `regioes`
    pub regions: Vec<String>,
    /// `geocodes`, IBGE codes of the affected cities
    pub geocodes: Vec<String>,
    /// `alterado`
    pub changed: bool,
    /// `encerrado`
    pub closed: bool,
    /// `created_at`
    pub created_at: NaiveDateTime,
    /// `updated_at`
    pub updated_at: NaiveDateTime,
    /// `inicio`, start of the alert period
    pub period_start: NaiveDateTime,
    /// `fim`, end of the alert period
    pub period_end: NaiveDateTime,
    /// `poligono`, impacted area
    pub polygon: Area,
    /// `icone`, base64 image without its data URI header
    pub icon: String,
    /// `descricao`, description of the condition
    pub description: String,
    /// `aviso_cor`, color matching the severity
    pub color_label: String,
    /// `id_severidade`
    pub severity_id: i64,
    /// `severidade`
    pub severity_label: String,
    /// `riscos`
    pub risks: Vec<String>,
    /// `instrucoes`
    pub instructions: Vec<String>,
}

impl Alert {
    /// Builds an alert from one JSON object of the feed.
    ///
    /// Keys are read in wire order and the first failure is returned.
    ///
    /// # Errors
    ///
    /// - [`ParseError::MissingField`] when a key is absent
    /// - [`ParseError::MalformedValue`] when a value has the wrong type, a date
    ///   or hour does not match its format, or the polygon is not valid GeoJSON
    pub fn from_json(json: &Value) -> Result<Self, ParseError> {
        let object = json.as_object().ok_or_else(|| ParseError::MalformedValue {
            field: "alerta",
            value: json.to_string(),
            reason: "expected a JSON object".to_string(),
        })?;

        let alert = Alert {
            id: fields::integer(object, "id")?,
            advisory_id: fields::integer(object, "id_aviso")?,
            sequence_id: fields::integer(object, "id_sequencia")?,
            severe_condition_id: fields::integer(object, "id_condicao_severa")?,
            icon_id: fields::integer(object, "id_icone")?,
            user_id: fields::integer(object, "id_usuario")?,
            code: fields::string(object, "codigo")?,
            reference: fields::string(object, "referencia")?,
            start_date: fields::date(object, "data_inicio")?,
            end_date: fields::date(object, "data_fim")?,
            start_time: fields::time(object, "hora_inicio")?,
            end_time: fields::time(object, "hora_fim")?,
            municipalities: fields::comma_list(object, "municipios")?,
            micro_regions: fields::comma_list(object, "microrregioes")?,
            meso_regions: fields::comma_list(object, "mesorregioes")?,
            states: fields::comma_list(object, "estados")?,
            regions: fields::comma_list(object, "regioes")?,
            geocodes: fields::comma_list(object, "geocodes")?,
            changed: fields::boolean(object, "alterado")?,
            closed: fields::boolean(object, "encerrado")?,
            created_at: fields::timestamp(object, "created_at")?,
            updated_at: fields::timestamp(object, "updated_at")?,
            period_start: fields::period(object, "inicio")?,
            period_end: fields::period(object, "fim")?,
            polygon: fields::polygon(object, "poligono")?,
            icon: fields::icon(object, "icone")?,
            description: fields::string(object, "descricao")?,
            color_label: fields::string(object, "aviso_cor")?,
            severity_id: fields::integer(object, "id_severidade")?,
            severity_label: fields::string(object, "severidade")?,
            risks: fields::string_array(object, "riscos")?,
            instructions: fields::string_array(object, "instrucoes")?,
        };

        debug!("parsed alert id={}, {}", alert.id, alert.polygon);

        Ok(alert)
    }
}

fn write_value(f: &mut fmt::Formatter, key: &str, value: impl fmt::Display) -> fmt::Result {
    write!(f, "{}: {}{}", key, value, ATTRIBUTE_SEPARATOR)
}

/// Flags are written `True` or `False`, as in the historical output.
fn write_flag(f: &mut fmt::Formatter, key: &str, value: bool) -> fmt::Result {
    write_value(f, key, if value { "True" } else { "False" })
}

fn write_list(f: &mut fmt::Formatter, key: &str, items: &[String]) -> fmt::Result {
    write!(f, "{}: ", key)?;
    write!(f, "{}", ITEM_SEPARATOR)?;
    let shown: Vec<&str> = items
        .iter()
        .take(MAX_DISPLAYED_ITEMS)
        .map(String::as_str)
        .collect();
    write!(f, "{}{}", shown.join(ITEM_SEPARATOR), ATTRIBUTE_SEPARATOR)
}

/// Human readable rendering, one attribute per line with its wire key.
///
/// `icone` and `poligono` are left out, lists show at most
/// [`MAX_DISPLAYED_ITEMS`] items.
impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_value(f, "id", self.id)?;
        write_value(f, "id_aviso", self.advisory_id)?;
        write_value(f, "id_sequencia", self.sequence_id)?;
        write_value(f, "id_condicao_severa", self.severe_condition_id)?;
        write_value(f, "id_icone", self.icon_id)?;
        write_value(f, "id_usuario", self.user_id)?;
        write_value(f, "codigo", &self.code)?;
        write_value(f, "referencia", &self.reference)?;
        write_value(f, "data_inicio", self.start_date)?;
        write_value(f, "data_fim", self.end_date)?;
        write_value(f, "hora_inicio", self.start_time)?;
        write_value(f, "hora_fim", self.end_time)?;
        write_list(f, "municipios", &self.municipalities)?;
        write_list(f, "microrregioes", &self.micro_regions)?;
        write_list(f, "mesorregioes", &self.meso_regions)?;
        write_list(f, "estados", &self.states)?;
        write_list(f, "regioes", &self.regions)?;
        write_list(f, "geocodes", &self.geocodes)?;
        write_flag(f, "alterado", self.changed)?;
        write_flag(f, "encerrado", self.closed)?;
        write_value(f, "created_at", self.created_at)?;
        write_value(f, "updated_at", self.updated_at)?;
        write_value(f, "inicio", self.period_start)?;
        write_value(f, "fim", self.period_end)?;
        write_value(f, "descricao", &self.description)?;
        write_value(f, "aviso_cor", &self.color_label)?;
        write_value(f, "id_severidade", self.severity_id)?;
        write_value(f, "severidade", &self.severity_label)?;
        write_list(f, "riscos", &self.risks)?;
        write_list(f, "instrucoes", &self.instructions)
    }
}
