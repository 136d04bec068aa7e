use chrono::{DateTime, Utc};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::api::error::ApiError;

/// Column names the purchase flow depends on. Everything else in a row passes
/// through opaquely.
pub const COL_ID: &str = "id";
pub const COL_STOCK_ACTUAL: &str = "stock_actual";
pub const COL_STOCK_MINIMO: &str = "stock_minimo";
pub const COL_NOMBRE: &str = "nombre";
pub const COL_PRECIO: &str = "precio";

/// A single sheet cell. JSON serialization is the plain primitive: numbers as
/// numbers, dates as ISO-8601 strings, text as strings.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Int(i64),
    Float(f64),
    Date(DateTime<Utc>),
    Text(String),
}

impl CellValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            CellValue::Int(v) => Some(*v),
            // whole-valued floats count, sheets do not distinguish
            CellValue::Float(v) if v.fract() == 0.0 => Some(*v as i64),
            _ => None,
        }
    }

    /// Human-readable rendition, used for card display and CSV cells.
    pub fn display(&self) -> String {
        match self {
            CellValue::Int(v) => v.to_string(),
            CellValue::Float(v) => v.to_string(),
            CellValue::Date(v) => v.to_rfc3339(),
            CellValue::Text(v) => v.clone(),
        }
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Int(v) => serializer.serialize_i64(*v),
            CellValue::Float(v) => serializer.serialize_f64(*v),
            CellValue::Date(v) => serializer.serialize_str(&v.to_rfc3339()),
            CellValue::Text(v) => serializer.serialize_str(v),
        }
    }
}

impl<'de> Deserialize<'de> for CellValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CellVisitor;

        impl<'de> Visitor<'de> for CellVisitor {
            type Value = CellValue;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a number, an ISO-8601 date string, or text")
            }

            fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<CellValue, E> {
                Ok(CellValue::Int(v))
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<CellValue, E> {
                i64::try_from(v)
                    .map(CellValue::Int)
                    .or(Ok(CellValue::Float(v as f64)))
            }

            fn visit_f64<E: serde::de::Error>(self, v: f64) -> Result<CellValue, E> {
                Ok(CellValue::Float(v))
            }

            fn visit_bool<E: serde::de::Error>(self, v: bool) -> Result<CellValue, E> {
                Ok(CellValue::Text(v.to_string()))
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<CellValue, E> {
                match DateTime::parse_from_rfc3339(v) {
                    Ok(date) => Ok(CellValue::Date(date.with_timezone(&Utc))),
                    Err(_) => Ok(CellValue::Text(v.to_string())),
                }
            }

            fn visit_unit<E: serde::de::Error>(self) -> Result<CellValue, E> {
                Ok(CellValue::Text(String::new()))
            }

            fn visit_none<E: serde::de::Error>(self) -> Result<CellValue, E> {
                Ok(CellValue::Text(String::new()))
            }
        }

        deserializer.deserialize_any(CellVisitor)
    }
}

/// One row of the tabular store, keyed by the sheet's header row.
///
/// The header defines the schema at read time; no schema is fixed in code.
/// Field order follows the header and is preserved through serialization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductRecord {
    fields: Vec<(String, CellValue)>,
}

impl ProductRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, header: impl Into<String>, value: CellValue) {
        self.fields.push((header.into(), value));
    }

    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.fields
            .iter()
            .find(|(header, _)| header == key)
            .map(|(_, value)| value)
    }

    /// Replaces an existing field in place, or appends it as a new column.
    pub fn set(&mut self, key: &str, value: CellValue) {
        match self.fields.iter_mut().find(|(header, _)| header == key) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((key.to_string(), value)),
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.fields
            .iter()
            .map(|(header, value)| (header.as_str(), value))
    }

    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(header, _)| header.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Unique integer product identifier.
    pub fn id(&self) -> Result<i64, ApiError> {
        self.int_field(COL_ID)
    }

    /// Current stock. ≥ 0 by convention, not enforced by the store.
    pub fn stock_actual(&self) -> Result<i64, ApiError> {
        self.int_field(COL_STOCK_ACTUAL)
    }

    /// Low-stock threshold.
    pub fn stock_minimo(&self) -> Result<i64, ApiError> {
        self.int_field(COL_STOCK_MINIMO)
    }

    /// Display text of a column, if present.
    pub fn text(&self, key: &str) -> Option<String> {
        self.get(key).map(CellValue::display)
    }

    fn int_field(&self, key: &str) -> Result<i64, ApiError> {
        let value = self.get(key).ok_or_else(|| {
            ApiError::validation(format!("La columna '{key}' no existe en la hoja."))
        })?;
        value.as_int().ok_or_else(|| {
            ApiError::validation(format!(
                "La columna '{key}' no contiene un número entero (valor: '{}').",
                value.display()
            ))
        })
    }
}

impl Serialize for ProductRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (header, value) in &self.fields {
            map.serialize_entry(header, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ProductRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RecordVisitor;

        impl<'de> Visitor<'de> for RecordVisitor {
            type Value = ProductRecord;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a map of column name to cell value")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<ProductRecord, A::Error> {
                let mut record = ProductRecord::new();
                while let Some((header, value)) = map.next_entry::<String, CellValue>()? {
                    record.push(header, value);
                }
                Ok(record)
            }
        }

        deserializer.deserialize_map(RecordVisitor)
    }
}
