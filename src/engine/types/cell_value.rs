use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Number, Value as JsonValue};
use std::cmp::Ordering;
use std::fmt;

use crate::shared::datetime::DateParser;

/// A single record cell or bound query parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Boolean(bool),
    Int64(i64),
    Date(NaiveDate),
    Utf8(String),
    /// Array columns, e.g. the user groups a record is shared with.
    List(Vec<CellValue>),
}

impl CellValue {
    pub fn text(s: impl Into<String>) -> Self {
        CellValue::Utf8(s.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Null, blank text and empty lists carry no filter information.
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::Utf8(s) => s.trim().is_empty(),
            CellValue::List(items) => items.is_empty(),
            _ => false,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Utf8(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CellValue::Int64(i) => Some(*i),
            CellValue::Utf8(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Boolean(b) => Some(*b),
            CellValue::Utf8(s) => match s.to_ascii_lowercase().as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            CellValue::Date(d) => Some(*d),
            CellValue::Utf8(s) => DateParser::parse(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[CellValue]> {
        match self {
            CellValue::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Loose equality used by equality filters: integers match their text form,
    /// booleans match `"true"`/`"false"`.
    pub fn matches(&self, other: &CellValue) -> bool {
        if self.is_null() || other.is_null() {
            return false;
        }
        if self == other {
            return true;
        }
        if let (Some(a), Some(b)) = (self.as_i64(), other.as_i64()) {
            return a == b;
        }
        if let (Some(a), Some(b)) = (self.as_bool(), other.as_bool()) {
            return a == b;
        }
        if let (Some(a), Some(b)) = (self.as_date(), other.as_date()) {
            return a == b;
        }
        false
    }

    /// Convert to the string form used as a lookup value.
    pub fn to_string_repr(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            CellValue::Boolean(b) => b.to_string(),
            CellValue::Int64(i) => i.to_string(),
            CellValue::Date(d) => d.format("%Y-%m-%d").to_string(),
            CellValue::Utf8(s) => s.clone(),
            CellValue::List(items) => items
                .iter()
                .map(|v| v.to_string_repr())
                .collect::<Vec<_>>()
                .join(","),
        }
    }

    pub fn compare(&self, other: &Self) -> Ordering {
        if let (Some(a), Some(b)) = (self.as_i64(), other.as_i64()) {
            return a.cmp(&b);
        }
        if let (Some(a), Some(b)) = (self.as_date(), other.as_date()) {
            return a.cmp(&b);
        }
        if let (Some(a), Some(b)) = (self.as_bool(), other.as_bool()) {
            return a.cmp(&b);
        }
        self.to_string_repr().cmp(&other.to_string_repr())
    }

    pub fn to_json(&self) -> JsonValue {
        match self {
            CellValue::Null => JsonValue::Null,
            CellValue::Boolean(b) => JsonValue::Bool(*b),
            CellValue::Int64(i) => JsonValue::Number(Number::from(*i)),
            CellValue::Date(d) => JsonValue::String(d.format("%Y-%m-%d").to_string()),
            CellValue::Utf8(s) => JsonValue::String(s.clone()),
            CellValue::List(items) => JsonValue::Array(items.iter().map(|v| v.to_json()).collect()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_repr())
    }
}

impl From<JsonValue> for CellValue {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => CellValue::Null,
            JsonValue::Bool(b) => CellValue::Boolean(b),
            JsonValue::Number(num) => {
                if let Some(i) = num.as_i64() {
                    CellValue::Int64(i)
                } else {
                    CellValue::Utf8(num.to_string())
                }
            }
            // Record payloads carry dates as ISO strings
            JsonValue::String(s) => match DateParser::parse_strict_iso(&s) {
                Some(date) => CellValue::Date(date),
                None => CellValue::Utf8(s),
            },
            JsonValue::Array(items) => {
                CellValue::List(items.into_iter().map(CellValue::from).collect())
            }
            JsonValue::Object(_) => CellValue::Utf8(value.to_string()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Utf8(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Utf8(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Boolean(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Int64(value)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(value: NaiveDate) -> Self {
        CellValue::Date(value)
    }
}

impl Serialize for CellValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CellValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let json = JsonValue::deserialize(deserializer)?;
        Ok(CellValue::from(json))
    }
}
