use chrono::NaiveDate;
use indexmap::IndexMap;
use serde_json::Value as JsonValue;

use crate::engine::errors::ValidationError;
use crate::engine::types::CellValue;
use crate::shared::datetime::DateParser;

/// Raw `{from, to}` bounds as supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DateRangeInput {
    pub from: Option<String>,
    pub to: Option<String>,
}

impl DateRangeInput {
    pub fn new(from: Option<&str>, to: Option<&str>) -> Self {
        Self {
            from: from.map(str::to_string),
            to: to.map(str::to_string),
        }
    }

    /// Parses both bounds. Blank bounds count as absent; anything else that is
    /// not a date is rejected.
    pub fn parse(
        &self,
        filter: &str,
    ) -> Result<(Option<NaiveDate>, Option<NaiveDate>), ValidationError> {
        let parse_bound = |bound: &Option<String>| -> Result<Option<NaiveDate>, ValidationError> {
            match bound.as_deref().map(str::trim) {
                None | Some("") => Ok(None),
                Some(raw) => DateParser::parse(raw).map(Some).ok_or_else(|| {
                    ValidationError::InvalidDate {
                        filter: filter.to_string(),
                        value: raw.to_string(),
                    }
                }),
            }
        };
        Ok((parse_bound(&self.from)?, parse_bound(&self.to)?))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Absent,
    DateRange(DateRangeInput),
    Equality(CellValue),
    Flag(bool),
}

impl FilterValue {
    pub fn is_absent(&self) -> bool {
        match self {
            FilterValue::Absent => true,
            FilterValue::Equality(v) => v.is_empty(),
            FilterValue::DateRange(r) => {
                r.from.as_deref().is_none_or(|s| s.trim().is_empty())
                    && r.to.as_deref().is_none_or(|s| s.trim().is_empty())
            }
            FilterValue::Flag(_) => false,
        }
    }

    fn from_json(name: &str, value: &JsonValue) -> Result<Self, ValidationError> {
        let malformed = |reason: &str| ValidationError::MalformedFilter {
            filter: name.to_string(),
            reason: reason.to_string(),
        };
        match value {
            JsonValue::Null => Ok(FilterValue::Absent),
            JsonValue::Bool(b) => Ok(FilterValue::Flag(*b)),
            JsonValue::Number(n) => Ok(FilterValue::Equality(match n.as_i64() {
                Some(i) => CellValue::Int64(i),
                None => CellValue::Utf8(n.to_string()),
            })),
            JsonValue::String(s) if s.trim().is_empty() => Ok(FilterValue::Absent),
            JsonValue::String(s) => Ok(FilterValue::Equality(CellValue::Utf8(s.clone()))),
            JsonValue::Object(map) => {
                let mut range = DateRangeInput::default();
                for (key, bound) in map {
                    let text = match bound {
                        JsonValue::Null => None,
                        JsonValue::String(s) => Some(s.clone()),
                        _ => return Err(malformed("date bounds must be strings")),
                    };
                    match key.as_str() {
                        "from" => range.from = text,
                        "to" => range.to = text,
                        other => return Err(malformed(&format!("unexpected key '{other}'"))),
                    }
                }
                Ok(FilterValue::DateRange(range))
            }
            JsonValue::Array(_) => Err(malformed("list values are not supported")),
        }
    }
}

/// Caller-supplied filters, keyed by filter name, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSpec {
    filters: IndexMap<String, FilterValue>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: FilterValue) -> Self {
        self.insert(name, value);
        self
    }

    pub fn with_date_range(self, name: &str, from: Option<&str>, to: Option<&str>) -> Self {
        self.with(name, FilterValue::DateRange(DateRangeInput::new(from, to)))
    }

    pub fn insert(&mut self, name: &str, value: FilterValue) {
        self.filters.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> Option<&FilterValue> {
        self.filters.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.filters.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Parses `{"incident_date": {"from": "...", "to": "..."}, "ctfmr_verified": true}`.
    pub fn from_json(value: &JsonValue) -> Result<Self, ValidationError> {
        let JsonValue::Object(map) = value else {
            return Err(ValidationError::MalformedFilter {
                filter: "<filters>".to_string(),
                reason: "filters must be a JSON object".to_string(),
            });
        };
        let mut spec = FilterSpec::new();
        for (name, raw) in map {
            spec.insert(name, FilterValue::from_json(name, raw)?);
        }
        Ok(spec)
    }
}

impl FromIterator<(String, FilterValue)> for FilterSpec {
    fn from_iter<I: IntoIterator<Item = (String, FilterValue)>>(iter: I) -> Self {
        Self {
            filters: iter.into_iter().collect(),
        }
    }
}
