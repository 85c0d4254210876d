// Wrapped scalar value object
//
// Exports encode primitives either as bare JSON literals or as single-key
// wrapper objects (`{"$date": {"$numberLong": "..."}}`, `{"$numberInt": "5"}`,
// `{"$numberDouble": "12.5"}`, `{"$oid": "..."}`). Every field goes through
// `Scalar::decode` before any coercion.

use chrono::{DateTime, Utc};
use serde_json::Value;
use thiserror::Error;

use crate::utils::millis_to_utc;

#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Date(DateTime<Utc>),
    Int(i64),
    Double(f64),
    ObjectId(String),
    Plain(Value),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScalarError {
    #[error("unknown wrapper '{0}'")]
    UnknownWrapper(String),
    #[error("malformed {wrapper} wrapper: {reason}")]
    Malformed {
        wrapper: &'static str,
        reason: String,
    },
}

impl Scalar {
    pub fn decode(value: &Value) -> Result<Scalar, ScalarError> {
        let Value::Object(map) = value else {
            return Ok(Scalar::Plain(value.clone()));
        };
        if map.len() != 1 {
            return Ok(Scalar::Plain(value.clone()));
        }
        let Some((key, inner)) = map.iter().next() else {
            return Ok(Scalar::Plain(value.clone()));
        };
        if !key.starts_with('$') {
            return Ok(Scalar::Plain(value.clone()));
        }
        match key.as_str() {
            "$date" => decode_date(inner).map(Scalar::Date),
            "$numberInt" => parse_integer("$numberInt", inner).map(Scalar::Int),
            "$numberLong" => parse_integer("$numberLong", inner).map(Scalar::Int),
            "$numberDouble" => parse_double(inner).map(Scalar::Double),
            "$oid" => inner
                .as_str()
                .map(|hex| Scalar::ObjectId(hex.to_string()))
                .ok_or_else(|| malformed("$oid", "expected a string")),
            other => Err(ScalarError::UnknownWrapper(other.to_string())),
        }
    }

    /// Epoch-millis number or wrapped date.
    pub fn as_instant(&self) -> Option<DateTime<Utc>> {
        match self {
            Scalar::Date(instant) => Some(*instant),
            Scalar::Int(ms) => millis_to_utc(*ms),
            Scalar::Double(ms) => float_millis_to_utc(*ms),
            Scalar::Plain(Value::Number(number)) => match number.as_i64() {
                Some(ms) => millis_to_utc(ms),
                None => number.as_f64().and_then(float_millis_to_utc),
            },
            _ => None,
        }
    }

    /// Integer coercion: `$numberInt`/`$numberLong` or a bare integral number.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Scalar::Int(value) => Some(*value),
            Scalar::Plain(Value::Number(number)) => number.as_i64().or_else(|| {
                number
                    .as_f64()
                    .filter(|value| value.is_finite() && value.fract() == 0.0)
                    .map(|value| value as i64)
            }),
            _ => None,
        }
    }

    /// Lenient float coercion; anything that is not numeric becomes `0.0`.
    pub fn to_f64_or_zero(&self) -> f64 {
        match self {
            Scalar::Double(value) => *value,
            Scalar::Int(value) => *value as f64,
            Scalar::Plain(Value::Number(number)) => number.as_f64().unwrap_or(0.0),
            _ => 0.0,
        }
    }

    pub fn as_identifier(&self) -> Option<String> {
        match self {
            Scalar::ObjectId(hex) => Some(hex.clone()),
            Scalar::Int(value) => Some(value.to_string()),
            Scalar::Plain(Value::String(text)) => Some(text.clone()),
            Scalar::Plain(Value::Number(number)) => Some(number.to_string()),
            _ => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Scalar::Date(_) => "wrapped date",
            Scalar::Int(_) => "wrapped integer",
            Scalar::Double(_) => "wrapped double",
            Scalar::ObjectId(_) => "wrapped identifier",
            Scalar::Plain(value) => json_kind(value),
        }
    }
}

pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn decode_date(inner: &Value) -> Result<DateTime<Utc>, ScalarError> {
    match inner {
        Value::Object(map) if map.len() == 1 => {
            let raw = map
                .get("$numberLong")
                .ok_or_else(|| malformed("$date", "expected a nested $numberLong"))?;
            let ms = parse_integer("$date", raw)?;
            millis_to_utc(ms).ok_or_else(|| malformed("$date", "epoch millis out of range"))
        }
        Value::Number(number) => number
            .as_i64()
            .and_then(millis_to_utc)
            .ok_or_else(|| malformed("$date", "epoch millis out of range")),
        Value::String(text) => DateTime::parse_from_rfc3339(text.trim())
            .map(|instant| instant.with_timezone(&Utc))
            .map_err(|err| malformed("$date", &err.to_string())),
        other => Err(malformed(
            "$date",
            &format!("unexpected {}", json_kind(other)),
        )),
    }
}

fn parse_integer(wrapper: &'static str, raw: &Value) -> Result<i64, ScalarError> {
    match raw {
        Value::String(text) => text
            .trim()
            .parse::<i64>()
            .map_err(|err| malformed(wrapper, &format!("'{}': {}", text, err))),
        Value::Number(number) => number
            .as_i64()
            .ok_or_else(|| malformed(wrapper, "expected an integer")),
        other => Err(malformed(
            wrapper,
            &format!("unexpected {}", json_kind(other)),
        )),
    }
}

fn parse_double(raw: &Value) -> Result<f64, ScalarError> {
    match raw {
        Value::String(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|err| malformed("$numberDouble", &format!("'{}': {}", text, err))),
        Value::Number(number) => number
            .as_f64()
            .ok_or_else(|| malformed("$numberDouble", "expected a number")),
        other => Err(malformed(
            "$numberDouble",
            &format!("unexpected {}", json_kind(other)),
        )),
    }
}

fn float_millis_to_utc(ms: f64) -> Option<DateTime<Utc>> {
    if !ms.is_finite() {
        return None;
    }
    millis_to_utc(ms.trunc() as i64)
}

fn malformed(wrapper: &'static str, reason: &str) -> ScalarError {
    ScalarError::Malformed {
        wrapper,
        reason: reason.to_string(),
    }
}
