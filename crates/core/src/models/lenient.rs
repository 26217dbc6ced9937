//! Default-filling deserializers for loosely typed backend payloads.
//!
//! The backend serialises some decimals as JSON strings, omits fields it
//! has no value for, and occasionally sends `null`. Every number that
//! reaches business logic passes through here and is guaranteed finite.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Coerce a float to a finite value, mapping NaN and ±Infinity to `0.0`.
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Interpret an arbitrary JSON value as a number.
///
/// Numbers pass through, numeric strings are parsed, everything else is `0.0`.
pub fn number_from_value(value: &Value) -> f64 {
    let raw = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    finite_or_zero(raw)
}

/// `deserialize_with` target for `f64` fields. Pair with `#[serde(default)]`
/// so that a missing field also yields `0.0`.
pub fn f64_lenient<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(number_from_value).unwrap_or(0.0))
}

/// `deserialize_with` target for optional numbers: `null`, missing and
/// unparseable values all become `None`.
pub fn opt_f64_lenient<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64().filter(|v| v.is_finite()),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    })
}

/// `deserialize_with` target for `Vec<f64>` fields; each element is coerced.
pub fn vec_f64_lenient<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Vec<Value>>::deserialize(deserializer)?;
    Ok(value
        .unwrap_or_default()
        .iter()
        .map(number_from_value)
        .collect())
}

/// `deserialize_with` target for lists where `null` means "empty".
pub fn vec_or_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// `deserialize_with` target for strings where `null` means "empty".
pub fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// `deserialize_with` target for any `Default` type where `null` means
/// the default, e.g. a user's role.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// `deserialize_with` target for booleans where `null` means `false`.
pub fn bool_or_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

/// `deserialize_with` target for counters; accepts any number and clamps
/// negatives and fractions down to a `u64`.
pub fn count_lenient<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let n = value.as_ref().map(number_from_value).unwrap_or(0.0);
    Ok(if n > 0.0 { n.floor() as u64 } else { 0 })
}
