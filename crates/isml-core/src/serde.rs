use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// An identifier as a client sent it.
///
/// Clients send ids both as JSON integers and as strings. Anything that is
/// not an integer is kept as-is, so a present but unusable id can be told
/// apart from a missing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuppliedId {
    Numeric(i64),
    Unrecognized(String),
}

impl SuppliedId {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            SuppliedId::Numeric(id) => Some(*id),
            SuppliedId::Unrecognized(_) => None,
        }
    }

    /// `None` for values that count as "no id": `null`, `0`, `""` and `false`.
    fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Null | Value::Bool(false) => None,
            Value::Number(n) => match n.as_i64() {
                Some(0) => None,
                Some(id) => Some(SuppliedId::Numeric(id)),
                None if n.as_f64() == Some(0.0) => None,
                None => Some(SuppliedId::Unrecognized(n.to_string())),
            },
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(
                s.trim()
                    .parse::<i64>()
                    .map(SuppliedId::Numeric)
                    .unwrap_or(SuppliedId::Unrecognized(s)),
            ),
            other => Some(SuppliedId::Unrecognized(other.to_string())),
        }
    }
}

/// Accepts an integer or a string id; never fails.
pub fn deserialize_supplied_id<'de, D>(deserializer: D) -> Result<Option<SuppliedId>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    Ok(value.and_then(SuppliedId::from_json))
}
