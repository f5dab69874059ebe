use crate::{json::Json, types::Timestamp, value::Value};
use rosterdb_schema::types::FieldKind;
use thiserror::Error as ThisError;

///
/// CoercionError
///
/// Recovered at the per-record boundary during load; one bad value skips
/// its record, never the batch.
///

#[derive(Debug, ThisError, PartialEq)]
#[remain::sorted]
pub enum CoercionError {
    #[error("cannot read {found} as {kind}")]
    KindMismatch { kind: &'static str, found: &'static str },

    #[error("number {text} does not fit {kind}")]
    OutOfRange { kind: &'static str, text: String },

    #[error("'{variant}' is not a declared variant")]
    UnknownVariant { variant: String },

    #[error("cannot parse '{text}' as a number")]
    UnparsableNumber { text: String },

    #[error("cannot parse '{text}' as a timestamp")]
    UnparsableTimestamp { text: String },
}

/// Coerce one parsed token to a field's declared kind.
///
/// `null` coerces to `Value::Null` for every kind; whether null is
/// acceptable is the constructor binding's call, not the matrix's.
pub fn coerce(source: &Json, kind: FieldKind) -> Result<Value, CoercionError> {
    if source.is_null() {
        return Ok(Value::Null);
    }

    match kind {
        FieldKind::Text => text(source),
        FieldKind::Int32 => int32(source),
        FieldKind::Int64 => int64(source),
        FieldKind::Float32 | FieldKind::Float64 => float(source, kind),
        FieldKind::Bool => boolean(source),
        FieldKind::Char => character(source),
        FieldKind::Enum { variants } => variant(source, variants),
        FieldKind::Timestamp => timestamp(source),
        FieldKind::List(inner) => list(source, inner),
        // The flat format carries no resolvable identity; only null loads.
        FieldKind::Ref { .. } => Err(mismatch(kind, source)),
    }
}

const fn mismatch(kind: FieldKind, source: &Json) -> CoercionError {
    CoercionError::KindMismatch {
        kind: kind.name(),
        found: source.kind_name(),
    }
}

fn text(source: &Json) -> Result<Value, CoercionError> {
    match source {
        Json::Str(s) => Ok(Value::Text(s.clone())),
        Json::Bool(b) => Ok(Value::Text(b.to_string())),
        Json::Int(n) => Ok(Value::Text(n.to_string())),
        Json::Float(f) => Ok(Value::Text(format!("{f:?}"))),
        _ => Err(mismatch(FieldKind::Text, source)),
    }
}

fn int32(source: &Json) -> Result<Value, CoercionError> {
    let wide = integral(source, FieldKind::Int32)?;

    if i32::try_from(wide).is_ok() {
        Ok(Value::Int(wide))
    } else {
        Err(CoercionError::OutOfRange {
            kind: FieldKind::Int32.name(),
            text: wide.to_string(),
        })
    }
}

fn int64(source: &Json) -> Result<Value, CoercionError> {
    integral(source, FieldKind::Int64).map(Value::Int)
}

/// A fraction or exponent in a string token switches to float parsing with
/// truncation toward zero, matching the numeric-token path.
fn integral(source: &Json, kind: FieldKind) -> Result<i64, CoercionError> {
    match source {
        Json::Int(n) => Ok(*n),
        Json::Float(f) => truncate(*f, kind),
        Json::Str(s) => {
            let trimmed = s.trim();
            if trimmed.contains(['.', 'e', 'E']) {
                let f = trimmed
                    .parse::<f64>()
                    .map_err(|_| CoercionError::UnparsableNumber {
                        text: trimmed.to_string(),
                    })?;
                truncate(f, kind)
            } else {
                trimmed
                    .parse::<i64>()
                    .map_err(|_| CoercionError::UnparsableNumber {
                        text: trimmed.to_string(),
                    })
            }
        }
        _ => Err(mismatch(kind, source)),
    }
}

#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn truncate(f: f64, kind: FieldKind) -> Result<i64, CoercionError> {
    let whole = f.trunc();
    if whole.is_finite() && whole >= i64::MIN as f64 && whole <= i64::MAX as f64 {
        Ok(whole as i64)
    } else {
        Err(CoercionError::OutOfRange {
            kind: kind.name(),
            text: format!("{f:?}"),
        })
    }
}

#[allow(clippy::cast_precision_loss)]
fn float(source: &Json, kind: FieldKind) -> Result<Value, CoercionError> {
    match source {
        Json::Int(n) => Ok(Value::Float(*n as f64)),
        Json::Float(f) => Ok(Value::Float(*f)),
        Json::Str(s) => s
            .trim()
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| CoercionError::UnparsableNumber {
                text: s.trim().to_string(),
            }),
        _ => Err(mismatch(kind, source)),
    }
}

/// Boolean `true`, or a text form case-insensitively equal to "true", "1",
/// or "yes". Everything else readable is false.
fn boolean(source: &Json) -> Result<Value, CoercionError> {
    match source {
        Json::Bool(b) => Ok(Value::Bool(*b)),
        Json::Str(s) => {
            let lowered = s.trim().to_lowercase();
            Ok(Value::Bool(matches!(lowered.as_str(), "true" | "1" | "yes")))
        }
        Json::Int(n) => Ok(Value::Bool(*n == 1)),
        _ => Err(mismatch(FieldKind::Bool, source)),
    }
}

/// First character of the text form; the null character when empty.
fn character(source: &Json) -> Result<Value, CoercionError> {
    let text = match source {
        Json::Str(s) => s.clone(),
        Json::Int(n) => n.to_string(),
        Json::Float(f) => format!("{f:?}"),
        Json::Bool(b) => b.to_string(),
        _ => return Err(mismatch(FieldKind::Char, source)),
    };

    Ok(Value::Char(text.chars().next().unwrap_or('\0')))
}

fn variant(source: &Json, variants: &'static [&'static str]) -> Result<Value, CoercionError> {
    match source {
        Json::Str(s) if variants.contains(&s.as_str()) => Ok(Value::Enum(s.clone())),
        Json::Str(s) => Err(CoercionError::UnknownVariant { variant: s.clone() }),
        _ => Err(mismatch(FieldKind::Enum { variants }, source)),
    }
}

fn timestamp(source: &Json) -> Result<Value, CoercionError> {
    match source {
        Json::Int(n) => u64::try_from(*n)
            .map(|secs| Value::Timestamp(Timestamp::from_seconds(secs)))
            .map_err(|_| CoercionError::UnparsableTimestamp {
                text: n.to_string(),
            }),
        Json::Str(s) => Timestamp::parse_flexible(s)
            .map(Value::Timestamp)
            .map_err(|_| CoercionError::UnparsableTimestamp { text: s.clone() }),
        _ => Err(mismatch(FieldKind::Timestamp, source)),
    }
}

fn list(source: &Json, inner: &'static FieldKind) -> Result<Value, CoercionError> {
    let Some(items) = source.as_array() else {
        return Err(mismatch(FieldKind::List(inner), source));
    };

    items
        .iter()
        .map(|item| coerce(item, *inner))
        .collect::<Result<Vec<_>, _>>()
        .map(Value::List)
}

///
/// TESTS
///
