use crate::{
    db::store::Store,
    traits::FieldValues,
    value::Value,
};
use rosterdb_schema::node::{Constraint, EntityModel, FieldModel};
use thiserror::Error as ThisError;

///
/// ValidationError
///
/// First violation found, in field-then-constraint order. Recovered at the
/// per-record boundary during load; surfaced directly on `Store::create`.
///

#[derive(Debug, ThisError, PartialEq)]
#[error("{path}.{field} failed {constraint}: {reason}")]
pub struct ValidationError {
    pub path: &'static str,
    pub field: &'static str,
    pub constraint: &'static str,
    pub reason: String,
}

/// Check a candidate against its model. Fields are read in declared order
/// (subtype first, ancestors after) and each field's constraints run in
/// their declared order; the first violation stops the check. Pure
/// predicate over already-collected candidate state; no side effects.
pub fn validate_entity(
    candidate: &dyn FieldValues,
    model: &EntityModel,
    store: &Store,
) -> Result<(), ValidationError> {
    for field in model.fields.iter() {
        if field.registry {
            continue;
        }

        let value = read(candidate, field, model, store);
        for constraint in field.constraints {
            check(candidate, &value, field, *constraint, model, store).map_err(|reason| {
                ValidationError {
                    path: model.path,
                    field: field.name,
                    constraint: constraint.name(),
                    reason,
                }
            })?;
        }
    }

    Ok(())
}

/// Instance fields project off the candidate; shared fields read from the
/// store's table. A field the candidate cannot project reads as null.
fn read(
    candidate: &dyn FieldValues,
    field: &FieldModel,
    model: &EntityModel,
    store: &Store,
) -> Value {
    if field.is_shared() {
        store
            .shared_value(model.path, field.name)
            .cloned()
            .unwrap_or(Value::Null)
    } else {
        candidate.field_value(field.name).unwrap_or(Value::Null)
    }
}

fn check(
    candidate: &dyn FieldValues,
    value: &Value,
    field: &FieldModel,
    constraint: Constraint,
    model: &EntityModel,
    store: &Store,
) -> Result<(), String> {
    match constraint {
        Constraint::Required => {
            if value.is_null() {
                return Err("value is required".to_string());
            }
        }
        Constraint::NonBlank => match value {
            Value::Text(s) if !s.trim().is_empty() => {}
            Value::Text(_) => return Err("text is blank".to_string()),
            _ => return Err("text is missing".to_string()),
        },
        Constraint::Range { min, max } => {
            let Some(n) = value.as_numeric() else {
                return Err("no numeric value to range-check".to_string());
            };
            if min.is_some_and(|lo| n < lo) || max.is_some_and(|hi| n > hi) {
                return Err(format!("{n} outside {}..{}", bound(min), bound(max)));
            }
        }
        Constraint::NonEmpty => match value.as_list() {
            Some(items) if !items.is_empty() => {}
            Some(_) => return Err("collection is empty".to_string()),
            None => return Err("collection is missing".to_string()),
        },
        Constraint::NotFuture => {
            // Null satisfies: absence is not a future reading.
            if let Some(ts) = value.as_timestamp()
                && ts > store.now()
            {
                return Err(format!("{} is in the future", ts.to_rfc3339()));
            }
        }
        Constraint::Derived => {
            if !value.is_zero_sentinel() {
                return Err(format!("derived field was pre-set to '{value}'"));
            }
        }
        Constraint::Unique => {
            // Candidate is not yet in the roster, so every row is a peer.
            if let Some(folded) = value.folded_text() {
                for peer in store.rows(model.path) {
                    let taken = peer
                        .field_value(field.name)
                        .and_then(|v| v.folded_text())
                        .is_some_and(|peer_folded| peer_folded == folded);
                    if taken {
                        return Err(format!("'{folded}' is already taken"));
                    }
                }
            }
        }
        Constraint::EitherOr { other } => {
            if value.is_null() {
                let counterpart = model
                    .field(other)
                    .map_or(Value::Null, |f| read(candidate, f, model, store));
                if counterpart.is_null() {
                    return Err(format!("both this field and '{other}' are null"));
                }
            }
        }
    }

    Ok(())
}

fn bound(end: Option<f64>) -> String {
    end.map_or_else(|| "..".to_string(), |n| n.to_string())
}

///
/// TESTS
///
