use crate::{
    MAX_ENTITY_PATH_LEN, MAX_FIELD_NAME_LEN,
    node::{Constraint, EntityModel, FieldModel},
    types::FieldKind,
};
use thiserror::Error as ThisError;

///
/// SchemaError
///

#[derive(Debug, ThisError)]
pub enum SchemaError {
    #[error("model '{path}': {message}")]
    InvalidModel { path: String, message: String },
}

/// Check one entity model for structural soundness. Findings are joined
/// into a single error so callers see the full list at once.
pub fn validate_model(model: &EntityModel) -> Result<(), SchemaError> {
    let mut issues = Vec::new();

    check_path(model, &mut issues);
    check_fields(model, &mut issues);
    check_registry(model, &mut issues);
    check_ctor(model, &mut issues);

    if issues.is_empty() {
        Ok(())
    } else {
        Err(SchemaError::InvalidModel {
            path: model.path.to_string(),
            message: issues.join("; "),
        })
    }
}

fn check_path(model: &EntityModel, issues: &mut Vec<String>) {
    if model.path.is_empty() {
        issues.push("path is empty".to_string());
    } else if model.path.len() > MAX_ENTITY_PATH_LEN {
        issues.push(format!("path exceeds {MAX_ENTITY_PATH_LEN} characters"));
    } else if !model
        .path
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | ':' | '_'))
    {
        issues.push("path contains characters outside [A-Za-z0-9._:]".to_string());
    }
}

fn check_fields(model: &EntityModel, issues: &mut Vec<String>) {
    let mut seen: Vec<&str> = Vec::new();

    for field in model.fields.iter() {
        if field.name.is_empty() {
            issues.push("field with empty name".to_string());
        } else if field.name.len() > MAX_FIELD_NAME_LEN {
            issues.push(format!(
                "field '{}' exceeds {MAX_FIELD_NAME_LEN} characters",
                field.name
            ));
        } else if !field
            .name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            issues.push(format!(
                "field '{}' contains characters outside [A-Za-z0-9_]",
                field.name
            ));
        }

        if seen.contains(&field.name) {
            issues.push(format!("duplicate field '{}'", field.name));
        }
        seen.push(field.name);

        check_field(model, field, issues);
    }
}

fn check_field(model: &EntityModel, field: &FieldModel, issues: &mut Vec<String>) {
    for constraint in field.constraints {
        match constraint {
            Constraint::Range { min, max } => {
                if !field.kind.is_numeric() {
                    issues.push(format!(
                        "range on non-numeric field '{}' ({})",
                        field.name, field.kind
                    ));
                }
                if let (Some(lo), Some(hi)) = (min, max)
                    && lo > hi
                {
                    issues.push(format!("range bounds inverted on field '{}'", field.name));
                }
            }
            Constraint::EitherOr { other } => {
                if *other == field.name {
                    issues.push(format!(
                        "either_or on field '{}' names itself as partner",
                        field.name
                    ));
                } else if model.field(other).is_none() {
                    issues.push(format!(
                        "either_or on field '{}' names unknown partner '{other}'",
                        field.name
                    ));
                }
            }
            Constraint::NonBlank if !matches!(field.kind, FieldKind::Text) => {
                issues.push(format!("non_blank on non-text field '{}'", field.name));
            }
            Constraint::NonEmpty if !matches!(field.kind, FieldKind::List(_)) => {
                issues.push(format!("non_empty on non-list field '{}'", field.name));
            }
            Constraint::NotFuture if !matches!(field.kind, FieldKind::Timestamp) => {
                issues.push(format!(
                    "not_future on non-timestamp field '{}'",
                    field.name
                ));
            }
            _ => {}
        }
    }

    if let Some(arg) = field.default {
        if field.is_instance() {
            issues.push(format!(
                "default on instance field '{}' is never applied",
                field.name
            ));
        } else if !arg.fits(field.kind) {
            issues.push(format!(
                "default literal does not fit {} field '{}'",
                field.kind, field.name
            ));
        }
    }

    if let FieldKind::Enum { variants } = field.kind
        && variants.is_empty()
    {
        issues.push(format!("enum field '{}' declares no variants", field.name));
    }
}

fn check_registry(model: &EntityModel, issues: &mut Vec<String>) {
    let registries: Vec<&FieldModel> = model.fields.iter().filter(|f| f.registry).collect();

    if registries.len() > 1 {
        issues.push(format!(
            "more than one registry field ({})",
            registries
                .iter()
                .map(|f| f.name)
                .collect::<Vec<_>>()
                .join(", ")
        ));
    }

    if let Some(field) = registries.first() {
        if !field.is_shared() {
            issues.push(format!(
                "registry field '{}' must be type-scoped",
                field.name
            ));
        }

        match field.kind {
            FieldKind::List(inner)
                if matches!(*inner, FieldKind::Ref { target } if target == model.path) => {}
            _ => issues.push(format!(
                "registry field '{}' must be a list of '{}' references",
                field.name, model.path
            )),
        }
    }
}

fn check_ctor(model: &EntityModel, issues: &mut Vec<String>) {
    let mut seen: Vec<&str> = Vec::new();
    let mut last_position: Option<usize> = None;

    for param in model.ctor {
        if seen.contains(&param.param) {
            issues.push(format!("duplicate ctor param '{}'", param.param));
        }
        seen.push(param.param);

        let position = model
            .fields
            .iter()
            .position(|f| f.name == param.field);

        let Some(position) = position else {
            issues.push(format!(
                "ctor param '{}' binds unknown field '{}'",
                param.param, param.field
            ));
            continue;
        };

        let field = &model.fields.fields[position];
        if field.registry {
            issues.push(format!(
                "ctor param '{}' binds registry field '{}'",
                param.param, param.field
            ));
        } else if field.is_shared() {
            issues.push(format!(
                "ctor param '{}' binds shared field '{}'",
                param.param, param.field
            ));
        }

        if let Some(prev) = last_position
            && position <= prev
        {
            issues.push(format!(
                "ctor param '{}' is out of field order",
                param.param
            ));
        }
        last_position = Some(position);
    }
}

///
/// TESTS
///
