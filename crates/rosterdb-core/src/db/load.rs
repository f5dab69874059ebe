use crate::{
    db::{
        catalog::{Catalog, TypeHandle},
        store::Store,
    },
    json::{Json, JsonMap, ParseError, parse},
    traits::Args,
    value::coerce,
};
use rosterdb_schema::node::EntityModel;
use tracing::{debug, warn};

///
/// LoadIssue
///
/// One recovered per-record (or per-key) failure: the type it hit, what
/// went wrong, and the offending payload rendered back to compact JSON.
///

#[derive(Debug)]
pub struct LoadIssue {
    pub path: String,
    pub detail: String,
    pub payload: String,
}

///
/// LoadReport
///

#[derive(Debug, Default)]
pub struct LoadReport {
    pub created: usize,
    pub shared_restored: usize,
    pub issues: Vec<LoadIssue>,
}

impl LoadReport {
    fn issue(&mut self, path: &str, detail: impl Into<String>, payload: &Json) {
        let detail = detail.into();
        let payload = payload.to_text();
        warn!(%path, %detail, %payload, "snapshot record skipped");
        self.issues.push(LoadIssue {
            path: path.to_string(),
            detail,
            payload,
        });
    }
}

/// Rebuild rosters and shared fields from a parsed snapshot. Per-record
/// isolation throughout: one bad record is reported and skipped, never
/// aborting the batch. A document without the expected shape is a no-op.
pub fn load(store: &mut Store, document: &Json, catalog: &Catalog) -> LoadReport {
    let mut report = LoadReport::default();

    let Some(models) = document
        .as_object()
        .and_then(|root| root.get("models"))
        .and_then(Json::as_object)
    else {
        debug!("document has no 'models' object, nothing to load");
        return report;
    };

    for (path, block) in models.iter() {
        let Some(handle) = catalog.resolve(path) else {
            report.issue(path, "unknown model path", block);
            continue;
        };
        let Some(block) = block.as_object() else {
            report.issue(path, "model block is not an object", block);
            continue;
        };

        restore_statics(store, handle.model, block, &mut report);
        construct_objects(store, handle, block, &mut report);
    }

    report
}

/// Parse, then load. A syntactically broken document is fatal for the
/// whole file.
pub fn load_str(
    store: &mut Store,
    text: &str,
    catalog: &Catalog,
) -> Result<LoadReport, ParseError> {
    let document = parse(text)?;

    Ok(load(store, &document, catalog))
}

/// Keys with no matching shared field are ignored; a value that will not
/// coerce skips that key only.
fn restore_statics(
    store: &mut Store,
    model: &EntityModel,
    block: &JsonMap,
    report: &mut LoadReport,
) {
    let Some(statics) = block.get("static").and_then(Json::as_object) else {
        return;
    };

    for (key, raw) in statics.iter() {
        let Some(field) = model.field(key).filter(|f| f.is_shared() && !f.registry) else {
            continue;
        };

        match coerce(raw, field.kind) {
            Ok(value) => {
                // Registration precedes load, so the slot exists.
                if store.set_shared(model.path, field.name, value).is_ok() {
                    report.shared_restored += 1;
                }
            }
            Err(err) => {
                report.issue(model.path, format!("static '{key}': {err}"), raw);
            }
        }
    }
}

fn construct_objects(
    store: &mut Store,
    handle: &TypeHandle,
    block: &JsonMap,
    report: &mut LoadReport,
) {
    let Some(elements) = block.get("objects").and_then(Json::as_array) else {
        return;
    };

    let model = handle.model;
    for element in elements {
        let Some(record) = element.as_object() else {
            report.issue(model.path, "record is not an object", element);
            continue;
        };

        match build_args(model, record) {
            Ok(args) => match handle.construct(store, &args) {
                Ok(()) => report.created += 1,
                Err(err) => report.issue(model.path, err.to_string(), element),
            },
            Err(detail) => report.issue(model.path, detail, element),
        }
    }
}

/// Map constructor params to record keys, coercing each to its bound
/// field's kind. An absent key reads as null; null against a non-nullable
/// param rejects the record.
fn build_args(model: &EntityModel, record: &JsonMap) -> Result<Args, String> {
    let mut values = Vec::with_capacity(model.ctor.len());

    for param in model.ctor {
        let field = model
            .field(param.field)
            .ok_or_else(|| format!("param '{}' binds no field", param.param))?;
        let raw = record.get(param.param).unwrap_or(&Json::Null);

        let value = coerce(raw, field.kind).map_err(|err| format!("param '{}': {err}", param.param))?;
        if value.is_null() && !param.nullable {
            return Err(format!("param '{}' is null", param.param));
        }
        values.push(value);
    }

    Ok(Args::new(values))
}

///
/// TESTS
///
