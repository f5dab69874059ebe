use crate::{
    db::{catalog::Catalog, store::Store},
    json::{Json, JsonMap},
    value::Value,
};
use rosterdb_schema::node::EntityModel;
use thiserror::Error as ThisError;

///
/// SerializeError
///
/// Fatal for the whole save call; a snapshot is all-or-nothing.
///

#[derive(Debug, ThisError, PartialEq, Eq)]
#[remain::sorted]
pub enum SerializeError {
    #[error("type '{path}' is not registered in the store")]
    NotRegistered { path: String },

    #[error("type '{path}' is not marked for snapshots")]
    NotSnapshot { path: String },

    #[error("instance of '{path}' does not project field '{field}'")]
    UnreadableField { path: String, field: String },
}

///
/// WriteOptions
///

#[derive(Clone, Copy, Debug, Default)]
pub struct WriteOptions {
    pub pretty: bool,
}

impl WriteOptions {
    #[must_use]
    pub const fn pretty() -> Self {
        Self { pretty: true }
    }
}

/// Build the snapshot document: a root object keyed `"models"`, one entry
/// per cataloged type with live instances. Types with an empty roster are
/// omitted entirely.
pub fn save(store: &Store, catalog: &Catalog) -> Result<Json, SerializeError> {
    let mut models = JsonMap::new();

    for handle in catalog.iter() {
        let model = handle.model;
        if !store.is_registered(model.path) {
            return Err(SerializeError::NotRegistered {
                path: model.path.to_string(),
            });
        }
        if store.is_empty(model.path) {
            continue;
        }
        if !model.snapshot {
            return Err(SerializeError::NotSnapshot {
                path: model.path.to_string(),
            });
        }

        let mut block = JsonMap::new();
        block.insert("static", statics(store, model));
        block.insert("objects", objects(store, model)?);
        models.insert(model.path, Json::Object(block));
    }

    let mut root = JsonMap::new();
    root.insert("models", Json::Object(models));

    Ok(Json::Object(root))
}

/// Render the snapshot straight to text.
pub fn save_to_string(
    store: &Store,
    catalog: &Catalog,
    options: &WriteOptions,
) -> Result<String, SerializeError> {
    let document = save(store, catalog)?;

    Ok(if options.pretty {
        document.to_text_pretty()
    } else {
        document.to_text()
    })
}

fn statics(store: &Store, model: &EntityModel) -> Json {
    let mut out = JsonMap::new();
    for field in model.fields.shared().filter(|f| f.in_snapshot()) {
        let value = store
            .shared_value(model.path, field.name)
            .map_or(Json::Null, Value::to_json);
        out.insert(field.name, value);
    }

    Json::Object(out)
}

fn objects(store: &Store, model: &EntityModel) -> Result<Json, SerializeError> {
    let mut rows = Vec::new();

    for instance in store.rows(model.path) {
        let mut row = JsonMap::new();
        for field in model.fields.instance().filter(|f| f.in_snapshot()) {
            let value =
                instance
                    .field_value(field.name)
                    .ok_or_else(|| SerializeError::UnreadableField {
                        path: model.path.to_string(),
                        field: field.name.to_string(),
                    })?;
            row.insert(field.name, value.to_json());
        }
        rows.push(Json::Object(row));
    }

    Ok(Json::Array(rows))
}

///
/// TESTS
///
