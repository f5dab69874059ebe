use crate::{
    Error,
    db::roster::{Roster, RosterOps},
    traits::{EntityKind, FieldValues},
    types::Timestamp,
    validate::validate_entity,
    value::Value,
};
use rosterdb_schema::{
    node::{EntityModel, FieldModel},
    types::{Arg, FieldKind},
    validate::{SchemaError, validate_model},
};
use thiserror::Error as ThisError;

///
/// StoreError
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum StoreError {
    #[error("type '{path}' is already registered")]
    AlreadyRegistered { path: String },

    #[error("type '{path}' is not registered")]
    NotRegistered { path: String },

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("type '{path}' has no shared field '{field}'")]
    UnknownSharedField { path: String, field: String },
}

///
/// Store
///
/// Explicit engine context: one roster and one shared-value table per
/// registered type, plus the now-source used by temporal checks. Replaces
/// process-wide statics; tests build a fresh store instead of clearing a
/// global. Single-threaded by design: plain owned state, no locking.
/// Confine the store to one thread or wrap it yourself.
///

pub struct Store {
    entries: Vec<TypeState>,
    now_source: fn() -> Timestamp,
}

struct TypeState {
    model: &'static EntityModel,
    roster: Box<dyn RosterOps>,
    shared: Vec<(&'static str, Value)>,
}

impl Store {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            now_source: Timestamp::now,
        }
    }

    /// A store whose "now" is supplied by the caller. Keeps `NotFuture`
    /// checks deterministic in tests.
    #[must_use]
    pub fn with_now(now_source: fn() -> Timestamp) -> Self {
        Self {
            entries: Vec::new(),
            now_source,
        }
    }

    #[must_use]
    pub fn now(&self) -> Timestamp {
        (self.now_source)()
    }

    /// Register an entity type: validates its model, seeds shared fields
    /// from their schema defaults, and installs an empty roster.
    pub fn register<E: EntityKind>(&mut self) -> Result<(), StoreError> {
        validate_model(E::MODEL)?;

        if self.is_registered(E::PATH) {
            return Err(StoreError::AlreadyRegistered {
                path: E::PATH.to_string(),
            });
        }

        let shared = E::MODEL
            .fields
            .shared()
            .filter(|f| !f.registry)
            .map(|f| (f.name, seed(f)))
            .collect();

        self.entries.push(TypeState {
            model: E::MODEL,
            roster: Box::new(Roster::<E>::new()),
            shared,
        });

        Ok(())
    }

    #[must_use]
    pub fn is_registered(&self, path: &str) -> bool {
        self.state(path).is_some()
    }

    #[must_use]
    pub fn model(&self, path: &str) -> Option<&'static EntityModel> {
        self.state(path).map(|state| state.model)
    }

    /// Validate a candidate, run its derived pass, and append it to the
    /// roster. A failed validation never produces a roster-visible entity.
    pub fn create<E: EntityKind>(&mut self, mut candidate: E) -> Result<(), Error> {
        if !self.is_registered(E::PATH) {
            return Err(StoreError::NotRegistered {
                path: E::PATH.to_string(),
            }
            .into());
        }

        validate_entity(&candidate, E::MODEL, self)?;
        candidate.init_derived();

        if let Some(roster) = self.roster_mut::<E>() {
            roster.add(candidate);
        }

        Ok(())
    }

    /// Remove one live instance. Returns whether it was present.
    pub fn remove<E: EntityKind>(&mut self, target: &E) -> bool {
        self.roster_mut::<E>().is_some_and(|r| r.remove(target))
    }

    pub fn clear<E: EntityKind>(&mut self) {
        if let Some(state) = self.state_mut(E::PATH) {
            state.roster.clear();
        }
    }

    /// Empty every roster. Shared values are left as they are.
    pub fn clear_all(&mut self) {
        for state in &mut self.entries {
            state.roster.clear();
        }
    }

    #[must_use]
    pub fn roster<E: EntityKind>(&self) -> Option<&Roster<E>> {
        self.state(E::PATH)?.roster.as_any().downcast_ref()
    }

    fn roster_mut<E: EntityKind>(&mut self) -> Option<&mut Roster<E>> {
        self.state_mut(E::PATH)?.roster.as_any_mut().downcast_mut()
    }

    /// Live-instance count for a path; zero when unregistered.
    #[must_use]
    pub fn len(&self, path: &str) -> usize {
        self.state(path).map_or(0, |state| state.roster.len())
    }

    #[must_use]
    pub fn is_empty(&self, path: &str) -> bool {
        self.len(path) == 0
    }

    /// Erased field projections of every live instance, insertion-ordered.
    #[must_use]
    pub fn rows(&self, path: &str) -> Vec<&dyn FieldValues> {
        self.state(path).map_or_else(Vec::new, |s| s.roster.rows())
    }

    #[must_use]
    pub fn shared_value(&self, path: &str, field: &str) -> Option<&Value> {
        self.state(path)?
            .shared
            .iter()
            .find_map(|(name, value)| (*name == field).then_some(value))
    }

    pub fn set_shared(&mut self, path: &str, field: &str, value: Value) -> Result<(), StoreError> {
        let state = self
            .state_mut(path)
            .ok_or_else(|| StoreError::NotRegistered {
                path: path.to_string(),
            })?;

        let slot = state
            .shared
            .iter_mut()
            .find(|(name, _)| *name == field)
            .ok_or_else(|| StoreError::UnknownSharedField {
                path: path.to_string(),
                field: field.to_string(),
            })?;
        slot.1 = value;

        Ok(())
    }

    fn state(&self, path: &str) -> Option<&TypeState> {
        self.entries.iter().find(|state| state.model.path == path)
    }

    fn state_mut(&mut self, path: &str) -> Option<&mut TypeState> {
        self.entries
            .iter_mut()
            .find(|state| state.model.path == path)
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

/// Initial shared value: the schema default literal widened to the field's
/// kind, or null when no default is declared.
#[allow(clippy::cast_precision_loss, clippy::cast_sign_loss)]
fn seed(field: &FieldModel) -> Value {
    let Some(arg) = field.default else {
        return Value::Null;
    };

    match (arg, field.kind) {
        (Arg::Int(n), FieldKind::Float32 | FieldKind::Float64) => Value::Float(n as f64),
        (Arg::Int(n), FieldKind::Timestamp) => Value::Timestamp(Timestamp::from_seconds(n as u64)),
        (Arg::Str(s), FieldKind::Enum { .. }) => Value::Enum(s.to_string()),
        _ => Value::from_arg(arg),
    }
}

///
/// TESTS
///
